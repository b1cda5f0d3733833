use crate::error::ActionFailed;
use crate::guard;
use crate::policy::{self, NestedPanic};
use std::fmt::{Debug, Formatter};
use std::panic;

/// A deferred action that reports failure through a `Result`
pub trait TryAction {
    type Error;

    fn try_run(self) -> Result<(), Self::Error>;
}

impl<F, E> TryAction for F
where
    F: FnOnce() -> Result<(), E>,
{
    type Error = E;

    fn try_run(self) -> Result<(), E> {
        self()
    }
}

/// TryGuard is a [`Guard`](crate::Guard) for fallible actions.
///
/// Call [`finish`](TryGuard::finish) to run the action and get its error back as a
/// value. If the guard is dropped instead, an `Err` has nowhere to be returned to, so
/// it is raised as a panic carrying [`ActionFailed`] with the original error inside.
///
/// ```
/// use defer_guard::{ActionFailed, TryGuard};
///
/// let g = TryGuard::new(|| Err::<(), _>("flush failed"));
/// assert_eq!(g.finish(), Err(ActionFailed("flush failed")));
/// ```
pub struct TryGuard<F>
where
    F: TryAction,
    F::Error: Send + 'static,
{
    action: Option<F>,
    policy: NestedPanic,
}

impl<F> TryGuard<F>
where
    F: TryAction,
    F::Error: Send + 'static,
{
    pub fn new(action: F) -> TryGuard<F> {
        Self {
            action: Some(action),
            policy: policy::default_policy(),
        }
    }

    pub fn on_nested_panic(mut self, policy: NestedPanic) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> NestedPanic {
        self.policy
    }

    pub fn is_armed(&self) -> bool {
        self.action.is_some()
    }

    pub fn disarm(&mut self) -> Option<F> {
        self.action.take()
    }

    pub fn dismiss(mut self) -> Option<F> {
        self.disarm()
    }

    pub fn transfer(&mut self) -> TryGuard<F> {
        Self {
            action: self.action.take(),
            policy: self.policy,
        }
    }

    /// Run the action now and return its result. A disarmed guard returns `Ok(())`.
    pub fn finish(mut self) -> Result<(), ActionFailed<F::Error>> {
        match self.action.take() {
            Some(action) => action.try_run().map_err(ActionFailed),
            None => Ok(()),
        }
    }
}

impl<F> Debug for TryGuard<F>
where
    F: TryAction,
    F::Error: Send + 'static,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TryGuard")
            .field("armed", &self.is_armed())
            .field("policy", &self.policy)
            .finish()
    }
}

impl<F> Drop for TryGuard<F>
where
    F: TryAction,
    F::Error: Send + 'static,
{
    fn drop(&mut self) {
        if let Some(action) = self.action.take() {
            guard::run(
                move || {
                    if let Err(e) = action.try_run() {
                        panic::panic_any(ActionFailed(e));
                    }
                },
                self.policy,
            );
        }
    }
}
