use crate::error::panic_message;
use crate::policy::{self, NestedPanic};
use std::fmt::{Debug, Formatter};
use std::panic::{self, AssertUnwindSafe};

/// Guard owns a deferred action and runs it once when dropped.
///
/// The action lives in an `Option` slot which is emptied before the action is
/// called, so a guard never runs its action twice. A guard is not `Clone`,
/// duplicating it does not compile:
///
/// ```compile_fail
/// let g = defer_guard::Guard::new(|| println!("cleanup"));
/// let copy = g.clone();
/// ```
///
/// Moving a guard hands the action to the new owner; the old binding is dead:
///
/// ```compile_fail
/// let g = defer_guard::Guard::new(|| println!("cleanup"));
/// let owner = g;
/// assert!(g.is_armed());
/// ```
///
/// ```
/// use std::cell::Cell;
/// use defer_guard::Guard;
///
/// let hits = Cell::new(0);
/// {
///     let _g = Guard::new(|| hits.set(hits.get() + 1));
///     assert_eq!(hits.get(), 0);
/// }
/// assert_eq!(hits.get(), 1);
/// ```
pub struct Guard<F: FnOnce()> {
    action: Option<F>,
    policy: NestedPanic,
}

impl<F: FnOnce()> Guard<F> {
    /// Arm a guard with `action`. The action is captured, not called.
    pub fn new(action: F) -> Guard<F> {
        Self {
            action: Some(action),
            policy: policy::default_policy(),
        }
    }

    /// Override what happens if the action panics while the thread is already unwinding
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

    /// Cancel in place. The guard stays alive but its drop becomes a no-op.
    pub fn disarm(&mut self) -> Option<F> {
        let action = self.action.take();
        if action.is_some() {
            tracing::trace!("deferred action disarmed");
        }
        action
    }

    /// Cancel and consume the guard, handing the action back
    pub fn dismiss(mut self) -> Option<F> {
        self.disarm()
    }

    /// Move the action out of a place that cannot itself be moved (a field, a `&mut`),
    /// leaving this guard disarmed.
    pub fn transfer(&mut self) -> Guard<F> {
        Self {
            action: self.action.take(),
            policy: self.policy,
        }
    }

    /// Run the action now instead of at scope end
    pub fn fire(mut self) {
        if let Some(action) = self.action.take() {
            run(action, self.policy);
        }
    }
}

/// Arm a guard with `action`, see [`Guard::new`]
pub fn guard<F: FnOnce()>(action: F) -> Guard<F> {
    Guard::new(action)
}

impl<F: FnOnce()> Default for Guard<F> {
    /// A guard that was never armed
    fn default() -> Self {
        Self {
            action: None,
            policy: policy::default_policy(),
        }
    }
}

impl<F: FnOnce()> Debug for Guard<F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Guard")
            .field("armed", &self.is_armed())
            .field("policy", &self.policy)
            .finish()
    }
}

impl<F: FnOnce()> Drop for Guard<F> {
    fn drop(&mut self) {
        if let Some(action) = self.action.take() {
            run(action, self.policy);
        }
    }
}

/// Invoke a deferred action on the current thread.
///
/// Outside of unwinding a panic from `action` propagates untouched. While
/// unwinding, `policy` decides between catching the second panic and letting the
/// runtime abort.
pub(crate) fn run<F: FnOnce()>(action: F, policy: NestedPanic) {
    if !std::thread::panicking() || policy == NestedPanic::Abort {
        tracing::trace!("running deferred action");
        action();
        return;
    }
    if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(action)) {
        tracing::error!(
            panic = panic_message(payload.as_ref()).unwrap_or("<non-string payload>"),
            "deferred action panicked during unwinding, keeping the original panic"
        );
    }
}
