use std::any::Any;

/// Failure returned by a fallible deferred action.
///
/// [`TryGuard`](crate::TryGuard) hands this back from `finish`, and uses it as the
/// panic payload when the action fails during an implicit scope exit.
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
#[error("deferred action failed: {0}")]
pub struct ActionFailed<E>(pub E);

impl<E> ActionFailed<E> {
    pub fn into_inner(self) -> E {
        self.0
    }
}

/// Message carried by a panic payload, for `&str` and `String` payloads
pub fn panic_message(payload: &(dyn Any + Send)) -> Option<&str> {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        return Some(s);
    }
    payload.downcast_ref::<String>().map(|s| s.as_str())
}
