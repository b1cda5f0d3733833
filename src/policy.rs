use std::fmt::{Display, Formatter};
use std::sync::atomic::{AtomicU8, Ordering};

/// What a guard does when its action runs while the thread is already panicking
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub enum NestedPanic {
    /// Catch a second panic raised by the action, log it and let the first one keep unwinding.
    ///
    /// The check is `std::thread::panicking()`, which stays true for the whole unwind.
    /// A guard that ends inside a destructor's own `catch_unwind` while an outer panic
    /// unwinds therefore swallows its panic, where the same code written inline would
    /// hand it to that `catch_unwind`. Use [`NestedPanic::Abort`] when the panic must
    /// reach the nearest catcher exactly as inline code would.
    #[default]
    Suppress,
    /// Run the action unguarded, as if written inline. A second panic that escapes to
    /// the unwinder aborts the process; one caught by an enclosing `catch_unwind` is
    /// delivered there.
    Abort,
}

impl NestedPanic {
    const fn to_u8(self) -> u8 {
        match self {
            NestedPanic::Suppress => 0,
            NestedPanic::Abort => 1,
        }
    }

    fn from_u8(v: u8) -> Self {
        match v {
            1 => NestedPanic::Abort,
            _ => NestedPanic::Suppress,
        }
    }
}

impl Display for NestedPanic {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            NestedPanic::Suppress => f.write_str("suppress"),
            NestedPanic::Abort => f.write_str("abort"),
        }
    }
}

/// Atomic policy cell (0 = Suppress, 1 = Abort)
#[derive(Debug)]
pub(crate) struct AtomicPolicy(AtomicU8);

impl AtomicPolicy {
    pub(crate) const fn new(policy: NestedPanic) -> Self {
        AtomicPolicy(AtomicU8::new(policy.to_u8()))
    }

    #[inline]
    pub(crate) fn get(&self) -> NestedPanic {
        NestedPanic::from_u8(self.0.load(Ordering::Relaxed))
    }

    /// Store a new policy and return the previous one
    #[inline]
    pub(crate) fn swap(&self, policy: NestedPanic) -> NestedPanic {
        NestedPanic::from_u8(self.0.swap(policy.to_u8(), Ordering::Relaxed))
    }
}

static DEFAULT_POLICY: AtomicPolicy = AtomicPolicy::new(NestedPanic::Suppress);

/// Policy picked up by guards created after this call. Returns the previous default.
pub fn set_default_policy(policy: NestedPanic) -> NestedPanic {
    DEFAULT_POLICY.swap(policy)
}

/// Current process-wide default, `Suppress` unless changed
pub fn default_policy() -> NestedPanic {
    DEFAULT_POLICY.get()
}
