//! Scope guards: register cleanup next to the code that needs it and have it run
//! exactly once when the scope ends, by normal exit, early return or panic.
//!
//! ```
//! use std::cell::RefCell;
//! use defer_guard::defer;
//!
//! let log = RefCell::new(vec![]);
//! {
//!     log.borrow_mut().push("open");
//!     defer!(log.borrow_mut().push("close"));
//!     log.borrow_mut().push("work");
//! }
//! assert_eq!(*log.borrow(), vec!["open", "work", "close"]);
//! ```

#[macro_use]
mod defer;
pub mod bind;
pub mod error;
pub mod guard;
pub mod policy;
pub mod try_guard;

pub use bind::{bind, Apply};
pub use error::ActionFailed;
pub use guard::{guard, Guard};
pub use policy::NestedPanic;
pub use try_guard::{TryAction, TryGuard};
