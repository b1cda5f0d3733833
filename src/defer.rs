/// Run a block at the end of the enclosing scope.
///
/// The body borrows what it uses from the surrounding scope, so it sees the values
/// those variables hold when the scope ends. Prefix the body with `move` to capture
/// by value instead. Whatever value the body produces is discarded. Each use creates
/// its own anonymous guard; guards in one scope run last-in first-out.
///
/// ```
/// use std::cell::RefCell;
/// use defer_guard::defer;
///
/// let out = RefCell::new(vec![]);
/// {
///     defer! { out.borrow_mut().push("1"); }
///     defer!(out.borrow_mut().push("2"));
/// }
/// assert_eq!(*out.borrow(), vec!["2", "1"]);
/// ```
#[macro_export]
macro_rules! defer {
    (move $($body:tt)*) => {
        let _guard = $crate::Guard::new(move || {
            let _ = { $($body)* };
        });
    };
    ($($body:tt)*) => {
        let _guard = $crate::Guard::new(|| {
            let _ = { $($body)* };
        });
    };
}

/// Call a function with the given arguments at the end of the enclosing scope.
///
/// Arguments are evaluated immediately; pass `&x` to have the call see `x` as it is
/// when the scope ends.
///
/// ```
/// use std::cell::Cell;
/// use defer_guard::defer_call;
///
/// fn set(cell: &Cell<u32>, v: u32) {
///     cell.set(v);
/// }
///
/// let c = Cell::new(0);
/// {
///     defer_call!(set, &c, 9);
/// }
/// assert_eq!(c.get(), 9);
/// ```
#[macro_export]
macro_rules! defer_call {
    ($f:expr $(, $arg:expr)* $(,)?) => {
        let _guard = $crate::bind($f, ($($arg,)*));
    };
}
