//! Partial application of a callable to a tuple of arguments.
//!
//! Arguments keep the category they were passed with: `&x` and `&mut x` bind a
//! live reference, `x` moves the value into the guard.

use crate::guard::Guard;

/// A callable that can be invoked with the argument tuple `Args`.
///
/// Implemented for every `FnOnce` taking up to eight arguments. A callable and
/// tuple that do not fit together have no impl, so a wrong arity or argument type
/// is rejected at compile time:
///
/// ```compile_fail
/// let _g = defer_guard::bind(|a: i32, b: i32| a + b, (1,));
/// ```
pub trait Apply<Args> {
    type Output;

    fn apply(self, args: Args) -> Self::Output;
}

macro_rules! impl_apply {
    ($($arg:ident),*) => {
        impl<Func, Ret, $($arg,)*> Apply<($($arg,)*)> for Func
        where
            Func: FnOnce($($arg),*) -> Ret,
        {
            type Output = Ret;

            #[allow(non_snake_case)]
            #[inline]
            fn apply(self, ($($arg,)*): ($($arg,)*)) -> Ret {
                self($($arg),*)
            }
        }
    };
}

impl_apply!();
impl_apply!(A0);
impl_apply!(A0, A1);
impl_apply!(A0, A1, A2);
impl_apply!(A0, A1, A2, A3);
impl_apply!(A0, A1, A2, A3, A4);
impl_apply!(A0, A1, A2, A3, A4, A5);
impl_apply!(A0, A1, A2, A3, A4, A5, A6);
impl_apply!(A0, A1, A2, A3, A4, A5, A6, A7);

/// Arm a guard that calls `f` with `args` when dropped. The return value of `f` is discarded.
///
/// ```
/// use std::cell::Cell;
///
/// fn add(total: &Cell<i32>, n: i32) {
///     total.set(total.get() + n);
/// }
///
/// let total = Cell::new(1);
/// {
///     let _g = defer_guard::bind(add, (&total, 10));
///     total.set(5);
/// }
/// assert_eq!(total.get(), 15);
/// ```
pub fn bind<Func, Args>(f: Func, args: Args) -> Guard<impl FnOnce()>
where
    Func: Apply<Args>,
{
    Guard::new(move || {
        let _ = f.apply(args);
    })
}
