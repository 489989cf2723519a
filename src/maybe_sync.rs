//! Bounds on slice elements and forked closures.
//!
//! `RayonJoin` may hand the right half of a split to another worker, so that
//! worker borrows the same `&[T]` as the caller: elements must be `Sync` and
//! the two closures passed to [`ForkJoin::join`](crate::ForkJoin::join) must
//! be `Send`. Builds without `parallel` only have the `Sequential` scheduler,
//! so both bounds are satisfied by every type there.

#[cfg(feature = "parallel")]
pub trait MaybeSend: Send {}
#[cfg(feature = "parallel")]
impl<T: Send> MaybeSend for T {}

#[cfg(feature = "parallel")]
pub trait MaybeSync: Sync {}
#[cfg(feature = "parallel")]
impl<T: Sync> MaybeSync for T {}

#[cfg(not(feature = "parallel"))]
pub trait MaybeSend {}
#[cfg(not(feature = "parallel"))]
impl<T> MaybeSend for T {}

#[cfg(not(feature = "parallel"))]
pub trait MaybeSync {}
#[cfg(not(feature = "parallel"))]
impl<T> MaybeSync for T {}
