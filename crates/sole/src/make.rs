use std::{
    alloc::{self, Layout},
    iter,
    ptr::NonNull,
};

use crate::{Error, Result, Unique};

/// Moves a value into newly allocated memory, returning its owning pointer
///
/// Allocation failure is handled in the same way as for [`Box::new`].
///
/// See [`make_unique_with`] for constructing the value in place of the call.
pub fn make_unique<T>(value: T) -> Unique<T> {
    Unique::new(value)
}

/// Allocates a value produced by `make`, returning its owning pointer
///
/// ```
/// use sole::make_unique_with;
///
/// let p = make_unique_with(|| String::from_utf8_lossy(b"forwarded").into_owned());
/// assert_eq!(*p, "forwarded");
/// ```
pub fn make_unique_with<T, F>(make: F) -> Unique<T>
where
    F: FnOnce() -> T,
{
    make_unique(make())
}

/// Allocates a block of `len` default values, returning its owning pointer
///
/// Each value is constructed independently with `T::default()`. If a constructor panics, the
/// values built so far are dropped and the block is freed before the panic continues.
pub fn make_unique_slice<T: Default>(len: usize) -> Unique<[T]> {
    iter::repeat_with(T::default)
        .take(len)
        .collect::<Box<[T]>>()
        .into()
}

/// Moves a value into newly allocated memory, returning an error if the allocation fails
///
/// The value is dropped if allocation fails, and no pointer is made.
pub fn try_make_unique<T>(value: T) -> Result<Unique<T>> {
    let layout = Layout::new::<T>();

    let handle = if layout.size() == 0 {
        NonNull::dangling()
    } else {
        // Safety: the layout has a non-zero size
        let raw = unsafe { alloc::alloc(layout) }.cast::<T>();
        NonNull::new(raw).ok_or(Error::OutOfMemory { layout })?
    };

    // Safety: the handle is valid for writes and aligned for T, and memory allocated by the global
    // allocator with T's layout can be released by `DefaultDelete`
    unsafe {
        handle.as_ptr().write(value);
        Ok(Unique::from_raw(handle.as_ptr()))
    }
}

/// Allocates a block of `len` default values, returning an error if the allocation fails
///
/// The error from the allocator is returned as [`Error::Reserve`], and no pointer is made.
pub fn try_make_unique_slice<T: Default>(len: usize) -> Result<Unique<[T]>> {
    let mut values = Vec::new();
    values.try_reserve_exact(len)?;
    values.resize_with(len, T::default);
    Ok(values.into())
}
