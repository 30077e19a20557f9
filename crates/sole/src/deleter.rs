use std::ptr::NonNull;

/// Releases the resource behind a [`Unique`](crate::Unique)'s handle
///
/// A deleter is stored by value next to the handle it releases. It's invoked once per owned
/// handle, when the owning pointer is dropped, reset, or assigned over. Empty pointers never
/// invoke their deleter, so a handle passed to [`delete`](Deleter::delete) is never null.
///
/// Any `FnMut(NonNull<T>)` closure is a deleter:
///
/// ```
/// use sole::Unique;
/// use std::{cell::Cell, ptr::NonNull};
///
/// let released = Cell::new(false);
/// {
///     let handle = Box::into_raw(Box::new(99));
///     let deleter = |handle: NonNull<i32>| {
///         released.set(true);
///         drop(unsafe { Box::from_raw(handle.as_ptr()) });
///     };
///     let p = unsafe { Unique::from_raw_with_deleter(handle, deleter) };
///     assert_eq!(*p, 99);
///     assert!(!released.get());
/// }
/// assert!(released.get());
/// ```
pub trait Deleter<T: ?Sized> {
    /// Releases the resource denoted by `handle`
    ///
    /// # Safety
    ///
    /// `handle` must denote a live resource that this deleter is able to release, and it must not
    /// be used again after the call.
    unsafe fn delete(&mut self, handle: NonNull<T>);
}

/// The default deleter, releasing handles that were allocated as a [`Box`]
///
/// A `NonNull<[T]>` handle carries the length of its block, so block handles are released as a
/// whole, dropping every element before the memory is freed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct DefaultDelete;

impl<T: ?Sized> Deleter<T> for DefaultDelete {
    #[inline]
    unsafe fn delete(&mut self, handle: NonNull<T>) {
        // Safety: the caller guarantees that the handle came from Box::into_raw, or from the
        // global allocator with the layout of T
        drop(unsafe { Box::from_raw(handle.as_ptr()) });
    }
}

impl<T: ?Sized, F> Deleter<T> for F
where
    F: FnMut(NonNull<T>),
{
    #[inline]
    unsafe fn delete(&mut self, handle: NonNull<T>) {
        self(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::Cell, rc::Rc};

    struct Flag(Rc<Cell<u32>>);

    impl Drop for Flag {
        fn drop(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn default_delete_drops_value() {
        let drops = Rc::new(Cell::new(0));
        let handle = NonNull::from(Box::leak(Box::new(Flag(drops.clone()))));
        unsafe { DefaultDelete.delete(handle) };
        assert_eq!(drops.get(), 1);
    }

    #[test]
    fn default_delete_drops_whole_block() {
        let drops = Rc::new(Cell::new(0));
        let block: Box<[Flag]> = (0..4).map(|_| Flag(drops.clone())).collect();
        let handle = NonNull::from(Box::leak(block));
        unsafe { DefaultDelete.delete(handle) };
        assert_eq!(drops.get(), 4);
    }

    #[test]
    fn closure_deleter() {
        let mut seen = Vec::new();
        let mut value = 7u8;
        let mut deleter = |handle: NonNull<u8>| seen.push(handle);
        unsafe { deleter.delete(NonNull::from(&mut value)) };
        assert_eq!(seen, [NonNull::from(&mut value)]);
    }
}
