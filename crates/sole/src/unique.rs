use std::{
    fmt,
    marker::PhantomData,
    mem::{self, ManuallyDrop},
    ops::{Deref, DerefMut},
    ptr::{self, NonNull},
};

use crate::{Address, DefaultDelete, Deleter};

/// An exclusively owning pointer to a value in allocated memory
///
/// A `Unique` is either *empty*, or it *owns* a handle that its deleter `D` will release exactly
/// once. There's no way to copy a `Unique`, ownership can only be moved: by a regular Rust move,
/// with [`take`](Unique::take), or by giving up the handle with [`release`](Unique::release).
///
/// For sized pointees the pointer dereferences to the value, while `Unique<[T]>` indexes into a
/// block of values instead, see the block-specific methods for details.
///
/// Dereferencing an empty `Unique` panics; use [`get_ref`](Unique::get_ref) or
/// [`get_mut`](Unique::get_mut) for an `Option`.
pub struct Unique<T: ?Sized, D: Deleter<T> = DefaultDelete> {
    handle: Option<NonNull<T>>,
    deleter: D,
    _owns: PhantomData<T>,
}

impl<T> Unique<T> {
    /// Moves the provided value into newly allocated memory
    pub fn new(value: T) -> Self {
        Self::from(Box::new(value))
    }
}

impl<T: ?Sized, D: Deleter<T> + Default> Unique<T, D> {
    /// Makes an empty pointer with a default deleter
    pub fn empty() -> Self {
        Self::empty_with_deleter(D::default())
    }

    /// Takes ownership of a raw handle, released with a default deleter
    ///
    /// A null handle results in an empty pointer.
    ///
    /// # Safety
    ///
    /// A non-null `handle` must denote a live resource that `D` is able to release, and nothing
    /// else may release or use it while the returned pointer owns it. For [`DefaultDelete`] this
    /// means a handle obtained from [`Box::into_raw`].
    pub unsafe fn from_raw(handle: *mut T) -> Self {
        // Safety: forwarded to the caller
        unsafe { Self::from_raw_with_deleter(handle, D::default()) }
    }

    /// Moves the owned handle and deleter out, leaving `self` empty
    ///
    /// The emptied pointer gets a default deleter.
    pub fn take(&mut self) -> Self {
        mem::take(self)
    }
}

impl<T: ?Sized, D: Deleter<T>> Unique<T, D> {
    /// Makes an empty pointer that will use the given deleter once it owns a handle
    pub const fn empty_with_deleter(deleter: D) -> Self {
        Self {
            handle: None,
            deleter,
            _owns: PhantomData,
        }
    }

    /// Takes ownership of a raw handle, released with the given deleter
    ///
    /// A null handle results in an empty pointer.
    ///
    /// # Safety
    ///
    /// See [`from_raw`](Unique::from_raw), with `deleter` taking the place of the default.
    pub unsafe fn from_raw_with_deleter(handle: *mut T, deleter: D) -> Self {
        Self {
            handle: NonNull::new(handle),
            deleter,
            _owns: PhantomData,
        }
    }

    /// Returns true if the pointer doesn't own a handle
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.handle.is_none()
    }

    /// Returns true if the pointer owns a handle
    #[inline]
    pub fn is_owning(&self) -> bool {
        self.handle.is_some()
    }

    /// Returns the owned handle, without affecting its ownership
    #[inline]
    pub fn get(&self) -> Option<NonNull<T>> {
        self.handle
    }

    /// Returns a reference to the owned value, or None if the pointer is empty
    #[inline]
    pub fn get_ref(&self) -> Option<&T> {
        // Safety: an owned handle is live for as long as self is borrowed
        self.handle.map(|handle| unsafe { &*handle.as_ptr() })
    }

    /// Returns a mutable reference to the owned value, or None if the pointer is empty
    #[inline]
    pub fn get_mut(&mut self) -> Option<&mut T> {
        // Safety: an owned handle is live and exclusive for as long as self is borrowed
        self.handle.map(|handle| unsafe { &mut *handle.as_ptr() })
    }

    /// Returns the address of the owned handle, or None if the pointer is empty
    pub fn address(this: &Self) -> Option<Address> {
        this.handle.map(Address::from)
    }

    /// Gives up ownership of the handle, leaving the pointer empty
    ///
    /// The deleter isn't invoked, releasing the returned handle is now the caller's
    /// responsibility.
    #[must_use = "the released handle will leak unless it's released by the caller"]
    pub fn release(&mut self) -> Option<NonNull<T>> {
        self.handle.take()
    }

    /// Releases the owned handle, and then takes ownership of `handle`
    ///
    /// The deleter is invoked on the previous handle if there was one, even when it's the same as
    /// the new handle.
    ///
    /// # Safety
    ///
    /// The same requirements as [`from_raw`](Unique::from_raw) apply to `handle`.
    ///
    /// Passing the currently owned handle is a contract violation: the handle is released and the
    /// pointer is left owning freed memory.
    pub unsafe fn reset(&mut self, handle: Option<NonNull<T>>) {
        if let Some(previous) = mem::replace(&mut self.handle, handle) {
            // Safety: previous was owned exclusively by this pointer
            unsafe { self.deleter.delete(previous) }
        }
    }

    /// Releases the owned handle, leaving the pointer empty
    pub fn clear(&mut self) {
        // Safety: an empty handle has no requirements
        unsafe { self.reset(None) }
    }

    /// Exchanges the handles and deleters of two pointers
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    /// Returns a reference to the deleter
    pub fn deleter(&self) -> &D {
        &self.deleter
    }

    /// Returns a mutable reference to the deleter
    ///
    /// # Safety
    ///
    /// The owned handle is tied to the deleter value it was given with. Any change made through
    /// the reference, including replacing the deleter, must leave a deleter that is still able to
    /// release the owned handle.
    ///
    /// ```compile_fail,E0133
    /// let mut p = sole::make_unique(1);
    /// let _deleter = p.deleter_mut();
    /// ```
    pub unsafe fn deleter_mut(&mut self) -> &mut D {
        &mut self.deleter
    }

    /// Consumes the pointer, returning its handle and deleter without releasing anything
    #[must_use = "the handle will leak unless it's released by the caller"]
    pub fn into_parts(self) -> (Option<NonNull<T>>, D) {
        let this = ManuallyDrop::new(self);
        // Safety: `this` is never dropped, so the deleter is only moved out once
        let deleter = unsafe { ptr::read(&this.deleter) };
        (this.handle, deleter)
    }
}

impl<T, D: Deleter<T>> Unique<T, D> {
    /// Returns the owned handle as a raw pointer, which is null if the pointer is empty
    #[inline]
    pub fn as_ptr(&self) -> *mut T {
        self.handle.map_or(ptr::null_mut(), NonNull::as_ptr)
    }
}

impl<T: ?Sized> Unique<T> {
    /// Converts the pointer into a [`Box`], or None if the pointer is empty
    pub fn into_box(mut self) -> Option<Box<T>> {
        // Safety: handles released by DefaultDelete were allocated as a Box
        self.release()
            .map(|handle| unsafe { Box::from_raw(handle.as_ptr()) })
    }
}

impl<T: ?Sized, D: Deleter<T>> Drop for Unique<T, D> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: ?Sized, D: Deleter<T> + Default> Default for Unique<T, D> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: ?Sized> From<Box<T>> for Unique<T> {
    fn from(boxed: Box<T>) -> Self {
        // Safety: the handle comes from Box::into_raw
        unsafe { Self::from_raw(Box::into_raw(boxed)) }
    }
}

impl<T, D: Deleter<T>> Deref for Unique<T, D> {
    type Target = T;

    #[inline]
    #[track_caller]
    fn deref(&self) -> &T {
        match self.get_ref() {
            Some(value) => value,
            None => empty_access(),
        }
    }
}

impl<T, D: Deleter<T>> DerefMut for Unique<T, D> {
    #[inline]
    #[track_caller]
    fn deref_mut(&mut self) -> &mut T {
        match self.get_mut() {
            Some(value) => value,
            None => empty_access(),
        }
    }
}

impl<T: ?Sized + fmt::Debug, D: Deleter<T>> fmt::Debug for Unique<T, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.get_ref() {
            Some(value) => f.debug_tuple("Unique").field(&value).finish(),
            None => f.write_str("Unique(<empty>)"),
        }
    }
}

impl<T: ?Sized, D: Deleter<T>> fmt::Pointer for Unique<T, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.handle {
            Some(handle) => fmt::Pointer::fmt(&handle, f),
            None => fmt::Pointer::fmt(&ptr::null::<u8>(), f),
        }
    }
}

#[cold]
#[track_caller]
pub(crate) fn empty_access() -> ! {
    panic!("Attempted to access the value of an empty Unique")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::Cell, rc::Rc};

    fn counting_deleter(count: Rc<Cell<u32>>) -> impl FnMut(NonNull<i32>) {
        move |handle| {
            count.set(count.get() + 1);
            drop(unsafe { Box::from_raw(handle.as_ptr()) });
        }
    }

    fn counted(value: i32, count: &Rc<Cell<u32>>) -> Unique<i32, impl FnMut(NonNull<i32>)> {
        let handle = Box::into_raw(Box::new(value));
        unsafe { Unique::from_raw_with_deleter(handle, counting_deleter(count.clone())) }
    }

    #[test]
    fn new() {
        let p = Unique::new(42);
        assert!(p.is_owning());
        assert_eq!(*p, 42);
    }

    #[test]
    fn empty() {
        let p = Unique::<String>::empty();
        assert!(p.is_empty());
        assert!(p.get().is_none());
        assert!(p.as_ptr().is_null());
        assert!(Unique::address(&p).is_none());
    }

    #[test]
    fn from_null_raw_handle_is_empty() {
        let p = unsafe { Unique::<u8>::from_raw(ptr::null_mut()) };
        assert!(p.is_empty());
    }

    #[test]
    fn deref_mut() {
        let mut p = Unique::new(vec![1, 2]);
        p.push(3);
        assert_eq!(*p, [1, 2, 3]);
    }

    #[test]
    #[should_panic(expected = "empty Unique")]
    fn deref_empty_panics() {
        let p = Unique::<i32>::empty();
        let value: i32 = *p;
        assert_eq!(value, 0);
    }

    #[test]
    fn drop_releases_once() {
        let count = Rc::new(Cell::new(0));
        let p = counted(1, &count);
        assert_eq!(count.get(), 0);
        drop(p);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn drop_empty_doesnt_release() {
        let count = Rc::new(Cell::new(0));
        let p = Unique::<i32, _>::empty_with_deleter(counting_deleter(count.clone()));
        drop(p);
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn release_then_manual_free() {
        let count = Rc::new(Cell::new(0));
        let mut p = counted(5, &count);
        let handle = p.release().unwrap();
        assert!(p.is_empty());
        drop(p);
        assert_eq!(count.get(), 0);
        let value = unsafe { Box::from_raw(handle.as_ptr()) };
        assert_eq!(*value, 5);
    }

    #[test]
    fn reset_releases_previous() {
        let count = Rc::new(Cell::new(0));
        let mut p = counted(1, &count);
        let next = NonNull::from(Box::leak(Box::new(2)));
        unsafe { p.reset(Some(next)) };
        assert_eq!(count.get(), 1);
        assert_eq!(p.get(), Some(next));
        assert_eq!(*p, 2);
        drop(p);
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn clear() {
        let count = Rc::new(Cell::new(0));
        let mut p = counted(1, &count);
        p.clear();
        assert!(p.is_empty());
        p.clear();
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn into_parts() {
        let count = Rc::new(Cell::new(0));
        let p = counted(3, &count);
        let (handle, mut deleter) = p.into_parts();
        assert_eq!(count.get(), 0);
        deleter(handle.unwrap());
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn into_box() {
        let p = Unique::new(String::from("boxed"));
        assert_eq!(*p.into_box().unwrap(), "boxed");
        assert!(Unique::<String>::empty().into_box().is_none());
    }

    #[test]
    fn debug() {
        assert_eq!(format!("{:?}", Unique::new(7)), "Unique(7)");
        assert_eq!(format!("{:?}", Unique::<i32>::empty()), "Unique(<empty>)");
    }
}
