//! Block-specific operations for `Unique<[T]>`

use std::{
    ops::{Index, IndexMut},
    ptr::{self, NonNull},
    slice::SliceIndex,
};

use crate::{Deleter, Unique, unique::empty_access};

impl<T, D: Deleter<[T]> + Default> Unique<[T], D> {
    /// Takes ownership of a block of `len` values starting at `data`
    ///
    /// A null `data` pointer results in an empty pointer.
    ///
    /// # Safety
    ///
    /// See [`Unique::from_raw`]; the block handle is the whole `len`-element slice at `data`.
    pub unsafe fn from_raw_parts(data: *mut T, len: usize) -> Self {
        // Safety: forwarded to the caller
        unsafe { Self::from_raw(ptr::slice_from_raw_parts_mut(data, len)) }
    }
}

impl<T, D: Deleter<[T]>> Unique<[T], D> {
    /// Returns the number of values in the block, or 0 if the pointer is empty
    #[inline]
    pub fn len(&self) -> usize {
        self.get().map_or(0, NonNull::len)
    }

    /// Returns a raw pointer to the first value in the block, which is null if the pointer is empty
    #[inline]
    pub fn as_mut_ptr(&self) -> *mut T {
        self.get()
            .map_or(ptr::null_mut(), |handle| handle.cast::<T>().as_ptr())
    }

    /// Returns a reference to the value at `index`, without checking bounds or emptiness
    ///
    /// # Safety
    ///
    /// The pointer must own a block, and `index` must be less than [`len`](Unique::len).
    #[inline]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        // Safety: forwarded to the caller
        unsafe { &*self.as_mut_ptr().add(index) }
    }

    /// Returns a mutable reference to the value at `index`, without checking bounds or emptiness
    ///
    /// # Safety
    ///
    /// The pointer must own a block, and `index` must be less than [`len`](Unique::len).
    #[inline]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        // Safety: forwarded to the caller
        unsafe { &mut *self.as_mut_ptr().add(index) }
    }
}

impl<T> From<Vec<T>> for Unique<[T]> {
    fn from(values: Vec<T>) -> Self {
        Self::from(values.into_boxed_slice())
    }
}

impl<T, D: Deleter<[T]>, I: SliceIndex<[T]>> Index<I> for Unique<[T], D> {
    type Output = I::Output;

    /// Indexes into the block
    ///
    /// # Panics
    ///
    /// Panics if the pointer is empty, or if the index is out of bounds.
    #[inline]
    #[track_caller]
    fn index(&self, index: I) -> &Self::Output {
        match self.get_ref() {
            Some(block) => &block[index],
            None => empty_access(),
        }
    }
}

impl<T, D: Deleter<[T]>, I: SliceIndex<[T]>> IndexMut<I> for Unique<[T], D> {
    #[inline]
    #[track_caller]
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        match self.get_mut() {
            Some(block) => &mut block[index],
            None => empty_access(),
        }
    }
}
