use std::{
    fmt,
    hash::{Hash, Hasher},
    ptr::NonNull,
};

/// A wrapper for comparing and hashing handle addresses
///
/// Only the address is kept, any pointer metadata (like a block's length) is discarded.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Address(*const u8);

impl Address {
    /// Returns true if the address is null
    pub fn is_null(self) -> bool {
        self.0.is_null()
    }
}

impl<T: ?Sized> From<*const T> for Address {
    fn from(pointer: *const T) -> Self {
        Self(pointer as *const u8)
    }
}

impl<T: ?Sized> From<*mut T> for Address {
    fn from(pointer: *mut T) -> Self {
        Self(pointer as *const u8)
    }
}

impl<T: ?Sized> From<NonNull<T>> for Address {
    fn from(pointer: NonNull<T>) -> Self {
        Self(pointer.as_ptr() as *const u8)
    }
}

impl Hash for Address {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.0 as usize);
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_is_discarded() {
        let mut block = [1, 2, 3];
        let whole: *mut [i32] = &mut block[..];
        let first: *mut i32 = &mut block[0];
        assert_eq!(Address::from(whole), Address::from(first));
    }

    #[test]
    fn null() {
        assert!(Address::from(std::ptr::null::<u64>()).is_null());
        assert!(!Address::from(NonNull::<u64>::dangling()).is_null());
    }
}
