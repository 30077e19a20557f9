use sole::{Address, DefaultDelete, Deleter};
use std::{cell::RefCell, ptr::NonNull, rc::Rc};

/// A deleter that records the handles it releases before releasing them with [DefaultDelete]
///
/// Clones share the same record, so a clone can be kept to observe a deleter that has been moved
/// into a pointer. Each deleter also has a label, which allows tests to check which deleter
/// ended up where after a move or a swap.
#[derive(Clone, Debug, Default)]
pub struct CountingDeleter {
    label: &'static str,
    released: Rc<RefCell<Vec<Address>>>,
}

impl CountingDeleter {
    /// Makes a new deleter with the given label
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            released: Rc::default(),
        }
    }

    /// Returns the deleter's label
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Returns the number of handles that have been released by this deleter or its clones
    pub fn count(&self) -> usize {
        self.released.borrow().len()
    }

    /// Returns the addresses of the released handles, in the order they were released
    pub fn released(&self) -> Vec<Address> {
        self.released.borrow().clone()
    }
}

impl<T: ?Sized> Deleter<T> for CountingDeleter {
    unsafe fn delete(&mut self, handle: NonNull<T>) {
        self.released.borrow_mut().push(Address::from(handle));
        // Safety: forwarded to the caller
        unsafe { DefaultDelete.delete(handle) }
    }
}
