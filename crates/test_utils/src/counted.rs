use std::cell::Cell;

thread_local! {
    static CONSTRUCTED: Cell<usize> = const { Cell::new(0) };
    static DROPPED: Cell<usize> = const { Cell::new(0) };
}

/// A default-constructible value that counts constructions and drops on the current thread
///
/// Each value gets a serial number from the construction count, so values that were built
/// independently can be told apart.
#[derive(Debug, PartialEq, Eq)]
pub struct Counted {
    serial: usize,
}

impl Counted {
    /// Returns the value's serial number
    pub fn serial(&self) -> usize {
        self.serial
    }

    /// Returns the number of values constructed on this thread since the last reset
    pub fn constructed() -> usize {
        CONSTRUCTED.with(Cell::get)
    }

    /// Returns the number of values dropped on this thread since the last reset
    pub fn dropped() -> usize {
        DROPPED.with(Cell::get)
    }

    /// Resets the counters for the current thread
    pub fn reset_counts() {
        CONSTRUCTED.with(|count| count.set(0));
        DROPPED.with(|count| count.set(0));
    }
}

impl Default for Counted {
    fn default() -> Self {
        let serial = CONSTRUCTED.with(|count| {
            let serial = count.get();
            count.set(serial + 1);
            serial
        });
        Self { serial }
    }
}

impl Drop for Counted {
    fn drop(&mut self) {
        DROPPED.with(|count| count.set(count.get() + 1));
    }
}
