use std::{alloc::Layout, collections::TryReserveError};
use thiserror::Error;

/// The errors that can be returned by the fallible construction helpers
///
/// See [`try_make_unique`](crate::try_make_unique) and
/// [`try_make_unique_slice`](crate::try_make_unique_slice).
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// The global allocator was unable to provide memory for a single value
    #[error("Failed to allocate {} bytes with alignment {}", layout.size(), layout.align())]
    OutOfMemory {
        /// The layout of the failed allocation
        layout: Layout,
    },
    /// Reserving memory for a block of values failed
    #[error(transparent)]
    Reserve(#[from] TryReserveError),
}

/// The Result type used by the fallible construction helpers
pub type Result<T> = std::result::Result<T, Error>;
