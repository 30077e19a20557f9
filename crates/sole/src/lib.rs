//! Single-owner pointers with pluggable deleters
//!
//! [`Unique`] owns exactly one heap allocation, either a single value or a contiguous block of
//! values, and releases it exactly once when it's dropped, reset, or assigned over. Ownership can
//! be moved but never shared, and the release step is performed by a [`Deleter`] that's stored
//! by value alongside the handle.
//!
//! The pointee shape selects the available operations at compile time:
//! - `Unique<T>` dereferences to a single `T`.
//! - `Unique<[T]>` indexes into a block of `T`s, and has no single-value dereference.
//!
//! ```
//! use sole::{make_unique, make_unique_slice};
//!
//! let mut greeting = make_unique(String::from("hello"));
//! greeting.push_str(", world");
//! assert_eq!(*greeting, "hello, world");
//!
//! let mut block = make_unique_slice::<u32>(3);
//! block[1] = 42;
//! assert_eq!(block.len(), 3);
//! assert_eq!(block[1], 42);
//! ```

#![warn(missing_docs)]

mod address;
mod deleter;
mod error;
mod make;
mod unique;
mod unique_slice;

pub use address::Address;
pub use deleter::{DefaultDelete, Deleter};
pub use error::{Error, Result};
pub use make::{
    make_unique, make_unique_slice, make_unique_with, try_make_unique, try_make_unique_slice,
};
pub use unique::Unique;
