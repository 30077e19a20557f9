//! Testing utilities for the sole crate

#![warn(missing_docs)]

mod counted;
mod counting_deleter;
mod event_log;

pub use counted::Counted;
pub use counting_deleter::CountingDeleter;
pub use event_log::{Event, EventLog, Tracked};
