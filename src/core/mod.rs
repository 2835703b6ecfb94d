//! Core abstractions for serene.
//!
//! Shared seams used across features.

mod clock;

pub use clock::{Clock, FixedClock, SystemClock};
