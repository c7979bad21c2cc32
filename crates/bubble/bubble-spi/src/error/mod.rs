//! Error types.

mod bubble_error;

pub use bubble_error::{BubbleError, Result};
