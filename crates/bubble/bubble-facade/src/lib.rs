//! Bubble Detection Facade
//!
//! High-level API for LPPL bubble detection. Re-exports all public types
//! from the bubble stack for convenient usage.

// Re-export everything from API (which includes SPI and core)
pub use bubble_api::*;

// Explicit re-exports for documentation
pub use bubble_api::prelude;
pub use bubble_api::BubbleDetector;

// Re-export core modules for direct access
pub use bubble_core::{diagnosis, fitter, forecast, lppl, multi_window, optimizer};

// Re-export SPI traits
pub use bubble_spi::{BubbleError, CostFunction, GlobalMinimizer, Result};
