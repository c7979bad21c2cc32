//! Global optimization engines used by the LPPL fitter.

mod differential;
mod nelder_mead;

pub use differential::{DeConfig, DifferentialEvolution};
pub use nelder_mead::{polish, PolishOutcome};
