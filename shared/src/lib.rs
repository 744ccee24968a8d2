//! Health Calculators Shared Library
//!
//! Pure formula evaluation used by the HTTP backend and the WASM module.
//! Nothing in this crate does I/O, reads the clock or keeps state between
//! calls.

pub mod catalog;
pub mod calculators;
pub mod errors;
pub mod registry;
pub mod types;
pub mod units;
pub mod validation;

// Re-export commonly used items
pub use calculators::*;
pub use catalog::{CalculatorCategory, CalculatorInfo, CALCULATORS};
pub use errors::*;
pub use types::*;
pub use units::*;
