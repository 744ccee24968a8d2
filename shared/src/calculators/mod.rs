//! Calculator functions
//!
//! Each calculator validates its input, reads whatever registry constants it
//! needs and returns a result value. Nothing here keeps state between calls,
//! so every function is safe to call from any thread.
//!
//! Calculators are available two ways: as plain functions
//! (`calculate_bmi(180.0, 80.0)`) and through the [`Calculator`] trait, which
//! pairs a URL-safe slug with serde-friendly input and output types.

use crate::errors::InvalidInputError;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// A calculator addressable by slug
pub trait Calculator {
    /// Stable, URL-safe identifier
    const SLUG: &'static str;
    type Input: DeserializeOwned;
    type Output: Serialize;

    fn compute(input: &Self::Input) -> Result<Self::Output, InvalidInputError>;
}

/// Declare a zero-sized [`Calculator`] that delegates to a function body
macro_rules! calculator {
    ($(#[$meta:meta])* $name:ident, $slug:literal, $input:ty => $output:ty, |$arg:ident| $body:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $name;

        impl $crate::calculators::Calculator for $name {
            const SLUG: &'static str = $slug;
            type Input = $input;
            type Output = $output;

            fn compute($arg: &$input) -> Result<$output, $crate::errors::InvalidInputError> {
                $body
            }
        }
    };
}

pub mod body;
pub mod cardio;
pub mod cycle;
pub mod energy;
pub mod nutrition;

pub use body::*;
pub use cardio::*;
pub use cycle::*;
pub use energy::*;
pub use nutrition::*;
