//! Error types for the core crate

use thiserror::Error;

/// Core errors
///
/// The calculators themselves never fail: an uncomputable result is `None`.
/// These errors cover the operations that can reject their input outright.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid input '{param}': {message}")]
    InvalidInput { param: String, message: String },

    #[error("Please select at least one character type")]
    NoCharacterClasses,
}

impl Error {
    pub fn invalid_input(param: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            param: param.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
