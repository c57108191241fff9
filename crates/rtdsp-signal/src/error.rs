//! Error types for signal utility construction.

use thiserror::Error;

pub type SignalResult<T> = Result<T, SignalError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SignalError {
    /// Invalid argument provided to a constructor.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}
