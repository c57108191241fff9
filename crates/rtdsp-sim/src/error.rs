//! Error types for simulation, scenario and export operations.

use rtdsp_core::DspError;
use rtdsp_signal::SignalError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Fixed-point conversion error: {0}")]
    Dsp(#[from] DspError),

    #[error("Signal utility error: {0}")]
    Signal(#[from] SignalError),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SimResult<T> = Result<T, SimError>;
