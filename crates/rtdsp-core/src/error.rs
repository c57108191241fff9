use thiserror::Error;

pub type DspResult<T> = Result<T, DspError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DspError {
    #[error("Non-finite value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Value for {what} out of range: {value} not in [{min}, {max})")]
    OutOfRange {
        what: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}
