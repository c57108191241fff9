//! rtdsp-core: fixed-point foundation for rtdsp.
//!
//! Contains:
//! - fixed (Q15/Q31/Q63 and accumulator formats + const constructors)
//! - sat (signed saturate, saturating add/subtract)
//! - ops (fractional multiply, absolute value, min/max)
//! - error (checked conversion errors)
//!
//! Every per-sample function here is total and allocation free.

pub mod error;
pub mod fixed;
pub mod ops;
pub mod sat;

// Re-exports: nice ergonomics for downstream crates
pub use error::{DspError, DspResult};
pub use fixed::*;
pub use ops::*;
pub use sat::*;
