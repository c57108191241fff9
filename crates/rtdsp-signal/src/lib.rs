//! rtdsp-signal: per-sample signal conditioning utilities.
//!
//! Contains:
//! - ramp (rate limiters toward a moving target)
//! - hysteresis (two-threshold comparator)
//! - filter (pseudo windowed moving average)
//! - limit (clamps and delta window checks)
//! - adc (raw converter counts to fractional samples)
//! - convert (Q31 to and from scaled integers)
//! - error (constructor validation errors)

pub mod adc;
pub mod convert;
pub mod error;
pub mod filter;
pub mod hysteresis;
pub mod limit;
pub mod ramp;

pub use adc::*;
pub use convert::*;
pub use error::{SignalError, SignalResult};
pub use filter::{FILTER_PMA_MAX_SHIFT, FilterPma};
pub use hysteresis::{Hysteresis, HysteresisI16, HysteresisQ31};
pub use limit::*;
pub use ramp::{RampLimitI16, RampLimitQ15, RampQ31};
