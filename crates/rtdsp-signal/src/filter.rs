//! Pseudo windowed moving average.
//!
//! Instead of keeping `2^shift` samples, the filter keeps one 64-bit sum. Each
//! call adds the new sample, outputs `sum >> shift` and removes that output
//! from the sum. The response is that of a first-order low-pass whose time
//! constant is roughly `2^shift` samples.

use crate::error::{SignalError, SignalResult};
use rtdsp_core::{Acc64, Q31};
use serde::{Deserialize, Serialize};

/// Largest window exponent accepted by [`FilterPma::new`].
pub const FILTER_PMA_MAX_SHIFT: u16 = 32;

/// Deserializing goes through [`FilterPma::new`], so a stored `shift` is
/// checked the same way as a constructed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "FilterPmaFields")]
pub struct FilterPma {
    acc: Acc64,
    shift: u16,
}

#[derive(Deserialize)]
struct FilterPmaFields {
    acc: Acc64,
    shift: u16,
}

impl TryFrom<FilterPmaFields> for FilterPma {
    type Error = SignalError;

    fn try_from(fields: FilterPmaFields) -> SignalResult<Self> {
        let mut filter = FilterPma::new(fields.shift)?;
        filter.acc = fields.acc;
        Ok(filter)
    }
}

impl FilterPma {
    /// Window of `2^shift` samples with an empty accumulator.
    pub fn new(shift: u16) -> SignalResult<Self> {
        if shift > FILTER_PMA_MAX_SHIFT {
            return Err(SignalError::InvalidArg {
                what: "shift must be at most 32",
            });
        }
        Ok(Self { acc: 0, shift })
    }

    pub fn update(&mut self, x: Q31) -> Q31 {
        self.acc = self.acc.wrapping_add(Acc64::from(x));
        let y = self.acc >> self.shift;
        self.acc -= y;
        y as Q31
    }

    /// Load the accumulator with the steady state for a constant `y0`, so the
    /// output starts at `y0` rather than winding up from zero.
    pub fn prime(&mut self, y0: Q31) {
        let y0 = Acc64::from(y0);
        self.acc = (y0 << self.shift) - y0;
    }

    pub fn shift(&self) -> u16 {
        self.shift
    }

    pub fn accumulator(&self) -> Acc64 {
        self.acc
    }
}
