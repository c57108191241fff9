//! Rate limiters.
//!
//! A ramp follows its input but moves at most `inc` per call. The input is
//! the target and may change on every sample.

use crate::error::{SignalError, SignalResult};
use rtdsp_core::{Q31, qadd, qsub};
use serde::{Deserialize, Serialize};

/// 16-bit ramp with an output window.
///
/// Arithmetic is done at 32 bits and clamped back into `[llim, ulim]`, so the
/// output never wraps regardless of the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RampLimitI16 {
    pub llim: i16,
    pub ulim: i16,
    pub inc: i16,
    y: i16,
}

/// Q15 shares the 16-bit ramp.
pub type RampLimitQ15 = RampLimitI16;

impl RampLimitI16 {
    /// Build a ramp starting from 0 (snapped into the window).
    pub fn new(llim: i16, ulim: i16, inc: i16) -> SignalResult<Self> {
        if llim > ulim {
            return Err(SignalError::InvalidArg {
                what: "llim must not exceed ulim",
            });
        }
        if inc < 0 {
            return Err(SignalError::InvalidArg {
                what: "inc must be non-negative",
            });
        }
        let mut ramp = Self {
            llim,
            ulim,
            inc,
            y: 0,
        };
        ramp.init(0);
        Ok(ramp)
    }

    /// Set the output, snapped into `[llim, ulim]`.
    pub fn init(&mut self, y0: i16) {
        self.y = if y0 < self.llim {
            self.llim
        } else if y0 > self.ulim {
            self.ulim
        } else {
            y0
        };
    }

    pub fn update(&mut self, x: i16) -> i16 {
        let inc = i32::from(self.inc);
        let mut delta = i32::from(x) - i32::from(self.y);
        if delta > inc {
            delta = inc;
        } else if delta < -inc {
            delta = -inc;
        }

        let y = i32::from(self.y) + delta;
        self.y = if y < i32::from(self.llim) {
            self.llim
        } else if y > i32::from(self.ulim) {
            self.ulim
        } else {
            y as i16
        };
        self.y
    }

    pub fn output(&self) -> i16 {
        self.y
    }
}

/// Q31 ramp over the full range.
///
/// Steps use saturating add/subtract and stop exactly on the target.
///
/// ```
/// use rtdsp_signal::RampQ31;
///
/// let mut ramp = RampQ31::new(400).unwrap();
/// assert_eq!(ramp.update(1000), 400);
/// assert_eq!(ramp.update(1000), 800);
/// assert_eq!(ramp.update(1000), 1000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RampQ31 {
    pub inc: Q31,
    y: Q31,
}

impl RampQ31 {
    pub fn new(inc: Q31) -> SignalResult<Self> {
        if inc < 0 {
            return Err(SignalError::InvalidArg {
                what: "inc must be non-negative",
            });
        }
        Ok(Self { inc, y: 0 })
    }

    pub fn init(&mut self, y0: Q31) {
        self.y = y0;
    }

    pub fn update(&mut self, x: Q31) -> Q31 {
        if x > self.y {
            let up = qadd(self.y, self.inc);
            self.y = if up > x { x } else { up };
        } else if x < self.y {
            let down = qsub(self.y, self.inc);
            self.y = if down < x { x } else { down };
        }
        self.y
    }

    pub fn output(&self) -> Q31 {
        self.y
    }
}
