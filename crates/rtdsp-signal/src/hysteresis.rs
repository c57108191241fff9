//! Two-threshold comparator.

use crate::error::{SignalError, SignalResult};
use rtdsp_core::Q31;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Switches on above `on`, off below `off`, and holds in between.
///
/// Comparisons are strict, so a value sitting exactly on a threshold does not
/// change the state.
///
/// ```
/// use rtdsp_signal::HysteresisI16;
///
/// let mut h = HysteresisI16::new(-10, 10).unwrap();
/// assert!(!h.update(5));
/// assert!(h.update(11));
/// assert!(h.update(-10));
/// assert!(!h.update(-11));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Hysteresis<T> {
    pub off: T,
    pub on: T,
    state: bool,
}

pub type HysteresisQ31 = Hysteresis<Q31>;
pub type HysteresisI16 = Hysteresis<i16>;

impl<T: PartialOrd + Copy> Hysteresis<T> {
    pub fn new(off: T, on: T) -> SignalResult<Self> {
        check_thresholds(&off, &on)?;
        Ok(Self {
            off,
            on,
            state: false,
        })
    }

    /// Replace both thresholds and clear the output.
    ///
    /// Thresholds are checked as in [`Hysteresis::new`]; on error the
    /// comparator is left unchanged.
    pub fn init(&mut self, off: T, on: T) -> SignalResult<()> {
        check_thresholds(&off, &on)?;
        self.off = off;
        self.on = on;
        self.state = false;
        Ok(())
    }

    pub fn update(&mut self, value: T) -> bool {
        if value > self.on {
            self.state = true;
        } else if value < self.off {
            self.state = false;
        }
        self.state
    }

    pub fn state(&self) -> bool {
        self.state
    }
}

// unordered floats (NaN) are rejected along with inverted thresholds
fn check_thresholds<T: PartialOrd>(off: &T, on: &T) -> SignalResult<()> {
    if !matches!(off.partial_cmp(on), Some(Ordering::Less | Ordering::Equal)) {
        return Err(SignalError::InvalidArg {
            what: "off threshold must not exceed on threshold",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rtdsp_core::q31;

    #[test]
    fn q31_thresholds() {
        let mut h = HysteresisQ31::new(q31(0.25), q31(0.75)).unwrap();
        let inputs = [q31(0.5), q31(0.8), q31(0.5), q31(0.25), q31(0.2), q31(0.75)];
        let want = [false, true, true, true, false, false];
        for (x, w) in inputs.into_iter().zip(want) {
            assert_eq!(h.update(x), w, "input {x}");
        }
    }

    #[test]
    fn init_clears_state() {
        let mut h = HysteresisI16::new(0, 10).unwrap();
        assert!(h.update(20));
        h.init(-5, 5).unwrap();
        assert!(!h.state());
        assert_eq!((h.off, h.on), (-5, 5));
    }

    #[test]
    fn init_rejects_inverted_thresholds() {
        let mut h = HysteresisI16::new(0, 10).unwrap();
        assert!(h.update(20));
        assert!(h.init(10, -10).is_err());
        assert_eq!((h.off, h.on), (0, 10));
        assert!(h.state());
    }

    #[test]
    fn equal_thresholds_act_as_comparator() {
        let mut h = HysteresisI16::new(3, 3).unwrap();
        assert!(h.update(4));
        assert!(h.update(3));
        assert!(!h.update(2));
    }

    #[test]
    fn rejects_inverted_or_unordered_thresholds() {
        assert!(HysteresisI16::new(10, -10).is_err());
        assert!(Hysteresis::new(f32::NAN, 1.0).is_err());
        assert!(Hysteresis::new(0.0f32, 1.0).is_ok());
    }
}
