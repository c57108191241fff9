//! Fractional multiply, absolute value and min/max.
//!
//! The plain forms wrap on the one input that cannot be represented
//! (`-1.0 * -1.0`, `|-1.0|`). The `sat` forms clamp instead.

use crate::fixed::{Q15, Q31};
use crate::sat::ssat32;

/// Q15 multiply: `(x * y) >> 15`, truncated.
///
/// `mul_q15(-0x8000, -0x8000)` wraps to `-0x8000`.
#[inline(always)]
pub const fn mul_q15(x: Q15, y: Q15) -> Q15 {
    ((x as i32 * y as i32) >> 15) as Q15
}

/// Q31 multiply: `(x * y) >> 31`, truncated.
#[inline(always)]
pub const fn mul_q31(x: Q31, y: Q31) -> Q31 {
    ((x as i64 * y as i64) >> 31) as Q31
}

/// Saturating Q15 multiply.
///
/// Shifts one bit further than [`mul_q15`], saturates to 15 bits, then shifts
/// back, so the least significant bit of the result is always zero.
///
/// ```
/// use rtdsp_core::mulsat_q15;
///
/// assert_eq!(mulsat_q15(0x7FFF, 0x7FFF), 0x7FFE);
/// assert_eq!(mulsat_q15(0x7FFF, -0x7FFF), -0x8000);
/// assert_eq!(mulsat_q15(-0x8000, -0x8000), 0x7FFE);
/// ```
#[inline(always)]
pub const fn mulsat_q15(x: Q15, y: Q15) -> Q15 {
    let out = (x as i32 * y as i32) >> 16;
    (ssat32(out, 15) << 1) as Q15
}

/// Saturating Q31 multiply. Same shape as [`mulsat_q15`].
#[inline(always)]
pub const fn mulsat_q31(x: Q31, y: Q31) -> Q31 {
    let out = ((x as i64 * y as i64) >> 32) as i32;
    ssat32(out, 31) << 1
}

/// `|x|`, wrapping: `abs_q15(-0x8000) == -0x8000`.
#[inline(always)]
pub const fn abs_q15(x: Q15) -> Q15 {
    if x < 0 { x.wrapping_neg() } else { x }
}

/// `|x|`, wrapping: `abs_q31(i32::MIN) == i32::MIN`.
#[inline(always)]
pub const fn abs_q31(x: Q31) -> Q31 {
    if x < 0 { x.wrapping_neg() } else { x }
}

/// `|x|`, saturating: `abs_sat_q15(-0x8000) == 0x7FFF`.
#[inline(always)]
pub const fn abs_sat_q15(x: Q15) -> Q15 {
    x.saturating_abs()
}

/// `|x|`, saturating: `abs_sat_q31(i32::MIN) == i32::MAX`.
#[inline(always)]
pub const fn abs_sat_q31(x: Q31) -> Q31 {
    x.saturating_abs()
}

#[inline(always)]
pub const fn max_q31(x: Q31, y: Q31) -> Q31 {
    if x > y { x } else { y }
}

#[inline(always)]
pub const fn min_q31(x: Q31, y: Q31) -> Q31 {
    if x > y { y } else { x }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixed::{q15, q31};

    #[test]
    fn abs_q15_wraps_on_min() {
        let inputs = [q15(-1.0), q15(0.5), q15(-0.5), 0x7FFF, 0x7FFE, -0x7FFF];
        let expected = [-0x8000, q15(0.5), q15(0.5), 0x7FFF, 0x7FFE, 0x7FFF];
        for (x, want) in inputs.into_iter().zip(expected) {
            assert_eq!(abs_q15(x), want, "abs_q15({x})");
        }
    }

    #[test]
    fn abs_q31_basic() {
        assert_eq!(abs_q31(-0x7FFF_FFFF), 0x7FFF_FFFF);
        assert_eq!(abs_q31(0x7FFF_FFFF), 0x7FFF_FFFF);
        assert_eq!(abs_q31(0), 0);
        assert_eq!(abs_q31(i32::MIN), i32::MIN);
    }

    #[test]
    fn abs_sat_clamps_min() {
        let data: [Q15; 9] = [0, 1, -1, q15(1.0), q15(-1.0), q15(0.5), q15(-0.5), 0x7FFF, -0x8000];
        let want: [Q15; 9] = [0, 1, 1, 0x7FFF, 0x7FFF, q15(0.5), q15(0.5), 0x7FFF, 0x7FFF];
        for (x, w) in data.into_iter().zip(want) {
            assert_eq!(abs_sat_q15(x), w, "abs_sat_q15({x})");
        }

        let data: [Q31; 9] = [0, 1, -1, q31(1.0), q31(-1.0), q31(0.5), q31(-0.5), i32::MAX, i32::MIN];
        let want: [Q31; 9] = [0, 1, 1, i32::MAX, i32::MAX, q31(0.5), q31(0.5), i32::MAX, i32::MAX];
        for (x, w) in data.into_iter().zip(want) {
            assert_eq!(abs_sat_q31(x), w, "abs_sat_q31({x})");
        }
    }

    #[test]
    fn mul_half_by_half_is_quarter() {
        assert_eq!(mul_q15(q15(0.5), q15(0.5)), q15(0.25));
        assert_eq!(mul_q31(q31(0.5), q31(0.5)), q31(0.25));
        assert_eq!(mul_q15(q15(-0.5), q15(0.5)), q15(-0.25));
    }

    #[test]
    fn mul_truncates_toward_negative_infinity() {
        assert_eq!(mul_q15(-1, 1), -1);
        assert_eq!(mul_q15(-3, 0x4000), -2);
    }

    #[test]
    fn mul_wraps_on_min_times_min() {
        assert_eq!(mul_q15(-0x8000, -0x8000), -0x8000);
        assert_eq!(mul_q31(i32::MIN, i32::MIN), i32::MIN);
    }

    #[test]
    fn mulsat_q15_extremes() {
        assert_eq!(mulsat_q15(0x7FFF, 0x7FFF), 0x7FFE);
        // Shift, saturate, shift back: the negative extreme lands on -0x8000.
        assert_eq!(mulsat_q15(0x7FFF, -0x7FFF), -0x8000);
        assert_eq!(mulsat_q15(0x7FFF, 0), 0);
        assert_eq!(mulsat_q15(-0x8000, -0x8000), 0x7FFE);
    }

    #[test]
    fn mulsat_q31_extremes() {
        assert_eq!(mulsat_q31(0x7FFF_FFFF, 0x7FFF_FFFF), 0x7FFF_FFFE);
        assert_eq!(mulsat_q31(0x7FFF_FFFF, -0x7FFF_FFFF), i32::MIN);
        assert_eq!(mulsat_q31(0x7FFF_FFFF, 0), 0);
        assert_eq!(mulsat_q31(i32::MIN, i32::MIN), 0x7FFF_FFFE);
    }

    #[test]
    fn mulsat_drops_lsb() {
        assert_eq!(mulsat_q15(q15(0.5), q15(0.5)), q15(0.25));
        assert_eq!(mulsat_q15(3, 0x7FFF) & 1, 0);
    }

    #[test]
    fn min_max() {
        assert_eq!(max_q31(q31(0.5), q31(-0.5)), q31(0.5));
        assert_eq!(max_q31(-3, -3), -3);
        assert_eq!(min_q31(q31(0.5), q31(-0.5)), q31(-0.5));
        assert_eq!(min_q31(i32::MIN, i32::MAX), i32::MIN);
    }
}
