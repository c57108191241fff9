//! Clamps and window checks.
//!
//! Every limiter checks the upper bound first and the lower bound second. With
//! inverted bounds (`llim > ulim`) the result is therefore `llim`, never a
//! panic.

use rtdsp_core::{Acc32, Q31, qadd, qsub};

/// Clamp `val` into `[llim, ulim]`.
#[inline]
pub fn limit<T: PartialOrd>(val: T, llim: T, ulim: T) -> T {
    let val = upper_limit(val, ulim);
    lower_limit(val, llim)
}

#[inline]
pub fn upper_limit<T: PartialOrd>(val: T, ulim: T) -> T {
    if val > ulim { ulim } else { val }
}

#[inline]
pub fn lower_limit<T: PartialOrd>(val: T, llim: T) -> T {
    if val < llim { llim } else { val }
}

macro_rules! typed_limit {
    ($($name:ident: $ty:ty),* $(,)?) => {
        $(
            #[inline(always)]
            pub const fn $name(val: $ty, llim: $ty, ulim: $ty) -> $ty {
                let val = if val > ulim { ulim } else { val };
                if val < llim { llim } else { val }
            }
        )*
    };
}

typed_limit! {
    limit_q31: Q31,
    limit_i16: i16,
    limit_u16: u16,
    limit_i32: i32,
    limit_u32: u32,
    limit_acc32: Acc32,
}

#[inline]
pub fn limit_f32(val: f32, llim: f32, ulim: f32) -> f32 {
    limit(val, llim, ulim)
}

#[inline(always)]
pub const fn upper_limit_q31(val: Q31, ulim: Q31) -> Q31 {
    if val > ulim { ulim } else { val }
}

#[inline(always)]
pub const fn lower_limit_q31(val: Q31, llim: Q31) -> Q31 {
    if val < llim { llim } else { val }
}

#[inline(always)]
pub const fn upper_limit_u16(val: u16, ulim: u16) -> u16 {
    if val > ulim { ulim } else { val }
}

/// True when `value` lies in `[nominal - delta, nominal + delta]`.
///
/// The window edges are computed with saturating arithmetic, so a window
/// reaching past the rails is cut at the rails rather than wrapping around.
///
/// ```
/// use rtdsp_signal::check_delta_q31;
///
/// assert!(check_delta_q31(105, 100, 5));
/// assert!(!check_delta_q31(106, 100, 5));
/// assert!(check_delta_q31(i32::MAX, i32::MAX - 1, 10));
/// ```
#[inline(always)]
pub const fn check_delta_q31(value: Q31, nominal: Q31, delta: Q31) -> bool {
    value >= qsub(nominal, delta) && value <= qadd(nominal, delta)
}

#[inline]
pub fn check_delta_f32(value: f32, nominal: f32, delta: f32) -> bool {
    value >= nominal - delta && value <= nominal + delta
}

#[cfg(test)]
mod tests {
    use super::*;
    use rtdsp_core::q31;

    #[test]
    fn limit_i16_sequence() {
        // -50..50 through [-25, 25]
        for val in -50i16..50 {
            let want = val.clamp(-25, 25);
            assert_eq!(limit_i16(val, -25, 25), want);
            assert_eq!(limit(val, -25, 25), want);
        }
    }

    #[test]
    fn one_sided_limits() {
        assert_eq!(upper_limit_q31(q31(0.9), q31(0.5)), q31(0.5));
        assert_eq!(upper_limit_q31(q31(-0.9), q31(0.5)), q31(-0.9));
        assert_eq!(lower_limit_q31(q31(-0.9), q31(-0.5)), q31(-0.5));
        assert_eq!(lower_limit_q31(q31(0.9), q31(-0.5)), q31(0.9));
        assert_eq!(upper_limit_u16(4000, 4095), 4000);
        assert_eq!(upper_limit_u16(5000, 4095), 4095);
    }

    #[test]
    fn inverted_bounds_return_llim() {
        assert_eq!(limit_i32(0, 10, -10), 10);
        assert_eq!(limit_u32(100, 7, 3), 7);
        assert_eq!(limit(0.0f32, 1.0, -1.0), 1.0);
    }

    #[test]
    fn typed_wrappers() {
        assert_eq!(limit_q31(i32::MAX, q31(-0.5), q31(0.5)), q31(0.5));
        assert_eq!(limit_u16(0, 10, 20), 10);
        assert_eq!(limit_acc32(70_000, -65_536, 65_535), 65_535);
        assert_eq!(limit_f32(1.5, -1.0, 1.0), 1.0);
        assert_eq!(limit_f32(-0.25, -1.0, 1.0), -0.25);
    }

    #[test]
    fn delta_window() {
        assert!(check_delta_q31(95, 100, 5));
        assert!(!check_delta_q31(94, 100, 5));
        assert!(check_delta_q31(i32::MIN, i32::MIN + 1, 10));
        assert!(!check_delta_q31(0, i32::MIN, 10));
        assert!(check_delta_f32(1.05, 1.0, 0.1));
        assert!(!check_delta_f32(1.2, 1.0, 0.1));
    }
}
