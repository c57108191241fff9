//! Q31 to and from scaled integers.
//!
//! `scale` is the integer value that a Q31 of 1.0 stands for. A voltage in Q31
//! with 1.0 meaning 1 kV converts to volts with `scale = 1000`.

use rtdsp_core::{Q31, ssat64};
use std::num::{NonZeroI32, NonZeroU32};

#[inline(always)]
const fn scaled(x: Q31, scale: u32) -> i64 {
    (x as i64 * scale as i64) >> 31
}

// Keep one extra bit, then round half up on it.
#[inline(always)]
const fn scaled_round(x: Q31, scale: u32) -> i64 {
    let r = (x as i64 * scale as i64) >> 30;
    let r = if r & 1 != 0 { r + 1 } else { r };
    r >> 1
}

/// `x * scale`, truncated, narrowed to 16 bits.
///
/// ```
/// use rtdsp_core::q31;
/// use rtdsp_signal::convert_q31_to_i16;
///
/// assert_eq!(convert_q31_to_i16(q31(0.5), 1000), 500);
/// ```
#[inline(always)]
pub const fn convert_q31_to_i16(x: Q31, scale: u32) -> i16 {
    scaled(x, scale) as i16
}

/// `x * scale`, rounded half up, narrowed to 16 bits.
#[inline(always)]
pub const fn convert_round_q31_to_i16(x: Q31, scale: u32) -> i16 {
    scaled_round(x, scale) as i16
}

/// Negative inputs wrap; callers pass non-negative values.
#[inline(always)]
pub const fn convert_q31_to_u16(x: Q31, scale: u32) -> u16 {
    scaled(x, scale) as u16
}

#[inline(always)]
pub const fn convert_q31_to_u32(x: Q31, scale: u32) -> u32 {
    scaled(x, scale) as u32
}

#[inline(always)]
pub const fn convert_q31_to_i32(x: Q31, scale: u32) -> i32 {
    scaled(x, scale) as i32
}

#[inline(always)]
pub const fn convert_round_q31_to_i32(x: Q31, scale: u32) -> i32 {
    scaled_round(x, scale) as i32
}

/// `x / scale` as Q31, saturating when `x >= scale`.
///
/// ```
/// use std::num::NonZeroU32;
/// use rtdsp_core::q31;
/// use rtdsp_signal::convert_u16_to_q31;
///
/// let milli = NonZeroU32::new(1000).unwrap();
/// assert_eq!(convert_u16_to_q31(576, milli), q31(0.576));
/// assert_eq!(convert_u16_to_q31(1500, milli), i32::MAX);
/// ```
#[inline(always)]
pub const fn convert_u16_to_q31(x: u16, scale: NonZeroU32) -> Q31 {
    ssat64(((x as i64) << 31) / scale.get() as i64, 32) as Q31
}

/// Signed form of [`convert_u16_to_q31`]. Division truncates toward zero.
#[inline(always)]
pub const fn convert_i16_to_q31(x: i16, scale: NonZeroI32) -> Q31 {
    ssat64(((x as i64) << 31) / scale.get() as i64, 32) as Q31
}

#[inline(always)]
pub const fn convert_i32_to_q31(x: i32, scale: NonZeroI32) -> Q31 {
    ssat64(((x as i64) << 31) / scale.get() as i64, 32) as Q31
}
