//! Fixed-point formats.
//!
//! The formats are plain integer aliases. The binary point is a contract on
//! how the raw bits are read, not something the type system tracks:
//!
//! | Alias   | Width | Layout | Range            |
//! |---------|-------|--------|------------------|
//! | `Q15`   | 16    | 1.15   | [-1.0, 1.0)      |
//! | `Q31`   | 32    | 1.31   | [-1.0, 1.0)      |
//! | `Q63`   | 64    | 1.63   | [-1.0, 1.0)      |
//! | `Acc16` | 16    | 9.7    | [-256.0, 256.0)  |
//! | `Acc32` | 32    | 17.15  | [-65536, 65536)  |
//! | `Acc64` | 64    | 33.31  | accumulator only |
//!
//! In keeping with the usual DSP naming the sign bit is not counted in the
//! integer part of the accumulator layouts.

use crate::error::{DspError, DspResult};

/// A 16-bit fraction in 1.15 format.
pub type Q15 = i16;

/// A 32-bit fraction in 1.31 format.
pub type Q31 = i32;

/// A 64-bit fraction in 1.63 format.
pub type Q63 = i64;

/// A 16-bit accumulator in 9.7 format. Used for Q15 controller gains.
pub type Acc16 = i16;

/// A 32-bit accumulator in 17.15 format. Used for Q31 controller gains.
pub type Acc32 = i32;

/// A 64-bit accumulator in 33.31 format.
pub type Acc64 = i64;

pub const Q15_FRAC_BITS: u32 = 15;
pub const Q31_FRAC_BITS: u32 = 31;
pub const ACC16_FRAC_BITS: u32 = 7;
pub const ACC32_FRAC_BITS: u32 = 15;
pub const ACC64_FRAC_BITS: u32 = 31;

const Q15_SCALE: f64 = (1u32 << Q15_FRAC_BITS) as f64;
const Q31_SCALE: f64 = (1u64 << Q31_FRAC_BITS) as f64;
const ACC16_SCALE: f64 = (1u32 << ACC16_FRAC_BITS) as f64;
const ACC32_SCALE: f64 = (1u32 << ACC32_FRAC_BITS) as f64;

// Inputs at or above these map straight to the format maximum.
const Q15_CEIL: f64 = 0.999_969_482_421_875;
const ACC16_CEIL: f64 = 255.992_187_5;
const ACC32_CEIL: f64 = 65_535.999_969_482_421_875;

/// Converts a literal to [`Q15`] at compile time.
///
/// Values at or above `1.0 - 2^-15` give `0x7FFF`, values below `-1.0` give
/// `-0x8000`, anything else is scaled by `2^15` and truncated toward zero.
///
/// ```
/// use rtdsp_core::{q15, Q15};
///
/// const HALF: Q15 = q15(0.5);
/// assert_eq!(HALF, 0x4000);
/// assert_eq!(q15(1.0), 0x7FFF);
/// assert_eq!(q15(-1.0), -0x8000);
/// ```
pub const fn q15(x: f64) -> Q15 {
    if x < Q15_CEIL {
        if x >= -1.0 { (x * Q15_SCALE) as Q15 } else { Q15::MIN }
    } else {
        Q15::MAX
    }
}

/// Converts a literal to [`Q31`] at compile time. `1.0` maps to `0x7FFF_FFFF`.
pub const fn q31(x: f64) -> Q31 {
    if x < 1.0 {
        if x >= -1.0 { (x * Q31_SCALE) as Q31 } else { Q31::MIN }
    } else {
        Q31::MAX
    }
}

/// Converts a literal to [`Acc16`] (9.7) at compile time.
pub const fn acc16(x: f64) -> Acc16 {
    if x < ACC16_CEIL {
        if x >= -256.0 { (x * ACC16_SCALE) as Acc16 } else { Acc16::MIN }
    } else {
        Acc16::MAX
    }
}

/// Converts a literal to [`Acc32`] (17.15) at compile time.
pub const fn acc32(x: f64) -> Acc32 {
    if x < ACC32_CEIL {
        if x >= -65_536.0 { (x * ACC32_SCALE) as Acc32 } else { Acc32::MIN }
    } else {
        Acc32::MAX
    }
}

pub const fn q15_to_f64(x: Q15) -> f64 {
    x as f64 / Q15_SCALE
}

pub const fn q31_to_f64(x: Q31) -> f64 {
    x as f64 / Q31_SCALE
}

pub const fn acc16_to_f64(x: Acc16) -> f64 {
    x as f64 / ACC16_SCALE
}

pub const fn acc32_to_f64(x: Acc32) -> f64 {
    x as f64 / ACC32_SCALE
}

fn check_range(x: f64, min: f64, max: f64, what: &'static str) -> DspResult<f64> {
    if !x.is_finite() {
        return Err(DspError::NonFinite { what, value: x });
    }
    if x < min || x >= max {
        return Err(DspError::OutOfRange {
            what,
            value: x,
            min,
            max,
        });
    }
    Ok(x)
}

/// Runtime [`q15`] that rejects values the format cannot hold.
pub fn try_q15(x: f64) -> DspResult<Q15> {
    check_range(x, -1.0, 1.0, "q15").map(q15)
}

/// Runtime [`q31`] that rejects values the format cannot hold.
pub fn try_q31(x: f64) -> DspResult<Q31> {
    check_range(x, -1.0, 1.0, "q31").map(q31)
}

/// Runtime [`acc16`] that rejects values the format cannot hold.
pub fn try_acc16(x: f64) -> DspResult<Acc16> {
    check_range(x, -256.0, 256.0, "acc16").map(acc16)
}

/// Runtime [`acc32`] that rejects values the format cannot hold.
pub fn try_acc32(x: f64) -> DspResult<Acc32> {
    check_range(x, -65_536.0, 65_536.0, "acc32").map(acc32)
}
