//! Saturation primitives.
//!
//! `qadd`/`qsub` clamp to the full range of their width, the same result a
//! core with hardware saturating instructions produces. There is a single
//! implementation; nothing here switches on the target.

/// Signed saturation to a bit width.
///
/// `bits` outside `1..=BITS` leaves the value untouched, for every width.
pub trait SignedSaturate: Sized {
    fn signed_saturate(self, bits: u32) -> Self;
}

/// Clamps `value` into `[-2^(bits-1), 2^(bits-1) - 1]`.
///
/// ```
/// use rtdsp_core::ssat32;
///
/// assert_eq!(ssat32(40_000, 16), 0x7FFF);
/// assert_eq!(ssat32(-40_000, 16), -0x8000);
/// assert_eq!(ssat32(1234, 16), 1234);
/// assert_eq!(ssat32(40_000, 0), 40_000);
/// ```
#[inline(always)]
pub const fn ssat32(value: i32, bits: u32) -> i32 {
    if bits == 0 || bits > i32::BITS {
        return value;
    }
    let max = i32::MAX >> (i32::BITS - bits);
    let min = -max - 1;
    if value > max {
        max
    } else if value < min {
        min
    } else {
        value
    }
}

/// 64-bit form of [`ssat32`].
#[inline(always)]
pub const fn ssat64(value: i64, bits: u32) -> i64 {
    if bits == 0 || bits > i64::BITS {
        return value;
    }
    let max = i64::MAX >> (i64::BITS - bits);
    let min = -max - 1;
    if value > max {
        max
    } else if value < min {
        min
    } else {
        value
    }
}

impl SignedSaturate for i32 {
    #[inline(always)]
    fn signed_saturate(self, bits: u32) -> Self {
        ssat32(self, bits)
    }
}

impl SignedSaturate for i64 {
    #[inline(always)]
    fn signed_saturate(self, bits: u32) -> Self {
        ssat64(self, bits)
    }
}

/// Saturating 32-bit add.
#[inline(always)]
pub const fn qadd(x: i32, y: i32) -> i32 {
    x.saturating_add(y)
}

/// Saturating 32-bit subtract.
#[inline(always)]
pub const fn qsub(x: i32, y: i32) -> i32 {
    x.saturating_sub(y)
}

/// Saturating 16-bit add.
#[inline(always)]
pub const fn qadd16(x: i16, y: i16) -> i16 {
    x.saturating_add(y)
}

/// Saturating 16-bit subtract.
#[inline(always)]
pub const fn qsub16(x: i16, y: i16) -> i16 {
    x.saturating_sub(y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ssat32_clamps_to_width() {
        assert_eq!(ssat32(0x7FFF, 15), 0x3FFF);
        assert_eq!(ssat32(-0x8000, 15), -0x4000);
        assert_eq!(ssat32(i32::MAX, 32), i32::MAX);
        assert_eq!(ssat32(i32::MIN, 32), i32::MIN);
        assert_eq!(ssat32(5, 1), 0);
        assert_eq!(ssat32(-5, 1), -1);
    }

    #[test]
    fn ssat64_clamps_to_width() {
        assert_eq!(ssat64(i64::from(i32::MAX) + 1, 32), i64::from(i32::MAX));
        assert_eq!(ssat64(i64::from(i32::MIN) - 1, 32), i64::from(i32::MIN));
        assert_eq!(ssat64(i64::MIN, 63), -0x4000_0000_0000_0000);
        assert_eq!(ssat64(i64::MAX, 63), 0x3FFF_FFFF_FFFF_FFFF);
        assert_eq!(ssat64(i64::MAX, 64), i64::MAX);
        assert_eq!(ssat64(i64::MIN, 64), i64::MIN);
    }

    #[test]
    fn out_of_range_width_is_a_no_op() {
        assert_eq!(ssat32(123_456, 0), 123_456);
        assert_eq!(ssat32(123_456, 33), 123_456);
        assert_eq!(ssat64(i64::MAX, 0), i64::MAX);
        assert_eq!(ssat64(i64::MIN, 65), i64::MIN);
    }

    #[test]
    fn trait_matches_free_functions() {
        assert_eq!(70_000_i32.signed_saturate(16), ssat32(70_000, 16));
        assert_eq!((-70_000_i64).signed_saturate(16), ssat64(-70_000, 16));
    }

    #[test]
    fn qadd_qsub_saturate() {
        assert_eq!(qadd(i32::MAX, 1), i32::MAX);
        assert_eq!(qadd(i32::MIN, -1), i32::MIN);
        assert_eq!(qsub(i32::MIN, 1), i32::MIN);
        assert_eq!(qsub(0, i32::MIN), i32::MAX);
        assert_eq!(qadd(100, -300), -200);
        assert_eq!(qadd16(i16::MAX, 2), i16::MAX);
        assert_eq!(qsub16(i16::MIN, 2), i16::MIN);
        assert_eq!(qsub16(0, 0x80), -0x80);
    }
}
