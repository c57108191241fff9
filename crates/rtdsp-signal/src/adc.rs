//! Raw ADC counts to fractional samples.
//!
//! The raw value is right justified. The offset is subtracted in counts, the
//! difference is shifted up to the top of the output word and then scaled by
//! `slope` with a saturating multiply. A 12-bit converter is assumed by all
//! the unsigned variants.

use rtdsp_core::{Q15, Q31, mulsat_q15, mulsat_q31};

/// 12-bit count to Q15.
///
/// The centered count is narrowed to 16 bits before the multiply, so counts
/// that land above `0x7FF` after the offset wrap negative.
///
/// ```
/// use rtdsp_core::q15;
/// use rtdsp_signal::adc_process_sample_q15;
///
/// assert_eq!(adc_process_sample_q15(3072, 2048, q15(1.0)), 16382);
/// assert_eq!(adc_process_sample_q15(1024, 2048, q15(1.0)), -16384);
/// ```
#[inline(always)]
pub const fn adc_process_sample_q15(x: u16, offset: i16, slope: Q15) -> Q15 {
    let centered = ((x as i16 as i32) - offset as i32) << 4;
    mulsat_q15(centered as Q15, slope)
}

/// 12-bit count referenced to mid-rail, to Q31.
#[inline(always)]
pub const fn adc_process_sample_q31(x: u16, offset: i16, slope: Q31) -> Q31 {
    mulsat_q31((x as i32 - offset as i32) << 20, slope)
}

/// 12-bit count referenced to ground, to Q31.
///
/// One bit less of headroom than the mid-rail form: a full scale count maps
/// close to `+1.0` instead of wrapping.
#[inline(always)]
pub const fn adc_process_sample_u_q31(x: u16, offset: i16, slope: Q31) -> Q31 {
    mulsat_q31((x as i32 - offset as i32) << 19, slope)
}

/// Signed 16-bit sample to Q31.
#[inline(always)]
pub const fn adc_process_sample_i16_q31(x: i16, offset: i16, slope: Q31) -> Q31 {
    mulsat_q31((x as i32 - offset as i32) << 16, slope)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rtdsp_core::{q15, q31};

    #[test]
    fn q15_scaling() {
        assert_eq!(adc_process_sample_q15(0, 0, q15(1.0)), 0);
        assert_eq!(adc_process_sample_q15(2048, 2048, q15(-0.5)), 0);
        assert_eq!(adc_process_sample_q15(2047, 0, q15(1.0)), 32750);
    }

    #[test]
    fn q15_full_scale_count_wraps() {
        assert_eq!(adc_process_sample_q15(4095, 0, q15(0.5)), -8);
    }

    #[test]
    fn q31_mid_rail() {
        assert_eq!(adc_process_sample_q31(3072, 2048, q31(1.0)), 1073741822);
        assert_eq!(adc_process_sample_q31(1024, 2048, q31(1.0)), -1073741824);
        assert_eq!(adc_process_sample_q31(2048, 2048, q31(0.5)), 0);
        assert_eq!(adc_process_sample_q31(3072, 2048, q31(0.5)), 536870912);
    }

    #[test]
    fn q31_ground_referenced() {
        assert_eq!(adc_process_sample_u_q31(4095, 0, q31(1.0)), 2146959358);
        assert_eq!(adc_process_sample_u_q31(2048, 0, q31(1.0)), 1073741822);
        assert_eq!(adc_process_sample_u_q31(1024, 0, q31(0.5)), 268435456);
    }

    #[test]
    fn q31_signed_input() {
        assert_eq!(adc_process_sample_i16_q31(16384, 0, q31(1.0)), 1073741822);
        assert_eq!(adc_process_sample_i16_q31(-2048, -2048, q31(0.5)), 0);
        assert_eq!(adc_process_sample_i16_q31(8192, 0, q31(0.5)), 268435456);
    }
}
