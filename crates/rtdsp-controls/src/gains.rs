//! Controller gains and the coefficients derived from them.

use rtdsp_core::{ACC32_FRAC_BITS, Acc16, Acc32, qadd, qadd16, qsub, qsub16};
use serde::{Deserialize, Serialize};

/// Proportional and integral gains in an accumulator format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PiGains<G> {
    pub kp: G,
    pub ki: G,
}

/// Proportional, integral and derivative gains in an accumulator format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PidGains<G> {
    pub kp: G,
    pub ki: G,
    pub kd: G,
}

impl<G> PiGains<G> {
    pub const fn new(kp: G, ki: G) -> Self {
        Self { kp, ki }
    }
}

impl<G> PidGains<G> {
    pub const fn new(kp: G, ki: G, kd: G) -> Self {
        Self { kp, ki, kd }
    }
}

impl PiGains<Acc16> {
    /// `[A0, A1] = [Kp + Ki, -Kp]`, saturating.
    pub const fn coefficients(&self) -> [Acc16; 2] {
        [qadd16(self.kp, self.ki), qsub16(0, self.kp)]
    }
}

impl PiGains<Acc32> {
    /// `[A0, A1] = [Kp + Ki, -Kp]`, saturating.
    pub const fn coefficients(&self) -> [Acc32; 2] {
        [qadd(self.kp, self.ki), qsub(0, self.kp)]
    }
}

impl PidGains<Acc32> {
    /// Proportional and integral pair, `[Kp + Ki, -Kp]`.
    pub const fn pi_coefficients(&self) -> [Acc32; 2] {
        PiGains::new(self.kp, self.ki).coefficients()
    }

    /// Second difference of the input scaled by Kd, `[Kd, -2Kd, Kd]`.
    pub const fn derivative_coefficients(&self) -> [Acc32; 3] {
        [self.kd, qsub(0, qadd(self.kd, self.kd)), self.kd]
    }

    /// Single recurrence over `x[n]`, `x[n-1]`, `x[n-2]`:
    /// `[Kp + Ki + Kd, -Kp - 2Kd, Kd]`.
    pub const fn incremental_coefficients(&self) -> [Acc32; 3] {
        let kd2 = qadd(self.kd, self.kd);
        [
            qadd(qadd(self.kp, self.ki), self.kd),
            qsub(qsub(0, self.kp), kd2),
            self.kd,
        ]
    }
}

/// Extra fractional bits carried by scheduled PID gains.
pub const PID_GAIN_SHIFT: u32 = 4;

const PID_GAIN_FRAC_BITS: u32 = ACC32_FRAC_BITS + PID_GAIN_SHIFT;
const PID_GAIN_SCALE: f64 = (1u32 << PID_GAIN_FRAC_BITS) as f64;
const PID_GAIN_CEIL: f64 = 4_095.999_998_092_651_367_187_5;

/// Converts a literal to the 13.19 gain format used by
/// [`IirPidScheduledQ31`](crate::IirPidScheduledQ31).
///
/// Range is [-4096.0, 4096.0); values outside clamp to the end points.
///
/// ```
/// use rtdsp_controls::pid_gain;
///
/// assert_eq!(pid_gain(1.0), 1 << 19);
/// assert_eq!(pid_gain(5000.0), i32::MAX);
/// ```
pub const fn pid_gain(x: f64) -> Acc32 {
    if x < PID_GAIN_CEIL {
        if x >= -4_096.0 { (x * PID_GAIN_SCALE) as Acc32 } else { Acc32::MIN }
    } else {
        Acc32::MAX
    }
}

pub const fn pid_gain_to_f64(x: Acc32) -> f64 {
    x as f64 / PID_GAIN_SCALE
}
