//! IIR PID controllers.
//!
//! Two shapes are provided:
//!
//! - [`IirPidQ31`] runs the PI recurrence and a separate derivative branch.
//!   The raw derivative is the input's second difference scaled by Kd, then
//!   smoothed by a first-order low-pass before it is added to the PI output.
//! - [`IirPidScheduledQ31`] folds all three terms into one recurrence over
//!   `x[n]`, `x[n-1]`, `x[n-2]`, with two gain sets and an output hold mask.

use crate::controller::{GainSet, SampleController};
use crate::gains::{PID_GAIN_SHIFT, PidGains};
use rtdsp_core::{ACC32_FRAC_BITS, Acc32, Q31, qadd, ssat64};
use serde::{Deserialize, Serialize};

/// Words of state: `[x[n-1], x[n-2], y[n-1]]`.
pub const PID_STATE_LEN: usize = 3;

/// Low-pass weight on the derivative branch: `f += (d - f) / 2^SHIFT`.
pub const DERIVATIVE_FILTER_SHIFT: u32 = 2;

const Y1: usize = 2;

const SCHEDULED_ALIGN: u32 = ACC32_FRAC_BITS + PID_GAIN_SHIFT;

/// Q31 PID controller with 17.15 gains and a filtered derivative.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IirPidQ31 {
    pub gains: PidGains<Acc32>,
    coeffs: [Acc32; 2],
    coeffs_d: [Acc32; 3],
    state: [Q31; PID_STATE_LEN],
    derivative: Q31,
    filtered_derivative: Q31,
}

impl IirPidQ31 {
    pub fn new(gains: PidGains<Acc32>) -> Self {
        let mut pid = Self {
            gains,
            ..Default::default()
        };
        pid.init(true);
        pid
    }

    /// Recompute coefficients. `reset_state` also clears both derivative
    /// words.
    pub fn init(&mut self, reset_state: bool) {
        self.coeffs = self.gains.pi_coefficients();
        self.coeffs_d = self.gains.derivative_coefficients();
        if reset_state {
            self.state = [0; PID_STATE_LEN];
            self.derivative = 0;
            self.filtered_derivative = 0;
        }
    }

    pub fn update(&mut self, input: Q31) -> Q31 {
        let [x1, x2, y1] = self.state;
        let x = i64::from(input);

        let mut acc = i64::from(self.coeffs[0]) * x;
        acc = acc.wrapping_add(i64::from(self.coeffs[1]) * i64::from(x1));
        acc = acc.wrapping_add(i64::from(y1) << ACC32_FRAC_BITS);
        let pi = ssat64(acc >> ACC32_FRAC_BITS, 32) as Q31;

        let mut acc_d = i64::from(self.coeffs_d[0]) * x;
        acc_d = acc_d.wrapping_add(i64::from(self.coeffs_d[1]) * i64::from(x1));
        acc_d = acc_d.wrapping_add(i64::from(self.coeffs_d[2]) * i64::from(x2));
        self.derivative = ssat64(acc_d >> ACC32_FRAC_BITS, 32) as Q31;

        // f - f/4 + d/4 stays inside i32 for any f, d
        let f = self.filtered_derivative;
        self.filtered_derivative =
            f - (f >> DERIVATIVE_FILTER_SHIFT) + (self.derivative >> DERIVATIVE_FILTER_SHIFT);

        let out = qadd(pi, self.filtered_derivative);
        self.state = [input, x1, out];
        out
    }

    pub fn preload(&mut self, output: Q31) {
        self.state[Y1] = output;
    }

    /// Unfiltered derivative from the last update.
    pub fn derivative(&self) -> Q31 {
        self.derivative
    }

    pub fn filtered_derivative(&self) -> Q31 {
        self.filtered_derivative
    }

    pub fn state(&self) -> [Q31; PID_STATE_LEN] {
        self.state
    }
}

impl SampleController for IirPidQ31 {
    type Sample = Q31;

    fn step(&mut self, input: Q31) -> Q31 {
        self.update(input)
    }

    fn reset(&mut self) {
        self.init(true);
    }
}

/// Q31 PID with two gain sets and an output hold mask.
///
/// Gains are 13.19 ([`pid_gain`](crate::pid_gain)), which trades range for
/// four extra fractional bits compared to [`IirPidQ31`].
///
/// While the mask is armed `update` repeats the previous output. The input
/// history still advances, so when the mask runs out the recurrence resumes
/// from the held output with fresh input differences.
///
/// ```
/// use rtdsp_controls::{GainSet, IirPidScheduledQ31, PidGains, pid_gain};
///
/// let a = PidGains::new(pid_gain(1.0), pid_gain(0.5), 0);
/// let mut pid = IirPidScheduledQ31::new(a, a);
/// let y = pid.update(1 << 29, GainSet::A);
///
/// pid.hold(2);
/// assert_eq!(pid.update(1 << 29, GainSet::A), y);
/// assert_eq!(pid.update(1 << 29, GainSet::A), y);
/// assert_eq!(pid.mask_remaining(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IirPidScheduledQ31 {
    pub gains_a: PidGains<Acc32>,
    pub gains_b: PidGains<Acc32>,
    coeffs_a: [Acc32; 3],
    coeffs_b: [Acc32; 3],
    state: [Q31; PID_STATE_LEN],
    mask_count: u32,
}

impl IirPidScheduledQ31 {
    pub fn new(gains_a: PidGains<Acc32>, gains_b: PidGains<Acc32>) -> Self {
        let mut pid = Self {
            gains_a,
            gains_b,
            ..Default::default()
        };
        pid.init(true);
        pid
    }

    /// Recompute both coefficient sets. `reset_state` also disarms the mask.
    pub fn init(&mut self, reset_state: bool) {
        self.coeffs_a = self.gains_a.incremental_coefficients();
        self.coeffs_b = self.gains_b.incremental_coefficients();
        if reset_state {
            self.state = [0; PID_STATE_LEN];
            self.mask_count = 0;
        }
    }

    pub fn update(&mut self, input: Q31, set: GainSet) -> Q31 {
        let [x1, x2, y1] = self.state;

        let out = if self.mask_count > 0 {
            self.mask_count -= 1;
            y1
        } else {
            let c = match set {
                GainSet::A => &self.coeffs_a,
                GainSet::B => &self.coeffs_b,
            };
            let mut acc = i64::from(c[0]) * i64::from(input);
            acc = acc.wrapping_add(i64::from(c[1]) * i64::from(x1));
            acc = acc.wrapping_add(i64::from(c[2]) * i64::from(x2));
            acc = acc.wrapping_add(i64::from(y1) << SCHEDULED_ALIGN);
            ssat64(acc >> SCHEDULED_ALIGN, 32) as Q31
        };

        self.state = [input, x1, out];
        out
    }

    /// Repeat the current output for the next `samples` updates.
    pub fn hold(&mut self, samples: u32) {
        self.mask_count = samples;
    }

    pub fn mask_remaining(&self) -> u32 {
        self.mask_count
    }

    pub fn preload(&mut self, output: Q31) {
        self.state[Y1] = output;
    }

    pub fn coefficients(&self, set: GainSet) -> [Acc32; 3] {
        match set {
            GainSet::A => self.coeffs_a,
            GainSet::B => self.coeffs_b,
        }
    }

    pub fn state(&self) -> [Q31; PID_STATE_LEN] {
        self.state
    }
}
