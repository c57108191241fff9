//! IIR PI controllers.
//!
//! The PI law is run in incremental form,
//!
//! ```text
//! y[n] = y[n-1] + A0 * x[n] + A1 * x[n-1]
//! A0 = Kp + Ki
//! A1 = -Kp
//! ```
//!
//! which needs two multiplies and two words of state per sample. The input is
//! the control error and the output is the actuation, clamped to the output
//! format on every sample.
//!
//! Gains live in an accumulator format ([`Acc16`] for the Q15 controller,
//! [`Acc32`] for the Q31 ones) so values above 1.0 are representable.

use crate::controller::{GainSet, SampleController};
use crate::gains::PiGains;
use rtdsp_core::{ACC16_FRAC_BITS, ACC32_FRAC_BITS, Acc16, Acc32, Q15, Q31, ssat32, ssat64};
use serde::{Deserialize, Serialize};

/// Words of state kept by every PI controller: `[x[n-1], y[n-1]]`.
pub const PI_STATE_LEN: usize = 2;

const X1: usize = 0;
const Y1: usize = 1;

/// Q15 PI controller with 9.7 gains.
///
/// The accumulator is 32 bits wide and rounded before it is narrowed back to
/// Q15.
///
/// ```
/// use rtdsp_controls::{IirPiQ15, PiGains};
/// use rtdsp_core::{acc16, q15};
///
/// let mut pi = IirPiQ15::new(PiGains::new(acc16(1.0), acc16(0.5)));
/// assert_eq!(pi.update(q15(0.25)), q15(0.375));
/// assert_eq!(pi.update(q15(0.25)), q15(0.5));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IirPiQ15 {
    pub gains: PiGains<Acc16>,
    coeffs: [Acc16; 2],
    state: [Q15; PI_STATE_LEN],
}

impl IirPiQ15 {
    /// Build a controller with derived coefficients and cleared state.
    pub fn new(gains: PiGains<Acc16>) -> Self {
        let mut pi = Self {
            gains,
            ..Default::default()
        };
        pi.init(true);
        pi
    }

    /// Recompute the coefficients from `gains`, optionally clearing state.
    ///
    /// With `reset_state == false` the history is kept, so gains can be
    /// changed on a running loop without a step in the output.
    pub fn init(&mut self, reset_state: bool) {
        self.coeffs = self.gains.coefficients();
        if reset_state {
            self.state = [0; PI_STATE_LEN];
        }
    }

    pub fn update(&mut self, input: Q15) -> Q15 {
        // 9.7 x 1.15 products land in 10.22
        let mut acc = i32::from(self.coeffs[0]) * i32::from(input);
        acc = acc.wrapping_add(i32::from(self.coeffs[1]) * i32::from(self.state[X1]));
        acc = acc.wrapping_add(i32::from(self.state[Y1]) << ACC16_FRAC_BITS);
        acc = acc.wrapping_add(1 << (ACC16_FRAC_BITS - 1));
        let out = ssat32(acc >> ACC16_FRAC_BITS, 16) as Q15;

        self.state = [input, out];
        out
    }

    /// Seed `y[n-1]` so the next output starts from `output`.
    pub fn preload(&mut self, output: Q15) {
        self.state[Y1] = output;
    }

    pub fn coefficients(&self) -> [Acc16; 2] {
        self.coeffs
    }

    pub fn state(&self) -> [Q15; PI_STATE_LEN] {
        self.state
    }
}

impl SampleController for IirPiQ15 {
    type Sample = Q15;

    fn step(&mut self, input: Q15) -> Q15 {
        self.update(input)
    }

    fn reset(&mut self) {
        self.init(true);
    }
}

/// One PI sample over a 64-bit accumulator. No rounding on the narrow.
#[inline(always)]
fn update_q31(coeffs: &[Acc32; 2], state: &mut [Q31; PI_STATE_LEN], input: Q31) -> Q31 {
    // 17.15 x 1.31 products land in 18.46
    let mut acc = i64::from(coeffs[0]) * i64::from(input);
    acc = acc.wrapping_add(i64::from(coeffs[1]) * i64::from(state[X1]));
    acc = acc.wrapping_add(i64::from(state[Y1]) << ACC32_FRAC_BITS);
    let out = ssat64(acc >> ACC32_FRAC_BITS, 32) as Q31;

    *state = [input, out];
    out
}

/// Q31 PI controller with 17.15 gains.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IirPiQ31 {
    pub gains: PiGains<Acc32>,
    coeffs: [Acc32; 2],
    state: [Q31; PI_STATE_LEN],
}

impl IirPiQ31 {
    pub fn new(gains: PiGains<Acc32>) -> Self {
        let mut pi = Self {
            gains,
            ..Default::default()
        };
        pi.init(true);
        pi
    }

    /// See [`IirPiQ15::init`].
    pub fn init(&mut self, reset_state: bool) {
        self.coeffs = self.gains.coefficients();
        if reset_state {
            self.state = [0; PI_STATE_LEN];
        }
    }

    pub fn update(&mut self, input: Q31) -> Q31 {
        update_q31(&self.coeffs, &mut self.state, input)
    }

    pub fn preload(&mut self, output: Q31) {
        self.state[Y1] = output;
    }

    pub fn coefficients(&self) -> [Acc32; 2] {
        self.coeffs
    }

    pub fn state(&self) -> [Q31; PI_STATE_LEN] {
        self.state
    }
}

impl SampleController for IirPiQ31 {
    type Sample = Q31;

    fn step(&mut self, input: Q31) -> Q31 {
        self.update(input)
    }

    fn reset(&mut self) {
        self.init(true);
    }
}

/// Q31 PI controller holding two gain sets over one shared state.
///
/// The set is picked per call. Because the state is shared, switching sets
/// mid-run keeps the integrator where it is and only the proportional and
/// integral slopes change.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IirPiDualQ31 {
    pub gains_a: PiGains<Acc32>,
    pub gains_b: PiGains<Acc32>,
    coeffs_a: [Acc32; 2],
    coeffs_b: [Acc32; 2],
    state: [Q31; PI_STATE_LEN],
}

impl IirPiDualQ31 {
    pub fn new(gains_a: PiGains<Acc32>, gains_b: PiGains<Acc32>) -> Self {
        let mut pi = Self {
            gains_a,
            gains_b,
            ..Default::default()
        };
        pi.init(true);
        pi
    }

    /// Recompute both coefficient sets, optionally clearing state.
    pub fn init(&mut self, reset_state: bool) {
        self.coeffs_a = self.gains_a.coefficients();
        self.coeffs_b = self.gains_b.coefficients();
        if reset_state {
            self.state = [0; PI_STATE_LEN];
        }
    }

    pub fn update(&mut self, input: Q31, set: GainSet) -> Q31 {
        let coeffs = match set {
            GainSet::A => &self.coeffs_a,
            GainSet::B => &self.coeffs_b,
        };
        update_q31(coeffs, &mut self.state, input)
    }

    pub fn preload(&mut self, output: Q31) {
        self.state[Y1] = output;
    }

    pub fn coefficients(&self, set: GainSet) -> [Acc32; 2] {
        match set {
            GainSet::A => self.coeffs_a,
            GainSet::B => self.coeffs_b,
        }
    }

    pub fn state(&self) -> [Q31; PI_STATE_LEN] {
        self.state
    }
}
