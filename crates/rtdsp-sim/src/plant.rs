//! Discrete first-order plants.
//!
//! `x[n+1] = a * x[n] - b * u[n]`, using the plain (non-saturating) multiply
//! and a wrapping subtract. The loop feeds `x - setpoint` as the error, so a
//! negative control drives the state up.

use crate::run::Sample;
use rtdsp_core::{Q15, Q31, mul_q15, mul_q31};
use serde::{Deserialize, Serialize};

/// A plant advanced by one control sample per call.
pub trait Plant {
    type Sample: Sample;

    fn output(&self) -> Self::Sample;

    /// Apply `u` and return the new output.
    fn update(&mut self, u: Self::Sample) -> Self::Sample;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FirstOrderSystemQ15 {
    pub a: Q15,
    pub b: Q15,
    x: Q15,
}

impl FirstOrderSystemQ15 {
    pub fn new(a: Q15, b: Q15, x0: Q15) -> Self {
        Self { a, b, x: x0 }
    }

    pub fn reset(&mut self, x0: Q15) {
        self.x = x0;
    }
}

impl Plant for FirstOrderSystemQ15 {
    type Sample = Q15;

    fn output(&self) -> Q15 {
        self.x
    }

    fn update(&mut self, u: Q15) -> Q15 {
        self.x = mul_q15(self.a, self.x).wrapping_sub(mul_q15(self.b, u));
        self.x
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FirstOrderSystemQ31 {
    pub a: Q31,
    pub b: Q31,
    x: Q31,
}

impl FirstOrderSystemQ31 {
    pub fn new(a: Q31, b: Q31, x0: Q31) -> Self {
        Self { a, b, x: x0 }
    }

    pub fn reset(&mut self, x0: Q31) {
        self.x = x0;
    }
}

impl Plant for FirstOrderSystemQ31 {
    type Sample = Q31;

    fn output(&self) -> Q31 {
        self.x
    }

    fn update(&mut self, u: Q31) -> Q31 {
        self.x = mul_q31(self.a, self.x).wrapping_sub(mul_q31(self.b, u));
        self.x
    }
}
