//! Fixed-step closed-loop runner.

use crate::error::{SimError, SimResult};
use crate::plant::Plant;
use rtdsp_controls::SampleController;
use rtdsp_core::{Q15, Q31, q15_to_f64, q31_to_f64};
use serde::{Deserialize, Serialize};

/// Sample word a loop runs on.
pub trait Sample: Copy + PartialEq + Into<i64> {
    const FORMAT: SampleFormat;
    const MIN: Self;
    const MAX: Self;

    fn wrapping_sub(self, rhs: Self) -> Self;
}

impl Sample for Q15 {
    const FORMAT: SampleFormat = SampleFormat::Q15;
    const MIN: Self = Q15::MIN;
    const MAX: Self = Q15::MAX;

    fn wrapping_sub(self, rhs: Self) -> Self {
        Q15::wrapping_sub(self, rhs)
    }
}

impl Sample for Q31 {
    const FORMAT: SampleFormat = SampleFormat::Q31;
    const MIN: Self = Q31::MIN;
    const MAX: Self = Q31::MAX;

    fn wrapping_sub(self, rhs: Self) -> Self {
        Q31::wrapping_sub(self, rhs)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleFormat {
    Q15,
    Q31,
}

impl SampleFormat {
    /// Raw word to its fractional value.
    pub fn to_f64(self, raw: i64) -> f64 {
        match self {
            SampleFormat::Q15 => q15_to_f64(raw as Q15),
            SampleFormat::Q31 => q31_to_f64(raw as Q31),
        }
    }
}

/// One recorded step. Values are raw words widened to `i64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoopSample {
    pub step: usize,
    pub setpoint: i64,
    pub error: i64,
    pub control: i64,
    pub output: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    pub format: SampleFormat,
    pub samples: Vec<LoopSample>,
}

impl Trace {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn last(&self) -> Option<&LoopSample> {
        self.samples.last()
    }

    /// Steps on which the controller output sat on a rail.
    pub fn saturated_steps(&self) -> usize {
        let (min, max) = match self.format {
            SampleFormat::Q15 => (i64::from(Q15::MIN), i64::from(Q15::MAX)),
            SampleFormat::Q31 => (i64::from(Q31::MIN), i64::from(Q31::MAX)),
        };
        self.samples
            .iter()
            .filter(|s| s.control == min || s.control == max)
            .count()
    }

    /// `(step, output)` pairs, the form written by the sequence CSV.
    pub fn output_sequence(&self) -> Vec<(i64, i64)> {
        self.samples
            .iter()
            .map(|s| (s.step as i64, s.output))
            .collect()
    }
}

/// Drive `controller` and `plant` for `steps` samples at a fixed setpoint.
///
/// Each step feeds `error = x - setpoint` (wrapping) to the controller, applies
/// its output to the plant and records the result. A saturated controller
/// output is logged once per run and the loop keeps going.
pub fn run_closed_loop<S, C, P>(
    controller: &mut C,
    plant: &mut P,
    setpoint: S,
    steps: usize,
) -> SimResult<Trace>
where
    S: Sample,
    C: SampleController<Sample = S>,
    P: Plant<Sample = S>,
{
    run_tracking(controller, plant, |_| setpoint, steps)
}

/// Like [`run_closed_loop`], with the setpoint for each step taken from
/// `reference`.
pub fn run_tracking<S, C, P, R>(
    controller: &mut C,
    plant: &mut P,
    mut reference: R,
    steps: usize,
) -> SimResult<Trace>
where
    S: Sample,
    C: SampleController<Sample = S>,
    P: Plant<Sample = S>,
    R: FnMut(usize) -> S,
{
    if steps == 0 {
        return Err(SimError::InvalidArg {
            what: "steps must be positive",
        });
    }

    let format = S::FORMAT;
    tracing::debug!(steps, ?format, "closed loop run starting");

    let mut samples = Vec::with_capacity(steps);
    let mut saturated_at = None;
    for step in 0..steps {
        let setpoint = reference(step);
        let error = plant.output().wrapping_sub(setpoint);
        let control = controller.step(error);
        if saturated_at.is_none() && (control == S::MIN || control == S::MAX) {
            saturated_at = Some(step);
            let raw: i64 = control.into();
            tracing::warn!(step, control = raw, "controller output saturated");
        }
        let output = plant.update(control);
        samples.push(LoopSample {
            step,
            setpoint: setpoint.into(),
            error: error.into(),
            control: control.into(),
            output: output.into(),
        });
    }

    let trace = Trace { format, samples };
    tracing::debug!(
        steps,
        saturated_steps = trace.saturated_steps(),
        final_output = ?trace.last().map(|s| s.output),
        "closed loop run finished"
    );
    Ok(trace)
}
