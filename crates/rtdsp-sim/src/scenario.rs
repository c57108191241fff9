//! YAML scenario files.
//!
//! A scenario names one controller, one first-order plant, a setpoint and a
//! step count. Gains and plant coefficients are written as plain decimals and
//! converted with the checked constructors, so a value the target format
//! cannot hold is an error instead of a silent clamp.
//!
//! ```yaml
//! name: pi_q15_first_order
//! controller:
//!   type: pi_q15
//!   kp: 1.5
//!   ki: 1.0
//! plant:
//!   a: -0.25
//!   b: 0.1
//! setpoint: 0.05
//! setpoint_ramp: 0.01   # optional
//! steps: 100
//! ```

use crate::error::{SimError, SimResult};
use crate::plant::{FirstOrderSystemQ15, FirstOrderSystemQ31, Plant};
use crate::run::{Sample, Trace, run_closed_loop, run_tracking};
use rtdsp_controls::{IirPiQ15, IirPiQ31, IirPidQ31, PiGains, PidGains, SampleController};
use rtdsp_core::{Q15, Q31, try_acc16, try_acc32, try_q15, try_q31};
use rtdsp_signal::{RampLimitQ15, RampQ31};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Upper bound on `steps`, keeps a typo from allocating a huge trace.
pub const MAX_STEPS: usize = 10_000_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ControllerSpec {
    PiQ15 { kp: f64, ki: f64 },
    PiQ31 { kp: f64, ki: f64 },
    PidQ31 { kp: f64, ki: f64, kd: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantSpec {
    pub a: f64,
    pub b: f64,
    #[serde(default)]
    pub x0: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub name: String,
    pub controller: ControllerSpec,
    pub plant: PlantSpec,
    pub setpoint: f64,
    /// Largest setpoint change per step. When set, the setpoint slews from
    /// the plant's initial state instead of stepping.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub setpoint_ramp: Option<f64>,
    pub steps: usize,
}

impl Scenario {
    /// The 100-step Q15 PI characterization: Kp 1.5, Ki 1.0, plant
    /// `a = -0.25`, `b = 0.1`, setpoint 0.1.
    pub fn pi_characterization() -> Self {
        Self {
            name: "iir_pi_q15".to_string(),
            controller: ControllerSpec::PiQ15 { kp: 1.5, ki: 1.0 },
            plant: PlantSpec {
                a: -0.25,
                b: 0.1,
                x0: 0.0,
            },
            setpoint: 0.1,
            setpoint_ramp: None,
            steps: crate::sequence::SEQUENCE_LENGTH,
        }
    }

    pub fn from_yaml_str(content: &str) -> SimResult<Self> {
        let scenario: Scenario = serde_yaml::from_str(content)?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn load(path: &Path) -> SimResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn save(&self, path: &Path) -> SimResult<()> {
        self.validate()?;
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check the step count and that every value fits its target format.
    pub fn validate(&self) -> SimResult<()> {
        if self.steps == 0 {
            return Err(SimError::InvalidArg {
                what: "steps must be positive",
            });
        }
        if self.steps > MAX_STEPS {
            return Err(SimError::InvalidArg {
                what: "steps exceeds the supported maximum",
            });
        }
        self.build()?;
        Ok(())
    }

    pub fn run(&self) -> SimResult<Trace> {
        self.validate()?;
        tracing::info!(name = %self.name, steps = self.steps, "running scenario");

        match self.build()? {
            Loop::PiQ15(mut pi, plant, reference) => {
                run_reference(&mut pi, plant, reference, self.steps)
            }
            Loop::PiQ31(mut pi, plant, reference) => {
                run_reference(&mut pi, plant, reference, self.steps)
            }
            Loop::PidQ31(mut pid, plant, reference) => {
                run_reference(&mut pid, plant, reference, self.steps)
            }
        }
    }

    fn build(&self) -> SimResult<Loop> {
        let built = match self.controller {
            ControllerSpec::PiQ15 { kp, ki } => {
                let plant = FirstOrderSystemQ15::new(
                    try_q15(self.plant.a)?,
                    try_q15(self.plant.b)?,
                    try_q15(self.plant.x0)?,
                );
                let setpoint = try_q15(self.setpoint)?;
                let reference = match self.setpoint_ramp {
                    Some(rate) => {
                        let mut ramp = RampLimitQ15::new(Q15::MIN, Q15::MAX, try_q15(rate)?)?;
                        ramp.init(plant.output());
                        Reference::Ramp(ramp, setpoint)
                    }
                    None => Reference::Fixed(setpoint),
                };
                Loop::PiQ15(
                    IirPiQ15::new(PiGains::new(try_acc16(kp)?, try_acc16(ki)?)),
                    plant,
                    reference,
                )
            }
            ControllerSpec::PiQ31 { kp, ki } => {
                let (plant, reference) = self.q31_loop()?;
                Loop::PiQ31(
                    IirPiQ31::new(PiGains::new(try_acc32(kp)?, try_acc32(ki)?)),
                    plant,
                    reference,
                )
            }
            ControllerSpec::PidQ31 { kp, ki, kd } => {
                let (plant, reference) = self.q31_loop()?;
                let gains = PidGains::new(try_acc32(kp)?, try_acc32(ki)?, try_acc32(kd)?);
                Loop::PidQ31(IirPidQ31::new(gains), plant, reference)
            }
        };
        Ok(built)
    }

    fn q31_loop(&self) -> SimResult<(FirstOrderSystemQ31, Reference<RampQ31, Q31>)> {
        let plant = FirstOrderSystemQ31::new(
            try_q31(self.plant.a)?,
            try_q31(self.plant.b)?,
            try_q31(self.plant.x0)?,
        );
        let setpoint = try_q31(self.setpoint)?;
        let reference = match self.setpoint_ramp {
            Some(rate) => {
                let mut ramp = RampQ31::new(try_q31(rate)?)?;
                ramp.init(plant.output());
                Reference::Ramp(ramp, setpoint)
            }
            None => Reference::Fixed(setpoint),
        };
        Ok((plant, reference))
    }
}

/// Setpoint source for a run.
enum Reference<R, S> {
    Fixed(S),
    /// Rate limiter and its final target.
    Ramp(R, S),
}

/// A scenario converted to fixed point, ready to run.
enum Loop {
    PiQ15(IirPiQ15, FirstOrderSystemQ15, Reference<RampLimitQ15, Q15>),
    PiQ31(IirPiQ31, FirstOrderSystemQ31, Reference<RampQ31, Q31>),
    PidQ31(IirPidQ31, FirstOrderSystemQ31, Reference<RampQ31, Q31>),
}

/// Ramps that step toward a target once per sample.
trait Slew<S> {
    fn advance(&mut self, target: S) -> S;
}

impl Slew<Q15> for RampLimitQ15 {
    fn advance(&mut self, target: Q15) -> Q15 {
        self.update(target)
    }
}

impl Slew<Q31> for RampQ31 {
    fn advance(&mut self, target: Q31) -> Q31 {
        self.update(target)
    }
}

fn run_reference<S, C, P, R>(
    controller: &mut C,
    mut plant: P,
    reference: Reference<R, S>,
    steps: usize,
) -> SimResult<Trace>
where
    S: Sample,
    C: SampleController<Sample = S>,
    P: Plant<Sample = S>,
    R: Slew<S>,
{
    match reference {
        Reference::Fixed(setpoint) => run_closed_loop(controller, &mut plant, setpoint, steps),
        Reference::Ramp(mut ramp, target) => {
            run_tracking(controller, &mut plant, |_| ramp.advance(target), steps)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rtdsp_core::DspError;

    const PI_Q31: &str = "
name: pi31
controller:
  type: pi_q31
  kp: 1.5
  ki: 1.0
plant:
  a: -0.25
  b: 0.1
setpoint: 0.05
steps: 10
";

    #[test]
    fn parses_tagged_controller() {
        let s = Scenario::from_yaml_str(PI_Q31).unwrap();
        assert_eq!(s.controller, ControllerSpec::PiQ31 { kp: 1.5, ki: 1.0 });
        assert_eq!(s.plant.x0, 0.0);
        assert_eq!(s.steps, 10);
    }

    #[test]
    fn rejects_zero_steps() {
        let yaml = PI_Q31.replace("steps: 10", "steps: 0");
        let err = Scenario::from_yaml_str(&yaml).unwrap_err();
        assert!(matches!(err, SimError::InvalidArg { .. }));
    }

    #[test]
    fn rejects_out_of_range_plant() {
        let yaml = PI_Q31.replace("a: -0.25", "a: 1.5");
        let err = Scenario::from_yaml_str(&yaml).unwrap_err();
        assert!(matches!(err, SimError::Dsp(DspError::OutOfRange { .. })));
    }

    #[test]
    fn rejects_gain_outside_acc16() {
        let yaml = "
controller: { type: pi_q15, kp: 300.0, ki: 1.0 }
plant: { a: 0.5, b: 0.5 }
setpoint: 0.1
steps: 5
";
        let err = Scenario::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, SimError::Dsp(DspError::OutOfRange { .. })));
    }

    #[test]
    fn rejects_unknown_controller() {
        let yaml = PI_Q31.replace("pi_q31", "lead_lag");
        assert!(matches!(
            Scenario::from_yaml_str(&yaml),
            Err(SimError::Yaml(_))
        ));
    }

    #[test]
    fn yaml_round_trip() {
        let s = Scenario::pi_characterization();
        let yaml = serde_yaml::to_string(&s).unwrap();
        assert!(yaml.contains("type: pi_q15"));
        assert_eq!(Scenario::from_yaml_str(&yaml).unwrap(), s);
    }

    #[test]
    fn setpoint_ramp_slews_reference() {
        let yaml = PI_Q31.replace("steps: 10", "setpoint_ramp: 0.01\nsteps: 10");
        let s = Scenario::from_yaml_str(&yaml).unwrap();
        assert_eq!(s.setpoint_ramp, Some(0.01));
        let trace = s.run().unwrap();
        let inc = i64::from(rtdsp_core::q31(0.01));
        assert_eq!(trace.samples[0].setpoint, inc);
        assert_eq!(trace.samples[4].setpoint, 5 * inc);
        assert_eq!(trace.samples[5].setpoint, i64::from(rtdsp_core::q31(0.05)));
        assert_eq!(trace.samples[9].setpoint, i64::from(rtdsp_core::q31(0.05)));
    }

    #[test]
    fn negative_ramp_is_a_signal_error() {
        let yaml = PI_Q31.replace("steps: 10", "setpoint_ramp: -0.01\nsteps: 10");
        assert!(matches!(
            Scenario::from_yaml_str(&yaml),
            Err(SimError::Signal(_))
        ));
    }

    #[test]
    fn run_produces_requested_steps() {
        let trace = Scenario::from_yaml_str(PI_Q31).unwrap().run().unwrap();
        assert_eq!(trace.len(), 10);
    }
}
