//! Shared controller seams.

use serde::{Deserialize, Serialize};

/// One sample in, one sample out.
///
/// Implemented by the single gain set controllers so loops can be driven
/// generically. `reset` is equivalent to `init(true)`.
pub trait SampleController {
    type Sample: Copy;

    fn step(&mut self, input: Self::Sample) -> Self::Sample;

    fn reset(&mut self);
}

/// Coefficient set used by the dual gain controllers for one call.
///
/// Both sets share the same state vector, so switching between them does not
/// disturb the integrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GainSet {
    #[default]
    A,
    B,
}
