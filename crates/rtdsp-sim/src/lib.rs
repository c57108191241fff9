//! Closed-loop simulation harness for rtdsp controllers.
//!
//! Provides:
//! - First-order discrete plants in Q15 and Q31
//! - A fixed-step closed-loop runner producing sample traces
//! - YAML scenario files describing a controller, a plant and a setpoint
//! - CSV and JSON trace export, plus the two-column characterization sequences

pub mod error;
pub mod export;
pub mod plant;
pub mod run;
pub mod scenario;
pub mod sequence;

pub use error::{SimError, SimResult};
pub use export::{write_csv, write_json, write_sequence_csv};
pub use plant::{FirstOrderSystemQ15, FirstOrderSystemQ31, Plant};
pub use run::{LoopSample, Sample, SampleFormat, Trace, run_closed_loop, run_tracking};
pub use scenario::{ControllerSpec, PlantSpec, Scenario};
pub use sequence::{SEQUENCE_LENGTH, limit_i16_sequence, pi_q15_sequence};
