//! Fixed-point IIR controllers for rtdsp.
//!
//! Every controller is a plain caller-owned struct. The lifecycle is the same
//! for all of them:
//!
//! 1. construct (`Default` for a zeroed instance, or `new` with gains)
//! 2. set the public gain fields
//! 3. `init(reset_state)` to derive the per-sample coefficients
//! 4. call `update` once per sample for the life of the loop
//!
//! Coefficients are only recomputed by `init`, so changing a gain field has
//! no effect until `init` runs again.
//!
//! # Variants
//!
//! - [`IirPiQ15`], [`IirPiQ31`]: single gain set PI
//! - [`IirPiDualQ31`]: PI with two gain sets selected per call
//! - [`IirPidQ31`]: PID with a low-pass filtered derivative branch
//! - [`IirPidScheduledQ31`]: PID with two gain sets and an output hold mask

pub mod controller;
pub mod gains;
pub mod pi;
pub mod pid;

pub use controller::{GainSet, SampleController};
pub use gains::{PID_GAIN_SHIFT, PiGains, PidGains, pid_gain, pid_gain_to_f64};
pub use pi::{IirPiDualQ31, IirPiQ15, IirPiQ31, PI_STATE_LEN};
pub use pid::{DERIVATIVE_FILTER_SHIFT, IirPidQ31, IirPidScheduledQ31, PID_STATE_LEN};
