//! Characterization sequences.
//!
//! Each sequence is a list of `(input, output)` pairs meant for plotting with
//! [`write_sequence_csv`](crate::write_sequence_csv).

use crate::error::SimResult;
use crate::scenario::Scenario;
use rtdsp_signal::limit_i16;

pub const SEQUENCE_LENGTH: usize = 100;

/// Sweep `-len/2 .. len/2` through `limit_i16` with limits `±len/4`.
///
/// `len` is capped at `u16::MAX` so every input stays inside `i16`.
pub fn limit_i16_sequence(len: usize) -> Vec<(i64, i64)> {
    let len = len.min(usize::from(u16::MAX));
    let half = (len / 2) as i64;
    let ulim = (len / 4) as i16;
    (0..len as i64)
        .map(|i| {
            let val = (i - half) as i16;
            (i64::from(val), i64::from(limit_i16(val, -ulim, ulim)))
        })
        .collect()
}

/// Plant output per step for [`Scenario::pi_characterization`].
pub fn pi_q15_sequence() -> SimResult<Vec<(i64, i64)>> {
    Ok(Scenario::pi_characterization().run()?.output_sequence())
}
