//! Verification failures reported by the harness.

use thiserror::Error;

use crate::device::Channel;

/// A conclusive conformance failure.
///
/// One observed deviation invalidates the frame alignment for every later
/// sample in the scenario, so none of these are retried or recovered from.
/// Bus timing violations are not separately classifiable: a phase hold that
/// is shorter than the device's sampling interval corrupts the command
/// silently and surfaces here as a downstream mismatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum VerifyError {
    /// A sampled serial-data bit differed from the expected word.
    #[error("{channel} channel: bit {bit} expected {expected}, observed {observed}")]
    BitMismatch {
        channel: Channel,
        bit: u8,
        expected: u8,
        observed: u8,
    },

    /// The word-select line left the expected channel mid-word.
    #[error("{channel} channel: word-select read {observed} at bit {bit}")]
    WordSelectFault { channel: Channel, bit: u8, observed: u8 },

    /// Word-select never reached the awaited level within the watchdog bound.
    #[error("word-select stuck at {stuck_at} for {ticks} ticks during frame alignment")]
    SyncTimeout { stuck_at: u8, ticks: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_full_context() {
        let err = VerifyError::BitMismatch {
            channel: Channel::Left,
            bit: 12,
            expected: 1,
            observed: 0,
        };
        assert_eq!(err.to_string(), "left channel: bit 12 expected 1, observed 0");

        let err = VerifyError::WordSelectFault {
            channel: Channel::Right,
            bit: 7,
            observed: 0,
        };
        assert_eq!(err.to_string(), "right channel: word-select read 0 at bit 7");
    }
}
