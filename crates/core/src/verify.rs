//! Channel verifier: samples one serialized channel word and checks it.

use crate::device::{Channel, DevicePins};
use crate::error::VerifyError;
use crate::timing::TimingProfile;

/// Samples a channel word bit by bit and compares it against an expectation.
#[derive(Debug, Clone, Copy)]
pub struct ChannelVerifier {
    timing: TimingProfile,
}

impl ChannelVerifier {
    pub fn new(timing: TimingProfile) -> Self {
        ChannelVerifier { timing }
    }

    /// Sample one channel word MSB-first and compare it against `expected`.
    ///
    /// Exactly 15 bits are sampled, indices 15 down to 1. The bit-clock edge
    /// that [`crate::sync::FrameSync::align`] stops on is the alignment point
    /// itself, not a sampling point, and the interface's one-clock data lag
    /// places the word's LSB in the slot where word-select flips to the next
    /// channel. Index 0 is therefore outside the verification window, and
    /// expectations are only meaningful in bits 15..1.
    ///
    /// On every sample the word-select line must still report `channel`; a
    /// mid-word transition is conclusive evidence of frame misalignment or a
    /// clocking fault and fails immediately, before the data bit is checked.
    pub fn verify(
        &self,
        dev: &mut impl DevicePins,
        expected: u16,
        channel: Channel,
    ) -> Result<(), VerifyError> {
        let step = self.timing.sclk_period();
        for bit in (1..=15u8).rev() {
            dev.advance(step);
            let wanted = ((expected >> bit) & 1) as u8;
            let observed = dev.serial_data();
            let select = dev.word_select();
            log::trace!("{channel} bit {bit}: want {wanted}, got {observed}, ws {select}");

            if select != channel.word_select() {
                return Err(VerifyError::WordSelectFault {
                    channel,
                    bit,
                    observed: select,
                });
            }
            if observed != wanted {
                return Err(VerifyError::BitMismatch {
                    channel,
                    bit,
                    expected: wanted,
                    observed,
                });
            }
        }
        Ok(())
    }
}
