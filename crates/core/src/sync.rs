//! Frame synchronizer: aligns sampling to the start of a LEFT frame.
//!
//! The serialized output may be observed at an arbitrary point mid-frame, so
//! before any channel word can be checked the harness waits out the
//! remainder of the current LEFT half and then one full RIGHT half, one
//! bit-clock period at a time. Crossing exactly one LEFT->RIGHT->LEFT
//! boundary pair guarantees the next bit-clock edge is the first sampling
//! point of a fresh LEFT frame, wherever sampling began.

use crate::device::DevicePins;
use crate::error::VerifyError;
use crate::timing::TimingProfile;

/// Establishes a LEFT-frame boundary in the output bitstream.
#[derive(Debug, Clone, Copy)]
pub struct FrameSync {
    timing: TimingProfile,
}

impl FrameSync {
    pub fn new(timing: TimingProfile) -> Self {
        FrameSync { timing }
    }

    /// Align to the next LEFT frame. Returns the ticks consumed.
    ///
    /// Already-aligned callers pay exactly one full frame: the LEFT wait
    /// finishes the current LEFT half and the RIGHT wait the RIGHT half.
    pub fn align(&self, dev: &mut impl DevicePins) -> Result<u32, VerifyError> {
        let mut consumed = 0;
        consumed += self.wait_word_select(dev, 1)?;
        consumed += self.wait_word_select(dev, 0)?;
        log::debug!("frame sync: left frame boundary after {consumed} ticks");
        Ok(consumed)
    }

    /// Advance one bit-clock period at a time until word-select reads `level`.
    ///
    /// A healthy device flips word-select within one half-frame of bit-clock
    /// steps; the wait gives up after four full frames so a dead line fails
    /// instead of spinning forever.
    fn wait_word_select(&self, dev: &mut impl DevicePins, level: u8) -> Result<u32, VerifyError> {
        let step = self.timing.sclk_period();
        let max_steps = 4u32 << self.timing.lrck_divide_bits;
        let mut consumed = 0;
        for _ in 0..max_steps {
            if dev.word_select() == level {
                return Ok(consumed);
            }
            dev.advance(step);
            consumed += step;
        }
        Err(VerifyError::SyncTimeout {
            stuck_at: level ^ 1,
            ticks: consumed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{Channel, REG_ROUTING, REG_VOLUME};
    use crate::sim::SimPsg;
    use crate::verify::ChannelVerifier;

    fn playing_sim() -> SimPsg {
        let timing = TimingProfile::default();
        let mut dev = SimPsg::new(timing);
        dev.set_enable(true);
        dev.set_reset(true);
        dev.advance(10);
        dev.set_reset(false);
        dev.poke_register(REG_ROUTING, 0x01);
        dev.poke_register(REG_VOLUME, 0x0F);
        dev
    }

    #[test]
    fn align_lands_on_left_frame() {
        let timing = TimingProfile::default();
        let mut dev = playing_sim();
        // Start mid-frame, not on a bit-clock boundary
        dev.advance(777);

        FrameSync::new(timing).align(&mut dev).unwrap();
        assert_eq!(dev.word_select(), 0);

        // The next bit-clock edge is the MSB sampling point of a LEFT word
        dev.advance(timing.sclk_period());
        assert_eq!(dev.word_select(), 0);
        assert_eq!(dev.serial_data(), 0); // bit 15 of 0x1FFE
    }

    #[test]
    fn align_twice_consumes_exactly_one_frame() {
        let timing = TimingProfile::default();
        let sync = FrameSync::new(timing);
        for entry_offset in [0, 13, 255, 300, 511] {
            let mut dev = playing_sim();
            dev.advance(entry_offset);
            sync.align(&mut dev).unwrap();
            let second = sync.align(&mut dev).unwrap();
            assert_eq!(second, timing.frame_period());
            assert_eq!(dev.word_select(), 0);
        }
    }

    #[test]
    fn align_then_verify_reads_full_word() {
        let timing = TimingProfile::default();
        let mut dev = playing_sim();
        dev.advance(42);

        FrameSync::new(timing).align(&mut dev).unwrap();
        ChannelVerifier::new(timing)
            .verify(&mut dev, 0x1FFF, Channel::Left)
            .unwrap();
    }

    #[test]
    fn dead_word_select_times_out() {
        let timing = TimingProfile::default();
        let mut dev = SimPsg::new(timing);
        // Never enabled: outputs stay at zero, word-select never goes right
        let err = FrameSync::new(timing).align(&mut dev).unwrap_err();
        assert!(matches!(err, VerifyError::SyncTimeout { stuck_at: 0, .. }));
    }
}
