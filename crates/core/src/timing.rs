//! Timing profile shared by the command bus and the serial audio interface.

use serde::{Deserialize, Serialize};

/// Immutable timing parameters for one device.
///
/// Passed by value into each harness component at construction, so scenarios
/// against differently-clocked devices can coexist. The defaults match a
/// 12.288 MHz reference clock (81 ns period): 16 ticks per serial bit-clock,
/// 512 ticks per full left/right frame, 100 ticks per command-bus phase.
///
/// `bus_delay_cycles` has no upper bound; its lower bound is the device's
/// internal bus sampling interval. A value below that is not detectable by
/// the encoder and shows up downstream as a verification mismatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingProfile {
    /// log2 of device clock ticks per serial bit-clock period.
    pub sclk_divide_bits: u32,
    /// log2 of serial bit-clocks per full left/right frame.
    pub lrck_divide_bits: u32,
    /// Device clock ticks each command-bus phase is held.
    pub bus_delay_cycles: u32,
}

impl TimingProfile {
    /// Ticks in one serial bit-clock period.
    pub fn sclk_period(&self) -> u32 {
        1 << self.sclk_divide_bits
    }

    /// Ticks in one full left+right frame.
    pub fn frame_period(&self) -> u32 {
        1 << (self.sclk_divide_bits + self.lrck_divide_bits)
    }

    /// Serial bit-clock slots in one channel half-frame.
    pub fn slots_per_channel(&self) -> u32 {
        1 << (self.lrck_divide_bits - 1)
    }
}

impl Default for TimingProfile {
    fn default() -> Self {
        TimingProfile {
            sclk_divide_bits: 4,
            lrck_divide_bits: 5,
            bus_delay_cycles: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_periods() {
        let t = TimingProfile::default();
        assert_eq!(t.sclk_period(), 16);
        assert_eq!(t.frame_period(), 512);
        assert_eq!(t.slots_per_channel(), 16);
    }

    #[test]
    fn frame_is_two_halves_of_slots() {
        let t = TimingProfile {
            sclk_divide_bits: 3,
            lrck_divide_bits: 5,
            bus_delay_cycles: 50,
        };
        assert_eq!(t.frame_period(), 2 * t.slots_per_channel() * t.sclk_period());
    }
}
