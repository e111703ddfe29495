//! Pin-level contract of the device under test.
//!
//! The harness never owns the device. It reaches it exclusively through
//! [`DevicePins`]: write the input buses, read the output bus, and advance
//! the device clock by whole tick counts. The same harness code can then
//! target a behavioral model ([`crate::sim::SimPsg`]), a cycle-accurate RTL
//! simulation bridge, or live hardware behind a probe.
//!
//! Output bus layout: bit 1 carries word-select (0 = left channel, 1 =
//! right channel), bit 3 carries the serial audio data line. The remaining
//! output bits are unused by this harness.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Output bus bit mask: word-select line.
pub const OUT_WORD_SELECT: u8 = 1 << 1;
/// Output bus bit mask: serial audio data line.
pub const OUT_SERIAL_DATA: u8 = 1 << 3;

// Command register addresses exercised by the canonical scenario. The
// addressable space is 16 registers; these four are the documented ones.
/// Channel routing (bit 0 = left, bit 1 = right).
pub const REG_ROUTING: u8 = 0x0;
/// Octave select for voice 0.
pub const REG_OCTAVE: u8 = 0x1;
/// Pitch/frequency code for voice 0.
pub const REG_PITCH: u8 = 0x2;
/// Volume for voice 0 (low nibble, 0 = silent, 15 = full).
pub const REG_VOLUME: u8 = 0x6;

/// Audio channel identified by the word-select line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Channel {
    Left,
    Right,
}

impl Channel {
    /// Word-select level that reports this channel.
    pub fn word_select(self) -> u8 {
        match self {
            Channel::Left => 0,
            Channel::Right => 1,
        }
    }

    /// The other channel.
    pub fn other(self) -> Channel {
        match self {
            Channel::Left => Channel::Right,
            Channel::Right => Channel::Left,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Left => write!(f, "left"),
            Channel::Right => write!(f, "right"),
        }
    }
}

/// Clock-synchronous pin access to the device under test.
///
/// Every wait in the harness is an [`advance`](DevicePins::advance) call for
/// an integer tick count; control returns only after those ticks elapse.
/// Bus writes take effect from the next tick the device is clocked through,
/// output reads report the level after the most recent tick.
pub trait DevicePins {
    /// Run the device clock for `ticks` cycles.
    fn advance(&mut self, ticks: u32);

    /// Drive the active-low reset line (`true` = reset asserted).
    fn set_reset(&mut self, asserted: bool);

    /// Drive the device enable line.
    fn set_enable(&mut self, enabled: bool);

    /// Drive the 8-bit command input bus.
    fn write_input(&mut self, value: u8);

    /// Drive the 8-bit bidirectional bus (held at 0 by this harness).
    fn write_bidir(&mut self, value: u8);

    /// Read the 8-bit output bus.
    fn read_output(&self) -> u8;

    /// Word-select level currently on the output bus (0 = left, 1 = right).
    fn word_select(&self) -> u8 {
        (self.read_output() & OUT_WORD_SELECT) >> 1
    }

    /// Serial audio data level currently on the output bus.
    fn serial_data(&self) -> u8 {
        (self.read_output() & OUT_SERIAL_DATA) >> 3
    }
}
