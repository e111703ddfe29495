//! Command encoder for the four-phase strobed input bus.
//!
//! A register write is presented to the device as three strobed nibbles
//! (address, data low, data high) followed by an idle guard phase, each held
//! for `bus_delay_cycles` ticks. There is no acknowledge line: the hold time
//! must exceed the device's internal bus sampling interval, and a hold that
//! is too short corrupts the write silently rather than raising an error
//! here. The guard phase deasserts the whole bus, so the device always sees
//! an idle gap between consecutive commands.

use serde::{Deserialize, Serialize};

use crate::device::DevicePins;
use crate::timing::TimingProfile;

/// Input bus bit: strobe, asserted whenever a payload nibble is presented.
pub const FLAG_STROBE: u8 = 1 << 0;
/// Input bus bit: the presented nibble is a register address.
pub const FLAG_ADDRESS: u8 = 1 << 1;
/// Input bus bit: the presented nibble is the high half of the data byte.
pub const FLAG_DATA_HIGH: u8 = 1 << 2;
/// Payload nibble position: the DA[3:0] lines sit on input bus bits 6..3.
pub const DATA_SHIFT: u8 = 3;

/// One register write: 4-bit address, 8-bit data.
///
/// Only the low nibble of `address` is ever transmitted; callers must not
/// rely on the high nibble reaching the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    pub address: u8,
    pub data: u8,
}

impl Command {
    pub const fn new(address: u8, data: u8) -> Self {
        Command { address, data }
    }
}

/// Encodes register writes into timed four-phase bus sequences.
#[derive(Debug, Clone, Copy)]
pub struct CommandEncoder {
    timing: TimingProfile,
}

impl CommandEncoder {
    pub fn new(timing: TimingProfile) -> Self {
        CommandEncoder { timing }
    }

    /// Drive one register write onto the input bus.
    ///
    /// Suspends the caller for exactly `4 * bus_delay_cycles` ticks and
    /// leaves the bus deasserted. The emitted phase values depend only on
    /// the command, never on prior device state.
    pub fn send(&self, dev: &mut impl DevicePins, command: Command) {
        let Command { address, data } = command;
        log::debug!("bus write: reg {:01x} <- {:02x}", address & 0xF, data);

        let hold = self.timing.bus_delay_cycles;

        // Phase 1: address nibble
        dev.write_input(FLAG_STROBE | FLAG_ADDRESS | (address & 0xF) << DATA_SHIFT);
        dev.advance(hold);
        // Phase 2: low nibble of data
        dev.write_input(FLAG_STROBE | (data & 0xF) << DATA_SHIFT);
        dev.advance(hold);
        // Phase 3: high nibble of data
        dev.write_input(FLAG_STROBE | FLAG_DATA_HIGH | (data >> 4) << DATA_SHIFT);
        dev.advance(hold);
        // Phase 4: guard band
        dev.write_input(0);
        dev.advance(hold);
    }
}
