//! Behavioral model of the device under test.
//!
//! Implements the pin contract in software so scenarios can run without
//! hardware or an RTL simulator. Two halves:
//!
//! - **Command bus decode** — the input bus is sampled once per clock tick;
//!   a strobed value that changed since the previous tick is decoded into
//!   the 16-entry register file (address latch, data-low latch, commit on
//!   the data-high phase). A phase that is never held across a tick is
//!   lost, which mirrors the documented bus timing hazard.
//! - **Serial audio output** — word-select flips at half-frame boundaries
//!   and the data line lags one bit-clock, so the first slot of each half
//!   carries the previous word's least-significant bit and the MSB of the
//!   current word follows in the second slot.
//!
//! Tone synthesis is not modeled. A voice routed to a channel with volume
//! `v` plays at the constant level `v * 0x0222` (full volume: 0x1FFE), which
//! is all the conformance scenarios observe. Octave and pitch writes are
//! stored but do not alter the mixdown level.

use crate::command::{DATA_SHIFT, FLAG_ADDRESS, FLAG_DATA_HIGH, FLAG_STROBE};
use crate::device::{Channel, DevicePins, REG_ROUTING, REG_VOLUME};
use crate::timing::TimingProfile;

/// Amplitude per volume step; 15 steps map onto 0x1FFE with the LSB
/// always zero.
const AMPLITUDE_PER_STEP: u16 = 0x0222;

/// Software stand-in for the PSG device under test.
pub struct SimPsg {
    timing: TimingProfile,
    regs: [u8; 16],
    /// Ticks since reset release; source of the output frame phase.
    frame_tick: u64,
    /// Ticks ever clocked, across resets.
    total_ticks: u64,
    reset_asserted: bool,
    enabled: bool,
    input: u8,
    bidir: u8,
    /// Input bus value seen on the previous tick.
    sampled_input: u8,
    addr_latch: u8,
    data_latch: u8,
}

impl SimPsg {
    pub fn new(timing: TimingProfile) -> Self {
        // The serializer assumes 16-bit channel words
        debug_assert_eq!(timing.slots_per_channel(), 16);
        SimPsg {
            timing,
            regs: [0; 16],
            frame_tick: 0,
            total_ticks: 0,
            reset_asserted: false,
            enabled: false,
            input: 0,
            bidir: 0,
            sampled_input: 0,
            addr_latch: 0,
            data_latch: 0,
        }
    }

    /// Current value of a command register.
    pub fn register(&self, address: u8) -> u8 {
        self.regs[(address & 0xF) as usize]
    }

    /// Write a command register directly, bypassing the bus protocol.
    /// Scenario setup helper; real configuration goes through the bus.
    pub fn poke_register(&mut self, address: u8, value: u8) {
        self.regs[(address & 0xF) as usize] = value;
    }

    /// Total ticks this device has been clocked through.
    pub fn total_ticks(&self) -> u64 {
        self.total_ticks
    }

    /// Level last driven onto the bidirectional bus (unused by the device).
    pub fn bidir(&self) -> u8 {
        self.bidir
    }

    fn decode(&mut self, bus: u8) {
        if bus & FLAG_STROBE == 0 {
            return;
        }
        let nibble = (bus >> DATA_SHIFT) & 0xF;
        if bus & FLAG_ADDRESS != 0 {
            self.addr_latch = nibble;
        } else if bus & FLAG_DATA_HIGH != 0 {
            self.data_latch = (self.data_latch & 0x0F) | nibble << 4;
            self.regs[self.addr_latch as usize] = self.data_latch;
            log::trace!("sim: reg {:01x} <- {:02x}", self.addr_latch, self.data_latch);
        } else {
            self.data_latch = (self.data_latch & 0xF0) | nibble;
        }
    }

    /// Mixdown word currently playing on `channel`.
    fn mixdown(&self, channel: Channel) -> u16 {
        let routed = match channel {
            Channel::Left => self.regs[REG_ROUTING as usize] & 0x01 != 0,
            Channel::Right => self.regs[REG_ROUTING as usize] & 0x02 != 0,
        };
        let volume = (self.regs[REG_VOLUME as usize] & 0xF) as u16;
        if routed {
            volume * AMPLITUDE_PER_STEP
        } else {
            0
        }
    }
}

impl DevicePins for SimPsg {
    fn advance(&mut self, ticks: u32) {
        for _ in 0..ticks {
            self.total_ticks += 1;
            if self.reset_asserted || !self.enabled {
                continue;
            }
            if self.input != self.sampled_input {
                self.sampled_input = self.input;
                self.decode(self.sampled_input);
            }
            self.frame_tick += 1;
        }
    }

    fn set_reset(&mut self, asserted: bool) {
        self.reset_asserted = asserted;
        if asserted {
            self.regs = [0; 16];
            self.frame_tick = 0;
            self.addr_latch = 0;
            self.data_latch = 0;
            self.sampled_input = self.input;
        }
    }

    fn set_enable(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn write_input(&mut self, value: u8) {
        self.input = value;
    }

    fn write_bidir(&mut self, value: u8) {
        self.bidir = value;
    }

    fn read_output(&self) -> u8 {
        if self.reset_asserted || !self.enabled {
            return 0;
        }
        let slot = self.frame_tick >> self.timing.sclk_divide_bits;
        let per_channel = self.timing.slots_per_channel() as u64;
        let position = (slot & (per_channel - 1)) as u32;
        let channel = if (slot / per_channel) & 1 == 0 {
            Channel::Left
        } else {
            Channel::Right
        };

        let data_bit = if position == 0 {
            (self.mixdown(channel.other()) & 1) as u8
        } else {
            ((self.mixdown(channel) >> (16 - position)) & 1) as u8
        };
        channel.word_select() << 1 | data_bit << 3
    }
}
