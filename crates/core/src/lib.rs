//! # psg-harness
//!
//! Pin-level conformance harness for a PSG sound device exposing a strobed
//! 4-bit command bus and a synchronized two-channel serial audio output
//! (word-select plus serial-data, as in common digital-audio interfaces).
//!
//! The harness encodes register writes into the device's multi-phase bus
//! protocol, aligns to a channel boundary in the serialized output, and
//! checks each channel's word against an expected mixdown value. The device
//! itself is an external collaborator reached only through its documented
//! pins; a behavioral model is included so scenarios can run without
//! hardware or an RTL simulator.
//!
//! ## Architecture
//!
//! - [`DevicePins`] — clock-synchronous pin access to the device under test
//! - [`TimingProfile`] — clock divisors and bus phase hold time, passed into
//!   every component at construction
//! - [`CommandEncoder`] — register writes as timed four-phase bus sequences
//! - [`FrameSync`] — alignment to the start of a LEFT frame
//! - [`ChannelVerifier`] — MSB-first sampling of one channel word
//! - [`ToneScenario`] — reset, command burst, alignment, stereo check
//! - [`sim::SimPsg`] — behavioral model implementing [`DevicePins`]
//!
//! Everything is single-threaded and clock-synchronous: each operation is a
//! deterministic suspension for an integer count of device clock ticks, and
//! a scenario either runs to completion or fails at the first violated
//! expectation with a [`VerifyError`].

pub mod command;
pub mod device;
pub mod error;
pub mod scenario;
pub mod sim;
pub mod sync;
pub mod timing;
pub mod verify;

pub use command::{Command, CommandEncoder};
pub use device::{Channel, DevicePins};
pub use error::VerifyError;
pub use scenario::ToneScenario;
pub use sync::FrameSync;
pub use timing::TimingProfile;
pub use verify::ChannelVerifier;
