//! Logical outgoing messages handed to the protocol encoder.
//!
//! These carry only the fields the encoder needs; frame layout, checksums
//! and bus selection belong to the encoder. A tick's messages are collected
//! in a fixed-capacity [`MessageBatch`], so producing them never allocates.

use heapless::Vec;
use serde::{Deserialize, Serialize};
use static_assertions::const_assert;

use crate::consts::{MAX_MESSAGES_PER_TICK, MESSAGE_COUNTER_MODULUS};

/// Lane-keep status code shown on the instrument cluster.
///
/// Value 2 is reserved by the cluster and never produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum HudDisplayState {
    #[default]
    NoLane = 1,
    Active = 3,
    Inactive = 4,
    LeftOnly = 5,
    RightOnly = 6,
}

impl HudDisplayState {
    /// Convert from raw `u8`. Returns `None` for invalid or reserved values.
    #[inline]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::NoLane),
            3 => Some(Self::Active),
            4 => Some(Self::Inactive),
            5 => Some(Self::LeftOnly),
            6 => Some(Self::RightOnly),
            _ => None,
        }
    }
}

/// Lateral actuator command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SteeringCommand {
    /// 4-bit rolling counter.
    pub counter: u8,
    /// Applied torque [EPS units].
    pub torque: i16,
    /// Torque request bit, set iff `torque != 0`.
    pub request: bool,
    /// "Steering required" warning bit.
    pub warning: bool,
    pub display_state: HudDisplayState,
}

/// One outgoing logical message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OutgoingMessage {
    SteeringCommand(SteeringCommand),
    /// Re-broadcast of the EPS status frame on platforms that need it.
    SteeringStatus { counter: u8 },
    ResumeButtonPress { counter: u8 },
    CancelButtonPress { counter: u8 },
    /// Lane-following assist display frame.
    AuxDisplay { counter: u8, enabled: bool },
}

impl OutgoingMessage {
    /// Rolling counter carried by this message.
    pub const fn counter(&self) -> u8 {
        match self {
            Self::SteeringCommand(cmd) => cmd.counter,
            Self::SteeringStatus { counter }
            | Self::ResumeButtonPress { counter }
            | Self::CancelButtonPress { counter }
            | Self::AuxDisplay { counter, .. } => *counter,
        }
    }
}

/// Ordered messages for one tick.
pub type MessageBatch = Vec<OutgoingMessage, MAX_MESSAGES_PER_TICK>;

// steering + status + button + aux display
const_assert!(MAX_MESSAGES_PER_TICK >= 4);

/// Reduce any tick-like value to a 4-bit rolling counter.
#[inline]
pub const fn wrap_counter(value: u64) -> u8 {
    (value % MESSAGE_COUNTER_MODULUS as u64) as u8
}
