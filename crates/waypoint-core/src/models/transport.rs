//! Transport modes between consecutive items.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Type-safe enumeration of ways to travel to the next item.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Walk,
    Subway,
    Bus,
    Train,
    Taxi,
    Drive,
}

impl FromStr for TransportMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "walk" | "walking" => Ok(TransportMode::Walk),
            "subway" | "metro" => Ok(TransportMode::Subway),
            "bus" => Ok(TransportMode::Bus),
            "train" => Ok(TransportMode::Train),
            "taxi" => Ok(TransportMode::Taxi),
            "drive" | "car" => Ok(TransportMode::Drive),
            _ => Err(format!("Invalid transport mode: {s}")),
        }
    }
}

impl TransportMode {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportMode::Walk => "walk",
            TransportMode::Subway => "subway",
            TransportMode::Bus => "bus",
            TransportMode::Train => "train",
            TransportMode::Taxi => "taxi",
            TransportMode::Drive => "drive",
        }
    }
}
