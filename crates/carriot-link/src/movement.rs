use chrono::{DateTime, Local, Utc};
use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use std::fmt;
use strum::{Display as StrumDisplay, EnumIter, EnumString, IntoEnumIterator};

/// Opaque movement identifier understood by the vehicle API (`adelante`, `detener`, ...).
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct CommandId(String);

crate::impl_string_newtype!(CommandId);

impl CommandId {
    /// Human readable form: separators become spaces.
    pub fn words(&self) -> String {
        self.0.replace(['-', '_'], " ")
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
pub enum Speed {
    #[strum(to_string = "rapido", serialize = "rápido", serialize = "fast", serialize = "1")]
    #[serde(rename = "rapido")]
    Fast,
    #[default]
    #[strum(to_string = "normal", serialize = "2")]
    #[serde(rename = "normal")]
    Normal,
    #[strum(to_string = "lento", serialize = "slow", serialize = "3")]
    #[serde(rename = "lento")]
    Slow,
    #[strum(to_string = "reversa", serialize = "reverse", serialize = "4")]
    #[serde(rename = "reversa")]
    Reverse,
}

impl Speed {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Fast => "Rápido",
            Self::Normal => "Normal",
            Self::Slow => "Lento",
            Self::Reverse => "Reversa",
        }
    }

    pub fn labels() -> Vec<&'static str> {
        Self::iter().map(|s| s.label()).collect()
    }

    pub fn as_index(&self) -> usize {
        *self as usize
    }

    pub fn from_index(idx: usize) -> Option<Self> {
        Self::iter().nth(idx)
    }
}

/// Body of `POST {base_url}/movement`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovementRequest {
    pub action: CommandId,
    pub speed: Speed,
    pub timestamp: DateTime<Utc>,
}

impl MovementRequest {
    pub fn new(action: CommandId, speed: Speed) -> Self {
        Self {
            action,
            speed,
            timestamp: Utc::now(),
        }
    }
}

/// A movement the API accepted.
#[derive(Debug, Clone, PartialEq)]
pub struct MovementRecord {
    pub action: CommandId,
    pub speed: Speed,
    pub sent_at: DateTime<Local>,
}

impl From<MovementRequest> for MovementRecord {
    fn from(req: MovementRequest) -> Self {
        Self {
            action: req.action,
            speed: req.speed,
            sent_at: req.timestamp.with_timezone(&Local),
        }
    }
}

impl fmt::Display for MovementRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} | {}",
            self.sent_at.format("%H:%M:%S"),
            self.action.words().to_uppercase(),
            self.speed.label().to_uppercase()
        )
    }
}
