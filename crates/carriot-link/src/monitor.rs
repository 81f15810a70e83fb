use crate::movement::Speed;
use chrono::{DateTime, Local, NaiveDateTime};
use serde::Deserialize;
use std::fmt;
use strum::{EnumIter, EnumString, FromRepr};

/// Movement operations as the vehicle reports them, numbered by the API's `op_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, EnumIter, FromRepr)]
#[strum(ascii_case_insensitive)]
#[repr(u8)]
pub enum Operation {
    #[strum(serialize = "adelante")]
    Forward = 1,
    #[strum(serialize = "atras", serialize = "atrás")]
    Backward = 2,
    #[strum(serialize = "detener")]
    Stop = 3,
    #[strum(serialize = "vuelta-adelante-derecha")]
    TurnForwardRight = 4,
    #[strum(serialize = "vuelta-adelante-izquierda")]
    TurnForwardLeft = 5,
    #[strum(serialize = "vuelta-atras-derecha")]
    TurnBackRight = 6,
    #[strum(serialize = "vuelta-atras-izquierda")]
    TurnBackLeft = 7,
    #[strum(serialize = "90-derecha")]
    Right90 = 8,
    #[strum(serialize = "90-izquierda")]
    Left90 = 9,
    #[strum(serialize = "360-derecha")]
    SpinRight = 10,
    #[strum(serialize = "360-izquierda")]
    SpinLeft = 11,
}

impl Operation {
    pub fn id(&self) -> u8 {
        *self as u8
    }

    /// Accepts a command id (`90-derecha`) or a numeric `op_id` (`8`).
    pub fn resolve(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        raw.parse()
            .ok()
            .or_else(|| raw.parse::<u8>().ok().and_then(Self::from_repr))
    }

    pub fn text(&self) -> &'static str {
        match self {
            Self::Forward => "Adelante",
            Self::Backward => "Atrás",
            Self::Stop => "Detener",
            Self::TurnForwardRight => "Vuelta Ad. Der",
            Self::TurnForwardLeft => "Vuelta Ad. Izq",
            Self::TurnBackRight => "Vuelta At. Der",
            Self::TurnBackLeft => "Vuelta At. Izq",
            Self::Right90 => "Giro 90° Der",
            Self::Left90 => "Giro 90° Izq",
            Self::SpinRight => "Giro 360° Der",
            Self::SpinLeft => "Giro 360° Izq",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Forward => "⬆️",
            Self::Backward => "⬇️",
            Self::Stop => "⏹️",
            Self::TurnForwardRight => "↗️",
            Self::TurnForwardLeft => "↖️",
            Self::TurnBackRight => "↘️",
            Self::TurnBackLeft => "↙️",
            Self::Right90 => "↪️",
            Self::Left90 => "↩️",
            Self::SpinRight | Self::SpinLeft => "🔄",
        }
    }
}

/// Obstacle kinds reported by the vehicle, numbered by the API's `obs_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, FromRepr)]
#[repr(u8)]
pub enum Obstacle {
    Ahead = 1,
    AheadLeft = 2,
    AheadRight = 3,
    Blocked = 4,
    Reversing = 5,
}

impl Obstacle {
    pub fn text(&self) -> &'static str {
        match self {
            Self::Ahead => "Obstáculo Adelante",
            Self::AheadLeft => "Obs. Adelante-Izq",
            Self::AheadRight => "Obs. Adelante-Der",
            Self::Blocked => "Bloqueo Total (Izq-Der)",
            Self::Reversing => "Retroceso",
        }
    }
}

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Best effort: RFC 3339, RFC 2822 (`Sun, 18 Oct 2026 12:00:00 GMT`), or a naive
/// UTC timestamp.
pub fn parse_event_time(raw: &str) -> Option<DateTime<Local>> {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_rfc2822(raw))
        .map(|t| t.with_timezone(&Local))
        .ok()
        .or_else(|| {
            NAIVE_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
                .map(|naive| naive.and_utc().with_timezone(&Local))
        })
}

fn clock(raw: Option<&str>) -> String {
    raw.and_then(parse_event_time)
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "--:--:--".to_string())
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// One row of `GET /api/movements/last10/{device}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MovementEntry {
    #[serde(rename = "operacion")]
    pub operation: String,
    #[serde(rename = "velocidad", default)]
    pub speed: String,
    #[serde(default)]
    pub client_city: Option<String>,
    #[serde(default)]
    pub client_country: Option<String>,
    #[serde(default)]
    pub event_time: Option<String>,
}

impl MovementEntry {
    pub fn operation_text(&self) -> String {
        match Operation::resolve(&self.operation) {
            Some(op) => op.text().to_string(),
            None => non_empty(Some(self.operation.as_str())).unwrap_or("N/A").to_string(),
        }
    }

    pub fn speed_text(&self) -> String {
        match self.speed.trim().parse::<Speed>() {
            Ok(speed) => speed.label().to_string(),
            Err(_) => non_empty(Some(self.speed.as_str())).unwrap_or("--").to_string(),
        }
    }

    pub fn location(&self) -> &str {
        non_empty(self.client_city.as_deref())
            .or_else(|| non_empty(self.client_country.as_deref()))
            .unwrap_or("Histórico")
    }

    pub fn time(&self) -> String {
        clock(self.event_time.as_deref())
    }
}

impl fmt::Display for MovementEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) | {} - {}",
            self.operation_text(),
            self.speed_text(),
            self.location(),
            self.time()
        )
    }
}

/// One row of `GET /api/obstacles/last10/{device}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ObstacleEntry {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub event_time: Option<String>,
}

impl ObstacleEntry {
    /// The stored description, or the obstacle name when it is a numeric `obs_id`.
    pub fn text(&self) -> String {
        let description = self.description.trim();
        match description.parse::<u8>().ok().and_then(Obstacle::from_repr) {
            Some(obstacle) => obstacle.text().to_string(),
            None if description.is_empty() => "Detectado".to_string(),
            None => description.to_string(),
        }
    }

    pub fn time(&self) -> String {
        clock(self.event_time.as_deref())
    }
}

impl fmt::Display for ObstacleEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.text(), self.time())
    }
}

/// A stored demo sequence as listed by `GET /api/demos`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DemoEntry {
    pub demo_name: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl fmt::Display for DemoEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.created_at.as_deref().and_then(parse_event_time) {
            Some(created) => write!(f, "{} ({})", self.demo_name, created.format("%Y-%m-%d")),
            None => write!(f, "{}", self.demo_name),
        }
    }
}

/// `/api/demos` answers either a bare array or `{ "demos": [...] }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum DemoList {
    Bare(Vec<DemoEntry>),
    Wrapped { demos: Vec<DemoEntry> },
}

impl From<DemoList> for Vec<DemoEntry> {
    fn from(list: DemoList) -> Self {
        match list {
            DemoList::Bare(demos) | DemoList::Wrapped { demos } => demos,
        }
    }
}
