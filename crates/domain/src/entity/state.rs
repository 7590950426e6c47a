//! Entity state: the value a sensor currently displays.

use serde::{Serialize, Serializer};

/// Displayed state of a sensor entity.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum EntityState {
    /// A numeric reading.
    Measurement(f64),
    /// The sensor is reachable but has no value to show.
    #[default]
    Unknown,
    Unavailable,
}

impl EntityState {
    /// State for an optional reading: `None` becomes [`Unknown`](Self::Unknown).
    #[must_use]
    pub fn from_reading(reading: Option<f64>) -> Self {
        reading.map_or(Self::Unknown, Self::Measurement)
    }

    /// Whether the entity is reachable (anything but [`Unavailable`](Self::Unavailable)).
    #[must_use]
    pub fn is_available(&self) -> bool {
        !matches!(self, Self::Unavailable)
    }
}

impl std::fmt::Display for EntityState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Measurement(value) => write!(f, "{value}"),
            Self::Unknown => f.write_str("unknown"),
            Self::Unavailable => f.write_str("unavailable"),
        }
    }
}

impl Serialize for EntityState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Measurement(value) => serializer.serialize_f64(*value),
            Self::Unknown => serializer.serialize_str("unknown"),
            Self::Unavailable => serializer.serialize_str("unavailable"),
        }
    }
}
