use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::{DomainError, Location, ParcelSize, UtcDateTime};

/// Backend identifier of a ride or parcel.
///
/// The backend may emit integer or string ids; both normalize to a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ResourceId(String);

impl ResourceId {
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyResourceId);
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ResourceId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceId {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl From<u64> for ResourceId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl<'de> Deserialize<'de> for ResourceId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ResourceIdVisitor)
    }
}

struct ResourceIdVisitor;

impl Visitor<'_> for ResourceIdVisitor {
    type Value = ResourceId;

    fn expecting(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("a non-empty string or integer id")
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        ResourceId::parse(value).map_err(E::custom)
    }

    fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(ResourceId::from(value))
    }

    fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(ResourceId(value.to_string()))
    }
}

/// Lifecycle state of a marketplace resource.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResourceStatus {
    #[default]
    Pending,
    Accepted,
    InProgress,
    Completed,
    Cancelled,
}

impl ResourceStatus {
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::Accepted,
        Self::InProgress,
        Self::Completed,
        Self::Cancelled,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::InProgress => "inProgress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl Display for ResourceStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceStatus {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| DomainError::InvalidStatus {
                value: value.to_owned(),
            })
    }
}

/// Which marketplace collection a request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Ride,
    Parcel,
}

impl ResourceKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ride => "ride",
            Self::Parcel => "parcel",
        }
    }

    /// Collection path segment on the backend.
    pub const fn collection(self) -> &'static str {
        match self {
            Self::Ride => "rides",
            Self::Parcel => "parcels",
        }
    }
}

impl Display for ResourceKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "ride" | "rides" => Ok(Self::Ride),
            "parcel" | "parcels" => Ok(Self::Parcel),
            _ => Err(DomainError::InvalidKind {
                value: value.to_owned(),
            }),
        }
    }
}

/// Ride resource as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ride {
    pub id: ResourceId,
    pub from: Location,
    pub to: Location,
    pub departure_time: UtcDateTime,
    pub seats: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seats_available: Option<u8>,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub status: ResourceStatus,
    /// Fields the backend sends that this client does not model.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Parcel resource as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parcel {
    pub id: ResourceId,
    pub from: Location,
    pub to: Location,
    pub deadline: UtcDateTime,
    pub size: ParcelSize,
    pub weight: f64,
    pub reward: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub status: ResourceStatus,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn resource_id_accepts_integers_and_strings() {
        let numeric: ResourceId = serde_json::from_value(json!(42)).expect("numeric id");
        assert_eq!(numeric.as_str(), "42");

        let text: ResourceId = serde_json::from_value(json!("r-7")).expect("string id");
        assert_eq!(text.as_str(), "r-7");

        assert!(serde_json::from_value::<ResourceId>(json!("")).is_err());
    }

    #[test]
    fn ride_tolerates_unknown_fields_and_defaults_status() {
        let ride: Ride = serde_json::from_value(json!({
            "id": 3,
            "from": { "address": "A", "latitude": 1.0, "longitude": 2.0 },
            "to": { "address": "B" },
            "departureTime": "2030-01-01T10:00:00Z",
            "seats": 4,
            "price": 50,
            "driver": "EQC-wallet"
        }))
        .expect("ride should decode");

        assert_eq!(ride.id.as_str(), "3");
        assert_eq!(ride.status, ResourceStatus::Pending);
        assert_eq!(ride.extra.get("driver"), Some(&json!("EQC-wallet")));
    }

    #[test]
    fn status_and_kind_parse_from_cli_text() {
        assert_eq!("inprogress".parse::<ResourceStatus>(), Ok(ResourceStatus::InProgress));
        assert_eq!("parcels".parse::<ResourceKind>(), Ok(ResourceKind::Parcel));
        assert!("food".parse::<ResourceKind>().is_err());
    }
}
