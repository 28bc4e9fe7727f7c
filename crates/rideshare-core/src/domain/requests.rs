use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{DomainError, Location, UtcDateTime};

/// Bounds shared by the validator and the transport's pre-flight checks.
pub const MIN_SEATS: u8 = 1;
pub const MAX_SEATS: u8 = 8;
pub const MAX_DESCRIPTION_CHARS: usize = 500;

/// Creation payload for a ride offer, as sent to `POST /rides`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RideRequest {
    pub from: Location,
    pub to: Location,
    pub departure_time: UtcDateTime,
    pub seats: u8,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Creation payload for a parcel delivery offer, as sent to `POST /parcels`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParcelRequest {
    pub from: Location,
    pub to: Location,
    pub deadline: UtcDateTime,
    pub size: ParcelSize,
    pub weight: f64,
    pub reward: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Parcel size class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParcelSize {
    Small,
    Medium,
    Large,
}

impl ParcelSize {
    pub const ALL: [Self; 3] = [Self::Small, Self::Medium, Self::Large];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }
}

impl Display for ParcelSize {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParcelSize {
    type Err = DomainError;

    // Exact match only: "Small" or " small" are not sizes.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|size| size.as_str() == value)
            .ok_or_else(|| DomainError::InvalidParcelSize {
                value: value.to_owned(),
            })
    }
}

/// Body of `POST /rides/{id}/book`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub seats: u8,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn ride_request_uses_camel_case_wire_names() {
        let request = RideRequest {
            from: Location::from_address("A").expect("valid"),
            to: Location::from_address("B").expect("valid"),
            departure_time: UtcDateTime::parse("2030-01-01T10:00:00Z").expect("timestamp"),
            seats: 4,
            price: 50.0,
            description: None,
        };

        assert_eq!(
            serde_json::to_value(&request).expect("serialize"),
            json!({
                "from": { "address": "A" },
                "to": { "address": "B" },
                "departureTime": "2030-01-01T10:00:00Z",
                "seats": 4,
                "price": 50.0
            })
        );
    }

    #[test]
    fn parcel_size_parses_exact_lowercase_names_only() {
        assert_eq!("medium".parse::<ParcelSize>(), Ok(ParcelSize::Medium));
        assert!(matches!(
            "Large".parse::<ParcelSize>(),
            Err(DomainError::InvalidParcelSize { .. })
        ));
        assert!("jumbo".parse::<ParcelSize>().is_err());
    }
}
