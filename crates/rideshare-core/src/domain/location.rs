use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::DomainError;

/// WGS84 coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, DomainError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(DomainError::LatitudeOutOfRange {
                value: latitude.to_string(),
            });
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(DomainError::LongitudeOutOfRange {
                value: longitude.to_string(),
            });
        }

        Ok(Self {
            latitude,
            longitude,
        })
    }
}

/// Parses `LAT,LNG`, e.g. `52.52,13.40`.
impl FromStr for GeoPoint {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || DomainError::InvalidCoordinates {
            value: value.to_owned(),
        };
        let (latitude, longitude) = value.split_once(',').ok_or_else(invalid)?;
        let latitude = latitude.trim().parse::<f64>().map_err(|_| invalid())?;
        let longitude = longitude.trim().parse::<f64>().map_err(|_| invalid())?;
        Self::new(latitude, longitude)
    }
}

/// A named place, optionally pinned to coordinates.
///
/// Addresses typed into a form arrive without a position; locations supplied by
/// a geolocation collaborator carry both. The pair is either fully present or
/// absent, and serializes flat as `{ address, latitude, longitude }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LocationRepr")]
pub struct Location {
    address: String,
    #[serde(flatten)]
    position: Option<GeoPoint>,
}

/// Wire forms accepted for a location: a bare address or the full object.
#[derive(Deserialize)]
#[serde(untagged)]
enum LocationRepr {
    Address(String),
    Object {
        address: String,
        #[serde(flatten)]
        position: Option<GeoPoint>,
    },
}

impl TryFrom<LocationRepr> for Location {
    type Error = DomainError;

    fn try_from(repr: LocationRepr) -> Result<Self, Self::Error> {
        match repr {
            LocationRepr::Address(address) => Self::from_address(address),
            LocationRepr::Object { address, position } => {
                let position = position
                    .map(|point| GeoPoint::new(point.latitude, point.longitude))
                    .transpose()?;
                Self::new(address, position)
            }
        }
    }
}

impl Location {
    pub fn new(address: impl AsRef<str>, position: Option<GeoPoint>) -> Result<Self, DomainError> {
        let address = address.as_ref().trim();
        if address.is_empty() {
            return Err(DomainError::EmptyAddress);
        }

        Ok(Self {
            address: address.to_owned(),
            position,
        })
    }

    pub fn from_address(address: impl AsRef<str>) -> Result<Self, DomainError> {
        Self::new(address, None)
    }

    pub fn with_coordinates(
        address: impl AsRef<str>,
        latitude: f64,
        longitude: f64,
    ) -> Result<Self, DomainError> {
        Self::new(address, Some(GeoPoint::new(latitude, longitude)?))
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub const fn position(&self) -> Option<GeoPoint> {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn serializes_flat_coordinates() {
        let location = Location::with_coordinates("Main St 1", 52.5, 13.4).expect("valid");
        assert_eq!(
            serde_json::to_value(&location).expect("serialize"),
            json!({ "address": "Main St 1", "latitude": 52.5, "longitude": 13.4 })
        );
    }

    #[test]
    fn omits_coordinates_for_bare_address() {
        let location = Location::from_address("  Harbour  ").expect("valid");
        assert_eq!(location.address(), "Harbour");
        assert_eq!(
            serde_json::to_value(&location).expect("serialize"),
            json!({ "address": "Harbour" })
        );
    }

    #[test]
    fn deserializes_with_and_without_position() {
        let pinned: Location =
            serde_json::from_value(json!({ "address": "A", "latitude": 1.0, "longitude": 2.0 }))
                .expect("pinned");
        assert_eq!(pinned.position(), Some(GeoPoint { latitude: 1.0, longitude: 2.0 }));

        let bare: Location = serde_json::from_value(json!({ "address": "B" })).expect("bare");
        assert_eq!(bare.position(), None);

        let plain: Location = serde_json::from_value(json!("C")).expect("plain address");
        assert_eq!(plain.address(), "C");

        let invalid = serde_json::from_value::<Location>(json!({ "address": "D", "latitude": 99.0, "longitude": 0.0 }));
        assert!(invalid.is_err());
    }

    #[test]
    fn rejects_out_of_range_coordinates() {
        assert!(matches!(
            GeoPoint::new(91.0, 0.0),
            Err(DomainError::LatitudeOutOfRange { .. })
        ));
        assert!(matches!(
            GeoPoint::new(0.0, -180.5),
            Err(DomainError::LongitudeOutOfRange { .. })
        ));
        assert!(matches!(Location::from_address("   "), Err(DomainError::EmptyAddress)));
    }

    #[test]
    fn parses_comma_separated_pairs() {
        let point: GeoPoint = " 52.52 , 13.4".parse().expect("pair");
        assert_eq!(point, GeoPoint { latitude: 52.52, longitude: 13.4 });

        assert!(matches!(
            "52.52".parse::<GeoPoint>(),
            Err(DomainError::InvalidCoordinates { .. })
        ));
        assert!(matches!(
            "95,0".parse::<GeoPoint>(),
            Err(DomainError::LatitudeOutOfRange { .. })
        ));
    }
}
