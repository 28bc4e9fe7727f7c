use super::{GeoPoint, ParcelSize, UtcDateTime};

/// Filters for `GET /{collection}/search`. Unset filters are left out of the query.
///
/// Rides are usually searched by endpoints, departure and seat count; parcels by
/// endpoints, size and maximum weight. The backend ignores filters that do not
/// apply to the collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchQuery {
    pub origin: Option<GeoPoint>,
    pub destination: Option<GeoPoint>,
    pub departure_time: Option<UtcDateTime>,
    pub seats: Option<u8>,
    pub size: Option<ParcelSize>,
    pub max_weight: Option<f64>,
}

impl SearchQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_origin(mut self, origin: GeoPoint) -> Self {
        self.origin = Some(origin);
        self
    }

    pub fn with_destination(mut self, destination: GeoPoint) -> Self {
        self.destination = Some(destination);
        self
    }

    pub fn with_departure_time(mut self, departure_time: UtcDateTime) -> Self {
        self.departure_time = Some(departure_time);
        self
    }

    pub fn with_seats(mut self, seats: u8) -> Self {
        self.seats = Some(seats);
        self
    }

    pub fn with_size(mut self, size: ParcelSize) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_max_weight(mut self, max_weight: f64) -> Self {
        self.max_weight = Some(max_weight);
        self
    }

    /// Query parameters in wire order.
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        if let Some(origin) = self.origin {
            pairs.push(("originLat", origin.latitude.to_string()));
            pairs.push(("originLng", origin.longitude.to_string()));
        }
        if let Some(destination) = self.destination {
            pairs.push(("destLat", destination.latitude.to_string()));
            pairs.push(("destLng", destination.longitude.to_string()));
        }
        if let Some(departure_time) = self.departure_time {
            pairs.push(("departureTime", departure_time.format_rfc3339()));
        }
        if let Some(seats) = self.seats {
            pairs.push(("seats", seats.to_string()));
        }
        if let Some(size) = self.size {
            pairs.push(("parcelSize", size.as_str().to_owned()));
        }
        if let Some(max_weight) = self.max_weight {
            pairs.push(("maxWeight", max_weight.to_string()));
        }

        pairs
    }

    /// Percent-encoded `key=value&...` string, empty when no filter is set.
    pub fn to_query_string(&self) -> String {
        self.pairs()
            .iter()
            .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }
}
