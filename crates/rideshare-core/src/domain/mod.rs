//! # Domain Types
//!
//! Shared shapes for the marketplace client. The validator produces
//! [`RideRequest`] and [`ParcelRequest`] values and the transport sends them
//! as-is, so these types are the structural contract between the two.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Location`] | Address with an optional coordinate pair |
//! | [`GeoPoint`] | Latitude/longitude in range |
//! | [`RideRequest`] | Body of `POST /rides` |
//! | [`ParcelRequest`] | Body of `POST /parcels` |
//! | [`ParcelSize`] | `small`, `medium` or `large` |
//! | [`Ride`] / [`Parcel`] | Resources returned by the backend |
//! | [`ResourceId`] | Backend identifier (string or integer on the wire) |
//! | [`ResourceStatus`] | Lifecycle state of a resource |
//! | [`ResourceKind`] | `ride` or `parcel` selector |
//! | [`SearchQuery`] | Filters for `GET /{collection}/search` |
//! | [`UtcDateTime`] | UTC timestamp |

mod location;
mod requests;
mod resources;
mod search;
mod timestamp;

pub use location::{GeoPoint, Location};
pub use requests::{
    BookingRequest, ParcelRequest, ParcelSize, RideRequest, MAX_DESCRIPTION_CHARS, MAX_SEATS,
    MIN_SEATS,
};
pub use resources::{Parcel, ResourceId, ResourceKind, ResourceStatus, Ride};
pub use search::SearchQuery;
pub use timestamp::UtcDateTime;
