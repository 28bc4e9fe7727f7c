//! # Rideshare Core
//!
//! Validation and submission pipeline for the ride and parcel marketplace
//! client.
//!
//! ## Overview
//!
//! - **Schema validation** of raw form input into typed ride and parcel requests
//! - **Domain types** for locations, requests and backend resources
//! - **Request transport** to the marketplace backend with normalized failures
//! - **Configuration** of the backend endpoint from the environment
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`api`] | Typed marketplace operations and submission |
//! | [`config`] | Base endpoint resolution |
//! | [`domain`] | Locations, requests, resources, timestamps |
//! | [`error`] | Core error types |
//! | [`http_client`] | HTTP client abstraction |
//! | [`validation`] | Ride and parcel schemas |
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rideshare_core::{CandidateRecord, MarketplaceApi, SubmitError};
//!
//! # async fn run() -> Result<(), SubmitError> {
//! let api = MarketplaceApi::from_env();
//! let record = CandidateRecord::new()
//!     .with("from", "Central Station")
//!     .with("to", "Airport")
//!     .with("date", "2031-05-01")
//!     .with("time", "07:30")
//!     .with("seats", 3)
//!     .with("price", 25);
//!
//! let ride = api.submit_ride(&record).await?;
//! println!("created ride {}", ride.id);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │ CandidateRecord  │
//! └────────┬─────────┘
//!          │ validate_ride / validate_parcel
//!          ▼
//! ┌──────────────────┐
//! │ RideRequest /    │
//! │ ParcelRequest    │
//! └────────┬─────────┘
//!          │ Collection::create
//!          ▼
//! ┌──────────────────┐     ┌──────────────────┐
//! │ MarketplaceApi   │────▶│ HttpClient       │
//! │ (ApiResult)      │     │ (reqwest)        │
//! └──────────────────┘     └──────────────────┘
//! ```
//!
//! ## Error Handling
//!
//! Validation and transport outcomes are values, never panics:
//!
//! ```rust
//! use rideshare_core::{ApiError, ApiErrorKind};
//!
//! fn describe(error: &ApiError) -> &'static str {
//!     match error.kind {
//!         ApiErrorKind::Network => "backend unreachable",
//!         ApiErrorKind::Status if error.is_not_found() => "no such resource",
//!         ApiErrorKind::Status => "backend rejected the request",
//!         _ => "unexpected failure",
//!     }
//! }
//! ```

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod validation;

// API
pub use api::{
    ApiError, ApiErrorKind, ApiReport, ApiResult, Collection, CreatedResource, MarketplaceApi,
    Resource, SubmitError,
};

// Configuration
pub use config::ClientConfig;

// Domain models
pub use domain::{
    BookingRequest, GeoPoint, Location, Parcel, ParcelRequest, ParcelSize, ResourceId,
    ResourceKind, ResourceStatus, Ride, RideRequest, SearchQuery, UtcDateTime,
    MAX_DESCRIPTION_CHARS, MAX_SEATS, MIN_SEATS,
};

// Error types
pub use error::{CoreError, DomainError};

// HTTP client types
pub use http_client::{
    HttpClient, HttpError, HttpErrorKind, HttpMethod, HttpRequest, HttpResponse,
    ReqwestHttpClient,
};

// Validation
pub use validation::{
    validate, validate_now, validate_parcel, validate_ride, CandidateRecord, FieldError,
    ValidatedRequest, ValidationErrors, ValidationReport, ValidationResult,
};
