use serde::Serialize;
use thiserror::Error;

use super::{ApiError, MarketplaceApi};
use crate::validation::{
    validate, validate_parcel, validate_ride, CandidateRecord, ValidatedRequest, ValidationErrors,
};
use crate::{Parcel, ResourceKind, Ride, UtcDateTime};

/// Why a submission produced no resource.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmitError {
    /// The record failed its schema; nothing was sent.
    #[error(transparent)]
    Invalid(#[from] ValidationErrors),

    #[error("submission failed: {0}")]
    Transport(#[from] ApiError),
}

/// A resource created by [`MarketplaceApi::submit`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CreatedResource {
    Ride(Ride),
    Parcel(Parcel),
}

impl CreatedResource {
    pub const fn kind(&self) -> ResourceKind {
        match self {
            Self::Ride(_) => ResourceKind::Ride,
            Self::Parcel(_) => ResourceKind::Parcel,
        }
    }
}

impl MarketplaceApi {
    /// Validates a ride record against the current clock and creates it.
    pub async fn submit_ride(&self, record: &CandidateRecord) -> Result<Ride, SubmitError> {
        self.submit_ride_at(record, UtcDateTime::now()).await
    }

    pub async fn submit_ride_at(
        &self,
        record: &CandidateRecord,
        now: UtcDateTime,
    ) -> Result<Ride, SubmitError> {
        let draft = validate_ride(record, now)?;
        Ok(self.rides().create(&draft).await?)
    }

    /// Validates a parcel record against the current clock and creates it.
    pub async fn submit_parcel(&self, record: &CandidateRecord) -> Result<Parcel, SubmitError> {
        self.submit_parcel_at(record, UtcDateTime::now()).await
    }

    pub async fn submit_parcel_at(
        &self,
        record: &CandidateRecord,
        now: UtcDateTime,
    ) -> Result<Parcel, SubmitError> {
        let draft = validate_parcel(record, now)?;
        Ok(self.parcels().create(&draft).await?)
    }

    /// Validates `record` against the schema for `kind` and, only if it
    /// passes, creates the resource.
    pub async fn submit(
        &self,
        kind: ResourceKind,
        record: &CandidateRecord,
    ) -> Result<CreatedResource, SubmitError> {
        self.submit_at(kind, record, UtcDateTime::now()).await
    }

    pub async fn submit_at(
        &self,
        kind: ResourceKind,
        record: &CandidateRecord,
        now: UtcDateTime,
    ) -> Result<CreatedResource, SubmitError> {
        let created = match validate(kind, record, now)? {
            ValidatedRequest::Ride(draft) => {
                CreatedResource::Ride(self.rides().create(&draft).await?)
            }
            ValidatedRequest::Parcel(draft) => {
                CreatedResource::Parcel(self.parcels().create(&draft).await?)
            }
        };
        tracing::debug!(kind = %created.kind(), "submission created resource");
        Ok(created)
    }
}
