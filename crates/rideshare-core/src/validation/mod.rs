//! # Schema Validator
//!
//! Turns an untrusted [`CandidateRecord`] into a [`RideRequest`] or
//! [`ParcelRequest`], or into the full ordered list of field violations.
//!
//! Each schema is a table of field rules ([`rules`]) evaluated exhaustively in
//! field-declaration order: a failing field never hides the errors of the
//! fields after it. Validation is a pure function of the record and the
//! reference time; the `*_now` entry points read the clock on every call.
//!
//! ```rust
//! use rideshare_core::validation::{validate_ride, CandidateRecord};
//! use rideshare_core::UtcDateTime;
//!
//! let now = UtcDateTime::parse("2030-01-01T00:00:00Z").unwrap();
//! let record = CandidateRecord::new()
//!     .with("from", "A")
//!     .with("to", "B")
//!     .with("date", "2030-01-08")
//!     .with("time", "10:00")
//!     .with("seats", 4)
//!     .with("price", 50);
//!
//! let ride = validate_ride(&record, now).unwrap();
//! assert_eq!(ride.departure_time.to_string(), "2030-01-08T10:00:00Z");
//! ```

mod parcel;
mod ride;
pub mod rules;
mod schedule;

use std::fmt::{Display, Formatter};

use serde::Serialize;
use serde_json::{Map, Value};

use crate::{DomainError, ParcelRequest, ResourceKind, RideRequest, UtcDateTime};

pub use parcel::validate_parcel;
pub use ride::validate_ride;
pub use schedule::{combine_date_and_time, parse_entered_date, parse_wall_time, EnteredDate};

/// Outcome of validating one candidate record. Never partially valid.
pub type ValidationResult<T> = Result<T, ValidationErrors>;

/// One rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl Display for FieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Ordered, non-empty set of field violations for a single record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(transparent)]
#[error("validation failed: {}", join_errors(.0))]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub(crate) fn from_vec(errors: Vec<FieldError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self(errors))
        }
    }

    pub(crate) fn collected(errors: Vec<FieldError>) -> Self {
        Self(errors)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Field names in report order.
    pub fn fields(&self) -> Vec<&'static str> {
        self.0.iter().map(|error| error.field).collect()
    }

    pub fn for_field(&self, field: &str) -> Option<&FieldError> {
        self.0.iter().find(|error| error.field == field)
    }

    pub fn as_slice(&self) -> &[FieldError] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn join_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Raw, untrusted field values as entered, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateRecord(Map<String, Value>);

impl CandidateRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn from_json_str(input: &str) -> Result<Self, crate::CoreError> {
        let value: Value = serde_json::from_str(input)?;
        Ok(Self::try_from(value)?)
    }

    /// Builder-style setter, mostly for presentation code and tests.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(field.into(), value.into());
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(field.into(), value.into());
    }

    /// Returns the value of `field` unless it is absent, `null`, or a blank string.
    pub fn present(&self, field: &str) -> Option<&Value> {
        match self.0.get(field) {
            None | Some(Value::Null) => None,
            Some(Value::String(text)) if text.trim().is_empty() => None,
            Some(value) => Some(value),
        }
    }
}

impl TryFrom<Value> for CandidateRecord {
    type Error = DomainError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(fields) => Ok(Self(fields)),
            other => Err(DomainError::CandidateNotObject {
                found: json_type_name(&other),
            }),
        }
    }
}

pub(crate) const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A normalized request of either kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ValidatedRequest {
    Ride(RideRequest),
    Parcel(ParcelRequest),
}

impl ValidatedRequest {
    pub const fn kind(&self) -> ResourceKind {
        match self {
            Self::Ride(_) => ResourceKind::Ride,
            Self::Parcel(_) => ResourceKind::Parcel,
        }
    }
}

/// Validates `record` against the schema selected by `kind`.
pub fn validate(
    kind: ResourceKind,
    record: &CandidateRecord,
    now: UtcDateTime,
) -> ValidationResult<ValidatedRequest> {
    let result = match kind {
        ResourceKind::Ride => validate_ride(record, now).map(ValidatedRequest::Ride),
        ResourceKind::Parcel => validate_parcel(record, now).map(ValidatedRequest::Parcel),
    };

    match &result {
        Ok(_) => tracing::debug!(%kind, "candidate record is valid"),
        Err(errors) => tracing::debug!(
            %kind,
            error_count = errors.len(),
            fields = ?errors.fields(),
            "candidate record failed validation"
        ),
    }

    result
}

/// [`validate`] against the current clock, read at call time.
pub fn validate_now(
    kind: ResourceKind,
    record: &CandidateRecord,
) -> ValidationResult<ValidatedRequest> {
    validate(kind, record, UtcDateTime::now())
}

/// Presentation shape of a validation outcome:
/// `{ "ok": true, "value": ... }` or `{ "ok": false, "errors": [...] }`.
#[derive(Debug, Serialize)]
pub struct ValidationReport<'a, T> {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<&'a T>,
    #[serde(skip_serializing_if = "<[FieldError]>::is_empty")]
    pub errors: &'a [FieldError],
}

impl<'a, T> ValidationReport<'a, T> {
    pub fn failed(errors: &'a ValidationErrors) -> Self {
        Self {
            ok: false,
            value: None,
            errors: errors.as_slice(),
        }
    }
}

impl<'a, T> From<&'a ValidationResult<T>> for ValidationReport<'a, T> {
    fn from(result: &'a ValidationResult<T>) -> Self {
        match result {
            Ok(value) => Self {
                ok: true,
                value: Some(value),
                errors: &[],
            },
            Err(errors) => Self::failed(errors),
        }
    }
}
