//! Field rules and the collector that evaluates them.
//!
//! A schema is a set of `const` rule values (field name, predicate parameters,
//! messages). [`Checker`] applies them one field at a time and records the
//! first failing rule of each field, so every field is reported at most once
//! and in the order the schema checks them.

use std::str::FromStr;

use serde_json::{Map, Value};
use time::Time;

use super::{
    parse_entered_date, parse_wall_time, CandidateRecord, EnteredDate, FieldError,
    ValidationErrors,
};
use crate::{GeoPoint, Location, UtcDateTime};

/// Inclusive numeric bound with the message reported when it is crossed.
#[derive(Debug, Clone, Copy)]
pub struct Bound {
    pub value: f64,
    pub message: &'static str,
}

/// A real-valued field with inclusive bounds.
#[derive(Debug, Clone, Copy)]
pub struct NumberRule {
    pub field: &'static str,
    pub required: &'static str,
    pub not_number: &'static str,
    pub min: Bound,
    pub max: Bound,
}

/// A whole-number field with inclusive bounds.
#[derive(Debug, Clone, Copy)]
pub struct IntegerRule {
    pub field: &'static str,
    pub required: &'static str,
    pub not_number: &'static str,
    pub not_integer: &'static str,
    pub min: Bound,
    pub max: Bound,
}

/// A location field: a plain address or `{ address, latitude, longitude }`.
#[derive(Debug, Clone, Copy)]
pub struct LocationRule {
    pub field: &'static str,
    pub required: &'static str,
}

/// A date field that must resolve to an instant strictly after the reference time.
#[derive(Debug, Clone, Copy)]
pub struct FutureDateRule {
    pub field: &'static str,
    pub required: &'static str,
    pub invalid: &'static str,
    pub not_future: &'static str,
}

/// A required wall-clock time field.
#[derive(Debug, Clone, Copy)]
pub struct TimeRule {
    pub field: &'static str,
    pub required: &'static str,
    pub invalid: &'static str,
}

/// A required field restricted to the values `T` parses from.
#[derive(Debug, Clone, Copy)]
pub struct ChoiceRule {
    pub field: &'static str,
    pub required: &'static str,
    pub invalid: &'static str,
}

/// An optional free-text field with a character limit.
#[derive(Debug, Clone, Copy)]
pub struct TextRule {
    pub field: &'static str,
    pub max_chars: usize,
    pub too_long: &'static str,
    pub not_text: &'static str,
}

pub const LATITUDE_RANGE: &str = "Latitude must be between -90 and 90";
pub const LONGITUDE_RANGE: &str = "Longitude must be between -180 and 180";
pub const COORDINATES_NOT_NUMBERS: &str = "Coordinates must be numbers";
pub const COORDINATES_INCOMPLETE: &str = "Latitude and longitude must be provided together";
pub const LOCATION_SHAPE: &str = "Location must be an address or a location object";

/// Applies rules to one record and collects every violation.
#[derive(Debug)]
pub struct Checker<'a> {
    record: &'a CandidateRecord,
    errors: Vec<FieldError>,
}

impl<'a> Checker<'a> {
    pub fn new(record: &'a CandidateRecord) -> Self {
        Self {
            record,
            errors: Vec::new(),
        }
    }

    /// Records a violation for `field`.
    pub fn reject(&mut self, field: &'static str, message: &'static str) {
        self.errors.push(FieldError::new(field, message));
    }

    pub fn location(&mut self, rule: &LocationRule) -> Option<Location> {
        let Some(value) = self.field(rule.field) else {
            self.reject(rule.field, rule.required);
            return None;
        };

        let parsed = match value {
            Value::String(address) => Location::from_address(address).map_err(|_| rule.required),
            Value::Object(fields) => location_from_object(fields, rule),
            _ => Err(LOCATION_SHAPE),
        };

        parsed.map_err(|message| self.reject(rule.field, message)).ok()
    }

    pub fn future_date(&mut self, rule: &FutureDateRule, now: UtcDateTime) -> Option<EnteredDate> {
        let Some(value) = self.field(rule.field) else {
            self.reject(rule.field, rule.required);
            return None;
        };

        let Some(parsed) = value.as_str().and_then(parse_entered_date) else {
            self.reject(rule.field, rule.invalid);
            return None;
        };

        if parsed.instant <= now {
            self.reject(rule.field, rule.not_future);
            return None;
        }

        Some(parsed)
    }

    pub fn wall_time(&mut self, rule: &TimeRule) -> Option<Time> {
        let Some(value) = self.field(rule.field) else {
            self.reject(rule.field, rule.required);
            return None;
        };

        let parsed = value.as_str().and_then(parse_wall_time);
        if parsed.is_none() {
            self.reject(rule.field, rule.invalid);
        }
        parsed
    }

    pub fn integer(&mut self, rule: &IntegerRule) -> Option<f64> {
        let value = self.numeric(rule.field, rule.required, rule.not_number)?;
        if value.fract() != 0.0 {
            self.reject(rule.field, rule.not_integer);
            return None;
        }
        self.bounded(rule.field, value, rule.min, rule.max)
    }

    pub fn number(&mut self, rule: &NumberRule) -> Option<f64> {
        let value = self.numeric(rule.field, rule.required, rule.not_number)?;
        self.bounded(rule.field, value, rule.min, rule.max)
    }

    pub fn choice<T: FromStr>(&mut self, rule: &ChoiceRule) -> Option<T> {
        let Some(value) = self.field(rule.field) else {
            self.reject(rule.field, rule.required);
            return None;
        };

        let parsed = value.as_str().and_then(|text| text.parse::<T>().ok());
        if parsed.is_none() {
            self.reject(rule.field, rule.invalid);
        }
        parsed
    }

    /// `Some(None)` when the field is absent, `None` when it is present but invalid.
    pub fn optional_text(&mut self, rule: &TextRule) -> Option<Option<String>> {
        let Some(value) = self.field(rule.field) else {
            return Some(None);
        };

        let Some(text) = value.as_str() else {
            self.reject(rule.field, rule.not_text);
            return None;
        };

        let text = text.trim();
        if text.chars().count() > rule.max_chars {
            self.reject(rule.field, rule.too_long);
            return None;
        }

        Some(Some(text.to_owned()))
    }

    /// Consumes the checker into its collected errors.
    ///
    /// Every rule that yields `None` has recorded a violation, so schemas call
    /// this only after at least one field came back empty.
    pub fn into_errors(self) -> ValidationErrors {
        ValidationErrors::collected(self.errors)
    }

    pub fn finish(self) -> Result<(), ValidationErrors> {
        match ValidationErrors::from_vec(self.errors) {
            Some(errors) => Err(errors),
            None => Ok(()),
        }
    }

    fn field(&self, name: &str) -> Option<&'a Value> {
        self.record.present(name)
    }

    fn numeric(
        &mut self,
        field: &'static str,
        required: &'static str,
        not_number: &'static str,
    ) -> Option<f64> {
        let Some(value) = self.field(field) else {
            self.reject(field, required);
            return None;
        };

        let number = value.as_f64();
        if number.is_none() {
            self.reject(field, not_number);
        }
        number
    }

    fn bounded(&mut self, field: &'static str, value: f64, min: Bound, max: Bound) -> Option<f64> {
        if value < min.value {
            self.reject(field, min.message);
            return None;
        }
        if value > max.value {
            self.reject(field, max.message);
            return None;
        }
        Some(value)
    }
}

fn location_from_object(
    fields: &Map<String, Value>,
    rule: &LocationRule,
) -> Result<Location, &'static str> {
    let address = fields
        .get("address")
        .and_then(Value::as_str)
        .filter(|address| !address.trim().is_empty())
        .ok_or(rule.required)?;

    let latitude = fields.get("latitude").filter(|value| !value.is_null());
    let longitude = fields.get("longitude").filter(|value| !value.is_null());

    let position = match (latitude, longitude) {
        (None, None) => None,
        (Some(latitude), Some(longitude)) => {
            let (Some(latitude), Some(longitude)) = (latitude.as_f64(), longitude.as_f64()) else {
                return Err(COORDINATES_NOT_NUMBERS);
            };
            Some(GeoPoint::new(latitude, longitude).map_err(|error| match error {
                crate::DomainError::LatitudeOutOfRange { .. } => LATITUDE_RANGE,
                _ => LONGITUDE_RANGE,
            })?)
        }
        _ => return Err(COORDINATES_INCOMPLETE),
    };

    Location::new(address, position).map_err(|_| rule.required)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    const WEIGHT: NumberRule = NumberRule {
        field: "weight",
        required: "Weight is required",
        not_number: "Weight must be a number",
        min: Bound {
            value: 0.1,
            message: "too light",
        },
        max: Bound {
            value: 30.0,
            message: "too heavy",
        },
    };

    const FROM: LocationRule = LocationRule {
        field: "from",
        required: "From is required",
    };

    fn check_weight(value: Value) -> Result<(), ValidationErrors> {
        let record = CandidateRecord::new().with("weight", value);
        let mut checker = Checker::new(&record);
        checker.number(&WEIGHT);
        checker.finish()
    }

    #[test]
    fn number_bounds_are_inclusive() {
        assert!(check_weight(json!(0.1)).is_ok());
        assert!(check_weight(json!(30)).is_ok());

        let errors = check_weight(json!(30.01)).expect_err("above max");
        assert_eq!(errors.as_slice(), &[FieldError::new("weight", "too heavy")]);
    }

    #[test]
    fn type_rule_runs_before_range_rules() {
        let errors = check_weight(json!("heavy")).expect_err("not a number");
        assert_eq!(errors.as_slice(), &[FieldError::new("weight", "Weight must be a number")]);

        let errors = check_weight(json!("")).expect_err("blank");
        assert_eq!(errors.as_slice(), &[FieldError::new("weight", "Weight is required")]);
    }

    #[test]
    fn location_object_carries_coordinates() {
        let record = CandidateRecord::new().with(
            "from",
            json!({ "address": "Dock 4", "latitude": 59.9, "longitude": 10.7 }),
        );
        let mut checker = Checker::new(&record);
        let location = checker.location(&FROM).expect("valid location");
        assert!(checker.finish().is_ok());
        assert_eq!(location.address(), "Dock 4");
        assert!(location.position().is_some());
    }

    #[test]
    fn location_object_reports_coordinate_problems() {
        let cases = [
            (json!({ "address": "A", "latitude": 95.0, "longitude": 0.0 }), LATITUDE_RANGE),
            (json!({ "address": "A", "latitude": 0.0, "longitude": 200.0 }), LONGITUDE_RANGE),
            (json!({ "address": "A", "latitude": "north", "longitude": 1.0 }), COORDINATES_NOT_NUMBERS),
            (json!({ "address": "A", "latitude": 1.0 }), COORDINATES_INCOMPLETE),
            (json!({ "address": " ", "latitude": 1.0, "longitude": 1.0 }), "From is required"),
            (json!(17), LOCATION_SHAPE),
        ];

        for (value, expected) in cases {
            let record = CandidateRecord::new().with("from", value);
            let mut checker = Checker::new(&record);
            assert!(checker.location(&FROM).is_none());
            let errors = checker.finish().expect_err("must fail");
            assert_eq!(errors.as_slice(), &[FieldError::new("from", expected)]);
        }
    }

    #[test]
    fn optional_text_counts_characters_not_bytes() {
        let rule = TextRule {
            field: "description",
            max_chars: 3,
            too_long: "too long",
            not_text: "not text",
        };

        let record = CandidateRecord::new().with("description", "äöü");
        let mut checker = Checker::new(&record);
        assert_eq!(checker.optional_text(&rule), Some(Some(String::from("äöü"))));
        assert!(checker.finish().is_ok());

        let record = CandidateRecord::new();
        let mut checker = Checker::new(&record);
        assert_eq!(checker.optional_text(&rule), Some(None));
    }

    #[test]
    fn optional_text_is_trimmed_before_the_length_check() {
        let rule = TextRule {
            field: "description",
            max_chars: 3,
            too_long: "too long",
            not_text: "not text",
        };

        let record = CandidateRecord::new().with("description", "  hi  ");
        let mut checker = Checker::new(&record);
        assert_eq!(checker.optional_text(&rule), Some(Some(String::from("hi"))));

        let record = CandidateRecord::new().with("description", "  abc \n");
        let mut checker = Checker::new(&record);
        assert_eq!(checker.optional_text(&rule), Some(Some(String::from("abc"))));
        assert!(checker.finish().is_ok());
    }

    #[test]
    fn future_date_keeps_the_entered_day() {
        let rule = FutureDateRule {
            field: "date",
            required: "Date is required",
            invalid: "Invalid date",
            not_future: "Date must be in the future",
        };
        let now = UtcDateTime::parse("2030-01-07T12:00:00Z").expect("now");

        let record = CandidateRecord::new().with("date", "2030-01-08T00:30:00+02:00");
        let mut checker = Checker::new(&record);
        let date = checker.future_date(&rule, now).expect("still in the future");
        assert!(checker.finish().is_ok());
        assert_eq!(date.day.to_string(), "2030-01-08");
    }
}
