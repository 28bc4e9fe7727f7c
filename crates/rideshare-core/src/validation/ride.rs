use super::rules::{
    Bound, Checker, FutureDateRule, IntegerRule, LocationRule, NumberRule, TextRule, TimeRule,
};
use super::{combine_date_and_time, CandidateRecord, ValidationResult};
use crate::{RideRequest, UtcDateTime, MAX_DESCRIPTION_CHARS, MAX_SEATS, MIN_SEATS};

const FROM: LocationRule = LocationRule {
    field: "from",
    required: "Departure location is required",
};

const TO: LocationRule = LocationRule {
    field: "to",
    required: "Destination is required",
};

const DATE: FutureDateRule = FutureDateRule {
    field: "date",
    required: "Date is required",
    invalid: "Date must be a valid date",
    not_future: "Date must be in the future",
};

const TIME: TimeRule = TimeRule {
    field: "time",
    required: "Time is required",
    invalid: "Time must be in HH:MM format",
};

const DEPARTURE_IN_PAST: &str = "Departure time must be in the future";

const SEATS: IntegerRule = IntegerRule {
    field: "seats",
    required: "Seats is required",
    not_number: "Seats must be a number",
    not_integer: "Must be a whole number",
    min: Bound {
        value: MIN_SEATS as f64,
        message: "Must have at least 1 seat",
    },
    max: Bound {
        value: MAX_SEATS as f64,
        message: "Maximum 8 seats allowed",
    },
};

const PRICE: NumberRule = NumberRule {
    field: "price",
    required: "Price is required",
    not_number: "Price must be a number",
    min: Bound {
        value: 0.0,
        message: "Price cannot be negative",
    },
    max: Bound {
        value: 1000.0,
        message: "Price cannot exceed 1000 TON",
    },
};

const DESCRIPTION: TextRule = TextRule {
    field: "description",
    max_chars: MAX_DESCRIPTION_CHARS,
    too_long: "Description cannot exceed 500 characters",
    not_text: "Description must be text",
};

/// Validates a ride offer against the ride schema at reference time `now`.
///
/// Fields are checked in the order `from, to, date, time, seats, price,
/// description`. Once `date` and `time` both pass, they are merged into
/// `departure_time`, which must itself be after `now`.
pub fn validate_ride(record: &CandidateRecord, now: UtcDateTime) -> ValidationResult<RideRequest> {
    let mut checker = Checker::new(record);

    let from = checker.location(&FROM);
    let to = checker.location(&TO);
    let date = checker.future_date(&DATE, now);
    let time = checker.wall_time(&TIME);
    let departure_time = match (date, time) {
        (Some(date), Some(time)) => {
            let combined = combine_date_and_time(date.day, time);
            if combined <= now {
                checker.reject(TIME.field, DEPARTURE_IN_PAST);
                None
            } else {
                Some(combined)
            }
        }
        _ => None,
    };
    let seats = checker.integer(&SEATS);
    let price = checker.number(&PRICE);
    let description = checker.optional_text(&DESCRIPTION);

    let (Some(from), Some(to), Some(departure_time), Some(seats), Some(price), Some(description)) =
        (from, to, departure_time, seats, price, description)
    else {
        return Err(checker.into_errors());
    };

    Ok(RideRequest {
        from,
        to,
        departure_time,
        // bounded to [1, 8] by SEATS
        seats: seats as u8,
        price,
        description,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> UtcDateTime {
        UtcDateTime::parse("2030-01-01T12:00:00Z").expect("timestamp")
    }

    fn valid_record() -> CandidateRecord {
        CandidateRecord::new()
            .with("from", "A")
            .with("to", "B")
            .with("date", "2030-01-08")
            .with("time", "10:00")
            .with("seats", 4)
            .with("price", 50)
    }

    #[test]
    fn accepts_minimal_valid_ride() {
        let ride = validate_ride(&valid_record(), now()).expect("valid ride");
        assert_eq!(ride.from.address(), "A");
        assert_eq!(ride.departure_time.format_rfc3339(), "2030-01-08T10:00:00Z");
        assert_eq!(ride.seats, 4);
        assert_eq!(ride.description, None);
    }

    #[test]
    fn reports_fields_in_declaration_order() {
        let errors = validate_ride(&CandidateRecord::new(), now()).expect_err("empty record");
        assert_eq!(
            errors.fields(),
            vec!["from", "to", "date", "time", "seats", "price"]
        );
        assert_eq!(
            errors.for_field("seats").map(|error| error.message.as_str()),
            Some("Seats is required")
        );
    }

    #[test]
    fn rejects_fractional_seats() {
        let record = valid_record().with("seats", 2.5);
        let errors = validate_ride(&record, now()).expect_err("fractional seats");
        assert_eq!(errors.fields(), vec!["seats"]);
        assert_eq!(errors.as_slice()[0].message, "Must be a whole number");
    }

    #[test]
    fn same_day_departure_in_the_past_is_a_time_error() {
        let record = valid_record()
            .with("date", "2030-01-01T18:00:00Z")
            .with("time", "09:00");
        let errors = validate_ride(&record, now()).expect_err("departure already passed");
        assert_eq!(errors.fields(), vec!["time"]);
        assert_eq!(errors.as_slice()[0].message, DEPARTURE_IN_PAST);
    }
}
