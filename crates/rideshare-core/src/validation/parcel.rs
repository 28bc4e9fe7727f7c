use super::rules::{
    Bound, Checker, ChoiceRule, FutureDateRule, LocationRule, NumberRule, TextRule, TimeRule,
};
use super::{combine_date_and_time, CandidateRecord, ValidationResult};
use crate::{ParcelRequest, ParcelSize, UtcDateTime, MAX_DESCRIPTION_CHARS};

const FROM: LocationRule = LocationRule {
    field: "from",
    required: "Pickup location is required",
};

const TO: LocationRule = LocationRule {
    field: "to",
    required: "Delivery location is required",
};

const DEADLINE: FutureDateRule = FutureDateRule {
    field: "deadline",
    required: "Deadline is required",
    invalid: "Deadline must be a valid date",
    not_future: "Deadline must be in the future",
};

const TIME: TimeRule = TimeRule {
    field: "time",
    required: "Time is required",
    invalid: "Time must be in HH:MM format",
};

const DEADLINE_IN_PAST: &str = "Deadline time must be in the future";

const SIZE: ChoiceRule = ChoiceRule {
    field: "size",
    required: "Size is required",
    invalid: "Size must be one of small, medium, large",
};

const WEIGHT: NumberRule = NumberRule {
    field: "weight",
    required: "Weight is required",
    not_number: "Weight must be a number",
    min: Bound {
        value: 0.1,
        message: "Weight must be at least 0.1 kg",
    },
    max: Bound {
        value: 30.0,
        message: "Weight cannot exceed 30 kg",
    },
};

const REWARD: NumberRule = NumberRule {
    field: "reward",
    required: "Reward is required",
    not_number: "Reward must be a number",
    min: Bound {
        value: 1.0,
        message: "Reward must be at least 1 TON",
    },
    max: Bound {
        value: 1000.0,
        message: "Reward cannot exceed 1000 TON",
    },
};

const DESCRIPTION: TextRule = TextRule {
    field: "description",
    max_chars: MAX_DESCRIPTION_CHARS,
    too_long: "Description cannot exceed 500 characters",
    not_text: "Description must be text",
};

/// Validates a parcel delivery offer against the parcel schema at reference time `now`.
///
/// Field order: `from, to, deadline, time, size, weight, reward, description`.
pub fn validate_parcel(
    record: &CandidateRecord,
    now: UtcDateTime,
) -> ValidationResult<ParcelRequest> {
    let mut checker = Checker::new(record);

    let from = checker.location(&FROM);
    let to = checker.location(&TO);
    let deadline_date = checker.future_date(&DEADLINE, now);
    let time = checker.wall_time(&TIME);
    let deadline = match (deadline_date, time) {
        (Some(date), Some(time)) => {
            let combined = combine_date_and_time(date.day, time);
            if combined <= now {
                checker.reject(TIME.field, DEADLINE_IN_PAST);
                None
            } else {
                Some(combined)
            }
        }
        _ => None,
    };
    let size = checker.choice::<ParcelSize>(&SIZE);
    let weight = checker.number(&WEIGHT);
    let reward = checker.number(&REWARD);
    let description = checker.optional_text(&DESCRIPTION);

    let (Some(from), Some(to), Some(deadline), Some(size), Some(weight), Some(reward), Some(description)) =
        (from, to, deadline, size, weight, reward, description)
    else {
        return Err(checker.into_errors());
    };

    Ok(ParcelRequest {
        from,
        to,
        deadline,
        size,
        weight,
        reward,
        description,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn now() -> UtcDateTime {
        UtcDateTime::parse("2030-01-01T12:00:00Z").expect("timestamp")
    }

    fn valid_record() -> CandidateRecord {
        CandidateRecord::new()
            .with("from", json!({ "address": "Depot", "latitude": 48.1, "longitude": 11.5 }))
            .with("to", "Office 3")
            .with("deadline", "2030-01-03")
            .with("time", "17:30")
            .with("size", "medium")
            .with("weight", 2.5)
            .with("reward", 12)
            .with("description", "Fragile, keep upright")
    }

    #[test]
    fn accepts_valid_parcel() {
        let parcel = validate_parcel(&valid_record(), now()).expect("valid parcel");
        assert_eq!(parcel.size, ParcelSize::Medium);
        assert_eq!(parcel.deadline.format_rfc3339(), "2030-01-03T17:30:00Z");
        assert_eq!(parcel.description.as_deref(), Some("Fragile, keep upright"));
        assert!(parcel.from.position().is_some());
    }

    #[test]
    fn weight_and_reward_bounds_are_inclusive() {
        let record = valid_record().with("weight", 0.1).with("reward", 1000);
        assert!(validate_parcel(&record, now()).is_ok());

        let record = valid_record().with("weight", 0.05).with("reward", 0.5);
        let errors = validate_parcel(&record, now()).expect_err("below minimums");
        assert_eq!(errors.fields(), vec!["weight", "reward"]);
    }

    #[test]
    fn size_must_be_an_exact_enum_value() {
        for size in ["jumbo", "Small", "LARGE"] {
            let record = valid_record().with("size", size);
            let errors = validate_parcel(&record, now()).expect_err("invalid size");
            assert_eq!(errors.fields(), vec!["size"]);
        }

        let record = valid_record().with("size", 3);
        let errors = validate_parcel(&record, now()).expect_err("numeric size");
        assert_eq!(errors.as_slice()[0].message, "Size must be one of small, medium, large");
    }

    #[test]
    fn missing_parcel_fields_use_parcel_messages() {
        let errors = validate_parcel(&CandidateRecord::new(), now()).expect_err("empty");
        assert_eq!(
            errors.fields(),
            vec!["from", "to", "deadline", "time", "size", "weight", "reward"]
        );
        assert_eq!(
            errors.for_field("from").map(|error| error.message.as_str()),
            Some("Pickup location is required")
        );
    }
}
