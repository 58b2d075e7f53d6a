use serde_json::json;
use subtyper_core::models::input::PredictionInput;
use subtyper_predict::coerce::{extract, to_f64};
use subtyper_predict::validate::{validate, Domain, Field, RULES};
use subtyper_predict::PredictError;

fn valid_input() -> PredictionInput {
    PredictionInput {
        gad: 0.0,
        hba1c: 7.0,
        bmi: 25.0,
        age: 30.0,
        cpeptide: 1.0,
        glucose: 6.0,
    }
}

fn rejected_field(input: PredictionInput) -> Option<Field> {
    match validate(input) {
        Ok(_) => None,
        Err(PredictError::OutOfRange { field, .. }) => Some(field),
        Err(other) => panic!("unexpected error: {other}"),
    }
}

#[test]
fn extract_reads_all_six_fields() {
    let raw = json!({
        "gad": 1, "hba1c": 7.5, "bmi": 31.2, "age": 45, "cpeptide": 0.8, "glucose": 9.1
    });
    let input = extract(&raw).unwrap();
    assert_eq!(
        input,
        PredictionInput {
            gad: 1.0,
            hba1c: 7.5,
            bmi: 31.2,
            age: 45.0,
            cpeptide: 0.8,
            glucose: 9.1,
        }
    );
}

#[test]
fn extract_coerces_numeric_strings() {
    let raw = json!({
        "gad": "0", "hba1c": " 7.0 ", "bmi": "25", "age": "30", "cpeptide": "1.0", "glucose": "6"
    });
    assert_eq!(extract(&raw).unwrap(), valid_input());
}

#[test]
fn extract_ignores_extra_keys() {
    let raw = json!({
        "gad": 0, "hba1c": 7.0, "bmi": 25.0, "age": 30, "cpeptide": 1.0, "glucose": 6.0,
        "medications": ["metformin"]
    });
    assert!(extract(&raw).is_ok());
}

#[test]
fn each_missing_field_is_malformed() {
    let full = json!({
        "gad": 0, "hba1c": 7.0, "bmi": 25.0, "age": 30, "cpeptide": 1.0, "glucose": 6.0
    });
    for key in ["gad", "hba1c", "bmi", "age", "cpeptide", "glucose"] {
        let mut raw = full.clone();
        raw.as_object_mut().unwrap().remove(key);
        let err = extract(&raw).unwrap_err();
        assert!(matches!(err, PredictError::MalformedInput), "{key}");
        assert_eq!(err.to_string(), "Invalid input data");
    }
}

#[test]
fn non_numeric_values_are_malformed() {
    for bad in [json!("abc"), json!(null), json!([1]), json!({"v": 1}), json!("")] {
        let raw = json!({
            "gad": 0, "hba1c": bad, "bmi": 25.0, "age": 30, "cpeptide": 1.0, "glucose": 6.0
        });
        assert!(matches!(extract(&raw), Err(PredictError::MalformedInput)));
    }
}

#[test]
fn non_object_body_is_malformed() {
    assert!(matches!(extract(&json!([1, 2, 3])), Err(PredictError::MalformedInput)));
    assert!(matches!(extract(&json!("gad")), Err(PredictError::MalformedInput)));
}

#[test]
fn booleans_coerce_to_zero_and_one() {
    assert_eq!(to_f64(&json!(true)), Some(1.0));
    assert_eq!(to_f64(&json!(false)), Some(0.0));
}

#[test]
fn valid_input_passes() {
    assert_eq!(rejected_field(valid_input()), None);
}

#[test]
fn gad_must_be_exactly_zero_or_one() {
    for gad in [0.5, 2.0, -1.0, 0.999_999, 1e-12] {
        let input = PredictionInput {
            gad,
            ..valid_input()
        };
        assert_eq!(rejected_field(input), Some(Field::Gad), "gad = {gad}");
    }
    let positive = PredictionInput {
        gad: 1.0,
        ..valid_input()
    };
    assert_eq!(rejected_field(positive), None);
}

#[test]
fn gad_error_wins_over_later_fields() {
    let input = PredictionInput {
        gad: 0.5,
        hba1c: 100.0,
        bmi: 1.0,
        age: 5.0,
        cpeptide: 9.0,
        glucose: 1.0,
    };
    let err = validate(input).unwrap_err();
    assert_eq!(
        err.to_string(),
        "GAD autoantibody value must be 0 (negative) or 1 (positive)."
    );
}

#[test]
fn first_failing_rule_decides_the_message() {
    let input = PredictionInput {
        bmi: 70.0,
        age: 10.0,
        ..valid_input()
    };
    assert_eq!(rejected_field(input), Some(Field::Bmi));

    let input = PredictionInput {
        cpeptide: 0.1,
        glucose: 30.0,
        ..valid_input()
    };
    assert_eq!(rejected_field(input), Some(Field::Cpeptide));
}

#[test]
fn closed_ranges_include_both_bounds() {
    let cases = [
        (Field::Hba1c, 4.7, 18.1),
        (Field::Bmi, 19.0, 60.0),
        (Field::Cpeptide, 0.2, 3.5),
        (Field::Age, 18.0, 88.0),
    ];
    for (field, min, max) in cases {
        let set = |v: f64| {
            let mut input = valid_input();
            match field {
                Field::Hba1c => input.hba1c = v,
                Field::Bmi => input.bmi = v,
                Field::Cpeptide => input.cpeptide = v,
                Field::Age => input.age = v,
                _ => unreachable!(),
            }
            input
        };
        assert_eq!(rejected_field(set(min)), None, "{field:?} min");
        assert_eq!(rejected_field(set(max)), None, "{field:?} max");
        assert_eq!(rejected_field(set(min - 0.01)), Some(field), "{field:?} below");
        assert_eq!(rejected_field(set(max + 0.01)), Some(field), "{field:?} above");
    }
}

#[test]
fn glucose_lower_bound_is_exclusive() {
    let at = |glucose| PredictionInput {
        glucose,
        ..valid_input()
    };
    assert_eq!(rejected_field(at(3.5)), Some(Field::Glucose));
    assert_eq!(rejected_field(at(3.50001)), None);
    assert_eq!(rejected_field(at(25.0)), None);
    assert_eq!(rejected_field(at(25.00001)), Some(Field::Glucose));
}

#[test]
fn nan_fails_its_range_check() {
    let input = PredictionInput {
        hba1c: f64::NAN,
        ..valid_input()
    };
    assert_eq!(rejected_field(input), Some(Field::Hba1c));
    assert!(!Domain::OneOf(&[0.0, 1.0]).contains(f64::NAN));
}

#[test]
fn out_of_range_messages_are_field_specific() {
    let expected = [
        (
            Field::Hba1c,
            PredictionInput {
                hba1c: 3.0,
                ..valid_input()
            },
            "HbA1c value must be between 4.7 and 18.1%.",
        ),
        (
            Field::Bmi,
            PredictionInput {
                bmi: 61.0,
                ..valid_input()
            },
            "BMI value must be between 19 and 60 kg/m2.",
        ),
        (
            Field::Cpeptide,
            PredictionInput {
                cpeptide: 4.0,
                ..valid_input()
            },
            "C-peptide value must be between 0.2 and 3.5 nmol/L.",
        ),
        (
            Field::Glucose,
            PredictionInput {
                glucose: 2.0,
                ..valid_input()
            },
            "Glucose value must be greater than 3.5 and less than or equal to 25 mmol/L.",
        ),
        (
            Field::Age,
            PredictionInput {
                age: 90.0,
                ..valid_input()
            },
            "Age must be between 18 and 88 years.",
        ),
    ];

    for (field, input, message) in expected {
        let err = validate(input).unwrap_err();
        assert_eq!(err.to_string(), message);
        assert_eq!(field.message(), message);
        assert!(err.is_client_error());
    }
}

#[test]
fn rule_keys_are_the_request_keys_in_check_order() {
    let keys: Vec<&str> = RULES.iter().map(|rule| rule.field.key()).collect();
    assert_eq!(keys, ["gad", "hba1c", "bmi", "cpeptide", "glucose", "age"]);

    let body = json!({
        "gad": 0, "hba1c": 7.0, "bmi": 25.0, "age": 30, "cpeptide": 1.0, "glucose": 6.0
    });
    for key in keys {
        let mut partial = body.clone();
        partial.as_object_mut().unwrap().remove(key);
        assert!(
            matches!(extract(&partial), Err(PredictError::MalformedInput)),
            "{key}"
        );
    }
}
