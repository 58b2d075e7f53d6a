use subtyper_core::models::input::PredictionInput;

use crate::error::PredictError;

/// A validated measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Gad,
    Hba1c,
    Bmi,
    Cpeptide,
    Glucose,
    Age,
}

impl Field {
    /// Request key for this field.
    pub fn key(self) -> &'static str {
        match self {
            Field::Gad => "gad",
            Field::Hba1c => "hba1c",
            Field::Bmi => "bmi",
            Field::Cpeptide => "cpeptide",
            Field::Glucose => "glucose",
            Field::Age => "age",
        }
    }

    /// Message shown to the client when this field is out of range.
    pub fn message(self) -> &'static str {
        match self {
            Field::Gad => "GAD autoantibody value must be 0 (negative) or 1 (positive).",
            Field::Hba1c => "HbA1c value must be between 4.7 and 18.1%.",
            Field::Bmi => "BMI value must be between 19 and 60 kg/m2.",
            Field::Cpeptide => "C-peptide value must be between 0.2 and 3.5 nmol/L.",
            Field::Glucose => {
                "Glucose value must be greater than 3.5 and less than or equal to 25 mmol/L."
            }
            Field::Age => "Age must be between 18 and 88 years.",
        }
    }

    fn value(self, input: &PredictionInput) -> f64 {
        match self {
            Field::Gad => input.gad,
            Field::Hba1c => input.hba1c,
            Field::Bmi => input.bmi,
            Field::Cpeptide => input.cpeptide,
            Field::Glucose => input.glucose,
            Field::Age => input.age,
        }
    }
}

/// Accepted values for one field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Domain {
    /// Exactly one of the listed values, compared without tolerance.
    OneOf(&'static [f64]),
    /// `min <= x <= max`.
    Closed { min: f64, max: f64 },
    /// `min < x <= max`.
    LeftOpen { min: f64, max: f64 },
}

impl Domain {
    /// NaN is never contained.
    pub fn contains(&self, value: f64) -> bool {
        match *self {
            Domain::OneOf(allowed) => allowed.contains(&value),
            Domain::Closed { min, max } => min <= value && value <= max,
            Domain::LeftOpen { min, max } => min < value && value <= max,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RangeRule {
    pub field: Field,
    pub domain: Domain,
}

/// Checked in this order; the first failing rule decides the error.
///
/// Glucose must stay strictly above 3.5: HOMA1-B divides by `glucose - 3.5`.
pub const RULES: [RangeRule; 6] = [
    RangeRule {
        field: Field::Gad,
        domain: Domain::OneOf(&[0.0, 1.0]),
    },
    RangeRule {
        field: Field::Hba1c,
        domain: Domain::Closed {
            min: 4.7,
            max: 18.1,
        },
    },
    RangeRule {
        field: Field::Bmi,
        domain: Domain::Closed {
            min: 19.0,
            max: 60.0,
        },
    },
    RangeRule {
        field: Field::Cpeptide,
        domain: Domain::Closed { min: 0.2, max: 3.5 },
    },
    RangeRule {
        field: Field::Glucose,
        domain: Domain::LeftOpen {
            min: 3.5,
            max: 25.0,
        },
    },
    RangeRule {
        field: Field::Age,
        domain: Domain::Closed {
            min: 18.0,
            max: 88.0,
        },
    },
];

/// Input that has passed every [`RULES`] check.
///
/// Only [`validate`] builds one, so holding a `ValidInput` means feature
/// derivation is safe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidInput(PredictionInput);

impl ValidInput {
    pub fn get(&self) -> &PredictionInput {
        &self.0
    }
}

pub fn validate(input: PredictionInput) -> Result<ValidInput, PredictError> {
    for rule in &RULES {
        let value = rule.field.value(&input);
        if !rule.domain.contains(value) {
            tracing::debug!(field = rule.field.key(), value, "input out of range");
            return Err(PredictError::OutOfRange {
                field: rule.field,
                value,
            });
        }
    }
    Ok(ValidInput(input))
}
