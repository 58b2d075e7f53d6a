//! The classifier's input schema.
//!
//! Column names and order match the schema the model was trained on. A
//! reordering here silently corrupts every prediction, so artifacts are
//! checked against [`FEATURE_NAMES`] when they are loaded.

use serde::{Deserialize, Serialize};

pub const N_FEATURES: usize = 6;

/// Training-time column names, in column order.
pub const FEATURE_NAMES: [&str; N_FEATURES] = [
    "gad",
    "a1c",
    "bmi",
    "diabetes_age",
    "homa1_cpeptide_b",
    "homa1_cpeptide_ir",
];

/// HOMA1 approximations computed from glucose and C-peptide.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedFeatures {
    /// Beta-cell function.
    pub homa1_b: f64,
    /// Insulin resistance.
    pub homa1_ir: f64,
}

/// A single classifier row, one field per training column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub gad: f64,
    pub a1c: f64,
    pub bmi: f64,
    pub diabetes_age: f64,
    pub homa1_cpeptide_b: f64,
    pub homa1_cpeptide_ir: f64,
}

impl FeatureVector {
    /// Values in [`FEATURE_NAMES`] order.
    pub fn to_row(&self) -> [f64; N_FEATURES] {
        [
            self.gad,
            self.a1c,
            self.bmi,
            self.diabetes_age,
            self.homa1_cpeptide_b,
            self.homa1_cpeptide_ir,
        ]
    }

    /// `(column name, value)` pairs in column order.
    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> {
        FEATURE_NAMES.into_iter().zip(self.to_row())
    }
}
