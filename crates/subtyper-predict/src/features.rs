use subtyper_core::models::features::{DerivedFeatures, FeatureVector};

use crate::validate::ValidInput;

/// HOMA1 beta-cell function and insulin resistance, approximated from
/// C-peptide in place of insulin.
pub fn derive(input: &ValidInput) -> DerivedFeatures {
    let v = input.get();
    DerivedFeatures {
        homa1_b: (20.0 * 6.0 * v.cpeptide) / (v.glucose - 3.5),
        homa1_ir: (v.glucose * 6.0 * v.cpeptide) / 22.5,
    }
}

/// Map inputs and derived indices onto the classifier's training columns.
pub fn assemble(input: &ValidInput, derived: &DerivedFeatures) -> FeatureVector {
    let v = input.get();
    FeatureVector {
        gad: v.gad,
        a1c: v.hba1c,
        bmi: v.bmi,
        diabetes_age: v.age,
        homa1_cpeptide_b: derived.homa1_b,
        homa1_cpeptide_ir: derived.homa1_ir,
    }
}
