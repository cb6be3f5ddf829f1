//! Prediction request schema
//!
//! Categorical membership is enforced by serde at deserialization time (the
//! framework's default rejection applies); numeric range checks live in
//! [`UserInput::validate`].

use serde::{Deserialize, Serialize};

use crate::error::FieldError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeGroup {
    Young,
    Adult,
    MiddleAged,
    Senior,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifestyleRisk {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Occupation {
    Retired,
    Freelancer,
    Student,
    GovernmentJob,
    BusinessOwner,
    Unemployed,
    PrivateJob,
}

/// Request body for POST /predict. Transient, never persisted.
#[derive(Debug, Clone, Deserialize)]
pub struct UserInput {
    pub bmi: f64,
    pub age_group: AgeGroup,
    pub lifestyle_risk: LifestyleRisk,
    pub city_tier: u8,
    pub smoker: bool,
    pub income_lpa: f64,
    pub occupation: Occupation,
}

impl UserInput {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        if !(self.bmi.is_finite() && self.bmi > 0.0) {
            errors.push(FieldError::new("bmi", "must be a positive number"));
        }
        if !(1..=3).contains(&self.city_tier) {
            errors.push(FieldError::new("city_tier", "must be 1, 2 or 3"));
        }
        if !(self.income_lpa.is_finite() && self.income_lpa >= 0.0) {
            errors.push(FieldError::new("income_lpa", "must be a non-negative number"));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> serde_json::Result<UserInput> {
        serde_json::from_str(body)
    }

    #[test]
    fn test_valid_input_parses() {
        let input = parse(r#"{
            "bmi": 24.3,
            "age_group": "middle_aged",
            "lifestyle_risk": "medium",
            "city_tier": 2,
            "smoker": false,
            "income_lpa": 12.5,
            "occupation": "private_job"
        }"#).unwrap();

        assert_eq!(input.age_group, AgeGroup::MiddleAged);
        assert_eq!(input.occupation, Occupation::PrivateJob);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_unknown_category_is_rejected_by_serde() {
        let result = parse(r#"{
            "bmi": 24.3,
            "age_group": "elderly",
            "lifestyle_risk": "medium",
            "city_tier": 2,
            "smoker": false,
            "income_lpa": 12.5,
            "occupation": "private_job"
        }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_range_validation() {
        let mut input = parse(r#"{
            "bmi": 24.3,
            "age_group": "young",
            "lifestyle_risk": "low",
            "city_tier": 1,
            "smoker": true,
            "income_lpa": 5.0,
            "occupation": "student"
        }"#).unwrap();

        input.bmi = -1.0;
        input.city_tier = 4;
        input.income_lpa = f64::NAN;

        let errors = input.validate().unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["bmi", "city_tier", "income_lpa"]);
    }
}
