//! Patient model
//!
//! BMI and the health verdict are snapshots taken once, when a patient is
//! created, and stored alongside the raw fields. A partial update never
//! recomputes them, even when height or weight changes.

use serde::{Deserialize, Serialize};

use crate::error::FieldError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Others,
}

/// Stored value for one patient. The patient id is the map key in the data
/// file and is not duplicated inside the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    pub name: String,
    pub city: String,
    pub age: u32,
    pub gender: Gender,
    /// Height in meters
    pub height: f64,
    /// Weight in kilograms
    pub weight: f64,
    /// Derived at creation time, kept as stored thereafter
    pub bmi: f64,
    /// Derived at creation time, kept as stored thereafter
    pub verdict: String,
}

/// Request body for POST /create
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePatient {
    pub id: String,
    pub name: String,
    pub city: String,
    pub age: u32,
    pub gender: Gender,
    pub height: f64,
    pub weight: f64,
}

/// Request body for PUT /update/{id}: only supplied fields overwrite the
/// stored record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePatient {
    pub name: Option<String>,
    pub city: Option<String>,
    pub age: Option<u32>,
    pub gender: Option<Gender>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
}

/// BMI rounded to 2 decimals
pub fn bmi(weight: f64, height: f64) -> f64 {
    (weight / (height * height) * 100.0).round() / 100.0
}

/// Categorical health bucket for a BMI value
pub fn verdict(bmi: f64) -> &'static str {
    if bmi < 18.5 {
        "Underweight"
    } else if bmi < 30.0 {
        "Normal"
    } else {
        "Obese"
    }
}

fn check_age(age: u32, errors: &mut Vec<FieldError>) {
    if age == 0 || age >= 120 {
        errors.push(FieldError::new("age", "must be between 1 and 119"));
    }
}

fn check_positive(field: &'static str, value: f64, errors: &mut Vec<FieldError>) {
    if !(value.is_finite() && value > 0.0) {
        errors.push(FieldError::new(field, "must be a positive number"));
    }
}

impl CreatePatient {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        if self.id.trim().is_empty() {
            errors.push(FieldError::new("id", "must not be empty"));
        }
        if self.name.trim().is_empty() {
            errors.push(FieldError::new("name", "must not be empty"));
        }
        if self.city.trim().is_empty() {
            errors.push(FieldError::new("city", "must not be empty"));
        }
        check_age(self.age, &mut errors);
        check_positive("height", self.height, &mut errors);
        check_positive("weight", self.weight, &mut errors);

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Split into the map key and the stored record, computing the derived
    /// fields.
    pub fn into_record(self) -> (String, PatientRecord) {
        let bmi_value = bmi(self.weight, self.height);
        let record = PatientRecord {
            name: self.name,
            city: self.city,
            age: self.age,
            gender: self.gender,
            height: self.height,
            weight: self.weight,
            bmi: bmi_value,
            verdict: verdict(bmi_value).to_string(),
        };
        (self.id, record)
    }
}

impl UpdatePatient {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                errors.push(FieldError::new("name", "must not be empty"));
            }
        }
        if let Some(city) = &self.city {
            if city.trim().is_empty() {
                errors.push(FieldError::new("city", "must not be empty"));
            }
        }
        if let Some(age) = self.age {
            check_age(age, &mut errors);
        }
        if let Some(height) = self.height {
            check_positive("height", height, &mut errors);
        }
        if let Some(weight) = self.weight {
            check_positive("weight", weight, &mut errors);
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Overwrite only the supplied fields. bmi/verdict are left untouched.
    pub fn apply(self, record: &mut PatientRecord) {
        if let Some(name) = self.name {
            record.name = name;
        }
        if let Some(city) = self.city {
            record.city = city;
        }
        if let Some(age) = self.age {
            record.age = age;
        }
        if let Some(gender) = self.gender {
            record.gender = gender;
        }
        if let Some(height) = self.height {
            record.height = height;
        }
        if let Some(weight) = self.weight {
            record.weight = weight;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CreatePatient {
        CreatePatient {
            id: "P001".to_string(),
            name: "Ananya".to_string(),
            city: "Pune".to_string(),
            age: 30,
            gender: Gender::Female,
            height: 1.75,
            weight: 70.0,
        }
    }

    #[test]
    fn test_bmi_rounding() {
        assert_eq!(bmi(70.0, 1.75), 22.86);
        assert_eq!(bmi(90.0, 1.6), 35.16);
    }

    #[test]
    fn test_verdict_buckets() {
        assert_eq!(verdict(18.49), "Underweight");
        assert_eq!(verdict(18.5), "Normal");
        assert_eq!(verdict(22.86), "Normal");
        assert_eq!(verdict(29.99), "Normal");
        assert_eq!(verdict(30.0), "Obese");
    }

    #[test]
    fn test_create_derives_fields() {
        let (id, record) = sample().into_record();
        assert_eq!(id, "P001");
        assert_eq!(record.bmi, 22.86);
        assert_eq!(record.verdict, "Normal");
    }

    #[test]
    fn test_create_validation_ranges() {
        let mut bad = sample();
        bad.age = 120;
        bad.height = 0.0;
        bad.name = "  ".to_string();
        let errors = bad.validate().unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["name", "age", "height"]);
    }

    #[test]
    fn test_partial_update_keeps_unset_fields() {
        let (_, mut record) = sample().into_record();
        let update = UpdatePatient {
            age: Some(31),
            ..Default::default()
        };
        update.apply(&mut record);
        assert_eq!(record.age, 31);
        assert_eq!(record.name, "Ananya");
        assert_eq!(record.city, "Pune");
        assert_eq!(record.height, 1.75);
        assert_eq!(record.weight, 70.0);
        assert_eq!(record.bmi, 22.86);
        assert_eq!(record.verdict, "Normal");
    }

    #[test]
    fn test_update_does_not_recompute_bmi() {
        // Weight changes leave the stored bmi/verdict snapshot untouched
        let (_, mut record) = sample().into_record();
        let update = UpdatePatient {
            weight: Some(95.0),
            ..Default::default()
        };
        update.apply(&mut record);
        assert_eq!(record.weight, 95.0);
        assert_eq!(record.bmi, 22.86);
        assert_eq!(record.verdict, "Normal");
    }

    #[test]
    fn test_update_validation() {
        let update = UpdatePatient {
            age: Some(0),
            weight: Some(-1.0),
            ..Default::default()
        };
        let errors = update.validate().unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_gender_serde() {
        let gender: Gender = serde_json::from_str("\"others\"").unwrap();
        assert_eq!(gender, Gender::Others);
        assert!(serde_json::from_str::<Gender>("\"unknown\"").is_err());
    }
}
