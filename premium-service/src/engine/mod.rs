//! Inference engine
//!
//! The pre-trained classifier is an opaque artifact reached through the
//! [`Classifier`] trait (classify + class probabilities). The only logic
//! that lives here is building the feature row in the fixed column order
//! the model was trained with and shaping the response.

mod onnx;

pub use onnx::{ModelMeta, OnnxClassifier};

use std::collections::BTreeMap;

use crate::models::{PredictionResponse, UserInput};

/// Feature column order: bmi, age_group, lifestyle_risk, city_tier, smoker,
/// income_lpa, occupation. The model artifact expects exactly this layout.
pub const FEATURE_COUNT: usize = 7;

pub type FeatureRow = [f32; FEATURE_COUNT];

#[derive(Debug, thiserror::Error)]
#[error("inference error: {0}")]
pub struct InferenceError(pub String);

/// Narrow interface over the pre-trained classifier artifact.
pub trait Classifier: Send + Sync {
    /// Class labels in the order of the probability output.
    fn class_labels(&self) -> &[String];

    fn model_version(&self) -> &str;

    /// Probability per class, same order as [`Classifier::class_labels`].
    fn class_probabilities(&self, row: &FeatureRow) -> Result<Vec<f32>, InferenceError>;

    /// Highest-probability label.
    fn classify(&self, row: &FeatureRow) -> Result<String, InferenceError> {
        let probs = self.class_probabilities(row)?;
        let idx = argmax(&probs)
            .ok_or_else(|| InferenceError("empty probability vector".to_string()))?;
        self.class_labels()
            .get(idx)
            .cloned()
            .ok_or_else(|| InferenceError(format!("no label for class index {}", idx)))
    }
}

fn argmax(probs: &[f32]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, p) in probs.iter().enumerate() {
        if best.map_or(true, |b| *p > probs[b]) {
            best = Some(i);
        }
    }
    best
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Encode a validated request into the model's feature row. Categoricals
/// use their fixed ordinal, smoker is 0/1.
pub fn encode_row(input: &UserInput) -> FeatureRow {
    [
        input.bmi as f32,
        input.age_group as u8 as f32,
        input.lifestyle_risk as u8 as f32,
        input.city_tier as f32,
        input.smoker as u8 as f32,
        input.income_lpa as f32,
        input.occupation as u8 as f32,
    ]
}

/// Request-facing wrapper over the injected classifier.
pub struct PremiumModel {
    classifier: Box<dyn Classifier>,
}

impl PremiumModel {
    pub fn new(classifier: Box<dyn Classifier>) -> Self {
        Self { classifier }
    }

    pub fn version(&self) -> &str {
        self.classifier.model_version()
    }

    pub fn predict(&self, input: &UserInput) -> Result<PredictionResponse, InferenceError> {
        let row = encode_row(input);
        let probs = self.classifier.class_probabilities(&row)?;
        let labels = self.classifier.class_labels();

        if labels.len() != probs.len() {
            return Err(InferenceError(format!(
                "model returned {} probabilities for {} labels",
                probs.len(),
                labels.len()
            )));
        }

        let best = argmax(&probs)
            .ok_or_else(|| InferenceError("empty probability vector".to_string()))?;

        let class_probabilities: BTreeMap<String, f64> = labels
            .iter()
            .zip(&probs)
            .map(|(label, p)| (label.clone(), round4(*p as f64)))
            .collect();

        Ok(PredictionResponse {
            predicted_category: labels[best].clone(),
            confidence: round4(probs[best] as f64),
            class_probabilities,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AgeGroup, LifestyleRisk, Occupation};

    struct StubClassifier {
        labels: Vec<String>,
        probs: Vec<f32>,
    }

    impl Classifier for StubClassifier {
        fn class_labels(&self) -> &[String] {
            &self.labels
        }

        fn model_version(&self) -> &str {
            "test"
        }

        fn class_probabilities(&self, _row: &FeatureRow) -> Result<Vec<f32>, InferenceError> {
            Ok(self.probs.clone())
        }
    }

    fn stub(probs: Vec<f32>) -> PremiumModel {
        PremiumModel::new(Box::new(StubClassifier {
            labels: vec!["Low".to_string(), "Medium".to_string(), "High".to_string()],
            probs,
        }))
    }

    fn input() -> UserInput {
        UserInput {
            bmi: 24.3,
            age_group: AgeGroup::Adult,
            lifestyle_risk: LifestyleRisk::Medium,
            city_tier: 2,
            smoker: true,
            income_lpa: 12.5,
            occupation: Occupation::PrivateJob,
        }
    }

    #[test]
    fn test_encode_row_column_order() {
        let row = encode_row(&input());
        assert_eq!(row, [24.3, 1.0, 1.0, 2.0, 1.0, 12.5, 6.0]);
    }

    #[test]
    fn test_predict_picks_highest_probability() {
        let response = stub(vec![0.1, 0.2, 0.7]).predict(&input()).unwrap();
        assert_eq!(response.predicted_category, "High");
        assert_eq!(response.confidence, 0.7);
    }

    #[test]
    fn test_confidence_equals_max_probability() {
        let response = stub(vec![0.25, 0.6, 0.15]).predict(&input()).unwrap();
        let max = response
            .class_probabilities
            .values()
            .cloned()
            .fold(f64::MIN, f64::max);
        assert_eq!(response.confidence, max);
    }

    #[test]
    fn test_probabilities_rounded_and_sum_to_one() {
        let response = stub(vec![0.333_333, 0.333_333, 0.333_334]).predict(&input()).unwrap();
        for p in response.class_probabilities.values() {
            assert_eq!((p * 10_000.0).round() / 10_000.0, *p);
        }
        let sum: f64 = response.class_probabilities.values().sum();
        assert!((sum - 1.0).abs() < 1e-3, "sum was {}", sum);
    }

    #[test]
    fn test_label_probability_length_mismatch() {
        let model = stub(vec![0.5, 0.5]);
        assert!(model.predict(&input()).is_err());
    }

    #[test]
    fn test_default_classify_uses_argmax() {
        let classifier = StubClassifier {
            labels: vec!["Low".to_string(), "High".to_string()],
            probs: vec![0.8, 0.2],
        };
        let row = encode_row(&input());
        assert_eq!(classifier.classify(&row).unwrap(), "Low");
    }
}
