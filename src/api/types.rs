// src/api/types.rs
use serde::{Serialize, Deserialize};
use utoipa::ToSchema;
use crate::core::{Config, GenerationOutcome, PolicyPreview};
use crate::generators::StrengthThresholds;
use crate::models::{CharacterClass, RawPolicy, StrengthLabel};

// Password generation types
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct GenerationRequest {
    /// Password length (default: 16)
    pub length: Option<i64>,
    /// Number of passwords to generate (default: 5)
    pub count: Option<i64>,
    /// Character classes to draw from (default: all four)
    pub classes: Option<Vec<CharacterClass>>,
    /// Exclude ambiguous characters O, 0, I, l, 1 (default: true)
    pub avoid_ambiguous: Option<bool>,
    /// Require at least one character from each selected class (default: true)
    pub require_each: Option<bool>,
}

impl GenerationRequest {
    /// Fill unset fields from the configured defaults.
    pub fn to_policy(&self, config: &Config) -> RawPolicy {
        let defaults = config.default_policy();
        RawPolicy {
            length: self.length.unwrap_or(defaults.length),
            selected_classes: self
                .classes
                .as_ref()
                .map(|classes| classes.iter().copied().collect())
                .unwrap_or(defaults.selected_classes),
            avoid_ambiguous: self.avoid_ambiguous.unwrap_or(defaults.avoid_ambiguous),
            require_each_selected_class: self.require_each.unwrap_or(defaults.require_each_selected_class),
            count: self.count.unwrap_or(defaults.count),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PasswordItem {
    /// Position in the batch, starting at 1
    pub index: usize,
    pub password: String,
    /// Upper-bound entropy estimate in bits
    pub bits: f64,
    pub rating: StrengthLabel,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GenerationResponse {
    /// Whether the operation was successful
    pub success: bool,
    /// Generated passwords (empty on failure)
    pub passwords: Vec<PasswordItem>,
    /// Number of distinct characters in the pool
    pub pool_size: Option<usize>,
    /// Upper-bound entropy per password
    pub bits: Option<f64>,
    /// Exact entropy with the per-class minimum accounted for
    pub constrained_bits: Option<f64>,
    pub rating: Option<StrengthLabel>,
    /// Error message (if operation failed)
    pub error: Option<String>,
}

impl GenerationResponse {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            passwords: Vec::new(),
            pool_size: None,
            bits: None,
            constrained_bits: None,
            rating: None,
            error: Some(message.into()),
        }
    }
}

impl From<GenerationOutcome> for GenerationResponse {
    fn from(outcome: GenerationOutcome) -> Self {
        let preview = outcome.preview;
        Self {
            success: true,
            passwords: outcome
                .entries
                .into_iter()
                .map(|entry| PasswordItem {
                    index: entry.index,
                    bits: entry.report.bits,
                    rating: entry.report.rating,
                    password: entry.password.into_string(),
                })
                .collect(),
            pool_size: Some(preview.pool_size),
            bits: Some(preview.report.bits),
            constrained_bits: Some(preview.constrained_bits),
            rating: Some(preview.report.rating),
            error: None,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PreviewResponse {
    /// Whether the operation was successful
    pub success: bool,
    pub preview: Option<PolicyPreview>,
    /// Error message (if operation failed)
    pub error: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EstimateRequest {
    /// Password length
    pub length: usize,
    /// Number of distinct characters the password is drawn from
    pub pool_size: usize,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ThresholdBucket {
    pub rating: StrengthLabel,
    /// Inclusive lower bound in bits
    pub min_bits: f64,
    /// Exclusive upper bound in bits; absent for the top rating
    pub max_bits: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ThresholdsResponse {
    pub buckets: Vec<ThresholdBucket>,
}

impl From<&StrengthThresholds> for ThresholdsResponse {
    fn from(thresholds: &StrengthThresholds) -> Self {
        let buckets = StrengthLabel::ALL
            .into_iter()
            .map(|rating| {
                let (min_bits, max_bits) = thresholds.range(rating);
                ThresholdBucket {
                    rating,
                    min_bits,
                    max_bits: max_bits.is_finite().then_some(max_bits),
                }
            })
            .collect();
        Self { buckets }
    }
}
