// src/generators/strength.rs
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;
use crate::generators::policy::ResolvedPolicy;
use crate::models::{EntropyReport, StrengthLabel};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ThresholdError {
    #[error("Threshold for {0} must be a finite, non-negative number of bits")]
    NotFinite(StrengthLabel),

    #[error("Thresholds must be strictly ascending: {lower} bits ({lower_label}) is not below {upper} bits ({upper_label})")]
    NotAscending {
        lower_label: StrengthLabel,
        lower: f64,
        upper_label: StrengthLabel,
        upper: f64,
    },
}

/// Lower bounds, in bits, of every rating above `VeryWeak`.
///
/// Each label covers the half-open range from its own bound up to the next
/// one, so the five buckets tile `[0, inf)` with no gaps or overlaps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct StrengthThresholds {
    weak: f64,
    reasonable: f64,
    strong: f64,
    very_strong: f64,
}

impl Default for StrengthThresholds {
    fn default() -> Self {
        Self {
            weak: 28.0,
            reasonable: 36.0,
            strong: 60.0,
            very_strong: 80.0,
        }
    }
}

impl StrengthThresholds {
    pub fn new(weak: f64, reasonable: f64, strong: f64, very_strong: f64) -> Result<Self, ThresholdError> {
        let cuts = [
            (StrengthLabel::Weak, weak),
            (StrengthLabel::Reasonable, reasonable),
            (StrengthLabel::Strong, strong),
            (StrengthLabel::VeryStrong, very_strong),
        ];

        for (label, bits) in cuts {
            if !bits.is_finite() || bits < 0.0 {
                return Err(ThresholdError::NotFinite(label));
            }
        }
        for pair in cuts.windows(2) {
            let (lower_label, lower) = pair[0];
            let (upper_label, upper) = pair[1];
            if lower >= upper {
                return Err(ThresholdError::NotAscending { lower_label, lower, upper_label, upper });
            }
        }

        Ok(Self { weak, reasonable, strong, very_strong })
    }

    /// Lower bound of `label`'s bucket. `VeryWeak` starts at zero.
    pub fn lower_bound(&self, label: StrengthLabel) -> f64 {
        match label {
            StrengthLabel::VeryWeak => 0.0,
            StrengthLabel::Weak => self.weak,
            StrengthLabel::Reasonable => self.reasonable,
            StrengthLabel::Strong => self.strong,
            StrengthLabel::VeryStrong => self.very_strong,
        }
    }

    /// Half-open `[lower, upper)` range covered by `label`.
    pub fn range(&self, label: StrengthLabel) -> (f64, f64) {
        let upper = match label {
            StrengthLabel::VeryWeak => self.weak,
            StrengthLabel::Weak => self.reasonable,
            StrengthLabel::Reasonable => self.strong,
            StrengthLabel::Strong => self.very_strong,
            StrengthLabel::VeryStrong => f64::INFINITY,
        };
        (self.lower_bound(label), upper)
    }

    pub fn rate(&self, bits: f64) -> StrengthLabel {
        if bits < self.weak {
            StrengthLabel::VeryWeak
        } else if bits < self.reasonable {
            StrengthLabel::Weak
        } else if bits < self.strong {
            StrengthLabel::Reasonable
        } else if bits < self.very_strong {
            StrengthLabel::Strong
        } else {
            StrengthLabel::VeryStrong
        }
    }
}

/// `length * log2(pool_size)`, or zero when either is zero.
///
/// This assumes independent uniform draws over the whole pool and is an
/// upper bound when a per-class minimum is enforced.
pub fn entropy_bits(length: usize, pool_size: usize) -> f64 {
    if length == 0 || pool_size == 0 {
        return 0.0;
    }
    length as f64 * (pool_size as f64).log2()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StrengthEstimator {
    thresholds: StrengthThresholds,
}

impl StrengthEstimator {
    pub fn new(thresholds: StrengthThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &StrengthThresholds {
        &self.thresholds
    }

    pub fn estimate(&self, length: usize, pool_size: usize) -> EntropyReport {
        let bits = entropy_bits(length, pool_size);
        EntropyReport {
            bits,
            rating: self.thresholds.rate(bits),
        }
    }

    pub fn estimate_policy(&self, policy: &ResolvedPolicy) -> EntropyReport {
        self.estimate(policy.length(), policy.pool_size())
    }

    /// Exact entropy of the space a policy actually samples from.
    ///
    /// Without a per-class minimum this equals the upper bound. With one, the
    /// number of strings containing every selected class is counted by
    /// inclusion-exclusion over the excluded classes:
    /// `sum_{S} (-1)^|S| (N - |S's chars|)^L`. Terms are divided by `N^L`
    /// so they stay within f64 range for long passwords.
    pub fn constrained_bits(&self, policy: &ResolvedPolicy) -> f64 {
        let upper = entropy_bits(policy.length(), policy.pool_size());
        if !policy.require_each_selected_class() || upper == 0.0 {
            return upper;
        }

        let n = policy.pool_size() as f64;
        let length = policy.length() as f64;
        let sizes: Vec<f64> = policy.alphabets().iter().map(|a| a.chars().len() as f64).collect();

        let mut fraction = 0.0;
        for subset in 0u32..(1 << sizes.len()) {
            let removed: f64 = sizes
                .iter()
                .enumerate()
                .filter(|(i, _)| subset & (1 << *i) != 0)
                .map(|(_, size)| size)
                .sum();
            let term = ((n - removed).max(0.0) / n).powf(length);
            if subset.count_ones() % 2 == 0 {
                fraction += term;
            } else {
                fraction -= term;
            }
        }

        if fraction <= 0.0 {
            return 0.0;
        }
        upper + fraction.log2()
    }
}
