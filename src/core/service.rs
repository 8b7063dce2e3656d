// src/core/service.rs
use serde::Serialize;
use utoipa::ToSchema;
use crate::core::config::Config;
use crate::generators::{
    policy::ClassAlphabet, resolve_with_limits, PasswordGenerator, PolicyError, PolicyLimits,
    ResolvedPolicy, StrengthEstimator,
};
use crate::models::{EntropyReport, GeneratedPassword, RawPolicy};

/// One password of a batch with its 1-based position and strength.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GeneratedEntry {
    pub index: usize,
    pub password: GeneratedPassword,
    pub report: EntropyReport,
}

/// Pool shape and entropy of a policy, without any password drawn.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PolicyPreview {
    pub length: usize,
    pub pool_size: usize,
    pub avoid_ambiguous: bool,
    pub require_each_selected_class: bool,
    pub alphabets: Vec<ClassAlphabet>,
    /// Upper-bound estimate used for the rating
    pub report: EntropyReport,
    /// Exact entropy once the per-class minimum is accounted for
    pub constrained_bits: f64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GenerationOutcome {
    pub preview: PolicyPreview,
    pub entries: Vec<GeneratedEntry>,
}

impl GenerationOutcome {
    pub fn passwords(&self) -> impl Iterator<Item = &GeneratedPassword> {
        self.entries.iter().map(|e| &e.password)
    }
}

/// Ties the resolver, sampler and estimator together for the front ends.
///
/// Holds only configuration, so one instance can be shared across threads
/// and requests.
#[derive(Debug, Clone)]
pub struct PasswordService {
    generator: PasswordGenerator,
    estimator: StrengthEstimator,
    limits: PolicyLimits,
    workers: usize,
}

impl PasswordService {
    pub fn new(config: &Config) -> Self {
        Self {
            generator: PasswordGenerator::new(),
            estimator: StrengthEstimator::new(config.strength_thresholds),
            limits: config.limits,
            workers: config.generator_workers,
        }
    }

    pub fn estimator(&self) -> &StrengthEstimator {
        &self.estimator
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    fn describe(&self, policy: &ResolvedPolicy) -> PolicyPreview {
        PolicyPreview {
            length: policy.length(),
            pool_size: policy.pool_size(),
            avoid_ambiguous: policy.avoid_ambiguous(),
            require_each_selected_class: policy.require_each_selected_class(),
            alphabets: policy.alphabets().to_vec(),
            report: self.estimator.estimate_policy(policy),
            constrained_bits: self.estimator.constrained_bits(policy),
        }
    }

    /// Resolve a policy and report its entropy. The batch count has no
    /// bearing on entropy, so any count is accepted here.
    pub fn preview(&self, raw: &RawPolicy) -> Result<PolicyPreview, PolicyError> {
        let max_count = i64::try_from(self.limits.max_count).unwrap_or(i64::MAX).max(1);
        let raw = RawPolicy {
            count: raw.count.clamp(1, max_count),
            ..raw.clone()
        };
        let policy = resolve_with_limits(&raw, &self.limits)?;
        Ok(self.describe(&policy))
    }

    /// Resolve, generate `count` passwords and rate them.
    pub fn generate(&self, raw: &RawPolicy) -> Result<GenerationOutcome, PolicyError> {
        let policy = resolve_with_limits(raw, &self.limits).map_err(|e| {
            log::info!("Rejected generation policy: {}", e);
            e
        })?;

        let preview = self.describe(&policy);
        log::info!(
            "Generating {} password(s): length {}, pool {}, {:.1} bits ({})",
            policy.count(),
            policy.length(),
            policy.pool_size(),
            preview.report.bits,
            preview.report.rating
        );

        let passwords = self.generator.generate_parallel(&policy, policy.count(), self.workers);
        let entries = passwords
            .into_iter()
            .enumerate()
            .map(|(i, password)| GeneratedEntry {
                index: i + 1,
                report: self.estimator.estimate(password.len(), policy.pool_size()),
                password,
            })
            .collect();

        Ok(GenerationOutcome { preview, entries })
    }
}
