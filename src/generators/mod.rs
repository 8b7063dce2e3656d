// src/generators/mod.rs
pub mod password;
pub mod policy;
pub mod strength;

pub use password::PasswordGenerator;
pub use policy::{resolve, resolve_with_limits, PolicyError, PolicyLimits, ResolvedPolicy};
pub use strength::{entropy_bits, StrengthEstimator, StrengthThresholds, ThresholdError};
