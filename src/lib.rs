// src/lib.rs
//! Policy-driven secure password generation.
//!
//! A [`models::RawPolicy`] is validated by [`generators::resolve`] into a
//! [`generators::ResolvedPolicy`], sampled by [`generators::PasswordGenerator`]
//! from a cryptographically secure source, and rated by
//! [`generators::StrengthEstimator`]. The CLI, HTTP API and file exporters sit
//! on top of that core.

pub mod api;
pub mod cli;
pub mod core;
pub mod crypto;
pub mod exporters;
pub mod generators;
pub mod logging;
pub mod models;
pub mod utils;

pub use crate::core::{Config, PasswordService};
pub use crate::generators::{resolve, PasswordGenerator, PolicyError, ResolvedPolicy, StrengthEstimator};
pub use crate::models::{CharacterClass, EntropyReport, GeneratedPassword, RawPolicy, StrengthLabel};
