// src/core/mod.rs
pub mod config;
pub mod service;

pub use config::Config;
pub use service::{GeneratedEntry, GenerationOutcome, PasswordService, PolicyPreview};
