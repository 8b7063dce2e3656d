// src/api/handlers/mod.rs
pub mod generator;
pub mod json_api;
pub use json_api::handle_json_api;
