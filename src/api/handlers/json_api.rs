// src/api/handlers/json_api.rs
use std::error::Error;
use std::io::Read;
use serde_json::{json, Value};
use crate::api::types::{GenerationRequest, GenerationResponse, PreviewResponse};
use crate::cli::CliCommand;
use crate::core::{Config, PasswordService};

fn parse_request(input: &str) -> Result<GenerationRequest, serde_json::Error> {
    if input.trim().is_empty() {
        return Ok(GenerationRequest::default());
    }
    serde_json::from_str(input)
}

/// Build the JSON reply for one command. `input` is the request body read
/// from stdin; empty input means "all defaults".
pub fn respond(command: Option<&CliCommand>, input: &str, config: &Config, service: &PasswordService) -> Value {
    match command {
        None | Some(CliCommand::Generate { .. }) => match parse_request(input) {
            Ok(request) => match service.generate(&request.to_policy(config)) {
                Ok(outcome) => json!(GenerationResponse::from(outcome)),
                Err(e) => json!(GenerationResponse::error(e.to_string())),
            },
            Err(e) => json!(GenerationResponse::error(format!("Invalid JSON request: {}", e))),
        },

        Some(CliCommand::Preview { .. }) => {
            let response = match parse_request(input) {
                Ok(request) => match service.preview(&request.to_policy(config)) {
                    Ok(preview) => PreviewResponse { success: true, preview: Some(preview), error: None },
                    Err(e) => PreviewResponse { success: false, preview: None, error: Some(e.to_string()) },
                },
                Err(e) => PreviewResponse {
                    success: false,
                    preview: None,
                    error: Some(format!("Invalid JSON request: {}", e)),
                },
            };
            json!(response)
        }

        Some(CliCommand::Estimate { length, pool_size }) => {
            let report = service.estimator().estimate(*length, *pool_size);
            json!({
                "success": true,
                "bits": report.bits,
                "rating": report.rating,
            })
        }

        Some(CliCommand::Interactive) => json!({
            "success": false,
            "error": "Interactive mode is not available with --json",
        }),
    }
}

/// Handle JSON API requests from CLI
///
/// Reads the request body from stdin, runs the command and prints a single
/// JSON object. Returns whether the command succeeded.
pub fn handle_json_api(command: Option<&CliCommand>, config: &Config, service: &PasswordService) -> Result<bool, Box<dyn Error>> {
    let mut input = String::new();
    if !matches!(command, Some(CliCommand::Estimate { .. }) | Some(CliCommand::Interactive)) {
        std::io::stdin().read_to_string(&mut input)?;
    }

    let response = respond(command, &input, config, service);
    println!("{}", response);

    Ok(response["success"].as_bool().unwrap_or(false))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(command: Option<&CliCommand>, input: &str) -> Value {
        let config = Config::default();
        respond(command, input, &config, &PasswordService::new(&config))
    }

    #[test]
    fn empty_input_uses_defaults() {
        let response = run(None, "");
        assert_eq!(response["success"], true);
        assert_eq!(response["passwords"].as_array().unwrap().len(), 5);
        assert_eq!(response["pool_size"], 89);
    }

    #[test]
    fn reports_policy_errors() {
        let response = run(None, r#"{"classes": []}"#);
        assert_eq!(response["success"], false);
        assert!(response["error"].as_str().unwrap().contains("No character class"));
    }

    #[test]
    fn reports_malformed_json() {
        let response = run(None, "{length: 3");
        assert_eq!(response["success"], false);
        assert!(response["error"].as_str().unwrap().starts_with("Invalid JSON request"));
    }

    #[test]
    fn estimate_ignores_input() {
        let command = CliCommand::Estimate { length: 16, pool_size: 26 };
        let response = run(Some(&command), "");
        assert_eq!(response["rating"], "Strong");
    }
}
