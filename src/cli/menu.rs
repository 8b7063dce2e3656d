// src/cli/menu.rs
use inquire::{Confirm, CustomType, InquireError, MultiSelect, Select, Text};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::Local;
use crate::cli::handlers::{print_outcome, print_preview};
use crate::core::{Config, GenerationOutcome, PasswordService};
use crate::exporters::{self, ExportFormat};
use crate::models::{CharacterClass, RawPolicy};

const GENERATE: &str = "🔑  Generate passwords";
const PREVIEW: &str = "📊  Preview entropy";
const SAVE: &str = "💾  Save last batch to file";
const CLEAR: &str = "🧹  Clear last batch";
const EXIT: &str = "🚪  Exit";

struct ClassChoice(CharacterClass);

impl fmt::Display for ClassChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.description())
    }
}

// Leading and trailing spaces are fine; anything else non-numeric re-prompts
fn parse_number(input: &str) -> Result<i64, ()> {
    input.trim().parse().map_err(|_| ())
}

fn prompt_number(message: &str, default: i64) -> Result<i64, InquireError> {
    CustomType::<i64>::new(message)
        .with_default(default)
        .with_parser(&parse_number)
        .with_error_message("Please type a whole number")
        .prompt()
}

/// What the menu loop does after an action returns.
#[derive(Debug, PartialEq, Eq)]
enum Step {
    Continue,
    Quit,
}

// Esc abandons the current action only; Ctrl+C inside a prompt ends the session
fn recover(result: Result<(), InquireError>) -> Result<Step, InquireError> {
    match result {
        Ok(()) => Ok(Step::Continue),
        Err(InquireError::OperationCanceled) => {
            println!("↩️  Cancelled, back to the menu.");
            Ok(Step::Continue)
        }
        Err(InquireError::OperationInterrupted) => Ok(Step::Quit),
        Err(e) => Err(e),
    }
}

// Ask for every policy field, pre-filled from the last answers
fn prompt_policy(last: &RawPolicy, ask_count: bool) -> Result<RawPolicy, InquireError> {
    let length = prompt_number("Length:", last.length)?;
    let count = if ask_count {
        prompt_number("Count:", last.count)?
    } else {
        last.count
    };

    let choices: Vec<ClassChoice> = CharacterClass::ALL.into_iter().map(ClassChoice).collect();
    let defaults: Vec<usize> = CharacterClass::ALL
        .iter()
        .enumerate()
        .filter(|(_, class)| last.selected_classes.contains(*class))
        .map(|(i, _)| i)
        .collect();
    let selected_classes: BTreeSet<CharacterClass> = MultiSelect::new("Character classes:", choices)
        .with_default(&defaults)
        .prompt()?
        .into_iter()
        .map(|choice| choice.0)
        .collect();

    let require_each_selected_class = Confirm::new("Require at least one char from each selected class?")
        .with_default(last.require_each_selected_class)
        .prompt()?;

    let avoid_ambiguous = Confirm::new("Avoid ambiguous characters (O, 0, I, l, 1)?")
        .with_default(last.avoid_ambiguous)
        .prompt()?;

    Ok(RawPolicy {
        length,
        selected_classes,
        avoid_ambiguous,
        require_each_selected_class,
        count,
    })
}

fn save_batch(outcome: &GenerationOutcome, config: &Config) -> Result<(), InquireError> {
    let suggested = exporters::default_export_path(&config.export_directory, ExportFormat::Text, Local::now());
    let suggested = suggested.display().to_string();
    let path = Text::new("Save to (.csv for CSV, otherwise text):")
        .with_default(&suggested)
        .prompt()?;

    match exporters::export_to_file(Path::new(path.trim()), &outcome.entries) {
        Ok(count) => println!("✅ {} password(s) saved to {}", count, path.trim()),
        Err(e) => println!("❌ Save error: {}", e),
    }
    Ok(())
}

pub fn run_cli_menu(service: &PasswordService, config: &Config, should_exit: Arc<AtomicBool>) -> Result<(), Box<dyn Error>> {
    println!("╔══════════════════════════════════════╗");
    println!("║        🦀 RUST PASSWORD FORGE        ║");
    println!("╚══════════════════════════════════════╝");
    println!("Tip: 'Require at least one...' ensures every selected class appears.");

    let mut policy = config.default_policy();
    let mut last_batch: Option<GenerationOutcome> = None;

    while !should_exit.load(Ordering::SeqCst) {
        let options = vec![GENERATE, PREVIEW, SAVE, CLEAR, EXIT];
        let choice = match Select::new("What would you like to do?", options).prompt() {
            Ok(choice) => choice,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e.into()),
        };

        let result = match choice {
            GENERATE => prompt_policy(&policy, true).map(|answered| {
                policy = answered;
                match service.generate(&policy) {
                    Ok(outcome) => {
                        println!();
                        print_outcome(&outcome);
                        last_batch = Some(outcome);
                    }
                    Err(e) => println!("❌ {}", e),
                }
            }),
            PREVIEW => prompt_policy(&policy, false).map(|answered| {
                policy = answered;
                match service.preview(&policy) {
                    Ok(preview) => print_preview(&preview),
                    Err(e) => println!("❌ {}", e),
                }
            }),
            SAVE => match &last_batch {
                Some(outcome) => save_batch(outcome, config),
                None => {
                    println!("❗ No passwords to save. Generate a batch first.");
                    Ok(())
                }
            },
            CLEAR => {
                last_batch = None;
                println!("🧹 Cleared.");
                Ok(())
            }
            _ => break,
        };

        if recover(result)? == Step::Quit {
            break;
        }
        println!();
    }

    log::info!("Interactive session finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_whole_numbers_only() {
        assert_eq!(parse_number(" 24 "), Ok(24));
        assert_eq!(parse_number("-3"), Ok(-3));
        assert!(parse_number("abc").is_err());
        assert!(parse_number("12.5").is_err());
        assert!(parse_number("").is_err());
    }

    #[test]
    fn escape_returns_to_menu() {
        assert_eq!(recover(Err(InquireError::OperationCanceled)).unwrap(), Step::Continue);
        assert_eq!(recover(Ok(())).unwrap(), Step::Continue);
    }

    #[test]
    fn interrupt_ends_session() {
        assert_eq!(recover(Err(InquireError::OperationInterrupted)).unwrap(), Step::Quit);
    }

    #[test]
    fn terminal_failures_still_propagate() {
        assert!(matches!(recover(Err(InquireError::NotTTY)), Err(InquireError::NotTTY)));
    }
}
