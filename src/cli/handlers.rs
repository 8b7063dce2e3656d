// src/cli/handlers.rs
use std::path::{Path, PathBuf};
use anyhow::Context;
use chrono::Local;
use crate::cli::PolicyArgs;
use crate::core::{Config, GenerationOutcome, PasswordService, PolicyPreview};
use crate::exporters::{self, ExportFormat};
use crate::utils::{entropy_summary, human_readable_bits, numbered_line, styled_rating};

// Printers shared by the commands and the interactive menu
pub fn print_outcome(outcome: &GenerationOutcome) {
    for entry in &outcome.entries {
        println!("{}", numbered_line(entry.index, entry.password.as_str()));
    }
    println!();
    print_entropy(&outcome.preview);
}

pub fn print_entropy(preview: &PolicyPreview) {
    println!("{}", entropy_summary(&preview.report, preview.pool_size));
    if preview.require_each_selected_class && preview.constrained_bits < preview.report.bits {
        println!(
            "  With one character per class guaranteed: {}",
            human_readable_bits(preview.constrained_bits)
        );
    }
}

pub fn print_preview(preview: &PolicyPreview) {
    println!("Length: {}", preview.length);
    for alphabet in &preview.alphabets {
        let chars: String = alphabet.chars().iter().collect();
        println!("  {:<7} {:>2}  {}", alphabet.class.name(), alphabet.chars().len(), chars);
    }
    print_entropy(preview);
}

/// Write a batch to `path`, or to a timestamped file in the export
/// directory when only `save` is set.
pub fn export_outcome(
    outcome: &GenerationOutcome,
    config: &Config,
    output: Option<&Path>,
    save: bool,
) -> anyhow::Result<Option<PathBuf>> {
    let path = match (output, save) {
        (Some(path), _) => path.to_path_buf(),
        (None, true) => exporters::default_export_path(&config.export_directory, ExportFormat::Text, Local::now()),
        (None, false) => return Ok(None),
    };

    exporters::export_to_file(&path, &outcome.entries)
        .with_context(|| format!("Failed to save passwords to {}", path.display()))?;
    Ok(Some(path))
}

pub fn handle_generate(
    service: &PasswordService,
    config: &Config,
    policy: &PolicyArgs,
    count: Option<i64>,
    output: Option<&Path>,
    save: bool,
) -> anyhow::Result<()> {
    let raw = policy.to_policy(config, count);
    let outcome = service.generate(&raw)?;
    print_outcome(&outcome);

    if let Some(path) = export_outcome(&outcome, config, output, save)? {
        println!("✅ Passwords saved to {}", path.display());
    }
    Ok(())
}

pub fn handle_preview(service: &PasswordService, config: &Config, policy: &PolicyArgs) -> anyhow::Result<()> {
    let preview = service.preview(&policy.to_policy(config, None))?;
    print_preview(&preview);
    Ok(())
}

pub fn handle_estimate(service: &PasswordService, length: usize, pool_size: usize) {
    let report = service.estimator().estimate(length, pool_size);
    println!(
        "{} - {} (length {}, pool size {})",
        human_readable_bits(report.bits),
        styled_rating(report.rating),
        length,
        pool_size
    );
}
