// src/exporters/mod.rs
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use chrono::{DateTime, Local};
use thiserror::Error;
use crate::core::GeneratedEntry;

pub mod csv;
pub mod text;

pub use self::csv::CsvExporter;
pub use self::text::TextExporter;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Nothing to export")]
    Empty,
}

pub type Result<T> = std::result::Result<T, ExportError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Text,
    Csv,
}

impl ExportFormat {
    /// `.csv` (any case) selects CSV; every other path gets plain text.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => ExportFormat::Csv,
            _ => ExportFormat::Text,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Text => "txt",
            ExportFormat::Csv => "csv",
        }
    }
}

/// `passwords_YYYYmmdd_HHMMSS.<ext>` inside `dir`.
pub fn default_export_path(dir: &Path, format: ExportFormat, now: DateTime<Local>) -> PathBuf {
    dir.join(format!("passwords_{}.{}", now.format("%Y%m%d_%H%M%S"), format.extension()))
}

/// Write a batch to any writer in the given format.
pub fn write_entries<W: Write>(writer: &mut W, entries: &[GeneratedEntry], format: ExportFormat) -> Result<usize> {
    match format {
        ExportFormat::Text => TextExporter::new().write(writer, entries),
        ExportFormat::Csv => CsvExporter::new().write(writer, entries),
    }
}

/// Write a batch to `path`, picking the format from its extension.
pub fn export_to_file(path: &Path, entries: &[GeneratedEntry]) -> Result<usize> {
    if entries.is_empty() {
        return Err(ExportError::Empty);
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let format = ExportFormat::from_path(path);
    let mut writer = BufWriter::new(File::create(path)?);
    let written = write_entries(&mut writer, entries, format)?;
    writer.flush()?;

    log::info!("Exported {} password(s) to {} as {:?}", written, path.display(), format);
    Ok(written)
}
