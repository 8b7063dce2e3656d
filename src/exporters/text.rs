// src/exporters/text.rs
use std::io::Write;
use crate::core::GeneratedEntry;
use crate::utils::numbered_line;
use super::Result;

/// One `NN. password` line per entry.
pub struct TextExporter;

impl TextExporter {
    pub fn new() -> Self {
        Self
    }

    pub fn write<W: Write>(&self, writer: &mut W, entries: &[GeneratedEntry]) -> Result<usize> {
        for entry in entries {
            writeln!(writer, "{}", numbered_line(entry.index, entry.password.as_str()))?;
        }
        Ok(entries.len())
    }
}
