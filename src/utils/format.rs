// src/utils/format.rs
use console::style;
use crate::models::{EntropyReport, StrengthLabel};

// Format an entropy figure for display
pub fn human_readable_bits(bits: f64) -> String {
    format!("{:.1} bits", bits)
}

// "01. password" as shown in lists and text exports
pub fn numbered_line(index: usize, password: &str) -> String {
    format!("{:02}. {}", index, password)
}

// One-line entropy summary, e.g. "Entropy: 103.6 bits - Very Strong (Charset size: 89)"
pub fn entropy_summary(report: &EntropyReport, pool_size: usize) -> String {
    format!(
        "Entropy: {} - {} (Charset size: {})",
        human_readable_bits(report.bits),
        styled_rating(report.rating),
        pool_size
    )
}

// Colour a rating for terminal output
pub fn styled_rating(rating: StrengthLabel) -> String {
    let text = rating.to_string();
    match rating {
        StrengthLabel::VeryWeak => style(text).red().bold().to_string(),
        StrengthLabel::Weak => style(text).red().to_string(),
        StrengthLabel::Reasonable => style(text).yellow().to_string(),
        StrengthLabel::Strong => style(text).green().to_string(),
        StrengthLabel::VeryStrong => style(text).green().bold().to_string(),
    }
}
