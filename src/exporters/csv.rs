// src/exporters/csv.rs
use std::borrow::Cow;
use std::io::Write;
use crate::core::GeneratedEntry;
use super::Result;

/// Comma-separated output with an `index,password,bits,rating` header.
pub struct CsvExporter {
    delimiter: char,
    include_header: bool,
}

impl CsvExporter {
    pub fn new() -> Self {
        Self {
            delimiter: ',',
            include_header: true,
        }
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn without_header(mut self) -> Self {
        self.include_header = false;
        self
    }

    // RFC 4180: quote fields holding the delimiter, quotes or line breaks,
    // doubling any embedded quote.
    fn escape<'a>(&self, field: &'a str) -> Cow<'a, str> {
        let needs_quotes = field.contains(self.delimiter)
            || field.contains('"')
            || field.contains('\n')
            || field.contains('\r');
        if needs_quotes {
            Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
        } else {
            Cow::Borrowed(field)
        }
    }

    pub fn write<W: Write>(&self, writer: &mut W, entries: &[GeneratedEntry]) -> Result<usize> {
        let d = self.delimiter;

        if self.include_header {
            writeln!(writer, "index{d}password{d}bits{d}rating")?;
        }

        for entry in entries {
            let rating = entry.report.rating.to_string();
            writeln!(
                writer,
                "{}{d}{}{d}{:.1}{d}{}",
                entry.index,
                self.escape(entry.password.as_str()),
                entry.report.bits,
                self.escape(&rating),
            )?;
        }

        Ok(entries.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exporters::test_support::entries;

    fn render(exporter: &CsvExporter, passwords: &[&str]) -> String {
        let mut out = Vec::new();
        exporter.write(&mut out, &entries(passwords)).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn quotes_symbols_that_break_columns() {
        let text = render(&CsvExporter::new(), &["a\"b", "x,y", "safe!"]);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "index,password,bits,rating");
        assert!(lines[1].starts_with("1,\"a\"\"b\","));
        assert!(lines[2].starts_with("2,\"x,y\","));
        assert!(lines[3].starts_with("3,safe!,"));
    }

    #[test]
    fn reports_bits_and_rating() {
        // 16 chars from a pool of 89 is about 103.6 bits
        let text = render(&CsvExporter::new().without_header(), &["abcdefghijklmnop"]);
        assert_eq!(text, "1,abcdefghijklmnop,103.6,Very Strong\n");
    }

    #[test]
    fn custom_delimiter_changes_quoting() {
        let text = render(&CsvExporter::new().with_delimiter(';').without_header(), &["x,y", "p;q"]);
        let lines: Vec<_> = text.lines().collect();
        assert!(lines[0].starts_with("1;x,y;"));
        assert!(lines[1].starts_with("2;\"p;q\";"));
    }
}
