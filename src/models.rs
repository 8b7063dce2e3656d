// src/models.rs
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Glyphs that are easily confused with one another when displayed.
pub const AMBIGUOUS_CHARS: &str = "O0Il1";

pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const DIGITS: &str = "0123456789";
pub const SYMBOLS: &str = "!@#$%^&*()-_=+[{]}\\|;:'\",<.>/?`~";

/// A named category of characters with a fixed canonical alphabet.
///
/// The derived ordering is the order classes are concatenated into the
/// union pool, so it must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CharacterClass {
    Lower,
    Upper,
    Digit,
    Symbol,
}

impl CharacterClass {
    pub const ALL: [CharacterClass; 4] = [
        CharacterClass::Lower,
        CharacterClass::Upper,
        CharacterClass::Digit,
        CharacterClass::Symbol,
    ];

    pub fn alphabet(self) -> &'static str {
        match self {
            CharacterClass::Lower => LOWERCASE,
            CharacterClass::Upper => UPPERCASE,
            CharacterClass::Digit => DIGITS,
            CharacterClass::Symbol => SYMBOLS,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CharacterClass::Lower => "lower",
            CharacterClass::Upper => "upper",
            CharacterClass::Digit => "digit",
            CharacterClass::Symbol => "symbol",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            CharacterClass::Lower => "Lowercase (a-z)",
            CharacterClass::Upper => "Uppercase (A-Z)",
            CharacterClass::Digit => "Digits (0-9)",
            CharacterClass::Symbol => "Symbols (!@#$...)",
        }
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown character class '{0}' (expected lower, upper, digit or symbol)")]
pub struct UnknownClassError(pub String);

impl FromStr for CharacterClass {
    type Err = UnknownClassError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lower" | "lowercase" => Ok(CharacterClass::Lower),
            "upper" | "uppercase" => Ok(CharacterClass::Upper),
            "digit" | "digits" | "number" | "numbers" => Ok(CharacterClass::Digit),
            "symbol" | "symbols" => Ok(CharacterClass::Symbol),
            other => Err(UnknownClassError(other.to_string())),
        }
    }
}

/// User-declared generation policy, before validation.
///
/// Length and count are signed so that zero or negative input is reported
/// by the resolver instead of being lost in parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPolicy {
    pub length: i64,
    pub selected_classes: BTreeSet<CharacterClass>,
    pub avoid_ambiguous: bool,
    pub require_each_selected_class: bool,
    pub count: i64,
}

impl Default for RawPolicy {
    fn default() -> Self {
        Self {
            length: 16,
            selected_classes: CharacterClass::ALL.into_iter().collect(),
            avoid_ambiguous: true,
            require_each_selected_class: true,
            count: 1,
        }
    }
}

/// A single password produced by the sampler. Owned by the caller.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct GeneratedPassword(String);

impl GeneratedPassword {
    pub(crate) fn from_chars(chars: Vec<char>) -> Self {
        GeneratedPassword(chars.into_iter().collect())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in characters, not bytes.
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for GeneratedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Keep secrets out of debug output and logs
impl fmt::Debug for GeneratedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GeneratedPassword(<{} chars>)", self.len())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
pub enum StrengthLabel {
    VeryWeak,
    Weak,
    Reasonable,
    Strong,
    VeryStrong,
}

impl StrengthLabel {
    pub const ALL: [StrengthLabel; 5] = [
        StrengthLabel::VeryWeak,
        StrengthLabel::Weak,
        StrengthLabel::Reasonable,
        StrengthLabel::Strong,
        StrengthLabel::VeryStrong,
    ];
}

impl fmt::Display for StrengthLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrengthLabel::VeryWeak => write!(f, "Very Weak"),
            StrengthLabel::Weak => write!(f, "Weak"),
            StrengthLabel::Reasonable => write!(f, "Reasonable"),
            StrengthLabel::Strong => write!(f, "Strong"),
            StrengthLabel::VeryStrong => write!(f, "Very Strong"),
        }
    }
}

/// Entropy estimate and its qualitative rating.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EntropyReport {
    pub bits: f64,
    pub rating: StrengthLabel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_order_matches_pool_order() {
        let mut shuffled = vec![
            CharacterClass::Symbol,
            CharacterClass::Lower,
            CharacterClass::Digit,
            CharacterClass::Upper,
        ];
        shuffled.sort();
        assert_eq!(shuffled, CharacterClass::ALL.to_vec());
    }

    #[test]
    fn class_alphabets_are_disjoint() {
        for (i, a) in CharacterClass::ALL.iter().enumerate() {
            for b in CharacterClass::ALL.iter().skip(i + 1) {
                assert!(
                    !a.alphabet().chars().any(|c| b.alphabet().contains(c)),
                    "{} and {} overlap", a, b
                );
            }
        }
    }

    #[test]
    fn symbols_are_printable_and_unique() {
        let mut seen = std::collections::HashSet::new();
        for c in SYMBOLS.chars() {
            assert!(c.is_ascii_punctuation(), "{:?} is not punctuation", c);
            assert!(seen.insert(c), "{:?} repeated", c);
        }
        assert_eq!(seen.len(), 32);
    }

    #[test]
    fn parses_class_names() {
        assert_eq!("Digits".parse::<CharacterClass>(), Ok(CharacterClass::Digit));
        assert_eq!(" upper ".parse::<CharacterClass>(), Ok(CharacterClass::Upper));
        assert!("emoji".parse::<CharacterClass>().is_err());
    }

    #[test]
    fn password_debug_hides_content() {
        let pw = GeneratedPassword::from_chars("hunter2".chars().collect());
        let shown = format!("{:?}", pw);
        assert!(!shown.contains("hunter2"));
        assert_eq!(pw.len(), 7);
    }

    #[test]
    fn labels_are_ordered() {
        assert!(StrengthLabel::VeryWeak < StrengthLabel::Weak);
        assert!(StrengthLabel::Strong < StrengthLabel::VeryStrong);
        assert_eq!(StrengthLabel::VeryStrong.to_string(), "Very Strong");
    }
}
