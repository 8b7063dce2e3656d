// src/generators/policy.rs
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;
use crate::models::{CharacterClass, RawPolicy, AMBIGUOUS_CHARS};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    #[error("No character class selected. Enable at least one class.")]
    NoClassSelected,

    #[error("Excluding ambiguous characters leaves no usable characters in class '{0}'")]
    AlphabetExhausted(CharacterClass),

    #[error("Length must be at least 1")]
    InvalidLength,

    #[error("Length {length} is too short to include at least one character from each of the {classes} selected classes")]
    LengthTooShortForClasses { length: usize, classes: usize },

    #[error("Count must be at least 1")]
    InvalidCount,

    #[error("Length {length} exceeds the maximum of {max}")]
    LengthAboveLimit { length: usize, max: usize },

    #[error("Count {count} exceeds the maximum of {max}")]
    CountAboveLimit { count: usize, max: usize },
}

pub type Result<T> = std::result::Result<T, PolicyError>;

/// Upper bounds applied by the presentation surfaces on top of [`resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolicyLimits {
    pub max_length: usize,
    pub max_count: usize,
}

impl Default for PolicyLimits {
    fn default() -> Self {
        Self {
            max_length: 256,
            max_count: 1000,
        }
    }
}

/// A selected class together with its effective alphabet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ClassAlphabet {
    pub class: CharacterClass,
    #[schema(value_type = String)]
    #[serde(serialize_with = "serialize_chars")]
    chars: Vec<char>,
}

impl ClassAlphabet {
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn contains(&self, c: char) -> bool {
        self.chars.contains(&c)
    }
}

fn serialize_chars<S: serde::Serializer>(chars: &[char], serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(&chars.iter().collect::<String>())
}

/// A validated policy. Only [`resolve`] can construct one, so every value
/// of this type is known to be satisfiable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPolicy {
    alphabets: Vec<ClassAlphabet>,
    pool: Vec<char>,
    length: usize,
    count: usize,
    require_each_selected_class: bool,
    avoid_ambiguous: bool,
}

impl ResolvedPolicy {
    /// Effective alphabets in fixed class order.
    pub fn alphabets(&self) -> &[ClassAlphabet] {
        &self.alphabets
    }

    /// The deduplicated union of all effective alphabets.
    pub fn pool(&self) -> &[char] {
        &self.pool
    }

    pub fn pool_size(&self) -> usize {
        self.pool.len()
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn require_each_selected_class(&self) -> bool {
        self.require_each_selected_class
    }

    pub fn avoid_ambiguous(&self) -> bool {
        self.avoid_ambiguous
    }

    pub fn classes(&self) -> impl Iterator<Item = CharacterClass> + '_ {
        self.alphabets.iter().map(|a| a.class)
    }
}

/// A class's canonical alphabet, minus ambiguous glyphs when requested.
pub fn effective_alphabet(class: CharacterClass, avoid_ambiguous: bool) -> Vec<char> {
    let excluded = if avoid_ambiguous { AMBIGUOUS_CHARS } else { "" };
    filter_alphabet(class, excluded)
}

fn filter_alphabet(class: CharacterClass, excluded: &str) -> Vec<char> {
    class.alphabet()
        .chars()
        .filter(|c| !excluded.contains(*c))
        .collect()
}

fn build_alphabets<'a>(
    classes: impl IntoIterator<Item = &'a CharacterClass>,
    excluded: &str,
) -> Result<Vec<ClassAlphabet>> {
    let mut alphabets = Vec::new();
    for &class in classes {
        let chars = filter_alphabet(class, excluded);
        if chars.is_empty() {
            return Err(PolicyError::AlphabetExhausted(class));
        }
        alphabets.push(ClassAlphabet { class, chars });
    }
    Ok(alphabets)
}

fn union_pool(alphabets: &[ClassAlphabet]) -> Vec<char> {
    let mut pool: Vec<char> = Vec::new();
    for c in alphabets.iter().flat_map(|a| a.chars.iter().copied()) {
        if !pool.contains(&c) {
            pool.push(c);
        }
    }
    pool
}

/// Validate a raw policy and materialise its character pools.
///
/// Checks run in a fixed order and the first violation is reported:
/// class selection, alphabet exhaustion, length, length versus class count,
/// then batch count.
pub fn resolve(raw: &RawPolicy) -> Result<ResolvedPolicy> {
    if raw.selected_classes.is_empty() {
        return Err(PolicyError::NoClassSelected);
    }

    let excluded = if raw.avoid_ambiguous { AMBIGUOUS_CHARS } else { "" };
    // BTreeSet iteration gives the fixed class order
    let alphabets = build_alphabets(&raw.selected_classes, excluded)?;

    if raw.length < 1 {
        return Err(PolicyError::InvalidLength);
    }
    let length = usize::try_from(raw.length).map_err(|_| PolicyError::InvalidLength)?;

    if raw.require_each_selected_class && length < alphabets.len() {
        return Err(PolicyError::LengthTooShortForClasses {
            length,
            classes: alphabets.len(),
        });
    }

    if raw.count < 1 {
        return Err(PolicyError::InvalidCount);
    }
    let count = usize::try_from(raw.count).map_err(|_| PolicyError::InvalidCount)?;

    let pool = union_pool(&alphabets);

    Ok(ResolvedPolicy {
        alphabets,
        pool,
        length,
        count,
        require_each_selected_class: raw.require_each_selected_class,
        avoid_ambiguous: raw.avoid_ambiguous,
    })
}

/// [`resolve`], then enforce the configured upper bounds.
pub fn resolve_with_limits(raw: &RawPolicy, limits: &PolicyLimits) -> Result<ResolvedPolicy> {
    let resolved = resolve(raw)?;

    if resolved.length > limits.max_length {
        return Err(PolicyError::LengthAboveLimit {
            length: resolved.length,
            max: limits.max_length,
        });
    }
    if resolved.count > limits.max_count {
        return Err(PolicyError::CountAboveLimit {
            count: resolved.count,
            max: limits.max_count,
        });
    }

    Ok(resolved)
}
