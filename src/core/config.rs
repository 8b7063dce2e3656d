// src/core/config.rs
use std::collections::BTreeSet;
use std::env;
use std::path::PathBuf;
use log::LevelFilter;
use crate::generators::{PolicyLimits, StrengthThresholds};
use crate::models::{CharacterClass, RawPolicy};

// Configuration for the generator and its front ends
#[derive(Debug, Clone)]
pub struct Config {
    // Password Generation
    pub default_password_length: usize,
    pub default_password_count: usize,
    pub default_avoid_ambiguous: bool,
    pub default_require_each_class: bool,
    pub default_classes: BTreeSet<CharacterClass>,
    pub limits: PolicyLimits,
    pub generator_workers: usize,

    // Strength Rating
    pub strength_thresholds: StrengthThresholds,

    // Export
    pub export_directory: PathBuf,

    // Web Interface
    pub web_port: u16,
    pub web_address: String,

    // Logging
    pub log_level: LevelFilter,
    pub log_file: PathBuf,

    // Problems found while loading; logged once the logger is up
    pub warnings: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            // Password Generation
            default_password_length: 16,
            default_password_count: 5,
            default_avoid_ambiguous: true,
            default_require_each_class: true,
            default_classes: CharacterClass::ALL.into_iter().collect(),
            limits: PolicyLimits::default(),
            generator_workers: 1,

            // Strength Rating
            strength_thresholds: StrengthThresholds::default(),

            // Export
            export_directory: PathBuf::from("."),

            // Web Interface
            web_port: 5000,
            web_address: "127.0.0.1".to_string(),

            // Logging
            log_level: LevelFilter::Info,
            log_file: PathBuf::from("./logs/passgen.log"),

            warnings: Vec::new(),
        }
    }
}

// Reads settings by name and records the ones it had to ignore
struct Source<F> {
    lookup: F,
    warnings: Vec<String>,
}

impl<F: Fn(&str) -> Option<String>> Source<F> {
    fn raw(&self, name: &str) -> Option<String> {
        (self.lookup)(name)
    }

    fn parse<T: std::str::FromStr>(&mut self, name: &str) -> Option<T> {
        let val = self.raw(name)?;
        match val.trim().parse() {
            Ok(parsed) => Some(parsed),
            Err(_) => {
                self.warnings.push(format!("Ignoring invalid value '{}' for {}", val, name));
                None
            }
        }
    }
}

/// Parse a comma-separated class list such as `lower,digit`.
pub fn parse_classes(list: &str) -> Result<BTreeSet<CharacterClass>, crate::models::UnknownClassError> {
    list.split(',')
        .filter(|s| !s.trim().is_empty())
        .map(str::parse)
        .collect()
}

impl Config {
    // Load configuration from environment variables
    pub fn load() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a configuration from any name → value lookup. Values that do
    /// not parse are skipped and described in `warnings`.
    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Self {
        let mut config = Config::default();
        let mut source = Source { lookup, warnings: Vec::new() };

        // Password Generation
        if let Some(length) = source.parse("DEFAULT_PASSWORD_LENGTH") {
            config.default_password_length = length;
        }

        if let Some(count) = source.parse("DEFAULT_PASSWORD_COUNT") {
            config.default_password_count = count;
        }

        if let Some(avoid) = source.parse("DEFAULT_AVOID_AMBIGUOUS") {
            config.default_avoid_ambiguous = avoid;
        }

        if let Some(require) = source.parse("DEFAULT_REQUIRE_EACH_CLASS") {
            config.default_require_each_class = require;
        }

        if let Some(list) = source.raw("DEFAULT_CLASSES") {
            match parse_classes(&list) {
                Ok(classes) => config.default_classes = classes,
                Err(e) => source.warnings.push(format!("Ignoring DEFAULT_CLASSES: {}", e)),
            }
        }

        if let Some(max) = source.parse("MAX_PASSWORD_LENGTH") {
            config.limits.max_length = max;
        }

        if let Some(max) = source.parse("MAX_PASSWORD_COUNT") {
            config.limits.max_count = max;
        }

        if let Some(workers) = source.parse::<usize>("GENERATOR_WORKERS") {
            config.generator_workers = workers.max(1);
        }

        // Strength Rating
        let defaults = StrengthThresholds::default();
        let weak = source.parse("STRENGTH_WEAK_BITS");
        let reasonable = source.parse("STRENGTH_REASONABLE_BITS");
        let strong = source.parse("STRENGTH_STRONG_BITS");
        let very_strong = source.parse("STRENGTH_VERY_STRONG_BITS");
        if weak.is_some() || reasonable.is_some() || strong.is_some() || very_strong.is_some() {
            use crate::models::StrengthLabel::*;
            match StrengthThresholds::new(
                weak.unwrap_or(defaults.lower_bound(Weak)),
                reasonable.unwrap_or(defaults.lower_bound(Reasonable)),
                strong.unwrap_or(defaults.lower_bound(Strong)),
                very_strong.unwrap_or(defaults.lower_bound(VeryStrong)),
            ) {
                Ok(thresholds) => config.strength_thresholds = thresholds,
                Err(e) => source
                    .warnings
                    .push(format!("Invalid strength thresholds, using defaults: {}", e)),
            }
        }

        // Export
        if let Some(dir) = source.raw("EXPORT_DIRECTORY") {
            config.export_directory = PathBuf::from(dir);
        }

        // Web Interface
        if let Some(port) = source.parse("WEB_PORT") {
            config.web_port = port;
        }

        if let Some(address) = source.raw("WEB_ADDRESS") {
            config.web_address = address;
        }

        // Logging
        if let Some(level) = source.raw("LOG_LEVEL") {
            match level.to_lowercase().as_str() {
                "off" => config.log_level = LevelFilter::Off,
                "error" => config.log_level = LevelFilter::Error,
                "warn" => config.log_level = LevelFilter::Warn,
                "info" => config.log_level = LevelFilter::Info,
                "debug" => config.log_level = LevelFilter::Debug,
                "trace" => config.log_level = LevelFilter::Trace,
                _ => source.warnings.push(format!("Ignoring invalid value '{}' for LOG_LEVEL", level)),
            }
        }

        if let Some(file) = source.raw("LOG_FILE") {
            config.log_file = PathBuf::from(file);
        }

        config.warnings = source.warnings;
        config
    }

    /// A raw policy filled with the configured defaults.
    pub fn default_policy(&self) -> RawPolicy {
        RawPolicy {
            length: self.default_password_length as i64,
            selected_classes: self.default_classes.clone(),
            avoid_ambiguous: self.default_avoid_ambiguous,
            require_each_selected_class: self.default_require_each_class,
            count: self.default_password_count as i64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StrengthLabel;
    use std::collections::HashMap;

    #[test]
    fn defaults_match_generator_form() {
        let config = Config::default();
        let policy = config.default_policy();
        assert_eq!(policy.length, 16);
        assert_eq!(policy.count, 5);
        assert!(policy.avoid_ambiguous);
        assert!(policy.require_each_selected_class);
        assert_eq!(policy.selected_classes.len(), 4);
        assert_eq!(config.limits, PolicyLimits { max_length: 256, max_count: 1000 });
    }

    #[test]
    fn parses_class_lists() {
        let classes = parse_classes("lower, digits,,symbol").unwrap();
        assert_eq!(
            classes.into_iter().collect::<Vec<_>>(),
            vec![CharacterClass::Lower, CharacterClass::Digit, CharacterClass::Symbol]
        );
        assert!(parse_classes("lower,greek").is_err());
        assert!(parse_classes("").unwrap().is_empty());
    }

    fn load_from(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let config = load_from(&[]);
        assert_eq!(config.default_policy(), Config::default().default_policy());
        assert_eq!(config.strength_thresholds, StrengthThresholds::default());
        assert!(config.warnings.is_empty());
    }

    #[test]
    fn invalid_values_are_ignored_with_a_warning() {
        let config = load_from(&[
            ("DEFAULT_PASSWORD_LENGTH", "twenty"),
            ("WEB_PORT", "notaport"),
            ("DEFAULT_CLASSES", "lower,greek"),
            ("DEFAULT_PASSWORD_COUNT", " 7 "),
        ]);
        assert_eq!(config.default_password_length, 16);
        assert_eq!(config.web_port, 5000);
        assert_eq!(config.default_classes.len(), 4);
        assert_eq!(config.default_password_count, 7);

        assert_eq!(config.warnings.len(), 3);
        assert!(config.warnings.iter().any(|w| w.contains("'twenty' for DEFAULT_PASSWORD_LENGTH")));
        assert!(config.warnings.iter().any(|w| w.contains("WEB_PORT")));
        assert!(config.warnings.iter().any(|w| w.contains("DEFAULT_CLASSES")));
    }

    #[test]
    fn partial_threshold_override_merges_with_defaults() {
        let config = load_from(&[("STRENGTH_STRONG_BITS", "64")]);
        let defaults = StrengthThresholds::default();
        let thresholds = &config.strength_thresholds;

        assert_eq!(thresholds.lower_bound(StrengthLabel::Strong), 64.0);
        for label in [StrengthLabel::Weak, StrengthLabel::Reasonable, StrengthLabel::VeryStrong] {
            assert_eq!(thresholds.lower_bound(label), defaults.lower_bound(label));
        }
        assert!(config.warnings.is_empty());
    }

    #[test]
    fn out_of_order_thresholds_fall_back_to_defaults() {
        let config = load_from(&[("STRENGTH_WEAK_BITS", "50"), ("STRENGTH_REASONABLE_BITS", "40")]);
        assert_eq!(config.strength_thresholds, StrengthThresholds::default());
        assert_eq!(config.warnings.len(), 1);
        assert!(config.warnings[0].starts_with("Invalid strength thresholds"));
    }

    #[test]
    fn unparsable_threshold_is_reported() {
        let config = load_from(&[("STRENGTH_WEAK_BITS", "abc")]);
        assert_eq!(config.strength_thresholds, StrengthThresholds::default());
        assert!(config.warnings[0].contains("STRENGTH_WEAK_BITS"));
    }

    #[test]
    fn zero_workers_clamped_to_one() {
        assert_eq!(load_from(&[("GENERATOR_WORKERS", "0")]).generator_workers, 1);
        assert_eq!(load_from(&[("GENERATOR_WORKERS", "4")]).generator_workers, 4);
    }

    #[test]
    fn limits_and_flags_from_environment() {
        let config = load_from(&[
            ("MAX_PASSWORD_LENGTH", "64"),
            ("MAX_PASSWORD_COUNT", "10"),
            ("DEFAULT_AVOID_AMBIGUOUS", "false"),
            ("LOG_LEVEL", "DEBUG"),
        ]);
        assert_eq!(config.limits, PolicyLimits { max_length: 64, max_count: 10 });
        assert!(!config.default_avoid_ambiguous);
        assert_eq!(config.log_level, LevelFilter::Debug);
    }
}
