// src/cli/commands.rs
use std::path::PathBuf;
use clap::{Args as ClapArgs, Subcommand};
use crate::core::Config;
use crate::models::{CharacterClass, RawPolicy};

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Generate one or more passwords
    Generate {
        #[command(flatten)]
        policy: PolicyArgs,

        /// Number of passwords to generate
        #[arg(long, short, allow_negative_numbers = true)]
        count: Option<i64>,

        /// Save the batch to a file (.csv for CSV, anything else for text)
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Save the batch under a timestamped name in the export directory
        #[arg(long, conflicts_with = "output")]
        save: bool,

        /// Worker threads to spread the batch over
        #[arg(long)]
        workers: Option<usize>,
    },

    /// Show the pool and entropy a policy implies, without generating
    Preview {
        #[command(flatten)]
        policy: PolicyArgs,
    },

    /// Estimate entropy for a length and pool size
    Estimate {
        /// Password length
        #[arg(long, short)]
        length: usize,

        /// Number of distinct characters the password is drawn from
        #[arg(long, short)]
        pool_size: usize,
    },

    /// Run the interactive generator
    Interactive,
}

/// Policy flags shared by `generate` and `preview`. Unset flags fall back
/// to the configured defaults.
#[derive(ClapArgs, Debug, Default, Clone)]
pub struct PolicyArgs {
    /// Password length
    #[arg(long, short, allow_negative_numbers = true)]
    pub length: Option<i64>,

    /// Comma-separated character classes: lower, upper, digit, symbol
    #[arg(long, value_delimiter = ',')]
    pub classes: Option<Vec<CharacterClass>>,

    /// Exclude ambiguous characters (O, 0, I, l, 1)
    #[arg(long, overrides_with = "allow_ambiguous")]
    pub avoid_ambiguous: bool,

    /// Keep ambiguous characters in the pool
    #[arg(long, overrides_with = "avoid_ambiguous")]
    pub allow_ambiguous: bool,

    /// Require at least one character from each selected class
    #[arg(long, overrides_with = "no_require_each")]
    pub require_each: bool,

    /// Do not require every selected class to appear
    #[arg(long, overrides_with = "require_each")]
    pub no_require_each: bool,
}

impl PolicyArgs {
    pub fn to_policy(&self, config: &Config, count: Option<i64>) -> RawPolicy {
        let defaults = config.default_policy();

        let avoid_ambiguous = if self.avoid_ambiguous {
            true
        } else if self.allow_ambiguous {
            false
        } else {
            defaults.avoid_ambiguous
        };

        let require_each_selected_class = if self.require_each {
            true
        } else if self.no_require_each {
            false
        } else {
            defaults.require_each_selected_class
        };

        RawPolicy {
            length: self.length.unwrap_or(defaults.length),
            selected_classes: self
                .classes
                .as_ref()
                .map(|classes| classes.iter().copied().collect())
                .unwrap_or(defaults.selected_classes),
            avoid_ambiguous,
            require_each_selected_class,
            count: count.unwrap_or(defaults.count),
        }
    }
}
