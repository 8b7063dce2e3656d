use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// Every setting the binary reads, so the caller's shell cannot leak in
const CONFIG_VARS: &[&str] = &[
    "RUST_LOG",
    "LOG_LEVEL",
    "DEFAULT_PASSWORD_LENGTH",
    "DEFAULT_PASSWORD_COUNT",
    "DEFAULT_AVOID_AMBIGUOUS",
    "DEFAULT_REQUIRE_EACH_CLASS",
    "DEFAULT_CLASSES",
    "MAX_PASSWORD_LENGTH",
    "MAX_PASSWORD_COUNT",
    "GENERATOR_WORKERS",
    "STRENGTH_WEAK_BITS",
    "STRENGTH_REASONABLE_BITS",
    "STRENGTH_STRONG_BITS",
    "STRENGTH_VERY_STRONG_BITS",
    "WEB_ADDRESS",
    "WEB_PORT",
];

/// Runs the binary inside a scratch directory with logging and exports
/// pointed at it.
pub struct TestEnv {
    tmp: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            tmp: TempDir::new().expect("create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.tmp.path()
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.tmp.path().join(name)
    }

    pub fn log_file(&self) -> PathBuf {
        self.file("logs/passgen.log")
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("rust_passgen").expect("binary built");
        for var in CONFIG_VARS {
            cmd.env_remove(var);
        }
        cmd.current_dir(self.path())
            .env("LOG_FILE", self.log_file())
            .env("EXPORT_DIRECTORY", self.path())
            .env("NO_COLOR", "1");
        cmd
    }
}
