//! Process configuration from flags and environment.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

/// Interactive question/answer quiz keeper.
#[derive(Debug, Clone, Parser)]
#[command(name = "quiz", version, about)]
pub struct Config {
    /// SQLite file holding the quizzes (created when missing).
    #[arg(long, env = "QUIZ_DB", default_value = "quizzes.sqlite")]
    pub db: PathBuf,

    /// Directory for rolling log files [default: ./logs]
    #[arg(long, env = "QUIZ_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error [default: debug in debug builds, info otherwise]
    #[arg(long, env = "QUIZ_LOG_LEVEL")]
    pub log_level: Option<String>,
}

impl Config {
    pub fn log_level(&self) -> &str {
        self.log_level
            .as_deref()
            .unwrap_or(quiz_core::default_log_level())
    }

    /// Absolute log directory; relative values resolve against the cwd.
    pub fn resolved_log_dir(&self) -> Result<PathBuf> {
        let dir = self
            .log_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("logs"));
        if dir.is_absolute() {
            return Ok(dir);
        }
        let cwd = std::env::current_dir().context("failed to read current directory")?;
        Ok(cwd.join(dir))
    }
}

#[cfg(test)]
mod tests {
    use super::Config;
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn flags_override_defaults() {
        let config = Config::try_parse_from([
            "quiz",
            "--db",
            "/tmp/other.sqlite",
            "--log-dir",
            "/var/log/quiz",
            "--log-level",
            "warn",
        ])
        .unwrap();
        assert_eq!(config.db, PathBuf::from("/tmp/other.sqlite"));
        assert_eq!(config.log_level(), "warn");
        assert_eq!(
            config.resolved_log_dir().unwrap(),
            PathBuf::from("/var/log/quiz")
        );
    }

    #[test]
    fn relative_log_dir_is_made_absolute() {
        let config = Config::try_parse_from(["quiz", "--log-dir", "quiz-logs"]).unwrap();
        let resolved = config.resolved_log_dir().unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("quiz-logs"));
    }
}
