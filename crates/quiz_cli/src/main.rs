//! Interactive quiz keeper.
//!
//! # Responsibility
//! - Resolve configuration, start logging and open the quiz store.
//! - Seed an empty store, then hand control to the REPL.
//!
//! Startup failures (logging, database open, seeding) are fatal.

mod command;
mod config;
mod output;
mod repl;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use config::Config;
use log::info;
use quiz_core::db::open_db;
use quiz_core::{init_logging, QuizService, SqliteQuizRepository};
use repl::{Repl, TerminalReader};

fn main() -> Result<()> {
    let config = Config::parse();

    let log_dir = config.resolved_log_dir()?;
    init_logging(config.log_level(), &log_dir.to_string_lossy())
        .map_err(|err| anyhow!(err))
        .context("failed to initialize logging")?;

    let conn = open_db(&config.db)
        .with_context(|| format!("failed to open quiz database `{}`", config.db.display()))?;
    let repo = SqliteQuizRepository::try_new(&conn).context("quiz database is not usable")?;
    let service = QuizService::new(repo);
    let seeded = service
        .seed_defaults_if_empty()
        .context("failed to seed default quizzes")?;
    info!(
        "event=cli_start module=cli status=ok seeded={seeded} core_version={}",
        quiz_core::core_version()
    );

    let reader = TerminalReader::new().context("failed to open terminal input")?;
    let mut repl = Repl::new(&service, reader, std::io::stdout(), rand::thread_rng());
    repl.run()
}
