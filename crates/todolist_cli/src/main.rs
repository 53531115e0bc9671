//! Interactive to-do list front end.
//!
//! # Responsibility
//! - Open the configured storage backend and restore the list.
//! - Translate input lines into store operations and re-render after each.

mod command;
mod render;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, ValueEnum};
use command::{parse_command, Command, USAGE};
use log::warn;
use render::render;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use todolist_core::db::open_db;
use todolist_core::{
    core_version, default_log_level, init_logging, JsonFileStorage, ListStore, MemoryStorage,
    PersistenceAdapter, SqliteStorage, StoreResult,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Backend {
    /// Single JSON document on disk.
    Json,
    /// Key/value table in a SQLite database.
    Sqlite,
    /// Nothing is kept after exit.
    Memory,
}

#[derive(Debug, Parser)]
#[command(name = "todolist", version, about = "Interactive to-do list")]
struct Cli {
    /// Storage location (file for `json`, database for `sqlite`).
    #[arg(long, default_value = "todos.json")]
    storage: PathBuf,

    #[arg(long, value_enum, default_value_t = Backend::Json)]
    backend: Backend,

    /// Absolute directory for rolling log files. Logging is off when unset.
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error; defaults by build mode.
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = &cli.log_dir {
        let level = cli
            .log_level
            .clone()
            .unwrap_or_else(|| default_log_level().to_string());
        init_logging(&level, log_dir)
            .map_err(|err| anyhow!("failed to initialize logging: {err}"))?;
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    println!("todolist {}", core_version());

    match cli.backend {
        Backend::Json => {
            let store = ListStore::open(JsonFileStorage::new(&cli.storage))
                .with_context(|| format!("failed to open `{}`", cli.storage.display()))?;
            run(store, stdin.lock(), stdout.lock())
        }
        Backend::Sqlite => {
            let conn = open_db(&cli.storage)
                .with_context(|| format!("failed to open `{}`", cli.storage.display()))?;
            let store = ListStore::open(SqliteStorage::new(&conn))
                .context("failed to restore list from database")?;
            run(store, stdin.lock(), stdout.lock())
        }
        Backend::Memory => {
            let store = ListStore::open(MemoryStorage::new())?;
            run(store, stdin.lock(), stdout.lock())
        }
    }
}

fn run<P: PersistenceAdapter>(
    mut store: ListStore<P>,
    input: impl BufRead,
    mut output: impl Write,
) -> Result<()> {
    write!(output, "{}", render(&store))?;
    for line in input.lines() {
        let line = line.context("failed to read input")?;
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(err) => {
                writeln!(output, "{err}")?;
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Help => {
                writeln!(output, "{USAGE}")?;
                continue;
            }
            other => {
                // A failed write leaves the change in memory; keep the session going.
                if let Err(err) = apply(&mut store, other) {
                    warn!("event=command module=cli status=error error={err}");
                    writeln!(output, "warning: {err}")?;
                }
            }
        }
        write!(output, "{}", render(&store))?;
    }
    output.flush()?;
    Ok(())
}

fn apply<P: PersistenceAdapter>(store: &mut ListStore<P>, command: Command) -> StoreResult<()> {
    match command {
        Command::Add(text) => {
            store.add(&text)?;
        }
        Command::Edit { id, text } => {
            if store.begin_edit(id) {
                store.edit(id, &text);
                store.commit_edit(id)?;
            }
        }
        Command::Toggle(id) => {
            store.toggle(id)?;
        }
        Command::Remove(id) => {
            store.remove(id)?;
        }
        Command::ToggleAll => {
            store.toggle_all()?;
        }
        Command::ClearCompleted => {
            store.clear_completed()?;
        }
        Command::Undo => {
            store.undo()?;
        }
        Command::Redo => {
            store.redo()?;
        }
        Command::Filter(filter) => store.set_filter(filter),
        Command::List | Command::Help | Command::Quit => {}
    }
    Ok(())
}
