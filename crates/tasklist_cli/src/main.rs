//! Terminal front end for the TaskList core.
//!
//! # Responsibility
//! - Resolve configuration from the environment and command-line flags.
//! - Drive the task list screen controller through a terminal view.

mod terminal_view;

use clap::{Parser, Subcommand};
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;
use tasklist_core::config::{DB_PATH_ENV, LOG_DIR_ENV, LOG_LEVEL_ENV};
use tasklist_core::db::open_db;
use tasklist_core::{
    init_logging_from_config, AppConfig, ConfigError, SqliteTaskRepository, TaskListController,
    TaskStore,
};
use terminal_view::TerminalView;

#[derive(Parser)]
#[command(name = "tasklist", version, about = "Single-list to-do manager")]
struct Cli {
    /// Database file (defaults to $TASKLIST_DB_PATH or the temp directory)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Absolute directory for rolling log files
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show all tasks, newest first
    List,
    /// Add a task; prompts for the title when omitted
    Add { title: Option<String> },
    /// Flip completion of the task at row N
    Toggle { row: usize },
    /// Delete the task at row N
    Delete { row: usize },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("tasklist: {err}");
            return ExitCode::from(2);
        }
    };
    if let Err(err) = init_logging_from_config(&config) {
        eprintln!("tasklist: logging disabled: {err}");
    }

    match run(&config, cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("tasklist: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Flags win over `TASKLIST_*` variables; both pass the same validation.
fn resolve_config(cli: &Cli) -> Result<AppConfig, ConfigError> {
    AppConfig::from_lookup(|key| {
        let flag = match key {
            DB_PATH_ENV => cli.db.as_ref().map(|path| path.display().to_string()),
            LOG_LEVEL_ENV => cli.log_level.clone(),
            LOG_DIR_ENV => cli.log_dir.as_ref().map(|path| path.display().to_string()),
            _ => None,
        };
        flag.or_else(|| std::env::var(key).ok())
    })
}

fn run(config: &AppConfig, command: Command) -> Result<(), String> {
    let conn = open_db(&config.db_path).map_err(|err| format!("cannot open database: {err}"))?;
    let repo = SqliteTaskRepository::try_new(&conn).map_err(|err| err.to_string())?;
    let show_list = matches!(command, Command::List);
    let view = TerminalView::new(io::stdout(), BufReader::new(io::stdin()), show_list);
    let mut controller = TaskListController::new(TaskStore::new(repo), view);
    controller.view_did_load();

    match command {
        Command::List => Ok(()),
        Command::Add { title: None } => {
            controller.add_button_tapped();
            Ok(())
        }
        Command::Add { title: Some(title) } => {
            if controller.create_task(&title) {
                Ok(())
            } else {
                Err("task was not created".to_string())
            }
        }
        Command::Toggle { row } => {
            let index = row_index(row, controller.number_of_rows())?;
            controller.toggle_task_completion(index);
            Ok(())
        }
        Command::Delete { row } => {
            let index = row_index(row, controller.number_of_rows())?;
            controller.commit_delete(index);
            Ok(())
        }
    }
}

fn row_index(row: usize, rows: usize) -> Result<usize, String> {
    match row.checked_sub(1) {
        Some(index) if index < rows => Ok(index),
        _ => Err(format!("no task at row {row} (list has {rows})")),
    }
}
