//! Records CLI - command-line front end for the records store.
//!
//! Commands that read or change records initialize the store first (seeding a
//! fresh data file and rebuilding the index). `check`, `rebuild-index` and
//! `list` work on the files as they are. Without a command it starts the
//! interactive menu.

mod shell;

use anyhow::Result;
use clap::{Parser, Subcommand};
use records_core::{Console, RecordStore, RemoveMatch};
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::io::BufReader;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "records")]
#[command(about = "Flat-file record store with a name index")]
struct Args {
    /// Directory holding the data and index files
    #[arg(long, default_value = ".")]
    dir: PathBuf,

    /// Data file name (relative to --dir)
    #[arg(long)]
    data_file: Option<PathBuf>,

    /// Index file name (relative to --dir)
    #[arg(long)]
    index_file: Option<PathBuf>,

    /// Remove any line containing ",<name>," instead of matching the name field
    #[arg(long)]
    lenient_remove: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Create the data file if missing and rebuild the index
    Init,
    /// Append a record
    #[command(allow_negative_numbers = true)]
    Add { id: i64, name: String, age: i64 },
    /// Look up records by exact name
    Search { name: String },
    /// Remove records by name
    Remove { name: String },
    /// Print every stored record
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Regenerate the index from the data file
    RebuildIndex,
    /// Verify the index matches the data file
    Check,
    /// Interactive menu (default)
    Shell,
}

impl Command {
    /// Whether the store is initialized before this command runs.
    ///
    /// Initializing rebuilds the index, which would hide a stale index from
    /// `check`.
    fn initializes_store(&self) -> bool {
        !matches!(self, Command::Check | Command::RebuildIndex | Command::List { .. })
    }
}

impl Args {
    fn build_store(&self) -> RecordStore {
        let mut builder = RecordStore::builder(&self.dir);
        if let Some(ref data_file) = self.data_file {
            builder = builder.data_file(data_file);
        }
        if let Some(ref index_file) = self.index_file {
            builder = builder.index_file(index_file);
        }
        if self.lenient_remove {
            builder = builder.remove_match(RemoveMatch::Substring);
        }
        builder.build()
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    // Logs go to stderr; stdout carries results
    let log_level = if args.debug { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let console = Console::new(args.build_store());
    let ok = execute(&console, args.command.unwrap_or(Command::Shell)).await?;
    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

/// Initialize the store when the command needs it, then run the command.
async fn execute(console: &Console, command: Command) -> Result<bool> {
    if command.initializes_store() {
        info!("Initializing data in {}", console.store().data_path().display());
        if let Some(message) = console.initialize().await {
            println!("{}", message);
            return Ok(false);
        }
    }
    run(console, command).await
}

/// Run one command; returns false when the command should exit non-zero.
async fn run(console: &Console, command: Command) -> Result<bool> {
    match command {
        Command::Init => {
            println!("Data initialized at {}", console.store().data_path().display());
        }
        Command::Add { id, name, age } => println!("{}", console.add(id, &name, age).await),
        Command::Search { name } => println!("{}", console.search(&name).await),
        Command::Remove { name } => println!("{}", console.remove(&name).await),
        Command::List { json } => {
            let records = console.store().records().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else {
                for record in &records {
                    println!("{}", record);
                }
            }
        }
        Command::RebuildIndex => println!("{}", console.rebuild_index().await),
        Command::Check => {
            if console.store().index_is_current().await? {
                println!("Index is current.");
            } else {
                println!("Index is out of date.");
                return Ok(false);
            }
        }
        Command::Shell => {
            let stdin = BufReader::new(tokio::io::stdin());
            shell::run(console, stdin, tokio::io::stdout()).await?;
        }
    }
    Ok(true)
}
