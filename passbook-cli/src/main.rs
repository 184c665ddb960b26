mod clipboard;
mod tui;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use passbook_core::import_export::{export_to_csv, export_to_json, import_from_json};
use passbook_core::platform::get_default_config_path;
use passbook_core::{generate_password, AppConfig, Controller, CredentialStore};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::clipboard::SystemClipboard;

/// Passbook - a local credential book
#[derive(Parser)]
#[command(name = "passbook", version)]
#[command(about = "Store website credentials in a local database", long_about = None)]
struct Cli {
    /// Credential database file (overrides the config file)
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    /// Configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive form (default)
    Ui,

    /// List all records
    List {
        /// Show passwords in plain text
        #[arg(long)]
        show_passwords: bool,
    },

    /// Search records by website or username
    Search {
        /// Text to look for, case-insensitive
        term: String,
    },

    /// Print a generated password
    Generate {
        /// Password length
        #[arg(long)]
        length: Option<usize>,

        /// Letters and digits only
        #[arg(long)]
        no_symbols: bool,
    },

    /// Write all records to a file
    Export {
        /// Output file
        path: PathBuf,

        #[arg(long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,
    },

    /// Add the records of a JSON export
    Import {
        /// JSON file produced by `export`
        path: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportFormat {
    Json,
    Csv,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.unwrap_or_else(get_default_config_path);
    let mut config = AppConfig::load_or_default(&config_path)
        .with_context(|| format!("failed to load config {}", config_path.display()))?;
    if let Some(database) = cli.database {
        config.database_path = database;
    }

    let command = cli.command.unwrap_or(Commands::Ui);
    match &command {
        // The form owns the terminal, so its logs go to a file.
        Commands::Ui => init_file_logging(&config.log_file)?,
        _ => init_stderr_logging(),
    }

    match command {
        Commands::Ui => {
            let store = open_store(&config)?;
            let controller = Controller::new(store, SystemClipboard::new(), config.generator())?;
            info!("Starting Passbook form");
            tui::run(
                controller,
                config.notice_duration(),
                config.status_reset_duration(),
            )?;
        }
        Commands::List { show_passwords } => {
            let store = open_store(&config)?;
            print_records(&store.list_all()?, show_passwords);
        }
        Commands::Search { term } => {
            let store = open_store(&config)?;
            let records = store.search(&term)?;
            if records.is_empty() {
                println!("No matching records found.");
            } else {
                print_records(&records, false);
            }
        }
        Commands::Generate { length, no_symbols } => {
            let mut generator = config.generator();
            if let Some(length) = length {
                generator = generator.length(length);
            }
            if no_symbols {
                generator = generator.with_symbols(false);
            }
            println!("{}", generate_password(&generator)?);
        }
        Commands::Export { path, format } => {
            let store = open_store(&config)?;
            let count = match format {
                ExportFormat::Json => export_to_json(&store, &path)?,
                ExportFormat::Csv => export_to_csv(&store, &path)?,
            };
            println!("Exported {} records to {}", count, path.display());
        }
        Commands::Import { path } => {
            let store = open_store(&config)?;
            let count = import_from_json(&store, &path)?;
            println!("Imported {} records from {}", count, path.display());
        }
    }

    Ok(())
}

fn open_store(config: &AppConfig) -> Result<CredentialStore> {
    let store = CredentialStore::open(&config.database_path, config.table()?)
        .with_context(|| format!("failed to open {}", config.database_path.display()))?;
    store.ensure_schema()?;
    Ok(store)
}

fn print_records(records: &[passbook_core::CredentialRecord], show_passwords: bool) {
    println!("{:>5}  {:<32}  {:<24}  Password", "ID", "Website", "Username");
    for record in records {
        let password = if show_passwords {
            record.password.clone()
        } else {
            record.masked_password()
        };
        println!(
            "{:>5}  {:<32}  {:<24}  {}",
            record.id, record.website, record.username, password
        );
    }
}

fn init_stderr_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn init_file_logging(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}
