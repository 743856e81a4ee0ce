//! csvlog command-line front end.
//!
//! ```text
//! csvlog [--config csvlog.toml] emit --category net --level error "send failed"
//! csvlog [--config csvlog.toml] files
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use csvlog::config::{load_config, LoggerConfig};
use csvlog::rotation::list_log_files;
use csvlog::{Registry, Severity, SourceLocation};

#[derive(Parser)]
#[command(name = "csvlog")]
#[command(about = "Append to and inspect a rotating CSV log set", long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Append one record and print the file it went to
    Emit {
        #[arg(short, long, default_value = "default")]
        category: String,

        #[arg(short, long, default_value = "info")]
        level: Severity,

        /// Attached object (last CSV column)
        #[arg(short, long)]
        object: Option<String>,

        /// Also print the record to stderr
        #[arg(long)]
        console: bool,

        message: String,
    },
    /// List the retained log files, oldest first
    Files,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => LoggerConfig::default(),
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("csvlog={}", config.diagnostics.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Emit {
            category,
            level,
            object,
            console,
            message,
        } => {
            let subsystem = config.subsystem.clone();
            let registry = Registry::new(config)?;
            let logger = registry.create_logger(&subsystem, &category, console);

            let location = SourceLocation::new(file!(), line!(), "main");
            let event = logger.event(level, message).at(location);
            match object {
                Some(object) => event.object(object).emit(),
                None => event.emit(),
            }
            registry.flush();

            let stats = registry.stats();
            if stats.dropped > 0 {
                return Err("record could not be written, see diagnostics".into());
            }
            if let Some(path) = registry.current_log_file_location() {
                println!("{}", path.display());
            }
        }
        Commands::Files => {
            for path in list_log_files(&config.file.directory, &config.file.file_prefix)? {
                println!("{}", path.display());
            }
        }
    }

    Ok(())
}
