use std::fs::File;
use std::io;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use lectio::api::{CorpusSource, FileCorpusSource, HttpCorpusSource};
use lectio::core::config::{self, CliOverrides, LectioConfig, ResolvedConfig};
use lectio::pronouns::{self, FileOutcome, Pass};
use lectio::server::{self, ServerState};
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode, WriteLogger};

#[derive(Parser)]
#[command(name = "lectio", version, about = "Read the Bible in the terminal")]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the merged corpus at /api/bible-data
    Serve {
        /// Address to bind (default 127.0.0.1:3000)
        #[arg(long)]
        addr: Option<String>,
    },
    /// Open the terminal reader (the default)
    Read {
        /// Base URL of a running `lectio serve`
        #[arg(long)]
        endpoint: Option<String>,
        /// Read the corpus files directly instead of over HTTP
        #[arg(long, conflicts_with = "endpoint")]
        local: bool,
    },
    /// Rewrite divine pronouns in the corpus files
    Pronouns {
        #[arg(value_enum)]
        pass: Pass,
        /// Report what would change without writing
        #[arg(long)]
        dry_run: bool,
    },
}

fn init_logging(to_file: bool) {
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if to_file {
        // The terminal belongs to ratatui; log to lectio.log in the current directory
        if let Ok(log_file) = File::create("lectio.log") {
            let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
        }
    } else {
        let _ = TermLogger::init(
            LevelFilter::Info,
            log_config,
            TerminalMode::Stderr,
            ColorChoice::Auto,
        );
    }
}

fn load_config() -> LectioConfig {
    config::load_config().unwrap_or_else(|e| {
        log::warn!("Ignoring config file: {}", e);
        LectioConfig::default()
    })
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let command = args.command.unwrap_or(Command::Read {
        endpoint: None,
        local: false,
    });
    init_logging(matches!(command, Command::Read { .. }));
    log::info!("Lectio v{} starting up", env!("CARGO_PKG_VERSION"));

    let file_config = load_config();

    match command {
        Command::Serve { addr } => {
            let resolved = config::resolve(&file_config, &CliOverrides { addr, endpoint: None });
            let state = ServerState {
                old_testament: resolved.old_testament_path,
                new_testament: resolved.new_testament_path,
            };
            server::serve(&resolved.server_addr, state).await
        }
        Command::Read { endpoint, local } => {
            let resolved = config::resolve(&file_config, &CliOverrides { addr: None, endpoint });
            let source = corpus_source(&resolved, local);
            lectio::tui::run(&resolved, source)
        }
        Command::Pronouns { pass, dry_run } => {
            let resolved = config::resolve(&file_config, &CliOverrides::default());
            run_pronouns(&resolved, pass, dry_run)
        }
    }
}

fn corpus_source(config: &ResolvedConfig, local: bool) -> Arc<dyn CorpusSource> {
    if local {
        Arc::new(FileCorpusSource {
            old_testament: config.old_testament_path.clone(),
            new_testament: config.new_testament_path.clone(),
        })
    } else {
        Arc::new(HttpCorpusSource::new(config.endpoint.clone()))
    }
}

fn run_pronouns(config: &ResolvedConfig, pass: Pass, dry_run: bool) -> io::Result<()> {
    let outcomes = pronouns::run(config, pass, dry_run)
        .map_err(|e| io::Error::other(e.to_string()))?;

    let changed: usize = outcomes
        .iter()
        .map(|outcome| match outcome {
            FileOutcome::Processed(report) => report.changed,
            FileOutcome::Missing(_) => 0,
        })
        .sum();
    log::info!("{} pass finished: {} chapters changed", pass.label(), changed);
    Ok(())
}
