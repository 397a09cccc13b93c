//! Prospector CLI and REST server entry point.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use prospector::{write_csv_file, SearchEngine, SearchRequest, SearchSummary};
use prospector_server::config::{
    resolve_addr, resolve_credentials, resolve_csv_path, resolve_timeout,
};
use prospector_server::display;
use prospector_server::transport::HttpTransport;

#[derive(Parser)]
#[command(
    name = "prospector",
    about = "Prospector SSOMA: industrial lead search with contact enrichment",
    version
)]
struct Cli {
    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Search API settings shared by every subcommand that builds an engine.
#[derive(Args, Clone, Default)]
struct EngineArgs {
    /// Custom Search API key. Also reads GOOGLE_API_KEY.
    #[arg(long)]
    api_key: Option<String>,

    /// Custom Search engine id (cx). Also reads GOOGLE_CSE_ID.
    #[arg(long)]
    cse_id: Option<String>,

    /// Timeout of the outbound search request, in milliseconds.
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Seed for simulated data (reproducible demo output).
    #[arg(long)]
    seed: Option<u64>,
}

impl EngineArgs {
    fn build(self) -> SearchEngine {
        let credentials = resolve_credentials(self.api_key, self.cse_id);
        let engine = SearchEngine::new(credentials, resolve_timeout(self.timeout_ms));
        match self.seed {
            Some(seed) => engine.with_seed(seed),
            None => engine,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Start the REST API (default).
    Serve {
        /// Listen address (host:port). Also reads PROSPECTOR_ADDR.
        #[arg(long)]
        addr: Option<String>,

        #[command(flatten)]
        engine: EngineArgs,
    },

    /// Run one search and print the dashboard to the terminal.
    Search {
        /// Industrial sector.
        #[arg(long, default_value = "Construcción")]
        sector: String,

        /// Location or district.
        #[arg(long, default_value = "Lima")]
        location: String,

        /// Look for decision-makers and direct contacts.
        #[arg(long)]
        deep: bool,

        /// Show the detail panel of this row (1-based).
        #[arg(long)]
        detail: Option<usize>,

        /// Write the CSV export to this path.
        /// Pass a directory to use the default file name.
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Print records as JSON instead of a table.
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        engine: EngineArgs,
    },

    /// Show which data source the current configuration would use.
    Info {
        #[command(flatten)]
        engine: EngineArgs,
    },

    /// Generate shell completion scripts.
    ///
    /// Examples:
    ///   prospector completions bash > ~/.local/share/bash-completion/completions/prospector
    ///   prospector completions zsh > ~/.zfunc/_prospector
    Completions {
        /// Shell type (bash, zsh, fish, powershell, elvish).
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command.unwrap_or(Commands::Serve {
        addr: None,
        engine: EngineArgs::default(),
    }) {
        Commands::Serve { addr, engine } => {
            let addr = resolve_addr(addr.as_deref());
            let engine = Arc::new(engine.build());
            tracing::info!(
                "Prospector API ({})",
                if engine.using_real_api() {
                    "Custom Search"
                } else {
                    "simulated data"
                }
            );
            HttpTransport::new(engine).run(&addr).await?;
        }

        Commands::Search {
            sector,
            location,
            deep,
            detail,
            csv,
            json,
            engine,
        } => {
            let engine = engine.build();
            let request = SearchRequest::new(sector, location, deep);
            let report = engine.search_report(&request).await;

            if json {
                println!("{}", serde_json::to_string_pretty(&report.records)?);
            } else {
                println!(
                    "{}",
                    display::render_status(&report, engine.last_error().as_deref())
                );
                println!(
                    "Target: {} in {}",
                    request.sector, request.location
                );
                println!();
                println!(
                    "{}",
                    display::render_summary(&SearchSummary::from_records(&report.records))
                );
                println!();
                print!("{}", display::render_table(&report.records));

                if let Some(row) = detail {
                    match display::select_row(&report.records, row) {
                        Some(record) => {
                            println!();
                            print!("{}", display::render_detail(record));
                        }
                        None => eprintln!(
                            "No row {row}; results have {} rows",
                            report.records.len()
                        ),
                    }
                }
            }

            if let Some(path) = csv {
                let path = resolve_csv_path(&path);
                write_csv_file(&report.records, &path)?;
                eprintln!("CSV written to {}", path.display());
            }
        }

        Commands::Info { engine } => {
            let engine = engine.build();
            let info = serde_json::json!({
                "name": "prospector",
                "version": env!("CARGO_PKG_VERSION"),
                "using_real_api": engine.using_real_api(),
                "strategy": engine.route(),
            });
            println!("{}", serde_json::to_string_pretty(&info)?);
        }

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "prospector", &mut std::io::stdout());
        }
    }

    Ok(())
}
