use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use nappi::catalog::Catalog;
use nappi::index::KeywordIndex;
use nappi::query::{parse_query, QueryExecutor};
use nappi::utils::{init_logging, ServiceConfig};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "nappi")]
#[command(about = "In-memory autocomplete lookup for the NAPPI product catalog")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (defaults to $NAPPI_CONFIG or the user config directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the catalog and serve autocomplete queries over HTTP
    Serve {
        /// Fixed-width catalog file
        #[arg(short, long)]
        source: Option<PathBuf>,

        /// Address to listen on
        #[arg(short, long)]
        bind: Option<SocketAddr>,
    },
    /// Run a single query against the catalog and print the matches
    Search {
        /// Search keywords
        #[arg(required = true, trailing_var_arg = true)]
        terms: Vec<String>,

        /// Fixed-width catalog file
        #[arg(short, long)]
        source: Option<PathBuf>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },
    /// Show catalog and index statistics
    Stats {
        /// Fixed-width catalog file
        #[arg(short, long)]
        source: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = ServiceConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve { source, bind } => {
            if let Some(source) = source {
                config.source = source;
            }
            if let Some(bind) = bind {
                config.bind = bind;
            }

            init_logging(config.log_format);
            nappi::server::run(&config)?;
        }
        Commands::Search {
            terms,
            source,
            no_color,
        } => {
            let source = source.unwrap_or(config.source);
            search_once(&source, &terms.join(" "), !no_color)?;
        }
        Commands::Stats { source } => {
            let source = source.unwrap_or(config.source);
            nappi::index::stats::show_stats(&source)?;
        }
    }

    Ok(())
}

fn search_once(source: &std::path::Path, query: &str, color: bool) -> Result<()> {
    let catalog = Catalog::load(source)
        .with_context(|| format!("Failed to load catalog from {}", source.display()))?;
    let index = KeywordIndex::build(&catalog);

    let start = Instant::now();
    let terms = parse_query(query);
    let records: Vec<_> = QueryExecutor::new(&catalog, &index)
        .execute(&terms)
        .into_iter()
        .cloned()
        .collect();
    let duration_ms = start.elapsed().as_secs_f64() * 1000.0;

    nappi::output::print_records(&records, terms.tokens(), color)?;
    nappi::output::print_summary(records.len(), duration_ms, color)?;

    Ok(())
}
