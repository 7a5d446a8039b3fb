//! Tavily-Search-RS: Tavily web search for agent frameworks
//!
//! This is the main entry point for the application.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::net::SocketAddr;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use tavily_search::{
    config::{self, Settings},
    web::{create_router, AppState},
    OutputFormat, SearchClient,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "tavily-search", version, about = "Tavily web search for agent frameworks")]
struct Cli {
    /// Path to settings.yml
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the function API over HTTP
    Serve,
    /// Run one search and print the rendered output
    Query {
        /// The search query
        query: String,
        /// Output format (json or markdown)
        #[arg(short, long)]
        format: Option<OutputFormat>,
        /// Entry point to use; defaults to the configured search mode
        #[arg(short, long, value_enum)]
        mode: Option<QueryMode>,
        /// Result cap override for detailed searches
        #[arg(long)]
        max_results: Option<NonZeroUsize>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum QueryMode {
    Basic,
    Detailed,
    Context,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging; stdout is reserved for query output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut settings = config::load(cli.config.as_deref())?;

    match cli.command {
        Command::Serve => serve(settings).await,
        Command::Query {
            query,
            format,
            mode,
            max_results,
        } => {
            if let Some(format) = format {
                settings.search.format = format;
            }
            let client = SearchClient::from_settings(&settings)?;

            let output = match mode {
                Some(QueryMode::Basic) => client.search(&query).await?,
                Some(QueryMode::Detailed) => client.search_detailed(&query, max_results).await?,
                Some(QueryMode::Context) => client.search_context(&query).await?,
                None if max_results.is_some() => {
                    client.search_detailed(&query, max_results).await?
                }
                None => client.run(&query).await?,
            };
            println!("{}", output);
            Ok(())
        }
    }
}

async fn serve(settings: Settings) -> Result<()> {
    info!("Starting Tavily-Search-RS v{}", tavily_search::VERSION);

    let addr = SocketAddr::new(
        settings.server.bind_address.parse()?,
        settings.server.port,
    );

    // Create application state
    let state = AppState::new(settings)?;
    info!(
        "Registered functions: {}",
        state.functions.names().join(", ")
    );

    let app = create_router(state);

    info!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
