//! catalog-mcp CLI and MCP server.
//!
//! Binary entry point. CLI parsing (clap), server setup (rmcp), and
//! transport management. Core logic lives in the library crate.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use rmcp::ServiceExt;
use rmcp::transport::stdio;

use catalog_mcp::search::{SearchParams, SortKey, SortOrder};
use catalog_mcp::server::CatalogServer;
use catalog_mcp::{catalog, search};

#[derive(Parser, Debug)]
#[command(name = "catalog-mcp")]
#[command(about = "MCP server exposing catalog search with an inline list widget")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Top-level serve args (no subcommand = implicit serve)
    #[command(flatten)]
    serve: ServeArgs,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the MCP server over stdio (default when no subcommand is given)
    Serve(ServeArgs),
    /// Run a catalog search locally and print the results
    Search(SearchArgs),
}

#[derive(clap::Args, Debug, Clone)]
struct ServeArgs {
    /// Catalog directory, resolved relative to the working directory
    #[arg(long, default_value = "catalog")]
    catalog_dir: PathBuf,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

#[derive(clap::Args, Debug)]
struct SearchArgs {
    /// Search query (omit to list items without a relevance filter)
    #[arg(default_value = "")]
    query: String,

    /// Filter by category (exact, case-insensitive)
    #[arg(long)]
    category: Option<String>,

    /// Maximum number of results (1-100)
    #[arg(long, default_value_t = search::DEFAULT_LIMIT)]
    limit: usize,

    /// Sort key
    #[arg(long, value_enum, default_value_t = SortByArg::Relevance)]
    sort_by: SortByArg,

    /// Sort direction
    #[arg(long, value_enum, default_value_t = OrderArg::Asc)]
    order: OrderArg,

    /// Catalog directory, resolved relative to the working directory
    #[arg(long, default_value = "catalog")]
    catalog_dir: PathBuf,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum SortByArg {
    Relevance,
    Price,
    Title,
}

impl From<SortByArg> for SortKey {
    fn from(arg: SortByArg) -> Self {
        match arg {
            SortByArg::Relevance => SortKey::Relevance,
            SortByArg::Price => SortKey::Price,
            SortByArg::Title => SortKey::Title,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum OrderArg {
    Asc,
    Desc,
}

impl From<OrderArg> for SortOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Asc => SortOrder::Asc,
            OrderArg::Desc => SortOrder::Desc,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Search(args)) => run_search(args).await,
        Some(Command::Serve(args)) => run_serve(args).await,
        None => run_serve(cli.serve).await,
    }
}

/// Run the `search` subcommand.
async fn run_search(args: SearchArgs) -> ExitCode {
    if args.limit < 1 || args.limit > search::MAX_LIMIT {
        eprintln!(
            "Error: limit must be between 1 and {}, got {}",
            search::MAX_LIMIT,
            args.limit
        );
        return ExitCode::from(1);
    }

    let params = SearchParams {
        query: args.query,
        category: args.category,
        limit: args.limit,
        sort_by: args.sort_by.into(),
        order: args.order.into(),
    };

    let items = catalog::load_catalog(&args.catalog_dir).await;
    let results = search::run(items, &params);

    if results.is_empty() {
        println!("No items found.");
        return ExitCode::SUCCESS;
    }

    println!(
        "Found {} item{}:\n",
        results.len(),
        if results.len() == 1 { "" } else { "s" }
    );
    for item in &results {
        let title = item.display_title().unwrap_or("(untitled)");
        match item.numeric_price() {
            Some(price) => println!("  {title} ... {price}"),
            None => println!("  {title}"),
        }
        if let Some(ref category) = item.category {
            println!("    category: {category}");
        }
        if let Some(ref description) = item.description {
            println!("    {description}");
        }
        println!();
    }

    ExitCode::SUCCESS
}

/// Run the MCP server (default behavior / `serve` subcommand).
async fn run_serve(args: ServeArgs) -> ExitCode {
    // Log to stderr: stdout belongs to the transport.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(
                    format!("catalog_mcp={}", args.log_level)
                        .parse()
                        .expect("valid log directive"),
                )
                .add_directive(
                    format!("rmcp={}", args.log_level)
                        .parse()
                        .expect("valid log directive"),
                ),
        )
        .with_writer(std::io::stderr)
        .init();

    match run_serve_inner(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

async fn run_serve_inner(args: ServeArgs) -> anyhow::Result<()> {
    tracing::info!(
        catalog_dir = %args.catalog_dir.display(),
        "Starting catalog-mcp server on stdio"
    );

    let service = CatalogServer::new(args.catalog_dir).serve(stdio()).await?;

    tokio::select! {
        quit = service.waiting() => {
            let reason = quit?;
            tracing::info!(?reason, "Session finished");
        }
        () = shutdown_signal() => {
            tracing::info!("Termination signal received, closing transport");
        }
    }

    Ok(())
}

/// Resolves when either SIGINT or SIGTERM arrives.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to listen for SIGINT");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
