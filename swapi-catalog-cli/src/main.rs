//! Command-line entry point for the Star Wars catalogue
//!
//! Lists people or planets with name search, sorting and paging, or shows
//! one item in detail. Logs go to stderr; `RUST_LOG` adjusts verbosity.

mod render;

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use render::Render;
use swapi_catalog_client::{ClientConfig, Person, Planet, ResourceClient, ResourceKind, SwapiClient};
use swapi_catalog_core::{CatalogConfig, CollectionService, DetailService, SortField, SortOrder};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "swapi-catalog")]
#[command(about = "Browse Star Wars characters and planets")]
#[command(version)]
struct Cli {
    /// API root (default: $SWAPI_BASE_URL or https://swapi.info/api)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Retries after a failed request (default: $SWAPI_MAX_RETRIES or 3)
    #[arg(long, global = true)]
    max_retries: Option<u32>,

    /// Delay between retries in milliseconds (default: $SWAPI_RETRY_DELAY_MS or 1000)
    #[arg(long, global = true)]
    retry_delay_ms: Option<u64>,

    /// Reject collection payloads that are not JSON arrays
    #[arg(long, global = true)]
    strict: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List a collection, one page at a time
    List(ListArgs),
    /// Show one item by id
    Show {
        /// people or planets
        resource: ResourceKind,
        /// Numeric id, as in `.../people/1/`
        id: String,
    },
}

#[derive(Args)]
struct ListArgs {
    /// people or planets
    resource: ResourceKind,

    /// Case-insensitive name filter
    #[arg(long, short)]
    search: Option<String>,

    /// Sort field: name or created
    #[arg(long, default_value = "name")]
    sort: SortField,

    /// Sort order: asc or desc
    #[arg(long, default_value = "asc")]
    order: SortOrder,

    /// Page to show (1-indexed)
    #[arg(long, short, default_value_t = 1)]
    page: u32,

    /// Items per page
    #[arg(long, default_value_t = swapi_catalog_core::types::ITEMS_PER_PAGE)]
    per_page: u32,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time(),
        )
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = client_config(&cli);
    tracing::debug!("Using API at {}", config.base_url);
    let client: Arc<dyn ResourceClient> =
        Arc::new(SwapiClient::new(config).context("Failed to build HTTP client")?);

    match cli.command {
        Command::List(args) => match args.resource {
            ResourceKind::People => list::<Person>(client, &args).await,
            ResourceKind::Planets => list::<Planet>(client, &args).await,
        },
        Command::Show { resource, id } => match resource {
            ResourceKind::People => show::<Person>(client, &id).await,
            ResourceKind::Planets => show::<Planet>(client, &id).await,
        },
    }
}

/// Environment first, then flags.
fn client_config(cli: &Cli) -> ClientConfig {
    let mut config = ClientConfig::from_env();
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url);
    }
    if let Some(max_retries) = cli.max_retries {
        config = config.with_max_retries(max_retries);
    }
    if let Some(delay) = cli.retry_delay_ms {
        config = config.with_retry_delay(Duration::from_millis(delay));
    }
    if cli.strict {
        config = config.with_strict_collections(true);
    }
    config
}

async fn list<T: Render>(client: Arc<dyn ResourceClient>, args: &ListArgs) -> anyhow::Result<ExitCode> {
    // One-shot process: apply the search right away
    let catalog = CatalogConfig::default()
        .with_items_per_page(args.per_page)
        .with_search_debounce(Duration::ZERO);
    let view: CollectionService<T> = CollectionService::with_config(client, &catalog);

    view.sort(args.sort, args.order).await;
    if let Some(query) = &args.search {
        view.search(query.clone());
        view.wait_for_search().await;
    }

    view.fetch_all(1).await;
    if let Some(error) = view.loading().await.error {
        tracing::error!("{error}");
        return Ok(ExitCode::FAILURE);
    }

    if args.page != 1 {
        view.go_to_page(args.page).await?;
    }

    print!("{}", render::collection(&view.snapshot().await));
    Ok(ExitCode::SUCCESS)
}

async fn show<T: Render>(client: Arc<dyn ResourceClient>, id: &str) -> anyhow::Result<ExitCode> {
    let view: DetailService<T> = DetailService::new(client);
    view.fetch(id).await;

    let snapshot = view.snapshot().await;
    match (snapshot.item, snapshot.error) {
        (Some(item), _) => {
            print!("{}", render::detail(&item));
            Ok(ExitCode::SUCCESS)
        }
        (None, Some(error)) => {
            tracing::error!("{error}");
            Ok(ExitCode::FAILURE)
        }
        (None, None) => anyhow::bail!("No {} with id {id}", T::KIND.singular()),
    }
}
