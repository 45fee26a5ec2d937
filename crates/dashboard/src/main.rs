use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use storefront_catalog::{FilterStore, ProductBrowser};
use storefront_client::{ClientConfig, HttpProductSource, InMemoryProductSource, LoadState, ProductSource, SessionCache};
use storefront_dashboard::args::{Cli, Commands};
use storefront_dashboard::commands::ErrorPage;
use storefront_dashboard::{browse, commands};

#[tokio::main]
async fn main() {
    storefront_observability::init();

    if let Err(err) = run().await {
        match err.downcast_ref::<ErrorPage>() {
            Some(page) => {
                print!("{page}");
                tracing::debug!("{err:#}");
            }
            None => eprintln!("Error: {err:#}"),
        }
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cache = SessionCache::new(build_source(&cli)?);

    let output = match cli.command.unwrap_or(Commands::Dashboard) {
        Commands::Dashboard => commands::dashboard(&cache).await?,
        Commands::Stats => commands::stats(&cache).await?,
        Commands::Categories => commands::categories(&cache).await?,
        Commands::Products(filters) => commands::products(&cache, &filters).await?,
        Commands::Show { id } => commands::show(&cache, id).await?,
        Commands::Browse => return browse_session(&cache).await,
    };

    print!("{output}");
    Ok(())
}

fn build_source(cli: &Cli) -> anyhow::Result<Arc<dyn ProductSource>> {
    if let Some(path) = &cli.products_file {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read products file {}", path.display()))?;
        let source = InMemoryProductSource::from_json(&json)
            .with_context(|| format!("invalid products file {}", path.display()))?;
        tracing::info!(path = %path.display(), "using products file");
        return Ok(Arc::new(source));
    }

    let mut config = ClientConfig::from_env();
    if let Some(api_url) = &cli.api_url {
        config = config.with_api_url(api_url);
    }
    tracing::info!(api_url = %config.api_url, "using catalog API");

    Ok(Arc::new(HttpProductSource::new(&config)?))
}

async fn browse_session(cache: &SessionCache) -> anyhow::Result<()> {
    println!("Loading products...");
    let products = match cache.load_products().await {
        LoadState::Ready(products) => products,
        failed => anyhow::bail!("failed to load products: {}", failed.error().unwrap_or_default()),
    };

    println!("{} products loaded. Type `help` for commands.", products.len());
    let browser = ProductBrowser::new(products, FilterStore::new());
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();

    browse::run(browser, stdin, &mut stdout).await?;
    Ok(())
}
