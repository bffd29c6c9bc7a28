use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::{anyhow, bail, Result};
use clap::Parser;
use search_core::{
    config::{load_settings, load_settings_from, parse_api_url},
    spawn_search_session, HttpOrderTransport, Phase, SearchCommand, SearchHandle, SearchView,
    SessionSettings,
};
use shared::{
    catalog,
    domain::{LocationCategory, Order},
};
use tracing_subscriber::EnvFilter;

/// Runs one order search through the same session the desktop app uses.
#[derive(Parser, Debug)]
struct Args {
    /// Settings file to read instead of ./order_search.toml.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Overrides `api_url` from order_search.toml / the environment.
    #[arg(long)]
    api_url: Option<String>,
    #[arg(long, default_value = "")]
    keyword: String,
    /// Origin location code, repeatable.
    #[arg(long = "origin")]
    origins: Vec<String>,
    /// Destination location code, repeatable.
    #[arg(long = "destination")]
    destinations: Vec<String>,
    #[arg(long, default_value_t = 1)]
    page: usize,
    /// Print the resulting view as JSON instead of a table.
    #[arg(long)]
    json: bool,
    /// Give up if the search has not settled after this many seconds.
    #[arg(long, default_value_t = 15)]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut settings = match &args.config {
        Some(path) => load_settings_from(path)?,
        None => load_settings(),
    };
    if let Some(api_url) = args.api_url.clone() {
        settings.api_url = api_url;
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&settings.log_filter))
        .with_writer(std::io::stderr)
        .init();

    let transport = HttpOrderTransport::new(parse_api_url(&settings.api_url)?);
    tracing::info!(endpoint = %transport.endpoint(), "starting order search");

    let handle = spawn_search_session(Arc::new(transport), SessionSettings::default());

    if !args.keyword.trim().is_empty() {
        handle.send(SearchCommand::SetKeyword(args.keyword.clone()))?;
    }
    apply_filters(&handle, &args)?;

    let timeout = Duration::from_secs(args.timeout_secs);
    let view = settle(&handle, timeout).await?;

    let target = args.page.clamp(1, view.total_pages);
    let view = if target != view.current_page {
        handle.send(SearchCommand::ChangePage(target))?;
        handle
            .wait_until(|current| current.current_page == target)
            .await?
    } else {
        view
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print_view(&view);
    }

    if let Some(error) = view.error {
        bail!(error);
    }
    Ok(())
}

fn apply_filters(handle: &SearchHandle, args: &Args) -> Result<()> {
    if args.origins.is_empty() && args.destinations.is_empty() {
        return Ok(());
    }

    handle.send(SearchCommand::OpenFilters)?;
    for (category, codes) in [
        (LocationCategory::Origin, &args.origins),
        (LocationCategory::Destination, &args.destinations),
    ] {
        for code in codes {
            let known = catalog::options_for(category)
                .iter()
                .any(|option| option.code == code.as_str());
            if !known {
                bail!("unknown {} code '{code}'", category.label().to_lowercase());
            }
            handle.send(SearchCommand::ToggleFilter {
                category,
                code: code.clone(),
            })?;
        }
    }
    handle.send(SearchCommand::ApplyFilters)?;
    Ok(())
}

/// Edits sent above are already queued behind the initial debounce, so the
/// first settled view reflects all of them.
async fn settle(handle: &SearchHandle, timeout: Duration) -> Result<SearchView> {
    tokio::time::timeout(
        timeout,
        handle.wait_until(|view| matches!(view.phase, Phase::Success | Phase::Failed)),
    )
    .await
    .map_err(|_| anyhow!("search did not finish within {}s", timeout.as_secs()))?
    .map_err(Into::into)
}

fn print_view(view: &SearchView) {
    if view.orders.is_empty() {
        if view.error.is_none() {
            println!("No orders found. Try adjusting your search or filters.");
        }
        return;
    }

    for order in &view.orders {
        println!("{}", format_order(order));
    }
    println!(
        "page {}/{} ({} orders)",
        view.current_page, view.total_pages, view.total_orders
    );
}

fn format_order(order: &Order) -> String {
    format!(
        "{:<14} {:<28} {} -> {}",
        order.id.0, order.goods_name, order.origin_name, order.destination_name
    )
}
