//! Pokedex Catalog Core - Main Entry Point
//!
//! Loads settings and preferences, opens a catalog session and prints one
//! feed. `pokedex-core [search <query> | game <id> | type <name>]`

use anyhow::Context;
use pokedex_core::domain::{FilterSpec, JsonFileStore, Preferences};
use pokedex_core::helpers::{get_or_create_log_dir, is_development};
use pokedex_core::services::CatalogSession;
use pokedex_core::utils::{ConfigStore, Settings};
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let log_dir = get_or_create_log_dir().context("log directory")?;
    let (file_writer, _guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(log_dir, "pokedex-core.log"));
    let level = if is_development() {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    // Initialize tracing for logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(level.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(file_writer),
        )
        .init();

    tracing::info!("Starting Pokedex catalog core...");

    let mut settings = Settings::load().context("settings")?;
    let store = JsonFileStore::open(ConfigStore::open_default()?)?;
    let prefs = Preferences::load(&store).await?;
    if let Some(language) = Preferences::stored_language(&store).await? {
        settings.locale = language;
    }

    let session = CatalogSession::new(settings)?;

    // Drain feed events into the log
    let events = session.events();
    std::thread::spawn(move || {
        for event in events.iter() {
            tracing::debug!("Feed event: {:?}", event);
        }
    });

    let args: Vec<String> = std::env::args().skip(1).collect();

    match args.as_slice() {
        [cmd, rest @ ..] if cmd == "search" => {
            let search = session.search_controller();
            search.search(&rest.join(" ")).await;
            let state = search.state();
            if let Some(error) = state.error {
                anyhow::bail!("{error}");
            }
            for item in &state.results {
                println!("#{:04} {}", item.id, item.name);
            }
        }
        [kind, value] => {
            let filter = FilterSpec::parse(kind, value)?;
            let feed = session.filtered_feed();
            let Some(controller) = feed.apply(Some(filter)).await else {
                return Ok(());
            };
            let state = controller.state();
            if let Some(error) = state.error() {
                anyhow::bail!("{error}");
            }
            for item in state.items() {
                println!("#{:04} {} [{}]", item.id, item.name, item.type_names().join(", "));
            }
        }
        _ => {
            if let Some(category) = prefs.favorite_type() {
                tracing::info!("Favorite type: {}", category);
            }
            let feed = session.catalog_feed();
            feed.load_initial().await;
            let state = feed.state();
            if let Some(error) = state.error() {
                anyhow::bail!("{error}");
            }
            for item in state.items() {
                println!("#{:04} {} [{}]", item.id, item.name, item.type_names().join(", "));
            }
        }
    }

    tracing::info!("Cache: {:?}", session.cache_stats());
    Ok(())
}
