use anyhow::{Context, Result};
use argh::FromArgs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use skyglass_core::{App, Config};
use skyglass_weather::{HostContext, SnapshotHub, WeatherSnapshot};
use skyglass_widget::view::day_tile_id;
use skyglass_widget::{Renderer, WeatherWidget, TAG_NAME};

#[derive(FromArgs)]
/// Render the weather widget from a snapshot file
struct Args {
    /// path to the configuration file (default: user config directory)
    #[argh(option, short = 'c')]
    config: Option<PathBuf>,

    /// snapshot JSON file; overrides feed.snapshot_path
    #[argh(option, short = 's')]
    snapshot: Option<PathBuf>,

    /// forecast day to open after the first render
    #[argh(option)]
    select: Option<usize>,

    /// re-publish the snapshot file every feed.refresh_seconds until Ctrl-C
    #[argh(switch, short = 'w')]
    watch: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Args = argh::from_env();

    skyglass_core::init()?;

    let mut app: App<WeatherWidget> = match args.config.as_deref() {
        Some(path) => App::with_config(Config::load_validated(Some(path))?.0),
        None => App::new()?,
    };
    let config = app.config();
    let snapshot_path = args
        .snapshot
        .or_else(|| config.feed.snapshot_path.clone())
        .context("No snapshot file given (use --snapshot or feed.snapshot_path)")?;
    let refresh = Duration::from_secs(config.feed.refresh_seconds.max(1));
    let renderer = Arc::new(Renderer::new(&config.widget)?);

    skyglass_widget::bootstrap(app.registry_mut(), renderer)?;

    let hub = SnapshotHub::new();
    let host = HostContext::new(Arc::new(hub.clone()));

    let widget = app.mount(TAG_NAME)?;
    widget.initialize(&host)?;
    tracing::info!("Skyglass started with {}", snapshot_path.display());

    hub.publish(read_snapshot(&snapshot_path).await?);

    if let Some(day) = args.select {
        if !widget.click(&day_tile_id(day)) {
            tracing::warn!("No forecast day {} to open", day);
        }
    }

    println!("{}", widget.markup());

    if args.watch {
        watch(&hub, widget, &snapshot_path, refresh).await?;
    }

    app.shutdown()?;
    Ok(())
}

/// Read a snapshot file. An empty file or `null` is an empty emission.
async fn read_snapshot(path: &Path) -> Result<Option<WeatherSnapshot>> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read snapshot {}", path.display()))?;

    if contents.trim().is_empty() {
        return Ok(None);
    }

    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse snapshot {}", path.display()))
}

async fn watch(
    hub: &SnapshotHub,
    widget: &WeatherWidget,
    path: &Path,
    every: Duration,
) -> Result<()> {
    let mut ticker = tokio::time::interval(every);
    // first tick completes immediately
    ticker.tick().await;
    let mut last = widget.markup();

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match read_snapshot(path).await {
                    Ok(snapshot) => {
                        hub.publish(snapshot);
                        let markup = widget.markup();
                        if markup != last {
                            println!("{}", markup);
                            last = markup;
                        }
                    }
                    Err(e) => tracing::warn!("Failed to reload snapshot: {:#}", e),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted, shutting down");
                break;
            }
        }
    }

    Ok(())
}
