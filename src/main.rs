use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;

use sentui::api::http::HttpBackend;
use sentui::api::SentimentBackend;
use sentui::app::App;
use sentui::config::Config;
use sentui::controller::SyncController;
use sentui::logging;

/// A terminal dashboard for tweet sentiment analysis
#[derive(Parser, Debug)]
#[command(name = "sentui")]
#[command(about = "A terminal dashboard for tweet sentiment analysis", long_about = None)]
struct Args {
    /// Base URL of the sentiment service (overrides the config file)
    #[arg(long, value_name = "URL")]
    server: Option<String>,

    /// Path to the config file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Maximum number of history items to fetch (overrides the config file)
    #[arg(long, value_name = "N")]
    limit: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init()?;
    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref())?;
    if let Some(server) = args.server {
        config.server_url = server;
    }
    if let Some(limit) = args.limit {
        config.history_limit = limit;
    }

    let backend = Arc::new(HttpBackend::new(
        config.server_url.as_str(),
        Duration::from_secs(config.request_timeout_secs),
    ));

    // Best-effort connectivity probe; the dashboard still starts when the
    // service is down and recovers on the next refresh.
    let status = match backend.health().await {
        Ok(health) if health.models_loaded => format!("Connected to {}", config.server_url),
        Ok(_) => format!("{}: service up, models not loaded", config.server_url),
        Err(e) => {
            tracing::warn!("health check failed: {e}");
            format!("Cannot reach {} (will retry on refresh)", config.server_url)
        }
    };

    let controller = SyncController::new(backend, config.history_limit);
    let mut app = App::new(controller, &config);
    app.set_status(status);

    let terminal = ratatui::init();
    let result = app.run(terminal).await;
    ratatui::restore();
    result
}
