//! Mutation Browser - desktop search window for the variant API.
//!
//! Type a gene symbol, press Search, and the matching variant records from
//! `GET /variants?gene=<gene>` are shown as a table.
//!
//! Configuration is read from `config.toml` in the platform config
//! directory (see `mutation_browser::config`). Logs go to stderr and to a
//! daily-rotated file under the configured log directory.

use anyhow::Context;
use eframe::egui;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use mutation_browser::api::ApiClient;
use mutation_browser::config::BrowserConfig;
use mutation_browser::ui::SearchApp;

/// Initialize tracing with a stderr layer and, when possible, a file layer.
///
/// The returned guard flushes the file writer and must live until exit.
fn init_logging(config: &BrowserConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("mutation_browser=info"));

    let (file_layer, guard) = match config.resolved_log_dir() {
        Some(log_dir) => match std::fs::create_dir_all(&log_dir) {
            Ok(()) => {
                let file_appender = tracing_appender::rolling::daily(&log_dir, "mutation-browser.log");
                let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
                let layer = fmt::layer()
                    .with_writer(non_blocking)
                    .with_ansi(false); // No ANSI colors in log files
                (Some(layer), Some(guard))
            }
            Err(e) => {
                eprintln!("Failed to create log directory {:?}: {}", log_dir, e);
                (None, None)
            }
        },
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(file_layer)
        .init();

    guard
}

fn main() -> anyhow::Result<()> {
    // Config errors are reported once logging is up
    let (config, config_error) = match BrowserConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (BrowserConfig::default(), Some(e)),
    };

    let _log_guard = init_logging(&config);

    info!("Mutation Browser v{} starting", env!("CARGO_PKG_VERSION"));
    if let Some(e) = config_error {
        warn!("Ignoring configuration: {}. Using defaults.", e);
    }
    info!("Variant API: {}", config.api_base_url);

    let client = ApiClient::from_config(&config).context("Failed to create API client")?;

    // Create tokio runtime for async requests
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .context("Failed to create tokio runtime")?;
    let handle = runtime.handle().clone();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 600.0])
            .with_min_inner_size([480.0, 320.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Mutation Browser",
        options,
        Box::new(move |cc| Ok(Box::new(SearchApp::new(cc, handle, client, &config)))),
    )
    .map_err(|e| anyhow::anyhow!("Search window failed: {}", e))?;

    info!("Mutation Browser exiting");
    Ok(())
}
