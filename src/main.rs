//! Wiring & DI. Entry point: bootstrap adapters, inject into the form controller, run UI.
//! No business logic here.

use doc_summarizer::adapters::service::{HttpAnalysisAdapter, MockAnalysisAdapter};
use doc_summarizer::adapters::ui::alert::QueuedAlerts;
use doc_summarizer::adapters::ui::tui::TuiFormPort;
use doc_summarizer::ports::{AlertPort, AnalysisPort, InputPort};
use doc_summarizer::shared::config::AppConfig;
use doc_summarizer::usecases::FormController;
use dotenv::dotenv;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    doc_summarizer::adapters::ui::init_ui();

    let cfg = AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "invalid configuration, using defaults");
        AppConfig::default()
    });

    // --- Analysis service ---
    let analysis: Arc<dyn AnalysisPort> = if cfg.use_mock() {
        warn!("DOC_SUMMARIZER_MOCK set, using mock analysis adapter");
        Arc::new(MockAnalysisAdapter::new())
    } else {
        let url = cfg.service_url_or_default();
        info!(url = %url, "using analysis service");
        Arc::new(HttpAnalysisAdapter::new(url))
    };

    // --- Form controller + UI ---
    let alerts = Arc::new(QueuedAlerts::new());
    let controller = Arc::new(FormController::with_language(
        analysis,
        Arc::clone(&alerts) as Arc<dyn AlertPort>,
        cfg.default_language(),
    ));
    let input_port: Arc<dyn InputPort> = Arc::new(TuiFormPort::new(controller, alerts));

    input_port
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}
