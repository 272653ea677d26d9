//! Wiring & DI. Entry point: bootstrap adapters, inject into services, run UI.
//! No business logic here; the batch flow is driven by TuiInputPort.

use dotenv::dotenv;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use zapblast::adapters::ui::progress::IndicatifProgress;
use zapblast::adapters::ui::tui::TuiInputPort;
use zapblast::adapters::whatsapp::{CloudApiGateway, TemplateConfig};
use zapblast::ports::{InputPort, ProgressPort, WaGateway};
use zapblast::shared::config::AppConfig;
use zapblast::usecases::{DispatchService, Throttle};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!("no .env found"),
    }

    zapblast::adapters::ui::init_ui();

    let cfg = Arc::new(AppConfig::load().unwrap_or_default());

    let send_delay_ms = cfg.send_delay_ms_or_default();
    info!(
        send_delay_ms,
        "send rate limit: {} ms between messages", send_delay_ms
    );

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(cfg.request_timeout_secs_or_default()))
        .build()
        .map_err(|e| anyhow::anyhow!("HTTP client: {}", e))?;

    let gateway: Arc<dyn WaGateway> = Arc::new(CloudApiGateway::new(
        client,
        cfg.api_base_url_or_default(),
        TemplateConfig {
            name: cfg.template_name_or_default(),
            language_code: cfg.language_code_or_default(),
            include_name_param: cfg.include_name_param(),
        },
    ));
    let progress: Arc<dyn ProgressPort> = Arc::new(IndicatifProgress::new());

    let dispatch = Arc::new(DispatchService::new(
        gateway,
        progress,
        Throttle::new(Duration::from_millis(send_delay_ms)),
        cfg.country_code_or_default(),
    ));

    let input_port: Arc<dyn InputPort> = Arc::new(TuiInputPort::new(dispatch, Arc::clone(&cfg)));

    input_port.run().await.map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}
