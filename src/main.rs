//! Wiring & DI. Entry point: load config, bootstrap adapters, inject into the
//! design service, serve HTTP. No business logic here.

use design_studio::adapters::ai::{GeminiAdapter, InferenceImageAdapter};
use design_studio::adapters::http::{self, AppState};
use design_studio::adapters::ui;
use design_studio::ports::{ImageGenerationPort, TextGenerationPort};
use design_studio::shared::config::AppConfig;
use design_studio::usecases::DesignService;
use dotenv::dotenv;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
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

    let cfg = AppConfig::load()?;
    let status = cfg.backend_status();
    info!(
        text_backend_configured = status.text_backend_configured,
        image_backend_configured = status.image_backend_configured,
        "backend credentials"
    );

    // Fail fast: never serve without both secrets.
    let settings = cfg.into_settings().inspect_err(|e| {
        error!(error = %e, "refusing to start");
    })?;

    let addr: SocketAddr = format!("{}:{}", settings.server.bind, settings.server.port)
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid listen address: {}", e))?;

    // --- Backends ---
    let timeout = settings.limits.upstream_timeout;
    let text: Arc<dyn TextGenerationPort> = Arc::new(
        GeminiAdapter::new(&settings.text, timeout).map_err(|e| anyhow::anyhow!("{}", e))?,
    );
    let images: Arc<dyn ImageGenerationPort> = Arc::new(
        InferenceImageAdapter::new(&settings.image, timeout)
            .map_err(|e| anyhow::anyhow!("{}", e))?,
    );
    info!(
        model = %settings.text.model,
        text_url = %settings.text.api_url,
        image_url = %settings.image.api_url,
        upstream_timeout_secs = timeout.as_secs(),
        request_deadline_secs = settings.limits.request_deadline.as_secs(),
        "AI backends configured"
    );

    // --- Service + HTTP ---
    let service = Arc::new(DesignService::new(text, images, settings.limits));
    let app = http::router(AppState::new(service, status), &settings.server.cors_origins);

    ui::print_welcome(addr);
    http::run_server(addr, app).await?;

    info!("server stopped");
    Ok(())
}
