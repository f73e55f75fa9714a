use anyhow::Result;
use std::net::SocketAddr;
use tracing::info;

use voice_relay::config::Config;
use voice_relay::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "voice_relay=debug,tower_http=debug".into()),
        )
        .init();

    // Pick up GROQ_API_KEY and friends from a local .env if present.
    if dotenvy::dotenv().is_ok() {
        info!("loaded environment from .env");
    }

    // Config file is optional; built-in defaults cover everything except the
    // API key, which always comes from the environment.
    let config_paths: Vec<String> = vec![
        std::env::var("CONFIG_PATH").ok(),
        Some("conf.yaml".to_string()),
    ]
    .into_iter()
    .flatten()
    .collect();

    let mut config = None;
    for path in &config_paths {
        match Config::load(path) {
            Ok(cfg) => {
                info!("Loaded configuration from: {}", path);
                config = Some(cfg);
                break;
            }
            Err(e) => {
                tracing::debug!("Failed to load config from {}: {}", path, e);
            }
        }
    }
    let config = config.unwrap_or_else(|| {
        info!("No config file found, using built-in defaults");
        Config::default()
    });

    let host: std::net::IpAddr = config.system.host.parse()?;
    let port = config.system.port;

    let app_state = AppState::new(config)?;
    let app = voice_relay::app(app_state);

    let addr = SocketAddr::from((host, port));
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
