use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use streamvibe::{
    auth::{AuthClient, GoTrueAuthClient, InMemoryAuthClient, Role},
    backend::{InMemoryBackend, PostgrestBackend, RowBackend},
    config::{BackendKind, Config},
    utils::sample_data,
    web::WebServer,
};

#[derive(Parser)]
#[command(name = "streamvibe")]
#[command(version)]
#[command(about = "Back office for the StreamVibe IPTV catalogue")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Listening IP address
    #[arg(short = 'H', long, value_name = "IP")]
    host: Option<String>,

    /// Listening port
    #[arg(short, long, value_name = "PORT")]
    port: Option<u16>,

    /// Backend project URL (overrides config file)
    #[arg(short = 'b', long, value_name = "URL")]
    backend_url: Option<String>,

    /// Log level
    #[arg(short = 'v', long, default_value = "info")]
    log_level: String,
}

fn build_backend(config: &Config) -> Result<(Arc<dyn RowBackend>, Arc<dyn AuthClient>)> {
    match config.backend.kind {
        BackendKind::Postgrest => {
            let timeout = config.backend.request_timeout();
            let backend =
                PostgrestBackend::new(&config.backend.url, &config.backend.anon_key, timeout)?;
            let auth =
                GoTrueAuthClient::new(&config.backend.url, &config.backend.anon_key, timeout)?;
            info!("Using PostgREST backend at {}", config.backend.url);
            Ok((Arc::new(backend), Arc::new(auth)))
        }
        BackendKind::Memory => {
            let backend = InMemoryBackend::new();
            if config.backend.seed_sample_data {
                sample_data::seed(&backend);
                info!("Seeded in-memory backend with sample data");
            }

            let auth = InMemoryAuthClient::new();
            auth.register(
                &config.backend.demo_admin_email,
                &config.backend.demo_admin_password,
                Role::Admin,
            );
            warn!(
                "Using in-memory backend; data is lost on exit. Demo admin: {}",
                config.backend.demo_admin_email
            );
            Ok((Arc::new(backend), Arc::new(auth)))
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_filter = if cli.log_level == "trace" {
        format!("streamvibe={},tower_http=trace", cli.log_level)
    } else {
        format!("streamvibe={}", cli.log_level)
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting StreamVibe back office v{}", env!("CARGO_PKG_VERSION"));

    if Config::write_default_if_missing(&cli.config)? {
        info!("Wrote default configuration to {}", cli.config);
    }
    let mut config = Config::load(&cli.config)?;
    info!("Configuration loaded from: {}", cli.config);

    if let Some(host) = cli.host {
        config.web.host = host;
    }
    if let Some(port) = cli.port {
        config.web.port = port;
    }
    if let Some(url) = cli.backend_url {
        config.backend.url = url;
    }

    let (backend, auth) = build_backend(&config)?;

    let web_server = WebServer::new(config, backend, auth)?;
    info!(
        "Starting web server on {}:{}",
        web_server.host(),
        web_server.port()
    );
    web_server.serve().await?;

    Ok(())
}
