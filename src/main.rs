use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use webserver::app::{self, MemoryUserStore, TemplateRenderer};
use webserver::config::Config;
use webserver::router::StaticFiles;
use webserver::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = Config::load()?;
    let renderer = TemplateRenderer::new(&cfg.static_files.template_root)?;

    let router = app::routes(
        StaticFiles::from_config(&cfg.static_files),
        Arc::new(MemoryUserStore::new()),
        Arc::new(renderer),
    );

    tokio::select! {
        res = server::listener::run(&cfg, Arc::new(router)) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
