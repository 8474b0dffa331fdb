use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};

use taskmarket_api::create_app;
use taskmarket_core::AppConfig;
use taskmarket_domain::services::DefaultMarketplaceService;
use taskmarket_infrastructure::MongoManager;

pub struct Application {
    config: AppConfig,
    router: Router,
}

impl Application {
    /// Connects to the store (bounded retry; exhausting the attempts fails
    /// startup) and wires repositories, services and the HTTP surface.
    pub async fn new(config: AppConfig) -> Result<Self> {
        let store = MongoManager::connect(&config.database)
            .await
            .context("could not connect to MongoDB")?;

        let task_repo = store.task_repository();
        let bid_repo = store.bid_repository();
        let marketplace = Arc::new(DefaultMarketplaceService::new(
            task_repo.clone(),
            bid_repo.clone(),
        ));

        let router = create_app(task_repo, bid_repo, marketplace, &config.api.cors_origins);

        Ok(Self { config, router })
    }

    pub async fn run(self) -> Result<()> {
        let listener = TcpListener::bind(&self.config.api.bind_address)
            .await
            .with_context(|| format!("failed to bind {}", self.config.api.bind_address))?;

        info!(address = %self.config.api.bind_address, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("server error")?;

        info!("server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received Ctrl+C, shutting down"),
        _ = terminate => info!("received SIGTERM, shutting down"),
    }
}
