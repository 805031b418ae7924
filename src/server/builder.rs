//! ServerBuilder for fluent API to build HTTP servers

use super::handlers::AppState;
use super::router::build_catalog_routes;
use crate::config::ServerConfig;
use crate::core::service::CatalogService;
use crate::core::store::SnapshotStore;
use crate::storage::{JsonFileSnapshotStore, RecordStore, sample};
use anyhow::{Context, Result};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Builder for creating the catalog HTTP server
///
/// # Example
///
/// ```ignore
/// ServerBuilder::new()
///     .with_config(ServerConfig::from_env()?)
///     .serve()
///     .await?;
/// ```
pub struct ServerBuilder {
    config: ServerConfig,
    snapshots: Option<Arc<dyn SnapshotStore>>,
    store: Option<Arc<RecordStore>>,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder with the default configuration
    pub fn new() -> Self {
        Self {
            config: ServerConfig::default(),
            snapshots: None,
            store: None,
            custom_routes: Vec::new(),
        }
    }

    /// Set the configuration
    pub fn with_config(mut self, config: ServerConfig) -> Self {
        self.config = config;
        self
    }

    /// Use a snapshot backend other than the configured JSON file
    pub fn with_snapshot_store(mut self, snapshots: impl SnapshotStore + 'static) -> Self {
        self.snapshots = Some(Arc::new(snapshots));
        self
    }

    /// Use an already opened record store
    ///
    /// Takes precedence over [`with_snapshot_store`](Self::with_snapshot_store);
    /// nothing is restored or seeded.
    pub fn with_store(mut self, store: Arc<RecordStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Add custom routes to the server
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Open the record store and build the service
    ///
    /// Restores the last snapshot; when there is none, seeds the configured
    /// number of sample records and persists them.
    pub fn build_service(&mut self) -> Result<CatalogService> {
        let store = match self.store.take() {
            Some(store) => store,
            None => {
                let snapshots = self.snapshots.take().unwrap_or_else(|| {
                    Arc::new(JsonFileSnapshotStore::new(self.config.data_file.clone()))
                });
                let (count, seed) = (self.config.sample_size, self.config.seed);
                let store = RecordStore::open(snapshots, || sample::generate(count, seed))
                    .context("Failed to open record store")?;
                Arc::new(store)
            }
        };
        Ok(CatalogService::new(store))
    }

    /// Build the final router
    pub fn build(mut self) -> Result<Router> {
        let service = self.build_service()?;
        let mut app = build_catalog_routes(AppState { service });

        for custom_router in std::mem::take(&mut self.custom_routes) {
            app = app.merge(custom_router);
        }

        Ok(app.layer(ServiceBuilder::new().layer(TraceLayer::new_for_http())))
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Open (or seed) the record store
    /// - Bind to the configured address
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    pub async fn serve(self) -> Result<()> {
        let addr = self.config.socket_addr();
        let app = self.build()?;
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to install Ctrl+C handler");
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
                tracing::warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
