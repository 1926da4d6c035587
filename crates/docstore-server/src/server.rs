use std::sync::Arc;

use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::build_router;
use crate::service::GatewayService;

/// The docstore REST gateway server.
pub struct GatewayServer {
    config: ServerConfig,
    service: Arc<GatewayService>,
}

impl GatewayServer {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            service: Arc::new(GatewayService::new()),
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// The shared service, for embedding alongside the HTTP surface.
    pub fn service(&self) -> Arc<GatewayService> {
        self.service.clone()
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(self.service.clone())
    }

    /// Bind and serve requests until the task is cancelled.
    pub async fn serve(self) -> ServerResult<()> {
        let app = build_router(self.service);
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!("docstore gateway listening on {}", self.config.bind_addr);
        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_construction() {
        let server = GatewayServer::new(ServerConfig::default());
        assert_eq!(server.config().bind_addr, "127.0.0.1:8008".parse().unwrap());
    }

    #[test]
    fn router_builds() {
        let server = GatewayServer::new(ServerConfig::default());
        let _router = server.router();
    }
}
