use crate::handlers;
use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use index_fund_core::CorsConfig;
use std::future::Future;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub struct ApiServer {
    cors: CorsConfig,
}

impl ApiServer {
    #[must_use]
    pub const fn new(cors: CorsConfig) -> Self {
        Self { cors }
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/calculate", post(handlers::calculate))
            .route("/health", get(handlers::health))
            .layer(self.cors_layer())
            .layer(TraceLayer::new_for_http())
    }

    fn cors_layer(&self) -> CorsLayer {
        let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

        if self.cors.allows_any_origin() {
            return layer.allow_origin(Any);
        }

        let origins: Vec<HeaderValue> = self
            .cors
            .allowed_origins
            .iter()
            .filter_map(|origin| match origin.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                    None
                }
            })
            .collect();

        layer.allow_origin(AllowOrigin::list(origins))
    }

    /// Starts the web server listening on the specified address.
    ///
    /// # Errors
    /// Returns an error if the server fails to bind to the address or serve requests.
    pub async fn serve(self, addr: &str) -> anyhow::Result<()> {
        self.serve_with_shutdown(addr, std::future::pending()).await
    }

    /// Like [`ApiServer::serve`], but drains and returns once `signal` resolves.
    ///
    /// # Errors
    /// Returns an error if the server fails to bind to the address or serve requests.
    pub async fn serve_with_shutdown<F>(self, addr: &str, signal: F) -> anyhow::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Web API listening on {}", addr);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(signal)
            .await?;

        tracing::info!("Web API stopped");
        Ok(())
    }
}
