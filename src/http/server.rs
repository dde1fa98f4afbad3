//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Build the provider clients and the race coordinator
//! - Create the Axum router (`/` lookup, 404 everywhere else)
//! - Wire up middleware (request ID, tracing)
//! - Serve on a bound listener until shutdown

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::config::CepConfig;
use crate::http::handler;
use crate::http::request::{request_id, MakeUuidRequestId};
use crate::providers::{ProviderSetupError, Providers};
use crate::race::RaceCoordinator;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub coordinator: Arc<RaceCoordinator>,
}

/// HTTP server for the lookup endpoint.
pub struct HttpServer {
    router: Router,
    config: CepConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: CepConfig) -> Result<Self, ProviderSetupError> {
        let providers = Providers::from_config(&config.providers)?;
        let coordinator = RaceCoordinator::new(
            providers,
            Duration::from_millis(config.race.timeout_ms),
        );

        let state = AppState {
            coordinator: Arc::new(coordinator),
        };

        let router = Self::build_router(state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/", get(handler::lookup).head(handler::method_not_allowed))
            .fallback(handler::not_found)
            .with_state(state)
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(
                TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                    tracing::info_span!(
                        "request",
                        request_id = %request_id(request.headers()),
                        method = %request.method(),
                        uri = %request.uri()
                    )
                }),
            )
            .layer(SetRequestIdLayer::x_request_id(MakeUuidRequestId))
    }

    /// The fully layered router, for driving requests without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve on `listener` until `shutdown` resolves, then drain in-flight
    /// requests.
    pub async fn run<S>(self, listener: TcpListener, shutdown: S) -> Result<(), std::io::Error>
    where
        S: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            race_timeout_ms = self.config.race.timeout_ms,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
