//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the health handlers
//! - Wire up middleware (request ID, tracing, timeout, rate limit)
//! - Bind server to listener
//! - Stop on shutdown signal

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, head},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::health::HealthChecker;
use crate::http::request::{request_id, UuidRequestId};
use crate::security::{rate_limit_middleware, RateLimiter};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub checker: HealthChecker,
}

/// HTTP server exposing the health endpoint.
pub struct HttpServer {
    router: Router,
    config: AppConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given (validated) configuration.
    pub fn new(config: AppConfig) -> Self {
        let state = AppState {
            checker: HealthChecker::new(config.probe.clone()),
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &AppConfig, state: AppState) -> Router {
        let mut health = Router::new()
            .route("/health", get(health_handler))
            .route("/health/get", get(health_handler))
            .route("/health/head", head(health_handler))
            .with_state(state);

        if config.rate_limit.enabled {
            let limiter = Arc::new(RateLimiter::new(&config.rate_limit));
            health = health.route_layer(middleware::from_fn_with_state(limiter, rate_limit_middleware));
        }

        health.layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
                .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                    tracing::info_span!(
                        "request",
                        method = %request.method(),
                        path = %request.uri().path(),
                        request_id = %request_id(request),
                    )
                }))
                .layer(TimeoutLayer::new(Duration::from_secs(
                    config.listener.request_timeout_secs,
                )))
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        let probe = &self.config.probe;
        tracing::info!(
            address = %addr,
            udp_host = %probe.host,
            udp_port = probe.port,
            udp_timeout_ms = probe.timeout_ms,
            caller_timeout_secs = probe.caller_timeout_secs,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("HTTP server received shutdown signal");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

/// Health handler shared by GET and HEAD routes.
/// Axum drops the body for HEAD requests.
async fn health_handler(State(state): State<AppState>) -> Response {
    tracing::info!("Received check health request");

    match state.checker.check_health().await {
        Ok(result) => result.into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Health probe failed unexpectedly");
            e.into_response()
        }
    }
}
