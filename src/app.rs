use std::any::Any;
use std::time::Duration;

use anyhow::Context;
use axum::{
    body::Body,
    error_handling::HandleErrorLayer,
    http::Request,
    response::{IntoResponse, Response},
    routing::get,
    BoxError, Router,
};
use sqlx::PgPool;
use tokio::net::TcpListener;
use tokio::signal;
use tower::{timeout::error::Elapsed, ServiceBuilder};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any as CorsAny, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::api::{self, AppError};
use crate::config::Config;
use crate::db;

pub struct App {
    config: Config,
    pool: PgPool,
}

impl App {
    /// Connects to the store and brings the schema up to date.
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let pool = db::create_pool(&config.storage)
            .await
            .context("Failed to connect to database")?;
        tracing::info!("Connected to database");

        db::run_migrations(&pool)
            .await
            .context("Failed to run migrations")?;

        Ok(Self { config, pool })
    }

    pub fn router(&self) -> Router {
        build_router(self.pool.clone(), self.config.server.timeout)
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let listener = TcpListener::bind(&self.config.server.address)
            .await
            .with_context(|| format!("Failed to bind {}", self.config.server.address))?;

        tracing::info!(
            address = %listener.local_addr()?,
            timeout = ?self.config.server.timeout,
            "starting server"
        );
        tracing::debug!(
            idle_timeout = ?self.config.server.idle_timeout,
            "idle_timeout is not enforced by axum::serve"
        );

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        self.pool.close().await;
        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

/// API routes plus the service shell: banner, health check and middleware.
pub fn build_router(pool: PgPool, timeout: Duration) -> Router {
    let router = Router::new()
        .route("/", get(|| async { "Bus Routes API" }))
        .route("/health", get(|| async { "OK" }))
        .merge(api::routes::create_router(pool));

    with_shell_layers(router, timeout)
}

fn with_shell_layers(router: Router, timeout: Duration) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(CorsAny)
        .allow_methods(CorsAny)
        .allow_headers(CorsAny);

    let trace = TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
        let request_id = request
            .headers()
            .get("x-request-id")
            .and_then(|value| value.to_str().ok())
            .unwrap_or("-");

        tracing::info_span!(
            "http_request",
            method = %request.method(),
            uri = %request.uri(),
            request_id
        )
    });

    let timeout = ServiceBuilder::new()
        .layer(HandleErrorLayer::new(handle_middleware_error))
        .timeout(timeout);

    // Outermost first: cors, request id, trace, propagate, panic, timeout.
    router
        .layer(timeout)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(trace)
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(cors)
}

async fn handle_middleware_error(err: BoxError) -> AppError {
    if err.is::<Elapsed>() {
        AppError::Timeout
    } else {
        tracing::error!("Unhandled middleware error: {}", err);
        AppError::Internal
    }
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        *s
    } else {
        "unknown panic"
    };
    tracing::error!(panic = detail, "handler panicked");

    AppError::Internal.into_response()
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::warn!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::warn!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
