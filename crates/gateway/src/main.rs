//! WikiQuiz API Gateway
//!
//! The HTTP entry point. Handles:
//! - Request routing
//! - CORS and request IDs
//! - Observability (logging, metrics, tracing)

mod handlers;
mod middleware;

use axum::{
    error_handling::HandleErrorLayer,
    routing::{get, post},
    BoxError, Router,
};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower::{timeout::TimeoutLayer, ServiceBuilder};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use wikiquiz_common::{
    config::{AppConfig, ObservabilityConfig},
    content::{HttpFetcher, PageFetcher},
    db::{DbPool, Repository},
    errors::AppError,
    metrics,
    quiz::{QuizGenerator, TemplateGenerator},
    QuizService,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db: DbPool,
    pub quizzes: Arc<QuizService>,
    pub prometheus: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(
        config: Arc<AppConfig>,
        db: DbPool,
        fetcher: Arc<dyn PageFetcher>,
        generator: Arc<dyn QuizGenerator>,
        prometheus: Option<PrometheusHandle>,
    ) -> Self {
        let quizzes = Arc::new(QuizService::new(Repository::new(db.clone()), fetcher, generator));
        Self {
            config,
            db,
            quizzes,
            prometheus,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Arc::new(AppConfig::load()?);

    // Initialize tracing
    init_tracing(&config.observability);

    info!(
        service = %config.observability.service_name,
        "Starting WikiQuiz API Gateway v{}",
        wikiquiz_common::VERSION
    );

    // Initialize metrics
    let prometheus = if config.observability.metrics_enabled {
        let handle = PrometheusBuilder::new()
            .set_buckets(metrics::LATENCY_BUCKETS)?
            .install_recorder()?;
        metrics::register_metrics();
        Some(handle)
    } else {
        None
    };

    // Initialize database connection and schema
    let db = DbPool::connect_and_prepare(&config.database).await?;

    // Scrape and synthesis components
    let fetcher: Arc<dyn PageFetcher> = Arc::new(HttpFetcher::new(&config.scraper)?);
    let generator: Arc<dyn QuizGenerator> = Arc::new(TemplateGenerator::new());

    let state = AppState::new(config.clone(), db, fetcher, generator, prometheus);

    // Build the router
    let app = create_router(state);

    // Start the server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Signals the start of the drain so the grace period can be bounded
    let (drain_tx, drain_rx) = tokio::sync::oneshot::channel::<()>();
    let server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                shutdown_signal().await;
                let _ = drain_tx.send(());
            })
            .await
    });

    // A sender dropped without sending means the server already exited
    let _ = drain_rx.await;

    let grace = config.shutdown_timeout();
    match tokio::time::timeout(grace, server).await {
        Ok(joined) => {
            joined??;
            info!("Server shutdown complete");
        }
        Err(_) => warn!(
            grace_secs = grace.as_secs(),
            "In-flight requests still running after the grace period, exiting"
        ),
    }
    Ok(())
}

fn init_tracing(config: &ObservabilityConfig) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    if config.json_logging {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    // Any origin, method and header
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Request ID propagation
    let request_id = SetRequestIdLayer::x_request_id(MakeRequestUuid);
    let propagate_id = PropagateRequestIdLayer::x_request_id();

    // Elapsed deadlines become a JSON error body
    let timeout_secs = state.config.server.request_timeout_secs;
    let timeout = ServiceBuilder::new()
        .layer(HandleErrorLayer::new(move |err: BoxError| async move {
            handle_timeout_error(err, timeout_secs)
        }))
        .layer(TimeoutLayer::new(state.config.request_timeout()));

    let api_routes = Router::new()
        // Quiz endpoints
        .route("/generate", post(handlers::quizzes::generate_quiz))
        .route("/quizzes", get(handlers::quizzes::list_quizzes))
        .route("/quizzes/{id}", get(handlers::quizzes::get_quiz))
        .route_layer(axum::middleware::from_fn(middleware::track_metrics));

    let ops_routes = Router::new()
        // Health endpoints
        .route("/health", get(handlers::health::health))
        .route("/ready", get(handlers::health::ready))
        .route("/metrics", get(handlers::health::metrics));

    Router::new()
        .merge(api_routes)
        .merge(ops_routes)
        .layer(timeout)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(propagate_id)
        .layer(request_id)
        .with_state(state)
}

fn handle_timeout_error(err: BoxError, timeout_secs: u64) -> AppError {
    if err.is::<tower::timeout::error::Elapsed>() {
        AppError::RequestTimeout { timeout_secs }
    } else {
        AppError::Internal {
            message: err.to_string(),
        }
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, starting shutdown..."),
        _ = terminate => info!("Received SIGTERM, starting shutdown..."),
    }
}
