//! conventions-server
//!
//! Plain-HTTP convention webhook around `conventions-core`.
//! TLS is expected to be terminated in front of this process.

mod conf;
mod context;
mod error;

use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use conventions_core::{ConventionHandler, Evaluator, builtin};
use tokio::net::TcpListener;
use tracing::{info, warn};

pub use conf::Config;
pub use context::{PodConventionContext, PodConventionContextSpec, PodConventionContextStatus};
pub use error::ServerError;

struct AppState {
    handler: Arc<dyn ConventionHandler>,
}

pub fn build_router(handler: Arc<dyn ConventionHandler>) -> Router {
    Router::new()
        .route("/", post(apply_conventions))
        .route("/healthz", get(|| async { "ok" }))
        .with_state(Arc::new(AppState { handler }))
}

async fn apply_conventions(
    State(state): State<Arc<AppState>>,
    Json(mut context): Json<PodConventionContext>,
) -> Result<Json<PodConventionContext>, ServerError> {
    let name = context
        .metadata
        .get("name")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();
    // spec.template is echoed as received; only status carries the result
    let mut template = context.spec.template.clone();

    let applied = state
        .handler
        .handle(&mut template, &context.spec.image_config)
        .inspect_err(|error| warn!(context = %name, %error, "error applying conventions"))?;

    info!(context = %name, applied = ?applied, "conventions applied");
    context.status = PodConventionContextStatus {
        applied_conventions: applied,
        template,
    };
    Ok(Json(context))
}

pub async fn start_server(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let evaluator = Evaluator::new(Arc::new(builtin::default_registry()?));
    info!(conventions = ?evaluator.registry().ids(), "loaded conventions");

    let router = build_router(Arc::new(evaluator));
    let listener = TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;
    info!("start server on port {}", config.port);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
