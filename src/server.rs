//! HTTP API over the distributor.
//!
//! | Route | Result |
//! |-------|--------|
//! | `POST /distribute` | `AllocationResult` for a `SystemState` body |
//! | `GET /generate-test-data` | Random `SystemState` plus its result |
//! | `GET /health` | `{"status": "ok"}` |
//!
//! `InvalidArgument` maps to 400 with `{"detail": ...}`; internal faults
//! map to an opaque 500.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;

use crate::config::{ConfigError, ServerConfig};
use crate::distributor::WorkloadDistributor;
use crate::error::{DistributeError, ServeError};
use crate::generator::TestDataGenerator;
use crate::models::{AllocationResult, SystemState};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub distributor: WorkloadDistributor,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config: Arc::new(config),
            distributor: WorkloadDistributor::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GenerateParams {
    pub num_processes: Option<usize>,
    pub num_processors: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GeneratedData {
    pub system_state: SystemState,
    pub allocation_result: AllocationResult,
}

#[derive(Serialize)]
struct ErrorResponse {
    detail: String,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

impl IntoResponse for DistributeError {
    fn into_response(self) -> Response {
        match self {
            DistributeError::InvalidArgument(detail) => {
                (StatusCode::BAD_REQUEST, Json(ErrorResponse { detail })).into_response()
            }
            DistributeError::Internal(reason) => {
                tracing::error!(reason = %reason, "Distribution failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        detail: "internal server error".to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}

/// Builds the API router with CORS and request tracing.
pub fn router(state: AppState) -> Result<Router, ConfigError> {
    let cors = state.config.cors_layer()?;

    Ok(Router::new()
        .route("/distribute", post(distribute_handler))
        .route("/generate-test-data", get(generate_test_data_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state))
}

/// Binds the configured address and serves until SIGINT/SIGTERM.
pub async fn serve(config: ServerConfig) -> Result<(), ServeError> {
    let addr = config.listen_addr;
    let app = router(AppState::new(config))?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "Starting workload distributor service");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Rejects processor counts above the configured limit.
fn check_processor_limit(
    config: &ServerConfig,
    num_processors: usize,
) -> Result<(), DistributeError> {
    if num_processors > config.max_processors {
        return Err(DistributeError::InvalidArgument(format!(
            "num_processors must be at most {}, got {num_processors}",
            config.max_processors
        )));
    }
    Ok(())
}

async fn distribute_handler(
    State(state): State<AppState>,
    Json(system_state): Json<SystemState>,
) -> Result<Json<AllocationResult>, DistributeError> {
    check_processor_limit(&state.config, system_state.num_processors)?;
    let (_, result) = run_distribution(state.distributor, system_state).await?;
    Ok(Json(result))
}

async fn generate_test_data_handler(
    State(state): State<AppState>,
    Query(params): Query<GenerateParams>,
) -> Result<Json<GeneratedData>, DistributeError> {
    let num_processes = params
        .num_processes
        .unwrap_or(state.config.default_num_processes);
    let num_processors = params
        .num_processors
        .unwrap_or(state.config.default_num_processors);

    if num_processes > state.config.max_generated_processes {
        return Err(DistributeError::InvalidArgument(format!(
            "num_processes must be at most {}, got {num_processes}",
            state.config.max_generated_processes
        )));
    }
    check_processor_limit(&state.config, num_processors)?;

    let system_state =
        TestDataGenerator::from_entropy().generate_state(num_processes, num_processors);
    let (system_state, allocation_result) =
        run_distribution(state.distributor, system_state).await?;

    Ok(Json(GeneratedData {
        system_state,
        allocation_result,
    }))
}

async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}

/// Runs the distribution off the async workers; a panic becomes `Internal`.
async fn run_distribution(
    distributor: WorkloadDistributor,
    system_state: SystemState,
) -> Result<(SystemState, AllocationResult), DistributeError> {
    tokio::task::spawn_blocking(move || {
        distributor
            .distribute(&system_state.processes, system_state.num_processors)
            .map(|result| (system_state, result))
    })
    .await
    .map_err(|e| DistributeError::Internal(e.to_string()))?
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install SIGINT handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received SIGINT, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_string(response: Response) -> String {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(body.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_internal_error_is_opaque() {
        let response = DistributeError::Internal("secret worker state".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_string(response).await;
        assert_eq!(body, r#"{"detail":"internal server error"}"#);
        assert!(!body.contains("secret"));
    }

    #[tokio::test]
    async fn test_invalid_argument_keeps_detail() {
        let err = DistributeError::InvalidArgument("num_processors must be at least 1".into());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_string(response).await,
            r#"{"detail":"num_processors must be at least 1"}"#
        );
    }

    #[test]
    fn test_processor_limit() {
        let config = ServerConfig::default().with_max_processors(4);
        assert!(check_processor_limit(&config, 4).is_ok());
        let err = check_processor_limit(&config, 5).unwrap_err();
        assert!(err.is_invalid_argument());
    }
}
