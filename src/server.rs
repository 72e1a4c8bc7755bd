//! HTTP surface for the registry
//!
//! Thin transport layer over [`RegistrationEngine`]: route wiring, payload
//! types, and the error-to-status mapping. All registration semantics live in
//! the engine.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;

use crate::engine::RegistrationEngine;
use crate::error::RegistryError;
use crate::record::SchemaRecord;
use crate::storage::StorageGateway;

/// Shared state handed to every handler
pub struct AppState<S: StorageGateway> {
    pub engine: RegistrationEngine<S>,
}

/// Body of a registration request
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub schema: String,
}

/// Body of a successful registration response
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub id: u64,
    pub version: u32,
}

/// Error payload, Confluent-style numeric codes
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error_code: u32,
    pub message: String,
}

impl IntoResponse for RegistryError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match &self {
            RegistryError::InvalidSubject | RegistryError::InvalidSchema(_) => {
                (StatusCode::BAD_REQUEST, 40001, self.to_string())
            }
            RegistryError::SubjectNotFound(_) => {
                (StatusCode::NOT_FOUND, 40401, self.to_string())
            }
            RegistryError::LockTimeout { .. } | RegistryError::StorageUnavailable(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                50000,
                "Internal server error".to_string(),
            ),
        };

        (status, Json(ErrorBody { error_code, message })).into_response()
    }
}

/// Build the registry router
pub fn router<S: StorageGateway + 'static>(state: Arc<AppState<S>>) -> Router {
    Router::new()
        .route("/subjects", get(list_subjects))
        .route("/subjects/:subject/versions", post(register).get(list_versions))
        .route("/subjects/:subject/versions/latest", get(latest))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn register<S: StorageGateway>(
    State(state): State<Arc<AppState<S>>>,
    Path(subject): Path<String>,
    Json(body): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>, RegistryError> {
    let registration = state.engine.register(&subject, &body.schema)?;
    Ok(Json(RegisterResponse {
        id: registration.record.id,
        version: registration.record.version,
    }))
}

async fn latest<S: StorageGateway>(
    State(state): State<Arc<AppState<S>>>,
    Path(subject): Path<String>,
) -> Result<Json<SchemaRecord>, RegistryError> {
    Ok(Json(state.engine.latest(&subject)?))
}

async fn list_versions<S: StorageGateway>(
    State(state): State<Arc<AppState<S>>>,
    Path(subject): Path<String>,
) -> Result<Json<Vec<u32>>, RegistryError> {
    Ok(Json(state.engine.list_versions(&subject)?))
}

async fn list_subjects<S: StorageGateway>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Vec<String>>, RegistryError> {
    Ok(Json(state.engine.list_subjects()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use crate::validator::{SchemaFormat, Validator};
    use axum::body::to_bytes;

    const USER_SCHEMA: &str =
        r#"{"type": "record", "name": "User", "fields": [{"name": "id", "type": "long"}]}"#;

    fn state() -> Arc<AppState<MemoryStore>> {
        Arc::new(AppState {
            engine: RegistrationEngine::new(
                Arc::new(MemoryStore::new()),
                Validator::new(SchemaFormat::Avro),
            ),
        })
    }

    async fn status_and_body(err: RegistryError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_invalid_schema_maps_to_400_with_code_40001() {
        let (status, body) =
            status_and_body(RegistryError::InvalidSchema("bad syntax".to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error_code"], 40001);
        assert!(body["message"].as_str().unwrap().contains("bad syntax"));
    }

    #[tokio::test]
    async fn test_invalid_subject_maps_to_400_with_code_40001() {
        let (status, body) = status_and_body(RegistryError::InvalidSubject).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error_code"], 40001);
    }

    #[tokio::test]
    async fn test_subject_not_found_maps_to_404_with_code_40401() {
        let (status, body) =
            status_and_body(RegistryError::SubjectNotFound("orders".to_string())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error_code"], 40401);
        assert!(body["message"].as_str().unwrap().contains("orders"));
    }

    #[tokio::test]
    async fn test_infrastructure_errors_map_to_500_with_message_suppressed() {
        for err in [
            RegistryError::LockTimeout {
                subject: "orders".to_string(),
            },
            RegistryError::StorageUnavailable("connection refused".to_string()),
        ] {
            let (status, body) = status_and_body(err).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(body["error_code"], 50000);
            // Infrastructure detail stays out of the response body
            assert_eq!(body["message"], "Internal server error");
        }
    }

    #[tokio::test]
    async fn test_register_returns_id_and_version() {
        let state = state();

        let Json(resp) = register(
            State(Arc::clone(&state)),
            Path("orders".to_string()),
            Json(RegisterRequest {
                schema: USER_SCHEMA.to_string(),
            }),
        )
        .await
        .unwrap();

        assert_eq!(resp.version, 1);
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json, serde_json::json!({"id": resp.id, "version": 1}));
    }

    #[tokio::test]
    async fn test_register_with_invalid_schema_yields_400_response() {
        let state = state();

        let err = register(
            State(Arc::clone(&state)),
            Path("orders".to_string()),
            Json(RegisterRequest {
                schema: "not a schema".to_string(),
            }),
        )
        .await
        .unwrap_err();

        let (status, body) = status_and_body(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error_code"], 40001);
    }

    #[tokio::test]
    async fn test_latest_on_unknown_subject_yields_404_response() {
        let state = state();

        let err = latest(State(Arc::clone(&state)), Path("missing".to_string()))
            .await
            .unwrap_err();

        let (status, body) = status_and_body(err).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error_code"], 40401);
    }
}
