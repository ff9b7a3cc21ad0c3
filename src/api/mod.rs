//! REST API endpoints.
//!
//! Axum-based HTTP API exposing player statistics, metadata, search and
//! recent activity.

pub mod routes;
pub mod state;

use axum::{
    http::{HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use thiserror::Error;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::service::ServiceError;
use state::AppState;

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::InvalidPolarisId(e) => ApiError::BadRequest(e.to_string()),
            ServiceError::Storage(e) => {
                error!("Storage failure: {}", e);
                ApiError::Internal(e.to_string())
            }
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Build the application router. Without a configured origin, CORS
/// allows any.
pub fn build_router(state: AppState, cors_origin: Option<&str>) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/api/players/search", get(routes::players::search_players))
        .route(
            "/api/players/recent",
            get(routes::players::recently_active_players),
        )
        .route("/api/players/:polaris_id", get(routes::players::player_stats))
        .route(
            "/api/players/:polaris_id/metadata",
            get(routes::players::player_metadata),
        )
        .route(
            "/api/players/:polaris_id/player-id",
            get(routes::players::player_id),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors_origin))
        .with_state(state)
}

fn cors_layer(origin: Option<&str>) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods([Method::GET]);
    let Some(origin) = origin.filter(|o| *o != "*") else {
        return layer.allow_origin(AllowOrigin::any());
    };
    match origin.parse::<HeaderValue>() {
        Ok(value) => layer.allow_origin(value),
        Err(e) => {
            warn!("Ignoring invalid CORS origin {:?}: {}", origin, e);
            layer
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StatsConfig;
    use crate::models::{
        CharacterStatRecord, CharacterStatsKey, PlayerProfile, PlayerWithStats,
    };
    use crate::service::PlayerService;
    use crate::storage::{MemoryStore, StoreCall};
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::Value;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn store() -> Arc<MemoryStore> {
        let profile = PlayerProfile {
            player_id: "123456".to_string(),
            polaris_id: "ABC123456789".to_string(),
            name: "TestPlayer".to_string(),
            region_id: None,
            tekken_power: 100000,
            latest_battle: 1735689600,
        };
        let records = vec![CharacterStatRecord::new(
            CharacterStatsKey::new(32, 20001),
            50,
            30,
            15,
        )];
        Arc::new(
            MemoryStore::new()
                .with_now(1735689600)
                .with_player(PlayerWithStats::new(profile, records)),
        )
    }

    fn router(store: Arc<MemoryStore>) -> Router {
        let service = PlayerService::new(store.clone(), store, StatsConfig::default());
        build_router(AppState::new(service), None)
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        // Extractor rejections come back as plain text
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get_json(router(store()), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_player_stats() {
        let (status, body) = get_json(router(store()), "/api/players/ABC123456789").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "TestPlayer");
        assert_eq!(body["region_id"], -1);
        assert_eq!(body["played_characters"]["32"]["wins"], 50);
        assert_eq!(body["played_characters"]["32"]["win_rate"], 62.5);
        assert!(body["played_characters"]["32"]["previous_season_dan_rank"].is_null());
        assert_eq!(body["battles"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_player_stats_not_found() {
        let (status, body) = get_json(router(store()), "/api/players/NONEXISTENT").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_invalid_polaris_id_is_bad_request() {
        let store = store();
        let (status, body) = get_json(router(store.clone()), "/api/players/ABC%40123").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "BAD_REQUEST");
        assert_eq!(body["error"]["message"], "Bad request: Invalid Polaris Id");
        assert!(store.calls().await.is_empty());
    }

    #[tokio::test]
    async fn test_player_metadata() {
        let (status, body) =
            get_json(router(store()), "/api/players/ABC123456789/metadata").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["player_name"], "TestPlayer");
        assert_eq!(body["region_id"], -1);
    }

    #[tokio::test]
    async fn test_player_id() {
        let (status, body) =
            get_json(router(store()), "/api/players/ABC123456789/player-id").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["player_id"], "000000000000123456");
    }

    #[tokio::test]
    async fn test_search() {
        let store = store();
        let (status, body) = get_json(router(store.clone()), "/api/players/search?query=test").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["polaris_id"], "ABC123456789");
        assert!(matches!(
            store.calls().await.as_slice(),
            [StoreCall::Search { .. }]
        ));
    }

    #[tokio::test]
    async fn test_search_missing_query() {
        let (status, _) = get_json(router(store()), "/api/players/search").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_recent() {
        let (status, body) = get_json(router(store()), "/api/players/recent").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["name"], "TestPlayer");
    }

    #[test]
    fn test_service_error_mapping() {
        let err: ApiError = ServiceError::InvalidPolarisId(crate::models::InvalidPolarisId).into();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }
}
