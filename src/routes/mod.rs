mod datos;
mod health;
mod swagger;

use std::sync::Arc;

use axum::http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::BackendConfig;
use crate::external::FlowClient;
use crate::{database, AppState, Backend, Config};

pub async fn make_app(config: Config) -> anyhow::Result<Router> {
    let level = if config.is_production() {
        tracing::Level::INFO
    } else {
        tracing::Level::DEBUG
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    let backend = match &config.backend {
        BackendConfig::Database { db_url } => {
            info!("Connecting to PostgreSQL...");
            let sqlx_db_connection = database::connect_sqlx(db_url).await;
            let db = database::PostgresDatabase::new(sqlx_db_connection);
            db.ensure_schema().await?;
            info!("Connected to PostgreSQL, tabla \"datos\" lista");
            Backend::Database(db)
        }
        BackendConfig::Flow(urls) => {
            info!("Using Power Automate flows for persistence");
            Backend::Flow(FlowClient::new(urls.clone()))
        }
    };

    let state = Arc::new(AppState { backend, config });
    build_router(state)
}

/// Assembles the router around an already-initialized state; split out of
/// [make_app] so tests can drive it without env or connections.
pub fn build_router(state: Arc<AppState>) -> anyhow::Result<Router> {
    // Local dev front-end plus the configured production origin
    let mut origins = vec![HeaderValue::from_static("http://localhost:5173")];
    if let Some(frontend_url) = &state.config.frontend_url {
        origins.push(frontend_url.parse::<HeaderValue>()?);
    }
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_credentials(true)
        .allow_headers([AUTHORIZATION, ACCEPT, CONTENT_TYPE]);

    let ret = Router::new()
        .route("/", get(health::root_status_handler))
        .route("/health", get(health::health_checker_handler))
        .nest("/api/datos", datos::datos_routes())
        .merge(swagger::build_documentation())
        .fallback(not_found_handler)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    Ok(ret)
}

/// Unmatched routes answer with the error envelope plus the offending path
async fn not_found_handler(uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "success": false,
            "error": "Endpoint no encontrado",
            "path": uri.path(),
        })),
    )
}

#[cfg(test)]
pub(crate) fn test_app() -> Router {
    use crate::config::FlowUrls;

    // Inert flow URLs: validation and routing tests never reach the backend
    let urls = FlowUrls {
        create: "http://localhost:9/create".to_string(),
        read_all: "http://localhost:9/read-all".to_string(),
        read_one: "http://localhost:9/read-one".to_string(),
        update: "http://localhost:9/update".to_string(),
        delete: "http://localhost:9/delete".to_string(),
    };
    let config = Config {
        port: 3001,
        environment: "test".to_string(),
        frontend_url: None,
        backend: BackendConfig::Flow(urls.clone()),
    };
    let state = Arc::new(AppState {
        backend: Backend::Flow(FlowClient::new(urls)),
        config,
    });
    build_router(state).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::Value;
    use tower::ServiceExt;

    #[tokio::test]
    async fn health_endpoint_reports_ok() {
        let app = test_app();
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
        assert!(json["timestamp"].is_string());
    }

    #[tokio::test]
    async fn root_reports_service_status() {
        let app = test_app();
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "online");
        assert_eq!(json["database"], "SharePoint (Power Automate)");
        assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn unmatched_route_answers_with_envelope_and_path() {
        let app = test_app();
        let request = Request::builder()
            .uri("/api/otros")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Endpoint no encontrado");
        assert_eq!(json["path"], "/api/otros");
    }
}
