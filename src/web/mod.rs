//! Maintlog Web Layer
//!
//! Dashboard and JSON API, built with Axum.
//!
//! # Endpoints
//!
//! ## Dashboard
//! - `GET /` - Record table, problem chart and entry form
//! - `POST /records` - Entry form submission (urlencoded)
//!
//! ## Records
//! - `GET /api/v1/records` - List all records
//! - `POST /api/v1/records` - Append a record
//! - `GET /api/v1/options` - Form option lists
//! - `GET /api/v1/problems` - Records per problem
//!
//! ## Export
//! - `GET /api/v1/export` - Download records as CSV or JSON
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use maintlog::config::Config;
//! use maintlog::sheets;
//! use maintlog::web::{serve, AppState};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let store = sheets::connect(config.backend.sheets_config())?;
//!
//!     let state = AppState::new(store, config.dashboard.clone());
//!     serve(state, &config.server).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod page;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::ServerConfig;

/// Build the router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route(
            "/records",
            get(routes::records::list_records).post(routes::records::create_record),
        )
        .route("/options", get(routes::records::list_options))
        .route("/problems", get(routes::records::problem_summary))
        .route("/export", get(routes::export::export_records));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let shared_state = Arc::new(state);

    Router::new()
        .route("/", get(routes::dashboard::show_dashboard))
        .route("/records", post(routes::dashboard::submit_form))
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(shared_state)
}

/// Start the dashboard server
pub async fn serve(state: AppState, config: &ServerConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Maintlog dashboard listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Maintlog dashboard shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;
    use crate::records::{Record, END_BEFORE_START};
    use crate::sheets::{MemoryStore, RecordStore};
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::Value;
    use std::collections::BTreeMap;
    use tower::util::ServiceExt;

    fn create_test_app(store: MemoryStore) -> (Router, Arc<MemoryStore>) {
        let store = Arc::new(store);
        let dyn_store: Arc<dyn RecordStore> = Arc::clone(&store) as Arc<dyn RecordStore>;
        let state = AppState::new(dyn_store, DashboardConfig::default());
        (build_router(state), store)
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn form_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/records")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    const VALID_FORM: &str = "bu=Food&line=Line+1&product=Biscuit&machine=Oven+A&date=2024-05-03\
        &start=08%3A00&end=09%3A15&problem=Leak&action=Clean&description=O-ring&quantity=2&pic=Sari";

    #[tokio::test]
    async fn test_health_live() {
        let (app, _) = create_test_app(MemoryStore::default());

        let response = app
            .oneshot(Request::builder().uri("/health/live").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_full() {
        let (app, _) = create_test_app(MemoryStore::default());

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["backend"], "memory");
    }

    #[tokio::test]
    async fn test_dashboard_lists_records() {
        let (app, _) = create_test_app(MemoryStore::with_demo_data());

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("<h1>Machine History</h1>"));
        assert!(html.contains("<td>Mixer B</td>"));
        assert!(html.contains("Overheat: 2"));
        assert!(!html.contains(page::ADDED_MESSAGE));
    }

    #[tokio::test]
    async fn test_dashboard_empty_store() {
        let (app, _) = create_test_app(MemoryStore::default());

        let response = app
            .oneshot(Request::builder().uri("/?added=1").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let html = body_text(response).await;
        assert!(html.contains(page::NO_DATA_MESSAGE));
        assert!(html.contains(page::ADDED_MESSAGE));
    }

    #[tokio::test]
    async fn test_dashboard_added_flag_values() {
        for (query, shown) in [("true", true), ("yes", true), ("0", false), ("", false)] {
            let (app, _) = create_test_app(MemoryStore::default());
            let uri = format!("/?added={}", query);

            let response = app
                .oneshot(Request::builder().uri(uri.as_str()).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK, "added={}", query);

            let html = body_text(response).await;
            assert_eq!(html.contains(page::ADDED_MESSAGE), shown, "added={}", query);
        }
    }

    #[tokio::test]
    async fn test_form_submit_redirects() {
        let (app, store) = create_test_app(MemoryStore::with_demo_data());

        let response = app.oneshot(form_request(VALID_FORM)).await.unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            routes::dashboard::ADDED_REDIRECT
        );

        let records = store.fetch_records().await.unwrap();
        let last = records.last().unwrap();
        assert_eq!(records.len(), 4);
        assert_eq!(last.machine, "Oven A");
        assert_eq!(last.start, "08:00");
        assert_eq!(last.end, "09:15");
    }

    #[tokio::test]
    async fn test_form_rejects_inverted_times() {
        let (app, store) = create_test_app(MemoryStore::with_demo_data());
        let body = VALID_FORM.replace("end=09%3A15", "end=08%3A00");

        let response = app.oneshot(form_request(&body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let html = body_text(response).await;
        assert!(html.contains(END_BEFORE_START));
        // Submitted values survive the rejection
        assert!(html.contains(r#"<option value="Oven A" selected>"#));
        assert_eq!(store.len().await, 3);
    }

    #[tokio::test]
    async fn test_form_backend_failure() {
        let (app, store) =
            create_test_app(MemoryStore::with_demo_data().rejecting("Sheet is protected"));

        let response = app.oneshot(form_request(VALID_FORM)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let html = body_text(response).await;
        assert!(html.contains("Failed to add record: Backend rejected the request: Sheet is protected"));
        assert_eq!(store.len().await, 3);
    }

    #[tokio::test]
    async fn test_api_create_record() {
        let (app, store) = create_test_app(MemoryStore::default());

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/records")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        r#"{"machine": "Oven A", "date": "2024-05-03", "start": "10:00", "end": "10:30", "quantity": "1"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_api_create_record_invalid() {
        let (app, store) = create_test_app(MemoryStore::default());

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/records")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        r#"{"date": "2024-05-03", "start": "10:30", "end": "10:30"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_api_problems() {
        let (app, _) = create_test_app(MemoryStore::with_demo_data());

        let response = app
            .oneshot(Request::builder().uri("/api/v1/problems").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["total_records"], 3);
        assert_eq!(body["problems"][0]["problem"], "Overheat");
        assert_eq!(body["problems"][0]["count"], 2);
    }

    #[tokio::test]
    async fn test_api_options() {
        let mut options = BTreeMap::new();
        options.insert("BU".to_string(), vec!["Food".to_string()]);
        let (app, _) = create_test_app(MemoryStore::new(Vec::<Record>::new(), options));

        let response = app
            .oneshot(Request::builder().uri("/api/v1/options").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body, serde_json::json!({"BU": ["", "Food"]}));
    }

    #[tokio::test]
    async fn test_export_csv() {
        let (app, _) = create_test_app(MemoryStore::with_demo_data());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/export?format=csv")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers().get(header::CONTENT_TYPE).unwrap(), "text/csv");
        let csv = body_text(response).await;
        assert_eq!(csv.lines().count(), 4);
        assert!(csv.starts_with("ID,BU,Line"));
    }

    #[tokio::test]
    async fn test_export_unknown_format() {
        let (app, _) = create_test_app(MemoryStore::default());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/export?format=xml")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
