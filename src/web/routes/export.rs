//! Export Routes
//!
//! - GET /api/v1/export?format=csv|json - Download the record table

use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use std::sync::Arc;

use crate::report::ExportFormat;
use crate::web::dto::ExportParams;
use crate::web::error::ApiResult;
use crate::web::state::AppState;

/// GET /api/v1/export
pub async fn export_records(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ExportParams>,
) -> ApiResult<Response> {
    let format: ExportFormat = params.format.parse()?;
    let records = state.store.fetch_records().await?;
    let body = format.render(&records)?;

    let filename = format!(
        "maintlog_export_{}.{}",
        Utc::now().format("%Y%m%d_%H%M%S"),
        format.extension()
    );

    tracing::info!(rows = records.len(), format = format.extension(), "Exported records");

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        Body::from(body),
    )
        .into_response())
}
