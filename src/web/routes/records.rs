//! Record Routes
//!
//! JSON access to the same data the dashboard shows.
//!
//! - GET /api/v1/records  - All records
//! - POST /api/v1/records - Append a record
//! - GET /api/v1/options  - Form option lists
//! - GET /api/v1/problems - Problem chart data

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::records::{NewRecord, OptionCatalog, RecordForm};
use crate::report::problem_counts;
use crate::web::dto::{CreateRecordResponse, ProblemSummaryResponse, RecordListResponse};
use crate::web::error::ApiResult;
use crate::web::state::AppState;

/// GET /api/v1/records
pub async fn list_records(State(state): State<Arc<AppState>>) -> ApiResult<Json<RecordListResponse>> {
    let records = state.store.fetch_records().await?;
    let total = records.len();
    Ok(Json(RecordListResponse { records, total }))
}

/// GET /api/v1/options
pub async fn list_options(State(state): State<Arc<AppState>>) -> ApiResult<Json<OptionCatalog>> {
    Ok(Json(state.store.fetch_options().await?))
}

/// POST /api/v1/records
///
/// Same fields as the HTML form, as JSON.
pub async fn create_record(
    State(state): State<Arc<AppState>>,
    Json(form): Json<RecordForm>,
) -> ApiResult<(StatusCode, Json<CreateRecordResponse>)> {
    let record = NewRecord::from_form(&form)?;
    state.store.append_record(&record).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateRecordResponse {
            status: "success".to_string(),
        }),
    ))
}

/// GET /api/v1/problems
pub async fn problem_summary(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ProblemSummaryResponse>> {
    let records = state.store.fetch_records().await?;
    Ok(Json(ProblemSummaryResponse {
        problems: problem_counts(&records),
        total_records: records.len(),
    }))
}
