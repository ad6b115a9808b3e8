//! Dashboard Routes
//!
//! - GET /         - Record table, problem chart and entry form
//! - POST /records - Entry form submission

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Form,
};
use chrono::Local;
use std::sync::Arc;

use crate::records::{NewRecord, RecordForm};
use crate::web::dto::DashboardParams;
use crate::web::page::{DashboardView, Notice, ADDED_MESSAGE};
use crate::web::state::AppState;

/// Where a successful submission lands; a fresh page means a reset form
pub const ADDED_REDIRECT: &str = "/?added=1";

/// GET /
///
/// Every request re-reads the sheet.
pub async fn show_dashboard(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DashboardParams>,
) -> Html<String> {
    let notice = params
        .added()
        .then(|| Notice::Success(ADDED_MESSAGE.to_string()));

    let form = RecordForm::fresh(Local::now().naive_local());
    Html(load_view(&state, form, notice).await.render())
}

/// POST /records
///
/// Validates the submission before anything is sent. On success redirects
/// to a fresh page; otherwise re-renders with the submitted values kept.
pub async fn submit_form(
    State(state): State<Arc<AppState>>,
    Form(form): Form<RecordForm>,
) -> Response {
    let record = match NewRecord::from_form(&form) {
        Ok(record) => record,
        Err(e) => {
            tracing::info!(error = %e, "Rejected form submission");
            let view = load_view(&state, form, Some(Notice::Error(e.to_string()))).await;
            return (StatusCode::UNPROCESSABLE_ENTITY, Html(view.render())).into_response();
        }
    };

    match state.store.append_record(&record).await {
        Ok(()) => {
            tracing::info!(machine = %record.machine, problem = %record.problem, "Record submitted");
            (StatusCode::SEE_OTHER, [(header::LOCATION, ADDED_REDIRECT)]).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to append record");
            let notice = Notice::Error(format!("Failed to add record: {}", e));
            let view = load_view(&state, form, Some(notice)).await;
            (StatusCode::BAD_GATEWAY, Html(view.render())).into_response()
        }
    }
}

/// Fetch records and options side by side; failures become page banners
async fn load_view(state: &AppState, form: RecordForm, notice: Option<Notice>) -> DashboardView {
    let (records, options) = tokio::join!(state.store.fetch_records(), state.store.fetch_options());

    let mut load_errors = Vec::new();

    let records = records.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to fetch records");
        load_errors.push(format!("Failed to load data: {}", e));
        Vec::new()
    });

    let options = options.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to fetch options");
        load_errors.push(format!("Failed to load form options: {}", e));
        Default::default()
    });

    DashboardView {
        title: state.dashboard.title.clone(),
        form_title: state.dashboard.form_title.clone(),
        records,
        options,
        load_errors,
        form,
        notice,
    }
}
