//! HTTP handlers for reporting endpoints

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::error::AppResult;
use crate::services::reports::{MonthlyReportDetail, ReportService};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    pub year: i32,
    pub month: u32,
}

/// Monthly profit/loss report
pub async fn monthly_report(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> AppResult<Json<MonthlyReportDetail>> {
    let service = ReportService::new(state.db, state.config.document.exchange_rate);
    let detail = service.monthly(query.year, query.month).await?;
    Ok(Json(detail))
}

/// Monthly report as a CSV download
pub async fn export_monthly_report(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> AppResult<impl IntoResponse> {
    let service = ReportService::new(state.db, state.config.document.exchange_rate);
    let csv_data = service.export_monthly_csv(query.year, query.month).await?;

    let filename = format!("report-{}-{:02}.csv", query.year, query.month);
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        csv_data,
    ))
}
