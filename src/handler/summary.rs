use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};

use crate::api_models::summary::SummaryRow;
use crate::app::AppState;
use crate::handler::auth::resolve_owner;
use crate::handler::error::AppError;
use crate::repositories::esg_response;
use crate::services::export::{summary_csv, summary_text, CSV_FILE_NAME};
use crate::utils::session::CurrentUser;

fn load_summary(state: &AppState, current: &CurrentUser) -> Result<Vec<SummaryRow>, AppError> {
    let mut conn = state.db_pool.get().map_err(|_| AppError::InternalServerError)?;
    let owner = resolve_owner(&mut conn, current)?;

    let rows = esg_response::list_by_owner(&mut conn, owner.id).map_err(|e| {
        tracing::error!("Failed to load summary for user {}: {}", owner.id, e);
        AppError::InternalServerError
    })?;

    Ok(rows.iter().map(SummaryRow::from).collect())
}

/// 仪表盘数据：每条记录的四个比率
pub async fn get_summary(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<Vec<SummaryRow>>, AppError> {
    Ok(Json(load_summary(&state, &current)?))
}

/// 导出 CSV
pub async fn export_csv(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Response, AppError> {
    let rows = load_summary(&state, &current)?;
    let body = summary_csv(&rows).map_err(|e| {
        tracing::error!("Failed to build CSV export: {}", e);
        AppError::InternalServerError
    })?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", CSV_FILE_NAME),
            ),
        ],
        body,
    )
        .into_response())
}

/// 文本报告
pub async fn export_report(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Response, AppError> {
    let rows = load_summary(&state, &current)?;
    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        summary_text(&rows),
    )
        .into_response())
}
