use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use serde_json::Value;

use crate::api_models::esg_response::{EsgResponseView, PreviewRow};
use crate::app::AppState;
use crate::handler::auth::resolve_owner;
use crate::handler::error::AppError;
use crate::models::{NewEsgResponse, RawSubmission};
use crate::repositories::esg_response;
use crate::services::normalizer::normalize;
use crate::utils::session::CurrentUser;

/// Single submissions get a single row back, batches get an array.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum CreatedResponses {
    One(EsgResponseView),
    Many(Vec<EsgResponseView>),
}

/// 提交一个或多个财年的 ESG 数据
pub async fn create_responses(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<CreatedResponses>), AppError> {
    let submission = RawSubmission::from(&body);
    let is_batch = submission.is_batch();
    let records = normalize(submission);
    if records.is_empty() {
        return Err(AppError::BadRequest("submission contains no rows".to_string()));
    }

    let mut conn = state.db_pool.get().map_err(|_| AppError::InternalServerError)?;
    let owner = resolve_owner(&mut conn, &current)?;

    let rows: Vec<NewEsgResponse> = records
        .into_iter()
        .map(|record| NewEsgResponse::for_owner(owner.id, record))
        .collect();

    let created = esg_response::create_batch(&mut conn, &rows).map_err(|e| {
        tracing::error!("Failed to store ESG responses for user {}: {}", owner.id, e);
        AppError::InternalServerError
    })?;
    tracing::info!("Stored {} ESG response(s) for user {}", created.len(), owner.id);

    let views: Vec<EsgResponseView> = created.into_iter().map(Into::into).collect();
    let body = shape(is_batch, views).ok_or(AppError::InternalServerError)?;
    Ok((StatusCode::CREATED, Json(body)))
}

/// `None` only when a single submission produced no stored row.
fn shape(is_batch: bool, views: Vec<EsgResponseView>) -> Option<CreatedResponses> {
    if is_batch {
        Some(CreatedResponses::Many(views))
    } else {
        views.into_iter().next().map(CreatedResponses::One)
    }
}

/// 获取当前用户的全部 ESG 数据（按创建时间倒序）
pub async fn list_responses(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<Vec<EsgResponseView>>, AppError> {
    let mut conn = state.db_pool.get().map_err(|_| AppError::InternalServerError)?;
    let owner = resolve_owner(&mut conn, &current)?;

    let rows = esg_response::list_by_owner(&mut conn, owner.id).map_err(|e| {
        tracing::error!("Failed to list ESG responses for user {}: {}", owner.id, e);
        AppError::InternalServerError
    })?;

    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

/// 草稿预览：只做归一化和比率计算，不落库
pub async fn preview_responses(Json(body): Json<Value>) -> Json<Vec<PreviewRow>> {
    let rows = normalize(RawSubmission::from(&body))
        .into_iter()
        .map(PreviewRow::from)
        .collect();
    Json(rows)
}
