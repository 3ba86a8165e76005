use axum::Router;

use crate::app::AppState;

mod auth;
mod esg_response;
mod root;
mod summary;

pub fn build_routes() -> Router<AppState> {
    Router::new()
        // 根路径与健康检查
        .merge(root::router())
        // 业务 API 统一挂在 /api 前缀下
        .nest(
            "/api",
            Router::new()
                .nest("/auth", auth::router())
                .nest("/responses", esg_response::router())
                // 旧前端提交到 /api/auth/responses
                .nest("/auth/responses", esg_response::router())
                .nest("/summary", summary::router()),
        )
}
