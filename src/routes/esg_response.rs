use axum::{routing::post, Router};

use crate::app::AppState;
use crate::handler::esg_response::{create_responses, list_responses, preview_responses};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_responses).get(list_responses))
        .route("/preview", post(preview_responses))
}
