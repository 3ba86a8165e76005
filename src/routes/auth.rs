use axum::{
    routing::{get, post},
    Router,
};

use crate::app::AppState;
use crate::handler::auth::{login, register, session};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/session", get(session))
}
