use axum::{routing::get, Router};

use crate::app::AppState;
use crate::handler::summary::{export_csv, export_report, get_summary};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_summary))
        .route("/export.csv", get(export_csv))
        .route("/report", get(export_report))
}
