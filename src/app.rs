use std::sync::Arc;

use axum::Router;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use tower_http::trace::{
    DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer,
};
use tracing::Level;

use crate::routes;
use crate::utils::config::{AppConfig, DatabaseConfig};
use crate::utils::middleware;
use crate::utils::session::SessionKeys;

pub type DbPool = Pool<ConnectionManager<PgConnection>>;

#[derive(Clone)]
pub struct AppState {
    pub db_pool: DbPool,
    pub sessions: Arc<SessionKeys>,
}

pub fn create_pool(cfg: &DatabaseConfig) -> Result<DbPool, diesel::r2d2::PoolError> {
    let manager = ConnectionManager::<PgConnection>::new(cfg.url.as_str());
    Pool::builder().max_size(cfg.max_connections).build(manager)
}

pub fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    let db_pool = create_pool(&cfg.database)?;
    let sessions = Arc::new(SessionKeys::new(&cfg.auth));
    Ok(build_app_with_state(AppState { db_pool, sessions }))
}

pub fn build_app_with_state(state: AppState) -> Router {
    routes::build_routes()
        .with_state(state)
        .layer(middleware::cors_layer())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::utils::config::AuthConfig;

    /// Router backed by a pool that never connects; only routes that stop
    /// before touching the database can be exercised here.
    fn test_app() -> (Router, Arc<SessionKeys>) {
        let manager = ConnectionManager::<PgConnection>::new("postgres://unused@127.0.0.1:1/unused");
        let db_pool = Pool::builder()
            .min_idle(Some(0))
            .connection_timeout(Duration::from_millis(50))
            .build_unchecked(manager);
        let sessions = Arc::new(SessionKeys::new(&AuthConfig {
            jwt_secret: "test-secret".to_string(),
            session_ttl: Duration::from_secs(3600),
        }));
        let app = build_app_with_state(AppState {
            db_pool,
            sessions: sessions.clone(),
        });
        (app, sessions)
    }

    async fn body_json(resp: axum::response::Response) -> Value {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_healthz() {
        let (app, _) = test_app();
        let resp = app
            .oneshot(Request::get("/healthz").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"ok");
    }

    #[tokio::test]
    async fn test_preview_computes_ratios_without_storage() {
        let (app, _) = test_app();
        let body = json!([
            {
                "year": "FY24",
                "electricity": 1000,
                "renewable": 250,
                "employees": 20,
                "femaleEmployees": 8,
                "revenue": 500,
                "emissions": 50,
                "communitySpend": 10,
                "privacyPolicy": "Yes"
            },
            { "year": "FY25", "revenue": "", "emissions": "abc" }
        ]);
        let resp = app
            .oneshot(
                Request::post("/api/responses/preview")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let json = body_json(resp).await;
        let rows = json.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["record"]["financialYear"], "FY24");
        assert_eq!(rows[0]["record"]["privacyPolicy"], true);
        assert_eq!(rows[0]["ratios"]["renewableRatio"], 25.0);
        assert_eq!(rows[0]["ratios"]["diversityRatio"], 40.0);
        assert_eq!(rows[0]["ratios"]["communitySpendRatio"], 2.0);
        assert!((rows[0]["ratios"]["carbonIntensity"].as_f64().unwrap() - 0.1).abs() < 1e-12);
        assert_eq!(rows[1]["record"]["financialYear"], "FY25");
        assert_eq!(rows[1]["record"]["emissions"], 0.0);
        assert_eq!(rows[1]["ratios"]["carbonIntensity"], 0.0);
    }

    #[tokio::test]
    async fn test_responses_require_bearer_token() {
        let (app, _) = test_app();
        for (method, uri) in [
            ("GET", "/api/responses"),
            ("POST", "/api/responses"),
            ("POST", "/api/auth/responses"),
            ("GET", "/api/summary"),
            ("GET", "/api/summary/export.csv"),
            ("GET", "/api/summary/report"),
            ("GET", "/api/auth/session"),
        ] {
            let resp = app
                .clone()
                .oneshot(
                    Request::builder()
                        .method(method)
                        .uri(uri)
                        .header(header::CONTENT_TYPE, "application/json")
                        .body(Body::from("{}"))
                        .unwrap(),
                )
                .await
                .unwrap();
            assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "{method} {uri}");
        }
    }

    #[tokio::test]
    async fn test_tampered_token_is_rejected() {
        let (app, _) = test_app();
        let other = SessionKeys::new(&AuthConfig {
            jwt_secret: "someone-else".to_string(),
            session_ttl: Duration::from_secs(3600),
        });
        let token = other
            .issue(&crate::models::User {
                id: 1,
                name: "Asha".to_string(),
                email: "asha@example.com".to_string(),
                password_hash: String::new(),
                created_at: chrono::Utc::now(),
            })
            .unwrap();

        let resp = app
            .oneshot(
                Request::get("/api/summary")
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let json = body_json(resp).await;
        assert_eq!(json["error"], "Unauthorized");
    }

    #[tokio::test]
    async fn test_empty_batch_is_rejected() {
        let (app, sessions) = test_app();
        let token = sessions
            .issue(&crate::models::User {
                id: 1,
                name: "Asha".to_string(),
                email: "asha@example.com".to_string(),
                password_hash: String::new(),
                created_at: chrono::Utc::now(),
            })
            .unwrap();

        let resp = app
            .oneshot(
                Request::post("/api/responses")
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("[]"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_register_requires_credentials() {
        let (app, _) = test_app();
        let resp = app
            .oneshot(
                Request::post("/api/auth/register")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        json!({ "name": "Asha", "email": " ", "password": "pw" }).to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
