pub mod extract;
pub mod health;
pub mod params;

use axum::{
    routing::{get, post},
    Router,
};

use crate::auth::handlers as auth;
use crate::interviews::handlers as interviews;
use crate::questions::handlers as questions;
use crate::state::AppState;
use crate::study_plans::handlers as study_plans;
use crate::summaries::handlers as summaries;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        // Accounts
        .route("/users", post(auth::handle_create_user))
        .route("/users/:id", get(auth::handle_get_user))
        .route("/login", post(auth::handle_login))
        // Quizzes
        .route(
            "/questions/generate-questions",
            post(questions::handle_generate_questions),
        )
        .route("/questions/my-tests", get(questions::handle_my_tests))
        .route(
            "/questions/:test_id",
            get(questions::handle_get_test_questions),
        )
        // Summaries
        .route(
            "/summary/generate-summary",
            post(summaries::handle_generate_summary),
        )
        .route("/summary", get(summaries::handle_list_summaries))
        .route(
            "/summary/:id",
            get(summaries::handle_get_summary).delete(summaries::handle_delete_summary),
        )
        // Study plans
        .route(
            "/studyplan/generate-studyplan",
            post(study_plans::handle_generate_study_plan),
        )
        .route("/studyplan", get(study_plans::handle_list_study_plans))
        .route(
            "/studyplan/:id",
            get(study_plans::handle_get_study_plan).delete(study_plans::handle_delete_study_plan),
        )
        .route(
            "/studyplan/:id/reference",
            get(study_plans::handle_get_quick_reference),
        )
        // Interviews
        .route(
            "/interviews/generate-interview-questions",
            post(interviews::handle_generate_interview),
        )
        .route("/interviews", get(interviews::handle_list_interviews))
        .route(
            "/interviews/:id",
            get(interviews::handle_get_interview).delete(interviews::handle_delete_interview),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::Value;
    use tower::ServiceExt;
    use uuid::Uuid;

    use super::*;
    use crate::agent::testing::ScriptedModel;
    use crate::auth::token::create_access_token;
    use crate::config::Config;
    use crate::db::lazy_pool;
    use crate::research::{build_http_client, WebResearch};

    const BOUNDARY: &str = "levelup-test-boundary";

    fn test_state(model: Arc<ScriptedModel>) -> AppState {
        let config = Config::for_tests();
        AppState {
            db: lazy_pool(&config.database_url),
            llm: model,
            research: WebResearch::new(
                build_http_client().unwrap(),
                "http://127.0.0.1:9/html/".to_string(),
                config.page_max_chars,
                config.max_web_sources,
            ),
            config,
        }
    }

    fn bearer() -> String {
        let token =
            create_access_token(Uuid::new_v4(), "ada", &Config::for_tests()).unwrap();
        format!("Bearer {token}")
    }

    fn multipart_body(filename: &str, content: &[u8]) -> Vec<u8> {
        let mut body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; \
             filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn upload_request(uri: &str, filename: &str, content: &[u8]) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::AUTHORIZATION, bearer())
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body(filename, content)))
            .unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_root_says_hello() {
        let app = build_router(test_state(Arc::new(ScriptedModel::default())));
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"hello world");
    }

    #[tokio::test]
    async fn test_missing_token_is_rejected_before_any_agent_runs() {
        let model = Arc::new(ScriptedModel::default());
        let app = build_router(test_state(model.clone()));

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/studyplan/generate-studyplan")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"topic": "Rust"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
        assert!(model.calls().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_token_is_rejected() {
        let app = build_router(test_state(Arc::new(ScriptedModel::default())));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/summary")
                    .header(header::AUTHORIZATION, "Bearer not-a-jwt")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn test_bad_detail_level_is_rejected_before_extraction() {
        let model = Arc::new(ScriptedModel::default());
        let app = build_router(test_state(model.clone()));

        // An unsupported file would also fail; the query must win.
        let response = app
            .oneshot(upload_request(
                "/summary/generate-summary?detail_level=extreme",
                "slides.pptx",
                b"irrelevant",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("low, medium, high"));
        assert!(model.calls().is_empty());
    }

    #[tokio::test]
    async fn test_unsupported_upload_is_rejected() {
        let model = Arc::new(ScriptedModel::default());
        let app = build_router(test_state(model.clone()));

        let response = app
            .oneshot(upload_request(
                "/questions/generate-questions?difficulty=easy&test_title=Bio",
                "slides.pptx",
                b"irrelevant",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("Unsupported file format"));
        assert!(model.calls().is_empty());
    }

    #[tokio::test]
    async fn test_empty_text_upload_is_rejected() {
        let model = Arc::new(ScriptedModel::default());
        let app = build_router(test_state(model.clone()));

        let response = app
            .oneshot(upload_request(
                "/summary/generate-summary",
                "blank.txt",
                b"   \n  ",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(model.calls().is_empty());
    }

    #[tokio::test]
    async fn test_question_query_is_validated() {
        let app = build_router(test_state(Arc::new(ScriptedModel::default())));

        let response = app
            .oneshot(upload_request(
                "/questions/generate-questions?difficulty=easy&test_title=Bio&num_questions=51",
                "notes.txt",
                b"Cells divide.",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_generation_failure_is_500_before_persistence() {
        let model = Arc::new(ScriptedModel::failing());
        let app = build_router(test_state(model.clone()));

        let response = app
            .oneshot(upload_request(
                "/questions/generate-questions?difficulty=easy&test_title=Bio&num_questions=3",
                "notes.txt",
                b"Photosynthesis converts light into chemical energy.",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "LLM_ERROR");
        assert_eq!(model.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_malformed_email_is_rejected() {
        let app = build_router(test_state(Arc::new(ScriptedModel::default())));

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/users")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        r#"{"username": "ada", "email": "not-an-email", "password": "pw"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    async fn assert_validation_error(response: Response) {
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(body["error"]["message"].as_str().is_some_and(|m| !m.is_empty()));
    }

    #[tokio::test]
    async fn test_malformed_json_body_uses_error_envelope() {
        let app = build_router(test_state(Arc::new(ScriptedModel::default())));

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/users")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"username": "ada", "email": "#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_validation_error(response).await;
    }

    #[tokio::test]
    async fn test_incomplete_login_form_uses_error_envelope() {
        let app = build_router(test_state(Arc::new(ScriptedModel::default())));

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/login")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from("username=ada"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_validation_error(response).await;
    }

    #[tokio::test]
    async fn test_non_uuid_path_uses_error_envelope() {
        let app = build_router(test_state(Arc::new(ScriptedModel::default())));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/users/not-a-uuid")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_validation_error(response).await;
    }

    #[tokio::test]
    async fn test_study_plan_without_topic_is_rejected_before_generation() {
        let model = Arc::new(ScriptedModel::default());
        let app = build_router(test_state(model.clone()));

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/studyplan/generate-studyplan")
                    .header(header::AUTHORIZATION, bearer())
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"subject": "Rust"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_validation_error(response).await;
        assert!(model.calls().is_empty());
    }
}
