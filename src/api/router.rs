//! API router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! Routes are nested under `/api/`. CORS is open so a browser front end
//! served from another origin can call it.

use std::sync::Arc;

use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::api::endpoints;
use crate::api::types::ApiContext;
use crate::core_state::CoreState;

/// Build the API router.
pub fn api_router(core: Arc<CoreState>) -> Router {
    build_router(ApiContext::new(core))
}

fn build_router(ctx: ApiContext) -> Router {
    // NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
    let api = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/categories", get(endpoints::health::categories))
        .route("/practitioners", get(endpoints::practitioners::list))
        .route("/practitioners/:id", get(endpoints::practitioners::detail))
        .route("/selection", get(endpoints::selection::current))
        .route("/selection/category", put(endpoints::selection::set_category))
        .route("/selection/search", put(endpoints::selection::set_search))
        .route("/selection/clear", post(endpoints::selection::clear))
        .route("/assistant/open", post(endpoints::assistant::open))
        .route("/assistant/close", post(endpoints::assistant::close))
        .route("/assistant/recommend", post(endpoints::assistant::recommend))
        .route("/assistant/status", get(endpoints::assistant::status))
        .with_state(ctx);

    Router::new()
        .nest("/api", api)
        .layer(CorsLayer::permissive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::classification::{ClassificationGateway, LlmClient, MockLlmClient};
    use crate::directory::Directory;

    fn test_core_state(client: Arc<dyn LlmClient>) -> Arc<CoreState> {
        Arc::new(CoreState::new(
            Directory::bundled().unwrap(),
            ClassificationGateway::new(client, "test-model"),
        ))
    }

    fn default_core() -> Arc<CoreState> {
        test_core_state(Arc::new(MockLlmClient::new("Cardiologist")))
    }

    fn make_request(method: &str, uri: &str, body: Option<serde_json::Value>) -> Request<Body> {
        let builder = Request::builder().method(method).uri(uri);
        match body {
            Some(json) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn response_json(response: axum::http::Response<Body>) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), 1 << 20)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    async fn call(
        core: &Arc<CoreState>,
        method: &str,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        let response = api_router(core.clone())
            .oneshot(make_request(method, uri, body))
            .await
            .unwrap();
        let status = response.status();
        (status, response_json(response).await)
    }

    #[tokio::test]
    async fn health_response_shape() {
        let core = default_core();
        let (status, json) = call(&core, "GET", "/api/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
        assert_eq!(json["practitioners"], core.directory().len());
    }

    #[tokio::test]
    async fn categories_in_display_order() {
        let (status, json) = call(&default_core(), "GET", "/api/categories", None).await;
        assert_eq!(status, StatusCode::OK);
        let labels: Vec<&str> = json
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert_eq!(
            labels,
            vec!["All", "Physician", "Orthopedics", "Medicine", "Cardiologist", "Surgeon", "Oncology", "Others"]
        );
    }

    #[tokio::test]
    async fn practitioners_default_lists_everything() {
        let core = default_core();
        let (status, json) = call(&core, "GET", "/api/practitioners", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["visible_count"], core.directory().len());
        assert_eq!(json["category"], "All");
        assert!(json["empty"].is_null());
    }

    #[tokio::test]
    async fn practitioners_query_does_not_mutate_selection() {
        let core = default_core();
        let (status, json) =
            call(&core, "GET", "/api/practitioners?category=Oncology", None).await;
        assert_eq!(status, StatusCode::OK);
        for p in json["practitioners"].as_array().unwrap() {
            assert_eq!(p["category"], "Oncology");
        }
        assert_eq!(
            core.selection().unwrap().active_category,
            crate::models::Category::All
        );
    }

    #[tokio::test]
    async fn practitioners_rejects_unknown_category() {
        let (status, json) =
            call(&default_core(), "GET", "/api/practitioners?category=Dentist", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn practitioner_detail_and_not_found() {
        let core = default_core();
        let id = core.directory().records()[0].id.clone();
        let (status, json) = call(&core, "GET", &format!("/api/practitioners/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["id"], id);
        assert!(json.get("avatarUrl").is_some());

        let (status, json) = call(&core, "GET", "/api/practitioners/nope", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn search_and_category_mutations_compose() {
        let core = default_core();
        let (status, json) = call(
            &core,
            "PUT",
            "/api/selection/category",
            Some(serde_json::json!({"category": "Cardiologist"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["selection"]["active_category"], "Cardiologist");

        let (_, json) = call(
            &core,
            "PUT",
            "/api/selection/search",
            Some(serde_json::json!({"text": "RIVERSIDE"})),
        )
        .await;
        let visible = json["view"]["practitioners"].as_array().unwrap();
        assert!(!visible.is_empty());
        for p in visible {
            assert_eq!(p["category"], "Cardiologist");
        }
    }

    #[tokio::test]
    async fn empty_result_then_clear() {
        let core = default_core();
        let (_, json) = call(
            &core,
            "PUT",
            "/api/selection/search",
            Some(serde_json::json!({"text": "zzz"})),
        )
        .await;
        assert_eq!(json["view"]["visible_count"], 0);
        assert_eq!(json["view"]["empty"]["search_text"], "zzz");
        assert_eq!(json["view"]["empty"]["can_clear"], true);

        let (status, json) = call(&core, "POST", "/api/selection/clear", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["selection"]["search_text"], "");
        assert_eq!(json["selection"]["active_category"], "All");
        assert_eq!(json["view"]["visible_count"], core.directory().len());
    }

    #[tokio::test]
    async fn set_category_rejects_unknown_label() {
        let (status, _) = call(
            &default_core(),
            "PUT",
            "/api/selection/category",
            Some(serde_json::json!({"category": "cardiologist"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn recommend_requires_open_dialog() {
        let (status, json) = call(
            &default_core(),
            "POST",
            "/api/assistant/recommend",
            Some(serde_json::json!({"symptoms": "palpitations"})),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json["error"]["code"], "CONFLICT");
    }

    #[tokio::test]
    async fn recommend_validates_blank_symptoms() {
        let core = default_core();
        call(&core, "POST", "/api/assistant/open", None).await;
        let (status, _) = call(
            &core,
            "POST",
            "/api/assistant/recommend",
            Some(serde_json::json!({"symptoms": "   "})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn recommend_full_flow() {
        let core = default_core();
        let (status, json) = call(&core, "POST", "/api/assistant/open", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["selection"]["assistant_open"], true);

        let (status, json) = call(
            &core,
            "POST",
            "/api/assistant/recommend",
            Some(serde_json::json!({"symptoms": "my heart races at night"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["outcome"]["status"], "applied");
        assert_eq!(json["outcome"]["category"], "Cardiologist");
        assert_eq!(json["outcome"]["verdict"]["verdict"], "valid");
        assert_eq!(json["selection"]["active_category"], "Cardiologist");
        assert_eq!(json["selection"]["assistant_open"], false);
        assert_eq!(json["selection"]["symptom_draft"], "");
    }

    #[tokio::test]
    async fn recommend_failure_lands_on_physician() {
        let core = test_core_state(Arc::new(MockLlmClient::failing("offline")));
        call(&core, "POST", "/api/assistant/open", None).await;
        let (status, json) = call(
            &core,
            "POST",
            "/api/assistant/recommend",
            Some(serde_json::json!({"symptoms": "tired all the time"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["outcome"]["category"], "Physician");
        assert_eq!(json["selection"]["active_category"], "Physician");
    }

    #[tokio::test]
    async fn close_dialog_updates_selection() {
        let core = default_core();
        call(&core, "POST", "/api/assistant/open", None).await;
        let (status, json) = call(&core, "POST", "/api/assistant/close", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["selection"]["assistant_open"], false);
        assert!(json["selection"]["dialog_id"].is_null());
    }

    #[tokio::test]
    async fn assistant_status_reports_model() {
        let (status, json) = call(&default_core(), "GET", "/api/assistant/status", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["reachable"], true);
        assert_eq!(json["model"], "test-model");
    }

    #[tokio::test]
    async fn not_found_for_unknown_route() {
        let response = api_router(default_core())
            .oneshot(make_request("GET", "/api/nonexistent", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
