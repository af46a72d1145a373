// HTTP surface: binds dropdown-change round-trips to the panel controllers
// and forwards payloads (or panel-local errors) to the page.
use crate::error::DashboardError;
use crate::output;
use crate::panel::PanelController;
use crate::types::RenderPayload;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info, warn};

pub const STAGE_PANEL: &str = "stage";
pub const COMMODITY_PANEL: &str = "commodity";

/// Listener binding, the only externally configurable behavior.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8051,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let default = Self::default();
        let host = std::env::var("DASHBOARD_HOST").unwrap_or(default.host);
        let port = std::env::var("DASHBOARD_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(default.port);
        Self { host, port }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Process-wide shared state: the two controllers, each private to its
/// panel. Built once at startup, shared read-only behind `Arc`.
pub struct AppState {
    pub stage: PanelController,
    pub commodity: PanelController,
}

impl AppState {
    /// Wire the two panels to their datasets. The stage panel charts the raw
    /// per-stage percentages; the commodity panel charts the aggregated
    /// per-group means.
    pub fn new<S, C>(stage_rows: &[S], aggregated_rows: &[C]) -> Result<Self, DashboardError>
    where
        S: crate::panel::CategorySource,
        C: crate::panel::CategorySource,
    {
        Ok(Self {
            stage: PanelController::new(STAGE_PANEL, "Food Loss Percentage", stage_rows)?,
            commodity: PanelController::new(
                COMMODITY_PANEL,
                "Average Loss Percentage",
                aggregated_rows,
            )?,
        })
    }

    fn controller(&self, panel: &str) -> Option<&PanelController> {
        match panel {
            STAGE_PANEL => Some(&self.stage),
            COMMODITY_PANEL => Some(&self.commodity),
            _ => None,
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/dashboard", get(dashboard))
        .route("/api/panel/{panel}/select", post(select_category))
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(output::INDEX_HTML)
}

/// Everything the page needs to draw one panel on load.
#[derive(Debug, Serialize)]
struct PanelView {
    panel: &'static str,
    categories: Vec<String>,
    selected: String,
    payload: RenderPayload,
}

impl PanelView {
    fn of(controller: &PanelController) -> Self {
        let (selected, payload) = controller.snapshot();
        Self {
            panel: controller.panel(),
            categories: controller.categories().to_vec(),
            selected,
            payload,
        }
    }
}

async fn dashboard(State(state): State<Arc<AppState>>) -> Json<Vec<PanelView>> {
    Json(vec![
        PanelView::of(&state.stage),
        PanelView::of(&state.commodity),
    ])
}

#[derive(Debug, Deserialize)]
struct SelectRequest {
    category: String,
}

async fn select_category(
    State(state): State<Arc<AppState>>,
    Path(panel): Path<String>,
    Json(req): Json<SelectRequest>,
) -> Response {
    let Some(controller) = state.controller(&panel) else {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": format!("unknown panel: {}", panel) })),
        )
            .into_response();
    };
    match controller.select(&req.category) {
        Ok(payload) => {
            info!(panel = %panel, category = %req.category, "selection updated");
            Json(payload).into_response()
        }
        Err(err) => panel_error(&panel, &err),
    }
}

/// Map a controller error onto a panel-scoped JSON response. The session
/// stays up; the page shows the message in the affected panel only and keeps
/// the previously rendered payload.
fn panel_error(panel: &str, err: &DashboardError) -> Response {
    let status = match err {
        DashboardError::UnknownCategory { .. } => {
            warn!(panel = %panel, "{}", err);
            StatusCode::UNPROCESSABLE_ENTITY
        }
        // EmptyFilter means the category list and the rows disagree, which
        // is an internal invariant violation worth a loud log line.
        _ => {
            error!(panel = %panel, "{}", err);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, Json(json!({ "panel": panel, "error": err.to_string() }))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{aggregate, datasets};
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    fn test_router() -> Router {
        let stage_rows = datasets::stage_dataset();
        let aggregated = aggregate::aggregate(&datasets::commodity_dataset()).unwrap();
        router(Arc::new(AppState::new(&stage_rows, &aggregated).unwrap()))
    }

    async fn body_json(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn select_request(panel: &str, category: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(format!("/api/panel/{}/select", panel))
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::to_vec(&json!({ "category": category })).unwrap(),
            ))
            .unwrap()
    }

    #[tokio::test]
    async fn dashboard_returns_both_panels() {
        let response = test_router()
            .oneshot(Request::builder().uri("/api/dashboard").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        let panels = body.as_array().unwrap();
        assert_eq!(panels.len(), 2);
        assert_eq!(panels[0]["panel"], "stage");
        assert_eq!(panels[0]["selected"], "Distribution");
        assert_eq!(panels[0]["categories"].as_array().unwrap().len(), 15);
        assert_eq!(panels[1]["panel"], "commodity");
        assert_eq!(panels[1]["selected"], "Cereals & Pulses");
        assert_eq!(panels[1]["categories"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn select_returns_the_rendered_payload() {
        let response = test_router()
            .oneshot(select_request("stage", "Harvest"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["title"], "Food Loss Percentage for Harvest");
        assert_eq!(body["rows"].as_array().unwrap().len(), 7);
        assert_eq!(
            body["average_text"],
            "Average loss percentage for Harvest: 5.81%"
        );
    }

    #[tokio::test]
    async fn unknown_category_is_panel_local() {
        let app = test_router();
        let response = app
            .clone()
            .oneshot(select_request("commodity", "Nonexistent"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = body_json(response).await;
        assert_eq!(body["panel"], "commodity");
        assert!(body["error"].as_str().unwrap().contains("Nonexistent"));

        // The other panel still answers normally.
        let response = app.oneshot(select_request("stage", "Retail")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn unknown_panel_is_not_found() {
        let response = test_router()
            .oneshot(select_request("nutrients", "Harvest"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn index_serves_the_page() {
        let response = test_router()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let page = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(page.contains("Food Loss Dashboard"));
    }
}
