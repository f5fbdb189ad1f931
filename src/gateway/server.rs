//! 引擎 HTTP 服务
//!
//! - `GET /health`：存活检查
//! - `POST /v1/intelligence/respond`：校验共享密钥后执行一次编排
//!
//! 鉴权失败在进入编排之前就返回 401；编排失败只返回笼统信息，细节写日志。

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::json;
use tokio::task::JoinHandle;

use super::message::{EngineRequest, EngineResponse};
use crate::core::Orchestrator;
use crate::memory::SessionStore;

/// 网关调用时携带的共享密钥头
pub const SHARED_SECRET_HEADER: &str = "x-eduvane-shared-secret";

const SERVICE_NAME: &str = "eduvane-ai-engine";

/// 服务状态
pub struct ServerState {
    pub orchestrator: Orchestrator,
    /// 为空时不校验
    pub shared_secret: String,
}

/// 错误响应体
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

type ApiError = (StatusCode, Json<ErrorBody>);

fn api_error(status: StatusCode, detail: &str) -> ApiError {
    (
        status,
        Json(ErrorBody {
            detail: detail.to_string(),
        }),
    )
}

/// 创建引擎路由
pub fn create_router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/v1/intelligence/respond", post(respond))
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// POST /v1/intelligence/respond
async fn respond(
    State(state): State<Arc<ServerState>>,
    headers: HeaderMap,
    payload: Result<Json<EngineRequest>, JsonRejection>,
) -> Result<Json<EngineResponse>, ApiError> {
    let request_id = uuid::Uuid::new_v4();

    if !state.shared_secret.is_empty() {
        let provided = headers
            .get(SHARED_SECRET_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        if provided != state.shared_secret {
            tracing::warn!(%request_id, "Rejected engine request with bad shared secret");
            return Err(api_error(StatusCode::UNAUTHORIZED, "Unauthorized engine request."));
        }
    }

    let Json(request) = payload.map_err(|e| {
        tracing::warn!(%request_id, "Malformed engine request: {}", e);
        api_error(StatusCode::UNPROCESSABLE_ENTITY, &e.body_text())
    })?;

    match state.orchestrator.handle(&request) {
        Ok(response) => {
            tracing::info!(
                %request_id,
                session_id = %response.session_id,
                intent = ?response.intent,
                "Engine request completed"
            );
            Ok(Json(response))
        }
        Err(e) => {
            tracing::error!(%request_id, session_id = %request.session_id, "Orchestration failed: {}", e);
            Err(api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Unable to complete orchestration.",
            ))
        }
    }
}

/// 后台定期清理空闲会话
pub fn spawn_session_cleanup(store: Arc<SessionStore>, interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(interval_secs.max(1));
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // 第一次 tick 立即返回
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let removed = store.cleanup_expired();
            tracing::debug!(removed, remaining = store.len(), "Session cleanup pass");
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::content::TemplateContent;
    use crate::linguistic::SequencePicker;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn app(secret: &str) -> Router {
        let orchestrator = Orchestrator::new(
            Arc::new(SessionStore::new(0)),
            EngineConfig::fixed(),
            Arc::new(SequencePicker::first()),
            Arc::new(TemplateContent),
        );
        create_router(Arc::new(ServerState {
            orchestrator,
            shared_secret: secret.to_string(),
        }))
    }

    fn respond_request(secret: Option<&str>, body: &str) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/v1/intelligence/respond")
            .header("content-type", "application/json");
        if let Some(secret) = secret {
            builder = builder.header(SHARED_SECRET_HEADER, secret);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    const BODY: &str =
        r#"{"userId":"u1","role":"STUDENT","sessionId":"s1","message":"practice fractions"}"#;

    #[tokio::test]
    async fn test_health() {
        let response = app("k")
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["service"], SERVICE_NAME);
    }

    #[tokio::test]
    async fn test_missing_secret_is_rejected_before_orchestration() {
        let response = app("k")
            .oneshot(respond_request(None, "not even json"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let json = body_json(response).await;
        assert_eq!(json["detail"], "Unauthorized engine request.");
    }

    #[tokio::test]
    async fn test_wrong_secret_is_rejected() {
        let response = app("k")
            .oneshot(respond_request(Some("nope"), BODY))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_respond_returns_camel_case_payload() {
        let response = app("k")
            .oneshot(respond_request(Some("k"), BODY))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["sessionId"], "s1");
        assert_eq!(json["intent"], "QUESTION_GENERATION");
        assert_eq!(json["role"], "STUDENT");
        assert_eq!(json["generatedQuestions"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_empty_secret_disables_check() {
        let response = app("")
            .oneshot(respond_request(None, BODY))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let response = app("k")
            .oneshot(respond_request(Some("k"), r#"{"role":"STUDENT"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
