//! HTTP Routes
//!
//! API Endpoints:
//! - /api/ping          GET   健康检查
//! - /api/tts           POST  合成音频
//! - /api/locales       GET   列出语言
//! - /api/voices        GET   列出音色（?locale=zh-CN）
//! - /api/sample_rate   GET   查询采样率（?locale=&voice=）
//! - /api/stats         GET   自适应状态快照

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new().nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .route("/tts", post(handlers::synthesize))
        .route("/locales", get(handlers::list_locales))
        .route("/voices", get(handlers::list_voices))
        .route("/sample_rate", get(handlers::sample_rate))
        .route("/stats", get(handlers::stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use tower::util::ServiceExt;

    use crate::application::AdaptiveContext;
    use crate::config::TtsConfig;
    use crate::infrastructure::adapters::{ConfigSettings, FakeReply, FakeTransport};

    fn test_router(transport: Arc<FakeTransport>, config: TtsConfig) -> Router {
        let state = AppState::new(
            transport,
            Arc::new(ConfigSettings::new(config)),
            Arc::new(AdaptiveContext::new()),
        );
        create_routes().with_state(Arc::new(state))
    }

    fn configured() -> TtsConfig {
        TtsConfig {
            api_key: Some("sk-test".to_string()),
            response_format: "mp3".to_string(),
            ..TtsConfig::default()
        }
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn tts_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/tts")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_tts_returns_audio() {
        let audio = vec![42u8; 500];
        let transport = Arc::new(FakeTransport::always(FakeReply::ok(audio.clone())));
        let app = test_router(transport.clone(), configured());

        let response = app
            .oneshot(tts_request(r#"{"text": "hello", "rate": 75}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "audio/mpeg"
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(bytes.to_vec(), audio);
        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tts_failure_is_envelope() {
        let transport = Arc::new(FakeTransport::always(FakeReply::status(500)));
        let app = test_router(transport.clone(), configured());

        let response = app
            .oneshot(tts_request(r#"{"text": "hello"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["errno"], 503);
        assert_eq!(body["error"], "synthesis failed");
        assert_eq!(transport.call_count(), 3);
    }

    #[tokio::test]
    async fn test_tts_malformed_body_is_bad_request() {
        let transport = Arc::new(FakeTransport::always(FakeReply::ok(vec![1u8; 500])));
        let app = test_router(transport.clone(), configured());

        for body in [r#"{"text": "hello", "rate": "fast"}"#, r#"{"text": "#] {
            let response = app.clone().oneshot(tts_request(body)).await.unwrap();

            assert_eq!(response.status(), StatusCode::OK);
            let body = json_body(response).await;
            assert_eq!(body["errno"], 400);
            assert!(body["data"].is_null());
            assert!(!body["error"].as_str().unwrap().is_empty());
        }
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tts_without_text() {
        let transport = Arc::new(FakeTransport::always(FakeReply::ok(vec![1u8; 500])));
        let app = test_router(transport.clone(), configured());

        let response = app.oneshot(tts_request("{}")).await.unwrap();
        let body = json_body(response).await;
        assert_eq!(body["errno"], 503);
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_voices_route() {
        let transport = Arc::new(FakeTransport::always(FakeReply::status(500)));
        let app = test_router(transport, configured());

        let request = Request::builder()
            .uri("/api/voices?locale=zh-CN")
            .body(Body::empty())
            .unwrap();
        let body = json_body(app.oneshot(request).await.unwrap()).await;
        assert_eq!(body["errno"], 0);
        assert_eq!(body["data"]["中文女"]["name"], "默认语音");
    }

    #[tokio::test]
    async fn test_locales_and_sample_rate_routes() {
        let transport = Arc::new(FakeTransport::always(FakeReply::status(500)));
        let app = test_router(transport, configured());

        let request = Request::builder()
            .uri("/api/locales")
            .body(Body::empty())
            .unwrap();
        let body = json_body(app.clone().oneshot(request).await.unwrap()).await;
        assert_eq!(body["data"]["zh-CN"], "中文 (简体)");

        let request = Request::builder()
            .uri("/api/sample_rate?locale=zh-CN&voice=x")
            .body(Body::empty())
            .unwrap();
        let body = json_body(app.oneshot(request).await.unwrap()).await;
        assert_eq!(body["data"]["sample_rate"], 32000);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stats_route_reflects_calls() {
        let transport = Arc::new(FakeTransport::always(FakeReply::ok(vec![9u8; 300])));
        let app = test_router(transport, configured());

        app.clone()
            .oneshot(tts_request(r#"{"text": "hello"}"#))
            .await
            .unwrap();

        let request = Request::builder()
            .uri("/api/stats")
            .body(Body::empty())
            .unwrap();
        let body = json_body(app.oneshot(request).await.unwrap()).await;
        assert_eq!(body["data"]["stats"]["total_requests"], 1);
        assert_eq!(body["data"]["streaming"]["request_count"], 1);
        assert_eq!(body["data"]["network"]["connection_quality"], "good");
    }

    #[tokio::test]
    async fn test_ping_route() {
        let transport = Arc::new(FakeTransport::always(FakeReply::status(500)));
        let app = test_router(transport, configured());

        let request = Request::builder()
            .uri("/api/ping")
            .body(Body::empty())
            .unwrap();
        let body = json_body(app.oneshot(request).await.unwrap()).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["quality"], "good");
    }
}
