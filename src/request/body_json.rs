//! HTTP 메시지 바디를 JSON 으로 읽기.
//!
//! ```not_rust
//! curl -X POST -H 'Content-Type: application/json' \
//!      -d '{"username":"hello", "age":20}' \
//!      http://localhost:3000/request-body-json-v5
//! ```

use axum::{
    body::{self, Body},
    extract::Request,
    http::header::CONTENT_TYPE,
    response::Response,
    routing::post,
    Router,
};

use super::BODY_LIMIT;
use crate::{
    error::AppError,
    extract::{AppJson, HttpEntity},
    hello_data::HelloData,
    AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/request-body-json-v1", post(request_body_json_v1))
        .route("/request-body-json-v2", post(request_body_json_v2))
        .route("/request-body-json-v3", post(request_body_json_v3))
        .route("/request-body-json-v4", post(request_body_json_v4))
        .route("/request-body-json-v5", post(request_body_json_v5))
}

/// ✨ v1: 바디를 문자열로 읽고 serde_json 으로 직접 변환
async fn request_body_json_v1(request: Request) -> Result<Response, AppError> {
    let bytes = body::to_bytes(request.into_body(), BODY_LIMIT).await?;
    let message_body = String::from_utf8(bytes.to_vec())?;
    tracing::info!("messageBody={message_body}");

    let hello_data: HelloData = serde_json::from_str(&message_body)?;
    tracing::info!("username={}, age={}", hello_data.username_or_null(), hello_data.age);

    Ok(Response::new(Body::from("ok")))
}

/// ✨ v2: String 추출기 + serde_json
async fn request_body_json_v2(message_body: String) -> Result<&'static str, AppError> {
    tracing::info!("messageBody={message_body}");

    let hello_data: HelloData = serde_json::from_str(&message_body)?;
    tracing::info!("username={}, age={}", hello_data.username_or_null(), hello_data.age);

    Ok("ok")
}

/// ✨ v3: Json 추출기가 바로 객체로 변환
///
/// `Content-Type: application/json` 이 아니면 415.
async fn request_body_json_v3(AppJson(data): AppJson<HelloData>) -> &'static str {
    tracing::info!("username={}, age={}", data.username_or_null(), data.age);
    "ok"
}

/// ✨ v4: 헤더 + JSON 바디
async fn request_body_json_v4(entity: HttpEntity<AppJson<HelloData>>) -> &'static str {
    let AppJson(hello_data) = entity.body;
    tracing::debug!(content_type = ?entity.headers.get(CONTENT_TYPE), "request entity");
    tracing::info!("username={}, age={}", hello_data.username_or_null(), hello_data.age);
    "ok"
}

/// ✨ v5: JSON 요청 → 객체 → JSON 응답
async fn request_body_json_v5(AppJson(data): AppJson<HelloData>) -> AppJson<HelloData> {
    tracing::info!("username={}, age={}", data.username_or_null(), data.age);
    AppJson(data)
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{self, Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::BODY_LIMIT;

    async fn post_json(
        uri: &str,
        body: impl Into<Body>,
        content_type: &str,
    ) -> (StatusCode, Vec<u8>) {
        let response = crate::test_app()
            .oneshot(
                Request::builder()
                    .method(http::Method::POST)
                    .uri(uri)
                    .header(http::header::CONTENT_TYPE, content_type)
                    .body(body.into())
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, body.to_vec())
    }

    const HELLO: &str = r#"{"username":"hello", "age":20}"#;

    #[tokio::test]
    async fn every_variant_reads_json() {
        for uri in [
            "/request-body-json-v1",
            "/request-body-json-v2",
            "/request-body-json-v3",
            "/request-body-json-v4",
        ] {
            let (status, body) = post_json(uri, HELLO, mime::APPLICATION_JSON.as_ref()).await;
            assert_eq!(status, StatusCode::OK, "{uri}");
            assert_eq!(body, b"ok", "{uri}");
        }
    }

    #[tokio::test]
    async fn v5_echoes_the_object() {
        let (status, body) =
            post_json("/request-body-json-v5", HELLO, mime::APPLICATION_JSON.as_ref()).await;
        assert_eq!(status, StatusCode::OK);

        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body, json!({ "username": "hello", "age": 20 }));
    }

    #[tokio::test]
    async fn v5_fills_missing_fields_with_defaults() {
        let (status, body) =
            post_json("/request-body-json-v5", "{}", mime::APPLICATION_JSON.as_ref()).await;
        assert_eq!(status, StatusCode::OK);

        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body, json!({ "username": null, "age": 0 }));
    }

    #[tokio::test]
    async fn malformed_json_is_a_client_error() {
        for uri in [
            "/request-body-json-v1",
            "/request-body-json-v2",
            "/request-body-json-v3",
            "/request-body-json-v4",
            "/request-body-json-v5",
        ] {
            let (status, body) =
                post_json(uri, r#"{"username":"#, mime::APPLICATION_JSON.as_ref()).await;
            assert!(status.is_client_error(), "{uri}: {status}");

            let body: Value = serde_json::from_slice(&body).unwrap();
            assert_eq!(body["status"], json!(status.as_u16()), "{uri}");
        }
    }

    #[tokio::test]
    async fn typed_json_requires_json_content_type() {
        // v1, v2 는 바디를 문자열로 읽으므로 Content-Type 과 무관
        let (status, _) =
            post_json("/request-body-json-v2", HELLO, mime::TEXT_PLAIN.as_ref()).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) =
            post_json("/request-body-json-v3", HELLO, mime::TEXT_PLAIN.as_ref()).await;
        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[tokio::test]
    async fn rejects_oversized_body() {
        // 공백으로 채운 JSON: 크기만 제한을 넘는다
        let mut oversized = vec![b' '; BODY_LIMIT];
        oversized.extend_from_slice(b"{}");

        for uri in [
            "/request-body-json-v1",
            "/request-body-json-v2",
            "/request-body-json-v3",
            "/request-body-json-v4",
            "/request-body-json-v5",
        ] {
            let (status, _) =
                post_json(uri, oversized.clone(), mime::APPLICATION_JSON.as_ref()).await;
            assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE, "{uri}");
        }
    }
}
