//! HTTP 메시지 바디를 문자열로 읽기.
//!
//! 요청 파라미터(쿼리 스트링, 폼)와는 관계없이 바디 자체를 읽는다.
//!
//! ```not_rust
//! curl -X POST -H 'Content-Type: text/plain' -d 'hello' http://localhost:3000/request-body-string-v4
//! ```

use axum::{
    body::{self, Body},
    extract::Request,
    http::header::CONTENT_TYPE,
    response::Response,
    routing::post,
    Router,
};
use http_body_util::{BodyExt, Limited};

use super::BODY_LIMIT;
use crate::{error::AppError, extract::HttpEntity, AppState};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/request-body-string-v1", post(request_body_string_v1))
        .route("/request-body-string-v2", post(request_body_string_v2))
        .route("/request-body-string-v3", post(request_body_string_v3))
        .route("/request-body-string-v4", post(request_body_string_v4))
}

/// ✨ v1: 요청 객체에서 바이트를 직접 읽고 UTF-8 로 변환
async fn request_body_string_v1(request: Request) -> Result<Response, AppError> {
    let bytes = body::to_bytes(request.into_body(), BODY_LIMIT).await?;
    // 바이트를 문자로 바꿀 때는 인코딩을 명시해야 한다
    let message_body = String::from_utf8(bytes.to_vec())?;

    tracing::info!("messageBody={message_body}");
    Ok(Response::new(Body::from("ok")))
}

/// ✨ v2: 바디 스트림을 수집하고, 응답은 빌더로 직접 작성
///
/// `Body` 추출기에는 기본 크기 제한이 걸리지 않으므로 `Limited` 로 직접 감싼다.
async fn request_body_string_v2(body: Body) -> Result<Response, AppError> {
    let bytes = Limited::new(body, BODY_LIMIT)
        .collect()
        .await
        .map_err(axum::Error::new)?
        .to_bytes();
    let message_body = String::from_utf8(bytes.to_vec())?;

    tracing::info!("messageBody={message_body}");

    let response = Response::builder()
        .header(CONTENT_TYPE, mime::TEXT_PLAIN_UTF_8.as_ref())
        .body(Body::from("ok"))?;
    Ok(response)
}

/// ✨ v3: 헤더 + 바디를 함께 받고, 응답도 HttpEntity 로
async fn request_body_string_v3(entity: HttpEntity<String>) -> HttpEntity<&'static str> {
    let content_type = entity.headers.get(CONTENT_TYPE);
    tracing::debug!(?content_type, "request entity");
    tracing::info!("messageBody={}", entity.body);

    HttpEntity::new("ok")
}

/// ✨ v4: String 추출기로 바디를 바로 받기
async fn request_body_string_v4(message_body: String) -> &'static str {
    tracing::info!("messageBody={message_body}");
    "ok"
}
