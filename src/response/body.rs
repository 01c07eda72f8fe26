//! HTTP 메시지 바디에 직접 응답하기. 뷰를 거치지 않는다.

use axum::{
    body::Body,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use crate::{hello_data::HelloData, AppState};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/response-body-string-v1", get(response_body_v1))
        .route("/response-body-string-v2", get(response_body_v2))
        .route("/response-body-string-v3", get(response_body_v3))
        .route("/response-body-json-v1", get(response_body_json_v1))
        .route("/response-body-json-v2", get(response_body_json_v2))
}

// 응답 객체를 직접 만들어서 바디에 "ok" 를 쓴다
async fn response_body_v1() -> Response {
    Response::new(Body::from("ok"))
}

// 상태 코드 + 바디. 상태 코드는 조건에 따라 동적으로 바꿀 수 있다
async fn response_body_v2() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ok")
}

// 반환값이 그대로 바디가 된다 (200)
async fn response_body_v3() -> &'static str {
    "ok"
}

async fn response_body_json_v1() -> impl IntoResponse {
    let hello_data = HelloData::new("userA", 20);
    (StatusCode::OK, Json(hello_data))
}

// 상태 코드를 고정으로 선언. 동적으로 바꾸려면 v1 처럼 튜플을 쓰면 된다
async fn response_body_json_v2() -> Json<HelloData> {
    Json(HelloData::new("userA", 20))
}
