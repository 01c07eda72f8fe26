//! 요청 파라미터 바인딩.
//!
//! 같은 `username`, `age` 파라미터를 점점 더 자동화된 방식으로 꺼낸다.
//!
//! ```not_rust
//! curl 'http://localhost:3000/request-param-v1?username=hello&age=20'
//! curl -d 'username=hello&age=20' http://localhost:3000/request-param-v3
//! ```

use std::fmt::Display;

use axum::{body::Body, response::Response, routing::any, Router};
use serde::Deserialize;

use crate::{
    error::AppError,
    extract::{empty_string_as_none, ModelAttribute, RequestParam, RequestParams},
    hello_data::HelloData,
    AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/request-param-v1", any(request_param_v1))
        .route("/request-param-v2", any(request_param_v2))
        .route("/request-param-v3", any(request_param_v3))
        .route("/request-param-v4", any(request_param_v4))
        .route("/request-param-required", any(request_param_required))
        .route("/request-param-default", any(request_param_default))
        .route("/request-param-map", any(request_param_map))
        .route("/model-attribute-v1", any(model_attribute_v1))
        .route("/model-attribute-v2", any(model_attribute_v2))
}

/// ✨ v1: 파라미터 맵에서 직접 조회하고, 숫자는 손으로 파싱
///
/// `age` 가 없거나 숫자가 아니면 처리되지 않은 에러로 500 이 된다.
async fn request_param_v1(params: RequestParams) -> Result<Response, AppError> {
    let username = params.first("username");
    let age: i32 = params.first("age").unwrap_or_default().parse()?;

    tracing::info!("username={}, age={age}", or_null(username));

    // 응답 바디에 직접 쓰기
    Ok(Response::new(Body::from("ok")))
}

// 파라미터 이름과 필드 이름이 다를 때는 rename 으로 매핑
#[derive(Debug, Deserialize)]
struct MemberParams {
    #[serde(rename = "username")]
    member_name: String,
    #[serde(rename = "age")]
    member_age: i32,
}

/// ✨ v2: 이름을 지정해서 바인딩
async fn request_param_v2(
    RequestParam(MemberParams {
        member_name,
        member_age,
    }): RequestParam<MemberParams>,
) -> &'static str {
    tracing::info!("username={member_name}, age={member_age}");
    "ok"
}

#[derive(Debug, Deserialize)]
struct UserParams {
    username: String,
    age: i32,
}

/// ✨ v3: 필드 이름 = 파라미터 이름이면 매핑 생략
async fn request_param_v3(
    RequestParam(UserParams { username, age }): RequestParam<UserParams>,
) -> &'static str {
    tracing::info!("username={username}, age={age}");
    "ok"
}

// 단순 타입: String 은 없어도 되지만, 기본 타입인 i32 는 값이 꼭 있어야 한다
#[derive(Debug, Deserialize)]
struct SimpleParams {
    username: Option<String>,
    age: i32,
}

/// ✨ v4: 이름 매핑 없이 타입만으로 바인딩 (`Option` 이면 생략 가능, 아니면 필수)
async fn request_param_v4(
    RequestParam(SimpleParams { username, age }): RequestParam<SimpleParams>,
) -> &'static str {
    tracing::info!("username={}, age={age}", or_null(username));
    "ok"
}

/// - `username`: 필수. 단, `?username=` 처럼 빈 문자는 통과한다 (주의!)
/// - `age`: 선택. 없거나 빈 문자면 `None`
#[derive(Debug, Deserialize)]
struct RequiredParams {
    username: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    age: Option<i32>,
}

/// ✨ 필수 여부
async fn request_param_required(
    RequestParam(RequiredParams { username, age }): RequestParam<RequiredParams>,
) -> &'static str {
    tracing::info!("username={username}, age={}", or_null(age));
    "ok"
}

/// 값이 없거나 빈 문자이면 기본값(`guest`, `-1`)을 적용
#[derive(Debug, Deserialize)]
#[serde(from = "RawDefaultParams")]
struct DefaultParams {
    username: String,
    age: i32,
}

#[derive(Deserialize)]
struct RawDefaultParams {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    username: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    age: Option<i32>,
}

impl From<RawDefaultParams> for DefaultParams {
    fn from(raw: RawDefaultParams) -> Self {
        Self {
            username: raw.username.unwrap_or_else(|| "guest".to_owned()),
            age: raw.age.unwrap_or(-1),
        }
    }
}

/// ✨ 기본값
async fn request_param_default(
    RequestParam(DefaultParams { username, age }): RequestParam<DefaultParams>,
) -> &'static str {
    tracing::info!("username={username}, age={age}");
    "ok"
}

/// ✨ 파라미터 전체를 multi-value 맵으로 (ex. `?userIds=id1&userIds=id2`)
async fn request_param_map(params: RequestParams) -> &'static str {
    tracing::debug!(params = ?params.to_multi_map(), "request parameters");
    tracing::info!(
        "username={}, age={}",
        or_null(params.first("username")),
        or_null(params.first("age"))
    );
    "ok"
}

/// ✨ 객체 생성 → 파라미터 이름으로 필드를 찾아 값 채우기
async fn model_attribute_v1(ModelAttribute(hello_data): ModelAttribute<HelloData>) -> &'static str {
    tracing::info!(
        "username={}, age={}",
        hello_data.username_or_null(),
        hello_data.age
    );
    tracing::info!("helloData={hello_data}");
    "ok"
}

/// ✨ 객체도 `RequestParam` 으로 바로 받을 수 있다 (바인딩 로그 생략)
async fn model_attribute_v2(RequestParam(hello_data): RequestParam<HelloData>) -> &'static str {
    tracing::info!(
        "username={}, age={}",
        hello_data.username_or_null(),
        hello_data.age
    );
    "ok"
}

// 값이 없으면 null 로 표시
fn or_null(value: Option<impl Display>) -> String {
    value.map_or_else(|| "null".to_owned(), |value| value.to_string())
}
