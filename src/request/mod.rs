//! 요청 데이터를 꺼내는 방법별 핸들러.
//!
//! - 요청 파라미터 (쿼리 스트링, 폼): `param`
//! - HTTP 메시지 바디 (문자열, JSON): `body_string`, `body_json`
//! - 헤더, 쿠키, 로케일: `header`

use axum::Router;

use crate::AppState;

mod body_json;
mod body_string;
mod header;
mod param;

/// 바디를 통째로 읽을 때의 최대 크기 (axum 기본값과 동일)
pub(crate) const BODY_LIMIT: usize = 2 * 1024 * 1024;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(param::router())
        .merge(body_string::router())
        .merge(body_json::router())
        .merge(header::router())
}
