//! 응답을 만드는 방법별 핸들러.
//!
//! - HTTP 메시지 바디에 직접 쓰기 (문자열, JSON): `body`
//! - 논리 뷰 이름으로 템플릿 렌더링: `view`

use axum::Router;

use crate::AppState;

mod body;
pub mod view;

pub fn router() -> Router<AppState> {
    Router::new().merge(body::router()).merge(view::router())
}
