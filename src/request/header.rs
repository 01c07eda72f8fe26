//! 헤더, 쿠키, 메서드, 로케일 조회.
//!
//! ```not_rust
//! curl -H 'Accept-Language: ko-KR' -b 'myCookie=hi' http://localhost:3000/headers
//! ```

use std::collections::BTreeMap;

use axum::{
    http::{HeaderMap, Method, Uri, Version},
    routing::any,
    Router,
};
use axum_extra::{headers, TypedHeader};

use crate::{extract::Locale, AppState};

pub fn router() -> Router<AppState> {
    Router::new().route("/headers", any(request_headers))
}

// 1) Method: HTTP 메서드
// 2) Locale: Accept-Language 기반 로케일 (없으면 설정의 기본값)
// 3) HeaderMap: 모든 헤더. 하나의 키에 여러 값이 올 수 있다
// 4) TypedHeader<Host>: 특정 헤더. 필수라서 없으면 400
// 5) Option<TypedHeader<Cookie>>: 쿠키는 없어도 된다
async fn request_headers(
    method: Method,
    uri: Uri,
    version: Version,
    locale: Locale,
    header_map: HeaderMap,
    TypedHeader(host): TypedHeader<headers::Host>,
    cookies: Option<TypedHeader<headers::Cookie>>,
) -> &'static str {
    let cookie = cookies
        .as_ref()
        .and_then(|TypedHeader(cookies)| cookies.get("myCookie"));

    tracing::info!("request={method} {uri} {version:?}");
    tracing::info!("httpMethod={method}");
    tracing::info!("locale={locale}");
    tracing::info!("headerMap={:?}", to_multi_map(&header_map));
    tracing::info!("header host={}, port={:?}", host.hostname(), host.port());
    tracing::info!("myCookie={}", cookie.unwrap_or("null"));

    "ok"
}

/// 같은 이름의 헤더 값을 모두 모은다. UTF-8 이 아닌 값은 손실 변환.
fn to_multi_map(headers: &HeaderMap) -> BTreeMap<&str, Vec<String>> {
    let mut map: BTreeMap<&str, Vec<String>> = BTreeMap::new();
    for (name, value) in headers {
        map.entry(name.as_str())
            .or_default()
            .push(String::from_utf8_lossy(value.as_bytes()).into_owned());
    }
    map
}
