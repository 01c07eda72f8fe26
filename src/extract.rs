//! 요청에서 값을 꺼내는 커스텀 추출기 모음.
//!
//! - `RequestParams`: 쿼리 스트링 + 폼 바디를 합친 "요청 파라미터" 전체 (multi-value)
//! - `RequestParam<T>` / `ModelAttribute<T>`: 요청 파라미터를 구조체로 바인딩
//! - `AppJson<T>`: 실패 시 `AppError` 로 변환되는 Json 래퍼
//! - `HttpEntity<B>`: 헤더 + 바디를 함께 꺼내고, 응답으로도 사용 가능
//! - `Locale`: `Accept-Language` 기반 로케일

use std::{
    collections::{BTreeMap, HashSet},
    convert::Infallible,
    fmt,
    str::FromStr,
    sync::Arc,
};

use axum::{
    body::Bytes,
    extract::{FromRef, FromRequest, FromRequestParts, Request},
    http::{
        header::{ACCEPT_LANGUAGE, CONTENT_TYPE},
        request::Parts,
        HeaderMap,
    },
    response::{IntoResponse, Response},
};
use serde::{de, de::DeserializeOwned, Deserialize, Deserializer};
use url::form_urlencoded;

use crate::{config::Config, error::AppError};

/// ✨ 요청 파라미터 전체
///
/// 쿼리 스트링 쌍이 먼저, `application/x-www-form-urlencoded` 바디 쌍이 그 뒤에 온다.
/// 같은 이름이 여러 번 오면 모든 값을 순서대로 보관한다.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RequestParams(Vec<(String, String)>);

impl RequestParams {
    /// 이름에 해당하는 첫 번째 값
    pub fn first(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn to_multi_map(&self) -> BTreeMap<&str, Vec<&str>> {
        let mut map: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for (key, value) in &self.0 {
            map.entry(key.as_str()).or_default().push(value.as_str());
        }
        map
    }

    /// 파라미터를 `T` 로 역직렬화한다. 이름이 중복되면 첫 번째 값만 사용한다.
    pub fn bind<T: DeserializeOwned>(&self) -> Result<T, AppError> {
        let mut seen = HashSet::new();
        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.0.iter().filter(|(key, _)| seen.insert(key.as_str())))
            .finish();

        Ok(serde_urlencoded::from_str(&query)?)
    }
}

impl<S> FromRequest<S> for RequestParams
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut pairs: Vec<(String, String)> = req
            .uri()
            .query()
            .map(|query| form_urlencoded::parse(query.as_bytes()).into_owned().collect())
            .unwrap_or_default();

        if is_form(req.headers()) {
            let body = Bytes::from_request(req, state).await?;
            pairs.extend(form_urlencoded::parse(&body[..]).into_owned());
        }

        Ok(Self(pairs))
    }
}

fn is_form(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with(mime::APPLICATION_WWW_FORM_URLENCODED.as_ref()))
}

/// ✨ 요청 파라미터 → 구조체
///
/// 필드 이름이 파라미터 이름이 된다. 이름을 바꾸려면 `#[serde(rename = "...")]`.
/// 필수 필드가 없거나 타입 변환에 실패하면 400.
#[derive(Debug)]
pub struct RequestParam<T>(pub T);

impl<S, T> FromRequest<S> for RequestParam<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let params = RequestParams::from_request(req, state).await?;
        params.bind().map(Self)
    }
}

/// ✨ 요청 파라미터로 객체를 만들어 채운다
///
/// `RequestParam` 과 같은 규칙으로 바인딩하고, 바인딩된 객체를 debug 로그로 남긴다.
/// 빠진 필드는 `T` 의 `#[serde(default)]` 설정을 따른다.
#[derive(Debug)]
pub struct ModelAttribute<T>(pub T);

impl<S, T> FromRequest<S> for ModelAttribute<T>
where
    S: Send + Sync,
    T: DeserializeOwned + fmt::Debug,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let RequestParam(value) = RequestParam::<T>::from_request(req, state).await?;
        tracing::debug!(model = ?value, "bound model attribute");
        Ok(Self(value))
    }
}

// ✨ AppJson: 추출 실패 시 AppError 로 변환되는 Json 래퍼
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

impl<T> IntoResponse for AppJson<T>
where
    axum::Json<T>: IntoResponse,
{
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

/// ✨ 헤더 + 바디
///
/// 바디는 `B` 추출기로 꺼낸다 (`String`, `AppJson<T>` 등).
/// 응답으로 반환하면 헤더와 바디가 그대로 응답 메시지에 담긴다.
#[derive(Debug)]
pub struct HttpEntity<B> {
    pub headers: HeaderMap,
    pub body: B,
}

impl<B> HttpEntity<B> {
    pub fn new(body: B) -> Self {
        Self {
            headers: HeaderMap::new(),
            body,
        }
    }
}

impl<S, B> FromRequest<S> for HttpEntity<B>
where
    S: Send + Sync,
    B: FromRequest<S>,
    AppError: From<B::Rejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let headers = req.headers().clone();
        let body = B::from_request(req, state).await?;
        Ok(Self { headers, body })
    }
}

impl<B> IntoResponse for HttpEntity<B>
where
    B: IntoResponse,
{
    fn into_response(self) -> Response {
        (self.headers, self.body).into_response()
    }
}

/// ✨ 요청 로케일
///
/// `Accept-Language` 에서 q 값이 가장 높은 언어 태그를 고른다. 헤더가 없거나
/// 쓸 수 있는 태그가 없으면 설정의 기본 로케일.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale(String);

impl Locale {
    pub fn from_accept_language(value: &str) -> Option<Self> {
        value
            .split(',')
            .filter_map(|entry| {
                let mut parts = entry.split(';');
                let tag = parts.next()?.trim();
                if tag.is_empty() || tag == "*" {
                    return None;
                }
                // q 는 0..=1 범위의 숫자만 인정 (nan, inf 등은 태그째 무시)
                let quality = match parts.find_map(|param| param.trim().strip_prefix("q=")) {
                    Some(q) => q
                        .trim()
                        .parse::<f32>()
                        .ok()
                        .filter(|q| (0.0..=1.0).contains(q))?,
                    None => 1.0,
                };
                Some((tag, quality))
            })
            .fold(None::<(&str, f32)>, |best, (tag, quality)| match best {
                Some((_, best_quality)) if best_quality >= quality => best,
                _ => Some((tag, quality)),
            })
            .filter(|(_, quality)| *quality > 0.0)
            .map(|(tag, _)| Self(tag.to_owned()))
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<S> FromRequestParts<S> for Locale
where
    Arc<Config>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let locale = parts
            .headers
            .get(ACCEPT_LANGUAGE)
            .and_then(|value| value.to_str().ok())
            .and_then(Locale::from_accept_language)
            .unwrap_or_else(|| Locale(Arc::<Config>::from_ref(state).default_locale.clone()));

        Ok(locale)
    }
}

/// Serde deserialization decorator to map empty Strings to None,
pub fn empty_string_as_none<'de, D, T>(de: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let opt = Option::<String>::deserialize(de)?;
    match opt.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => FromStr::from_str(s).map_err(de::Error::custom).map(Some),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Method};

    #[derive(Debug, Deserialize, PartialEq)]
    struct Pair {
        username: String,
        age: i32,
    }

    async fn params(request: Request) -> RequestParams {
        RequestParams::from_request(request, &()).await.unwrap()
    }

    #[tokio::test]
    async fn merges_query_and_form_body() {
        let request = axum::http::Request::builder()
            .method(Method::POST)
            .uri("/?username=kim&tag=a")
            .header(CONTENT_TYPE, mime::APPLICATION_WWW_FORM_URLENCODED.as_ref())
            .body(Body::from("age=20&tag=b&username=lee"))
            .unwrap();

        let params = params(request).await;

        assert_eq!(params.first("username"), Some("kim"));
        assert_eq!(params.first("missing"), None);
        assert_eq!(params.to_multi_map()["tag"], vec!["a", "b"]);
        assert_eq!(params.to_multi_map()["username"], vec!["kim", "lee"]);

        // 중복된 이름은 첫 번째 값으로 바인딩
        let pair: Pair = params.bind().unwrap();
        assert_eq!(
            pair,
            Pair {
                username: "kim".to_owned(),
                age: 20
            }
        );
    }

    #[tokio::test]
    async fn ignores_body_without_form_content_type() {
        let request = axum::http::Request::builder()
            .method(Method::POST)
            .uri("/?username=kim")
            .header(CONTENT_TYPE, mime::TEXT_PLAIN.as_ref())
            .body(Body::from("age=20"))
            .unwrap();

        let params = params(request).await;

        assert_eq!(params.first("age"), None);
        assert!(matches!(
            params.bind::<Pair>(),
            Err(AppError::InvalidParams(_))
        ));
    }

    #[tokio::test]
    async fn decodes_percent_encoded_values() {
        let request = axum::http::Request::builder()
            .uri("/?username=%ED%99%8D+%EA%B8%B8%EB%8F%99&age=3")
            .body(Body::empty())
            .unwrap();

        let pair: Pair = params(request).await.bind().unwrap();
        assert_eq!(pair.username, "홍 길동");
        assert_eq!(pair.age, 3);
    }

    #[test]
    fn picks_highest_quality_language() {
        assert_eq!(
            Locale::from_accept_language("ko-KR,ko;q=0.9,en-US;q=0.8")
                .unwrap()
                .to_string(),
            "ko-KR"
        );
        assert_eq!(
            Locale::from_accept_language("en;q=0.5, fr;q=0.7")
                .unwrap()
                .to_string(),
            "fr"
        );
        assert_eq!(Locale::from_accept_language("*"), None);
        assert_eq!(Locale::from_accept_language(""), None);
        assert_eq!(Locale::from_accept_language("de;q=0"), None);
    }

    #[test]
    fn ignores_out_of_range_quality() {
        assert_eq!(
            Locale::from_accept_language("de, en;q=nan")
                .unwrap()
                .to_string(),
            "de"
        );
        assert_eq!(
            Locale::from_accept_language("en;q=nan, fr;q=0.3")
                .unwrap()
                .to_string(),
            "fr"
        );
        assert_eq!(Locale::from_accept_language("en;q=2"), None);
        assert_eq!(Locale::from_accept_language("en;q=inf"), None);
        assert_eq!(Locale::from_accept_language("en;q=-1"), None);
    }

    #[tokio::test]
    async fn binds_form_body_longer_than_a_uri() {
        let username = "a".repeat(70 * 1024);
        let request = axum::http::Request::builder()
            .method(Method::POST)
            .uri("/")
            .header(CONTENT_TYPE, mime::APPLICATION_WWW_FORM_URLENCODED.as_ref())
            .body(Body::from(format!("username={username}&age=20")))
            .unwrap();

        let pair: Pair = params(request).await.bind().unwrap();
        assert_eq!(pair.username.len(), 70 * 1024);
        assert_eq!(pair.age, 20);
    }
}
