//! 뷰 템플릿으로 응답하기.
//!
//! 핸들러는 논리 뷰 이름(`response/hello`)과 모델만 정하고,
//! 실제 템플릿을 찾아 렌더링하는 일은 `ViewResolver` 가 맡는다.
//! 템플릿은 시작할 때 MiniJinja `Environment` 에 논리 이름으로 등록된다.

use std::{collections::BTreeMap, convert::Infallible, sync::Arc};

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{request::Parts, Uri},
    response::Html,
    routing::any,
    Router,
};
use minijinja::{AutoEscape, Environment, Value};

use crate::{error::AppError, AppState};

/// (논리 뷰 이름, 템플릿 소스) 목록. 경로는 `templates/` 기준
const TEMPLATES: &[(&str, &str)] = &[(
    "response/hello",
    include_str!("../../templates/response/hello.html"),
)];

/// 템플릿을 논리 뷰 이름으로 등록한 환경을 만든다
pub fn environment() -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();
    // 논리 이름에는 확장자가 없으므로 HTML 이스케이프를 명시
    env.set_auto_escape_callback(|_| AutoEscape::Html);

    for &(name, source) in TEMPLATES {
        env.add_template(name, source)?;
    }

    Ok(env)
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/response-view-v1", any(response_view_v1))
        .route("/response-view-v2", any(response_view_v2))
        .route("/response/hello", any(response_view_v3))
}

/// 템플릿에 넘길 값 모음
#[derive(Debug, Default, Clone)]
pub struct Model(BTreeMap<String, Value>);

impl Model {
    pub fn add_attribute(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.0.insert(name.into(), value.into());
        self
    }
}

/// 논리 뷰 이름 + 모델
#[derive(Debug, Clone)]
pub struct ModelAndView {
    view_name: String,
    model: Model,
}

impl ModelAndView {
    pub fn new(view_name: impl Into<String>) -> Self {
        Self::with_model(view_name, Model::default())
    }

    pub fn with_model(view_name: impl Into<String>, model: Model) -> Self {
        Self {
            view_name: view_name.into(),
            model,
        }
    }

    pub fn add_object(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.model.add_attribute(name, value);
        self
    }
}

/// ✨ 논리 뷰 이름 → 템플릿 렌더링
///
/// 상태에 있는 `Arc<Environment>` 를 꺼내 주는 추출기.
#[derive(Clone)]
pub struct ViewResolver(Arc<Environment<'static>>);

impl<S> FromRequestParts<S> for ViewResolver
where
    Arc<Environment<'static>>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(Arc::<Environment<'static>>::from_ref(state)))
    }
}

impl ViewResolver {
    pub fn render(&self, mav: &ModelAndView) -> Result<Html<String>, AppError> {
        let view_error = |source| AppError::View {
            view: mav.view_name.clone(),
            source,
        };

        let template = self.0.get_template(&mav.view_name).map_err(view_error)?;
        let html = template.render(&mav.model.0).map_err(view_error)?;

        tracing::debug!(view = %mav.view_name, "rendered view");
        Ok(Html(html))
    }
}

/// ✨ v1: ModelAndView 를 만들어서 렌더링
async fn response_view_v1(views: ViewResolver) -> Result<Html<String>, AppError> {
    let mav = ModelAndView::new("response/hello").add_object("data", "hello!");
    views.render(&mav)
}

/// ✨ v2: 모델을 채우고 뷰 이름을 돌려준다
async fn response_view_v2(views: ViewResolver) -> Result<Html<String>, AppError> {
    let mut model = Model::default();
    model.add_attribute("data", "hello!!");

    views.render(&ModelAndView::with_model("response/hello", model))
}

/// ✨ v3: 요청 경로가 곧 뷰 이름 (`/response/hello` → `response/hello`)
async fn response_view_v3(views: ViewResolver, uri: Uri) -> Result<Html<String>, AppError> {
    let mut model = Model::default();
    model.add_attribute("data", "hello!!!");

    let view_name = uri.path().trim_start_matches('/');
    views.render(&ModelAndView::with_model(view_name, model))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    async fn render(uri: &str) -> (StatusCode, String) {
        let response = crate::test_app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            mime::TEXT_HTML_UTF_8.as_ref()
        );
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn each_view_route_renders_its_data() {
        for (uri, data) in [
            ("/response-view-v1", "hello!"),
            ("/response-view-v2", "hello!!"),
            ("/response/hello", "hello!!!"),
        ] {
            let (status, html) = render(uri).await;
            assert_eq!(status, StatusCode::OK, "{uri}");
            assert!(html.contains(&format!("<p>{data}</p>")), "{uri}: {html}");
        }
    }

    fn resolver() -> ViewResolver {
        ViewResolver(Arc::new(environment().unwrap()))
    }

    #[test]
    fn escapes_model_values() {
        let mav = ModelAndView::new("response/hello").add_object("data", "<b>hi");
        let Html(html) = resolver().render(&mav).unwrap();

        assert!(html.contains("<p>&lt;b&gt;hi</p>"), "{html}");
    }

    #[test]
    fn unknown_view_is_an_error() {
        let err = resolver()
            .render(&ModelAndView::new("response/missing"))
            .unwrap_err();

        assert!(matches!(err, AppError::View { ref view, .. } if view == "response/missing"));
    }
}
