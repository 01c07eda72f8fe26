//! 요청 파라미터 / 메시지 바디 / 헤더를 꺼내는 방법과
//! 문자열 / JSON / 뷰 템플릿으로 응답하는 방법을 엔드포인트별로 보여주는 예제.
//!
//! ```not_rust
//! cargo run -p example-request-mapping
//! ```
//!
//! | 경로 | 내용 |
//! |---|---|
//! | `/log-test` | 로그 레벨 |
//! | `/request-param-*`, `/model-attribute-*` | 요청 파라미터 바인딩 |
//! | `/request-body-string-*`, `/request-body-json-*` | 메시지 바디 읽기 |
//! | `/headers` | 헤더, 쿠키, 로케일 |
//! | `/response-body-*` | 메시지 바디에 직접 응답 |
//! | `/response-view-*`, `/response/hello` | 뷰 템플릿 렌더링 |

mod config;
mod error;
mod extract;
mod hello_data;
mod request;
mod response;

use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::{FromRef, MatchedPath, Request},
    http::StatusCode,
    response::IntoResponse,
    Router,
};
use minijinja::Environment;
use tokio::{net::TcpListener, signal};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                // axum::rejection=trace → 기본 추출기의 거절 사유도 로그로 확인
                format!(
                    "{}=debug,tower_http=debug,axum::rejection=trace",
                    env!("CARGO_CRATE_NAME")
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().context("failed to load configuration")?;
    let addr = config.addr();
    let state = AppState::new(config).context("failed to load view templates")?;

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::debug!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

/// 핸들러들이 공유하는 상태. 추출기는 `FromRef` 로 필요한 필드만 꺼낸다.
#[derive(Clone, FromRef)]
pub struct AppState {
    config: Arc<Config>,
    views: Arc<Environment<'static>>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, minijinja::Error> {
        Ok(Self {
            config: Arc::new(config),
            views: Arc::new(response::view::environment()?),
        })
    }
}

fn app(state: AppState) -> Router {
    Router::new()
        .merge(log_test::router())
        .merge(request::router())
        .merge(response::router())
        .fallback(handler_404)
        .layer(TraceLayer::new_for_http().make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();
            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched| matched.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        }))
        .with_state(state)
}

// 정의되지 않은 모든 경로
async fn handler_404() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "nothing to see here")
}

// Ctrl+C 또는 SIGTERM 을 받으면 진행 중인 요청을 마무리하고 종료
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(%err, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!(%err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutting down");
}

#[cfg(test)]
fn test_app() -> Router {
    app(AppState::new(Config::default()).unwrap())
}
