//! 핸들러와 추출기에서 발생하는 모든 에러를 하나의 `AppError` 로 모으고,
//! `IntoResponse` 로 JSON 에러 응답을 만든다.
//!
//! 클라이언트 입력 문제(파라미터 누락, 잘못된 JSON 등)는 4xx 로,
//! 서버 쪽 문제는 500 으로 내려가며 자세한 내용은 로그에만 남긴다.

use std::{error::Error as _, num::ParseIntError, string::FromUtf8Error};

use axum::{
    extract::rejection::{BytesRejection, JsonRejection, StringRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use http_body_util::LengthLimitError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    // -- 클라이언트 에러 (4xx)
    #[error("Failed to deserialize request parameters: {0}")]
    InvalidParams(#[from] serde_urlencoded::de::Error),

    #[error(transparent)]
    JsonRejection(#[from] JsonRejection),

    #[error(transparent)]
    BytesRejection(#[from] BytesRejection),

    #[error(transparent)]
    StringRejection(#[from] StringRejection),

    #[error("request body is larger than {limit} bytes")]
    PayloadTooLarge { limit: usize },

    #[error("request body is not valid UTF-8")]
    InvalidUtf8(#[from] FromUtf8Error),

    #[error("failed to parse JSON body: {0}")]
    Json(#[from] serde_json::Error),

    // -- 서버 에러 (500)
    /// 손으로 파싱한 숫자 파라미터가 없거나 숫자가 아닐 때. 처리되지 않은 예외처럼 500 으로 떨어진다.
    #[error("failed to parse number: {0}")]
    NumberFormat(#[from] ParseIntError),

    /// 바디 길이 제한 초과는 `From` 에서 `PayloadTooLarge` 로 분리된다
    #[error("failed to read request body")]
    Body(#[source] axum::Error),

    #[error("failed to build response")]
    Http(#[from] axum::http::Error),

    #[error("failed to render view `{view}`")]
    View {
        view: String,
        #[source]
        source: minijinja::Error,
    },
}

impl From<axum::Error> for AppError {
    fn from(err: axum::Error) -> Self {
        // axum::body::to_bytes 와 http_body_util::Limited 는 제한 초과를 LengthLimitError 로 알린다
        if err
            .source()
            .is_some_and(|inner| inner.is::<LengthLimitError>())
        {
            AppError::PayloadTooLarge {
                limit: crate::request::BODY_LIMIT,
            }
        } else {
            AppError::Body(err)
        }
    }
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::JsonRejection(rejection) => rejection.status(),
            AppError::BytesRejection(rejection) => rejection.status(),
            AppError::StringRejection(rejection) => rejection.status(),
            AppError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::InvalidParams(_) | AppError::InvalidUtf8(_) | AppError::Json(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::NumberFormat(_)
            | AppError::Body(_)
            | AppError::Http(_)
            | AppError::View { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            AppError::JsonRejection(rejection) => rejection.body_text(),
            AppError::BytesRejection(rejection) => rejection.body_text(),
            AppError::StringRejection(rejection) => rejection.body_text(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct ErrorResponse {
            status: u16,
            error: &'static str,
            message: String,
        }

        let status = self.status();

        let message = if status.is_server_error() {
            // 서버 내부 오류는 클라이언트에 자세한 내용을 노출하지 않는다
            tracing::error!(err = ?self, "request failed");
            "Something went wrong".to_owned()
        } else {
            tracing::debug!(%status, err = %self, "request rejected");
            self.message()
        };

        let body = ErrorResponse {
            status: status.as_u16(),
            error: status.canonical_reason().unwrap_or("Unknown"),
            message,
        };

        (status, Json(body)).into_response()
    }
}
