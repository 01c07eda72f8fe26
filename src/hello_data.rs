use std::fmt;

use serde::{Deserialize, Serialize};

/// 파라미터 바인딩과 JSON 바디 변환에 공통으로 쓰이는 값 객체.
///
/// 두 필드 모두 요청에 없으면 기본값(`None`, `0`)으로 채워진다.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HelloData {
    pub username: Option<String>,
    pub age: i32,
}

impl HelloData {
    pub fn new(username: impl Into<String>, age: i32) -> Self {
        Self {
            username: Some(username.into()),
            age,
        }
    }

    pub fn username_or_null(&self) -> &str {
        self.username.as_deref().unwrap_or("null")
    }
}

// HelloData(username=hello, age=20)
impl fmt::Display for HelloData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HelloData(username={}, age={})",
            self.username_or_null(),
            self.age
        )
    }
}
