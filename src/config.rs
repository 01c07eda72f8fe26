//! 서버 설정. `.env` 파일과 환경 변수에서 읽고, 없으면 기본값을 쓴다.
//!
//! | 변수 | 기본값 |
//! |---|---|
//! | `APP_HOST` | `127.0.0.1` |
//! | `APP_PORT` | `3000` |
//! | `APP_DEFAULT_LOCALE` | `en-US` |

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    /// `Accept-Language` 헤더가 없을 때 사용할 로케일
    pub default_locale: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 3000,
            default_locale: "en-US".to_owned(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok(); // .env 파일 로드 (없어도 무시)
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup("APP_HOST") {
            config.host = value.parse().map_err(|_| ConfigError::Invalid {
                key: "APP_HOST",
                value,
            })?;
        }

        if let Some(value) = lookup("APP_PORT") {
            config.port = value.parse().map_err(|_| ConfigError::Invalid {
                key: "APP_PORT",
                value,
            })?;
        }

        if let Some(value) = lookup("APP_DEFAULT_LOCALE") {
            if value.trim().is_empty() {
                return Err(ConfigError::Invalid {
                    key: "APP_DEFAULT_LOCALE",
                    value,
                });
            }
            config.default_locale = value.trim().to_owned();
        }

        Ok(config)
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
