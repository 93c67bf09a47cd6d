use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use tracing::error;

use super::dto::ErrorMessage;
use crate::Config;

#[derive(Debug)]
pub struct Error {
    pub code: StatusCode,
    pub body: Json<ErrorMessage>,
}

impl Error {
    pub fn new(code: StatusCode, message: &str) -> Self {
        Self {
            code,
            body: Json(ErrorMessage::new(message)),
        }
    }

    /// Store or webhook failure. The detail is always logged; the response
    /// carries it only outside production, where it is replaced by a generic
    /// message.
    pub fn backend(config: &Config, detail: impl std::fmt::Display) -> Self {
        let detail = detail.to_string();
        error!("Error: {detail}");
        if config.is_production() {
            Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Error del servidor")
        } else {
            Self::new(StatusCode::INTERNAL_SERVER_ERROR, &detail)
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        (self.code, self.body).into_response()
    }
}

impl From<(StatusCode, &str)> for Error {
    fn from((code, msg): (StatusCode, &str)) -> Self {
        Self::new(code, msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BackendConfig, Config};

    fn config_for(environment: &str) -> Config {
        Config {
            port: 3001,
            environment: environment.to_string(),
            frontend_url: None,
            backend: BackendConfig::Database {
                db_url: "postgres://localhost/test".to_string(),
            },
        }
    }

    #[test]
    fn backend_error_keeps_detail_in_development() {
        let err = Error::backend(&config_for("development"), "connection refused");
        assert_eq!(err.code, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.body.0.error, "connection refused");
        assert!(!err.body.0.success);
    }

    #[test]
    fn backend_error_is_redacted_in_production() {
        let err = Error::backend(&config_for("production"), "connection refused");
        assert_eq!(err.code, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.body.0.error, "Error del servidor");
    }
}
