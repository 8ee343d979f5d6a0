use async_trait::async_trait;
use domain::DomainError;
use reqwest::{Error, Response};
use serde::Deserialize;

/// The error shapes PostgREST and GoTrue reply with.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    msg: Option<String>,
    error_description: Option<String>,
    error: Option<String>,
}

pub(crate) fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| {
            parsed
                .message
                .or(parsed.msg)
                .or(parsed.error_description)
                .or(parsed.error)
        })
        .unwrap_or_else(|| body.trim().to_string())
}

#[async_trait]
pub trait ResponseExt {
    async fn check(self) -> Result<Response, DomainError>;
}

#[async_trait]
impl ResponseExt for Response {
    async fn check(self) -> Result<Response, DomainError> {
        let status = self.status();
        if status.is_success() {
            return Ok(self);
        }
        let body = self.text().await.unwrap_or_default();
        Err(DomainError::Gateway {
            status: status.as_u16(),
            message: error_message(&body),
        })
    }
}

#[async_trait]
impl ResponseExt for Result<Response, Error> {
    async fn check(self) -> Result<Response, DomainError> {
        match self {
            Ok(response) => response.check().await,
            Err(e) => Err(DomainError::NetworkError(e.to_string())),
        }
    }
}

pub(crate) fn decode_error(e: Error) -> DomainError {
    DomainError::ParseError(format!("Unexpected response body: {}", e))
}
