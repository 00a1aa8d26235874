use std::error::Error;
use std::fmt;

use reqwest::StatusCode;

#[derive(Debug)]
pub enum ApiClientError {
    Url(url::ParseError),
    Reqwest(reqwest::Error),
}

impl fmt::Display for ApiClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiClientError::Url(_) => write!(f, "ApiClientError::Url"),
            ApiClientError::Reqwest(_) => write!(f, "ApiClientError::Reqwest"),
        }
    }
}

impl Error for ApiClientError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ApiClientError::Url(v) => Some(v),
            ApiClientError::Reqwest(v) => Some(v),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    /// the request never produced a response. covers connection failures
    /// and timeouts
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("server responded with {status}")]
    Http {
        status: StatusCode,
        body: String,
    },

    /// the server rejected the session with a 401. the session has already
    /// been cleared by the time this is returned
    #[error("session expired")]
    AuthExpired {
        body: String,
    },

    #[error("invalid request url: {0}")]
    Url(#[from] url::ParseError),

    /// the value would be resolved away as a `.` or `..` segment, or is
    /// empty
    #[error("{0:?} cannot be used as a path segment")]
    PathSegment(String),

    #[error("session token cannot be used as a header value")]
    InvalidToken(#[from] reqwest::header::InvalidHeaderValue),

    #[error("unexpected response payload: {0}")]
    Decode(#[from] serde_json::Error),
}

impl RequestError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            RequestError::Http { status, .. } => Some(*status),
            RequestError::AuthExpired { .. } => Some(StatusCode::UNAUTHORIZED),
            RequestError::Network(err) => err.status(),
            _ => None
        }
    }

    pub fn body(&self) -> Option<&str> {
        match self {
            RequestError::Http { body, .. } |
            RequestError::AuthExpired { body } => Some(body.as_str()),
            _ => None
        }
    }

    pub fn is_auth_expired(&self) -> bool {
        matches!(self, RequestError::AuthExpired { .. })
    }

    /// the message the server attached to an error response. the backend
    /// answers with either `{"success":false,"message":"..."}` or plain
    /// text
    pub fn server_message(&self) -> Option<String> {
        let body = self.body()?.trim();

        if body.is_empty() {
            return None;
        }

        match serde_json::from_str::<serde_json::Value>(body) {
            Ok(serde_json::Value::Object(map)) => map.get("message")
                .and_then(|v| v.as_str())
                .map(|v| v.to_owned()),
            Ok(serde_json::Value::String(msg)) => Some(msg),
            Ok(_) => None,
            Err(_) => Some(body.to_owned()),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn http(body: &str) -> RequestError {
        RequestError::Http {
            status: StatusCode::BAD_REQUEST,
            body: body.to_owned(),
        }
    }

    #[test]
    fn server_message_from_json_body() {
        let err = http(r#"{"success":false,"message":"username taken"}"#);

        assert_eq!(err.server_message().as_deref(), Some("username taken"));
        assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
    }

    #[test]
    fn server_message_from_text_body() {
        assert_eq!(http("product not found").server_message().as_deref(), Some("product not found"));
        assert_eq!(http("   ").server_message(), None);
        assert_eq!(http("[1,2]").server_message(), None);
    }

    #[test]
    fn auth_expired_reports_unauthorized() {
        let err = RequestError::AuthExpired { body: String::new() };

        assert!(err.is_auth_expired());
        assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
    }
}
