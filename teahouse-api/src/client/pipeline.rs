use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Request, Response, StatusCode};
use teahouse_lib::{Navigator, Session, SessionStore};
use teahouse_lib::routing::{normalize, LOGIN_PATH};

use crate::client::error::RequestError;

/// sets `Authorization: Bearer <token>` when the session holds a token.
/// headers are left untouched otherwise
pub fn authorize(headers: &mut HeaderMap, session: &Session) -> Result<(), RequestError> {
    let Some(token) = &session.token else {
        return Ok(());
    };

    let mut value = HeaderValue::from_str(&format!("Bearer {}", token))?;
    value.set_sensitive(true);

    headers.insert(AUTHORIZATION, value);

    Ok(())
}

/// the hooks wrapped around every request sent by the client
#[derive(Clone)]
pub struct AuthPipeline {
    session: Arc<SessionStore>,
    navigator: Option<Arc<dyn Navigator>>,
}

impl AuthPipeline {
    pub fn new(session: Arc<SessionStore>) -> Self {
        AuthPipeline {
            session,
            navigator: None,
        }
    }

    pub fn with_navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub fn before(&self, request: &mut Request) -> Result<(), RequestError> {
        authorize(request.headers_mut(), &self.session.current())
    }

    /// converts a 401 into [`RequestError::AuthExpired`] after dropping the
    /// session and sending the user to the login view. everything else is
    /// returned unchanged.
    pub fn after(&self, result: Result<Response, RequestError>) -> Result<Response, RequestError> {
        match result {
            Err(RequestError::Http { status, body }) if status == StatusCode::UNAUTHORIZED => {
                self.expire();

                Err(RequestError::AuthExpired { body })
            },
            other => other,
        }
    }

    fn expire(&self) {
        tracing::debug!("server rejected session");

        if let Err(err) = self.session.clear() {
            tracing::error!("failed to clear session: {}", err);
        }

        let Some(navigator) = &self.navigator else {
            return;
        };

        let at_login = navigator.location()
            .map(|path| normalize(&path) == LOGIN_PATH)
            .unwrap_or(false);

        if !at_login {
            navigator.navigate(LOGIN_PATH);
        }
    }
}

impl std::fmt::Debug for AuthPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthPipeline")
            .field("session", &self.session)
            .field("navigator", &self.navigator.is_some())
            .finish()
    }
}
