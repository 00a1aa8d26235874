use std::borrow::Cow;
use std::sync::Arc;
use std::time::Duration;

use reqwest::{RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use teahouse_lib::{Navigator, SessionStore};

pub mod error;
pub mod pipeline;

pub mod auth;
pub mod users;
pub mod products;
pub mod categories;
pub mod cart;
pub mod orders;
pub mod stats;
pub mod recommendation;
pub mod regions;

use error::{ApiClientError, RequestError};
use pipeline::AuthPipeline;

pub const DEFAULT_URL: &str = "http://localhost:8081/api/";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(10_000);

#[derive(Debug, Clone)]
pub struct Info {
    pub url: Url,
    pub timeout: Duration,
}

/// the one http client used for every api call. all requests go through
/// the same [`AuthPipeline`]
#[derive(Debug, Clone)]
pub struct ApiClient {
    pub(crate) client: reqwest::Client,
    pub(crate) info: Info,
    pub(crate) pipeline: AuthPipeline,
}

impl ApiClient {
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder {
            url: DEFAULT_URL.to_owned(),
            timeout: DEFAULT_TIMEOUT,
            agent: None,
            session: None,
            navigator: None,
        }
    }

    pub fn info(&self) -> &Info {
        &self.info
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        self.pipeline.session()
    }

    /// joins the path beneath the base url. a leading slash does not reset
    /// the path so `/products` against `http://host/api/` gives
    /// `http://host/api/products`
    pub fn url<U>(&self, path: U) -> Result<Url, RequestError>
    where
        U: AsRef<str>
    {
        Ok(self.info.url.join(path.as_ref().trim_start_matches('/'))?)
    }

    /// percent encodes a single path segment. values that would be
    /// dropped or resolved by the url parser are rejected instead of
    /// silently hitting a different endpoint
    pub fn segment(value: &str) -> Result<Cow<'_, str>, RequestError> {
        if matches!(value, "" | "." | "..") {
            return Err(RequestError::PathSegment(value.to_owned()));
        }

        Ok(urlencoding::encode(value))
    }

    pub(crate) fn get<U>(&self, path: U) -> Result<RequestBuilder, RequestError>
    where
        U: AsRef<str>,
    {
        Ok(self.client.get(self.url(path)?))
    }

    pub(crate) fn post<U>(&self, path: U) -> Result<RequestBuilder, RequestError>
    where
        U: AsRef<str>
    {
        Ok(self.client.post(self.url(path)?))
    }

    pub(crate) fn put<U>(&self, path: U) -> Result<RequestBuilder, RequestError>
    where
        U: AsRef<str>
    {
        Ok(self.client.put(self.url(path)?))
    }

    pub(crate) fn delete<U>(&self, path: U) -> Result<RequestBuilder, RequestError>
    where
        U: AsRef<str>
    {
        Ok(self.client.delete(self.url(path)?))
    }

    /// sends the request through the pipeline. non 2xx responses are
    /// returned as [`RequestError::Http`], or [`RequestError::AuthExpired`]
    /// for a 401.
    pub async fn execute(&self, builder: RequestBuilder) -> Result<Response, RequestError> {
        let mut request = builder.build()?;

        self.pipeline.before(&mut request)?;

        let method = request.method().clone();
        let url = request.url().clone();

        let result = match self.client.execute(request).await {
            Ok(res) => check_status(res).await,
            Err(err) => Err(RequestError::Network(err)),
        };

        match &result {
            Ok(res) => tracing::debug!(%method, %url, status = %res.status(), "request complete"),
            Err(err) => tracing::debug!(%method, %url, "request failed: {}", err),
        }

        self.pipeline.after(result)
    }

    /// sends the request and decodes the json payload
    pub(crate) async fn send_json<T>(&self, builder: RequestBuilder) -> Result<T, RequestError>
    where
        T: DeserializeOwned
    {
        let res = self.execute(builder).await?;
        let bytes = res.bytes().await?;

        Ok(serde_json::from_slice(&bytes)?)
    }

    /// sends the request and returns whatever json the server answered
    /// with. an empty body gives `None`
    pub(crate) async fn send_value(&self, builder: RequestBuilder) -> Result<Option<serde_json::Value>, RequestError> {
        let res = self.execute(builder).await?;
        let bytes = res.bytes().await?;

        if bytes.iter().all(|b| b.is_ascii_whitespace()) {
            return Ok(None);
        }

        match serde_json::from_slice(&bytes) {
            Ok(value) => Ok(Some(value)),
            Err(_) => Ok(Some(serde_json::Value::String(
                String::from_utf8_lossy(&bytes).into_owned()
            ))),
        }
    }
}

async fn check_status(res: Response) -> Result<Response, RequestError> {
    let status = res.status();

    if status.is_success() {
        return Ok(res);
    }

    let body = res.text().await?;

    Err(RequestError::Http { status, body })
}

pub struct ApiClientBuilder {
    url: String,
    timeout: Duration,
    agent: Option<String>,
    session: Option<Arc<SessionStore>>,
    navigator: Option<Arc<dyn Navigator>>,
}

impl ApiClientBuilder {
    pub fn base_url<U>(&mut self, url: U) -> &mut Self
    where
        U: Into<String>
    {
        self.url = url.into();
        self
    }

    pub fn timeout(&mut self, timeout: Duration) -> &mut Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent<U>(&mut self, user_agent: U) -> &mut Self
    where
        U: Into<String>
    {
        self.agent = Some(user_agent.into());
        self
    }

    pub fn session(&mut self, session: Arc<SessionStore>) -> &mut Self {
        self.session = Some(session);
        self
    }

    pub fn navigator(&mut self, navigator: Arc<dyn Navigator>) -> &mut Self {
        self.navigator = Some(navigator);
        self
    }

    pub fn build(self) -> Result<ApiClient, ApiClientError> {
        let user_agent = self.agent.unwrap_or_else(|| {
            format!("teahouse-api-client/{}", env!("CARGO_PKG_VERSION"))
        });
        let mut url = Url::parse(&self.url)
            .map_err(ApiClientError::Url)?;

        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(user_agent)
            .build()
            .map_err(ApiClientError::Reqwest)?;

        let session = self.session.unwrap_or_else(|| Arc::new(SessionStore::memory()));
        let mut pipeline = AuthPipeline::new(session);

        if let Some(navigator) = self.navigator {
            pipeline = pipeline.with_navigator(navigator);
        }

        Ok(ApiClient {
            client,
            info: Info {
                url,
                timeout: self.timeout,
            },
            pipeline,
        })
    }
}
