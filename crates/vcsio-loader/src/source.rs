//! Fragment sources

use parking_lot::Mutex;
use reqwest::redirect::Policy;
use std::collections::HashMap;
use std::future::Future;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use crate::error::FetchError;
use crate::Result;

/// Where tab fragments come from
pub trait FragmentSource {
    /// Fetch the fragment at `url` as text. Non-success responses are
    /// errors carrying the status code.
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String>> + Send;
}

/// Fragments served over HTTP
#[derive(Debug, Clone)]
pub struct HttpFragmentSource {
    client: reqwest::Client,
    base: Option<Url>,
}

impl HttpFragmentSource {
    pub fn new(base: Option<Url>, timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .redirect(Policy::limited(5))
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self { client, base })
    }

    pub fn base(&self) -> Option<&Url> {
        self.base.as_ref()
    }

    /// Absolute URL for a tab's `data-source`
    pub fn resolve(&self, source: &str) -> Result<Url> {
        match Url::parse(source) {
            Ok(url) => Ok(url),
            Err(url::ParseError::RelativeUrlWithoutBase) => match &self.base {
                Some(base) => Ok(base.join(source)?),
                None => Err(FetchError::InvalidUrl(format!(
                    "relative source '{}' without a base URL",
                    source
                ))),
            },
            Err(e) => Err(e.into()),
        }
    }
}

impl FragmentSource for HttpFragmentSource {
    async fn fetch(&self, url: &str) -> Result<String> {
        let url = self.resolve(url)?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(FetchError::InvalidUrl(format!(
                "unsupported scheme '{}'",
                url.scheme()
            )));
        }

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        tracing::debug!(url = %url, status = status.as_u16(), "Fetched fragment");
        Ok(response.text().await?)
    }
}

/// Fragments read from a local site directory, as a static file server
/// would serve them
#[derive(Debug, Clone)]
pub struct DirectoryFragmentSource {
    root: PathBuf,
}

impl DirectoryFragmentSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File path for a relative source, refusing anything that escapes the
    /// root
    pub fn resolve(&self, source: &str) -> Result<PathBuf> {
        let path = source
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim_start_matches("./");
        let relative = Path::new(path);

        let safe = !path.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        if !safe {
            return Err(FetchError::InvalidUrl(source.to_string()));
        }

        Ok(self.root.join(relative))
    }
}

impl FragmentSource for DirectoryFragmentSource {
    async fn fetch(&self, url: &str) -> Result<String> {
        let path = self.resolve(url)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(body) => Ok(body),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(FetchError::Status {
                url: url.to_string(),
                status: 404,
            }),
            Err(e) => Err(e.into()),
        }
    }
}

#[derive(Debug, Clone)]
enum StaticResponse {
    Body(String),
    Status(u16),
    NetworkFailure(String),
}

/// Fixed responses keyed by URL; unknown URLs answer 404. Every request is
/// recorded in order.
#[derive(Debug, Clone, Default)]
pub struct StaticFragmentSource {
    responses: HashMap<String, StaticResponse>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl StaticFragmentSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fragment(mut self, url: &str, body: &str) -> Self {
        self.responses
            .insert(url.to_string(), StaticResponse::Body(body.to_string()));
        self
    }

    pub fn with_status(mut self, url: &str, status: u16) -> Self {
        self.responses
            .insert(url.to_string(), StaticResponse::Status(status));
        self
    }

    pub fn with_network_failure(mut self, url: &str, reason: &str) -> Self {
        self.responses.insert(
            url.to_string(),
            StaticResponse::NetworkFailure(reason.to_string()),
        );
        self
    }

    /// URLs requested so far, oldest first
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }
}

impl FragmentSource for StaticFragmentSource {
    async fn fetch(&self, url: &str) -> Result<String> {
        self.requests.lock().push(url.to_string());

        match self.responses.get(url) {
            Some(StaticResponse::Body(body)) => Ok(body.clone()),
            Some(StaticResponse::Status(status)) => Err(FetchError::Status {
                url: url.to_string(),
                status: *status,
            }),
            Some(StaticResponse::NetworkFailure(reason)) => Err(FetchError::Network(reason.clone())),
            None => Err(FetchError::Status {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}
