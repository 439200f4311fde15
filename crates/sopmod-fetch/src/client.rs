use std::fmt;
use std::io::Read;

use serde::de::DeserializeOwned;

use crate::error::{Error, Result};

/// Sent with every request; the GitHub API rejects requests without one.
pub const USER_AGENT: &str = "sopmod";

/// A response whose body has not been read yet.
pub struct Response {
    pub url:            String,
    pub status:         u16,
    pub content_length: Option<u64>,
    pub body:           Box<dyn Read + Send>,
}

impl Response {
    pub fn is_success(&self) -> bool { (200..300).contains(&self.status) }

    /// Fail with [`Error::Status`] unless the status is 2xx.
    pub fn error_for_status(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(Error::Status {
                url:    self.url,
                status: self.status,
            })
        }
    }

    pub fn json<T: DeserializeOwned>(self) -> Result<T> {
        let url = self.url;
        serde_json::from_reader(self.body).map_err(|source| Error::Parse { url, source })
    }
}

impl fmt::Debug for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Response")
            .field("url", &self.url)
            .field("status", &self.status)
            .field("content_length", &self.content_length)
            .finish_non_exhaustive()
    }
}

/// Blocking HTTP GET.
///
/// Implementations return non-2xx responses as values; only transport
/// failures are errors.
pub trait HttpClient {
    fn get(&self, url: &str) -> Result<Response>;
}

impl<C: HttpClient + ?Sized> HttpClient for &C {
    fn get(&self, url: &str) -> Result<Response> { (**self).get(url) }
}

pub struct ReqwestClient {
    inner: reqwest::blocking::Client,
}

impl ReqwestClient {
    /// A client without a request timeout: large archives on slow links
    /// must not be cut off.
    pub fn new() -> Result<Self> {
        let inner = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(None::<std::time::Duration>)
            .build()
            .map_err(|e| Error::Network {
                url:    String::new(),
                source: Box::new(e),
            })?;
        Ok(Self { inner })
    }
}

impl HttpClient for ReqwestClient {
    fn get(&self, url: &str) -> Result<Response> {
        tracing::debug!(url, "GET");
        let response = self.inner.get(url).send().map_err(|e| Error::Network {
            url:    url.to_string(),
            source: Box::new(e),
        })?;
        Ok(Response {
            url:            url.to_string(),
            status:         response.status().as_u16(),
            content_length: response.content_length(),
            body:           Box::new(response),
        })
    }
}
