//! HTTP transport seam.
//!
//! Every gateway operation is a single synchronous request/response
//! exchange, so the transport is a blocking client behind a small trait
//! and tests substitute a recording double. No retries live here; a send
//! is one attempt.

use tracing::debug;

use crate::error::GatewayError;

/// The part of an HTTP response the client cares about.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub trait Transport: Send + Sync {
    /// POST a URL-encoded form to `path` (relative to the gateway root).
    fn post_form(&self, path: &str, form: &[(&str, &str)]) -> Result<HttpResponse, GatewayError>;

    /// GET `path` with the given query parameters.
    fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<HttpResponse, GatewayError>;
}

/// Blocking HTTP transport over rustls.
pub struct HttpTransport {
    base_url: String,
    http: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>) -> Result<Self, GatewayError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let http = reqwest::blocking::Client::builder().build()?;
        Ok(Self { base_url, http })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

impl Transport for HttpTransport {
    fn post_form(&self, path: &str, form: &[(&str, &str)]) -> Result<HttpResponse, GatewayError> {
        let url = self.url(path);
        debug!(%url, "gateway POST");
        let response = self.http.post(&url).form(form).send()?;
        let status = response.status().as_u16();
        let body = response.text()?;
        Ok(HttpResponse { status, body })
    }

    fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<HttpResponse, GatewayError> {
        let url = self.url(path);
        debug!(%url, "gateway GET");
        let response = self.http.get(&url).query(query).send()?;
        let status = response.status().as_u16();
        let body = response.text()?;
        Ok(HttpResponse { status, body })
    }
}
