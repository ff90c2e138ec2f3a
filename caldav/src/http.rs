// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP client wrapper with authentication and `ETag` handling.

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};

use crate::config::{AuthMethod, CalDavConfig};
use crate::error::CalDavError;
use crate::types::{ETag, Href};

/// HTTP client for `CalDAV` operations.
#[derive(Debug)]
pub struct HttpClient {
    client: Client,
    config: CalDavConfig,
    base: Url,
}

impl HttpClient {
    /// Creates a new HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or HTTP client creation fails.
    pub fn new(config: CalDavConfig) -> Result<Self, CalDavError> {
        let base = Url::parse(&config.base_url).map_err(|e| {
            CalDavError::Config(format!("invalid base URL {}: {e}", config.base_url))
        })?;
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .user_agent(&config.user_agent)
            .build()?;
        Ok(Self {
            client,
            config,
            base,
        })
    }

    /// Builds a request with authentication headers.
    ///
    /// # Errors
    ///
    /// Returns an error if `href` cannot be resolved against the base URL.
    pub fn build_request(&self, method: Method, href: &str) -> Result<RequestBuilder, CalDavError> {
        let url = self.full_url(href)?;
        let mut req = self.client.request(method, url);

        match &self.config.auth {
            AuthMethod::Basic { username, password } => {
                req = req.basic_auth(username, Some(password));
            }
            AuthMethod::Bearer { token } => {
                req = req.bearer_auth(token);
            }
            AuthMethod::None => {}
        }

        Ok(req)
    }

    /// Builds a request with an XML body for a `WebDAV` extension method.
    ///
    /// # Errors
    ///
    /// Returns an error if the method name or `href` is invalid.
    pub fn build_xml_request(
        &self,
        method: &str,
        href: &str,
        body: String,
    ) -> Result<RequestBuilder, CalDavError> {
        let method = Method::from_bytes(method.as_bytes())
            .map_err(|e| CalDavError::Http(format!("Invalid method: {e}")))?;
        Ok(self
            .build_request(method, href)?
            .header("Content-Type", "application/xml; charset=utf-8")
            .body(body))
    }

    /// Executes a request and checks for HTTP errors.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or returns an error status code.
    pub async fn execute(&self, req: RequestBuilder) -> Result<Response, CalDavError> {
        let resp = req.send().await?;

        match resp.status() {
            StatusCode::OK
            | StatusCode::CREATED
            | StatusCode::NO_CONTENT
            | StatusCode::MULTI_STATUS => Ok(resp),
            StatusCode::PRECONDITION_FAILED => Err(CalDavError::PreconditionFailed(
                resp.headers()
                    .get("ETag")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("unknown")
                    .to_string(),
            )),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(CalDavError::Auth(resp.status().to_string()))
            }
            StatusCode::NOT_FOUND => Err(CalDavError::NotFound(Href::new(
                resp.url().path().to_string(),
            ))),
            status => {
                let text = resp
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unable to read response".to_string());
                Err(CalDavError::Http(format!("{status}: {text}")))
            }
        }
    }

    /// Adds If-Match header for conditional updates.
    pub fn if_match(req: RequestBuilder, etag: &ETag) -> RequestBuilder {
        req.header("If-Match", etag.as_str())
    }

    /// Adds `If-None-Match: *` so that creation fails if the resource exists.
    pub fn if_none_match_any(req: RequestBuilder) -> RequestBuilder {
        req.header("If-None-Match", "*")
    }

    /// Extracts `ETag` from response headers, if present.
    #[must_use]
    pub fn extract_etag(resp: &Response) -> Option<ETag> {
        resp.headers()
            .get("ETag")
            .and_then(|v| v.to_str().ok())
            .map(|s| ETag::new(s.to_string()))
    }

    /// Resolves `href` against the base URL.
    ///
    /// Absolute paths replace the path of the base URL, so server-returned
    /// hrefs like `/remote.php/dav/calendars/alice/` resolve correctly.
    fn full_url(&self, href: &str) -> Result<Url, CalDavError> {
        if href.is_empty() {
            return Ok(self.base.clone());
        }
        self.base
            .join(href)
            .map_err(|e| CalDavError::Config(format!("invalid href {href}: {e}")))
    }
}
