//! `gloo-net` HTTP transport for the banking API.
//!
//! Client-side (csr): real `fetch` calls through `gloo-net`.
//! Native builds: every request fails with a transport error, since there is
//! no browser to send it from.
//!
//! ERROR HANDLING
//! ==============
//! Only failures to obtain a response become errors. Any HTTP status comes
//! back as an `ApiResponse` and the session core decides what it means.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use session::{ApiError, ApiRequest, ApiResponse, Transport};

/// Sends API requests to a fixed base URL.
#[derive(Clone, Debug)]
pub struct GlooTransport {
    base_url: String,
}

impl GlooTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into() }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(any(test, feature = "csr"))]
fn request_headers(request: &ApiRequest) -> Vec<(&'static str, String)> {
    let mut headers = vec![("Accept", "application/json".to_owned())];
    if let Some(authorization) = request.authorization() {
        headers.push(("Authorization", authorization));
    }
    headers
}

#[async_trait::async_trait(?Send)]
impl Transport for GlooTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        #[cfg(feature = "csr")]
        {
            use gloo_net::http::Request;
            use session::Method;

            let url = request.url(&self.base_url);
            let mut builder = match request.method {
                Method::Get => Request::get(&url),
                Method::Post => Request::post(&url),
            }
            .query(request.query_pairs());
            for (name, value) in request_headers(&request) {
                builder = builder.header(name, &value);
            }
            let prepared = match &request.body {
                Some(body) => builder.json(body),
                None => builder.build(),
            }
            .map_err(|e| ApiError::Transport(e.to_string()))?;

            let resp = prepared
                .send()
                .await
                .map_err(|e| ApiError::Transport(e.to_string()))?;
            let status = resp.status();
            let body = resp.text().await.map_err(|e| ApiError::Transport(e.to_string()))?;
            Ok(ApiResponse { status, body })
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (&self.base_url, request);
            Err(ApiError::Transport("not available outside the browser".to_owned()))
        }
    }
}
