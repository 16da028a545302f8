use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use pasteup_core::{PasteError, PasteResult};
use reqwest::Client;

use crate::credentials::{CredentialProvider, StaticCredentials};
use crate::transport::{HttpClient, HttpRequest, HttpResponse};

/// [`HttpClient`] backed by reqwest.
///
/// The cookie store is enabled so a session established by an earlier response is
/// carried on later requests, which is how ambient credentials work outside a browser.
#[derive(Clone)]
pub struct ReqwestHttpClient {
    client: Client,
    credentials: Arc<dyn CredentialProvider>,
    timeout: Duration,
}

impl ReqwestHttpClient {
    pub fn new(timeout: Duration, credentials: Arc<dyn CredentialProvider>) -> PasteResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .cookie_store(true)
            .build()
            .map_err(|e| PasteError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            credentials,
            timeout,
        })
    }

    pub fn with_ambient_session(timeout: Duration) -> PasteResult<Self> {
        Self::new(timeout, Arc::new(StaticCredentials::ambient()))
    }

    fn map_send_error(&self, err: reqwest::Error) -> PasteError {
        if err.is_timeout() {
            PasteError::Network(format!(
                "request timed out after {}s",
                self.timeout.as_secs()
            ))
        } else if err.is_connect() {
            PasteError::Network(format!("connection failed: {}", err))
        } else {
            PasteError::Network(err.to_string())
        }
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn request(&self, request: HttpRequest) -> PasteResult<HttpResponse> {
        let request = self.credentials.credentials().await?.apply(request);
        let start = Instant::now();

        let mut builder = self.client.request(request.method.clone(), &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|e| {
            tracing::warn!(
                method = %request.method,
                url = %request.url,
                error = %e,
                "HTTP request failed"
            );
            self.map_send_error(e)
        })?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(k, v)| {
                v.to_str()
                    .ok()
                    .map(|v| (k.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response
            .bytes()
            .await
            .map_err(|e| self.map_send_error(e))?;

        tracing::debug!(
            method = %request.method,
            url = %request.url,
            status = status,
            bytes = body.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "HTTP request completed"
        );

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
