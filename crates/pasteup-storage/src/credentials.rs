//! Credentials consulted by the HTTP client on every request.

use async_trait::async_trait;
use pasteup_core::{PasteConfig, PasteResult};

use crate::transport::HttpRequest;

/// How a request is authenticated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Credentials {
    /// Rely on session cookies already held by the client's cookie store
    Ambient,
    /// `Authorization: Bearer {token}`
    Bearer(String),
    /// Raw `Cookie: {header}`
    Cookie(String),
}

impl Credentials {
    /// Attach these credentials to an outgoing request.
    pub fn apply(&self, request: HttpRequest) -> HttpRequest {
        match self {
            Credentials::Ambient => request,
            Credentials::Bearer(token) => {
                request.header("Authorization", format!("Bearer {}", token))
            }
            Credentials::Cookie(cookie) => request.header("Cookie", cookie.as_str()),
        }
    }
}

#[async_trait]
pub trait CredentialProvider: Send + Sync {
    async fn credentials(&self) -> PasteResult<Credentials>;
}

/// Credentials fixed at startup.
#[derive(Clone, Debug)]
pub struct StaticCredentials {
    credentials: Credentials,
}

impl StaticCredentials {
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    pub fn ambient() -> Self {
        Self::new(Credentials::Ambient)
    }

    /// A configured access token wins over a configured cookie.
    pub fn from_config(config: &PasteConfig) -> Self {
        let credentials = match (&config.access_token, &config.session_cookie) {
            (Some(token), _) => Credentials::Bearer(token.clone()),
            (None, Some(cookie)) => Credentials::Cookie(cookie.clone()),
            (None, None) => Credentials::Ambient,
        };
        Self::new(credentials)
    }
}

#[async_trait]
impl CredentialProvider for StaticCredentials {
    async fn credentials(&self) -> PasteResult<Credentials> {
        Ok(self.credentials.clone())
    }
}
