use std::sync::Arc;

use pasteup_core::{LinkAccess, LinkScope, PasteError, PasteResult};
use serde::Deserialize;
use serde_json::json;

use super::endpoints::GraphEndpoints;
use crate::transport::{HttpClient, HttpRequest, ACCEPT, APPLICATION_JSON};

#[derive(Debug, Deserialize)]
struct Permission {
    link: SharingLink,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SharingLink {
    web_url: String,
}

/// Requests a sharing link for an uploaded item.
#[derive(Clone)]
pub struct LinkPublisher {
    http: Arc<dyn HttpClient>,
    endpoints: GraphEndpoints,
}

impl LinkPublisher {
    pub fn new(http: Arc<dyn HttpClient>, endpoints: GraphEndpoints) -> Self {
        Self { http, endpoints }
    }

    /// Any failure, transport included, comes back as [`PasteError::Link`].
    pub async fn publish(
        &self,
        item_id: &str,
        scope: LinkScope,
        access: LinkAccess,
    ) -> PasteResult<String> {
        let body = json!({
            "type": access.to_string(),
            "scope": scope.to_string(),
        });
        let request = HttpRequest::post(self.endpoints.create_link(item_id))
            .header(ACCEPT, APPLICATION_JSON)
            .json(&body)
            .map_err(|e| PasteError::Link(e.to_string()))?;

        let response = self
            .http
            .request(request)
            .await
            .map_err(|e| PasteError::Link(e.to_string()))?;

        if !response.is_success() {
            return Err(PasteError::Link(format!(
                "status {}: {}",
                response.status,
                response.text().trim()
            )));
        }

        let permission: Permission = response
            .json()
            .map_err(|e| PasteError::Link(format!("Unexpected response body: {}", e)))?;

        tracing::debug!(item_id = %item_id, scope = %scope, access = %access, "Share link created");
        Ok(permission.link.web_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{ScriptedHttpClient, TEST_GRAPH_BASE};
    use http::Method;

    const CREATE_LINK: &str = "https://graph.test/v1.0/me/drive/items/abc/createLink";

    fn publisher(http: &Arc<ScriptedHttpClient>) -> LinkPublisher {
        LinkPublisher::new(http.clone(), GraphEndpoints::new(TEST_GRAPH_BASE))
    }

    #[tokio::test]
    async fn test_publish_returns_web_url() {
        let http = Arc::new(ScriptedHttpClient::new());
        http.on(
            Method::POST,
            CREATE_LINK,
            201,
            r#"{"id":"p1","link":{"type":"view","scope":"anonymous","webUrl":"https://1drv.ms/i/abc"}}"#,
        );

        let url = publisher(&http)
            .publish("abc", LinkScope::Anonymous, LinkAccess::View)
            .await
            .unwrap();
        assert_eq!(url, "https://1drv.ms/i/abc");

        let body: serde_json::Value =
            serde_json::from_slice(http.requests()[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({"type": "view", "scope": "anonymous"}));
    }

    #[tokio::test]
    async fn test_forbidden_is_link_error() {
        let http = Arc::new(ScriptedHttpClient::new());
        http.on(Method::POST, CREATE_LINK, 403, "accessDenied");

        let err = publisher(&http)
            .publish("abc", LinkScope::Organization, LinkAccess::Edit)
            .await
            .unwrap_err();
        assert!(matches!(err, PasteError::Link(_)));
    }

    #[tokio::test]
    async fn test_transport_failure_is_link_error() {
        let http = Arc::new(ScriptedHttpClient::new());
        http.fail(
            Method::POST,
            CREATE_LINK,
            PasteError::Network("reset".to_string()),
        );

        let err = publisher(&http)
            .publish("abc", LinkScope::Organization, LinkAccess::View)
            .await
            .unwrap_err();
        assert!(matches!(err, PasteError::Link(_)));
    }
}
