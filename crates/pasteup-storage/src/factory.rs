use std::sync::Arc;
use std::time::Duration;

use pasteup_core::{BackendKind, PasteConfig, PasteResult};

use crate::credentials::StaticCredentials;
use crate::graph::GraphStore;
use crate::reqwest_client::ReqwestHttpClient;
use crate::sharepoint::SharePointStore;
use crate::traits::RemoteStore;
use crate::transport::HttpClient;

/// Create the HTTP client described by configuration.
pub fn create_http_client(config: &PasteConfig) -> PasteResult<Arc<dyn HttpClient>> {
    let credentials = Arc::new(StaticCredentials::from_config(config));
    let client = ReqwestHttpClient::new(
        Duration::from_secs(config.request_timeout_secs),
        credentials,
    )?;
    Ok(Arc::new(client))
}

/// Create a remote store based on configuration
pub fn create_store(config: &PasteConfig, http: Arc<dyn HttpClient>) -> Arc<dyn RemoteStore> {
    match config.backend {
        BackendKind::Graph => {
            tracing::debug!(
                base_url = %config.base_url(),
                strategy = %config.folder_strategy,
                "Using Graph backend"
            );
            Arc::new(GraphStore::new(
                http,
                config.base_url(),
                config.folder_strategy,
            ))
        }
        BackendKind::SharePoint => {
            tracing::debug!(site_url = %config.base_url(), "Using SharePoint backend");
            Arc::new(SharePointStore::new(http, config.base_url()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::ScriptedHttpClient;
    use pasteup_core::RemotePath;

    #[test]
    fn test_store_matches_backend() {
        let http: Arc<dyn HttpClient> = Arc::new(ScriptedHttpClient::new());

        let graph = create_store(&PasteConfig::default(), http.clone());
        assert_eq!(graph.backend_type(), BackendKind::Graph);

        let config = PasteConfig::sharepoint(
            "https://contoso.sharepoint.com/sites/team",
            RemotePath::parse("Shared Documents").unwrap(),
        );
        let sharepoint = create_store(&config, http);
        assert_eq!(sharepoint.backend_type(), BackendKind::SharePoint);
        assert!(!sharepoint.creates_folders());
    }

    #[test]
    fn test_http_client_from_config() {
        let mut config = PasteConfig::default();
        config.access_token = Some("abc".to_string());
        assert!(create_http_client(&config).is_ok());
    }
}
