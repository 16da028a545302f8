use std::sync::Arc;

use async_trait::async_trait;
use pasteup_core::{
    BackendKind, FolderStrategy, LinkAccess, LinkScope, PasteError, PasteResult, RemoteItem,
    RemotePath, UploadRequest,
};
use serde::Deserialize;

use super::endpoints::GraphEndpoints;
use super::folder::FolderEnsurer;
use super::link::LinkPublisher;
use super::upload::GraphUploader;
use crate::traits::{ConnectionInfo, FolderReport, RemoteStore};
use crate::transport::{HttpClient, HttpRequest, ACCEPT, APPLICATION_JSON};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Drive {
    #[serde(default)]
    drive_type: Option<String>,
    #[serde(default)]
    owner: Option<IdentitySet>,
}

#[derive(Debug, Deserialize)]
struct IdentitySet {
    #[serde(default)]
    user: Option<Identity>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Identity {
    #[serde(default)]
    display_name: Option<String>,
}

/// OneDrive / OneDrive for Business through Microsoft Graph.
#[derive(Clone)]
pub struct GraphStore {
    http: Arc<dyn HttpClient>,
    endpoints: GraphEndpoints,
    folders: FolderEnsurer,
    uploader: GraphUploader,
    links: LinkPublisher,
}

impl GraphStore {
    pub fn new(http: Arc<dyn HttpClient>, base_url: &str, strategy: FolderStrategy) -> Self {
        let endpoints = GraphEndpoints::new(base_url);
        Self {
            folders: FolderEnsurer::new(http.clone(), endpoints.clone(), strategy),
            uploader: GraphUploader::new(http.clone(), endpoints.clone()),
            links: LinkPublisher::new(http.clone(), endpoints.clone()),
            http,
            endpoints,
        }
    }

    pub fn endpoints(&self) -> &GraphEndpoints {
        &self.endpoints
    }
}

#[async_trait]
impl RemoteStore for GraphStore {
    async fn ensure_folder(&self, path: &RemotePath) -> PasteResult<FolderReport> {
        self.folders.ensure(path).await
    }

    async fn upload(&self, request: &UploadRequest) -> PasteResult<RemoteItem> {
        self.uploader.upload(request).await
    }

    async fn publish_link(
        &self,
        item_id: &str,
        scope: LinkScope,
        access: LinkAccess,
    ) -> PasteResult<String> {
        self.links.publish(item_id, scope, access).await
    }

    async fn check_connection(&self) -> PasteResult<ConnectionInfo> {
        let request = HttpRequest::get(self.endpoints.drive()).header(ACCEPT, APPLICATION_JSON);
        let response = self.http.request(request).await?;

        if PasteError::is_auth_status(response.status) {
            return Err(PasteError::Auth {
                status: response.status,
                message: "drive request rejected".to_string(),
            });
        }
        if !response.is_success() {
            return Err(PasteError::Network(format!(
                "drive request returned status {}",
                response.status
            )));
        }

        let drive: Drive = response.json()?;
        let display_name = drive
            .owner
            .and_then(|o| o.user)
            .and_then(|u| u.display_name)
            .unwrap_or_else(|| "Unknown".to_string());

        tracing::info!(owner = %display_name, "Graph connection verified");
        Ok(ConnectionInfo {
            backend: BackendKind::Graph,
            display_name,
            drive_type: drive.drive_type,
        })
    }

    fn backend_type(&self) -> BackendKind {
        BackendKind::Graph
    }

    fn creates_folders(&self) -> bool {
        true
    }

    fn supports_links(&self) -> bool {
        true
    }
}
