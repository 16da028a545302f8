//! Remote store abstraction
//!
//! The paste pipeline talks to a cloud drive only through [`RemoteStore`], so either
//! protocol can sit behind it.

use async_trait::async_trait;
use pasteup_core::{
    BackendKind, FolderState, LinkAccess, LinkScope, PasteResult, RemoteItem, RemotePath,
    UploadRequest,
};
use serde::Serialize;

/// Per-segment state trace produced while ensuring a folder path, keyed by the
/// accumulated path of each segment.
pub type FolderReport = Vec<(String, FolderState)>;

/// Result of a connection check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionInfo {
    pub backend: BackendKind,
    /// Drive owner (Graph) or site title (SharePoint)
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drive_type: Option<String>,
}

#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Make every segment of `path` exist as a folder.
    ///
    /// Stores that cannot create folders return an empty report without any calls.
    async fn ensure_folder(&self, path: &RemotePath) -> PasteResult<FolderReport>;

    /// Write the image and describe the created item.
    ///
    /// A missing target folder surfaces as an upload error with status 404.
    async fn upload(&self, request: &UploadRequest) -> PasteResult<RemoteItem>;

    /// Request a sharing link for an uploaded item. Failures are `PasteError::Link`.
    async fn publish_link(
        &self,
        item_id: &str,
        scope: LinkScope,
        access: LinkAccess,
    ) -> PasteResult<String>;

    async fn check_connection(&self) -> PasteResult<ConnectionInfo>;

    fn backend_type(&self) -> BackendKind;

    /// Whether `ensure_folder` does anything; gates the 404 retry hop.
    fn creates_folders(&self) -> bool;

    fn supports_links(&self) -> bool;
}
