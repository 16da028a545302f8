use serde::{Deserialize, Serialize};

use super::path::RemotePath;
use crate::error::PasteError;

/// Bytes of one pasted image, addressed to a folder on the remote store.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    path: RemotePath,
    file_name: String,
    bytes: Vec<u8>,
    mime_type: String,
}

impl UploadRequest {
    pub fn new(
        path: RemotePath,
        file_name: impl Into<String>,
        bytes: Vec<u8>,
        mime_type: impl Into<String>,
    ) -> Result<Self, PasteError> {
        let file_name = file_name.into();
        if file_name.trim().is_empty() {
            return Err(PasteError::InvalidRequest("file name is empty".to_string()));
        }
        if file_name.contains('/') || file_name.contains('\\') {
            return Err(PasteError::InvalidRequest(format!(
                "file name '{}' contains a path separator",
                file_name
            )));
        }
        if bytes.is_empty() {
            return Err(PasteError::InvalidRequest("image is empty".to_string()));
        }

        Ok(Self {
            path,
            file_name,
            bytes,
            mime_type: mime_type.into(),
        })
    }

    pub fn path(&self) -> &RemotePath {
        &self.path
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Full path of the file once uploaded.
    pub fn remote_path(&self) -> RemotePath {
        // file_name was validated as a segment-safe string in `new`
        self.path
            .join(&self.file_name)
            .unwrap_or_else(|_| self.path.clone())
    }
}

/// A file created on the remote store by an upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteItem {
    /// Opaque store-assigned identifier
    pub id: String,
    pub direct_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub share_url: Option<String>,
}

impl RemoteItem {
    pub fn new(id: impl Into<String>, direct_url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            direct_url: direct_url.into(),
            share_url: None,
        }
    }

    pub fn with_share_url(self, share_url: impl Into<String>) -> Self {
        Self {
            share_url: Some(share_url.into()),
            ..self
        }
    }

    /// URL handed to the insertion surface: the share link when one was published.
    pub fn resolved_url(&self) -> &str {
        self.share_url.as_deref().unwrap_or(&self.direct_url)
    }
}

/// Per-segment state while a folder path is being ensured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FolderState {
    Absent,
    Creating,
    Present,
}
