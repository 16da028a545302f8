use pasteup_core::RemotePath;

use crate::encoding::{encode_path, encode_segment};

/// Path-addressed Microsoft Graph drive URLs.
#[derive(Clone, Debug)]
pub struct GraphEndpoints {
    base: String,
}

impl GraphEndpoints {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Drive item addressed by path.
    pub fn item(&self, path: &RemotePath) -> String {
        if path.is_root() {
            format!("{}/me/drive/root", self.base)
        } else {
            format!("{}/me/drive/root:/{}", self.base, encode_path(path))
        }
    }

    /// Children collection of `parent`, the target of folder creation.
    pub fn children(&self, parent: &RemotePath) -> String {
        if parent.is_root() {
            format!("{}/me/drive/root/children", self.base)
        } else {
            format!("{}/me/drive/root:/{}:/children", self.base, encode_path(parent))
        }
    }

    /// Simple-upload content endpoint for a file path.
    pub fn content(&self, file: &RemotePath) -> String {
        format!("{}/me/drive/root:/{}:/content", self.base, encode_path(file))
    }

    pub fn create_link(&self, item_id: &str) -> String {
        format!(
            "{}/me/drive/items/{}/createLink",
            self.base,
            encode_segment(item_id)
        )
    }

    pub fn drive(&self) -> String {
        format!("{}/me/drive", self.base)
    }
}
