//! Configuration module
//!
//! Static settings for a paste session: which remote store to talk to, where images
//! land, how they are named and whether a share link is published. Settings are read
//! once at startup and passed explicitly into the pipeline; nothing reloads them.

use std::env;

use crate::constants::{
    DEFAULT_FILE_PREFIX, DEFAULT_FOLDER, DEFAULT_GRAPH_API, DEFAULT_REQUEST_TIMEOUT_SECS,
};
use crate::models::{FolderCheck, FolderStrategy, LinkAccess, LinkScope, RemotePath};
use crate::storage_types::BackendKind;

/// Paste session configuration
#[derive(Clone, Debug)]
pub struct PasteConfig {
    pub backend: BackendKind,
    /// Graph API root, or the SharePoint site URL for the SharePoint backend
    pub base_url: String,
    /// Target folder (Graph: relative to the drive root; SharePoint: library path)
    pub folder: RemotePath,
    pub file_prefix: String,
    pub show_notifications: bool,
    pub create_share_link: bool,
    pub link_scope: LinkScope,
    pub link_access: LinkAccess,
    pub folder_strategy: FolderStrategy,
    pub folder_check: FolderCheck,
    pub request_timeout_secs: u64,
    /// Bearer token sent as `Authorization`; unset means ambient session credentials
    pub access_token: Option<String>,
    /// Raw `Cookie` header for session-cookie authentication
    pub session_cookie: Option<String>,
}

impl Default for PasteConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::Graph,
            base_url: DEFAULT_GRAPH_API.to_string(),
            folder: RemotePath::parse(DEFAULT_FOLDER).unwrap_or_default(),
            file_prefix: DEFAULT_FILE_PREFIX.to_string(),
            show_notifications: true,
            create_share_link: true,
            link_scope: LinkScope::Organization,
            link_access: LinkAccess::View,
            folder_strategy: FolderStrategy::ProbeThenCreate,
            folder_check: FolderCheck::Eager,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            access_token: None,
            session_cookie: None,
        }
    }
}

impl PasteConfig {
    /// Graph (OneDrive) configuration targeting `folder`.
    pub fn graph(base_url: impl Into<String>, folder: RemotePath) -> Self {
        Self {
            base_url: base_url.into(),
            folder,
            ..Self::default()
        }
    }

    /// SharePoint configuration uploading into `library` on `site_url`.
    ///
    /// Share links are not available through the form-digest protocol.
    pub fn sharepoint(site_url: impl Into<String>, library: RemotePath) -> Self {
        Self {
            backend: BackendKind::SharePoint,
            base_url: site_url.into(),
            folder: library,
            create_share_link: false,
            ..Self::default()
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.file_prefix = prefix.into();
        self
    }

    pub fn with_notifications(mut self, enabled: bool) -> Self {
        self.show_notifications = enabled;
        self
    }

    pub fn with_share_link(mut self, enabled: bool, scope: LinkScope, access: LinkAccess) -> Self {
        self.create_share_link = enabled;
        self.link_scope = scope;
        self.link_access = access;
        self
    }

    pub fn with_folder_strategy(mut self, strategy: FolderStrategy) -> Self {
        self.folder_strategy = strategy;
        self
    }

    pub fn with_folder_check(mut self, check: FolderCheck) -> Self {
        self.folder_check = check;
        self
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from a key lookup (environment variables in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|s| !s.trim().is_empty());
        let flag = |key: &str, default: bool| -> Result<bool, anyhow::Error> {
            match get(key) {
                None => Ok(default),
                Some(raw) => parse_bool(&raw)
                    .ok_or_else(|| anyhow::anyhow!("{} must be true or false, got '{}'", key, raw)),
            }
        };

        let backend: BackendKind = get("PASTEUP_BACKEND")
            .map(|s| s.parse())
            .transpose()?
            .unwrap_or(BackendKind::Graph);

        let base_url = match (backend, get("PASTEUP_BASE_URL")) {
            (_, Some(url)) => url,
            (BackendKind::Graph, None) => DEFAULT_GRAPH_API.to_string(),
            (BackendKind::SharePoint, None) => {
                return Err(anyhow::anyhow!(
                    "PASTEUP_BASE_URL must be set to the site URL for the SharePoint backend"
                ))
            }
        };

        let folder = RemotePath::parse(
            &get("PASTEUP_FOLDER").unwrap_or_else(|| DEFAULT_FOLDER.to_string()),
        )?;

        let create_share_link = flag("PASTEUP_CREATE_SHARE_LINK", backend == BackendKind::Graph)?;

        let config = PasteConfig {
            backend,
            base_url,
            folder,
            file_prefix: lookup("PASTEUP_FILE_PREFIX")
                .unwrap_or_else(|| DEFAULT_FILE_PREFIX.to_string()),
            show_notifications: flag("PASTEUP_SHOW_NOTIFICATIONS", true)?,
            create_share_link,
            link_scope: get("PASTEUP_LINK_SCOPE")
                .map(|s| s.parse())
                .transpose()?
                .unwrap_or(LinkScope::Organization),
            link_access: get("PASTEUP_LINK_ACCESS")
                .map(|s| s.parse())
                .transpose()?
                .unwrap_or(LinkAccess::View),
            folder_strategy: get("PASTEUP_FOLDER_STRATEGY")
                .map(|s| s.parse())
                .transpose()?
                .unwrap_or(FolderStrategy::ProbeThenCreate),
            folder_check: get("PASTEUP_FOLDER_CHECK")
                .map(|s| s.parse())
                .transpose()?
                .unwrap_or(FolderCheck::Eager),
            request_timeout_secs: match get("PASTEUP_REQUEST_TIMEOUT_SECS") {
                Some(raw) => raw.trim().parse().map_err(|_| {
                    anyhow::anyhow!("PASTEUP_REQUEST_TIMEOUT_SECS must be a valid number")
                })?,
                None => DEFAULT_REQUEST_TIMEOUT_SECS,
            },
            access_token: get("PASTEUP_ACCESS_TOKEN"),
            session_cookie: get("PASTEUP_COOKIE"),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        let base = self.base_url();
        if !(base.starts_with("https://") || base.starts_with("http://")) {
            return Err(anyhow::anyhow!(
                "PASTEUP_BASE_URL must be an http(s) URL, got '{}'",
                self.base_url
            ));
        }

        if self.file_prefix.contains('/') || self.file_prefix.contains('\\') {
            return Err(anyhow::anyhow!(
                "PASTEUP_FILE_PREFIX must not contain path separators"
            ));
        }

        if self.request_timeout_secs == 0 {
            return Err(anyhow::anyhow!(
                "PASTEUP_REQUEST_TIMEOUT_SECS must be greater than zero"
            ));
        }

        if self.backend == BackendKind::SharePoint {
            if self.create_share_link {
                return Err(anyhow::anyhow!(
                    "Share links are not supported by the SharePoint backend; set PASTEUP_CREATE_SHARE_LINK=false"
                ));
            }
            if self.folder.is_root() {
                return Err(anyhow::anyhow!(
                    "PASTEUP_FOLDER must name a document library for the SharePoint backend"
                ));
            }
        }

        Ok(())
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
