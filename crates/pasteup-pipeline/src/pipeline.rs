//! Paste pipeline: read → folder check → upload → link → insert.
//!
//! One [`PastePipeline::run`] per pasted image. Runs share nothing mutable except the
//! remote store itself, so several can be in flight at once.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::sync::Arc;
use std::time::Instant;

use pasteup_core::{
    generate_file_name, BackendKind, ErrorKind, ErrorMetadata, FolderCheck, LogLevel, PasteConfig,
    PasteError, PasteResult, RemoteItem, UploadRequest,
};
use pasteup_storage::RemoteStore;
use tokio::task::JoinHandle;

use crate::host::{ClipboardItem, EditableSurface, NotificationLevel, Notifier, PasteEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Reading,
    FolderCheck,
    Uploading,
    Linking,
    Inserting,
    Done,
    Failed(ErrorKind),
}

impl PipelineState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineState::Done | PipelineState::Failed(_))
    }
}

impl Display for PipelineState {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            PipelineState::Idle => write!(f, "Idle"),
            PipelineState::Reading => write!(f, "Reading"),
            PipelineState::FolderCheck => write!(f, "FolderCheck"),
            PipelineState::Uploading => write!(f, "Uploading"),
            PipelineState::Linking => write!(f, "Linking"),
            PipelineState::Inserting => write!(f, "Inserting"),
            PipelineState::Done => write!(f, "Done"),
            PipelineState::Failed(kind) => write!(f, "Failed({})", kind),
        }
    }
}

/// What happened during one run.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    /// Every state entered, starting with `Idle`
    pub transitions: Vec<PipelineState>,
    pub file_name: Option<String>,
    /// URL handed to the surface, set once the run is `Done`
    pub url: Option<String>,
    pub error: Option<PasteError>,
}

impl PipelineReport {
    fn new() -> Self {
        Self {
            transitions: vec![PipelineState::Idle],
            file_name: None,
            url: None,
            error: None,
        }
    }

    fn enter(&mut self, state: PipelineState) {
        tracing::debug!(state = %state, "Pipeline transition");
        self.transitions.push(state);
    }

    pub fn state(&self) -> PipelineState {
        self.transitions
            .last()
            .copied()
            .unwrap_or(PipelineState::Idle)
    }

    pub fn is_success(&self) -> bool {
        self.state() == PipelineState::Done
    }

    /// How many times `state` was entered.
    pub fn count(&self, state: PipelineState) -> usize {
        self.transitions.iter().filter(|s| **s == state).count()
    }
}

#[derive(Debug)]
pub enum PasteOutcome {
    /// No image in the paste; the host's default handling was left alone.
    Ignored,
    Finished(PipelineReport),
}

#[derive(Clone)]
pub struct PastePipeline {
    config: Arc<PasteConfig>,
    store: Arc<dyn RemoteStore>,
    notifier: Arc<dyn Notifier>,
}

impl PastePipeline {
    pub fn new(
        config: Arc<PasteConfig>,
        store: Arc<dyn RemoteStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            config,
            store,
            notifier,
        }
    }

    pub fn config(&self) -> &PasteConfig {
        &self.config
    }

    /// Pick the first image item and suppress the host's default paste for it.
    ///
    /// Events without an image are left untouched.
    pub fn select_image(event: &mut PasteEvent) -> Option<Arc<dyn ClipboardItem>> {
        let item = event.first_image()?;
        event.prevent_default();
        Some(item)
    }

    pub async fn handle_paste(
        &self,
        event: &mut PasteEvent,
        surface: Arc<dyn EditableSurface>,
    ) -> PasteOutcome {
        match Self::select_image(event) {
            Some(item) => PasteOutcome::Finished(self.run(item, surface).await),
            None => PasteOutcome::Ignored,
        }
    }

    /// Select synchronously, then run on its own task.
    pub fn spawn_paste(
        &self,
        event: &mut PasteEvent,
        surface: Arc<dyn EditableSurface>,
    ) -> Option<JoinHandle<PipelineReport>> {
        let item = Self::select_image(event)?;
        let pipeline = self.clone();
        Some(tokio::spawn(async move { pipeline.run(item, surface).await }))
    }

    /// Drive one image from the clipboard to an inserted URL.
    ///
    /// Never fails: the outcome, including a `Failed` state, is in the report.
    pub async fn run(
        &self,
        item: Arc<dyn ClipboardItem>,
        surface: Arc<dyn EditableSurface>,
    ) -> PipelineReport {
        let start = Instant::now();
        let mut report = PipelineReport::new();
        let mime_type = item.mime_type().to_string();
        let file_name = generate_file_name(&self.config.file_prefix, &mime_type);
        report.file_name = Some(file_name.clone());

        self.notify(NotificationLevel::Info, &self.uploading_message());

        match self
            .execute(&mut report, item.as_ref(), surface.as_ref(), file_name, mime_type)
            .await
        {
            Ok(url) => {
                tracing::info!(
                    surface = %surface.id(),
                    url = %url,
                    duration_ms = start.elapsed().as_millis() as u64,
                    "Pasted image uploaded and inserted"
                );
                report.url = Some(url);
                report.enter(PipelineState::Done);
                self.notify(NotificationLevel::Success, "Image uploaded successfully!");
            }
            Err(err) => {
                let kind = err.kind();
                match err.log_level() {
                    LogLevel::Debug => {
                        tracing::debug!(error = %err, kind = %kind, "Paste failed")
                    }
                    LogLevel::Warn => tracing::warn!(error = %err, kind = %kind, "Paste failed"),
                    LogLevel::Error => {
                        tracing::error!(error = %err, kind = %kind, "Paste failed")
                    }
                }
                self.notify(
                    NotificationLevel::Error,
                    &format!("{}: {}", kind, err.user_message()),
                );
                report.enter(PipelineState::Failed(kind));
                report.error = Some(err);
            }
        }

        report
    }

    async fn execute(
        &self,
        report: &mut PipelineReport,
        item: &dyn ClipboardItem,
        surface: &dyn EditableSurface,
        file_name: String,
        mime_type: String,
    ) -> PasteResult<String> {
        report.enter(PipelineState::Reading);
        let bytes = item.read_bytes().await.map_err(|e| match e {
            PasteError::Read(_) => e,
            other => PasteError::Read(other.to_string()),
        })?;
        if bytes.is_empty() {
            return Err(PasteError::Read("clipboard image is empty".to_string()));
        }
        let request = UploadRequest::new(self.config.folder.clone(), file_name, bytes, mime_type)?;

        report.enter(PipelineState::FolderCheck);
        if self.config.folder_check == FolderCheck::Eager && self.store.creates_folders() {
            self.store.ensure_folder(request.path()).await?;
        }

        report.enter(PipelineState::Uploading);
        let uploaded = match self.store.upload(&request).await {
            Ok(uploaded) => uploaded,
            Err(err) if err.is_missing_folder() && self.store.creates_folders() => {
                tracing::info!(
                    folder = %request.path(),
                    "Target folder missing, ensuring it and retrying upload once"
                );
                report.enter(PipelineState::FolderCheck);
                self.store.ensure_folder(request.path()).await?;
                report.enter(PipelineState::Uploading);
                self.store.upload(&request).await?
            }
            Err(err) => return Err(err),
        };

        let resolved = self.link(report, uploaded).await;

        report.enter(PipelineState::Inserting);
        let url = resolved.resolved_url().to_string();
        surface.insert_at_cursor(&url)?;
        Ok(url)
    }

    /// Best effort: a failed link leaves the item with its direct URL.
    async fn link(&self, report: &mut PipelineReport, item: RemoteItem) -> RemoteItem {
        if !self.config.create_share_link || !self.store.supports_links() {
            return item;
        }

        report.enter(PipelineState::Linking);
        match self
            .store
            .publish_link(&item.id, self.config.link_scope, self.config.link_access)
            .await
        {
            Ok(share_url) => item.with_share_url(share_url),
            Err(err) => {
                tracing::warn!(
                    item_id = %item.id,
                    error = %err,
                    "Share link creation failed, using direct URL"
                );
                item
            }
        }
    }

    fn uploading_message(&self) -> String {
        match self.store.backend_type() {
            BackendKind::Graph => "Uploading image to OneDrive...".to_string(),
            BackendKind::SharePoint => "Uploading image to SharePoint...".to_string(),
        }
    }

    fn notify(&self, level: NotificationLevel, message: &str) {
        if self.config.show_notifications {
            self.notifier.notify(level, message);
        }
    }
}
