#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use pasteup_core::{FolderCheck, PasteConfig};
use pasteup_pipeline::{MemoryClipboardItem, NotificationLevel, Notifier, PasteEvent, PastePipeline};
use pasteup_storage::test_helpers::{test_graph_config, ScriptedHttpClient};
use pasteup_storage::{GraphStore, RemoteStore, SharePointStore};

pub const PROBE_PICTURES: &str = "https://graph.test/v1.0/me/drive/root:/Pictures";
pub const ROOT_CHILDREN: &str = "https://graph.test/v1.0/me/drive/root/children";
pub const UPLOAD_PREFIX: &str = "https://graph.test/v1.0/me/drive/root:/Pictures/";
pub const CREATE_LINK: &str = "https://graph.test/v1.0/me/drive/items/abc/createLink";

pub const SHAREPOINT_SITE: &str = "https://sp.test/sites/team";
pub const SHAREPOINT_DIGEST: &str = "https://sp.test/sites/team/_api/contextinfo";
pub const SHAREPOINT_ADD_PREFIX: &str =
    "https://sp.test/sites/team/_api/web/GetFolderByServerRelativeUrl('Docs')/Files/add(";

/// Collects notifications instead of showing them.
#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<(NotificationLevel, String)>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<(NotificationLevel, String)> {
        self.messages.lock().unwrap().clone()
    }

    pub fn levels(&self) -> Vec<NotificationLevel> {
        self.messages().into_iter().map(|(level, _)| level).collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, level: NotificationLevel, message: &str) {
        self.messages
            .lock()
            .unwrap()
            .push((level, message.to_string()));
    }
}

pub struct Harness {
    pub http: Arc<ScriptedHttpClient>,
    pub notifier: Arc<RecordingNotifier>,
    pub pipeline: PastePipeline,
}

/// Graph pipeline targeting `Pictures`, share links off, eager folder check.
pub fn graph_config() -> PasteConfig {
    test_graph_config("Pictures")
}

pub fn graph_harness(config: PasteConfig) -> Harness {
    let http = Arc::new(ScriptedHttpClient::new());
    let store: Arc<dyn RemoteStore> = Arc::new(GraphStore::new(
        http.clone(),
        config.base_url(),
        config.folder_strategy,
    ));
    harness(config, http, store)
}

pub fn sharepoint_harness() -> Harness {
    let mut config = PasteConfig::sharepoint(
        SHAREPOINT_SITE,
        pasteup_core::RemotePath::parse("Docs").unwrap(),
    );
    config.folder_check = FolderCheck::OnMissing;
    let http = Arc::new(ScriptedHttpClient::new());
    let store: Arc<dyn RemoteStore> = Arc::new(SharePointStore::new(http.clone(), SHAREPOINT_SITE));
    harness(config, http, store)
}

fn harness(
    config: PasteConfig,
    http: Arc<ScriptedHttpClient>,
    store: Arc<dyn RemoteStore>,
) -> Harness {
    let notifier = Arc::new(RecordingNotifier::default());
    let pipeline = PastePipeline::new(Arc::new(config), store, notifier.clone());
    Harness {
        http,
        notifier,
        pipeline,
    }
}

pub fn drive_item(id: &str, url: &str) -> String {
    pasteup_storage::test_helpers::drive_item_body(id, url)
}

/// Paste carrying one 10-byte PNG.
pub fn png_paste() -> PasteEvent {
    PasteEvent::single(MemoryClipboardItem::new("image/png", vec![0x89; 10]))
}
