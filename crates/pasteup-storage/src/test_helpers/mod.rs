//! Test helpers for code built on the storage backends
//!
//! `ScriptedHttpClient` replays canned responses per (method, URL) and records every
//! request, so folder, upload and pipeline flows can be asserted call by call without
//! a network.

mod scripted_http;

pub use scripted_http::ScriptedHttpClient;

use pasteup_core::{PasteConfig, RemotePath};

pub const TEST_GRAPH_BASE: &str = "https://graph.test/v1.0";

/// Graph configuration pointing at [`TEST_GRAPH_BASE`] with share links disabled.
pub fn test_graph_config(folder: &str) -> PasteConfig {
    let folder = RemotePath::parse(folder).unwrap_or_default();
    let mut config = PasteConfig::graph(TEST_GRAPH_BASE, folder);
    config.create_share_link = false;
    config
}

/// JSON body Graph returns for a created drive item.
pub fn drive_item_body(id: &str, web_url: &str) -> String {
    serde_json::json!({ "id": id, "name": "item", "webUrl": web_url }).to_string()
}
