use std::sync::Arc;

use pasteup_core::{PasteError, PasteResult, RemoteItem, UploadRequest};
use serde::Deserialize;

use super::endpoints::GraphEndpoints;
use crate::transport::{HttpClient, HttpRequest, ACCEPT, APPLICATION_JSON};

/// Subset of a Graph `driveItem` returned by an upload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DriveItem {
    id: String,
    web_url: String,
}

/// Writes image bytes to a path-addressed content endpoint.
///
/// Every non-2xx status is an error; deciding whether a 404 warrants creating the
/// folder and trying again belongs to the caller.
#[derive(Clone)]
pub struct GraphUploader {
    http: Arc<dyn HttpClient>,
    endpoints: GraphEndpoints,
}

impl GraphUploader {
    pub fn new(http: Arc<dyn HttpClient>, endpoints: GraphEndpoints) -> Self {
        Self { http, endpoints }
    }

    pub async fn upload(&self, request: &UploadRequest) -> PasteResult<RemoteItem> {
        let url = self.endpoints.content(&request.remote_path());
        let http_request = HttpRequest::put(&url)
            .header(ACCEPT, APPLICATION_JSON)
            .body(request.bytes().to_vec(), request.mime_type());

        tracing::debug!(
            url = %url,
            size = request.size(),
            content_type = %request.mime_type(),
            "Uploading to Graph"
        );

        let response = self.http.request(http_request).await?;

        match response.status {
            200 | 201 => {
                let item: DriveItem = response.json()?;
                tracing::info!(
                    item_id = %item.id,
                    file_name = %request.file_name(),
                    "Upload completed"
                );
                Ok(RemoteItem::new(item.id, item.web_url))
            }
            status => {
                tracing::warn!(status = status, url = %url, "Upload rejected");
                Err(PasteError::upload_status(status, &response.text()))
            }
        }
    }
}
