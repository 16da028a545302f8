//! SharePoint REST backend
//!
//! Every upload first obtains a form digest from `_api/contextinfo`, then posts the bytes
//! to the library's `Files/add` endpoint with the digest in `X-RequestDigest`. The file
//! URL is composed from the site, library and file name; there is no folder creation and
//! no link step.

use std::sync::Arc;

use async_trait::async_trait;
use pasteup_core::constants::SHAREPOINT_ODATA_VERBOSE;
use pasteup_core::{
    BackendKind, LinkAccess, LinkScope, PasteError, PasteResult, RemoteItem, RemotePath,
    UploadRequest,
};
use serde_json::Value;

use crate::encoding::{encode_path, encode_segment};
use crate::traits::{ConnectionInfo, FolderReport, RemoteStore};
use crate::transport::{HttpClient, HttpRequest, ACCEPT};

const OCTET_STREAM: &str = "application/octet-stream";

#[derive(Clone)]
pub struct SharePointStore {
    http: Arc<dyn HttpClient>,
    site_url: String,
}

impl SharePointStore {
    pub fn new(http: Arc<dyn HttpClient>, site_url: &str) -> Self {
        Self {
            http,
            site_url: site_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn site_url(&self) -> &str {
        &self.site_url
    }

    /// Short-lived request-validation token required by state-changing calls.
    pub async fn form_digest(&self) -> PasteResult<String> {
        let request = HttpRequest::post(format!("{}/_api/contextinfo", self.site_url))
            .header(ACCEPT, SHAREPOINT_ODATA_VERBOSE)
            .body(Vec::new(), SHAREPOINT_ODATA_VERBOSE);
        let response = self.http.request(request).await?;

        if response.status != 200 {
            tracing::warn!(status = response.status, "Failed to get form digest");
            return Err(PasteError::upload_status(response.status, &response.text()));
        }

        let body: Value = response.json()?;
        body.pointer("/d/GetContextWebInformation/FormDigestValue")
            .and_then(Value::as_str)
            .map(String::from)
            .ok_or_else(|| PasteError::Upload {
                status: None,
                message: "form digest missing from contextinfo response".to_string(),
            })
    }

    fn add_file_url(&self, library: &RemotePath, file_name: &str) -> String {
        format!(
            "{}/_api/web/GetFolderByServerRelativeUrl('{}')/Files/add(url='{}',overwrite=true)",
            self.site_url,
            encode_odata_path(library),
            encode_segment(&odata_literal(file_name)),
        )
    }

    /// Public URL of an uploaded file.
    pub fn file_url(&self, library: &RemotePath, file_name: &str) -> String {
        format!(
            "{}/{}/{}",
            self.site_url,
            encode_path(library),
            encode_segment(file_name)
        )
    }
}

/// Quote an OData string literal body.
fn odata_literal(value: &str) -> String {
    value.replace('\'', "''")
}

fn encode_odata_path(path: &RemotePath) -> String {
    path.segments()
        .iter()
        .map(|segment| encode_segment(&odata_literal(segment)))
        .collect::<Vec<_>>()
        .join("/")
}

#[async_trait]
impl RemoteStore for SharePointStore {
    async fn ensure_folder(&self, _path: &RemotePath) -> PasteResult<FolderReport> {
        Ok(FolderReport::new())
    }

    async fn upload(&self, request: &UploadRequest) -> PasteResult<RemoteItem> {
        let digest = self.form_digest().await?;

        let url = self.add_file_url(request.path(), request.file_name());
        let http_request = HttpRequest::post(&url)
            .header(ACCEPT, SHAREPOINT_ODATA_VERBOSE)
            .header("X-RequestDigest", digest)
            .body(request.bytes().to_vec(), OCTET_STREAM);

        tracing::debug!(url = %url, size = request.size(), "Uploading to SharePoint");
        let response = self.http.request(http_request).await?;

        match response.status {
            200 | 201 => {
                let body: Value = response.json()?;
                let direct_url = self.file_url(request.path(), request.file_name());
                let id = body
                    .pointer("/d/UniqueId")
                    .or_else(|| body.pointer("/d/ServerRelativeUrl"))
                    .and_then(Value::as_str)
                    .map(String::from)
                    .unwrap_or_else(|| direct_url.clone());

                tracing::info!(item_id = %id, file_name = %request.file_name(), "Upload completed");
                Ok(RemoteItem::new(id, direct_url))
            }
            status => {
                tracing::warn!(status = status, url = %url, "Upload rejected");
                Err(PasteError::upload_status(status, &response.text()))
            }
        }
    }

    async fn publish_link(
        &self,
        _item_id: &str,
        _scope: LinkScope,
        _access: LinkAccess,
    ) -> PasteResult<String> {
        Err(PasteError::Link(
            "share links are not supported by the SharePoint backend".to_string(),
        ))
    }

    async fn check_connection(&self) -> PasteResult<ConnectionInfo> {
        let request = HttpRequest::get(format!("{}/_api/web", self.site_url))
            .header(ACCEPT, SHAREPOINT_ODATA_VERBOSE);
        let response = self.http.request(request).await?;

        if PasteError::is_auth_status(response.status) {
            return Err(PasteError::Auth {
                status: response.status,
                message: "site request rejected".to_string(),
            });
        }
        if !response.is_success() {
            return Err(PasteError::Network(format!(
                "site request returned status {}",
                response.status
            )));
        }

        let body: Value = response.json()?;
        let title = body
            .pointer("/d/Title")
            .and_then(Value::as_str)
            .unwrap_or("Unknown")
            .to_string();

        tracing::info!(site = %title, "SharePoint connection verified");
        Ok(ConnectionInfo {
            backend: BackendKind::SharePoint,
            display_name: title,
            drive_type: None,
        })
    }

    fn backend_type(&self) -> BackendKind {
        BackendKind::SharePoint
    }

    fn creates_folders(&self) -> bool {
        false
    }

    fn supports_links(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::StaticCredentials;
    use crate::reqwest_client::ReqwestHttpClient;
    use mockito::Matcher;
    use pasteup_core::{ErrorKind, ErrorMetadata};
    use std::time::Duration;

    const DIGEST_BODY: &str =
        r#"{"d":{"GetContextWebInformation":{"FormDigestValue":"0x1234,01 Jan 2025"}}}"#;

    fn store(server: &mockito::ServerGuard) -> SharePointStore {
        let http = ReqwestHttpClient::new(
            Duration::from_secs(5),
            Arc::new(StaticCredentials::ambient()),
        )
        .unwrap();
        SharePointStore::new(Arc::new(http), &format!("{}/sites/team/", server.url()))
    }

    fn request(library: &str, file_name: &str) -> UploadRequest {
        UploadRequest::new(
            RemotePath::parse(library).unwrap(),
            file_name,
            vec![7u8; 10],
            "image/png",
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_upload_uses_fresh_digest() {
        let mut server = mockito::Server::new_async().await;
        let digest = server
            .mock("POST", "/sites/team/_api/contextinfo")
            .match_header("accept", SHAREPOINT_ODATA_VERBOSE)
            .with_status(200)
            .with_body(DIGEST_BODY)
            .create_async()
            .await;
        let add_path = concat!(
            r"^/sites/team/_api/web/GetFolderByServerRelativeUrl\('Shared%20Documents/RallyImages'\)",
            r"/Files/add\(url='rally_1_abc123\.png',overwrite=true\)$"
        );
        let add = server
            .mock("POST", Matcher::Regex(add_path.to_string()))
            .match_header("x-requestdigest", "0x1234,01 Jan 2025")
            .match_header("content-type", OCTET_STREAM)
            .with_status(200)
            .with_body(r#"{"d":{"UniqueId":"guid-1","Name":"rally_1_abc123.png"}}"#)
            .create_async()
            .await;

        let store = store(&server);
        let item = store
            .upload(&request("Shared Documents/RallyImages", "rally_1_abc123.png"))
            .await
            .unwrap();

        digest.assert_async().await;
        add.assert_async().await;
        assert_eq!(item.id, "guid-1");
        assert_eq!(
            item.direct_url,
            format!(
                "{}/sites/team/Shared%20Documents/RallyImages/rally_1_abc123.png",
                server.url()
            )
        );
        assert!(item.share_url.is_none());
    }

    #[tokio::test]
    async fn test_digest_unauthorized_is_auth() {
        let mut server = mockito::Server::new_async().await;
        let _digest = server
            .mock("POST", "/sites/team/_api/contextinfo")
            .with_status(403)
            .create_async()
            .await;

        let err = store(&server)
            .upload(&request("Docs", "a.png"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Auth);
    }

    #[tokio::test]
    async fn test_upload_failure_is_upload_error() {
        let mut server = mockito::Server::new_async().await;
        let _digest = server
            .mock("POST", "/sites/team/_api/contextinfo")
            .with_status(200)
            .with_body(DIGEST_BODY)
            .create_async()
            .await;
        let _add = server
            .mock("POST", Matcher::Regex("/Files/add".to_string()))
            .with_status(500)
            .with_body("server error")
            .create_async()
            .await;

        let err = store(&server)
            .upload(&request("Docs", "a.png"))
            .await
            .unwrap_err();
        assert!(matches!(err, PasteError::Upload { status: Some(500), .. }));
    }

    #[tokio::test]
    async fn test_check_connection_reads_title() {
        let mut server = mockito::Server::new_async().await;
        let _web = server
            .mock("GET", "/sites/team/_api/web")
            .with_status(200)
            .with_body(r#"{"d":{"Title":"Team Site"}}"#)
            .create_async()
            .await;

        let info = store(&server).check_connection().await.unwrap();
        assert_eq!(info.backend, BackendKind::SharePoint);
        assert_eq!(info.display_name, "Team Site");
    }

    #[tokio::test]
    async fn test_capabilities_and_link_refusal() {
        let server = mockito::Server::new_async().await;
        let store = store(&server);
        assert!(!store.creates_folders());
        assert!(!store.supports_links());
        assert!(store
            .ensure_folder(&RemotePath::parse("a/b").unwrap())
            .await
            .unwrap()
            .is_empty());
        assert!(matches!(
            store
                .publish_link("x", LinkScope::Organization, LinkAccess::View)
                .await,
            Err(PasteError::Link(_))
        ));
    }

    #[test]
    fn test_single_quotes_doubled() {
        assert_eq!(odata_literal("it's.png"), "it''s.png");
        let library = RemotePath::parse("O'Brien Docs").unwrap();
        assert_eq!(encode_odata_path(&library), "O%27%27Brien%20Docs");
    }
}
