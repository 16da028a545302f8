use std::sync::Arc;

use pasteup_core::constants::GRAPH_CONFLICT_BEHAVIOR;
use pasteup_core::{FolderState, FolderStrategy, PasteError, PasteResult, RemotePath};
use serde_json::json;

use super::endpoints::GraphEndpoints;
use crate::traits::FolderReport;
use crate::transport::{HttpClient, HttpRequest, ACCEPT, APPLICATION_JSON};

/// Makes every segment of a drive path exist as a folder, top-down.
///
/// Nothing is cached between calls; each ensure re-probes. A failing segment aborts the
/// walk and already-created ancestors are left in place.
#[derive(Clone)]
pub struct FolderEnsurer {
    http: Arc<dyn HttpClient>,
    endpoints: GraphEndpoints,
    strategy: FolderStrategy,
}

impl FolderEnsurer {
    pub fn new(
        http: Arc<dyn HttpClient>,
        endpoints: GraphEndpoints,
        strategy: FolderStrategy,
    ) -> Self {
        Self {
            http,
            endpoints,
            strategy,
        }
    }

    pub fn strategy(&self) -> FolderStrategy {
        self.strategy
    }

    pub async fn ensure(&self, path: &RemotePath) -> PasteResult<FolderReport> {
        let mut report = FolderReport::new();

        for prefix in path.prefixes() {
            let label = prefix.to_string();

            if self.strategy == FolderStrategy::ProbeThenCreate {
                if self.probe(&prefix, &label).await? {
                    tracing::debug!(segment = %label, "Folder segment present");
                    report.push((label, FolderState::Present));
                    continue;
                }
                report.push((label.clone(), FolderState::Absent));
            }

            report.push((label.clone(), FolderState::Creating));
            self.create(&prefix, &label).await?;
            report.push((label, FolderState::Present));
        }

        Ok(report)
    }

    /// `true` when the segment exists, `false` on 404.
    async fn probe(&self, prefix: &RemotePath, label: &str) -> PasteResult<bool> {
        let request =
            HttpRequest::get(self.endpoints.item(prefix)).header(ACCEPT, APPLICATION_JSON);
        let response = self.http.request(request).await?;

        match response.status {
            404 => Ok(false),
            _ if response.is_success() => Ok(true),
            status => Err(PasteError::folder_status(label, status, &response.text())),
        }
    }

    async fn create(&self, prefix: &RemotePath, label: &str) -> PasteResult<()> {
        let (parent, name) = match (prefix.parent(), prefix.name()) {
            (Some(parent), Some(name)) => (parent, name),
            _ => return Ok(()),
        };

        let body = json!({
            "name": name,
            "folder": {},
            GRAPH_CONFLICT_BEHAVIOR: "fail",
        });
        let request = HttpRequest::post(self.endpoints.children(&parent))
            .header(ACCEPT, APPLICATION_JSON)
            .json(&body)?;
        let response = self.http.request(request).await?;

        match response.status {
            200 | 201 => {
                tracing::info!(segment = %label, "Created folder");
                Ok(())
            }
            409 => {
                tracing::debug!(
                    segment = %label,
                    "Folder created concurrently, treating as present"
                );
                Ok(())
            }
            status => {
                tracing::warn!(segment = %label, status = status, "Folder creation failed");
                Err(PasteError::folder_status(label, status, &response.text()))
            }
        }
    }
}
