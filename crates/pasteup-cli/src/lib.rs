use std::path::Path;

use anyhow::Context;
use pasteup_pipeline::PipelineReport;
use serde::Serialize;

/// Initialize tracing for the CLI.
///
/// `RUST_LOG` overrides the default `pasteup=info` filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("pasteup=info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

pub fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize output")?;
    println!("{}", out);
    Ok(())
}

/// Clipboard-style MIME type for an image file, from its extension.
pub fn mime_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "bmp" => Some("image/bmp"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

/// Read an image file for upload.
pub async fn read_image(path: &Path) -> anyhow::Result<Vec<u8>> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    if bytes.is_empty() {
        anyhow::bail!("{} is empty", path.display());
    }
    Ok(bytes)
}

/// JSON printed by `pasteup upload`.
#[derive(Debug, Serialize)]
pub struct UploadOutput {
    pub url: Option<String>,
    pub file_name: Option<String>,
    pub states: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&PipelineReport> for UploadOutput {
    fn from(report: &PipelineReport) -> Self {
        Self {
            url: report.url.clone(),
            file_name: report.file_name.clone(),
            states: report.transitions.iter().map(|s| s.to_string()).collect(),
            error: report.error.as_ref().map(|e| e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn mime_for_known_extensions() {
        assert_eq!(mime_for_path(Path::new("a.PNG")), Some("image/png"));
        assert_eq!(mime_for_path(Path::new("dir/b.jpeg")), Some("image/jpeg"));
        assert_eq!(mime_for_path(Path::new("c.webp")), Some("image/webp"));
    }

    #[test]
    fn mime_for_unknown_extensions() {
        assert_eq!(mime_for_path(Path::new("notes.txt")), None);
        assert_eq!(mime_for_path(Path::new("no_extension")), None);
    }

    #[tokio::test]
    async fn read_image_rejects_empty_file() {
        let empty = tempfile::NamedTempFile::new().unwrap();
        assert!(read_image(empty.path()).await.is_err());

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[1, 2, 3]).unwrap();
        assert_eq!(read_image(file.path()).await.unwrap(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn read_image_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_image(&dir.path().join("gone.png")).await.unwrap_err();
        assert!(err.to_string().contains("gone.png"));
    }
}
