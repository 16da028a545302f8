//! Pasteup CLI: push an image through the paste pipeline from the command line.
//!
//! Configuration comes from `PASTEUP_*` environment variables (a `.env` file is loaded).

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use pasteup_cli::{init_tracing, mime_for_path, print_json, read_image, UploadOutput};
use pasteup_core::{generate_file_name, PasteConfig, RemotePath};
use pasteup_pipeline::{
    MemoryClipboardItem, PasteEvent, PasteOutcome, PastePipeline, TracingNotifier, ValueField,
};
use pasteup_storage::{create_http_client, create_store};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "pasteup", about = "Upload pasted images to OneDrive or SharePoint")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Commands {
    /// Upload an image file as if it had been pasted and print the resulting URL
    Upload {
        /// Path to the image
        file: PathBuf,
        /// MIME type (guessed from the extension when omitted)
        #[arg(long)]
        mime: Option<String>,
    },
    /// Check that the configured drive accepts the current credentials
    Check,
    /// Make sure the target folder exists
    EnsureFolder {
        /// Folder to ensure instead of PASTEUP_FOLDER
        #[arg(long)]
        folder: Option<String>,
    },
    /// Print a generated file name
    Name {
        #[arg(long, default_value = "image/png")]
        mime: String,
    },
}

#[derive(Serialize)]
struct SegmentOutput {
    path: String,
    state: pasteup_core::FolderState,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = Arc::new(PasteConfig::from_env().context("Invalid PASTEUP_* configuration")?);

    match cli.command {
        Commands::Upload { file, mime } => {
            let mime = match mime.as_deref().or_else(|| mime_for_path(&file)) {
                Some(mime) => mime.to_string(),
                None => anyhow::bail!(
                    "Cannot tell the image type of {}; pass --mime",
                    file.display()
                ),
            };
            let bytes = read_image(&file).await?;

            let http = create_http_client(&config)?;
            let store = create_store(&config, http);
            let pipeline = PastePipeline::new(config.clone(), store, Arc::new(TracingNotifier));

            let mut event = PasteEvent::single(MemoryClipboardItem::new(mime.clone(), bytes));
            let field = Arc::new(ValueField::new("cli", ""));

            match pipeline.handle_paste(&mut event, field).await {
                PasteOutcome::Ignored => anyhow::bail!("{} is not an image type", mime),
                PasteOutcome::Finished(report) => {
                    print_json(&UploadOutput::from(&report))?;
                    if let Some(err) = report.error {
                        return Err(anyhow::Error::from(err).context("Upload failed"));
                    }
                }
            }
        }
        Commands::Check => {
            let http = create_http_client(&config)?;
            let store = create_store(&config, http);
            let info = store.check_connection().await?;
            print_json(&info)?;
        }
        Commands::EnsureFolder { folder } => {
            let path = match folder {
                Some(raw) => RemotePath::parse(&raw)?,
                None => config.folder.clone(),
            };
            let http = create_http_client(&config)?;
            let store = create_store(&config, http);
            if !store.creates_folders() {
                anyhow::bail!("The {} backend does not create folders", store.backend_type());
            }

            let report = store.ensure_folder(&path).await?;
            let segments: Vec<SegmentOutput> = report
                .into_iter()
                .map(|(path, state)| SegmentOutput { path, state })
                .collect();
            print_json(&segments)?;
        }
        Commands::Name { mime } => {
            println!("{}", generate_file_name(&config.file_prefix, &mime));
        }
    }

    Ok(())
}
