//! Pasteup Core Library
//!
//! This crate provides the domain types, error taxonomy, configuration and file naming
//! shared by the storage backends, the paste pipeline and the CLI.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod naming;
pub mod storage_types;

// Re-export commonly used types
pub use config::PasteConfig;
pub use error::{ErrorKind, ErrorMetadata, LogLevel, PasteError, PasteResult};
pub use models::{
    FolderCheck, FolderState, FolderStrategy, LinkAccess, LinkScope, RemoteItem, RemotePath,
    UploadRequest,
};
pub use naming::{extension_for_mime, generate_file_name, is_image_type};
pub use storage_types::BackendKind;
