//! Domain models shared by the storage backends and the paste pipeline.

pub mod options;
pub mod path;
pub mod upload;

pub use options::{FolderCheck, FolderStrategy, LinkAccess, LinkScope};
pub use path::RemotePath;
pub use upload::{FolderState, RemoteItem, UploadRequest};
