//! Microsoft Graph drive backend.
//!
//! Path-addressed uploads with no token step: folders are ensured segment by segment,
//! bytes are `PUT` to the content endpoint and a sharing link can be requested for the
//! created item.

pub mod endpoints;
pub mod folder;
pub mod link;
pub mod store;
pub mod upload;

pub use endpoints::GraphEndpoints;
pub use folder::FolderEnsurer;
pub use link::LinkPublisher;
pub use store::GraphStore;
pub use upload::GraphUploader;
