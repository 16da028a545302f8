//! Pasteup Storage Library
//!
//! Remote drive backends for pasted images. Backends speak HTTP only through the
//! [`HttpClient`] capability, so the transport and its credentials are injected.
//!
//! Two protocols are supported:
//!
//! - **Graph** (`GraphStore`): folders ensured segment by segment, bytes `PUT` to a
//!   path-addressed content endpoint, optional sharing link.
//! - **SharePoint** (`SharePointStore`): form digest then `Files/add`; the file URL is
//!   composed from the site, library and file name.

pub mod credentials;
pub(crate) mod encoding;
pub mod factory;
pub mod graph;
pub mod reqwest_client;
pub mod sharepoint;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;
pub mod traits;
pub mod transport;

// Re-export commonly used types
pub use credentials::{CredentialProvider, Credentials, StaticCredentials};
pub use factory::{create_http_client, create_store};
pub use graph::{FolderEnsurer, GraphEndpoints, GraphStore, GraphUploader, LinkPublisher};
pub use pasteup_core::BackendKind;
pub use reqwest_client::ReqwestHttpClient;
pub use sharepoint::SharePointStore;
pub use traits::{ConnectionInfo, FolderReport, RemoteStore};
pub use transport::{HttpClient, HttpRequest, HttpResponse};
