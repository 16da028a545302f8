use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use crate::error::PasteError;

/// Remote store protocols.
///
/// Defined in core because configuration selects one and the storage factory
/// builds the matching backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// OneDrive / OneDrive for Business through Microsoft Graph
    Graph,
    /// SharePoint REST with a form digest
    SharePoint,
}

impl FromStr for BackendKind {
    type Err = PasteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "graph" | "onedrive" => Ok(BackendKind::Graph),
            "sharepoint" => Ok(BackendKind::SharePoint),
            _ => Err(PasteError::Config(format!("Invalid storage backend: {}", s))),
        }
    }
}

impl Display for BackendKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            BackendKind::Graph => write!(f, "graph"),
            BackendKind::SharePoint => write!(f, "sharepoint"),
        }
    }
}
