use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PasteError;

/// Who can open a published share link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkScope {
    Organization,
    Anonymous,
}

impl FromStr for LinkScope {
    type Err = PasteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "organization" => Ok(LinkScope::Organization),
            "anonymous" => Ok(LinkScope::Anonymous),
            _ => Err(PasteError::Config(format!("Invalid link scope: {}", s))),
        }
    }
}

impl Display for LinkScope {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            LinkScope::Organization => write!(f, "organization"),
            LinkScope::Anonymous => write!(f, "anonymous"),
        }
    }
}

/// What a share link lets its holder do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkAccess {
    View,
    Edit,
}

impl FromStr for LinkAccess {
    type Err = PasteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "view" => Ok(LinkAccess::View),
            "edit" => Ok(LinkAccess::Edit),
            _ => Err(PasteError::Config(format!("Invalid link access: {}", s))),
        }
    }
}

impl Display for LinkAccess {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            LinkAccess::View => write!(f, "view"),
            LinkAccess::Edit => write!(f, "edit"),
        }
    }
}

/// How each missing folder segment is brought into existence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FolderStrategy {
    /// `GET` the segment first, create only on 404.
    ProbeThenCreate,
    /// Create every segment unconditionally; 409 means it already exists.
    CreateIgnoringConflict,
}

impl FromStr for FolderStrategy {
    type Err = PasteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "probe" | "probe-then-create" => Ok(FolderStrategy::ProbeThenCreate),
            "create" | "create-ignoring-conflict" => Ok(FolderStrategy::CreateIgnoringConflict),
            _ => Err(PasteError::Config(format!("Invalid folder strategy: {}", s))),
        }
    }
}

impl Display for FolderStrategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            FolderStrategy::ProbeThenCreate => write!(f, "probe-then-create"),
            FolderStrategy::CreateIgnoringConflict => write!(f, "create-ignoring-conflict"),
        }
    }
}

/// When the pipeline ensures the target folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FolderCheck {
    /// Before every first upload attempt.
    Eager,
    /// Only after an upload is rejected with 404.
    OnMissing,
}

impl FromStr for FolderCheck {
    type Err = PasteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "eager" => Ok(FolderCheck::Eager),
            "on-missing" | "lazy" => Ok(FolderCheck::OnMissing),
            _ => Err(PasteError::Config(format!("Invalid folder check: {}", s))),
        }
    }
}

impl Display for FolderCheck {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            FolderCheck::Eager => write!(f, "eager"),
            FolderCheck::OnMissing => write!(f, "on-missing"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_options_wire_strings() {
        assert_eq!("Organization".parse::<LinkScope>().unwrap(), LinkScope::Organization);
        assert_eq!(" anonymous ".parse::<LinkScope>().unwrap(), LinkScope::Anonymous);
        assert!("public".parse::<LinkScope>().is_err());

        assert_eq!("EDIT".parse::<LinkAccess>().unwrap(), LinkAccess::Edit);
        assert_eq!(LinkAccess::View.to_string(), "view");
        assert_eq!(
            serde_json::to_string(&LinkScope::Organization).unwrap(),
            "\"organization\""
        );
    }

    #[test]
    fn test_folder_options_accept_short_names() {
        assert_eq!(
            "probe".parse::<FolderStrategy>().unwrap(),
            FolderStrategy::ProbeThenCreate
        );
        assert_eq!(
            "create".parse::<FolderStrategy>().unwrap(),
            FolderStrategy::CreateIgnoringConflict
        );
        assert_eq!("lazy".parse::<FolderCheck>().unwrap(), FolderCheck::OnMissing);
        assert!("sometimes".parse::<FolderCheck>().is_err());
    }
}
