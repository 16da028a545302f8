use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use crate::error::PasteError;

/// Folder or file location relative to a drive root.
///
/// Segments are never empty and never contain a path separator. The root is the
/// path with no segments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RemotePath {
    segments: Vec<String>,
}

impl RemotePath {
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse a slash-separated path such as `/Pictures/Pasted/`.
    ///
    /// Leading, trailing and repeated separators are ignored.
    pub fn parse(raw: &str) -> Result<Self, PasteError> {
        let segments = raw
            .split('/')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();
        Self::from_segments(segments)
    }

    pub fn from_segments(segments: Vec<String>) -> Result<Self, PasteError> {
        for segment in &segments {
            validate_segment(segment)?;
        }
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.is_root()
    }

    /// Last segment, `None` for the root.
    pub fn name(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Containing folder, `None` for the root.
    pub fn parent(&self) -> Option<RemotePath> {
        if self.is_root() {
            return None;
        }
        Some(RemotePath {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    pub fn join(&self, segment: &str) -> Result<RemotePath, PasteError> {
        validate_segment(segment)?;
        let mut segments = self.segments.clone();
        segments.push(segment.to_string());
        Ok(RemotePath { segments })
    }

    /// Accumulated paths from the first segment down to the full path.
    ///
    /// `a/b/c` yields `a`, `a/b`, `a/b/c`.
    pub fn prefixes(&self) -> impl Iterator<Item = RemotePath> + '_ {
        (1..=self.segments.len()).map(move |n| RemotePath {
            segments: self.segments[..n].to_vec(),
        })
    }
}

fn validate_segment(segment: &str) -> Result<(), PasteError> {
    if segment.is_empty() {
        return Err(PasteError::InvalidPath("empty path segment".to_string()));
    }
    if segment.contains('/') || segment.contains('\\') {
        return Err(PasteError::InvalidPath(format!(
            "segment '{}' contains a path separator",
            segment
        )));
    }
    if segment == "." || segment == ".." {
        return Err(PasteError::InvalidPath(format!(
            "relative segment '{}' is not allowed",
            segment
        )));
    }
    Ok(())
}

impl FromStr for RemotePath {
    type Err = PasteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Display for RemotePath {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.segments.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_separators() {
        let path = RemotePath::parse("/Pictures//RallyImages/").unwrap();
        assert_eq!(path.segments(), &["Pictures", "RallyImages"]);
        assert_eq!(path.to_string(), "Pictures/RallyImages");
    }

    #[test]
    fn test_empty_input_is_root() {
        let path = RemotePath::parse("").unwrap();
        assert!(path.is_root());
        assert_eq!(path.to_string(), "");
        assert!(path.parent().is_none());
        assert!(path.name().is_none());
        assert_eq!(path.prefixes().count(), 0);

        assert!(RemotePath::parse("///").unwrap().is_root());
    }

    #[test]
    fn test_rejects_relative_and_backslash_segments() {
        assert!(matches!(
            RemotePath::parse("a/../b"),
            Err(PasteError::InvalidPath(_))
        ));
        assert!(RemotePath::parse("a/./b").is_err());
        assert!(RemotePath::parse("a\\b").is_err());
    }

    #[test]
    fn test_from_segments_validates() {
        assert!(RemotePath::from_segments(vec!["ok".into(), "".into()]).is_err());
        assert!(RemotePath::from_segments(vec!["a/b".into()]).is_err());
        assert!(RemotePath::from_segments(vec!["a".into(), "b".into()]).is_ok());
    }

    #[test]
    fn test_prefixes_left_to_right() {
        let path = RemotePath::parse("a/b/c").unwrap();
        let prefixes: Vec<String> = path.prefixes().map(|p| p.to_string()).collect();
        assert_eq!(prefixes, vec!["a", "a/b", "a/b/c"]);
    }

    #[test]
    fn test_parent_and_join() {
        let path = RemotePath::parse("a/b").unwrap();
        assert_eq!(path.parent().unwrap().to_string(), "a");
        assert_eq!(path.name(), Some("b"));

        let file = path.join("x.png").unwrap();
        assert_eq!(file.to_string(), "a/b/x.png");
        assert!(path.join("bad/name").is_err());
        assert!(path.join("").is_err());

        let root_child = RemotePath::root().join("top").unwrap();
        assert_eq!(root_child.parent(), Some(RemotePath::root()));
    }
}
