//! Defaults shared by configuration and the storage backends.

/// Microsoft Graph v1.0 root.
pub const DEFAULT_GRAPH_API: &str = "https://graph.microsoft.com/v1.0";

/// Folder (relative to the drive root) that pasted images land in.
pub const DEFAULT_FOLDER: &str = "Pictures/PastedImages";

pub const DEFAULT_FILE_PREFIX: &str = "paste_";

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Length of the random base-36 suffix in generated file names.
pub const FILE_SUFFIX_LEN: usize = 6;

/// Extension used when the clipboard MIME type is not in the table.
pub const FALLBACK_EXTENSION: &str = "png";

/// Graph instance annotation controlling name collisions on create.
pub const GRAPH_CONFLICT_BEHAVIOR: &str = "@microsoft.graph.conflictBehavior";

pub const SHAREPOINT_ODATA_VERBOSE: &str = "application/json;odata=verbose";
