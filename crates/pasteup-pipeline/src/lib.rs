//! Pasteup Pipeline Library
//!
//! Turns a pasted clipboard image into a URL at the cursor: the image is uploaded to the
//! configured cloud drive (ensuring the target folder when needed), optionally shared,
//! and the resulting URL is inserted into the surface the paste happened in.

pub mod host;
pub mod listener;
pub mod pipeline;

// Re-export commonly used types
pub use host::{
    ClipboardItem, EditableSurface, MemoryClipboardItem, NotificationLevel, Notifier,
    PasteEvent, RichRegion, SurfaceEvent, TracingNotifier, ValueField,
};
pub use listener::{DiscoveredSurface, PasteListener};
pub use pipeline::{PasteOutcome, PastePipeline, PipelineReport, PipelineState};
