//! Host collaborators
//!
//! The pipeline holds no knowledge of the host UI. Hosts hand it clipboard items inside
//! a [`PasteEvent`], a text surface to insert into, and a [`Notifier`] for user-facing
//! messages.

pub mod clipboard;
pub mod notifier;
pub mod surface;

pub use clipboard::{ClipboardItem, MemoryClipboardItem, PasteEvent};
pub use notifier::{NotificationLevel, Notifier, TracingNotifier};
pub use surface::{EditableSurface, RichRegion, SurfaceEvent, ValueField};
