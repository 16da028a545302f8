use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use pasteup_core::{is_image_type, PasteError, PasteResult};

/// One entry of a clipboard paste.
#[async_trait]
pub trait ClipboardItem: Send + Sync {
    /// Declared MIME type, e.g. `image/png`
    fn mime_type(&self) -> &str;

    /// Materialize the item's bytes. Failures are `PasteError::Read`.
    async fn read_bytes(&self) -> PasteResult<Vec<u8>>;
}

/// Clipboard item held in memory.
#[derive(Clone, Debug)]
pub struct MemoryClipboardItem {
    mime_type: String,
    contents: Result<Vec<u8>, String>,
}

impl MemoryClipboardItem {
    pub fn new(mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            contents: Ok(bytes),
        }
    }

    pub fn text(text: &str) -> Self {
        Self::new("text/plain", text.as_bytes().to_vec())
    }

    /// An item whose bytes can never be read.
    pub fn unreadable(mime_type: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            contents: Err(reason.into()),
        }
    }
}

#[async_trait]
impl ClipboardItem for MemoryClipboardItem {
    fn mime_type(&self) -> &str {
        &self.mime_type
    }

    async fn read_bytes(&self) -> PasteResult<Vec<u8>> {
        self.contents.clone().map_err(PasteError::Read)
    }
}

/// A paste delivered by the host.
///
/// `prevent_default` suppresses the host's own paste handling; it is only called once
/// an image item has been picked. Clones share the flag, so a host can keep one clone
/// and send the other to a listener.
#[derive(Clone, Default)]
pub struct PasteEvent {
    items: Vec<Arc<dyn ClipboardItem>>,
    default_prevented: Arc<AtomicBool>,
}

impl PasteEvent {
    pub fn new(items: Vec<Arc<dyn ClipboardItem>>) -> Self {
        Self {
            items,
            default_prevented: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn single(item: impl ClipboardItem + 'static) -> Self {
        Self::new(vec![Arc::new(item)])
    }

    pub fn items(&self) -> &[Arc<dyn ClipboardItem>] {
        &self.items
    }

    /// First item whose declared type is an image.
    pub fn first_image(&self) -> Option<Arc<dyn ClipboardItem>> {
        self.items
            .iter()
            .find(|item| is_image_type(item.mime_type()))
            .cloned()
    }

    pub fn prevent_default(&self) {
        self.default_prevented.store(true, Ordering::SeqCst);
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented.load(Ordering::SeqCst)
    }
}

impl fmt::Debug for PasteEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let types: Vec<&str> = self.items.iter().map(|i| i.mime_type()).collect();
        f.debug_struct("PasteEvent")
            .field("items", &types)
            .field("default_prevented", &self.is_default_prevented())
            .finish()
    }
}
