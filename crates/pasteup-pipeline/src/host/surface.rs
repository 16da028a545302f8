//! Text surfaces that receive the inserted URL.
//!
//! Offsets are character offsets, not byte offsets.

use std::sync::Mutex;

use pasteup_core::PasteResult;
use tokio::sync::broadcast;

const EVENT_CAPACITY: usize = 16;

/// Raised after every mutation, `Input` first then `Change`, so the host application
/// observes the new text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceEvent {
    Input,
    Change,
}

pub trait EditableSurface: Send + Sync {
    /// Stable identity, used to attach a paste listener at most once.
    fn id(&self) -> &str;

    fn text(&self) -> String;

    /// Insert `text` at the current cursor or selection, then raise the mutation events.
    fn insert_at_cursor(&self, text: &str) -> PasteResult<()>;

    fn subscribe(&self) -> broadcast::Receiver<SurfaceEvent>;
}

/// Replace chars `start..end` of `text` with `insert`.
fn splice_chars(text: &str, start: usize, end: usize, insert: &str) -> String {
    let head: String = text.chars().take(start).collect();
    let tail: String = text.chars().skip(end).collect();
    format!("{}{}{}", head, insert, tail)
}

/// Order and clamp a selection to the text length.
fn clamp_selection(text: &str, start: usize, end: usize) -> (usize, usize) {
    let len = text.chars().count();
    let (start, end) = if start <= end { (start, end) } else { (end, start) };
    (start.min(len), end.min(len))
}

fn emit_mutation(events: &broadcast::Sender<SurfaceEvent>) {
    // no receivers is fine
    let _ = events.send(SurfaceEvent::Input);
    let _ = events.send(SurfaceEvent::Change);
}

#[derive(Debug, Default)]
struct FieldState {
    value: String,
    selection: Option<(usize, usize)>,
}

/// Plain value-based field (`<input>`, `<textarea>`).
///
/// Without a selection the text is appended. A selected range is replaced. The caret
/// ends up right after the inserted text.
pub struct ValueField {
    id: String,
    state: Mutex<FieldState>,
    events: broadcast::Sender<SurfaceEvent>,
}

impl ValueField {
    pub fn new(id: impl Into<String>, value: impl Into<String>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            id: id.into(),
            state: Mutex::new(FieldState {
                value: value.into(),
                selection: None,
            }),
            events,
        }
    }

    pub fn set_cursor(&self, offset: usize) {
        self.set_selection(offset, offset);
    }

    pub fn set_selection(&self, start: usize, end: usize) {
        let mut state = self.lock();
        let selection = clamp_selection(&state.value, start, end);
        state.selection = Some(selection);
    }

    pub fn selection(&self) -> Option<(usize, usize)> {
        self.lock().selection
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FieldState> {
        // a poisoned lock still holds consistent text; keep using it
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl EditableSurface for ValueField {
    fn id(&self) -> &str {
        &self.id
    }

    fn text(&self) -> String {
        self.lock().value.clone()
    }

    fn insert_at_cursor(&self, text: &str) -> PasteResult<()> {
        {
            let mut state = self.lock();
            let len = state.value.chars().count();
            let (start, end) = match state.selection {
                Some((start, end)) => clamp_selection(&state.value, start, end),
                None => (len, len),
            };
            state.value = splice_chars(&state.value, start, end, text);
            let caret = start + text.chars().count();
            state.selection = Some((caret, caret));
        }
        emit_mutation(&self.events);
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<SurfaceEvent> {
        self.events.subscribe()
    }
}

/// Rich editable region (`contenteditable`).
///
/// Insertion goes through the live selection range: its contents are deleted, the text
/// is inserted and the range collapses after it. With no range the text is appended
/// and no range is created.
pub struct RichRegion {
    id: String,
    state: Mutex<FieldState>,
    events: broadcast::Sender<SurfaceEvent>,
}

impl RichRegion {
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            id: id.into(),
            state: Mutex::new(FieldState {
                value: content.into(),
                selection: None,
            }),
            events,
        }
    }

    pub fn select(&self, start: usize, end: usize) {
        let mut state = self.lock();
        let range = clamp_selection(&state.value, start, end);
        state.selection = Some(range);
    }

    pub fn clear_selection(&self) {
        self.lock().selection = None;
    }

    pub fn selection(&self) -> Option<(usize, usize)> {
        self.lock().selection
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FieldState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl EditableSurface for RichRegion {
    fn id(&self) -> &str {
        &self.id
    }

    fn text(&self) -> String {
        self.lock().value.clone()
    }

    fn insert_at_cursor(&self, text: &str) -> PasteResult<()> {
        {
            let mut state = self.lock();
            match state.selection {
                Some((start, end)) => {
                    let (start, end) = clamp_selection(&state.value, start, end);
                    state.value = splice_chars(&state.value, start, end, text);
                    let after = start + text.chars().count();
                    state.selection = Some((after, after));
                }
                None => state.value.push_str(text),
            }
        }
        emit_mutation(&self.events);
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<SurfaceEvent> {
        self.events.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_field_appends_without_cursor() {
        let field = ValueField::new("f1", "see: ");
        field.insert_at_cursor("https://x/y.png").unwrap();
        assert_eq!(field.text(), "see: https://x/y.png");
        assert_eq!(field.selection(), Some((20, 20)));
    }

    #[test]
    fn test_value_field_splices_at_cursor() {
        let field = ValueField::new("f1", "before after");
        field.set_cursor(7);
        field.insert_at_cursor("URL ").unwrap();
        assert_eq!(field.text(), "before URL after");
        assert_eq!(field.selection(), Some((11, 11)));

        let field = ValueField::new("f2", "abc");
        field.set_cursor(0);
        field.insert_at_cursor("X").unwrap();
        assert_eq!(field.text(), "Xabc");
    }

    #[test]
    fn test_value_field_replaces_selection() {
        let field = ValueField::new("f1", "one two three");
        field.set_selection(7, 4);
        field.insert_at_cursor("2").unwrap();
        assert_eq!(field.text(), "one 2 three");
        assert_eq!(field.selection(), Some((5, 5)));
    }

    #[test]
    fn test_offsets_are_characters() {
        let field = ValueField::new("f1", "héllo");
        field.set_cursor(2);
        field.insert_at_cursor("→").unwrap();
        assert_eq!(field.text(), "hé→llo");

        let field = ValueField::new("f2", "ab");
        field.set_cursor(99);
        field.insert_at_cursor("c").unwrap();
        assert_eq!(field.text(), "abc");
    }

    #[test]
    fn test_rich_region_replaces_range_and_collapses() {
        let region = RichRegion::new("r1", "Hello <img> world");
        region.select(6, 11);
        region.insert_at_cursor("https://x/y.png").unwrap();
        assert_eq!(region.text(), "Hello https://x/y.png world");
        assert_eq!(region.selection(), Some((21, 21)));
    }

    #[test]
    fn test_rich_region_appends_without_range() {
        let region = RichRegion::new("r1", "notes");
        region.insert_at_cursor(" https://x").unwrap();
        assert_eq!(region.text(), "notes https://x");
        assert_eq!(region.selection(), None);

        region.select(0, 0);
        region.clear_selection();
        assert_eq!(region.selection(), None);
    }

    #[test]
    fn test_mutation_events_input_then_change() {
        let field = ValueField::new("f1", "");
        let mut events = field.subscribe();
        field.insert_at_cursor("x").unwrap();
        assert_eq!(events.try_recv().unwrap(), SurfaceEvent::Input);
        assert_eq!(events.try_recv().unwrap(), SurfaceEvent::Change);
        assert!(events.try_recv().is_err());
    }
}
