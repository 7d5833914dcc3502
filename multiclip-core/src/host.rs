//! Capability seam between the watcher and its host.
//!
//! The watcher never talks to a real UI event loop directly. A host
//! implements [`EventSource`] and delivers [`HostEvent`]s to the
//! handlers registered through it, which keeps the watching logic
//! runnable against a fake host in tests.

use crate::input::KeyInput;

/// Kinds of host events a watch session observes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Copy,
    Cut,
    Paste,
    Keydown,
}

impl EventKind {
    /// Every kind a session attaches to.
    pub const ALL: [EventKind; 4] = [
        EventKind::Copy,
        EventKind::Cut,
        EventKind::Paste,
        EventKind::Keydown,
    ];
}

/// Clipboard payload carried by copy/cut/paste events.
///
/// Implementations accept `"text"` as an alias of `"text/plain"`;
/// hosts are loose about which of the two names they use.
pub trait DataTransfer {
    fn get_data(&self, format: &str) -> Option<String>;
    fn set_data(&mut self, format: &str, value: &str);
}

fn is_text_format(format: &str) -> bool {
    matches!(format, "text" | "text/plain")
}

/// In-memory payload for hosts without a richer transfer object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryTransfer {
    text: Option<String>,
}

impl MemoryTransfer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

impl DataTransfer for MemoryTransfer {
    fn get_data(&self, format: &str) -> Option<String> {
        if is_text_format(format) {
            self.text.clone()
        } else {
            None
        }
    }

    fn set_data(&mut self, format: &str, value: &str) {
        if is_text_format(format) {
            self.text = Some(value.to_owned());
        }
    }
}

/// The focused editable surface of the host.
///
/// Form controls carry a settable value; any other element carries
/// text content. The watcher appends to whichever side applies.
pub trait FocusTarget {
    /// Whether the element is a value-bearing form control.
    fn is_value_element(&self) -> bool;
    fn value(&self) -> String;
    fn set_value(&mut self, value: String);
    fn text_content(&self) -> String;
    fn set_text_content(&mut self, text: String);
}

/// A clipboard event in flight, assembled by the host per dispatch.
pub struct ClipboardEvent<'a> {
    selection: Option<String>,
    data: &'a mut dyn DataTransfer,
    focus: Option<&'a mut dyn FocusTarget>,
    default_prevented: bool,
}

impl<'a> ClipboardEvent<'a> {
    pub fn new(data: &'a mut dyn DataTransfer) -> Self {
        Self {
            selection: None,
            data,
            focus: None,
            default_prevented: false,
        }
    }

    /// Attach the host's current selection text.
    pub fn with_selection(mut self, selection: impl Into<String>) -> Self {
        self.selection = Some(selection.into());
        self
    }

    /// Attach the currently focused target.
    pub fn with_focus(mut self, focus: &'a mut dyn FocusTarget) -> Self {
        self.focus = Some(focus);
        self
    }

    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    pub fn data(&mut self) -> &mut dyn DataTransfer {
        &mut *self.data
    }

    pub fn focus_mut(&mut self) -> Option<&mut (dyn FocusTarget + 'a)> {
        self.focus.as_deref_mut()
    }

    /// Suppress the host's default action for this event.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Event delivered to a registered handler.
pub enum HostEvent<'a, 'b> {
    Clipboard(&'a mut ClipboardEvent<'b>),
    Key(KeyInput),
}

/// What the event source does with its listener table after a handler
/// pass.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Keep listeners attached.
    Continue,
    /// Drop every registered handler before the dispatch call returns.
    Detach,
}

/// Handler registered for one event kind.
pub type Handler = Box<dyn FnMut(HostEvent<'_, '_>) -> Dispatch + Send>;

/// Host-side event registration.
///
/// At most one handler is active per kind; subscribing a kind again
/// replaces the previous handler. Hosts dispatch synchronously on
/// their own loop and honor [`Dispatch::Detach`] by clearing the
/// whole listener table before the dispatching call returns.
pub trait EventSource {
    fn subscribe(&mut self, kind: EventKind, handler: Handler);
    fn unsubscribe(&mut self, kind: EventKind);
}
