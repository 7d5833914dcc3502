//! Simulated page host driven from the console.
//!
//! Stands in for the browser side of the watcher: it owns focusable
//! fields, a text selection and a clipboard bridge, dispatches events
//! synchronously into the registered handlers, and performs the
//! default copy/cut/paste actions when a handler did not prevent them.

use std::collections::HashMap;

use log::{debug, warn};
use multiclip_core::{
    ClipboardEvent, DataTransfer, Dispatch, EventKind, EventSource, FocusTarget, Handler,
    HostEvent, KeyInput, MemoryTransfer, SystemClipboard,
};

use crate::config::HostConfig;

/// One simulated page element.
pub struct Field {
    name: String,
    value_bearing: bool,
    text: String,
}

impl Field {
    fn new(name: &str, value_bearing: bool) -> Self {
        Self {
            name: name.to_owned(),
            value_bearing,
            text: String::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl FocusTarget for Field {
    fn is_value_element(&self) -> bool {
        self.value_bearing
    }

    fn value(&self) -> String {
        self.text.clone()
    }

    fn set_value(&mut self, value: String) {
        self.text = value;
    }

    fn text_content(&self) -> String {
        self.text.clone()
    }

    fn set_text_content(&mut self, text: String) {
        self.text = text;
    }
}

/// Where copy/cut/paste payloads land. The in-process buffer keeps the
/// demo usable when no OS clipboard is reachable.
enum ClipboardBridge {
    System(SystemClipboard),
    Local(MemoryTransfer),
}

pub struct ConsoleHost {
    handlers: HashMap<EventKind, Handler>,
    fields: Vec<Field>,
    focused: usize,
    selection: Option<String>,
    bridge: ClipboardBridge,
}

impl EventSource for ConsoleHost {
    fn subscribe(&mut self, kind: EventKind, handler: Handler) {
        self.handlers.insert(kind, handler);
    }

    fn unsubscribe(&mut self, kind: EventKind) {
        self.handlers.remove(&kind);
    }
}

impl ConsoleHost {
    pub fn new(config: &HostConfig) -> Self {
        let bridge = if config.system_clipboard {
            match SystemClipboard::new() {
                Ok(clipboard) => ClipboardBridge::System(clipboard),
                Err(e) => {
                    warn!("system clipboard unavailable ({e}), using in-process buffer");
                    ClipboardBridge::Local(MemoryTransfer::new())
                }
            }
        } else {
            ClipboardBridge::Local(MemoryTransfer::new())
        };

        let mut fields: Vec<Field> = config
            .fields
            .iter()
            .map(|f| Field::new(&f.name, f.value_bearing))
            .collect();
        if fields.is_empty() {
            fields.push(Field::new("input", true));
        }

        Self {
            handlers: HashMap::new(),
            fields,
            focused: 0,
            selection: None,
            bridge,
        }
    }

    pub fn select(&mut self, text: impl Into<String>) {
        self.selection = Some(text.into());
    }

    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    /// Move focus to the named field. Returns false when unknown.
    pub fn focus(&mut self, name: &str) -> bool {
        match self.fields.iter().position(|f| f.name == name) {
            Some(index) => {
                self.focused = index;
                true
            }
            None => false,
        }
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn focused_name(&self) -> &str {
        &self.fields[self.focused].name
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// The clipboard text as the bridge currently sees it.
    pub fn clipboard_text(&mut self) -> Option<String> {
        match &mut self.bridge {
            ClipboardBridge::System(clipboard) => clipboard.get_text().ok(),
            ClipboardBridge::Local(buffer) => buffer.text().map(str::to_owned),
        }
    }

    /// Dispatch one copy or cut event.
    pub fn dispatch_capture(&mut self, kind: EventKind) {
        debug!("host dispatch: {:?}", kind);
        let mut payload = MemoryTransfer::new();
        let default_prevented = {
            let mut event = ClipboardEvent::new(&mut payload);
            if let Some(selection) = self.selection.clone() {
                event = event.with_selection(selection);
            }
            self.run_handler(kind, &mut event);
            event.default_prevented()
        };

        if !default_prevented {
            // Default action: publish the payload (or the raw
            // selection) to the clipboard; a cut drops the selection.
            if payload.text().is_none() {
                if let Some(selection) = &self.selection {
                    payload.set_data("text/plain", selection);
                }
            }
            self.publish(&payload);
            if kind == EventKind::Cut {
                self.selection = None;
            }
        }
    }

    /// Dispatch one paste event.
    pub fn dispatch_paste(&mut self) {
        debug!("host dispatch: Paste");
        let mut payload = MemoryTransfer::new();
        self.seed(&mut payload);

        let handler = self.handlers.remove(&EventKind::Paste);
        let focused = self.focused;
        let mut default_prevented = false;

        if let Some(mut handler) = handler {
            let mut event = ClipboardEvent::new(&mut payload);
            if let Some(selection) = self.selection.clone() {
                event = event.with_selection(selection);
            }
            if let Some(field) = self.fields.get_mut(focused) {
                event = event.with_focus(field);
            }
            let disposition = handler(HostEvent::Clipboard(&mut event));
            default_prevented = event.default_prevented();
            drop(event);
            match disposition {
                Dispatch::Continue => {
                    self.handlers.insert(EventKind::Paste, handler);
                }
                Dispatch::Detach => self.handlers.clear(),
            }
        }

        if !default_prevented {
            // Default action: insert the payload text at the focus.
            if let (Some(text), Some(field)) = (payload.text(), self.fields.get_mut(focused)) {
                let mut value = field.value();
                value.push_str(text);
                field.set_value(value);
            }
        }
    }

    /// Dispatch one keydown event.
    pub fn dispatch_key(&mut self, key: KeyInput) {
        debug!("host dispatch: Keydown {:?}", key);
        if let Some(mut handler) = self.handlers.remove(&EventKind::Keydown) {
            match handler(HostEvent::Key(key)) {
                Dispatch::Continue => {
                    self.handlers.insert(EventKind::Keydown, handler);
                }
                Dispatch::Detach => self.handlers.clear(),
            }
        }
    }

    fn run_handler(&mut self, kind: EventKind, event: &mut ClipboardEvent<'_>) {
        if let Some(mut handler) = self.handlers.remove(&kind) {
            match handler(HostEvent::Clipboard(event)) {
                Dispatch::Continue => {
                    self.handlers.insert(kind, handler);
                }
                Dispatch::Detach => self.handlers.clear(),
            }
        }
    }

    fn publish(&mut self, payload: &MemoryTransfer) {
        match &mut self.bridge {
            ClipboardBridge::System(clipboard) => {
                if let Err(e) = clipboard.mirror(payload) {
                    warn!("clipboard write failed: {e}");
                }
            }
            ClipboardBridge::Local(buffer) => {
                if let Some(text) = payload.text() {
                    buffer.set_data("text/plain", text);
                }
            }
        }
    }

    fn seed(&mut self, payload: &mut MemoryTransfer) {
        match &mut self.bridge {
            ClipboardBridge::System(clipboard) => {
                if let Err(e) = clipboard.seed(payload) {
                    debug!("clipboard read failed: {e}");
                }
            }
            ClipboardBridge::Local(buffer) => {
                if let Some(text) = buffer.text() {
                    payload.set_data("text/plain", text);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FieldConfig;

    fn local_host() -> ConsoleHost {
        ConsoleHost::new(&HostConfig {
            system_clipboard: false,
            fields: vec![
                FieldConfig {
                    name: "input".into(),
                    value_bearing: true,
                },
                FieldConfig {
                    name: "note".into(),
                    value_bearing: false,
                },
            ],
        })
    }

    #[test]
    fn focus_moves_between_known_fields() {
        let mut host = local_host();
        assert_eq!(host.focused_name(), "input");
        assert!(host.focus("note"));
        assert_eq!(host.focused_name(), "note");
        assert!(!host.focus("missing"));
        assert_eq!(host.focused_name(), "note");
    }

    #[test]
    fn default_copy_publishes_selection() {
        let mut host = local_host();
        host.select("hello");
        host.dispatch_capture(EventKind::Copy);
        assert_eq!(host.clipboard_text().as_deref(), Some("hello"));
        assert_eq!(host.selection(), Some("hello"));
    }

    #[test]
    fn default_cut_drops_selection() {
        let mut host = local_host();
        host.select("gone");
        host.dispatch_capture(EventKind::Cut);
        assert_eq!(host.clipboard_text().as_deref(), Some("gone"));
        assert_eq!(host.selection(), None);
    }

    #[test]
    fn default_paste_appends_clipboard_to_focus() {
        let mut host = local_host();
        host.select("text");
        host.dispatch_capture(EventKind::Copy);
        host.dispatch_paste();
        host.dispatch_paste();
        assert_eq!(host.fields()[0].text(), "texttext");
    }

    #[test]
    fn detach_clears_every_handler() {
        let mut host = local_host();
        host.subscribe(EventKind::Keydown, Box::new(|_| Dispatch::Continue));
        host.subscribe(EventKind::Copy, Box::new(|_| Dispatch::Detach));
        host.subscribe(EventKind::Paste, Box::new(|_| Dispatch::Continue));
        assert_eq!(host.handler_count(), 3);

        host.dispatch_capture(EventKind::Copy);
        assert_eq!(host.handler_count(), 0);
    }

    #[test]
    fn prevented_copy_skips_default_action() {
        let mut host = local_host();
        host.subscribe(
            EventKind::Copy,
            Box::new(|event| {
                if let HostEvent::Clipboard(event) = event {
                    event.prevent_default();
                }
                Dispatch::Continue
            }),
        );
        host.select("kept");
        host.dispatch_capture(EventKind::Copy);
        assert_eq!(host.clipboard_text(), None);
        assert_eq!(host.selection(), Some("kept"));
    }
}
