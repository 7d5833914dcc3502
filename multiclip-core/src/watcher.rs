//! Watch sessions over host clipboard events.

use std::sync::Arc;

use log::{debug, info, warn};
use parking_lot::Mutex;
use regex::Regex;

use crate::host::{
    DataTransfer, Dispatch, EventKind, EventSource, FocusTarget, Handler, HostEvent,
};
use crate::options::{ConsumeEnd, OptionsError, WatchOptions};
use crate::queue::ClipQueue;

/// Newline runs are removed from captured selections before they hit
/// the payload or the queue.
const NEWLINE_RUNS: &str = r"[\r\n]+";

/// Event kinds the current session is attached to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct ListenerSet {
    kinds: Vec<EventKind>,
}

impl ListenerSet {
    fn record(&mut self, kind: EventKind) {
        self.kinds.push(kind);
    }

    fn kinds(&self) -> &[EventKind] {
        &self.kinds
    }
}

/// Watch session state. One record per watcher instance; there is no
/// process-wide registry.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Session {
    Idle,
    Watching(ListenerSet),
}

/// State shared between the watcher facade and its handlers.
struct Shared {
    queue: ClipQueue,
    session: Session,
}

/// Queue-backed clipboard watcher.
///
/// Owns a queue of text snippets and, while watching, intercepts the
/// host's copy, cut and paste events: pastes can consume the queue
/// into the focused target, copies and cuts can capture the selection
/// into the queue, and the session can end itself once the queue
/// drains. `stop_watching` detaches everything again.
pub struct ClipboardWatcher<S: EventSource> {
    source: S,
    shared: Arc<Mutex<Shared>>,
}

impl<S: EventSource> ClipboardWatcher<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            shared: Arc::new(Mutex::new(Shared {
                queue: ClipQueue::new(),
                session: Session::Idle,
            })),
        }
    }

    /// Snapshot of the queued items, front first.
    pub fn get(&self) -> Vec<String> {
        self.shared.lock().queue.get()
    }

    /// Remove and return the front item, `None` when empty.
    pub fn shift(&mut self) -> Option<String> {
        self.shared.lock().queue.shift()
    }

    /// Remove and return the back item, `None` when empty.
    pub fn pop(&mut self) -> Option<String> {
        self.shared.lock().queue.pop()
    }

    /// Replace the queue. Chainable.
    pub fn set<I>(&mut self, items: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.shared.lock().queue.set(items);
        self
    }

    /// Replace the queue from comma-separated text. Chainable.
    pub fn set_text(&mut self, text: &str) -> &mut Self {
        self.shared.lock().queue.set_text(text);
        self
    }

    /// Replace the queue from a clipboard payload's text. Chainable.
    pub fn set_data_transfer(&mut self, data: &dyn DataTransfer) -> &mut Self {
        self.shared.lock().queue.set_data_transfer(data);
        self
    }

    /// Empty the queue. Chainable.
    pub fn clear(&mut self) -> &mut Self {
        self.shared.lock().queue.clear();
        self
    }

    pub fn len(&self) -> usize {
        self.shared.lock().queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shared.lock().queue.is_empty()
    }

    pub fn is_watching(&self) -> bool {
        matches!(self.shared.lock().session, Session::Watching(_))
    }

    /// The host this watcher is attached to.
    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Attach one handler per host event kind and begin the session.
    ///
    /// A second call while watching is ignored with a warning and
    /// leaves the listener set unchanged. Inconsistent options fail
    /// before anything attaches.
    pub fn start_watching(&mut self, options: WatchOptions) -> Result<&mut Self, OptionsError> {
        if self.is_watching() {
            warn!("start_watching ignored: session already active");
            return Ok(self);
        }
        options.validate()?;

        let newline = Regex::new(NEWLINE_RUNS).expect("newline pattern is valid");
        let mut set = ListenerSet::default();

        self.source
            .subscribe(EventKind::Keydown, keydown_observer());
        set.record(EventKind::Keydown);

        self.source.subscribe(
            EventKind::Copy,
            capture_handler(
                Arc::clone(&self.shared),
                EventKind::Copy,
                options.sync,
                options.stop_copy_on_end,
                newline.clone(),
            ),
        );
        set.record(EventKind::Copy);

        self.source.subscribe(
            EventKind::Cut,
            capture_handler(
                Arc::clone(&self.shared),
                EventKind::Cut,
                options.sync,
                options.stop_cut_on_end,
                newline,
            ),
        );
        set.record(EventKind::Cut);

        self.source.subscribe(
            EventKind::Paste,
            consume_handler(
                Arc::clone(&self.shared),
                options.consume_end(),
                options.stop_paste_on_end,
            ),
        );
        set.record(EventKind::Paste);

        self.shared.lock().session = Session::Watching(set);
        info!("watch session started: {:?}", options);
        Ok(self)
    }

    /// Detach every handler of the current session. Harmless no-op
    /// when already idle. Chainable.
    pub fn stop_watching(&mut self) -> &mut Self {
        let session = std::mem::replace(&mut self.shared.lock().session, Session::Idle);
        if let Session::Watching(set) = session {
            for kind in set.kinds() {
                self.source.unsubscribe(*kind);
            }
            info!("watch session stopped");
        }
        self
    }
}

/// Observer for clipboard keyboard shortcuts.
///
/// Classifies Ctrl+C / Ctrl+X / Ctrl+V and lets all of them pass
/// through untouched. Shortcut-driven behavior is an extension point
/// that is intentionally not wired up.
fn keydown_observer() -> Handler {
    Box::new(move |event| {
        if let HostEvent::Key(key) = event {
            if let Some(action) = key.shortcut() {
                debug!("clipboard shortcut observed: {:?}", action);
            }
        }
        Dispatch::Continue
    })
}

/// Copy/cut handler: optionally capture the selection into the
/// payload and the queue, then end the session if the queue drained.
fn capture_handler(
    shared: Arc<Mutex<Shared>>,
    kind: EventKind,
    sync: bool,
    stop_on_end: bool,
    newline: Regex,
) -> Handler {
    Box::new(move |event| {
        let HostEvent::Clipboard(event) = event else {
            return Dispatch::Continue;
        };
        debug!("{:?} event pass", kind);
        let mut state = shared.lock();
        if sync {
            let text = newline
                .replace_all(event.selection().unwrap_or(""), "")
                .into_owned();
            event.data().set_data("text/plain", &text);
            state.queue.set_data_transfer(&*event.data());
        }
        finish_pass(&mut state, stop_on_end)
    })
}

/// Paste handler: optionally consume one queue item into the focused
/// target, then end the session if the queue drained.
fn consume_handler(
    shared: Arc<Mutex<Shared>>,
    end: Option<ConsumeEnd>,
    stop_on_end: bool,
) -> Handler {
    Box::new(move |event| {
        let HostEvent::Clipboard(event) = event else {
            return Dispatch::Continue;
        };
        debug!("paste event pass");
        let mut state = shared.lock();
        if let Some(end) = end {
            let data = match end {
                ConsumeEnd::Front => state.queue.shift(),
                ConsumeEnd::Back => state.queue.pop(),
            };
            apply_to_focus(event.focus_mut(), data.as_deref());
            event.prevent_default();
        }
        finish_pass(&mut state, stop_on_end)
    })
}

/// Append `data` to the focused surface: form controls take it on
/// their value, anything else on its text content. A missing payload
/// appends nothing; no focused target means no effect.
fn apply_to_focus<'a>(focus: Option<&mut (dyn FocusTarget + 'a)>, data: Option<&str>) {
    let Some(target) = focus else { return };
    let data = data.unwrap_or("");
    if target.is_value_element() {
        let mut value = target.value();
        value.push_str(data);
        target.set_value(value);
    } else {
        let mut text = target.text_content();
        text.push_str(data);
        target.set_text_content(text);
    }
}

/// End-of-pass bookkeeping: once the queue is empty and the stop flag
/// for this event kind is set, flip to idle and detach.
fn finish_pass(state: &mut Shared, stop_on_end: bool) -> Dispatch {
    if stop_on_end && state.queue.is_empty() && matches!(state.session, Session::Watching(_)) {
        state.session = Session::Idle;
        info!("queue drained; watch session ended");
        Dispatch::Detach
    } else {
        Dispatch::Continue
    }
}
