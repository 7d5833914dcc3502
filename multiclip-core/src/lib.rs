pub mod clipboard;
pub mod host;
pub mod input;
pub mod options;
pub mod queue;
pub mod watcher;

pub use clipboard::SystemClipboard;
pub use host::{
    ClipboardEvent, DataTransfer, Dispatch, EventKind, EventSource, FocusTarget, Handler,
    HostEvent, MemoryTransfer,
};
pub use input::{KeyInput, Modifiers, ShortcutAction};
pub use options::{ConsumeEnd, OptionsError, WatchOptions};
pub use queue::ClipQueue;
pub use watcher::ClipboardWatcher;
