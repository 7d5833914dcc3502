use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which end of the queue a paste consumes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsumeEnd {
    Front,
    Back,
}

/// Error raised when watch options are inconsistent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OptionsError {
    /// `shift` and `pop` consume opposite ends and cannot both be on.
    #[error("cannot enable shift and pop at the same time")]
    ShiftPopConflict,
}

/// Options for a watch session.
///
/// `shift` and `pop` are mutually exclusive. The stop flags end the
/// session automatically once the queue is empty after the matching
/// event kind has been handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchOptions {
    /// Capture the current selection into the queue on copy/cut.
    pub sync: bool,
    /// Consume the queue front on paste.
    pub shift: bool,
    /// Consume the queue back on paste.
    pub pop: bool,
    pub stop_copy_on_end: bool,
    pub stop_cut_on_end: bool,
    pub stop_paste_on_end: bool,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            sync: false,
            shift: false,
            pop: false,
            stop_copy_on_end: true,
            stop_cut_on_end: true,
            stop_paste_on_end: true,
        }
    }
}

impl WatchOptions {
    /// Validate option consistency. Runs before any listener attaches,
    /// so a rejected set of options has no side effect at all.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.shift && self.pop {
            return Err(OptionsError::ShiftPopConflict);
        }
        Ok(())
    }

    /// The queue end pastes consume from, when consumption is enabled.
    pub fn consume_end(&self) -> Option<ConsumeEnd> {
        if self.shift {
            Some(ConsumeEnd::Front)
        } else if self.pop {
            Some(ConsumeEnd::Back)
        } else {
            None
        }
    }
}
