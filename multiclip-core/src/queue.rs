use std::collections::VecDeque;

use crate::host::DataTransfer;

/// Ordered queue of pending text snippets.
///
/// Insertion order is significant: `shift` consumes from the front,
/// `pop` from the back. Text parsing follows a plain comma-separated
/// format ("A,B,C"). Quoted or escaped commas in the style of
/// spreadsheet CSV are reserved and not handled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClipQueue {
    items: VecDeque<String>,
}

impl ClipQueue {
    pub fn new() -> Self {
        Self {
            items: VecDeque::new(),
        }
    }

    /// Snapshot of the current items, front first.
    pub fn get(&self) -> Vec<String> {
        self.items.iter().cloned().collect()
    }

    /// Remove and return the front item, `None` when empty.
    pub fn shift(&mut self) -> Option<String> {
        self.items.pop_front()
    }

    /// Remove and return the back item, `None` when empty.
    pub fn pop(&mut self) -> Option<String> {
        self.items.pop_back()
    }

    /// Replace the whole queue with `items`.
    pub fn set<I>(&mut self, items: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.items = items.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the queue by parsing comma-separated text.
    /// Parts are trimmed and empty parts dropped.
    pub fn set_text(&mut self, text: &str) -> &mut Self {
        self.items = text
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::to_owned)
            .collect();
        self
    }

    /// Replace the queue from a clipboard payload's text.
    pub fn set_data_transfer(&mut self, data: &dyn DataTransfer) -> &mut Self {
        let text = data.get_data("text").unwrap_or_default();
        log::debug!("queue set from payload text: {:?}", text);
        self.set_text(&text)
    }

    /// Empty the queue.
    pub fn clear(&mut self) -> &mut Self {
        self.items.clear();
        self
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
