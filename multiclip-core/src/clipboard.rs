//! System clipboard bridge.
//!
//! Hosts that propagate event payloads into the real OS clipboard
//! (the way a browser does natively for clipboard events) go through
//! this wrapper instead of touching `arboard` directly.

use anyhow::Result;

use crate::host::DataTransfer;

/// Cross-platform clipboard access.
pub struct SystemClipboard {
    ctx: arboard::Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self> {
        let ctx = arboard::Clipboard::new()?;
        Ok(Self { ctx })
    }

    /// Get the clipboard's text content.
    pub fn get_text(&mut self) -> Result<String> {
        let text = self.ctx.get_text()?;
        Ok(text)
    }

    /// Set the clipboard's text content.
    pub fn set_text(&mut self, text: &str) -> Result<()> {
        self.ctx.set_text(text)?;
        Ok(())
    }

    /// Publish a payload's text to the OS clipboard. A payload without
    /// text leaves the clipboard untouched.
    pub fn mirror(&mut self, data: &dyn DataTransfer) -> Result<()> {
        if let Some(text) = data.get_data("text/plain") {
            self.set_text(&text)?;
        }
        Ok(())
    }

    /// Seed a payload with the OS clipboard's current text.
    pub fn seed(&mut self, data: &mut dyn DataTransfer) -> Result<()> {
        let text = self.get_text()?;
        data.set_data("text/plain", &text);
        Ok(())
    }
}
