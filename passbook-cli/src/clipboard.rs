//! System clipboard backed by arboard.

use passbook_core::{Clipboard, PassbookError, Result};

/// Clipboard handle kept alive for the whole session
///
/// On X11 and Wayland the copied text is served by the process that set it,
/// so the handle must outlive the copy.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        if self.inner.is_none() {
            let clipboard =
                arboard::Clipboard::new().map_err(|e| PassbookError::Clipboard(e.to_string()))?;
            self.inner = Some(clipboard);
        }

        if let Some(clipboard) = self.inner.as_mut() {
            clipboard
                .set_text(text.to_string())
                .map_err(|e| PassbookError::Clipboard(e.to_string()))?;
        }

        Ok(())
    }
}
