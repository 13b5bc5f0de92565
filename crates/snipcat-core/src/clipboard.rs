use crate::error::{Result, SnipcatError};
use arboard::Clipboard;

/// Set the clipboard content as text
pub fn set_clipboard_text(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new().map_err(|e| SnipcatError::Clipboard(e.to_string()))?;
    clipboard
        .set_text(text)
        .map_err(|e| SnipcatError::Clipboard(e.to_string()))
}
