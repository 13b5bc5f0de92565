use crate::app::EffectSink;
use crate::clipboard::set_clipboard_text;
use crate::config::{default_export_dir, EXPORT_FILENAME};
use crate::error::Result;
use crate::launch::open_uri;
use std::fs;
use std::path::PathBuf;

/// The production effect sink: clipboard, export file, platform opener.
pub struct SystemEffects {
    export_dir: PathBuf,
}

impl SystemEffects {
    pub fn new() -> Self {
        Self {
            export_dir: default_export_dir(),
        }
    }

    pub fn with_export_dir(export_dir: PathBuf) -> Self {
        Self { export_dir }
    }

    /// Where the download intent writes its file.
    pub fn export_path(&self) -> PathBuf {
        self.export_dir.join(EXPORT_FILENAME)
    }
}

impl Default for SystemEffects {
    fn default() -> Self {
        Self::new()
    }
}

impl EffectSink for SystemEffects {
    fn download(&mut self, payload: &str) -> Result<()> {
        fs::write(self.export_path(), payload)?;
        Ok(())
    }

    fn copy_text(&mut self, text: &str) -> Result<()> {
        set_clipboard_text(text)
    }

    fn navigate(&mut self, uri: &str) -> Result<()> {
        open_uri(uri)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn download_writes_the_export_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut effects = SystemEffects::with_export_dir(dir.path().to_path_buf());

        effects.download("[]").unwrap();

        let written = fs::read_to_string(dir.path().join(EXPORT_FILENAME)).unwrap();
        assert_eq!(written, "[]");
    }
}
