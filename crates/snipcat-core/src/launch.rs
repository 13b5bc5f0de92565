use crate::error::{Result, SnipcatError};
use std::process::Command;

/// Hand a URI to the platform opener. Custom schemes resolve to whatever
/// application registered them; there is no result to wait for beyond the
/// opener's exit status.
pub fn open_uri(uri: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    let status = Command::new("open").arg(uri).status();

    #[cfg(target_os = "linux")]
    let status = Command::new("xdg-open").arg(uri).status();

    #[cfg(target_os = "windows")]
    let status = Command::new("cmd").args(["/c", "start", uri]).status();

    match status {
        Ok(exit_status) if exit_status.success() => Ok(()),
        Ok(exit_status) => Err(SnipcatError::Launch {
            uri: uri.to_string(),
            reason: format!("opener exited with code {:?}", exit_status.code()),
        }),
        Err(e) => Err(SnipcatError::Io(e)),
    }
}
