//! Game launching via `steam://run/` URIs.
//!
//! Platform-specific URI-handler invocation lives in `launch_linux.rs`
//! and `launch_windows.rs`. This module provides the unified API.

/// Errors from invoking the OS URI handler.
#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    #[error("failed to invoke URI handler: {0}")]
    Spawn(String),

    #[error("no URI handler on this platform")]
    Unsupported,
}

/// Formats the launch URI for a game.
///
/// No validation: any string is accepted, and a bad identifier surfaces
/// as a URI-handling failure reported by the OS, not by us.
pub fn launch_uri(app_id: &str) -> String {
    format!("steam://run/{app_id}")
}

/// Hands the game's launch URI to the OS default URI handler.
///
/// Non-blocking: the handler process is spawned and left alone. Steam
/// itself takes over from there.
pub async fn launch(app_id: &str) -> Result<(), LaunchError> {
    let uri = launch_uri(app_id);
    tracing::info!(%uri, "launching game");
    platform::open_uri(&uri).await
}

// Platform-specific implementation.
#[cfg(target_os = "linux")]
#[path = "launch_linux.rs"]
mod platform;

#[cfg(target_os = "windows")]
#[path = "launch_windows.rs"]
mod platform;

#[cfg(target_os = "macos")]
mod platform {
    use super::LaunchError;

    pub async fn open_uri(uri: &str) -> Result<(), LaunchError> {
        tokio::process::Command::new("open")
            .arg(uri)
            .stdin(std::process::Stdio::null())
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .spawn()
            .map_err(|e| LaunchError::Spawn(format!("open: {e}")))?;
        Ok(())
    }
}

#[cfg(not(any(target_os = "linux", target_os = "windows", target_os = "macos")))]
mod platform {
    use super::LaunchError;

    pub async fn open_uri(_uri: &str) -> Result<(), LaunchError> {
        Err(LaunchError::Unsupported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn launch_uri_format() {
        assert_eq!(launch_uri("440"), "steam://run/440");
    }

    #[test]
    fn launch_uri_empty_app_id() {
        // Deliberately unvalidated; the OS reports the failure.
        assert_eq!(launch_uri(""), "steam://run/");
    }

    #[test]
    fn launch_error_display() {
        let err = LaunchError::Spawn("xdg-open: not found".into());
        assert!(err.to_string().contains("xdg-open"));
        assert_eq!(
            LaunchError::Unsupported.to_string(),
            "no URI handler on this platform"
        );
    }
}
