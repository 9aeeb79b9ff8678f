//! Linux URI-handler invocation.

use crate::launch::LaunchError;

/// Opens a URI with the desktop's default handler.
pub async fn open_uri(uri: &str) -> Result<(), LaunchError> {
    tokio::process::Command::new("xdg-open")
        .arg(uri)
        .stdin(std::process::Stdio::null())
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .spawn()
        .map_err(|e| LaunchError::Spawn(format!("xdg-open: {e}")))?;

    Ok(())
}
