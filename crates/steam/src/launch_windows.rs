//! Windows URI-handler invocation.

use crate::launch::LaunchError;

/// Opens a URI through the shell's `start` builtin.
pub async fn open_uri(uri: &str) -> Result<(), LaunchError> {
    tokio::process::Command::new("cmd")
        .args(["/C", "start", uri])
        .stdin(std::process::Stdio::null())
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .spawn()
        .map_err(|e| LaunchError::Spawn(format!("cmd /C start: {e}")))?;

    Ok(())
}
