//! Invoke command handler

use crate::action::{ActionDispatcher, ActionRequest};
use crate::cli::InvokeArgs;
use std::io::Read;
use std::path::Path;

/// Read an action-group event from a file, or stdin for `-`/no path.
pub fn read_event(path: Option<&Path>) -> Result<ActionRequest, Box<dyn std::error::Error>> {
    let raw = match path {
        Some(p) if p != Path::new("-") => std::fs::read_to_string(p)
            .map_err(|e| format!("Failed to read event {}: {}", p.display(), e))?,
        _ => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    Ok(serde_json::from_str(&raw).map_err(|e| format!("Invalid event JSON: {}", e))?)
}

/// Handle `finops invoke` command
pub async fn handle_invoke(
    args: &InvokeArgs,
    dispatcher: &ActionDispatcher,
) -> Result<String, Box<dyn std::error::Error>> {
    let request = read_event(args.event.as_deref())?;
    let response = dispatcher.handle(&request).await?;
    Ok(serde_json::to_string_pretty(&response)?)
}
