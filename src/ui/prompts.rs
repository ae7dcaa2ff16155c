//! Interactive prompts with CI/non-interactive fallback

use super::context::UiContext;
use crate::error::{RelscoutError, RelscoutResult};

/// Prompt for confirmation.
///
/// Auto-yes returns true; a non-interactive context returns `default`.
pub async fn confirm(ctx: &UiContext, message: &str, default: bool) -> RelscoutResult<bool> {
    if ctx.auto_yes() {
        return Ok(true);
    }

    if !ctx.is_interactive() {
        return Ok(default);
    }

    // cliclack blocks on stdin
    let message = message.to_string();
    tokio::task::spawn_blocking(move || {
        cliclack::confirm(&message)
            .initial_value(default)
            .interact()
    })
    .await
    .map_err(|e| RelscoutError::Internal(format!("Prompt task failed: {}", e)))?
    .map_err(|e| RelscoutError::User(format!("Prompt failed: {}", e)))
}
