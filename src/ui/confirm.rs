//! Confirmation prompts for destructive operations

use dialoguer::Confirm;

use crate::error::{IbmError, Result};

/// Ask before a destructive change
///
/// `yes` skips the prompt. In batch mode there is nobody to ask, so the
/// operation is refused unless `yes` was given.
pub fn confirm_action(prompt: &str, yes: bool, batch: bool) -> Result<bool> {
    if yes {
        return Ok(true);
    }
    if batch {
        eprintln!("Refusing to continue in batch mode without --yes: {}", prompt);
        return Ok(false);
    }

    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| IbmError::Config(format!("Confirmation prompt failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yes_skips_prompt() {
        assert!(confirm_action("Delete environment 'dev'?", true, false).unwrap());
        assert!(confirm_action("Delete environment 'dev'?", true, true).unwrap());
    }

    #[test]
    fn test_batch_without_yes_declines() {
        assert!(!confirm_action("Delete environment 'dev'?", false, true).unwrap());
    }
}
