//! Interactive questions asked before scaffolding

use anyhow::Result;
use dialoguer::{Confirm, Input};

/// What the user told us
#[derive(Debug, Clone)]
pub struct Answers {
    /// Project handle; names the project directory and downstream resources
    pub handle: String,

    /// False when the user declined to continue into an existing directory
    pub enable_install: bool,
}

/// Ask for the project handle. Empty input is rejected inline and the
/// prompt re-asks; the accepted handle is trimmed and lowercased.
pub fn project_handle() -> Result<String> {
    let handle: String = Input::new()
        .with_prompt("Project handle")
        .validate_with(|input: &String| -> Result<(), &str> {
            if is_valid_handle(input) {
                Ok(())
            } else {
                Err("Handle must not be empty")
            }
        })
        .interact_text()?;

    Ok(normalize_handle(&handle))
}

/// Ask whether to continue into an existing project directory. Default is
/// to proceed.
pub fn confirm_existing(handle: &str) -> Result<bool> {
    let confirmed = Confirm::new()
        .with_prompt(format!(
            "Directory ./{handle} already exists. Continue into it?"
        ))
        .default(true)
        .interact()?;

    Ok(confirmed)
}

pub fn is_valid_handle(input: &str) -> bool {
    !input.trim().is_empty()
}

pub fn normalize_handle(input: &str) -> String {
    input.trim().to_lowercase()
}
