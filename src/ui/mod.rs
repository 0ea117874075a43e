//! User interface module - interaction (prompts) and formatting.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - Interactive prompts and user input handling

use std::io::{self, BufRead, Write};

use anyhow::Result;

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_boundary_warning, display_error, display_manual_push_instruction, display_status,
    display_success, display_version_update,
};

/// Answer to the confirmation prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confirmation {
    Accepted,
    Declined,
    /// Anything other than yes/no, kept verbatim (trimmed)
    Invalid(String),
}

/// Interpret a line typed at the confirmation prompt.
///
/// `y`/`yes` accept and `n`/`no` decline, case-insensitively. Everything
/// else, including an empty line, is invalid.
pub fn parse_confirmation(input: &str) -> Confirmation {
    let response = input.trim();
    match response.to_lowercase().as_str() {
        "y" | "yes" => Confirmation::Accepted,
        "n" | "no" => Confirmation::Declined,
        _ => Confirmation::Invalid(response.to_string()),
    }
}

/// Ask the yes/no question on `output` and read one line from `input`
pub fn prompt_confirmation<R: BufRead, W: Write>(
    prompt: &str,
    input: &mut R,
    output: &mut W,
) -> Result<Confirmation> {
    write!(output, "\n{} (y/n): ", prompt)?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;

    Ok(parse_confirmation(&line))
}

/// Prompts user to confirm publishing the new version on the terminal.
///
/// # Returns
/// * `Ok(Confirmation)` - What the user answered
/// * `Err` - If reading stdin or writing stdout fails
pub fn confirm_version_update() -> Result<Confirmation> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    prompt_confirmation("Continue?", &mut input, &mut output)
}
