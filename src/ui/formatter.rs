//! Pure formatting functions for UI output.
//!
//! This module contains all display/formatting logic separated from user interaction.
//! Functions here only print; they never read input.

use console::style;

use crate::boundary::BoundaryWarning;
use crate::domain::SemanticVersion;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Plain text of the version change line
pub fn version_update_line(previous: &SemanticVersion, next: &SemanticVersion) -> String {
    format!("Updating version: {} -> {}", previous, next)
}

/// Display the version change the run is about to publish.
pub fn display_version_update(previous: &SemanticVersion, next: &SemanticVersion, tag: &str) {
    println!("\n{}", style(version_update_line(previous, next)).bold());
    println!("  Tag: {}", style(tag).green());
}

/// Display manual push instruction for a tag that was only created locally.
///
/// # Arguments
/// * `tag` - The tag that was created locally
/// * `remote` - The remote name (e.g., "origin")
pub fn display_manual_push_instruction(tag: &str, remote: &str) {
    println!(
        "\n{} To push this tag later, run:\n  {}",
        style("→").yellow(),
        style(format!("git push {} {}", remote, tag)).cyan()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_update_line() {
        let line = version_update_line(&SemanticVersion::new(2, 3, 1), &SemanticVersion::new(2, 3, 2));
        assert_eq!(line, "Updating version: 2.3.1 -> 2.3.2");
    }

    #[test]
    fn test_display_functions_do_not_panic() {
        display_error("test error");
        display_success("test success");
        display_status("test status");
        display_boundary_warning(&BoundaryWarning::SyncSkipped {
            reason: "test".to_string(),
        });
    }
}
