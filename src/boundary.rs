use std::fmt;
use std::path::PathBuf;

/// Non-fatal conditions noticed while preparing a bump.
/// These are reported to the user but do not stop the run.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// A line mentioned the version variable but was not a valid declaration
    MalformedDeclaration {
        path: PathBuf,
        line_number: usize,
        line: String,
    },
    /// No configured upstream, or it was never fetched; a same-named remote branch was used
    NoUpstream { branch: String, fallback: String },
    /// Fetch and pull did not run
    SyncSkipped { reason: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::MalformedDeclaration {
                path,
                line_number,
                line,
            } => {
                let short_line = if line.chars().count() > 60 {
                    format!("{}...", line.chars().take(60).collect::<String>())
                } else {
                    line.clone()
                };
                write!(
                    f,
                    "Skipping malformed declaration at {}:{}: {}",
                    path.display(),
                    line_number,
                    short_line
                )
            }
            BoundaryWarning::NoUpstream { branch, fallback } => {
                write!(
                    f,
                    "Branch '{}' has no usable upstream, comparing with '{}'",
                    branch, fallback
                )
            }
            BoundaryWarning::SyncSkipped { reason } => {
                write!(f, "Not syncing with remote: {}", reason)
            }
        }
    }
}
