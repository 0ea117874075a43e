//! Domain logic - pure business rules independent of git operations

pub mod declaration;
pub mod state;
pub mod tag;
pub mod version;

pub use declaration::{
    scan_declaration, DeclarationFormat, ScanOutcome, SkippedLine, SourceSnapshot,
    SourceVersionDeclaration,
};
pub use state::RepositoryState;
pub use tag::TagPattern;
pub use version::{BumpKind, SemanticVersion};
