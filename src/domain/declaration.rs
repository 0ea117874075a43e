//! Version declarations embedded in source files.
//!
//! A declaration is a single line such as
//! `const int version[8] = {1, 2, 0, 0};` where the braces hold
//! `major, minor, patch` followed by a build flag that must equal the
//! sentinel value for the line to count as a release declaration.

use std::path::PathBuf;

use crate::domain::SemanticVersion;

/// Rules for recognising a declaration line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationFormat {
    /// Substring that marks a candidate line (case-sensitive)
    pub variable: String,
    /// Number of comma-separated fields between the braces, sentinel included
    pub field_count: usize,
    /// Required value of the last field
    pub sentinel: u64,
}

impl Default for DeclarationFormat {
    fn default() -> Self {
        DeclarationFormat {
            variable: "version".to_string(),
            field_count: 4,
            sentinel: 0,
        }
    }
}

/// A parsed `{ major, minor, patch, build_flag }` record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceVersionDeclaration {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub build_flag: u64,
}

impl SourceVersionDeclaration {
    pub fn version(&self) -> SemanticVersion {
        SemanticVersion::new(self.major, self.minor, self.patch)
    }

    /// Whether the build flag carries the expected sentinel
    pub fn is_well_formed(&self, format: &DeclarationFormat) -> bool {
        self.build_flag == format.sentinel
    }
}

/// A candidate line that mentioned the variable but did not parse
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based
    pub line_number: usize,
    pub line: String,
}

/// Result of scanning a text for a declaration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOutcome {
    pub declaration: Option<SourceVersionDeclaration>,
    pub skipped: Vec<SkippedLine>,
}

/// A scanned source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSnapshot {
    pub path: PathBuf,
    pub declaration: Option<SourceVersionDeclaration>,
    pub skipped: Vec<SkippedLine>,
}

impl SourceSnapshot {
    pub fn new(path: impl Into<PathBuf>, outcome: ScanOutcome) -> Self {
        SourceSnapshot {
            path: path.into(),
            declaration: outcome.declaration,
            skipped: outcome.skipped,
        }
    }
}

/// Scan `text` line by line and accept the first line that fully parses.
///
/// Candidate lines that fail to parse are recorded in
/// [`ScanOutcome::skipped`] and scanning moves on.
pub fn scan_declaration(text: &str, format: &DeclarationFormat) -> ScanOutcome {
    let mut outcome = ScanOutcome::default();

    for (index, line) in text.lines().enumerate() {
        if !line.contains(&format.variable) {
            continue;
        }

        match parse_declaration_line(line, format) {
            Some(declaration) => {
                outcome.declaration = Some(declaration);
                break;
            }
            None => outcome.skipped.push(SkippedLine {
                line_number: index + 1,
                line: line.trim().to_string(),
            }),
        }
    }

    outcome
}

/// Parse the brace-delimited field list on a single line.
///
/// Takes the text between the first `{` and the first `}` on the line; a
/// line whose first `}` comes before its first `{` does not parse.
pub fn parse_declaration_line(line: &str, format: &DeclarationFormat) -> Option<SourceVersionDeclaration> {
    let open = line.find('{')?;
    let close = line.find('}')?;
    if close <= open {
        return None;
    }

    let fields = line[open + 1..close]
        .split(',')
        .map(|field| field.trim().parse::<u64>().ok())
        .collect::<Option<Vec<u64>>>()?;

    if fields.len() != format.field_count || fields.len() < 4 {
        return None;
    }

    let declaration = SourceVersionDeclaration {
        major: fields[0],
        minor: fields[1],
        patch: fields[2],
        build_flag: fields[fields.len() - 1],
    };

    declaration.is_well_formed(format).then_some(declaration)
}
