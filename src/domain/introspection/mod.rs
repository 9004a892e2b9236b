//! Per-tree code-smell analysis. The solution-wide scans that fan these out
//! live in `application::introspection`.

pub mod complexity;
pub mod return_null;

pub use complexity::complexity;
pub use return_null::return_null;

use std::time::Duration;

use thiserror::Error;

use crate::domain::syntax::{SyntaxKind, SyntaxNode};

/// A method whose decision-point count exceeded the threshold.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComplexityRecord {
    pub type_identifier: String,
    pub method_identifier: String,
    /// The method signature, whitespace collapsed.
    pub sources_sample: String,
    /// Decision points plus one.
    pub n_statement_syntax: usize,
    pub file_path: String,
    /// Zero-based.
    pub source_line: usize,
}

/// A `return` or `yield return` of `null` or `default(T)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReturnNullRecord {
    pub type_identifier: String,
    pub sources_sample: String,
    pub file_path: String,
    /// One-based.
    pub source_line: usize,
}

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("scan was cancelled")]
    Cancelled,
    #[error("scan did not finish within {budget:?}")]
    TimedOut { budget: Duration },
    /// The tree does not have the shape the analysis relies on.
    #[error("no enclosing {expected} for the statement at {file}:{line}")]
    MissingAncestor { expected: &'static str, file: String, line: usize },
    #[error("failed to load solution: {0:#}")]
    Load(anyhow::Error),
    #[error("scan worker stopped without reporting a result")]
    WorkerLost,
}

impl ScanError {
    /// True when the scan ran out of time or was stopped, as opposed to
    /// failing.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, ScanError::Cancelled | ScanError::TimedOut { .. })
    }
}

/// Name of the type declaration enclosing `node`.
pub(crate) fn owning_type(node: SyntaxNode<'_>, file: &str) -> Result<String, ScanError> {
    node.first_ancestor(SyntaxKind::is_type_declaration)
        .and_then(|ty| ty.token(SyntaxKind::Identifier))
        .map(|name| name.text().to_string())
        .ok_or_else(|| ScanError::MissingAncestor {
            expected: "type declaration",
            file: file.to_string(),
            line: node.start_line() + 1,
        })
}

/// Source text on a single line.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::csharp::parser::{parse_compilation_unit, parse_statement};

    #[test]
    fn cancellation_is_distinguishable() {
        assert!(ScanError::Cancelled.is_cancellation());
        assert!(ScanError::TimedOut { budget: Duration::from_secs(1) }.is_cancellation());
        assert!(!ScanError::WorkerLost.is_cancellation());
        assert!(!ScanError::Load(anyhow::anyhow!("boom")).is_cancellation());
    }

    #[test]
    fn owning_type_is_the_nearest_declaration() {
        let tree = parse_compilation_unit("class Outer { class Inner { void M() { return; } } }", &[]);
        let ret = tree.root().descendants().find(|n| n.kind() == SyntaxKind::ReturnStatement).unwrap();
        assert_eq!(owning_type(ret, "A.cs").unwrap(), "Inner");
    }

    #[test]
    fn statements_outside_a_type_fail_loudly() {
        let tree = parse_statement("return null;", &[]);
        let err = owning_type(tree.root(), "Loose.cs").unwrap_err();
        assert_eq!(err.to_string(), "no enclosing type declaration for the statement at Loose.cs:1");
    }
}
