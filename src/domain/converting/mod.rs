//! C# to VB.NET translation.
//!
//! `NodeVisitor` maps declarations, types and expressions onto the
//! [`vb`](crate::domain::vb) model; `StatementVisitor` maps statements,
//! including the `for` lowering in `for_statement`. Constructs that VB cannot
//! express inline come back as placeholders carrying the original text.

mod declarations;
mod expressions;
pub mod for_statement;
pub mod node_visitor;
mod query;
pub mod statement_visitor;
mod trivia;

pub use node_visitor::NodeVisitor;
pub use statement_visitor::StatementVisitor;

use std::collections::HashMap;

use thiserror::Error;

use crate::domain::syntax::SyntaxKind;
use crate::domain::vb::{Expr, Statement, Trivia};

/// Renames applied to identifiers before VB keyword escaping.
pub type IdentifierMap = HashMap<String, String>;

#[derive(Debug, Error)]
pub enum ConvertError {
    /// A syntax kind reached a visitor that has no rule for it.
    #[error("{kind} cannot be translated in {context} position")]
    Unmapped { kind: SyntaxKind, context: String },
    #[error(transparent)]
    Parse(#[from] ParseFailure),
}

impl ConvertError {
    pub(crate) fn unmapped(kind: SyntaxKind, context: &str) -> Self {
        ConvertError::Unmapped { kind, context: context.to_string() }
    }
}

/// Parser diagnostics surfaced in strict mode.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{what} failed: {}", .diagnostics.join(", "))]
pub struct ParseFailure {
    pub what: String,
    pub diagnostics: Vec<String>,
}

/// The VB construct a placeholder stands in for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetConstruct {
    Expression,
    Statement,
    ImportsStatement,
    Node,
}

impl TargetConstruct {
    pub fn syntax_name(self) -> &'static str {
        match self {
            TargetConstruct::Expression => "ExpressionSyntax",
            TargetConstruct::Statement => "StatementSyntax",
            TargetConstruct::ImportsStatement => "ImportsStatementSyntax",
            TargetConstruct::Node => "SyntaxNode",
        }
    }
}

/// `'<source>' could not be converted to a <Target>`, on one line.
pub fn placeholder_text(source: &str, target: TargetConstruct) -> String {
    let flat: String = source
        .trim()
        .chars()
        .map(|c| if c == '\r' || c == '\n' { ' ' } else { c })
        .collect();
    format!("'{}' could not be converted to a {}", flat, target.syntax_name())
}

/// Placeholder in expression position: a string literal.
pub fn placeholder_string(source: &str, target: TargetConstruct) -> Expr {
    Expr::Str(placeholder_text(source, target))
}

/// Placeholder in statement position: an empty statement carrying a comment.
pub fn placeholder_statement(source: &str, target: TargetConstruct) -> Statement {
    Statement::empty().with_leading(vec![Trivia::Comment(format!(
        "' {}",
        placeholder_text(source, target)
    ))])
}
