//! Immutable C# syntax trees: kinds, trivia, spans and the arena that holds them.

pub mod kind;
pub mod text;
pub mod tree;

pub use kind::{SyntaxKind, TriviaKind};
pub use text::TextRange;
pub use tree::{
    Diagnostic, ElementId, GreenElement, GreenNode, GreenToken, NodeId, SyntaxElement, SyntaxNode,
    SyntaxToken, SyntaxTree, TokenId, Trivia,
};
