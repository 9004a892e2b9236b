//! Tree-to-tree passes run before translation.
//!
//! Each pass only touches trivia or wraps embedded statements in blocks;
//! token kinds and token text come through unchanged.

mod curly;
mod missing_curly;
mod new_line;
mod white_space;

pub use curly::curly;
pub use missing_curly::missing_curly;
pub use new_line::new_line;
pub use white_space::white_space;

use tracing::trace;

use crate::domain::syntax::SyntaxTree;

/// All passes in the order the converter applies them.
pub fn run_all(tree: &SyntaxTree) -> SyntaxTree {
    let tree = missing_curly(tree);
    let tree = white_space(&tree);
    let tree = new_line(&tree);
    let tree = curly(&tree);
    trace!(len = tree.text().len(), "cleanup passes applied");
    tree
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::syntax::SyntaxKind;
    use crate::infrastructure::csharp::parser::parse_compilation_unit;

    #[test]
    fn passes_keep_every_token() {
        let src = "class C {\n  void M() {\n    if (a) b(); else c();\n\n\n  }\n}\n";
        let tree = parse_compilation_unit(src, &[]);
        let cleaned = run_all(&tree);
        let before: Vec<(SyntaxKind, String)> = tree
            .tokens()
            .map(|t| (t.kind(), t.text().to_string()))
            .collect();
        let after: Vec<(SyntaxKind, String)> = cleaned
            .tokens()
            .filter(|t| !matches!(t.kind(), SyntaxKind::OpenBrace | SyntaxKind::CloseBrace))
            .map(|t| (t.kind(), t.text().to_string()))
            .collect();
        let expected: Vec<(SyntaxKind, String)> = before
            .into_iter()
            .filter(|(k, _)| !matches!(k, SyntaxKind::OpenBrace | SyntaxKind::CloseBrace))
            .collect();
        assert_eq!(after, expected);
    }
}
