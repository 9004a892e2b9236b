//! Hand-written C# front end: lexer plus recursive-descent parser producing
//! full-fidelity `SyntaxTree`s.

mod declarations;
mod expressions;
pub mod lexer;
pub mod parser;
mod statements;

use crate::domain::syntax::SyntaxTree;
use crate::ports::SyntaxParser;

/// Parser adapter with a fixed set of conditional-compilation symbols.
#[derive(Debug, Clone, Default)]
pub struct CSharpParser {
    preprocessor_symbols: Vec<String>,
}

impl CSharpParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_symbols<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            preprocessor_symbols: symbols.into_iter().map(Into::into).collect(),
        }
    }

    pub fn symbols(&self) -> &[String] {
        &self.preprocessor_symbols
    }
}

impl SyntaxParser for CSharpParser {
    fn parse_compilation_unit(&self, text: &str) -> SyntaxTree {
        parser::parse_compilation_unit(text, &self.preprocessor_symbols)
    }

    fn parse_expression(&self, text: &str) -> SyntaxTree {
        parser::parse_expression(text, &self.preprocessor_symbols)
    }

    fn parse_statement(&self, text: &str) -> SyntaxTree {
        parser::parse_statement(text, &self.preprocessor_symbols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::syntax::SyntaxKind;

    #[test]
    fn symbols_reach_the_lexer() {
        let source = "#if DEBUG\nclass A {}\n#else\nclass B {}\n#endif\n";
        let debug = CSharpParser::with_symbols(["DEBUG"]).parse_compilation_unit(source);
        let release = CSharpParser::new().parse_compilation_unit(source);

        let name = |tree: &SyntaxTree| {
            tree.root()
                .child_node(SyntaxKind::ClassDeclaration)
                .and_then(|c| c.token(SyntaxKind::Identifier))
                .map(|t| t.text().to_string())
        };
        assert_eq!(name(&debug).as_deref(), Some("A"));
        assert_eq!(name(&release).as_deref(), Some("B"));
    }

    #[test]
    fn fragments_report_whether_input_was_consumed() {
        let parser = CSharpParser::new();
        assert!(parser.parse_expression("a + b").consumed_all());
        assert!(!parser.parse_expression("a + b; c").consumed_all());
        assert!(parser.parse_statement("return x;").consumed_all());
    }
}
