//! Text-in, text-out conversion.

use serde::Deserialize;
use tracing::{debug, warn};

use crate::domain::cleanup;
use crate::domain::converting::{ConvertError, IdentifierMap, NodeVisitor, ParseFailure};
use crate::domain::syntax::SyntaxTree;
use crate::domain::vb::{
    render_compilation_unit, render_expression, render_statement, render_statements, render_type, Node,
};
use crate::infrastructure::csharp::CSharpParser;
use crate::ports::SyntaxParser;

/// The `[convert]` table of `sharpcraft.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ConvertOptions {
    pub identifier_map: IdentifierMap,
    /// Multi-line verbatim strings become XML literals.
    pub convert_strings: bool,
    /// Parser diagnostics abort conversion instead of being logged.
    pub strict: bool,
}

pub struct Converter<P: SyntaxParser = CSharpParser> {
    parser: P,
    options: ConvertOptions,
}

impl Converter<CSharpParser> {
    pub fn with_options(options: ConvertOptions) -> Self {
        Converter::new(CSharpParser::new(), options)
    }
}

impl<P: SyntaxParser> Converter<P> {
    pub fn new(parser: P, options: ConvertOptions) -> Self {
        Converter { parser, options }
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Converts an expression, a statement or a whole file, whichever the
    /// text parses as cleanly, trying them in that order.
    pub fn convert(&self, text: &str) -> Result<String, ConvertError> {
        let tree = self.parse(text)?;
        self.convert_tree(&tree)
    }

    /// Converts an already parsed tree.
    pub fn convert_tree(&self, tree: &SyntaxTree) -> Result<String, ConvertError> {
        let tree = cleanup::run_all(tree);
        let map = (!self.options.identifier_map.is_empty()).then_some(&self.options.identifier_map);
        let visitor = NodeVisitor::new(map, self.options.convert_strings);
        let root = tree.root();
        if root.kind().is_statement() {
            let statements = visitor.statements().statement(root)?;
            return Ok(render_statements(&statements));
        }
        Ok(match visitor.visit(root)? {
            Node::Expr(expr) => render_expression(&expr),
            Node::Statement(statement) => render_statement(&statement),
            Node::Type(ty) => render_type(&ty),
            Node::CompilationUnit(unit) => render_compilation_unit(&unit),
        })
    }

    fn parse(&self, text: &str) -> Result<SyntaxTree, ConvertError> {
        let fragments: [fn(&P, &str) -> SyntaxTree; 2] = [P::parse_expression, P::parse_statement];
        for parse in fragments {
            let tree = parse(&self.parser, text);
            if tree.diagnostics().is_empty() && tree.consumed_all() {
                debug!(kind = %tree.root().kind(), "converting fragment");
                return Ok(tree);
            }
        }

        let tree = self.parser.parse_compilation_unit(text);
        if !tree.diagnostics().is_empty() {
            let failure = ParseFailure {
                what: "Parsing".to_string(),
                diagnostics: tree.diagnostics().iter().map(ToString::to_string).collect(),
            };
            if self.options.strict {
                return Err(failure.into());
            }
            warn!(count = failure.diagnostics.len(), "{failure}");
        }
        Ok(tree)
    }
}

/// One-shot conversion with the default parser.
pub fn convert(
    text: &str,
    identifier_map: Option<&IdentifierMap>,
    convert_strings: bool,
) -> Result<String, ConvertError> {
    let options = ConvertOptions {
        identifier_map: identifier_map.cloned().unwrap_or_default(),
        convert_strings,
        strict: false,
    };
    Converter::with_options(options).convert(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn expressions_come_back_as_expressions() {
        assert_eq!(convert("a != null && b", None, false).unwrap(), "a IsNot Nothing AndAlso b");
    }

    #[test]
    fn statements_come_back_as_statements() {
        assert_eq!(
            convert("if (x) y(); else z();", None, false).unwrap(),
            "If x Then\n    y()\nElse\n    z()\nEnd If"
        );
    }

    #[test]
    fn files_come_back_as_files() {
        let vb = convert("using System;\nclass C { }\n", None, false).unwrap();
        assert_eq!(vb, "Imports System\n\nClass C\nEnd Class");
    }

    #[test]
    fn identifier_map_applies_to_every_name() {
        let map = IdentifierMap::from([("Foo".to_string(), "Bar".to_string())]);
        assert_eq!(convert("Foo(Foo.x)", Some(&map), false).unwrap(), "Bar(Bar.x)");
    }

    #[test]
    fn strict_mode_reports_every_diagnostic() {
        let converter = Converter::with_options(ConvertOptions { strict: true, ..Default::default() });
        let err = converter.convert("class C { void M( { } int }").unwrap_err();
        match err {
            ConvertError::Parse(failure) => {
                assert_eq!(failure.what, "Parsing");
                assert!(failure.diagnostics.len() > 1, "{failure}");
                assert!(failure.to_string().starts_with("Parsing failed: "));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn lenient_mode_still_produces_text() {
        assert!(convert("class C { void M( { } }", None, false).is_ok());
    }
}
