use crate::domain::syntax::{SyntaxKind, SyntaxNode, SyntaxTree};

use super::{collapse_whitespace, owning_type, ComplexityRecord, ScanError};

/// Statements that add a path through a method.
pub fn is_decision_point(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::IfStatement
            | SyntaxKind::SwitchStatement
            | SyntaxKind::DoStatement
            | SyntaxKind::WhileStatement
            | SyntaxKind::ForStatement
            | SyntaxKind::ForEachStatement
            | SyntaxKind::UsingStatement
    )
}

fn is_method(kind: SyntaxKind) -> bool {
    matches!(kind, SyntaxKind::MethodDeclaration | SyntaxKind::ConstructorDeclaration)
}

pub fn decision_points(method: SyntaxNode<'_>) -> usize {
    method.descendants().filter(|n| is_decision_point(n.kind())).count()
}

/// Methods of `tree` with more than `max_complexity` decision points.
pub fn complexity(
    tree: &SyntaxTree,
    file_path: &str,
    max_complexity: usize,
) -> Result<Vec<ComplexityRecord>, ScanError> {
    let mut records = Vec::new();
    for method in tree.root().descendants().filter(|n| is_method(n.kind())) {
        let points = decision_points(method);
        if points <= max_complexity {
            continue;
        }
        let name = method
            .token(SyntaxKind::Identifier)
            .map(|t| t.text().to_string())
            .unwrap_or_default();
        records.push(ComplexityRecord {
            type_identifier: owning_type(method, file_path)?,
            method_identifier: name,
            sources_sample: signature(method),
            n_statement_syntax: points + 1,
            file_path: file_path.to_string(),
            source_line: method.start_line(),
        });
    }
    Ok(records)
}

/// Declaration text up to the body.
fn signature(method: SyntaxNode<'_>) -> String {
    let text = method.text();
    let end = method
        .child_node(SyntaxKind::Block)
        .map(|body| body.span().start - method.span().start)
        .unwrap_or(text.len());
    collapse_whitespace(&text[..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::csharp::parser::parse_compilation_unit;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn method_with(points: usize) -> String {
        let body: String = (0..points).map(|i| format!("if (x == {i}) {{ }}\n")).collect();
        format!("class C {{\n    public int M(int x)\n    {{\n{body}return 0;\n    }}\n}}\n")
    }

    #[rstest]
    #[case(0)]
    #[case(3)]
    #[case(10)]
    fn threshold_is_exclusive(#[case] max: usize) {
        let over = parse_compilation_unit(&method_with(max + 1), &[]);
        let at = parse_compilation_unit(&method_with(max), &[]);
        assert_eq!(complexity(&over, "C.cs", max).unwrap().len(), 1);
        assert!(complexity(&at, "C.cs", max).unwrap().is_empty());
    }

    #[test]
    fn every_decision_statement_counts_once() {
        let src = r#"
namespace N
{
    public class Worker
    {
        public void Run(string[] items)
        {
            if (items == null) return;
            switch (items.Length) { case 0: break; }
            do { } while (false);
            while (true) { break; }
            for (int i = 0; i < 3; i++) { }
            foreach (var item in items) { using (Open(item)) { } }
            try { } catch { }
        }
    }
}
"#;
        let tree = parse_compilation_unit(src, &[]);
        let records = complexity(&tree, "N/Worker.cs", 0).unwrap();
        assert_eq!(
            records,
            vec![ComplexityRecord {
                type_identifier: "Worker".into(),
                method_identifier: "Run".into(),
                sources_sample: "public void Run(string[] items)".into(),
                n_statement_syntax: 8,
                file_path: "N/Worker.cs".into(),
                source_line: 5,
            }]
        );
    }

    #[test]
    fn constructors_are_scored_too() {
        let tree = parse_compilation_unit("class K { K(bool a) { if (a) { } } }", &[]);
        let records = complexity(&tree, "K.cs", 0).unwrap();
        assert_eq!(records[0].method_identifier, "K");
        assert_eq!(records[0].n_statement_syntax, 2);
    }
}
