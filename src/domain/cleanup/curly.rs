use crate::domain::syntax::{SyntaxKind, SyntaxToken, SyntaxTree, Trivia, TriviaKind};

/// Spaces out closing braces that end their line: the next token starts one
/// line below when it is another `}` and two lines below otherwise.
/// A `}` that shares its line with the next token (`} else {`, `});`) is
/// left alone.
pub fn curly(tree: &SyntaxTree) -> SyntaxTree {
    tree.map_tokens(|token| {
        let mut green = token.to_green();
        if token.kind() != SyntaxKind::CloseBrace || token.is_missing() {
            return green;
        }
        if !green.trailing.iter().any(|t| t.kind == TriviaKind::EndOfLine) {
            return green;
        }
        let next = match next_present(token) {
            Some(next) if next.kind() != SyntaxKind::EndOfFile => next,
            _ => return green,
        };
        let wanted: usize = if next.kind() == SyntaxKind::CloseBrace { 1 } else { 2 };
        let already = next
            .leading()
            .iter()
            .filter(|t| t.kind == TriviaKind::EndOfLine)
            .count();
        green.trailing.retain(|t| t.kind != TriviaKind::EndOfLine);
        let pad = wanted.saturating_sub(already).max(1);
        green.trailing.extend(std::iter::repeat_with(Trivia::end_of_line).take(pad));
        green
    })
}

fn next_present(token: SyntaxToken<'_>) -> Option<SyntaxToken<'_>> {
    std::iter::successors(token.next_token(), |t| t.next_token()).find(|t| !t.is_missing())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::csharp::parser::parse_compilation_unit;
    use pretty_assertions::assert_eq;

    #[test]
    fn members_after_a_brace_get_a_blank_line() {
        let src = "class A {\n  void M() {\n  }\n  void N() {\n  }\n}\nclass B { }";
        let tree = parse_compilation_unit(src, &[]);
        assert_eq!(
            curly(&tree).text(),
            "class A {\n  void M() {\n  }\n\n  void N() {\n  }\n}\n\nclass B { }"
        );
    }

    #[test]
    fn brace_before_brace_keeps_a_single_line_break() {
        let src = "class A {\n  void M() {\n  }\n}";
        let tree = parse_compilation_unit(src, &[]);
        assert_eq!(curly(&tree).text(), src);
    }

    #[test]
    fn same_line_followers_are_untouched() {
        let src = "class A { void M() { if (a) { } else { } } }";
        let tree = parse_compilation_unit(src, &[]);
        assert_eq!(curly(&tree).text(), src);
    }

    #[test]
    fn running_twice_changes_nothing() {
        let src = "class A {\n  void M() {\n  }\n  int x;\n}\n";
        let tree = parse_compilation_unit(src, &[]);
        let once = curly(&tree);
        assert_eq!(curly(&once).text(), once.text());
    }
}
