use crate::domain::syntax::{SyntaxTree, Trivia, TriviaKind};

/// Collapses runs of end-of-line trivia within a token's leading or
/// trailing list, repeating until nothing changes.
pub fn new_line(tree: &SyntaxTree) -> SyntaxTree {
    tree.map_tokens(|token| {
        let mut green = token.to_green();
        if !green.missing {
            green.leading = collapse(green.leading);
            green.trailing = collapse(green.trailing);
        }
        green
    })
}

fn collapse(mut trivia: Vec<Trivia>) -> Vec<Trivia> {
    loop {
        let before = trivia.len();
        let mut out: Vec<Trivia> = Vec::with_capacity(before);
        for t in trivia {
            let repeated = t.kind == TriviaKind::EndOfLine
                && out.last().is_some_and(|p| p.kind == TriviaKind::EndOfLine);
            if !repeated {
                out.push(t);
            }
        }
        trivia = out;
        if trivia.len() == before {
            return trivia;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cleanup::white_space;
    use crate::infrastructure::csharp::parser::parse_compilation_unit;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn blank_line_runs_shrink_to_one() {
        let src = "class A {\n\n\n\n  int x;\n}";
        let tree = parse_compilation_unit(src, &[]);
        assert_eq!(new_line(&tree).text(), "class A {\n\n  int x;\n}");
    }

    #[rstest]
    #[case("class A {\n\n\n\n  int x;\n\n\n}\n\n")]
    #[case("namespace N {\n  \n  \n  // c\n\n\n  class B { }\n}")]
    #[case("class A { int x; }")]
    fn collapse_is_idempotent(#[case] src: &str) {
        let tree = white_space(&parse_compilation_unit(src, &[]));
        let once = new_line(&tree);
        let twice = new_line(&once);
        assert_eq!(twice.text(), once.text());
    }
}
