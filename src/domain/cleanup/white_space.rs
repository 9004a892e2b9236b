use crate::domain::syntax::{SyntaxTree, Trivia, TriviaKind};

/// Drops whitespace that sits alone on a line, so that blank lines become
/// adjacent end-of-line trivia for `new_line` to collapse.
pub fn white_space(tree: &SyntaxTree) -> SyntaxTree {
    tree.map_tokens(|token| {
        let mut green = token.to_green();
        green.leading = strip_blank_lines(green.leading, true);
        green.trailing = strip_blank_lines(green.trailing, false);
        green
    })
}

/// Leading lists always start at the beginning of a line, because trailing
/// trivia runs up to the first line end.
fn strip_blank_lines(trivia: Vec<Trivia>, starts_line: bool) -> Vec<Trivia> {
    let mut out: Vec<Trivia> = Vec::with_capacity(trivia.len());
    let mut iter = trivia.into_iter().peekable();
    while let Some(t) = iter.next() {
        let after_line_end = match out.last() {
            Some(prev) => prev.kind == TriviaKind::EndOfLine,
            None => starts_line,
        };
        let between_line_ends = t.kind == TriviaKind::Whitespace
            && after_line_end
            && iter.peek().is_some_and(|n| n.kind == TriviaKind::EndOfLine);
        if !between_line_ends {
            out.push(t);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::csharp::parser::parse_compilation_unit;

    #[test]
    fn whitespace_only_lines_lose_their_indentation() {
        let src = "class A {\n    \n    \n  int x;\n}";
        let tree = parse_compilation_unit(src, &[]);
        assert_eq!(white_space(&tree).text(), "class A {\n\n\n  int x;\n}");
    }

    #[test]
    fn indentation_before_code_is_kept() {
        let src = "class A {\n  int x;\n}";
        let tree = parse_compilation_unit(src, &[]);
        assert_eq!(white_space(&tree).text(), src);
    }
}
