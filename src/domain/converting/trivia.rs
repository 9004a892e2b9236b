use crate::domain::syntax::{self, SyntaxKind, SyntaxNode, SyntaxToken, TriviaKind};
use crate::domain::vb::{Statement, Trivia};

use super::{placeholder_text, TargetConstruct};

/// Comments, directives and disabled text before `node`.
pub(super) fn leading(node: SyntaxNode<'_>) -> Vec<Trivia> {
    convert(node.leading_trivia())
}

/// Comments after `node` on its last line.
pub(super) fn trailing(node: SyntaxNode<'_>) -> Vec<Trivia> {
    convert(node.trailing_trivia())
}

/// Comments between the tokens a compound statement owns directly, such as
/// one after `if (a)` or before `else`. The statement's outer trivia is left
/// to `leading` and `trailing`.
pub(super) fn header(node: SyntaxNode<'_>) -> Vec<Trivia> {
    let first = node.first_token().map(|t| t.id());
    let last = node.last_token().map(|t| t.id());
    let mut list = Vec::new();
    for token in node.child_tokens() {
        if Some(token.id()) != first {
            list.extend_from_slice(token.leading());
        }
        if Some(token.id()) != last {
            list.extend_from_slice(token.trailing());
        }
    }
    convert(&list)
}

/// Comments on the line of an opening brace.
pub(super) fn after_open(node: SyntaxNode<'_>) -> Option<Statement> {
    let open = node.token(SyntaxKind::OpenBrace)?;
    let trivia = convert(open.trailing());
    (!trivia.is_empty()).then(|| Statement::empty().with_leading(trivia))
}

pub(super) fn token_leading(token: SyntaxToken<'_>) -> Vec<Trivia> {
    convert(token.leading())
}

/// Comments written just before the closing brace of `node`, kept as an
/// empty statement at the end of the translated body.
pub(super) fn before_close(node: SyntaxNode<'_>) -> Option<Statement> {
    let close = node.token(SyntaxKind::CloseBrace)?;
    let trivia = token_leading(close);
    (!trivia.is_empty()).then(|| Statement::empty().with_leading(trivia))
}

pub(super) fn convert(list: &[syntax::Trivia]) -> Vec<Trivia> {
    let mut out = Vec::new();
    for t in list {
        match t.kind {
            TriviaKind::Whitespace | TriviaKind::EndOfLine => {}
            TriviaKind::SingleLineComment => {
                let body = t.text.strip_prefix("//").unwrap_or(&t.text);
                out.push(Trivia::Comment(format!("'{}", body.trim_end())));
            }
            TriviaKind::DocumentationComment => {
                let body = t.text.trim_start().strip_prefix("///").unwrap_or(&t.text);
                out.push(Trivia::Comment(format!("'''{}", body.trim_end())));
            }
            TriviaKind::MultiLineComment => {
                let body = t.text.strip_prefix("/*").unwrap_or(&t.text);
                let body = body.strip_suffix("*/").unwrap_or(body);
                for line in body.lines() {
                    out.push(Trivia::Comment(format!("'{}", line.trim_end())));
                }
            }
            TriviaKind::Directive => out.push(directive(&t.text)),
            TriviaKind::DisabledText => out.push(Trivia::Disabled(t.text.clone())),
            TriviaKind::SkippedTokens => out.push(Trivia::Comment(format!(
                "' {}",
                placeholder_text(&t.text, TargetConstruct::Node)
            ))),
        }
    }
    out
}

/// Maps one preprocessor line. Directives without a VB counterpart become a
/// comment.
fn directive(text: &str) -> Trivia {
    let body = text.trim_start().trim_start_matches('#').trim_start();
    let name_len = body
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(body.len());
    let (name, rest) = body.split_at(name_len);
    let argument = strip_line_comment(rest).trim();
    match name {
        "region" => Trivia::Directive(format!("#Region \"{}\"", argument.replace('"', "\"\""))),
        "endregion" => Trivia::Directive("#End Region".to_string()),
        "if" => Trivia::Directive(format!("#If {} Then", condition(argument))),
        "elif" => Trivia::Directive(format!("#ElseIf {} Then", condition(argument))),
        "else" => Trivia::Directive("#Else".to_string()),
        "endif" => Trivia::Directive("#End If".to_string()),
        _ => Trivia::Comment(format!(
            "' {}",
            placeholder_text(text, TargetConstruct::Statement)
        )),
    }
}

fn strip_line_comment(text: &str) -> &str {
    match text.find("//") {
        Some(at) => &text[..at],
        None => text,
    }
}

/// Rewrites a `#if` expression with VB operators.
fn condition(expr: &str) -> String {
    let mut out = String::with_capacity(expr.len());
    let mut chars = expr.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '&' if chars.peek() == Some(&'&') => {
                chars.next();
                out.push_str(" AndAlso ");
            }
            '|' if chars.peek() == Some(&'|') => {
                chars.next();
                out.push_str(" OrElse ");
            }
            '=' if chars.peek() == Some(&'=') => {
                chars.next();
                out.push_str(" = ");
            }
            '!' if chars.peek() == Some(&'=') => {
                chars.next();
                out.push_str(" <> ");
            }
            '!' => out.push_str("Not "),
            c if c.is_alphanumeric() || c == '_' => {
                let mut word = String::from(c);
                while let Some(&n) = chars.peek() {
                    if !(n.is_alphanumeric() || n == '_') {
                        break;
                    }
                    word.push(n);
                    chars.next();
                }
                match word.as_str() {
                    "true" => out.push_str("True"),
                    "false" => out.push_str("False"),
                    _ => out.push_str(&word),
                }
            }
            c => out.push(c),
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::syntax::Trivia as CsTrivia;
    use rstest::rstest;

    #[rstest]
    #[case("#region Helpers", Trivia::Directive("#Region \"Helpers\"".into()))]
    #[case("  #endregion", Trivia::Directive("#End Region".into()))]
    #[case("#if DEBUG && !TRACE", Trivia::Directive("#If DEBUG AndAlso Not TRACE Then".into()))]
    #[case("#elif (A || B) // note", Trivia::Directive("#ElseIf (A OrElse B) Then".into()))]
    #[case("#endif", Trivia::Directive("#End If".into()))]
    #[case(
        "#pragma warning disable 168",
        Trivia::Comment("' '#pragma warning disable 168' could not be converted to a StatementSyntax".into())
    )]
    fn directives(#[case] line: &str, #[case] expected: Trivia) {
        assert_eq!(directive(line), expected);
    }

    #[test]
    fn comments_change_marker() {
        let list = vec![
            CsTrivia::new(TriviaKind::DocumentationComment, "/// <summary>Hi</summary>"),
            CsTrivia::end_of_line(),
            CsTrivia::new(TriviaKind::SingleLineComment, "// plain"),
            CsTrivia::end_of_line(),
            CsTrivia::new(TriviaKind::MultiLineComment, "/* one\n   two */"),
        ];
        assert_eq!(
            convert(&list),
            vec![
                Trivia::Comment("''' <summary>Hi</summary>".into()),
                Trivia::Comment("' plain".into()),
                Trivia::Comment("' one".into()),
                Trivia::Comment("'   two".into()),
            ]
        );
    }
}
