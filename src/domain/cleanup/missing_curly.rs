use crate::domain::syntax::{GreenElement, GreenNode, GreenToken, SyntaxKind, SyntaxTree, Trivia};

/// Wraps every `if`/`else` body that is not already a block in one.
/// `else if` chains stay as they are.
pub fn missing_curly(tree: &SyntaxTree) -> SyntaxTree {
    tree.rewrite(|node, mut green| {
        let (body_index, keep) = match node.kind() {
            SyntaxKind::IfStatement => (1, SyntaxKind::Block),
            SyntaxKind::ElseClause => (0, SyntaxKind::IfStatement),
            _ => return green,
        };
        let position = green
            .children
            .iter()
            .enumerate()
            .filter(|(_, c)| matches!(c, GreenElement::Node(_)))
            .nth(body_index)
            .map(|(i, _)| i);
        if let Some(i) = position {
            let kind = green.children[i].kind();
            if kind != SyntaxKind::Block && kind != keep {
                let body = std::mem::replace(
                    &mut green.children[i],
                    GreenElement::Token(GreenToken::missing(SyntaxKind::Semicolon)),
                );
                green.children[i] = GreenElement::Node(wrap_in_block(body));
            }
        }
        green
    })
}

fn wrap_in_block(statement: GreenElement) -> GreenNode {
    let mut open = GreenToken::new(SyntaxKind::OpenBrace, "{");
    open.trailing.push(Trivia::end_of_line());
    let mut close = GreenToken::new(SyntaxKind::CloseBrace, "}");
    close.trailing.push(Trivia::end_of_line());
    GreenNode::new(SyntaxKind::Block, vec![open.into(), statement, close.into()])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::csharp::parser::parse_statement;
    use rstest::rstest;

    fn bodies_are_blocks(tree: &SyntaxTree) -> bool {
        tree.root()
            .descendants()
            .chain(std::iter::once(tree.root()))
            .all(|n| match n.kind() {
                SyntaxKind::IfStatement => {
                    n.nth_child_node(1).is_some_and(|b| b.kind() == SyntaxKind::Block)
                }
                SyntaxKind::ElseClause => n.nth_child_node(0).is_some_and(|b| {
                    matches!(b.kind(), SyntaxKind::Block | SyntaxKind::IfStatement)
                }),
                _ => true,
            })
    }

    #[rstest]
    #[case("if (a) b();")]
    #[case("if (a) b(); else c();")]
    #[case("if (a) if (b) c(); else d(); else e();")]
    #[case("if (a) { b(); } else if (c) d(); else { e(); }")]
    #[case("while (x) if (a) for (;;) if (b) c();")]
    fn every_if_body_becomes_a_block(#[case] src: &str) {
        let tree = parse_statement(src, &[]);
        let wrapped = missing_curly(&tree);
        assert!(bodies_are_blocks(&wrapped), "{}", wrapped.text());
    }

    #[test]
    fn existing_blocks_are_left_alone() {
        let src = "if (a) { b(); } else { c(); }";
        let tree = parse_statement(src, &[]);
        assert_eq!(missing_curly(&tree).text(), src);
    }

    #[test]
    fn wrapped_statement_keeps_its_text() {
        let tree = parse_statement("if (a) b();", &[]);
        let wrapped = missing_curly(&tree);
        assert_eq!(wrapped.text(), "if (a) {\nb();}\n");
    }
}
