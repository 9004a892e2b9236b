//! `for` loops. A loop that counts one variable up or down to a bound is
//! written as `For ... To ... Step`; anything else becomes the declaration
//! followed by a `While` whose body ends with the incrementors. A `continue`
//! in such a loop runs the incrementors before `Continue While`.

use crate::domain::syntax::{SyntaxElement, SyntaxKind, SyntaxNode};
use crate::domain::vb::{Expr, Statement, StatementKind, UnaryOp};

use super::expressions::{minus_one, plus_one};
use super::node_visitor::{child, is_var, Result};
use super::statement_visitor::StatementVisitor;
use super::{placeholder_statement, ConvertError, TargetConstruct};

#[derive(Debug, Default)]
struct ForParts<'a> {
    declaration: Option<SyntaxNode<'a>>,
    initializers: Vec<SyntaxNode<'a>>,
    condition: Option<SyntaxNode<'a>>,
    incrementors: Vec<SyntaxNode<'a>>,
    body: Option<SyntaxNode<'a>>,
}

fn parts(node: SyntaxNode<'_>) -> ForParts<'_> {
    let mut parts = ForParts::default();
    let mut semicolons = 0;
    let mut closed = false;
    for element in node.children() {
        match element {
            SyntaxElement::Token(t) if t.kind() == SyntaxKind::Semicolon => semicolons += 1,
            SyntaxElement::Token(t) if t.kind() == SyntaxKind::CloseParen => closed = true,
            SyntaxElement::Token(_) => {}
            SyntaxElement::Node(n) if closed => parts.body = Some(n),
            SyntaxElement::Node(n) => match semicolons {
                0 if n.kind() == SyntaxKind::VariableDeclaration => parts.declaration = Some(n),
                0 => parts.initializers.push(n),
                1 => parts.condition = Some(n),
                _ => parts.incrementors.push(n),
            },
        }
    }
    parts
}

/// The pieces of a loop that fits `For i = a To b Step s`.
#[derive(Debug, Clone, Copy)]
pub struct SimpleFor<'a> {
    pub variable: &'a str,
    pub initial: SyntaxNode<'a>,
    pub condition: SyntaxNode<'a>,
    pub incrementor: SyntaxNode<'a>,
}

/// Recognises `for (T i = a; i < b; i++)` where `T` is `var` or a
/// predefined type, the comparison is one of `< <= > >=` with the variable
/// on the left, and the single incrementor is `++`, `--`, `+=` or `-=` on
/// the variable.
pub fn classify(node: SyntaxNode<'_>) -> Option<SimpleFor<'_>> {
    let parts = parts(node);
    let declaration = parts.declaration?;
    let ty = declaration.nth_child_node(0)?;
    if !(is_var(ty) || ty.kind() == SyntaxKind::PredefinedType) {
        return None;
    }
    let mut declarators = declaration.child_nodes_of(SyntaxKind::VariableDeclarator);
    let declarator = declarators.next()?;
    if declarators.next().is_some() {
        return None;
    }
    let variable = declarator.token(SyntaxKind::Identifier)?.text();
    let initial = declarator.child_node(SyntaxKind::EqualsValueClause)?.nth_child_node(0)?;

    let condition = parts.condition?;
    let compares = matches!(
        condition.kind(),
        SyntaxKind::LessThanExpression
            | SyntaxKind::LessThanOrEqualExpression
            | SyntaxKind::GreaterThanExpression
            | SyntaxKind::GreaterThanOrEqualExpression
    );
    if !compares || !names(condition.nth_child_node(0)?, variable) {
        return None;
    }

    let [incrementor] = parts.incrementors[..] else {
        return None;
    };
    let counts = matches!(
        incrementor.kind(),
        SyntaxKind::PreIncrementExpression
            | SyntaxKind::PreDecrementExpression
            | SyntaxKind::PostIncrementExpression
            | SyntaxKind::PostDecrementExpression
            | SyntaxKind::AddAssignmentExpression
            | SyntaxKind::SubtractAssignmentExpression
    );
    if !counts || !names(incrementor.nth_child_node(0)?, variable) {
        return None;
    }
    Some(SimpleFor { variable, initial, condition, incrementor })
}

fn names(node: SyntaxNode<'_>, variable: &str) -> bool {
    node.kind() == SyntaxKind::IdentifierName && node.text().trim_start_matches('@') == variable.trim_start_matches('@')
}

pub fn lower(visitor: &StatementVisitor<'_, '_>, node: SyntaxNode<'_>) -> Result<Vec<Statement>> {
    match classify(node) {
        Some(simple) => Ok(vec![counted(visitor, node, simple)?]),
        None => lowered(visitor, node),
    }
}

fn counted(visitor: &StatementVisitor<'_, '_>, node: SyntaxNode<'_>, simple: SimpleFor<'_>) -> Result<Statement> {
    let nodes = visitor.nodes();
    let bound = nodes.expression(child(simple.condition, 1)?)?;
    // VB bounds are inclusive.
    let to = match simple.condition.kind() {
        SyntaxKind::LessThanExpression => minus_one(bound),
        SyntaxKind::GreaterThanExpression => plus_one(bound),
        _ => bound,
    };
    let step = match simple.incrementor.kind() {
        SyntaxKind::PreIncrementExpression | SyntaxKind::PostIncrementExpression => None,
        SyntaxKind::PreDecrementExpression | SyntaxKind::PostDecrementExpression => Some(Expr::int(-1)),
        SyntaxKind::AddAssignmentExpression => Some(nodes.expression(child(simple.incrementor, 1)?)?),
        _ => Some(negate(nodes.expression(child(simple.incrementor, 1)?)?)),
    };
    let body = match parts(node).body {
        Some(body) => visitor.body(body)?,
        None => Vec::new(),
    };
    Ok(Statement::new(StatementKind::For {
        variable: nodes.identifier(simple.variable),
        from: nodes.expression(simple.initial)?,
        to,
        step,
        body,
    }))
}

fn negate(expr: Expr) -> Expr {
    match expr {
        Expr::Literal(text) => match text.parse::<i64>() {
            Ok(n) => Expr::int(-n),
            Err(_) => Expr::Unary { op: UnaryOp::Negate, operand: Box::new(Expr::Literal(text)) },
        },
        Expr::Unary { op: UnaryOp::Negate, operand } => *operand,
        Expr::Paren(inner) if matches!(*inner, Expr::Unary { op: UnaryOp::Negate, .. }) => negate(*inner),
        other => Expr::Unary { op: UnaryOp::Negate, operand: Box::new(other) },
    }
}

/// `init; While cond; body; incrementors; End While`.
fn lowered(visitor: &StatementVisitor<'_, '_>, node: SyntaxNode<'_>) -> Result<Vec<Statement>> {
    let nodes = visitor.nodes();
    let parts = parts(node);
    let mut out = Vec::new();
    if let Some(declaration) = parts.declaration {
        out.push(Statement::new(StatementKind::Declare {
            attributes: Vec::new(),
            modifiers: vec!["Dim".to_string()],
            declarators: nodes.variable_declarators(declaration)?,
        }));
    }
    for init in &parts.initializers {
        out.push(expression_statement(visitor, *init)?);
    }
    let condition = match parts.condition {
        Some(condition) => nodes.expression(condition)?,
        None => Expr::Literal("True".to_string()),
    };
    let mut body = match parts.body {
        Some(body) => visitor.body(body)?,
        None => return Err(ConvertError::unmapped(node.kind(), "for without body")),
    };
    body.extend(incrementors(visitor, node)?);
    out.push(Statement::new(StatementKind::While { condition, body }));
    Ok(out)
}

/// The incrementors of a loop that [`lower`] writes as `While`, as the
/// statements appended to its body. Empty for a counted loop.
pub fn incrementors(visitor: &StatementVisitor<'_, '_>, node: SyntaxNode<'_>) -> Result<Vec<Statement>> {
    if classify(node).is_some() {
        return Ok(Vec::new());
    }
    parts(node)
        .incrementors
        .into_iter()
        .map(|incrementor| expression_statement(visitor, incrementor))
        .collect()
}

fn expression_statement(visitor: &StatementVisitor<'_, '_>, expr: SyntaxNode<'_>) -> Result<Statement> {
    Ok(visitor
        .nodes()
        .statement_shaped(expr)?
        .unwrap_or_else(|| placeholder_statement(expr.text(), TargetConstruct::Statement)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::converting::NodeVisitor;
    use crate::domain::vb::render_statements;
    use crate::infrastructure::csharp::parser::parse_statement;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn convert(src: &str) -> String {
        let tree = parse_statement(src, &[]);
        assert!(tree.diagnostics().is_empty(), "{:?}", tree.diagnostics());
        let visitor = NodeVisitor::default();
        let statements = visitor.statements().statement(tree.root()).expect("translates");
        render_statements(&statements)
    }

    #[rstest]
    #[case("for (int i = 0; i < 10; i++) f(i);", "For i = 0 To 9\n    f(i)\nNext")]
    #[case("for (var i = 0; i <= n; ++i) { f(i); }", "For i = 0 To n\n    f(i)\nNext")]
    #[case("for (int i = 0; i < n; i++) { }", "For i = 0 To n - 1\nNext")]
    #[case("for (int i = 10; i > 0; i--) { f(i); }", "For i = 10 To 1 Step -1\n    f(i)\nNext")]
    #[case("for (int i = 10; i >= 0; i -= 2) { f(i); }", "For i = 10 To 0 Step -2\n    f(i)\nNext")]
    #[case("for (int i = 0; i < 10; i += step) { }", "For i = 0 To 9 Step step\nNext")]
    #[case("for (var i = 10; i > 0; i -= 2) { f(i); }", "For i = 10 To 1 Step -2\n    f(i)\nNext")]
    #[case("for (int i = 0; i < 10; i -= -1) { }", "For i = 0 To 9 Step 1\nNext")]
    #[case("for (int i = 0; i < 10; i -= (-3)) { }", "For i = 0 To 9 Step 3\nNext")]
    #[case("for (int i = 9; i >= 0; i -= n) { }", "For i = 9 To 0 Step -n\nNext")]
    fn counted_loops(#[case] src: &str, #[case] expected: &str) {
        assert_eq!(convert(src), expected);
    }

    #[test]
    fn endless_loop_becomes_while_true() {
        assert_eq!(convert("for (;;) { Tick(); }"), "While True\n    Tick()\nEnd While");
    }

    #[test]
    fn other_loops_are_lowered_to_while() {
        assert_eq!(
            convert("for (int i = 0, j = 9; i < j; i++, j--) { if (a[i] == 0) break; }"),
            "Dim i As Integer = 0, j As Integer = 9\nWhile i < j\n    If a(i) = 0 Then\n        Exit While\n    End If\n    i = i + 1\n    j = j - 1\nEnd While"
        );
    }

    #[test]
    fn call_in_incrementor_is_lowered() {
        assert_eq!(
            convert("for (int i = 0; i < 10; i = Foo(i)) { f(i); }"),
            "Dim i As Integer = 0\nWhile i < 10\n    f(i)\n    i = Foo(i)\nEnd While"
        );
    }

    #[test]
    fn continue_in_lowered_loop_steps_first() {
        assert_eq!(
            convert("for (int i = 0, j = 9; i < j; i++, j--) { if (a[i] == 0) continue; f(i); }"),
            "Dim i As Integer = 0, j As Integer = 9\nWhile i < j\n    If a(i) = 0 Then\n        i = i + 1\n        j = j - 1\n        Continue While\n    End If\n    f(i)\n    i = i + 1\n    j = j - 1\nEnd While"
        );
    }

    #[test]
    fn continue_in_counted_loop_is_plain() {
        assert_eq!(
            convert("for (int i = 0; i < 10; i++) { if (a[i] == 0) continue; f(i); }"),
            "For i = 0 To 9\n    If a(i) = 0 Then\n        Continue For\n    End If\n    f(i)\nNext"
        );
    }

    #[test]
    fn condition_on_another_variable_is_not_counted() {
        let tree = parse_statement("for (int i = 0; n > i; i++) { }", &[]);
        assert!(classify(tree.root()).is_none());
        let tree = parse_statement("for (int i = 0; i < n; i++) { }", &[]);
        assert_eq!(classify(tree.root()).map(|s| s.variable), Some("i"));
    }
}
