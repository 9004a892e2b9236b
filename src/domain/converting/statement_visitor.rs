//! Statement translation. One C# statement may become several VB
//! statements (a lowered `for`, a labeled statement) or none at all (a
//! `break` closing a `case`).

use crate::domain::syntax::{SyntaxKind, SyntaxNode};
use crate::domain::vb::{
    CaseBlock, CatchBlock, Expr, Ident, LoopKind, Statement, StatementKind, UsingResource,
};

use super::for_statement;
use super::node_visitor::{child, NodeVisitor, Result};
use super::{placeholder_statement, trivia, ConvertError, TargetConstruct};

pub struct StatementVisitor<'v, 'm> {
    nodes: &'v NodeVisitor<'m>,
}

impl<'v, 'm> StatementVisitor<'v, 'm> {
    pub fn new(nodes: &'v NodeVisitor<'m>) -> Self {
        StatementVisitor { nodes }
    }

    pub fn nodes(&self) -> &NodeVisitor<'m> {
        self.nodes
    }

    /// Translates one statement, carrying its comments onto the first and
    /// last statements produced.
    pub fn statement(&self, node: SyntaxNode<'_>) -> Result<Vec<Statement>> {
        let mut out = self.translate(node)?;
        let mut leading = trivia::leading(node);
        if node.kind() != SyntaxKind::Block {
            leading.extend(trivia::header(node));
        }
        let trailing = trivia::trailing(node);
        if out.is_empty() && (!leading.is_empty() || !trailing.is_empty()) {
            out.push(Statement::empty());
        }
        if let Some(first) = out.first_mut() {
            *first = std::mem::replace(first, Statement::empty()).with_leading(leading);
        }
        if let Some(last) = out.last_mut() {
            *last = std::mem::replace(last, Statement::empty()).with_trailing(trailing);
        }
        Ok(out)
    }

    /// Statements of a block. The block's own braces are dropped; comments
    /// before the closing brace survive as a trailing empty statement.
    pub fn block(&self, node: SyntaxNode<'_>) -> Result<Vec<Statement>> {
        let mut out: Vec<Statement> = trivia::after_open(node).into_iter().collect();
        for statement in node.child_nodes() {
            out.extend(self.statement(statement)?);
        }
        out.extend(trivia::before_close(node));
        Ok(out)
    }

    /// An embedded statement used as a body: a block is flattened.
    pub fn body(&self, node: SyntaxNode<'_>) -> Result<Vec<Statement>> {
        match node.kind() {
            SyntaxKind::Block => self.block(node),
            _ => self.statement(node),
        }
    }

    fn translate(&self, node: SyntaxNode<'_>) -> Result<Vec<Statement>> {
        use SyntaxKind as K;
        let nodes = self.nodes;
        let single = |kind: StatementKind| Ok(vec![Statement::new(kind)]);
        match node.kind() {
            K::Block => self.block(node),
            K::LocalDeclarationStatement => {
                let declaration = node
                    .child_node(K::VariableDeclaration)
                    .ok_or_else(|| ConvertError::unmapped(node.kind(), "local declaration"))?;
                let keyword = if node.has_token(K::ConstKw) { "Const" } else { "Dim" };
                single(StatementKind::Declare {
                    attributes: Vec::new(),
                    modifiers: vec![keyword.to_string()],
                    declarators: nodes.variable_declarators(declaration)?,
                })
            }
            K::ExpressionStatement => {
                let expr = child(node, 0)?;
                match nodes.statement_shaped(expr)? {
                    Some(statement) => Ok(vec![statement]),
                    None => Ok(vec![placeholder_statement(node.text(), TargetConstruct::Statement)]),
                }
            }
            K::EmptyStatement => single(StatementKind::Empty),
            K::LabeledStatement => {
                let label = node
                    .first_token()
                    .map(|t| nodes.identifier_token(t))
                    .ok_or_else(|| ConvertError::unmapped(node.kind(), "label"))?;
                let mut out = vec![Statement::new(StatementKind::Label(label))];
                out.extend(self.statement(child(node, 0)?)?);
                Ok(out)
            }
            K::GotoStatement => {
                let label = child(node, 0)?
                    .first_token()
                    .map(|t| nodes.identifier_token(t))
                    .ok_or_else(|| ConvertError::unmapped(node.kind(), "goto label"))?;
                single(StatementKind::GoTo(label))
            }
            K::GotoCaseStatement => single(StatementKind::GoTo(Ident::verbatim(child(node, 0)?.text()))),
            K::GotoDefaultStatement => single(StatementKind::GoTo(Ident::verbatim("Else"))),
            K::BreakStatement => Ok(self.break_statement(node)),
            K::ContinueStatement => self.continue_statement(node),
            K::ReturnStatement | K::YieldReturnStatement => {
                single(StatementKind::Return(self.optional_expression(node)?))
            }
            K::YieldBreakStatement => single(StatementKind::Return(None)),
            K::ThrowStatement => single(StatementKind::Throw(self.optional_expression(node)?)),
            K::WhileStatement => single(StatementKind::While {
                condition: nodes.expression(child(node, 0)?)?,
                body: self.body(child(node, 1)?)?,
            }),
            K::DoStatement => single(StatementKind::DoLoopWhile {
                body: self.body(child(node, 0)?)?,
                condition: nodes.expression(child(node, 1)?)?,
            }),
            K::ForStatement => for_statement::lower(self, node),
            K::ForEachStatement => {
                let ty = child(node, 0)?;
                let ty = if super::node_visitor::is_var(ty) { None } else { Some(nodes.type_ref(ty)?) };
                single(StatementKind::ForEach {
                    variable: nodes.declared_name(node)?,
                    ty,
                    collection: nodes.expression(child(node, 1)?)?,
                    body: self.body(child(node, 2)?)?,
                })
            }
            K::UsingStatement => {
                let resource = child(node, 0)?;
                let resource = if resource.kind() == K::VariableDeclaration {
                    UsingResource::Variables(nodes.variable_declarators(resource)?)
                } else {
                    UsingResource::Expression(nodes.expression(resource)?)
                };
                single(StatementKind::Using { resource, body: self.body(child(node, 1)?)? })
            }
            K::FixedStatement => self.body(child(node, 1)?),
            K::CheckedStatement | K::UncheckedStatement | K::UnsafeStatement => {
                self.block(child(node, 0)?)
            }
            K::LockStatement => single(StatementKind::SyncLock {
                expr: nodes.expression(child(node, 0)?)?,
                body: self.body(child(node, 1)?)?,
            }),
            K::IfStatement => Ok(vec![self.if_statement(node)?]),
            K::SwitchStatement => Ok(vec![self.switch_statement(node)?]),
            K::TryStatement => Ok(vec![self.try_statement(node)?]),
            other => Err(ConvertError::unmapped(other, "statement")),
        }
    }

    fn optional_expression(&self, node: SyntaxNode<'_>) -> Result<Option<Expr>> {
        match node.nth_child_node(0) {
            Some(expr) => Ok(Some(self.nodes.expression(expr)?)),
            None => Ok(None),
        }
    }

    /// `else if` chains flatten into `ElseIf` arms.
    fn if_statement(&self, node: SyntaxNode<'_>) -> Result<Statement> {
        let condition = self.nodes.expression(child(node, 0)?)?;
        let then = self.body(child(node, 1)?)?;
        let mut else_ifs = Vec::new();
        let mut otherwise = None;
        let mut clause = node.child_node(SyntaxKind::ElseClause);
        while let Some(else_clause) = clause {
            let body = child(else_clause, 0)?;
            if body.kind() == SyntaxKind::IfStatement {
                else_ifs.push((self.nodes.expression(child(body, 0)?)?, self.body(child(body, 1)?)?));
                clause = body.child_node(SyntaxKind::ElseClause);
            } else {
                otherwise = Some(self.body(body)?);
                clause = None;
            }
        }
        Ok(Statement::new(StatementKind::If { condition, then, else_ifs, otherwise }))
    }

    fn switch_statement(&self, node: SyntaxNode<'_>) -> Result<Statement> {
        let expr = self.nodes.expression(child(node, 0)?)?;
        let mut cases = Vec::new();
        for section in node.child_nodes_of(SyntaxKind::SwitchSection) {
            let mut values = Vec::new();
            let mut is_else = false;
            let mut body = Vec::new();
            for item in section.child_nodes() {
                match item.kind() {
                    SyntaxKind::CaseSwitchLabel => values.push(self.nodes.expression(child(item, 0)?)?),
                    SyntaxKind::DefaultSwitchLabel => is_else = true,
                    _ => body.extend(self.statement(item)?),
                }
            }
            if is_else {
                values.clear();
            }
            cases.push(CaseBlock { values, is_else, body });
        }
        Ok(Statement::new(StatementKind::Select { expr, cases }))
    }

    /// A typed catch without a variable gets `ex`, since VB requires a name
    /// before `As`.
    fn try_statement(&self, node: SyntaxNode<'_>) -> Result<Statement> {
        let body = self.block(child(node, 0)?)?;
        let mut catches = Vec::new();
        for clause in node.child_nodes_of(SyntaxKind::CatchClause) {
            let (variable, ty) = match clause.child_node(SyntaxKind::CatchDeclaration) {
                Some(declaration) => {
                    let ty = self.nodes.type_ref(child(declaration, 0)?)?;
                    let variable = match declaration.token(SyntaxKind::Identifier) {
                        Some(id) => self.nodes.identifier_token(id),
                        None => Ident::new("ex"),
                    };
                    (Some(variable), Some(ty))
                }
                None => (None, None),
            };
            let block = clause
                .child_node(SyntaxKind::Block)
                .ok_or_else(|| ConvertError::unmapped(clause.kind(), "catch"))?;
            catches.push(CatchBlock { variable, ty, body: self.block(block)? });
        }
        let finally = match node
            .child_node(SyntaxKind::FinallyClause)
            .and_then(|f| f.child_node(SyntaxKind::Block))
        {
            Some(block) => Some(self.block(block)?),
            None => None,
        };
        Ok(Statement::new(StatementKind::Try { body, catches, finally }))
    }

    /// `break` leaves the nearest loop or switch. The `break` that ends a
    /// switch section has no VB counterpart and disappears.
    fn break_statement(&self, node: SyntaxNode<'_>) -> Vec<Statement> {
        let Some(target) = node.first_ancestor(SyntaxKind::is_breakable) else {
            return vec![placeholder_statement(node.text(), TargetConstruct::Statement)];
        };
        if target.kind() == SyntaxKind::SwitchStatement {
            let ends_section = node.parent().is_some_and(|section| {
                section.kind() == SyntaxKind::SwitchSection && section.child_nodes().last() == Some(node)
            });
            if ends_section {
                return Vec::new();
            }
        }
        vec![Statement::new(StatementKind::Exit(loop_kind(target)))]
    }

    fn continue_statement(&self, node: SyntaxNode<'_>) -> Result<Vec<Statement>> {
        let Some(target) = node.first_ancestor(SyntaxKind::is_continuable) else {
            return Ok(vec![placeholder_statement(node.text(), TargetConstruct::Statement)]);
        };
        let mut out = match target.kind() {
            SyntaxKind::ForStatement => for_statement::incrementors(self, target)?,
            _ => Vec::new(),
        };
        out.push(Statement::new(StatementKind::Continue(loop_kind(target))));
        Ok(out)
    }
}

/// The VB block a `break` or `continue` refers to. A `for` that cannot be
/// written as `For ... To` is lowered to `While`.
fn loop_kind(target: SyntaxNode<'_>) -> LoopKind {
    match target.kind() {
        SyntaxKind::DoStatement => LoopKind::Do,
        SyntaxKind::WhileStatement => LoopKind::While,
        SyntaxKind::SwitchStatement => LoopKind::Select,
        SyntaxKind::ForStatement if for_statement::classify(target).is_none() => LoopKind::While,
        _ => LoopKind::For,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::converting::IdentifierMap;
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
    #[case("x = 1;", "x = 1")]
    #[case("x += 2;", "x += 2")]
    #[case("flags |= other;", "flags = flags OrElse other")]
    #[case("n %= 3;", "n = n Mod 3")]
    #[case("i++;", "i = i + 1")]
    #[case("--i;", "i = i - 1")]
    #[case("Run(a);", "Run(a)")]
    #[case("var x = 1;", "Dim x = 1")]
    #[case("const int x = 1, y = 2;", "Const x As Integer = 1, y As Integer = 2")]
    #[case("return;", "Return")]
    #[case("yield return x;", "Return x")]
    #[case("throw new Exception();", "Throw New Exception()")]
    #[case("goto done;", "GoTo done")]
    #[case("a == b;", "' 'a == b;' could not be converted to a StatementSyntax")]
    fn simple_statements(#[case] src: &str, #[case] expected: &str) {
        assert_eq!(convert(src), expected);
    }

    #[test]
    fn header_comments_are_kept() {
        assert_eq!(
            convert("if (a) // check\n{ // body\n    x();\n}"),
            "' check\nIf a Then\n    ' body\n    x()\nEnd If"
        );
        assert_eq!(
            convert("while (a)\n{\n    x(); // step\n}"),
            "While a\n    x() ' step\nEnd While"
        );
    }

    #[test]
    fn goto_targets_match_their_labels() {
        assert_eq!(convert("{ end: a(); goto end; }"), "[end]:\na()\nGoTo [end]");

        let mut map = IdentifierMap::new();
        map.insert("lbl".to_string(), "renamed".to_string());
        let tree = parse_statement("{ lbl: a(); goto lbl; }", &[]);
        let visitor = NodeVisitor::new(Some(&map), false);
        let statements = visitor.statements().statement(tree.root()).expect("translates");
        assert_eq!(render_statements(&statements), "renamed:\na()\nGoTo renamed");
    }

    #[test]
    fn if_chains_flatten() {
        assert_eq!(
            convert("if (a) { x(); } else if (b) { y(); } else { z(); }"),
            "If a Then\n    x()\nElseIf b Then\n    y()\nElse\n    z()\nEnd If"
        );
    }

    #[test]
    fn switch_drops_the_closing_break() {
        assert_eq!(
            convert("switch (n) { case 1: case 2: a(); break; default: if (c) break; b(); break; }"),
            "Select Case n\n    Case 1, 2\n        a()\n    Case Else\n        If c Then\n            Exit Select\n        End If\n        b()\nEnd Select"
        );
    }

    #[test]
    fn loops_pick_their_exit_keyword() {
        assert_eq!(
            convert("while (true) { if (a) break; if (b) continue; }"),
            "While True\n    If a Then\n        Exit While\n    End If\n    If b Then\n        Continue While\n    End If\nEnd While"
        );
        assert_eq!(
            convert("do { break; } while (x);"),
            "Do\n    Exit Do\nLoop While x"
        );
        assert_eq!(
            convert("foreach (var item in items) { continue; }"),
            "For Each item In items\n    Continue For\nNext"
        );
    }

    #[test]
    fn try_catch_finally() {
        assert_eq!(
            convert("try { a(); } catch (IOException) { b(); } catch { } finally { c(); }"),
            "Try\n    a()\nCatch ex As IOException\n    b()\nCatch\nFinally\n    c()\nEnd Try"
        );
    }

    #[test]
    fn using_and_lock() {
        assert_eq!(
            convert("using (var s = Open()) { lock (gate) { s.Write(); } }"),
            "Using s = Open()\n    SyncLock gate\n        s.Write()\n    End SyncLock\nEnd Using"
        );
    }

    #[test]
    fn local_functions_have_no_translation() {
        let tree = parse_statement("{ int Twice(int x) { return x * 2; } }", &[]);
        let visitor = NodeVisitor::default();
        let err = visitor.statements().statement(tree.root()).unwrap_err();
        assert!(matches!(
            err,
            ConvertError::Unmapped { kind: SyntaxKind::LocalFunctionStatement, .. }
        ));
    }

    #[test]
    fn comments_stay_with_statements() {
        assert_eq!(
            convert("{\n  // first\n  a(); // trailing\n  // before close\n}"),
            "' first\na() ' trailing\n' before close"
        );
    }
}
