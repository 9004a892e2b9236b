//! Statement grammar.

use crate::domain::syntax::{GreenElement, GreenNode, SyntaxKind};

use super::parser::{node, Parser};

use SyntaxKind as K;

impl Parser {
    pub(super) fn statement(&mut self) -> GreenNode {
        match self.kind() {
            K::OpenBrace => self.block(),
            K::Semicolon => node(K::EmptyStatement, vec![self.bump()]),
            K::IfKw => self.if_statement(),
            K::WhileKw => {
                let kw = self.bump();
                let (open, condition, close) = self.parenthesized_expression();
                let body = self.statement();
                node(K::WhileStatement, vec![kw, open, condition.into(), close, body.into()])
            }
            K::DoKw => {
                let kw = self.bump();
                let body = self.statement();
                let while_kw = self.expect(K::WhileKw);
                let (open, condition, close) = self.parenthesized_expression();
                let semi = self.expect(K::Semicolon);
                node(
                    K::DoStatement,
                    vec![kw, body.into(), while_kw, open, condition.into(), close, semi],
                )
            }
            K::ForKw => self.for_statement(),
            K::ForEachKw => self.foreach_statement(),
            K::SwitchKw => self.switch_statement(),
            K::TryKw => self.try_statement(),
            K::ReturnKw => self.keyword_optional_expression(K::ReturnStatement),
            K::ThrowKw => self.keyword_optional_expression(K::ThrowStatement),
            K::BreakKw => {
                let kw = self.bump();
                let semi = self.expect(K::Semicolon);
                node(K::BreakStatement, vec![kw, semi])
            }
            K::ContinueKw => {
                let kw = self.bump();
                let semi = self.expect(K::Semicolon);
                node(K::ContinueStatement, vec![kw, semi])
            }
            K::GotoKw => self.goto_statement(),
            K::UsingKw => self.resource_statement(K::UsingStatement),
            K::FixedKw => self.resource_statement(K::FixedStatement),
            K::LockKw => {
                let kw = self.bump();
                let (open, target, close) = self.parenthesized_expression();
                let body = self.statement();
                node(K::LockStatement, vec![kw, open, target.into(), close, body.into()])
            }
            K::CheckedKw if self.nth(1) == K::OpenBrace => {
                let kw = self.bump();
                let body = self.block();
                node(K::CheckedStatement, vec![kw, body.into()])
            }
            K::UncheckedKw if self.nth(1) == K::OpenBrace => {
                let kw = self.bump();
                let body = self.block();
                node(K::UncheckedStatement, vec![kw, body.into()])
            }
            K::UnsafeKw if self.nth(1) == K::OpenBrace => {
                let kw = self.bump();
                let body = self.block();
                node(K::UnsafeStatement, vec![kw, body.into()])
            }
            K::ConstKw => self.local_declaration(),
            K::Identifier
                if self.at_contextual("yield")
                    && matches!(self.nth(1), K::ReturnKw | K::BreakKw) =>
            {
                self.yield_statement()
            }
            K::Identifier if self.nth(1) == K::Colon => {
                let label = self.bump();
                let colon = self.bump();
                let inner = self.statement();
                node(K::LabeledStatement, vec![label, colon, inner.into()])
            }
            _ => self.declaration_or_expression_statement(),
        }
    }

    pub(super) fn block(&mut self) -> GreenNode {
        let mut children = vec![self.expect(K::OpenBrace)];
        while !matches!(self.kind(), K::CloseBrace | K::EndOfFile) {
            let start = self.position();
            children.push(self.statement().into());
            self.ensure_progress(start);
        }
        children.push(self.expect(K::CloseBrace));
        node(K::Block, children)
    }

    fn parenthesized_expression(&mut self) -> (GreenElement, GreenNode, GreenElement) {
        let open = self.expect(K::OpenParen);
        let expr = self.expression();
        let close = self.expect(K::CloseParen);
        (open, expr, close)
    }

    fn keyword_optional_expression(&mut self, kind: SyntaxKind) -> GreenNode {
        let mut children = vec![self.bump()];
        if !self.at(K::Semicolon) {
            children.push(self.expression().into());
        }
        children.push(self.expect(K::Semicolon));
        node(kind, children)
    }

    /// `Type Identifier` ahead, ignoring what follows the identifier.
    fn at_variable_declaration(&self) -> bool {
        self.scan_type_from_current(0)
            .is_some_and(|end| self.nth(end) == K::Identifier)
    }

    fn declaration_or_expression_statement(&mut self) -> GreenNode {
        if let Some(end) = self.scan_type_from_current(0) {
            if self.nth(end) == K::Identifier {
                return match self.nth(end + 1) {
                    K::OpenParen | K::Lt => self.local_function(),
                    _ => self.local_declaration(),
                };
            }
        }
        let expr = self.expression();
        let semi = self.expect(K::Semicolon);
        node(K::ExpressionStatement, vec![expr.into(), semi])
    }

    fn local_declaration(&mut self) -> GreenNode {
        let mut children = Vec::new();
        if let Some(kw) = self.eat(K::ConstKw) {
            children.push(kw);
        }
        children.push(self.variable_declaration().into());
        children.push(self.expect(K::Semicolon));
        node(K::LocalDeclarationStatement, children)
    }

    fn local_function(&mut self) -> GreenNode {
        let mut children = vec![GreenElement::Node(self.parse_type())];
        children.push(self.expect_identifier());
        if self.at(K::Lt) {
            children.push(self.type_parameter_list().into());
        }
        children.push(self.parameter_list().into());
        while self.at_contextual("where") {
            children.push(self.constraint_clause().into());
        }
        children.push(self.body_or_semicolon());
        node(K::LocalFunctionStatement, children)
    }

    pub(super) fn variable_declaration(&mut self) -> GreenNode {
        let mut children = vec![GreenElement::Node(self.parse_type())];
        loop {
            children.push(self.variable_declarator().into());
            match self.eat(K::Comma) {
                Some(comma) => children.push(comma),
                None => break,
            }
        }
        node(K::VariableDeclaration, children)
    }

    pub(super) fn variable_declarator(&mut self) -> GreenNode {
        let mut children = vec![self.expect_identifier()];
        if self.at(K::OpenBracket) {
            children.push(self.bracketed_argument_list().into());
        }
        if self.at(K::Eq) {
            children.push(self.equals_value_clause().into());
        }
        node(K::VariableDeclarator, children)
    }

    pub(super) fn equals_value_clause(&mut self) -> GreenNode {
        let eq = self.bump();
        let value = if self.at(K::OpenBrace) {
            self.initializer()
        } else {
            self.expression()
        };
        node(K::EqualsValueClause, vec![eq, value.into()])
    }

    fn if_statement(&mut self) -> GreenNode {
        let kw = self.bump();
        let (open, condition, close) = self.parenthesized_expression();
        let body = self.statement();
        let mut children = vec![kw, open, condition.into(), close, body.into()];
        if self.at(K::ElseKw) {
            let else_kw = self.bump();
            let else_body = self.statement();
            children.push(node(K::ElseClause, vec![else_kw, else_body.into()]).into());
        }
        node(K::IfStatement, children)
    }

    /// `for (init; condition; incrementors) body`. The parts are told apart
    /// by their position relative to the two semicolons.
    fn for_statement(&mut self) -> GreenNode {
        let mut children = vec![self.bump(), self.expect(K::OpenParen)];
        if !self.at(K::Semicolon) {
            if self.at_variable_declaration() {
                children.push(self.variable_declaration().into());
            } else {
                self.expression_list(&mut children);
            }
        }
        children.push(self.expect(K::Semicolon));
        if !self.at(K::Semicolon) {
            children.push(self.expression().into());
        }
        children.push(self.expect(K::Semicolon));
        if !self.at(K::CloseParen) {
            self.expression_list(&mut children);
        }
        children.push(self.expect(K::CloseParen));
        children.push(self.statement().into());
        node(K::ForStatement, children)
    }

    fn expression_list(&mut self, children: &mut Vec<GreenElement>) {
        loop {
            children.push(self.expression().into());
            match self.eat(K::Comma) {
                Some(comma) => children.push(comma),
                None => break,
            }
        }
    }

    fn foreach_statement(&mut self) -> GreenNode {
        let kw = self.bump();
        let open = self.expect(K::OpenParen);
        let ty = self.parse_type();
        let id = self.expect_identifier();
        let in_kw = self.expect(K::InKw);
        let collection = self.expression();
        let close = self.expect(K::CloseParen);
        let body = self.statement();
        node(
            K::ForEachStatement,
            vec![kw, open, ty.into(), id, in_kw, collection.into(), close, body.into()],
        )
    }

    fn switch_statement(&mut self) -> GreenNode {
        let kw = self.bump();
        let (open, governing, close) = self.parenthesized_expression();
        let mut children = vec![kw, open, governing.into(), close, self.expect(K::OpenBrace)];
        while self.at_switch_label() {
            children.push(self.switch_section().into());
        }
        while !matches!(self.kind(), K::CloseBrace | K::EndOfFile) {
            self.skip();
        }
        children.push(self.expect(K::CloseBrace));
        node(K::SwitchStatement, children)
    }

    fn at_switch_label(&self) -> bool {
        self.at(K::CaseKw) || (self.at(K::DefaultKw) && self.nth(1) == K::Colon)
    }

    fn switch_section(&mut self) -> GreenNode {
        let mut children = Vec::new();
        while self.at_switch_label() {
            let label = if self.at(K::CaseKw) {
                let kw = self.bump();
                let value = self.expression();
                let colon = self.expect(K::Colon);
                node(K::CaseSwitchLabel, vec![kw, value.into(), colon])
            } else {
                let kw = self.bump();
                let colon = self.bump();
                node(K::DefaultSwitchLabel, vec![kw, colon])
            };
            children.push(label.into());
        }
        while !self.at_switch_label() && !matches!(self.kind(), K::CloseBrace | K::EndOfFile) {
            let start = self.position();
            children.push(self.statement().into());
            self.ensure_progress(start);
        }
        node(K::SwitchSection, children)
    }

    fn try_statement(&mut self) -> GreenNode {
        let mut children = vec![self.bump(), self.block().into()];
        while self.at(K::CatchKw) {
            let mut clause = vec![self.bump()];
            if self.at(K::OpenParen) {
                let mut decl = vec![self.bump(), self.parse_type().into()];
                if self.at(K::Identifier) {
                    decl.push(self.bump());
                }
                decl.push(self.expect(K::CloseParen));
                clause.push(node(K::CatchDeclaration, decl).into());
            }
            clause.push(self.block().into());
            children.push(node(K::CatchClause, clause).into());
        }
        if self.at(K::FinallyKw) {
            let kw = self.bump();
            let body = self.block();
            children.push(node(K::FinallyClause, vec![kw, body.into()]).into());
        }
        node(K::TryStatement, children)
    }

    fn goto_statement(&mut self) -> GreenNode {
        let kw = self.bump();
        match self.kind() {
            K::CaseKw => {
                let case_kw = self.bump();
                let value = self.expression();
                let semi = self.expect(K::Semicolon);
                node(K::GotoCaseStatement, vec![kw, case_kw, value.into(), semi])
            }
            K::DefaultKw => {
                let default_kw = self.bump();
                let semi = self.expect(K::Semicolon);
                node(K::GotoDefaultStatement, vec![kw, default_kw, semi])
            }
            _ => {
                let label = self.identifier_name();
                let semi = self.expect(K::Semicolon);
                node(K::GotoStatement, vec![kw, label.into(), semi])
            }
        }
    }

    /// `using (...) body` and `fixed (...) body`.
    fn resource_statement(&mut self, kind: SyntaxKind) -> GreenNode {
        let mut children = vec![self.bump(), self.expect(K::OpenParen)];
        if kind == K::FixedStatement || self.at_variable_declaration() {
            children.push(self.variable_declaration().into());
        } else {
            children.push(self.expression().into());
        }
        children.push(self.expect(K::CloseParen));
        children.push(self.statement().into());
        node(kind, children)
    }

    fn yield_statement(&mut self) -> GreenNode {
        let yield_kw = self.bump_remap(K::YieldKw);
        if self.at(K::BreakKw) {
            let kw = self.bump();
            let semi = self.expect(K::Semicolon);
            return node(K::YieldBreakStatement, vec![yield_kw, kw, semi]);
        }
        let kw = self.bump();
        let value = self.expression();
        let semi = self.expect(K::Semicolon);
        node(K::YieldReturnStatement, vec![yield_kw, kw, value.into(), semi])
    }
}

#[cfg(test)]
mod tests {
    use super::super::parser::parse_statement;
    use crate::domain::syntax::SyntaxKind;

    fn parsed(src: &str) -> crate::domain::syntax::SyntaxTree {
        let tree = parse_statement(src, &[]);
        assert!(tree.diagnostics().is_empty(), "{}: {:?}", src, tree.diagnostics());
        assert!(tree.consumed_all(), "{}", src);
        tree
    }

    #[test]
    fn test_declaration_versus_expression() {
        assert_eq!(
            parsed("var x = 1;").root().kind(),
            SyntaxKind::LocalDeclarationStatement
        );
        assert_eq!(
            parsed("List<int> xs = null, ys;").root().kind(),
            SyntaxKind::LocalDeclarationStatement
        );
        assert_eq!(parsed("x = 1;").root().kind(), SyntaxKind::ExpressionStatement);
        assert_eq!(parsed("Foo(x);").root().kind(), SyntaxKind::ExpressionStatement);
        assert_eq!(
            parsed("int Twice(int v) { return v * 2; }").root().kind(),
            SyntaxKind::LocalFunctionStatement
        );
    }

    #[test]
    fn test_for_statement_shape() {
        let tree = parsed("for (int i = 0, j = 1; i < 10; i++, j--) { }");
        let root = tree.root();
        assert_eq!(root.kind(), SyntaxKind::ForStatement);
        let kinds: Vec<SyntaxKind> = root.child_nodes().map(|n| n.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                SyntaxKind::VariableDeclaration,
                SyntaxKind::LessThanExpression,
                SyntaxKind::PostIncrementExpression,
                SyntaxKind::PostDecrementExpression,
                SyntaxKind::Block,
            ]
        );
        assert_eq!(parsed("for (;;) ;").root().kind(), SyntaxKind::ForStatement);
    }

    #[test]
    fn test_switch_sections() {
        let tree = parsed("switch (x) { case 1: case 2: a(); break; default: break; }");
        let sections: Vec<_> = tree
            .root()
            .child_nodes()
            .filter(|n| n.kind() == SyntaxKind::SwitchSection)
            .collect();
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].child_nodes().count(), 4);
    }

    #[test]
    fn test_yield_and_labels() {
        assert_eq!(
            parsed("yield return null;").root().kind(),
            SyntaxKind::YieldReturnStatement
        );
        assert_eq!(parsed("yield break;").root().kind(), SyntaxKind::YieldBreakStatement);
        assert_eq!(parsed("done: return;").root().kind(), SyntaxKind::LabeledStatement);
    }

    #[test]
    fn test_try_catch_finally() {
        let tree = parsed("try { } catch (IOException e) { } catch { } finally { }");
        let root = tree.root();
        assert_eq!(root.child_nodes_of(SyntaxKind::CatchClause).count(), 2);
        assert!(root.child_node(SyntaxKind::FinallyClause).is_some());
    }

    #[test]
    fn test_using_forms() {
        let tree = parsed("using (var s = Open()) { }");
        assert!(tree.root().child_node(SyntaxKind::VariableDeclaration).is_some());
        let tree = parsed("using (stream) { }");
        assert!(tree.root().child_node(SyntaxKind::IdentifierName).is_some());
    }
}
