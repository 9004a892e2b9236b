//! Expression grammar.

use crate::domain::syntax::{GreenElement, GreenNode, GreenToken, SyntaxKind};

use super::parser::{can_start_expression, node, Parser};

use SyntaxKind as K;

const COALESCE: u8 = 1;
const RELATIONAL: u8 = 8;

impl Parser {
    pub(super) fn expression(&mut self) -> GreenNode {
        if self.at_lambda() {
            return self.lambda();
        }
        if self.at_query() {
            return self.query_expression();
        }
        let lhs = self.conditional();
        match self.assignment_operator() {
            Some((kind, width)) => {
                let mut children = vec![GreenElement::Node(lhs)];
                for _ in 0..width {
                    children.push(self.bump());
                }
                let rhs = if self.at(K::OpenBrace) {
                    self.initializer()
                } else {
                    self.expression()
                };
                children.push(rhs.into());
                node(kind, children)
            }
            None => lhs,
        }
    }

    fn assignment_operator(&self) -> Option<(SyntaxKind, usize)> {
        let kind = match self.kind() {
            K::Eq => K::SimpleAssignmentExpression,
            K::PlusEq => K::AddAssignmentExpression,
            K::MinusEq => K::SubtractAssignmentExpression,
            K::StarEq => K::MultiplyAssignmentExpression,
            K::SlashEq => K::DivideAssignmentExpression,
            K::PercentEq => K::ModuloAssignmentExpression,
            K::AmpEq => K::AndAssignmentExpression,
            K::BarEq => K::OrAssignmentExpression,
            K::CaretEq => K::ExclusiveOrAssignmentExpression,
            K::LtLtEq => K::LeftShiftAssignmentExpression,
            K::Gt if self.nth(1) == K::GtEq && self.adjacent(0) => {
                return Some((K::RightShiftAssignmentExpression, 2))
            }
            _ => return None,
        };
        Some((kind, 1))
    }

    fn conditional(&mut self) -> GreenNode {
        let condition = self.binary(COALESCE);
        if !self.at(K::Question) {
            return condition;
        }
        let question = self.bump();
        let when_true = self.expression();
        let colon = self.expect(K::Colon);
        let when_false = self.expression();
        node(
            K::ConditionalExpression,
            vec![condition.into(), question, when_true.into(), colon, when_false.into()],
        )
    }

    fn binary_operator(&self) -> Option<(SyntaxKind, u8, usize)> {
        let op = match self.kind() {
            K::QuestionQuestion => (K::CoalesceExpression, COALESCE),
            K::BarBar => (K::LogicalOrExpression, 2),
            K::AmpAmp => (K::LogicalAndExpression, 3),
            K::Bar => (K::BitwiseOrExpression, 4),
            K::Caret => (K::ExclusiveOrExpression, 5),
            K::Amp => (K::BitwiseAndExpression, 6),
            K::EqEq => (K::EqualsExpression, 7),
            K::BangEq => (K::NotEqualsExpression, 7),
            K::Lt => (K::LessThanExpression, RELATIONAL),
            K::LtEq => (K::LessThanOrEqualExpression, RELATIONAL),
            K::GtEq => (K::GreaterThanOrEqualExpression, RELATIONAL),
            K::IsKw => (K::IsExpression, RELATIONAL),
            K::AsKw => (K::AsExpression, RELATIONAL),
            K::Gt if self.adjacent(0) && self.nth(1) == K::Gt => {
                return Some((K::RightShiftExpression, 9, 2))
            }
            K::Gt if self.adjacent(0) && self.nth(1) == K::GtEq => return None,
            K::Gt => (K::GreaterThanExpression, RELATIONAL),
            K::LtLt => (K::LeftShiftExpression, 9),
            K::Plus => (K::AddExpression, 10),
            K::Minus => (K::SubtractExpression, 10),
            K::Star => (K::MultiplyExpression, 11),
            K::Slash => (K::DivideExpression, 11),
            K::Percent => (K::ModuloExpression, 11),
            _ => return None,
        };
        Some((op.0, op.1, 1))
    }

    fn binary(&mut self, min_prec: u8) -> GreenNode {
        let mut left = self.unary();
        while let Some((kind, prec, width)) = self.binary_operator() {
            if prec < min_prec {
                break;
            }
            let mut children = vec![GreenElement::Node(left)];
            for _ in 0..width {
                children.push(self.bump());
            }
            let right = match kind {
                K::IsExpression | K::AsExpression => self.parse_type_after_is_as(),
                K::CoalesceExpression => self.binary(prec),
                _ => self.binary(prec + 1),
            };
            children.push(right.into());
            left = node(kind, children);
        }
        left
    }

    fn unary(&mut self) -> GreenNode {
        let kind = match self.kind() {
            K::Plus => Some(K::UnaryPlusExpression),
            K::Minus => Some(K::UnaryMinusExpression),
            K::Bang => Some(K::LogicalNotExpression),
            K::Tilde => Some(K::BitwiseNotExpression),
            K::PlusPlus => Some(K::PreIncrementExpression),
            K::MinusMinus => Some(K::PreDecrementExpression),
            K::Amp => Some(K::AddressOfExpression),
            K::Star => Some(K::PointerIndirectionExpression),
            _ => None,
        };
        if let Some(kind) = kind {
            let op = self.bump();
            let operand = self.unary();
            return node(kind, vec![op, operand.into()]);
        }
        if self.at(K::OpenParen) && self.at_cast() {
            let open = self.bump();
            let ty = self.parse_type();
            let close = self.expect(K::CloseParen);
            let operand = self.unary();
            return node(K::CastExpression, vec![open, ty.into(), close, operand.into()]);
        }
        let primary = self.primary();
        self.postfix(primary)
    }

    fn at_cast(&self) -> bool {
        let end = match self.scan_type_from_current(1) {
            Some(end) => end,
            None => return false,
        };
        if self.nth(end) != K::CloseParen {
            return false;
        }
        let after = self.nth(end + 1);
        if self.nth(1).is_predefined_type_keyword() {
            return can_start_expression(after);
        }
        matches!(
            after,
            K::Identifier
                | K::NumericLiteral
                | K::StringLiteral
                | K::CharacterLiteral
                | K::OpenParen
                | K::Bang
                | K::Tilde
        ) || (after.is_keyword() && !matches!(after, K::AsKw | K::IsKw))
    }

    fn at_lambda(&self) -> bool {
        match self.kind() {
            K::Identifier => self.nth(1) == K::FatArrow,
            K::OpenParen => self
                .matching_paren(0)
                .is_some_and(|close| self.nth(close + 1) == K::FatArrow),
            _ => false,
        }
    }

    fn at_query(&self) -> bool {
        if !self.at_contextual("from") {
            return false;
        }
        if self.nth(1) == K::Identifier && self.nth(2) == K::InKw {
            return true;
        }
        self.scan_type_from_current(1)
            .is_some_and(|end| self.nth(end) == K::Identifier && self.nth(end + 1) == K::InKw)
    }

    fn primary(&mut self) -> GreenNode {
        match self.kind() {
            K::NumericLiteral => node(K::NumericLiteralExpression, vec![self.bump()]),
            K::StringLiteral => node(K::StringLiteralExpression, vec![self.bump()]),
            K::CharacterLiteral => node(K::CharacterLiteralExpression, vec![self.bump()]),
            K::TrueKw => node(K::TrueLiteralExpression, vec![self.bump()]),
            K::FalseKw => node(K::FalseLiteralExpression, vec![self.bump()]),
            K::NullKw => node(K::NullLiteralExpression, vec![self.bump()]),
            K::ThisKw => node(K::ThisExpression, vec![self.bump()]),
            K::BaseKw => node(K::BaseExpression, vec![self.bump()]),
            K::OpenParen => {
                let open = self.bump();
                let inner = self.expression();
                let close = self.expect(K::CloseParen);
                node(K::ParenthesizedExpression, vec![open, inner.into(), close])
            }
            K::Identifier if self.nth(1) == K::ColonColon => {
                let alias = self.identifier_name();
                let colons = self.bump();
                let right = self.simple_name(true);
                node(K::AliasQualifiedName, vec![alias.into(), colons, right.into()])
            }
            K::Identifier => self.simple_name(true),
            k if k.is_predefined_type_keyword() => node(K::PredefinedType, vec![self.bump()]),
            K::NewKw => self.creation(),
            K::TypeOfKw => self.keyword_type_operand(K::TypeOfExpression),
            K::DefaultKw => self.keyword_type_operand(K::DefaultExpression),
            K::SizeOfKw => self.keyword_type_operand(K::SizeOfExpression),
            K::CheckedKw => self.keyword_expression_operand(K::CheckedExpression),
            K::UncheckedKw => self.keyword_expression_operand(K::UncheckedExpression),
            K::MakeRefKw => self.keyword_expression_operand(K::MakeRefExpression),
            K::RefTypeKw => self.keyword_expression_operand(K::RefTypeExpression),
            K::RefValueKw => {
                let kw = self.bump();
                let open = self.expect(K::OpenParen);
                let operand = self.expression();
                let comma = self.expect(K::Comma);
                let ty = self.parse_type();
                let close = self.expect(K::CloseParen);
                node(
                    K::RefValueExpression,
                    vec![kw, open, operand.into(), comma, ty.into(), close],
                )
            }
            K::ArgListKw => {
                let mut children = vec![self.bump()];
                if self.at(K::OpenParen) {
                    children.push(self.argument_list().into());
                }
                node(K::ArgListExpression, children)
            }
            K::DelegateKw => {
                let mut children = vec![self.bump()];
                if self.at(K::OpenParen) {
                    children.push(self.parameter_list().into());
                }
                children.push(self.block().into());
                node(K::AnonymousMethodExpression, children)
            }
            K::StackAllocKw => {
                let kw = self.bump();
                let element = self.parse_type_without_ranks();
                let rank = self.rank_specifier(true);
                let ty = node(K::ArrayType, vec![element.into(), rank.into()]);
                node(K::StackAllocArrayCreationExpression, vec![kw, ty.into()])
            }
            _ => {
                let message = match self.kind() {
                    K::EndOfFile => "Invalid expression term".to_string(),
                    _ => format!("Invalid expression term '{}'", self.nth_text(0)),
                };
                self.error_here(message);
                node(
                    K::IdentifierName,
                    vec![GreenElement::Token(GreenToken::missing(K::Identifier))],
                )
            }
        }
    }

    fn keyword_type_operand(&mut self, kind: SyntaxKind) -> GreenNode {
        let kw = self.bump();
        let open = self.expect(K::OpenParen);
        let ty = self.parse_type();
        let close = self.expect(K::CloseParen);
        node(kind, vec![kw, open, ty.into(), close])
    }

    fn keyword_expression_operand(&mut self, kind: SyntaxKind) -> GreenNode {
        let kw = self.bump();
        let open = self.expect(K::OpenParen);
        let operand = self.expression();
        let close = self.expect(K::CloseParen);
        node(kind, vec![kw, open, operand.into(), close])
    }

    fn postfix(&mut self, mut expr: GreenNode) -> GreenNode {
        loop {
            expr = match self.kind() {
                K::Dot | K::Arrow => {
                    let kind = if self.at(K::Dot) {
                        K::MemberAccessExpression
                    } else {
                        K::PointerMemberAccessExpression
                    };
                    let op = self.bump();
                    let name = self.simple_name(true);
                    node(kind, vec![expr.into(), op, name.into()])
                }
                K::OpenParen => {
                    let args = self.argument_list();
                    node(K::InvocationExpression, vec![expr.into(), args.into()])
                }
                K::OpenBracket => {
                    let args = self.bracketed_argument_list();
                    node(K::ElementAccessExpression, vec![expr.into(), args.into()])
                }
                K::PlusPlus => {
                    let op = self.bump();
                    node(K::PostIncrementExpression, vec![expr.into(), op])
                }
                K::MinusMinus => {
                    let op = self.bump();
                    node(K::PostDecrementExpression, vec![expr.into(), op])
                }
                _ => return expr,
            };
        }
    }

    pub(super) fn argument_list(&mut self) -> GreenNode {
        self.arguments(K::OpenParen, K::CloseParen, K::ArgumentList)
    }

    pub(super) fn bracketed_argument_list(&mut self) -> GreenNode {
        self.arguments(K::OpenBracket, K::CloseBracket, K::BracketedArgumentList)
    }

    fn arguments(&mut self, open: SyntaxKind, close: SyntaxKind, kind: SyntaxKind) -> GreenNode {
        let mut children = vec![self.expect(open)];
        if !self.at(close) {
            loop {
                children.push(self.argument().into());
                match self.eat(K::Comma) {
                    Some(comma) => children.push(comma),
                    None => break,
                }
            }
        }
        children.push(self.expect(close));
        node(kind, children)
    }

    fn argument(&mut self) -> GreenNode {
        let mut children = Vec::new();
        if self.at(K::Identifier) && self.nth(1) == K::Colon {
            let name = self.identifier_name();
            let colon = self.bump();
            children.push(node(K::NameColon, vec![name.into(), colon]).into());
        }
        if matches!(self.kind(), K::RefKw | K::OutKw) {
            children.push(self.bump());
        }
        children.push(self.expression().into());
        node(K::Argument, children)
    }

    fn creation(&mut self) -> GreenNode {
        let new_kw = self.bump();
        if self.at(K::OpenBrace) {
            return self.anonymous_object(new_kw);
        }
        if self.at(K::OpenBracket) {
            let mut children = vec![new_kw, self.bump()];
            while let Some(comma) = self.eat(K::Comma) {
                children.push(comma);
            }
            children.push(self.expect(K::CloseBracket));
            children.push(self.initializer().into());
            return node(K::ImplicitArrayCreationExpression, children);
        }
        let ty = self.parse_type_without_ranks();
        if self.at(K::OpenBracket) {
            let mut type_children = vec![GreenElement::Node(ty)];
            type_children.push(self.rank_specifier(true).into());
            while self.at(K::OpenBracket) {
                type_children.push(self.rank_specifier(false).into());
            }
            let array_type = node(K::ArrayType, type_children);
            let mut children = vec![new_kw, array_type.into()];
            if self.at(K::OpenBrace) {
                children.push(self.initializer().into());
            }
            return node(K::ArrayCreationExpression, children);
        }
        let mut children = vec![new_kw, ty.into()];
        let has_args = self.at(K::OpenParen);
        if has_args {
            children.push(self.argument_list().into());
        }
        if self.at(K::OpenBrace) {
            children.push(self.initializer().into());
        } else if !has_args {
            self.error_here("'(' expected");
        }
        node(K::ObjectCreationExpression, children)
    }

    fn anonymous_object(&mut self, new_kw: GreenElement) -> GreenNode {
        let mut children = vec![new_kw, self.bump()];
        while !matches!(self.kind(), K::CloseBrace | K::EndOfFile) {
            let start = self.position();
            let mut member = Vec::new();
            if self.at(K::Identifier) && self.nth(1) == K::Eq {
                let name = self.identifier_name();
                let eq = self.bump();
                member.push(node(K::NameEquals, vec![name.into(), eq]).into());
            }
            member.push(self.expression().into());
            children.push(node(K::AnonymousObjectMemberDeclarator, member).into());
            match self.eat(K::Comma) {
                Some(comma) => children.push(comma),
                None => break,
            }
            self.ensure_progress(start);
        }
        children.push(self.expect(K::CloseBrace));
        node(K::AnonymousObjectCreationExpression, children)
    }

    /// `{ a, b, { c, d }, X = e }`
    pub(super) fn initializer(&mut self) -> GreenNode {
        let mut children = vec![self.expect(K::OpenBrace)];
        while !matches!(self.kind(), K::CloseBrace | K::EndOfFile) {
            let start = self.position();
            let element = if self.at(K::OpenBrace) {
                self.initializer()
            } else {
                self.expression()
            };
            children.push(element.into());
            match self.eat(K::Comma) {
                Some(comma) => children.push(comma),
                None => break,
            }
            self.ensure_progress(start);
        }
        children.push(self.expect(K::CloseBrace));
        node(K::InitializerExpression, children)
    }

    fn lambda(&mut self) -> GreenNode {
        if self.at(K::Identifier) {
            let id = self.bump();
            let parameter = node(K::Parameter, vec![id]);
            let arrow = self.expect(K::FatArrow);
            let body = self.lambda_body();
            return node(K::SimpleLambdaExpression, vec![parameter.into(), arrow, body.into()]);
        }
        let mut params = vec![self.expect(K::OpenParen)];
        if !self.at(K::CloseParen) {
            loop {
                let start = self.position();
                let parameter = if self.at(K::Identifier)
                    && matches!(self.nth(1), K::Comma | K::CloseParen)
                {
                    node(K::Parameter, vec![self.bump()])
                } else {
                    let mut children = Vec::new();
                    if matches!(self.kind(), K::RefKw | K::OutKw) {
                        children.push(self.bump());
                    }
                    children.push(self.parse_type().into());
                    children.push(self.expect_identifier());
                    node(K::Parameter, children)
                };
                params.push(parameter.into());
                match self.eat(K::Comma) {
                    Some(comma) => params.push(comma),
                    None => break,
                }
                self.ensure_progress(start);
            }
        }
        params.push(self.expect(K::CloseParen));
        let list = node(K::ParameterList, params);
        let arrow = self.expect(K::FatArrow);
        let body = self.lambda_body();
        node(K::ParenthesizedLambdaExpression, vec![list.into(), arrow, body.into()])
    }

    fn lambda_body(&mut self) -> GreenNode {
        if self.at(K::OpenBrace) {
            self.block()
        } else {
            self.expression()
        }
    }

    // ── Query expressions ─────────────────────────────────────────────

    fn query_expression(&mut self) -> GreenNode {
        let from = self.from_clause();
        let body = self.query_body();
        node(K::QueryExpression, vec![from.into(), body.into()])
    }

    fn from_clause(&mut self) -> GreenNode {
        let mut children = vec![self.bump_remap(K::FromKw)];
        if !(self.at(K::Identifier) && self.nth(1) == K::InKw) {
            children.push(self.parse_type().into());
        }
        children.push(self.expect_identifier());
        children.push(self.expect(K::InKw));
        children.push(self.expression().into());
        node(K::FromClause, children)
    }

    fn query_body(&mut self) -> GreenNode {
        let mut children: Vec<GreenElement> = Vec::new();
        loop {
            let clause = if self.at_contextual("from") {
                self.from_clause()
            } else if self.at_contextual("let") {
                let kw = self.bump_remap(K::LetKw);
                let id = self.expect_identifier();
                let eq = self.expect(K::Eq);
                let value = self.expression();
                node(K::LetClause, vec![kw, id, eq, value.into()])
            } else if self.at_contextual("where") {
                let kw = self.bump_remap(K::WhereKw);
                let condition = self.expression();
                node(K::WhereClause, vec![kw, condition.into()])
            } else if self.at_contextual("join") {
                self.join_clause()
            } else if self.at_contextual("orderby") {
                self.order_by_clause()
            } else {
                break;
            };
            children.push(clause.into());
        }
        if self.at_contextual("select") {
            let kw = self.bump_remap(K::SelectKw);
            let value = self.expression();
            children.push(node(K::SelectClause, vec![kw, value.into()]).into());
        } else if self.at_contextual("group") {
            let kw = self.bump_remap(K::GroupKw);
            let element = self.expression();
            let by = if self.at_contextual("by") {
                self.bump_remap(K::ByKw)
            } else {
                self.error_here("'by' expected");
                GreenElement::Token(GreenToken::missing(K::ByKw))
            };
            let key = self.expression();
            children.push(node(K::GroupClause, vec![kw, element.into(), by, key.into()]).into());
        } else {
            self.error_here("A query body must end with a select clause or a group clause");
        }
        if self.at_contextual("into") {
            let into = self.bump_remap(K::IntoKw);
            let id = self.expect_identifier();
            let body = self.query_body();
            children.push(node(K::QueryContinuation, vec![into, id, body.into()]).into());
        }
        node(K::QueryBody, children)
    }

    fn join_clause(&mut self) -> GreenNode {
        let mut children = vec![self.bump_remap(K::JoinKw)];
        if !(self.at(K::Identifier) && self.nth(1) == K::InKw) {
            children.push(self.parse_type().into());
        }
        children.push(self.expect_identifier());
        children.push(self.expect(K::InKw));
        children.push(self.expression().into());
        children.push(self.contextual_or_missing("on", K::OnKw));
        children.push(self.expression().into());
        children.push(self.contextual_or_missing("equals", K::EqualsKw));
        children.push(self.expression().into());
        if self.at_contextual("into") {
            let into = self.bump_remap(K::IntoKw);
            let id = self.expect_identifier();
            children.push(node(K::JoinIntoClause, vec![into, id]).into());
        }
        node(K::JoinClause, children)
    }

    fn order_by_clause(&mut self) -> GreenNode {
        let mut children = vec![self.bump_remap(K::OrderByKw)];
        loop {
            let key = self.expression();
            let ordering = if self.at_contextual("descending") {
                let kw = self.bump_remap(K::DescendingKw);
                node(K::DescendingOrdering, vec![key.into(), kw])
            } else if self.at_contextual("ascending") {
                let kw = self.bump_remap(K::AscendingKw);
                node(K::AscendingOrdering, vec![key.into(), kw])
            } else {
                node(K::AscendingOrdering, vec![key.into()])
            };
            children.push(ordering.into());
            match self.eat(K::Comma) {
                Some(comma) => children.push(comma),
                None => break,
            }
        }
        node(K::OrderByClause, children)
    }

    fn contextual_or_missing(&mut self, word: &str, kind: SyntaxKind) -> GreenElement {
        if self.at_contextual(word) {
            self.bump_remap(kind)
        } else {
            self.error_here(format!("'{}' expected", word));
            GreenElement::Token(GreenToken::missing(kind))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::parser::parse_expression;
    use crate::domain::syntax::SyntaxKind;

    fn root_kind(src: &str) -> SyntaxKind {
        let tree = parse_expression(src, &[]);
        assert!(tree.diagnostics().is_empty(), "{}: {:?}", src, tree.diagnostics());
        assert!(tree.consumed_all(), "{}", src);
        tree.root().kind()
    }

    #[test]
    fn test_precedence() {
        let tree = parse_expression("a + b * c == d && e", &[]);
        let root = tree.root();
        assert_eq!(root.kind(), SyntaxKind::LogicalAndExpression);
        let eq = root.nth_child_node(0).unwrap();
        assert_eq!(eq.kind(), SyntaxKind::EqualsExpression);
        let add = eq.nth_child_node(0).unwrap();
        assert_eq!(add.kind(), SyntaxKind::AddExpression);
        assert_eq!(add.nth_child_node(1).unwrap().kind(), SyntaxKind::MultiplyExpression);
    }

    #[test]
    fn test_shift_and_shift_assign() {
        assert_eq!(root_kind("a >> 2"), SyntaxKind::RightShiftExpression);
        assert_eq!(root_kind("a >>= 2"), SyntaxKind::RightShiftAssignmentExpression);
        assert_eq!(root_kind("a > b"), SyntaxKind::GreaterThanExpression);
    }

    #[test]
    fn test_casts_and_parentheses() {
        assert_eq!(root_kind("(int)x"), SyntaxKind::CastExpression);
        assert_eq!(root_kind("(Foo)x"), SyntaxKind::CastExpression);
        assert_eq!(root_kind("(x) + y"), SyntaxKind::AddExpression);
        assert_eq!(root_kind("(int)-1"), SyntaxKind::CastExpression);
    }

    #[test]
    fn test_lambdas_and_anonymous_methods() {
        assert_eq!(root_kind("x => x * 2"), SyntaxKind::SimpleLambdaExpression);
        assert_eq!(root_kind("(a, b) => { return a; }"), SyntaxKind::ParenthesizedLambdaExpression);
        assert_eq!(root_kind("(int a) => a"), SyntaxKind::ParenthesizedLambdaExpression);
        assert_eq!(root_kind("delegate(int a) { return a; }"), SyntaxKind::AnonymousMethodExpression);
    }

    #[test]
    fn test_creation_expressions() {
        assert_eq!(root_kind("new List<int> { 1, 2 }"), SyntaxKind::ObjectCreationExpression);
        assert_eq!(root_kind("new int[5]"), SyntaxKind::ArrayCreationExpression);
        assert_eq!(root_kind("new int[] { 1 }"), SyntaxKind::ArrayCreationExpression);
        assert_eq!(root_kind("new[] { 1 }"), SyntaxKind::ImplicitArrayCreationExpression);
        assert_eq!(root_kind("new { A = 1, b }"), SyntaxKind::AnonymousObjectCreationExpression);
        assert_eq!(root_kind("new Foo { X = 1 }"), SyntaxKind::ObjectCreationExpression);
    }

    #[test]
    fn test_query_expression() {
        let src = "from c in customers where c.Age > 3 orderby c.Name descending select c.Name";
        assert_eq!(root_kind(src), SyntaxKind::QueryExpression);
        let src = "from x in xs group x by x.Key into g select g";
        let tree = parse_expression(src, &[]);
        assert!(tree.diagnostics().is_empty());
        assert!(tree
            .root()
            .descendants()
            .any(|n| n.kind() == SyntaxKind::QueryContinuation));
    }

    #[test]
    fn test_is_nullable_versus_conditional() {
        assert_eq!(root_kind("x is int ? 1 : 2"), SyntaxKind::ConditionalExpression);
        assert_eq!(root_kind("x as int?"), SyntaxKind::AsExpression);
    }

    #[test]
    fn test_invalid_term_reports_diagnostic() {
        let tree = parse_expression("class", &[]);
        assert!(!tree.diagnostics().is_empty());
    }
}
