use crate::domain::syntax::{SyntaxKind, SyntaxNode};
use crate::domain::vb::{
    Argument, AssignOp, BinaryOp, CastKind, Expr, FieldInit, Ident, Lambda, LambdaBody, LambdaKind,
    ObjectInit, Param, Statement, StatementKind, TypeRef, UnaryOp,
};

use super::node_visitor::{child, is_statement_only, NodeVisitor, Result};
use super::{placeholder_string, ConvertError, TargetConstruct};

impl NodeVisitor<'_> {
    pub fn expression(&self, node: SyntaxNode<'_>) -> Result<Expr> {
        use SyntaxKind as K;
        let kind = node.kind();
        Ok(match kind {
            K::NumericLiteralExpression => Expr::Literal(numeric_literal(node.text())),
            K::StringLiteralExpression => self.string_literal(node),
            K::CharacterLiteralExpression => {
                let text = node.text();
                let inner = text.strip_prefix('\'').and_then(|t| t.strip_suffix('\'')).unwrap_or(text);
                Expr::Char(unescape(inner).chars().next().unwrap_or('\0'))
            }
            K::TrueLiteralExpression => Expr::Literal("True".to_string()),
            K::FalseLiteralExpression => Expr::Literal("False".to_string()),
            K::NullLiteralExpression | K::DefaultExpression => Expr::nothing(),
            K::ThisExpression => Expr::Me,
            K::BaseExpression => Expr::MyBase,
            K::ParenthesizedExpression => Expr::Paren(Box::new(self.expression(child(node, 0)?)?)),
            K::IdentifierName => Expr::Name { name: self.identifier(node.text()), type_args: Vec::new() },
            K::GenericName => Expr::Name {
                name: self.declared_name(node)?,
                type_args: self.type_arguments(node)?,
            },
            K::QualifiedName => {
                let (name, type_args) = self.simple_name(child(node, 1)?)?;
                Expr::Member { target: Box::new(self.expression(child(node, 0)?)?), name, type_args }
            }
            K::AliasQualifiedName => {
                let alias = child(node, 0)?;
                let target = if alias.text() == "global" {
                    Expr::Type(TypeRef::Global)
                } else {
                    self.expression(alias)?
                };
                let (name, type_args) = self.simple_name(child(node, 1)?)?;
                Expr::Member { target: Box::new(target), name, type_args }
            }
            K::PredefinedType | K::ArrayType | K::NullableType | K::PointerType => {
                Expr::Type(self.type_ref(node)?)
            }
            K::MemberAccessExpression => {
                let (name, type_args) = self.simple_name(child(node, 1)?)?;
                Expr::Member { target: Box::new(self.expression(child(node, 0)?)?), name, type_args }
            }
            K::InvocationExpression | K::ElementAccessExpression => Expr::Invoke {
                target: Box::new(self.expression(child(node, 0)?)?),
                args: self.arguments(child(node, 1)?)?,
            },
            K::EqualsExpression | K::NotEqualsExpression if compares_with_null(node) => {
                let (left, right) = (child(node, 0)?, child(node, 1)?);
                let subject = if left.kind() == K::NullLiteralExpression { right } else { left };
                let op = if kind == K::EqualsExpression { BinaryOp::Is } else { BinaryOp::IsNot };
                Expr::binary(op, self.expression(subject)?, Expr::nothing())
            }
            K::CoalesceExpression => intrinsic(
                "If",
                vec![self.expression(child(node, 0)?)?, self.expression(child(node, 1)?)?],
            ),
            K::ConditionalExpression => intrinsic(
                "If",
                vec![
                    self.expression(child(node, 0)?)?,
                    self.expression(child(node, 1)?)?,
                    self.expression(child(node, 2)?)?,
                ],
            ),
            k if k.is_binary_expression() => match binary_operator(k) {
                Some(op) => Expr::binary(
                    op,
                    self.expression(child(node, 0)?)?,
                    self.expression(child(node, 1)?)?,
                ),
                None => return Err(ConvertError::unmapped(kind, "expression")),
            },
            K::IsExpression => Expr::TypeOfIs {
                expr: Box::new(self.expression(child(node, 0)?)?),
                ty: self.type_ref(child(node, 1)?)?,
            },
            K::AsExpression => Expr::Cast {
                kind: CastKind::TryCast,
                expr: Box::new(self.expression(child(node, 0)?)?),
                ty: self.type_ref(child(node, 1)?)?,
            },
            k if is_statement_only(k) => placeholder_string(node.text(), TargetConstruct::Expression),
            K::UnaryMinusExpression => self.unary(UnaryOp::Negate, node)?,
            K::UnaryPlusExpression => self.unary(UnaryOp::Plus, node)?,
            K::LogicalNotExpression | K::BitwiseNotExpression => self.unary(UnaryOp::Not, node)?,
            K::AddressOfExpression => self.unary(UnaryOp::AddressOf, node)?,
            K::PointerIndirectionExpression => self.expression(child(node, 0)?)?,
            K::CastExpression => {
                let ty_node = child(node, 0)?;
                let kind = if ty_node.kind() == K::PredefinedType {
                    CastKind::CType
                } else {
                    CastKind::DirectCast
                };
                Expr::Cast {
                    kind,
                    expr: Box::new(self.expression(child(node, 1)?)?),
                    ty: self.type_ref(ty_node)?,
                }
            }
            K::ObjectCreationExpression => self.object_creation(node)?,
            K::AnonymousObjectCreationExpression => Expr::NewAnonymous(
                node.child_nodes_of(K::AnonymousObjectMemberDeclarator)
                    .map(|d| {
                        let Argument { name, value } = self.named_argument(d)?;
                        Ok(FieldInit { name, value })
                    })
                    .collect::<Result<Vec<_>>>()?,
            ),
            K::ArrayCreationExpression => self.array_creation(node)?,
            K::ImplicitArrayCreationExpression | K::InitializerExpression => {
                let init = if kind == K::InitializerExpression {
                    node
                } else {
                    child(node, 0)?
                };
                Expr::Collection(self.initializer_items(init)?)
            }
            K::TypeOfExpression => Expr::GetType(self.type_ref(child(node, 0)?)?),
            K::SizeOfExpression => inert("SizeOf", Expr::Type(self.type_ref(child(node, 0)?)?)),
            K::CheckedExpression => inert("Checked", self.expression(child(node, 0)?)?),
            K::UncheckedExpression => inert("Unchecked", self.expression(child(node, 0)?)?),
            K::MakeRefExpression => inert("MakeRef", self.expression(child(node, 0)?)?),
            K::RefTypeExpression => inert("RefType", self.expression(child(node, 0)?)?),
            K::RefValueExpression => inert("RefValue", self.expression(child(node, 0)?)?),
            K::PointerMemberAccessExpression => {
                placeholder_string(node.text(), TargetConstruct::Expression)
            }
            K::StackAllocArrayCreationExpression | K::ArgListExpression => {
                placeholder_string(node.text(), TargetConstruct::Node)
            }
            K::SimpleLambdaExpression => {
                let param = self.parameter(child(node, 0)?)?;
                self.lambda(vec![param], child(node, 1)?)?
            }
            K::ParenthesizedLambdaExpression => {
                let params = self.parameters(child(node, 0)?)?;
                self.lambda(params, child(node, 1)?)?
            }
            K::AnonymousMethodExpression => {
                let params = match node.child_node(K::ParameterList) {
                    Some(list) => self.parameters(list)?,
                    None => Vec::new(),
                };
                let body = node
                    .child_node(K::Block)
                    .ok_or_else(|| ConvertError::unmapped(kind, "anonymous method"))?;
                Expr::Lambda(Box::new(Lambda {
                    kind: LambdaKind::Function,
                    params,
                    body: LambdaBody::Block(self.statements().block(body)?),
                }))
            }
            K::QueryExpression => self.query(node)?,
            _ => return Err(ConvertError::unmapped(kind, "expression")),
        })
    }

    /// Expressions that VB can only write as statements, plus invocations.
    /// Anything else yields `None`.
    pub fn statement_shaped(&self, node: SyntaxNode<'_>) -> Result<Option<Statement>> {
        use SyntaxKind as K;
        let kind = node.kind();
        let assign = |target: Expr, op: AssignOp, value: Expr| {
            Some(Statement::new(StatementKind::Assign { target, op, value }))
        };
        Ok(match kind {
            K::InvocationExpression => Some(Statement::new(StatementKind::Call(self.expression(node)?))),
            K::PreIncrementExpression
            | K::PostIncrementExpression
            | K::PreDecrementExpression
            | K::PostDecrementExpression => {
                let target = self.expression(child(node, 0)?)?;
                let op = if matches!(kind, K::PreIncrementExpression | K::PostIncrementExpression) {
                    BinaryOp::Add
                } else {
                    BinaryOp::Subtract
                };
                let value = Expr::binary(op, target.clone(), Expr::int(1));
                assign(target, AssignOp::Assign, value)
            }
            k if k.is_assignment_expression() => {
                let target = self.expression(child(node, 0)?)?;
                let value = self.expression(child(node, 1)?)?;
                match k {
                    K::SimpleAssignmentExpression => assign(target, AssignOp::Assign, value),
                    K::AddAssignmentExpression => assign(target, AssignOp::Add, value),
                    K::SubtractAssignmentExpression => assign(target, AssignOp::Subtract, value),
                    K::MultiplyAssignmentExpression => assign(target, AssignOp::Multiply, value),
                    K::DivideAssignmentExpression => assign(target, AssignOp::Divide, value),
                    _ => {
                        let op = match k {
                            K::AndAssignmentExpression => BinaryOp::AndAlso,
                            K::OrAssignmentExpression => BinaryOp::OrElse,
                            K::ExclusiveOrAssignmentExpression => BinaryOp::Xor,
                            K::ModuloAssignmentExpression => BinaryOp::Modulo,
                            K::LeftShiftAssignmentExpression => BinaryOp::LeftShift,
                            _ => BinaryOp::RightShift,
                        };
                        let value = Expr::binary(op, target.clone(), value);
                        assign(target, AssignOp::Assign, value)
                    }
                }
            }
            _ => None,
        })
    }

    /// Arguments of an `ArgumentList` or `BracketedArgumentList`. `ref` and
    /// `out` markers are dropped.
    pub(super) fn arguments(&self, list: SyntaxNode<'_>) -> Result<Vec<Argument>> {
        list.child_nodes_of(SyntaxKind::Argument)
            .map(|a| self.named_argument(a))
            .collect()
    }

    fn simple_name(&self, node: SyntaxNode<'_>) -> Result<(Ident, Vec<TypeRef>)> {
        match node.kind() {
            SyntaxKind::GenericName => Ok((self.declared_name(node)?, self.type_arguments(node)?)),
            _ => Ok((self.identifier(node.text()), Vec::new())),
        }
    }

    fn unary(&self, op: UnaryOp, node: SyntaxNode<'_>) -> Result<Expr> {
        Ok(Expr::Unary { op, operand: Box::new(self.expression(child(node, 0)?)?) })
    }

    fn string_literal(&self, node: SyntaxNode<'_>) -> Expr {
        let text = node.text();
        if let Some(verbatim) = text.strip_prefix("@\"") {
            let value = verbatim.strip_suffix('"').unwrap_or(verbatim).replace("\"\"", "\"");
            let span = node.span();
            let multi_line = node.tree().line_of(span.start) != node.tree().line_of(span.end);
            if multi_line && self.convert_strings() {
                return Expr::XmlText(value);
            }
            return Expr::Str(value);
        }
        let inner = text.strip_prefix('"').and_then(|t| t.strip_suffix('"')).unwrap_or(text);
        Expr::Str(unescape(inner))
    }

    fn object_creation(&self, node: SyntaxNode<'_>) -> Result<Expr> {
        let ty = self.type_ref(child(node, 0)?)?;
        let args = match node.child_node(SyntaxKind::ArgumentList) {
            Some(list) => Some(self.arguments(list)?),
            None => None,
        };
        let init = match node.child_node(SyntaxKind::InitializerExpression) {
            Some(init) => Some(self.object_initializer(init)?),
            None => None,
        };
        Ok(Expr::New { ty, args, init })
    }

    /// `With {.X = v}` when the first element assigns, `From {...}` otherwise.
    fn object_initializer(&self, init: SyntaxNode<'_>) -> Result<ObjectInit> {
        let elements: Vec<SyntaxNode<'_>> = init.child_nodes().collect();
        let is_object = elements
            .first()
            .is_some_and(|e| e.kind() == SyntaxKind::SimpleAssignmentExpression);
        if !is_object {
            return Ok(ObjectInit::From(self.initializer_items(init)?));
        }
        let mut fields = Vec::with_capacity(elements.len());
        for element in elements {
            if element.kind() == SyntaxKind::SimpleAssignmentExpression {
                let name = self.identifier(child(element, 0)?.text());
                let value = self.initializer_value(child(element, 1)?)?;
                fields.push(FieldInit { name: Some(name), value });
            } else {
                fields.push(FieldInit { name: None, value: self.initializer_value(element)? });
            }
        }
        Ok(ObjectInit::With(fields))
    }

    pub(super) fn initializer_items(&self, init: SyntaxNode<'_>) -> Result<Vec<Expr>> {
        init.child_nodes().map(|e| self.initializer_value(e)).collect()
    }

    /// A value that may itself be a braced initializer.
    pub(super) fn initializer_value(&self, node: SyntaxNode<'_>) -> Result<Expr> {
        match node.kind() {
            SyntaxKind::InitializerExpression => Ok(Expr::Collection(self.initializer_items(node)?)),
            _ => self.expression(node),
        }
    }

    /// `new T[n]` declares upper bounds, so each size becomes `n - 1`.
    fn array_creation(&self, node: SyntaxNode<'_>) -> Result<Expr> {
        let array_type = node
            .child_node(SyntaxKind::ArrayType)
            .ok_or_else(|| ConvertError::unmapped(node.kind(), "array creation"))?;
        let element = self.type_ref(child(array_type, 0)?)?;
        let mut ranks = array_type.child_nodes_of(SyntaxKind::ArrayRankSpecifier);
        let (bounds, first_rank) = match ranks.next() {
            Some(first) => {
                let bounds = first
                    .child_nodes()
                    .filter(|n| n.kind() != SyntaxKind::OmittedArraySizeExpression)
                    .map(|size| Ok(minus_one(self.expression(size)?)))
                    .collect::<Result<Vec<_>>>()?;
                let commas = first.child_tokens().filter(|t| t.kind() == SyntaxKind::Comma).count();
                (bounds, commas)
            }
            None => (Vec::new(), 0),
        };
        let ranks = ranks
            .map(|r| r.child_tokens().filter(|t| t.kind() == SyntaxKind::Comma).count())
            .collect();
        let items = match node.child_node(SyntaxKind::InitializerExpression) {
            Some(init) => self.initializer_items(init)?,
            None => Vec::new(),
        };
        Ok(Expr::NewArray { element, bounds, first_rank, ranks, items })
    }

    fn lambda(&self, params: Vec<Param>, body: SyntaxNode<'_>) -> Result<Expr> {
        let lambda = if body.kind() == SyntaxKind::Block {
            Lambda {
                kind: LambdaKind::Function,
                params,
                body: LambdaBody::Block(self.statements().block(body)?),
            }
        } else if is_statement_only(body.kind()) {
            let statement = self
                .statement_shaped(body)?
                .ok_or_else(|| ConvertError::unmapped(body.kind(), "lambda body"))?;
            Lambda { kind: LambdaKind::Sub, params, body: LambdaBody::Statement(Box::new(statement)) }
        } else {
            Lambda { kind: LambdaKind::Function, params, body: LambdaBody::Expression(self.expression(body)?) }
        };
        Ok(Expr::Lambda(Box::new(lambda)))
    }
}

fn compares_with_null(node: SyntaxNode<'_>) -> bool {
    node.child_nodes().any(|n| n.kind() == SyntaxKind::NullLiteralExpression)
}

fn binary_operator(kind: SyntaxKind) -> Option<BinaryOp> {
    use SyntaxKind as K;
    Some(match kind {
        K::AddExpression => BinaryOp::Add,
        K::SubtractExpression => BinaryOp::Subtract,
        K::MultiplyExpression => BinaryOp::Multiply,
        K::DivideExpression => BinaryOp::Divide,
        K::ModuloExpression => BinaryOp::Modulo,
        K::LeftShiftExpression => BinaryOp::LeftShift,
        K::RightShiftExpression => BinaryOp::RightShift,
        K::LogicalOrExpression => BinaryOp::OrElse,
        K::LogicalAndExpression => BinaryOp::AndAlso,
        K::BitwiseOrExpression => BinaryOp::Or,
        K::BitwiseAndExpression => BinaryOp::And,
        K::ExclusiveOrExpression => BinaryOp::Xor,
        K::EqualsExpression => BinaryOp::Equals,
        K::NotEqualsExpression => BinaryOp::NotEquals,
        K::LessThanExpression => BinaryOp::LessThan,
        K::LessThanOrEqualExpression => BinaryOp::LessThanOrEqual,
        K::GreaterThanExpression => BinaryOp::GreaterThan,
        K::GreaterThanOrEqualExpression => BinaryOp::GreaterThanOrEqual,
        _ => return None,
    })
}

/// VB operator or intrinsic written without keyword escaping.
fn intrinsic(name: &str, args: Vec<Expr>) -> Expr {
    Expr::invoke(Expr::Name { name: Ident::verbatim(name), type_args: Vec::new() }, args)
}

/// Constructs VB has no counterpart for keep their shape as a call on a
/// string naming them, `"Checked"(x)`.
fn inert(name: &str, arg: Expr) -> Expr {
    Expr::invoke(Expr::Str(name.to_string()), vec![arg])
}

/// `e - 1`, folded when `e` is an integer literal.
pub(super) fn minus_one(expr: Expr) -> Expr {
    offset(expr, -1)
}

pub(super) fn plus_one(expr: Expr) -> Expr {
    offset(expr, 1)
}

fn offset(expr: Expr, by: i64) -> Expr {
    if let Expr::Literal(text) = &expr {
        if let Ok(n) = text.parse::<i64>() {
            return Expr::int(n + by);
        }
    }
    let op = if by < 0 { BinaryOp::Subtract } else { BinaryOp::Add };
    Expr::binary(op, expr, Expr::int(by.abs()))
}

/// Numeric literal with VB prefixes and type characters.
pub(super) fn numeric_literal(text: &str) -> String {
    if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        let split = hex.find(|c: char| !c.is_ascii_hexdigit()).unwrap_or(hex.len());
        let (digits, suffix) = hex.split_at(split);
        return format!("&H{}{}", digits.to_ascii_uppercase(), type_character(suffix));
    }
    let split = text
        .rfind(|c: char| !matches!(c, 'u' | 'U' | 'l' | 'L' | 'm' | 'M' | 'f' | 'F' | 'd' | 'D'))
        .map(|i| i + 1)
        .unwrap_or(0);
    let (digits, suffix) = text.split_at(split);
    format!("{}{}", digits, type_character(suffix))
}

fn type_character(suffix: &str) -> &'static str {
    match suffix.to_ascii_lowercase().as_str() {
        "m" => "D",
        "f" => "F",
        "d" => "R",
        "l" => "L",
        "u" => "UI",
        "ul" | "lu" => "UL",
        _ => "",
    }
}

/// Decodes C# escape sequences.
pub(super) fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(e) = chars.next() else {
            out.push('\\');
            break;
        };
        match e {
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            '0' => out.push('\0'),
            'a' => out.push('\u{7}'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'v' => out.push('\u{b}'),
            'u' | 'U' | 'x' => {
                let max = match e {
                    'u' => 4,
                    'U' => 8,
                    _ => 4,
                };
                let mut digits = String::new();
                while digits.len() < max {
                    match chars.peek() {
                        Some(d) if d.is_ascii_hexdigit() => {
                            digits.push(*d);
                            chars.next();
                        }
                        _ => break,
                    }
                }
                match u32::from_str_radix(&digits, 16).ok().and_then(char::from_u32) {
                    Some(decoded) => out.push(decoded),
                    None => {
                        out.push('\\');
                        out.push(e);
                        out.push_str(&digits);
                    }
                }
            }
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::vb::render_expression;
    use crate::infrastructure::csharp::parser::parse_expression;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn convert(src: &str) -> String {
        let tree = parse_expression(src, &[]);
        assert!(tree.diagnostics().is_empty(), "{:?}", tree.diagnostics());
        let expr = NodeVisitor::default().expression(tree.root()).expect("translates");
        render_expression(&expr)
    }

    #[rstest]
    #[case("1.5m", "1.5D")]
    #[case("2f", "2F")]
    #[case("3d", "3R")]
    #[case("10L", "10L")]
    #[case("7u", "7UI")]
    #[case("7UL", "7UL")]
    #[case("0xFFul", "&HFFUL")]
    #[case("0x1f", "&H1F")]
    #[case("1e10", "1e10")]
    fn numeric_literals(#[case] src: &str, #[case] expected: &str) {
        assert_eq!(numeric_literal(src), expected);
    }

    #[rstest]
    #[case("a == null", "a Is Nothing")]
    #[case("null != a.B", "a.B IsNot Nothing")]
    #[case("a ?? b", "If(a, b)")]
    #[case("c ? 1 : 2", "If(c, 1, 2)")]
    #[case("a && !b || c", "a AndAlso Not b OrElse c")]
    #[case("(int)x", "CType(x, Integer)")]
    #[case("(Foo)x", "DirectCast(x, Foo)")]
    #[case("x as Foo", "TryCast(x, Foo)")]
    #[case("x is Foo", "TypeOf x Is Foo")]
    #[case("typeof(List<int>)", "GetType(List(Of Integer))")]
    #[case("default(int)", "Nothing")]
    #[case("this.x", "Me.x")]
    #[case("base.M()", "MyBase.M()")]
    #[case("a[1]", "a(1)")]
    #[case("checked(a + b)", "\"Checked\"(a + b)")]
    #[case("sizeof(int)", "\"SizeOf\"(Integer)")]
    #[case("M(ref a, name: b)", "M(a, name:=b)")]
    fn operators_and_calls(#[case] src: &str, #[case] expected: &str) {
        assert_eq!(convert(src), expected);
    }

    #[rstest]
    #[case("new int[5]", "New Integer(4) {}")]
    #[case("new int[n]", "New Integer(n - 1) {}")]
    #[case("new int[] { 1, 2 }", "New Integer() {1, 2}")]
    #[case("new[] { 1, 2 }", "{1, 2}")]
    #[case("new int[2, 3]", "New Integer(1, 2) {}")]
    #[case("new Foo { A = 1, B = 2 }", "New Foo With {.A = 1, .B = 2}")]
    #[case("new List<int> { 1, 2 }", "New List(Of Integer) From {1, 2}")]
    #[case("new Foo(1)", "New Foo(1)")]
    #[case("new { A = 1, b }", "New With {.A = 1, b}")]
    fn creation(#[case] src: &str, #[case] expected: &str) {
        assert_eq!(convert(src), expected);
    }

    #[rstest]
    #[case("x => x * 2", "Function(x) x * 2")]
    #[case("(a, b) => a + b", "Function(a, b) a + b")]
    #[case("x => total += x", "Sub(x) total += x")]
    #[case("() => { return 1; }", "Function()\n    Return 1\nEnd Function")]
    fn lambdas(#[case] src: &str, #[case] expected: &str) {
        assert_eq!(convert(src), expected);
    }

    #[test]
    fn statement_shaped_expression_in_value_position_is_a_placeholder() {
        assert_eq!(
            convert("f(x++)"),
            "f(\"'x++' could not be converted to a ExpressionSyntax\")"
        );
    }

    #[test]
    fn escapes_are_decoded() {
        assert_eq!(unescape(r#"a\tb\"cA\\"#), "a\tb\"cA\\");
        assert_eq!(convert(r#""line\r\n""#), "\"line\" & vbCrLf");
    }

    #[test]
    fn verbatim_strings_follow_the_xml_flag() {
        let src = "@\"one\ntwo\"";
        let tree = parse_expression(src, &[]);
        let plain = NodeVisitor::new(None, false).expression(tree.root()).expect("plain");
        assert_eq!(plain, Expr::Str("one\ntwo".into()));
        let xml = NodeVisitor::new(None, true).expression(tree.root()).expect("xml");
        assert_eq!(xml, Expr::XmlText("one\ntwo".into()));
    }
}
