//! Translator for declarations, types and expressions.
//!
//! The visitor is split across this module (names, types, modifiers,
//! attributes, parameters), `declarations`, `expressions` and `query`, each
//! adding an `impl NodeVisitor` block.

use crate::domain::syntax::{SyntaxKind, SyntaxNode, SyntaxToken};
use crate::domain::vb::{
    Argument, Attribute, AttributeBlock, Constraint, Ident, Node, Param, TypeParam, TypeRef,
};

use super::statement_visitor::StatementVisitor;
use super::{ConvertError, IdentifierMap};

pub type Result<T> = std::result::Result<T, ConvertError>;

/// Maps C# syntax onto the VB model. Holds only translation settings, so one
/// visitor can translate any number of trees.
#[derive(Debug, Clone, Copy, Default)]
pub struct NodeVisitor<'m> {
    identifier_map: Option<&'m IdentifierMap>,
    convert_strings: bool,
}

impl<'m> NodeVisitor<'m> {
    pub fn new(identifier_map: Option<&'m IdentifierMap>, convert_strings: bool) -> Self {
        NodeVisitor { identifier_map, convert_strings }
    }

    pub fn convert_strings(&self) -> bool {
        self.convert_strings
    }

    pub fn statements(&self) -> StatementVisitor<'_, 'm> {
        StatementVisitor::new(self)
    }

    /// Translates any non-statement node. Assignments and increments come
    /// back as statements because VB has no expression form for them.
    pub fn visit(&self, node: SyntaxNode<'_>) -> Result<Node> {
        let kind = node.kind();
        match kind {
            SyntaxKind::CompilationUnit => Ok(Node::CompilationUnit(self.compilation_unit(node)?)),
            SyntaxKind::ArrayType | SyntaxKind::NullableType | SyntaxKind::PointerType => {
                Ok(Node::Type(self.type_ref(node)?))
            }
            k if super::declarations::is_member(k) => Ok(Node::Statement(self.member(node)?)),
            k if is_statement_only(k) => match self.statement_shaped(node)? {
                Some(statement) => Ok(Node::Statement(statement)),
                None => Err(ConvertError::unmapped(kind, "node")),
            },
            k if k.is_statement() => Err(ConvertError::unmapped(kind, "node")),
            _ => Ok(Node::Expr(self.expression(node)?)),
        }
    }

    // ── Names ─────────────────────────────────────────────────────────

    /// Applies the identifier map, then escapes VB keywords.
    pub fn identifier(&self, text: &str) -> Ident {
        let text = text.strip_prefix('@').unwrap_or(text);
        let mapped = self
            .identifier_map
            .and_then(|map| map.get(text))
            .map(String::as_str)
            .unwrap_or(text);
        Ident::new(mapped)
    }

    pub(super) fn identifier_token(&self, token: SyntaxToken<'_>) -> Ident {
        self.identifier(token.text())
    }

    /// The declared name of a member, type, parameter or variable.
    pub(super) fn declared_name(&self, node: SyntaxNode<'_>) -> Result<Ident> {
        node.token(SyntaxKind::Identifier)
            .map(|t| self.identifier_token(t))
            .ok_or_else(|| ConvertError::unmapped(node.kind(), "declaration name"))
    }

    // ── Types ─────────────────────────────────────────────────────────

    pub fn type_ref(&self, node: SyntaxNode<'_>) -> Result<TypeRef> {
        match node.kind() {
            SyntaxKind::PredefinedType => {
                let kw = node
                    .first_token()
                    .map(|t| t.kind())
                    .unwrap_or(SyntaxKind::ObjectKw);
                Ok(TypeRef::Predefined(predefined_name(kw)))
            }
            SyntaxKind::IdentifierName => Ok(TypeRef::Named {
                qualifier: None,
                name: self.identifier(node.text()),
                args: Vec::new(),
            }),
            SyntaxKind::GenericName => Ok(TypeRef::Named {
                qualifier: None,
                name: self.declared_name(node)?,
                args: self.type_arguments(node)?,
            }),
            SyntaxKind::QualifiedName => {
                let left = child(node, 0)?;
                let right = child(node, 1)?;
                let right = self.type_ref(right)?;
                Ok(requalify(right, self.type_ref(left)?))
            }
            SyntaxKind::AliasQualifiedName => {
                let alias = child(node, 0)?;
                let qualifier = if alias.text() == "global" {
                    TypeRef::Global
                } else {
                    self.type_ref(alias)?
                };
                let right = self.type_ref(child(node, 1)?)?;
                Ok(requalify(right, qualifier))
            }
            SyntaxKind::ArrayType => {
                let element = self.type_ref(child(node, 0)?)?;
                let ranks = node
                    .child_nodes_of(SyntaxKind::ArrayRankSpecifier)
                    .map(|rank| rank.child_tokens().filter(|t| t.kind() == SyntaxKind::Comma).count())
                    .collect();
                Ok(TypeRef::Array(Box::new(element), ranks))
            }
            SyntaxKind::NullableType => Ok(TypeRef::Nullable(Box::new(self.type_ref(child(node, 0)?)?))),
            SyntaxKind::PointerType => self.type_ref(child(node, 0)?),
            kind => Err(ConvertError::unmapped(kind, "type")),
        }
    }

    /// Type arguments of a generic name; omitted arguments (`List<>`) stay empty.
    pub(super) fn type_arguments(&self, generic: SyntaxNode<'_>) -> Result<Vec<TypeRef>> {
        let Some(list) = generic.child_node(SyntaxKind::TypeArgumentList) else {
            return Ok(Vec::new());
        };
        let args = list
            .child_nodes()
            .map(|n| self.type_ref(n))
            .collect::<Result<Vec<_>>>()?;
        if args.is_empty() {
            let commas = list.child_tokens().filter(|t| t.kind() == SyntaxKind::Comma).count();
            return Ok(vec![TypeRef::Predefined(""); commas + 1]);
        }
        Ok(args)
    }

    // ── Modifiers ─────────────────────────────────────────────────────

    /// VB modifiers for a declaration. `on_type` selects the type-level
    /// spelling of `abstract` and `sealed`.
    pub(super) fn modifiers(&self, node: SyntaxNode<'_>, on_type: bool) -> Vec<String> {
        node.child_tokens()
            .filter(|t| t.kind().is_modifier_keyword())
            .filter_map(|t| modifier(t.kind(), t.text(), on_type))
            .collect()
    }

    // ── Attributes ────────────────────────────────────────────────────

    pub(super) fn attributes(&self, node: SyntaxNode<'_>) -> Result<Vec<AttributeBlock>> {
        self.attribute_blocks(node, false)
    }

    /// Lists targeted at `return`, which VB writes after `As`.
    pub(super) fn return_attributes(&self, node: SyntaxNode<'_>) -> Result<Vec<AttributeBlock>> {
        self.attribute_blocks(node, true)
    }

    fn attribute_blocks(&self, node: SyntaxNode<'_>, returns: bool) -> Result<Vec<AttributeBlock>> {
        let mut blocks = Vec::new();
        for list in node.child_nodes_of(SyntaxKind::AttributeList) {
            let target = list
                .child_node(SyntaxKind::AttributeTargetSpecifier)
                .and_then(|t| t.first_token());
            let is_return = target.is_some_and(|t| t.text() == "return");
            if is_return != returns {
                continue;
            }
            blocks.push(self.attribute_block(list)?);
        }
        Ok(blocks)
    }

    pub(super) fn attribute_block(&self, list: SyntaxNode<'_>) -> Result<AttributeBlock> {
        let target = list
            .child_node(SyntaxKind::AttributeTargetSpecifier)
            .and_then(|t| t.first_token())
            .and_then(|t| match t.kind() {
                SyntaxKind::AssemblyKw => Some("Assembly"),
                SyntaxKind::ModuleKw => Some("Module"),
                _ => None,
            });
        let attributes = list
            .child_nodes_of(SyntaxKind::Attribute)
            .map(|a| self.attribute(a))
            .collect::<Result<Vec<_>>>()?;
        Ok(AttributeBlock { target, attributes })
    }

    fn attribute(&self, node: SyntaxNode<'_>) -> Result<Attribute> {
        let name = self.type_ref(child(node, 0)?)?;
        let args = match node.child_node(SyntaxKind::AttributeArgumentList) {
            Some(list) => Some(
                list.child_nodes_of(SyntaxKind::AttributeArgument)
                    .map(|arg| self.named_argument(arg))
                    .collect::<Result<Vec<_>>>()?,
            ),
            None => None,
        };
        Ok(Attribute { name, args })
    }

    /// An argument that may carry `name =` or `name:`; both become `name:=`.
    pub(super) fn named_argument(&self, node: SyntaxNode<'_>) -> Result<Argument> {
        let name = node
            .child_nodes()
            .find(|n| matches!(n.kind(), SyntaxKind::NameEquals | SyntaxKind::NameColon))
            .and_then(|n| n.child_node(SyntaxKind::IdentifierName))
            .map(|n| self.identifier(n.text()));
        let value = node
            .child_nodes()
            .filter(|n| !matches!(n.kind(), SyntaxKind::NameEquals | SyntaxKind::NameColon))
            .last()
            .ok_or_else(|| ConvertError::unmapped(node.kind(), "argument"))?;
        Ok(Argument { name, value: self.expression(value)? })
    }

    // ── Parameters ────────────────────────────────────────────────────

    /// Parameters of a `ParameterList` or `BracketedParameterList`.
    pub(super) fn parameters(&self, list: SyntaxNode<'_>) -> Result<Vec<Param>> {
        list.child_nodes_of(SyntaxKind::Parameter)
            .map(|p| self.parameter(p))
            .collect()
    }

    pub(super) fn parameter(&self, node: SyntaxNode<'_>) -> Result<Param> {
        let name = match node.token(SyntaxKind::Identifier) {
            Some(token) => self.identifier_token(token),
            None if node.has_token(SyntaxKind::ArgListKw) => Ident::new("__arglist"),
            None => return Err(ConvertError::unmapped(node.kind(), "parameter")),
        };
        let mut param = Param::named(name);
        param.attributes = self.attributes(node)?;
        for token in node.child_tokens() {
            match token.kind() {
                SyntaxKind::RefKw | SyntaxKind::OutKw => param.modifiers.push("ByRef".to_string()),
                SyntaxKind::ParamsKw => param.modifiers.push("ParamArray".to_string()),
                _ => {}
            }
        }
        if let Some(ty) = node
            .child_nodes()
            .find(|n| n.kind().is_type_syntax())
        {
            param.ty = Some(self.type_ref(ty)?);
        }
        if let Some(default) = node.child_node(SyntaxKind::EqualsValueClause) {
            param.modifiers.insert(0, "Optional".to_string());
            param.default = Some(self.expression(child(default, 0)?)?);
        }
        Ok(param)
    }

    /// Whether the first parameter is marked `this`.
    pub(super) fn is_extension(&self, parameters: SyntaxNode<'_>) -> bool {
        parameters
            .child_node(SyntaxKind::Parameter)
            .is_some_and(|p| p.has_token(SyntaxKind::ThisKw))
    }

    /// Type parameters with the constraints from the `where` clauses of `decl`.
    pub(super) fn type_parameters(&self, decl: SyntaxNode<'_>) -> Result<Vec<TypeParam>> {
        let Some(list) = decl.child_node(SyntaxKind::TypeParameterList) else {
            return Ok(Vec::new());
        };
        let mut params = Vec::new();
        for tp in list.child_nodes_of(SyntaxKind::TypeParameter) {
            let raw = tp.token(SyntaxKind::Identifier).map(|t| t.text()).unwrap_or_default();
            let variance = if tp.has_token(SyntaxKind::InKw) {
                Some("In")
            } else if tp.has_token(SyntaxKind::OutKw) {
                Some("Out")
            } else {
                None
            };
            let mut constraints = Vec::new();
            for clause in decl.child_nodes_of(SyntaxKind::TypeParameterConstraintClause) {
                let constrained = clause.child_node(SyntaxKind::IdentifierName).map(|n| n.text());
                if constrained != Some(raw) {
                    continue;
                }
                for c in clause.child_nodes().skip(1) {
                    constraints.push(match c.kind() {
                        SyntaxKind::ClassOrStructConstraint if c.has_token(SyntaxKind::ClassKw) => {
                            Constraint::Class
                        }
                        SyntaxKind::ClassOrStructConstraint => Constraint::Structure,
                        SyntaxKind::ConstructorConstraint => Constraint::New,
                        _ => Constraint::Type(self.type_ref(child(c, 0)?)?),
                    });
                }
            }
            params.push(TypeParam { variance, name: self.identifier(raw), constraints });
        }
        Ok(params)
    }
}

/// Whether `kind` is an expression VB can only write as a statement.
pub(super) fn is_statement_only(kind: SyntaxKind) -> bool {
    kind.is_assignment_expression()
        || matches!(
            kind,
            SyntaxKind::PreIncrementExpression
                | SyntaxKind::PreDecrementExpression
                | SyntaxKind::PostIncrementExpression
                | SyntaxKind::PostDecrementExpression
        )
}

/// The `n`th child node, or an error naming the malformed parent.
pub(super) fn child(node: SyntaxNode<'_>, n: usize) -> Result<SyntaxNode<'_>> {
    node.nth_child_node(n)
        .ok_or_else(|| ConvertError::unmapped(node.kind(), "incomplete node"))
}

pub(super) fn is_var(node: SyntaxNode<'_>) -> bool {
    node.kind() == SyntaxKind::IdentifierName && node.text() == "var"
}

/// Hangs `qualifier` off the leftmost segment of `name`.
fn requalify(name: TypeRef, qualifier: TypeRef) -> TypeRef {
    match name {
        TypeRef::Named { qualifier: None, name, args } => TypeRef::Named {
            qualifier: Some(Box::new(qualifier)),
            name,
            args,
        },
        TypeRef::Named { qualifier: Some(inner), name, args } => TypeRef::Named {
            qualifier: Some(Box::new(requalify(*inner, qualifier))),
            name,
            args,
        },
        other => other,
    }
}

pub(super) fn predefined_name(kind: SyntaxKind) -> &'static str {
    match kind {
        SyntaxKind::BoolKw => "Boolean",
        SyntaxKind::ByteKw => "Byte",
        SyntaxKind::SByteKw => "SByte",
        SyntaxKind::CharKw => "Char",
        SyntaxKind::DecimalKw => "Decimal",
        SyntaxKind::DoubleKw => "Double",
        SyntaxKind::FloatKw => "Single",
        SyntaxKind::IntKw => "Integer",
        SyntaxKind::UIntKw => "UInteger",
        SyntaxKind::LongKw => "Long",
        SyntaxKind::ULongKw => "ULong",
        SyntaxKind::ShortKw => "Short",
        SyntaxKind::UShortKw => "UShort",
        SyntaxKind::StringKw => "String",
        SyntaxKind::VoidKw => "Void",
        _ => "Object",
    }
}

fn modifier(kind: SyntaxKind, text: &str, on_type: bool) -> Option<String> {
    let mapped = match kind {
        SyntaxKind::AbstractKw if on_type => "MustInherit",
        SyntaxKind::AbstractKw => "MustOverride",
        SyntaxKind::SealedKw if on_type => "NotInheritable",
        SyntaxKind::SealedKw => "NotOverridable",
        SyntaxKind::ConstKw => "Const",
        SyntaxKind::InternalKw => "Friend",
        SyntaxKind::NewKw => "Overloads",
        SyntaxKind::OverrideKw => "Overrides",
        SyntaxKind::PartialKw => "Partial",
        SyntaxKind::PrivateKw => "Private",
        SyntaxKind::ProtectedKw => "Protected",
        SyntaxKind::PublicKw => "Public",
        SyntaxKind::ReadOnlyKw => "ReadOnly",
        SyntaxKind::StaticKw => "Shared",
        SyntaxKind::VirtualKw => "Overridable",
        SyntaxKind::ImplicitKw => "Widening",
        SyntaxKind::ExplicitKw => "Narrowing",
        SyntaxKind::RefKw | SyntaxKind::OutKw => "ByRef",
        SyntaxKind::ParamsKw => "ParamArray",
        SyntaxKind::ThisKw => return None,
        _ => {
            let ident = Ident::new(text);
            return Some(if ident.escaped { format!("[{}]", ident.text) } else { ident.text });
        }
    };
    Some(mapped.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::vb::render_expression;
    use crate::domain::vb::Expr;
    use crate::infrastructure::csharp::parser::parse_compilation_unit;
    use rstest::rstest;

    #[rstest]
    #[case(SyntaxKind::AbstractKw, true, Some("MustInherit"))]
    #[case(SyntaxKind::AbstractKw, false, Some("MustOverride"))]
    #[case(SyntaxKind::SealedKw, true, Some("NotInheritable"))]
    #[case(SyntaxKind::SealedKw, false, Some("NotOverridable"))]
    #[case(SyntaxKind::InternalKw, false, Some("Friend"))]
    #[case(SyntaxKind::NewKw, false, Some("Overloads"))]
    #[case(SyntaxKind::StaticKw, false, Some("Shared"))]
    #[case(SyntaxKind::VirtualKw, false, Some("Overridable"))]
    #[case(SyntaxKind::ThisKw, false, None)]
    #[case(SyntaxKind::VolatileKw, false, Some("volatile"))]
    fn modifier_table(#[case] kind: SyntaxKind, #[case] on_type: bool, #[case] expected: Option<&str>) {
        let text = kind.fixed_text().unwrap_or_default();
        assert_eq!(modifier(kind, text, on_type).as_deref(), expected);
    }

    #[test]
    fn identifier_map_applies_before_escaping() {
        let mut map = IdentifierMap::new();
        map.insert("count".to_string(), "End".to_string());
        let visitor = NodeVisitor::new(Some(&map), false);
        assert_eq!(visitor.identifier("count"), Ident { text: "End".into(), escaped: true });
        assert_eq!(visitor.identifier("@class"), Ident { text: "class".into(), escaped: true });
        assert_eq!(visitor.identifier("total"), Ident::new("total"));
    }

    #[test]
    fn qualified_and_generic_types() {
        let tree = parse_compilation_unit(
            "class C { global::System.Collections.Generic.Dictionary<string, int[]> f; }",
            &[],
        );
        let ty = tree
            .root()
            .descendants()
            .find(|n| n.kind() == SyntaxKind::VariableDeclaration)
            .and_then(|d| d.nth_child_node(0))
            .expect("field type");
        let visitor = NodeVisitor::default();
        let rendered = render_expression(&Expr::Type(visitor.type_ref(ty).expect("type")));
        assert_eq!(
            rendered,
            "Global.System.Collections.Generic.Dictionary(Of String, Integer())"
        );
    }
}
