use crate::domain::syntax::{SyntaxKind, SyntaxNode};
use crate::domain::vb::{
    Attribute, AttributeBlock, CompilationUnit, Declarator, EnumBlock, EnumMember, Event, Expr,
    Ident, Method, MethodKind, Param, Property, Statement, StatementKind, TypeBlock, TypeKind,
    TypeRef,
};

use super::expressions::minus_one;
use super::node_visitor::{child, is_var, NodeVisitor, Result};
use super::{placeholder_statement, trivia, ConvertError, TargetConstruct};

/// Declarations that can appear in a type or namespace body.
pub(super) fn is_member(kind: SyntaxKind) -> bool {
    use SyntaxKind as K;
    kind.is_type_declaration()
        || matches!(
            kind,
            K::FieldDeclaration
                | K::EventFieldDeclaration
                | K::MethodDeclaration
                | K::ConstructorDeclaration
                | K::DestructorDeclaration
                | K::PropertyDeclaration
                | K::IndexerDeclaration
                | K::EventDeclaration
                | K::OperatorDeclaration
                | K::ConversionOperatorDeclaration
                | K::IncompleteMember
        )
}

impl NodeVisitor<'_> {
    /// Translates a file. `using` directives from every namespace are
    /// hoisted to the top as `Imports`.
    pub fn compilation_unit(&self, node: SyntaxNode<'_>) -> Result<CompilationUnit> {
        let mut unit = CompilationUnit::default();
        for item in node.child_nodes() {
            match item.kind() {
                SyntaxKind::UsingDirective | SyntaxKind::ExternAliasDirective => {
                    unit.imports.push(self.import(item)?)
                }
                SyntaxKind::AttributeList => {
                    let block = self.attribute_block(item)?;
                    unit.attributes.push(with_trivia(
                        item,
                        Statement::new(StatementKind::Attributes(vec![block])),
                    ));
                }
                SyntaxKind::NamespaceDeclaration => {
                    let namespace = self.namespace(item, &mut unit.imports)?;
                    unit.members.push(namespace);
                }
                _ => unit.members.push(self.member(item)?),
            }
        }
        if let Some(eof) = node.last_token().filter(|t| t.kind() == SyntaxKind::EndOfFile) {
            unit.trailing = trivia::token_leading(eof);
        }
        Ok(unit)
    }

    fn import(&self, node: SyntaxNode<'_>) -> Result<Statement> {
        if node.kind() == SyntaxKind::ExternAliasDirective {
            let statement = placeholder_statement(node.text(), TargetConstruct::ImportsStatement);
            return Ok(statement.with_leading(trivia::leading(node)));
        }
        let alias = node
            .child_node(SyntaxKind::NameEquals)
            .and_then(|n| n.child_node(SyntaxKind::IdentifierName))
            .map(|n| self.identifier(n.text()));
        let name = node
            .child_nodes()
            .filter(|n| n.kind() != SyntaxKind::NameEquals)
            .last()
            .ok_or_else(|| ConvertError::unmapped(node.kind(), "using directive"))?;
        let name = self.type_ref(name)?;
        Ok(with_trivia(node, Statement::new(StatementKind::Imports { alias, name })))
    }

    fn namespace(&self, node: SyntaxNode<'_>, imports: &mut Vec<Statement>) -> Result<Statement> {
        let name = self.type_ref(child(node, 0)?)?;
        let mut members = Vec::new();
        for item in node.child_nodes().skip(1) {
            match item.kind() {
                SyntaxKind::UsingDirective | SyntaxKind::ExternAliasDirective => {
                    imports.push(self.import(item)?)
                }
                SyntaxKind::NamespaceDeclaration => members.push(self.namespace(item, imports)?),
                _ => members.push(self.member(item)?),
            }
        }
        members.extend(trivia::before_close(node));
        Ok(with_trivia(node, Statement::new(StatementKind::Namespace { name, members })))
    }

    /// Translates one type member or type declaration, with its comments.
    pub fn member(&self, node: SyntaxNode<'_>) -> Result<Statement> {
        use SyntaxKind as K;
        let kind = match node.kind() {
            K::ClassDeclaration | K::StructDeclaration | K::InterfaceDeclaration => {
                StatementKind::Type(Box::new(self.type_block(node)?))
            }
            K::EnumDeclaration => StatementKind::Enum(Box::new(self.enum_block(node)?)),
            K::DelegateDeclaration => StatementKind::Method(Box::new(self.delegate(node)?)),
            K::FieldDeclaration => self.field(node)?,
            K::EventFieldDeclaration => StatementKind::Event(Box::new(self.event_field(node)?)),
            K::MethodDeclaration => StatementKind::Method(Box::new(self.method(node)?)),
            K::ConstructorDeclaration => StatementKind::Method(Box::new(self.constructor(node)?)),
            K::DestructorDeclaration => StatementKind::Method(Box::new(self.destructor(node)?)),
            K::PropertyDeclaration => {
                let name = self.declared_name(node)?;
                StatementKind::Property(Box::new(self.property(node, name, None)?))
            }
            K::IndexerDeclaration => {
                let params = match node.child_node(K::BracketedParameterList) {
                    Some(list) => Some(self.parameters(list)?),
                    None => None,
                };
                StatementKind::Property(Box::new(self.property(node, Ident::verbatim("Item"), params)?))
            }
            K::EventDeclaration => StatementKind::Event(Box::new(self.custom_event(node)?)),
            K::OperatorDeclaration | K::ConversionOperatorDeclaration => {
                StatementKind::Method(Box::new(self.operator(node)?))
            }
            K::IncompleteMember => self.incomplete_member(node)?,
            other => return Err(ConvertError::unmapped(other, "member")),
        };
        Ok(with_trivia(node, Statement::new(kind)))
    }

    fn type_block(&self, node: SyntaxNode<'_>) -> Result<TypeBlock> {
        let mut modifiers = self.modifiers(node, true);
        let kind = match node.kind() {
            SyntaxKind::StructDeclaration => TypeKind::Structure,
            SyntaxKind::InterfaceDeclaration => TypeKind::Interface,
            _ if node.has_token(SyntaxKind::StaticKw) => {
                modifiers.retain(|m| m != "Shared");
                TypeKind::Module
            }
            _ => TypeKind::Class,
        };
        let bases = match node.child_node(SyntaxKind::BaseList) {
            Some(list) => list.child_nodes().collect(),
            None => Vec::new(),
        };
        let (inherits, implements) = match kind {
            TypeKind::Structure => (Vec::new(), bases),
            TypeKind::Interface => (bases, Vec::new()),
            _ => match bases.first().copied() {
                Some(first) if !looks_like_interface(first) => (vec![first], bases[1..].to_vec()),
                _ => (Vec::new(), bases),
            },
        };
        let mut members = node
            .child_nodes()
            .filter(|n| is_member(n.kind()))
            .map(|n| self.member(n))
            .collect::<Result<Vec<_>>>()?;
        if kind == TypeKind::Module {
            members.iter_mut().for_each(drop_shared);
        }
        members.extend(trivia::before_close(node));
        Ok(TypeBlock {
            attributes: self.attributes(node)?,
            modifiers,
            kind,
            name: self.declared_name(node)?,
            type_params: self.type_parameters(node)?,
            inherits: self.type_refs(&inherits)?,
            implements: self.type_refs(&implements)?,
            members,
        })
    }

    fn type_refs(&self, nodes: &[SyntaxNode<'_>]) -> Result<Vec<TypeRef>> {
        nodes.iter().map(|n| self.type_ref(*n)).collect()
    }

    fn enum_block(&self, node: SyntaxNode<'_>) -> Result<EnumBlock> {
        let underlying = match node.child_node(SyntaxKind::BaseList).and_then(|b| b.nth_child_node(0)) {
            Some(ty) => Some(self.type_ref(ty)?),
            None => None,
        };
        let mut members = Vec::new();
        for m in node.child_nodes_of(SyntaxKind::EnumMemberDeclaration) {
            let value = match m.child_node(SyntaxKind::EqualsValueClause) {
                Some(eq) => Some(self.expression(child(eq, 0)?)?),
                None => None,
            };
            let member = EnumMember { attributes: self.attributes(m)?, name: self.declared_name(m)?, value };
            members.push(with_trivia(m, Statement::new(StatementKind::EnumMember(member))));
        }
        members.extend(trivia::before_close(node));
        Ok(EnumBlock {
            attributes: self.attributes(node)?,
            modifiers: self.modifiers(node, true),
            name: self.declared_name(node)?,
            underlying,
            members,
        })
    }

    fn delegate(&self, node: SyntaxNode<'_>) -> Result<Method> {
        let returns = return_type(node)?;
        let kind = if is_void(returns) { MethodKind::DelegateSub } else { MethodKind::DelegateFunction };
        let mut method = Method::new(kind, Some(self.declared_name(node)?));
        method.attributes = self.attributes(node)?;
        method.return_attributes = self.return_attributes(node)?;
        method.modifiers = self.modifiers(node, false);
        method.type_params = self.type_parameters(node)?;
        method.params = Some(self.parameter_list(node)?);
        if kind == MethodKind::DelegateFunction {
            method.returns = Some(self.type_ref(returns)?);
        }
        Ok(method)
    }

    fn field(&self, node: SyntaxNode<'_>) -> Result<StatementKind> {
        let mut modifiers = self.modifiers(node, false);
        if modifiers.is_empty() {
            modifiers.push("Dim".to_string());
        }
        let declaration = node
            .child_node(SyntaxKind::VariableDeclaration)
            .ok_or_else(|| ConvertError::unmapped(node.kind(), "field"))?;
        Ok(StatementKind::Declare {
            attributes: self.attributes(node)?,
            modifiers,
            declarators: self.variable_declarators(declaration)?,
        })
    }

    /// Declarators of a `VariableDeclaration`; `var` leaves the type to inference.
    pub(super) fn variable_declarators(&self, declaration: SyntaxNode<'_>) -> Result<Vec<Declarator>> {
        let ty_node = child(declaration, 0)?;
        let ty = if is_var(ty_node) { None } else { Some(self.type_ref(ty_node)?) };
        declaration
            .child_nodes_of(SyntaxKind::VariableDeclarator)
            .map(|d| {
                let bounds = match d.child_node(SyntaxKind::BracketedArgumentList) {
                    Some(list) => Some(
                        self.arguments(list)?
                            .into_iter()
                            .map(|a| minus_one(a.value))
                            .collect(),
                    ),
                    None => None,
                };
                let value = match d.child_node(SyntaxKind::EqualsValueClause) {
                    Some(eq) => Some(self.initializer_value(child(eq, 0)?)?),
                    None => None,
                };
                Ok(Declarator { name: self.declared_name(d)?, ty: ty.clone(), bounds, value })
            })
            .collect()
    }

    fn event_field(&self, node: SyntaxNode<'_>) -> Result<Event> {
        let declaration = node
            .child_node(SyntaxKind::VariableDeclaration)
            .ok_or_else(|| ConvertError::unmapped(node.kind(), "event"))?;
        let first = declaration
            .child_node(SyntaxKind::VariableDeclarator)
            .ok_or_else(|| ConvertError::unmapped(node.kind(), "event"))?;
        Ok(Event {
            attributes: self.attributes(node)?,
            modifiers: self.modifiers(node, false),
            name: self.declared_name(first)?,
            ty: self.type_ref(child(declaration, 0)?)?,
            accessors: None,
        })
    }

    fn method(&self, node: SyntaxNode<'_>) -> Result<Method> {
        let returns = return_type(node)?;
        let kind = if is_void(returns) { MethodKind::Sub } else { MethodKind::Function };
        let name = self.declared_name(node)?;
        let mut method = Method::new(kind, Some(name.clone()));
        method.attributes = self.attributes(node)?;
        method.return_attributes = self.return_attributes(node)?;
        method.modifiers = self.modifiers(node, false);
        method.type_params = self.type_parameters(node)?;
        method.params = Some(self.parameter_list(node)?);
        if kind == MethodKind::Function {
            method.returns = Some(self.type_ref(returns)?);
        }
        method.implements = self.explicit_interface(node, name)?;
        if node
            .child_node(SyntaxKind::ParameterList)
            .is_some_and(|list| self.is_extension(list))
        {
            method.attributes.insert(0, extension_attribute());
            method.modifiers.retain(|m| m != "Shared");
        }
        method.body = self.body(node)?;
        Ok(method)
    }

    fn constructor(&self, node: SyntaxNode<'_>) -> Result<Method> {
        let mut method = Method::new(MethodKind::Constructor, None);
        method.attributes = self.attributes(node)?;
        method.modifiers = self.modifiers(node, false);
        method.params = Some(self.parameter_list(node)?);
        let initializer = node.child_nodes().find(|n| {
            matches!(n.kind(), SyntaxKind::BaseConstructorInitializer | SyntaxKind::ThisConstructorInitializer)
        });
        let mut body = Vec::new();
        if let Some(init) = initializer {
            let target = if init.kind() == SyntaxKind::BaseConstructorInitializer {
                Expr::MyBase
            } else {
                Expr::MyClass
            };
            let args = match init.child_node(SyntaxKind::ArgumentList) {
                Some(list) => self.arguments(list)?,
                None => Vec::new(),
            };
            body.push(Statement::new(StatementKind::Call(Expr::Invoke {
                target: Box::new(Expr::member(target, "New")),
                args,
            })));
        }
        match self.body(node)? {
            Some(statements) => {
                body.extend(statements);
                method.body = Some(body);
            }
            None if !body.is_empty() => method.body = Some(body),
            None => {}
        }
        Ok(method)
    }

    fn destructor(&self, node: SyntaxNode<'_>) -> Result<Method> {
        let mut method = Method::new(MethodKind::Sub, Some(Ident::verbatim("Finalize")));
        method.attributes = self.attributes(node)?;
        method.params = Some(Vec::new());
        method.body = self.body(node)?;
        Ok(method)
    }

    /// Properties and indexers. A single accessor makes the property
    /// `ReadOnly` or `WriteOnly`; accessors without bodies give the
    /// one-line auto-property form.
    fn property(&self, node: SyntaxNode<'_>, name: Ident, params: Option<Vec<Param>>) -> Result<Property> {
        let ty = self.type_ref(return_type(node)?)?;
        let accessor_nodes: Vec<SyntaxNode<'_>> = node
            .child_node(SyntaxKind::AccessorList)
            .map(|list| list.child_nodes().filter(|n| n.kind().is_accessor()).collect())
            .unwrap_or_default();
        let mut modifiers = self.modifiers(node, false);
        if let [only] = accessor_nodes.as_slice() {
            match only.kind() {
                SyntaxKind::GetAccessorDeclaration => modifiers.push("ReadOnly".to_string()),
                SyntaxKind::SetAccessorDeclaration => modifiers.push("WriteOnly".to_string()),
                _ => {}
            }
        }
        let accessors = if accessor_nodes.iter().all(|a| a.child_node(SyntaxKind::Block).is_none()) {
            None
        } else {
            Some(
                accessor_nodes
                    .iter()
                    .map(|a| self.accessor(*a, &ty))
                    .collect::<Result<Vec<_>>>()?,
            )
        };
        Ok(Property {
            attributes: self.attributes(node)?,
            modifiers,
            implements: self.explicit_interface(node, name.clone())?,
            name,
            params,
            ty,
            accessors,
        })
    }

    fn accessor(&self, node: SyntaxNode<'_>, ty: &TypeRef) -> Result<Method> {
        let kind = match node.kind() {
            SyntaxKind::GetAccessorDeclaration => MethodKind::Get,
            SyntaxKind::SetAccessorDeclaration => MethodKind::Set,
            SyntaxKind::AddAccessorDeclaration => MethodKind::AddHandler,
            _ => MethodKind::RemoveHandler,
        };
        let mut method = Method::new(kind, None);
        method.attributes = self.attributes(node)?;
        method.modifiers = self.modifiers(node, false);
        if kind != MethodKind::Get {
            let mut value = Param::named(Ident::new("value"));
            value.ty = Some(ty.clone());
            method.params = Some(vec![value]);
        }
        method.body = Some(self.body(node)?.unwrap_or_default());
        Ok(method)
    }

    fn custom_event(&self, node: SyntaxNode<'_>) -> Result<Event> {
        let ty = self.type_ref(return_type(node)?)?;
        let accessors = match node.child_node(SyntaxKind::AccessorList) {
            Some(list) => list
                .child_nodes()
                .filter(|n| n.kind().is_accessor())
                .map(|a| self.accessor(a, &ty))
                .collect::<Result<Vec<_>>>()?,
            None => Vec::new(),
        };
        Ok(Event {
            attributes: self.attributes(node)?,
            modifiers: self.modifiers(node, false),
            name: self.declared_name(node)?,
            ty,
            accessors: Some(accessors),
        })
    }

    /// Operators and conversion operators; `implicit` and `explicit` come
    /// through the modifier table as `Widening` and `Narrowing`.
    fn operator(&self, node: SyntaxNode<'_>) -> Result<Method> {
        let name = if node.kind() == SyntaxKind::ConversionOperatorDeclaration {
            "CType".to_string()
        } else {
            let token = node
                .child_tokens()
                .skip_while(|t| t.kind() != SyntaxKind::OperatorKw)
                .nth(1)
                .ok_or_else(|| ConvertError::unmapped(node.kind(), "operator"))?;
            operator_name(token.text())
                .ok_or_else(|| ConvertError::unmapped(token.kind(), "operator"))?
                .to_string()
        };
        let mut method = Method::new(MethodKind::Operator, Some(Ident::verbatim(name)));
        method.attributes = self.attributes(node)?;
        method.return_attributes = self.return_attributes(node)?;
        method.modifiers = self.modifiers(node, false);
        method.params = Some(self.parameter_list(node)?);
        method.returns = Some(self.type_ref(return_type(node)?)?);
        method.body = self.body(node)?;
        Ok(method)
    }

    fn incomplete_member(&self, node: SyntaxNode<'_>) -> Result<StatementKind> {
        let mut modifiers = self.modifiers(node, false);
        if modifiers.is_empty() {
            modifiers.push("Dim".to_string());
        }
        let ty = match node.child_nodes().find(|n| n.kind().is_type_syntax()) {
            Some(ty) => Some(self.type_ref(ty)?),
            None => None,
        };
        Ok(StatementKind::Declare {
            attributes: self.attributes(node)?,
            modifiers,
            declarators: vec![Declarator {
                name: Ident::verbatim("IncompleteMember"),
                ty,
                bounds: None,
                value: None,
            }],
        })
    }

    fn parameter_list(&self, node: SyntaxNode<'_>) -> Result<Vec<Param>> {
        match node.child_node(SyntaxKind::ParameterList) {
            Some(list) => self.parameters(list),
            None => Ok(Vec::new()),
        }
    }

    /// `Implements I.Name` for explicit interface implementations.
    fn explicit_interface(&self, node: SyntaxNode<'_>, name: Ident) -> Result<Option<TypeRef>> {
        match node.child_node(SyntaxKind::ExplicitInterfaceSpecifier) {
            Some(spec) => Ok(Some(TypeRef::Named {
                qualifier: Some(Box::new(self.type_ref(child(spec, 0)?)?)),
                name,
                args: Vec::new(),
            })),
            None => Ok(None),
        }
    }

    fn body(&self, node: SyntaxNode<'_>) -> Result<Option<Vec<Statement>>> {
        match node.child_node(SyntaxKind::Block) {
            Some(block) => Ok(Some(self.statements().block(block)?)),
            None => Ok(None),
        }
    }
}

/// Module members are implicitly shared and may not say so.
fn drop_shared(statement: &mut Statement) {
    let (modifiers, is_field) = match &mut statement.kind {
        StatementKind::Method(m) => (&mut m.modifiers, false),
        StatementKind::Property(p) => (&mut p.modifiers, false),
        StatementKind::Event(e) => (&mut e.modifiers, false),
        StatementKind::Declare { modifiers, .. } => (modifiers, true),
        _ => return,
    };
    modifiers.retain(|m| m != "Shared");
    if is_field && modifiers.is_empty() {
        modifiers.push("Dim".to_string());
    }
}

fn with_trivia(node: SyntaxNode<'_>, statement: Statement) -> Statement {
    statement
        .with_leading(trivia::leading(node))
        .with_trailing(trivia::trailing(node))
}

/// The declared type or return type: the first type child of `node`.
fn return_type(node: SyntaxNode<'_>) -> Result<SyntaxNode<'_>> {
    node.child_nodes()
        .find(|n| n.kind().is_type_syntax())
        .ok_or_else(|| ConvertError::unmapped(node.kind(), "declared type"))
}

fn is_void(ty: SyntaxNode<'_>) -> bool {
    ty.kind() == SyntaxKind::PredefinedType && ty.has_token(SyntaxKind::VoidKw)
}

/// `IFoo`, `Ns.IFoo` or `IFoo<T>`: the last segment starts with `I` followed
/// by an upper-case letter.
pub(super) fn looks_like_interface(ty: SyntaxNode<'_>) -> bool {
    let last = match ty.kind() {
        SyntaxKind::QualifiedName | SyntaxKind::AliasQualifiedName => ty.nth_child_node(1),
        _ => Some(ty),
    };
    let name = last
        .and_then(|n| n.first_token())
        .map(|t| t.text())
        .unwrap_or_default();
    let mut chars = name.chars();
    matches!(
        (chars.next(), chars.next()),
        (Some('I'), Some(second)) if second.is_uppercase()
    )
}

fn extension_attribute() -> AttributeBlock {
    AttributeBlock {
        target: None,
        attributes: vec![Attribute {
            name: TypeRef::dotted("System.Runtime.CompilerServices.Extension"),
            args: None,
        }],
    }
}

fn operator_name(text: &str) -> Option<&'static str> {
    Some(match text {
        "&" => "And",
        "&&" => "AndAlso",
        "*" => "*",
        "|" => "Or",
        "^" => "Xor",
        "-" => "-",
        "--" => "Decrement",
        "==" => "=",
        "false" => "IsFalse",
        "!" | "~" => "Not",
        "!=" => "<>",
        ">" => ">",
        ">>" => ">>",
        ">=" => ">=",
        "<" => "<",
        "<=" => "<=",
        "<<" => "<<",
        "%" => "Mod",
        "+" => "+",
        "++" => "Increment",
        "/" => "/",
        "true" => "IsTrue",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::vb::render_compilation_unit;
    use crate::infrastructure::csharp::parser::parse_compilation_unit;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn convert(src: &str) -> String {
        let tree = parse_compilation_unit(src, &[]);
        assert!(tree.diagnostics().is_empty(), "{:?}", tree.diagnostics());
        let unit = NodeVisitor::default().compilation_unit(tree.root()).expect("translates");
        render_compilation_unit(&unit)
    }

    #[rstest]
    #[case("IDisposable", true)]
    #[case("System.IDisposable", true)]
    #[case("IList<int>", true)]
    #[case("Item", false)]
    #[case("Ix", false)]
    #[case("I", false)]
    fn interface_heuristic(#[case] base: &str, #[case] expected: bool) {
        let src = format!("class C : {} {{ }}", base);
        let tree = parse_compilation_unit(&src, &[]);
        let base = tree
            .root()
            .descendants()
            .find(|n| n.kind() == SyntaxKind::BaseList)
            .and_then(|b| b.nth_child_node(0))
            .expect("base type");
        assert_eq!(looks_like_interface(base), expected);
    }

    #[test]
    fn usings_are_hoisted_out_of_namespaces() {
        let out = convert("using System;\nnamespace A {\n  using B.C;\n  class D { }\n}\n");
        assert_eq!(
            out,
            "Imports System\nImports B.C\n\nNamespace A\n    Class D\n    End Class\nEnd Namespace"
        );
    }

    #[test]
    fn class_bases_split_into_inherits_and_implements() {
        let out = convert("public class C : Base, IDisposable { }\nstruct S : IComparable, IEquatable<S> { }");
        assert_eq!(
            out,
            "Public Class C\n    Inherits Base\n    Implements IDisposable\nEnd Class\n\nStructure S\n    Implements IComparable, IEquatable(Of S)\nEnd Structure"
        );
    }

    #[test]
    fn static_class_becomes_module_with_extension_methods() {
        let out = convert(
            "public static class Ext {\n  public static int Twice(this int x) { return x * 2; }\n}",
        );
        assert_eq!(
            out,
            "Public Module Ext\n    <System.Runtime.CompilerServices.Extension> Public Function Twice(x As Integer) As Integer\n        Return x * 2\n    End Function\nEnd Module"
        );
    }

    #[test]
    fn properties_pick_their_form() {
        let out = convert(
            "class C {\n  public int A { get; set; }\n  public int B { get { return 1; } }\n}",
        );
        assert_eq!(
            out,
            "Class C\n    Public Property A As Integer\n\n    Public ReadOnly Property B As Integer\n        Get\n            Return 1\n        End Get\n    End Property\nEnd Class"
        );
    }

    #[test]
    fn constructors_call_the_base_first() {
        let out = convert("class C : B {\n  public C(int x) : base(x) { Init(); }\n}");
        assert_eq!(
            out,
            "Class C\n    Inherits B\n\n    Public Sub New(x As Integer)\n        MyBase.New(x)\n        Init()\n    End Sub\nEnd Class"
        );
    }

    #[test]
    fn operators_and_conversions() {
        let out = convert(
            "struct V {\n  public static V operator +(V a, V b) { return a; }\n  public static implicit operator int(V v) { return 0; }\n}",
        );
        assert!(out.contains("Public Shared Operator +(a As V, b As V) As V"), "{out}");
        assert!(out.contains("Public Shared Widening Operator CType(v As V) As Integer"), "{out}");
    }

    #[test]
    fn doc_comments_travel_with_members() {
        let out = convert("class C {\n  /// <summary>Runs.</summary>\n  void Run() { }\n}");
        assert_eq!(
            out,
            "Class C\n    ''' <summary>Runs.</summary>\n    Sub Run()\n    End Sub\nEnd Class"
        );
    }

    #[test]
    fn optional_parameters_and_byref() {
        let out = convert("interface I { void M(ref int a, out int b, int c = 3, params int[] d); }");
        assert_eq!(
            out,
            "Interface I\n    Sub M(ByRef a As Integer, ByRef b As Integer, Optional c As Integer = 3, ParamArray d As Integer())\nEnd Interface"
        );
    }

    #[test]
    fn events_and_enums() {
        let out = convert("enum E : byte { A, B = 2 }\nclass C { public event EventHandler Changed; }");
        assert_eq!(
            out,
            "Enum E As Byte\n    A\n    B = 2\nEnd Enum\n\nClass C\n    Public Event Changed As EventHandler\nEnd Class"
        );
    }
}
