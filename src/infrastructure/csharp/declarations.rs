//! Namespace, type and member declarations.

use crate::domain::syntax::{GreenElement, GreenNode, GreenToken, SyntaxKind};

use super::parser::{node, Parser};

use SyntaxKind as K;

impl Parser {
    /// Extern aliases, usings, global attributes and members up to `terminator`.
    pub(super) fn namespace_body(&mut self, children: &mut Vec<GreenElement>, terminator: SyntaxKind) {
        while self.at(K::ExternKw) && self.nth_is_contextual(1, "alias") {
            let kw = self.bump();
            let alias = self.bump_remap(K::AliasKw);
            let id = self.expect_identifier();
            let semi = self.expect(K::Semicolon);
            children.push(node(K::ExternAliasDirective, vec![kw, alias, id, semi]).into());
        }
        while self.at(K::UsingKw) {
            children.push(self.using_directive().into());
        }
        while self.at(K::OpenBracket)
            && (self.nth_is_contextual(1, "assembly") || self.nth_is_contextual(1, "module"))
            && self.nth(2) == K::Colon
        {
            children.push(self.attribute_list().into());
        }
        while !self.at(terminator) && !self.at(K::EndOfFile) {
            let start = self.position();
            let member = match self.kind() {
                K::NamespaceKw => self.namespace_declaration(),
                K::UsingKw => self.using_directive(),
                _ => self.member(),
            };
            children.push(member.into());
            self.ensure_progress(start);
        }
    }

    fn using_directive(&mut self) -> GreenNode {
        let mut children = vec![self.bump()];
        if self.at(K::Identifier) && self.nth(1) == K::Eq {
            let alias = self.identifier_name();
            let eq = self.bump();
            children.push(node(K::NameEquals, vec![alias.into(), eq]).into());
        }
        children.push(self.name().into());
        children.push(self.expect(K::Semicolon));
        node(K::UsingDirective, children)
    }

    fn namespace_declaration(&mut self) -> GreenNode {
        let mut children = vec![self.bump(), self.name().into(), self.expect(K::OpenBrace)];
        self.namespace_body(&mut children, K::CloseBrace);
        children.push(self.expect(K::CloseBrace));
        if let Some(semi) = self.eat(K::Semicolon) {
            children.push(semi);
        }
        node(K::NamespaceDeclaration, children)
    }

    fn modifiers(&mut self, children: &mut Vec<GreenElement>) {
        loop {
            let kind = self.kind();
            if kind.is_modifier_keyword() && !matches!(kind, K::ImplicitKw | K::ExplicitKw) {
                children.push(self.bump());
            } else if self.at_contextual("partial")
                && matches!(
                    self.nth(1),
                    K::ClassKw | K::StructKw | K::InterfaceKw | K::VoidKw
                )
            {
                children.push(self.bump_remap(K::PartialKw));
            } else {
                return;
            }
        }
    }

    /// A type or type member, dispatched after attributes and modifiers.
    pub(super) fn member(&mut self) -> GreenNode {
        let mut children = Vec::new();
        while self.at(K::OpenBracket) {
            children.push(self.attribute_list().into());
        }
        self.modifiers(&mut children);
        match self.kind() {
            K::ClassKw | K::StructKw | K::InterfaceKw => self.type_declaration(children),
            K::EnumKw => self.enum_declaration(children),
            K::DelegateKw => self.delegate_declaration(children),
            K::EventKw => self.event_declaration(children),
            K::Tilde => {
                children.push(self.bump());
                children.push(self.expect_identifier());
                children.push(self.parameter_list().into());
                children.push(self.body_or_semicolon());
                node(K::DestructorDeclaration, children)
            }
            K::ImplicitKw | K::ExplicitKw => {
                children.push(self.bump());
                children.push(self.expect(K::OperatorKw));
                children.push(self.parse_type().into());
                children.push(self.parameter_list().into());
                children.push(self.body_or_semicolon());
                node(K::ConversionOperatorDeclaration, children)
            }
            K::Identifier if self.nth(1) == K::OpenParen => {
                children.push(self.bump());
                children.push(self.parameter_list().into());
                if self.at(K::Colon) {
                    children.push(self.constructor_initializer().into());
                }
                children.push(self.body_or_semicolon());
                node(K::ConstructorDeclaration, children)
            }
            k if k == K::Identifier || k.is_predefined_type_keyword() => {
                let ty = self.parse_type();
                self.typed_member(children, ty)
            }
            _ => {
                self.error_here("Invalid token in class, struct, or interface member declaration");
                node(K::IncompleteMember, children)
            }
        }
    }

    fn typed_member(&mut self, mut children: Vec<GreenElement>, ty: GreenNode) -> GreenNode {
        children.push(ty.into());
        if self.at(K::OperatorKw) {
            children.push(self.bump());
            children.push(self.operator_token());
            children.push(self.parameter_list().into());
            children.push(self.body_or_semicolon());
            return node(K::OperatorDeclaration, children);
        }
        if let Some(specifier) = self.explicit_interface_specifier() {
            children.push(specifier.into());
        }
        if self.at(K::ThisKw) {
            children.push(self.bump());
            children.push(self.bracketed_parameter_list().into());
            children.push(self.accessor_list().into());
            return node(K::IndexerDeclaration, children);
        }
        if !self.at(K::Identifier) {
            self.error_here("Identifier expected");
            return node(K::IncompleteMember, children);
        }
        match self.nth(1) {
            K::OpenParen | K::Lt => {
                children.push(self.bump());
                if self.at(K::Lt) {
                    children.push(self.type_parameter_list().into());
                }
                children.push(self.parameter_list().into());
                while self.at_contextual("where") {
                    children.push(self.constraint_clause().into());
                }
                children.push(self.body_or_semicolon());
                node(K::MethodDeclaration, children)
            }
            K::OpenBrace => {
                children.push(self.bump());
                children.push(self.accessor_list().into());
                node(K::PropertyDeclaration, children)
            }
            _ => {
                let ty = match children.pop() {
                    Some(GreenElement::Node(ty)) => ty,
                    other => {
                        children.extend(other);
                        return node(K::IncompleteMember, children);
                    }
                };
                children.push(self.declarators_after_type(ty).into());
                children.push(self.expect(K::Semicolon));
                node(K::FieldDeclaration, children)
            }
        }
    }

    fn declarators_after_type(&mut self, ty: GreenNode) -> GreenNode {
        let mut children = vec![GreenElement::Node(ty)];
        loop {
            children.push(self.variable_declarator().into());
            match self.eat(K::Comma) {
                Some(comma) => children.push(comma),
                None => break,
            }
        }
        node(K::VariableDeclaration, children)
    }

    /// `IFoo.` or `N.IFoo<T>.` ahead of a member name.
    fn explicit_interface_specifier(&mut self) -> Option<GreenNode> {
        let mut name: Option<GreenNode> = None;
        let mut last_dot: Option<GreenElement> = None;
        loop {
            if !self.at(K::Identifier) {
                break;
            }
            let dot_at = if self.nth(1) == K::Lt {
                match self.scan_type_from_current(0) {
                    Some(end) if self.nth(end) == K::Dot => end,
                    _ => break,
                }
            } else {
                1
            };
            if self.nth(dot_at) != K::Dot || !matches!(self.nth(dot_at + 1), K::Identifier | K::ThisKw) {
                break;
            }
            let segment = self.simple_name(false);
            let dot = self.bump();
            name = Some(match (name, last_dot.take()) {
                (Some(left), Some(prev_dot)) => {
                    node(K::QualifiedName, vec![left.into(), prev_dot, segment.into()])
                }
                _ => segment,
            });
            last_dot = Some(dot);
        }
        match (name, last_dot) {
            (Some(name), Some(dot)) => {
                Some(node(K::ExplicitInterfaceSpecifier, vec![name.into(), dot]))
            }
            _ => None,
        }
    }

    fn operator_token(&mut self) -> GreenElement {
        match self.kind() {
            K::Gt if self.nth(1) == K::Gt && self.adjacent(0) => {
                // `>>` is two tokens; merge them into one operator token
                let mut first = match self.bump() {
                    GreenElement::Token(t) => t,
                    other => return other,
                };
                if let GreenElement::Token(second) = self.bump() {
                    first.text.push_str(&second.text);
                    first.trailing = second.trailing;
                }
                GreenElement::Token(first)
            }
            K::Plus | K::Minus | K::Bang | K::Tilde | K::PlusPlus | K::MinusMinus | K::Star
            | K::Slash | K::Percent | K::Amp | K::Bar | K::Caret | K::LtLt | K::EqEq
            | K::BangEq | K::Gt | K::Lt | K::GtEq | K::LtEq | K::TrueKw | K::FalseKw => {
                self.bump()
            }
            _ => {
                self.error_here("Overloadable operator expected");
                GreenElement::Token(GreenToken::missing(K::Plus))
            }
        }
    }

    fn constructor_initializer(&mut self) -> GreenNode {
        let colon = self.bump();
        let kind = if self.at(K::BaseKw) {
            K::BaseConstructorInitializer
        } else {
            K::ThisConstructorInitializer
        };
        let kw = if self.at(K::BaseKw) || self.at(K::ThisKw) {
            self.bump()
        } else {
            self.expect(K::ThisKw)
        };
        let args = self.argument_list();
        node(kind, vec![colon, kw, args.into()])
    }

    pub(super) fn body_or_semicolon(&mut self) -> GreenElement {
        if self.at(K::OpenBrace) {
            self.block().into()
        } else {
            self.expect(K::Semicolon)
        }
    }

    fn type_declaration(&mut self, mut children: Vec<GreenElement>) -> GreenNode {
        let kind = match self.kind() {
            K::StructKw => K::StructDeclaration,
            K::InterfaceKw => K::InterfaceDeclaration,
            _ => K::ClassDeclaration,
        };
        children.push(self.bump());
        children.push(self.expect_identifier());
        if self.at(K::Lt) {
            children.push(self.type_parameter_list().into());
        }
        if self.at(K::Colon) {
            children.push(self.base_list().into());
        }
        while self.at_contextual("where") {
            children.push(self.constraint_clause().into());
        }
        children.push(self.expect(K::OpenBrace));
        while !matches!(self.kind(), K::CloseBrace | K::EndOfFile) {
            let start = self.position();
            children.push(self.member().into());
            self.ensure_progress(start);
        }
        children.push(self.expect(K::CloseBrace));
        if let Some(semi) = self.eat(K::Semicolon) {
            children.push(semi);
        }
        node(kind, children)
    }

    fn base_list(&mut self) -> GreenNode {
        let mut children = vec![self.bump(), self.parse_type().into()];
        while let Some(comma) = self.eat(K::Comma) {
            children.push(comma);
            children.push(self.parse_type().into());
        }
        node(K::BaseList, children)
    }

    fn enum_declaration(&mut self, mut children: Vec<GreenElement>) -> GreenNode {
        children.push(self.bump());
        children.push(self.expect_identifier());
        if self.at(K::Colon) {
            children.push(self.base_list().into());
        }
        children.push(self.expect(K::OpenBrace));
        while !matches!(self.kind(), K::CloseBrace | K::EndOfFile) {
            let start = self.position();
            let mut member = Vec::new();
            while self.at(K::OpenBracket) {
                member.push(self.attribute_list().into());
            }
            member.push(self.expect_identifier());
            if self.at(K::Eq) {
                member.push(self.equals_value_clause().into());
            }
            children.push(node(K::EnumMemberDeclaration, member).into());
            match self.eat(K::Comma) {
                Some(comma) => children.push(comma),
                None => {
                    self.ensure_progress(start);
                    if !self.at(K::CloseBrace) {
                        self.error_here("'}' expected");
                        break;
                    }
                }
            }
        }
        children.push(self.expect(K::CloseBrace));
        if let Some(semi) = self.eat(K::Semicolon) {
            children.push(semi);
        }
        node(K::EnumDeclaration, children)
    }

    fn delegate_declaration(&mut self, mut children: Vec<GreenElement>) -> GreenNode {
        children.push(self.bump());
        children.push(self.parse_type().into());
        children.push(self.expect_identifier());
        if self.at(K::Lt) {
            children.push(self.type_parameter_list().into());
        }
        children.push(self.parameter_list().into());
        while self.at_contextual("where") {
            children.push(self.constraint_clause().into());
        }
        children.push(self.expect(K::Semicolon));
        node(K::DelegateDeclaration, children)
    }

    fn event_declaration(&mut self, mut children: Vec<GreenElement>) -> GreenNode {
        children.push(self.bump());
        let ty = self.parse_type();
        let with_accessors = self.at(K::Identifier) && self.nth(1) != K::Comma && {
            let mut n = 1;
            while self.nth(n) == K::Dot && self.nth(n + 1) == K::Identifier {
                n += 2;
            }
            self.nth(n) == K::OpenBrace
        };
        if with_accessors {
            children.push(ty.into());
            if let Some(specifier) = self.explicit_interface_specifier() {
                children.push(specifier.into());
            }
            children.push(self.expect_identifier());
            children.push(self.accessor_list().into());
            return node(K::EventDeclaration, children);
        }
        children.push(self.declarators_after_type(ty).into());
        children.push(self.expect(K::Semicolon));
        node(K::EventFieldDeclaration, children)
    }

    fn accessor_list(&mut self) -> GreenNode {
        let mut children = vec![self.expect(K::OpenBrace)];
        while !matches!(self.kind(), K::CloseBrace | K::EndOfFile) {
            let start = self.position();
            let mut accessor = Vec::new();
            while self.at(K::OpenBracket) {
                accessor.push(self.attribute_list().into());
            }
            while matches!(self.kind(), K::PrivateKw | K::ProtectedKw | K::InternalKw | K::PublicKw) {
                accessor.push(self.bump());
            }
            let kind = match self.nth_text(0) {
                "get" if self.at(K::Identifier) => Some((K::GetKw, K::GetAccessorDeclaration)),
                "set" if self.at(K::Identifier) => Some((K::SetKw, K::SetAccessorDeclaration)),
                "add" if self.at(K::Identifier) => Some((K::AddKw, K::AddAccessorDeclaration)),
                "remove" if self.at(K::Identifier) => {
                    Some((K::RemoveKw, K::RemoveAccessorDeclaration))
                }
                _ => None,
            };
            match kind {
                Some((kw, decl)) => {
                    accessor.push(self.bump_remap(kw));
                    accessor.push(self.body_or_semicolon());
                    children.push(node(decl, accessor).into());
                }
                None => {
                    self.error_here("A get or set accessor expected");
                    self.abandon(accessor);
                    self.ensure_progress(start);
                }
            }
        }
        children.push(self.expect(K::CloseBrace));
        node(K::AccessorList, children)
    }

    pub(super) fn parameter_list(&mut self) -> GreenNode {
        self.parameters(K::OpenParen, K::CloseParen, K::ParameterList)
    }

    fn bracketed_parameter_list(&mut self) -> GreenNode {
        self.parameters(K::OpenBracket, K::CloseBracket, K::BracketedParameterList)
    }

    fn parameters(&mut self, open: SyntaxKind, close: SyntaxKind, kind: SyntaxKind) -> GreenNode {
        let mut children = vec![self.expect(open)];
        if !self.at(close) {
            loop {
                let start = self.position();
                children.push(self.parameter().into());
                self.ensure_progress(start);
                match self.eat(K::Comma) {
                    Some(comma) => children.push(comma),
                    None => break,
                }
            }
        }
        children.push(self.expect(close));
        node(kind, children)
    }

    fn parameter(&mut self) -> GreenNode {
        let mut children = Vec::new();
        while self.at(K::OpenBracket) {
            children.push(self.attribute_list().into());
        }
        if self.at(K::ArgListKw) {
            children.push(self.bump());
            return node(K::Parameter, children);
        }
        while matches!(self.kind(), K::RefKw | K::OutKw | K::ParamsKw | K::ThisKw) {
            children.push(self.bump());
        }
        children.push(self.parse_type().into());
        children.push(self.expect_identifier());
        if self.at(K::Eq) {
            children.push(self.equals_value_clause().into());
        }
        node(K::Parameter, children)
    }

    pub(super) fn type_parameter_list(&mut self) -> GreenNode {
        let mut children = vec![self.bump()];
        loop {
            let mut parameter = Vec::new();
            while self.at(K::OpenBracket) {
                parameter.push(self.attribute_list().into());
            }
            if matches!(self.kind(), K::InKw | K::OutKw) {
                parameter.push(self.bump());
            }
            parameter.push(self.expect_identifier());
            children.push(node(K::TypeParameter, parameter).into());
            match self.eat(K::Comma) {
                Some(comma) => children.push(comma),
                None => break,
            }
        }
        children.push(self.expect(K::Gt));
        node(K::TypeParameterList, children)
    }

    pub(super) fn constraint_clause(&mut self) -> GreenNode {
        let mut children = vec![self.bump_remap(K::WhereKw), self.identifier_name().into()];
        children.push(self.expect(K::Colon));
        loop {
            let constraint = match self.kind() {
                K::ClassKw | K::StructKw => node(K::ClassOrStructConstraint, vec![self.bump()]),
                K::NewKw => {
                    let kw = self.bump();
                    let open = self.expect(K::OpenParen);
                    let close = self.expect(K::CloseParen);
                    node(K::ConstructorConstraint, vec![kw, open, close])
                }
                _ => node(K::TypeConstraint, vec![self.parse_type().into()]),
            };
            children.push(constraint.into());
            match self.eat(K::Comma) {
                Some(comma) => children.push(comma),
                None => break,
            }
        }
        node(K::TypeParameterConstraintClause, children)
    }

    pub(super) fn attribute_list(&mut self) -> GreenNode {
        let mut children = vec![self.bump()];
        let has_target = (self.at(K::Identifier) || self.kind().is_keyword()) && self.nth(1) == K::Colon;
        if has_target {
            let remap = match self.nth_text(0) {
                "assembly" if self.at(K::Identifier) => Some(K::AssemblyKw),
                "module" if self.at(K::Identifier) => Some(K::ModuleKw),
                _ => None,
            };
            let target = match remap {
                Some(kind) => self.bump_remap(kind),
                None => self.bump(),
            };
            let colon = self.bump();
            children.push(node(K::AttributeTargetSpecifier, vec![target, colon]).into());
        }
        loop {
            let start = self.position();
            let mut attribute = vec![GreenElement::Node(self.name())];
            if self.at(K::OpenParen) {
                attribute.push(self.attribute_argument_list().into());
            }
            children.push(node(K::Attribute, attribute).into());
            self.ensure_progress(start);
            match self.eat(K::Comma) {
                Some(comma) => children.push(comma),
                None => break,
            }
        }
        children.push(self.expect(K::CloseBracket));
        node(K::AttributeList, children)
    }

    fn attribute_argument_list(&mut self) -> GreenNode {
        let mut children = vec![self.bump()];
        if !self.at(K::CloseParen) {
            loop {
                let mut argument = Vec::new();
                if self.at(K::Identifier) && self.nth(1) == K::Eq {
                    let name = self.identifier_name();
                    let eq = self.bump();
                    argument.push(node(K::NameEquals, vec![name.into(), eq]).into());
                } else if self.at(K::Identifier) && self.nth(1) == K::Colon {
                    let name = self.identifier_name();
                    let colon = self.bump();
                    argument.push(node(K::NameColon, vec![name.into(), colon]).into());
                }
                argument.push(self.expression().into());
                children.push(node(K::AttributeArgument, argument).into());
                match self.eat(K::Comma) {
                    Some(comma) => children.push(comma),
                    None => break,
                }
            }
        }
        children.push(self.expect(K::CloseParen));
        node(K::AttributeArgumentList, children)
    }
}

#[cfg(test)]
mod tests {
    use super::super::parser::parse_compilation_unit;
    use crate::domain::syntax::{SyntaxKind, SyntaxTree};

    fn parsed(src: &str) -> SyntaxTree {
        let tree = parse_compilation_unit(src, &[]);
        assert!(tree.diagnostics().is_empty(), "{}: {:?}", src, tree.diagnostics());
        assert_eq!(tree.text(), src);
        tree
    }

    fn kinds_below(tree: &SyntaxTree, parent: SyntaxKind) -> Vec<SyntaxKind> {
        let owner = tree
            .root()
            .descendants()
            .find(|n| n.kind() == parent)
            .unwrap();
        owner.child_nodes().map(|n| n.kind()).collect()
    }

    #[test]
    fn test_member_kinds() {
        let src = r#"
class C<T> : Base, IFoo where T : class, new()
{
    private int _x = 1, _y;
    public event EventHandler Changed;
    public C(int x) : base(x) { }
    ~C() { }
    public int X { get { return _x; } private set { _x = value; } }
    public string this[int i] { get { return null; } }
    public static C operator +(C a, C b) { return a; }
    public static implicit operator int(C c) { return 0; }
    void IFoo.Run<U>(U u) where U : struct { }
    public abstract void Nothing();
}
"#;
        let tree = parsed(src);
        let kinds = kinds_below(&tree, SyntaxKind::ClassDeclaration);
        assert_eq!(
            kinds,
            vec![
                SyntaxKind::TypeParameterList,
                SyntaxKind::BaseList,
                SyntaxKind::TypeParameterConstraintClause,
                SyntaxKind::FieldDeclaration,
                SyntaxKind::EventFieldDeclaration,
                SyntaxKind::ConstructorDeclaration,
                SyntaxKind::DestructorDeclaration,
                SyntaxKind::PropertyDeclaration,
                SyntaxKind::IndexerDeclaration,
                SyntaxKind::OperatorDeclaration,
                SyntaxKind::ConversionOperatorDeclaration,
                SyntaxKind::MethodDeclaration,
                SyntaxKind::MethodDeclaration,
            ]
        );
    }

    #[test]
    fn test_namespace_usings_and_attributes() {
        let src = "extern alias Foo;\nusing System;\nusing IO = System.IO;\n[assembly: AssemblyTitle(\"x\")]\nnamespace A.B { enum E : byte { One = 1, Two, } delegate int D(string s); }\n";
        let tree = parsed(src);
        let kinds: Vec<SyntaxKind> = tree.root().child_nodes().map(|n| n.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                SyntaxKind::ExternAliasDirective,
                SyntaxKind::UsingDirective,
                SyntaxKind::UsingDirective,
                SyntaxKind::AttributeList,
                SyntaxKind::NamespaceDeclaration,
            ]
        );
        let ns = kinds_below(&tree, SyntaxKind::NamespaceDeclaration);
        assert_eq!(
            ns,
            vec![
                SyntaxKind::QualifiedName,
                SyntaxKind::EnumDeclaration,
                SyntaxKind::DelegateDeclaration,
            ]
        );
    }

    #[test]
    fn test_custom_event_and_partial() {
        let src = "partial class P { event EventHandler E { add { } remove { } } partial void M(); }";
        let tree = parsed(src);
        let kinds = kinds_below(&tree, SyntaxKind::ClassDeclaration);
        assert_eq!(
            kinds,
            vec![SyntaxKind::EventDeclaration, SyntaxKind::MethodDeclaration]
        );
        let class = tree.root().child_node(SyntaxKind::ClassDeclaration).unwrap();
        assert!(class.has_token(SyntaxKind::PartialKw));
    }

    #[test]
    fn test_bad_accessor_keeps_its_text() {
        for src in [
            "ass C\n{\n    public object Return",
            "class C { int X { [A] public object y; } }",
            "class C { event EventHandler E { add { remove {} } }",
        ] {
            let tree = parse_compilation_unit(src, &[]);
            assert!(!tree.diagnostics().is_empty(), "{src}");
            assert_eq!(tree.text(), src);
        }
    }

    #[test]
    fn test_incomplete_member_recovers() {
        let tree = parse_compilation_unit("class C { public } class D { }", &[]);
        assert!(!tree.diagnostics().is_empty());
        assert!(tree
            .root()
            .descendants()
            .any(|n| n.kind() == SyntaxKind::IncompleteMember));
        assert_eq!(tree.root().child_nodes().count(), 2);
    }
}
