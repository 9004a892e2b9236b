//! Visual Basic target model.
//!
//! The translators build these values and `render` prints them with
//! normalized whitespace. Only the shapes the C# translation produces are
//! modelled; there is no VB parser.

pub mod render;

pub use render::{
    render_compilation_unit, render_expression, render_statement, render_statements, render_type,
};

use crate::domain::language::Language;

/// A VB identifier. `escaped` identifiers render as `[text]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub text: String,
    pub escaped: bool,
}

impl Ident {
    /// Plain identifier, escaped only if it collides with a VB reserved word.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let escaped = Language::VisualBasic.is_reserved_word(&text);
        Ident { text, escaped }
    }

    /// Identifier that is written exactly as given, such as `New` or `Item`.
    pub fn verbatim(text: impl Into<String>) -> Self {
        Ident { text: text.into(), escaped: false }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeRef {
    /// `Left.Name(Of Args)`; `qualifier` is absent for simple names.
    Named {
        qualifier: Option<Box<TypeRef>>,
        name: Ident,
        args: Vec<TypeRef>,
    },
    /// Keyword type such as `Integer`.
    Predefined(&'static str),
    /// The `Global` namespace alias.
    Global,
    /// Element type plus one entry per rank holding its comma count.
    Array(Box<TypeRef>, Vec<usize>),
    Nullable(Box<TypeRef>),
}

impl TypeRef {
    pub fn simple(name: impl Into<String>) -> Self {
        TypeRef::Named { qualifier: None, name: Ident::new(name), args: Vec::new() }
    }

    /// Builds `A.B.C` from dotted text.
    pub fn dotted(path: &str) -> Self {
        let mut parts = path.split('.');
        let first = parts.next().unwrap_or_default();
        parts.fold(TypeRef::simple(first), |left, part| TypeRef::Named {
            qualifier: Some(Box::new(left)),
            name: Ident::new(part),
            args: Vec::new(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    AndAlso,
    OrElse,
    And,
    Or,
    Xor,
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    LeftShift,
    RightShift,
    Equals,
    NotEquals,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    Is,
    IsNot,
}

impl BinaryOp {
    pub fn text(self) -> &'static str {
        match self {
            BinaryOp::AndAlso => "AndAlso",
            BinaryOp::OrElse => "OrElse",
            BinaryOp::And => "And",
            BinaryOp::Or => "Or",
            BinaryOp::Xor => "Xor",
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::Modulo => "Mod",
            BinaryOp::LeftShift => "<<",
            BinaryOp::RightShift => ">>",
            BinaryOp::Equals => "=",
            BinaryOp::NotEquals => "<>",
            BinaryOp::LessThan => "<",
            BinaryOp::LessThanOrEqual => "<=",
            BinaryOp::GreaterThan => ">",
            BinaryOp::GreaterThanOrEqual => ">=",
            BinaryOp::Is => "Is",
            BinaryOp::IsNot => "IsNot",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Not,
    Negate,
    Plus,
    AddressOf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastKind {
    CType,
    DirectCast,
    TryCast,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    pub name: Option<Ident>,
    pub value: Expr,
}

impl Argument {
    pub fn positional(value: Expr) -> Self {
        Argument { name: None, value }
    }
}

/// `.Name = value` when named, a bare expression otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldInit {
    pub name: Option<Ident>,
    pub value: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ObjectInit {
    With(Vec<FieldInit>),
    From(Vec<Expr>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LambdaKind {
    Function,
    Sub,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LambdaBody {
    Expression(Expr),
    Statement(Box<Statement>),
    Block(Vec<Statement>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Lambda {
    pub kind: LambdaKind,
    pub params: Vec<Param>,
    pub body: LambdaBody,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RangeVariable {
    pub name: Ident,
    pub ty: Option<TypeRef>,
    pub source: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ordering {
    pub key: Expr,
    /// `Ascending`, `Descending` or nothing.
    pub direction: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum QueryClause {
    From(RangeVariable),
    Let { name: Ident, value: Expr },
    Where(Expr),
    Join {
        variable: RangeVariable,
        left: Expr,
        right: Expr,
        /// `Group Join ... Into name = Group` when present.
        into: Option<Ident>,
    },
    OrderBy(Vec<Ordering>),
    Select(Expr),
    GroupBy {
        element: Expr,
        key: Expr,
        into: Option<Ident>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Literal already spelled in VB: numbers, `True`, `False`, `Nothing`.
    Literal(String),
    /// String value, encoded for VB when rendered.
    Str(String),
    Char(char),
    /// `<text>value</text>.Value`, the multi-line raw string form.
    XmlText(String),
    Name { name: Ident, type_args: Vec<TypeRef> },
    Type(TypeRef),
    Me,
    MyBase,
    MyClass,
    Member { target: Box<Expr>, name: Ident, type_args: Vec<TypeRef> },
    Invoke { target: Box<Expr>, args: Vec<Argument> },
    Binary { op: BinaryOp, left: Box<Expr>, right: Box<Expr> },
    Unary { op: UnaryOp, operand: Box<Expr> },
    Paren(Box<Expr>),
    Cast { kind: CastKind, expr: Box<Expr>, ty: TypeRef },
    TypeOfIs { expr: Box<Expr>, ty: TypeRef },
    GetType(TypeRef),
    New { ty: TypeRef, args: Option<Vec<Argument>>, init: Option<ObjectInit> },
    NewAnonymous(Vec<FieldInit>),
    /// `New T(bounds) {items}`; `ranks` covers the ranks after the first.
    NewArray { element: TypeRef, bounds: Vec<Expr>, first_rank: usize, ranks: Vec<usize>, items: Vec<Expr> },
    Collection(Vec<Expr>),
    Lambda(Box<Lambda>),
    Query(Vec<QueryClause>),
}

impl Expr {
    pub fn name(text: impl Into<String>) -> Self {
        Expr::Name { name: Ident::new(text), type_args: Vec::new() }
    }

    pub fn int(value: i64) -> Self {
        Expr::Literal(value.to_string())
    }

    pub fn nothing() -> Self {
        Expr::Literal("Nothing".to_string())
    }

    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        Expr::Binary { op, left: Box::new(left), right: Box::new(right) }
    }

    pub fn invoke(target: Expr, args: Vec<Expr>) -> Self {
        Expr::Invoke {
            target: Box::new(target),
            args: args.into_iter().map(Argument::positional).collect(),
        }
    }

    pub fn member(target: Expr, name: impl Into<String>) -> Self {
        Expr::Member { target: Box::new(target), name: Ident::verbatim(name), type_args: Vec::new() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trivia {
    /// Full comment text including the leading `'`.
    Comment(String),
    /// Directive line such as `#Region "Name"`.
    Directive(String),
    /// Text of an inactive conditional region, kept verbatim.
    Disabled(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttributeBlock {
    /// `Assembly` or `Module` for file-level attributes.
    pub target: Option<&'static str>,
    pub attributes: Vec<Attribute>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: TypeRef,
    pub args: Option<Vec<Argument>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    Class,
    Structure,
    New,
    Type(TypeRef),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeParam {
    pub variance: Option<&'static str>,
    pub name: Ident,
    pub constraints: Vec<Constraint>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub attributes: Vec<AttributeBlock>,
    pub modifiers: Vec<String>,
    pub name: Ident,
    pub ty: Option<TypeRef>,
    pub default: Option<Expr>,
}

impl Param {
    pub fn named(name: Ident) -> Self {
        Param { attributes: Vec::new(), modifiers: Vec::new(), name, ty: None, default: None }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Declarator {
    pub name: Ident,
    pub ty: Option<TypeRef>,
    /// Array bounds written on the name, `Dim a(9) As Integer`.
    pub bounds: Option<Vec<Expr>>,
    pub value: Option<Expr>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodKind {
    Sub,
    Function,
    Constructor,
    Operator,
    DelegateSub,
    DelegateFunction,
    Get,
    Set,
    AddHandler,
    RemoveHandler,
}

impl MethodKind {
    pub fn keyword(self) -> &'static str {
        match self {
            MethodKind::Sub | MethodKind::Constructor => "Sub",
            MethodKind::Function => "Function",
            MethodKind::Operator => "Operator",
            MethodKind::DelegateSub => "Delegate Sub",
            MethodKind::DelegateFunction => "Delegate Function",
            MethodKind::Get => "Get",
            MethodKind::Set => "Set",
            MethodKind::AddHandler => "AddHandler",
            MethodKind::RemoveHandler => "RemoveHandler",
        }
    }

    /// Keyword closing the block, `End <keyword>`.
    pub fn end_keyword(self) -> &'static str {
        match self {
            MethodKind::Sub | MethodKind::Constructor | MethodKind::DelegateSub => "Sub",
            MethodKind::Function | MethodKind::DelegateFunction => "Function",
            MethodKind::Operator => "Operator",
            MethodKind::Get => "Get",
            MethodKind::Set => "Set",
            MethodKind::AddHandler => "AddHandler",
            MethodKind::RemoveHandler => "RemoveHandler",
        }
    }
}

/// Anything with a signature and an optional body: methods, constructors,
/// operators, accessors and delegates.
#[derive(Debug, Clone, PartialEq)]
pub struct Method {
    pub attributes: Vec<AttributeBlock>,
    pub modifiers: Vec<String>,
    pub kind: MethodKind,
    /// Absent for accessors.
    pub name: Option<Ident>,
    pub type_params: Vec<TypeParam>,
    pub params: Option<Vec<Param>>,
    pub return_attributes: Vec<AttributeBlock>,
    pub returns: Option<TypeRef>,
    pub implements: Option<TypeRef>,
    /// `None` for declarations without a body and no `End` line.
    pub body: Option<Vec<Statement>>,
}

impl Method {
    pub fn new(kind: MethodKind, name: Option<Ident>) -> Self {
        Method {
            attributes: Vec::new(),
            modifiers: Vec::new(),
            kind,
            name,
            type_params: Vec::new(),
            params: None,
            return_attributes: Vec::new(),
            returns: None,
            implements: None,
            body: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub attributes: Vec<AttributeBlock>,
    pub modifiers: Vec<String>,
    pub name: Ident,
    pub params: Option<Vec<Param>>,
    pub ty: TypeRef,
    pub implements: Option<TypeRef>,
    /// `None` for the single-line auto-property form.
    pub accessors: Option<Vec<Method>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub attributes: Vec<AttributeBlock>,
    pub modifiers: Vec<String>,
    pub name: Ident,
    pub ty: TypeRef,
    /// `Custom Event` block when accessors are present.
    pub accessors: Option<Vec<Method>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Class,
    Module,
    Structure,
    Interface,
}

impl TypeKind {
    pub fn keyword(self) -> &'static str {
        match self {
            TypeKind::Class => "Class",
            TypeKind::Module => "Module",
            TypeKind::Structure => "Structure",
            TypeKind::Interface => "Interface",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeBlock {
    pub attributes: Vec<AttributeBlock>,
    pub modifiers: Vec<String>,
    pub kind: TypeKind,
    pub name: Ident,
    pub type_params: Vec<TypeParam>,
    pub inherits: Vec<TypeRef>,
    pub implements: Vec<TypeRef>,
    pub members: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumMember {
    pub attributes: Vec<AttributeBlock>,
    pub name: Ident,
    pub value: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumBlock {
    pub attributes: Vec<AttributeBlock>,
    pub modifiers: Vec<String>,
    pub name: Ident,
    pub underlying: Option<TypeRef>,
    pub members: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CaseBlock {
    /// Empty for `Case Else`.
    pub values: Vec<Expr>,
    pub is_else: bool,
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatchBlock {
    pub variable: Option<Ident>,
    pub ty: Option<TypeRef>,
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UsingResource {
    Expression(Expr),
    Variables(Vec<Declarator>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopKind {
    Do,
    While,
    For,
    Select,
}

impl LoopKind {
    pub fn keyword(self) -> &'static str {
        match self {
            LoopKind::Do => "Do",
            LoopKind::While => "While",
            LoopKind::For => "For",
            LoopKind::Select => "Select",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOp {
    Assign,
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl AssignOp {
    pub fn text(self) -> &'static str {
        match self {
            AssignOp::Assign => "=",
            AssignOp::Add => "+=",
            AssignOp::Subtract => "-=",
            AssignOp::Multiply => "*=",
            AssignOp::Divide => "/=",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StatementKind {
    /// Renders nothing but its trivia.
    Empty,
    /// Invocation used as a statement.
    Call(Expr),
    Assign { target: Expr, op: AssignOp, value: Expr },
    /// `Dim`, `Const` or a field with modifiers.
    Declare { attributes: Vec<AttributeBlock>, modifiers: Vec<String>, declarators: Vec<Declarator> },
    Return(Option<Expr>),
    Throw(Option<Expr>),
    Exit(LoopKind),
    Continue(LoopKind),
    GoTo(Ident),
    Label(Ident),
    If { condition: Expr, then: Vec<Statement>, else_ifs: Vec<(Expr, Vec<Statement>)>, otherwise: Option<Vec<Statement>> },
    Select { expr: Expr, cases: Vec<CaseBlock> },
    While { condition: Expr, body: Vec<Statement> },
    DoLoopWhile { body: Vec<Statement>, condition: Expr },
    For { variable: Ident, from: Expr, to: Expr, step: Option<Expr>, body: Vec<Statement> },
    ForEach { variable: Ident, ty: Option<TypeRef>, collection: Expr, body: Vec<Statement> },
    Using { resource: UsingResource, body: Vec<Statement> },
    SyncLock { expr: Expr, body: Vec<Statement> },
    Try { body: Vec<Statement>, catches: Vec<CatchBlock>, finally: Option<Vec<Statement>> },
    /// `Imports X` or `Imports Alias = X`.
    Imports { alias: Option<Ident>, name: TypeRef },
    /// File-level `<Assembly: ...>` statement.
    Attributes(Vec<AttributeBlock>),
    Namespace { name: TypeRef, members: Vec<Statement> },
    Type(Box<TypeBlock>),
    Enum(Box<EnumBlock>),
    EnumMember(EnumMember),
    Method(Box<Method>),
    Property(Box<Property>),
    Event(Box<Event>),
}

/// A statement with the trivia that travels with it.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub leading: Vec<Trivia>,
    pub kind: StatementKind,
    pub trailing: Vec<Trivia>,
}

impl Statement {
    pub fn new(kind: StatementKind) -> Self {
        Statement { leading: Vec::new(), kind, trailing: Vec::new() }
    }

    pub fn empty() -> Self {
        Statement::new(StatementKind::Empty)
    }

    pub fn with_leading(mut self, trivia: Vec<Trivia>) -> Self {
        let mut leading = trivia;
        leading.append(&mut self.leading);
        self.leading = leading;
        self
    }

    pub fn with_trailing(mut self, trivia: Vec<Trivia>) -> Self {
        self.trailing.extend(trivia);
        self
    }

    /// Whether the statement spans several lines with an `End`-style closer.
    pub fn is_block(&self) -> bool {
        match &self.kind {
            StatementKind::Namespace { .. }
            | StatementKind::Type(_)
            | StatementKind::Enum(_)
            | StatementKind::If { .. }
            | StatementKind::Select { .. }
            | StatementKind::While { .. }
            | StatementKind::DoLoopWhile { .. }
            | StatementKind::For { .. }
            | StatementKind::ForEach { .. }
            | StatementKind::Using { .. }
            | StatementKind::SyncLock { .. }
            | StatementKind::Try { .. } => true,
            StatementKind::Method(m) => m.body.is_some(),
            StatementKind::Property(p) => p.accessors.is_some(),
            StatementKind::Event(e) => e.accessors.is_some(),
            _ => false,
        }
    }
}

/// A translated file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompilationUnit {
    pub imports: Vec<Statement>,
    pub attributes: Vec<Statement>,
    pub members: Vec<Statement>,
    /// Trivia before the end of the file.
    pub trailing: Vec<Trivia>,
}

/// Result of translating one C# node: VB is stricter than C# about what may
/// appear where, so the caller decides how to coerce each shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Expr(Expr),
    Statement(Statement),
    Type(TypeRef),
    CompilationUnit(CompilationUnit),
}
