//! Closed set of C# syntax kinds.
//!
//! Token kinds come first, then reserved keywords, then contextual
//! keywords, then node kinds. The range checks below rely on that order.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum SyntaxKind {
    // Tokens
    EndOfFile,
    Identifier,
    NumericLiteral,
    CharacterLiteral,
    StringLiteral,
    BadToken,

    // Punctuation
    OpenBrace,
    CloseBrace,
    OpenParen,
    CloseParen,
    OpenBracket,
    CloseBracket,
    Semicolon,
    Comma,
    Dot,
    Colon,
    ColonColon,
    Question,
    QuestionQuestion,
    Tilde,
    Bang,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Amp,
    Bar,
    Caret,
    Lt,
    Gt,
    Eq,
    PlusPlus,
    MinusMinus,
    AmpAmp,
    BarBar,
    EqEq,
    BangEq,
    LtEq,
    GtEq,
    LtLt,
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,
    PercentEq,
    AmpEq,
    BarEq,
    CaretEq,
    LtLtEq,
    Arrow,
    FatArrow,

    // Reserved keywords
    AbstractKw,
    AsKw,
    BaseKw,
    BoolKw,
    BreakKw,
    ByteKw,
    CaseKw,
    CatchKw,
    CharKw,
    CheckedKw,
    ClassKw,
    ConstKw,
    ContinueKw,
    DecimalKw,
    DefaultKw,
    DelegateKw,
    DoKw,
    DoubleKw,
    ElseKw,
    EnumKw,
    EventKw,
    ExplicitKw,
    ExternKw,
    FalseKw,
    FinallyKw,
    FixedKw,
    FloatKw,
    ForKw,
    ForEachKw,
    GotoKw,
    IfKw,
    ImplicitKw,
    InKw,
    IntKw,
    InterfaceKw,
    InternalKw,
    IsKw,
    LockKw,
    LongKw,
    NamespaceKw,
    NewKw,
    NullKw,
    ObjectKw,
    OperatorKw,
    OutKw,
    OverrideKw,
    ParamsKw,
    PrivateKw,
    ProtectedKw,
    PublicKw,
    ReadOnlyKw,
    RefKw,
    ReturnKw,
    SByteKw,
    SealedKw,
    ShortKw,
    SizeOfKw,
    StackAllocKw,
    StaticKw,
    StringKw,
    StructKw,
    SwitchKw,
    ThisKw,
    ThrowKw,
    TrueKw,
    TryKw,
    TypeOfKw,
    UIntKw,
    ULongKw,
    UncheckedKw,
    UnsafeKw,
    UShortKw,
    UsingKw,
    VirtualKw,
    VoidKw,
    VolatileKw,
    WhileKw,
    ArgListKw,
    MakeRefKw,
    RefTypeKw,
    RefValueKw,

    // Contextual keywords, only produced when the parser remaps an identifier
    AddKw,
    AliasKw,
    AscendingKw,
    AssemblyKw,
    ByKw,
    DescendingKw,
    EqualsKw,
    FromKw,
    GetKw,
    GlobalKw,
    GroupKw,
    IntoKw,
    JoinKw,
    LetKw,
    ModuleKw,
    OnKw,
    OrderByKw,
    PartialKw,
    RemoveKw,
    SelectKw,
    SetKw,
    WhereKw,
    YieldKw,

    // Nodes: compilation unit and declarations
    CompilationUnit,
    ExternAliasDirective,
    UsingDirective,
    NameEquals,
    NamespaceDeclaration,
    ClassDeclaration,
    StructDeclaration,
    InterfaceDeclaration,
    EnumDeclaration,
    EnumMemberDeclaration,
    DelegateDeclaration,
    BaseList,
    TypeParameterList,
    TypeParameter,
    TypeParameterConstraintClause,
    ClassOrStructConstraint,
    ConstructorConstraint,
    TypeConstraint,
    FieldDeclaration,
    EventFieldDeclaration,
    MethodDeclaration,
    ExplicitInterfaceSpecifier,
    ConstructorDeclaration,
    BaseConstructorInitializer,
    ThisConstructorInitializer,
    DestructorDeclaration,
    PropertyDeclaration,
    IndexerDeclaration,
    EventDeclaration,
    AccessorList,
    GetAccessorDeclaration,
    SetAccessorDeclaration,
    AddAccessorDeclaration,
    RemoveAccessorDeclaration,
    OperatorDeclaration,
    ConversionOperatorDeclaration,
    IncompleteMember,
    ParameterList,
    BracketedParameterList,
    Parameter,
    AttributeList,
    AttributeTargetSpecifier,
    Attribute,
    AttributeArgumentList,
    AttributeArgument,
    NameColon,
    EqualsValueClause,
    VariableDeclaration,
    VariableDeclarator,

    // Nodes: types and names
    IdentifierName,
    GenericName,
    TypeArgumentList,
    QualifiedName,
    AliasQualifiedName,
    PredefinedType,
    ArrayType,
    ArrayRankSpecifier,
    OmittedArraySizeExpression,
    NullableType,
    PointerType,

    // Nodes: expressions
    NumericLiteralExpression,
    StringLiteralExpression,
    CharacterLiteralExpression,
    TrueLiteralExpression,
    FalseLiteralExpression,
    NullLiteralExpression,
    ThisExpression,
    BaseExpression,
    ParenthesizedExpression,
    MemberAccessExpression,
    PointerMemberAccessExpression,
    InvocationExpression,
    ElementAccessExpression,
    ArgumentList,
    BracketedArgumentList,
    Argument,
    AddExpression,
    SubtractExpression,
    MultiplyExpression,
    DivideExpression,
    ModuloExpression,
    LeftShiftExpression,
    RightShiftExpression,
    LogicalOrExpression,
    LogicalAndExpression,
    BitwiseOrExpression,
    BitwiseAndExpression,
    ExclusiveOrExpression,
    EqualsExpression,
    NotEqualsExpression,
    LessThanExpression,
    LessThanOrEqualExpression,
    GreaterThanExpression,
    GreaterThanOrEqualExpression,
    IsExpression,
    AsExpression,
    CoalesceExpression,
    SimpleAssignmentExpression,
    AddAssignmentExpression,
    SubtractAssignmentExpression,
    MultiplyAssignmentExpression,
    DivideAssignmentExpression,
    ModuloAssignmentExpression,
    AndAssignmentExpression,
    ExclusiveOrAssignmentExpression,
    OrAssignmentExpression,
    LeftShiftAssignmentExpression,
    RightShiftAssignmentExpression,
    UnaryPlusExpression,
    UnaryMinusExpression,
    BitwiseNotExpression,
    LogicalNotExpression,
    PreIncrementExpression,
    PreDecrementExpression,
    AddressOfExpression,
    PointerIndirectionExpression,
    PostIncrementExpression,
    PostDecrementExpression,
    ConditionalExpression,
    CastExpression,
    ObjectCreationExpression,
    AnonymousObjectCreationExpression,
    AnonymousObjectMemberDeclarator,
    ArrayCreationExpression,
    ImplicitArrayCreationExpression,
    StackAllocArrayCreationExpression,
    InitializerExpression,
    TypeOfExpression,
    SizeOfExpression,
    DefaultExpression,
    CheckedExpression,
    UncheckedExpression,
    MakeRefExpression,
    RefTypeExpression,
    RefValueExpression,
    ArgListExpression,
    SimpleLambdaExpression,
    ParenthesizedLambdaExpression,
    AnonymousMethodExpression,
    QueryExpression,
    QueryBody,
    FromClause,
    LetClause,
    WhereClause,
    JoinClause,
    JoinIntoClause,
    OrderByClause,
    AscendingOrdering,
    DescendingOrdering,
    SelectClause,
    GroupClause,
    QueryContinuation,

    // Nodes: statements
    Block,
    LocalDeclarationStatement,
    LocalFunctionStatement,
    ExpressionStatement,
    EmptyStatement,
    LabeledStatement,
    GotoStatement,
    GotoCaseStatement,
    GotoDefaultStatement,
    BreakStatement,
    ContinueStatement,
    ReturnStatement,
    ThrowStatement,
    YieldReturnStatement,
    YieldBreakStatement,
    WhileStatement,
    DoStatement,
    ForStatement,
    ForEachStatement,
    UsingStatement,
    FixedStatement,
    CheckedStatement,
    UncheckedStatement,
    UnsafeStatement,
    LockStatement,
    IfStatement,
    ElseClause,
    SwitchStatement,
    SwitchSection,
    CaseSwitchLabel,
    DefaultSwitchLabel,
    TryStatement,
    CatchClause,
    CatchDeclaration,
    FinallyClause,
}

static RESERVED_KEYWORDS: &[(&str, SyntaxKind)] = &[
    ("abstract", SyntaxKind::AbstractKw),
    ("as", SyntaxKind::AsKw),
    ("base", SyntaxKind::BaseKw),
    ("bool", SyntaxKind::BoolKw),
    ("break", SyntaxKind::BreakKw),
    ("byte", SyntaxKind::ByteKw),
    ("case", SyntaxKind::CaseKw),
    ("catch", SyntaxKind::CatchKw),
    ("char", SyntaxKind::CharKw),
    ("checked", SyntaxKind::CheckedKw),
    ("class", SyntaxKind::ClassKw),
    ("const", SyntaxKind::ConstKw),
    ("continue", SyntaxKind::ContinueKw),
    ("decimal", SyntaxKind::DecimalKw),
    ("default", SyntaxKind::DefaultKw),
    ("delegate", SyntaxKind::DelegateKw),
    ("do", SyntaxKind::DoKw),
    ("double", SyntaxKind::DoubleKw),
    ("else", SyntaxKind::ElseKw),
    ("enum", SyntaxKind::EnumKw),
    ("event", SyntaxKind::EventKw),
    ("explicit", SyntaxKind::ExplicitKw),
    ("extern", SyntaxKind::ExternKw),
    ("false", SyntaxKind::FalseKw),
    ("finally", SyntaxKind::FinallyKw),
    ("fixed", SyntaxKind::FixedKw),
    ("float", SyntaxKind::FloatKw),
    ("for", SyntaxKind::ForKw),
    ("foreach", SyntaxKind::ForEachKw),
    ("goto", SyntaxKind::GotoKw),
    ("if", SyntaxKind::IfKw),
    ("implicit", SyntaxKind::ImplicitKw),
    ("in", SyntaxKind::InKw),
    ("int", SyntaxKind::IntKw),
    ("interface", SyntaxKind::InterfaceKw),
    ("internal", SyntaxKind::InternalKw),
    ("is", SyntaxKind::IsKw),
    ("lock", SyntaxKind::LockKw),
    ("long", SyntaxKind::LongKw),
    ("namespace", SyntaxKind::NamespaceKw),
    ("new", SyntaxKind::NewKw),
    ("null", SyntaxKind::NullKw),
    ("object", SyntaxKind::ObjectKw),
    ("operator", SyntaxKind::OperatorKw),
    ("out", SyntaxKind::OutKw),
    ("override", SyntaxKind::OverrideKw),
    ("params", SyntaxKind::ParamsKw),
    ("private", SyntaxKind::PrivateKw),
    ("protected", SyntaxKind::ProtectedKw),
    ("public", SyntaxKind::PublicKw),
    ("readonly", SyntaxKind::ReadOnlyKw),
    ("ref", SyntaxKind::RefKw),
    ("return", SyntaxKind::ReturnKw),
    ("sbyte", SyntaxKind::SByteKw),
    ("sealed", SyntaxKind::SealedKw),
    ("short", SyntaxKind::ShortKw),
    ("sizeof", SyntaxKind::SizeOfKw),
    ("stackalloc", SyntaxKind::StackAllocKw),
    ("static", SyntaxKind::StaticKw),
    ("string", SyntaxKind::StringKw),
    ("struct", SyntaxKind::StructKw),
    ("switch", SyntaxKind::SwitchKw),
    ("this", SyntaxKind::ThisKw),
    ("throw", SyntaxKind::ThrowKw),
    ("true", SyntaxKind::TrueKw),
    ("try", SyntaxKind::TryKw),
    ("typeof", SyntaxKind::TypeOfKw),
    ("uint", SyntaxKind::UIntKw),
    ("ulong", SyntaxKind::ULongKw),
    ("unchecked", SyntaxKind::UncheckedKw),
    ("unsafe", SyntaxKind::UnsafeKw),
    ("ushort", SyntaxKind::UShortKw),
    ("using", SyntaxKind::UsingKw),
    ("virtual", SyntaxKind::VirtualKw),
    ("void", SyntaxKind::VoidKw),
    ("volatile", SyntaxKind::VolatileKw),
    ("while", SyntaxKind::WhileKw),
    ("__arglist", SyntaxKind::ArgListKw),
    ("__makeref", SyntaxKind::MakeRefKw),
    ("__reftype", SyntaxKind::RefTypeKw),
    ("__refvalue", SyntaxKind::RefValueKw),
];

static CONTEXTUAL_KEYWORDS: &[(&str, SyntaxKind)] = &[
    ("add", SyntaxKind::AddKw),
    ("alias", SyntaxKind::AliasKw),
    ("ascending", SyntaxKind::AscendingKw),
    ("assembly", SyntaxKind::AssemblyKw),
    ("by", SyntaxKind::ByKw),
    ("descending", SyntaxKind::DescendingKw),
    ("equals", SyntaxKind::EqualsKw),
    ("from", SyntaxKind::FromKw),
    ("get", SyntaxKind::GetKw),
    ("global", SyntaxKind::GlobalKw),
    ("group", SyntaxKind::GroupKw),
    ("into", SyntaxKind::IntoKw),
    ("join", SyntaxKind::JoinKw),
    ("let", SyntaxKind::LetKw),
    ("module", SyntaxKind::ModuleKw),
    ("on", SyntaxKind::OnKw),
    ("orderby", SyntaxKind::OrderByKw),
    ("partial", SyntaxKind::PartialKw),
    ("remove", SyntaxKind::RemoveKw),
    ("select", SyntaxKind::SelectKw),
    ("set", SyntaxKind::SetKw),
    ("where", SyntaxKind::WhereKw),
    ("yield", SyntaxKind::YieldKw),
];

static PUNCTUATION: &[(&str, SyntaxKind)] = &[
    ("{", SyntaxKind::OpenBrace),
    ("}", SyntaxKind::CloseBrace),
    ("(", SyntaxKind::OpenParen),
    (")", SyntaxKind::CloseParen),
    ("[", SyntaxKind::OpenBracket),
    ("]", SyntaxKind::CloseBracket),
    (";", SyntaxKind::Semicolon),
    (",", SyntaxKind::Comma),
    (".", SyntaxKind::Dot),
    (":", SyntaxKind::Colon),
    ("::", SyntaxKind::ColonColon),
    ("?", SyntaxKind::Question),
    ("??", SyntaxKind::QuestionQuestion),
    ("~", SyntaxKind::Tilde),
    ("!", SyntaxKind::Bang),
    ("+", SyntaxKind::Plus),
    ("-", SyntaxKind::Minus),
    ("*", SyntaxKind::Star),
    ("/", SyntaxKind::Slash),
    ("%", SyntaxKind::Percent),
    ("&", SyntaxKind::Amp),
    ("|", SyntaxKind::Bar),
    ("^", SyntaxKind::Caret),
    ("<", SyntaxKind::Lt),
    (">", SyntaxKind::Gt),
    ("=", SyntaxKind::Eq),
    ("++", SyntaxKind::PlusPlus),
    ("--", SyntaxKind::MinusMinus),
    ("&&", SyntaxKind::AmpAmp),
    ("||", SyntaxKind::BarBar),
    ("==", SyntaxKind::EqEq),
    ("!=", SyntaxKind::BangEq),
    ("<=", SyntaxKind::LtEq),
    (">=", SyntaxKind::GtEq),
    ("<<", SyntaxKind::LtLt),
    ("+=", SyntaxKind::PlusEq),
    ("-=", SyntaxKind::MinusEq),
    ("*=", SyntaxKind::StarEq),
    ("/=", SyntaxKind::SlashEq),
    ("%=", SyntaxKind::PercentEq),
    ("&=", SyntaxKind::AmpEq),
    ("|=", SyntaxKind::BarEq),
    ("^=", SyntaxKind::CaretEq),
    ("<<=", SyntaxKind::LtLtEq),
    ("->", SyntaxKind::Arrow),
    ("=>", SyntaxKind::FatArrow),
];

impl SyntaxKind {
    /// Reserved keyword for `text`, if any. Contextual keywords are not
    /// included: the lexer always emits them as identifiers.
    pub fn from_keyword(text: &str) -> Option<SyntaxKind> {
        RESERVED_KEYWORDS
            .iter()
            .find(|(kw, _)| *kw == text)
            .map(|(_, kind)| *kind)
    }

    pub fn from_contextual_keyword(text: &str) -> Option<SyntaxKind> {
        CONTEXTUAL_KEYWORDS
            .iter()
            .find(|(kw, _)| *kw == text)
            .map(|(_, kind)| *kind)
    }

    /// Longest-match candidates for operator lexing.
    pub fn punctuation_table() -> &'static [(&'static str, SyntaxKind)] {
        PUNCTUATION
    }

    /// The fixed spelling of keyword and punctuation kinds.
    pub fn fixed_text(self) -> Option<&'static str> {
        RESERVED_KEYWORDS
            .iter()
            .chain(CONTEXTUAL_KEYWORDS.iter())
            .chain(PUNCTUATION.iter())
            .find(|(_, kind)| *kind == self)
            .map(|(text, _)| *text)
    }

    pub fn is_token(self) -> bool {
        (self as u16) < (SyntaxKind::CompilationUnit as u16)
    }

    pub fn is_node(self) -> bool {
        !self.is_token()
    }

    pub fn is_keyword(self) -> bool {
        let k = self as u16;
        k >= SyntaxKind::AbstractKw as u16 && k <= SyntaxKind::YieldKw as u16
    }

    pub fn is_contextual_keyword(self) -> bool {
        let k = self as u16;
        k >= SyntaxKind::AddKw as u16 && k <= SyntaxKind::YieldKw as u16
    }

    pub fn is_punctuation(self) -> bool {
        let k = self as u16;
        k >= SyntaxKind::OpenBrace as u16 && k <= SyntaxKind::FatArrow as u16
    }

    pub fn is_literal_token(self) -> bool {
        matches!(
            self,
            SyntaxKind::NumericLiteral | SyntaxKind::CharacterLiteral | SyntaxKind::StringLiteral
        )
    }

    pub fn is_predefined_type_keyword(self) -> bool {
        matches!(
            self,
            SyntaxKind::BoolKw
                | SyntaxKind::ByteKw
                | SyntaxKind::SByteKw
                | SyntaxKind::CharKw
                | SyntaxKind::DecimalKw
                | SyntaxKind::DoubleKw
                | SyntaxKind::FloatKw
                | SyntaxKind::IntKw
                | SyntaxKind::UIntKw
                | SyntaxKind::LongKw
                | SyntaxKind::ULongKw
                | SyntaxKind::ShortKw
                | SyntaxKind::UShortKw
                | SyntaxKind::ObjectKw
                | SyntaxKind::StringKw
                | SyntaxKind::VoidKw
        )
    }

    /// Declaration modifiers. `partial` only counts once remapped.
    pub fn is_modifier_keyword(self) -> bool {
        matches!(
            self,
            SyntaxKind::AbstractKw
                | SyntaxKind::ConstKw
                | SyntaxKind::ExternKw
                | SyntaxKind::ExplicitKw
                | SyntaxKind::ImplicitKw
                | SyntaxKind::InternalKw
                | SyntaxKind::NewKw
                | SyntaxKind::OverrideKw
                | SyntaxKind::PartialKw
                | SyntaxKind::PrivateKw
                | SyntaxKind::ProtectedKw
                | SyntaxKind::PublicKw
                | SyntaxKind::ReadOnlyKw
                | SyntaxKind::SealedKw
                | SyntaxKind::StaticKw
                | SyntaxKind::UnsafeKw
                | SyntaxKind::VirtualKw
                | SyntaxKind::VolatileKw
                | SyntaxKind::FixedKw
        )
    }

    pub fn is_type_declaration(self) -> bool {
        matches!(
            self,
            SyntaxKind::ClassDeclaration
                | SyntaxKind::StructDeclaration
                | SyntaxKind::InterfaceDeclaration
                | SyntaxKind::EnumDeclaration
                | SyntaxKind::DelegateDeclaration
        )
    }

    pub fn is_statement(self) -> bool {
        matches!(
            self,
            SyntaxKind::Block
                | SyntaxKind::LocalDeclarationStatement
                | SyntaxKind::LocalFunctionStatement
                | SyntaxKind::ExpressionStatement
                | SyntaxKind::EmptyStatement
                | SyntaxKind::LabeledStatement
                | SyntaxKind::GotoStatement
                | SyntaxKind::GotoCaseStatement
                | SyntaxKind::GotoDefaultStatement
                | SyntaxKind::BreakStatement
                | SyntaxKind::ContinueStatement
                | SyntaxKind::ReturnStatement
                | SyntaxKind::ThrowStatement
                | SyntaxKind::YieldReturnStatement
                | SyntaxKind::YieldBreakStatement
                | SyntaxKind::WhileStatement
                | SyntaxKind::DoStatement
                | SyntaxKind::ForStatement
                | SyntaxKind::ForEachStatement
                | SyntaxKind::UsingStatement
                | SyntaxKind::FixedStatement
                | SyntaxKind::CheckedStatement
                | SyntaxKind::UncheckedStatement
                | SyntaxKind::UnsafeStatement
                | SyntaxKind::LockStatement
                | SyntaxKind::IfStatement
                | SyntaxKind::SwitchStatement
                | SyntaxKind::TryStatement
        )
    }

    /// Loops and switches: the constructs a `break` can leave.
    pub fn is_breakable(self) -> bool {
        matches!(
            self,
            SyntaxKind::DoStatement
                | SyntaxKind::WhileStatement
                | SyntaxKind::SwitchStatement
                | SyntaxKind::ForStatement
                | SyntaxKind::ForEachStatement
        )
    }

    pub fn is_continuable(self) -> bool {
        matches!(
            self,
            SyntaxKind::DoStatement
                | SyntaxKind::WhileStatement
                | SyntaxKind::ForStatement
                | SyntaxKind::ForEachStatement
        )
    }

    pub fn is_assignment_expression(self) -> bool {
        let k = self as u16;
        k >= SyntaxKind::SimpleAssignmentExpression as u16
            && k <= SyntaxKind::RightShiftAssignmentExpression as u16
    }

    pub fn is_binary_expression(self) -> bool {
        let k = self as u16;
        k >= SyntaxKind::AddExpression as u16 && k <= SyntaxKind::CoalesceExpression as u16
    }

    pub fn is_literal_expression(self) -> bool {
        let k = self as u16;
        k >= SyntaxKind::NumericLiteralExpression as u16
            && k <= SyntaxKind::NullLiteralExpression as u16
    }

    pub fn is_accessor(self) -> bool {
        matches!(
            self,
            SyntaxKind::GetAccessorDeclaration
                | SyntaxKind::SetAccessorDeclaration
                | SyntaxKind::AddAccessorDeclaration
                | SyntaxKind::RemoveAccessorDeclaration
        )
    }

    pub fn is_type_syntax(self) -> bool {
        matches!(
            self,
            SyntaxKind::IdentifierName
                | SyntaxKind::GenericName
                | SyntaxKind::QualifiedName
                | SyntaxKind::AliasQualifiedName
                | SyntaxKind::PredefinedType
                | SyntaxKind::ArrayType
                | SyntaxKind::NullableType
                | SyntaxKind::PointerType
        )
    }
}

impl fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Kinds of trivia attached to tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriviaKind {
    Whitespace,
    EndOfLine,
    SingleLineComment,
    MultiLineComment,
    /// One `///` line, without its end of line.
    DocumentationComment,
    /// A whole preprocessor line, `#` through the last character before the end of line.
    Directive,
    DisabledText,
    SkippedTokens,
}

impl TriviaKind {
    pub fn is_comment(self) -> bool {
        matches!(
            self,
            TriviaKind::SingleLineComment
                | TriviaKind::MultiLineComment
                | TriviaKind::DocumentationComment
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_lookup() {
        assert_eq!(SyntaxKind::from_keyword("foreach"), Some(SyntaxKind::ForEachKw));
        assert_eq!(SyntaxKind::from_keyword("__makeref"), Some(SyntaxKind::MakeRefKw));
        assert_eq!(SyntaxKind::from_keyword("var"), None);
        assert_eq!(SyntaxKind::from_keyword("from"), None);
        assert_eq!(SyntaxKind::from_contextual_keyword("from"), Some(SyntaxKind::FromKw));
    }

    #[test]
    fn test_ranges() {
        assert!(SyntaxKind::Identifier.is_token());
        assert!(SyntaxKind::YieldKw.is_token());
        assert!(SyntaxKind::YieldKw.is_contextual_keyword());
        assert!(!SyntaxKind::WhileKw.is_contextual_keyword());
        assert!(SyntaxKind::WhileKw.is_keyword());
        assert!(!SyntaxKind::FatArrow.is_keyword());
        assert!(SyntaxKind::FatArrow.is_punctuation());
        assert!(SyntaxKind::CompilationUnit.is_node());
        assert!(SyntaxKind::CoalesceExpression.is_binary_expression());
        assert!(!SyntaxKind::SimpleAssignmentExpression.is_binary_expression());
        assert!(SyntaxKind::RightShiftAssignmentExpression.is_assignment_expression());
    }

    #[test]
    fn test_fixed_text() {
        assert_eq!(SyntaxKind::LtLtEq.fixed_text(), Some("<<="));
        assert_eq!(SyntaxKind::OrderByKw.fixed_text(), Some("orderby"));
        assert_eq!(SyntaxKind::Identifier.fixed_text(), None);
    }
}
