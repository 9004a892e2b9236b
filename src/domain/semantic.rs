//! Just enough type resolution to tell reference types from value types.

use crate::domain::index::TypeIndex;
use crate::domain::syntax::{SyntaxKind, SyntaxNode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedType {
    /// Type of the `null` literal.
    Null,
    Reference,
    Value,
}

impl ResolvedType {
    pub fn admits_null(self) -> bool {
        matches!(self, ResolvedType::Null | ResolvedType::Reference)
    }
}

/// Framework types a solution refers to without declaring them.
static WELL_KNOWN_REFERENCE: &[&str] = &[
    "Action", "Array", "ArrayList", "Attribute", "Delegate", "Dictionary", "EventArgs", "EventHandler",
    "Exception", "Func", "HashSet", "Hashtable", "ICollection", "IDictionary", "IDisposable",
    "IEnumerable", "IEnumerator", "IList", "IQueryable", "List", "Object", "Queue", "Random", "Stack",
    "Stream", "String", "StringBuilder", "Task", "TextReader", "TextWriter", "Type", "Uri",
];

static WELL_KNOWN_VALUE: &[&str] = &[
    "Boolean", "Byte", "CancellationToken", "Char", "DateTime", "DateTimeOffset", "Decimal", "Double",
    "Guid", "Int16", "Int32", "Int64", "IntPtr", "KeyValuePair", "Nullable", "SByte", "Single",
    "TimeSpan", "UInt16", "UInt32", "UInt64", "UIntPtr",
];

/// Resolves types against the declarations of one solution.
#[derive(Debug, Clone, Copy)]
pub struct DeclaredTypesModel<'i> {
    index: &'i TypeIndex,
}

impl<'i> DeclaredTypesModel<'i> {
    pub fn new(index: &'i TypeIndex) -> Self {
        DeclaredTypesModel { index }
    }

    /// Static type of an expression, when it can be read off the syntax.
    pub fn type_of(&self, expr: SyntaxNode<'_>) -> Option<ResolvedType> {
        match expr.kind() {
            SyntaxKind::NullLiteralExpression => Some(ResolvedType::Null),
            SyntaxKind::StringLiteralExpression => Some(ResolvedType::Reference),
            SyntaxKind::NumericLiteralExpression
            | SyntaxKind::CharacterLiteralExpression
            | SyntaxKind::TrueLiteralExpression
            | SyntaxKind::FalseLiteralExpression => Some(ResolvedType::Value),
            SyntaxKind::ParenthesizedExpression => self.type_of(expr.nth_child_node(0)?),
            SyntaxKind::DefaultExpression
            | SyntaxKind::CastExpression
            | SyntaxKind::ObjectCreationExpression => self.resolve(expr.nth_child_node(0)?),
            SyntaxKind::ArrayCreationExpression | SyntaxKind::ImplicitArrayCreationExpression => {
                Some(ResolvedType::Reference)
            }
            _ => None,
        }
    }

    pub fn resolve(&self, ty: SyntaxNode<'_>) -> Option<ResolvedType> {
        match ty.kind() {
            SyntaxKind::PredefinedType => {
                let keyword = ty.first_token()?.kind();
                match keyword {
                    SyntaxKind::ObjectKw | SyntaxKind::StringKw => Some(ResolvedType::Reference),
                    SyntaxKind::VoidKw => None,
                    _ => Some(ResolvedType::Value),
                }
            }
            SyntaxKind::NullableType | SyntaxKind::PointerType => Some(ResolvedType::Value),
            SyntaxKind::ArrayType => Some(ResolvedType::Reference),
            SyntaxKind::IdentifierName
            | SyntaxKind::GenericName
            | SyntaxKind::QualifiedName
            | SyntaxKind::AliasQualifiedName => self.resolve_named(ty),
            _ => None,
        }
    }

    fn resolve_named(&self, ty: SyntaxNode<'_>) -> Option<ResolvedType> {
        let name = simple_name(ty)?;
        if WELL_KNOWN_REFERENCE.contains(&name) {
            return Some(ResolvedType::Reference);
        }
        if WELL_KNOWN_VALUE.contains(&name) {
            return Some(ResolvedType::Value);
        }
        if let Some(reference) = self.index.is_reference_type(name) {
            return Some(if reference { ResolvedType::Reference } else { ResolvedType::Value });
        }
        if ty.kind() == SyntaxKind::IdentifierName {
            return type_parameter_constraint(ty, name);
        }
        None
    }
}

/// Rightmost identifier of a (possibly qualified or generic) name.
fn simple_name<'a>(ty: SyntaxNode<'a>) -> Option<&'a str> {
    match ty.kind() {
        SyntaxKind::IdentifierName => Some(ty.text().trim_start_matches('@')),
        SyntaxKind::GenericName => ty.token(SyntaxKind::Identifier).map(|t| t.text().trim_start_matches('@')),
        SyntaxKind::QualifiedName | SyntaxKind::AliasQualifiedName => simple_name(ty.child_nodes().last()?),
        _ => None,
    }
}

/// A type parameter in scope at `at`, resolved through its `class` or
/// `struct` constraint.
fn type_parameter_constraint(at: SyntaxNode<'_>, name: &str) -> Option<ResolvedType> {
    let declaring = at.ancestors().find(|a| {
        a.child_node(SyntaxKind::TypeParameterList).is_some_and(|list| {
            list.child_nodes_of(SyntaxKind::TypeParameter)
                .any(|p| p.token(SyntaxKind::Identifier).is_some_and(|t| t.text() == name))
        })
    })?;
    let clause = declaring
        .child_nodes_of(SyntaxKind::TypeParameterConstraintClause)
        .find(|c| c.nth_child_node(0).is_some_and(|n| n.text() == name))?;
    let constraint = clause.child_node(SyntaxKind::ClassOrStructConstraint)?;
    if constraint.has_token(SyntaxKind::ClassKw) {
        Some(ResolvedType::Reference)
    } else if constraint.has_token(SyntaxKind::StructKw) {
        Some(ResolvedType::Value)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::csharp::parser::parse_compilation_unit;
    use rstest::rstest;

    fn resolve_return(src: &str) -> Option<ResolvedType> {
        let tree = parse_compilation_unit(src, &[]);
        let index = TypeIndex::default();
        index.index_tree("Test.cs", &tree);
        let model = DeclaredTypesModel::new(&index);
        let ret = tree
            .root()
            .descendants()
            .find(|n| n.kind() == SyntaxKind::ReturnStatement)
            .expect("has a return");
        model.type_of(ret.nth_child_node(0).expect("returns a value"))
    }

    #[rstest]
    #[case("class C { object M() { return null; } }", Some(ResolvedType::Null))]
    #[case("class C { object M() { return default(object); } }", Some(ResolvedType::Reference))]
    #[case("class C { int M() { return default(int); } }", Some(ResolvedType::Value))]
    #[case("class C { int? M() { return default(int?); } }", Some(ResolvedType::Value))]
    #[case("class C { int[] M() { return default(int[]); } }", Some(ResolvedType::Reference))]
    #[case("class C { Guid M() { return default(System.Guid); } }", Some(ResolvedType::Value))]
    #[case("struct P { } class C { P M() { return default(P); } }", Some(ResolvedType::Value))]
    #[case("class C { T M<T>() where T : class { return default(T); } }", Some(ResolvedType::Reference))]
    #[case("class C<T> where T : struct { T M() { return default(T); } }", Some(ResolvedType::Value))]
    #[case("class C { T M<T>() { return default(T); } }", None)]
    #[case("class C { Widget M() { return default(Widget); } }", None)]
    #[case("class C { object M() { return (null); } }", Some(ResolvedType::Null))]
    fn resolves_return_types(#[case] src: &str, #[case] expected: Option<ResolvedType>) {
        assert_eq!(resolve_return(src), expected);
    }

    #[test]
    fn only_value_types_reject_null() {
        assert!(ResolvedType::Null.admits_null());
        assert!(ResolvedType::Reference.admits_null());
        assert!(!ResolvedType::Value.admits_null());
    }
}
