use dashmap::DashMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::solution::Solution;
use crate::domain::syntax::{SyntaxKind, SyntaxNode, SyntaxTree};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeclarationKind {
    Class,
    Interface,
    Delegate,
    Struct,
    Enum,
}

impl DeclarationKind {
    pub fn from_syntax(kind: SyntaxKind) -> Option<Self> {
        match kind {
            SyntaxKind::ClassDeclaration => Some(DeclarationKind::Class),
            SyntaxKind::InterfaceDeclaration => Some(DeclarationKind::Interface),
            SyntaxKind::DelegateDeclaration => Some(DeclarationKind::Delegate),
            SyntaxKind::StructDeclaration => Some(DeclarationKind::Struct),
            SyntaxKind::EnumDeclaration => Some(DeclarationKind::Enum),
            _ => None,
        }
    }

    pub fn is_reference_type(self) -> bool {
        matches!(self, DeclarationKind::Class | DeclarationKind::Interface | DeclarationKind::Delegate)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeSignature {
    pub name: String,
    pub kind: DeclarationKind,
    pub location: String, // file:line
}

/// Thread-safe index of the types declared in a solution, keyed by simple
/// name. Built in parallel, one document per task.
#[derive(Debug, Default)]
pub struct TypeIndex {
    pub types: DashMap<String, Vec<TypeSignature>>,
}

impl TypeIndex {
    /// Index every document of `solution`. Documents that cannot be read are
    /// skipped with a warning.
    pub fn build(solution: &Solution) -> Self {
        let index = TypeIndex::default();
        let documents: Vec<_> = solution.documents().collect();

        documents.par_iter().for_each(|document| match solution.syntax_tree(document) {
            Ok(tree) => index.index_tree(document.relative_path(), tree),
            Err(e) => warn!(file = %document.relative_path(), error = %e, "skipping document"),
        });

        debug!(types = index.types.len(), "type index built");
        index
    }

    pub fn index_tree(&self, file_path: &str, tree: &SyntaxTree) {
        for node in tree.root().descendants() {
            if let Some(signature) = signature(file_path, node) {
                // Entry guard only lives for the push.
                self.types.entry(signature.name.clone()).or_default().push(signature);
            }
        }
    }

    /// Declarations of `name`, cloned so no map lock is held by the caller.
    pub fn find(&self, name: &str) -> Vec<TypeSignature> {
        self.types.get(name).map(|r| r.clone()).unwrap_or_default()
    }

    /// Reference-ness of a declared type. `None` when the name is unknown or
    /// its declarations disagree.
    pub fn is_reference_type(&self, name: &str) -> Option<bool> {
        let entry = self.types.get(name)?;
        let mut kinds = entry.iter().map(|s| s.kind.is_reference_type());
        let first = kinds.next()?;
        kinds.all(|k| k == first).then_some(first)
    }
}

fn signature(file_path: &str, node: SyntaxNode<'_>) -> Option<TypeSignature> {
    let kind = DeclarationKind::from_syntax(node.kind())?;
    let name = node.token(SyntaxKind::Identifier)?;
    if name.is_missing() {
        return None;
    }
    Some(TypeSignature {
        name: name.text().trim_start_matches('@').to_string(),
        kind,
        location: format!("{}:{}", file_path, node.start_line() + 1),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::csharp::parser::parse_compilation_unit;

    fn index(sources: &[(&str, &str)]) -> TypeIndex {
        let index = TypeIndex::default();
        let trees: Vec<_> = sources
            .iter()
            .map(|(file, src)| (*file, parse_compilation_unit(src, &[])))
            .collect();
        trees.par_iter().for_each(|(file, tree)| index.index_tree(file, tree));
        index
    }

    #[test]
    fn records_every_declaration_kind() {
        let index = index(&[(
            "Model.cs",
            "namespace N {\n class Customer { class Nested { } }\n struct Point { }\n interface IRepo { }\n enum Color { Red }\n delegate void Handler();\n}",
        )]);
        assert_eq!(index.is_reference_type("Customer"), Some(true));
        assert_eq!(index.is_reference_type("Nested"), Some(true));
        assert_eq!(index.is_reference_type("Point"), Some(false));
        assert_eq!(index.is_reference_type("IRepo"), Some(true));
        assert_eq!(index.is_reference_type("Color"), Some(false));
        assert_eq!(index.is_reference_type("Handler"), Some(true));
        assert_eq!(index.is_reference_type("Missing"), None);
        assert_eq!(index.find("Point")[0].location, "Model.cs:3");
    }

    #[test]
    fn conflicting_declarations_are_unresolved() {
        let index = index(&[
            ("A.cs", "namespace A { class Key { } }"),
            ("B.cs", "namespace B { struct Key { } }"),
        ]);
        assert_eq!(index.find("Key").len(), 2);
        assert_eq!(index.is_reference_type("Key"), None);
    }
}
