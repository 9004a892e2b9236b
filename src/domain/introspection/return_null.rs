use crate::domain::semantic::DeclaredTypesModel;
use crate::domain::syntax::{SyntaxKind, SyntaxNode, SyntaxTree};

use super::{collapse_whitespace, owning_type, ReturnNullRecord, ScanError};

/// `null` or `default(T)`, looking through parentheses.
fn null_shaped(expr: SyntaxNode<'_>) -> Option<SyntaxNode<'_>> {
    match expr.kind() {
        SyntaxKind::NullLiteralExpression | SyntaxKind::DefaultExpression => Some(expr),
        SyntaxKind::ParenthesizedExpression => null_shaped(expr.nth_child_node(0)?),
        _ => None,
    }
}

/// `return` and `yield return` statements of `tree` that hand back `null`
/// or `default(T)`. With a model, `default(T)` of a known value type is
/// left out; unresolved types are still reported.
pub fn return_null(
    tree: &SyntaxTree,
    file_path: &str,
    model: Option<&DeclaredTypesModel<'_>>,
) -> Result<Vec<ReturnNullRecord>, ScanError> {
    let mut records = Vec::new();
    let returns = tree
        .root()
        .descendants()
        .filter(|n| matches!(n.kind(), SyntaxKind::ReturnStatement | SyntaxKind::YieldReturnStatement));
    for statement in returns {
        let Some(expr) = statement.nth_child_node(0).and_then(null_shaped) else {
            continue;
        };
        if let Some(model) = model {
            if model.type_of(expr).is_some_and(|t| !t.admits_null()) {
                continue;
            }
        }
        records.push(ReturnNullRecord {
            type_identifier: owning_type(statement, file_path)?,
            sources_sample: collapse_whitespace(statement.text()),
            file_path: file_path.to_string(),
            source_line: statement.start_line() + 1,
        });
    }
    Ok(records)
}
