use crate::domain::syntax::{SyntaxElement, SyntaxKind, SyntaxNode};
use crate::domain::vb::{Expr, Ordering, QueryClause, RangeVariable};

use super::node_visitor::{child, NodeVisitor, Result};
use super::ConvertError;

/// Child nodes of a query clause, split at its keyword tokens: the nodes
/// before the first keyword in `markers`, then those after each marker.
fn segments<'a>(node: SyntaxNode<'a>, markers: &[SyntaxKind]) -> Vec<Vec<SyntaxNode<'a>>> {
    let mut out = vec![Vec::new()];
    for element in node.children() {
        match element {
            SyntaxElement::Token(t) if markers.contains(&t.kind()) => out.push(Vec::new()),
            SyntaxElement::Node(n) => {
                if let Some(last) = out.last_mut() {
                    last.push(n);
                }
            }
            SyntaxElement::Token(_) => {}
        }
    }
    out
}

impl NodeVisitor<'_> {
    pub(super) fn query(&self, node: SyntaxNode<'_>) -> Result<Expr> {
        let mut clauses = vec![self.range_clause(child(node, 0)?)?];
        self.query_body(child(node, 1)?, &mut clauses)?;
        Ok(Expr::Query(clauses))
    }

    fn query_body(&self, body: SyntaxNode<'_>, clauses: &mut Vec<QueryClause>) -> Result<()> {
        let continuation = body.child_node(SyntaxKind::QueryContinuation);
        for clause in body.child_nodes() {
            let translated = match clause.kind() {
                SyntaxKind::FromClause => self.range_clause(clause)?,
                SyntaxKind::LetClause => QueryClause::Let {
                    name: self.declared_name(clause)?,
                    value: self.expression(child(clause, 0)?)?,
                },
                SyntaxKind::WhereClause => QueryClause::Where(self.expression(child(clause, 0)?)?),
                SyntaxKind::JoinClause => self.join(clause)?,
                SyntaxKind::OrderByClause => QueryClause::OrderBy(
                    clause
                        .child_nodes()
                        .map(|o| {
                            let direction = match o.kind() {
                                SyntaxKind::DescendingOrdering => Some("Descending"),
                                _ if o.has_token(SyntaxKind::AscendingKw) => Some("Ascending"),
                                _ => None,
                            };
                            Ok(Ordering { key: self.expression(child(o, 0)?)?, direction })
                        })
                        .collect::<Result<Vec<_>>>()?,
                ),
                SyntaxKind::SelectClause => QueryClause::Select(self.expression(child(clause, 0)?)?),
                SyntaxKind::GroupClause => QueryClause::GroupBy {
                    element: self.expression(child(clause, 0)?)?,
                    key: self.expression(child(clause, 1)?)?,
                    into: match continuation {
                        Some(c) => Some(self.declared_name(c)?),
                        None => None,
                    },
                },
                SyntaxKind::QueryContinuation => {
                    if let Some(rest) = clause.child_node(SyntaxKind::QueryBody) {
                        self.query_body(rest, clauses)?;
                    }
                    continue;
                }
                other => return Err(ConvertError::unmapped(other, "query")),
            };
            clauses.push(translated);
        }
        Ok(())
    }

    /// `from [T] x in source`, also used for `from` clauses inside the body.
    fn range_clause(&self, node: SyntaxNode<'_>) -> Result<QueryClause> {
        let parts = segments(node, &[SyntaxKind::InKw]);
        let ty = match parts.first().and_then(|p| p.first()) {
            Some(ty) => Some(self.type_ref(*ty)?),
            None => None,
        };
        let source = parts
            .get(1)
            .and_then(|p| p.first())
            .ok_or_else(|| ConvertError::unmapped(node.kind(), "from clause"))?;
        Ok(QueryClause::From(RangeVariable {
            name: self.declared_name(node)?,
            ty,
            source: self.expression(*source)?,
        }))
    }

    fn join(&self, node: SyntaxNode<'_>) -> Result<QueryClause> {
        let parts = segments(node, &[SyntaxKind::InKw, SyntaxKind::OnKw, SyntaxKind::EqualsKw]);
        let part = |i: usize| {
            parts
                .get(i)
                .and_then(|p| p.first().copied())
                .ok_or_else(|| ConvertError::unmapped(node.kind(), "join clause"))
        };
        let ty = match parts.first().and_then(|p| p.first()) {
            Some(ty) => Some(self.type_ref(*ty)?),
            None => None,
        };
        let into = match node.child_node(SyntaxKind::JoinIntoClause) {
            Some(into) => Some(self.declared_name(into)?),
            None => None,
        };
        Ok(QueryClause::Join {
            variable: RangeVariable {
                name: self.declared_name(node)?,
                ty,
                source: self.expression(part(1)?)?,
            },
            left: self.expression(part(2)?)?,
            right: self.expression(part(3)?)?,
            into,
        })
    }
}
