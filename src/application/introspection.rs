//! Solution-wide scans: load, fan out one task per document, join.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, info};

use crate::domain::index::TypeIndex;
use crate::domain::introspection::{complexity, return_null, ComplexityRecord, ReturnNullRecord, ScanError};
use crate::domain::semantic::DeclaredTypesModel;
use crate::domain::solution::Solution;
use crate::domain::syntax::SyntaxTree;
use crate::infrastructure::concurrency::{run_with_cancellation, CancellationToken};
use crate::infrastructure::csharp::CSharpParser;
use crate::infrastructure::solution_loader::SolutionLoader;
use crate::ports::SyntaxParser;

pub struct Introspection {
    parser: Arc<dyn SyntaxParser>,
}

impl Default for Introspection {
    fn default() -> Self {
        Introspection::new(Arc::new(CSharpParser::new()))
    }
}

impl Introspection {
    pub fn new(parser: Arc<dyn SyntaxParser>) -> Self {
        Introspection { parser }
    }

    /// Methods with more than `max_complexity` decision points.
    pub fn search_for_complex_methods(
        &self,
        path: impl AsRef<Path>,
        max_complexity: usize,
        token: &CancellationToken,
    ) -> Result<Vec<ComplexityRecord>, ScanError> {
        self.scan("complexity", path.as_ref(), token, move |solution, token| {
            fan_out(solution, token, |tree, file| complexity(tree, file, max_complexity))
        })
    }

    /// `return null`, `return default(T)` and their `yield` forms, judged on
    /// syntax alone.
    pub fn search_for_return_null_statements(
        &self,
        path: impl AsRef<Path>,
        token: &CancellationToken,
    ) -> Result<Vec<ReturnNullRecord>, ScanError> {
        self.scan("return-null", path.as_ref(), token, |solution, token| {
            fan_out(solution, token, |tree, file| return_null(tree, file, None))
        })
    }

    /// Like [`search_for_return_null_statements`](Self::search_for_return_null_statements),
    /// but `default(T)` of a resolved value type is not reported.
    pub fn search_for_return_null_statements_semantic(
        &self,
        path: impl AsRef<Path>,
        token: &CancellationToken,
    ) -> Result<Vec<ReturnNullRecord>, ScanError> {
        self.scan("return-null (semantic)", path.as_ref(), token, |solution, token| {
            let index = TypeIndex::build(solution);
            token.check()?;
            let model = DeclaredTypesModel::new(&index);
            fan_out(solution, token, |tree, file| return_null(tree, file, Some(&model)))
        })
    }

    /// Loads the solution on a scan thread and runs `work` over it. The
    /// solution is dropped on that thread when `work` ends, however it ends.
    fn scan<T, F>(&self, what: &'static str, path: &Path, token: &CancellationToken, work: F) -> Result<Vec<T>, ScanError>
    where
        T: Send + 'static,
        F: FnOnce(&Solution, &CancellationToken) -> Result<Vec<T>, ScanError> + Send + 'static,
    {
        let loader = SolutionLoader::new(Arc::clone(&self.parser)).map_err(ScanError::Load)?;
        let path = path.to_path_buf();
        let started = Instant::now();
        let records = run_with_cancellation(token, move |worker_token| {
            let solution = loader.load(&path).map_err(ScanError::Load)?;
            work(&solution, &worker_token)
        })?;
        info!(scan = what, records = records.len(), elapsed = ?started.elapsed(), "scan finished");
        Ok(records)
    }
}

/// Runs `analyze` on every document in parallel and concatenates the
/// per-document results.
fn fan_out<T, F>(solution: &Solution, token: &CancellationToken, analyze: F) -> Result<Vec<T>, ScanError>
where
    T: Send,
    F: Fn(&SyntaxTree, &str) -> Result<Vec<T>, ScanError> + Sync,
{
    let documents: Vec<_> = solution.documents().collect();
    let per_document = documents
        .par_iter()
        .map(|document| {
            token.check()?;
            let tree = solution.syntax_tree(document).map_err(ScanError::Load)?;
            let found = analyze(tree, document.relative_path())?;
            debug!(file = %document.relative_path(), found = found.len(), "document analyzed");
            Ok(found)
        })
        .collect::<Result<Vec<_>, ScanError>>()?;
    Ok(per_document.into_iter().flatten().collect())
}

/// Groups records by owning type, heaviest group first (ties by file of the
/// group's first record). Within a group, highest count first, then name.
pub fn order_complexity(records: Vec<ComplexityRecord>) -> Vec<Vec<ComplexityRecord>> {
    let mut groups: Vec<Vec<ComplexityRecord>> = Vec::new();
    let mut slot: HashMap<String, usize> = HashMap::new();
    for record in records {
        match slot.get(&record.type_identifier) {
            Some(&i) => groups[i].push(record),
            None => {
                slot.insert(record.type_identifier.clone(), groups.len());
                groups.push(vec![record]);
            }
        }
    }
    for group in &mut groups {
        group.sort_by(|a, b| {
            b.n_statement_syntax
                .cmp(&a.n_statement_syntax)
                .then_with(|| a.method_identifier.cmp(&b.method_identifier))
        });
    }
    let total = |g: &[ComplexityRecord]| g.iter().map(|r| r.n_statement_syntax).sum::<usize>();
    let first_file = |g: &[ComplexityRecord]| g.first().map(|r| r.file_path.clone()).unwrap_or_default();
    groups.sort_by(|a, b| total(b).cmp(&total(a)).then_with(|| first_file(a).cmp(&first_file(b))));
    groups
}

pub fn order_return_null(mut records: Vec<ReturnNullRecord>) -> Vec<ReturnNullRecord> {
    records.sort_by(|a, b| a.file_path.cmp(&b.file_path).then(a.source_line.cmp(&b.source_line)));
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(ty: &str, method: &str, n: usize, file: &str) -> ComplexityRecord {
        ComplexityRecord {
            type_identifier: ty.into(),
            method_identifier: method.into(),
            sources_sample: String::new(),
            n_statement_syntax: n,
            file_path: file.into(),
            source_line: 0,
        }
    }

    #[test]
    fn complexity_groups_heaviest_type_first() {
        let ordered = order_complexity(vec![
            record("Small", "Only", 12, "b.cs"),
            record("Big", "Alpha", 11, "a.cs"),
            record("Big", "Beta", 14, "a.cs"),
            record("Big", "Aardvark", 14, "a.cs"),
            record("Tie", "Only", 12, "a.cs"),
        ]);
        let shape: Vec<Vec<(&str, &str)>> = ordered
            .iter()
            .map(|g| g.iter().map(|r| (r.type_identifier.as_str(), r.method_identifier.as_str())).collect())
            .collect();
        assert_eq!(
            shape,
            vec![
                vec![("Big", "Aardvark"), ("Big", "Beta"), ("Big", "Alpha")],
                vec![("Tie", "Only")],
                vec![("Small", "Only")],
            ]
        );
    }

    #[test]
    fn return_null_sorts_by_file_then_line() {
        let r = |file: &str, line| ReturnNullRecord {
            type_identifier: "T".into(),
            sources_sample: "return null;".into(),
            file_path: file.into(),
            source_line: line,
        };
        let ordered = order_return_null(vec![r("b.cs", 1), r("a.cs", 9), r("a.cs", 2)]);
        let keys: Vec<_> = ordered.iter().map(|x| (x.file_path.as_str(), x.source_line)).collect();
        assert_eq!(keys, vec![("a.cs", 2), ("a.cs", 9), ("b.cs", 1)]);
    }

    #[test]
    fn missing_solution_is_a_load_error() {
        let token = CancellationToken::new();
        let err = Introspection::default()
            .search_for_complex_methods("no/such/thing.sln", 10, &token)
            .unwrap_err();
        assert!(matches!(err, ScanError::Load(_)));
        assert!(!err.is_cancellation());
    }

    #[test]
    fn expired_token_is_reported_as_cancellation() {
        let token = CancellationToken::with_timeout(std::time::Duration::ZERO);
        let err = Introspection::default()
            .search_for_return_null_statements(".", &token)
            .unwrap_err();
        assert!(err.is_cancellation());
    }
}
