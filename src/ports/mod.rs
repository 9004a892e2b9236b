use std::io;

use crate::domain::syntax::SyntaxTree;

pub mod json_exporter;

/// Front end that turns C# text into syntax trees. Implementations are shared
/// across scan workers, hence `Send + Sync`.
pub trait SyntaxParser: Send + Sync {
    fn parse_compilation_unit(&self, text: &str) -> SyntaxTree;
    fn parse_expression(&self, text: &str) -> SyntaxTree;
    fn parse_statement(&self, text: &str) -> SyntaxTree;
}

/// Writes scan results somewhere. `None` means standard output.
pub trait ReportExporter {
    fn export<T: serde::Serialize + ?Sized>(&self, report: &T, path: Option<&str>) -> io::Result<()>;
}
