//! In-memory view of a loaded solution: projects, their documents, and the
//! syntax trees parsed from them on first use.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use tracing::debug;

use crate::domain::syntax::SyntaxTree;
use crate::ports::SyntaxParser;

/// One source file of a project.
pub struct Document {
    path: PathBuf,
    relative_path: String,
    tree: OnceCell<SyntaxTree>,
}

impl Document {
    pub fn new(path: PathBuf, relative_path: impl Into<String>) -> Self {
        Document { path, relative_path: relative_path.into(), tree: OnceCell::new() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path relative to the solution directory, with `/` separators.
    pub fn relative_path(&self) -> &str {
        &self.relative_path
    }

    fn is_parsed(&self) -> bool {
        self.tree.get().is_some()
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("path", &self.relative_path)
            .field("parsed", &self.is_parsed())
            .finish()
    }
}

#[derive(Debug)]
pub struct Project {
    pub name: String,
    pub path: PathBuf,
    pub documents: Vec<Document>,
}

/// Handle returned by the solution loader. Trees are parsed lazily and
/// shared read-only between scan workers; dropping the handle frees them.
pub struct Solution {
    root: PathBuf,
    projects: Vec<Project>,
    parser: Arc<dyn SyntaxParser>,
}

impl Solution {
    pub fn new(root: PathBuf, projects: Vec<Project>, parser: Arc<dyn SyntaxParser>) -> Self {
        Solution { root, projects, parser }
    }

    /// Directory that document paths are relative to.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn documents(&self) -> impl Iterator<Item = &Document> + '_ {
        self.projects.iter().flat_map(|p| p.documents.iter())
    }

    pub fn document_count(&self) -> usize {
        self.projects.iter().map(|p| p.documents.len()).sum()
    }

    /// The document's syntax tree, read and parsed on first request.
    pub fn syntax_tree<'d>(&self, document: &'d Document) -> Result<&'d SyntaxTree> {
        document.tree.get_or_try_init(|| {
            let text = fs::read_to_string(&document.path)
                .with_context(|| format!("Failed to read {}", document.path.display()))?;
            debug!(file = %document.relative_path, bytes = text.len(), "parsing document");
            Ok(self.parser.parse_compilation_unit(&text))
        })
    }
}

impl fmt::Debug for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Solution")
            .field("root", &self.root)
            .field("projects", &self.projects)
            .finish()
    }
}

impl Drop for Solution {
    fn drop(&mut self) {
        let parsed = self.documents().filter(|d| d.is_parsed()).count();
        debug!(
            root = %self.root.display(),
            documents = self.document_count(),
            parsed,
            "releasing solution"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::csharp::CSharpParser;
    use std::io::Write;

    #[test]
    fn trees_are_parsed_once_on_demand() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("A.cs");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "class A {{ }}").unwrap();

        let solution = Solution::new(
            dir.path().to_path_buf(),
            vec![Project {
                name: "P".into(),
                path: dir.path().join("P.csproj"),
                documents: vec![Document::new(path, "A.cs")],
            }],
            Arc::new(CSharpParser::new()),
        );
        let doc = solution.documents().next().unwrap();
        assert!(!doc.is_parsed());
        let first = solution.syntax_tree(doc).unwrap() as *const SyntaxTree;
        let second = solution.syntax_tree(doc).unwrap() as *const SyntaxTree;
        assert_eq!(first, second);
        assert!(doc.is_parsed());
    }

    #[test]
    fn unreadable_documents_name_the_file() {
        let solution = Solution::new(
            PathBuf::from("."),
            vec![Project {
                name: "P".into(),
                path: PathBuf::from("P.csproj"),
                documents: vec![Document::new(PathBuf::from("does/not/exist.cs"), "exist.cs")],
            }],
            Arc::new(CSharpParser::new()),
        );
        let doc = solution.documents().next().unwrap();
        let err = solution.syntax_tree(doc).unwrap_err();
        assert!(err.to_string().contains("does/not/exist.cs"));
    }
}
