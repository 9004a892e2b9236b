use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use regex::Regex;
use tracing::{debug, info, warn};

use crate::domain::language::Language;
use crate::domain::solution::{Document, Project, Solution};
use crate::ports::SyntaxParser;

/// Reads `.sln` and `.csproj` files into a [`Solution`] handle. Only file
/// lists are read here; documents are parsed on first use.
pub struct SolutionLoader {
    parser: Arc<dyn SyntaxParser>,
    project_line: Regex,
    compile_item: Regex,
}

impl SolutionLoader {
    pub fn new(parser: Arc<dyn SyntaxParser>) -> Result<Self> {
        Ok(SolutionLoader {
            parser,
            project_line: Regex::new(r#"(?m)^\s*Project\("[^"]*"\)\s*=\s*"([^"]*)"\s*,\s*"([^"]*)""#)?,
            compile_item: Regex::new(r#"<Compile\s+Include\s*=\s*"([^"]*)""#)?,
        })
    }

    /// Loads a `.sln`, a single project file, or a directory. A directory
    /// uses its first `.sln`, or is treated as one project when it has none.
    pub fn load(&self, path: &Path) -> Result<Solution> {
        if path.is_dir() {
            return match first_solution_file(path)? {
                Some(sln) => self.load_solution_file(&sln),
                None => {
                    let name = file_stem(path);
                    let project = Project {
                        documents: documents_under(path, path)?,
                        name,
                        path: path.to_path_buf(),
                    };
                    Ok(self.finish(path.to_path_buf(), vec![project]))
                }
            };
        }
        match path.extension().and_then(|e| e.to_str()) {
            Some("sln") => self.load_solution_file(path),
            Some(ext) if ext == Language::CSharp.project_extension() => {
                let root = parent_dir(path);
                let project = self.load_project(&file_stem(path), path, &root)?;
                Ok(self.finish(root, vec![project]))
            }
            _ => bail!("{} is not a solution, a C# project or a directory", path.display()),
        }
    }

    fn load_solution_file(&self, sln: &Path) -> Result<Solution> {
        let text = fs::read_to_string(sln)
            .with_context(|| format!("Failed to read solution {}", sln.display()))?;
        let root = parent_dir(sln);
        let mut projects = Vec::new();
        for captures in self.project_line.captures_iter(&text) {
            let name = &captures[1];
            let relative = captures[2].replace('\\', "/");
            // Solution folders and other project types.
            if !relative.ends_with(Language::CSharp.project_extension()) {
                continue;
            }
            let project_path = root.join(&relative);
            if !project_path.is_file() {
                warn!(project = name, path = %project_path.display(), "project file not found, skipping");
                continue;
            }
            projects.push(self.load_project(name, &project_path, &root)?);
        }
        Ok(self.finish(root, projects))
    }

    fn load_project(&self, name: &str, csproj: &Path, root: &Path) -> Result<Project> {
        let text = fs::read_to_string(csproj)
            .with_context(|| format!("Failed to read project {}", csproj.display()))?;
        let project_dir = parent_dir(csproj);
        let includes: Vec<String> = self
            .compile_item
            .captures_iter(&text)
            .map(|c| c[1].replace('\\', "/"))
            .collect();

        let documents = if includes.is_empty() {
            documents_under(&project_dir, root)?
        } else {
            let mut documents = Vec::new();
            for include in includes {
                let path = normalize(&project_dir.join(&include));
                if path.is_file() {
                    documents.push(document(path, root));
                } else {
                    warn!(project = name, item = %include, "compile item not found, skipping");
                }
            }
            documents
        };
        debug!(project = name, documents = documents.len(), "project loaded");
        Ok(Project { name: name.to_string(), path: csproj.to_path_buf(), documents })
    }

    fn finish(&self, root: PathBuf, projects: Vec<Project>) -> Solution {
        let solution = Solution::new(root, projects, Arc::clone(&self.parser));
        info!(
            root = %solution.root().display(),
            projects = solution.projects().len(),
            documents = solution.document_count(),
            "solution loaded"
        );
        solution
    }
}

fn first_solution_file(dir: &Path) -> Result<Option<PathBuf>> {
    let mut found = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("Failed to list {}", dir.display()))? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|e| e == "sln") {
            found.push(path);
        }
    }
    found.sort();
    Ok(found.into_iter().next())
}

/// Every `.cs` file below `dir`, skipping build output and hidden
/// directories, in path order.
fn documents_under(dir: &Path, root: &Path) -> Result<Vec<Document>> {
    let mut files = Vec::new();
    collect_cs_recursive(dir, &mut files)?;
    files.sort();
    Ok(files.into_iter().map(|path| document(path, root)).collect())
}

fn collect_cs_recursive(dir: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir).with_context(|| format!("Failed to list {}", dir.display()))? {
        let path = entry?.path();
        let hidden = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with('.'));
        if path.is_dir() {
            if hidden || path.ends_with("bin") || path.ends_with("obj") {
                continue;
            }
            collect_cs_recursive(&path, out)?;
        } else if Language::from_path(&path) == Some(Language::CSharp) {
            out.push(path);
        }
    }
    Ok(())
}

fn document(path: PathBuf, root: &Path) -> Document {
    let relative = path
        .strip_prefix(root)
        .unwrap_or(&path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    Document::new(path, relative)
}

/// Resolves `.` and `..` without touching the file system.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .or_else(|| path.file_name())
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::csharp::CSharpParser;
    use pretty_assertions::assert_eq;

    fn write(path: &Path, text: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, text).unwrap();
    }

    fn loader() -> SolutionLoader {
        SolutionLoader::new(Arc::new(CSharpParser::new())).unwrap()
    }

    fn relative_paths(solution: &Solution) -> Vec<&str> {
        solution.documents().map(|d| d.relative_path()).collect()
    }

    #[test]
    fn solution_lists_compile_items_and_sdk_projects() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(
            &root.join("All.sln"),
            "Microsoft Visual Studio Solution File, Format Version 12.00\n\
             Project(\"{FAE04EC0-301F-11D3-BF4B-00C04F79EFBC}\") = \"Legacy\", \"Legacy\\Legacy.csproj\", \"{1}\"\n\
             EndProject\n\
             Project(\"{9A19103F-16F7-4668-BE54-9A1E7A4F7556}\") = \"Sdk\", \"Sdk\\Sdk.csproj\", \"{2}\"\n\
             EndProject\n\
             Project(\"{2150E333-8FDC-42A3-9474-1A3956D46DE8}\") = \"Docs\", \"Docs\", \"{3}\"\n\
             EndProject\n",
        );
        write(
            &root.join("Legacy/Legacy.csproj"),
            r#"<Project><ItemGroup><Compile Include="Model\Customer.cs" /><Compile Include="Gone.cs" /></ItemGroup></Project>"#,
        );
        write(&root.join("Legacy/Model/Customer.cs"), "class Customer { }");
        write(&root.join("Legacy/Ignored.cs"), "class Ignored { }");
        write(&root.join("Sdk/Sdk.csproj"), r#"<Project Sdk="Microsoft.NET.Sdk"></Project>"#);
        write(&root.join("Sdk/B.cs"), "class B { }");
        write(&root.join("Sdk/A/A.cs"), "class A { }");
        write(&root.join("Sdk/obj/Generated.cs"), "class G { }");
        write(&root.join("Sdk/.hidden/H.cs"), "class H { }");

        let solution = loader().load(root).unwrap();
        let names: Vec<_> = solution.projects().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Legacy", "Sdk"]);
        assert_eq!(relative_paths(&solution), vec!["Legacy/Model/Customer.cs", "Sdk/A/A.cs", "Sdk/B.cs"]);
    }

    #[test]
    fn single_project_file() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir.path().join("One.csproj"), "<Project />");
        write(&dir.path().join("X.cs"), "class X { }");
        let solution = loader().load(&dir.path().join("One.csproj")).unwrap();
        assert_eq!(solution.projects()[0].name, "One");
        assert_eq!(relative_paths(&solution), vec!["X.cs"]);
    }

    #[test]
    fn rejects_other_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        write(&path, "hi");
        assert!(loader().load(&path).is_err());
    }

    #[test]
    fn normalize_collapses_parent_segments() {
        assert_eq!(normalize(Path::new("a/b/../c/./d.cs")), PathBuf::from("a/c/d.cs"));
    }
}
