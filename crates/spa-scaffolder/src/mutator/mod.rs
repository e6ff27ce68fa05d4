//! Structural text edits on generated source files
//!
//! Edits locate their insertion point with the anchor rules in [`anchors`]
//! and never parse the file. Every edit is idempotent: applying the same
//! request twice leaves the file as the first application left it. A file is
//! only written when its text changes, and never when the anchor is missing.

pub mod anchors;
pub mod arrays;
pub mod exports;
pub mod imports;
pub mod scan;

use crate::error::ScaffoldError;
use std::fs;
use std::path::{Path, PathBuf};

pub use anchors::ArrayAnchor;
pub use arrays::{insert_array_element, ArrayInsert};
pub use exports::{insert_export, ExportSpec};
pub use imports::{insert_import, ImportSpec, ImportStyle};

/// One structural edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    Import(ImportSpec),
    Export(ExportSpec),
    ArrayElement { anchor: ArrayAnchor, fragment: String },
}

impl Edit {
    fn operation(&self) -> &'static str {
        match self {
            Edit::Import(_) => "insert import",
            Edit::Export(_) => "insert export",
            Edit::ArrayElement { .. } => "insert array element",
        }
    }
}

/// An edit aimed at a file, relative to the mutator's root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertionRequest {
    pub target: PathBuf,
    pub edit: Edit,
}

impl InsertionRequest {
    pub fn new(target: impl Into<PathBuf>, edit: Edit) -> Self {
        Self {
            target: target.into(),
            edit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Changed,
    Unchanged,
}

/// Applies insertion requests to files under a project directory
#[derive(Debug, Clone)]
pub struct SourceMutator {
    root: PathBuf,
}

impl SourceMutator {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn apply(&self, request: &InsertionRequest) -> Result<EditOutcome, ScaffoldError> {
        let path = self.root.join(&request.target);
        let text = fs::read_to_string(&path).map_err(|e| ScaffoldError::io(&path, e))?;

        match apply_to_text(&text, &request.edit) {
            Ok(Some(updated)) => {
                fs::write(&path, updated).map_err(|e| ScaffoldError::io(&path, e))?;
                log::info!("update {}", request.target.display());
                Ok(EditOutcome::Changed)
            }
            Ok(None) => {
                log::debug!(
                    "{}: {} already present",
                    request.target.display(),
                    request.edit.operation()
                );
                Ok(EditOutcome::Unchanged)
            }
            Err(anchor) => Err(ScaffoldError::AnchorNotFound {
                path,
                operation: request.edit.operation(),
                anchor: anchor.to_string(),
            }),
        }
    }

    /// Apply requests in order, stopping at the first failure
    pub fn apply_all(&self, requests: &[InsertionRequest]) -> Result<Vec<EditOutcome>, ScaffoldError> {
        requests.iter().map(|r| self.apply(r)).collect()
    }

    /// Delete a file when it exists; returns whether anything was removed
    pub fn remove_file(&self, relative: impl AsRef<Path>) -> Result<bool, ScaffoldError> {
        let relative = relative.as_ref();
        let path = self.root.join(relative);
        match fs::remove_file(&path) {
            Ok(()) => {
                log::info!("remove {}", relative.display());
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(ScaffoldError::io(path, e)),
        }
    }
}

/// Apply `edit` to `text`. `Ok(None)` means the edit is already present;
/// `Err` carries the anchor that could not be found.
pub fn apply_to_text(text: &str, edit: &Edit) -> Result<Option<String>, ArrayAnchor> {
    match edit {
        Edit::Import(spec) => Ok(insert_import(text, spec)),
        Edit::Export(spec) => Ok(insert_export(text, spec)),
        Edit::ArrayElement { anchor, fragment } => match insert_array_element(text, anchor, fragment) {
            ArrayInsert::Inserted(updated) => Ok(Some(updated)),
            ArrayInsert::Present => Ok(None),
            ArrayInsert::AnchorMissing => Err(anchor.clone()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn project(files: &[(&str, &str)]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for (path, content) in files {
            let full = dir.path().join(path);
            fs::create_dir_all(full.parent().unwrap()).unwrap();
            fs::write(full, content).unwrap();
        }
        dir
    }

    #[test]
    fn test_missing_anchor_leaves_file_untouched() {
        let original = "import { HomePage } from './pages';\n\nconst other = [\n  1\n];\n";
        let dir = project(&[("src/app-routes.js", original)]);
        let mutator = SourceMutator::new(dir.path());

        let err = mutator
            .apply(&InsertionRequest::new(
                "src/app-routes.js",
                Edit::ArrayElement {
                    anchor: ArrayAnchor::Binding("routeData".into()),
                    fragment: "\n  { path: '/x' }".into(),
                },
            ))
            .unwrap_err();

        match err {
            ScaffoldError::AnchorNotFound { path, operation, anchor } => {
                assert!(path.ends_with("src/app-routes.js"));
                assert_eq!(operation, "insert array element");
                assert!(anchor.contains("routeData"));
            }
            other => panic!("unexpected error: {other}"),
        }
        let after = fs::read(dir.path().join("src/app-routes.js")).unwrap();
        assert_eq!(after, original.as_bytes());
    }

    #[test]
    fn test_apply_reports_changed_then_unchanged() {
        let dir = project(&[("src/main.js", "import App from './App';\n")]);
        let mutator = SourceMutator::new(dir.path());
        let request = InsertionRequest::new("src/main.js", Edit::Import(ImportSpec::side_effect("./themes/generated/theme.base.css")));

        assert_eq!(mutator.apply(&request).unwrap(), EditOutcome::Changed);
        let once = fs::read_to_string(dir.path().join("src/main.js")).unwrap();
        assert_eq!(mutator.apply(&request).unwrap(), EditOutcome::Unchanged);
        let twice = fs::read_to_string(dir.path().join("src/main.js")).unwrap();

        assert_eq!(once, twice);
        assert_eq!(
            once,
            "import App from './App';\nimport './themes/generated/theme.base.css';\n"
        );
    }

    #[test]
    fn test_missing_target_is_io_error() {
        let dir = TempDir::new().unwrap();
        let mutator = SourceMutator::new(dir.path());
        let err = mutator
            .apply(&InsertionRequest::new("src/nope.js", Edit::Export(ExportSpec::new("A", "./a"))))
            .unwrap_err();
        assert!(matches!(err, ScaffoldError::Io { .. }));
    }

    #[test]
    fn test_apply_all_stops_at_first_failure() {
        let dir = project(&[("a.js", "export default [];\n"), ("b.js", "const x = 1;\n")]);
        let mutator = SourceMutator::new(dir.path());
        let requests = vec![
            InsertionRequest::new(
                "b.js",
                Edit::ArrayElement {
                    anchor: ArrayAnchor::Binding("routes".into()),
                    fragment: "1".into(),
                },
            ),
            InsertionRequest::new(
                "a.js",
                Edit::ArrayElement {
                    anchor: ArrayAnchor::DefaultExport,
                    fragment: "1".into(),
                },
            ),
        ];

        assert!(mutator.apply_all(&requests).is_err());
        assert_eq!(fs::read_to_string(dir.path().join("a.js")).unwrap(), "export default [];\n");
    }

    #[test]
    fn test_remove_file() {
        let dir = project(&[("src/types.jsx", "")]);
        let mutator = SourceMutator::new(dir.path());

        assert!(mutator.remove_file("src/types.jsx").unwrap());
        assert!(!dir.path().join("src/types.jsx").exists());
        assert!(!mutator.remove_file("src/types.jsx").unwrap());
    }
}
