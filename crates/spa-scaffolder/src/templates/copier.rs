//! Template tree copying with variant-aware path resolution

use super::options::OptionSet;
use super::render::render;
use super::resolver::{Destination, PathResolver, Resolution};
use crate::error::ScaffoldError;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// What a copy pass did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyReport {
    /// Destination paths written, in visit order
    pub written: Vec<PathBuf>,
    /// Template-relative paths skipped for this variant
    pub skipped: Vec<PathBuf>,
    /// Destination paths written only to be removed by the caller
    pub pending_removal: Vec<PathBuf>,
}

/// Copy every file under `template_root` into `destination_root`
///
/// Files are visited in file-name order so two runs with the same inputs
/// produce the same output. Existing destination files are overwritten.
/// Nothing is ever deleted here; see [`CopyReport::pending_removal`].
pub fn copy_tree(
    template_root: &Path,
    destination_root: &Path,
    options: &OptionSet,
    resolver: &PathResolver,
) -> Result<CopyReport, ScaffoldError> {
    if !template_root.is_dir() {
        return Err(ScaffoldError::MissingTemplateDir {
            path: template_root.to_path_buf(),
        });
    }

    let mut report = CopyReport::default();

    for entry in WalkDir::new(template_root).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| template_root.to_path_buf());
            ScaffoldError::io(path, e.into())
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        let source = entry.path();
        let relative = relative_template_path(template_root, source);

        let resolution = resolver
            .resolve(&relative, options)
            .map_err(|e| ScaffoldError::from_render(source, e))?;

        match resolution {
            Resolution::Skip => {
                report.skipped.push(PathBuf::from(&relative));
            }
            Resolution::Emit(destination) => {
                let target = write_one(source, destination_root, &destination, options)?;
                report.written.push(target);
            }
            Resolution::EmitThenRemove(destination) => {
                let target = write_one(source, destination_root, &destination, options)?;
                report.written.push(target.clone());
                report.pending_removal.push(target);
            }
        }
    }

    Ok(report)
}

fn write_one(
    source: &Path,
    destination_root: &Path,
    destination: &Destination,
    options: &OptionSet,
) -> Result<PathBuf, ScaffoldError> {
    let target = destination_root.join(&destination.path);

    let content = if destination.render {
        let raw = fs::read_to_string(source).map_err(|e| ScaffoldError::io(source, e))?;
        render(&raw, options)
            .map_err(|e| ScaffoldError::from_render(source, e))?
            .into_bytes()
    } else {
        fs::read(source).map_err(|e| ScaffoldError::io(source, e))?
    };

    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|e| ScaffoldError::io(parent, e))?;
    }

    fs::write(&target, content).map_err(|e| ScaffoldError::io(&target, e))?;
    log::info!("create {}", target.display());

    Ok(target)
}

/// `/`-separated path of `file` relative to `root`
fn relative_template_path(root: &Path, file: &Path) -> String {
    file.strip_prefix(root)
        .unwrap_or(file)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::manifest::LanguageFiles;
    use crate::templates::options::keys;
    use crate::templates::resolver::{ExtensionPolicy, VariantFlags};
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn fixture() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(
            root,
            "src/App.tsx-template",
            "export const title = '<%=project%>';\nconst x<%=#isTypeScript%>: number<%=/isTypeScript%> = 1;\n",
        );
        write(root, "src/types.tsx", "export type Route = { path: string };\n");
        write(root, "src/literal.css", "a { color: <%=project%>; }\n");
        write(root, "tsconfig.app.json", "{}\n");
        dir
    }

    fn resolver(is_typescript: bool) -> PathResolver {
        PathResolver::new(
            VariantFlags { is_typescript },
            ExtensionPolicy::SwapTypeScript,
            LanguageFiles {
                typescript: vec!["tsconfig*".to_string()],
                javascript: vec![],
                typescript_auxiliary: vec!["types.tsx".to_string()],
            },
        )
    }

    fn options(is_typescript: bool) -> OptionSet {
        OptionSet::new()
            .with(keys::PROJECT, "My App")
            .with(keys::IS_TYPESCRIPT, is_typescript)
    }

    #[test]
    fn test_copy_javascript_variant() {
        let templates = fixture();
        let out = TempDir::new().unwrap();

        let report = copy_tree(templates.path(), out.path(), &options(false), &resolver(false)).unwrap();

        let app = fs::read_to_string(out.path().join("src/App.jsx")).unwrap();
        assert_eq!(app, "export const title = 'My App';\nconst x = 1;\n");
        assert!(!out.path().join("tsconfig.app.json").exists());
        assert_eq!(report.skipped, vec![PathBuf::from("tsconfig.app.json")]);
        assert_eq!(report.pending_removal, vec![out.path().join("src/types.jsx")]);
        assert!(out.path().join("src/types.jsx").exists());
    }

    #[test]
    fn test_copy_typescript_variant() {
        let templates = fixture();
        let out = TempDir::new().unwrap();

        let report = copy_tree(templates.path(), out.path(), &options(true), &resolver(true)).unwrap();

        let app = fs::read_to_string(out.path().join("src/App.tsx")).unwrap();
        assert!(app.contains("const x: number = 1;"));
        assert!(out.path().join("tsconfig.app.json").exists());
        assert!(report.pending_removal.is_empty());
    }

    #[test]
    fn test_literal_files_copied_verbatim() {
        let templates = fixture();
        let out = TempDir::new().unwrap();

        copy_tree(templates.path(), out.path(), &options(true), &resolver(true)).unwrap();

        let css = fs::read_to_string(out.path().join("src/literal.css")).unwrap();
        assert_eq!(css, "a { color: <%=project%>; }\n");
    }

    #[test]
    fn test_copy_is_deterministic() {
        let templates = fixture();
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();

        let a = copy_tree(templates.path(), first.path(), &options(false), &resolver(false)).unwrap();
        let b = copy_tree(templates.path(), second.path(), &options(false), &resolver(false)).unwrap();

        assert_eq!(a.written.len(), b.written.len());
        for (x, y) in a.written.iter().zip(&b.written) {
            assert_eq!(x.strip_prefix(first.path()).unwrap(), y.strip_prefix(second.path()).unwrap());
            assert_eq!(fs::read(x).unwrap(), fs::read(y).unwrap());
        }
    }

    #[test]
    fn test_overwrites_existing_files() {
        let templates = fixture();
        let out = TempDir::new().unwrap();
        write(out.path(), "src/App.jsx", "stale");

        copy_tree(templates.path(), out.path(), &options(false), &resolver(false)).unwrap();

        let app = fs::read_to_string(out.path().join("src/App.jsx")).unwrap();
        assert!(app.starts_with("export const title"));
    }

    #[test]
    fn test_missing_template_root() {
        let out = TempDir::new().unwrap();
        let err = copy_tree(
            &out.path().join("nope"),
            out.path(),
            &options(true),
            &resolver(true),
        )
        .unwrap_err();
        assert!(matches!(err, ScaffoldError::MissingTemplateDir { .. }));
    }

    #[test]
    fn test_missing_option_reports_template() {
        let templates = TempDir::new().unwrap();
        write(templates.path(), "page.tsx-template", "<%=component%>");
        let out = TempDir::new().unwrap();

        let err = copy_tree(templates.path(), out.path(), &OptionSet::new(), &resolver(true)).unwrap_err();
        match err {
            ScaffoldError::MissingOption { key, template } => {
                assert_eq!(key, "component");
                assert!(template.ends_with("page.tsx-template"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(!out.path().join("page.tsx").exists());
    }
}
