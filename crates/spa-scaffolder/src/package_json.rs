//! package.json and manifest.json patching
//!
//! Files are rewritten with key order preserved, two-space indentation and a
//! trailing newline, which is what npm itself produces.

use crate::error::ScaffoldError;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

pub const PACKAGE_JSON: &str = "package.json";

/// A package to add to `dependencies` or `devDependencies`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dependency<'a> {
    pub name: &'a str,
    pub version: &'a str,
    pub dev: bool,
}

impl<'a> Dependency<'a> {
    pub const fn new(name: &'a str, version: &'a str) -> Self {
        Self {
            name,
            version,
            dev: false,
        }
    }

    pub const fn dev(name: &'a str, version: &'a str) -> Self {
        Self {
            name,
            version,
            dev: true,
        }
    }
}

/// Read a JSON object file, apply `f`, write it back
pub fn modify_json<F>(path: &Path, f: F) -> Result<(), ScaffoldError>
where
    F: FnOnce(&mut Map<String, Value>),
{
    let raw = fs::read_to_string(path).map_err(|e| ScaffoldError::io(path, e))?;
    let mut value: Value = serde_json::from_str(&raw).map_err(|source| ScaffoldError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let Some(object) = value.as_object_mut() else {
        return Err(ScaffoldError::InvalidTemplate {
            template: path.to_path_buf(),
            reason: "expected a JSON object at the top level".to_string(),
        });
    };
    f(object);

    let mut out = serde_json::to_string_pretty(&value).map_err(|source| ScaffoldError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    out.push('\n');
    fs::write(path, out).map_err(|e| ScaffoldError::io(path, e))?;
    log::info!("update {}", path.display());
    Ok(())
}

/// Add or update dependencies; each section stays sorted by package name
pub fn add_dependencies(project_dir: &Path, dependencies: &[Dependency<'_>]) -> Result<(), ScaffoldError> {
    modify_json(&project_dir.join(PACKAGE_JSON), |package| {
        for dep in dependencies {
            let section = if dep.dev { "devDependencies" } else { "dependencies" };
            let entry = package
                .entry(section)
                .or_insert_with(|| Value::Object(Map::new()));
            if let Value::Object(map) = entry {
                map.insert(dep.name.to_string(), Value::String(dep.version.to_string()));
            }
        }
        for section in ["dependencies", "devDependencies"] {
            if let Some(Value::Object(map)) = package.get_mut(section) {
                sort_keys(map);
            }
        }
    })
}

/// Add or overwrite npm scripts
pub fn update_scripts(project_dir: &Path, scripts: &[(&str, &str)]) -> Result<(), ScaffoldError> {
    modify_json(&project_dir.join(PACKAGE_JSON), |package| {
        let entry = package
            .entry("scripts")
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(map) = entry {
            for (name, command) in scripts {
                map.insert(name.to_string(), Value::String(command.to_string()));
            }
        }
    })
}

/// Set the top-level `name` of any JSON file (package.json, manifest.json)
pub fn update_name(path: &Path, name: &str) -> Result<(), ScaffoldError> {
    modify_json(path, |object| {
        object.insert("name".to_string(), Value::String(name.to_string()));
    })
}

fn sort_keys(map: &mut Map<String, Value>) {
    let mut entries: Vec<(String, Value)> = std::mem::take(map).into_iter().collect();
    entries.sort_by(|a, b| a.0.cmp(&b.0));
    map.extend(entries);
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const VITE_PACKAGE: &str = r#"{
  "name": "my-app",
  "private": true,
  "version": "0.0.0",
  "type": "module",
  "scripts": {
    "dev": "vite",
    "build": "vite build"
  },
  "dependencies": {
    "react": "^19.1.0",
    "react-dom": "^19.1.0"
  },
  "devDependencies": {
    "vite": "^7.0.0"
  }
}
"#;

    fn project() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(PACKAGE_JSON), VITE_PACKAGE).unwrap();
        dir
    }

    fn read(dir: &TempDir) -> Value {
        serde_json::from_str(&fs::read_to_string(dir.path().join(PACKAGE_JSON)).unwrap()).unwrap()
    }

    #[test]
    fn test_add_dependencies() {
        let dir = project();
        add_dependencies(
            dir.path(),
            &[
                Dependency::new("sass-embedded", "^1.85.1"),
                Dependency::new("react", "next"),
                Dependency::dev("devextreme-cli", "^1.11.0"),
            ],
        )
        .unwrap();

        let package = read(&dir);
        assert_eq!(package["dependencies"]["react"], "next");
        assert_eq!(package["dependencies"]["sass-embedded"], "^1.85.1");
        assert_eq!(package["devDependencies"]["devextreme-cli"], "^1.11.0");

        let names: Vec<&String> = package["dependencies"].as_object().unwrap().keys().collect();
        assert_eq!(names, vec!["react", "react-dom", "sass-embedded"]);
    }

    #[test]
    fn test_top_level_order_and_format_preserved() {
        let dir = project();
        update_scripts(dir.path(), &[("build-themes", "devextreme build")]).unwrap();

        let raw = fs::read_to_string(dir.path().join(PACKAGE_JSON)).unwrap();
        assert!(raw.starts_with("{\n  \"name\": \"my-app\",\n  \"private\": true,"));
        assert!(raw.ends_with("}\n"));
        assert!(raw.contains("\"build\": \"vite build\",\n    \"build-themes\": \"devextreme build\""));
    }

    #[test]
    fn test_update_name() {
        let dir = project();
        update_name(&dir.path().join(PACKAGE_JSON), "renamed").unwrap();
        assert_eq!(read(&dir)["name"], "renamed");
    }

    #[test]
    fn test_missing_file_reports_path() {
        let dir = TempDir::new().unwrap();
        let err = add_dependencies(dir.path(), &[Dependency::new("a", "1")]).unwrap_err();
        match err {
            ScaffoldError::Io { path, .. } => assert!(path.ends_with(PACKAGE_JSON)),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_json() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(PACKAGE_JSON), "{ nope").unwrap();
        let err = update_scripts(dir.path(), &[]).unwrap_err();
        assert!(matches!(err, ScaffoldError::Json { .. }));
    }
}
