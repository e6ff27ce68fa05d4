//! Template manifest types and parsing

use crate::error::ScaffoldError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the manifest file at the root of each framework's template tree
pub const MANIFEST_FILE: &str = "template.yaml";

/// File patterns tied to the project's language variant
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LanguageFiles {
    /// Files only emitted for TypeScript projects
    #[serde(default)]
    pub typescript: Vec<String>,

    /// Files only emitted for JavaScript projects
    #[serde(default)]
    pub javascript: Vec<String>,

    /// TypeScript-only auxiliaries (type declarations and the like). They are
    /// still copied for JavaScript projects, then removed once the copy is done.
    #[serde(default)]
    pub typescript_auxiliary: Vec<String>,
}

impl LanguageFiles {
    /// Check if a filename matches any pattern in a list
    fn matches_any(filename: &str, patterns: &[String]) -> bool {
        patterns.iter().any(|pattern| {
            if let Some(suffix) = pattern.strip_prefix('*') {
                // Suffix match: *.d.ts matches env.d.ts
                filename.ends_with(suffix)
            } else if let Some(prefix) = pattern.strip_suffix('*') {
                // Prefix match: tsconfig* matches tsconfig.app.json
                filename.starts_with(prefix)
            } else {
                filename == pattern
            }
        })
    }

    /// Classify a template-relative path by its file name
    pub fn classify(&self, file_path: &str) -> FileLanguage {
        let filename = file_path.rsplit('/').next().unwrap_or(file_path);

        if Self::matches_any(filename, &self.typescript_auxiliary) {
            FileLanguage::TypeScriptAuxiliary
        } else if Self::matches_any(filename, &self.typescript) {
            FileLanguage::TypeScript
        } else if Self::matches_any(filename, &self.javascript) {
            FileLanguage::JavaScript
        } else {
            FileLanguage::Common
        }
    }
}

/// Which language variant a template file belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileLanguage {
    Common, // Always emitted
    TypeScript,
    JavaScript,
    TypeScriptAuxiliary,
}

/// Per-framework manifest (templates/<framework>/template.yaml)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateManifest {
    /// Display name of the template set
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Semver version for CLI compatibility checking
    pub version: String,

    #[serde(default)]
    pub language_files: LanguageFiles,
}

impl TemplateManifest {
    /// Load the manifest from a framework template root. A missing manifest
    /// yields an empty one so hand-made template trees still work.
    pub fn load(framework_root: &Path) -> Result<Self, ScaffoldError> {
        let path = framework_root.join(MANIFEST_FILE);
        if !path.exists() {
            log::debug!("no {} in {}", MANIFEST_FILE, framework_root.display());
            return Ok(Self::unversioned(framework_root));
        }

        let content =
            std::fs::read_to_string(&path).map_err(|e| ScaffoldError::io(&path, e))?;
        serde_yaml::from_str(&content).map_err(|source| ScaffoldError::Manifest { path, source })
    }

    fn unversioned(framework_root: &Path) -> Self {
        Self {
            name: framework_root
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            description: String::new(),
            version: "0.0.0".to_string(),
            language_files: LanguageFiles::default(),
        }
    }
}
