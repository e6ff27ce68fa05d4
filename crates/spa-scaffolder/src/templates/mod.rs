//! Template trees: discovery, resolution, rendering and copying
//!
//! This module provides:
//! - Template root discovery (flag, environment variable, bundled locations)
//! - Per-framework manifests with language-variant file patterns
//! - Path/extension resolution and text rendering
//! - Recursive tree copying

pub mod copier;
pub mod manifest;
pub mod options;
pub mod render;
pub mod resolver;
pub mod version;

use crate::error::ScaffoldError;
use crate::product::ProductConfig;
use std::path::{Path, PathBuf};

pub use copier::{copy_tree, CopyReport};
pub use manifest::{LanguageFiles, TemplateManifest};
pub use options::{OptionSet, OptionValue};
pub use render::render;
pub use resolver::{Destination, ExtensionPolicy, PathResolver, Resolution, VariantFlags};

/// The named subtrees of a framework's template root
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    /// Additions layered over the official generator's output
    Application,
    /// Starter pages
    SamplePages,
    /// A single new page
    Page,
}

impl TemplateKind {
    pub fn dir_name(&self) -> &'static str {
        match self {
            TemplateKind::Application => "application",
            TemplateKind::SamplePages => "sample-pages",
            TemplateKind::Page => "page",
        }
    }
}

/// Root directory holding one template tree per framework
#[derive(Debug, Clone)]
pub struct TemplateSource {
    root: PathBuf,
}

impl TemplateSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Find the template root: explicit path first, then the product's
    /// environment variable, then its bundled locations
    pub fn discover<C: ProductConfig>(
        config: &C,
        explicit: Option<&Path>,
    ) -> Result<Self, ScaffoldError> {
        if let Some(path) = explicit {
            return Self::existing(path.to_path_buf());
        }

        if let Ok(path) = std::env::var(config.template_dir_env()) {
            log::debug!("using templates from ${}", config.template_dir_env());
            return Self::existing(PathBuf::from(path));
        }

        let candidates = config.bundled_template_dirs();
        candidates
            .iter()
            .find(|p| p.is_dir())
            .map(|p| Self::new(p.clone()))
            .ok_or_else(|| ScaffoldError::MissingTemplateDir {
                path: candidates.first().cloned().unwrap_or_else(|| PathBuf::from("templates")),
            })
    }

    fn existing(path: PathBuf) -> Result<Self, ScaffoldError> {
        if path.is_dir() {
            Ok(Self::new(path))
        } else {
            Err(ScaffoldError::MissingTemplateDir { path })
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn framework_root(&self, framework_dir: &str) -> PathBuf {
        self.root.join(framework_dir)
    }

    /// Path of one subtree; missing subtrees are a configuration error
    pub fn tree(&self, framework_dir: &str, kind: TemplateKind) -> Result<PathBuf, ScaffoldError> {
        let path = self.framework_root(framework_dir).join(kind.dir_name());
        if path.is_dir() {
            Ok(path)
        } else {
            Err(ScaffoldError::MissingTemplateDir { path })
        }
    }

    pub fn manifest(&self, framework_dir: &str) -> Result<TemplateManifest, ScaffoldError> {
        TemplateManifest::load(&self.framework_root(framework_dir))
    }
}
