//! Error types for the scaffolding core
//!
//! `ScaffoldError` is what the copier, the mutator and the JSON patching
//! helpers return. Orchestration code wraps it with `anyhow` context, so the
//! typed error stays reachable through `downcast_ref`.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while rendering a single template text or path
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("option '{key}' is referenced but not provided")]
    MissingOption { key: String },

    #[error("block '{key}' is opened but never closed")]
    UnclosedBlock { key: String },

    #[error("block '{inner}' is nested inside block '{outer}'; only flat blocks are supported")]
    NestedBlock { outer: String, inner: String },

    #[error("closing marker for '{key}' has no matching opening marker")]
    UnexpectedClose { key: String },
}

#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error("template directory not found: {}", path.display())]
    MissingTemplateDir { path: PathBuf },

    #[error("template '{}' references option '{key}', which is not set", template.display())]
    MissingOption { key: String, template: PathBuf },

    #[error("template '{}' is invalid: {reason}", template.display())]
    InvalidTemplate { template: PathBuf, reason: String },

    #[error("{operation}: could not find {anchor} in {}", path.display())]
    AnchorNotFound {
        path: PathBuf,
        operation: &'static str,
        anchor: String,
    },

    #[error("I/O error on '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("`{program}` exited with {}", code.map(|c| format!("code {}", c)).unwrap_or_else(|| "a signal".to_string()))]
    ExternalTool { program: String, code: Option<i32> },

    #[error("failed to parse template manifest '{}'", path.display())]
    Manifest {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to process JSON file '{}'", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ScaffoldError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Attach the template path to a rendering failure
    pub fn from_render(template: impl Into<PathBuf>, error: RenderError) -> Self {
        let template = template.into();
        match error {
            RenderError::MissingOption { key } => Self::MissingOption { key, template },
            other => Self::InvalidTemplate {
                template,
                reason: other.to_string(),
            },
        }
    }
}
