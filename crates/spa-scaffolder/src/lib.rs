//! spa-scaffolder - Shared library for single-page-application scaffolding CLIs
//!
//! Creates React and Vue applications by running each framework's own
//! generator and layering bundled templates on top, and adds pages (view,
//! route and navigation entry) to applications created this way.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - template resolution, rendering and copying
//!   ([`templates`]), structural source edits ([`mutator`]), JSON patching
//!   ([`package_json`]) and the Node.js toolchain ([`runtime`])
//! - **Layer 2: Workflow Orchestration** - [`app::create_app`] and
//!   [`pages::add_page`], driven by the per-framework table in [`framework`]
//!   and the [`ProductConfig`] trait
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use spa_scaffolder::{pages, Framework, TemplateSource};
//!
//! let templates = TemplateSource::new("templates");
//! pages::add_page(Path::new("."), Framework::React, "new page", None, &templates)?;
//! ```

pub mod app;
pub mod error;
pub mod framework;
pub mod mutator;
pub mod naming;
pub mod package_json;
pub mod pages;
pub mod product;
pub mod runtime;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use app::{create_app, AppOptions};
pub use error::{RenderError, ScaffoldError};
pub use framework::{Framework, FrameworkProfile, Transpiler};
pub use mutator::{Edit, InsertionRequest, SourceMutator};
pub use pages::{add_page, PageDescriptor};
pub use product::ProductConfig;
pub use templates::{copy_tree, OptionSet, PathResolver, TemplateSource};

#[cfg(feature = "tui")]
pub use tui::{run_add_view, run_create};

/// Version of this library, compared against template manifests
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");
