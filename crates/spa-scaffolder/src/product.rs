//! Product configuration trait for CLI binaries
//!
//! The binary implements this trait to give the shared scaffolding logic its
//! identity, its template location and its post-setup instructions.

use crate::framework::Framework;
use std::path::{Path, PathBuf};

pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for the CLI command)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Environment variable that overrides the template directory
    fn template_dir_env(&self) -> &'static str;

    /// Candidate template directories tried after the flag and the environment
    /// variable, in order
    fn bundled_template_dirs(&self) -> Vec<PathBuf>;

    /// URL for the UI component documentation
    fn docs_url(&self) -> &'static str;

    /// Upgrade/install command shown in version warnings
    fn upgrade_command(&self) -> &'static str;

    /// Generate the "next steps" instructions after project creation
    fn next_steps(&self, dir: &Path, framework: Framework, installed: bool) -> Vec<String>;
}
