//! Package manager detection and dependency install

use super::command::{run_command, DEFAULT_TIMEOUT};
use crate::framework::CommandLine;
use anyhow::Result;
use std::path::Path;

/// Lock files checked in order; the first one present picks the manager
const LOCK_FILES: &[(&str, PackageManager)] = &[
    ("bun.lockb", PackageManager::Bun),
    ("bun.lock", PackageManager::Bun),
    ("pnpm-lock.yaml", PackageManager::Pnpm),
    ("yarn.lock", PackageManager::Yarn),
    ("package-lock.json", PackageManager::Npm),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PackageManager {
    #[default]
    Npm,
    Yarn,
    Pnpm,
    Bun,
}

impl PackageManager {
    pub fn program(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Yarn => "yarn",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Bun => "bun",
        }
    }

    /// Detect from lock files in `project_dir`; npm when there are none
    pub fn detect(project_dir: &Path) -> Self {
        LOCK_FILES
            .iter()
            .find(|(file, _)| project_dir.join(file).is_file())
            .map(|(_, pm)| *pm)
            .unwrap_or_default()
    }

    pub fn install_command(&self) -> CommandLine {
        CommandLine {
            program: self.program(),
            args: vec!["install".to_string()],
        }
    }

    /// Command to start the dev server, for next-step hints
    pub fn run_script(&self, script: &str) -> String {
        match self {
            PackageManager::Npm => format!("npm run {}", script),
            other => format!("{} {}", other.program(), script),
        }
    }
}

/// Install dependencies with the project's package manager
pub async fn run_install(project_dir: &Path) -> Result<PackageManager> {
    let manager = PackageManager::detect(project_dir);
    log::info!("installing dependencies with {}", manager.program());
    run_command(&manager.install_command(), project_dir, DEFAULT_TIMEOUT).await?;
    Ok(manager)
}
