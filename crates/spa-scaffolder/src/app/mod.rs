//! Application creation
//!
//! The framework's own generator produces the project; the bundled templates
//! are then layered on top and the generated sources are patched to pull in
//! the layout, the themes and the UI component packages.

pub mod html;

use crate::framework::{
    Framework, FrameworkProfile, GeneratorRequest, Transpiler, APP_SCRIPTS, APP_STYLES,
    DEVEXTREME_VERSION,
};
use crate::mutator::{Edit, ImportSpec, InsertionRequest, SourceMutator};
use crate::naming;
use crate::package_json::{self, Dependency, PACKAGE_JSON};
use crate::runtime::{self, command::DEFAULT_TIMEOUT, PackageManager};
use crate::templates::options::keys;
use crate::templates::{copy_tree, OptionSet, PathResolver, TemplateKind, TemplateSource, VariantFlags};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Known layouts; the first is the default
pub const LAYOUTS: &[&str] = &["side-nav-outer-toolbar", "side-nav-inner-toolbar"];

#[derive(Debug, Clone)]
pub struct AppOptions {
    pub framework: Framework,
    pub app_name: String,
    pub layout: String,
    pub is_typescript: bool,
    pub transpiler: Transpiler,
    pub deps_version_tag: Option<String>,
    pub empty: bool,
    pub skip_install: bool,
}

impl AppOptions {
    pub fn new(framework: Framework, app_name: impl Into<String>) -> Self {
        Self {
            framework,
            app_name: app_name.into(),
            layout: LAYOUTS[0].to_string(),
            is_typescript: framework.profile().supports_typescript(),
            transpiler: Transpiler::default(),
            deps_version_tag: None,
            empty: false,
            skip_install: false,
        }
    }

    pub fn profile(&self) -> &'static FrameworkProfile {
        self.framework.profile()
    }

    /// TypeScript only where the framework's templates support it
    pub fn typescript(&self) -> bool {
        self.is_typescript && self.profile().supports_typescript()
    }

    pub fn validate(&self) -> Result<()> {
        let name = self.app_name.as_str();
        if name.is_empty() || name.contains(['/', '\\']) || name.starts_with('.') {
            anyhow::bail!("'{}' is not a valid application name", name);
        }
        if !LAYOUTS.contains(&self.layout.as_str()) {
            anyhow::bail!(
                "unknown layout '{}' (expected one of: {})",
                self.layout,
                LAYOUTS.join(", ")
            );
        }
        if self.is_typescript && !self.typescript() {
            log::warn!(
                "{} templates are JavaScript only; ignoring the TypeScript choice",
                self.framework
            );
        }
        Ok(())
    }

    /// Options every application template is rendered with
    pub fn template_options(&self) -> OptionSet {
        OptionSet::new()
            .with(keys::PROJECT, naming::humanize(&self.app_name))
            .with(keys::LAYOUT, (self.profile().layout_option)(&self.layout))
            .with(keys::IS_TYPESCRIPT, self.typescript())
            .with(keys::EMPTY, self.empty)
    }

    fn flags(&self) -> VariantFlags {
        VariantFlags {
            is_typescript: self.typescript(),
        }
    }
}

/// What creating an application produced
#[derive(Debug, Clone)]
pub struct AppReport {
    pub project_dir: PathBuf,
    pub files_written: usize,
    pub removed: Vec<PathBuf>,
    /// Set when dependencies were installed
    pub package_manager: Option<PackageManager>,
}

/// Generate a new application named `options.app_name` under `parent_dir`
pub async fn create_app(parent_dir: &Path, options: &AppOptions, templates: &TemplateSource) -> Result<AppReport> {
    options.validate()?;
    let profile = options.profile();
    let project_dir = parent_dir.join(&options.app_name);
    if project_dir.exists() {
        anyhow::bail!("directory '{}' already exists", project_dir.display());
    }

    // Fail on a broken template root before anything is generated
    templates.tree(profile.template_dir, TemplateKind::Application)?;

    for info in runtime::check_runtimes()? {
        log::info!("{} {}", info.name, info.version.as_deref().unwrap_or("unknown"));
    }

    let generator = (profile.generator)(&GeneratorRequest {
        app_name: &options.app_name,
        is_typescript: options.typescript(),
        transpiler: options.transpiler,
        deps_version_tag: options.deps_version_tag.as_deref(),
    });
    runtime::run_command(&generator, parent_dir, DEFAULT_TIMEOUT)
        .await
        .with_context(|| format!("{} project generator failed", options.framework))?;
    if !project_dir.is_dir() {
        anyhow::bail!(
            "the generator finished but '{}' was not created",
            project_dir.display()
        );
    }

    html::patch_index_html(&project_dir, &naming::humanize(&options.app_name))?;

    let (files_written, removed) = apply_templates(&project_dir, options, templates)?;
    configure_package(&project_dir, options)?;

    let package_manager = if options.skip_install {
        None
    } else {
        Some(runtime::run_install(&project_dir).await?)
    };

    Ok(AppReport {
        project_dir,
        files_written,
        removed,
        package_manager,
    })
}

/// Layer the `application` and `sample-pages` templates over a generated
/// project and import the theme stylesheets into the main module.
///
/// Returns the number of files written and the files removed again.
pub fn apply_templates(
    project_dir: &Path,
    options: &AppOptions,
    templates: &TemplateSource,
) -> Result<(usize, Vec<PathBuf>)> {
    let profile = options.profile();
    let manifest = templates.manifest(profile.template_dir)?;
    let resolver = PathResolver::new(options.flags(), profile.extension_policy, manifest.language_files);
    let template_options = options.template_options();
    let mutator = SourceMutator::new(project_dir);

    let application = templates.tree(profile.template_dir, TemplateKind::Application)?;
    let report = copy_tree(&application, project_dir, &template_options, &resolver)
        .context("Failed to copy application templates")?;
    let mut written = report.written.len();

    let mut removed = Vec::new();
    for path in &report.pending_removal {
        let relative = path.strip_prefix(project_dir).unwrap_or(path);
        if mutator.remove_file(relative)? {
            removed.push(relative.to_path_buf());
        }
    }

    if !options.empty {
        let samples = templates.tree(profile.template_dir, TemplateKind::SamplePages)?;
        let pages_dir = project_dir.join(profile.pages_dir);
        let report = copy_tree(&samples, &pages_dir, &template_options, &resolver)
            .context("Failed to copy sample pages")?;
        written += report.written.len();
    }

    let main_module = resolver.resolve_source(profile.main_module);
    let requests: Vec<InsertionRequest> = APP_STYLES
        .iter()
        .map(|style| InsertionRequest::new(&main_module, Edit::Import(ImportSpec::side_effect(*style))))
        .collect();
    mutator.apply_all(&requests)?;

    Ok((written, removed))
}

/// Dependencies, scripts and names in package.json (and the web manifest)
pub fn configure_package(project_dir: &Path, options: &AppOptions) -> Result<()> {
    let profile = options.profile();

    if let Some(tag) = options.deps_version_tag.as_deref() {
        let mut pinned: Vec<Dependency<'_>> = profile
            .tagged_packages
            .iter()
            .map(|name| Dependency::new(name, tag))
            .collect();
        if options.typescript() {
            pinned.extend(profile.tagged_type_packages.iter().map(|name| Dependency::dev(name, tag)));
        }
        package_json::add_dependencies(project_dir, &pinned)?;
    }

    package_json::add_dependencies(project_dir, profile.template_dependencies)?;
    package_json::update_scripts(project_dir, APP_SCRIPTS)?;
    package_json::update_name(&project_dir.join(PACKAGE_JSON), &options.app_name)?;

    if let Some(manifest) = profile.web_manifest {
        let path = project_dir.join(manifest);
        if path.is_file() {
            package_json::update_name(&path, &options.app_name)?;
        } else {
            log::debug!("no {} to rename", manifest);
        }
    }

    let ui: Vec<Dependency<'_>> = profile
        .ui_packages
        .iter()
        .map(|name| Dependency::new(name, DEVEXTREME_VERSION))
        .collect();
    package_json::add_dependencies(project_dir, &ui)?;

    Ok(())
}
