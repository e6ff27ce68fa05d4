//! Adding pages to an existing project
//!
//! A page is a view component plus a route and a navigation entry. Adding one
//! copies the framework's `page` template into the pages directory and then
//! wires it up through the source mutator:
//!
//! 1. re-export from the pages barrel (frameworks that have one)
//! 2. import into the routing module
//! 3. route record appended to the route array
//! 4. navigation record appended to the navigation array
//!
//! Each step stops the sequence on failure; files already written stay.

use crate::framework::{Framework, FrameworkProfile};
use crate::mutator::{Edit, EditOutcome, ExportSpec, InsertionRequest, SourceMutator};
use crate::naming;
use crate::templates::options::keys;
use crate::templates::{copy_tree, OptionSet, PathResolver, TemplateKind, TemplateSource};
use anyhow::{Context, Result};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

pub const DEFAULT_ICON: &str = "folder";

static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("valid identifier pattern"));

/// A page name and the forms derived from it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageDescriptor {
    pub name: String,
    /// Component identifier, e.g. `NewPagePage`
    pub component: String,
    /// Route path segment, e.g. `new-page`
    pub route_path: String,
    /// File and directory name, e.g. `new-page`
    pub file_name: String,
    /// Navigation label, e.g. `New Page`
    pub title: String,
    pub icon: String,
}

impl PageDescriptor {
    pub fn new(name: &str, icon: Option<&str>, profile: &FrameworkProfile) -> Self {
        let dashed = naming::dasherize(name);
        Self {
            name: name.to_string(),
            component: profile.component_name(name),
            route_path: dashed.clone(),
            file_name: dashed,
            title: naming::humanize(name),
            icon: icon.unwrap_or(DEFAULT_ICON).to_string(),
        }
    }

    /// Options for the page template
    pub fn options(&self, is_typescript: bool) -> OptionSet {
        OptionSet::new()
            .with(keys::NAME, self.file_name.as_str())
            .with(keys::COMPONENT, self.component.as_str())
            .with(keys::TITLE, self.title.as_str())
            .with(keys::ICON, self.icon.as_str())
            .with(keys::IS_TYPESCRIPT, is_typescript)
    }

    /// Reject names whose derived file name is empty or whose component name
    /// is not a JavaScript identifier
    pub fn validate(&self) -> Result<()> {
        if self.file_name.is_empty() {
            anyhow::bail!(
                "page name '{}' has no letters or digits to build a file name from",
                self.name
            );
        }
        if !IDENTIFIER.is_match(&self.component) {
            anyhow::bail!(
                "page name '{}' gives component '{}', which is not a valid identifier; start the name with a letter",
                self.name,
                self.component
            );
        }
        Ok(())
    }
}

/// Files touched while adding a page
#[derive(Debug, Clone, Default)]
pub struct PageReport {
    pub created: Vec<PathBuf>,
    pub updated: Vec<PathBuf>,
}

pub fn add_page(
    project_dir: &Path,
    framework: Framework,
    name: &str,
    icon: Option<&str>,
    templates: &TemplateSource,
) -> Result<PageReport> {
    let name = name.trim();
    if name.is_empty() {
        anyhow::bail!("page name must not be empty");
    }

    let profile = framework.profile();
    let page = PageDescriptor::new(name, icon, profile);
    page.validate()?;
    let flags = profile.detect_variant(project_dir);
    log::debug!(
        "adding {} page '{}' (typescript: {})",
        framework,
        page.component,
        flags.is_typescript
    );

    let manifest = templates.manifest(profile.template_dir)?;
    let page_template = templates.tree(profile.template_dir, TemplateKind::Page)?;
    let resolver = PathResolver::new(flags, profile.extension_policy, manifest.language_files);

    let routing_file = resolver.resolve_source(profile.routing_file);
    let navigation_file = resolver.resolve_source(profile.navigation_file);
    let barrel = profile.barrel.map(|b| resolver.resolve_source(b));

    let mut report = PageReport::default();

    let pages_dir = project_dir.join(profile.pages_dir);
    fs::create_dir_all(&pages_dir)
        .with_context(|| format!("Failed to create directory: {}", pages_dir.display()))?;
    if let Some(barrel) = &barrel {
        let barrel_path = project_dir.join(barrel);
        if !barrel_path.exists() {
            fs::write(&barrel_path, "")
                .with_context(|| format!("Failed to create file: {}", barrel_path.display()))?;
            log::info!("create {}", barrel.display());
            report.created.push(barrel.clone());
        }
    }

    let copied = copy_tree(
        &page_template,
        &pages_dir,
        &page.options(flags.is_typescript),
        &resolver,
    )
    .with_context(|| format!("Failed to create page '{}'", page.name))?;
    report.created.extend(
        copied
            .written
            .iter()
            .map(|p| p.strip_prefix(project_dir).unwrap_or(p).to_path_buf()),
    );

    let mut requests = Vec::with_capacity(4);
    if let Some(barrel) = barrel {
        requests.push(InsertionRequest::new(
            barrel,
            Edit::Export(ExportSpec::new(
                page.component.as_str(),
                (profile.page_export_module)(&page),
            )),
        ));
    }
    requests.push(InsertionRequest::new(
        &routing_file,
        Edit::Import((profile.page_import)(&page)),
    ));
    requests.push(InsertionRequest::new(
        &routing_file,
        Edit::ArrayElement {
            anchor: profile.route_anchor.clone(),
            fragment: (profile.route_record)(&page),
        },
    ));
    requests.push(InsertionRequest::new(
        &navigation_file,
        Edit::ArrayElement {
            anchor: profile.navigation_anchor.clone(),
            fragment: (profile.navigation_record)(&page),
        },
    ));

    let mutator = SourceMutator::new(project_dir);
    for request in &requests {
        if mutator.apply(request)? == EditOutcome::Changed && !report.updated.contains(&request.target) {
            report.updated.push(request.target.clone());
        }
    }

    Ok(report)
}
