//! Charm-style CLI prompts using cliclack

use crate::app::{self, AppOptions, LAYOUTS};
use crate::framework::{Framework, Transpiler};
use crate::pages;
use crate::product::ProductConfig;
use crate::templates::version::check_compatibility;
use crate::templates::TemplateSource;
use anyhow::Result;
use std::path::{Path, PathBuf};

/// CLI arguments for the create command
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    pub framework: Option<String>,
    pub app_name: Option<String>,
    pub layout: Option<String>,
    /// `typescript` or `javascript`
    pub template: Option<String>,
    /// `babel` or `swc`
    pub transpiler: Option<String>,
    pub deps_version_tag: Option<String>,
    pub empty: bool,
    pub template_dir: Option<PathBuf>,
    pub skip_install: bool,
    /// Accept defaults for everything not given on the command line
    pub yes: bool,
}

/// CLI arguments for `add view`
#[derive(Debug, Clone, Default)]
pub struct AddViewArgs {
    pub name: String,
    pub icon: Option<String>,
    pub template_dir: Option<PathBuf>,
}

/// Create an application, prompting for anything not given
pub async fn run_create<C: ProductConfig>(config: &C, args: CreateArgs) -> Result<()> {
    cliclack::intro(config.display_name())?;

    let templates = locate_templates(config, args.template_dir.as_deref())?;
    let framework = select_framework(&args)?;
    let app_name = select_app_name(&args)?;

    let mut options = AppOptions::new(framework, app_name);
    options.layout = select_layout(&args)?;
    if framework.profile().supports_typescript() {
        options.is_typescript = select_template_type(&args)?;
        options.transpiler = select_transpiler(&args)?;
    } else if args.template.as_deref().is_some_and(|t| parse_is_typescript(t) == Some(true)) {
        cliclack::log::warning(format!("{} templates are JavaScript only", framework))?;
    }
    options.deps_version_tag = args.deps_version_tag.clone();
    options.empty = args.empty;
    options.skip_install = args.skip_install;
    options.validate()?;

    let manifest = templates.manifest(framework.profile().template_dir)?;
    if let Some(warning) = check_compatibility(crate::CLI_VERSION, &manifest.name, &manifest.version) {
        cliclack::log::warning(format!("{}\nUpgrade with: {}", warning, config.upgrade_command()))?;
    }

    let parent = std::env::current_dir()?;
    cliclack::log::step(format!("Generating a {} project with the official tooling", framework))?;
    let report = app::create_app(&parent, &options, &templates).await?;

    cliclack::log::success(format!(
        "Created {} in {} ({} template files)",
        options.app_name,
        report.project_dir.display(),
        report.files_written
    ))?;

    print_next_steps(
        config,
        &report.project_dir,
        framework,
        report.package_manager.is_some(),
    )?;
    Ok(())
}

/// Add a page to the project in the current directory
pub fn run_add_view<C: ProductConfig>(config: &C, args: AddViewArgs) -> Result<()> {
    let project_dir = std::env::current_dir()?;
    let Some(framework) = Framework::detect(&project_dir) else {
        anyhow::bail!(
            "{} does not look like a React or Vue project (no framework in package.json).\n\
             Create one with `{} create`.",
            project_dir.display(),
            config.name()
        );
    };

    let templates = TemplateSource::discover(config, args.template_dir.as_deref())?;
    let report = pages::add_page(
        &project_dir,
        framework,
        &args.name,
        args.icon.as_deref(),
        &templates,
    )?;

    for path in &report.created {
        cliclack::log::success(format!("created {}", path.display()))?;
    }
    for path in &report.updated {
        cliclack::log::info(format!("updated {}", path.display()))?;
    }
    if report.updated.is_empty() {
        cliclack::log::info(format!("'{}' was already wired into the app", args.name))?;
    }
    Ok(())
}

fn locate_templates<C: ProductConfig>(config: &C, explicit: Option<&Path>) -> Result<TemplateSource> {
    let templates = TemplateSource::discover(config, explicit)?;
    cliclack::log::info(format!("Using templates from {}", templates.root().display()))?;
    Ok(templates)
}

fn select_framework(args: &CreateArgs) -> Result<Framework> {
    if let Some(name) = &args.framework {
        return Framework::from_name(name).ok_or_else(|| {
            let known: Vec<&str> = Framework::ALL.iter().map(|f| f.display_name()).collect();
            anyhow::anyhow!("Unknown framework '{}'. Available: {}", name, known.join(", "))
        });
    }
    if args.yes {
        return Ok(Framework::React);
    }

    let mut select = cliclack::select("Select a framework");
    for framework in Framework::ALL {
        select = select.item(*framework, framework.display_name(), "");
    }
    Ok(select.interact()?)
}

fn select_app_name(args: &CreateArgs) -> Result<String> {
    if let Some(name) = &args.app_name {
        return Ok(name.clone());
    }
    if args.yes {
        return Ok("my-app".to_string());
    }

    let name: String = cliclack::input("Application name")
        .placeholder("my-app")
        .default_input("my-app")
        .validate(|input: &String| {
            if input.contains(['/', '\\']) {
                Err("Use a plain directory name")
            } else {
                Ok(())
            }
        })
        .interact()?;
    Ok(name)
}

fn select_layout(args: &CreateArgs) -> Result<String> {
    if let Some(layout) = &args.layout {
        return Ok(layout.clone());
    }
    if args.yes {
        return Ok(LAYOUTS[0].to_string());
    }

    let layout: &str = cliclack::select("Select a layout")
        .item(LAYOUTS[0], "Side navigation (outer toolbar)", "")
        .item(LAYOUTS[1], "Side navigation (inner toolbar)", "")
        .interact()?;
    Ok(layout.to_string())
}

fn parse_is_typescript(template: &str) -> Option<bool> {
    match template.to_lowercase().as_str() {
        "typescript" | "ts" => Some(true),
        "javascript" | "js" => Some(false),
        _ => None,
    }
}

fn select_template_type(args: &CreateArgs) -> Result<bool> {
    if let Some(template) = &args.template {
        return parse_is_typescript(template).ok_or_else(|| {
            anyhow::anyhow!("Unknown template type '{}' (use typescript or javascript)", template)
        });
    }
    if args.yes {
        return Ok(true);
    }

    let is_typescript: bool = cliclack::select("Select a template type")
        .item(true, "TypeScript", "")
        .item(false, "JavaScript", "")
        .interact()?;
    Ok(is_typescript)
}

fn select_transpiler(args: &CreateArgs) -> Result<Transpiler> {
    if let Some(name) = &args.transpiler {
        return Transpiler::from_name(name)
            .ok_or_else(|| anyhow::anyhow!("Unknown transpiler '{}' (use babel or swc)", name));
    }
    if args.yes {
        return Ok(Transpiler::default());
    }

    let transpiler: Transpiler = cliclack::select("Select a transpiler")
        .item(Transpiler::Babel, "Babel", "")
        .item(Transpiler::Swc, "SWC", "faster builds")
        .interact()?;
    Ok(transpiler)
}

fn print_next_steps<C: ProductConfig>(
    config: &C,
    project_dir: &Path,
    framework: Framework,
    installed: bool,
) -> Result<()> {
    let steps = config.next_steps(project_dir, framework, installed);

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    println!();
    println!("  UI components: {}", config.docs_url());

    cliclack::outro("Happy coding!")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_typescript() {
        assert_eq!(parse_is_typescript("TypeScript"), Some(true));
        assert_eq!(parse_is_typescript("js"), Some(false));
        assert_eq!(parse_is_typescript("coffee"), None);
    }

    #[test]
    fn test_yes_uses_defaults() {
        let args = CreateArgs {
            yes: true,
            ..Default::default()
        };
        assert_eq!(select_framework(&args).unwrap(), Framework::React);
        assert_eq!(select_app_name(&args).unwrap(), "my-app");
        assert_eq!(select_layout(&args).unwrap(), LAYOUTS[0]);
        assert!(select_template_type(&args).unwrap());
        assert_eq!(select_transpiler(&args).unwrap(), Transpiler::Babel);
    }

    #[test]
    fn test_explicit_values_win() {
        let args = CreateArgs {
            framework: Some("vue".to_string()),
            template: Some("javascript".to_string()),
            transpiler: Some("swc".to_string()),
            ..Default::default()
        };
        assert_eq!(select_framework(&args).unwrap(), Framework::Vue);
        assert!(!select_template_type(&args).unwrap());
        assert_eq!(select_transpiler(&args).unwrap(), Transpiler::Swc);

        let bad = CreateArgs {
            framework: Some("svelte".to_string()),
            ..Default::default()
        };
        assert!(select_framework(&bad).is_err());
    }
}
