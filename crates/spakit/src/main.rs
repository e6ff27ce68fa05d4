//! spakit CLI - Project scaffolding for React and Vue applications

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use spa_scaffolder::runtime::PackageManager;
use spa_scaffolder::tui::{AddViewArgs, CreateArgs};
use spa_scaffolder::{Framework, ProductConfig};
use std::io::Write;
use std::path::{Path, PathBuf};

/// spakit product configuration
#[derive(Clone)]
pub struct SpakitConfig;

impl ProductConfig for SpakitConfig {
    fn name(&self) -> &'static str {
        "spakit"
    }

    fn display_name(&self) -> &'static str {
        "spakit"
    }

    fn template_dir_env(&self) -> &'static str {
        "SPAKIT_TEMPLATE_DIR"
    }

    fn bundled_template_dirs(&self) -> Vec<PathBuf> {
        let mut dirs = Vec::new();
        if let Some(exe_dir) = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
        {
            dirs.push(exe_dir.join("templates"));
            dirs.push(exe_dir.join("../share/spakit/templates"));
        }
        // Development builds run from the workspace
        dirs.push(Path::new(env!("CARGO_MANIFEST_DIR")).join("../../templates"));
        dirs
    }

    fn docs_url(&self) -> &'static str {
        "https://js.devexpress.com/Documentation/"
    }

    fn upgrade_command(&self) -> &'static str {
        "cargo install spakit --force"
    }

    fn next_steps(&self, dir: &Path, _framework: Framework, installed: bool) -> Vec<String> {
        let mut steps = Vec::new();
        let current = std::env::current_dir().ok();

        // Step 1: cd to directory if not current
        if current.as_ref() != Some(&dir.to_path_buf()) {
            steps.push(format!("cd {}", dir.display()));
        }

        // Step 2: Install dependencies when --skip-install was used
        let manager = PackageManager::detect(dir);
        if !installed {
            steps.push(format!("{} install", manager.program()));
        }

        // Step 3: Start dev server
        steps.push(manager.run_script("dev"));

        // Step 4: Grow the app
        steps.push("spakit add view <name>".to_string());

        steps
    }
}

#[derive(Parser, Debug)]
#[command(name = "spakit")]
#[command(about = "CLI for scaffolding React and Vue applications and adding pages to them")]
#[command(version)]
pub struct Args {
    /// Show debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new application
    Create(CliCreateArgs),
    /// Add a building block to the application in the current directory
    Add {
        #[command(subcommand)]
        item: AddCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum AddCommand {
    /// Add a page with its route and navigation entry
    View(CliAddViewArgs),
}

#[derive(Parser, Debug)]
pub struct CliCreateArgs {
    /// Framework (react, vue)
    pub framework: Option<String>,

    /// Application name; also the directory created
    pub app_name: Option<String>,

    /// Layout (side-nav-outer-toolbar, side-nav-inner-toolbar)
    #[arg(long)]
    pub layout: Option<String>,

    /// Template type (typescript, javascript)
    #[arg(long)]
    pub template: Option<String>,

    /// Transpiler for React projects (babel, swc)
    #[arg(long)]
    pub transpiler: Option<String>,

    /// Version tag for the generator and framework packages (e.g. next)
    #[arg(long = "deps-version-tag")]
    pub deps_version_tag: Option<String>,

    /// Skip the sample pages
    #[arg(long)]
    pub empty: bool,

    /// Local directory to use for templates instead of the bundled ones (for development use)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Do not install dependencies
    #[arg(long = "skip-install")]
    pub skip_install: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,
}

impl From<CliCreateArgs> for CreateArgs {
    fn from(args: CliCreateArgs) -> Self {
        CreateArgs {
            framework: args.framework,
            app_name: args.app_name,
            layout: args.layout,
            template: args.template,
            transpiler: args.transpiler,
            deps_version_tag: args.deps_version_tag,
            empty: args.empty,
            template_dir: args.template_dir,
            skip_install: args.skip_install,
            yes: args.yes,
        }
    }
}

#[derive(Parser, Debug)]
pub struct CliAddViewArgs {
    /// Page name, e.g. "new page"
    pub name: String,

    /// Navigation icon
    #[arg(long)]
    pub icon: Option<String>,

    /// Local directory to use for templates instead of the bundled ones (for development use)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,
}

impl From<CliAddViewArgs> for AddViewArgs {
    fn from(args: CliAddViewArgs) -> Self {
        AddViewArgs {
            name: args.name,
            icon: args.icon,
            template_dir: args.template_dir,
        }
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "spakit=debug,spa_scaffolder=debug"
    } else {
        "spakit=info,spa_scaffolder=info"
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format(|buf, record| {
            let level = match record.level() {
                log::Level::Error => "error".red().bold(),
                log::Level::Warn => "warn".yellow().bold(),
                log::Level::Info => "│".dimmed(),
                log::Level::Debug | log::Level::Trace => "debug".dimmed(),
            };
            writeln!(buf, "{}  {}", level, record.args())
        })
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    init_logging(args.verbose);
    let config = SpakitConfig;

    let result = match args.command {
        Command::Create(create_args) => spa_scaffolder::run_create(&config, create_args.into()).await,
        Command::Add {
            item: AddCommand::View(view_args),
        } => spa_scaffolder::run_add_view(&config, view_args.into()),
    };

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    result
}
