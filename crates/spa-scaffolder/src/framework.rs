//! Per-framework conventions
//!
//! Everything that differs between the supported frameworks lives in one
//! static [`FrameworkProfile`] per framework. The application and page
//! orchestrators are generic over the profile.

use crate::mutator::{ArrayAnchor, ImportSpec};
use crate::naming;
use crate::package_json::{Dependency, PACKAGE_JSON};
use crate::pages::PageDescriptor;
use crate::templates::{ExtensionPolicy, VariantFlags};
use std::borrow::Cow;
use std::fmt;
use std::path::Path;

/// Pinned generator versions used when no dependency tag is given
pub const CREATE_VITE_VERSION: &str = "6.5.0";
pub const CREATE_VUE_VERSION: &str = "3.16.4";
pub const DEVEXTREME_CLI_VERSION: &str = "^1.11.0";
pub const DEVEXTREME_VERSION: &str = "^25.1.3";

/// Registry the Vue generator installs from
pub const NPM_REGISTRY: &str = "https://registry.npmjs.org/";

/// Stylesheets imported into the main module of a new application
pub const APP_STYLES: &[&str] = &[
    "./themes/generated/theme.additional.css",
    "./themes/generated/theme.additional.dark.css",
    "./themes/generated/theme.base.css",
    "./themes/generated/theme.base.dark.css",
    "devextreme/dist/css/dx.common.css",
];

pub const APP_SCRIPTS: &[(&str, &str)] = &[
    ("build-themes", "devextreme build"),
    ("postinstall", "npm run build-themes"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Framework {
    React,
    Vue,
}

impl Framework {
    pub const ALL: &'static [Framework] = &[Framework::React, Framework::Vue];

    pub fn display_name(&self) -> &'static str {
        match self {
            Framework::React => "React",
            Framework::Vue => "Vue",
        }
    }

    pub fn profile(&self) -> &'static FrameworkProfile {
        match self {
            Framework::React => &REACT,
            Framework::Vue => &VUE,
        }
    }

    /// Guess the framework of an existing project from its package.json
    pub fn detect(project_dir: &Path) -> Option<Self> {
        let raw = std::fs::read_to_string(project_dir.join(PACKAGE_JSON)).ok()?;
        let package: serde_json::Value = serde_json::from_str(&raw).ok()?;
        let has = |name: &str| {
            ["dependencies", "devDependencies"]
                .iter()
                .any(|section| package[*section].get(name).is_some())
        };

        if has("react") {
            Some(Framework::React)
        } else if has("vue") {
            Some(Framework::Vue)
        } else {
            None
        }
    }

    /// Parse a framework name as typed on the command line
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "react" => Some(Framework::React),
            "vue" | "vue-v3" => Some(Framework::Vue),
            _ => None,
        }
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// JSX/TSX transpiler for Vite-based React projects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transpiler {
    #[default]
    Babel,
    Swc,
}

impl Transpiler {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "babel" => Some(Transpiler::Babel),
            "swc" => Some(Transpiler::Swc),
            _ => None,
        }
    }
}

/// Inputs for the framework's official project generator
#[derive(Debug, Clone)]
pub struct GeneratorRequest<'a> {
    pub app_name: &'a str,
    pub is_typescript: bool,
    pub transpiler: Transpiler,
    pub deps_version_tag: Option<&'a str>,
}

/// A program invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: &'static str,
    pub args: Vec<String>,
}

pub struct FrameworkProfile {
    pub framework: Framework,
    /// Directory under the template root
    pub template_dir: &'static str,
    /// Where pages live, relative to the project root
    pub pages_dir: &'static str,
    /// Re-export file for pages, created empty with the pages directory
    pub barrel: Option<&'static str>,
    /// Logical paths; extensions go through the extension policy
    pub routing_file: &'static str,
    pub navigation_file: &'static str,
    pub main_module: &'static str,
    pub web_manifest: Option<&'static str>,
    /// A project is TypeScript when this file exists
    pub typescript_marker: Option<&'static str>,
    pub extension_policy: ExtensionPolicy,
    pub route_anchor: ArrayAnchor,
    pub navigation_anchor: ArrayAnchor,
    pub component_suffix: &'static str,
    pub page_import: fn(&PageDescriptor) -> ImportSpec,
    /// Module the barrel re-exports a page from
    pub page_export_module: fn(&PageDescriptor) -> String,
    pub route_record: fn(&PageDescriptor) -> String,
    pub navigation_record: fn(&PageDescriptor) -> String,
    pub layout_option: fn(&str) -> String,
    pub template_dependencies: &'static [Dependency<'static>],
    /// Packages pinned to `--deps-version-tag`
    pub tagged_packages: &'static [&'static str],
    /// Dev packages pinned to the tag in TypeScript projects only
    pub tagged_type_packages: &'static [&'static str],
    pub ui_packages: &'static [&'static str],
    pub generator: fn(&GeneratorRequest<'_>) -> CommandLine,
}

impl FrameworkProfile {
    pub fn supports_typescript(&self) -> bool {
        self.typescript_marker.is_some()
    }

    /// Language variant of an existing project
    pub fn detect_variant(&self, project_dir: &Path) -> VariantFlags {
        VariantFlags {
            is_typescript: self
                .typescript_marker
                .is_some_and(|marker| project_dir.join(marker).is_file()),
        }
    }

    pub fn component_name(&self, page_name: &str) -> String {
        format!("{}{}", naming::classify(page_name), self.component_suffix)
    }
}

/// `{ text, path, icon }` navigation entry shared by both frameworks
fn navigation_record(page: &PageDescriptor) -> String {
    format!(
        "\n  {{\n    text: '{}',\n    path: '/{}',\n    icon: '{}'\n  }}",
        page.title, page.route_path, page.icon
    )
}

fn react_route(page: &PageDescriptor) -> String {
    format!(
        "\n  {{\n    path: '/{}',\n    element: {}\n  }}",
        page.route_path, page.component
    )
}

fn vue_route(page: &PageDescriptor) -> String {
    format!(
        "\n    {{\n      path: \"/{path}\",\n      name: \"{path}\",\n      meta: {{\n        requiresAuth: true,\n        layout: defaultLayout\n      }},\n      component: {component}\n    }}",
        path = page.route_path,
        component = page.component
    )
}

fn react_generator(req: &GeneratorRequest<'_>) -> CommandLine {
    let template = format!(
        "react{}{}",
        if req.transpiler == Transpiler::Swc { "-swc" } else { "" },
        if req.is_typescript { "-ts" } else { "" }
    );
    CommandLine {
        program: "npx",
        args: vec![
            format!("-p=create-vite@{}", req.deps_version_tag.unwrap_or(CREATE_VITE_VERSION)),
            "create-vite".to_string(),
            req.app_name.to_string(),
            "--template".to_string(),
            template,
        ],
    }
}

fn vue_generator(req: &GeneratorRequest<'_>) -> CommandLine {
    CommandLine {
        program: "npm",
        args: vec![
            "create".to_string(),
            format!("vue@{}", req.deps_version_tag.unwrap_or(CREATE_VUE_VERSION)),
            req.app_name.to_string(),
            "--registry".to_string(),
            NPM_REGISTRY.to_string(),
            "--".to_string(),
            "--eslint".to_string(),
            "--default".to_string(),
            "--bare".to_string(),
        ],
    }
}

pub static REACT: FrameworkProfile = FrameworkProfile {
    framework: Framework::React,
    template_dir: "react",
    pages_dir: "src/pages",
    barrel: Some("src/pages/index.tsx"),
    routing_file: "src/app-routes.tsx",
    navigation_file: "src/app-navigation.tsx",
    main_module: "src/App.tsx",
    web_manifest: Some("public/manifest.json"),
    typescript_marker: Some("src/App.tsx"),
    extension_policy: ExtensionPolicy::SwapTypeScript,
    route_anchor: ArrayAnchor::Binding(Cow::Borrowed("routeData")),
    navigation_anchor: ArrayAnchor::Binding(Cow::Borrowed("navigation")),
    component_suffix: "Page",
    page_import: |page| ImportSpec::named("./pages", page.component.as_str()),
    page_export_module: |page| format!("./{0}/{0}", page.file_name),
    route_record: react_route,
    navigation_record,
    layout_option: naming::classify,
    template_dependencies: &[
        Dependency::new("sass-embedded", "^1.85.1"),
        Dependency::dev("devextreme-cli", DEVEXTREME_CLI_VERSION),
        Dependency::new("react-router-dom", "^6.3.0"),
    ],
    tagged_packages: &["react", "react-dom"],
    tagged_type_packages: &["@types/react", "@types/react-dom"],
    ui_packages: &["devextreme", "devextreme-react"],
    generator: react_generator,
};

pub static VUE: FrameworkProfile = FrameworkProfile {
    framework: Framework::Vue,
    template_dir: "vue",
    pages_dir: "src/views",
    barrel: None,
    routing_file: "src/router.js",
    navigation_file: "src/app-navigation.js",
    main_module: "src/main.js",
    web_manifest: None,
    typescript_marker: None,
    extension_policy: ExtensionPolicy::Keep,
    route_anchor: ArrayAnchor::Property(Cow::Borrowed("routes")),
    navigation_anchor: ArrayAnchor::DefaultExport,
    component_suffix: "",
    page_import: |page| ImportSpec::default(format!("./views/{}.vue", page.file_name), page.component.as_str()),
    page_export_module: |page| format!("./{}.vue", page.file_name),
    route_record: vue_route,
    navigation_record,
    layout_option: |layout| layout.to_string(),
    template_dependencies: &[
        Dependency::new("sass-embedded", "^1.85.1"),
        Dependency::new("vue-router", "^4.0.1"),
        Dependency::dev("devextreme-cli", DEVEXTREME_CLI_VERSION),
    ],
    tagged_packages: &["vue", "vue-router"],
    tagged_type_packages: &[],
    ui_packages: &["devextreme", "devextreme-vue"],
    generator: vue_generator,
};
