//! Destination path and extension resolution for template files
//!
//! Resolution is a pure function of the template-relative path, the option
//! set and the resolver's configuration. The page orchestrator relies on this
//! to compute routing/navigation file names up front and get the same answer
//! the copier gets later.

use super::manifest::{FileLanguage, LanguageFiles};
use super::options::OptionSet;
use crate::error::RenderError;
use regex::Regex;
use std::path::PathBuf;
use std::sync::LazyLock;

/// Suffix marking a file as a parameterized template. Files without it are
/// copied byte for byte.
pub const TEMPLATE_SUFFIX: &str = "-template";

static PATH_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"__([A-Za-z][A-Za-z0-9]*)__").expect("valid path token pattern"));

/// How source extensions map between language variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtensionPolicy {
    /// `.ts`/`.tsx` become `.js`/`.jsx` in JavaScript projects
    SwapTypeScript,
    /// Extensions are kept as written
    Keep,
}

/// Feature flags that influence resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VariantFlags {
    pub is_typescript: bool,
}

/// Where a template file lands, and whether it goes through the renderer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    pub path: PathBuf,
    pub render: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Write the file at the destination
    Emit(Destination),
    /// Write the file, then have the orchestrator remove it once the copy is
    /// complete (TypeScript-only auxiliaries in JavaScript projects)
    EmitThenRemove(Destination),
    /// Not part of this variant
    Skip,
}

#[derive(Debug, Clone)]
pub struct PathResolver {
    flags: VariantFlags,
    policy: ExtensionPolicy,
    language_files: LanguageFiles,
}

impl PathResolver {
    pub fn new(flags: VariantFlags, policy: ExtensionPolicy, language_files: LanguageFiles) -> Self {
        Self {
            flags,
            policy,
            language_files,
        }
    }

    pub fn flags(&self) -> VariantFlags {
        self.flags
    }

    /// Resolve a template-relative path (`/`-separated) to its destination
    pub fn resolve(&self, template_path: &str, options: &OptionSet) -> Result<Resolution, RenderError> {
        let substituted = substitute_tokens(template_path, options)?;

        let (logical, render) = match substituted.strip_suffix(TEMPLATE_SUFFIX) {
            Some(stripped) => (stripped.to_string(), true),
            None => (substituted, false),
        };

        let is_ts = self.flags.is_typescript;
        let language = self.language_files.classify(&logical);
        let skip = match language {
            FileLanguage::TypeScript => !is_ts,
            FileLanguage::JavaScript => is_ts,
            FileLanguage::Common | FileLanguage::TypeScriptAuxiliary => false,
        };
        if skip {
            log::debug!("skip {} ({:?} only)", template_path, language);
            return Ok(Resolution::Skip);
        }

        let destination = Destination {
            path: self.resolve_source(&logical),
            render,
        };

        if language == FileLanguage::TypeScriptAuxiliary && !is_ts {
            Ok(Resolution::EmitThenRemove(destination))
        } else {
            Ok(Resolution::Emit(destination))
        }
    }

    /// Apply the extension policy to a logical source path such as
    /// `src/app-routes.tsx`
    pub fn resolve_source(&self, logical: &str) -> PathBuf {
        if self.policy == ExtensionPolicy::Keep || self.flags.is_typescript {
            return to_path(logical);
        }
        if logical.ends_with(".d.ts") {
            return to_path(logical);
        }

        let swapped = if let Some(stem) = logical.strip_suffix(".tsx") {
            format!("{}.jsx", stem)
        } else if let Some(stem) = logical.strip_suffix(".ts") {
            format!("{}.js", stem)
        } else {
            logical.to_string()
        };
        to_path(&swapped)
    }
}

fn substitute_tokens(template_path: &str, options: &OptionSet) -> Result<String, RenderError> {
    let mut out = String::with_capacity(template_path.len());
    let mut cursor = 0;

    for caps in PATH_TOKEN.captures_iter(template_path) {
        let Some(whole) = caps.get(0) else { continue };
        let key = caps.get(1).map_or("", |m| m.as_str());
        let value = options.get(key).ok_or_else(|| RenderError::MissingOption {
            key: key.to_string(),
        })?;

        out.push_str(&template_path[cursor..whole.start()]);
        out.push_str(&value.to_string());
        cursor = whole.end();
    }

    out.push_str(&template_path[cursor..]);
    Ok(out)
}

fn to_path(logical: &str) -> PathBuf {
    logical.split('/').filter(|s| !s.is_empty()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::options::keys;

    fn resolver(is_typescript: bool, policy: ExtensionPolicy) -> PathResolver {
        PathResolver::new(
            VariantFlags { is_typescript },
            policy,
            LanguageFiles {
                typescript: vec!["tsconfig*".to_string()],
                javascript: vec!["jsconfig.json".to_string()],
                typescript_auxiliary: vec!["types.tsx".to_string()],
            },
        )
    }

    fn emitted(resolution: Resolution) -> Destination {
        match resolution {
            Resolution::Emit(d) => d,
            other => panic!("expected Emit, got {:?}", other),
        }
    }

    #[test]
    fn test_react_extension_swap() {
        let options = OptionSet::new();

        let ts = emitted(
            resolver(true, ExtensionPolicy::SwapTypeScript)
                .resolve("App.tsx-template", &options)
                .unwrap(),
        );
        assert_eq!(ts.path, PathBuf::from("App.tsx"));
        assert!(ts.render);

        let js = emitted(
            resolver(false, ExtensionPolicy::SwapTypeScript)
                .resolve("App.tsx-template", &options)
                .unwrap(),
        );
        assert_eq!(js.path, PathBuf::from("App.jsx"));
    }

    #[test]
    fn test_literal_files_are_not_rendered() {
        let d = emitted(
            resolver(false, ExtensionPolicy::SwapTypeScript)
                .resolve("src/utils/api.ts", &OptionSet::new())
                .unwrap(),
        );
        assert_eq!(d.path, PathBuf::from("src/utils/api.js"));
        assert!(!d.render);
    }

    #[test]
    fn test_keep_policy_leaves_extensions() {
        let d = emitted(
            resolver(false, ExtensionPolicy::Keep)
                .resolve("src/shims.ts", &OptionSet::new())
                .unwrap(),
        );
        assert_eq!(d.path, PathBuf::from("src/shims.ts"));
    }

    #[test]
    fn test_variant_only_files_skipped() {
        let options = OptionSet::new();
        assert_eq!(
            resolver(false, ExtensionPolicy::SwapTypeScript)
                .resolve("tsconfig.app.json", &options)
                .unwrap(),
            Resolution::Skip
        );
        assert_eq!(
            resolver(true, ExtensionPolicy::SwapTypeScript)
                .resolve("jsconfig.json", &options)
                .unwrap(),
            Resolution::Skip
        );
    }

    #[test]
    fn test_typescript_auxiliary_marked_for_removal() {
        let options = OptionSet::new();
        let js = resolver(false, ExtensionPolicy::SwapTypeScript)
            .resolve("src/types.tsx", &options)
            .unwrap();
        assert_eq!(
            js,
            Resolution::EmitThenRemove(Destination {
                path: PathBuf::from("src/types.jsx"),
                render: false,
            })
        );

        let ts = resolver(true, ExtensionPolicy::SwapTypeScript)
            .resolve("src/types.tsx", &options)
            .unwrap();
        assert!(matches!(ts, Resolution::Emit(_)));
    }

    #[test]
    fn test_path_tokens_from_options() {
        let options = OptionSet::new().with(keys::NAME, "new-page");
        let d = emitted(
            resolver(false, ExtensionPolicy::SwapTypeScript)
                .resolve("__name__/__name__.tsx-template", &options)
                .unwrap(),
        );
        assert_eq!(d.path, PathBuf::from("new-page/new-page.jsx"));
    }

    #[test]
    fn test_missing_path_token_option() {
        let err = resolver(true, ExtensionPolicy::Keep)
            .resolve("__name__.vue-template", &OptionSet::new())
            .unwrap_err();
        assert_eq!(
            err,
            RenderError::MissingOption {
                key: "name".to_string()
            }
        );
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let r = resolver(false, ExtensionPolicy::SwapTypeScript);
        let options = OptionSet::new().with(keys::NAME, "tasks");
        let first = r.resolve("__name__/__name__.tsx-template", &options).unwrap();
        let second = r.resolve("__name__/__name__.tsx-template", &options).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            r.resolve_source("src/app-routes.tsx"),
            r.resolve_source("src/app-routes.tsx")
        );
    }
}
