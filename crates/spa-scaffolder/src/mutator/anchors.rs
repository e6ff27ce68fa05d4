//! Anchor rules: where each source edit lands
//!
//! Every rule is a regular expression over raw text whose matches are kept
//! only when they start in code (not inside a string or comment, see
//! [`CodeMap`]).
//!
//! | rule                         | matches                                             |
//! |------------------------------|-----------------------------------------------------|
//! | `ArrayAnchor::Binding(x)`    | `const\|let\|var x [: Type] = [`  (first occurrence) |
//! | `ArrayAnchor::Property(x)`   | `x: [` or `'x': [`             (first occurrence)    |
//! | `ArrayAnchor::DefaultExport` | `export default [`                                   |
//! | import statements            | a line starting with `import` up to its module string |
//! | re-export lists              | `export { ... } from 'module'`                        |

use super::scan::CodeMap;
use regex::Regex;
use std::borrow::Cow;
use std::fmt;
use std::sync::LazyLock;

static IMPORT_STATEMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^[ \t]*import(\s[^'";(]*?|\{[^'";(]*?)?(['"])([^'"\n]+)['"][ \t]*(;?)[ \t]*(?:\r?\n)?"#)
        .expect("valid import pattern")
});

static EXPORT_FROM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^[ \t]*export\s*(?:type\s*)?\{([^}]*)\}\s*from\s*(['"])([^'"\n]+)['"][ \t]*(;?)"#)
        .expect("valid export pattern")
});

/// Identifies one array literal in a source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArrayAnchor {
    /// Array assigned to a variable: `const routes = [`
    Binding(Cow<'static, str>),
    /// Array as the value of an object property: `routes: [`
    Property(Cow<'static, str>),
    /// Array that is the module's default export: `export default [`
    DefaultExport,
}

impl ArrayAnchor {
    fn pattern(&self) -> Regex {
        let source = match self {
            ArrayAnchor::Binding(name) => format!(
                r"\b(?:const|let|var)\s+{}\b\s*(?::[^=;]+)?=\s*\[",
                regex::escape(name.as_ref())
            ),
            ArrayAnchor::Property(name) => {
                let name = regex::escape(name.as_ref());
                format!(r#"(?:\b{name}|'{name}'|"{name}")\s*:\s*\["#)
            }
            ArrayAnchor::DefaultExport => r"\bexport\s+default\s+\[".to_string(),
        };
        Regex::new(&source).expect("escaped anchor pattern is valid")
    }

    /// Byte offsets of the array's opening and closing brackets
    pub fn locate(&self, text: &str, code: &CodeMap) -> Option<(usize, usize)> {
        let m = self
            .pattern()
            .find_iter(text)
            .find(|m| code.is_code(m.start()))?;
        let open = m.end() - 1;
        let close = code.matching_close(text, open)?;
        Some((open, close))
    }
}

impl fmt::Display for ArrayAnchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArrayAnchor::Binding(name) => write!(f, "an array literal assigned to `{}`", name),
            ArrayAnchor::Property(name) => write!(f, "an array literal under property `{}`", name),
            ArrayAnchor::DefaultExport => write!(f, "an `export default [...]` array literal"),
        }
    }
}

/// One import statement found in a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportStatement {
    /// Byte range including the trailing newline, when there is one
    pub start: usize,
    pub end: usize,
    pub module: String,
    pub quote: char,
    pub semicolon: bool,
    /// Byte range of the text between `{` and `}`, for named imports
    pub named: Option<(usize, usize)>,
}

/// All import statements, in file order
pub fn import_statements(text: &str, code: &CodeMap) -> Vec<ImportStatement> {
    IMPORT_STATEMENT
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let quote = caps.get(2)?;
            let module = caps.get(3)?;
            let import_kw = whole.start() + whole.as_str().find("import")?;
            if !code.is_code(import_kw) {
                return None;
            }
            Some(ImportStatement {
                start: whole.start(),
                end: whole.end(),
                module: module.as_str().to_string(),
                quote: quote.as_str().chars().next().unwrap_or('\''),
                semicolon: caps.get(4).is_some_and(|m| !m.as_str().is_empty()),
                named: caps
                    .get(1)
                    .and_then(|head| brace_range(text, head.start(), head.end())),
            })
        })
        .collect()
}

/// One `export { ... } from '...'` statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportStatement {
    pub module: String,
    pub quote: char,
    pub semicolon: bool,
    /// Names the statement exports, after `as` renames
    pub exported: Vec<String>,
}

pub fn export_statements(text: &str, code: &CodeMap) -> Vec<ExportStatement> {
    EXPORT_FROM
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let export_kw = whole.start() + whole.as_str().find("export")?;
            if !code.is_code(export_kw) {
                return None;
            }
            Some(ExportStatement {
                module: caps.get(3)?.as_str().to_string(),
                quote: caps.get(2)?.as_str().chars().next().unwrap_or('\''),
                semicolon: caps.get(4).is_some_and(|m| !m.as_str().is_empty()),
                exported: binding_names(caps.get(1)?.as_str()),
            })
        })
        .collect()
}

/// Local names introduced by a `{ a, b as c, type d }` list
pub fn binding_names(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|item| {
            let item = item.strip_prefix("type ").unwrap_or(item).trim();
            match item.rsplit_once(" as ") {
                Some((_, alias)) => alias.trim().to_string(),
                None => item.to_string(),
            }
        })
        .collect()
}

fn brace_range(text: &str, from: usize, to: usize) -> Option<(usize, usize)> {
    let segment = &text[from..to];
    let open = segment.find('{')?;
    let close = segment.rfind('}')?;
    (open < close).then_some((from + open + 1, from + close))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locate(anchor: ArrayAnchor, text: &str) -> Option<(usize, usize)> {
        anchor.locate(text, &CodeMap::new(text))
    }

    #[test]
    fn test_binding_anchor() {
        let text = "const routeData = [\n  { path: '/home' }\n];\n";
        let (open, close) = locate(ArrayAnchor::Binding("routeData".into()), text).unwrap();
        assert_eq!(&text[open..=open], "[");
        assert_eq!(close, text.rfind(']').unwrap());
    }

    #[test]
    fn test_binding_anchor_with_type_annotation() {
        let text = "export const navigation: NavItem[] = [\n  { text: 'Home' },\n];";
        assert!(locate(ArrayAnchor::Binding("navigation".into()), text).is_some());
    }

    #[test]
    fn test_binding_anchor_requires_whole_name() {
        let text = "const routesExtra = [];\n";
        assert!(locate(ArrayAnchor::Binding("routes".into()), text).is_none());
    }

    #[test]
    fn test_property_anchor() {
        let text = "const router = createRouter({\n  routes: [\n    { path: '/' },\n  ],\n});";
        let (open, close) = locate(ArrayAnchor::Property("routes".into()), text).unwrap();
        assert!(text[open..=close].contains("path: '/'"));
    }

    #[test]
    fn test_default_export_anchor() {
        let text = "export default [\n  { text: 'Home' }\n];\n";
        assert!(locate(ArrayAnchor::DefaultExport, text).is_some());
    }

    #[test]
    fn test_anchor_in_comment_is_ignored() {
        let text = "// const routes = [ old ]\nconst routes = [a];\n";
        let (open, _) = locate(ArrayAnchor::Binding("routes".into()), text).unwrap();
        assert!(open > text.find('\n').unwrap());
    }

    #[test]
    fn test_import_statements() {
        let text = "import React from 'react';\nimport {\n  HomePage,\n  TasksPage\n} from \"./pages\"\nimport './App.css';\n\nconst a = 1;\n";
        let imports = import_statements(text, &CodeMap::new(text));

        assert_eq!(imports.len(), 3);
        assert_eq!(imports[0].module, "react");
        assert!(imports[0].semicolon);
        assert!(imports[0].named.is_none());
        assert_eq!(imports[1].module, "./pages");
        assert_eq!(imports[1].quote, '"');
        assert!(!imports[1].semicolon);
        let (s, e) = imports[1].named.unwrap();
        assert_eq!(binding_names(&text[s..e]), vec!["HomePage", "TasksPage"]);
        assert_eq!(imports[2].module, "./App.css");
        assert_eq!(&text[imports[2].end..], "\nconst a = 1;\n");
    }

    #[test]
    fn test_dynamic_import_is_not_a_statement() {
        let text = "import('./lazy').then(m => m);\n";
        assert!(import_statements(text, &CodeMap::new(text)).is_empty());
    }

    #[test]
    fn test_export_statements() {
        let text = "export { default as HomePage } from './home/home';\nexport { A, B as C } from './x';\n";
        let exports = export_statements(text, &CodeMap::new(text));
        assert_eq!(exports.len(), 2);
        assert_eq!(exports[0].exported, vec!["HomePage"]);
        assert_eq!(exports[1].exported, vec!["A", "C"]);
    }
}
