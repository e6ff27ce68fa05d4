//! Import insertion

use super::anchors::{binding_names, import_statements, ImportStatement};
use super::scan::CodeMap;

/// How the binding is imported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportStyle {
    /// `import Name from 'module'`
    Default,
    /// `import { Name } from 'module'`
    Named,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSpec {
    pub module: String,
    /// `None` produces a side-effect import: `import 'module'`
    pub binding: Option<String>,
    pub style: ImportStyle,
}

impl ImportSpec {
    pub fn side_effect(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            binding: None,
            style: ImportStyle::Named,
        }
    }

    pub fn named(module: impl Into<String>, binding: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            binding: Some(binding.into()),
            style: ImportStyle::Named,
        }
    }

    pub fn default(module: impl Into<String>, binding: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            binding: Some(binding.into()),
            style: ImportStyle::Default,
        }
    }

    fn statement(&self, quote: char, semicolon: bool) -> String {
        let module = format!("{quote}{}{quote}", self.module);
        let tail = if semicolon { ";" } else { "" };
        match (&self.binding, self.style) {
            (None, _) => format!("import {}{}", module, tail),
            (Some(b), ImportStyle::Default) => format!("import {} from {}{}", b, module, tail),
            (Some(b), ImportStyle::Named) => format!("import {{ {} }} from {}{}", b, module, tail),
        }
    }
}

/// Insert an import of `spec.module` after the last import statement, or at
/// the top of the file (below any directive prologue) when there is none.
///
/// Keyed on the module path: when the module is already imported, the text is
/// returned unchanged, except that a named binding missing from an existing
/// `{ ... }` list is appended to that list. Quote and semicolon style follow
/// the last existing import. Returns `None` when nothing changes.
pub fn insert_import(text: &str, spec: &ImportSpec) -> Option<String> {
    let code = CodeMap::new(text);
    let statements = import_statements(text, &code);

    if let Some(existing) = statements.iter().find(|s| s.module == spec.module) {
        return extend_named_import(text, existing, spec);
    }

    let (quote, semicolon) = statements
        .last()
        .map_or(('\'', true), |s| (s.quote, s.semicolon));
    let statement = spec.statement(quote, semicolon);

    let mut out = String::with_capacity(text.len() + statement.len() + 1);
    match statements.last() {
        Some(last) => {
            // end of the import's line, past any trailing comment
            let at = if text[..last.end].ends_with('\n') {
                last.end
            } else {
                text[last.end..].find('\n').map_or(text.len(), |n| last.end + n + 1)
            };
            out.push_str(&text[..at]);
            if !text[..at].ends_with('\n') {
                out.push('\n');
            }
            out.push_str(&statement);
            out.push('\n');
            out.push_str(&text[at..]);
        }
        None => {
            let at = prologue_end(text);
            out.push_str(&text[..at]);
            out.push_str(&statement);
            out.push('\n');
            out.push_str(&text[at..]);
        }
    }
    Some(out)
}

fn extend_named_import(text: &str, existing: &ImportStatement, spec: &ImportSpec) -> Option<String> {
    let binding = spec.binding.as_deref()?;
    if spec.style != ImportStyle::Named {
        return None;
    }
    let (open, close) = existing.named?;
    let list = &text[open..close];
    if binding_names(list).iter().any(|n| n == binding) {
        return None;
    }

    let trimmed = list.trim_end();
    let insert_at = open + trimmed.len();
    let addition = if trimmed.trim().is_empty() {
        format!(" {} ", binding)
    } else if trimmed.ends_with(',') {
        format!(" {},", binding)
    } else {
        format!(", {}", binding)
    };

    let (head, tail) = if trimmed.trim().is_empty() {
        (&text[..open], &text[close..])
    } else {
        (&text[..insert_at], &text[insert_at..])
    };
    Some(format!("{}{}{}", head, addition, tail))
}

/// End of a leading `'use client'` / `"use strict"` directive block
fn prologue_end(text: &str) -> usize {
    let mut at = 0;
    for line in text.split_inclusive('\n') {
        let trimmed = line.trim();
        let is_directive = (trimmed.starts_with("'use ") || trimmed.starts_with("\"use "))
            && trimmed.trim_end_matches(';').len() > 6;
        if !is_directive {
            break;
        }
        at += line.len();
    }
    at
}
