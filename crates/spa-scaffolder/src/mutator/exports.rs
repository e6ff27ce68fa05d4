//! Re-export insertion for barrel files

use super::anchors::export_statements;
use super::scan::CodeMap;

/// Re-export the default export of `module` under `name`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSpec {
    pub name: String,
    pub module: String,
}

impl ExportSpec {
    pub fn new(name: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            module: module.into(),
        }
    }
}

/// Append `export { default as Name } from 'module';` to the end of the
/// file. A file that already exports `Name` from any `export { ... } from`
/// statement is left unchanged (`None`). Quote and semicolon style follow the
/// last existing re-export.
pub fn insert_export(text: &str, spec: &ExportSpec) -> Option<String> {
    let code = CodeMap::new(text);
    let statements = export_statements(text, &code);

    if statements
        .iter()
        .any(|s| s.exported.iter().any(|n| *n == spec.name))
    {
        return None;
    }

    let (quote, semicolon) = statements
        .last()
        .map_or(('\'', true), |s| (s.quote, s.semicolon));
    let statement = format!(
        "export {{ default as {} }} from {quote}{}{quote}{}",
        spec.name,
        spec.module,
        if semicolon { ";" } else { "" }
    );

    let mut out = String::with_capacity(text.len() + statement.len() + 2);
    out.push_str(text);
    if !text.is_empty() && !text.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(&statement);
    out.push('\n');
    Some(out)
}
