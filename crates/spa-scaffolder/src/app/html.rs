//! index.html adjustments for a freshly generated project

use crate::error::ScaffoldError;
use regex::{NoExpand, Regex};
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

pub const INDEX_HTML: &str = "index.html";
const VIEWPORT_BODY: &str = r#"<body class="dx-viewport">"#;

static TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<title>[^<]*</title>").expect("valid title pattern"));

/// Set the document title and mark `<body>` as the widget viewport
pub fn patch_html(html: &str, title: &str) -> String {
    let replacement = format!("<title>{}</title>", escape_text(title));
    let html = TITLE.replacen(html, 1, NoExpand(&replacement));
    html.replacen("<body>", VIEWPORT_BODY, 1)
}

pub fn patch_index_html(project_dir: &Path, title: &str) -> Result<(), ScaffoldError> {
    let path = project_dir.join(INDEX_HTML);
    let html = fs::read_to_string(&path).map_err(|e| ScaffoldError::io(&path, e))?;
    let patched = patch_html(&html, title);
    if patched != html {
        fs::write(&path, patched).map_err(|e| ScaffoldError::io(&path, e))?;
        log::info!("update {}", INDEX_HTML);
    }
    Ok(())
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}
