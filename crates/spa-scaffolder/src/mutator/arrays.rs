//! Array-literal element insertion

use super::anchors::ArrayAnchor;
use super::scan::{split_top_level, squash_whitespace, CodeMap};

/// Outcome of an array insertion on text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArrayInsert {
    Inserted(String),
    /// The fragment is already in the array
    Present,
    /// No array matched the anchor
    AnchorMissing,
}

/// Insert `fragment` as the last element of the array found by `anchor`
///
/// The fragment carries its own layout (typically a leading newline and
/// indentation); a leading comma on it is dropped and separators are added
/// here. Existing elements, the whitespace before `]` and a trailing comma
/// (if the array had one) are preserved. A fragment equal to an existing
/// top-level element, ignoring whitespace, is not inserted again.
pub fn insert_array_element(text: &str, anchor: &ArrayAnchor, fragment: &str) -> ArrayInsert {
    let code = CodeMap::new(text);
    let Some((open, close)) = anchor.locate(text, &code) else {
        return ArrayInsert::AnchorMissing;
    };

    let fragment = strip_leading_comma(fragment);
    let needle = squash_whitespace(fragment);
    if needle.is_empty()
        || split_top_level(&text[open + 1..close])
            .iter()
            .any(|element| squash_whitespace(element) == needle)
    {
        return ArrayInsert::Present;
    }

    let mut out = String::with_capacity(text.len() + fragment.len() + 2);
    match code.last_code_byte(text, open + 1, close) {
        None => {
            let body = &text[open + 1..close];
            out.push_str(&text[..=open]);
            out.push_str(fragment);
            if fragment.starts_with('\n') && !body.contains('\n') {
                out.push('\n');
            }
            out.push_str(&text[open + 1..]);
        }
        Some(last) if text.as_bytes()[last] == b',' => {
            out.push_str(&text[..=last]);
            out.push_str(fragment);
            out.push(',');
            out.push_str(&text[last + 1..]);
        }
        Some(last) => {
            out.push_str(&text[..=last]);
            out.push(',');
            out.push_str(fragment);
            out.push_str(&text[last + 1..]);
        }
    }

    ArrayInsert::Inserted(out)
}

fn strip_leading_comma(fragment: &str) -> &str {
    let trimmed = fragment.trim_start();
    match trimmed.strip_prefix(',') {
        Some(rest) => rest,
        None => fragment,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROUTE: &str = "\n  {\n    path: '/new-page',\n    element: NewPagePage\n  }";

    fn elements(text: &str, anchor: &ArrayAnchor) -> Vec<String> {
        let code = CodeMap::new(text);
        let (open, close) = anchor.locate(text, &code).unwrap();
        split_top_level(&text[open + 1..close])
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    fn inserted(result: ArrayInsert) -> String {
        match result {
            ArrayInsert::Inserted(s) => s,
            other => panic!("expected insertion, got {:?}", other),
        }
    }

    #[test]
    fn test_append_without_trailing_comma() {
        let text = "const routeData = [\n  {\n    path: '/home',\n    element: HomePage\n  }\n];\n";
        let anchor = ArrayAnchor::Binding("routeData".into());
        let out = inserted(insert_array_element(text, &anchor, ROUTE));

        assert_eq!(
            out,
            "const routeData = [\n  {\n    path: '/home',\n    element: HomePage\n  },\n  {\n    path: '/new-page',\n    element: NewPagePage\n  }\n];\n"
        );
    }

    #[test]
    fn test_append_with_trailing_comma() {
        let text = "export default [\n  { text: 'Home' },\n];\n";
        let out = inserted(insert_array_element(
            text,
            &ArrayAnchor::DefaultExport,
            "\n  { text: 'New Page' }",
        ));
        assert_eq!(out, "export default [\n  { text: 'Home' },\n  { text: 'New Page' },\n];\n");
    }

    #[test]
    fn test_append_to_empty_arrays() {
        let anchor = ArrayAnchor::Binding("routeData".into());

        let out = inserted(insert_array_element("const routeData = [];", &anchor, ROUTE));
        assert_eq!(out, format!("const routeData = [{}\n];", ROUTE));

        let out = inserted(insert_array_element("const routeData = [\n];", &anchor, ROUTE));
        assert_eq!(out, format!("const routeData = [{}\n];", ROUTE));
    }

    #[test]
    fn test_existing_elements_keep_order() {
        let text = "const navigation = [\n  { text: 'A' },\n  { text: 'B' },\n  { text: 'C' }\n];";
        let anchor = ArrayAnchor::Binding("navigation".into());
        let before = elements(text, &anchor);
        let out = inserted(insert_array_element(text, &anchor, "\n  { text: 'D' }"));
        let after = elements(&out, &anchor);

        assert_eq!(after.len(), before.len() + 1);
        assert_eq!(&after[..before.len()], &before[..]);
        assert_eq!(after.last().unwrap(), "{ text: 'D' }");
    }

    #[test]
    fn test_repeat_is_idempotent() {
        let text = "const routeData = [\n  { path: '/home' }\n];";
        let anchor = ArrayAnchor::Binding("routeData".into());
        let once = inserted(insert_array_element(text, &anchor, ROUTE));
        assert_eq!(insert_array_element(&once, &anchor, ROUTE), ArrayInsert::Present);
    }

    #[test]
    fn test_leading_comma_in_fragment() {
        let text = "const a = [1];";
        let anchor = ArrayAnchor::Binding("a".into());
        let out = inserted(insert_array_element(text, &anchor, ", 2"));
        assert_eq!(out, "const a = [1, 2];");
    }

    #[test]
    fn test_only_targeted_array_changes() {
        let text = "const other = [1];\nconst routes = [\n  { path: '/a' }\n];\nconst tail = [2];\n";
        let anchor = ArrayAnchor::Binding("routes".into());
        let out = inserted(insert_array_element(text, &anchor, "\n  { path: '/b' }"));
        assert!(out.starts_with("const other = [1];\nconst routes = [\n  { path: '/a' },\n  { path: '/b' }\n];"));
        assert!(out.ends_with("const tail = [2];\n"));
    }

    #[test]
    fn test_missing_anchor() {
        let anchor = ArrayAnchor::Binding("routes".into());
        assert_eq!(
            insert_array_element("const other = [];", &anchor, ROUTE),
            ArrayInsert::AnchorMissing
        );
    }

    #[test]
    fn test_nested_route_arrays() {
        let text = "  routes: [\n    {\n      path: '/home',\n      children: [{ path: 'x' }]\n    }\n  ],\n";
        let anchor = ArrayAnchor::Property("routes".into());
        let out = inserted(insert_array_element(text, &anchor, "\n    { path: '/b' }"));
        assert!(out.contains("children: [{ path: 'x' }]\n    },\n    { path: '/b' }\n  ],"));
    }

    #[test]
    fn test_matching_nested_child_is_not_a_duplicate() {
        let text = "  routes: [\n    {\n      path: '/home',\n      children: [{ path: '/b' }]\n    }\n  ],\n";
        let anchor = ArrayAnchor::Property("routes".into());
        let out = inserted(insert_array_element(text, &anchor, "\n    { path: '/b' }"));
        assert_eq!(elements(&out, &anchor).len(), 2);
        assert!(out.contains("children: [{ path: '/b' }]\n    },\n    { path: '/b' }\n  ],"));
    }
}
