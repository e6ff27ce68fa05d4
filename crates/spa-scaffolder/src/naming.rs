//! Name casing used for generated identifiers, paths and labels

use heck::{ToKebabCase, ToTitleCase, ToUpperCamelCase};

/// `"new page"` → `"New Page"`
pub fn humanize(name: &str) -> String {
    name.to_title_case()
}

/// `"new page"` → `"NewPage"`
pub fn classify(name: &str) -> String {
    name.to_upper_camel_case()
}

/// `"new page"` → `"new-page"`
pub fn dasherize(name: &str) -> String {
    name.to_kebab_case()
}
