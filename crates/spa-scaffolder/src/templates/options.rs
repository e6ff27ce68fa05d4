//! Option sets fed to the renderer and the path resolver

use std::collections::BTreeMap;
use std::fmt;

/// A single template option value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    Text(String),
    Flag(bool),
}

impl OptionValue {
    /// Truthiness used by conditional blocks: flags are themselves, text is
    /// truthy when non-empty
    pub fn is_truthy(&self) -> bool {
        match self {
            OptionValue::Text(s) => !s.is_empty(),
            OptionValue::Flag(b) => *b,
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Text(s) => write!(f, "{}", s),
            OptionValue::Flag(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::Text(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::Text(value)
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Flag(value)
    }
}

/// Well-known option keys shared by the bundled templates
pub mod keys {
    pub const IS_TYPESCRIPT: &str = "isTypeScript";
    pub const PROJECT: &str = "project";
    pub const LAYOUT: &str = "layout";
    pub const EMPTY: &str = "empty";
    pub const NAME: &str = "name";
    pub const COMPONENT: &str = "component";
    pub const TITLE: &str = "title";
    pub const ICON: &str = "icon";
}

/// Ordered mapping from option name to value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionSet(BTreeMap<String, OptionValue>);

impl OptionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: &str, value: impl Into<OptionValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: &str, value: impl Into<OptionValue>) {
        self.0.insert(key.to_string(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.0.get(key)
    }

    /// Absent flags read as false
    pub fn flag(&self, key: &str) -> bool {
        self.0.get(key).map(OptionValue::is_truthy).unwrap_or(false)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &OptionValue)> {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_truthiness() {
        let options = OptionSet::new()
            .with(keys::IS_TYPESCRIPT, true)
            .with(keys::EMPTY, false)
            .with(keys::PROJECT, "My App")
            .with(keys::LAYOUT, "");

        assert!(options.flag(keys::IS_TYPESCRIPT));
        assert!(!options.flag(keys::EMPTY));
        assert!(options.flag(keys::PROJECT));
        assert!(!options.flag(keys::LAYOUT));
        assert!(!options.flag("missing"));
    }

    #[test]
    fn test_display_value() {
        assert_eq!(OptionValue::from("Home").to_string(), "Home");
        assert_eq!(OptionValue::from(true).to_string(), "true");
    }
}
