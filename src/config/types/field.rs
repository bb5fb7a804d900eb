//! Type-safe config field path.

use owo_colors::OwoColorize;
use std::fmt;

/// A dotted path to a key in `site.toml`.
///
/// Produced by `#[derive(Config)]`, so diagnostics never spell key names by
/// hand:
///
/// ```ignore
/// diag.error(SiteConfig::FIELDS.base_path, "must end with `/`");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldPath(pub &'static str);

impl FieldPath {
    #[inline]
    pub const fn new(path: &'static str) -> Self {
        Self(path)
    }

    #[inline]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }

    /// Path of one element of an array field, e.g. `sidebar[2]`.
    pub fn item(&self, index: usize) -> String {
        format!("{}[{index}]", self.0)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_args!("`{}`", self.0).bright_blue())
    }
}

impl AsRef<str> for FieldPath {
    fn as_ref(&self) -> &str {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_path() {
        let field = FieldPath::new("sidebar");
        assert_eq!(field.item(0), "sidebar[0]");
        assert_eq!(field.item(12), "sidebar[12]");
        assert_eq!(field.as_str(), "sidebar");
    }
}
