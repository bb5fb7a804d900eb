//! `head` tag descriptors.
//!
//! Each entry is a `[tag, {attrs}]` or `[tag, {attrs}, content]` array:
//!
//! ```toml
//! head = [
//!   ["link", { rel = "shortcut icon", href = "/favicon.ico" }],
//!   ["script", { src = "/app.js", defer = true }],
//!   ["style", {}, "body { margin: 0 }"],
//! ]
//! ```
//!
//! A `head` value that does not have this shape degrades to an empty list
//! with a warning. Unknown tags and missing required attributes are errors.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write;

use super::SiteConfig;
use super::types::{ConfigDiagnostic, ConfigDiagnostics};

// ============================================================================
// HeadTag
// ============================================================================

/// One element to inject into the generated `<head>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "HeadTagRepr", into = "HeadTagRepr")]
pub struct HeadTag {
    pub tag: String,
    pub attrs: BTreeMap<String, AttrValue>,
    /// Inner text, for `<script>` / `<style>` bodies.
    pub content: Option<String>,
}

/// Attribute value: text, or a boolean flag like `defer`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Flag(bool),
    Text(String),
}

/// Wire shape of a head entry.
#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum HeadTagRepr {
    WithContent(String, BTreeMap<String, AttrValue>, String),
    Bare(String, BTreeMap<String, AttrValue>),
}

impl From<HeadTagRepr> for HeadTag {
    fn from(repr: HeadTagRepr) -> Self {
        match repr {
            HeadTagRepr::WithContent(tag, attrs, content) => Self {
                tag,
                attrs,
                content: Some(content),
            },
            HeadTagRepr::Bare(tag, attrs) => Self {
                tag,
                attrs,
                content: None,
            },
        }
    }
}

impl From<HeadTag> for HeadTagRepr {
    fn from(tag: HeadTag) -> Self {
        match tag.content {
            Some(content) => Self::WithContent(tag.tag, tag.attrs, content),
            None => Self::Bare(tag.tag, tag.attrs),
        }
    }
}

impl HeadTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: BTreeMap::new(),
            content: None,
        }
    }

    /// Builder: add a text attribute.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), AttrValue::Text(value.into()));
        self
    }

    /// Builder: add a boolean attribute.
    pub fn flag(mut self, name: impl Into<String>, on: bool) -> Self {
        self.attrs.insert(name.into(), AttrValue::Flag(on));
        self
    }

    /// Builder: set inner content.
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Text value of attribute `name`, if set as text.
    pub fn get(&self, name: &str) -> Option<&str> {
        match self.attrs.get(name) {
            Some(AttrValue::Text(value)) => Some(value),
            _ => None,
        }
    }

    fn has_attr(&self, name: &str) -> bool {
        match self.attrs.get(name) {
            Some(AttrValue::Text(value)) => !value.is_empty(),
            Some(AttrValue::Flag(on)) => *on,
            None => false,
        }
    }

    fn has_content(&self) -> bool {
        self.content.as_deref().is_some_and(|c| !c.trim().is_empty())
    }

    /// Render as a single HTML element.
    ///
    /// Attributes come out sorted by name; `false` flags are omitted.
    pub fn to_html(&self) -> String {
        let mut html = format!("<{}", self.tag);
        for (name, value) in &self.attrs {
            match value {
                AttrValue::Text(text) => {
                    let _ = write!(html, " {name}=\"{}\"", escape_attr(text));
                }
                AttrValue::Flag(true) => {
                    let _ = write!(html, " {name}");
                }
                AttrValue::Flag(false) => {}
            }
        }
        html.push('>');

        if !is_void_element(&self.tag) {
            html.push_str(self.content.as_deref().unwrap_or_default());
            let _ = write!(html, "</{}>", self.tag);
        }
        html
    }
}

fn is_void_element(tag: &str) -> bool {
    matches!(tag, "link" | "meta" | "base")
}

fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

// ============================================================================
// Tag rules
// ============================================================================

/// What a recognized tag needs to be useful.
#[derive(Debug, Clone, Copy)]
enum TagRule {
    /// Every listed attribute.
    AllOf(&'static [&'static str]),
    /// At least one listed attribute.
    AnyOf(&'static [&'static str]),
    /// `src`, or inline content.
    SrcOrContent,
    /// Inline content.
    Content,
    Anything,
}

const SUPPORTED_TAGS: &[(&str, TagRule)] = &[
    ("link", TagRule::AllOf(&["rel", "href"])),
    (
        "meta",
        TagRule::AnyOf(&["name", "property", "charset", "http-equiv"]),
    ),
    ("script", TagRule::SrcOrContent),
    ("style", TagRule::Content),
    ("base", TagRule::AllOf(&["href"])),
    ("noscript", TagRule::Anything),
];

fn rule_for(tag: &str) -> Option<TagRule> {
    SUPPORTED_TAGS
        .iter()
        .find(|(name, _)| *name == tag)
        .map(|(_, rule)| *rule)
}

fn supported_tag_list() -> String {
    SUPPORTED_TAGS
        .iter()
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Check every entry against the tag rules.
pub(super) fn validate(head: &[HeadTag], diag: &mut ConfigDiagnostics) {
    let field = SiteConfig::FIELDS.head;

    for (i, entry) in head.iter().enumerate() {
        let Some(rule) = rule_for(&entry.tag) else {
            diag.push_error(
                ConfigDiagnostic::new(field, format!("unknown head tag `<{}>`", entry.tag))
                    .at(i)
                    .with_hint(format!("supported tags: {}", supported_tag_list())),
            );
            continue;
        };

        let problem = match rule {
            TagRule::AllOf(required) => {
                let missing: Vec<&str> = required
                    .iter()
                    .copied()
                    .filter(|name| !entry.has_attr(name))
                    .collect();
                (!missing.is_empty()).then(|| {
                    format!(
                        "`<{}>` is missing required attribute(s): {}",
                        entry.tag,
                        missing.join(", ")
                    )
                })
            }
            TagRule::AnyOf(options) => (!options.iter().any(|name| entry.has_attr(name)))
                .then(|| {
                    format!(
                        "`<{}>` needs one of these attributes: {}",
                        entry.tag,
                        options.join(", ")
                    )
                }),
            TagRule::SrcOrContent => (!entry.has_attr("src") && !entry.has_content())
                .then(|| format!("`<{}>` needs a `src` attribute or inline content", entry.tag)),
            TagRule::Content => (!entry.has_content())
                .then(|| format!("`<{}>` needs inline content", entry.tag)),
            TagRule::Anything => None,
        };

        if let Some(message) = problem {
            diag.push_error(ConfigDiagnostic::new(field, message).at(i));
        }
    }
}

// ============================================================================
// Tolerant parsing
// ============================================================================

/// Shape problem with a raw `head` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct ShapeIssue {
    pub index: Option<usize>,
    pub message: String,
}

/// Convert a raw TOML value into head tags, stopping at the first bad entry.
pub(super) fn parse_list(value: &toml::Value) -> Result<Vec<HeadTag>, ShapeIssue> {
    let toml::Value::Array(items) = value else {
        return Err(ShapeIssue {
            index: None,
            message: format!("expected an array, found {}", value.type_str()),
        });
    };

    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            item.clone().try_into::<HeadTag>().map_err(|_| ShapeIssue {
                index: Some(i),
                message: "expected [tag, {attrs}] or [tag, {attrs}, content]".to_string(),
            })
        })
        .collect()
}

/// Serde hook for the `head` field: any malformed value becomes empty.
///
/// The matching warning is produced by [`check_shape`] on the raw table.
pub(super) fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Vec<HeadTag>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = toml::Value::deserialize(deserializer)?;
    Ok(parse_list(&value).unwrap_or_default())
}

/// Record a warning if the raw `head` value has the wrong shape.
pub(super) fn check_shape(value: &toml::Value, diag: &mut ConfigDiagnostics) {
    if let Err(issue) = parse_list(value) {
        let mut warning = ConfigDiagnostic::new(
            SiteConfig::FIELDS.head,
            format!("{}; ignoring all head entries", issue.message),
        );
        if let Some(index) = issue.index {
            warning = warning.at(index);
        }
        diag.push_warning(warning);
    }
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    fn head_value(toml: &str) -> toml::Value {
        let table: toml::Table = toml::from_str(toml).unwrap();
        table["head"].clone()
    }

    #[test]
    fn test_parse_favicon_link() {
        let config =
            test_parse_config(r#"head = [["link", { rel = "shortcut icon", href = "/favicon.ico" }]]"#);
        assert_eq!(config.head.len(), 1);
        let link = &config.head[0];
        assert_eq!(link.tag, "link");
        assert_eq!(link.get("rel"), Some("shortcut icon"));
        assert_eq!(link.get("href"), Some("/favicon.ico"));
        assert!(link.content.is_none());
    }

    #[test]
    fn test_parse_with_content_and_flags() {
        let config = test_parse_config(
            r#"head = [
    ["script", { src = "/app.js", defer = true }],
    ["style", {}, "body { margin: 0 }"],
]"#,
        );
        assert_eq!(config.head.len(), 2);
        assert_eq!(config.head[0].attrs.get("defer"), Some(&AttrValue::Flag(true)));
        assert_eq!(config.head[1].content.as_deref(), Some("body { margin: 0 }"));
    }

    #[test]
    fn test_parse_list_rejects_wrong_shapes() {
        let issue = parse_list(&head_value(r#"head = "favicon.ico""#)).unwrap_err();
        assert_eq!(issue.index, None);
        assert!(issue.message.contains("string"));

        let issue =
            parse_list(&head_value(r#"head = [["link", { rel = "icon", href = "/a" }], "meta"]"#))
                .unwrap_err();
        assert_eq!(issue.index, Some(1));

        let issue = parse_list(&head_value(r#"head = [["link"]]"#)).unwrap_err();
        assert_eq!(issue.index, Some(0));
    }

    #[test]
    fn test_check_shape_warns_once() {
        let mut diag = ConfigDiagnostics::new();
        check_shape(&head_value("head = 3"), &mut diag);
        assert!(!diag.has_errors());
        assert_eq!(diag.warnings().len(), 1);
        assert_eq!(diag.warnings()[0].location(), "head");

        let mut diag = ConfigDiagnostics::new();
        check_shape(&head_value("head = []"), &mut diag);
        assert!(diag.warnings().is_empty());
    }

    #[test]
    fn test_validate_rules() {
        let head = vec![
            HeadTag::new("link").attr("rel", "icon").attr("href", "/favicon.ico"),
            HeadTag::new("link").attr("rel", "stylesheet"),
            HeadTag::new("meta").attr("name", "theme-color").attr("content", "#fff"),
            HeadTag::new("meta").attr("content", "orphan"),
            HeadTag::new("script").attr("src", "/app.js"),
            HeadTag::new("script").flag("defer", true),
            HeadTag::new("style").content("  "),
            HeadTag::new("blink"),
            HeadTag::new("noscript"),
        ];
        let mut diag = ConfigDiagnostics::new();
        validate(&head, &mut diag);

        let flagged: Vec<Option<usize>> = diag.errors().iter().map(|e| e.index).collect();
        assert_eq!(flagged, [Some(1), Some(3), Some(5), Some(6), Some(7)]);
        assert!(diag.errors()[0].message.contains("href"));
        assert!(diag.errors()[4].message.contains("<blink>"));
        assert!(diag.errors()[4].hint.as_deref().unwrap().contains("link"));
    }

    #[test]
    fn test_to_html() {
        let link = HeadTag::new("link")
            .attr("rel", "shortcut icon")
            .attr("href", "/favicon.ico");
        assert_eq!(
            link.to_html(),
            r#"<link href="/favicon.ico" rel="shortcut icon">"#
        );

        let script = HeadTag::new("script")
            .attr("src", "/a.js?x=1&y=2")
            .flag("async", false)
            .flag("defer", true);
        assert_eq!(
            script.to_html(),
            r#"<script defer src="/a.js?x=1&amp;y=2"></script>"#
        );

        let style = HeadTag::new("style").content("p { color: red }");
        assert_eq!(style.to_html(), "<style>p { color: red }</style>");
    }
}
