//! Available content pages.
//!
//! The set of routes a sidebar may point at. Built either from a literal
//! list or by scanning a Markdown content directory:
//!
//! ```text
//! content/
//! ├── README.md            → /
//! ├── getting-setup.md     → /getting-setup
//! └── guide/
//!     ├── README.md        → /guide/
//!     └── intro.md         → /guide/intro
//! ```

use crate::utils::decode_route;
use jwalk::WalkDir;
use rustc_hash::FxHashSet;
use std::io;
use std::path::{Component, Path};

/// File stems that stand for their directory.
const INDEX_STEMS: &[&str] = &["README", "index"];

/// Page file extensions stripped from routes.
const PAGE_EXTENSIONS: &[&str] = &[".md", ".html"];

/// Directories never scanned for pages.
const IGNORED_DIRS: &[&str] = &["node_modules"];

/// Reduce a route to the form used for comparison.
///
/// Percent-decodes, then strips a page extension, an index file name
/// and a trailing `/` (except for the root).
///
/// # Examples
/// ```ignore
/// route_key("/")                 -> "/"
/// route_key("/a/")               -> "/a"
/// route_key("/a.html")           -> "/a"
/// route_key("/guide/README.md")  -> "/guide"
/// route_key("/index.html")       -> "/"
/// route_key("/caf%C3%A9")        -> "/café"
/// ```
pub fn route_key(route: &str) -> String {
    let decoded = decode_route(route);
    let mut key: &str = &decoded;
    for ext in PAGE_EXTENSIONS {
        if let Some(stripped) = key.strip_suffix(ext) {
            key = stripped;
            break;
        }
    }

    if let Some((dir, last)) = key.rsplit_once('/')
        && INDEX_STEMS.contains(&last)
    {
        key = &key[..dir.len() + 1];
    }

    let trimmed = key.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}

/// An ordered set of page routes.
#[derive(Debug, Clone, Default)]
pub struct ContentPages {
    routes: Vec<String>,
    keys: FxHashSet<String>,
}

impl ContentPages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from literal routes, keeping the first spelling of each page.
    pub fn from_routes<I, S>(routes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut pages = Self::new();
        for route in routes {
            pages.insert(route);
        }
        pages
    }

    /// Scan `dir` for Markdown pages.
    ///
    /// Hidden entries and `node_modules` are skipped. Routes come out sorted.
    pub fn scan(dir: &Path) -> io::Result<Self> {
        if !dir.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("content directory '{}' not found", dir.display()),
            ));
        }

        let mut routes: Vec<String> = WalkDir::new(dir)
            .skip_hidden(true)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_file())
            .filter_map(|e| {
                let path = e.path();
                let relative = path.strip_prefix(dir).ok()?;
                page_route(relative)
            })
            .collect();
        routes.sort();

        crate::debug!("pages"; "found {} page(s) in {}", routes.len(), dir.display());
        Ok(Self::from_routes(routes))
    }

    /// Add a route. Returns `false` if an equivalent route was already present.
    pub fn insert(&mut self, route: impl Into<String>) -> bool {
        let route = route.into();
        if self.keys.insert(route_key(&route)) {
            self.routes.push(route);
            true
        } else {
            false
        }
    }

    /// Whether some page matches `route` (compared by [`route_key`]).
    pub fn contains(&self, route: &str) -> bool {
        self.keys.contains(&route_key(route))
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.routes.iter().map(String::as_str)
    }
}

/// Route of a Markdown file given its path relative to the content root.
fn page_route(relative: &Path) -> Option<String> {
    if relative.extension()? != "md" {
        return None;
    }

    let mut segments = Vec::new();
    for component in relative.parent()?.components() {
        let Component::Normal(name) = component else {
            return None;
        };
        let name = name.to_str()?;
        if IGNORED_DIRS.contains(&name) {
            return None;
        }
        segments.push(name);
    }

    let stem = relative.file_stem()?.to_str()?;
    let mut route = String::from("/");
    for segment in &segments {
        route.push_str(segment);
        route.push('/');
    }
    if !INDEX_STEMS.contains(&stem) {
        route.push_str(stem);
    }
    Some(route)
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_route_key() {
        assert_eq!(route_key("/"), "/");
        assert_eq!(route_key("/a"), "/a");
        assert_eq!(route_key("/a/"), "/a");
        assert_eq!(route_key("/a.html"), "/a");
        assert_eq!(route_key("/a.md"), "/a");
        assert_eq!(route_key("/guide/README.md"), "/guide");
        assert_eq!(route_key("/guide/index.html"), "/guide");
        assert_eq!(route_key("/index.html"), "/");
        assert_eq!(route_key("/README"), "/");
        // Only a whole segment counts as an index name
        assert_eq!(route_key("/my-index"), "/my-index");
    }

    #[test]
    fn test_route_key_decodes() {
        assert_eq!(route_key("/caf%C3%A9/"), "/café");
        assert_eq!(route_key("/%E6%97%A5%E6%9C%AC%E8%AA%9E"), route_key("/日本語"));
        assert_eq!(route_key("/guide/%52EADME.md"), "/guide");
    }

    #[test]
    fn test_page_route() {
        assert_eq!(page_route(Path::new("README.md")), Some("/".into()));
        assert_eq!(page_route(Path::new("index.md")), Some("/".into()));
        assert_eq!(
            page_route(Path::new("getting-setup.md")),
            Some("/getting-setup".into())
        );
        assert_eq!(
            page_route(Path::new("guide/README.md")),
            Some("/guide/".into())
        );
        assert_eq!(
            page_route(Path::new("guide/intro.md")),
            Some("/guide/intro".into())
        );
        assert_eq!(page_route(Path::new("favicon.ico")), None);
        assert_eq!(page_route(Path::new("node_modules/pkg/README.md")), None);
    }

    #[test]
    fn test_from_routes_dedupes_equivalent() {
        let mut pages = ContentPages::from_routes(["/", "/a", "/a/", "/index.html"]);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages.iter().collect::<Vec<_>>(), ["/", "/a"]);
        assert!(pages.contains("/a.html"));
        assert!(!pages.contains("/b"));
        assert!(pages.insert("/b"));
        assert!(!pages.insert("/b/"));
    }

    #[test]
    fn test_scan_content_dir() {
        let dir = tempfile::Builder::new().prefix("content").tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("guide")).unwrap();
        fs::create_dir_all(root.join(".vuepress")).unwrap();
        fs::create_dir_all(root.join("node_modules/pkg")).unwrap();
        fs::write(root.join("README.md"), "# Home").unwrap();
        fs::write(root.join("getting-setup.md"), "# Setup").unwrap();
        fs::write(root.join("guide/README.md"), "# Guide").unwrap();
        fs::write(root.join("guide/intro.md"), "# Intro").unwrap();
        fs::write(root.join("favicon.ico"), "").unwrap();
        fs::write(root.join(".vuepress/notes.md"), "").unwrap();
        fs::write(root.join("node_modules/pkg/README.md"), "").unwrap();

        let pages = ContentPages::scan(root).unwrap();
        assert_eq!(
            pages.iter().collect::<Vec<_>>(),
            ["/", "/getting-setup", "/guide/", "/guide/intro"]
        );
    }

    #[test]
    fn test_scan_non_ascii_names() {
        let dir = tempfile::Builder::new().prefix("content").tempdir().unwrap();
        fs::write(dir.path().join("日本語.md"), "# 日本語").unwrap();

        let pages = ContentPages::scan(dir.path()).unwrap();
        assert_eq!(pages.iter().collect::<Vec<_>>(), ["/日本語"]);
        assert!(pages.contains("/日本語"));
        assert!(pages.contains("/%E6%97%A5%E6%9C%AC%E8%AA%9E"));
    }

    #[test]
    fn test_scan_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let err = ContentPages::scan(&dir.path().join("nope")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
