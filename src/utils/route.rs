//! Route string helpers.

use percent_encoding::percent_decode_str;
use std::borrow::Cow;

/// Percent-decode a route for comparison.
///
/// Falls back to the input when the decoded bytes are not UTF-8.
///
/// # Examples
/// ```ignore
/// decode_route("/caf%C3%A9")  -> "/café"
/// decode_route("/日本語")       -> "/日本語"
/// decode_route("/50%")        -> "/50%"
/// ```
pub fn decode_route(route: &str) -> Cow<'_, str> {
    percent_decode_str(route)
        .decode_utf8()
        .unwrap_or(Cow::Borrowed(route))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_route() {
        assert_eq!(decode_route("/caf%C3%A9"), "/café");
        assert_eq!(decode_route("/%E6%97%A5%E6%9C%AC%E8%AA%9E"), "/日本語");
        assert_eq!(decode_route("/日本語"), "/日本語");
        assert_eq!(decode_route("/a%20b/"), "/a b/");
    }

    #[test]
    fn test_decode_route_keeps_invalid_input() {
        assert_eq!(decode_route("/50%"), "/50%");
        // %FF alone is not UTF-8
        assert_eq!(decode_route("/x%FF"), "/x%FF");
    }
}
