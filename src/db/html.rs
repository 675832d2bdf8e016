//! Minimal HTML scraping shared by the database parsers.

use regex::Regex;
use std::sync::LazyLock;

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));

static HREF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<a\s+href\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s>]+))"#).expect("valid href regex")
});

/// Removes markup and decodes the few entities the servers emit.
pub fn strip_tags(raw: &str) -> String {
    let text = TAG.replace_all(raw, "");
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&amp;", "&")
}

/// Target of the first `<a href=...>` in `html`, quotes removed.
pub fn first_link(html: &str) -> Option<&str> {
    let caps = HREF.captures(html)?;
    caps.get(1)
        .or_else(|| caps.get(2))
        .or_else(|| caps.get(3))
        .map(|m| m.as_str())
}

/// Text between `<pre>` and `</pre>` (or the next `<p`, whichever comes first).
pub fn preformatted_block(html: &str) -> Option<&str> {
    let open = html.find("<pre>")? + "<pre>".len();
    let rest = &html[open..];
    let close = rest.find("</pre>").unwrap_or(rest.len());
    let para = rest.find("<p").unwrap_or(rest.len());
    Some(&rest[..close.min(para)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_markup_and_entities() {
        assert_eq!(strip_tags("<a href=\"x\">L7227</a>"), "L7227");
        assert_eq!(strip_tags("2S&lt;1/2&gt;"), "2S<1/2>");
        assert_eq!(strip_tags("<b>[98.936]</b>"), "[98.936]");
    }

    #[test]
    fn finds_links_in_any_quoting() {
        assert_eq!(first_link(r#"<a HREF="/tmp/xray1.dat">here</a>"#), Some("/tmp/xray1.dat"));
        assert_eq!(first_link("<A href='/tmp/x.dat'>"), Some("/tmp/x.dat"));
        assert_eq!(first_link("<a href=/tmp/y.dat>"), Some("/tmp/y.dat"));
        assert_eq!(first_link("no links"), None);
    }

    #[test]
    fn preformatted_block_stops_at_paragraph() {
        assert_eq!(preformatted_block("x<pre>a\nb</pre>y"), Some("a\nb"));
        assert_eq!(preformatted_block("<pre>a\n<p>tail"), Some("a\n"));
        assert_eq!(preformatted_block("<p>nothing</p>"), None);
    }
}
