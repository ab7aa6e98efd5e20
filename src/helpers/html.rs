//! HTML helper functions

/// Generate a `<meta name=...>` tag
pub fn meta_name(name: &str, content: &str) -> String {
    format!(
        r#"<meta name="{}" content="{}">"#,
        html_escape(name),
        html_escape(content)
    )
}

/// Generate a `<meta property=...>` tag (Open Graph)
pub fn meta_property(property: &str, content: &str) -> String {
    format!(
        r#"<meta property="{}" content="{}">"#,
        html_escape(property),
        html_escape(content)
    )
}

/// Generate a canonical link tag
pub fn canonical_link(url: &str) -> String {
    format!(r#"<link rel="canonical" href="{}">"#, html_escape(url))
}

/// Generate meta generator tag
pub fn meta_generator() -> String {
    meta_name(
        "generator",
        &format!("secondlook-site {}", env!("CARGO_PKG_VERSION")),
    )
}

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Undo the entity escapes the markdown renderer emits for text
pub fn html_unescape(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&amp;", "&")
}

/// Strip HTML tags from a string
pub fn strip_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut in_tag = false;

    for c in s.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meta_tags_escape_content() {
        assert_eq!(
            meta_name("description", r#"Say "hi" <now>"#),
            r#"<meta name="description" content="Say &quot;hi&quot; &lt;now&gt;">"#
        );
        assert_eq!(
            meta_property("og:type", "article"),
            r#"<meta property="og:type" content="article">"#
        );
        assert!(canonical_link("https://a.io/x?y=1&z=2").contains("&amp;z=2"));
    }

    #[test]
    fn test_strip_html() {
        assert_eq!(strip_html("<p>Hello <b>World</b></p>"), "Hello World");
    }

    #[test]
    fn test_unescape_round_trip() {
        let text = r#"Tom & "Jerry" <3 it's"#;
        assert_eq!(html_unescape(&html_escape(text)), text);
    }
}
