/// Neutralizes the characters that can open a tag, an entity, or break out
/// of a quoted attribute value.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

pub fn escape_html_opt(text: Option<&str>) -> String {
    match text {
        Some(text) if !text.is_empty() => escape_html(text),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_tags_are_inert() {
        let out = escape_html("<script>alert(1)</script>");
        assert_eq!(out, "&lt;script&gt;alert(1)&lt;/script&gt;");
        assert!(!out.contains('<'));
        assert!(!out.contains('>'));
    }

    #[test]
    fn attribute_breakout_is_blocked() {
        let out = escape_html(r#"" onmouseover='x'"#);
        assert!(!out.contains('"'));
        assert!(!out.contains('\''));
    }

    #[test]
    fn ampersands_escape_first_pass_only() {
        assert_eq!(escape_html("a & b &lt;"), "a &amp; b &amp;lt;");
    }

    #[test]
    fn missing_text_is_empty() {
        assert_eq!(escape_html_opt(None), "");
        assert_eq!(escape_html_opt(Some("")), "");
        assert_eq!(escape_html_opt(Some("김철수")), "김철수");
    }
}
