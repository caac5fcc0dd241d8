//! Outbound input sanitization for user-editable text and URLs.

use std::sync::OnceLock;

use regex::Regex;

fn tag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"<[^>]*>").expect("static tag pattern"))
}

fn script_scheme_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)javascript:").expect("static scheme pattern"))
}

fn dangerous_url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)^(javascript|data|vbscript):").expect("static url pattern")
    })
}

/// Strips HTML tags and `javascript:` fragments, then trims surrounding whitespace.
pub fn sanitize_text(text: &str) -> String {
    let stripped = tag_pattern().replace_all(text, "");
    script_scheme_pattern()
        .replace_all(&stripped, "")
        .trim()
        .to_string()
}

/// Trims a URL and blanks it out when it uses a script-capable scheme.
pub fn sanitize_url(url: &str) -> String {
    let trimmed = url.trim();
    if dangerous_url_pattern().is_match(trimmed) {
        return String::new();
    }
    trimmed.to_string()
}

/// Sanitizes an optional text field, dropping it when nothing meaningful remains.
pub(crate) fn sanitize_optional_text(value: Option<&str>) -> Option<String> {
    value
        .filter(|value| !value.is_empty())
        .map(sanitize_text)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn strips_tags_and_script_scheme() {
        assert_eq!(
            sanitize_text("  <b>Ada</b> JavaScript:alert(1) "),
            "Ada alert(1)"
        );
    }

    #[test]
    fn plain_text_is_unchanged() {
        assert_eq!(sanitize_text("a@b.com"), "a@b.com");
    }

    #[test]
    fn rejects_script_capable_urls() {
        assert_eq!(sanitize_url("javascript:alert(1)"), "");
        assert_eq!(sanitize_url(" DATA:image/png;base64,AAAA"), "");
        assert_eq!(sanitize_url("vbscript:x"), "");
        assert_eq!(
            sanitize_url(" https://cdn.example.com/a.png "),
            "https://cdn.example.com/a.png"
        );
    }

    #[test]
    fn optional_text_drops_empty_values() {
        assert_eq!(sanitize_optional_text(Some("")), None);
        assert_eq!(sanitize_optional_text(None), None);
        assert_eq!(sanitize_optional_text(Some(" Bo ")), Some("Bo".to_string()));
    }
}
