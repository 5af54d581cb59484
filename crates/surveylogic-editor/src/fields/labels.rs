//! Label cleanup

use once_cell::sync::Lazy;
use regex::Regex;

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

const ENTITIES: [(&str, &str); 6] = [
    ("&nbsp;", " "),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&amp;", "&"),
];

/// Remove markup from a rich-text label and collapse whitespace
pub fn strip_markup(label: &str) -> String {
    let mut text = TAG.replace_all(label, "").into_owned();
    for (entity, replacement) in ENTITIES {
        text = text.replace(entity, replacement);
    }
    WHITESPACE.replace_all(text.trim(), " ").into_owned()
}

/// Prefix a label with its position, e.g. `numbered("1.2", "Age")` -> `"1.2. Age"`
pub fn numbered(position: &str, label: &str) -> String {
    if label.is_empty() {
        format!("{}.", position)
    } else {
        format!("{}. {}", position, label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_markup() {
        assert_eq!(strip_markup("<p>How <b>old</b> are you?</p>"), "How old are you?");
        assert_eq!(strip_markup("Tom&nbsp;&amp;&nbsp;Jerry"), "Tom & Jerry");
        assert_eq!(strip_markup("a&lt;b&gt;"), "a<b>");
        assert_eq!(strip_markup("  line\n\nbreak  "), "line break");
        assert_eq!(strip_markup(""), "");
    }

    #[test]
    fn test_inline_markup_keeps_words_whole() {
        assert_eq!(strip_markup("<b>R</b>ed"), "Red");
        assert_eq!(strip_markup("<p>Line one</p>\n<p>Line two</p>"), "Line one Line two");
    }

    #[test]
    fn test_escaped_markup_is_not_stripped() {
        assert_eq!(strip_markup("&lt;b&gt;bold&lt;/b&gt;"), "<b>bold</b>");
    }

    #[test]
    fn test_numbered() {
        assert_eq!(numbered("1.2", "Age"), "1.2. Age");
        assert_eq!(numbered("3", ""), "3.");
    }
}
