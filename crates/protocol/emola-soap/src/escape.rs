//! Escaping of untrusted text embedded in hand-built XML fragments.

use std::borrow::Cow;

/// Reserved characters and their replacements, in application order.
///
/// `&` comes first so the entities introduced by the later rules are not
/// escaped a second time.
const REPLACEMENTS: [(&str, &str); 5] = [
    ("&", "&amp;"),
    ("<", "&lt;"),
    (">", "&gt;"),
    ("\"", "&quot;"),
    ("'", "&#39;"),
];

/// Escape the five reserved XML characters in `input`.
///
/// The function is total: it never fails and has no notion of input that
/// was already escaped, so `&amp;` becomes `&amp;amp;`.
pub fn escape_xml(input: &str) -> String {
    REPLACEMENTS
        .iter()
        .fold(input.to_string(), |acc, (from, to)| acc.replace(from, to))
}

/// Replace characters that XML 1.0 does not allow with U+FFFD.
///
/// Allowed are tab, line feed, carriage return and everything from U+0020
/// except U+FFFE and U+FFFF. Input without such characters is borrowed.
pub fn replace_invalid_chars(input: &str) -> Cow<'_, str> {
    if input.chars().all(is_xml_char) {
        return Cow::Borrowed(input);
    }
    Cow::Owned(
        input
            .chars()
            .map(|c| if is_xml_char(c) { c } else { char::REPLACEMENT_CHARACTER })
            .collect(),
    )
}

fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r') || (c >= '\u{20}' && c != '\u{FFFE}' && c != '\u{FFFF}')
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Inverse of `escape_xml`, used to check round trips.
    fn unescape(input: &str) -> String {
        REPLACEMENTS
            .iter()
            .rev()
            .fold(input.to_string(), |acc, (from, to)| acc.replace(to, from))
    }

    #[test]
    fn test_escape_plain_text_unchanged() {
        assert_eq!(escape_xml("861234567"), "861234567");
        assert_eq!(escape_xml(""), "");
    }

    #[test]
    fn test_escape_all_reserved() {
        assert_eq!(
            escape_xml(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn test_escape_ampersand_first() {
        assert_eq!(escape_xml("&<"), "&amp;&lt;");
        assert_ne!(escape_xml("&<"), "&amp;amp;lt;");
    }

    #[test]
    fn test_escape_already_escaped_input() {
        assert_eq!(escape_xml("&amp;"), "&amp;amp;");
    }

    #[test]
    fn test_escape_output_has_no_reserved_chars() {
        let samples = [
            "<script>alert('x')</script>",
            "\"quoted\" & 'single'",
            ">>><<<&&&",
            "\u{0}\u{1f}binary\u{7f}garbage<",
            "Pagamento de 500 MT à loja",
        ];
        for sample in samples {
            let escaped = escape_xml(sample);
            assert!(!escaped.contains('<'), "{escaped}");
            assert!(!escaped.contains('>'), "{escaped}");
            assert!(!escaped.contains('"'), "{escaped}");
            assert!(!escaped.contains('\''), "{escaped}");
            // Every remaining ampersand starts one of the five entities.
            for (idx, _) in escaped.match_indices('&') {
                let rest = &escaped[idx..];
                assert!(
                    REPLACEMENTS.iter().any(|(_, to)| rest.starts_with(to)),
                    "{escaped}"
                );
            }
        }
    }

    #[test]
    fn test_escape_roundtrip() {
        let samples = ["&<", "a&b<c>d\"e'f", "&amp;lt;", "", "plain", "''\"\"&&"];
        for sample in samples {
            assert_eq!(unescape(&escape_xml(sample)), sample);
        }
    }

    #[test]
    fn test_replace_invalid_chars() {
        assert!(matches!(replace_invalid_chars("plain\ttext\r\n"), Cow::Borrowed(_)));
        assert_eq!(replace_invalid_chars("a\u{0}b\u{1f}c"), "a\u{FFFD}b\u{FFFD}c");
        assert_eq!(replace_invalid_chars("\u{FFFE}\u{FFFF}"), "\u{FFFD}\u{FFFD}");
        assert_eq!(replace_invalid_chars("\u{7f}à\u{10000}"), "\u{7f}à\u{10000}");
    }
}
