// src/utils/html.rs

use std::sync::LazyLock;

use regex::Regex;

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").unwrap());
static BREAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").unwrap());
static SPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t\x{a0}]+").unwrap());

/// Renders a server-provided HTML fragment as plain terminal text.
///
/// Cloze sentences may arrive with inline markup around the blank, e.g.
/// `The <b>_____</b> storm`. Tags are dropped (line breaks kept), HTML
/// entities decoded (named and numeric), and runs of spaces collapsed.
pub fn to_plain_text(fragment: &str) -> String {
    let text = BREAK.replace_all(fragment, "\n");
    let text = TAG.replace_all(&text, "");
    let text = html_escape::decode_html_entities(&text);
    SPACE.replace_all(text.trim(), " ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_inline_markup() {
        assert_eq!(
            to_plain_text("The <b>_____</b> storm passed &amp; left."),
            "The _____ storm passed & left."
        );
    }

    #[test]
    fn keeps_line_breaks() {
        assert_eq!(to_plain_text("one<br>two<BR/>three"), "one\ntwo\nthree");
    }

    #[test]
    fn plain_text_is_unchanged() {
        assert_eq!(to_plain_text("ephemeral"), "ephemeral");
    }

    #[test]
    fn decodes_numeric_and_named_entities() {
        assert_eq!(
            to_plain_text("It&#8217;s brief &mdash; very&#x21;"),
            "It\u{2019}s brief \u{2014} very!"
        );
    }

    #[test]
    fn non_breaking_spaces_collapse() {
        assert_eq!(to_plain_text("a&nbsp;&nbsp;b"), "a b");
    }

    #[test]
    fn escaped_tags_stay_literal() {
        assert_eq!(to_plain_text("a &lt;b&gt; c"), "a <b> c");
    }
}
