//! Plain-text helpers for rendering external content into Discord messages.

/// Removes markup tags and collapses runs of whitespace into single spaces.
///
/// Anything between `<` and the next `>` is dropped. A `<` without a closing `>` is
/// kept as literal text.
pub fn strip_markup(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find('<') {
        out.push_str(&rest[..start]);
        match rest[start..].find('>') {
            Some(end) => {
                out.push(' ');
                rest = &rest[start + end + 1..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);

    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Shortens `input` to at most `max_chars` characters, appending `...` when cut.
///
/// Counts characters rather than bytes so multi-byte text is never split mid-character.
pub fn truncate_chars(input: &str, max_chars: usize) -> String {
    if input.chars().count() <= max_chars {
        return input.to_string();
    }

    let cut: String = input.chars().take(max_chars).collect();
    format!("{}...", cut.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tags_and_whitespace() {
        assert_eq!(
            strip_markup("<p>Hello <b>world</b></p>\n\n  again"),
            "Hello world again"
        );
    }

    #[test]
    fn keeps_unclosed_angle_bracket() {
        assert_eq!(strip_markup("a < b"), "a < b");
    }

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(truncate_chars("short", 10), "short");
    }

    #[test]
    fn long_text_is_cut_on_char_boundary() {
        let text = "動画".repeat(10);
        let cut = truncate_chars(&text, 5);
        assert_eq!(cut, "動画動画動...");
    }
}
