use chrono::NaiveDateTime;
use similar::{ChangeTag, TextDiff};

/// Leading whitespace of a line
pub fn indent_of(line: &str) -> String {
    line.chars().take_while(|c| c.is_whitespace()).collect()
}

/// Line-comment token for a file extension
pub fn comment_token(extension: &str) -> &'static str {
    match extension {
        "rs" | "js" | "ts" | "jsx" | "tsx" | "c" | "h" | "cc" | "cpp" | "hpp" | "java" | "go"
        | "swift" | "kt" | "scala" | "cs" => "//",
        _ => "#",
    }
}

/// Whether a line is itself a comment in any of the supported syntaxes
pub fn is_comment_line(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with('#')
        || trimmed.starts_with("//")
        || trimmed.starts_with("/*")
        || trimmed.starts_with('*')
        || trimmed.starts_with("<!--")
}

/// Check the last `window` bytes of `text` for `needle`
pub fn tail_contains(text: &str, needle: &str, window: usize) -> bool {
    let mut start = text.len().saturating_sub(window);
    while start < text.len() && !text.is_char_boundary(start) {
        start += 1;
    }
    text[start..].contains(needle)
}

/// Check the first `window` bytes of `text` for `needle`
pub fn head_contains(text: &str, needle: &str, window: usize) -> bool {
    let mut end = window.min(text.len());
    while end > 0 && !text.is_char_boundary(end) {
        end -= 1;
    }
    text[..end].contains(needle)
}

/// Timestamped end-of-file marker in the comment syntax of `extension`
pub fn marker_line(extension: &str, tag: &str, now: &NaiveDateTime) -> String {
    let stamp = now.format("%Y%m%d%H%M%S");
    match extension {
        "md" | "markdown" | "html" | "htm" => format!("<!-- {tag}: update - {stamp} -->"),
        "css" | "scss" | "sass" | "less" => format!("/* {tag}: update - {stamp} */"),
        ext => format!("{} {tag}: update - {stamp}", comment_token(ext)),
    }
}

/// Number of inserted/removed lines between two texts, for debug logs
pub fn changed_lines(old: &str, new: &str) -> usize {
    TextDiff::from_lines(old, new)
        .iter_all_changes()
        .filter(|change| change.tag() != ChangeTag::Equal)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tail_and_head_windows_respect_char_boundaries() {
        let text = "héllo wörld";
        assert!(tail_contains(text, "wörld", 7));
        assert!(!tail_contains(text, "héllo", 6));
        assert!(head_contains(text, "héllo", 7));
    }

    #[test]
    fn comment_tokens_by_extension() {
        assert_eq!(comment_token("rs"), "//");
        assert_eq!(comment_token("py"), "#");
        assert_eq!(comment_token("txt"), "#");
    }

    #[test]
    fn changed_lines_counts_both_sides() {
        assert_eq!(changed_lines("a\nb\n", "a\nc\n"), 2);
        assert_eq!(changed_lines("a\n", "a\n"), 0);
    }
}
