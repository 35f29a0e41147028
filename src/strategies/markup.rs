use rand::RngCore;

use crate::EditStrategy;
use crate::core::engine::traits::EditContext;
use crate::core::engine::utils::tail_contains;

/// Marker comments near structural anchors in markdown and HTML:
/// after the last heading, or just before the closing body tag
pub struct MarkupStrategy;

impl MarkupStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MarkupStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl EditStrategy for MarkupStrategy {
    fn name(&self) -> &'static str {
        "markup"
    }

    fn extensions(&self) -> &[&'static str] {
        &["md", "markdown", "html", "htm"]
    }

    fn edit(&self, text: &str, ctx: &EditContext, _rng: &mut dyn RngCore) -> Option<String> {
        let comment = format!("<!-- {}: documentation update -->", ctx.tag);
        let marker = format!("{}:", ctx.tag);
        let mut lines: Vec<String> = text.split('\n').map(str::to_string).collect();

        let is_html = matches!(ctx.extension, "html" | "htm");
        let anchor = if is_html {
            lines
                .iter()
                .position(|line| line.trim_start().to_ascii_lowercase().starts_with("</body"))
        } else {
            lines
                .iter()
                .rposition(|line| line.trim_start().starts_with('#'))
        };

        if let Some(i) = anchor {
            let lo = i.saturating_sub(2);
            let hi = (i + 3).min(lines.len());
            if !lines[lo..hi].iter().any(|line| line.contains(&marker)) {
                if is_html {
                    lines.insert(i, comment);
                } else {
                    lines.insert(i + 1, comment);
                }
                return Some(lines.join("\n"));
            }
        }

        // No usable anchor: append at end of file, once
        if !tail_contains(text, &comment, 500) {
            lines.push(String::new());
            lines.push(comment);
            return Some(lines.join("\n"));
        }

        // Already marked everywhere: normalizing trailing whitespace is the
        // only edit left
        let normalized = format!("{}\n", text.trim_end());
        (normalized != text).then_some(normalized)
    }
}
