use rand::RngCore;
use rand::seq::IndexedRandom;

use crate::EditStrategy;
use crate::core::engine::traits::EditContext;
use crate::core::engine::utils::tail_contains;

/// Marker comments after rule boundaries in stylesheets
pub struct StylesheetStrategy;

impl StylesheetStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StylesheetStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl EditStrategy for StylesheetStrategy {
    fn name(&self) -> &'static str {
        "stylesheet"
    }

    fn extensions(&self) -> &[&'static str] {
        &["css", "scss", "sass", "less"]
    }

    fn edit(&self, text: &str, ctx: &EditContext, rng: &mut dyn RngCore) -> Option<String> {
        let comment = format!("/* {}: style refresh */", ctx.tag);
        let marker = format!("{}:", ctx.tag);
        let mut lines: Vec<String> = text.split('\n').map(str::to_string).collect();

        // Rule boundaries whose neighborhood is still unmarked
        let candidates: Vec<usize> = lines
            .iter()
            .enumerate()
            .filter(|(_, line)| line.trim() == "}")
            .map(|(i, _)| i)
            .filter(|&i| {
                let lo = i.saturating_sub(1);
                let hi = (i + 2).min(lines.len());
                !lines[lo..hi].iter().any(|line| line.contains(&marker))
            })
            .collect();

        if let Some(&i) = candidates.choose(rng) {
            lines.insert(i + 1, comment);
            return Some(lines.join("\n"));
        }

        if !tail_contains(text, &comment, 500) {
            lines.push(String::new());
            lines.push(comment);
            return Some(lines.join("\n"));
        }

        let normalized = format!("{}\n", text.trim_end());
        (normalized != text).then_some(normalized)
    }
}
