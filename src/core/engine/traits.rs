use chrono::NaiveDateTime;
use rand::RngCore;

/// Per-edit context handed to strategies
pub struct EditContext<'a> {
    /// Marker label woven into inserted comments
    pub tag: &'a str,
    /// Lowercased file extension, empty when the path has none
    pub extension: &'a str,
    /// Wall-clock time, used for timestamped fallback markers
    pub now: NaiveDateTime,
}

/// Core trait that per-filetype edit strategies must provide
pub trait EditStrategy: Send + Sync {
    /// Strategy name (e.g., "source", "markup")
    fn name(&self) -> &'static str;

    /// File extensions this strategy handles (e.g., ["css", "scss"])
    fn extensions(&self) -> &[&'static str];

    /// Produce an edited copy of `text`, or None when no insertion point
    /// was found. Returning the input unchanged counts as no edit.
    fn edit(&self, text: &str, ctx: &EditContext, rng: &mut dyn RngCore) -> Option<String>;
}
