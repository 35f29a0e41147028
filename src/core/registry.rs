use std::fs;
use std::path::Path;

use chrono::{Local, NaiveDateTime};
use log::{debug, warn};
use rand::RngCore;

use crate::EditStrategy;
use crate::core::engine::traits::EditContext;
use crate::core::engine::utils::{changed_lines, marker_line, tail_contains};

/// Registry for managing available edit strategies
pub struct StrategyRegistry {
    strategies: Vec<Box<dyn EditStrategy>>,
    fallback: Box<dyn EditStrategy>,
}

impl StrategyRegistry {
    /// `fallback` handles every extension no registered strategy claims
    pub fn new(fallback: Box<dyn EditStrategy>) -> Self {
        Self {
            strategies: Vec::new(),
            fallback,
        }
    }

    /// Register an edit strategy
    pub fn register<T: EditStrategy + 'static>(&mut self, strategy: T) {
        self.strategies.push(Box::new(strategy));
    }

    /// Determine the strategy for a file path
    pub fn strategy_for_path(&self, path: &Path) -> &dyn EditStrategy {
        let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");

        self.strategies
            .iter()
            .find(|strategy| {
                strategy
                    .extensions()
                    .iter()
                    .any(|ext| ext.eq_ignore_ascii_case(extension))
            })
            .map(|strategy| strategy.as_ref())
            .unwrap_or(self.fallback.as_ref())
    }

    /// Apply one cosmetic edit to `path` and write it back.
    /// Returns true only when the file content actually changed;
    /// missing files and no-op edits report false without error.
    pub fn apply_edit(&self, path: &Path, tag: &str, rng: &mut dyn RngCore) -> bool {
        self.apply_edit_at(path, tag, Local::now().naive_local(), rng)
    }

    /// Like `apply_edit` with an explicit clock, for deterministic tests
    pub fn apply_edit_at(
        &self,
        path: &Path,
        tag: &str,
        now: NaiveDateTime,
        rng: &mut dyn RngCore,
    ) -> bool {
        if !path.exists() {
            return false;
        }
        let original = match fs::read(path) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(err) => {
                warn!("failed to read {}: {err}", path.display());
                return false;
            }
        };
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_default();
        let ctx = EditContext {
            tag,
            extension: &extension,
            now,
        };

        let strategy = self.strategy_for_path(path);
        let edited = strategy
            .edit(&original, &ctx, rng)
            .or_else(|| append_marker(&original, &ctx));
        let Some(edited) = edited else {
            debug!("{}: no applicable edit for {}", strategy.name(), path.display());
            return false;
        };
        // A byte-identical result would commit an empty diff
        if edited == original {
            return false;
        }
        if let Err(err) = fs::write(path, &edited) {
            warn!("failed to write {}: {err}", path.display());
            return false;
        }
        debug!(
            "{}: changed {} line(s) in {}",
            strategy.name(),
            changed_lines(&original, &edited),
            path.display()
        );
        true
    }
}

/// Degenerate fallback: a timestamped marker line at end of file,
/// skipped when the identical marker is already in the tail
fn append_marker(text: &str, ctx: &EditContext) -> Option<String> {
    let marker = marker_line(ctx.extension, ctx.tag, &ctx.now);
    if tail_contains(text, &marker, 500) {
        return None;
    }
    Some(format!("{}\n{marker}\n", text.trim_end()))
}
