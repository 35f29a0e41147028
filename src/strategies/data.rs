use rand::RngCore;

use crate::EditStrategy;
use crate::core::engine::traits::EditContext;
use crate::core::engine::utils::head_contains;

/// Structured-data strategy: JSON objects gain a non-functional metadata
/// key and come back pretty-printed; TOML gets a head comment. Files that
/// fail to parse fall through to the registry's plain-text marker.
pub struct DataStrategy;

impl DataStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DataStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl EditStrategy for DataStrategy {
    fn name(&self) -> &'static str {
        "data"
    }

    fn extensions(&self) -> &[&'static str] {
        &["json", "toml"]
    }

    fn edit(&self, text: &str, ctx: &EditContext, _rng: &mut dyn RngCore) -> Option<String> {
        match ctx.extension {
            "json" => edit_json(text, ctx),
            _ => edit_toml(text, ctx),
        }
    }
}

fn edit_json(text: &str, ctx: &EditContext) -> Option<String> {
    let mut value: serde_json::Value = serde_json::from_str(text).ok()?;
    if let serde_json::Value::Object(map) = &mut value {
        let key = format!("x-{}-revision", slugify(ctx.tag));
        map.insert(
            key,
            serde_json::Value::String(ctx.now.format("%Y%m%d%H%M%S").to_string()),
        );
    }
    let mut rendered = serde_json::to_string_pretty(&value).ok()?;
    rendered.push('\n');
    (rendered != text).then_some(rendered)
}

fn edit_toml(text: &str, ctx: &EditContext) -> Option<String> {
    // Validate before touching; broken TOML takes the marker fallback
    text.parse::<toml::Value>().ok()?;

    let marker = format!("{}:", ctx.tag);
    if !head_contains(text, &marker, 200) {
        return Some(format!("# {}: configuration refresh\n{text}", ctx.tag));
    }
    let normalized = format!("{}\n", text.trim_end());
    (normalized != text).then_some(normalized)
}

fn slugify(tag: &str) -> String {
    tag.to_ascii_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect()
}
