use std::sync::OnceLock;

use rand::RngCore;
use rand::seq::{IndexedRandom, SliceRandom};
use regex::Regex;

use crate::EditStrategy;
use crate::core::engine::traits::EditContext;
use crate::core::engine::utils::{comment_token, indent_of, is_comment_line};

/// Matches a function signature and captures (indent, name).
/// Covers `fn`, `def` and `function` declarations.
fn signature_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(\s*)(?:pub(?:\([^)]*\))?\s+)?(?:async\s+)?(?:fn|def|function)\s+([A-Za-z_][A-Za-z0-9_]*)")
            .expect("valid regex")
    })
}

fn control_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*(?:if|for|while|match|switch)\b").expect("valid regex"))
}

fn import_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*(?:use\s|import\s|from\s+\S+\s+import|#include\s|require\()")
            .expect("valid regex")
    })
}

type Heuristic = fn(&mut Vec<String>, &EditContext, &mut dyn RngCore) -> bool;

/// Generic source-text strategy and registry default: tries its insertion
/// heuristics in random order and stops at the first that lands.
pub struct SourceStrategy;

impl SourceStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SourceStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl EditStrategy for SourceStrategy {
    fn name(&self) -> &'static str {
        "source"
    }

    fn extensions(&self) -> &[&'static str] {
        &[
            "py", "rs", "js", "ts", "jsx", "tsx", "java", "go", "c", "h", "cpp", "hpp", "rb", "sh",
        ]
    }

    fn edit(&self, text: &str, ctx: &EditContext, rng: &mut dyn RngCore) -> Option<String> {
        let mut lines: Vec<String> = text.split('\n').map(str::to_string).collect();

        let mut heuristics: Vec<Heuristic> = vec![
            guard_comment,
            doc_comment,
            log_statement,
            validation_marker,
            signature_annotation,
            import_comment,
        ];
        heuristics.shuffle(rng);

        for heuristic in heuristics {
            if heuristic(&mut lines, ctx, rng) {
                let edited = lines.join("\n");
                return (edited != text).then_some(edited);
            }
        }
        None
    }
}

/// Explanatory comment above the first unmarked control statement
fn guard_comment(lines: &mut Vec<String>, ctx: &EditContext, rng: &mut dyn RngCore) -> bool {
    let token = comment_token(ctx.extension);
    let marker = format!("{}:", ctx.tag);
    let flavors = [
        "performance tuning",
        "error handling improvement",
        "validation logic",
        "boundary review",
    ];

    for i in 0..lines.len() {
        if !control_re().is_match(&lines[i]) || is_comment_line(&lines[i]) {
            continue;
        }
        let lo = i.saturating_sub(2);
        let hi = (i + 2).min(lines.len());
        if lines[lo..hi].iter().any(|line| line.contains(&marker)) {
            continue;
        }
        let indent = indent_of(&lines[i]);
        let flavor = flavors.choose(rng).copied().unwrap_or(flavors[0]);
        lines.insert(i, format!("{indent}{token} {}: {flavor}", ctx.tag));
        return true;
    }
    false
}

/// Doc line on the first function that has none: a docstring below the
/// signature for Python, a doc comment above it elsewhere
fn doc_comment(lines: &mut Vec<String>, ctx: &EditContext, _rng: &mut dyn RngCore) -> bool {
    let marker = format!("{}:", ctx.tag);

    for i in 0..lines.len() {
        if is_comment_line(&lines[i]) {
            continue;
        }
        let Some(caps) = signature_re().captures(&lines[i]) else {
            continue;
        };
        let indent = caps.get(1).map(|m| m.as_str().to_string()).unwrap_or_default();
        let name = caps.get(2).map(|m| m.as_str().to_string()).unwrap_or_default();

        if ctx.extension == "py" {
            let next = lines
                .get(i + 1)
                .map(|line| line.trim().to_string())
                .unwrap_or_default();
            if next.starts_with("\"\"\"") || next.starts_with("'''") || next.contains(&marker) {
                continue;
            }
            lines.insert(
                i + 1,
                format!("{indent}    \"\"\"{}: {name} handler.\"\"\"", ctx.tag),
            );
        } else {
            if i > 0 && (lines[i - 1].contains(&marker) || is_comment_line(&lines[i - 1])) {
                continue;
            }
            let doc_token = if ctx.extension == "rs" { "///" } else { "//" };
            lines.insert(i, format!("{indent}{doc_token} {}: {name} entry point", ctx.tag));
        }
        return true;
    }
    false
}

/// Debug-log call right below a function signature, in the idiom of the
/// file's language; inapplicable extensions bow out
fn log_statement(lines: &mut Vec<String>, ctx: &EditContext, _rng: &mut dyn RngCore) -> bool {
    for i in 0..lines.len() {
        if is_comment_line(&lines[i]) {
            continue;
        }
        let Some(caps) = signature_re().captures(&lines[i]) else {
            continue;
        };
        let indent = caps.get(1).map(|m| m.as_str().to_string()).unwrap_or_default();
        let name = caps.get(2).map(|m| m.as_str().to_string()).unwrap_or_default();

        let window = lines[(i + 1)..(i + 4).min(lines.len())].join(" ");
        if window.contains("logger.") || window.contains("console.") || window.contains("log::") {
            continue;
        }
        let statement = match ctx.extension {
            "py" => format!("{indent}    logger.debug('{}: {name} called')", ctx.tag),
            "js" | "ts" | "jsx" | "tsx" => {
                format!("{indent}    console.debug('{}: {name} called');", ctx.tag)
            }
            "rs" => format!("{indent}    log::debug!(\"{}: {name} called\");", ctx.tag),
            _ => return false,
        };
        lines.insert(i + 1, statement);
        return true;
    }
    false
}

/// Input-validation comment before the first real statement of a function
fn validation_marker(lines: &mut Vec<String>, ctx: &EditContext, _rng: &mut dyn RngCore) -> bool {
    let token = comment_token(ctx.extension);
    let marker = format!("{}:", ctx.tag);

    for i in 0..lines.len() {
        if is_comment_line(&lines[i]) {
            continue;
        }
        let Some(caps) = signature_re().captures(&lines[i]) else {
            continue;
        };
        let indent = caps.get(1).map(|m| m.as_str().to_string()).unwrap_or_default();

        let hi = (i + 5).min(lines.len());
        if lines[(i + 1)..hi].iter().any(|line| line.contains(&marker)) {
            continue;
        }
        for j in (i + 1)..hi {
            if !lines[j].trim().is_empty() && !is_comment_line(&lines[j]) {
                lines.insert(j, format!("{indent}    {token} {}: input validation", ctx.tag));
                return true;
            }
        }
    }
    false
}

/// Trivial `-> None` return annotation on unannotated Python signatures
fn signature_annotation(lines: &mut Vec<String>, ctx: &EditContext, _rng: &mut dyn RngCore) -> bool {
    if ctx.extension != "py" {
        return false;
    }
    for i in 0..lines.len() {
        if !lines[i].contains("def ") || lines[i].contains("->") || is_comment_line(&lines[i]) {
            continue;
        }
        let trimmed = lines[i].trim_end();
        if !trimmed.ends_with("):") {
            continue;
        }
        let Some(head) = trimmed.strip_suffix(':') else {
            continue;
        };
        let annotated = format!("{head} -> None:");
        lines[i] = annotated;
        return true;
    }
    false
}

/// Housekeeping comment after an import near the top of the file
fn import_comment(lines: &mut Vec<String>, ctx: &EditContext, _rng: &mut dyn RngCore) -> bool {
    let token = comment_token(ctx.extension);
    let marker = format!("{}:", ctx.tag);

    for i in 0..lines.len().min(30) {
        if !import_re().is_match(&lines[i]) || i + 1 >= lines.len() {
            continue;
        }
        if lines[i + 1].trim().is_empty() || lines[i + 1].contains(&marker) {
            continue;
        }
        lines.insert(i + 1, format!("{token} {}: import housekeeping", ctx.tag));
        return true;
    }
    false
}
