use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::core::dates::{DatePlan, HourWindow, SubPeriod};
use crate::core::selector::CategoryWeights;
use crate::types::{AppError, AppResult, CandidateFile, FilePool};

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct LogConfig {
    pub level: Option<String>,
    pub color: Option<bool>, // None = auto-detect (semantic)
}

impl LogConfig {
    pub fn level(&self) -> &str {
        self.level.as_deref().unwrap_or("info")
    }

    pub fn color(&self) -> Option<bool> {
        self.color // None has semantic meaning (auto-detect)
    }

    pub fn to_effective(&self) -> Self {
        Self {
            level: Some(self.level().to_string()),
            color: self.color,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct RunConfig {
    pub commits: Option<u32>,
    pub seed: Option<u64>,
    pub min_files: Option<usize>,
}

impl RunConfig {
    pub fn commits(&self) -> u32 {
        self.commits.unwrap_or(90)
    }

    pub fn min_files(&self) -> usize {
        self.min_files.unwrap_or(0)
    }

    pub fn to_effective(&self) -> Self {
        Self {
            commits: Some(self.commits()),
            seed: self.seed,
            min_files: Some(self.min_files()),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct WeightsConfig {
    pub large: Option<f64>,
    pub medium: Option<f64>,
    pub small: Option<f64>,
}

impl WeightsConfig {
    pub fn large(&self) -> f64 {
        self.large.unwrap_or(0.40)
    }

    pub fn medium(&self) -> f64 {
        self.medium.unwrap_or(0.30)
    }

    pub fn small(&self) -> f64 {
        self.small.unwrap_or(0.30)
    }

    pub fn to_effective(&self) -> Self {
        Self {
            large: Some(self.large()),
            medium: Some(self.medium()),
            small: Some(self.small()),
        }
    }
}

/// An explicit sub-period of the date range with its own hour window
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PeriodConfig {
    pub weight: f64,
    pub start: String,
    pub end: String,
    /// Inclusive [first, last] hour of day for generated timestamps
    pub hours: [u32; 2],
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct DatesConfig {
    pub start: Option<String>,
    pub end: Option<String>,
    pub periods: Option<Vec<PeriodConfig>>, // None = derive the default split
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FileEntry {
    pub path: String,
    pub max_touches: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    // Top-level fields
    pub tag: Option<String>,
    pub messages: Option<Vec<String>>,

    // Nested sections
    pub run: Option<RunConfig>,
    pub weights: Option<WeightsConfig>,
    pub dates: Option<DatesConfig>,
    pub log: Option<LogConfig>,
    pub files: Option<Vec<FileEntry>>,
}

impl Config {
    pub fn tag(&self) -> &str {
        self.tag.as_deref().unwrap_or("gitfab")
    }

    pub fn messages(&self) -> &[String] {
        self.messages.as_deref().unwrap_or(&[])
    }

    pub fn run(&self) -> RunConfig {
        self.run.clone().unwrap_or_default()
    }

    pub fn weights(&self) -> WeightsConfig {
        self.weights.clone().unwrap_or_default()
    }

    pub fn dates(&self) -> DatesConfig {
        self.dates.clone().unwrap_or_default()
    }

    pub fn log(&self) -> LogConfig {
        self.log.clone().unwrap_or_default()
    }

    pub fn files(&self) -> &[FileEntry] {
        self.files.as_deref().unwrap_or(&[])
    }

    pub fn to_effective(&self) -> Self {
        Self {
            tag: Some(self.tag().to_string()),
            messages: Some(self.messages().to_vec()),
            run: Some(self.run().to_effective()),
            weights: Some(self.weights().to_effective()),
            dates: Some(self.dates()),
            log: Some(self.log().to_effective()),
            files: Some(self.files().to_vec()),
        }
    }

    /// Category probabilities, validated to sum to 1.0
    pub fn resolve_weights(&self) -> AppResult<CategoryWeights> {
        let weights = self.weights();
        CategoryWeights::new(weights.large(), weights.medium(), weights.small())
    }

    /// Date plan from [dates], deriving the default sub-period split when
    /// no explicit [[dates.periods]] are configured
    pub fn resolve_date_plan(&self) -> AppResult<DatePlan> {
        let dates = self.dates();
        let start = parse_date(dates.start.as_deref().ok_or_else(|| {
            AppError::Config("[dates].start is required (YYYY-MM-DD)".to_string())
        })?)?;
        let end = parse_date(
            dates
                .end
                .as_deref()
                .ok_or_else(|| AppError::Config("[dates].end is required (YYYY-MM-DD)".to_string()))?,
        )?;

        match dates.periods {
            Some(periods) if !periods.is_empty() => {
                let mut subs = Vec::with_capacity(periods.len());
                for period in &periods {
                    subs.push(SubPeriod {
                        weight: period.weight,
                        start: parse_date(&period.start)?,
                        end: parse_date(&period.end)?,
                        hours: HourWindow::new(period.hours[0], period.hours[1])?,
                    });
                }
                DatePlan::new(start, end, subs)
            }
            _ => DatePlan::with_default_periods(start, end),
        }
    }

    pub fn resolve_pool(&self) -> AppResult<FilePool> {
        let entries = self.files();
        if entries.is_empty() {
            return Err(AppError::Config(
                "no [[files]] entries configured".to_string(),
            ));
        }
        Ok(FilePool::new(
            entries
                .iter()
                .map(|entry| CandidateFile {
                    path: PathBuf::from(&entry.path),
                    max_touches: entry.max_touches,
                })
                .collect(),
        ))
    }

    pub fn resolve_messages(&self) -> AppResult<Vec<String>> {
        let messages = self.messages();
        if messages.is_empty() {
            return Err(AppError::Config(
                "the messages list is empty; at least one commit message is required".to_string(),
            ));
        }
        Ok(messages.to_vec())
    }
}

fn parse_date(input: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|err| AppError::Config(format!("invalid date '{input}': {err}")))
}

#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub log_level: Option<String>,
    pub log_color: Option<String>, // "on" | "off"
    pub tag: Option<String>,
}

const CONFIG_FILENAME: &str = "gitfab.toml";

static CONFIG: OnceCell<Config> = OnceCell::new();

pub fn config_filename() -> &'static str {
    CONFIG_FILENAME
}

pub fn config() -> &'static Config {
    CONFIG.get_or_init(|| {
        let mut cfg = Config::default();
        // Apply nearest config file found by walking up from cwd
        if let Some(path) = find_nearest_config_file()
            && let Some(file_cfg) = read_config_file(&path)
        {
            apply_file_config(&mut cfg, &file_cfg);
        }
        cfg
    })
}

pub fn init_with_overrides(overrides: &CliOverrides) {
    let mut cfg = Config::default();

    // 1) Config file: walk up from cwd and use the first config file found
    if let Some(path) = find_nearest_config_file()
        && let Some(file_cfg) = read_config_file(&path)
    {
        apply_file_config(&mut cfg, &file_cfg);
    }

    // 2) CLI arguments (highest priority). Only override if user specified.
    apply_cli_overrides(&mut cfg, overrides);

    let _ = CONFIG.set(cfg);
}

fn read_config_file(path: &Path) -> Option<Config> {
    match fs::read_to_string(path) {
        Ok(contents) => toml::from_str::<Config>(&contents).ok(),
        Err(_) => None,
    }
}

fn apply_file_config(cfg: &mut Config, file: &Config) {
    // Merge top-level fields
    if file.tag.is_some() {
        cfg.tag = file.tag.clone();
    }
    if file.messages.is_some() {
        cfg.messages = file.messages.clone(); // override semantics
    }
    if file.files.is_some() {
        cfg.files = file.files.clone();
    }
    if file.run.is_some() {
        cfg.run = file.run.clone();
    }
    if file.weights.is_some() {
        cfg.weights = file.weights.clone();
    }
    if file.dates.is_some() {
        cfg.dates = file.dates.clone();
    }

    // Merge log section
    if let Some(file_log) = &file.log {
        let mut log = cfg.log.clone().unwrap_or_default();
        if file_log.level.is_some() {
            log.level = file_log.level.clone();
        }
        if file_log.color.is_some() {
            log.color = file_log.color;
        }
        cfg.log = Some(log);
    }
}

fn apply_cli_overrides(cfg: &mut Config, overrides: &CliOverrides) {
    if let Some(tag) = &overrides.tag
        && !tag.trim().is_empty()
    {
        cfg.tag = Some(tag.trim().to_string());
    }

    // Log overrides
    let mut log = cfg.log.clone().unwrap_or_default();
    if let Some(level) = &overrides.log_level
        && !level.trim().is_empty()
    {
        log.level = Some(level.trim().to_string());
    }
    if let Some(color_str) = &overrides.log_color {
        match color_str.to_lowercase().as_str() {
            "on" => log.color = Some(true),
            "off" => log.color = Some(false),
            _ => {}
        }
    }
    if overrides.log_level.is_some() || overrides.log_color.is_some() {
        cfg.log = Some(log);
    }
}

fn find_nearest_config_file() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    for dir in cwd.ancestors() {
        let candidate = dir.join(CONFIG_FILENAME);
        if candidate.exists() {
            return Some(candidate);
        }
    }
    None
}

pub fn colors_enabled() -> bool {
    match config().log().color() {
        Some(force) => force,
        None => console::colors_enabled(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_config_overrides_defaults() {
        let file: Config = toml::from_str(
            r#"
tag = "Acme"
messages = ["one", "two"]

[run]
commits = 12

[weights]
large = 0.5
medium = 0.3
small = 0.2
"#,
        )
        .expect("parse");
        let mut cfg = Config::default();
        apply_file_config(&mut cfg, &file);

        assert_eq!(cfg.tag(), "Acme");
        assert_eq!(cfg.messages().len(), 2);
        assert_eq!(cfg.run().commits(), 12);
        assert_eq!(cfg.weights().large(), 0.5);
    }

    #[test]
    fn cli_overrides_win_over_file() {
        let mut cfg = Config {
            tag: Some("File".to_string()),
            ..Config::default()
        };
        apply_cli_overrides(
            &mut cfg,
            &CliOverrides {
                tag: Some("Cli".to_string()),
                log_level: Some("debug".to_string()),
                log_color: Some("off".to_string()),
            },
        );
        assert_eq!(cfg.tag(), "Cli");
        assert_eq!(cfg.log().level(), "debug");
        assert_eq!(cfg.log().color(), Some(false));
    }

    #[test]
    fn missing_pool_is_a_config_error() {
        let cfg = Config::default();
        assert!(cfg.resolve_pool().is_err());
        assert!(cfg.resolve_messages().is_err());
    }
}
