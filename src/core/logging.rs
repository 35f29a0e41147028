use console::style;
use log::LevelFilter;

use crate::types::config::{colors_enabled, config};

/// Install the fern logger using the resolved config; called once after
/// configuration is initialized. A second call (tests) is a no-op.
pub fn init_logging() {
    let level = match config().log().level().to_ascii_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Info,
    };
    let colors = colors_enabled();

    let _ = fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{} {}] {}",
                chrono::Local::now().format("%H:%M:%S"),
                level_tag(record.level(), colors),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply();
}

fn level_tag(level: log::Level, colors: bool) -> String {
    if !colors {
        return level.to_string();
    }
    let styled = match level {
        log::Level::Error => style(level.to_string()).red().bold(),
        log::Level::Warn => style(level.to_string()).yellow(),
        log::Level::Info => style(level.to_string()).green(),
        log::Level::Debug => style(level.to_string()).cyan(),
        log::Level::Trace => style(level.to_string()).dim(),
    };
    styled.to_string()
}
