use serde::Serialize;

use crate::types::AppResult;
use crate::types::config::config;

#[derive(Debug, Serialize)]
struct PoolRow {
    path: String,
    category: String,
    max_touches: u32,
    exists: bool,
}

pub fn print_pool(format: &str) -> AppResult<()> {
    let pool = config().resolve_pool()?;
    let cwd = std::env::current_dir()?;

    let rows: Vec<PoolRow> = pool
        .files()
        .iter()
        .map(|file| PoolRow {
            path: file.display(),
            category: file.category().to_string(),
            max_touches: file.max_touches,
            exists: cwd.join(&file.path).is_file(),
        })
        .collect();

    match format {
        "json" => {
            let json = serde_json::to_string_pretty(&rows)?;
            println!("{}", json);
        }
        _ => {
            let width = rows.iter().map(|row| row.path.len()).max().unwrap_or(4);
            println!("{:<width$}  {:>8}  {:>4}  exists", "path", "category", "cap");
            for row in &rows {
                println!(
                    "{:<width$}  {:>8}  {:>4}  {}",
                    row.path,
                    row.category,
                    row.max_touches,
                    if row.exists { "yes" } else { "no" }
                );
            }
        }
    }

    Ok(())
}
