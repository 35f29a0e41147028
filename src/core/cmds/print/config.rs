use crate::types::AppResult;
use crate::types::config::config;

pub fn print_config(format: &str) -> AppResult<()> {
    let effective = config().to_effective();

    match format {
        "json" => {
            let json = serde_json::to_string_pretty(&effective)?;
            println!("{}", json);
        }
        _ => {
            println!("tag = {}", effective.tag());
            println!("messages = {} configured", effective.messages().len());

            let run = effective.run();
            println!("[run]");
            println!("  commits = {}", run.commits());
            match run.seed {
                Some(seed) => println!("  seed = {seed}"),
                None => println!("  seed = (entropy)"),
            }
            println!("  min_files = {}", run.min_files());

            let weights = effective.weights();
            println!("[weights]");
            println!("  large = {:.2}", weights.large());
            println!("  medium = {:.2}", weights.medium());
            println!("  small = {:.2}", weights.small());

            let dates = effective.dates();
            println!("[dates]");
            println!("  start = {}", dates.start.as_deref().unwrap_or("(unset)"));
            println!("  end = {}", dates.end.as_deref().unwrap_or("(unset)"));
            match &dates.periods {
                Some(periods) if !periods.is_empty() => {
                    for period in periods {
                        println!(
                            "  period {:.0}%: {} .. {} (hours {}-{})",
                            period.weight * 100.0,
                            period.start,
                            period.end,
                            period.hours[0],
                            period.hours[1]
                        );
                    }
                }
                _ => println!("  periods = (default split)"),
            }

            let log = effective.log();
            println!("[log]");
            println!("  level = {}", log.level());
            match log.color() {
                Some(color) => println!("  color = {color}"),
                None => println!("  color = auto"),
            }

            println!("[[files]] = {} entries", effective.files().len());
        }
    }

    Ok(())
}
