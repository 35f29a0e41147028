use crate::types::AppResult;
use crate::types::config::config;

pub fn print_messages(format: &str) -> AppResult<()> {
    let messages = config().messages();

    match format {
        "json" => {
            let json = serde_json::to_string_pretty(&messages)?;
            println!("{}", json);
        }
        _ => {
            for (i, message) in messages.iter().enumerate() {
                println!("{:>3}  {message}", i + 1);
            }
            if messages.is_empty() {
                println!("(no messages configured)");
            }
        }
    }

    Ok(())
}
