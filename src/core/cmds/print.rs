mod config;
mod messages;
mod pool;

use crate::types::AppResult;

pub enum PrintCommand {
    Config(String),
    Pool(String),
    Messages(String),
}

pub fn execute_print(command: PrintCommand) -> AppResult<()> {
    match command {
        PrintCommand::Config(format) => config::print_config(&format),
        PrintCommand::Pool(format) => pool::print_pool(&format),
        PrintCommand::Messages(format) => messages::print_messages(&format),
    }
}
