use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use log::debug;

use crate::StrategyRegistry;
use crate::core::cli::{Args, Commands, PrintArgs};
use crate::core::cmds;
use crate::core::logging::init_logging;
use crate::types::AppResult;
use crate::types::config::{CliOverrides, init_with_overrides};

pub fn run_main(registry: Arc<StrategyRegistry>) -> AppResult<()> {
    let args = Args::parse();

    // Handle global arguments
    if let Some(cwd_arg) = args.cwd.as_ref() {
        let cwd = PathBuf::from(cwd_arg).canonicalize()?;
        env::set_current_dir(&cwd)?;
    }

    // Build CLI overrides for config precedence
    let cli_overrides = CliOverrides {
        log_level: args.log_level.clone(),
        log_color: args.log_color.clone(),
        tag: None,
    };

    // Initialize configuration (file, then CLI overrides)
    init_with_overrides(&cli_overrides);

    // Initialize logging after config so level/color are applied
    init_logging();

    let cwd = env::current_dir()?;
    debug!("Current working directory: {}", cwd.display());

    // Dispatch to appropriate command
    match args.command {
        Commands::Init => cmds::execute_init()?,
        Commands::Run(run_args) => cmds::execute_run(run_args, Arc::clone(&registry))?,
        Commands::Print {
            command: print_args,
        } => match print_args {
            PrintArgs::Config(args) => {
                cmds::execute_print(cmds::print::PrintCommand::Config(args.format))?
            }
            PrintArgs::Pool(args) => {
                cmds::execute_print(cmds::print::PrintCommand::Pool(args.format))?
            }
            PrintArgs::Messages(args) => {
                cmds::execute_print(cmds::print::PrintCommand::Messages(args.format))?
            }
        },
    }

    Ok(())
}
