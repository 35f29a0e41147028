use std::sync::Arc;

use console::style;
use log::{info, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::StrategyRegistry;
use crate::core::cli::RunArgs;
use crate::core::fabricator::{Fabricator, RunSummary};
use crate::core::git::GitWorkspace;
use crate::types::AppResult;
use crate::types::config::config;

pub fn execute_run(args: RunArgs, registry: Arc<StrategyRegistry>) -> AppResult<()> {
    let cfg = config();

    // Resolve command-specific options (CLI wins over config)
    let commits = args.commits.unwrap_or_else(|| cfg.run().commits());
    let seed = args.seed.or(cfg.run().seed);
    let tag = args.tag.clone().unwrap_or_else(|| cfg.tag().to_string());
    let weights = cfg.resolve_weights()?;
    let plan = cfg.resolve_date_plan()?;
    let messages = cfg.resolve_messages()?;

    // Fatal precondition: must run inside a git working tree
    let git = GitWorkspace::open(std::env::current_dir()?)?;

    let mut pool = cfg.resolve_pool()?;
    pool.retain_existing(git.root());
    if pool.is_empty() {
        return Err(crate::types::AppError::Config(
            "no candidate file exists on disk".to_string(),
        ));
    }
    let min_files = cfg.run().min_files();
    if pool.len() < min_files {
        warn!(
            "only {} candidate file(s) found, expected at least {min_files}; proceeding anyway",
            pool.len()
        );
    }

    let separator = "=".repeat(70);
    println!("{separator}");
    println!("{}", style(format!("{tag}: fabricated commit history")).bold());
    println!("{separator}");
    println!(
        "Generating {commits} commits across {} candidate file(s)",
        pool.len()
    );
    println!("Date range: {} to {}\n", plan.start(), plan.end());

    let mut rng = match seed {
        Some(seed) => {
            info!("seeding rng with {seed}");
            ChaCha8Rng::seed_from_u64(seed)
        }
        None => ChaCha8Rng::from_os_rng(),
    };

    let mut fabricator = Fabricator::new(&registry, &git, pool, plan, weights, messages, tag);
    let summary = fabricator.run(commits, &mut rng);
    print_summary(&summary);

    Ok(())
}

fn print_summary(summary: &RunSummary) {
    let separator = "=".repeat(70);
    println!("\n{separator}");
    println!(
        "{}",
        style(format!(
            "Created {} of {} requested commits",
            summary.commits_made, summary.requested
        ))
        .bold()
    );
    println!("{separator}");

    println!("\nFile touch distribution:");
    for (path, count) in &summary.touches {
        println!("  {}: {count} commit(s)", path.display());
    }
    println!("\nTouched {} unique file(s)", summary.files_touched);
}
