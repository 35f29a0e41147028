use std::path::PathBuf;

use log::{debug, info, warn};
use rand::RngCore;
use rand::seq::IndexedRandom;

use crate::StrategyRegistry;
use crate::core::dates::DatePlan;
use crate::core::git::GitWorkspace;
use crate::core::selector::{self, CategoryWeights};
use crate::types::{FilePool, TouchCounters};

/// How many of the most recent messages block immediate reuse
const RECENT_MESSAGE_WINDOW: usize = 10;
/// Bounded reselection before a repeat is accepted
const MESSAGE_RESELECT_ATTEMPTS: usize = 15;

/// Result of a fabrication run
#[derive(Debug)]
pub struct RunSummary {
    pub requested: u32,
    pub commits_made: u32,
    /// Per-file successful-edit counts, sorted descending, zeros omitted
    pub touches: Vec<(PathBuf, u32)>,
    pub files_touched: usize,
}

/// Drives the per-iteration state machine: select a candidate, backdate a
/// timestamp, mutate, stage, commit. All run state lives here; failures
/// are logged and skipped, never fatal.
pub struct Fabricator<'a> {
    registry: &'a StrategyRegistry,
    git: &'a GitWorkspace,
    pool: FilePool,
    plan: DatePlan,
    weights: CategoryWeights,
    messages: Vec<String>,
    tag: String,
    counters: TouchCounters,
    recent: Vec<String>,
}

impl<'a> Fabricator<'a> {
    pub fn new(
        registry: &'a StrategyRegistry,
        git: &'a GitWorkspace,
        pool: FilePool,
        plan: DatePlan,
        weights: CategoryWeights,
        messages: Vec<String>,
        tag: String,
    ) -> Self {
        let counters = TouchCounters::new(&pool);
        Self {
            registry,
            git,
            pool,
            plan,
            weights,
            messages,
            tag,
            counters,
            recent: Vec::new(),
        }
    }

    pub fn counters(&self) -> &TouchCounters {
        &self.counters
    }

    pub fn run(&mut self, iterations: u32, rng: &mut dyn RngCore) -> RunSummary {
        let mut commits_made = 0;

        for i in 0..iterations {
            let Some(candidate) = selector::select(&self.pool, &self.counters, &self.weights, rng)
            else {
                info!("candidate pool exhausted after {i} iteration(s)");
                break;
            };
            let path = candidate.path.clone();

            let when = self.plan.sample(rng);
            let message = self.pick_message(rng);

            if i == 0 || (i + 1) % 10 == 0 || i + 1 == iterations {
                println!(
                    "[{}/{}] {} | {}",
                    i + 1,
                    iterations,
                    when.format("%Y-%m-%d %H:%M:%S"),
                    path.display()
                );
                println!("    {message}");
            } else {
                debug!(
                    "[{}/{}] {} | {} | {}",
                    i + 1,
                    iterations,
                    when.format("%Y-%m-%d %H:%M:%S"),
                    path.display(),
                    message
                );
            }

            let absolute = self.git.root().join(&path);
            if !self.registry.apply_edit(&absolute, &self.tag, rng) {
                warn!("no content change for {}, skipping commit", path.display());
                continue;
            }

            self.git.stage(&path);
            if self.git.commit(&message, &when) {
                self.counters.record(&path);
                self.recent.push(message);
                commits_made += 1;
            } else {
                warn!("commit failed for {} (empty diff?)", path.display());
            }
        }

        let touches: Vec<(PathBuf, u32)> = self
            .counters
            .sorted_desc()
            .into_iter()
            .filter(|(_, count)| *count > 0)
            .map(|(path, count)| (path.to_path_buf(), count))
            .collect();

        RunSummary {
            requested: iterations,
            commits_made,
            files_touched: touches.len(),
            touches,
        }
    }

    /// Random message, reselected while it sits in the recent window;
    /// after the attempt budget a repeat is accepted
    fn pick_message(&self, rng: &mut dyn RngCore) -> String {
        let mut message = self.messages.choose(rng).cloned().unwrap_or_default();
        let mut attempts = 0;
        while attempts < MESSAGE_RESELECT_ATTEMPTS && self.recently_used(&message) {
            message = self.messages.choose(rng).cloned().unwrap_or_default();
            attempts += 1;
        }
        message
    }

    fn recently_used(&self, message: &str) -> bool {
        self.recent
            .iter()
            .rev()
            .take(RECENT_MESSAGE_WINDOW)
            .any(|used| used == message)
    }
}
