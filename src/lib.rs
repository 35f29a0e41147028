pub mod core;
pub mod strategies;

// Re-export key items for easy importing in this crate
pub use core::registry::StrategyRegistry;
pub use core::types;

// Re-export key items for easy importing in other crates
pub use core::app::run_main;
pub use core::engine::traits::{EditContext, EditStrategy};
pub use core::engine::utils;
pub use core::fabricator::{Fabricator, RunSummary};
