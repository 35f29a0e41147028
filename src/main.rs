use std::sync::Arc;

use gitfab::StrategyRegistry;
use gitfab::run_main;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Create strategy registry; the generic source strategy doubles as the
    // default for extensions no other strategy claims
    let mut registry = StrategyRegistry::new(Box::new(
        gitfab::strategies::source::SourceStrategy::new(),
    ));
    registry.register(gitfab::strategies::markup::MarkupStrategy::new());
    registry.register(gitfab::strategies::stylesheet::StylesheetStrategy::new());
    registry.register(gitfab::strategies::data::DataStrategy::new());

    // Run the shared main function
    run_main(Arc::new(registry))?;
    Ok(())
}
