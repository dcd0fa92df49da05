// Pattern 3: Factory Method
// Run with: cargo run --bin p3_factory_method [REGION...]

use std::process::ExitCode;
use std::sync::Arc;

use colored::Colorize;
use creational_patterns::factory_method::{
    CodeDiscountFactory, CodeRegistry, CountryDiscountFactory, DiscountFactory,
};
use creational_patterns::{CatalogueConfig, PatternError};
use uuid::Uuid;

fn describe(factory: &dyn DiscountFactory, order: u64) -> Result<(), PatternError> {
    let strategy = factory.create_discount_strategy()?;
    println!(
        "{}: {}% off, {} -> {}",
        strategy.name(),
        strategy.discount_percentage(),
        order,
        strategy.apply(order)
    );
    Ok(())
}

fn run(regions: &[String]) -> Result<(), PatternError> {
    let config = CatalogueConfig::from_env()?;
    let table = Arc::new(config.discounts.clone());
    let registry = Arc::new(CodeRegistry::new(config.redemption));

    println!("{}", "=== Effective config ===".bold());
    println!("{}", config.to_toml_string()?);

    println!("{}", "=== Country discounts ===".bold());
    for region in regions {
        print!("{region}: ");
        describe(
            &CountryDiscountFactory::with_table(region.as_str(), Arc::clone(&table)),
            config.order_costs,
        )?;
    }

    println!("\n{}", "=== One-time code ===".bold());
    let code = Uuid::new_v4();
    let factory = CodeDiscountFactory::new(code, table.code_percentage, registry);
    println!("code {code}");
    describe(&factory, config.order_costs)?;

    print!("second redemption: ");
    match describe(&factory, config.order_costs) {
        Ok(()) => {}
        Err(err @ PatternError::CodeAlreadyUsed { .. }) => println!("{} {err}", "rejected:".yellow()),
        Err(err) => return Err(err),
    }
    Ok(())
}

fn main() -> ExitCode {
    creational_patterns::init_diagnostics();

    let mut regions: Vec<String> = std::env::args().skip(1).collect();
    if regions.is_empty() {
        regions = vec!["BE".to_string(), "FR".to_string()];
    }

    match run(&regions) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}
