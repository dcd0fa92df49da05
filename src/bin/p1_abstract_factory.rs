// Pattern 1: Abstract Factory
// Run with: cargo run --bin p1_abstract_factory [SELECTOR...]

use std::process::ExitCode;

use colored::Colorize;
use creational_patterns::abstract_factory::{create_family, Family, ShoppingCart};
use creational_patterns::{CatalogueConfig, ConsoleSink, PatternError};

fn run(selectors: &[String]) -> Result<(), PatternError> {
    let config = CatalogueConfig::from_env()?;
    let sink = ConsoleSink;

    for selector in selectors {
        let family: Family = selector.parse()?;
        println!("{}", format!("=== {family} family ===").bold());

        let (discount, shipping) = create_family(family.code())?;
        println!("Discount: {}%", discount.discount_percentage());
        println!("Shipping: {}", shipping.shipping_costs());

        let cart = ShoppingCart::new(&*family.factory()).with_order_costs(config.order_costs);
        println!("Order costs: {}", cart.order_costs());
        cart.calculate_costs(&sink);
        println!();
    }
    Ok(())
}

fn main() -> ExitCode {
    creational_patterns::init_diagnostics();

    let mut selectors: Vec<String> = std::env::args().skip(1).collect();
    if selectors.is_empty() {
        selectors = Family::ALL.iter().map(|f| f.code().to_string()).collect();
    }

    match run(&selectors) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}
