// Pattern 2: Builder
// Run with: cargo run --bin p2_builder [Mini|BMW...]

use std::process::ExitCode;

use colored::Colorize;
use creational_patterns::builder::{builder_for, Assembly, BmwBuilder, Garage};
use creational_patterns::{ConsoleSink, PatternError};

fn run(selectors: &[String]) -> Result<(), PatternError> {
    let sink = ConsoleSink;
    let mut garage = Garage::new();

    for selector in selectors {
        let builder = builder_for(selector)?;
        println!("{}", format!("=== {} ===", builder.vehicle_type()).bold());
        garage.construct(builder.as_ref())?;
        garage.show(&sink);
        println!();
    }

    println!("{}", "=== Out-of-order steps are rejected ===".bold());
    let mut assembly = Assembly::new(&BmwBuilder);
    if let Err(err) = assembly.build_frame() {
        println!("{} {err}", "rejected:".yellow());
    }
    Ok(())
}

fn main() -> ExitCode {
    creational_patterns::init_diagnostics();

    let mut selectors: Vec<String> = std::env::args().skip(1).collect();
    if selectors.is_empty() {
        selectors = vec!["Mini".to_string(), "BMW".to_string()];
    }

    match run(&selectors) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}
