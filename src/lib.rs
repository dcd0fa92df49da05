//! Creational Patterns - Runnable Examples
//!
//! This crate contains the four object-creation patterns of the catalogue:
//!
//! ## Pattern 1: Abstract Factory
//! - Families of related services (discount + shipping) per region
//! - Shopping cart client that only sees the factory interface
//!
//! ## Pattern 2: Builder
//! - Director-owned assembly with an explicit step state machine
//! - Mini and BMW builders
//!
//! ## Pattern 3: Factory Method
//! - Country discounts resolved from a lookup table
//! - One-time codes with single-use redemption
//!
//! ## Pattern 4: Singleton
//! - Process-wide logger behind a `OnceLock`
//!
//! Run individual examples with:
//! ```bash
//! cargo run --bin p1_abstract_factory
//! cargo run --bin p2_builder
//! cargo run --bin p3_factory_method
//! cargo run --bin p4_singleton
//! ```

pub mod abstract_factory;
pub mod builder;
pub mod config;
pub mod error;
pub mod factory_method;
pub mod singleton;
pub mod sink;

pub use config::CatalogueConfig;
pub use error::{PatternError, Result};
pub use sink::{ConsoleSink, DisplaySink, MemorySink};

/// Installs the `tracing` subscriber used by the demo binaries.
///
/// Reads `RUST_LOG`; defaults to `warn` so demo output stays readable.
pub fn init_diagnostics() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // A second install (e.g. from tests) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
