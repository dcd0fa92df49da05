// Pattern 4: Singleton
// Run with: cargo run --bin p4_singleton

use std::thread;

use colored::Colorize;
use creational_patterns::singleton::Logger;

fn main() {
    creational_patterns::init_diagnostics();

    println!("{}", "=== Singleton Logger ===".bold());
    println!("State before first access: {:?}", Logger::state());

    let instance1 = Logger::instance();
    let instance2 = Logger::instance();

    if std::ptr::eq(instance1, instance2) && std::ptr::eq(instance2, Logger::instance()) {
        println!("{}", "Instances are the same.".green());
    }
    println!("State after first access: {:?}", Logger::state());

    instance1.log("message from instance1");
    instance2.log("message from instance2");
    Logger::instance().log("message from Logger::instance");

    println!("\n{}", "=== Concurrent access ===".bold());
    thread::scope(|s| {
        for i in 0..4 {
            s.spawn(move || Logger::instance().log(&format!("message from thread {i}")));
        }
    });

    println!("Loggers constructed: {}", Logger::constructions());
    println!("Messages logged: {}", Logger::instance().emitted());
}
