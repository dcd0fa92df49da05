//! Display sinks: where the examples write their console text.

use std::sync::{Arc, Mutex};

/// Anything that accepts a line of display text.
pub trait DisplaySink {
    fn write(&self, line: &str);
}

/// Writes straight to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl DisplaySink for ConsoleSink {
    fn write(&self, line: &str) {
        println!("{line}");
    }
}

/// Keeps every line in memory, in write order.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DisplaySink for MemorySink {
    fn write(&self, line: &str) {
        // A poisoned lock still holds valid lines; keep appending.
        self.lines
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(line.to_string());
    }
}

impl<S: DisplaySink + ?Sized> DisplaySink for &S {
    fn write(&self, line: &str) {
        (**self).write(line);
    }
}

impl<S: DisplaySink + ?Sized> DisplaySink for Arc<S> {
    fn write(&self, line: &str) {
        (**self).write(line);
    }
}
