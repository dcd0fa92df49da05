// Pattern 4: Singleton
// One process-wide logger, created on first access behind a OnceLock.

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::OnceLock;

use crate::sink::{ConsoleSink, DisplaySink};

static LOGGER: OnceLock<Logger> = OnceLock::new();
static INITIALIZING: AtomicBool = AtomicBool::new(false);
static CONSTRUCTIONS: AtomicUsize = AtomicUsize::new(0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Uninitialized,
    Initializing,
    Ready,
}

pub struct Logger {
    sink: Box<dyn DisplaySink + Send + Sync>,
    emitted: AtomicU64,
}

impl Logger {
    // Private: the only way to reach the shared logger is `instance()`.
    fn new(sink: Box<dyn DisplaySink + Send + Sync>) -> Self {
        Self {
            sink,
            emitted: AtomicU64::new(0),
        }
    }

    /// Returns the process-wide logger, creating it on the first call.
    ///
    /// Concurrent first callers block inside `get_or_init` until the single
    /// winning thread has built the instance, then all get the same reference.
    pub fn instance() -> &'static Logger {
        LOGGER.get_or_init(|| {
            INITIALIZING.store(true, Ordering::SeqCst);
            CONSTRUCTIONS.fetch_add(1, Ordering::SeqCst);
            tracing::info!("creating process-wide logger");
            Logger::new(Box::new(ConsoleSink))
        })
    }

    /// `Ready` as soon as the instance is published; the flag only covers
    /// the window while the init closure runs.
    pub fn state() -> LifecycleState {
        if LOGGER.get().is_some() {
            LifecycleState::Ready
        } else if INITIALIZING.load(Ordering::SeqCst) {
            LifecycleState::Initializing
        } else {
            LifecycleState::Uninitialized
        }
    }

    /// How many loggers `instance()` has ever built: 0 or 1.
    pub fn constructions() -> usize {
        CONSTRUCTIONS.load(Ordering::SeqCst)
    }

    pub fn log(&self, message: &str) {
        self.sink.write(&format!("Message to log: {message}"));
        self.emitted.fetch_add(1, Ordering::Relaxed);
    }

    /// Number of messages this logger has written.
    pub fn emitted(&self) -> u64 {
        self.emitted.load(Ordering::Relaxed)
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("emitted", &self.emitted())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;
    use std::sync::{Arc, Barrier};
    use std::thread;

    #[test]
    fn test_same_instance() {
        let first = Logger::instance();
        let second = Logger::instance();

        assert!(std::ptr::eq(first, second));
        assert_eq!(Logger::state(), LifecycleState::Ready);
        assert_eq!(Logger::constructions(), 1);
    }

    #[test]
    fn test_concurrent_access_returns_one_instance() {
        const THREADS: usize = 16;
        let barrier = Barrier::new(THREADS);
        let barrier = &barrier;

        let addresses: Vec<usize> = thread::scope(|s| {
            let handles: Vec<_> = (0..THREADS)
                .map(|_| {
                    s.spawn(move || {
                        barrier.wait();
                        Logger::instance() as *const Logger as usize
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert!(addresses.windows(2).all(|pair| pair[0] == pair[1]));
        assert_eq!(addresses[0], Logger::instance() as *const Logger as usize);
        assert_eq!(Logger::constructions(), 1);
    }

    #[test]
    fn test_log_format() {
        let sink = Arc::new(MemorySink::new());
        let logger = Logger::new(Box::new(Arc::clone(&sink)));

        logger.log("message from instance1");

        assert_eq!(sink.lines(), vec!["Message to log: message from instance1"]);
    }

    #[test]
    fn test_identical_messages_are_independent_events() {
        let sink = Arc::new(MemorySink::new());
        let logger = Logger::new(Box::new(Arc::clone(&sink)));

        logger.log("same");
        logger.log("same");

        assert_eq!(sink.lines(), vec!["Message to log: same", "Message to log: same"]);
        assert_eq!(logger.emitted(), 2);
    }

    #[test]
    fn test_empty_message_is_accepted() {
        let sink = Arc::new(MemorySink::new());
        let logger = Logger::new(Box::new(Arc::clone(&sink)));

        logger.log("");
        assert_eq!(sink.lines(), vec!["Message to log: "]);
    }

    #[test]
    fn test_shared_instance_counts_across_threads() {
        let logger = Logger::instance();
        let before = logger.emitted();

        thread::scope(|s| {
            for i in 0..4 {
                s.spawn(move || Logger::instance().log(&format!("from thread {i}")));
            }
        });

        // Other tests may log concurrently, so only a lower bound holds.
        assert!(logger.emitted() >= before + 4);
    }
}
