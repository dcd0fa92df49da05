// Runs in its own process, so nothing has touched the logger before this test.

use std::sync::Barrier;
use std::thread;

use creational_patterns::singleton::{LifecycleState, Logger};

#[test]
fn test_concurrent_first_access_builds_exactly_once() {
    const THREADS: usize = 16;

    assert_eq!(Logger::state(), LifecycleState::Uninitialized);
    assert_eq!(Logger::constructions(), 0);

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
    assert_eq!(Logger::state(), LifecycleState::Ready);
}
