//! # Test Support
//!
//! Utilities for asserting how the container drives factories.
//!
//! [`FactoryProbe`] wraps a factory and counts its invocations, which is the
//! simplest way to check the singleton guarantee: however many times a name is
//! resolved, its factory runs once.
//!
//! ```rust
//! use bean_framework::testing::FactoryProbe;
//! use bean_framework::{Bean, Container};
//!
//! #[derive(Default)]
//! struct Clock;
//! impl Bean for Clock {}
//!
//! let probe = FactoryProbe::new();
//! let mut container = Container::new();
//! container.register("clock", probe.wrap(Clock::default)).unwrap();
//! assert_eq!(probe.calls(), 0);
//!
//! let _first = container.get_by_name("clock").unwrap();
//! let _second = container.get_by_name("clock").unwrap();
//! assert_eq!(probe.calls(), 1);
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Counts the invocations of the factories it wraps.
#[derive(Debug, Clone, Default)]
pub struct FactoryProbe {
    calls: Arc<AtomicUsize>,
}

impl FactoryProbe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps `factory` so that each invocation is counted by this probe.
    pub fn wrap<T, F>(&self, factory: F) -> impl FnOnce() -> T + Send + 'static
    where
        F: FnOnce() -> T + Send + 'static,
    {
        let calls = Arc::clone(&self.calls);
        move || {
            calls.fetch_add(1, Ordering::SeqCst);
            factory()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}
