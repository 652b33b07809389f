//! Reusable debounced effect.
//!
//! A single abstraction enforcing the coalescing rule everywhere it is
//! needed: each trigger cancels the pending unfired timer and schedules the
//! effect after the delay, so only the final payload in a burst fires. An
//! effect already in flight is fire-and-forget and is never cancelled.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

type BoxedEffect<T> =
    Arc<dyn Fn(T) -> Pin<Box<dyn Future<Output = ()> + Send>> + Send + Sync>;

/// Debounces an async effect by a fixed delay.
///
/// Cancellation works on a generation counter: every trigger bumps the
/// counter and a sleeping task only fires if its generation is still
/// current when it wakes.
pub struct Debouncer<T: Send + 'static> {
    delay: Duration,
    effect: BoxedEffect<T>,
    generation: Arc<AtomicU64>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Creates a debouncer running `effect` after `delay` of quiet time.
    pub fn new<F, Fut>(delay: Duration, effect: F) -> Self
    where
        F: Fn(T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        Self {
            delay,
            effect: Arc::new(move |payload| -> Pin<Box<dyn Future<Output = ()> + Send>> {
                Box::pin(effect(payload))
            }),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Schedules the effect with this payload, replacing any pending timer.
    pub fn trigger(&self, payload: T) {
        let my_generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let generation = self.generation.clone();
        let effect = self.effect.clone();
        let delay = self.delay;

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // A newer trigger (or cancel) invalidates this timer.
            if generation.load(Ordering::SeqCst) == my_generation {
                effect(payload).await;
            }
        });
    }

    /// Invalidates any pending unfired timer.
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}
