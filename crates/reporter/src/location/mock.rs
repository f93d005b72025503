// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Scripted location provider for scheduler tests.

#![allow(clippy::unwrap_used)]

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tzlink_core::Coordinate;

use super::{LocationProvider, LocationResult};

/// One scripted answer: the result and how long to take producing it.
#[derive(Debug, Clone)]
pub struct Step {
    pub delay: Duration,
    pub result: LocationResult<Coordinate>,
}

/// Answers lookups from a script, repeating the fallback once it runs out.
#[derive(Debug, Clone)]
pub struct MockLocation {
    script: Arc<Mutex<VecDeque<Step>>>,
    fallback: LocationResult<Coordinate>,
    calls: Arc<AtomicUsize>,
}

impl MockLocation {
    /// Every lookup resolves immediately with `result`.
    pub fn always(result: LocationResult<Coordinate>) -> Self {
        MockLocation {
            script: Arc::new(Mutex::new(VecDeque::new())),
            fallback: result,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Queue a delayed answer ahead of the fallback.
    pub fn then(self, delay: Duration, result: LocationResult<Coordinate>) -> Self {
        self.script.lock().unwrap().push_back(Step { delay, result });
        self
    }

    /// Number of lookups started so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl LocationProvider for MockLocation {
    fn current_position(
        &self,
    ) -> Pin<Box<dyn Future<Output = LocationResult<Coordinate>> + Send + '_>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let step = self.script.lock().unwrap().pop_front();
        let fallback = self.fallback.clone();
        Box::pin(async move {
            match step {
                Some(step) => {
                    tokio::time::sleep(step.delay).await;
                    step.result
                }
                None => fallback,
            }
        })
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
