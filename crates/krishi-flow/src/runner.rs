//! Pending-effect queue shared by the controllers.
//!
//! All pending operations are polled from the caller's task; completions are
//! yielded in whatever order they finish.

use std::future::Future;

use futures::future::BoxFuture;
use futures::stream::FuturesUnordered;
use futures::{FutureExt, StreamExt};

pub(crate) struct InFlight<E> {
    pending: FuturesUnordered<BoxFuture<'static, E>>,
}

impl<E> InFlight<E> {
    pub(crate) fn new() -> Self {
        Self {
            pending: FuturesUnordered::new(),
        }
    }

    pub(crate) fn push<F>(&mut self, future: F)
    where
        F: Future<Output = E> + Send + 'static,
    {
        self.pending.push(future.boxed());
    }

    /// Waits for the next completion. `None` once nothing is pending.
    pub(crate) async fn next(&mut self) -> Option<E> {
        self.pending.next().await
    }

    pub(crate) fn len(&self) -> usize {
        self.pending.len()
    }
}
