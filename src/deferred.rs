//! A single asynchronous result type for all generation entry points.
//!
//! A [`Deferred`] is a plain [`Future`] which can be awaited. Callers outside of async code
//! can either block on it via [`Deferred::wait`] or register a callback via
//! [`Deferred::on_complete`]. Success and failure always arrive through the same
//! [`IdResult`].

use crate::error::IdResult;
use futures::FutureExt;
use futures::future::BoxFuture;
use std::fmt::{Debug, Formatter};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::task::JoinHandle;

/// The eventual outcome of a generation call.
///
/// Nothing happens until the result is awaited, waited for or a callback is registered.
/// Dropping it beforehand cancels the generation.
#[must_use = "a deferred result does nothing unless it is awaited, waited for or observed"]
pub struct Deferred<T> {
    inner: BoxFuture<'static, IdResult<T>>,
}

impl<T: Send + 'static> Deferred<T> {
    pub fn new(future: impl Future<Output = IdResult<T>> + Send + 'static) -> Self {
        Self {
            inner: future.boxed(),
        }
    }

    /// Blocks the current thread until the result is available.
    ///
    /// # Panics
    ///
    /// Random sources which depend on a Tokio runtime will fail to make progress or panic when
    /// waited for outside of one. Calling this from within an async task blocks its executor.
    pub fn wait(self) -> IdResult<T> {
        futures::executor::block_on(self.inner)
    }

    /// Invokes the callback with the result once it is available.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a Tokio runtime.
    pub fn on_complete<F>(self, callback: F) -> JoinHandle<()>
    where
        F: FnOnce(IdResult<T>) + Send + 'static,
    {
        tokio::spawn(async move {
            callback(self.inner.await);
        })
    }
}

impl<T> Future for Deferred<T> {
    type Output = IdResult<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.inner.poll_unpin(cx)
    }
}

impl<T> Debug for Deferred<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Deferred").finish_non_exhaustive()
    }
}
