//! Sources of random bytes.
//!
//! Generation never produces randomness itself. It requests batches of bytes from a
//! [`RandomSource`], which is the only point where a generation call may suspend.
//!
//! Providers come in three shapes, all of which are adapted to the same contract:
//!
//! - [`from_fn`] - a provider which directly returns the requested bytes
//! - [`from_callback`] - a provider which reports the bytes later via a [`Completion`]
//! - [`from_async_fn`] - a provider which returns a future
//!
//! [`OsRandom`] reads from the operating system CSPRNG and is used by default.
//!
//! # Example
//!
//! ```rust,ignore
//! let source = random::from_callback(|count, completion| {
//!     std::thread::spawn(move || completion.complete(read_hardware_rng(count)));
//! });
//!
//! let id = sampler::generate(&source, &alphabet, 12).await?;
//! ```

use crate::error::{IdError, IdResult};
use anyhow::Context;
use async_trait::async_trait;
use rand::TryRngCore;
use rand::rngs::OsRng;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::oneshot;

#[cfg(test)]
pub(crate) mod testing;

/// Provides uniformly distributed, independent random bytes.
///
/// Implementations have to be usable from several concurrent generation calls at once.
#[async_trait]
pub trait RandomSource: Send + Sync {
    /// Returns exactly `count` random bytes or an error if the source is unavailable.
    async fn random_bytes(&self, count: usize) -> anyhow::Result<Vec<u8>>;
}

#[async_trait]
impl<R: RandomSource + ?Sized> RandomSource for Arc<R> {
    async fn random_bytes(&self, count: usize) -> anyhow::Result<Vec<u8>> {
        self.as_ref().random_bytes(count).await
    }
}

#[async_trait]
impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    async fn random_bytes(&self, count: usize) -> anyhow::Result<Vec<u8>> {
        self.as_ref().random_bytes(count).await
    }
}

/// Reads random bytes from the operating system.
#[derive(Clone, Copy, Debug, Default)]
pub struct OsRandom;

#[async_trait]
impl RandomSource for OsRandom {
    async fn random_bytes(&self, count: usize) -> anyhow::Result<Vec<u8>> {
        let mut bytes = vec![0; count];
        OsRng
            .try_fill_bytes(&mut bytes)
            .context("Failed to read from the operating system random source")?;

        Ok(bytes)
    }
}

/// Adapts a provider which directly returns the requested bytes.
pub struct FnRandom<F> {
    provider: F,
}

/// Creates a source from a provider which directly returns the requested bytes.
pub fn from_fn<F>(provider: F) -> FnRandom<F>
where
    F: Fn(usize) -> anyhow::Result<Vec<u8>> + Send + Sync,
{
    FnRandom { provider }
}

#[async_trait]
impl<F> RandomSource for FnRandom<F>
where
    F: Fn(usize) -> anyhow::Result<Vec<u8>> + Send + Sync,
{
    async fn random_bytes(&self, count: usize) -> anyhow::Result<Vec<u8>> {
        (self.provider)(count)
    }
}

/// Adapts a provider which returns a future of the requested bytes.
pub struct AsyncFnRandom<F> {
    provider: F,
}

/// Creates a source from a provider which returns a future of the requested bytes.
pub fn from_async_fn<F, Fut>(provider: F) -> AsyncFnRandom<F>
where
    F: Fn(usize) -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<Vec<u8>>> + Send + 'static,
{
    AsyncFnRandom { provider }
}

#[async_trait]
impl<F, Fut> RandomSource for AsyncFnRandom<F>
where
    F: Fn(usize) -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<Vec<u8>>> + Send + 'static,
{
    async fn random_bytes(&self, count: usize) -> anyhow::Result<Vec<u8>> {
        (self.provider)(count).await
    }
}

/// Handed to a callback provider to report the outcome of a single request.
///
/// The completion may be reported from any thread. Dropping it without calling
/// [`Completion::complete`] fails the generation call which issued the request.
pub struct Completion {
    tx: oneshot::Sender<anyhow::Result<Vec<u8>>>,
}

impl Completion {
    /// Reports the requested bytes or the reason why they couldn't be provided.
    pub fn complete(self, result: anyhow::Result<Vec<u8>>) {
        // The generation call may have been dropped in the meantime.
        let _ = self.tx.send(result);
    }
}

/// Adapts a provider which reports its bytes via a [`Completion`].
pub struct CallbackRandom<F> {
    provider: F,
}

/// Creates a source from a provider which reports its bytes via a [`Completion`].
pub fn from_callback<F>(provider: F) -> CallbackRandom<F>
where
    F: Fn(usize, Completion) + Send + Sync,
{
    CallbackRandom { provider }
}

#[async_trait]
impl<F> RandomSource for CallbackRandom<F>
where
    F: Fn(usize, Completion) + Send + Sync,
{
    async fn random_bytes(&self, count: usize) -> anyhow::Result<Vec<u8>> {
        let (tx, rx) = oneshot::channel();
        (self.provider)(count, Completion { tx });

        rx.await.with_context(|| {
            format!("The random source dropped the request for {count} bytes without completing it")
        })?
    }
}

/// Requests a batch of `count` bytes, turning every failure into [`IdError::RandomSource`].
///
/// A batch of the wrong length is a broken provider contract and is treated as a failure.
pub(crate) async fn request_batch<R: RandomSource + ?Sized>(
    source: &R,
    count: usize,
) -> IdResult<Vec<u8>> {
    let bytes = source
        .random_bytes(count)
        .await
        .map_err(IdError::RandomSource)?;

    if bytes.len() != count {
        return Err(IdError::RandomSource(anyhow::anyhow!(
            "Requested {} random bytes but received {}",
            count,
            bytes.len()
        )));
    }

    tracing::trace!("Received a batch of {} random bytes", count);

    Ok(bytes)
}
