//! # Wasabi ID
//!
//! Secure, URL-friendly unique identifiers.
//!
//! Identifiers are drawn uniformly from an alphabet of up to 256 symbols, using random bytes
//! from an injected [`RandomSource`](random::RandomSource). Bytes are never reduced modulo the
//! alphabet length. Instead they are masked and rejected if they fall outside of the alphabet,
//! so that no symbol is favoured.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use wasabi_id::alphabet::Alphabet;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // 21 URL-safe symbols, e.g. "V1StGXR8_Z5jdHi6B-myT"
//!     let id = wasabi_id::nanoid().await?;
//!
//!     // 12 symbols of a custom alphabet
//!     let code = wasabi_id::custom(Alphabet::try_from("0123456789ABCDEF")?, 12).await?;
//!
//!     // Outside of async code
//!     let blocking = wasabi_id::nanoid_with_size(10).wait()?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`alphabet`] - Validated alphabets and the default URL-safe alphabet
//! - [`mask`] - Bitmask sizing for alphabets
//! - [`sampler`] - Unbiased sampling over arbitrary alphabets
//! - [`url_safe`] - Fast path for the URL-safe alphabet
//! - [`random`] - Random sources and adapters for custom providers
//! - [`deferred`] - The asynchronous result returned by the entry points below
//! - [`config`] - Settings read from the environment
//! - [`logging`] - Tracing setup for applications
//!
//! ## Feature Flags
//!
//! - `pretty_logs` - Colorful console output for development
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `ID_OVERSHOOT_FACTOR` | Multiplier inflating each batch of requested random bytes | `1.6` |
//! | `RUST_LOG` | Console log filter (e.g., `info`, `wasabi_id=trace`) | `info` |

use crate::alphabet::Alphabet;
use crate::deferred::Deferred;
use crate::random::{OsRandom, RandomSource};

pub mod alphabet;
pub mod config;
pub mod deferred;
pub mod error;
pub mod logging;
pub mod mask;
pub mod random;
pub mod sampler;
pub mod url_safe;

pub use error::{IdError, IdResult};

/// The default number of symbols per identifier.
///
/// 21 URL-safe symbols carry 126 random bits, which makes collisions about as likely as for
/// random (version 4) UUIDs.
pub const DEFAULT_SIZE: usize = 21;

/// Generates an identifier of [`DEFAULT_SIZE`] URL-safe symbols using the operating system
/// random source.
pub fn nanoid() -> Deferred<String> {
    nanoid_with_size(DEFAULT_SIZE)
}

/// Generates an identifier of `size` URL-safe symbols using the operating system random source.
pub fn nanoid_with_size(size: usize) -> Deferred<String> {
    url_safe_with(OsRandom, size)
}

/// Generates an identifier of `size` URL-safe symbols using the given random source.
pub fn url_safe_with<R: RandomSource + 'static>(source: R, size: usize) -> Deferred<String> {
    Deferred::new(async move { url_safe::generate_url_safe(&source, size).await })
}

/// Generates an identifier of `size` symbols of `alphabet` using the operating system random
/// source.
pub fn custom(alphabet: Alphabet, size: usize) -> Deferred<String> {
    custom_with(OsRandom, alphabet, size)
}

/// Generates an identifier of `size` symbols of `alphabet` using the given random source.
pub fn custom_with<R: RandomSource + 'static>(
    source: R,
    alphabet: Alphabet,
    size: usize,
) -> Deferred<String> {
    Deferred::new(async move { sampler::generate(&source, &alphabet, size).await })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::URL_ALPHABET;
    use crate::random::Completion;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn default_ids_are_url_safe() {
        let id = nanoid().await.unwrap();

        assert_eq!(id.len(), DEFAULT_SIZE);
        assert!(id.chars().all(|symbol| URL_ALPHABET.contains(&symbol)));
    }

    #[test]
    fn ids_can_be_waited_for_outside_of_a_runtime() {
        let id = nanoid_with_size(10).wait().unwrap();
        assert_eq!(id.len(), 10);

        let code = custom(Alphabet::try_from("abc").unwrap(), 30).wait().unwrap();
        assert_eq!(code.len(), 30);
        assert!(code.chars().all(|symbol| "abc".contains(symbol)));
    }

    #[test]
    fn callback_providers_can_be_waited_for() {
        let source = random::from_callback(|count, completion: Completion| {
            std::thread::spawn(move || completion.complete(Ok(vec![0x0D; count])));
        });

        let id = custom_with(source, Alphabet::try_from("0123456789abcdef").unwrap(), 4)
            .wait()
            .unwrap();

        assert_eq!(id, "dddd");
    }

    #[tokio::test]
    async fn results_can_be_observed_via_callbacks() {
        let (tx, rx) = oneshot::channel();

        custom(Alphabet::url_safe(), 0).on_complete(move |result| {
            let _ = tx.send(result);
        });

        assert!(matches!(rx.await.unwrap(), Err(IdError::InvalidSize)));
    }

    #[tokio::test]
    async fn concurrent_calls_share_a_source() {
        let requests = Arc::new(AtomicUsize::new(0));
        let source = Arc::new(random::from_fn({
            let requests = requests.clone();
            move |count| {
                requests.fetch_add(1, Ordering::SeqCst);
                Ok(vec![0x23; count])
            }
        }));

        let ids = futures::future::try_join_all(
            (0..8).map(|_| url_safe_with(source.clone(), DEFAULT_SIZE)),
        )
        .await
        .unwrap();

        assert_eq!(requests.load(Ordering::SeqCst), 8);
        // 0x23 masks to index 35, which is 'x'.
        assert_eq!(URL_ALPHABET[0x23 & 63], 'x');
        assert!(ids.iter().all(|id| id == &"x".repeat(DEFAULT_SIZE)));
    }

    #[tokio::test]
    async fn failing_sources_yield_no_partial_ids() {
        let source = random::from_fn(|_| anyhow::bail!("Entropy source unavailable"));

        let err = custom_with(source, Alphabet::try_from("ab").unwrap(), 5)
            .await
            .unwrap_err();

        assert!(err.is_random_source());
    }
}
