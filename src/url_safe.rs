//! Generation of identifiers over the 64 symbol URL-safe alphabet.
//!
//! With exactly 64 symbols, the lower six bits of every byte index a valid symbol.
//! Therefore a single batch of `size` bytes always suffices and nothing is discarded.

use crate::alphabet::URL_ALPHABET;
use crate::error::{IdResult, enforce_size};
use crate::random::{self, RandomSource};

const URL_MASK: u8 = 63;

/// Generates an identifier of `size` symbols drawn from [`URL_ALPHABET`].
///
/// Requests exactly `size` bytes in a single call to the random source.
#[tracing::instrument(level = "debug", skip_all, fields(size = size), err(Display))]
pub async fn generate_url_safe<R: RandomSource + ?Sized>(
    source: &R,
    size: usize,
) -> IdResult<String> {
    enforce_size(size)?;

    let bytes = random::request_batch(source, size).await?;

    Ok(bytes
        .into_iter()
        .map(|byte| URL_ALPHABET[(byte & URL_MASK) as usize])
        .collect())
}
