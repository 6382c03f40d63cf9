//! Error types reported by identifier generation.
//!
//! Exactly one failure kind is caused externally: the random source failed
//! ([`IdError::RandomSource`]). The other variants report precondition violations
//! detected before any randomness is requested.

use crate::alphabet::MAX_ALPHABET_LEN;

/// An error which aborted an identifier generation.
///
/// No partial identifier is ever returned alongside an error.
#[derive(Debug, thiserror::Error)]
pub enum IdError {
    /// The random source was unavailable, failed, cancelled the request or answered
    /// with a malformed batch.
    #[error("The random source failed: {0:#}")]
    RandomSource(#[source] anyhow::Error),

    /// The alphabet has no symbols or more symbols than a single byte can index.
    #[error(
        "An alphabet must contain between 1 and {} symbols but {len} were given",
        MAX_ALPHABET_LEN
    )]
    InvalidAlphabet { len: usize },

    /// An identifier with zero symbols or more than [`MAX_SIZE`] symbols was requested.
    #[error("The requested identifier size must be between 1 and {}", MAX_SIZE)]
    InvalidSize,
}

/// Shorthand for results of identifier generation.
pub type IdResult<T> = Result<T, IdError>;

impl IdError {
    /// Determines if this error was caused by the random source rather than by the caller.
    pub fn is_random_source(&self) -> bool {
        matches!(self, IdError::RandomSource(_))
    }
}

/// The largest number of symbols a single identifier may have.
pub const MAX_SIZE: usize = 1 << 20;

/// Ensures that between 1 and [`MAX_SIZE`] symbols are requested.
pub(crate) fn enforce_size(size: usize) -> IdResult<()> {
    if size == 0 || size > MAX_SIZE {
        Err(IdError::InvalidSize)
    } else {
        Ok(())
    }
}
