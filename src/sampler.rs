//! Unbiased sampling of identifiers over arbitrary alphabets.
//!
//! Each random byte is masked down to the smallest `2^k - 1` range covering the alphabet.
//! Masked values which index a symbol are accepted, all others are discarded. Reducing
//! them modulo the alphabet length instead would favour the leading symbols.
//!
//! Bytes are requested in batches which are sized once per call, so that a single round
//! suffices most of the time. If a batch falls short, another batch of the same size is
//! requested until the identifier is complete.

use crate::alphabet::Alphabet;
use crate::config::{self, OVERSHOOT_FACTOR};
use crate::error::{IdResult, enforce_size};
use crate::random::{self, RandomSource};

/// Upper bound for the bytes requested per symbol in a single round.
///
/// Even the least efficient alphabets accept every other byte on average.
pub const MAX_BYTES_PER_SYMBOL: usize = 256;

/// The mask and batch size used throughout a single generation call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SamplingPlan {
    mask: u8,
    len: usize,
    step: usize,
}

impl SamplingPlan {
    /// Computes the plan for `size` symbols of the given alphabet.
    ///
    /// Batches hold `ceil(overshoot * mask * size / len)` bytes, at least one and at most
    /// [`MAX_BYTES_PER_SYMBOL`] per symbol. If every masked byte is accepted anyway, a batch
    /// holds exactly `size` bytes.
    pub fn new(alphabet: &Alphabet, size: usize, overshoot: f64) -> Self {
        let mask = alphabet.mask();
        let len = alphabet.len();

        let step = if alphabet.accepts_every_byte() {
            size
        } else {
            (overshoot * mask as f64 * size as f64 / len as f64).ceil() as usize
        };

        Self {
            mask,
            len,
            step: step.clamp(1, size.saturating_mul(MAX_BYTES_PER_SYMBOL).max(1)),
        }
    }

    pub fn mask(&self) -> u8 {
        self.mask
    }

    /// Returns the number of bytes requested per round.
    pub fn step(&self) -> usize {
        self.step
    }

    /// Maps a random byte to the alphabet index it stands for, if it is accepted.
    pub fn accept(&self, byte: u8) -> Option<usize> {
        let index = (byte & self.mask) as usize;
        (index < self.len).then_some(index)
    }
}

/// Generates identifiers using a fixed overshoot factor.
#[derive(Clone, Copy, Debug)]
pub struct Sampler {
    overshoot: f64,
}

impl Default for Sampler {
    fn default() -> Self {
        Self {
            overshoot: *OVERSHOOT_FACTOR,
        }
    }
}

impl Sampler {
    /// Creates a sampler using the configured overshoot factor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the overshoot factor. Non-finite or non-positive factors are ignored.
    pub fn with_overshoot(mut self, overshoot: f64) -> Self {
        match config::validate_overshoot_factor(overshoot) {
            Ok(overshoot) => self.overshoot = overshoot,
            Err(err) => tracing::warn!("Keeping overshoot factor {}: {:#}", self.overshoot, err),
        }

        self
    }

    pub fn overshoot(&self) -> f64 {
        self.overshoot
    }

    pub fn plan(&self, alphabet: &Alphabet, size: usize) -> SamplingPlan {
        SamplingPlan::new(alphabet, size, self.overshoot)
    }

    /// Generates an identifier of `size` symbols drawn uniformly from `alphabet`.
    ///
    /// Fails without any partial result as soon as the random source fails.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(alphabet = alphabet.len(), size = size),
        err(Display)
    )]
    pub async fn generate<R: RandomSource + ?Sized>(
        &self,
        source: &R,
        alphabet: &Alphabet,
        size: usize,
    ) -> IdResult<String> {
        enforce_size(size)?;

        let plan = self.plan(alphabet, size);
        let mut id = String::with_capacity(size);
        let mut symbols = 0;
        let mut round = 1;

        loop {
            let batch = random::request_batch(source, plan.step()).await?;

            for byte in batch {
                if let Some(symbol) = plan.accept(byte).and_then(|index| alphabet.symbol(index)) {
                    id.push(symbol);
                    symbols += 1;

                    if symbols == size {
                        return Ok(id);
                    }
                }
            }

            tracing::debug!(
                "Round {} ended with {} of {} symbols. Requesting another {} bytes...",
                round,
                symbols,
                size,
                plan.step()
            );
            round += 1;
        }
    }
}

/// Generates an identifier of `size` symbols using the configured overshoot factor.
pub async fn generate<R: RandomSource + ?Sized>(
    source: &R,
    alphabet: &Alphabet,
    size: usize,
) -> IdResult<String> {
    Sampler::default().generate(source, alphabet, size).await
}
