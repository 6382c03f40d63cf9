//! Deterministic random sources which record the requests they receive.

use super::RandomSource;
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::collections::VecDeque;
use std::sync::Mutex;

/// Hands out a fixed script of bytes and fails once it runs dry.
pub(crate) struct ScriptedRandom {
    bytes: Mutex<VecDeque<u8>>,
    requests: Mutex<Vec<usize>>,
}

impl ScriptedRandom {
    pub(crate) fn new(bytes: impl IntoIterator<Item = u8>) -> Self {
        Self {
            bytes: Mutex::new(bytes.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Returns the byte counts of all requests received so far.
    pub(crate) fn requests(&self) -> Vec<usize> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn remaining(&self) -> usize {
        self.bytes.lock().unwrap().len()
    }
}

#[async_trait]
impl RandomSource for ScriptedRandom {
    async fn random_bytes(&self, count: usize) -> anyhow::Result<Vec<u8>> {
        self.requests.lock().unwrap().push(count);

        let mut bytes = self.bytes.lock().unwrap();
        if bytes.len() < count {
            anyhow::bail!("The script has {} bytes left but {} were requested", bytes.len(), count);
        }

        Ok(bytes.drain(..count).collect())
    }
}

/// A reproducible source backed by a seeded [`StdRng`].
pub(crate) struct SeededRandom {
    rng: Mutex<StdRng>,
    requests: Mutex<Vec<usize>>,
}

impl SeededRandom {
    pub(crate) fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn requests(&self) -> Vec<usize> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn reset_requests(&self) {
        self.requests.lock().unwrap().clear();
    }
}

#[async_trait]
impl RandomSource for SeededRandom {
    async fn random_bytes(&self, count: usize) -> anyhow::Result<Vec<u8>> {
        self.requests.lock().unwrap().push(count);

        let mut bytes = vec![0; count];
        self.rng.lock().unwrap().fill_bytes(&mut bytes);

        Ok(bytes)
    }
}

/// Fails every request.
#[derive(Default)]
pub(crate) struct FailingRandom {
    requests: Mutex<usize>,
}

impl FailingRandom {
    pub(crate) fn requests(&self) -> usize {
        *self.requests.lock().unwrap()
    }
}

#[async_trait]
impl RandomSource for FailingRandom {
    async fn random_bytes(&self, count: usize) -> anyhow::Result<Vec<u8>> {
        *self.requests.lock().unwrap() += 1;
        anyhow::bail!("Entropy source unavailable (requested {} bytes)", count)
    }
}
