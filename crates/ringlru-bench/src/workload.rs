//! Candidate key generation

use anyhow::{ensure, Result};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Fixed set of keys the workers draw from
pub struct Workload {
    keys: Vec<String>,
}

impl Workload {
    /// Build `demand` distinct keys, each `padding` `x` characters followed by
    /// its index
    pub fn new(demand: usize, padding: usize) -> Result<Self> {
        ensure!(demand > 0, "demand must be at least one key");

        let prefix = "x".repeat(padding);
        let keys = (0..demand).map(|i| format!("{}{}", prefix, i)).collect();
        Ok(Self { keys })
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Uniform random key source for one worker; OS entropy when unseeded
    pub fn picker(&self, seed: Option<u64>) -> KeyPicker<'_> {
        let rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        KeyPicker {
            keys: &self.keys,
            rng,
        }
    }
}

pub struct KeyPicker<'a> {
    keys: &'a [String],
    rng: SmallRng,
}

impl<'a> KeyPicker<'a> {
    pub fn next_key(&mut self) -> &'a str {
        let idx = self.rng.random_range(0..self.keys.len());
        &self.keys[idx]
    }
}
