//! Injected randomness
//!
//! Every randomized bounce decision flows through [`Chooser`] so tests can
//! script exact branch selection. The production source is a seeded PCG.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// A source of uniform choices
pub trait Chooser {
    /// Uniformly pick one of `n` outcomes, returned as 0..n. `n` must be
    /// non-zero.
    fn choose(&mut self, n: u32) -> u32;

    /// 50/50 coin; true is the "heads" branch at each call site
    fn coin(&mut self) -> bool {
        self.choose(2) == 0
    }
}

/// Seeded production source
#[derive(Debug, Clone)]
pub struct GameRng {
    rng: Pcg32,
}

impl GameRng {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl Chooser for GameRng {
    fn choose(&mut self, n: u32) -> u32 {
        self.rng.random_range(0..n)
    }
}

/// Plays back a fixed script of outcomes; panics when the script runs dry or
/// an outcome is out of range for the requested draw.
#[cfg(test)]
pub struct ScriptedChooser {
    script: std::collections::VecDeque<u32>,
}

#[cfg(test)]
impl ScriptedChooser {
    pub fn new(outcomes: &[u32]) -> Self {
        Self {
            script: outcomes.iter().copied().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

#[cfg(test)]
impl Chooser for ScriptedChooser {
    fn choose(&mut self, n: u32) -> u32 {
        let outcome = self.script.pop_front().expect("choice script exhausted");
        assert!(
            outcome < n,
            "scripted outcome {outcome} out of range for choose({n})"
        );
        outcome
    }
}
