//! Credit score sources.
//!
//! There is no bureau integration in the demo. The service asks a [`CreditScoreSource`] for a
//! score whenever the request does not carry one, which keeps the decision engine itself
//! deterministic.

use std::ops::RangeInclusive;
use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::ScoringConfig;

pub trait CreditScoreSource: Send + Sync {
    fn sample(&self) -> u16;
}

/// Uniform draws from a configured score band.
#[derive(Debug)]
pub struct SimulatedBureau {
    range: RangeInclusive<u16>,
    rng: Mutex<StdRng>,
}

impl SimulatedBureau {
    pub fn from_config(config: &ScoringConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config.min_score, config.max_score, rng)
    }

    pub fn seeded(seed: u64, min_score: u16, max_score: u16) -> Self {
        Self::with_rng(min_score, max_score, StdRng::seed_from_u64(seed))
    }

    fn with_rng(min_score: u16, max_score: u16, rng: StdRng) -> Self {
        let (low, high) = if min_score <= max_score {
            (min_score, max_score)
        } else {
            (max_score, min_score)
        };

        Self {
            range: low..=high,
            rng: Mutex::new(rng),
        }
    }

    pub fn range(&self) -> &RangeInclusive<u16> {
        &self.range
    }
}

impl CreditScoreSource for SimulatedBureau {
    fn sample(&self) -> u16 {
        let mut rng = self
            .rng
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.gen_range(self.range.clone())
    }
}

/// Always reports the same score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedScore(pub u16);

impl CreditScoreSource for FixedScore {
    fn sample(&self) -> u16 {
        self.0
    }
}
