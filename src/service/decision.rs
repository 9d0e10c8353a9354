//! Deterministic decision engine.
//!
//! Maps free text to a reproducible categorical outcome: the same question
//! always gets the same answer, while different questions are statistically
//! unpredictable. The seed is derived from a SHA-256 digest of the normalized
//! question, so answers are also stable across restarts and machines.
//!
//! The `WeightedOutcomeSet` draw primitive is shared with the seed-free games,
//! which feed it a fresh, non-seeded generator instead.

use rand::{rngs::StdRng, Rng, SeedableRng};
use sha2::{Digest, Sha256};
use std::sync::LazyLock;
use thiserror::Error;

/// Probability that an answer gets the embellishment appended.
pub const EMBELLISHMENT_PROBABILITY: f64 = 0.10;

/// Fixed suffix appended to roughly one answer in ten.
pub const EMBELLISHMENT: &str = " (trust me bro)";

static AFFIRMATIVE_RESPONSES: LazyLock<WeightedOutcomeSet<&'static str>> = LazyLock::new(|| {
    WeightedOutcomeSet::uniform(["yes", "ye", "yea", "yup", "real :white_check_mark:"])
});

static NEGATIVE_RESPONSES: LazyLock<WeightedOutcomeSet<&'static str>> =
    LazyLock::new(|| WeightedOutcomeSet::uniform(["no", "nuh-uh", "nahh", "not real :x:"]));

#[derive(Error, Debug, PartialEq)]
pub enum OutcomeSetError {
    #[error("an outcome set needs at least one entry")]
    Empty,
    #[error("an outcome set needs a positive total weight")]
    ZeroWeight,
}

/// Trimmed, lower-cased question text.
///
/// Inputs that differ only by case or surrounding whitespace normalize to the
/// same value, which is what makes downstream seeding deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedQuery(String);

impl NormalizedQuery {
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Generator seed derived from a normalized query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedValue(pub u64);

impl SeedValue {
    /// First eight bytes (big-endian) of the SHA-256 digest of the query.
    pub fn from_query(query: &NormalizedQuery) -> Self {
        let digest = Sha256::digest(query.as_str().as_bytes());
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&digest[..8]);
        Self(u64::from_be_bytes(bytes))
    }

    /// Seeded generator for this value.
    pub fn rng(self) -> StdRng {
        StdRng::seed_from_u64(self.0)
    }
}

/// Ordered categorical distribution of `(label, weight)` pairs.
///
/// Immutable once built. Construction guarantees at least one entry and a
/// positive total weight, so `draw` always returns a label.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedOutcomeSet<T> {
    entries: Vec<(T, u32)>,
    total: u64,
}

impl<T> WeightedOutcomeSet<T> {
    pub fn new(entries: Vec<(T, u32)>) -> Result<Self, OutcomeSetError> {
        if entries.is_empty() {
            return Err(OutcomeSetError::Empty);
        }

        let total: u64 = entries.iter().map(|(_, weight)| u64::from(*weight)).sum();
        if total == 0 {
            return Err(OutcomeSetError::ZeroWeight);
        }

        Ok(Self { entries, total })
    }

    /// Builds a set where every label has weight 1.
    ///
    /// # Panics
    /// - If `labels` is empty. Only used with non-empty static tables.
    pub fn uniform<I>(labels: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let entries: Vec<(T, u32)> = labels.into_iter().map(|label| (label, 1)).collect();
        assert!(!entries.is_empty(), "uniform outcome set must not be empty");
        let total = entries.len() as u64;
        Self { entries, total }
    }

    /// Draws one label with probability `weight / total_weight`.
    pub fn draw<R: Rng>(&self, rng: &mut R) -> &T {
        let mut roll = rng.random_range(0..self.total_weight());

        for (label, weight) in &self.entries {
            let weight = u64::from(*weight);
            if roll < weight {
                return label;
            }
            roll -= weight;
        }

        // Unreachable while `total` is the sum of all weights.
        &self.entries[self.entries.len() - 1].0
    }

    pub fn total_weight(&self) -> u64 {
        self.total
    }
}

#[cfg(test)]
impl<T> WeightedOutcomeSet<T> {
    /// Expected probability of the entry at `index`.
    pub fn probability(&self, index: usize) -> Option<f64> {
        self.entries
            .get(index)
            .map(|(_, weight)| f64::from(*weight) / self.total_weight() as f64)
    }

    pub fn labels(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|(label, _)| label)
    }
}

/// Answers "is this real?" for a question, deterministically.
///
/// Draw order on the seeded stream: real/not-real category (fair coin), then a
/// phrase from that category, then the embellishment decision.
pub fn is_this_real(question: &str) -> String {
    let query = NormalizedQuery::new(question);
    let mut rng = SeedValue::from_query(&query).rng();

    let is_real = rng.random_bool(0.5);
    let pool = if is_real {
        &*AFFIRMATIVE_RESPONSES
    } else {
        &*NEGATIVE_RESPONSES
    };

    let mut response = pool.draw(&mut rng).to_string();
    if rng.random_bool(EMBELLISHMENT_PROBABILITY) {
        response.push_str(EMBELLISHMENT);
    }

    response
}
