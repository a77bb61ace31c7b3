//! Per-token Bayesian detector.
//!
//! Accumulates per-language probabilities token by token, randomly
//! subsampling the evidence over several trials the way naive Bayes
//! detectors do. The PRNG is seeded with a fixed value so repeated runs
//! over the same text give identical results.

use mailveil_core::errors::MailveilResult;
use mailveil_core::models::Detection;
use mailveil_core::traits::ILanguageBackend;

use crate::profiles::{self, PROFILES};

const TRIALS: u64 = 7;
/// Smoothing likelihood for evidence absent from a profile.
const ALPHA: f64 = 0.05;
/// Probability of keeping a unit of evidence in one trial.
const KEEP: f64 = 0.5;

pub struct BayesBackend {
    seed: u64,
}

impl BayesBackend {
    pub fn new() -> Self {
        Self { seed: 0 }
    }

    /// Fix the sampling seed. The default of 0 already gives deterministic
    /// results; this exists for callers that want distinct-but-stable runs.
    pub fn seed(&mut self, seed: u64) {
        self.seed = seed;
    }
}

impl Default for BayesBackend {
    fn default() -> Self {
        Self::new()
    }
}

struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    fn new(seed: u64) -> Self {
        // state must be non-zero
        Self {
            state: seed.wrapping_mul(0x9E3779B97F4A7C15) | 1,
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

impl ILanguageBackend for BayesBackend {
    fn detect(&self, text: &str) -> MailveilResult<Vec<Detection>> {
        let words = profiles::words_of(text);
        let trigrams = profiles::trigrams_of(text);
        if words.is_empty() && trigrams.is_empty() {
            return Ok(Vec::new());
        }

        let n = PROFILES.len();
        let mut accumulated = vec![0.0f64; n];

        for trial in 0..TRIALS {
            let mut rng = XorShift64::new(self.seed.wrapping_add(trial + 1));
            let mut probs = vec![1.0 / n as f64; n];

            let update = |unit: &str, probs: &mut [f64], rng: &mut XorShift64| {
                if rng.next_f64() >= KEEP {
                    return;
                }
                for (i, profile) in PROFILES.iter().enumerate() {
                    let known = profile.words.contains(&unit) || profile.trigrams.contains(&unit);
                    probs[i] *= if known { 1.0 } else { ALPHA };
                }
                normalize(probs);
            };

            for word in &words {
                update(word, &mut probs, &mut rng);
            }
            for tri in &trigrams {
                update(tri, &mut probs, &mut rng);
            }

            for (acc, p) in accumulated.iter_mut().zip(&probs) {
                *acc += p;
            }
        }

        normalize(&mut accumulated);
        let mut detections: Vec<Detection> = PROFILES
            .iter()
            .zip(&accumulated)
            .filter(|(_, &p)| p > 1e-4)
            .map(|(profile, &p)| Detection {
                lang: profile.code.to_string(),
                confidence: p,
            })
            .collect();
        detections.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        Ok(detections)
    }

    fn name(&self) -> &'static str {
        "bayes"
    }
}

fn normalize(probs: &mut [f64]) {
    let sum: f64 = probs.iter().sum();
    if sum > 0.0 {
        for p in probs.iter_mut() {
            *p /= sum;
        }
    }
}
