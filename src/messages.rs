//! Canned texts
//!
//! Everything the encabulator ever "says" lives here.

use rand::seq::IndexedRandom;
use rand::Rng;

/// Lines logged before the progress loop starts
pub const WARMUP_LINES: [&str; 2] = [
    "Initializing quantum flux capacitor...",
    "Calibrating harmonic resonance matrix...",
];

/// Log lines sprinkled randomly through a run
pub const CHATTER: [&str; 7] = [
    "Re-routing primary data stream...",
    "Defragmenting neutrino buffer...",
    "Compiling sub-etheric protocols...",
    "Warning: Tachyon particle surge detected.",
    "Engaging Heisenberg compensator...",
    "Matrix alignment at 74%...",
    "ERROR: Reality integrity questionable. Continuing anyway.",
];

/// Final, completely useless verdicts
pub const VERDICTS: [&str; 6] = [
    "Verdict: The data suggests a high probability of ambiguity.",
    "Verdict: Outcome inconclusive. Recommend consulting a psychic.",
    "Verdict: A superposition of 'yes' and 'no' has been achieved.",
    "Verdict: The signal-to-noise ratio is suboptimal for a conclusion.",
    "Verdict: All signs point to 'maybe'.",
    "Verdict: The query has been successfully ignored.",
];

pub const COMPLETE_LINE: &str = "Analysis complete. Collapsing waveform.";
pub const ABORT_LINE: &str = "Analysis aborted by user.";
pub const READY_LINE: &str = "\nSystem ready for next analysis.";

pub const VERDICT_IDLE: &str = "Verdict: Awaiting Input...";
pub const VERDICT_RUNNING: &str = "Verdict: Encabulating...";
pub const VERDICT_ABORTED: &str = "Verdict: Encabulation aborted.";

/// Pick a chatter line uniformly at random
pub fn random_chatter<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    CHATTER.choose(rng).copied().unwrap_or(CHATTER[0])
}

/// Pick a verdict uniformly at random
pub fn random_verdict<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    VERDICTS.choose(rng).copied().unwrap_or(VERDICTS[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_verdicts_share_prefix() {
        assert!(VERDICTS.iter().all(|v| v.starts_with("Verdict: ")));
    }

    #[test]
    fn test_random_verdict_covers_every_verdict() {
        let mut rng = StdRng::seed_from_u64(7);
        let seen: HashSet<_> = (0..600).map(|_| random_verdict(&mut rng)).collect();
        assert_eq!(seen.len(), VERDICTS.len());
    }

    #[test]
    fn test_random_chatter_is_from_list() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..100 {
            assert!(CHATTER.contains(&random_chatter(&mut rng)));
        }
    }
}
