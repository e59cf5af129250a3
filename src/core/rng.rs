//! Random source construction.
//!
//! Games take any `rand::Rng` so a session can be replayed from a seed.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Deterministic generator when `seed` is given, OS entropy otherwise.
#[must_use]
pub fn game_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}
