pub mod check;
pub mod generate;
pub mod init;
pub mod operations;
pub mod play;

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Seeded when asked for reproducibility, otherwise from OS entropy.
pub(crate) fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
