use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Upper bound for generated list ids, kept within the ledger's safe integer range.
pub const MAX_LIST_ID: u64 = (1 << 53) - 1;

pub fn generate_list_id() -> u64 {
    let mut rng = ChaCha20Rng::from_entropy();
    rng.gen_range(1..=MAX_LIST_ID)
}
