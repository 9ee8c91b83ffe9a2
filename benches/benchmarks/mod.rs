pub mod decoder;
pub mod encoder;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand_distr::Zipf;

pub const BUFFER_LEN: usize = 1 << 20;

/// A Zipf-distributed byte buffer: skewed enough that order-0 and order-1
/// compression both do real work, matching the kind of input the teacher's
/// own benchmark fixtures (`tests/common/mod.rs`) generate for its coder.
pub fn zipfian_buffer(seed: u64) -> Vec<u8> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let zipf = Zipf::new(255, 1.5).unwrap();
    (0..BUFFER_LEN)
        .map(|_| (rng.sample(zipf) as u32 - 1) as u8)
        .collect()
}
