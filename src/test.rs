//! Crate-level sanity tests: reference permutation vectors, streaming
//! equivalence, randomised exchange/signature/sharing trials, and the
//! end-to-end envelope scenarios.

use rand::{rngs::StdRng, Rng, SeedableRng};

mod envelope;
mod shamir;
mod x25519;

/// Deterministic byte source shared by the sanity tests.
fn rng() -> StdRng {
    StdRng::seed_from_u64(0x12345678)
}

fn bytes32(rng: &mut StdRng) -> [u8; 32] {
    let mut out = [0; 32];
    rng.fill(&mut out[..]);
    out
}

fn bitflip(rng: &mut StdRng, bytes: &mut [u8]) {
    let index = rng.gen_range(0..bytes.len());
    bytes[index] ^= 1 << rng.gen_range(0..8);
}
