use {
    super::Permutation,
    byteorder::{ByteOrder, LittleEndian},
};

const ROUND_KEYS: [u32; 12] = [
    0x058, 0x038, 0x3c0, 0x0d0, 0x120, 0x014, 0x060, 0x02c, 0x380, 0x0f0, 0x1a0, 0x012,
];

/// The Xoodoo permutation: 12 rounds over three planes of four 32-bit lanes.
///
/// A round mixes the column parity back into every plane (θ), shifts the
/// second and third planes and adds the round constant (ρ-west), applies the
/// nonlinear χ layer, and shifts again (ρ-east).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Xoodoo;

impl Permutation for Xoodoo {
    fn permute(state: &mut [u8; 48]) {
        let mut s = [0u32; 12];
        LittleEndian::read_u32_into(state, &mut s);

        for &key in &ROUND_KEYS {
            // θ: parity of each column, rotated west by one lane, spread over
            // two in-lane rotations.
            let mut p = [0u32; 4];
            for lane in 0..4 {
                p[lane] = s[lane] ^ s[4 + lane] ^ s[8 + lane];
            }
            for lane in 0..4 {
                let q = p[(lane + 3) & 3];
                let e = q.rotate_left(5) ^ q.rotate_left(14);
                s[lane] ^= e;
                s[4 + lane] ^= e;
                s[8 + lane] ^= e;
            }

            // ρ-west and the round constant.
            s[0] ^= key;
            let west = [s[7], s[4], s[5], s[6]];
            for lane in 0..4 {
                s[4 + lane] = west[lane];
                s[8 + lane] = s[8 + lane].rotate_left(11);
            }

            // χ, one plane at a time using the updated values in order.
            for lane in 0..4 {
                s[lane] ^= !s[4 + lane] & s[8 + lane];
                s[4 + lane] ^= !s[8 + lane] & s[lane];
                s[8 + lane] ^= !s[lane] & s[4 + lane];
            }

            // ρ-east: the third plane moves two lanes east and rotates each
            // lane by a byte.
            let east = [s[10], s[11], s[8], s[9]];
            for lane in 0..4 {
                s[4 + lane] = s[4 + lane].rotate_left(1);
                s[8 + lane] = east[lane].rotate_left(8);
            }
        }

        LittleEndian::write_u32_into(&s, state);
    }
}
