use {
    super::Permutation,
    byteorder::{ByteOrder, LittleEndian},
};

/// The Gimli permutation: 24 rounds over three rows of four 32-bit lanes.
///
/// Each round applies a lane-local nonlinear layer built from rotations,
/// shifts and bitwise logic, followed every second round by a swap of lanes
/// within the first row. The round constant is folded into the first lane on
/// every fourth round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Gimli;

impl Permutation for Gimli {
    fn permute(state: &mut [u8; 48]) {
        let mut s = [0u32; 12];
        LittleEndian::read_u32_into(state, &mut s);

        for round in (1..=24u32).rev() {
            for lane in 0..4 {
                let x = s[lane].rotate_left(24);
                let y = s[4 + lane].rotate_left(9);
                let z = s[8 + lane];

                s[8 + lane] = x ^ (z << 1) ^ ((y & z) << 2);
                s[4 + lane] = y ^ x ^ ((x | z) << 1);
                s[lane] = z ^ y ^ ((x & y) << 3);
            }

            match round & 3 {
                0 => {
                    // Small swap, then the round constant into the first lane.
                    s.swap(0, 1);
                    s.swap(2, 3);
                    s[0] ^= 0x9e377900 | round;
                }
                2 => {
                    // Big swap.
                    s.swap(0, 2);
                    s.swap(1, 3);
                }
                _ => (),
            }
        }

        LittleEndian::write_u32_into(&s, state);
    }
}
