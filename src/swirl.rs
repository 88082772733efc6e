//! Memory-hard password stretching over the duplex.
//!
//! A caller-supplied buffer is treated as pages of 64 16-byte cells, one
//! page per kibibyte. Each round walks every page, folding the previous
//! round's cell, the previous page's cell and a back-referenced cell into
//! the duplex rate before permuting and writing the rate back out. The walk
//! is keyed from a separate seed duplex for the first `independent` rounds,
//! and from the evolving state itself for the remaining `dependent` rounds.

use {
    crate::duplex::{Duplex, Permutation},
    byteorder::{ByteOrder, LittleEndian},
};

const CELL: usize = 16;
const PAGE: usize = 64 * CELL;

/// Fill and re-mix `buffer` through `state`, reading page keys from `seed`
/// during the data-independent rounds.
///
/// `buffer` provides one page per kibibyte, capped at 2^32 pages. The seed
/// advances once every four pages during data-independent rounds so its
/// schedule never depends on the data being derived. Both duplex counters
/// account for the work: 16 bytes per seed permutation, 1024 bytes per page
/// visited.
pub fn swirl<P: Permutation>(
    state: &mut Duplex<P>,
    seed: &mut Duplex<P>,
    buffer: &mut [u8],
    independent: u64,
    dependent: u64,
) {
    let pages = if buffer.len() as u64 >> 42 != 0 {
        1 << 32
    } else {
        (buffer.len() / PAGE) as u64
    };

    for round in 0..independent + dependent {
        for page in 0..pages {
            let key = if round < independent {
                LittleEndian::read_u32(&seed.state()[4 * (page & 3) as usize..]) as u64
            } else {
                LittleEndian::read_u32(&state.state()[..4]) as u64
            };
            // The back-reference lands between 2 and page pages behind.
            let offset = 2 + ((key * key >> 32).wrapping_mul(page.wrapping_sub(1)) >> 32);

            for slot in 0..64usize {
                let cell = |p: u64| (p as usize * 64 + slot) * CELL;
                if round > 0 {
                    xor_cell(state, &buffer[cell(page)..]);
                }
                if page > 0 {
                    xor_cell(state, &buffer[cell(page - 1)..]);
                }
                if page > 1 {
                    xor_cell(state, &buffer[cell(page - offset)..]);
                }
                state.permute();
                buffer[cell(page)..cell(page) + CELL].copy_from_slice(&state.state()[..CELL]);
            }

            if round < independent && page & 3 == 3 {
                seed.permute();
            }
        }
        if round < independent && pages & 3 != 0 {
            seed.permute();
        }
    }

    seed.advance(independent * ((pages + 3) >> 2) * CELL as u64);
    state.advance((independent + dependent) * pages * PAGE as u64);
}

fn xor_cell<P: Permutation>(state: &mut Duplex<P>, cell: &[u8]) {
    for (s, c) in state.state_mut().iter_mut().zip(&cell[..CELL]) {
        *s ^= c;
    }
}
