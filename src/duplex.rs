//! A duplex sponge over a 384-bit permutation.
//!
//! The first 16 bytes of the state form the rate, the remaining 32 the
//! capacity. Input and output interleave freely: callers absorb data,
//! squeeze output, or transform buffers in place, and mark the boundaries
//! of logical messages with [`Duplex::pad`]. A running byte counter tracks
//! the offset into the current rate block, so a stream may be fed in
//! arbitrary byte-aligned pieces with the same result as one bulk call.

mod gimli;
mod xoodoo;

pub use {gimli::Gimli, xoodoo::Xoodoo};

use {std::marker::PhantomData, zeroize::Zeroize};

/// The number of state bytes touched by absorb, squeeze, encrypt and
/// decrypt. The 32 bytes of capacity are mutated only by the permutation.
pub const RATE: usize = 16;

/// A fixed, keyless bijection of the 48-byte sponge state.
///
/// The state is addressed as bytes by the duplex and as twelve little-endian
/// 32-bit lanes by the permutation, so the byte view is identical on hosts
/// of either endianness.
pub trait Permutation {
    fn permute(state: &mut [u8; 48]);
}

/// A duplex sponge: the permutation state plus a monotonic byte counter.
///
/// Every operation returns the updated counter. The offset into the current
/// rate block is always `counter % 16`; `pad` rounds the counter up to the
/// next block and `ratchet` always advances a full block.
pub struct Duplex<P: Permutation> {
    state: [u8; 48],
    counter: u64,
    permutation: PhantomData<P>,
}

impl<P: Permutation> Clone for Duplex<P> {
    fn clone(&self) -> Self {
        Self {
            state: self.state,
            counter: self.counter,
            permutation: PhantomData,
        }
    }
}

impl<P: Permutation> Default for Duplex<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Permutation> Duplex<P> {
    /// An all-zero duplex with a zero counter.
    pub fn new() -> Self {
        Self {
            state: [0; 48],
            counter: 0,
            permutation: PhantomData,
        }
    }

    /// The total number of bytes absorbed, squeezed, transformed and padded
    /// so far.
    pub fn counter(&self) -> u64 {
        self.counter
    }

    fn offset(&self) -> usize {
        (self.counter % RATE as u64) as usize
    }

    /// XOR `data` into the rate, permuting at each block boundary.
    pub fn absorb(&mut self, mut data: &[u8]) -> u64 {
        let offset = self.offset();
        self.counter += data.len() as u64;

        if offset + data.len() < RATE {
            for (s, d) in self.state[offset..].iter_mut().zip(data) {
                *s ^= d;
            }
            return self.counter;
        }

        if offset > 0 {
            let (head, tail) = data.split_at(RATE - offset);
            for (s, d) in self.state[offset..RATE].iter_mut().zip(head) {
                *s ^= d;
            }
            data = tail;
            P::permute(&mut self.state);
        }

        while data.len() >= RATE {
            let (block, tail) = data.split_at(RATE);
            for (s, d) in self.state[..RATE].iter_mut().zip(block) {
                *s ^= d;
            }
            data = tail;
            P::permute(&mut self.state);
        }

        for (s, d) in self.state[..RATE].iter_mut().zip(data) {
            *s ^= d;
        }
        self.counter
    }

    /// Copy rate bytes into `data`, permuting at each block boundary. The
    /// state itself is unchanged between permutations.
    pub fn squeeze(&mut self, mut data: &mut [u8]) -> u64 {
        let offset = self.offset();
        self.counter += data.len() as u64;

        if offset + data.len() < RATE {
            for (d, s) in data.iter_mut().zip(&self.state[offset..]) {
                *d = *s;
            }
            return self.counter;
        }

        if offset > 0 {
            let (head, tail) = std::mem::take(&mut data).split_at_mut(RATE - offset);
            for (d, s) in head.iter_mut().zip(&self.state[offset..RATE]) {
                *d = *s;
            }
            data = tail;
            P::permute(&mut self.state);
        }

        while data.len() >= RATE {
            let (block, tail) = std::mem::take(&mut data).split_at_mut(RATE);
            block.copy_from_slice(&self.state[..RATE]);
            data = tail;
            P::permute(&mut self.state);
        }

        let length = data.len();
        data.copy_from_slice(&self.state[..length]);
        self.counter
    }

    /// Encrypt `data` in place: XOR each plaintext byte into the rate, then
    /// read the rate back out as ciphertext.
    pub fn encrypt(&mut self, mut data: &mut [u8]) -> u64 {
        let offset = self.offset();
        self.counter += data.len() as u64;

        if offset + data.len() < RATE {
            for (s, d) in self.state[offset..].iter_mut().zip(data.iter_mut()) {
                *s ^= *d;
                *d = *s;
            }
            return self.counter;
        }

        if offset > 0 {
            let (head, tail) = std::mem::take(&mut data).split_at_mut(RATE - offset);
            for (s, d) in self.state[offset..RATE].iter_mut().zip(head) {
                *s ^= *d;
                *d = *s;
            }
            data = tail;
            P::permute(&mut self.state);
        }

        while data.len() >= RATE {
            let (block, tail) = std::mem::take(&mut data).split_at_mut(RATE);
            for (s, d) in self.state[..RATE].iter_mut().zip(block) {
                *s ^= *d;
                *d = *s;
            }
            data = tail;
            P::permute(&mut self.state);
        }

        for (s, d) in self.state[..RATE].iter_mut().zip(data) {
            *s ^= *d;
            *d = *s;
        }
        self.counter
    }

    /// Decrypt `data` in place: XOR the rate into each ciphertext byte, then
    /// fold the recovered plaintext back into the rate, leaving the rate
    /// equal to the ciphertext.
    pub fn decrypt(&mut self, mut data: &mut [u8]) -> u64 {
        let offset = self.offset();
        self.counter += data.len() as u64;

        if offset + data.len() < RATE {
            for (s, d) in self.state[offset..].iter_mut().zip(data.iter_mut()) {
                *d ^= *s;
                *s ^= *d;
            }
            return self.counter;
        }

        if offset > 0 {
            let (head, tail) = std::mem::take(&mut data).split_at_mut(RATE - offset);
            for (s, d) in self.state[offset..RATE].iter_mut().zip(head) {
                *d ^= *s;
                *s ^= *d;
            }
            data = tail;
            P::permute(&mut self.state);
        }

        while data.len() >= RATE {
            let (block, tail) = std::mem::take(&mut data).split_at_mut(RATE);
            for (s, d) in self.state[..RATE].iter_mut().zip(block) {
                *d ^= *s;
                *s ^= *d;
            }
            data = tail;
            P::permute(&mut self.state);
        }

        for (s, d) in self.state[..RATE].iter_mut().zip(data) {
            *d ^= *s;
            *s ^= *d;
        }
        self.counter
    }

    /// Close the current logical message: set one padding bit at the first
    /// free rate byte and one at the last capacity byte, permute, and round
    /// the counter up to the next block boundary.
    ///
    /// The double bit separates messages without making the number of
    /// permutation calls depend on the message length modulo the rate.
    pub fn pad(&mut self) -> u64 {
        self.state[self.offset()] ^= 0x01;
        self.state[47] ^= 0x01;
        P::permute(&mut self.state);
        self.counter = (self.counter | 15) + 1;
        self.counter
    }

    /// Irreversibly forget past inputs: zero the unconsumed rate, permute,
    /// then zero the consumed rate. Always advances the counter by a full
    /// block, even when the offset is zero.
    pub fn ratchet(&mut self) -> u64 {
        let offset = self.offset();
        self.state[offset..RATE].fill(0);
        P::permute(&mut self.state);
        self.state[..offset].fill(0);
        self.counter += RATE as u64;
        self.counter
    }

    pub(crate) fn state(&self) -> &[u8; 48] {
        &self.state
    }

    pub(crate) fn state_mut(&mut self) -> &mut [u8; 48] {
        &mut self.state
    }

    /// Apply the permutation without accounting for any bytes.
    pub(crate) fn permute(&mut self) {
        P::permute(&mut self.state);
    }

    /// Credit `bytes` to the counter without touching the state.
    pub(crate) fn advance(&mut self, bytes: u64) {
        self.counter += bytes;
    }
}

impl<P: Permutation> Zeroize for Duplex<P> {
    fn zeroize(&mut self) {
        self.state.zeroize();
        self.counter.zeroize();
    }
}

impl<P: Permutation> Drop for Duplex<P> {
    fn drop(&mut self) {
        self.zeroize();
    }
}

/// Compare two buffers in time depending only on `length`, returning 0 when
/// they are equal and -1 otherwise. A `None` operand reads as all-zero
/// bytes, so a tag can be checked against zero without materialising a zero
/// buffer.
pub fn compare(a: Option<&[u8]>, b: Option<&[u8]>, length: usize) -> i32 {
    let mut acc = 0;
    for i in 0..length {
        acc |= a.map_or(0, |a| a[i]) ^ b.map_or(0, |b| b[i]);
    }
    -i32::from(acc != 0)
}
