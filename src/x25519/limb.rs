//! Limb layout shared by the field and scalar arithmetic.
//!
//! Two layouts produce identical byte encodings: four 64-bit limbs with
//! 128-bit intermediate products where the target is 64-bit, otherwise
//! eight 32-bit limbs with 64-bit intermediates.

#[cfg(target_pointer_width = "64")]
mod width {
    pub type Limb = u64;
    pub type Wide = u128;
    pub type SignedWide = i128;
    pub const LIMBS: usize = 4;
}

#[cfg(not(target_pointer_width = "64"))]
mod width {
    pub type Limb = u32;
    pub type Wide = u64;
    pub type SignedWide = i64;
    pub const LIMBS: usize = 8;
}

pub(crate) use width::{Limb, SignedWide, Wide, LIMBS};

pub(crate) const BITS: u32 = Limb::BITS;

/// Spread four 64-bit words over the limb layout, least significant first.
pub(crate) const fn limbs(words: [u64; 4]) -> [Limb; LIMBS] {
    let mut out = [0; LIMBS];
    let mut i = 0;
    while i < 4 {
        let step = LIMBS / 4;
        let mut k = 0;
        while k < step {
            out[step * i + k] = (words[i] >> (64 / step as u32 * k as u32)) as Limb;
            k += 1;
        }
        i += 1;
    }
    out
}

/// Multiply-accumulate: `acc + mand * mier + carry`, low limb returned, high
/// limb left in `carry`.
pub(crate) fn umaal(carry: &mut Limb, acc: Limb, mand: Limb, mier: Limb) -> Limb {
    let result = mand as Wide * mier as Wide + acc as Wide + *carry as Wide;
    *carry = (result >> BITS) as Limb;
    result as Limb
}

/// Add with carry in and out.
pub(crate) fn adc(carry: &mut Limb, acc: Limb, mand: Limb) -> Limb {
    let total = *carry as Wide + acc as Wide + mand as Wide;
    *carry = (total >> BITS) as Limb;
    total as Limb
}

/// Add the carry alone.
pub(crate) fn adc0(carry: &mut Limb, acc: Limb) -> Limb {
    let total = *carry as Wide + acc as Wide;
    *carry = (total >> BITS) as Limb;
    total as Limb
}

/// Load 32 little-endian bytes into limbs.
pub(crate) fn unpack(bytes: &[u8; 32]) -> [Limb; LIMBS] {
    let mut out = [0; LIMBS];
    for (limb, chunk) in out.iter_mut().zip(bytes.chunks_exact(32 / LIMBS)) {
        for (k, &byte) in chunk.iter().enumerate() {
            *limb |= (byte as Limb) << (8 * k as u32);
        }
    }
    out
}

/// Store limbs as 32 little-endian bytes.
pub(crate) fn pack(limbs: &[Limb; LIMBS]) -> [u8; 32] {
    let mut out = [0; 32];
    for (limb, chunk) in limbs.iter().zip(out.chunks_exact_mut(32 / LIMBS)) {
        for (k, byte) in chunk.iter_mut().enumerate() {
            *byte = (limb >> (8 * k as u32)) as u8;
        }
    }
    out
}

/// Branchlessly swap two limb arrays wherever `mask` bits are set. The mask
/// must be all-ones or all-zeros.
pub(crate) fn condswap(a: &mut [Limb], b: &mut [Limb], mask: Limb) {
    for (a, b) in a.iter_mut().zip(b) {
        let x = (*a ^ *b) & mask;
        *a ^= x;
        *b ^= x;
    }
}
