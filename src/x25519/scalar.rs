//! Arithmetic modulo the group order ℓ = 2^252 + 27742317777372353535851937790883648493.
//!
//! Scalars are multiplied in Montgomery form with R = 2^(limb bits × limbs):
//! `montmla` computes `(out + x·y)·R⁻¹ mod ℓ` with the reduction interleaved
//! into the product, so no double-width storage ever exists. Operands may be
//! arbitrary 256-bit values; the result is always fully reduced.

use super::limb::{self, adc, umaal, Limb, SignedWide, BITS, LIMBS};

pub(crate) type Scalar = [Limb; LIMBS];

/// ℓ, the prime order of the base point.
pub(crate) const GROUP_ORDER: Scalar = limb::limbs([
    0x5812631a5cf5d3ed,
    0x14def9dea2f79cd6,
    0x0000000000000000,
    0x1000000000000000,
]);

/// The low limb of −ℓ⁻¹ mod R, driving the interleaved reduction.
const MONTGOMERY: Limb = 0xd2b51da312547e1bu64 as Limb;

/// R² mod ℓ, for conversion into Montgomery form.
pub(crate) const R2: Scalar = limb::limbs([
    0xa40611e3449c0f01,
    0xd00e1ba768859347,
    0xceec73d217f5be65,
    0x0399411b7c309a3d,
]);

/// 2^253 mod ℓ, which is R/8: one `montmul` against it divides by eight.
pub(crate) const R_OVER_8: Scalar = limb::limbs([
    0xa7ed9ce5a30a2c13,
    0xeb2106215d086329,
    0xffffffffffffffff,
    0x0fffffffffffffff,
]);

/// `out = (out + x·y)·R⁻¹ mod ℓ`.
pub(crate) fn montmla(out: &mut Scalar, x: &Scalar, y: &Scalar) {
    let mut highcarry = 0;
    for i in 0..LIMBS {
        let mut carry1 = 0;
        let mut carry2 = 0;
        let mand1 = x[i];
        let mut mand2 = MONTGOMERY;
        for j in 0..LIMBS {
            let mut acc = out[j];
            acc = umaal(&mut carry1, acc, mand1, y[j]);
            if j == 0 {
                mand2 = mand2.wrapping_mul(acc);
            }
            acc = umaal(&mut carry2, acc, mand2, GROUP_ORDER[j]);
            if j > 0 {
                out[j - 1] = acc;
            }
        }
        out[LIMBS - 1] = adc(&mut highcarry, carry1, carry2);
    }

    // Subtract ℓ, then add it back scaled by the borrow and the
    // accumulated overflow, leaving the result in [0, ℓ).
    let mut scarry: SignedWide = 0;
    for i in 0..LIMBS {
        scarry += out[i] as SignedWide - GROUP_ORDER[i] as SignedWide;
        out[i] = scarry as Limb;
        scarry >>= BITS;
    }

    let mut carry1 = 0;
    let carry2 = (scarry as Limb).wrapping_add(highcarry).wrapping_neg();
    for i in 0..LIMBS {
        out[i] = umaal(&mut carry1, out[i], carry2, GROUP_ORDER[i]);
    }
}

/// `x·y·R⁻¹ mod ℓ`.
pub(crate) fn montmul(x: &Scalar, y: &Scalar) -> Scalar {
    let mut out = [0; LIMBS];
    montmla(&mut out, x, y);
    out
}
