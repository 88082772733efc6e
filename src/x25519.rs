//! X25519: Diffie–Hellman over Curve25519, a Schnorr-style signature
//! primitive built from it, and scalar/point mapping helpers.
//!
//! Keys, points and scalars all travel as 32 little-endian bytes. The
//! Montgomery ladder is uniform: one conditional swap and two fixed ladder
//! steps per scalar bit, with no secret-dependent branches or indexing.
//! Failures are reported as values; an all-zero shared point surfaces as
//! [`LowOrderPoint`] so key agreement against a small-subgroup key can be
//! rejected.

mod element;
mod limb;
mod scalar;

use {
    docext::docext,
    element::Element,
    limb::{Limb, BITS, LIMBS},
    std::fmt,
    zeroize::Zeroize,
};

/// The base point of the curve: x = 9.
pub const BASE: [u8; 32] = {
    let mut bytes = [0; 32];
    bytes[0] = 9;
    bytes
};

/// The shared point of a key agreement was the all-zero point, meaning the
/// peer's public key lay in the small torsion subgroup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LowOrderPoint;

impl fmt::Display for LowOrderPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("low-order public point")
    }
}

impl std::error::Error for LowOrderPoint {}

/// A signature failed to verify against its challenge and public keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidSignature;

impl fmt::Display for InvalidSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid signature")
    }
}

impl std::error::Error for InvalidSignature {}

const X2: usize = 0;
const Z2: usize = 1;
const X3: usize = 2;
const Z3: usize = 3;
const T1: usize = 4;

/// The shared addition half of a ladder step over the five-slot state.
fn ladder1(xs: &mut [Element; 5]) {
    xs[T1] = xs[X2] + xs[Z2];
    xs[Z2] = xs[X2] - xs[Z2];
    xs[X2] = xs[X3] + xs[Z3];
    xs[Z3] = xs[X3] - xs[Z3];
    xs[Z3] = xs[Z3] * xs[T1];
    xs[X2] = xs[X2] * xs[Z2];
    xs[X3] = xs[Z3] + xs[X2];
    xs[Z3] = xs[Z3] - xs[X2];
    xs[T1] = xs[T1].sqr();
    xs[Z2] = xs[Z2].sqr();
    xs[X2] = xs[T1] - xs[Z2];
    xs[Z2] = xs[X2].scale(121665);
    xs[Z2] = xs[Z2] + xs[T1];
}

/// The doubling half of a ladder step, completing against the base-point
/// difference `x1`.
fn ladder2(xs: &mut [Element; 5], x1: Element) {
    xs[Z3] = xs[Z3].sqr();
    xs[Z3] = xs[Z3] * x1;
    xs[X3] = xs[X3].sqr();
    xs[Z2] = xs[Z2] * xs[X2];
    xs[X2] = xs[T1] - xs[X2];
    xs[X2] = xs[X2] * xs[T1];
}

/// Run the full 256-bit ladder, returning the projective results
/// `(x2, z2) = scalar·point` and `(x3, z3) = (scalar+1)·point`.
fn ladder(scalar: &[u8; 32], point: &[u8; 32]) -> [Element; 5] {
    let x1 = Element::unpack(point);
    let mut xs = [element::ZERO; 5];
    xs[X2] = element::ONE;
    xs[Z3] = element::ONE;
    xs[X3] = x1;

    let mut swap: Limb = 0;
    for i in (0..256).rev() {
        let bit = (scalar[i >> 3] >> (i & 7)) & 1;
        let doswap = (bit as Limb).wrapping_neg();
        let (head, tail) = xs.split_at_mut(2);
        element::condswap(&mut head[X2], &mut tail[0], swap ^ doswap);
        element::condswap(&mut head[Z2], &mut tail[1], swap ^ doswap);
        swap = doswap;

        ladder1(&mut xs);
        ladder2(&mut xs, x1);
    }

    let (head, tail) = xs.split_at_mut(2);
    element::condswap(&mut head[X2], &mut tail[0], swap);
    element::condswap(&mut head[Z2], &mut tail[1], swap);
    xs
}

/// Ladder, project to affine, encode. The mask is all-ones when the result
/// is the zero point.
fn ladder_output(scalar: &[u8; 32], point: &[u8; 32]) -> ([u8; 32], Limb) {
    let mut xs = ladder(scalar, point);
    let affine = xs[X2] * xs[Z2].invert();
    let (bytes, mask) = affine.encode();
    xs.zeroize();
    (bytes, mask)
}

/// Multiply `point` by `scalar`, rejecting an all-zero shared point.
///
/// RFC 7748 scalar clamping is the caller's business: all 256 bits of
/// `scalar` are consumed as given.
pub fn exchange(scalar: &[u8; 32], point: &[u8; 32]) -> Result<[u8; 32], LowOrderPoint> {
    let (shared, mask) = ladder_output(scalar, point);
    if mask != 0 {
        Err(LowOrderPoint)
    } else {
        Ok(shared)
    }
}

/// Multiply the base point by `scalar`. No low-order check: honestly
/// generated secrets cannot land on the zero point.
pub fn public_key(scalar: &[u8; 32]) -> [u8; 32] {
    ladder_output(scalar, &BASE).0
}

/// Compute the signature response `challenge·identity + ephemeral (mod ℓ)`.
pub fn sign(challenge: &[u8; 32], ephemeral: &[u8; 32], identity: &[u8; 32]) -> [u8; 32] {
    let mut acc = limb::unpack(ephemeral);
    let mut id = limb::unpack(identity);
    scalar::montmla(&mut acc, &id, &limb::unpack(challenge));
    let mut response = scalar::montmul(&acc, &scalar::R2);
    let bytes = limb::pack(&response);
    acc.zeroize();
    id.zeroize();
    response.zeroize();
    bytes
}

/// Check that `response·G` equals `ephemeral + challenge·identity` in the
/// group, given the x-coordinates of the public points.
///
/// Two ladders and one combined differential-addition step produce a
/// projective identity that holds exactly when the response matches; the
/// final comparison is on public values.
pub fn verify(
    response: &[u8; 32],
    challenge: &[u8; 32],
    ephemeral: &[u8; 32],
    identity: &[u8; 32],
) -> Result<(), InvalidSignature> {
    let first = ladder(challenge, identity);
    let mut xs = ladder(response, &BASE);
    let xe = Element::unpack(ephemeral);

    xs[X3] = first[X2];
    xs[Z3] = first[Z2];
    ladder1(&mut xs);

    let z2 = (xs[Z2] * first[X2] * first[Z2] * xe).scale(16);
    let z3 = (xs[Z3] * xe - xs[X3]).sqr() - z2;

    if z2.is_zero() | !z3.is_zero() != 0 {
        Err(InvalidSignature)
    } else {
        Ok(())
    }
}

/// ℓ − 2, the exponent inverting nonzero scalars by Fermat's little
/// theorem.
const EXPONENT: [u8; 32] = [
    0xeb, 0xd3, 0xf5, 0x5c, 0x1a, 0x63, 0x12, 0x58, 0xd6, 0x9c, 0xf7, 0xa2, 0xde, 0xf9, 0xde,
    0x14, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x10,
];

/// Compute `scalar⁻¹ mod ℓ`.
///
/// Sliding-window exponentiation by the fixed public exponent ℓ − 2 over a
/// table of the sixteen odd Montgomery powers; the window scan branches
/// only on exponent bits, which are compile-time constants.
pub fn invert(scalar: &[u8; 32]) -> [u8; 32] {
    fn bit(i: isize) -> usize {
        (EXPONENT[(i >> 3) as usize] >> (i & 7)) as usize & 1
    }

    let mut x = limb::unpack(scalar);
    let mont = scalar::montmul(&x, &scalar::R2);
    let sqr = scalar::montmul(&mont, &mont);
    let mut table = [mont; 16];
    for i in 1..16 {
        table[i] = scalar::montmul(&table[i - 1], &sqr);
    }

    // The top window of ℓ − 2 is the lone bit 252.
    let mut acc = table[0];
    let mut i: isize = 251;
    while i >= 0 {
        if bit(i) == 0 {
            acc = scalar::montmul(&acc, &acc);
            i -= 1;
            continue;
        }
        let mut j = std::cmp::max(i - 4, 0);
        while bit(j) == 0 {
            j += 1;
        }
        let mut window = 0;
        for k in (j..=i).rev() {
            window = window << 1 | bit(k);
        }
        for _ in j..=i {
            acc = scalar::montmul(&acc, &acc);
        }
        acc = scalar::montmul(&acc, &table[window >> 1]);
        i = j - 1;
    }

    let mut plain = scalar::montmul(&acc, &limb::limbs([1, 0, 0, 0]));
    let bytes = limb::pack(&plain);
    x.zeroize();
    table.zeroize();
    acc.zeroize();
    plain.zeroize();
    bytes
}

/// Map an arbitrary 32-byte field element to the x-coordinate of a curve
/// point.
///
/// The first Elligator2 candidate is $u_1 = -A / (1 + 2r^2)$; it lies on
/// the curve exactly when $g(u_1) = u_1(u_1^2 + Au_1 + 1)$ is a square,
/// and $-A - u_1$ lies on the curve otherwise. The inverse square root's
/// mask picks between them without branching.
#[docext]
pub fn map_point(element: &[u8; 32]) -> [u8; 32] {
    let r = Element::unpack(element);
    let w = element::ONE + r.sqr().scale(2);
    let u1 = (element::ZERO - element::A) * w.invert();
    let g = u1 * (u1.sqr() + element::A * u1 + element::ONE);
    let (_, square) = element::invsqrt(g);
    let u2 = element::ZERO - element::A - u1;
    element::select(square, u1, u2).encode().0
}

/// Map an arbitrary 32-byte value to an equivalent torsion-safe scalar.
///
/// One Montgomery multiply by 2^253 mod ℓ divides by eight, and the
/// three-bit left shift multiplies back, so the result acts identically on
/// the prime-order subgroup while its bottom three bits are zero.
pub fn map_scalar(scalar: &[u8; 32]) -> [u8; 32] {
    let mut s = limb::unpack(scalar);
    let mut eighth = scalar::montmul(&s, &scalar::R_OVER_8);
    let mut out = [0; LIMBS];
    let mut carry = 0;
    for i in 0..LIMBS {
        out[i] = eighth[i] << 3 | carry;
        carry = eighth[i] >> (BITS - 3);
    }
    let bytes = limb::pack(&out);
    s.zeroize();
    eighth.zeroize();
    out.zeroize();
    bytes
}

#[cfg(test)]
mod test {
    use super::*;

    /// The ladder with a scalar of one returns any point unchanged, so the
    /// base point is its own image.
    #[test]
    fn scalar_one_identity() {
        let mut one = [0; 32];
        one[0] = 1;
        assert_eq!(exchange(&one, &BASE).unwrap(), BASE);
    }

    /// Mapped representatives land on the curve itself rather than its
    /// quadratic twist.
    #[test]
    fn mapped_points_lie_on_the_curve() {
        for seed in 0..32u8 {
            let mut representative = [0; 32];
            for (i, byte) in representative.iter_mut().enumerate() {
                *byte = seed.wrapping_mul(151).wrapping_add(i as u8).wrapping_mul(59);
            }
            let u = Element::unpack(&map_point(&representative));
            let g = u * (u.sqr() + element::A * u + element::ONE);
            let (_, square) = element::invsqrt(g);
            assert_ne!(square, 0);
        }
    }
}
