//! Arithmetic in GF(2^255 − 19).
//!
//! Elements are held unreduced between operations, carrying a few bits of
//! overflow per limb; `propagate` folds the top bit back in multiplied by
//! 19, and full reduction happens only in [`Element::encode`]. Every
//! operation runs the same limb sequence regardless of the values involved:
//! no branches, no table lookups.

use {
    super::limb::{self, adc, adc0, umaal, Limb, SignedWide, Wide, BITS, LIMBS},
    std::ops,
    zeroize::Zeroize,
};

/// An integer modulo 2^255 − 19, not necessarily reduced.
#[derive(Clone, Copy, Default)]
pub(crate) struct Element([Limb; LIMBS]);

pub(crate) const ZERO: Element = Element(limb::limbs([0, 0, 0, 0]));
pub(crate) const ONE: Element = Element(limb::limbs([1, 0, 0, 0]));

/// The curve constant 486662.
pub(crate) const A: Element = Element(limb::limbs([486662, 0, 0, 0]));

/// A square root of −1, used to fix up roots of non-residue quarters.
const SQRT_M1: Element = Element(limb::limbs([
    0xc4ee1b274a0ea0b0,
    0x2f431806ad2fe478,
    0x2b4d00993dfbd7a7,
    0x2b8324804fc1df0b,
]));

/// The inversion chain: for each step, square `n` times into slot `a`
/// continuing from the previous result, then multiply by slot `c`. Applied
/// to a five-slot scratch seeded with x in slot 1, it leaves x^(p−2) in
/// slot 3.
const STEPS: [(usize, usize, u32); 13] = [
    (2, 1, 1),
    (2, 1, 1),
    (4, 2, 3),
    (2, 4, 6),
    (3, 1, 1),
    (3, 2, 12),
    (4, 3, 25),
    (2, 3, 25),
    (2, 4, 50),
    (3, 2, 125),
    (3, 1, 2),
    (3, 1, 2),
    (3, 1, 1),
];

/// Fold the overflow above bit 255 back into the low limb, times 19.
fn propagate(x: &mut [Limb; LIMBS], over: Limb) {
    let over = x[LIMBS - 1] >> (BITS - 1) | over << 1;
    x[LIMBS - 1] &= !(1 << (BITS - 1));

    let mut carry = over * 19;
    for limb in x.iter_mut() {
        *limb = adc0(&mut carry, *limb);
    }
}

/// Schoolbook product against `b`, which may be shorter than a full
/// element for small-scalar multiples. The high half of the double-width
/// accumulator folds back via ×38 = 2 × 19.
fn mul(a: &[Limb; LIMBS], b: &[Limb]) -> Element {
    let mut accum = [0; 2 * LIMBS];
    for (i, &mand) in b.iter().enumerate() {
        let mut carry = 0;
        for j in 0..LIMBS {
            accum[i + j] = umaal(&mut carry, accum[i + j], mand, a[j]);
        }
        accum[i + LIMBS] = carry;
    }

    let mut out = [0; LIMBS];
    let mut carry = 0;
    for j in 0..LIMBS {
        out[j] = umaal(&mut carry, accum[j], 38, accum[j + LIMBS]);
    }
    propagate(&mut out, carry);
    Element(out)
}

impl ops::Add for Element {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        let mut out = [0; LIMBS];
        let mut carry = 0;
        for i in 0..LIMBS {
            out[i] = adc(&mut carry, self.0[i], rhs.0[i]);
        }
        propagate(&mut out, carry);
        Self(out)
    }
}

impl ops::Sub for Element {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        // Seeding the borrow with −38 keeps the running value non-negative
        // for any operands within the unreduced range.
        let mut out = [0; LIMBS];
        let mut carry: SignedWide = -38;
        for i in 0..LIMBS {
            carry += self.0[i] as SignedWide - rhs.0[i] as SignedWide;
            out[i] = carry as Limb;
            carry >>= BITS;
        }
        propagate(&mut out, (1 + carry) as Limb);
        Self(out)
    }
}

impl ops::Mul for Element {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        mul(&self.0, &rhs.0)
    }
}

impl Element {
    pub(crate) fn unpack(bytes: &[u8; 32]) -> Self {
        Self(limb::unpack(bytes))
    }

    pub(crate) fn sqr(self) -> Self {
        self * self
    }

    /// Multiply by a small constant.
    pub(crate) fn scale(self, k: u32) -> Self {
        mul(&self.0, &[k as Limb])
    }

    /// Reduce to the canonical representative and encode it, returning the
    /// all-ones mask when the element is congruent to zero.
    pub(crate) fn encode(mut self) -> ([u8; 32], Limb) {
        let mut carry: Limb = 19;
        for limb in self.0.iter_mut() {
            *limb = adc0(&mut carry, *limb);
        }
        propagate(&mut self.0, carry);

        let mut carry: SignedWide = -19;
        let mut nonzero: Limb = 0;
        for limb in self.0.iter_mut() {
            carry += *limb as SignedWide;
            *limb = carry as Limb;
            nonzero |= *limb;
            carry >>= BITS;
        }
        let mask = ((nonzero as Wide).wrapping_sub(1) >> BITS) as Limb;
        (limb::pack(&self.0), mask)
    }

    /// The all-ones mask when the element is congruent to zero.
    pub(crate) fn is_zero(self) -> Limb {
        self.encode().1
    }

    /// x^(p−2), the multiplicative inverse of nonzero x.
    pub(crate) fn invert(self) -> Self {
        let mut xs = [ZERO; 5];
        xs[1] = self;
        let mut p = 1;
        for &(a, c, n) in &STEPS {
            for _ in 0..n {
                xs[a] = xs[p].sqr();
                p = a;
            }
            xs[a] = xs[a] * xs[c];
        }
        xs[3]
    }
}

impl Zeroize for Element {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

/// Swap two elements wherever the all-ones-or-zeros `mask` is set.
pub(crate) fn condswap(a: &mut Element, b: &mut Element, mask: Limb) {
    limb::condswap(&mut a.0, &mut b.0, mask);
}

/// `a` where the all-ones-or-zeros `mask` is set, `b` elsewhere.
pub(crate) fn select(mask: Limb, a: Element, b: Element) -> Element {
    let mut out = [0; LIMBS];
    for i in 0..LIMBS {
        out[i] = b.0[i] ^ ((a.0[i] ^ b.0[i]) & mask);
    }
    Element(out)
}

/// x^(2^252 − 3) by the classical ladder of squarings, used for inverse
/// square roots.
fn pow22523(z: Element) -> Element {
    fn nsqr(mut x: Element, n: u32) -> Element {
        for _ in 0..n {
            x = x.sqr();
        }
        x
    }

    let z2 = z.sqr();
    let z9 = nsqr(z2, 2) * z;
    let z11 = z9 * z2;
    let z31 = z11.sqr() * z9;
    let z1023 = nsqr(z31, 5) * z31;
    let t = nsqr(z1023, 10) * z1023;
    let t = nsqr(t, 20) * t;
    let t = nsqr(t, 10) * z1023;
    let z50 = t;
    let t = nsqr(t, 50) * z50;
    let z100 = t;
    let t = nsqr(t, 100) * z100;
    let t = nsqr(t, 50) * z50;
    nsqr(t, 2) * z
}

/// Compute 1/√x. The second result is the all-ones mask when x was a
/// nonzero square; otherwise the root is meaningless.
pub(crate) fn invsqrt(x: Element) -> (Element, Limb) {
    // x^((p−5)/8) is off from the inverse root by a factor x^((p−1)/4),
    // which is ±1 exactly when x is a nonzero square.
    let t = pow22523(x);
    let check = x * t.sqr();
    let even = (check - ONE).is_zero();
    let odd = (check + ONE).is_zero();
    (select(even, t, t * SQRT_M1), even | odd)
}

#[cfg(test)]
mod test {
    use super::*;

    fn small(n: u64) -> Element {
        Element(limb::limbs([n, 0, 0, 0]))
    }

    fn bytes(x: Element) -> [u8; 32] {
        x.encode().0
    }

    #[test]
    fn zero_mask() {
        assert_ne!(ZERO.is_zero(), 0);
        assert_ne!((small(19) - small(19)).is_zero(), 0);
        // The modulus itself is congruent to zero.
        let p = Element(limb::limbs([
            0xffffffffffffffed,
            0xffffffffffffffff,
            0xffffffffffffffff,
            0x7fffffffffffffff,
        ]));
        assert_ne!(p.is_zero(), 0);
        assert_eq!(ONE.is_zero(), 0);
    }

    #[test]
    fn ring_identities() {
        let a = small(0x123456789abcdef);
        let b = small(0xfedcba987654321);
        assert_eq!(bytes(a + b), bytes(b + a));
        assert_eq!(bytes(a - b + b), bytes(a));
        assert_eq!(bytes(a * b), bytes(b * a));
        assert_eq!(bytes((a + b) * a), bytes(a * a + b * a));
        assert_eq!(bytes(a.sqr()), bytes(a * a));
        assert_eq!(bytes(a.scale(38)), bytes(a * small(38)));
    }

    #[test]
    fn inversion() {
        let a = small(0xdeadbeef);
        assert_eq!(bytes(a * a.invert()), bytes(ONE));
    }

    #[test]
    fn inverse_square_roots() {
        // 4 is always a square; 2 is a non-residue modulo 2^255 − 19.
        let (root, mask) = invsqrt(small(4));
        assert_ne!(mask, 0);
        assert_eq!(bytes(root.sqr() * small(4)), bytes(ONE));
        let (_, mask) = invsqrt(small(2));
        assert_eq!(mask, 0);
    }

    #[test]
    fn conditional_swaps() {
        let (mut a, mut b) = (small(3), small(7));
        condswap(&mut a, &mut b, 0);
        assert_eq!(bytes(a), bytes(small(3)));
        condswap(&mut a, &mut b, !0);
        assert_eq!(bytes(a), bytes(small(7)));
        assert_eq!(bytes(b), bytes(small(3)));
        assert_eq!(bytes(select(!0, a, b)), bytes(a));
        assert_eq!(bytes(select(0, a, b)), bytes(b));
    }
}
