//! X-only Montgomery ladders and why they run in constant time.
//!
//! Curve25519 points are used here purely through their x-coordinates. The
//! Montgomery ladder walks the scalar's bits from the top, maintaining the
//! pair (x(kP), x((k+1)P)) in projective form: each step performs one
//! differential addition and one doubling, exactly the same field
//! operations for a zero bit as for a one bit. The only data-dependent
//! action is a swap of the two working points, and that swap is performed
//! with an arithmetic mask rather than a branch, so neither the instruction
//! stream nor the memory access pattern depends on the secret scalar.
//!
//! Division is deferred to the very end: the ladder works with fractions
//! x/z and only converts to an affine coordinate once, via Fermat's little
//! theorem, raising z to p − 2 through a fixed chain of squarings and
//! multiplications. A zero z — the point at infinity, reached only through
//! low-order inputs — survives the chain as zero and is reported to the
//! caller as a mask instead of a branch.
//!
//! # Signatures from the ladder
//!
//! A Schnorr-style signature needs one scalar equation,
//! `response = challenge·identity + ephemeral (mod ℓ)`, and a way for the
//! verifier to check the corresponding point equation seeing only
//! x-coordinates. The verifier runs two ladders, one for
//! `challenge·identity-point` and one for `response·base`, then uses a
//! single differential-addition step to test whether the ephemeral point's
//! x-coordinate is consistent with their sum or difference. Which of the
//! two it is does not matter: both satisfy the same projective identity,
//! which is why the signature carries the ephemeral point instead of a
//! hash of it.
//!
//! # Scalars in Montgomery form
//!
//! Arithmetic modulo the group order ℓ uses Montgomery multiplication:
//! operands carry a factor R = 2^256, and each multiplication divides by R
//! while it reduces, trading trial division for one extra multiplication
//! at the edges of a computation. The reduction is interleaved limb by
//! limb, so no double-width intermediate value is ever stored.
