//! Threshold sharing and bit-sliced field arithmetic.
//!
//! Shamir's scheme hides a secret as the constant term of a random
//! polynomial of degree t − 1. Each share is the polynomial evaluated at a
//! distinct nonzero point, so any t shares determine the polynomial by
//! interpolation while t − 1 shares are consistent with every possible
//! secret: the scheme is information-theoretically hiding, not merely
//! computationally.
//!
//! Working over GF(2^8) keeps every share byte-sized. Addition is XOR, and
//! multiplication is carryless polynomial multiplication reduced modulo
//! x^8 + x^4 + x^3 + x + 1. Reconstruction evaluates the Lagrange basis at
//! zero, where each basis coefficient is a ratio of products of share
//! indices.
//!
//! # Bit-slicing
//!
//! A table-driven GF(2^8) multiply leaks its operands through cache
//! timing. Instead, the 32 bytes of a secret are transposed into eight
//! 32-bit words, word j holding bit j of every byte. One XOR then adds 32
//! field elements at once, and an 8×8 network of ANDs and XORs multiplies
//! all 32 in parallel, touching memory in a fixed pattern regardless of
//! the values involved. Squaring is cheaper still: in characteristic two
//! it is linear, a zero-interleave of the bit lanes followed by the same
//! reduction. Inversion is x^254, a short fixed chain of squarings and
//! multiplications, so division by a share index never branches either.
//!
//! # What failure looks like
//!
//! Reconstruction from too few or corrupted shares does not error: it
//! produces a uniformly wrong secret indistinguishable from a right one.
//! Callers that need to detect bad quorums must bind the secret to
//! something checkable, such as using it as a key whose decryption
//! authenticates.
