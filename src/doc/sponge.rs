//! Duplex sponges turn one public permutation into a whole symmetric
//! toolkit.
//!
//! A sponge splits its state into a public *rate* and a hidden *capacity*.
//! Input is XORed into the rate and output is read back out of it, with the
//! permutation scrambling the whole state between blocks; the capacity is
//! never directly touched by input or output, and its width bounds the
//! security of every mode built on top. Here the state is 384 bits, the
//! rate 16 bytes, the capacity 32.
//!
//! The *duplex* variant keeps the state alive between calls instead of
//! processing one message and stopping. Absorbing key material, encrypting
//! a buffer, squeezing a tag, and absorbing more data all interleave on the
//! same object, which is what lets a single construction serve as a hash,
//! a stream cipher, a MAC, and an authenticated-encryption mode at once:
//! encryption XORs plaintext against the rate and leaves the ciphertext in
//! the rate, so the state after encrypting depends on everything processed
//! so far and a squeezed tag authenticates it all.
//!
//! # Padding
//!
//! Logical message boundaries need marking, or `absorb("ab"); absorb("c")`
//! and `absorb("abc")` followed by different data could collide. [`pad`]
//! XORs one bit at the current rate offset and a second bit into the last
//! capacity byte, then permutes. Because the permutation call happens
//! whether or not the block was full, message timing does not reveal
//! message length modulo the rate.
//!
//! # Ratcheting
//!
//! [`ratchet`] overwrites the rate with zeros around a permutation call.
//! Afterwards the state can no longer be rolled back to recover earlier
//! inputs even by an attacker who captures it whole, which gives forward
//! secrecy to long-lived transcript objects.
//!
//! [`pad`]: crate::Duplex::pad
//! [`ratchet`]: crate::Duplex::ratchet
