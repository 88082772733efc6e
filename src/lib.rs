#[cfg(test)]
mod test;

#[cfg(doc)]
pub mod doc;

mod duplex;
pub mod envelope;
pub mod shamir;
mod swirl;
pub mod x25519;

pub use {
    duplex::{compare, Duplex, Gimli, Permutation, Xoodoo, RATE},
    swirl::swirl,
};

/// A duplex over the Gimli permutation.
pub type GimliDuplex = Duplex<Gimli>;

/// A duplex over the Xoodoo permutation.
pub type XoodooDuplex = Duplex<Xoodoo>;
