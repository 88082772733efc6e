//! Byte-level message envelopes composed from the core primitives.
//!
//! These are the formats the command-line front-ends read and write, with
//! all I/O, prompting and entropy acquisition left to the caller:
//!
//! | message | layout |
//! |---|---|
//! | anonymous | ephemeral public key (32) ‖ body |
//! | keyed | nonce (16) ‖ body |
//! | signature | commitment point (32) ‖ response (32) |
//! | cloaked | salt (16) ‖ body |
//!
//! A body seals each 64 KiB plaintext chunk as `ciphertext ‖ tag(16)`, the
//! tag squeezed after padding, and always ends with a short (possibly
//! empty) final chunk, so truncating a message always breaks a tag.

use {
    crate::{
        duplex::{compare, Duplex, Permutation, RATE},
        swirl::swirl,
        x25519,
    },
    std::fmt,
    zeroize::Zeroize,
};

/// Plaintext bytes sealed under each tag.
const CHUNK: usize = 65536;

/// Why an envelope failed to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecryptError {
    /// The message is shorter than the framing it claims.
    Truncated,
    /// A low-order public key produced a degenerate shared point.
    LowOrderPoint,
    /// A chunk tag did not match: the message is corrupt or keyed wrongly.
    Authentication,
}

impl fmt::Display for DecryptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Truncated => f.write_str("truncated message"),
            Self::LowOrderPoint => f.write_str("low-order public point"),
            Self::Authentication => f.write_str("authentication failed"),
        }
    }
}

impl std::error::Error for DecryptError {}

impl From<x25519::LowOrderPoint> for DecryptError {
    fn from(_: x25519::LowOrderPoint) -> Self {
        Self::LowOrderPoint
    }
}

/// Clamp 32 bytes of entropy into an exchange secret and derive its public
/// key.
pub fn keypair(entropy: [u8; 32]) -> ([u8; 32], [u8; 32]) {
    let mut secret = entropy;
    secret[0] &= 0xf8;
    secret[31] &= 0x7f;
    secret[31] |= 0x40;
    let public = x25519::public_key(&secret);
    (secret, public)
}

/// Seal `plaintext` chunk by chunk into `out`.
fn seal_body<P: Permutation>(state: &mut Duplex<P>, plaintext: &[u8], out: &mut Vec<u8>) {
    let mut offset = 0;
    loop {
        let length = (plaintext.len() - offset).min(CHUNK);
        let start = out.len();
        out.extend_from_slice(&plaintext[offset..offset + length]);
        state.encrypt(&mut out[start..]);
        state.pad();

        let mut tag = [0; RATE];
        state.squeeze(&mut tag);
        out.extend_from_slice(&tag);

        offset += length;
        if length < CHUNK {
            return;
        }
    }
}

/// Open a chunked body, checking every tag before the plaintext is
/// returned.
fn open_body<P: Permutation>(state: &mut Duplex<P>, body: &[u8]) -> Result<Vec<u8>, DecryptError> {
    let mut out = Vec::with_capacity(body.len());
    let mut failure = 0;
    let mut rest = body;
    loop {
        let last = rest.len() <= CHUNK + RATE;
        let length = if last {
            rest.len().checked_sub(RATE).ok_or(DecryptError::Truncated)?
        } else {
            CHUNK
        };

        let start = out.len();
        out.extend_from_slice(&rest[..length]);
        state.decrypt(&mut out[start..]);
        state.pad();

        let mut tag: [u8; RATE] = rest[length..length + RATE].try_into().unwrap();
        state.decrypt(&mut tag);
        failure |= compare(Some(&tag), None, RATE);

        rest = &rest[length + RATE..];
        if last {
            break;
        }
    }

    if failure != 0 {
        out.zeroize();
        return Err(DecryptError::Authentication);
    }
    Ok(out)
}

/// Encrypt to a public key under a fresh ephemeral identity built from
/// `entropy`, prefixing the ephemeral public key.
pub fn seal_anonymous<P: Permutation>(
    recipient: &[u8; 32],
    entropy: [u8; 32],
    plaintext: &[u8],
) -> Result<Vec<u8>, x25519::LowOrderPoint> {
    let mut scalar = entropy;
    let ephemeral = x25519::public_key(&scalar);
    let mut shared = x25519::exchange(&scalar, recipient)?;

    let mut state = Duplex::<P>::new();
    state.absorb(&shared);

    let mut out = ephemeral.to_vec();
    seal_body(&mut state, plaintext, &mut out);
    scalar.zeroize();
    shared.zeroize();
    Ok(out)
}

/// Decrypt an anonymous message with the recipient's secret key.
pub fn open_anonymous<P: Permutation>(
    secret: &[u8; 32],
    message: &[u8],
) -> Result<Vec<u8>, DecryptError> {
    if message.len() < 32 {
        return Err(DecryptError::Truncated);
    }
    let ephemeral = message[..32].try_into().unwrap();
    let mut shared = x25519::exchange(secret, &ephemeral)?;

    let mut state = Duplex::<P>::new();
    state.absorb(&shared);
    shared.zeroize();
    open_body(&mut state, &message[32..])
}

/// Encrypt between two long-term identities, prefixing the caller's nonce.
pub fn seal_keyed<P: Permutation>(
    secret: &[u8; 32],
    peer: &[u8; 32],
    nonce: [u8; 16],
    plaintext: &[u8],
) -> Result<Vec<u8>, x25519::LowOrderPoint> {
    let mut shared = x25519::exchange(secret, peer)?;

    let mut state = Duplex::<P>::new();
    state.absorb(&shared);
    state.absorb(&nonce);
    shared.zeroize();

    let mut out = nonce.to_vec();
    seal_body(&mut state, plaintext, &mut out);
    Ok(out)
}

/// Decrypt a keyed message from `peer`.
pub fn open_keyed<P: Permutation>(
    secret: &[u8; 32],
    peer: &[u8; 32],
    message: &[u8],
) -> Result<Vec<u8>, DecryptError> {
    if message.len() < 16 {
        return Err(DecryptError::Truncated);
    }
    let mut shared = x25519::exchange(secret, peer)?;

    let mut state = Duplex::<P>::new();
    state.absorb(&shared);
    state.absorb(&message[..16]);
    shared.zeroize();
    open_body(&mut state, &message[16..])
}

/// An incrementally absorbed message being signed.
///
/// The signature transcript is the padded message followed by the signer's
/// public identity; the ephemeral scalar is squeezed deterministically from
/// a fork of the transcript keyed with the secret, so no fresh entropy is
/// needed per message.
pub struct Signer<P: Permutation> {
    transcript: Duplex<P>,
}

impl<P: Permutation> Default for Signer<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Permutation> Signer<P> {
    pub fn new() -> Self {
        Self {
            transcript: Duplex::new(),
        }
    }

    pub fn absorb(&mut self, message: &[u8]) {
        self.transcript.absorb(message);
    }

    /// Close the message and produce `commitment ‖ response`. The identity
    /// is derived from the secret when not supplied.
    pub fn sign(mut self, secret: &[u8; 32], identity: Option<&[u8; 32]>) -> [u8; 64] {
        let identity = match identity {
            Some(public) => *public,
            None => x25519::public_key(secret),
        };
        self.transcript.pad();
        self.transcript.absorb(&identity);

        let mut seed = self.transcript.clone();
        seed.absorb(secret);
        let mut scalar = [0; 32];
        seed.squeeze(&mut scalar);
        let point = x25519::public_key(&scalar);

        self.transcript.absorb(&point);
        let mut challenge = [0; 32];
        self.transcript.squeeze(&mut challenge);

        let mut signature = [0; 64];
        signature[..32].copy_from_slice(&point);
        signature[32..].copy_from_slice(&x25519::sign(&challenge, &scalar, secret));
        scalar.zeroize();
        signature
    }
}

/// An incrementally absorbed message being verified.
pub struct Verifier<P: Permutation> {
    transcript: Duplex<P>,
}

impl<P: Permutation> Default for Verifier<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Permutation> Verifier<P> {
    pub fn new() -> Self {
        Self {
            transcript: Duplex::new(),
        }
    }

    pub fn absorb(&mut self, message: &[u8]) {
        self.transcript.absorb(message);
    }

    /// Recompute the challenge and check the response against it.
    pub fn verify(
        mut self,
        identity: &[u8; 32],
        signature: &[u8; 64],
    ) -> Result<(), x25519::InvalidSignature> {
        let point: &[u8; 32] = signature[..32].try_into().unwrap();
        let response: &[u8; 32] = signature[32..].try_into().unwrap();

        self.transcript.pad();
        self.transcript.absorb(identity);
        self.transcript.absorb(point);
        let mut challenge = [0; 32];
        self.transcript.squeeze(&mut challenge);

        x25519::verify(response, &challenge, point, identity)
    }
}

/// Sign a complete message in one call.
pub fn sign<P: Permutation>(
    secret: &[u8; 32],
    identity: Option<&[u8; 32]>,
    message: &[u8],
) -> [u8; 64] {
    let mut signer = Signer::<P>::new();
    signer.absorb(message);
    signer.sign(secret, identity)
}

/// Verify a complete message in one call.
pub fn verify<P: Permutation>(
    identity: &[u8; 32],
    signature: &[u8; 64],
    message: &[u8],
) -> Result<(), x25519::InvalidSignature> {
    let mut verifier = Verifier::<P>::new();
    verifier.absorb(message);
    verifier.verify(identity, signature)
}

/// Password-encrypt `plaintext`, prefixing the caller's salt. The working
/// buffer sets the memory cost: one page per kibibyte, walked over
/// `independent` data-independent and `dependent` data-dependent rounds.
pub fn cloak<P: Permutation>(
    password: &[u8],
    salt: [u8; 16],
    buffer: &mut [u8],
    independent: u64,
    dependent: u64,
    plaintext: &[u8],
) -> Vec<u8> {
    let mut state = Duplex::<P>::new();
    state.absorb(&salt);
    let mut seed = state.clone();
    state.absorb(password);
    state.pad();
    swirl(&mut state, &mut seed, buffer, independent, dependent);
    buffer.zeroize();

    let mut out = salt.to_vec();
    seal_body(&mut state, plaintext, &mut out);
    out
}

/// Open a password envelope. The buffer and round counts must match the
/// ones used to cloak.
pub fn reveal<P: Permutation>(
    password: &[u8],
    buffer: &mut [u8],
    independent: u64,
    dependent: u64,
    message: &[u8],
) -> Result<Vec<u8>, DecryptError> {
    if message.len() < 16 {
        return Err(DecryptError::Truncated);
    }
    let mut state = Duplex::<P>::new();
    state.absorb(&message[..16]);
    let mut seed = state.clone();
    state.absorb(password);
    state.pad();
    swirl(&mut state, &mut seed, buffer, independent, dependent);
    buffer.zeroize();

    open_body(&mut state, &message[16..])
}
