use {
    super::{bytes32, rng},
    crate::{envelope, Gimli, Xoodoo},
    rand::Rng,
};

/// Keypair, anonymous seal, open: the plaintext round-trips, and flipping
/// any single byte of the message is rejected.
#[test]
fn anonymous_round_trip_and_tamper() {
    let mut rng = rng();
    let (secret, public) = envelope::keypair(bytes32(&mut rng));

    let message =
        envelope::seal_anonymous::<Gimli>(&public, bytes32(&mut rng), b"hello world").unwrap();
    assert_eq!(
        envelope::open_anonymous::<Gimli>(&secret, &message).unwrap(),
        b"hello world"
    );

    for index in 0..message.len() {
        let mut corrupt = message.clone();
        corrupt[index] ^= 1;
        assert!(envelope::open_anonymous::<Gimli>(&secret, &corrupt).is_err());
    }
}

/// Chunked bodies round-trip across every framing boundary, and truncation
/// is always detected.
#[test]
fn chunk_boundaries() {
    let mut rng = rng();
    let (secret1, public1) = envelope::keypair(bytes32(&mut rng));
    let (secret2, public2) = envelope::keypair(bytes32(&mut rng));

    for length in [0, 1, 16, 65535, 65536, 65537, 3 * 65536 + 5] {
        let mut plaintext = vec![0u8; length];
        rng.fill(&mut plaintext[..]);
        let mut nonce = [0; 16];
        rng.fill(&mut nonce[..]);

        let message =
            envelope::seal_keyed::<Xoodoo>(&secret1, &public2, nonce, &plaintext).unwrap();
        assert_eq!(
            envelope::open_keyed::<Xoodoo>(&secret2, &public1, &message).unwrap(),
            plaintext
        );
        assert!(
            envelope::open_keyed::<Xoodoo>(&secret2, &public1, &message[..message.len() - 1])
                .is_err()
        );
    }
}

/// Opening with the wrong recipient key fails to authenticate.
#[test]
fn wrong_recipient() {
    let mut rng = rng();
    let (_, public) = envelope::keypair(bytes32(&mut rng));
    let (other, _) = envelope::keypair(bytes32(&mut rng));

    let message = envelope::seal_anonymous::<Gimli>(&public, bytes32(&mut rng), b"sealed").unwrap();
    assert!(envelope::open_anonymous::<Gimli>(&other, &message).is_err());
}

/// A signature over ten mebibytes streamed in 64 KiB pieces verifies, a
/// one-shot signature matches the streamed one, and changing any byte of
/// the message both changes the signature and fails verification.
#[test]
fn streamed_signatures() {
    let mut rng = rng();
    let (secret, public) = envelope::keypair(bytes32(&mut rng));
    let mut message = vec![0u8; 10 << 20];
    rng.fill(&mut message[..]);

    let mut signer = envelope::Signer::<Xoodoo>::new();
    for chunk in message.chunks(65536) {
        signer.absorb(chunk);
    }
    let signature = signer.sign(&secret, Some(&public));
    assert_eq!(signature, envelope::sign::<Xoodoo>(&secret, None, &message));

    let mut verifier = envelope::Verifier::<Xoodoo>::new();
    for chunk in message.chunks(65536) {
        verifier.absorb(chunk);
    }
    assert!(verifier.verify(&public, &signature).is_ok());

    let index = rng.gen_range(0..message.len());
    message[index] ^= 0x20;
    assert_ne!(signature, envelope::sign::<Xoodoo>(&secret, None, &message));
    assert!(envelope::verify::<Xoodoo>(&public, &signature, &message).is_err());
}

/// Signatures bind the identity: a different public key fails to verify.
#[test]
fn signature_binds_identity() {
    let mut rng = rng();
    let (secret, public) = envelope::keypair(bytes32(&mut rng));
    let (_, other) = envelope::keypair(bytes32(&mut rng));

    let signature = envelope::sign::<Gimli>(&secret, Some(&public), b"attestation");
    assert!(envelope::verify::<Gimli>(&public, &signature, b"attestation").is_ok());
    assert!(envelope::verify::<Gimli>(&other, &signature, b"attestation").is_err());
    assert!(envelope::verify::<Gimli>(&public, &signature, b"attestatiom").is_err());
}

/// Cloak then reveal with the same password restores the plaintext; a
/// different password fails to authenticate.
#[test]
fn cloak_round_trip() {
    let mut rng = rng();
    let mut salt = [0; 16];
    rng.fill(&mut salt[..]);
    let mut plaintext = vec![0u8; 3000];
    rng.fill(&mut plaintext[..]);

    let mut buffer = vec![0u8; 16 << 10];
    let message = envelope::cloak::<Xoodoo>(b"open sesame", salt, &mut buffer, 1, 1, &plaintext);
    assert_eq!(&message[..16], &salt[..]);
    assert_eq!(
        envelope::reveal::<Xoodoo>(b"open sesame", &mut buffer, 1, 1, &message).unwrap(),
        plaintext
    );
    assert!(matches!(
        envelope::reveal::<Xoodoo>(b"open sesame!", &mut buffer, 1, 1, &message),
        Err(envelope::DecryptError::Authentication)
    ));
}
