use {
    super::{bitflip, bytes32, rng},
    crate::x25519,
};

/// Both sides of a thousand random exchanges agree, and a single secret
/// bit flip breaks the agreement.
#[test]
fn key_exchange() {
    let mut rng = rng();
    for _ in 0..1000 {
        let secret1 = bytes32(&mut rng);
        let mut secret2 = bytes32(&mut rng);

        let public1 = x25519::public_key(&secret1);
        let public2 = x25519::public_key(&secret2);

        let shared1 = x25519::exchange(&secret1, &public2).unwrap();
        let shared2 = x25519::exchange(&secret2, &public1).unwrap();
        assert_eq!(shared1, shared2);

        bitflip(&mut rng, &mut secret2);
        let shared3 = x25519::exchange(&secret2, &public1).unwrap();
        assert_ne!(shared1, shared3);
    }
}

/// Signatures over random challenges verify, and any challenge bit flip is
/// rejected.
#[test]
fn signatures() {
    let mut rng = rng();
    for _ in 0..1000 {
        let identity = bytes32(&mut rng);
        let ephemeral = bytes32(&mut rng);
        let mut challenge = bytes32(&mut rng);

        let response = x25519::sign(&challenge, &ephemeral, &identity);
        let ephemeral = x25519::public_key(&ephemeral);
        let identity = x25519::public_key(&identity);
        assert!(x25519::verify(&response, &challenge, &ephemeral, &identity).is_ok());

        bitflip(&mut rng, &mut challenge);
        assert!(x25519::verify(&response, &challenge, &ephemeral, &identity).is_err());
    }
}

/// Multiplying by a scalar and by its inverse round-trips through the
/// prime-order subgroup.
#[test]
fn scalar_inversion() {
    let mut rng = rng();
    for _ in 0..1000 {
        let scalar1 = bytes32(&mut rng);
        let mut scalar2 = bytes32(&mut rng);

        let point1 = x25519::public_key(&scalar1);
        let point2 = x25519::exchange(&scalar1, &x25519::public_key(&scalar2)).unwrap();

        let inverse = x25519::invert(&scalar2);
        assert_eq!(x25519::exchange(&inverse, &point2).unwrap(), point1);

        bitflip(&mut rng, &mut scalar2);
        let inverse = x25519::invert(&scalar2);
        assert_ne!(x25519::exchange(&inverse, &point2).unwrap(), point1);
    }
}

/// Mapped scalars are multiples of eight with the same action on the base
/// point.
#[test]
fn torsion_safe_scalars() {
    let mut rng = rng();
    for _ in 0..1000 {
        let scalar = bytes32(&mut rng);
        let mapped = x25519::map_scalar(&scalar);
        assert_eq!(mapped[0] & 7, 0);
        assert_eq!(x25519::public_key(&scalar), x25519::public_key(&mapped));
    }
}

/// Point mapping is a deterministic function usable as an exchange point.
#[test]
fn point_mapping() {
    let mut rng = rng();
    let representative = bytes32(&mut rng);
    let point = x25519::map_point(&representative);
    assert_eq!(point, x25519::map_point(&representative));
    assert_ne!(point, x25519::map_point(&bytes32(&mut rng)));

    let secret1 = bytes32(&mut rng);
    let secret2 = bytes32(&mut rng);
    let shared1 = x25519::exchange(&secret1, &x25519::exchange(&secret2, &point).unwrap());
    let shared2 = x25519::exchange(&secret2, &x25519::exchange(&secret1, &point).unwrap());
    assert_eq!(shared1.unwrap(), shared2.unwrap());
}
