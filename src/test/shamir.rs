use {
    super::rng,
    crate::shamir,
    rand::Rng,
};

/// Walk thresholds down from 255: a quorum reconstructs, all 255 shares
/// reconstruct, one share short does not, and a corrupted quorum does not.
#[test]
fn quorum_descent() {
    let mut rng = rng();
    let mut entropy = [[0u8; 32]; 254];
    let mut shares = [[0u8; 33]; 255];

    let mut threshold = 255usize;
    while threshold > 1 {
        let mut secret = [0u8; 32];
        rng.fill(&mut secret[..]);
        for block in entropy.iter_mut() {
            rng.fill(&mut block[..]);
        }

        // Shuffle as we split, so a corrupted share lands at random.
        for index in 0..255u8 {
            let swap = rng.gen_range(0..=index as usize);
            shares[index as usize] = shares[swap];
            shares[swap] = shamir::split(index, threshold as u8, &secret, &entropy);
        }

        assert_eq!(shamir::combine(&shares[..threshold]), secret);
        assert_eq!(shamir::combine(&shares), secret);
        assert_ne!(shamir::combine(&shares[..threshold - 1]), secret);

        let mut corrupt = shares;
        corrupt[0][1 + rng.gen_range(0..32)] ^= 1 << rng.gen_range(0..8);
        assert_ne!(shamir::combine(&corrupt[..threshold]), secret);

        threshold = 15 * threshold >> 4;
    }
}

/// Five shares at threshold three: every triple reconstructs the secret,
/// no pair does.
#[test]
fn five_shares_threshold_three() {
    let mut rng = rng();
    let mut secret = [0u8; 32];
    for (i, byte) in secret.iter_mut().enumerate() {
        *byte = i as u8;
    }
    let mut entropy = [[0u8; 32]; 2];
    for block in entropy.iter_mut() {
        rng.fill(&mut block[..]);
    }

    let shares: Vec<_> = (0..5).map(|i| shamir::split(i, 3, &secret, &entropy)).collect();

    for i in 0..5 {
        for j in i + 1..5 {
            assert_ne!(shamir::combine(&[shares[i], shares[j]]), secret);
            for k in j + 1..5 {
                assert_eq!(shamir::combine(&[shares[i], shares[j], shares[k]]), secret);
            }
        }
    }
}

/// The index byte is shifted past zero, so a share is never an evaluation
/// at the secret itself.
#[test]
fn index_zero_is_never_used() {
    let mut rng = rng();
    let mut secret = [0u8; 32];
    rng.fill(&mut secret[..]);
    let mut entropy = [[0u8; 32]; 1];
    rng.fill(&mut entropy[0][..]);

    let share = shamir::split(0, 2, &secret, &entropy);
    assert_eq!(share[0], 1);
    assert_ne!(&share[1..], &secret[..]);
}
