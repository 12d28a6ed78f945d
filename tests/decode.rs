//! Error correction on codewords built by a reference encoder.
mod common;

use gf_reedsolomon::{
    decode, try_decode, DecodingError, Field, AZTEC_DATA_10, AZTEC_PARAM, DATA_MATRIX_FIELD_256,
    QR_CODE_FIELD_256,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const QR_MESSAGE: [u16; 11] = [0x10, 0x20, 0x0C, 0x56, 0x61, 0x80, 0xEC, 0x11, 0xEC, 0x11, 0xEC];

fn qr_codeword() -> Vec<u16> {
    common::encode(&QR_CODE_FIELD_256, &QR_MESSAGE, 4)
}

#[test]
fn reference_encoder() {
    assert_eq!(
        qr_codeword(),
        vec![16, 32, 12, 86, 97, 128, 236, 17, 236, 17, 236, 208, 219, 67, 47]
    );
    // generator polynomial for 5 error codewords from the Data Matrix standard
    assert_eq!(
        common::generator(&DATA_MATRIX_FIELD_256, 5).coefficients(),
        &[1, 62, 111, 15, 48, 228]
    );
    assert_eq!(
        common::encode(&DATA_MATRIX_FIELD_256, &[23, 40, 11], 5),
        vec![23, 40, 11, 255, 207, 37, 244, 81]
    );
}

#[test]
fn every_pair_of_errors() {
    let original = qr_codeword();
    let mut rng = StdRng::seed_from_u64(15);
    for first in 0..original.len() {
        for second in first + 1..original.len() {
            let mut received = original.clone();
            received[first] ^= rng.random_range(1..256u16);
            received[second] ^= rng.random_range(1..256u16);
            let correction = try_decode(&QR_CODE_FIELD_256, &mut received, 4).unwrap();
            let mut positions = correction.positions.clone();
            positions.sort_unstable();
            assert_eq!(positions, vec![first, second]);
            assert_eq!(received, original);
        }
    }
}

#[test]
fn three_errors_are_never_restored() {
    let original = qr_codeword();
    let mut rng = StdRng::seed_from_u64(3);
    let mut rejected = 0;
    for _ in 0..500 {
        let mut received = original.clone();
        common::corrupt(&mut received, 3, 256, &mut rng);
        if decode(&QR_CODE_FIELD_256, &mut received, 4) {
            // a false positive lands on a different codeword
            assert_ne!(received, original);
        } else {
            rejected += 1;
        }
    }
    assert!(rejected > 0);
}

#[test]
fn failure_reasons_are_reported() {
    let original = qr_codeword();
    let mut rng = StdRng::seed_from_u64(42);
    let mut seen = Vec::new();
    for _ in 0..2000 {
        let mut received = original.clone();
        common::corrupt(&mut received, 3, 256, &mut rng);
        if let Err(e) = try_decode(&QR_CODE_FIELD_256, &mut received, 4) {
            match e {
                DecodingError::ErrorOutsideCodeword { len, .. } => assert_eq!(len, 15),
                DecodingError::RootCountMismatch { expected, found } => {
                    assert!(found < expected)
                }
                _ => (),
            }
            if !seen.contains(&core::mem::discriminant(&e)) {
                seen.push(core::mem::discriminant(&e));
            }
        }
    }
    assert!(seen.len() >= 2);
}

#[test]
fn dyn_field() {
    let field: &dyn Field = &QR_CODE_FIELD_256;
    let original = common::encode(field, &QR_MESSAGE, 4);
    let mut received = original.clone();
    received[0] ^= 1;
    received[14] ^= 0xff;
    assert!(decode(field, &mut received, 4));
    assert_eq!(received, original);
}

#[test]
fn large_field() {
    let field = &AZTEC_DATA_10;
    let message: Vec<u16> = (0..100).map(|i| (i * 37 % 1024) as u16).collect();
    let original = common::encode(field, &message, 20);
    let mut received = original.clone();
    let mut rng = StdRng::seed_from_u64(10);
    common::corrupt(&mut received, 10, field.size(), &mut rng);
    let correction = try_decode(field, &mut received, 20).unwrap();
    assert_eq!(correction.num_errors(), 10);
    assert_eq!(received, original);
}

fn check_capacity<F: Field + ?Sized>(
    field: &F,
    message: &[u16],
    two_s: usize,
    seed: u64,
) -> Result<(), TestCaseError> {
    let original = common::encode(field, message, two_s);
    let mut rng = StdRng::seed_from_u64(seed);
    let num_errors = rng.random_range(0..=two_s / 2);
    let mut received = original.clone();
    common::corrupt(&mut received, num_errors, field.size(), &mut rng);

    let correction = try_decode(field, &mut received, two_s);
    prop_assert!(correction.is_ok(), "{:?}", correction);
    prop_assert_eq!(correction.unwrap().num_errors(), num_errors);
    prop_assert_eq!(received, original);
    Ok(())
}

proptest! {
    /// Property: up to two_s / 2 errors are corrected (QR code field, base 0)
    #[test]
    fn prop_qr_corrects_up_to_capacity(
        message in prop::collection::vec(0u16..256, 1..60),
        two_s in 1usize..=30,
        seed in any::<u64>(),
    ) {
        check_capacity(&QR_CODE_FIELD_256, &message, two_s, seed)?;
    }

    /// Property: up to two_s / 2 errors are corrected (Data Matrix field, base 1)
    #[test]
    fn prop_data_matrix_corrects_up_to_capacity(
        message in prop::collection::vec(0u16..256, 1..60),
        two_s in 1usize..=30,
        seed in any::<u64>(),
    ) {
        check_capacity(&DATA_MATRIX_FIELD_256, &message, two_s, seed)?;
    }

    /// Property: codewords filling the whole GF(16) are corrected
    #[test]
    fn prop_small_field_corrects_up_to_capacity(
        message in prop::collection::vec(0u16..16, 1..=6),
        two_s in 1usize..=8,
        seed in any::<u64>(),
    ) {
        check_capacity(&AZTEC_PARAM, &message, two_s, seed)?;
    }

    /// Property: an undamaged codeword decodes without changes
    #[test]
    fn prop_valid_codeword_unchanged(
        message in prop::collection::vec(0u16..256, 0..60),
        two_s in 0usize..=30,
    ) {
        let original = common::encode(&QR_CODE_FIELD_256, &message, two_s);
        let mut received = original.clone();
        let correction = try_decode(&QR_CODE_FIELD_256, &mut received, two_s);
        prop_assert_eq!(correction.map(|c| c.num_errors()), Ok(0));
        prop_assert_eq!(received, original);
    }
}
