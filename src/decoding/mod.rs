//! Syndrome based Reed-Solomon decoding.
mod euclidean;

use alloc::{vec, vec::Vec};

use log::{debug, trace};
use thiserror::Error;

use crate::galois::Field;
use crate::poly::GfPoly;
use euclidean::{run_euclidean_algorithm, KeyEquation};

/// Reasons why a received codeword could not be corrected.
///
/// All of them mean the codeword must not be trusted. Usually there
/// were more errors than the code can correct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodingError {
    /// A symbol of the codeword is not an element of the field.
    #[error("symbol {symbol} at position {position} is not a field element")]
    SymbolOutsideField { position: usize, symbol: u16 },
    /// The Euclidean algorithm ran out of remainders before the
    /// error evaluator reached its target degree.
    #[error("remainder became zero before the error locator was found")]
    DegenerateRemainder,
    /// The error locator has a zero constant term and can not be normalized.
    #[error("error locator has a zero constant term")]
    LocatorNotNormalizable,
    /// Syndromes are non-zero, but the error locator is a constant.
    #[error("syndromes are non-zero but no error was located")]
    NoErrorLocator,
    /// The error locator does not have as many roots as its degree.
    #[error("error locator of degree {expected} has {found} roots")]
    RootCountMismatch { expected: usize, found: usize },
    /// An error location was found outside of the codeword.
    #[error("error location {location} is outside of the codeword of length {len}")]
    ErrorOutsideCodeword { location: usize, len: usize },
}

/// The corrections applied to a codeword.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Correction {
    /// Indices into the codeword which were changed.
    pub positions: Vec<usize>,
    /// The values XORed into the codeword, one for each position.
    pub magnitudes: Vec<u16>,
}

impl Correction {
    /// Number of corrected symbols.
    pub fn num_errors(&self) -> usize {
        self.positions.len()
    }
}

/// Correct the `codeword` in place.
///
/// The last `two_s` symbols of `codeword` are the error correction symbols,
/// up to `two_s / 2` symbol errors can be corrected.
///
/// Returns `false` if the codeword could not be corrected, it is then left
/// unmodified and must be discarded.
///
/// ```rust
/// # use gf_reedsolomon::{decode, QR_CODE_FIELD_256};
/// let mut codeword = [16, 32, 86, 86, 97, 128, 236, 17, 236, 16, 236, 208, 219, 67, 47];
/// assert!(decode(&QR_CODE_FIELD_256, &mut codeword, 4));
/// assert_eq!(codeword, [16, 32, 12, 86, 97, 128, 236, 17, 236, 17, 236, 208, 219, 67, 47]);
/// ```
pub fn decode<F: Field + ?Sized>(field: &F, codeword: &mut [u16], two_s: usize) -> bool {
    try_decode(field, codeword, two_s).is_ok()
}

/// Correct the `codeword` in place and report what was done.
///
/// Same as [decode], but on success the corrected positions are returned,
/// on failure the reason. A codeword is only modified if the decoding
/// succeeds.
///
/// Symbols which are not elements of `field` are rejected with
/// [DecodingError::SymbolOutsideField].
pub fn try_decode<F: Field + ?Sized>(
    field: &F,
    codeword: &mut [u16],
    two_s: usize,
) -> Result<Correction, DecodingError> {
    if let Some((position, symbol)) = codeword
        .iter()
        .enumerate()
        .find(|(_, s)| **s as usize >= field.size())
    {
        debug!("symbol {} at {} outside of {}", symbol, position, field.size());
        return Err(DecodingError::SymbolOutsideField {
            position,
            symbol: *symbol,
        });
    }

    // 1. Calculate syndromes
    let mut syndromes = vec![0; two_s];
    if !compute_syndromes(field, codeword, &mut syndromes) {
        return Ok(Correction::default());
    }
    trace!("syndromes: {:?}", syndromes);

    // 2. Find error locator and evaluator
    let KeyEquation { sigma, omega } =
        run_euclidean_algorithm(field, GfPoly::new(field, syndromes), two_s).map_err(|e| {
            debug!("euclidean algorithm failed: {}", e);
            e
        })?;
    trace!("sigma = {:?}, omega = {:?}", sigma, omega);

    // 3. Find error locations
    let locations = find_error_locations(field, &sigma).map_err(|e| {
        debug!("chien search failed: {}", e);
        e
    })?;

    // 4. Find error values
    let magnitudes = find_error_magnitudes(field, &omega, &locations);

    // 5. Correct errors
    let len = codeword.len();
    let positions = locations
        .iter()
        .map(|loc| {
            let location = field.log(*loc);
            if location < len {
                Ok(len - 1 - location)
            } else {
                debug!("error location {} outside of codeword ({})", location, len);
                Err(DecodingError::ErrorOutsideCodeword { location, len })
            }
        })
        .collect::<Result<Vec<usize>, _>>()?;

    for (position, magnitude) in positions.iter().zip(magnitudes.iter()) {
        codeword[*position] ^= *magnitude;
    }
    debug!("corrected {} errors at {:?}", positions.len(), positions);

    Ok(Correction {
        positions,
        magnitudes,
    })
}

/// Evaluate the codeword polynomial at x^(i + base) for each syndrome slot.
///
/// The value for x^(i + base) is the coefficient of x^i, so it is written
/// to `out` from the back. Returns `true` if any syndrome is non-zero.
fn compute_syndromes<F: Field + ?Sized>(field: &F, codeword: &[u16], out: &mut [u16]) -> bool {
    let received = GfPoly::new(field, codeword);
    let base = field.generator_base();
    for (i, o) in out.iter_mut().rev().enumerate() {
        *o = received.evaluate_at(field.exp(i + base));
    }
    out.iter().any(|s| *s != 0)
}

/// Find the error locations as inverses of the roots of `locator` (Chien search).
fn find_error_locations<F: Field + ?Sized>(
    field: &F,
    locator: &GfPoly<F>,
) -> Result<Vec<u16>, DecodingError> {
    let num_errors = locator.degree();
    if num_errors == 0 {
        return Err(DecodingError::NoErrorLocator);
    }
    let locations: Vec<u16> = (1..field.size())
        .map(|i| i as u16)
        .filter(|x| locator.evaluate_at(*x) == 0)
        .take(num_errors)
        .map(|x| field.inverse(x))
        .collect();
    if locations.len() != num_errors {
        return Err(DecodingError::RootCountMismatch {
            expected: num_errors,
            found: locations.len(),
        });
    }
    Ok(locations)
}

/// Find the error values with Forney's formula.
fn find_error_magnitudes<F: Field + ?Sized>(
    field: &F,
    evaluator: &GfPoly<F>,
    locations: &[u16],
) -> Vec<u16> {
    locations
        .iter()
        .enumerate()
        .map(|(i, xi)| {
            let xi_inverse = field.inverse(*xi);
            // locations are distinct, so no factor is zero
            let denominator = locations
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .fold(1, |denom, (_, xj)| {
                    field.multiply(denom, 1 ^ field.multiply(*xj, xi_inverse))
                });
            let magnitude = field.multiply(
                evaluator.evaluate_at(xi_inverse),
                field.inverse(denominator),
            );
            if field.generator_base() != 0 {
                field.multiply(magnitude, xi_inverse)
            } else {
                magnitude
            }
        })
        .collect()
}

#[cfg(test)]
use crate::galois::{AZTEC_PARAM, DATA_MATRIX_FIELD_256, QR_CODE_FIELD_256};

#[cfg(test)]
use pretty_assertions::assert_eq;

/// RS(15, 11) over the QR code field.
#[cfg(test)]
const QR_CODEWORD: [u16; 15] = [
    16, 32, 12, 86, 97, 128, 236, 17, 236, 17, 236, 208, 219, 67, 47,
];

/// Square10 Data Matrix block, 3 data and 5 error codewords.
#[cfg(test)]
const DATA_MATRIX_CODEWORD: [u16; 8] = [23, 40, 11, 255, 207, 37, 244, 81];

#[test]
fn valid_codeword_is_untouched() {
    let mut received = QR_CODEWORD;
    let correction = try_decode(&QR_CODE_FIELD_256, &mut received, 4).unwrap();
    assert_eq!(correction.num_errors(), 0);
    assert_eq!(received, QR_CODEWORD);

    let mut received = DATA_MATRIX_CODEWORD;
    assert!(decode(&DATA_MATRIX_FIELD_256, &mut received, 5));
    assert_eq!(received, DATA_MATRIX_CODEWORD);
}

#[test]
fn syndromes_of_valid_codeword() {
    let mut syndromes = [0; 4];
    assert!(!compute_syndromes(
        &QR_CODE_FIELD_256,
        &QR_CODEWORD,
        &mut syndromes
    ));
    assert_eq!(syndromes, [0; 4]);
}

#[test]
fn syndromes_order() {
    let mut received = QR_CODEWORD;
    received[2] ^= 0x5a;
    received[9] ^= 0x01;
    let mut syndromes = [0; 4];
    assert!(compute_syndromes(
        &QR_CODE_FIELD_256,
        &received,
        &mut syndromes
    ));
    assert_eq!(syndromes, [134, 3, 224, 91]);
}

#[test]
fn correct_single_error() {
    let mut received = QR_CODEWORD;
    received[5] ^= 0x77;
    let correction = try_decode(&QR_CODE_FIELD_256, &mut received, 4).unwrap();
    assert_eq!(correction.positions, vec![5]);
    assert_eq!(correction.magnitudes, vec![0x77]);
    assert_eq!(received, QR_CODEWORD);
}

#[test]
fn correct_two_errors() {
    let mut received = QR_CODEWORD;
    received[2] ^= 0x5a;
    received[9] ^= 0x01;
    let correction = try_decode(&QR_CODE_FIELD_256, &mut received, 4).unwrap();
    assert_eq!(correction.positions, vec![9, 2]);
    assert_eq!(correction.magnitudes, vec![0x01, 0x5a]);
    assert_eq!(received, QR_CODEWORD);
}

#[test]
fn correct_with_generator_base_one() {
    let mut received = DATA_MATRIX_CODEWORD;
    received[0] = 230;
    received[7] ^= 3;
    let correction = try_decode(&DATA_MATRIX_FIELD_256, &mut received, 5).unwrap();
    assert_eq!(correction.positions, vec![7, 0]);
    assert_eq!(correction.magnitudes, vec![3, 241]);
    assert_eq!(received, DATA_MATRIX_CODEWORD);
}

#[test]
fn three_errors_location_outside() {
    let mut received = QR_CODEWORD;
    received[0] ^= 0x33;
    received[6] ^= 0x80;
    received[13] ^= 0xff;
    let before = received;
    assert_eq!(
        try_decode(&QR_CODE_FIELD_256, &mut received, 4),
        Err(DecodingError::ErrorOutsideCodeword {
            location: 65,
            len: 15
        })
    );
    // positions are checked before patching
    assert_eq!(received, before);
}

#[test]
fn three_errors_root_count_mismatch() {
    let mut received = [
        16, 32, 200, 86, 97, 128, 236, 17, 236, 0, 236, 208, 153, 67, 47,
    ];
    assert_eq!(
        try_decode(&QR_CODE_FIELD_256, &mut received, 4),
        Err(DecodingError::RootCountMismatch {
            expected: 2,
            found: 0
        })
    );
}

#[test]
fn three_errors_locator_not_normalizable() {
    let mut received = [
        16, 38, 12, 86, 97, 128, 236, 147, 236, 17, 199, 208, 219, 67, 47,
    ];
    assert_eq!(
        try_decode(&QR_CODE_FIELD_256, &mut received, 4),
        Err(DecodingError::LocatorNotNormalizable)
    );
}

#[test]
fn three_errors_false_positive() {
    // three errors can move the word closer to another codeword,
    // it is then "corrected" to the wrong one
    let mut received = [
        16, 32, 13, 86, 97, 128, 233, 17, 236, 17, 236, 208, 219, 67, 0,
    ];
    assert!(decode(&QR_CODE_FIELD_256, &mut received, 4));
    assert_ne!(received, QR_CODEWORD);
}

#[test]
fn constant_locator() {
    let mut received = [45, 196, 245, 160];
    assert_eq!(
        try_decode(&QR_CODE_FIELD_256, &mut received, 4),
        Err(DecodingError::NoErrorLocator)
    );
}

#[test]
fn single_check_symbol() {
    let mut received = [0, 1];
    assert_eq!(
        try_decode(&QR_CODE_FIELD_256, &mut received, 1),
        Err(DecodingError::DegenerateRemainder)
    );
}

#[test]
fn no_check_symbols() {
    let mut received = [1, 2, 3];
    assert!(decode(&QR_CODE_FIELD_256, &mut received, 0));
    assert_eq!(received, [1, 2, 3]);
}

#[test]
fn symbol_outside_field() {
    let mut received = QR_CODEWORD;
    received[3] = 256;
    let before = received;
    assert_eq!(
        try_decode(&QR_CODE_FIELD_256, &mut received, 4),
        Err(DecodingError::SymbolOutsideField {
            position: 3,
            symbol: 256
        })
    );
    assert_eq!(received, before);

    // GF(16) only has 4 bit symbols
    let mut received = [1, 2, 16, 0xffff];
    assert!(!decode(&AZTEC_PARAM, &mut received, 2));
    assert_eq!(received, [1, 2, 16, 0xffff]);
}

#[test]
fn error_messages() {
    assert_eq!(
        DecodingError::RootCountMismatch {
            expected: 2,
            found: 1
        }
        .to_string(),
        "error locator of degree 2 has 1 roots"
    );
    assert_eq!(
        DecodingError::ErrorOutsideCodeword {
            location: 65,
            len: 15
        }
        .to_string(),
        "error location 65 is outside of the codeword of length 15"
    );
    assert_eq!(
        DecodingError::SymbolOutsideField {
            position: 3,
            symbol: 256
        }
        .to_string(),
        "symbol 256 at position 3 is not a field element"
    );
}
