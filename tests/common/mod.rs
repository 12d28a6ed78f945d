//! Shared helpers for building and damaging test codewords.
#![allow(dead_code)]

use gf_reedsolomon::{Field, GfPoly};
use rand::Rng;

/// Generator polynomial with the roots x^base, ..., x^(base + two_s - 1).
pub fn generator<'a, F: Field + ?Sized>(field: &'a F, two_s: usize) -> GfPoly<'a, F> {
    let mut g = GfPoly::monomial(field, 1, 0);
    let base = field.generator_base();
    for i in 0..two_s {
        g.multiply(&GfPoly::new(field, [1, field.exp(i + base)]));
    }
    g
}

/// Systematic encoding, the message followed by `two_s` error codewords.
pub fn encode<F: Field + ?Sized>(field: &F, message: &[u16], two_s: usize) -> Vec<u16> {
    // remainder of message(x) * x^two_s divided by the generator
    let mut remainder = GfPoly::new(field, message);
    remainder.multiply_by_monomial(two_s, 1);
    remainder.divide(&generator(field, two_s));

    let mut codeword = message.to_vec();
    if remainder.is_zero() {
        codeword.resize(message.len() + two_s, 0);
    } else {
        let ecc = remainder.coefficients();
        codeword.resize(message.len() + two_s - ecc.len(), 0);
        codeword.extend_from_slice(ecc);
    }
    codeword
}

/// XOR random non-zero values into `num_errors` distinct positions.
///
/// Returns the damaged positions.
pub fn corrupt<R: Rng>(
    codeword: &mut [u16],
    num_errors: usize,
    field_size: usize,
    rng: &mut R,
) -> Vec<usize> {
    let positions = rand::seq::index::sample(rng, codeword.len(), num_errors).into_vec();
    for p in positions.iter() {
        codeword[*p] ^= rng.random_range(1..field_size) as u16;
    }
    positions
}
