//! Solve the key equation with a truncated Euclidean algorithm.
//!
//! Given the syndrome polynomial S(x) of a received word with `2s` syndromes,
//! the error locator sigma(x) and the error evaluator omega(x) satisfy
//!
//! ```text
//! sigma(x) S(x) = omega(x) mod x^(2s)
//! ```
//!
//! Running the extended Euclidean algorithm on x^(2s) and S(x) until the
//! remainder has degree less than s yields sigma as the auxiliary polynomial
//! t and omega as the remainder r, up to a common scalar.
use core::mem::swap;

use log::trace;

use super::DecodingError;
use crate::galois::Field;
use crate::poly::GfPoly;

/// Error locator and error evaluator polynomial, scaled so that sigma(0) = 1.
pub(super) struct KeyEquation<'a, F: Field + ?Sized> {
    pub sigma: GfPoly<'a, F>,
    pub omega: GfPoly<'a, F>,
}

pub(super) fn run_euclidean_algorithm<'a, F: Field + ?Sized>(
    field: &'a F,
    syndromes: GfPoly<'a, F>,
    two_s: usize,
) -> Result<KeyEquation<'a, F>, DecodingError> {
    let mut r_last = GfPoly::monomial(field, 1, two_s);
    let mut r = syndromes;
    let mut t_last = GfPoly::zero(field);
    let mut t = GfPoly::monomial(field, 1, 0);

    // assume r's degree is < r_last's
    if r.degree() >= r_last.degree() {
        swap(&mut r, &mut r_last);
    }

    while r.degree() >= two_s / 2 {
        swap(&mut t_last, &mut t);
        swap(&mut r_last, &mut r);

        if r_last.is_zero() {
            // the algorithm terminated before reaching the target degree
            return Err(DecodingError::DegenerateRemainder);
        }

        // divide r_last_last (now in r) by r_last, remainder stays in r
        let mut q = r.divide(&r_last);
        q.multiply(&t_last).add_or_subtract(&t);
        t = q;

        assert!(
            r.is_zero() || r.degree() < r_last.degree(),
            "division algorithm failed to reduce polynomial: deg r = {}, deg r_last = {}",
            r.degree(),
            r_last.degree()
        );
        trace!("euclidean step: r = {:?}, t = {:?}", r, t);
    }

    let sigma_tilde_at_zero = t.coefficient(0);
    if sigma_tilde_at_zero == 0 {
        return Err(DecodingError::LocatorNotNormalizable);
    }

    let inverse = field.inverse(sigma_tilde_at_zero);
    t.multiply_by_monomial(0, inverse);
    r.multiply_by_monomial(0, inverse);

    Ok(KeyEquation {
        sigma: t,
        omega: r,
    })
}

#[cfg(test)]
use crate::galois::QR_CODE_FIELD_256;

#[cfg(test)]
use pretty_assertions::assert_eq;

#[test]
fn key_equation_for_two_errors() {
    let field = &QR_CODE_FIELD_256;
    let syndromes = GfPoly::new(field, [134, 3, 224, 91]);
    let key = run_euclidean_algorithm(field, syndromes.clone(), 4).unwrap();
    assert_eq!(key.sigma.coefficients(), &[152, 237, 1]);
    assert_eq!(key.omega.coefficients(), &[66, 91]);

    // sigma * S = omega mod x^4
    let mut product = key.sigma.clone();
    product.multiply(&syndromes);
    product.divide(&GfPoly::monomial(field, 1, 4));
    assert_eq!(product, key.omega);
}

#[test]
fn single_syndrome_degenerates() {
    let field = &QR_CODE_FIELD_256;
    let result = run_euclidean_algorithm(field, GfPoly::new(field, [7]), 1);
    assert!(matches!(result, Err(DecodingError::DegenerateRemainder)));
}

#[test]
fn zero_constant_term() {
    let field = &QR_CODE_FIELD_256;
    // S(x) divisible by x^2 gives a locator without constant term
    let result = run_euclidean_algorithm(field, GfPoly::new(field, [43, 9, 0, 0]), 4);
    assert!(matches!(
        result,
        Err(DecodingError::LocatorNotNormalizable)
    ));
}

#[test]
fn low_degree_syndromes_skip_the_loop() {
    let field = &QR_CODE_FIELD_256;
    let key = run_euclidean_algorithm(field, GfPoly::new(field, [21, 188]), 4)
        .unwrap();
    assert_eq!(key.sigma.coefficients(), &[1]);
    assert_eq!(key.omega.coefficients(), &[21, 188]);
}
