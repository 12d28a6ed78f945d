//! Polynomials with coefficients in a Galois field.
//!
//! Coefficients are stored highest degree first, so `[3, 0, 1]` is
//! `3x^2 + 1`. A polynomial is always normalized: there are no leading zero
//! coefficients and the zero polynomial is exactly `[0]`.
//!
//! The arithmetic operations mutate the polynomial in place and return
//! `&mut Self`, so they can be chained:
//!
//! ```rust
//! # use gf_reedsolomon::{GfPoly, QR_CODE_FIELD_256};
//! let field = &QR_CODE_FIELD_256;
//! let mut p = GfPoly::new(field, [1, 2]);
//! p.multiply(&GfPoly::new(field, [1, 3])).add_or_subtract(&GfPoly::monomial(field, 1, 0));
//! assert_eq!(p.coefficients(), &[1, 1, 7]);
//! ```
use alloc::{vec, vec::Vec};
use core::fmt;

use super::galois::Field;

/// A polynomial over the field `F`.
///
/// The polynomial borrows its field, all operands of an operation
/// must borrow the same field instance.
pub struct GfPoly<'a, F: Field + ?Sized> {
    field: &'a F,
    coefficients: Vec<u16>,
}

impl<'a, F: Field + ?Sized> GfPoly<'a, F> {
    /// Create a polynomial from its coefficients, highest degree first.
    ///
    /// Leading zeros are stripped, an empty coefficient list gives
    /// the zero polynomial.
    pub fn new(field: &'a F, coefficients: impl Into<Vec<u16>>) -> Self {
        let mut coefficients = coefficients.into();
        debug_assert!(
            coefficients.iter().all(|c| (*c as usize) < field.size()),
            "coefficient outside of the field"
        );
        if coefficients.is_empty() {
            coefficients.push(0);
        }
        let mut poly = Self {
            field,
            coefficients,
        };
        poly.normalize();
        poly
    }

    /// The zero polynomial.
    pub fn zero(field: &'a F) -> Self {
        Self {
            field,
            coefficients: vec![0],
        }
    }

    /// The polynomial `coefficient * x^degree`.
    pub fn monomial(field: &'a F, coefficient: u16, degree: usize) -> Self {
        let mut poly = Self::zero(field);
        poly.set_monomial(coefficient, degree);
        poly
    }

    /// The field the coefficients belong to.
    pub fn field(&self) -> &'a F {
        self.field
    }

    /// Rebind the polynomial to `field`, the coefficients are kept.
    pub fn set_field(&mut self, field: &'a F) -> &mut Self {
        self.field = field;
        self
    }

    /// Replace the polynomial by `coefficient * x^degree`.
    pub fn set_monomial(&mut self, coefficient: u16, degree: usize) -> &mut Self {
        self.coefficients.clear();
        if coefficient == 0 {
            self.coefficients.push(0);
        } else {
            self.coefficients.resize(degree + 1, 0);
            self.coefficients[0] = coefficient;
        }
        self
    }

    /// Coefficients, highest degree first.
    pub fn coefficients(&self) -> &[u16] {
        &self.coefficients
    }

    /// Degree of the polynomial.
    ///
    /// The zero polynomial has degree 0 here, callers which
    /// need to tell it apart from constants must check [is_zero](Self::is_zero).
    pub fn degree(&self) -> usize {
        self.coefficients.len() - 1
    }

    /// Whether this is the zero polynomial.
    pub fn is_zero(&self) -> bool {
        self.coefficients[0] == 0
    }

    /// Coefficient of `x^degree`, zero if `degree` exceeds the degree.
    pub fn coefficient(&self, degree: usize) -> u16 {
        let n = self.coefficients.len();
        if degree < n {
            self.coefficients[n - 1 - degree]
        } else {
            0
        }
    }

    /// Coefficient of the highest degree term, zero only for the zero polynomial.
    pub fn leading_coefficient(&self) -> u16 {
        self.coefficients[0]
    }

    /// Evaluate the polynomial at `a` using Horner's scheme.
    pub fn evaluate_at(&self, a: u16) -> u16 {
        match a {
            // just the x^0 coefficient
            0 => self.coefficient(0),
            // sum of the coefficients
            1 => self.coefficients.iter().fold(0, |sum, c| sum ^ c),
            _ => self.coefficients[1..]
                .iter()
                .fold(self.coefficients[0], |result, c| {
                    self.field.multiply(a, result) ^ c
                }),
        }
    }

    /// Add `other` to this polynomial.
    ///
    /// In characteristic 2 this is the same as subtraction.
    pub fn add_or_subtract(&mut self, other: &Self) -> &mut Self {
        self.assert_same_field(other);
        if self.is_zero() {
            self.coefficients.clone_from(&other.coefficients);
            return self;
        }
        if other.is_zero() {
            return self;
        }

        if other.coefficients.len() > self.coefficients.len() {
            let mut larger = other.coefficients.clone();
            xor_aligned_at_end(&mut larger, &self.coefficients);
            self.coefficients = larger;
        } else {
            xor_aligned_at_end(&mut self.coefficients, &other.coefficients);
        }

        self.normalize();
        self
    }

    /// Multiply this polynomial by `other`.
    pub fn multiply(&mut self, other: &Self) -> &mut Self {
        self.assert_same_field(other);
        if self.is_zero() || other.is_zero() {
            return self.set_monomial(0, 0);
        }

        let a = &self.coefficients;
        let b = &other.coefficients;
        let mut product = vec![0; a.len() + b.len() - 1];
        for (i, ai) in a.iter().enumerate() {
            for (pk, bj) in product[i..].iter_mut().zip(b.iter()) {
                *pk ^= self.field.multiply(*ai, *bj);
            }
        }
        self.coefficients = product;

        self.normalize();
        self
    }

    /// Multiply this polynomial by `coefficient * x^degree`.
    pub fn multiply_by_monomial(&mut self, degree: usize, coefficient: u16) -> &mut Self {
        if coefficient == 0 {
            return self.set_monomial(0, 0);
        }

        for c in self.coefficients.iter_mut() {
            *c = self.field.multiply(*c, coefficient);
        }
        let len = self.coefficients.len();
        self.coefficients.resize(len + degree, 0);

        self.normalize();
        self
    }

    /// Divide this polynomial by `divisor`.
    ///
    /// Returns the quotient, this polynomial is replaced by the remainder.
    ///
    /// # Panics
    ///
    /// If `divisor` is the zero polynomial.
    pub fn divide(&mut self, divisor: &Self) -> Self {
        self.assert_same_field(divisor);
        assert!(!divisor.is_zero(), "divide by zero polynomial");

        let field = self.field;
        let mut quotient = Self::zero(field);
        let inverse_leading_term = field.inverse(divisor.leading_coefficient());
        let mut term = Self::zero(field);

        // the remainder's degree drops in each step
        while self.degree() >= divisor.degree() && !self.is_zero() {
            let degree_difference = self.degree() - divisor.degree();
            let scale = field.multiply(self.leading_coefficient(), inverse_leading_term);
            term.set_monomial(scale, degree_difference);
            quotient.add_or_subtract(&term);
            term.clone_from(divisor);
            term.multiply_by_monomial(degree_difference, scale);
            self.add_or_subtract(&term);
        }

        quotient
    }

    /// Strip leading zero coefficients.
    ///
    /// All operations keep polynomials normalized, so calling this is
    /// never necessary from outside.
    pub fn normalize(&mut self) {
        match self.coefficients.iter().position(|c| *c != 0) {
            Some(0) => (),
            Some(first_non_zero) => {
                self.coefficients.drain(..first_non_zero);
            }
            None => self.coefficients.truncate(1),
        }
    }

    fn assert_same_field(&self, other: &Self) {
        assert!(
            core::ptr::addr_eq(self.field, other.field),
            "polynomials do not have the same field"
        );
    }
}

/// XOR `smaller` into the low-order end of `larger`.
fn xor_aligned_at_end(larger: &mut [u16], smaller: &[u16]) {
    let diff = larger.len() - smaller.len();
    // high-order terms only found in larger stay untouched
    for (l, s) in larger[diff..].iter_mut().zip(smaller.iter()) {
        *l ^= *s;
    }
}

impl<'a, F: Field + ?Sized> Clone for GfPoly<'a, F> {
    fn clone(&self) -> Self {
        Self {
            field: self.field,
            coefficients: self.coefficients.clone(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.field = source.field;
        self.coefficients.clone_from(&source.coefficients);
    }
}

impl<'a, F: Field + ?Sized> PartialEq for GfPoly<'a, F> {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::addr_eq(self.field, other.field) && self.coefficients == other.coefficients
    }
}

impl<'a, F: Field + ?Sized> Eq for GfPoly<'a, F> {}

impl<'a, F: Field + ?Sized> fmt::Debug for GfPoly<'a, F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "GfPoly{:?}", self.coefficients)
    }
}

#[cfg(test)]
use super::galois::{GenericGF, DATA_MATRIX_FIELD_256, QR_CODE_FIELD_256};

#[cfg(test)]
use pretty_assertions::assert_eq;

#[cfg(test)]
type Poly = GfPoly<'static, GenericGF<256>>;

#[cfg(test)]
fn qr(coefficients: &[u16]) -> Poly {
    GfPoly::new(&QR_CODE_FIELD_256, coefficients)
}

#[test]
fn new_strips_leading_zeros() {
    assert_eq!(qr(&[0, 0, 3, 0, 1]).coefficients(), &[3, 0, 1]);
    assert_eq!(qr(&[0, 0, 0]).coefficients(), &[0]);
    assert_eq!(qr(&[]).coefficients(), &[0]);
    assert!(qr(&[]).is_zero());
    assert_eq!(qr(&[0, 0, 3, 0, 1]).degree(), 2);
}

#[test]
fn zero_and_leading_coefficient() {
    let zero = Poly::zero(&QR_CODE_FIELD_256);
    assert!(zero.is_zero());
    assert_eq!(zero.leading_coefficient(), 0);
    assert!(core::ptr::eq(zero.field(), &QR_CODE_FIELD_256));

    let p = qr(&[0, 9, 0, 4]);
    assert!(!p.is_zero());
    assert_eq!(p.leading_coefficient(), 9);
}

#[test]
fn normalize_is_idempotent() {
    let mut p = qr(&[0, 7, 0, 2]);
    let before = p.clone();
    p.normalize();
    assert_eq!(p, before);

    let mut zero = Poly::zero(&QR_CODE_FIELD_256);
    zero.normalize();
    assert_eq!(zero.coefficients(), &[0]);
}

#[test]
fn monomials() {
    let m = Poly::monomial(&QR_CODE_FIELD_256, 5, 3);
    assert_eq!(m.coefficients(), &[5, 0, 0, 0]);
    assert_eq!(m.degree(), 3);
    assert_eq!(m.coefficient(3), 5);
    assert_eq!(m.coefficient(0), 0);
    assert_eq!(m.coefficient(10), 0);

    let mut m = m;
    m.set_monomial(0, 4);
    assert!(m.is_zero());
    assert_eq!(m.degree(), 0);
}

#[test]
fn evaluate_special_points() {
    let p = qr(&[3, 5, 7]);
    assert_eq!(p.evaluate_at(0), 7);
    assert_eq!(p.evaluate_at(1), 3 ^ 5 ^ 7);
    // 3 * 2^2 + 5 * 2 + 7
    let field = &QR_CODE_FIELD_256;
    let expected = field.multiply(3, field.multiply(2, 2)) ^ field.multiply(5, 2) ^ 7;
    assert_eq!(p.evaluate_at(2), expected);
    assert_eq!(Poly::zero(field).evaluate_at(77), 0);
}

#[test]
fn add_aligns_constant_terms() {
    let mut a = qr(&[1, 2, 3]);
    a.add_or_subtract(&qr(&[4, 5]));
    assert_eq!(a.coefficients(), &[1, 2 ^ 4, 3 ^ 5]);

    let mut b = qr(&[4, 5]);
    b.add_or_subtract(&qr(&[1, 2, 3]));
    assert_eq!(b.coefficients(), &[1, 2 ^ 4, 3 ^ 5]);
}

#[test]
fn add_cancels_leading_terms() {
    let mut a = qr(&[9, 2, 3]);
    a.add_or_subtract(&qr(&[9, 2, 1]));
    assert_eq!(a.coefficients(), &[2]);

    let mut a = qr(&[9, 2, 3]);
    let b = a.clone();
    a.add_or_subtract(&b);
    assert!(a.is_zero());
}

#[test]
fn add_zero_is_identity() {
    let p = qr(&[17, 0, 4]);
    let mut a = p.clone();
    a.add_or_subtract(&Poly::zero(&QR_CODE_FIELD_256));
    assert_eq!(a, p);

    let mut zero = Poly::zero(&QR_CODE_FIELD_256);
    zero.add_or_subtract(&p);
    assert_eq!(zero, p);
}

#[test]
fn add_twice_is_identity() {
    let a = qr(&[200, 13, 0, 9, 1]);
    let b = qr(&[77, 3, 250]);
    let mut c = a.clone();
    c.add_or_subtract(&b).add_or_subtract(&b);
    assert_eq!(c, a);
}

#[test]
fn multiply_known_product() {
    // (x + 1)(x + 2) = x^2 + 3x + 2
    let mut p = qr(&[1, 1]);
    p.multiply(&qr(&[1, 2]));
    assert_eq!(p.coefficients(), &[1, 3, 2]);
}

#[test]
fn multiply_identity_and_zero() {
    let p = qr(&[12, 0, 255, 1]);
    let mut one = Poly::monomial(&QR_CODE_FIELD_256, 1, 0);
    one.multiply(&p);
    assert_eq!(one, p);

    let mut a = p.clone();
    a.multiply(&Poly::zero(&QR_CODE_FIELD_256));
    assert!(a.is_zero());

    let mut zero = Poly::zero(&QR_CODE_FIELD_256);
    zero.multiply(&p);
    assert!(zero.is_zero());
}

#[test]
fn multiply_degrees_add_up() {
    let mut a = qr(&[3, 1, 4, 1]);
    a.multiply(&qr(&[5, 9, 2]));
    assert_eq!(a.degree(), 5);
    let field = &QR_CODE_FIELD_256;
    assert_eq!(a.leading_coefficient(), field.multiply(3, 5));
    assert_eq!(a.coefficient(0), field.multiply(1, 2));
}

#[test]
fn multiply_by_monomial_shifts_and_scales() {
    let field = &QR_CODE_FIELD_256;
    let mut p = qr(&[1, 2]);
    p.multiply_by_monomial(2, 3);
    assert_eq!(p.coefficients(), &[3, field.multiply(2, 3), 0, 0]);

    let mut q = qr(&[1, 2]);
    q.multiply_by_monomial(2, 0);
    assert!(q.is_zero());

    let mut z = Poly::zero(field);
    z.multiply_by_monomial(3, 9);
    assert_eq!(z.coefficients(), &[0]);
}

#[test]
fn divide_exact() {
    // x^2 + 3x + 2 = (x + 1)(x + 2)
    let mut p = qr(&[1, 3, 2]);
    let quotient = p.divide(&qr(&[1, 1]));
    assert_eq!(quotient.coefficients(), &[1, 2]);
    assert!(p.is_zero());
}

#[test]
fn divide_reconstructs_dividend() {
    let original = qr(&[87, 1, 0, 200, 45, 3, 9]);
    let divisor = qr(&[5, 0, 33, 1]);
    let mut remainder = original.clone();
    let mut quotient = remainder.divide(&divisor);
    assert!(remainder.is_zero() || remainder.degree() < divisor.degree());
    quotient.multiply(&divisor).add_or_subtract(&remainder);
    assert_eq!(quotient, original);
}

#[test]
fn divide_by_larger_degree() {
    let mut p = qr(&[4, 5]);
    let quotient = p.divide(&qr(&[1, 0, 0]));
    assert!(quotient.is_zero());
    assert_eq!(p.coefficients(), &[4, 5]);
}

#[test]
fn divide_by_constant() {
    let field = &QR_CODE_FIELD_256;
    let mut p = qr(&[6, 10]);
    let quotient = p.divide(&qr(&[2]));
    assert!(p.is_zero());
    assert_eq!(
        quotient.coefficients(),
        &[field.multiply(6, field.inverse(2)), field.multiply(10, field.inverse(2))]
    );
}

#[test]
#[should_panic(expected = "divide by zero polynomial")]
fn divide_by_zero() {
    let mut p = qr(&[1, 2]);
    p.divide(&Poly::zero(&QR_CODE_FIELD_256));
}

#[test]
#[should_panic(expected = "polynomials do not have the same field")]
fn mixing_fields() {
    let mut p = qr(&[1, 2]);
    p.add_or_subtract(&GfPoly::new(&DATA_MATRIX_FIELD_256, [1, 2]));
}

#[test]
fn set_field_rebinds() {
    let mut p = GfPoly::new(&DATA_MATRIX_FIELD_256, [1, 2]);
    p.set_field(&QR_CODE_FIELD_256);
    let mut q = qr(&[1]);
    q.multiply(&p);
    assert_eq!(q.coefficients(), &[1, 2]);
}

#[test]
fn trait_object_field() {
    let field: &dyn Field = &QR_CODE_FIELD_256;
    let mut p = GfPoly::new(field, [1, 1]);
    p.multiply(&GfPoly::new(field, [1, 2]));
    assert_eq!(p.coefficients(), &[1, 3, 2]);
    assert_eq!(format!("{:?}", p), "GfPoly[1, 3, 2]");
}
