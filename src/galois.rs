//! Arithmetic in the Galois fields GF(2^m) used by Reed-Solomon codes.
//!
//! An element of GF(2^m) is represented by an integer in `[0, 2^m)`. Its bits
//! correspond to the coefficients of a polynomial of degree `m - 1` with the
//! least significant bit being the coefficient for 1. For example, in GF(256):
//!
//! > 242 = 0b11110010 = x^7 + x^6 + x^5 + x^4 + x.
//!
//! Addition can be done coefficient by coefficient, so it is just XOR, and
//! every element is its own additive inverse.
//!
//! Multiplying two polynomials can lead to powers of x higher than `m - 1`, so
//! multiplication is defined modulo a fixed irreducible polynomial. Different
//! barcode standards pick different polynomials, e.g. QR codes use 285 (0x11D)
//! and Data Matrix uses 301 (0x12D).
//!
//! With a primitive polynomial the powers 1, x, x^2, ..., x^(2^m - 2) run through
//! all non-zero elements. So any non-zero element can be identified with a
//! power i of x, and a * b = x^i * x^j = x^(i + j). The two lookup tables doing
//! this translation are called `exp` and `log` in this module.
//!
//! The decoder only talks to a field through the [Field] trait. [GenericGF]
//! is the table based implementation shipped with this crate.
use core::fmt;

/// The operations a Reed-Solomon decoder needs from a Galois field.
///
/// Elements are integers in `[0, size())`, `0` is the additive identity
/// and addition is XOR.
pub trait Field {
    /// Product of `a` and `b`.
    fn multiply(&self, a: u16, b: u16) -> u16;

    /// Multiplicative inverse of `a`.
    ///
    /// # Panics
    ///
    /// If `a` is zero.
    fn inverse(&self, a: u16) -> u16;

    /// The generator raised to the power `i`, `i` is taken modulo `size() - 1`.
    fn exp(&self, i: usize) -> u16;

    /// Discrete logarithm of `a`, the inverse of [exp](Field::exp).
    ///
    /// # Panics
    ///
    /// If `a` is zero.
    fn log(&self, a: u16) -> usize;

    /// Number of elements in the field.
    fn size(&self) -> usize;

    /// Exponent of the first root of the code's generator polynomial.
    fn generator_base(&self) -> usize;
}

/// A field GF(SIZE) backed by `exp` and `log` lookup tables.
///
/// The tables are computed by a `const fn`, so fields can be declared as
/// statics without any runtime initialization.
#[derive(Clone)]
pub struct GenericGF<const SIZE: usize> {
    exp: [u16; SIZE],
    log: [u16; SIZE],
    primitive: u32,
    generator_base: usize,
}

/// QR codes, x^8 + x^4 + x^3 + x^2 + 1.
pub static QR_CODE_FIELD_256: GenericGF<256> = GenericGF::new(0x011D, 0);

/// Data Matrix, x^8 + x^5 + x^3 + x^2 + 1.
pub static DATA_MATRIX_FIELD_256: GenericGF<256> = GenericGF::new(0x012D, 1);

/// Aztec 12 bit data codewords, x^12 + x^6 + x^5 + x^3 + 1.
pub static AZTEC_DATA_12: GenericGF<4096> = GenericGF::new(0x1069, 1);

/// Aztec 10 bit data codewords, x^10 + x^3 + 1.
pub static AZTEC_DATA_10: GenericGF<1024> = GenericGF::new(0x0409, 1);

/// Aztec 6 bit data codewords, x^6 + x + 1.
pub static AZTEC_DATA_6: GenericGF<64> = GenericGF::new(0x0043, 1);

/// Aztec mode message, x^4 + x + 1.
pub static AZTEC_PARAM: GenericGF<16> = GenericGF::new(0x0013, 1);

/// Aztec 8 bit data codewords share the Data Matrix field.
pub static AZTEC_DATA_8: &GenericGF<256> = &DATA_MATRIX_FIELD_256;

/// MaxiCode shares the field of Aztec 6 bit codewords.
pub static MAXICODE_FIELD_64: &GenericGF<64> = &AZTEC_DATA_6;

impl<const SIZE: usize> GenericGF<SIZE> {
    /// Build the field from its `primitive` polynomial.
    ///
    /// `primitive` includes the leading term, e.g. 0x11D for
    /// x^8 + x^4 + x^3 + x^2 + 1. `generator_base` is the power of x
    /// of the first root of the code's generator polynomial, usually 0 or 1.
    pub const fn new(primitive: u32, generator_base: usize) -> Self {
        assert!(
            SIZE.is_power_of_two() && SIZE >= 4 && SIZE <= 1 << 16,
            "field size must be a power of two in [4, 65536]"
        );
        let mut exp = [0u16; SIZE];
        let mut log = [0u16; SIZE];
        let mut p: u32 = 1; // polynomial representation of x^i
        let mut i = 0;
        while i < SIZE {
            exp[i] = p as u16;
            p <<= 1;
            if p >= SIZE as u32 {
                p ^= primitive;
                p &= SIZE as u32 - 1;
            }
            i += 1;
        }
        // exp[SIZE - 1] wraps around to 1, so it is left out here
        let mut i = 0;
        while i < SIZE - 1 {
            log[exp[i] as usize] = i as u16;
            i += 1;
        }
        Self {
            exp,
            log,
            primitive,
            generator_base,
        }
    }

    /// The primitive polynomial this field was built from.
    pub fn primitive(&self) -> u32 {
        self.primitive
    }
}

impl<const SIZE: usize> Field for GenericGF<SIZE> {
    fn multiply(&self, a: u16, b: u16) -> u16 {
        if a == 0 || b == 0 {
            return 0;
        }
        let ia = self.log[a as usize] as usize;
        let ib = self.log[b as usize] as usize;
        self.exp[(ia + ib) % (SIZE - 1)]
    }

    fn inverse(&self, a: u16) -> u16 {
        assert_ne!(a, 0, "inverse of 0");
        self.exp[SIZE - 1 - self.log[a as usize] as usize]
    }

    fn exp(&self, i: usize) -> u16 {
        self.exp[i % (SIZE - 1)]
    }

    fn log(&self, a: u16) -> usize {
        assert_ne!(a, 0, "log of 0");
        self.log[a as usize] as usize
    }

    fn size(&self) -> usize {
        SIZE
    }

    fn generator_base(&self) -> usize {
        self.generator_base
    }
}

impl<const SIZE: usize> PartialEq for GenericGF<SIZE> {
    fn eq(&self, other: &Self) -> bool {
        self.primitive == other.primitive && self.generator_base == other.generator_base
    }
}

impl<const SIZE: usize> Eq for GenericGF<SIZE> {}

impl<const SIZE: usize> fmt::Debug for GenericGF<SIZE> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "GF({:#x}, size = {}, base = {})",
            self.primitive, SIZE, self.generator_base
        )
    }
}

#[cfg(test)]
use alloc::{collections::BTreeSet, vec::Vec};

#[cfg(test)]
use pretty_assertions::assert_eq;

#[cfg(test)]
fn sanity_check<const SIZE: usize>(gf: &GenericGF<SIZE>) {
    let exp: BTreeSet<u16> = gf.exp[..SIZE - 1].iter().cloned().collect();
    assert_eq!(exp.len(), SIZE - 1, "{:?} is not primitive", gf);
    assert!(!exp.contains(&0));

    for i in 0..SIZE - 1 {
        assert_eq!(gf.log(gf.exp(i)), i);
        let a = (i + 1) as u16;
        assert_eq!(gf.exp(gf.log(a)), a);
        assert_eq!(gf.multiply(a, gf.inverse(a)), 1);
    }
}

#[test]
fn sanity_check_tables() {
    sanity_check(&QR_CODE_FIELD_256);
    sanity_check(&DATA_MATRIX_FIELD_256);
    sanity_check(&AZTEC_DATA_12);
    sanity_check(&AZTEC_DATA_10);
    sanity_check(&AZTEC_DATA_6);
    sanity_check(&AZTEC_PARAM);
}

#[test]
fn shared_fields() {
    assert!(core::ptr::eq(AZTEC_DATA_8, &DATA_MATRIX_FIELD_256));
    assert!(core::ptr::eq(MAXICODE_FIELD_64, &AZTEC_DATA_6));
    assert_ne!(QR_CODE_FIELD_256, DATA_MATRIX_FIELD_256);
}

#[test]
fn gf256_mul() {
    let gf = &DATA_MATRIX_FIELD_256;
    assert_eq!(gf.multiply(123, 1), 123);
    assert_eq!(gf.multiply(234, 0), 0);
    assert_eq!(gf.multiply(0, 23), 0);
    let product = [2, 4, 8, 16, 32].iter().fold(1, |a, b| gf.multiply(a, *b));
    assert_eq!(product, 228);

    let gf = &QR_CODE_FIELD_256;
    let product = [2, 4, 8, 16, 32].iter().fold(1, |a, b| gf.multiply(a, *b));
    assert_eq!(product, 38);
}

#[test]
fn exp_wraps_around() {
    let gf = &QR_CODE_FIELD_256;
    assert_eq!(gf.exp(8), 29);
    assert_eq!(gf.exp(8 + 255), 29);
    assert_eq!(gf.log(29), 8);
    assert_eq!(DATA_MATRIX_FIELD_256.exp(8), 45);
    assert_eq!(AZTEC_DATA_12.exp(12), 105);
}

#[test]
fn small_field_powers() {
    let powers: Vec<u16> = (0..16).map(|i| AZTEC_PARAM.exp(i)).collect();
    assert_eq!(
        powers,
        [1, 2, 4, 8, 3, 6, 12, 11, 5, 10, 7, 14, 15, 13, 9, 1]
    );
}

#[test]
fn inverse_of_two() {
    assert_eq!(QR_CODE_FIELD_256.inverse(2), 142);
    assert_eq!(DATA_MATRIX_FIELD_256.inverse(2), 150);
    assert_eq!(QR_CODE_FIELD_256.inverse(1), 1);
}

#[test]
#[should_panic(expected = "inverse of 0")]
fn inverse_of_zero() {
    QR_CODE_FIELD_256.inverse(0);
}

#[test]
fn field_metadata() {
    assert_eq!(QR_CODE_FIELD_256.size(), 256);
    assert_eq!(QR_CODE_FIELD_256.generator_base(), 0);
    assert_eq!(QR_CODE_FIELD_256.primitive(), 0x011D);
    assert_eq!(AZTEC_DATA_10.size(), 1024);
    assert_eq!(AZTEC_DATA_10.generator_base(), 1);
}
