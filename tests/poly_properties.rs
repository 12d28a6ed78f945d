//! Algebraic properties of field polynomials.
use gf_reedsolomon::{Field, GenericGF, GfPoly, AZTEC_DATA_12, QR_CODE_FIELD_256};
use proptest::prelude::*;

type Poly = GfPoly<'static, GenericGF<256>>;

fn poly(coefficients: Vec<u16>) -> Poly {
    GfPoly::new(&QR_CODE_FIELD_256, coefficients)
}

fn coefficients() -> impl Strategy<Value = Vec<u16>> {
    prop::collection::vec(0u16..256, 0..20)
}

proptest! {
    /// Property: polynomials never keep leading zeros
    #[test]
    fn prop_normalized(c in coefficients()) {
        let p = poly(c);
        prop_assert!(p.is_zero() || p.leading_coefficient() != 0);
        prop_assert!(!p.coefficients().is_empty());
        if p.is_zero() {
            prop_assert_eq!(p.coefficients(), &[0]);
        }
        let mut q = p.clone();
        q.normalize();
        prop_assert_eq!(q, p);
    }

    /// Property: addition is its own inverse, a + b + b = a
    #[test]
    fn prop_add_self_inverse(a in coefficients(), b in coefficients()) {
        let a = poly(a);
        let b = poly(b);
        let mut c = a.clone();
        c.add_or_subtract(&b).add_or_subtract(&b);
        prop_assert_eq!(c, a);
    }

    /// Property: addition is commutative
    #[test]
    fn prop_add_commutative(a in coefficients(), b in coefficients()) {
        let mut ab = poly(a.clone());
        ab.add_or_subtract(&poly(b.clone()));
        let mut ba = poly(b);
        ba.add_or_subtract(&poly(a));
        prop_assert_eq!(ab, ba);
    }

    /// Property: multiplication is commutative and 1 is neutral
    #[test]
    fn prop_multiply_commutative(a in coefficients(), b in coefficients()) {
        let mut ab = poly(a.clone());
        ab.multiply(&poly(b.clone()));
        let mut ba = poly(b);
        ba.multiply(&poly(a.clone()));
        prop_assert_eq!(&ab, &ba);

        let mut one = Poly::monomial(&QR_CODE_FIELD_256, 1, 0);
        one.multiply(&poly(a.clone()));
        prop_assert_eq!(one, poly(a));
    }

    /// Property: multiplying by a monomial is multiplying by the monomial polynomial
    #[test]
    fn prop_monomial_consistent(a in coefficients(), degree in 0usize..10, c in 0u16..256) {
        let mut by_monomial = poly(a.clone());
        by_monomial.multiply_by_monomial(degree, c);
        let mut by_poly = poly(a);
        by_poly.multiply(&Poly::monomial(&QR_CODE_FIELD_256, c, degree));
        prop_assert_eq!(by_monomial, by_poly);
    }

    /// Property: quotient * divisor + remainder gives back the dividend
    #[test]
    fn prop_division(a in coefficients(), d in coefficients()) {
        let divisor = poly(d);
        prop_assume!(!divisor.is_zero());
        let original = poly(a);
        let mut remainder = original.clone();
        let mut quotient = remainder.divide(&divisor);
        prop_assert!(remainder.is_zero() || remainder.degree() < divisor.degree());
        quotient.multiply(&divisor).add_or_subtract(&remainder);
        prop_assert_eq!(quotient, original);
    }

    /// Property: evaluation is a ring homomorphism
    #[test]
    fn prop_evaluate_product(a in coefficients(), b in coefficients(), x in 0u16..256) {
        let field = &QR_CODE_FIELD_256;
        let pa = poly(a);
        let pb = poly(b);
        let mut sum = pa.clone();
        sum.add_or_subtract(&pb);
        prop_assert_eq!(sum.evaluate_at(x), pa.evaluate_at(x) ^ pb.evaluate_at(x));
        let mut product = pa.clone();
        product.multiply(&pb);
        prop_assert_eq!(
            product.evaluate_at(x),
            field.multiply(pa.evaluate_at(x), pb.evaluate_at(x))
        );
    }

    /// Property: division works in a 12 bit field as well
    #[test]
    fn prop_division_large_field(
        a in prop::collection::vec(0u16..4096, 0..30),
        d in prop::collection::vec(0u16..4096, 1..10),
    ) {
        let field = &AZTEC_DATA_12;
        let divisor = GfPoly::new(field, d);
        prop_assume!(!divisor.is_zero());
        let original = GfPoly::new(field, a);
        let mut remainder = original.clone();
        let mut quotient = remainder.divide(&divisor);
        quotient.multiply(&divisor).add_or_subtract(&remainder);
        prop_assert_eq!(quotient, original);
    }
}
