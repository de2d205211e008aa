//!
//! Fast-path kernels for prime-field rings with one- and two-word exponent
//! encodings and a purely non-negative ordering. The full set of per-category
//! kernels is generated outside this crate and registered at startup; the
//! bundles here are the built-in part of that registry content and double as a
//! reference for how per-category kernels are written.
//!
//! The fixed-length kernels compare exponent words directly instead of walking
//! the ordering sign vector; this relies on sign entries being `+1` throughout
//! (zero signs only ever occur as the trailing sentinel, which the length-one
//! and length-two non-negative categories exclude).
//!

use crate::coeff::{Coeff, FieldKind};
use crate::descriptor::RingDescriptor;
use crate::poly::{Poly, Term};

use super::*;

fn characteristic(ring: &RingDescriptor) -> u64 {
    match ring.field() {
        FieldKind::Zp { characteristic } => *characteristic,
        _ => panic!("prime field kernel installed for a ring over a different field")
    }
}

fn zp(coeff: &Coeff) -> u64 {
    match coeff {
        Coeff::Zp(value) => *value,
        _ => panic!("prime field kernel applied to a foreign coefficient")
    }
}

pub fn mul_scalar_zp(mut p: Poly, n: &Coeff, ring: &RingDescriptor) -> Poly {
    let q = characteristic(ring);
    let n = zp(n);
    debug_assert!(n != 0 && n < q);
    for t in p.terms_mut() {
        t.coeff = Coeff::Zp((zp(&t.coeff) as u128 * n as u128 % q as u128) as u64);
    }
    return p;
}

fn add_zp_fixed<const WORDS: usize>(lhs: Poly, rhs: Poly, ring: &RingDescriptor) -> Poly {
    debug_assert!(ring.exp_words() == WORDS);
    debug_assert!(ring.ord_signs().iter().all(|s| *s == 1));
    let q = characteristic(ring);
    let mut result = Vec::with_capacity(lhs.len() + rhs.len());
    let mut lhs = lhs.into_terms().into_iter().peekable();
    let mut rhs = rhs.into_terms().into_iter().peekable();
    loop {
        match (lhs.peek(), rhs.peek()) {
            (Some(l), Some(r)) => match l.mono.words()[..WORDS].cmp(&r.mono.words()[..WORDS]) {
                std::cmp::Ordering::Greater => result.push(lhs.next().unwrap()),
                std::cmp::Ordering::Less => result.push(rhs.next().unwrap()),
                std::cmp::Ordering::Equal => {
                    let l = lhs.next().unwrap();
                    let r = rhs.next().unwrap();
                    let coeff = (zp(&l.coeff) as u128 + zp(&r.coeff) as u128) % q as u128;
                    if coeff != 0 {
                        result.push(Term { coeff: Coeff::Zp(coeff as u64), mono: l.mono });
                    }
                }
            },
            (Some(_), None) => result.push(lhs.next().unwrap()),
            (None, Some(_)) => result.push(rhs.next().unwrap()),
            (None, None) => break
        }
    }
    Poly::from_sorted_terms(result, ring)
}

fn mul_monomial_zp_fixed<const WORDS: usize>(mut p: Poly, m: &Term, ring: &RingDescriptor) -> Poly {
    debug_assert!(ring.exp_words() == WORDS);
    let q = characteristic(ring);
    let n = zp(&m.coeff);
    for t in p.terms_mut() {
        t.coeff = Coeff::Zp((zp(&t.coeff) as u128 * n as u128 % q as u128) as u64);
        t.mono = t.mono.mul(&m.mono);
    }
    debug_assert!(p.is_valid(ring));
    return p;
}

pub fn add_zp_one(lhs: Poly, rhs: Poly, ring: &RingDescriptor) -> Poly {
    add_zp_fixed::<1>(lhs, rhs, ring)
}

pub fn add_zp_two(lhs: Poly, rhs: Poly, ring: &RingDescriptor) -> Poly {
    add_zp_fixed::<2>(lhs, rhs, ring)
}

pub fn mul_monomial_zp_one(p: Poly, m: &Term, ring: &RingDescriptor) -> Poly {
    mul_monomial_zp_fixed::<1>(p, m, ring)
}

pub fn mul_monomial_zp_two(p: Poly, m: &Term, ring: &RingDescriptor) -> Poly {
    mul_monomial_zp_fixed::<2>(p, m, ring)
}

pub fn mul_monomial_ref_zp_one(p: &Poly, m: &Term, ring: &RingDescriptor) -> Poly {
    mul_monomial_zp_fixed::<1>(p.clone(), m, ring)
}

pub fn mul_monomial_ref_zp_two(p: &Poly, m: &Term, ring: &RingDescriptor) -> Poly {
    mul_monomial_zp_fixed::<2>(p.clone(), m, ring)
}

pub const MUL_SCALAR_ZP: MulScalarHandle = &(mul_scalar_zp as fn(Poly, &Coeff, &RingDescriptor) -> Poly);
pub const ADD_ZP_ONE: AddHandle = &(add_zp_one as fn(Poly, Poly, &RingDescriptor) -> Poly);
pub const ADD_ZP_TWO: AddHandle = &(add_zp_two as fn(Poly, Poly, &RingDescriptor) -> Poly);
pub const MUL_MONOMIAL_ZP_ONE: MulMonomialHandle = &(mul_monomial_zp_one as fn(Poly, &Term, &RingDescriptor) -> Poly);
pub const MUL_MONOMIAL_ZP_TWO: MulMonomialHandle = &(mul_monomial_zp_two as fn(Poly, &Term, &RingDescriptor) -> Poly);
pub const MUL_MONOMIAL_REF_ZP_ONE: MulMonomialRefHandle = &(mul_monomial_ref_zp_one as fn(&Poly, &Term, &RingDescriptor) -> Poly);
pub const MUL_MONOMIAL_REF_ZP_TWO: MulMonomialRefHandle = &(mul_monomial_ref_zp_two as fn(&Poly, &Term, &RingDescriptor) -> Poly);

///
/// Kernels for prime-field rings with a single all-positive ordering word.
/// Deliberately partial: the slots it does not populate fall back to the
/// general kernels during table validation.
///
pub const ZP_ONE_NONNEG: ProcBundle = ProcBundle {
    name: "zp_one_nonneg",
    mul_scalar: Some(MUL_SCALAR_ZP),
    add: Some(ADD_ZP_ONE),
    mul_monomial: Some(MUL_MONOMIAL_ZP_ONE),
    mul_monomial_ref: Some(MUL_MONOMIAL_REF_ZP_ONE),
    ..ProcBundle::empty("zp_one_nonneg")
};

///
/// Kernels for prime-field rings with two all-positive ordering words.
///
pub const ZP_TWO_NONNEG: ProcBundle = ProcBundle {
    name: "zp_two_nonneg",
    mul_scalar: Some(MUL_SCALAR_ZP),
    add: Some(ADD_ZP_TWO),
    mul_monomial: Some(MUL_MONOMIAL_ZP_TWO),
    mul_monomial_ref: Some(MUL_MONOMIAL_REF_ZP_TWO),
    ..ProcBundle::empty("zp_two_nonneg")
};

#[cfg(test)]
use crate::poly::Monomial;

#[cfg(test)]
fn zp_ring(words: usize) -> RingDescriptor {
    RingDescriptor::new(FieldKind::Zp { characteristic: 7 }, words, vec![1; words].into())
}

#[cfg(test)]
fn poly_of(terms: &[(i64, &[u64])], ring: &RingDescriptor) -> Poly {
    Poly::from_terms(
        terms.iter().map(|(c, m)| Term { coeff: ring.field().from_int(*c), mono: Monomial::new(*m) }).collect(),
        ring
    )
}

#[test]
fn test_fixed_length_add_agrees_with_general() {
    let ring = zp_ring(1);
    let p = poly_of(&[(3, &[4]), (2, &[2]), (6, &[0])], &ring);
    let q = poly_of(&[(5, &[4]), (1, &[1]), (1, &[0])], &ring);
    assert_eq!(
        general::add(p.clone(), q.clone(), &ring),
        add_zp_one(p, q, &ring)
    );

    let ring = zp_ring(2);
    let p = poly_of(&[(3, &[4, 0]), (2, &[2, 5])], &ring);
    let q = poly_of(&[(4, &[4, 0]), (1, &[2, 5]), (1, &[0, 1])], &ring);
    assert_eq!(
        general::add(p.clone(), q.clone(), &ring),
        add_zp_two(p, q, &ring)
    );
}

#[test]
fn test_fixed_length_mul_monomial_agrees_with_general() {
    let ring = zp_ring(1);
    let p = poly_of(&[(3, &[4]), (2, &[2])], &ring);
    let m = Term { coeff: ring.field().from_int(4), mono: Monomial::new([2]) };
    assert_eq!(
        general::mul_monomial_ref(&p, &m, &ring),
        mul_monomial_ref_zp_one(&p, &m, &ring)
    );
}
