//!
//! The category-agnostic kernels. They work for every ring and serve as the
//! correctness backstop: whenever no specialized kernel exists for a slot, the
//! repair pass installs the kernel from this module.
//!

use crate::coeff::Coeff;
use crate::descriptor::RingDescriptor;
use crate::poly::{Bucket, Monomial, Poly, Term};

use super::*;

pub fn clone_poly(p: &Poly, _ring: &RingDescriptor) -> Poly {
    p.clone()
}

pub fn drop_poly(p: Poly, _ring: &RingDescriptor) {
    drop(p)
}

pub fn shallow_copy_delete(p: Poly, ring: &RingDescriptor) -> Poly {
    debug_assert!(p.is_valid(ring));
    return p;
}

pub fn mul_scalar(mut p: Poly, n: &Coeff, ring: &RingDescriptor) -> Poly {
    debug_assert!(!ring.field().is_zero(n));
    for t in p.terms_mut() {
        t.coeff = ring.field().mul_ref(n, &t.coeff);
    }
    return p;
}

pub fn mul_scalar_ref(p: &Poly, n: &Coeff, ring: &RingDescriptor) -> Poly {
    mul_scalar(p.clone(), n, ring)
}

pub fn mul_monomial(mut p: Poly, m: &Term, ring: &RingDescriptor) -> Poly {
    let field = ring.field();
    for t in p.terms_mut() {
        t.coeff = field.mul_ref(&t.coeff, &m.coeff);
        t.mono = t.mono.mul(&m.mono);
    }
    debug_assert!(p.is_valid(ring));
    return p;
}

pub fn mul_monomial_ref(p: &Poly, m: &Term, ring: &RingDescriptor) -> Poly {
    mul_monomial(p.clone(), m, ring)
}

pub fn sub_monomial_mul(p: Poly, m: &Term, q: &Poly, ring: &RingDescriptor) -> Poly {
    let field = ring.field();
    let mut result = Vec::with_capacity(p.len() + q.len());
    let mut lhs = p.into_terms().into_iter().peekable();
    let mut rhs = q.terms().iter().peekable();
    loop {
        match (lhs.peek(), rhs.peek()) {
            (Some(l), Some(r)) => {
                let r_mono = r.mono.mul(&m.mono);
                match ring.cmp_monomials(&l.mono, &r_mono) {
                    std::cmp::Ordering::Greater => result.push(lhs.next().unwrap()),
                    std::cmp::Ordering::Less => {
                        let r = rhs.next().unwrap();
                        result.push(Term { coeff: field.negate(field.mul_ref(&m.coeff, &r.coeff)), mono: r_mono });
                    },
                    std::cmp::Ordering::Equal => {
                        let l = lhs.next().unwrap();
                        let r = rhs.next().unwrap();
                        let coeff = field.sub_ref(&l.coeff, &field.mul_ref(&m.coeff, &r.coeff));
                        if !field.is_zero(&coeff) {
                            result.push(Term { coeff, mono: l.mono });
                        }
                    }
                }
            },
            (Some(_), None) => result.push(lhs.next().unwrap()),
            (None, Some(_)) => {
                let r = rhs.next().unwrap();
                result.push(Term { coeff: field.negate(field.mul_ref(&m.coeff, &r.coeff)), mono: r.mono.mul(&m.mono) });
            },
            (None, None) => break
        }
    }
    Poly::from_sorted_terms(result, ring)
}

pub fn add(lhs: Poly, rhs: Poly, ring: &RingDescriptor) -> Poly {
    let field = ring.field();
    let mut result = Vec::with_capacity(lhs.len() + rhs.len());
    let mut lhs = lhs.into_terms().into_iter().peekable();
    let mut rhs = rhs.into_terms().into_iter().peekable();
    loop {
        match (lhs.peek(), rhs.peek()) {
            (Some(l), Some(r)) => match ring.cmp_monomials(&l.mono, &r.mono) {
                std::cmp::Ordering::Greater => result.push(lhs.next().unwrap()),
                std::cmp::Ordering::Less => result.push(rhs.next().unwrap()),
                std::cmp::Ordering::Equal => {
                    let l = lhs.next().unwrap();
                    let r = rhs.next().unwrap();
                    let coeff = field.add_ref(&l.coeff, &r.coeff);
                    if !field.is_zero(&coeff) {
                        result.push(Term { coeff, mono: l.mono });
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

pub fn negate(mut p: Poly, ring: &RingDescriptor) -> Poly {
    let field = ring.field();
    for t in p.terms_mut() {
        field.negate_inplace(&mut t.coeff);
    }
    return p;
}

pub fn mul_coeff_div_select(p: &Poly, m: &Term, ring: &RingDescriptor) -> Poly {
    let field = ring.field();
    let terms = p.terms().iter()
        .filter(|t| m.mono.divides(&t.mono))
        .map(|t| Term { coeff: field.mul_ref(&t.coeff, &m.coeff), mono: t.mono.clone() })
        .collect();
    // a subsequence of an ordered term list stays ordered
    Poly::from_sorted_terms(terms, ring)
}

pub fn mul_coeff_div_select_mul(p: &Poly, m: &Term, shift: &Monomial, ring: &RingDescriptor) -> Poly {
    let field = ring.field();
    let terms = p.terms().iter()
        .filter_map(|t| t.mono.div(&m.mono).map(|quotient| Term {
            coeff: field.mul_ref(&t.coeff, &m.coeff),
            mono: quotient.mul(shift)
        }))
        .collect();
    Poly::from_sorted_terms(terms, ring)
}

pub fn merge(lhs: Poly, rhs: Poly, ring: &RingDescriptor) -> Poly {
    let mut result = Vec::with_capacity(lhs.len() + rhs.len());
    let mut lhs = lhs.into_terms().into_iter().peekable();
    let mut rhs = rhs.into_terms().into_iter().peekable();
    loop {
        match (lhs.peek(), rhs.peek()) {
            (Some(l), Some(r)) => match ring.cmp_monomials(&l.mono, &r.mono) {
                std::cmp::Ordering::Greater => result.push(lhs.next().unwrap()),
                std::cmp::Ordering::Less => result.push(rhs.next().unwrap()),
                std::cmp::Ordering::Equal => {
                    // monomial sets are disjoint by contract
                    debug_assert!(false, "merge inputs must have disjoint monomials");
                    let l = lhs.next().unwrap();
                    let r = rhs.next().unwrap();
                    let coeff = ring.field().add_ref(&l.coeff, &r.coeff);
                    if !ring.field().is_zero(&coeff) {
                        result.push(Term { coeff, mono: l.mono });
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

pub fn bucket_set_leading(bucket: &mut Bucket, ring: &RingDescriptor) {
    if bucket.leading().is_some() {
        return;
    }
    let field = ring.field();
    loop {
        let mut best: Option<Monomial> = None;
        for part in bucket.parts() {
            if let Some(t) = part.leading_term() {
                match &best {
                    Some(b) if ring.cmp_monomials(&t.mono, b).is_le() => {},
                    _ => best = Some(t.mono.clone())
                }
            }
        }
        let best = match best {
            Some(best) => best,
            None => {
                bucket.set_lead(None);
                return;
            }
        };
        let mut sum: Option<Coeff> = None;
        for part in bucket.parts_mut() {
            let matches = match part.leading_term() {
                Some(t) => ring.cmp_monomials(&t.mono, &best).is_eq(),
                None => false
            };
            if matches {
                let t = part.remove_leading().unwrap();
                sum = Some(match sum {
                    Some(s) => field.add_ref(&s, &t.coeff),
                    None => t.coeff
                });
            }
        }
        bucket.parts_mut().retain(|p| !p.is_zero());
        // at least one part carried `best`
        let sum = sum.unwrap();
        if !field.is_zero(&sum) {
            bucket.set_lead(Some(Term { coeff: sum, mono: best }));
            return;
        }
    }
}

pub fn mul_monomial_noether(p: &Poly, m: &Term, ring: &RingDescriptor) -> Poly {
    let field = ring.field();
    let mut result = Vec::with_capacity(p.len());
    for t in p.terms() {
        let mono = t.mono.mul(&m.mono);
        if let Some(bound) = ring.noether() {
            // terms are descending, so everything after the first cut is below the bound too
            if ring.cmp_monomials(&mono, bound).is_lt() {
                break;
            }
        }
        result.push(Term { coeff: field.mul_ref(&t.coeff, &m.coeff), mono });
    }
    Poly::from_sorted_terms(result, ring)
}

pub const CLONE_POLY: ClonePolyHandle = &(clone_poly as fn(&Poly, &RingDescriptor) -> Poly);
pub const DROP_POLY: DropPolyHandle = &(drop_poly as fn(Poly, &RingDescriptor));
pub const SHALLOW_COPY_DELETE: ShallowCopyDeleteHandle = &(shallow_copy_delete as fn(Poly, &RingDescriptor) -> Poly);
pub const MUL_SCALAR: MulScalarHandle = &(mul_scalar as fn(Poly, &Coeff, &RingDescriptor) -> Poly);
pub const MUL_SCALAR_REF: MulScalarRefHandle = &(mul_scalar_ref as fn(&Poly, &Coeff, &RingDescriptor) -> Poly);
pub const MUL_MONOMIAL: MulMonomialHandle = &(mul_monomial as fn(Poly, &Term, &RingDescriptor) -> Poly);
pub const MUL_MONOMIAL_REF: MulMonomialRefHandle = &(mul_monomial_ref as fn(&Poly, &Term, &RingDescriptor) -> Poly);
pub const SUB_MONOMIAL_MUL: SubMonomialMulHandle = &(sub_monomial_mul as fn(Poly, &Term, &Poly, &RingDescriptor) -> Poly);
pub const ADD: AddHandle = &(add as fn(Poly, Poly, &RingDescriptor) -> Poly);
pub const NEGATE: NegateHandle = &(negate as fn(Poly, &RingDescriptor) -> Poly);
pub const MUL_COEFF_DIV_SELECT: MulCoeffDivSelectHandle = &(mul_coeff_div_select as fn(&Poly, &Term, &RingDescriptor) -> Poly);
pub const MUL_COEFF_DIV_SELECT_MUL: MulCoeffDivSelectMulHandle = &(mul_coeff_div_select_mul as fn(&Poly, &Term, &Monomial, &RingDescriptor) -> Poly);
pub const MERGE: MergeHandle = &(merge as fn(Poly, Poly, &RingDescriptor) -> Poly);
pub const BUCKET_SET_LEADING: BucketSetLeadingHandle = &(bucket_set_leading as fn(&mut Bucket, &RingDescriptor));
pub const MUL_MONOMIAL_NOETHER: MulMonomialNoetherHandle = &(mul_monomial_noether as fn(&Poly, &Term, &RingDescriptor) -> Poly);

///
/// All general kernels as a bundle, i.e. the cell the registry conceptually
/// holds for the all-general category triple.
///
pub const GENERAL: ProcBundle = ProcBundle {
    name: "general",
    clone_poly: Some(CLONE_POLY),
    drop_poly: Some(DROP_POLY),
    shallow_copy_delete: Some(SHALLOW_COPY_DELETE),
    mul_scalar: Some(MUL_SCALAR),
    mul_scalar_ref: Some(MUL_SCALAR_REF),
    mul_monomial: Some(MUL_MONOMIAL),
    mul_monomial_ref: Some(MUL_MONOMIAL_REF),
    sub_monomial_mul: Some(SUB_MONOMIAL_MUL),
    add: Some(ADD),
    negate: Some(NEGATE),
    mul_coeff_div_select: Some(MUL_COEFF_DIV_SELECT),
    mul_coeff_div_select_mul: Some(MUL_COEFF_DIV_SELECT_MUL),
    merge: Some(MERGE),
    bucket_set_leading: Some(BUCKET_SET_LEADING),
    mul_monomial_noether: Some(MUL_MONOMIAL_NOETHER)
};

#[cfg(test)]
use crate::coeff::FieldKind;

#[cfg(test)]
fn test_ring() -> RingDescriptor {
    RingDescriptor::new(FieldKind::Rational, 2, Box::new([1, 1]))
}

#[cfg(test)]
fn poly_of(terms: &[(i64, [u64; 2])], ring: &RingDescriptor) -> Poly {
    Poly::from_terms(
        terms.iter().map(|(c, m)| Term { coeff: ring.field().from_int(*c), mono: Monomial::new(*m) }).collect(),
        ring
    )
}

#[test]
fn test_mul_scalar_preserves_structure() {
    let ring = test_ring();
    let p = poly_of(&[(2, [3, 0]), (5, [1, 1]), (-1, [0, 0])], &ring);
    let result = mul_scalar(p.clone(), &ring.field().from_int(3), &ring);
    assert_eq!(p.len(), result.len());
    for (before, after) in p.terms().iter().zip(result.terms().iter()) {
        assert_eq!(before.mono, after.mono);
        assert_eq!(ring.field().mul_ref(&before.coeff, &ring.field().from_int(3)), after.coeff);
    }
    // multiplying by one changes nothing
    assert_eq!(p, mul_scalar(p.clone(), &ring.field().one(), &ring));
}

#[test]
fn test_add_combines_and_cancels() {
    let ring = test_ring();
    let p = poly_of(&[(2, [3, 0]), (5, [1, 1])], &ring);
    let q = poly_of(&[(1, [2, 0]), (-5, [1, 1])], &ring);
    let result = add(p, q, &ring);
    assert_eq!(poly_of(&[(2, [3, 0]), (1, [2, 0])], &ring), result);
}

#[test]
fn test_sub_monomial_mul() {
    let ring = test_ring();
    // p - m * q with m = 2 * x^[1,0]
    let p = poly_of(&[(2, [3, 0]), (5, [1, 1]), (7, [0, 0])], &ring);
    let q = poly_of(&[(1, [2, 0]), (3, [0, 1])], &ring);
    let m = Term { coeff: ring.field().from_int(2), mono: Monomial::new([1, 0]) };
    let result = sub_monomial_mul(p, &m, &q, &ring);
    // m * q = 2 x^[3,0] + 6 x^[1,1]; p - m*q = (2-2) x^[3,0] + (5-6) x^[1,1] + 7
    assert_eq!(poly_of(&[(-1, [1, 1]), (7, [0, 0])], &ring), result);
}

#[test]
fn test_negate_is_involution() {
    let ring = test_ring();
    let p = poly_of(&[(2, [3, 0]), (-5, [1, 1])], &ring);
    assert_eq!(p, negate(negate(p.clone(), &ring), &ring));
    assert!(add(p.clone(), negate(p.clone(), &ring), &ring).is_zero());
}

#[test]
fn test_mul_coeff_div_select() {
    let ring = test_ring();
    let p = poly_of(&[(2, [3, 0]), (5, [1, 1]), (7, [0, 2])], &ring);
    let m = Term { coeff: ring.field().from_int(3), mono: Monomial::new([1, 0]) };
    let result = mul_coeff_div_select(&p, &m, &ring);
    // only x^[3,0] and x^[1,1] are divisible by x^[1,0]; monomials stay unchanged
    assert_eq!(poly_of(&[(6, [3, 0]), (15, [1, 1])], &ring), result);
}

#[test]
fn test_mul_coeff_div_select_mul() {
    let ring = test_ring();
    let p = poly_of(&[(2, [3, 0]), (7, [0, 2])], &ring);
    let m = Term { coeff: ring.field().from_int(3), mono: Monomial::new([1, 0]) };
    let shift = Monomial::new([0, 1]);
    let result = mul_coeff_div_select_mul(&p, &m, &shift, &ring);
    // x^[3,0] / x^[1,0] * x^[0,1] = x^[2,1]
    assert_eq!(poly_of(&[(6, [2, 1])], &ring), result);
}

#[test]
fn test_merge_disjoint() {
    let ring = test_ring();
    let p = poly_of(&[(2, [3, 0]), (5, [1, 1])], &ring);
    let q = poly_of(&[(1, [2, 0]), (3, [0, 1])], &ring);
    let result = merge(p, q, &ring);
    assert_eq!(poly_of(&[(2, [3, 0]), (1, [2, 0]), (5, [1, 1]), (3, [0, 1])], &ring), result);
}

#[test]
fn test_bucket_set_leading() {
    let ring = test_ring();
    let mut bucket = Bucket::new();
    bucket.push(poly_of(&[(2, [3, 0]), (1, [0, 0])], &ring));
    bucket.push(poly_of(&[(-2, [3, 0]), (4, [1, 0])], &ring));
    bucket.push(poly_of(&[(1, [1, 0])], &ring));
    bucket_set_leading(&mut bucket, &ring);
    // the x^[3,0] terms cancel, so the leading term is 5 x^[1,0]
    let lead = bucket.leading().unwrap();
    assert_eq!(Monomial::new([1, 0]), lead.mono);
    assert_eq!(ring.field().from_int(5), lead.coeff);
}

#[test]
fn test_bucket_set_leading_empty() {
    let ring = test_ring();
    let mut bucket = Bucket::new();
    bucket.push(poly_of(&[(1, [1, 0])], &ring));
    bucket.push(poly_of(&[(-1, [1, 0])], &ring));
    bucket_set_leading(&mut bucket, &ring);
    assert!(bucket.leading().is_none());
}

#[test]
fn test_mul_monomial_noether_prunes() {
    let ring = test_ring().with_noether(Some(Monomial::new([2, 0])));
    let p = poly_of(&[(1, [2, 0]), (1, [1, 0]), (1, [0, 0])], &ring);
    let m = Term { coeff: ring.field().one(), mono: Monomial::new([1, 0]) };
    let result = mul_monomial_noether(&p, &m, &ring);
    // products x^[3,0] and x^[2,0] stay, x^[1,0] falls below the bound x^[2,0]
    assert_eq!(poly_of(&[(1, [3, 0]), (1, [2, 0])], &ring), result);

    let unbounded = test_ring();
    let p = poly_of(&[(1, [2, 0]), (1, [0, 0])], &unbounded);
    assert_eq!(mul_monomial_ref(&p, &m, &unbounded), mul_monomial_noether(&p, &m, &unbounded));
}
