use serde::{Deserialize, Serialize};

use crate::coeff::Coeff;
use crate::descriptor::RingDescriptor;

///
/// The exponent vector of a monomial, packed into the fixed number of machine
/// words prescribed by the ring it lives in ([`RingDescriptor::exp_words()`]).
///
/// The encoding is opaque to this crate except for three contracts: monomial
/// multiplication is word-wise addition, divisibility is word-wise comparison,
/// and monomial comparison is driven by the ring's ordering sign vector (see
/// [`RingDescriptor::cmp_monomials()`]).
///
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Monomial {
    words: Box<[u64]>
}

impl Monomial {

    pub fn new<W: Into<Box<[u64]>>>(words: W) -> Self {
        let words = words.into();
        assert!(words.len() > 0);
        Self { words }
    }

    pub fn words(&self) -> &[u64] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn mul(&self, rhs: &Monomial) -> Monomial {
        debug_assert!(self.words.len() == rhs.words.len());
        Monomial { words: self.words.iter().zip(rhs.words.iter()).map(|(l, r)| l + r).collect() }
    }

    ///
    /// If `rhs` divides `self` (word-wise), returns the quotient, otherwise `None`.
    ///
    pub fn div(&self, rhs: &Monomial) -> Option<Monomial> {
        debug_assert!(self.words.len() == rhs.words.len());
        let words = self.words.iter().zip(rhs.words.iter()).map(|(l, r)| l.checked_sub(*r)).collect::<Option<Box<[u64]>>>()?;
        Some(Monomial { words })
    }

    pub fn divides(&self, other: &Monomial) -> bool {
        debug_assert!(self.words.len() == other.words.len());
        self.words.iter().zip(other.words.iter()).all(|(l, r)| l <= r)
    }
}

///
/// One term of a polynomial: a coefficient together with a monomial.
///
#[derive(Clone, Debug, PartialEq)]
pub struct Term {
    pub coeff: Coeff,
    pub mono: Monomial
}

///
/// A polynomial, stored as its list of terms, strictly descending w.r.t. the
/// monomial ordering of the ring it belongs to, with no zero coefficients.
///
/// This is a deliberately small carrier representation; all interesting work
/// on it happens through the kernels installed in a [`crate::procs::ProcTable`].
///
#[derive(Clone, Debug, PartialEq)]
pub struct Poly {
    terms: Vec<Term>
}

impl Poly {

    pub fn zero() -> Self {
        Self { terms: Vec::new() }
    }

    ///
    /// Builds a polynomial from arbitrary terms: sorts them by the ring's
    /// ordering, combines coefficients of equal monomials and drops zeros.
    ///
    pub fn from_terms(terms: Vec<Term>, ring: &RingDescriptor) -> Self {
        let mut terms = terms;
        terms.sort_by(|l, r| ring.cmp_monomials(&r.mono, &l.mono));
        let mut result: Vec<Term> = Vec::with_capacity(terms.len());
        for t in terms.into_iter() {
            match result.last_mut() {
                Some(last) if ring.cmp_monomials(&last.mono, &t.mono).is_eq() => {
                    last.coeff = ring.field().add_ref(&last.coeff, &t.coeff);
                },
                _ => result.push(t)
            }
        }
        result.retain(|t| !ring.field().is_zero(&t.coeff));
        Self { terms: result }
    }

    ///
    /// Wraps a term list that is already sorted and combined; only checked by a
    /// debug assertion.
    ///
    pub fn from_sorted_terms(terms: Vec<Term>, ring: &RingDescriptor) -> Self {
        let result = Self { terms };
        debug_assert!(result.is_valid(ring));
        return result;
    }

    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn leading_term(&self) -> Option<&Term> {
        self.terms.first()
    }

    pub fn remove_leading(&mut self) -> Option<Term> {
        if self.terms.is_empty() {
            None
        } else {
            Some(self.terms.remove(0))
        }
    }

    pub fn into_terms(self) -> Vec<Term> {
        self.terms
    }

    pub(crate) fn terms_mut(&mut self) -> &mut Vec<Term> {
        &mut self.terms
    }

    pub fn is_valid(&self, ring: &RingDescriptor) -> bool {
        for i in 1..self.terms.len() {
            if ring.cmp_monomials(&self.terms[i - 1].mono, &self.terms[i].mono) != std::cmp::Ordering::Greater {
                return false;
            }
        }
        self.terms.iter().all(|t| !ring.field().is_zero(&t.coeff) && t.mono.len() == ring.exp_words())
    }
}

///
/// A bucket of partial polynomials, as used by reduction loops that postpone
/// full normalization. The only structural guarantee is that, once
/// [`crate::procs::ProcTable::bucket_set_leading()`] has run, the leading term
/// of the represented sum is available without merging the parts.
///
#[derive(Clone, Debug)]
pub struct Bucket {
    lead: Option<Term>,
    parts: Vec<Poly>
}

impl Bucket {

    pub fn new() -> Self {
        Self { lead: None, parts: Vec::new() }
    }

    pub fn push(&mut self, part: Poly) {
        if !part.is_zero() {
            self.parts.push(part);
        }
    }

    pub fn leading(&self) -> Option<&Term> {
        self.lead.as_ref()
    }

    pub fn parts(&self) -> &[Poly] {
        &self.parts
    }

    pub(crate) fn set_lead(&mut self, lead: Option<Term>) {
        self.lead = lead;
    }

    pub(crate) fn parts_mut(&mut self) -> &mut Vec<Poly> {
        &mut self.parts
    }
}

#[cfg(test)]
use crate::coeff::FieldKind;

#[cfg(test)]
fn test_ring() -> RingDescriptor {
    RingDescriptor::new(FieldKind::Zp { characteristic: 7 }, 2, Box::new([1, 1]))
}

#[test]
fn test_monomial_mul_div() {
    let a = Monomial::new([3, 1]);
    let b = Monomial::new([1, 1]);
    assert_eq!(Monomial::new([4, 2]), a.mul(&b));
    assert_eq!(Some(Monomial::new([2, 0])), a.div(&b));
    assert_eq!(None, b.div(&a));
    assert!(b.divides(&a));
    assert!(!a.divides(&b));
}

#[test]
fn test_from_terms_sorts_and_combines() {
    let ring = test_ring();
    let f = ring.field().clone();
    let poly = Poly::from_terms(vec![
        Term { coeff: f.from_int(3), mono: Monomial::new([1, 0]) },
        Term { coeff: f.from_int(2), mono: Monomial::new([2, 1]) },
        Term { coeff: f.from_int(5), mono: Monomial::new([1, 0]) },
        Term { coeff: f.from_int(4), mono: Monomial::new([0, 1]) },
    ], &ring);
    // 3 + 5 = 1 mod 7; the first differing word decides the ordering
    assert!(poly.is_valid(&ring));
    assert_eq!(3, poly.len());
    assert_eq!(Monomial::new([2, 1]), poly.leading_term().unwrap().mono);
    assert_eq!(f.from_int(1), poly.terms()[1].coeff);
}

#[test]
fn test_from_terms_drops_zero_sums() {
    let ring = test_ring();
    let f = ring.field().clone();
    let poly = Poly::from_terms(vec![
        Term { coeff: f.from_int(3), mono: Monomial::new([1, 1]) },
        Term { coeff: f.from_int(4), mono: Monomial::new([1, 1]) },
    ], &ring);
    assert!(poly.is_zero());
}
