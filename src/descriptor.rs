use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::coeff::FieldKind;
use crate::poly::Monomial;

///
/// The bundle of ring properties the kernel selection is keyed by: the
/// coefficient field, the number of machine words a packed exponent vector
/// occupies, and the ordering sign vector describing how each word contributes
/// to monomial comparison.
///
/// A descriptor is immutable once constructed and read-only to the selection
/// machinery; the ring owning it rebuilds its kernel table whenever it is
/// replaced (see [`crate::ring::PolyRing::rebuild()`]).
///
/// # Example
/// ```
/// use feanor_poly_dispatch::coeff::FieldKind;
/// use feanor_poly_dispatch::descriptor::RingDescriptor;
///
/// let ring = RingDescriptor::new(FieldKind::Zp { characteristic: 32003 }, 2, Box::new([1, 1]));
/// assert_eq!(2, ring.exp_words());
/// ```
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RingDescriptor {
    field: FieldKind,
    exp_words: usize,
    ord_signs: Box<[i8]>,
    neg_weight_adjust: bool,
    noncommutative: bool,
    noether: Option<Monomial>
}

impl RingDescriptor {

    pub fn new(field: FieldKind, exp_words: usize, ord_signs: Box<[i8]>) -> Self {
        assert!(exp_words > 0);
        assert!(ord_signs.len() == exp_words);
        assert!(ord_signs.iter().all(|s| (-1..=1).contains(s)));
        Self {
            field,
            exp_words,
            ord_signs,
            neg_weight_adjust: false,
            noncommutative: false,
            noether: None
        }
    }

    ///
    /// Marks the ring as using a low-order adjustment offset for packed
    /// exponent arithmetic. Such rings never use fixed-length kernels, see
    /// [`crate::classify::length_class()`].
    ///
    pub fn with_neg_weight_adjust(mut self, neg_weight_adjust: bool) -> Self {
        self.neg_weight_adjust = neg_weight_adjust;
        return self;
    }

    ///
    /// Marks the underlying algebra as a non-commutative variant. For such
    /// rings, three multiplication kernels are supplied by the algebra itself
    /// instead of the registry; see [`crate::build::build_proc_table()`].
    ///
    pub fn with_noncommutative(mut self, noncommutative: bool) -> Self {
        self.noncommutative = noncommutative;
        return self;
    }

    pub fn with_noether(mut self, noether: Option<Monomial>) -> Self {
        if let Some(bound) = &noether {
            assert!(bound.len() == self.exp_words);
        }
        self.noether = noether;
        return self;
    }

    pub fn field(&self) -> &FieldKind {
        &self.field
    }

    pub fn exp_words(&self) -> usize {
        self.exp_words
    }

    pub fn ord_signs(&self) -> &[i8] {
        &self.ord_signs
    }

    pub fn neg_weight_adjust(&self) -> bool {
        self.neg_weight_adjust
    }

    pub fn is_noncommutative(&self) -> bool {
        self.noncommutative
    }

    ///
    /// The Noether bound of the ring, if one is active: kernels aware of it may
    /// discard product terms that fall below it.
    ///
    pub fn noether(&self) -> Option<&Monomial> {
        self.noether.as_ref()
    }

    ///
    /// Compares two monomials of this ring. The first differing word decides;
    /// its ordering sign orients the comparison, and words with sign zero do
    /// not contribute.
    ///
    pub fn cmp_monomials(&self, lhs: &Monomial, rhs: &Monomial) -> Ordering {
        debug_assert!(lhs.len() == self.exp_words && rhs.len() == self.exp_words);
        for i in 0..self.exp_words {
            let sign = self.ord_signs[i];
            if sign == 0 {
                continue;
            }
            let ord = lhs.words()[i].cmp(&rhs.words()[i]);
            if ord != Ordering::Equal {
                return if sign > 0 { ord } else { ord.reverse() };
            }
        }
        return Ordering::Equal;
    }
}

#[test]
fn test_cmp_monomials_orientation() {
    let ring = RingDescriptor::new(FieldKind::Rational, 2, Box::new([1, -1]));
    let a = Monomial::new([2, 5]);
    let b = Monomial::new([1, 9]);
    assert_eq!(Ordering::Greater, ring.cmp_monomials(&a, &b));
    let c = Monomial::new([2, 3]);
    // equal first word, second word compares reversed
    assert_eq!(Ordering::Less, ring.cmp_monomials(&a, &c));
    assert_eq!(Ordering::Equal, ring.cmp_monomials(&a, &a));
}

#[test]
fn test_cmp_monomials_zero_sign_skipped() {
    let ring = RingDescriptor::new(FieldKind::Rational, 3, Box::new([1, 0, 1]));
    let a = Monomial::new([1, 100, 2]);
    let b = Monomial::new([1, 0, 3]);
    assert_eq!(Ordering::Less, ring.cmp_monomials(&a, &b));
}

#[test]
#[should_panic]
fn test_descriptor_rejects_sign_vector_mismatch() {
    RingDescriptor::new(FieldKind::Rational, 2, Box::new([1]));
}

#[test]
fn test_descriptor_usable_as_config() {
    let ring = RingDescriptor::new(FieldKind::Zp { characteristic: 7 }, 2, Box::new([1, 0]))
        .with_neg_weight_adjust(true)
        .with_noether(Some(Monomial::new([3, 0])));
    let serialized = serde_json::to_string(&ring).unwrap();
    let restored: RingDescriptor = serde_json::from_str(&serialized).unwrap();
    assert_eq!(ring, restored);
    assert_eq!(crate::classify::spec_of(&ring), crate::classify::spec_of(&restored));
}
