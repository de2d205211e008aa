use serde::{Deserialize, Serialize};

use crate::coeff::FieldKind;
use crate::descriptor::RingDescriptor;

///
/// Prime fields with characteristic above this bound store their coefficients
/// in a different representation and therefore cannot use the dedicated prime
/// field kernels. Only relevant with the `large-prime-fields` feature.
///
pub const SMALL_PRIME_BOUND: u64 = 32003;

///
/// The coefficient-field category of a ring, the first axis of the kernel
/// selection key.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldClass {
    /// exact small-prime field
    Zp,
    /// machine-precision reals
    Real,
    /// Galois field
    Galois,
    /// rationals
    Rational,
    /// anything else; served by the general kernels
    General
}

impl FieldClass {

    pub fn name(&self) -> &'static str {
        match self {
            FieldClass::Zp => "zp",
            FieldClass::Real => "real",
            FieldClass::Galois => "galois",
            FieldClass::Rational => "rational",
            FieldClass::General => "general"
        }
    }
}

///
/// The exponent-encoding-length category of a ring, the second axis of the
/// kernel selection key. Fixed-length kernels exist for up to eight packed
/// words; everything else is served by the general kernels.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LengthClass {
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    General
}

impl LengthClass {

    ///
    /// The exact word count this category stands for, or `None` for
    /// [`LengthClass::General`].
    ///
    pub fn words(&self) -> Option<usize> {
        match self {
            LengthClass::One => Some(1),
            LengthClass::Two => Some(2),
            LengthClass::Three => Some(3),
            LengthClass::Four => Some(4),
            LengthClass::Five => Some(5),
            LengthClass::Six => Some(6),
            LengthClass::Seven => Some(7),
            LengthClass::Eight => Some(8),
            LengthClass::General => None
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LengthClass::One => "one",
            LengthClass::Two => "two",
            LengthClass::Three => "three",
            LengthClass::Four => "four",
            LengthClass::Five => "five",
            LengthClass::Six => "six",
            LengthClass::Seven => "seven",
            LengthClass::Eight => "eight",
            LengthClass::General => "general"
        }
    }
}

///
/// The ordering-sign-pattern category of a ring, the third axis of the kernel
/// selection key.
///
/// Nine recognized sign-vector shapes, each in a plain and a trailing-zero
/// variant (the trailing zero is the sentinel word some orderings append), plus
/// [`OrdClass::General`] for everything else. The shapes are named after the
/// sign sequence: e.g. `NegNonneg` is a leading negative word followed by only
/// non-negative ones, `PosPosNonpos` two leading positive words followed by
/// only non-positive ones.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrdClass {
    AllNonpos,
    AllNonposZero,
    AllNonneg,
    AllNonnegZero,
    NegNonneg,
    NegNonnegZero,
    NonnegNeg,
    NonnegNegZero,
    PosNonpos,
    PosNonposZero,
    NonposPos,
    NonposPosZero,
    PosPosNonpos,
    PosPosNonposZero,
    PosNonposPos,
    PosNonposPosZero,
    NegPosNonpos,
    NegPosNonposZero,
    General
}

impl OrdClass {

    pub fn name(&self) -> &'static str {
        match self {
            OrdClass::AllNonpos => "all_nonpos",
            OrdClass::AllNonposZero => "all_nonpos_zero",
            OrdClass::AllNonneg => "all_nonneg",
            OrdClass::AllNonnegZero => "all_nonneg_zero",
            OrdClass::NegNonneg => "neg_nonneg",
            OrdClass::NegNonnegZero => "neg_nonneg_zero",
            OrdClass::NonnegNeg => "nonneg_neg",
            OrdClass::NonnegNegZero => "nonneg_neg_zero",
            OrdClass::PosNonpos => "pos_nonpos",
            OrdClass::PosNonposZero => "pos_nonpos_zero",
            OrdClass::NonposPos => "nonpos_pos",
            OrdClass::NonposPosZero => "nonpos_pos_zero",
            OrdClass::PosPosNonpos => "pos_pos_nonpos",
            OrdClass::PosPosNonposZero => "pos_pos_nonpos_zero",
            OrdClass::PosNonposPos => "pos_nonpos_pos",
            OrdClass::PosNonposPosZero => "pos_nonpos_pos_zero",
            OrdClass::NegPosNonpos => "neg_pos_nonpos",
            OrdClass::NegPosNonposZero => "neg_pos_nonpos_zero",
            OrdClass::General => "general"
        }
    }

    ///
    /// The minimum number of sign-vector words a ring must have for this
    /// category to arise. Used by [`is_valid_spec()`].
    ///
    pub fn min_words(&self) -> usize {
        match self {
            OrdClass::AllNonpos | OrdClass::AllNonneg | OrdClass::General => 0,
            OrdClass::AllNonposZero | OrdClass::AllNonnegZero => 1,
            OrdClass::NegNonneg | OrdClass::NonnegNeg | OrdClass::PosNonpos | OrdClass::NonposPos => 2,
            OrdClass::NegNonnegZero | OrdClass::NonnegNegZero | OrdClass::PosNonposZero | OrdClass::NonposPosZero => 3,
            OrdClass::PosPosNonpos | OrdClass::PosNonposPos | OrdClass::NegPosNonpos => 3,
            OrdClass::PosPosNonposZero | OrdClass::PosNonposPosZero | OrdClass::NegPosNonposZero => 4
        }
    }
}

///
/// The kernel selection key: one category tag per axis.
///
pub type SpecKey = (FieldClass, LengthClass, OrdClass);

///
/// Classifies the coefficient field of the given ring. Total: unrecognized
/// kinds map to [`FieldClass::General`].
///
pub fn field_class(ring: &RingDescriptor) -> FieldClass {
    match ring.field() {
        #[cfg(feature = "large-prime-fields")]
        FieldKind::Zp { characteristic } => if *characteristic <= SMALL_PRIME_BOUND {
            FieldClass::Zp
        } else {
            FieldClass::General
        },
        #[cfg(not(feature = "large-prime-fields"))]
        FieldKind::Zp { .. } => FieldClass::Zp,
        FieldKind::Real => FieldClass::Real,
        FieldKind::Galois(_) => FieldClass::Galois,
        FieldKind::Rational => FieldClass::Rational,
        _ => FieldClass::General
    }
}

///
/// Classifies the exponent encoding length of the given ring. Total:
/// lengths above eight map to [`LengthClass::General`].
///
/// A ring with an active low-order adjustment offset always classifies as
/// general, whatever its word count: the fixed-length kernels assume plain
/// word-wise exponent arithmetic.
///
pub fn length_class(ring: &RingDescriptor) -> LengthClass {
    debug_assert!(ring.exp_words() > 0);
    if ring.neg_weight_adjust() {
        return LengthClass::General;
    }
    match ring.exp_words() {
        1 => LengthClass::One,
        2 => LengthClass::Two,
        3 => LengthClass::Three,
        4 => LengthClass::Four,
        5 => LengthClass::Five,
        6 => LengthClass::Six,
        7 => LengthClass::Seven,
        8 => LengthClass::Eight,
        _ => LengthClass::General
    }
}

fn all_nonpos(sgn: &[i8]) -> bool {
    sgn.iter().all(|s| *s <= 0)
}

fn all_nonneg(sgn: &[i8]) -> bool {
    sgn.iter().all(|s| *s >= 0)
}

fn neg_then_nonneg(sgn: &[i8]) -> bool {
    sgn.len() >= 2 && sgn[0] == -1 && all_nonneg(&sgn[1..])
}

fn nonneg_then_neg(sgn: &[i8]) -> bool {
    sgn.len() >= 2 && sgn[sgn.len() - 1] == -1 && all_nonneg(&sgn[..sgn.len() - 1])
}

fn pos_then_nonpos(sgn: &[i8]) -> bool {
    sgn.len() >= 2 && sgn[0] == 1 && all_nonpos(&sgn[1..])
}

fn nonpos_then_pos(sgn: &[i8]) -> bool {
    sgn.len() >= 2 && sgn[sgn.len() - 1] == 1 && all_nonpos(&sgn[..sgn.len() - 1])
}

fn pos_pos_then_nonpos(sgn: &[i8]) -> bool {
    sgn.len() >= 3 && sgn[0] == 1 && sgn[1] == 1 && all_nonpos(&sgn[2..])
}

fn pos_nonpos_pos(sgn: &[i8]) -> bool {
    sgn.len() >= 3 && sgn[0] == 1 && sgn[sgn.len() - 1] == 1 && all_nonpos(&sgn[1..sgn.len() - 1])
}

fn neg_pos_then_nonpos(sgn: &[i8]) -> bool {
    sgn.len() >= 3 && sgn[0] == -1 && sgn[1] == 1 && all_nonpos(&sgn[2..])
}

struct OrdPattern {
    matches: fn(&[i8]) -> bool,
    class: OrdClass,
    class_zero: OrdClass
}

// The order of this list is part of the contract: earlier entries win, and the
// two single-sided shapes are always favoured over everything composite.
const ORD_PATTERNS: [OrdPattern; 9] = [
    OrdPattern { matches: all_nonpos, class: OrdClass::AllNonpos, class_zero: OrdClass::AllNonposZero },
    OrdPattern { matches: all_nonneg, class: OrdClass::AllNonneg, class_zero: OrdClass::AllNonnegZero },
    OrdPattern { matches: neg_then_nonneg, class: OrdClass::NegNonneg, class_zero: OrdClass::NegNonnegZero },
    OrdPattern { matches: nonneg_then_neg, class: OrdClass::NonnegNeg, class_zero: OrdClass::NonnegNegZero },
    OrdPattern { matches: pos_then_nonpos, class: OrdClass::PosNonpos, class_zero: OrdClass::PosNonposZero },
    OrdPattern { matches: nonpos_then_pos, class: OrdClass::NonposPos, class_zero: OrdClass::NonposPosZero },
    OrdPattern { matches: pos_pos_then_nonpos, class: OrdClass::PosPosNonpos, class_zero: OrdClass::PosPosNonposZero },
    OrdPattern { matches: pos_nonpos_pos, class: OrdClass::PosNonposPos, class_zero: OrdClass::PosNonposPosZero },
    OrdPattern { matches: neg_pos_then_nonpos, class: OrdClass::NegPosNonpos, class_zero: OrdClass::NegPosNonposZero }
];

///
/// Classifies the ordering sign pattern of the given ring. Total: sign vectors
/// matching none of the recognized shapes map to [`OrdClass::General`].
///
/// If the last sign is zero it is treated as a sentinel: it is stripped before
/// shape matching and the zero variant of the matched shape is returned.
///
pub fn ord_class(ring: &RingDescriptor) -> OrdClass {
    let signs = ring.ord_signs();
    let (effective, has_zero) = match signs.split_last() {
        Some((&0, rest)) => (rest, true),
        _ => (signs, false)
    };
    for pattern in &ORD_PATTERNS {
        if (pattern.matches)(effective) {
            return if has_zero { pattern.class_zero } else { pattern.class };
        }
    }
    return OrdClass::General;
}

///
/// Computes the full kernel selection key of the given ring.
///
pub fn spec_of(ring: &RingDescriptor) -> SpecKey {
    (field_class(ring), length_class(ring), ord_class(ring))
}

///
/// Whether the given category triple can arise from classifying an actual ring
/// descriptor. Every ordering shape needs a minimum number of sign-vector
/// words; a fixed length category must provide them. The field axis never
/// constrains the other two.
///
/// The table builder asserts this for the triple it computed; a violation
/// there is a programming error, not a runtime condition.
///
pub fn is_valid_spec(_field: FieldClass, length: LengthClass, ord: OrdClass) -> bool {
    match length.words() {
        Some(n) => n >= ord.min_words(),
        None => true
    }
}

#[cfg(any(test, feature = "generic_tests"))]
pub mod generic_tests {

    use super::*;

    ///
    /// Checks the axioms every classification must satisfy: purity (two runs on
    /// an unchanged descriptor agree), totality of the name mapping, validity
    /// of the resulting triple, and the general-length rule for rings with an
    /// adjustment offset.
    ///
    pub fn test_classification_axioms(ring: &RingDescriptor) {
        let key = spec_of(ring);
        assert_eq!(key, spec_of(ring));
        let (field, length, ord) = key;
        assert!(is_valid_spec(field, length, ord));
        assert!(!field.name().is_empty());
        assert!(!length.name().is_empty());
        assert!(!ord.name().is_empty());
        if ring.neg_weight_adjust() {
            assert_eq!(LengthClass::General, length);
        }
        if let Some(n) = length.words() {
            assert_eq!(n, ring.exp_words());
        }
    }
}

#[cfg(test)]
use crate::coeff::GfParams;

#[cfg(test)]
fn ring_with_signs(signs: &[i8]) -> RingDescriptor {
    RingDescriptor::new(FieldKind::Rational, signs.len(), signs.into())
}

#[test]
fn test_ord_class_single_sided() {
    assert_eq!(OrdClass::AllNonpos, ord_class(&ring_with_signs(&[-1, -1, -1])));
    assert_eq!(OrdClass::AllNonposZero, ord_class(&ring_with_signs(&[-1, -1, 0])));
    assert_eq!(OrdClass::AllNonneg, ord_class(&ring_with_signs(&[1, 1, 1])));
    assert_eq!(OrdClass::AllNonnegZero, ord_class(&ring_with_signs(&[1, 1, 0])));
}

#[test]
fn test_ord_class_mixed_shapes() {
    assert_eq!(OrdClass::NegNonneg, ord_class(&ring_with_signs(&[-1, 1, 1])));
    assert_eq!(OrdClass::NonnegNeg, ord_class(&ring_with_signs(&[1, 1, -1])));
    assert_eq!(OrdClass::PosNonpos, ord_class(&ring_with_signs(&[1, -1, -1])));
    assert_eq!(OrdClass::NonposPos, ord_class(&ring_with_signs(&[-1, -1, 1])));
    assert_eq!(OrdClass::PosPosNonpos, ord_class(&ring_with_signs(&[1, 1, -1, -1])));
    assert_eq!(OrdClass::PosNonposPos, ord_class(&ring_with_signs(&[1, -1, 1])));
    assert_eq!(OrdClass::NegPosNonpos, ord_class(&ring_with_signs(&[-1, 1, -1])));
    assert_eq!(OrdClass::NegPosNonposZero, ord_class(&ring_with_signs(&[-1, 1, -1, 0])));
}

#[test]
fn test_ord_class_degenerate_vectors() {
    // a single entry satisfies both single-sided shapes; the nonpositive one is listed first
    assert_eq!(OrdClass::AllNonpos, ord_class(&ring_with_signs(&[-1])));
    assert_eq!(OrdClass::AllNonneg, ord_class(&ring_with_signs(&[1])));
    // sentinel stripped, the empty remainder is vacuously non-positive
    assert_eq!(OrdClass::AllNonposZero, ord_class(&ring_with_signs(&[0])));
    assert_eq!(OrdClass::AllNonposZero, ord_class(&ring_with_signs(&[0, 0])));
}

#[test]
fn test_ord_class_general() {
    assert_eq!(OrdClass::General, ord_class(&ring_with_signs(&[-1, 1, 1, -1])));
    assert_eq!(OrdClass::General, ord_class(&ring_with_signs(&[1, -1, 1, -1])));
}

#[test]
fn test_length_class_direct_mapping() {
    for (words, expected) in [
        (1, LengthClass::One), (2, LengthClass::Two), (3, LengthClass::Three),
        (4, LengthClass::Four), (5, LengthClass::Five), (6, LengthClass::Six),
        (7, LengthClass::Seven), (8, LengthClass::Eight), (9, LengthClass::General),
        (16, LengthClass::General)
    ] {
        let ring = RingDescriptor::new(FieldKind::Rational, words, vec![1; words].into());
        assert_eq!(expected, length_class(&ring));
    }
}

#[test]
fn test_length_class_adjustment_offset_forces_general() {
    for words in [1, 2, 8] {
        let ring = RingDescriptor::new(FieldKind::Rational, words, vec![1; words].into())
            .with_neg_weight_adjust(true);
        assert_eq!(LengthClass::General, length_class(&ring));
    }
}

#[test]
fn test_field_class() {
    let signs: Box<[i8]> = Box::new([1]);
    assert_eq!(FieldClass::Zp, field_class(&RingDescriptor::new(FieldKind::Zp { characteristic: 7 }, 1, signs.clone())));
    assert_eq!(FieldClass::Real, field_class(&RingDescriptor::new(FieldKind::Real, 1, signs.clone())));
    assert_eq!(FieldClass::Galois, field_class(&RingDescriptor::new(FieldKind::Galois(GfParams::new(2, 2, Box::new([1, 1, 1]))), 1, signs.clone())));
    assert_eq!(FieldClass::Rational, field_class(&RingDescriptor::new(FieldKind::Rational, 1, signs.clone())));
    assert_eq!(FieldClass::General, field_class(&RingDescriptor::new(FieldKind::LongReal, 1, signs.clone())));
    assert_eq!(FieldClass::General, field_class(&RingDescriptor::new(FieldKind::Complex, 1, signs)));
}

#[cfg(feature = "large-prime-fields")]
#[test]
fn test_field_class_large_prime_bound() {
    let signs: Box<[i8]> = Box::new([1]);
    assert_eq!(FieldClass::Zp, field_class(&RingDescriptor::new(FieldKind::Zp { characteristic: 32003 }, 1, signs.clone())));
    assert_eq!(FieldClass::General, field_class(&RingDescriptor::new(FieldKind::Zp { characteristic: 32009 }, 1, signs)));
}

#[test]
fn test_is_valid_spec() {
    assert!(is_valid_spec(FieldClass::Zp, LengthClass::One, OrdClass::AllNonneg));
    assert!(is_valid_spec(FieldClass::Zp, LengthClass::One, OrdClass::AllNonposZero));
    assert!(!is_valid_spec(FieldClass::Zp, LengthClass::One, OrdClass::PosNonpos));
    assert!(!is_valid_spec(FieldClass::Zp, LengthClass::Three, OrdClass::PosPosNonposZero));
    assert!(is_valid_spec(FieldClass::Zp, LengthClass::Four, OrdClass::PosPosNonposZero));
    assert!(is_valid_spec(FieldClass::General, LengthClass::General, OrdClass::General));
}

#[test]
fn test_classification_is_pure() {
    let mut rng = oorandom::Rand64::new(42);
    for _ in 0..200 {
        let words = (rng.rand_u64() % 12 + 1) as usize;
        let signs = (0..words).map(|_| (rng.rand_u64() % 3) as i8 - 1).collect::<Box<[i8]>>();
        let field = match rng.rand_u64() % 6 {
            0 => FieldKind::Zp { characteristic: 7 },
            1 => FieldKind::Real,
            2 => FieldKind::LongReal,
            3 => FieldKind::Complex,
            4 => FieldKind::Galois(GfParams::new(2, 2, Box::new([1, 1, 1]))),
            _ => FieldKind::Rational
        };
        let ring = RingDescriptor::new(field, words, signs)
            .with_neg_weight_adjust(rng.rand_u64() % 2 == 0);
        generic_tests::test_classification_axioms(&ring);
    }
}
