use crate::build::build_proc_table;
use crate::coeff::Coeff;
use crate::descriptor::RingDescriptor;
use crate::poly::{Bucket, Monomial, Poly, Term};
use crate::procs::{NoncommProcs, ProcTable};
use crate::registry::ProcRegistry;

///
/// A polynomial ring handle: the descriptor of the ring together with the
/// kernel table selected for it. The table is built once, when the ring is
/// created, and every polynomial operation of the ring dispatches through it;
/// it is rebuilt only when the descriptor is replaced via
/// [`PolyRing::rebuild()`].
///
/// # Example
/// ```
/// use feanor_poly_dispatch::coeff::FieldKind;
/// use feanor_poly_dispatch::descriptor::RingDescriptor;
/// use feanor_poly_dispatch::poly::{Monomial, Term};
/// use feanor_poly_dispatch::registry::StaticRegistry;
/// use feanor_poly_dispatch::ring::PolyRing;
///
/// let registry = StaticRegistry::builtin();
/// let ring = PolyRing::new(
///     RingDescriptor::new(FieldKind::Zp { characteristic: 7 }, 1, Box::new([1])),
///     &registry
/// );
/// let field = ring.descriptor().field().clone();
/// let p = ring.from_terms(vec![
///     Term { coeff: field.from_int(3), mono: Monomial::new([2]) },
///     Term { coeff: field.from_int(1), mono: Monomial::new([0]) }
/// ]);
/// let doubled = ring.mul_scalar(p, &field.from_int(2));
/// assert_eq!(field.from_int(6), doubled.leading_term().unwrap().coeff);
/// ```
///
pub struct PolyRing {
    descriptor: RingDescriptor,
    procs: ProcTable
}

impl PolyRing {

    pub fn new<R>(descriptor: RingDescriptor, registry: &R) -> Self
        where R: ProcRegistry + ?Sized
    {
        Self::new_with(descriptor, registry, None)
    }

    ///
    /// Creates a ring, additionally passing the multiplication kernels of its
    /// algebra variant; required whenever the descriptor is flagged
    /// non-commutative.
    ///
    pub fn new_with<R>(descriptor: RingDescriptor, registry: &R, noncomm: Option<&NoncommProcs>) -> Self
        where R: ProcRegistry + ?Sized
    {
        let procs = build_proc_table(&descriptor, registry, noncomm);
        Self { descriptor, procs }
    }

    ///
    /// Replaces the descriptor of this ring and selects a fresh kernel table
    /// for it. Existing polynomials of the old ring are not converted.
    ///
    pub fn rebuild<R>(&mut self, descriptor: RingDescriptor, registry: &R, noncomm: Option<&NoncommProcs>)
        where R: ProcRegistry + ?Sized
    {
        self.procs = build_proc_table(&descriptor, registry, noncomm);
        self.descriptor = descriptor;
    }

    pub fn descriptor(&self) -> &RingDescriptor {
        &self.descriptor
    }

    pub fn procs(&self) -> &ProcTable {
        &self.procs
    }

    pub fn from_terms(&self, terms: Vec<Term>) -> Poly {
        Poly::from_terms(terms, &self.descriptor)
    }

    pub fn clone_poly(&self, p: &Poly) -> Poly {
        self.procs.clone_poly(p, &self.descriptor)
    }

    pub fn drop_poly(&self, p: Poly) {
        self.procs.drop_poly(p, &self.descriptor)
    }

    pub fn shallow_copy_delete(&self, p: Poly) -> Poly {
        self.procs.shallow_copy_delete(p, &self.descriptor)
    }

    pub fn mul_scalar(&self, p: Poly, n: &Coeff) -> Poly {
        self.procs.mul_scalar(p, n, &self.descriptor)
    }

    pub fn mul_scalar_ref(&self, p: &Poly, n: &Coeff) -> Poly {
        self.procs.mul_scalar_ref(p, n, &self.descriptor)
    }

    pub fn mul_monomial(&self, p: Poly, m: &Term) -> Poly {
        self.procs.mul_monomial(p, m, &self.descriptor)
    }

    pub fn mul_monomial_ref(&self, p: &Poly, m: &Term) -> Poly {
        self.procs.mul_monomial_ref(p, m, &self.descriptor)
    }

    pub fn sub_monomial_mul(&self, p: Poly, m: &Term, q: &Poly) -> Poly {
        self.procs.sub_monomial_mul(p, m, q, &self.descriptor)
    }

    pub fn add(&self, lhs: Poly, rhs: Poly) -> Poly {
        self.procs.add(lhs, rhs, &self.descriptor)
    }

    pub fn negate(&self, p: Poly) -> Poly {
        self.procs.negate(p, &self.descriptor)
    }

    pub fn mul_coeff_div_select(&self, p: &Poly, m: &Term) -> Poly {
        self.procs.mul_coeff_div_select(p, m, &self.descriptor)
    }

    pub fn mul_coeff_div_select_mul(&self, p: &Poly, m: &Term, shift: &Monomial) -> Poly {
        self.procs.mul_coeff_div_select_mul(p, m, shift, &self.descriptor)
    }

    pub fn merge(&self, lhs: Poly, rhs: Poly) -> Poly {
        self.procs.merge(lhs, rhs, &self.descriptor)
    }

    pub fn bucket_set_leading(&self, bucket: &mut Bucket) {
        self.procs.bucket_set_leading(bucket, &self.descriptor)
    }

    pub fn mul_monomial_noether(&self, p: &Poly, m: &Term) -> Poly {
        self.procs.mul_monomial_noether(p, m, &self.descriptor)
    }
}

#[cfg(test)]
use crate::coeff::FieldKind;
#[cfg(test)]
use crate::registry::StaticRegistry;

#[test]
fn test_ring_rebuild_switches_kernels() {
    let registry = StaticRegistry::builtin();
    let mut ring = PolyRing::new(
        RingDescriptor::new(FieldKind::Zp { characteristic: 7 }, 1, Box::new([1])),
        &registry
    );
    let field = ring.descriptor().field().clone();
    let p = ring.from_terms(vec![
        Term { coeff: field.from_int(3), mono: Monomial::new([2]) },
        Term { coeff: field.from_int(4), mono: Monomial::new([1]) }
    ]);
    let q = ring.from_terms(vec![Term { coeff: field.from_int(5), mono: Monomial::new([2]) }]);
    let sum = ring.add(p.clone(), q.clone());
    assert_eq!(field.from_int(1), sum.leading_term().unwrap().coeff);

    // same handle, different descriptor: over the rationals, longer encoding
    ring.rebuild(
        RingDescriptor::new(FieldKind::Rational, 3, Box::new([1, 1, 1])),
        &registry,
        None
    );
    let field = ring.descriptor().field().clone();
    let p = ring.from_terms(vec![Term { coeff: field.from_int(3), mono: Monomial::new([2, 0, 1]) }]);
    let doubled = ring.mul_scalar_ref(&p, &field.from_int(2));
    assert_eq!(field.from_int(6), doubled.leading_term().unwrap().coeff);
}
