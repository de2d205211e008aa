use tracing::instrument;

use crate::classify::{is_valid_spec, spec_of, SpecKey};
use crate::descriptor::RingDescriptor;
use crate::procs::{general, NoncommProcs, ProcBundle, ProcTable};
use crate::registry::ProcRegistry;

///
/// Selects the kernel table for the given ring: classifies it, installs the
/// registry bundle for the resulting category triple, applies the
/// non-commutative override where the ring requires it, and repairs every
/// remaining empty slot with the general kernel. The returned table is frozen
/// and serves all polynomial operations on the ring for its lifetime.
///
/// Expected to run once per ring, at ring construction time. A triple that
/// fails [`is_valid_spec()`] is a programming error and aborts the build; a
/// missing bundle or missing slots are not errors, they merely cost
/// performance and are reported through the diagnostic channel.
///
/// # Panics
///
/// If classification yields an invalid category triple, or if the ring is
/// flagged non-commutative and no kernel bundle for its algebra is supplied.
///
#[instrument(skip_all, level = "trace")]
pub fn build_proc_table<R>(ring: &RingDescriptor, registry: &R, noncomm: Option<&NoncommProcs>) -> ProcTable
    where R: ProcRegistry + ?Sized
{
    let key = spec_of(ring);
    assert!(is_valid_spec(key.0, key.1, key.2), "classification produced an invalid category triple");

    // start from a cleared table, then install whatever bundle the registry has
    let mut table = ProcBundle::empty("general");
    registry.init(key);
    if let Some(bundle) = registry.lookup(key) {
        table = *bundle;
    }

    if ring.is_noncommutative() {
        let nc = match noncomm {
            Some(nc) => nc,
            None => panic!("a non-commutative ring must supply its multiplication kernels")
        };
        // the algebra's product replaces whatever the registry selected
        table.mul_monomial = Some(nc.mul_monomial);
        table.mul_monomial_ref = Some(nc.mul_monomial_ref);
        table.sub_monomial_mul = Some(nc.sub_monomial_mul);
    }

    _ = repair_missing(&mut table, key);
    return table.freeze();
}

///
/// Fills every empty slot of the bundle with the corresponding general kernel
/// and returns how many slots had to be repaired. Each repair emits a bug
/// report event and a human-readable warning; a bundle that is already fully
/// populated is left untouched and nothing is emitted.
///
pub fn repair_missing(table: &mut ProcBundle, key: SpecKey) -> usize {
    let mut repaired = 0;

    macro_rules! check_proc {
        ($slot:ident, $general:expr) => {
            if table.$slot.is_none() {
                report_missing(stringify!($slot), key);
                table.$slot = Some($general);
                repaired += 1;
            }
        };
    }

    check_proc!(clone_poly, general::CLONE_POLY);
    check_proc!(drop_poly, general::DROP_POLY);
    check_proc!(shallow_copy_delete, general::SHALLOW_COPY_DELETE);
    check_proc!(mul_scalar, general::MUL_SCALAR);
    check_proc!(mul_scalar_ref, general::MUL_SCALAR_REF);
    check_proc!(mul_monomial, general::MUL_MONOMIAL);
    check_proc!(mul_monomial_ref, general::MUL_MONOMIAL_REF);
    check_proc!(sub_monomial_mul, general::SUB_MONOMIAL_MUL);
    check_proc!(add, general::ADD);
    check_proc!(negate, general::NEGATE);
    check_proc!(mul_coeff_div_select, general::MUL_COEFF_DIV_SELECT);
    check_proc!(mul_coeff_div_select_mul, general::MUL_COEFF_DIV_SELECT_MUL);
    check_proc!(merge, general::MERGE);
    check_proc!(bucket_set_leading, general::BUCKET_SET_LEADING);
    check_proc!(mul_monomial_noether, general::MUL_MONOMIAL_NOETHER);

    return repaired;
}

fn report_missing(slot: &'static str, key: SpecKey) {
    // two independent side effects: a structured bug report and a readable
    // warning; neither blocks and neither aborts the build
    tracing::error!(
        slot = slot,
        field = key.0.name(),
        length = key.1.name(),
        ord = key.2.name(),
        "no kernel installed for a required slot"
    );
    tracing::warn!("polynomial arithmetic will work, but be slower: the general {} kernel stands in", slot);
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::classify::{FieldClass, LengthClass, OrdClass};
    use crate::coeff::FieldKind;
    use crate::poly::{Bucket, Monomial, Poly, Term};
    use crate::procs::noncomm::NONCOMM;
    use crate::registry::StaticRegistry;

    fn zp_ring(words: usize) -> RingDescriptor {
        RingDescriptor::new(FieldKind::Zp { characteristic: 7 }, words, vec![1; words].into())
    }

    fn poly_of(terms: &[(i64, &[u64])], ring: &RingDescriptor) -> Poly {
        Poly::from_terms(
            terms.iter().map(|(c, m)| Term { coeff: ring.field().from_int(*c), mono: Monomial::new(*m) }).collect(),
            ring
        )
    }

    #[test]
    fn test_every_slot_callable_with_empty_registry() {
        let ring = zp_ring(2);
        let table = build_proc_table(&ring, &StaticRegistry::new(), None);

        let p = poly_of(&[(3, &[2, 1]), (2, &[1, 0])], &ring);
        let q = poly_of(&[(4, &[0, 2])], &ring);
        let m = Term { coeff: ring.field().from_int(2), mono: Monomial::new([1, 1]) };

        assert_eq!(p, table.clone_poly(&p, &ring));
        table.drop_poly(table.clone_poly(&p, &ring), &ring);
        assert_eq!(p, table.shallow_copy_delete(p.clone(), &ring));
        assert_eq!(
            poly_of(&[(6, &[2, 1]), (4, &[1, 0])], &ring),
            table.mul_scalar(p.clone(), &ring.field().from_int(2), &ring)
        );
        assert_eq!(
            table.mul_scalar(p.clone(), &ring.field().from_int(2), &ring),
            table.mul_scalar_ref(&p, &ring.field().from_int(2), &ring)
        );
        assert_eq!(
            poly_of(&[(6, &[3, 2]), (4, &[2, 1])], &ring),
            table.mul_monomial(p.clone(), &m, &ring)
        );
        assert_eq!(
            table.mul_monomial(p.clone(), &m, &ring),
            table.mul_monomial_ref(&p, &m, &ring)
        );
        assert_eq!(
            poly_of(&[(3, &[2, 1]), (2, &[1, 0]), (-8, &[1, 3])], &ring),
            table.sub_monomial_mul(p.clone(), &m, &q, &ring)
        );
        assert_eq!(
            poly_of(&[(3, &[2, 1]), (2, &[1, 0]), (4, &[0, 2])], &ring),
            table.add(p.clone(), q.clone(), &ring)
        );
        assert!(table.add(p.clone(), table.negate(p.clone(), &ring), &ring).is_zero());
        assert_eq!(
            poly_of(&[(6, &[2, 1])], &ring),
            table.mul_coeff_div_select(&p, &m, &ring)
        );
        assert_eq!(
            poly_of(&[(6, &[2, 0])], &ring),
            table.mul_coeff_div_select_mul(&p, &m, &Monomial::new([1, 0]), &ring)
        );
        assert_eq!(
            table.add(p.clone(), q.clone(), &ring),
            table.merge(p.clone(), q.clone(), &ring)
        );
        let mut bucket = Bucket::new();
        bucket.push(p.clone());
        bucket.push(q.clone());
        table.bucket_set_leading(&mut bucket, &ring);
        assert_eq!(Monomial::new([2, 1]), bucket.leading().unwrap().mono);
        assert_eq!(
            table.mul_monomial_ref(&p, &m, &ring),
            table.mul_monomial_noether(&p, &m, &ring)
        );
    }

    #[test]
    fn test_specialized_bundle_behaves_like_general() {
        let ring = zp_ring(1);
        let specialized = build_proc_table(&ring, &StaticRegistry::builtin(), None);
        let fallback = build_proc_table(&ring, &StaticRegistry::new(), None);

        let p = poly_of(&[(3, &[4]), (2, &[2]), (6, &[0])], &ring);
        let q = poly_of(&[(5, &[4]), (1, &[1]), (1, &[0])], &ring);
        assert_eq!(
            fallback.add(p.clone(), q.clone(), &ring),
            specialized.add(p.clone(), q.clone(), &ring)
        );
        assert_eq!(
            fallback.mul_scalar(p.clone(), &ring.field().from_int(3), &ring),
            specialized.mul_scalar(p.clone(), &ring.field().from_int(3), &ring)
        );
    }

    #[test]
    fn test_repair_is_idempotent() {
        let key = (FieldClass::Zp, LengthClass::One, OrdClass::AllNonneg);
        let mut bundle = crate::procs::specialized::ZP_ONE_NONNEG;
        let repaired = repair_missing(&mut bundle, key);
        assert!(repaired > 0);
        assert_eq!(0, repair_missing(&mut bundle, key));

        let mut full = general::GENERAL;
        assert_eq!(0, repair_missing(&mut full, key));
    }

    #[test]
    fn test_noncommutative_override_is_unconditional() {
        // even with no registry bundle at all for the triple, the three
        // override slots must end up with the algebra's kernels
        let ring = zp_ring(1).with_noncommutative(true);
        let table = build_proc_table(&ring, &StaticRegistry::new(), Some(&NONCOMM));

        let p = poly_of(&[(3, &[4]), (2, &[2])], &ring);
        let m = Term { coeff: ring.field().from_int(2), mono: Monomial::new([1]) };
        assert_eq!(
            poly_of(&[(6, &[5]), (4, &[3])], &ring),
            table.mul_monomial_ref(&p, &m, &ring)
        );
    }

    #[test]
    #[should_panic]
    fn test_noncommutative_ring_without_kernels_is_rejected() {
        let ring = zp_ring(1).with_noncommutative(true);
        _ = build_proc_table(&ring, &StaticRegistry::new(), None);
    }

    #[test]
    fn test_registry_init_runs_before_lookup() {
        use crate::classify::SpecKey;
        use crate::procs::ProcBundle;
        use crate::registry::ProcRegistry;
        use std::sync::Mutex;

        struct RecordingRegistry {
            events: Mutex<Vec<(&'static str, SpecKey)>>
        }

        impl ProcRegistry for RecordingRegistry {

            fn init(&self, key: SpecKey) {
                self.events.lock().unwrap().push(("init", key));
            }

            fn lookup(&self, key: SpecKey) -> Option<&ProcBundle> {
                self.events.lock().unwrap().push(("lookup", key));
                None
            }
        }

        let ring = zp_ring(2);
        let registry = RecordingRegistry { events: Mutex::new(Vec::new()) };
        _ = build_proc_table(&ring, &registry, None);

        let key = crate::classify::spec_of(&ring);
        let events = registry.events.lock().unwrap();
        assert_eq!(vec![("init", key), ("lookup", key)], *events);
    }
}
