//!
//! Diagnostic views of the kernel selection. Nothing here installs kernels or
//! mutates a ring; the queries rerun the classification (and, for
//! [`proc_table_names()`], the full selection) and report human-readable names
//! instead. Available in test builds and behind the `introspection` feature.
//!

use std::fmt::{Display, Formatter};

use crate::classify::{is_valid_spec, spec_of};
use crate::descriptor::RingDescriptor;
use crate::procs::{NoncommProcs, ProcBundle};
use crate::registry::ProcRegistry;

///
/// The three category names classification selects for the given ring.
///
pub fn spec_names(ring: &RingDescriptor) -> (&'static str, &'static str, &'static str) {
    let (field, length, ord) = spec_of(ring);
    (field.name(), length.name(), ord.name())
}

///
/// The name-substituted counterpart of a kernel table: for every slot, the
/// name of the bundle whose kernel the build would install.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProcNameTable {
    pub clone_poly: &'static str,
    pub drop_poly: &'static str,
    pub shallow_copy_delete: &'static str,
    pub mul_scalar: &'static str,
    pub mul_scalar_ref: &'static str,
    pub mul_monomial: &'static str,
    pub mul_monomial_ref: &'static str,
    pub sub_monomial_mul: &'static str,
    pub add: &'static str,
    pub negate: &'static str,
    pub mul_coeff_div_select: &'static str,
    pub mul_coeff_div_select_mul: &'static str,
    pub merge: &'static str,
    pub bucket_set_leading: &'static str,
    pub mul_monomial_noether: &'static str
}

impl ProcNameTable {

    pub fn entries(&self) -> [(&'static str, &'static str); 15] {
        [
            ("clone_poly", self.clone_poly),
            ("drop_poly", self.drop_poly),
            ("shallow_copy_delete", self.shallow_copy_delete),
            ("mul_scalar", self.mul_scalar),
            ("mul_scalar_ref", self.mul_scalar_ref),
            ("mul_monomial", self.mul_monomial),
            ("mul_monomial_ref", self.mul_monomial_ref),
            ("sub_monomial_mul", self.sub_monomial_mul),
            ("add", self.add),
            ("negate", self.negate),
            ("mul_coeff_div_select", self.mul_coeff_div_select),
            ("mul_coeff_div_select_mul", self.mul_coeff_div_select_mul),
            ("merge", self.merge),
            ("bucket_set_leading", self.bucket_set_leading),
            ("mul_monomial_noether", self.mul_monomial_noether)
        ]
    }
}

impl Display for ProcNameTable {

    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (slot, name) in self.entries() {
            writeln!(f, "{}: {}", slot, name)?;
        }
        return Ok(());
    }
}

fn slot_name<T>(slot: &Option<T>, bundle_name: &'static str) -> &'static str {
    if slot.is_some() { bundle_name } else { "general" }
}

///
/// Reruns the kernel selection for the given ring, but reports bundle names
/// per slot instead of installing anything. The selection steps (registry
/// init and lookup, non-commutative override, general fallback) are the same
/// as in [`crate::build::build_proc_table()`]; no diagnostics are emitted.
///
/// # Panics
///
/// Under the same conditions as [`crate::build::build_proc_table()`].
///
pub fn proc_table_names<R>(ring: &RingDescriptor, registry: &R, noncomm: Option<&NoncommProcs>) -> ProcNameTable
    where R: ProcRegistry + ?Sized
{
    let key = spec_of(ring);
    assert!(is_valid_spec(key.0, key.1, key.2), "classification produced an invalid category triple");

    registry.init(key);
    let bundle = registry.lookup(key).copied().unwrap_or(ProcBundle::empty("general"));
    let name = bundle.name;

    let mut result = ProcNameTable {
        clone_poly: slot_name(&bundle.clone_poly, name),
        drop_poly: slot_name(&bundle.drop_poly, name),
        shallow_copy_delete: slot_name(&bundle.shallow_copy_delete, name),
        mul_scalar: slot_name(&bundle.mul_scalar, name),
        mul_scalar_ref: slot_name(&bundle.mul_scalar_ref, name),
        mul_monomial: slot_name(&bundle.mul_monomial, name),
        mul_monomial_ref: slot_name(&bundle.mul_monomial_ref, name),
        sub_monomial_mul: slot_name(&bundle.sub_monomial_mul, name),
        add: slot_name(&bundle.add, name),
        negate: slot_name(&bundle.negate, name),
        mul_coeff_div_select: slot_name(&bundle.mul_coeff_div_select, name),
        mul_coeff_div_select_mul: slot_name(&bundle.mul_coeff_div_select_mul, name),
        merge: slot_name(&bundle.merge, name),
        bucket_set_leading: slot_name(&bundle.bucket_set_leading, name),
        mul_monomial_noether: slot_name(&bundle.mul_monomial_noether, name)
    };

    if ring.is_noncommutative() {
        let nc = match noncomm {
            Some(nc) => nc,
            None => panic!("a non-commutative ring must supply its multiplication kernels")
        };
        result.mul_monomial = nc.name;
        result.mul_monomial_ref = nc.name;
        result.sub_monomial_mul = nc.name;
    }

    return result;
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::coeff::FieldKind;
    use crate::procs::noncomm::NONCOMM;
    use crate::registry::StaticRegistry;

    fn zp_ring(words: usize) -> RingDescriptor {
        RingDescriptor::new(FieldKind::Zp { characteristic: 7 }, words, vec![1; words].into())
    }

    #[test]
    fn test_spec_names() {
        assert_eq!(("zp", "one", "all_nonneg"), spec_names(&zp_ring(1)));
        assert_eq!(("zp", "general", "all_nonneg"), spec_names(&zp_ring(1).with_neg_weight_adjust(true)));
        let ring = RingDescriptor::new(FieldKind::Complex, 9, vec![-1; 9].into());
        assert_eq!(("general", "general", "all_nonpos"), spec_names(&ring));
    }

    #[test]
    fn test_proc_table_names_mix_specialized_and_general() {
        let names = proc_table_names(&zp_ring(1), &StaticRegistry::builtin(), None);
        assert_eq!("zp_one_nonneg", names.add);
        assert_eq!("zp_one_nonneg", names.mul_scalar);
        assert_eq!("zp_one_nonneg", names.mul_monomial);
        assert_eq!("general", names.merge);
        assert_eq!("general", names.clone_poly);
        assert_eq!("general", names.mul_monomial_noether);
    }

    #[test]
    fn test_proc_table_names_all_general_without_bundle() {
        let names = proc_table_names(&zp_ring(3), &StaticRegistry::builtin(), None);
        assert!(names.entries().iter().all(|(_, name)| *name == "general"));
    }

    #[test]
    fn test_proc_table_names_noncommutative_override() {
        // the override applies even when the registry has no bundle at all
        let names = proc_table_names(&zp_ring(1).with_noncommutative(true), &StaticRegistry::new(), Some(&NONCOMM));
        assert_eq!("noncomm", names.mul_monomial);
        assert_eq!("noncomm", names.mul_monomial_ref);
        assert_eq!("noncomm", names.sub_monomial_mul);
        assert_eq!("general", names.add);

        let names = proc_table_names(&zp_ring(1).with_noncommutative(true), &StaticRegistry::builtin(), Some(&NONCOMM));
        assert_eq!("noncomm", names.mul_monomial);
        assert_eq!("zp_one_nonneg", names.add);
    }

    #[test]
    fn test_name_table_display() {
        let names = proc_table_names(&zp_ring(1), &StaticRegistry::builtin(), None);
        let printed = names.to_string();
        assert!(printed.contains("add: zp_one_nonneg"));
        assert!(printed.contains("merge: general"));
    }
}
