use append_only_vec::AppendOnlyVec;

use crate::classify::SpecKey;
use crate::procs::ProcBundle;
use crate::procs::specialized;

///
/// A source of specialization kernel bundles, keyed by the category triple of
/// a ring. The table builder consults exactly one registry per build; see
/// [`crate::build::build_proc_table()`].
///
/// Registries are conceptually immutable: all bundles are in place before the
/// first ring is built, and lookups from many rings may run concurrently.
/// A key without a bundle is not an error; the affected slots fall back to
/// the general kernels during table validation.
///
pub trait ProcRegistry: Sync {

    ///
    /// Runs any setup shared by the kernels of the given category triple,
    /// before the bundle is looked up and installed. Most registries need
    /// none, so the default implementation does nothing.
    ///
    fn init(&self, _key: SpecKey) {}

    fn lookup(&self, key: SpecKey) -> Option<&ProcBundle>;
}

///
/// A registry holding its bundles in an owned table, fully assembled before
/// use.
///
pub struct StaticRegistry {
    bundles: Vec<(SpecKey, ProcBundle)>
}

impl StaticRegistry {

    pub fn new() -> Self {
        Self { bundles: Vec::new() }
    }

    ///
    /// The registry pre-loaded with the kernel bundles built into this crate,
    /// currently the fixed-length prime-field bundles of
    /// [`crate::procs::specialized`].
    ///
    pub fn builtin() -> Self {
        use crate::classify::{FieldClass, LengthClass, OrdClass};

        let mut result = Self::new();
        result.insert((FieldClass::Zp, LengthClass::One, OrdClass::AllNonneg), specialized::ZP_ONE_NONNEG);
        result.insert((FieldClass::Zp, LengthClass::Two, OrdClass::AllNonneg), specialized::ZP_TWO_NONNEG);
        return result;
    }

    pub fn insert(&mut self, key: SpecKey, bundle: ProcBundle) {
        assert!(self.bundles.iter().all(|(k, _)| *k != key), "duplicate bundle for category triple");
        self.bundles.push((key, bundle));
    }
}

impl ProcRegistry for StaticRegistry {

    fn lookup(&self, key: SpecKey) -> Option<&ProcBundle> {
        self.bundles.iter().filter(|(k, _)| *k == key).map(|(_, bundle)| bundle).next()
    }
}

static GLOBAL_BUNDLES: AppendOnlyVec<(SpecKey, ProcBundle)> = AppendOnlyVec::new();

///
/// The process-wide registry, fed by [`register_bundle()`]. Safe for
/// concurrent lookups; meant to be populated once at program startup, before
/// any ring is built.
///
#[stability::unstable(feature = "enable")]
pub struct GlobalRegistry;

///
/// Adds a bundle to the process-wide registry. Later registrations for the
/// same key shadow earlier ones.
///
#[stability::unstable(feature = "enable")]
pub fn register_bundle(key: SpecKey, bundle: ProcBundle) {
    _ = GLOBAL_BUNDLES.push((key, bundle));
}

#[stability::unstable(feature = "enable")]
pub fn registry() -> &'static GlobalRegistry {
    &GlobalRegistry
}

impl ProcRegistry for GlobalRegistry {

    fn lookup(&self, key: SpecKey) -> Option<&ProcBundle> {
        (0..GLOBAL_BUNDLES.len()).rev()
            .map(|i| &GLOBAL_BUNDLES[i])
            .filter(|(k, _)| *k == key)
            .map(|(_, bundle)| bundle)
            .next()
    }
}

#[cfg(test)]
use crate::classify::{FieldClass, LengthClass, OrdClass};

#[test]
fn test_builtin_registry_lookup() {
    let registry = StaticRegistry::builtin();
    let bundle = registry.lookup((FieldClass::Zp, LengthClass::One, OrdClass::AllNonneg)).unwrap();
    assert_eq!("zp_one_nonneg", bundle.name);
    assert!(bundle.add.is_some());
    assert!(bundle.merge.is_none());
    assert!(registry.lookup((FieldClass::Real, LengthClass::One, OrdClass::AllNonneg)).is_none());
}

#[test]
fn test_global_registry_roundtrip() {
    let key = (FieldClass::Real, LengthClass::Eight, OrdClass::NegPosNonposZero);
    assert!(registry().lookup(key).is_none());
    register_bundle(key, ProcBundle::empty("real_eight"));
    assert_eq!("real_eight", registry().lookup(key).unwrap().name);
}
