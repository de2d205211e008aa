use crate::coeff::Coeff;
use crate::descriptor::RingDescriptor;
use crate::poly::{Bucket, Monomial, Poly, Term};

pub mod general;
pub mod noncomm;
pub mod specialized;

///
/// Declares one kernel slot: the object-safe trait describing the operation,
/// a blanket implementation so that plain functions and closures qualify, and
/// the handle type stored in tables and bundles.
///
macro_rules! proc_slot {
    ($(#[$attr:meta])* $proc:ident, $handle:ident, fn $method:ident($($arg:ident: $ty:ty),*) -> $ret:ty) => {
        $(#[$attr])*
        pub trait $proc: Sync {
            fn $method(&self, $($arg: $ty),*) -> $ret;
        }

        impl<F> $proc for F
            where F: Sync + Fn($($ty),*) -> $ret
        {
            fn $method(&self, $($arg: $ty),*) -> $ret {
                self($($arg),*)
            }
        }

        pub type $handle = &'static dyn $proc;
    };
}

proc_slot! {
    ///
    /// Returns a deep copy of `p`.
    ///
    ClonePolyProc, ClonePolyHandle,
    fn clone_poly(p: &Poly, ring: &RingDescriptor) -> Poly
}

proc_slot! {
    ///
    /// Releases all terms of `p`.
    ///
    DropPolyProc, DropPolyHandle,
    fn drop_poly(p: Poly, ring: &RingDescriptor) -> ()
}

proc_slot! {
    ///
    /// Takes over the terms of `p` into the current ring, consuming `p`.
    ///
    ShallowCopyDeleteProc, ShallowCopyDeleteHandle,
    fn shallow_copy_delete(p: Poly, ring: &RingDescriptor) -> Poly
}

proc_slot! {
    ///
    /// Returns `p * n` for a nonzero scalar `n`, destroying `p`. The scalar is
    /// not checked against one; callers that want to skip trivial scaling must
    /// do so themselves.
    ///
    MulScalarProc, MulScalarHandle,
    fn mul_scalar(p: Poly, n: &Coeff, ring: &RingDescriptor) -> Poly
}

proc_slot! {
    ///
    /// Returns `p * n` for a nonzero scalar `n`, leaving `p` untouched.
    ///
    MulScalarRefProc, MulScalarRefHandle,
    fn mul_scalar_ref(p: &Poly, n: &Coeff, ring: &RingDescriptor) -> Poly
}

proc_slot! {
    ///
    /// Returns `p * m` for a single term `m`, destroying `p`.
    ///
    MulMonomialProc, MulMonomialHandle,
    fn mul_monomial(p: Poly, m: &Term, ring: &RingDescriptor) -> Poly
}

proc_slot! {
    ///
    /// Returns `p * m` for a single term `m`, leaving `p` untouched.
    ///
    MulMonomialRefProc, MulMonomialRefHandle,
    fn mul_monomial_ref(p: &Poly, m: &Term, ring: &RingDescriptor) -> Poly
}

proc_slot! {
    ///
    /// Returns `p - m * q`, destroying `p`.
    ///
    SubMonomialMulProc, SubMonomialMulHandle,
    fn sub_monomial_mul(p: Poly, m: &Term, q: &Poly, ring: &RingDescriptor) -> Poly
}

proc_slot! {
    ///
    /// Returns `lhs + rhs`, destroying both.
    ///
    AddProc, AddHandle,
    fn add(lhs: Poly, rhs: Poly, ring: &RingDescriptor) -> Poly
}

proc_slot! {
    ///
    /// Returns `-p`, destroying `p`.
    ///
    NegateProc, NegateHandle,
    fn negate(p: Poly, ring: &RingDescriptor) -> Poly
}

proc_slot! {
    ///
    /// Selects the terms of `p` divisible by the monomial of `m` and multiplies
    /// their coefficients by the coefficient of `m`; monomials stay unchanged.
    ///
    MulCoeffDivSelectProc, MulCoeffDivSelectHandle,
    fn mul_coeff_div_select(p: &Poly, m: &Term, ring: &RingDescriptor) -> Poly
}

proc_slot! {
    ///
    /// Selects the terms of `p` divisible by the monomial of `m`, divides them
    /// by it, multiplies the quotient monomial by `shift` and the coefficient
    /// by the coefficient of `m`.
    ///
    MulCoeffDivSelectMulProc, MulCoeffDivSelectMulHandle,
    fn mul_coeff_div_select_mul(p: &Poly, m: &Term, shift: &Monomial, ring: &RingDescriptor) -> Poly
}

proc_slot! {
    ///
    /// Merges two polynomials with disjoint monomial sets into one, destroying
    /// both. No coefficient arithmetic happens.
    ///
    MergeProc, MergeHandle,
    fn merge(lhs: Poly, rhs: Poly, ring: &RingDescriptor) -> Poly
}

proc_slot! {
    ///
    /// Establishes the leading term of the sum a bucket represents, so that it
    /// can be read off without merging the parts.
    ///
    BucketSetLeadingProc, BucketSetLeadingHandle,
    fn bucket_set_leading(bucket: &mut Bucket, ring: &RingDescriptor) -> ()
}

proc_slot! {
    ///
    /// Returns `p * m` like [`MulMonomialRefProc`], but discards product terms
    /// that fall below the ring's Noether bound.
    ///
    MulMonomialNoetherProc, MulMonomialNoetherHandle,
    fn mul_monomial_noether(p: &Poly, m: &Term, ring: &RingDescriptor) -> Poly
}

///
/// A sparse bundle of kernels, as stored in a registry cell: any subset of the
/// slots may be populated. The name identifies the bundle in diagnostics and
/// in the introspection interface.
///
#[derive(Clone, Copy)]
pub struct ProcBundle {
    pub name: &'static str,
    pub clone_poly: Option<ClonePolyHandle>,
    pub drop_poly: Option<DropPolyHandle>,
    pub shallow_copy_delete: Option<ShallowCopyDeleteHandle>,
    pub mul_scalar: Option<MulScalarHandle>,
    pub mul_scalar_ref: Option<MulScalarRefHandle>,
    pub mul_monomial: Option<MulMonomialHandle>,
    pub mul_monomial_ref: Option<MulMonomialRefHandle>,
    pub sub_monomial_mul: Option<SubMonomialMulHandle>,
    pub add: Option<AddHandle>,
    pub negate: Option<NegateHandle>,
    pub mul_coeff_div_select: Option<MulCoeffDivSelectHandle>,
    pub mul_coeff_div_select_mul: Option<MulCoeffDivSelectMulHandle>,
    pub merge: Option<MergeHandle>,
    pub bucket_set_leading: Option<BucketSetLeadingHandle>,
    pub mul_monomial_noether: Option<MulMonomialNoetherHandle>
}

impl ProcBundle {

    pub const fn empty(name: &'static str) -> Self {
        Self {
            name,
            clone_poly: None,
            drop_poly: None,
            shallow_copy_delete: None,
            mul_scalar: None,
            mul_scalar_ref: None,
            mul_monomial: None,
            mul_monomial_ref: None,
            sub_monomial_mul: None,
            add: None,
            negate: None,
            mul_coeff_div_select: None,
            mul_coeff_div_select_mul: None,
            merge: None,
            bucket_set_leading: None,
            mul_monomial_noether: None
        }
    }

    ///
    /// Converts into a frozen table, substituting the general kernel for any
    /// slot that is still empty. The repair pass of
    /// [`crate::build::build_proc_table()`] normally leaves nothing for this
    /// substitution to do; it exists so that a frozen table can never expose an
    /// uncallable slot.
    ///
    pub fn freeze(self) -> ProcTable {
        ProcTable {
            clone_poly: self.clone_poly.unwrap_or(general::CLONE_POLY),
            drop_poly: self.drop_poly.unwrap_or(general::DROP_POLY),
            shallow_copy_delete: self.shallow_copy_delete.unwrap_or(general::SHALLOW_COPY_DELETE),
            mul_scalar: self.mul_scalar.unwrap_or(general::MUL_SCALAR),
            mul_scalar_ref: self.mul_scalar_ref.unwrap_or(general::MUL_SCALAR_REF),
            mul_monomial: self.mul_monomial.unwrap_or(general::MUL_MONOMIAL),
            mul_monomial_ref: self.mul_monomial_ref.unwrap_or(general::MUL_MONOMIAL_REF),
            sub_monomial_mul: self.sub_monomial_mul.unwrap_or(general::SUB_MONOMIAL_MUL),
            add: self.add.unwrap_or(general::ADD),
            negate: self.negate.unwrap_or(general::NEGATE),
            mul_coeff_div_select: self.mul_coeff_div_select.unwrap_or(general::MUL_COEFF_DIV_SELECT),
            mul_coeff_div_select_mul: self.mul_coeff_div_select_mul.unwrap_or(general::MUL_COEFF_DIV_SELECT_MUL),
            merge: self.merge.unwrap_or(general::MERGE),
            bucket_set_leading: self.bucket_set_leading.unwrap_or(general::BUCKET_SET_LEADING),
            mul_monomial_noether: self.mul_monomial_noether.unwrap_or(general::MUL_MONOMIAL_NOETHER)
        }
    }
}

///
/// The frozen kernel table of a ring: one callable implementation per slot,
/// selected once at ring construction and used for every subsequent polynomial
/// operation on that ring. Every slot is populated; rings never dispatch
/// through an empty slot.
///
#[derive(Clone, Copy)]
pub struct ProcTable {
    clone_poly: ClonePolyHandle,
    drop_poly: DropPolyHandle,
    shallow_copy_delete: ShallowCopyDeleteHandle,
    mul_scalar: MulScalarHandle,
    mul_scalar_ref: MulScalarRefHandle,
    mul_monomial: MulMonomialHandle,
    mul_monomial_ref: MulMonomialRefHandle,
    sub_monomial_mul: SubMonomialMulHandle,
    add: AddHandle,
    negate: NegateHandle,
    mul_coeff_div_select: MulCoeffDivSelectHandle,
    mul_coeff_div_select_mul: MulCoeffDivSelectMulHandle,
    merge: MergeHandle,
    bucket_set_leading: BucketSetLeadingHandle,
    mul_monomial_noether: MulMonomialNoetherHandle
}

impl ProcTable {

    pub fn clone_poly(&self, p: &Poly, ring: &RingDescriptor) -> Poly {
        self.clone_poly.clone_poly(p, ring)
    }

    pub fn drop_poly(&self, p: Poly, ring: &RingDescriptor) {
        self.drop_poly.drop_poly(p, ring)
    }

    pub fn shallow_copy_delete(&self, p: Poly, ring: &RingDescriptor) -> Poly {
        self.shallow_copy_delete.shallow_copy_delete(p, ring)
    }

    pub fn mul_scalar(&self, p: Poly, n: &Coeff, ring: &RingDescriptor) -> Poly {
        self.mul_scalar.mul_scalar(p, n, ring)
    }

    pub fn mul_scalar_ref(&self, p: &Poly, n: &Coeff, ring: &RingDescriptor) -> Poly {
        self.mul_scalar_ref.mul_scalar_ref(p, n, ring)
    }

    pub fn mul_monomial(&self, p: Poly, m: &Term, ring: &RingDescriptor) -> Poly {
        self.mul_monomial.mul_monomial(p, m, ring)
    }

    pub fn mul_monomial_ref(&self, p: &Poly, m: &Term, ring: &RingDescriptor) -> Poly {
        self.mul_monomial_ref.mul_monomial_ref(p, m, ring)
    }

    pub fn sub_monomial_mul(&self, p: Poly, m: &Term, q: &Poly, ring: &RingDescriptor) -> Poly {
        self.sub_monomial_mul.sub_monomial_mul(p, m, q, ring)
    }

    pub fn add(&self, lhs: Poly, rhs: Poly, ring: &RingDescriptor) -> Poly {
        self.add.add(lhs, rhs, ring)
    }

    pub fn negate(&self, p: Poly, ring: &RingDescriptor) -> Poly {
        self.negate.negate(p, ring)
    }

    pub fn mul_coeff_div_select(&self, p: &Poly, m: &Term, ring: &RingDescriptor) -> Poly {
        self.mul_coeff_div_select.mul_coeff_div_select(p, m, ring)
    }

    pub fn mul_coeff_div_select_mul(&self, p: &Poly, m: &Term, shift: &Monomial, ring: &RingDescriptor) -> Poly {
        self.mul_coeff_div_select_mul.mul_coeff_div_select_mul(p, m, shift, ring)
    }

    pub fn merge(&self, lhs: Poly, rhs: Poly, ring: &RingDescriptor) -> Poly {
        self.merge.merge(lhs, rhs, ring)
    }

    pub fn bucket_set_leading(&self, bucket: &mut Bucket, ring: &RingDescriptor) {
        self.bucket_set_leading.bucket_set_leading(bucket, ring)
    }

    pub fn mul_monomial_noether(&self, p: &Poly, m: &Term, ring: &RingDescriptor) -> Poly {
        self.mul_monomial_noether.mul_monomial_noether(p, m, ring)
    }
}

///
/// The three multiplication kernels a non-commutative algebra variant supplies
/// for its rings. The table builder installs these unconditionally for rings
/// flagged as non-commutative, bypassing the registry; see
/// [`crate::build::build_proc_table()`].
///
#[derive(Clone, Copy)]
pub struct NoncommProcs {
    pub name: &'static str,
    pub mul_monomial: MulMonomialHandle,
    pub mul_monomial_ref: MulMonomialRefHandle,
    pub sub_monomial_mul: SubMonomialMulHandle
}
