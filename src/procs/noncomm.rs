//!
//! The multiplication kernels installed for rings over a non-commutative
//! algebra variant. The variant's own product is implemented outside this
//! crate; what lives here is the bundle rings are wired to when the algebra
//! does not bring its own, which multiplies the way the carrier representation
//! does (exponent words and coefficients commute there, so the general product
//! applies).
//!

use crate::descriptor::RingDescriptor;
use crate::poly::{Poly, Term};

use super::*;

pub fn mul_monomial_nc(p: Poly, m: &Term, ring: &RingDescriptor) -> Poly {
    general::mul_monomial(p, m, ring)
}

pub fn mul_monomial_ref_nc(p: &Poly, m: &Term, ring: &RingDescriptor) -> Poly {
    general::mul_monomial_ref(p, m, ring)
}

pub fn sub_monomial_mul_nc(p: Poly, m: &Term, q: &Poly, ring: &RingDescriptor) -> Poly {
    general::sub_monomial_mul(p, m, q, ring)
}

pub const MUL_MONOMIAL_NC: MulMonomialHandle = &(mul_monomial_nc as fn(Poly, &Term, &RingDescriptor) -> Poly);
pub const MUL_MONOMIAL_REF_NC: MulMonomialRefHandle = &(mul_monomial_ref_nc as fn(&Poly, &Term, &RingDescriptor) -> Poly);
pub const SUB_MONOMIAL_MUL_NC: SubMonomialMulHandle = &(sub_monomial_mul_nc as fn(Poly, &Term, &Poly, &RingDescriptor) -> Poly);

///
/// The default non-commutative kernel bundle.
///
pub const NONCOMM: NoncommProcs = NoncommProcs {
    name: "noncomm",
    mul_monomial: MUL_MONOMIAL_NC,
    mul_monomial_ref: MUL_MONOMIAL_REF_NC,
    sub_monomial_mul: SUB_MONOMIAL_MUL_NC
};
