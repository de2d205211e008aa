//!
//! Runtime selection of specialized kernels for polynomial arithmetic.
//!
//! A polynomial ring is described by a [`descriptor::RingDescriptor`]: its
//! coefficient field, the number of machine words its packed exponent vectors
//! occupy, and the sign vector of its monomial ordering. At ring construction
//! time, [`build::build_proc_table()`] classifies the descriptor along these
//! three axes ([`classify`]), looks up the kernel bundle registered for the
//! resulting category triple ([`registry`]), and freezes the result into a
//! [`procs::ProcTable`] with one callable kernel per operation slot. Slots for
//! which no specialized kernel exists fall back to the general kernels of
//! [`procs::general`]: selection is purely a performance optimization and can
//! never cost correctness or leave an operation unavailable.
//!
//! ```
//! use feanor_poly_dispatch::classify::*;
//! use feanor_poly_dispatch::coeff::FieldKind;
//! use feanor_poly_dispatch::descriptor::RingDescriptor;
//!
//! let ring = RingDescriptor::new(FieldKind::Zp { characteristic: 7 }, 2, Box::new([1, 1]));
//! assert_eq!((FieldClass::Zp, LengthClass::Two, OrdClass::AllNonneg), spec_of(&ring));
//! ```
//!
//! See [`ring::PolyRing`] for the owning handle that couples a descriptor with
//! its table, and the `introspection` feature for diagnostic queries reporting
//! which kernels a build would select.
//!

pub mod coeff;
pub mod descriptor;
pub mod poly;
pub mod classify;
pub mod procs;
pub mod registry;
pub mod build;
pub mod ring;
#[cfg(any(test, feature = "introspection"))]
pub mod introspect;
