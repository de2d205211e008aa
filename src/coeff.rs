use serde::{Deserialize, Serialize};

///
/// Parameters of a Galois field `GF(p^d)`, given by the characteristic `p`
/// and a monic modulus polynomial of degree `d` over `Z/pZ`.
///
/// Elements of the field are coefficient vectors of length `d`, with entries
/// in `[0, p)`; see [`Coeff::Galois`].
///
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GfParams {
    characteristic: u64,
    degree: usize,
    /// monic, length `degree + 1`, coefficients in `[0, characteristic)`
    modulus: Box<[u64]>
}

impl GfParams {

    pub fn new(characteristic: u64, degree: usize, modulus: Box<[u64]>) -> Self {
        assert!(characteristic >= 2);
        assert!(degree >= 1);
        assert!(modulus.len() == degree + 1);
        assert!(modulus[degree] == 1);
        assert!(modulus.iter().all(|c| *c < characteristic));
        Self { characteristic, degree, modulus }
    }

    pub fn characteristic(&self) -> u64 {
        self.characteristic
    }

    pub fn degree(&self) -> usize {
        self.degree
    }
}

///
/// The kind of coefficient field a polynomial ring is defined over.
///
/// This is the first of the three properties the kernel selection is keyed by;
/// see [`crate::classify::field_class()`]. Long reals, complex numbers and any
/// future kinds have no dedicated kernel category and run on the general
/// kernels.
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum FieldKind {
    /// the prime field `Z/pZ`
    Zp { characteristic: u64 },
    /// machine-precision reals
    Real,
    /// extended-precision reals; currently carried by `f64` as well
    LongReal,
    /// machine-precision complex numbers
    Complex,
    /// the Galois field described by the contained parameters
    Galois(GfParams),
    /// machine rationals
    Rational
}

///
/// An element of one of the supported coefficient fields.
///
/// Arithmetic on coefficients always goes through the [`FieldKind`] they belong
/// to; mixing elements of different kinds is a contract violation and panics.
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Coeff {
    Zp(u64),
    Real(f64),
    Complex { re: f64, im: f64 },
    Galois(Box<[u64]>),
    Rational(Rat)
}

///
/// A machine rational, stored in lowest terms with a positive denominator.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rat {
    num: i64,
    den: i64
}

fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    return a;
}

impl Rat {

    pub fn new(num: i64, den: i64) -> Self {
        assert!(den != 0);
        Self::reduce(num as i128, den as i128)
    }

    fn reduce(num: i128, den: i128) -> Self {
        debug_assert!(den != 0);
        let negative = (num < 0) != (den < 0) && num != 0;
        let (num_abs, den_abs) = (num.unsigned_abs(), den.unsigned_abs());
        let d = if num_abs == 0 { den_abs } else { gcd(num_abs, den_abs) };
        let (num_abs, den_abs) = (num_abs / d, den_abs / d);
        // machine rationals only; larger coefficients are outside this crate's scope
        assert!(num_abs <= i64::MAX as u128 && den_abs <= i64::MAX as u128);
        let num = if negative { -(num_abs as i64) } else { num_abs as i64 };
        Self { num, den: den_abs as i64 }
    }

    pub fn num(&self) -> i64 {
        self.num
    }

    pub fn den(&self) -> i64 {
        self.den
    }
}

fn add_mod(a: u64, b: u64, p: u64) -> u64 {
    ((a as u128 + b as u128) % p as u128) as u64
}

fn mul_mod(a: u64, b: u64, p: u64) -> u64 {
    (a as u128 * b as u128 % p as u128) as u64
}

fn neg_mod(a: u64, p: u64) -> u64 {
    debug_assert!(a < p);
    if a == 0 { 0 } else { p - a }
}

impl GfParams {

    fn add(&self, lhs: &[u64], rhs: &[u64]) -> Box<[u64]> {
        debug_assert!(lhs.len() == self.degree && rhs.len() == self.degree);
        (0..self.degree).map(|i| add_mod(lhs[i], rhs[i], self.characteristic)).collect()
    }

    fn negate(&self, val: &[u64]) -> Box<[u64]> {
        val.iter().map(|c| neg_mod(*c, self.characteristic)).collect()
    }

    fn mul(&self, lhs: &[u64], rhs: &[u64]) -> Box<[u64]> {
        debug_assert!(lhs.len() == self.degree && rhs.len() == self.degree);
        let p = self.characteristic;
        let mut prod = vec![0; 2 * self.degree - 1];
        for i in 0..self.degree {
            for j in 0..self.degree {
                prod[i + j] = ((prod[i + j] as u128 + lhs[i] as u128 * rhs[j] as u128) % p as u128) as u64;
            }
        }
        // reduce modulo the monic modulus, highest coefficient first
        for k in (self.degree..prod.len()).rev() {
            let c = prod[k];
            if c != 0 {
                prod[k] = 0;
                for j in 0..self.degree {
                    let sub = mul_mod(c, self.modulus[j], p);
                    prod[k - self.degree + j] = add_mod(prod[k - self.degree + j], neg_mod(sub, p), p);
                }
            }
        }
        prod.truncate(self.degree);
        return prod.into_boxed_slice();
    }

    fn from_int(&self, value: i64) -> Box<[u64]> {
        let p = self.characteristic as i128;
        let digit = (value as i128).rem_euclid(p) as u64;
        (0..self.degree).map(|i| if i == 0 { digit } else { 0 }).collect()
    }
}

impl FieldKind {

    pub fn zero(&self) -> Coeff {
        self.from_int(0)
    }

    pub fn one(&self) -> Coeff {
        self.from_int(1)
    }

    ///
    /// Maps an integer into the field, the canonical way.
    ///
    pub fn from_int(&self, value: i64) -> Coeff {
        match self {
            FieldKind::Zp { characteristic } => Coeff::Zp((value as i128).rem_euclid(*characteristic as i128) as u64),
            FieldKind::Real | FieldKind::LongReal => Coeff::Real(value as f64),
            FieldKind::Complex => Coeff::Complex { re: value as f64, im: 0. },
            FieldKind::Galois(params) => Coeff::Galois(params.from_int(value)),
            FieldKind::Rational => Coeff::Rational(Rat { num: value, den: 1 })
        }
    }

    pub fn add_ref(&self, lhs: &Coeff, rhs: &Coeff) -> Coeff {
        match (self, lhs, rhs) {
            (FieldKind::Zp { characteristic }, Coeff::Zp(a), Coeff::Zp(b)) => Coeff::Zp(add_mod(*a, *b, *characteristic)),
            (FieldKind::Real | FieldKind::LongReal, Coeff::Real(a), Coeff::Real(b)) => Coeff::Real(a + b),
            (FieldKind::Complex, Coeff::Complex { re: ar, im: ai }, Coeff::Complex { re: br, im: bi }) => Coeff::Complex { re: ar + br, im: ai + bi },
            (FieldKind::Galois(params), Coeff::Galois(a), Coeff::Galois(b)) => Coeff::Galois(params.add(a, b)),
            (FieldKind::Rational, Coeff::Rational(a), Coeff::Rational(b)) => Coeff::Rational(Rat::reduce(
                a.num as i128 * b.den as i128 + b.num as i128 * a.den as i128,
                a.den as i128 * b.den as i128
            )),
            _ => panic!("coefficient does not belong to this field")
        }
    }

    pub fn sub_ref(&self, lhs: &Coeff, rhs: &Coeff) -> Coeff {
        self.add_ref(lhs, &self.negate(rhs.clone()))
    }

    pub fn mul_ref(&self, lhs: &Coeff, rhs: &Coeff) -> Coeff {
        match (self, lhs, rhs) {
            (FieldKind::Zp { characteristic }, Coeff::Zp(a), Coeff::Zp(b)) => Coeff::Zp(mul_mod(*a, *b, *characteristic)),
            (FieldKind::Real | FieldKind::LongReal, Coeff::Real(a), Coeff::Real(b)) => Coeff::Real(a * b),
            (FieldKind::Complex, Coeff::Complex { re: ar, im: ai }, Coeff::Complex { re: br, im: bi }) => Coeff::Complex { re: ar * br - ai * bi, im: ar * bi + ai * br },
            (FieldKind::Galois(params), Coeff::Galois(a), Coeff::Galois(b)) => Coeff::Galois(params.mul(a, b)),
            (FieldKind::Rational, Coeff::Rational(a), Coeff::Rational(b)) => Coeff::Rational(Rat::reduce(
                a.num as i128 * b.num as i128,
                a.den as i128 * b.den as i128
            )),
            _ => panic!("coefficient does not belong to this field")
        }
    }

    pub fn negate(&self, mut val: Coeff) -> Coeff {
        self.negate_inplace(&mut val);
        return val;
    }

    pub fn negate_inplace(&self, val: &mut Coeff) {
        match (self, val) {
            (FieldKind::Zp { characteristic }, Coeff::Zp(a)) => *a = neg_mod(*a, *characteristic),
            (FieldKind::Real | FieldKind::LongReal, Coeff::Real(a)) => *a = -*a,
            (FieldKind::Complex, Coeff::Complex { re, im }) => {
                *re = -*re;
                *im = -*im;
            },
            (FieldKind::Galois(params), Coeff::Galois(a)) => *a = params.negate(&*a),
            (FieldKind::Rational, Coeff::Rational(a)) => a.num = -a.num,
            _ => panic!("coefficient does not belong to this field")
        }
    }

    pub fn is_zero(&self, val: &Coeff) -> bool {
        match val {
            Coeff::Zp(a) => *a == 0,
            Coeff::Real(a) => *a == 0.,
            Coeff::Complex { re, im } => *re == 0. && *im == 0.,
            Coeff::Galois(a) => a.iter().all(|c| *c == 0),
            Coeff::Rational(a) => a.num == 0
        }
    }

    pub fn is_one(&self, val: &Coeff) -> bool {
        self.eq_el(val, &self.one())
    }

    pub fn eq_el(&self, lhs: &Coeff, rhs: &Coeff) -> bool {
        lhs == rhs
    }
}

#[test]
fn test_zp_arithmetic() {
    let field = FieldKind::Zp { characteristic: 7 };
    assert_eq!(Coeff::Zp(1), field.mul_ref(&field.from_int(3), &field.from_int(5)));
    assert_eq!(Coeff::Zp(5), field.add_ref(&field.from_int(6), &field.from_int(6)));
    assert_eq!(Coeff::Zp(3), field.negate(field.from_int(4)));
    assert_eq!(Coeff::Zp(3), field.from_int(-4));
    assert!(field.is_zero(&field.add_ref(&field.from_int(3), &field.from_int(4))));
}

#[test]
fn test_galois_arithmetic() {
    // GF(4) as GF(2)[x]/(x^2 + x + 1)
    let field = FieldKind::Galois(GfParams::new(2, 2, Box::new([1, 1, 1])));
    let x = Coeff::Galois(Box::new([0, 1]));
    let x_plus_one = Coeff::Galois(Box::new([1, 1]));
    // x * x = x + 1
    assert_eq!(x_plus_one, field.mul_ref(&x, &x));
    // x * (x + 1) = x^2 + x = 1
    assert!(field.is_one(&field.mul_ref(&x, &x_plus_one)));
    // characteristic 2: a + a = 0
    assert!(field.is_zero(&field.add_ref(&x, &x)));

    // GF(9) as GF(3)[x]/(x^2 + 1)
    let field = FieldKind::Galois(GfParams::new(3, 2, Box::new([1, 0, 1])));
    let x = Coeff::Galois(Box::new([0, 1]));
    // x * x = -1 = 2
    assert_eq!(Coeff::Galois(Box::new([2, 0])), field.mul_ref(&x, &x));
}

#[test]
fn test_rational_arithmetic() {
    let field = FieldKind::Rational;
    let half = Coeff::Rational(Rat::new(1, 2));
    let third = Coeff::Rational(Rat::new(2, 6));
    assert_eq!(Coeff::Rational(Rat::new(5, 6)), field.add_ref(&half, &third));
    assert_eq!(Coeff::Rational(Rat::new(1, 6)), field.mul_ref(&half, &third));
    assert_eq!(Coeff::Rational(Rat::new(1, 6)), field.sub_ref(&half, &third));
    assert_eq!(Rat::new(-2, 4), Rat::new(1, -2));
    assert!(field.is_zero(&field.sub_ref(&third, &third)));
}
