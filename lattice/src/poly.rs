//! Elements of the ring `Z_q[x]/(x^256 + 1)`.
//!
//! The same [`Poly`] type holds both the coefficient form and the NTT
//! (evaluation) form; which one a value is in is tracked by the caller.

use core::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::field::{self, centered_abs};
use crate::ntt;
use crate::{GAMMA2, N, Q};

/// A polynomial with 256 coefficients in `[0, Q)`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Poly {
    cs: [u32; N],
}

impl Poly {
    /// The zero polynomial.
    pub const ZERO: Self = Poly { cs: [0; N] };

    /// Builds a polynomial from raw coefficients, reducing each one mod `Q`.
    pub fn new(mut cs: [u32; N]) -> Self {
        for c in cs.iter_mut() {
            *c %= Q;
        }
        Poly { cs }
    }

    /// Builds a polynomial from signed coefficients.
    pub fn from_signed(cs: &[i64; N]) -> Self {
        let mut out = [0u32; N];
        for (o, &c) in out.iter_mut().zip(cs.iter()) {
            *o = c.rem_euclid(Q as i64) as u32;
        }
        Poly { cs: out }
    }

    /// Canonical coefficients.
    #[inline]
    pub fn coeffs(&self) -> &[u32; N] {
        &self.cs
    }

    #[inline]
    pub(crate) fn from_canonical(cs: [u32; N]) -> Self {
        debug_assert!(cs.iter().all(|&c| c < Q));
        Poly { cs }
    }

    /// Forward NTT.
    pub fn ntt(&self) -> Self {
        let mut cs = self.cs;
        ntt::ntt(&mut cs);
        Poly { cs }
    }

    /// Inverse NTT.
    pub fn inv_ntt(&self) -> Self {
        let mut cs = self.cs;
        ntt::inv_ntt(&mut cs);
        Poly { cs }
    }

    /// Componentwise product. Only meaningful when both operands are in the NTT domain.
    pub fn mul_ntt(&self, other: &Poly) -> Self {
        let mut cs = [0u32; N];
        for (i, c) in cs.iter_mut().enumerate() {
            *c = field::mul(self.cs[i], other.cs[i]);
        }
        Poly { cs }
    }

    /// Full 256 x 256 convolution split around the reduction by `x^256 + 1`.
    ///
    /// Returns `(quotient, remainder)` where the quotient holds the upper 256
    /// terms of the unreduced product and `remainder = lower - upper` is the
    /// ring product.
    pub fn schoolbook_mul(&self, other: &Poly) -> (Poly, Poly) {
        let mut s = [0u32; 2 * N];
        for (i, si) in s.iter_mut().enumerate().take(2 * N - 1) {
            let lo = i.saturating_sub(N - 1);
            let hi = (i + 1).min(N);
            // at most 256 products below 2^46
            let mut acc = 0u64;
            for j in lo..hi {
                acc += self.cs[j] as u64 * other.cs[i - j] as u64;
            }
            *si = field::reduce(acc);
        }

        let mut quotient = [0u32; N];
        let mut remainder = [0u32; N];
        for i in 0..N {
            quotient[i] = s[N + i];
            remainder[i] = field::sub(s[i], s[N + i]);
        }
        (Poly { cs: quotient }, Poly { cs: remainder })
    }

    /// Centered infinity norm.
    pub fn norm(&self) -> u32 {
        self.cs.iter().map(|&c| centered_abs(c)).max().unwrap_or(0)
    }

    /// Splits every coefficient into `(low, high)` bits around `2 * GAMMA2`.
    ///
    /// Low bits are returned folded into `[0, Q)`.
    pub fn decompose(&self) -> (Poly, Poly) {
        let mut low = [0u32; N];
        let mut high = [0u32; N];
        for (i, &c) in self.cs.iter().enumerate() {
            (low[i], high[i]) = decompose(c);
        }
        (Poly { cs: low }, Poly { cs: high })
    }
}

/// Dilithium-style `Decompose` of a single canonical coefficient.
///
/// When `r - r0 == Q - 1` the high part is forced to zero and the low part
/// absorbs the difference as `r0 - 1`.
pub(crate) fn decompose(r: u32) -> (u32, u32) {
    let r = r as i64;
    let alpha = 2 * GAMMA2 as i64;
    let q = Q as i64;

    let mut r0 = r % alpha;
    if r0 > GAMMA2 as i64 {
        r0 -= alpha;
    }
    if r - r0 == q - 1 {
        return ((r0 - 1).rem_euclid(q) as u32, 0);
    }
    (r0.rem_euclid(q) as u32, ((r - r0) / alpha) as u32)
}

impl Default for Poly {
    fn default() -> Self {
        Self::ZERO
    }
}

impl core::fmt::Debug for Poly {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Poly({:?})", &self.cs[..])
    }
}

impl Add for &Poly {
    type Output = Poly;

    #[inline]
    fn add(self, rhs: &Poly) -> Poly {
        let mut cs = self.cs;
        for (c, &r) in cs.iter_mut().zip(rhs.cs.iter()) {
            *c = field::add(*c, r);
        }
        Poly { cs }
    }
}

impl Add for Poly {
    type Output = Poly;

    #[inline]
    fn add(self, rhs: Poly) -> Poly {
        &self + &rhs
    }
}

impl AddAssign<&Poly> for Poly {
    #[inline]
    fn add_assign(&mut self, rhs: &Poly) {
        for (c, &r) in self.cs.iter_mut().zip(rhs.cs.iter()) {
            *c = field::add(*c, r);
        }
    }
}

impl Sub for &Poly {
    type Output = Poly;

    #[inline]
    fn sub(self, rhs: &Poly) -> Poly {
        let mut cs = self.cs;
        for (c, &r) in cs.iter_mut().zip(rhs.cs.iter()) {
            *c = field::sub(*c, r);
        }
        Poly { cs }
    }
}

impl Sub for Poly {
    type Output = Poly;

    #[inline]
    fn sub(self, rhs: Poly) -> Poly {
        &self - &rhs
    }
}

impl SubAssign<&Poly> for Poly {
    #[inline]
    fn sub_assign(&mut self, rhs: &Poly) {
        for (c, &r) in self.cs.iter_mut().zip(rhs.cs.iter()) {
            *c = field::sub(*c, r);
        }
    }
}

impl Neg for &Poly {
    type Output = Poly;

    #[inline]
    fn neg(self) -> Poly {
        let mut cs = self.cs;
        for c in cs.iter_mut() {
            *c = field::neg(*c);
        }
        Poly { cs }
    }
}

impl Neg for Poly {
    type Output = Poly;

    #[inline]
    fn neg(self) -> Poly {
        -&self
    }
}

impl Serialize for Poly {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bytes(&self.pack())
    }
}

impl<'de> Deserialize<'de> for Poly {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bytes = <Vec<u8>>::deserialize(deserializer)?;
        Poly::unpack(&bytes).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_poly(rng: &mut StdRng) -> Poly {
        let mut cs = [0u32; N];
        for c in cs.iter_mut() {
            *c = rng.random_range(0..Q);
        }
        Poly::new(cs)
    }

    fn monomial(degree: usize, coeff: u32) -> Poly {
        let mut cs = [0u32; N];
        cs[degree] = coeff;
        Poly::new(cs)
    }

    #[test]
    fn test_ntt_round_trip() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..8 {
            let p = random_poly(&mut rng);
            assert_eq!(p.ntt().inv_ntt(), p);
            assert_eq!(p.inv_ntt().ntt(), p);
        }
    }

    #[test]
    fn test_ntt_matches_schoolbook_remainder() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..4 {
            let a = random_poly(&mut rng);
            let b = random_poly(&mut rng);
            let (_, r) = a.schoolbook_mul(&b);
            assert_eq!(a.ntt().mul_ntt(&b.ntt()), r.ntt());
        }
    }

    #[test]
    fn test_schoolbook_wraps_negacyclically() {
        // x^255 * x = x^256 = -1
        let (q, r) = monomial(255, 1).schoolbook_mul(&monomial(1, 1));
        assert_eq!(q, monomial(0, 1));
        assert_eq!(r, monomial(0, Q - 1));

        let (q, r) = monomial(3, 5).schoolbook_mul(&monomial(4, 7));
        assert_eq!(q, Poly::ZERO);
        assert_eq!(r, monomial(7, 35));
    }

    #[test]
    fn test_add_sub_neg() {
        let mut rng = StdRng::seed_from_u64(1);
        let a = random_poly(&mut rng);
        let b = random_poly(&mut rng);

        assert_eq!(&(&a + &b) - &b, a);
        assert_eq!(&a + &(-&a), Poly::ZERO);
        assert_eq!(&a - &b, &a + &(-&b));

        let mut c = a.clone();
        c += &b;
        c -= &a;
        assert_eq!(c, b);
    }

    #[test]
    fn test_norm_is_centered() {
        assert_eq!(Poly::ZERO.norm(), 0);
        assert_eq!(monomial(9, Q - 5).norm(), 5);
        assert_eq!(monomial(0, 17).norm(), 17);
        assert_eq!(monomial(3, (Q - 1) / 2).norm(), (Q - 1) / 2);
    }

    #[test]
    fn test_decompose_recombines() {
        for r in (0..Q).step_by(4099).chain([0, 1, GAMMA2, GAMMA2 + 1, Q - 2, Q - 1]) {
            let (r0, r1) = decompose(r);
            assert!(r0 < Q);
            assert!(r1 < 56, "high bits {r1} out of range for {r}");
            assert!(centered_abs(r0) <= GAMMA2);
            let recombined = (r1 as u64 * 2 * GAMMA2 as u64 + r0 as u64) % Q as u64;
            assert_eq!(recombined as u32, r);
        }
    }

    #[test]
    fn test_decompose_boundary() {
        // r in the top band maps to high = 0 with the low part shifted by one.
        assert_eq!(decompose(Q - 1), (Q - 1, 0));
        assert_eq!(decompose(Q - 1 - GAMMA2 + 1), ((Q - GAMMA2) % Q, 0));
        // Just below the band the regular rule applies.
        let r = Q - 1 - GAMMA2;
        assert_eq!(decompose(r), (GAMMA2, 55));
        assert_eq!(decompose(GAMMA2), (GAMMA2, 0));
        assert_eq!(decompose(GAMMA2 + 1), (Q - GAMMA2 + 1, 1));
    }

    #[test]
    fn test_low_bits_are_bounded() {
        let mut rng = StdRng::seed_from_u64(3);
        let p = random_poly(&mut rng);
        let (low, high) = p.decompose();
        assert!(low.norm() <= GAMMA2);
        assert!(high.coeffs().iter().all(|&h| h < 56));
    }

    #[test]
    fn test_from_signed() {
        let mut cs = [0i64; N];
        cs[0] = -1;
        cs[1] = 2;
        cs[2] = -(Q as i64) - 3;
        let p = Poly::from_signed(&cs);
        assert_eq!(p.coeffs()[0], Q - 1);
        assert_eq!(p.coeffs()[1], 2);
        assert_eq!(p.coeffs()[2], Q - 3);
    }
}
