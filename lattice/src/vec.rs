use core::ops::{Add, Index, Sub};

use serde::{Deserialize, Serialize};

use crate::encoding::{POLY_BYTES, POLY_LEQ_ETA_BYTES, POLY_LE_GAMMA1_BYTES};
use crate::errors::LatticeError;
use crate::poly::Poly;

/// A column vector of polynomials.
///
/// Arithmetic between vectors of different lengths is a caller bug and panics.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolyVec {
    polys: Vec<Poly>,
}

impl PolyVec {
    pub fn new(polys: Vec<Poly>) -> Self {
        PolyVec { polys }
    }

    /// `len` zero polynomials.
    pub fn zero(len: usize) -> Self {
        PolyVec {
            polys: vec![Poly::ZERO; len],
        }
    }

    pub fn len(&self) -> usize {
        self.polys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polys.is_empty()
    }

    pub fn polys(&self) -> &[Poly] {
        &self.polys
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Poly> {
        self.polys.iter()
    }

    pub fn ntt(&self) -> Self {
        self.map(Poly::ntt)
    }

    pub fn inv_ntt(&self) -> Self {
        self.map(Poly::inv_ntt)
    }

    /// `sum_i self[i] * other[i]`, both operands in the NTT domain.
    pub fn dot_ntt(&self, other: &PolyVec) -> Poly {
        assert_eq!(self.len(), other.len(), "vector length mismatch");
        let mut acc = Poly::ZERO;
        for (a, b) in self.polys.iter().zip(other.polys.iter()) {
            acc += &a.mul_ntt(b);
        }
        acc
    }

    /// Multiplies every component by `scalar`, all in the NTT domain.
    pub fn scalar_mul_ntt(&self, scalar: &Poly) -> Self {
        self.map(|p| p.mul_ntt(scalar))
    }

    /// Largest centered norm over all components.
    pub fn norm(&self) -> u32 {
        self.polys.iter().map(Poly::norm).max().unwrap_or(0)
    }

    /// Componentwise `(low, high)` split.
    pub fn decompose(&self) -> (PolyVec, PolyVec) {
        let (low, high) = self.polys.iter().map(Poly::decompose).unzip();
        (PolyVec { polys: low }, PolyVec { polys: high })
    }

    /// Schoolbook inner product in the coefficient domain.
    ///
    /// Returns the summed quotients and the summed remainders of the
    /// per-component [`Poly::schoolbook_mul`].
    pub fn schoolbook_dot(&self, other: &PolyVec) -> (Poly, Poly) {
        assert_eq!(self.len(), other.len(), "vector length mismatch");
        let mut quotient = Poly::ZERO;
        let mut remainder = Poly::ZERO;
        for (a, b) in self.polys.iter().zip(other.polys.iter()) {
            let (q, r) = a.schoolbook_mul(b);
            quotient += &q;
            remainder += &r;
        }
        (quotient, remainder)
    }

    /// Schoolbook product of every component with `scalar`.
    pub fn schoolbook_scalar_mul(&self, scalar: &Poly) -> (PolyVec, PolyVec) {
        let (q, r) = self.polys.iter().map(|p| p.schoolbook_mul(scalar)).unzip();
        (PolyVec { polys: q }, PolyVec { polys: r })
    }

    /// All coefficients, component after component.
    pub fn to_u32s(&self) -> Vec<u32> {
        self.polys
            .iter()
            .flat_map(|p| p.coeffs().iter().copied())
            .collect()
    }

    pub fn pack(&self) -> Vec<u8> {
        self.polys.iter().flat_map(|p| p.pack()).collect()
    }

    /// Decodes `len` plainly packed polynomials.
    pub fn unpack(bytes: &[u8], len: usize) -> Result<Self, LatticeError> {
        Self::unpack_with(bytes, len, POLY_BYTES, Poly::unpack)
    }

    pub fn pack_leq_eta(&self) -> Result<Vec<u8>, LatticeError> {
        self.try_pack_with(Poly::pack_leq_eta)
    }

    pub fn unpack_leq_eta(bytes: &[u8], len: usize) -> Result<Self, LatticeError> {
        Self::unpack_with(bytes, len, POLY_LEQ_ETA_BYTES, Poly::unpack_leq_eta)
    }

    pub fn pack_le_gamma1(&self) -> Result<Vec<u8>, LatticeError> {
        self.try_pack_with(Poly::pack_le_gamma1)
    }

    pub fn unpack_le_gamma1(bytes: &[u8], len: usize) -> Result<Self, LatticeError> {
        Self::unpack_with(bytes, len, POLY_LE_GAMMA1_BYTES, Poly::unpack_le_gamma1)
    }

    fn map(&self, f: impl Fn(&Poly) -> Poly) -> Self {
        PolyVec {
            polys: self.polys.iter().map(f).collect(),
        }
    }

    fn try_pack_with(
        &self,
        f: impl Fn(&Poly) -> Result<Vec<u8>, LatticeError>,
    ) -> Result<Vec<u8>, LatticeError> {
        let mut out = Vec::new();
        for p in &self.polys {
            out.extend(f(p)?);
        }
        Ok(out)
    }

    fn unpack_with(
        bytes: &[u8],
        len: usize,
        poly_bytes: usize,
        f: impl Fn(&[u8]) -> Result<Poly, LatticeError>,
    ) -> Result<Self, LatticeError> {
        if bytes.len() != len * poly_bytes {
            return Err(LatticeError::MalformedInput {
                expected: len * poly_bytes,
                actual: bytes.len(),
            });
        }
        let polys = bytes
            .chunks_exact(poly_bytes)
            .map(f)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(PolyVec { polys })
    }
}

impl From<Vec<Poly>> for PolyVec {
    fn from(polys: Vec<Poly>) -> Self {
        PolyVec { polys }
    }
}

impl Index<usize> for PolyVec {
    type Output = Poly;

    fn index(&self, index: usize) -> &Poly {
        &self.polys[index]
    }
}

impl<'a> IntoIterator for &'a PolyVec {
    type Item = &'a Poly;
    type IntoIter = core::slice::Iter<'a, Poly>;

    fn into_iter(self) -> Self::IntoIter {
        self.polys.iter()
    }
}

impl Add for &PolyVec {
    type Output = PolyVec;

    fn add(self, rhs: &PolyVec) -> PolyVec {
        assert_eq!(self.len(), rhs.len(), "vector length mismatch");
        PolyVec {
            polys: self.polys.iter().zip(&rhs.polys).map(|(a, b)| a + b).collect(),
        }
    }
}

impl Sub for &PolyVec {
    type Output = PolyVec;

    fn sub(self, rhs: &PolyVec) -> PolyVec {
        assert_eq!(self.len(), rhs.len(), "vector length mismatch");
        PolyVec {
            polys: self.polys.iter().zip(&rhs.polys).map(|(a, b)| a - b).collect(),
        }
    }
}
