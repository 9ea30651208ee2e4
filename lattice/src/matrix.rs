use crate::poly::Poly;
use crate::sample::sample_matrix;
use crate::vec::PolyVec;

/// A `K x L` matrix of polynomials held in the NTT domain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Matrix {
    rows: Vec<PolyVec>,
}

impl Matrix {
    /// Wraps NTT-domain rows. All rows must have the same length.
    pub fn new(rows: Vec<PolyVec>) -> Self {
        if let Some(first) = rows.first() {
            assert!(
                rows.iter().all(|r| r.len() == first.len()),
                "ragged matrix rows"
            );
        }
        Matrix { rows }
    }

    /// Expands the public matrix from its 32-byte seed.
    pub fn sample(rho: &[u8], k: usize, l: usize) -> Self {
        sample_matrix(rho, k, l)
    }

    pub fn rows(&self) -> &[PolyVec] {
        &self.rows
    }

    /// Number of rows.
    pub fn k(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn l(&self) -> usize {
        self.rows.first().map_or(0, PolyVec::len)
    }

    /// `A * v` with `v` in the NTT domain.
    pub fn mul_ntt(&self, v: &PolyVec) -> PolyVec {
        self.rows.iter().map(|row| row.dot_ntt(v)).collect::<Vec<Poly>>().into()
    }

    /// Row-wise [`PolyVec::schoolbook_dot`] against a coefficient-domain `v`.
    ///
    /// Each row is taken out of the NTT domain first, so the result is the
    /// `(quotient, remainder)` pair of the unreduced product.
    pub fn schoolbook_mul(&self, v: &PolyVec) -> (PolyVec, PolyVec) {
        let (q, r): (Vec<Poly>, Vec<Poly>) = self
            .rows
            .iter()
            .map(|row| row.inv_ntt().schoolbook_dot(v))
            .unzip();
        (q.into(), r.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Q;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_shape() {
        let a = Matrix::sample(&[7u8; 32], 3, 2);
        assert_eq!(a.k(), 3);
        assert_eq!(a.l(), 2);
        assert_eq!(a.rows()[2].len(), 2);
    }

    #[test]
    fn test_schoolbook_remainder_matches_ntt_product() {
        let mut rng = StdRng::seed_from_u64(42);
        let a = Matrix::sample(&[1u8; 32], 2, 2);
        let v: PolyVec = (0..2)
            .map(|_| Poly::new(core::array::from_fn(|_| rng.random_range(0..Q))))
            .collect::<Vec<_>>()
            .into();

        let (q, r) = a.schoolbook_mul(&v);
        assert_eq!(q.len(), 2);
        assert_eq!(a.mul_ntt(&v.ntt()).inv_ntt(), r);
    }

    #[test]
    #[should_panic(expected = "ragged matrix rows")]
    fn test_ragged_rows_panic() {
        Matrix::new(vec![PolyVec::zero(2), PolyVec::zero(1)]);
    }
}
