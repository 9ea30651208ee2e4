//! Byte encodings of field elements and polynomials.
//!
//! Three layouts are used on the wire:
//!
//! * plain: every coefficient as 3 little-endian bytes ([`POLY_BYTES`]),
//! * `leq_eta`: `ETA - c` in 3 bits, 8 coefficients per 3 bytes,
//! * `le_gamma1`: `GAMMA1 - c` in 18 bits, 4 coefficients per 9 bytes.

use crate::errors::LatticeError;
use crate::field::centered_abs;
use crate::poly::Poly;
use crate::{ETA, GAMMA1, N, Q};

/// Size of a plainly packed polynomial.
pub const POLY_BYTES: usize = 3 * N;

/// Size of a polynomial with coefficients in `[-ETA, ETA]`.
pub const POLY_LEQ_ETA_BYTES: usize = N * 3 / 8;

/// Size of a polynomial with coefficients in `(-GAMMA1, GAMMA1]`.
pub const POLY_LE_GAMMA1_BYTES: usize = N * 18 / 8;

/// Packs field elements as 3 little-endian bytes each.
pub fn pack_fes(fes: &[u32]) -> Vec<u8> {
    let mut out = Vec::with_capacity(3 * fes.len());
    for &fe in fes {
        out.extend_from_slice(&fe.to_le_bytes()[..3]);
    }
    out
}

/// Reads 3 little-endian bytes per field element, reducing each mod `Q`.
pub fn unpack_fes(bytes: &[u8]) -> Result<Vec<u32>, LatticeError> {
    if bytes.len() % 3 != 0 {
        return Err(LatticeError::MalformedInput {
            expected: bytes.len().next_multiple_of(3),
            actual: bytes.len(),
        });
    }
    Ok(bytes
        .chunks_exact(3)
        .map(|b| u32::from_le_bytes([b[0], b[1], b[2], 0]) % Q)
        .collect())
}

/// Byte-to-field-element map that accepts any length.
///
/// Every byte is shifted by one (wrapping) so that zero bytes still
/// contribute, an odd length is padded with a zero, and each pair
/// `(b0, b1)` becomes `b0 + 257 * b1`.
pub fn unpack_fes_loose(bytes: &[u8]) -> Vec<u32> {
    let mut shifted: Vec<u32> = bytes.iter().map(|b| b.wrapping_add(1) as u32).collect();
    if shifted.len() % 2 == 1 {
        shifted.push(0);
    }
    shifted.chunks_exact(2).map(|p| p[0] + 257 * p[1]).collect()
}

fn check_len(bytes: &[u8], expected: usize) -> Result<(), LatticeError> {
    if bytes.len() != expected {
        return Err(LatticeError::MalformedInput {
            expected,
            actual: bytes.len(),
        });
    }
    Ok(())
}

fn check_norm(poly: &Poly, bound: u32) -> Result<(), LatticeError> {
    let norm = poly.norm();
    if norm > bound {
        return Err(LatticeError::NormExceeded { norm, bound });
    }
    Ok(())
}

/// `bound - c mod Q`
#[inline]
fn fold(bound: u32, c: u32) -> u32 {
    (bound + Q - c) % Q
}

impl Poly {
    /// Plain 3-byte-per-coefficient encoding.
    pub fn pack(&self) -> Vec<u8> {
        pack_fes(self.coeffs())
    }

    /// Inverse of [`Poly::pack`]. Coefficients are reduced mod `Q`.
    pub fn unpack(bytes: &[u8]) -> Result<Self, LatticeError> {
        check_len(bytes, POLY_BYTES)?;
        let mut cs = [0u32; N];
        for (c, b) in cs.iter_mut().zip(bytes.chunks_exact(3)) {
            *c = u32::from_le_bytes([b[0], b[1], b[2], 0]) % Q;
        }
        Ok(Poly::from_canonical(cs))
    }

    /// Packs a polynomial with coefficients in `[-ETA, ETA]`.
    pub fn pack_leq_eta(&self) -> Result<Vec<u8>, LatticeError> {
        check_norm(self, ETA)?;
        let mut out = Vec::with_capacity(POLY_LEQ_ETA_BYTES);
        for chunk in self.coeffs().chunks_exact(8) {
            let c: [u32; 8] = core::array::from_fn(|i| fold(ETA, chunk[i]));
            out.push((c[0] | (c[1] << 3) | (c[2] << 6)) as u8);
            out.push(((c[2] >> 2) | (c[3] << 1) | (c[4] << 4) | (c[5] << 7)) as u8);
            out.push(((c[5] >> 1) | (c[6] << 2) | (c[7] << 5)) as u8);
        }
        Ok(out)
    }

    /// Inverse of [`Poly::pack_leq_eta`].
    ///
    /// Three-bit fields that fold back outside `[-ETA, ETA]` are rejected.
    pub fn unpack_leq_eta(bytes: &[u8]) -> Result<Self, LatticeError> {
        check_len(bytes, POLY_LEQ_ETA_BYTES)?;
        let mut cs = [0u32; N];
        for (out, b) in cs.chunks_exact_mut(8).zip(bytes.chunks_exact(3)) {
            let (b0, b1, b2) = (b[0] as u32, b[1] as u32, b[2] as u32);
            let c = [
                b0 & 7,
                (b0 >> 3) & 7,
                (b0 >> 6) | ((b1 << 2) & 7),
                (b1 >> 1) & 7,
                (b1 >> 4) & 7,
                (b1 >> 7) | ((b2 << 1) & 7),
                (b2 >> 2) & 7,
                (b2 >> 5) & 7,
            ];
            for (o, v) in out.iter_mut().zip(c) {
                *o = fold(ETA, v);
            }
        }
        let poly = Poly::from_canonical(cs);
        check_norm(&poly, ETA)?;
        Ok(poly)
    }

    /// Packs a polynomial with coefficients in `(-GAMMA1, GAMMA1]`.
    ///
    /// Anything outside that range does not fit the 18-bit field and is
    /// refused rather than truncated.
    pub fn pack_le_gamma1(&self) -> Result<Vec<u8>, LatticeError> {
        let mut out = Vec::with_capacity(POLY_LE_GAMMA1_BYTES);
        for chunk in self.coeffs().chunks_exact(4) {
            let c: [u32; 4] = core::array::from_fn(|i| fold(GAMMA1, chunk[i]));
            if let Some(i) = c.iter().position(|&v| v >= 1 << 18) {
                return Err(LatticeError::NormExceeded {
                    norm: centered_abs(chunk[i]),
                    bound: GAMMA1,
                });
            }
            let [a, b, cc, d] = c;
            out.extend_from_slice(&[
                a as u8,
                (a >> 8) as u8,
                ((a >> 16) | (b << 2)) as u8,
                (b >> 6) as u8,
                ((b >> 14) | (cc << 4)) as u8,
                (cc >> 4) as u8,
                ((cc >> 12) | (d << 6)) as u8,
                (d >> 2) as u8,
                (d >> 10) as u8,
            ]);
        }
        Ok(out)
    }

    /// Inverse of [`Poly::pack_le_gamma1`]. Fails if the decoded norm exceeds `GAMMA1`.
    pub fn unpack_le_gamma1(bytes: &[u8]) -> Result<Self, LatticeError> {
        check_len(bytes, POLY_LE_GAMMA1_BYTES)?;
        let poly = decode_le_gamma1(bytes);
        check_norm(&poly, GAMMA1)?;
        Ok(poly)
    }
}

/// Unchecked 18-bit decode of exactly [`POLY_LE_GAMMA1_BYTES`] bytes.
pub(crate) fn decode_le_gamma1(bytes: &[u8]) -> Poly {
    debug_assert_eq!(bytes.len(), POLY_LE_GAMMA1_BYTES);
    let mut cs = [0u32; N];
    for (out, b) in cs.chunks_exact_mut(4).zip(bytes.chunks_exact(9)) {
        let b: [u32; 9] = core::array::from_fn(|i| b[i] as u32);
        let c = [
            b[0] | (b[1] << 8) | ((b[2] & 0x3) << 16),
            (b[2] >> 2) | (b[3] << 6) | ((b[4] & 0xf) << 14),
            (b[4] >> 4) | (b[5] << 4) | ((b[6] & 0x3f) << 12),
            (b[6] >> 6) | (b[7] << 2) | (b[8] << 10),
        ];
        for (o, v) in out.iter_mut().zip(c) {
            *o = fold(GAMMA1, v);
        }
    }
    Poly::from_canonical(cs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn signed_poly(rng: &mut StdRng, lo: i64, hi: i64) -> Poly {
        let cs: [i64; N] = core::array::from_fn(|_| rng.random_range(lo..=hi));
        Poly::from_signed(&cs)
    }

    #[test]
    fn test_pack_fes() {
        assert_eq!(pack_fes(&[1, 0x030201, Q - 1]), vec![1, 0, 0, 1, 2, 3, 0x00, 0x00, 0x70]);
        assert_eq!(unpack_fes(&[1, 0, 0, 1, 2, 3]).unwrap(), vec![1, 0x030201]);
        // 0xffffff reduces mod Q
        assert_eq!(unpack_fes(&[0xff, 0xff, 0xff]).unwrap(), vec![0xff_ffff % Q]);
    }

    #[test]
    fn test_unpack_fes_rejects_partial_element() {
        assert_eq!(
            unpack_fes(&[1, 2, 3, 4]),
            Err(LatticeError::MalformedInput { expected: 6, actual: 4 })
        );
        assert_eq!(unpack_fes(&[]).unwrap(), Vec::<u32>::new());
    }

    #[test]
    fn test_unpack_fes_loose() {
        assert_eq!(unpack_fes_loose(&[]), Vec::<u32>::new());
        assert_eq!(unpack_fes_loose(&[0]), vec![1]);
        assert_eq!(unpack_fes_loose(&[0, 0]), vec![1 + 257]);
        // 255 wraps to 0
        assert_eq!(unpack_fes_loose(&[255, 1, 7]), vec![257 * 2, 8]);
    }

    #[test]
    fn test_poly_pack_round_trip() {
        let mut rng = StdRng::seed_from_u64(42);
        let p = signed_poly(&mut rng, 0, Q as i64 - 1);
        let bytes = p.pack();
        assert_eq!(bytes.len(), POLY_BYTES);
        assert_eq!(Poly::unpack(&bytes).unwrap(), p);
        assert!(Poly::unpack(&bytes[1..]).is_err());
    }

    #[test]
    fn test_leq_eta_round_trip() {
        let mut rng = StdRng::seed_from_u64(42);
        let p = signed_poly(&mut rng, -(ETA as i64), ETA as i64);
        let bytes = p.pack_leq_eta().unwrap();
        assert_eq!(bytes.len(), POLY_LEQ_ETA_BYTES);
        assert_eq!(Poly::unpack_leq_eta(&bytes).unwrap(), p);
    }

    #[test]
    fn test_leq_eta_bounds() {
        let mut cs = [0i64; N];
        cs[5] = 3;
        assert_eq!(
            Poly::from_signed(&cs).pack_leq_eta(),
            Err(LatticeError::NormExceeded { norm: 3, bound: ETA })
        );

        // all-ones fields decode to ETA - 7 = -5
        let bytes = [0xffu8; POLY_LEQ_ETA_BYTES];
        assert_eq!(
            Poly::unpack_leq_eta(&bytes),
            Err(LatticeError::NormExceeded { norm: 5, bound: ETA })
        );
        assert!(Poly::unpack_leq_eta(&bytes[..10]).is_err());
    }

    #[test]
    fn test_le_gamma1_round_trip() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut p = signed_poly(&mut rng, -(GAMMA1 as i64) + 1, GAMMA1 as i64);
        let bytes = p.pack_le_gamma1().unwrap();
        assert_eq!(bytes.len(), POLY_LE_GAMMA1_BYTES);
        assert_eq!(Poly::unpack_le_gamma1(&bytes).unwrap(), p);

        // extremes of the range
        let mut cs = [0i64; N];
        cs[0] = GAMMA1 as i64;
        cs[1] = -(GAMMA1 as i64) + 1;
        p = Poly::from_signed(&cs);
        let bytes = p.pack_le_gamma1().unwrap();
        assert_eq!(Poly::unpack_le_gamma1(&bytes).unwrap(), p);
    }

    #[test]
    fn test_le_gamma1_rejects_out_of_range() {
        let mut cs = [0i64; N];
        cs[17] = GAMMA1 as i64 + 1;
        assert_eq!(
            Poly::from_signed(&cs).pack_le_gamma1(),
            Err(LatticeError::NormExceeded {
                norm: GAMMA1 + 1,
                bound: GAMMA1
            })
        );

        // -GAMMA1 folds to 2^18 and is reported against the same bound
        cs[17] = -(GAMMA1 as i64);
        assert_eq!(
            Poly::from_signed(&cs).pack_le_gamma1(),
            Err(LatticeError::NormExceeded {
                norm: GAMMA1,
                bound: GAMMA1
            })
        );

        assert_eq!(
            Poly::unpack_le_gamma1(&[0u8; POLY_LE_GAMMA1_BYTES - 1]),
            Err(LatticeError::MalformedInput {
                expected: POLY_LE_GAMMA1_BYTES,
                actual: POLY_LE_GAMMA1_BYTES - 1
            })
        );
    }

    #[test]
    fn test_le_gamma1_zero_bytes() {
        // an all-zero field decodes to GAMMA1 itself
        let p = Poly::unpack_le_gamma1(&[0u8; POLY_LE_GAMMA1_BYTES]).unwrap();
        assert!(p.coeffs().iter().all(|&c| c == GAMMA1));
        assert_eq!(p.norm(), GAMMA1);
    }
}
