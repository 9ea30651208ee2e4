//! Deterministic samplers driven by SHAKE streams.
//!
//! Every sampler keeps pulling from its stream until it has enough accepted
//! candidates; there is no attempt cap.

use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::{Shake128, Shake128Reader, Shake256, Shake256Reader};

use crate::encoding::{decode_le_gamma1, POLY_LE_GAMMA1_BYTES};
use crate::matrix::Matrix;
use crate::poly::Poly;
use crate::vec::PolyVec;
use crate::{N, Q};

/// SHAKE128 rate in bytes.
const SHAKE128_RATE: usize = 168;

/// SHAKE256 rate in bytes.
const SHAKE256_RATE: usize = 136;

/// `SHAKE128(seed || le16(nonce))` as an endless stream.
pub fn xof128(seed: &[u8], nonce: u16) -> Shake128Reader {
    let mut h = Shake128::default();
    h.update(seed);
    h.update(&nonce.to_le_bytes());
    h.finalize_xof()
}

/// `SHAKE256(seed || le16(nonce))` as an endless stream.
pub fn xof256(seed: &[u8], nonce: u16) -> Shake256Reader {
    let mut h = Shake256::default();
    h.update(seed);
    h.update(&nonce.to_le_bytes());
    h.finalize_xof()
}

/// `H(parts[0] || parts[1] || ..., len)`: fixed-length SHAKE256 output.
pub fn shake256(parts: &[&[u8]], len: usize) -> Vec<u8> {
    let mut h = Shake256::default();
    for part in parts {
        h.update(part);
    }
    let mut out = vec![0u8; len];
    h.finalize_xof().read(&mut out);
    out
}

/// Uniform polynomial from 23-bit little-endian candidates, rejecting `>= Q`.
pub fn sample_uniform(stream: &mut impl XofReader) -> Poly {
    let mut cs = [0u32; N];
    let mut filled = 0;
    let mut buf = [0u8; SHAKE128_RATE];
    while filled < N {
        stream.read(&mut buf);
        for b in buf.chunks_exact(3) {
            let d = u32::from_le_bytes([b[0], b[1], b[2], 0]) & 0x7f_ffff;
            if d < Q {
                cs[filled] = d;
                filled += 1;
                if filled == N {
                    break;
                }
            }
        }
    }
    Poly::from_canonical(cs)
}

/// Polynomial with coefficients in `[-2, 2]` from 4-bit candidates.
///
/// Nibbles are taken low then high; `15` is rejected and `d` maps to `2 - d mod 5`.
pub fn sample_leq_eta(stream: &mut impl XofReader) -> Poly {
    let mut cs = [0u32; N];
    let mut filled = 0;
    let mut buf = [0u8; SHAKE256_RATE];
    'outer: loop {
        stream.read(&mut buf);
        for &b in buf.iter() {
            for d in [b & 15, b >> 4] {
                if d <= 14 {
                    cs[filled] = (Q + 2 - (d as u32 % 5)) % Q;
                    filled += 1;
                    if filled == N {
                        break 'outer;
                    }
                }
            }
        }
    }
    Poly::from_canonical(cs)
}

/// NTT-domain `k x l` matrix; entry `(i, j)` comes from `xof128(rho, 256 i + j)`.
pub fn sample_matrix(rho: &[u8], k: usize, l: usize) -> Matrix {
    let rows = (0..k)
        .map(|i| {
            PolyVec::new(
                (0..l)
                    .map(|j| sample_uniform(&mut xof128(rho, (256 * i + j) as u16)))
                    .collect(),
            )
        })
        .collect();
    Matrix::new(rows)
}

/// Secret vectors `(s1, s2)` of lengths `l` and `k`.
///
/// Polynomial `i` of the combined `k + l` list uses `xof256(rho2, i)`.
pub fn sample_secret(rho2: &[u8], k: usize, l: usize) -> (PolyVec, PolyVec) {
    let mut polys: Vec<Poly> = (0..k + l)
        .map(|i| sample_leq_eta(&mut xof256(rho2, i as u16)))
        .collect();
    let s2 = polys.split_off(l);
    (polys.into(), s2.into())
}

/// Masking vector of length `l` with coefficients in `(-GAMMA1, GAMMA1]`.
///
/// Component `i` is decoded from 576 bytes of `xof256(rho_prime, nonce + i)`.
/// The caller keeps `nonce + l` within the `u16` range.
pub fn sample_mask(rho_prime: &[u8], nonce: u16, l: usize) -> PolyVec {
    (0..l)
        .map(|i| {
            let mut buf = [0u8; POLY_LE_GAMMA1_BYTES];
            xof256(rho_prime, nonce.wrapping_add(i as u16)).read(&mut buf);
            decode_le_gamma1(&buf)
        })
        .collect::<Vec<_>>()
        .into()
}
