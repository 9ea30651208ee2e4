//! The Poseidon permutation: full rounds of constant addition, an inversion
//! S-box and a Cauchy MDS layer.

use p3_symmetric::{CryptographicPermutation, Permutation};

use crate::grain::Grain;
use crate::params::PoseidonParams;

/// Round constants and MDS table for one [`PoseidonParams`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoseidonPermutation {
    params: PoseidonParams,
    /// `full_rounds * width` constants, round-major.
    round_constants: Vec<u32>,
    /// `inverses[k] = (k + 1)^{-1}`; entry `i + j` is the MDS coefficient `M[i][j]`.
    inverses: Vec<u32>,
}

impl PoseidonPermutation {
    /// Derives the constants for `params` from a fresh [`Grain`] stream.
    ///
    /// # Panics
    ///
    /// If `rate >= width` or `2 * width > modulus`.
    pub fn new(params: PoseidonParams) -> Self {
        assert!(params.rate < params.width, "rate must leave a capacity");
        assert!(
            2 * params.width < params.modulus as usize,
            "MDS denominators must be nonzero"
        );

        let mut grain = Grain::new(&params);
        let round_constants = (0..params.full_rounds * params.width)
            .map(|_| grain.read_fe(&params))
            .collect();

        let mut inverses: Vec<u32> = (1..2 * params.width as u32)
            .map(|k| inverse(k, params.modulus))
            .collect();
        inverses.push(0);

        PoseidonPermutation {
            params,
            round_constants,
            inverses,
        }
    }

    pub fn params(&self) -> &PoseidonParams {
        &self.params
    }

    pub fn round_constants(&self) -> &[u32] {
        &self.round_constants
    }

    /// Applies all full rounds to `state` in place.
    ///
    /// # Panics
    ///
    /// If `state.len()` differs from the configured width.
    pub fn permute_slice(&self, state: &mut [u32]) {
        assert_eq!(state.len(), self.params.width, "state width mismatch");
        for round in 0..self.params.full_rounds {
            self.round(round, state);
        }
    }

    fn round(&self, round: usize, state: &mut [u32]) {
        let q = self.params.modulus;
        let t = self.params.width;
        let rcs = &self.round_constants[t * round..t * (round + 1)];

        for (s, &rc) in state.iter_mut().zip(rcs) {
            let x = ((*s as u64 + rc as u64) % q as u64) as u32;
            // zero has no inverse and passes through unchanged
            *s = if x == 0 { 0 } else { inverse(x, q) };
        }

        let old = state.to_vec();
        for (i, s) in state.iter_mut().enumerate() {
            let acc: u64 = old
                .iter()
                .enumerate()
                .map(|(j, &o)| self.inverses[i + j] as u64 * o as u64)
                .sum();
            *s = (acc % q as u64) as u32;
        }
    }
}

impl Default for PoseidonPermutation {
    fn default() -> Self {
        Self::new(PoseidonParams::DEFAULT)
    }
}

impl<const WIDTH: usize> Permutation<[u32; WIDTH]> for PoseidonPermutation {
    fn permute_mut(&self, input: &mut [u32; WIDTH]) {
        self.permute_slice(input);
    }
}

impl<const WIDTH: usize> CryptographicPermutation<[u32; WIDTH]> for PoseidonPermutation {}

impl Permutation<Vec<u32>> for PoseidonPermutation {
    fn permute_mut(&self, input: &mut Vec<u32>) {
        self.permute_slice(input);
    }
}

impl CryptographicPermutation<Vec<u32>> for PoseidonPermutation {}

/// `a^{-1} mod q` by Fermat's little theorem; zero maps to zero.
pub(crate) fn inverse(a: u32, q: u32) -> u32 {
    let q64 = q as u64;
    let mut base = a as u64 % q64;
    let mut exp = q - 2;
    let mut acc = 1u64;
    while exp > 0 {
        if exp & 1 == 1 {
            acc = acc * base % q64;
        }
        base = base * base % q64;
        exp >>= 1;
    }
    if a as u64 % q64 == 0 {
        0
    } else {
        acc as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use p3_symmetric::{CryptographicHasher, PaddingFreeSponge};

    const Q: u32 = 7_340_033;

    #[test]
    fn test_inverse() {
        assert_eq!(inverse(2, Q), 3_670_017);
        assert_eq!(inverse(0, Q), 0);
        for a in [1, 3, 70, Q - 1] {
            assert_eq!(a as u64 * inverse(a, Q) as u64 % Q as u64, 1);
        }
    }

    #[test]
    fn test_constant_table() {
        let perm = PoseidonPermutation::default();
        assert_eq!(perm.round_constants().len(), 21 * 35);
        assert_eq!(perm.round_constants()[..4], [662000, 7104925, 2304656, 2330809]);
        assert_eq!(perm.inverses.len(), 70);
        assert_eq!(perm.inverses[1], 3_670_017);
        assert_eq!(perm.inverses[69], 0);
    }

    #[test]
    fn test_sbox_passes_zero_through() {
        // A textbook inversion S-box is undefined at zero. This instance maps
        // zero to zero, matching the circuit that proves it.
        let perm = PoseidonPermutation::default();
        let mut state: Vec<u32> = perm.round_constants()[..35]
            .iter()
            .map(|&rc| (Q - rc) % Q)
            .collect();
        perm.round(0, &mut state);
        assert_eq!(state, vec![0u32; 35]);
    }

    #[test]
    fn test_array_and_vec_agree() {
        let perm = PoseidonPermutation::default();
        let mut arr = [0u32; 35];
        arr[0] = 1;
        let mut v = arr.to_vec();
        perm.permute_mut(&mut arr);
        perm.permute_mut(&mut v);
        assert_eq!(arr.to_vec(), v);
    }

    #[test]
    fn test_plugs_into_padding_free_sponge() {
        let perm = PoseidonPermutation::default();
        let sponge = PaddingFreeSponge::<PoseidonPermutation, 35, 24, 12>::new(perm.clone());
        let digest: [u32; 12] = sponge.hash_iter([1u32, 2, 3]);

        let mut state = [0u32; 35];
        state[..3].copy_from_slice(&[1, 2, 3]);
        perm.permute_slice(&mut state);
        assert_eq!(digest[..], state[..12]);
    }

    #[test]
    #[should_panic(expected = "state width mismatch")]
    fn test_wrong_width_panics() {
        PoseidonPermutation::default().permute_slice(&mut [0u32; 34]);
    }
}
