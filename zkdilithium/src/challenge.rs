//! Expansion of a challenge digest into a sparse `+-1` polynomial.

use lattice::{N, Poly, Q};
use poseidon::{Poseidon, PoseidonError, PoseidonPermutation};

use crate::constants::{BALL_DOMAIN, Params};

/// Expands `c_tilde` into the challenge polynomial `c`.
///
/// Returns `Ok(None)` when the digest lands in a rejection region; signers
/// retry with fresh randomness and verifiers reject.
pub(crate) fn challenge_poly(
    perm: &PoseidonPermutation,
    c_tilde: &[u32],
    params: &Params,
) -> Result<Option<Poly>, PoseidonError> {
    let mut h = Poseidon::from_permutation(perm.clone());
    h.write_ints(&[BALL_DOMAIN])?;
    h.write_ints(c_tilde)?;
    sample_in_ball(&mut h, params)
}

/// Fisher-Yates sampling of `ntau` signed positions from raw sponge words.
///
/// Each cycle permutes the state and takes `cycle_len + 1` words: the last
/// one supplies `cycle_len` sign bits, the others one swap index each. A word
/// whose quotient by the divisor equals `Q / divisor` would bias the result
/// and rejects the whole digest.
pub(crate) fn sample_in_ball(
    h: &mut Poseidon,
    params: &Params,
) -> Result<Option<Poly>, PoseidonError> {
    let cycle = params.cycle_len;
    let ntau = params.ntau();
    let sign_space = 1u32 << cycle;
    let mut cs = [0u32; N];

    for i in 0..ntau / cycle {
        h.permute_state();
        let fes = h.read_raw(cycle + 1)?.to_vec();

        if fes[cycle] / sign_space == Q / sign_space {
            return Ok(None);
        }
        let signs = fes[cycle] % sign_space;

        for (j, &fe) in fes[..cycle].iter().enumerate() {
            let base = N - ntau + cycle * i + j;
            let bound = base as u32 + 1;
            if fe / bound == Q / bound {
                return Ok(None);
            }
            let r = (fe % bound) as usize;
            cs[base] = cs[r];
            cs[r] = if (signs >> j) & 1 == 0 { 1 } else { Q - 1 };
        }
    }
    Ok(Some(Poly::new(cs)))
}
