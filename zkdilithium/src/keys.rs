//! Signing and verifying keys for the zkDilithium signature scheme.

use lattice::{GAMMA1, GAMMA2, Matrix, POLY_BYTES, POLY_LEQ_ETA_BYTES, PolyVec};
use lattice::{sample_mask, sample_secret, shake256};
use poseidon::PoseidonPermutation;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::challenge::challenge_poly;
use crate::constants::{
    CNS_SIZE, Params, RHO_PRIME_SIZE, RHO_SIZE, RHO2_SIZE, SEED_SIZE, TR_SIZE,
};
use crate::errors::SignatureError;
use crate::signatures::{Signature, hash_challenge, message_digest};

/// A public verifying key `(rho, t)`.
///
/// `rho` seeds the public matrix `A`; `t = A s1 + s2` is kept in the
/// coefficient domain.
///
/// # Example
///
/// ```
/// use zkdilithium::{Params, SigningKey};
///
/// let signing_key = SigningKey::from_seed(Params::TOY, &[7u8; 32]).unwrap();
/// let verifying_key = signing_key.verifying_key();
/// assert_eq!(verifying_key.to_bytes().len(), Params::TOY.public_key_bytes());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "VerifyingKeyFields")]
pub struct VerifyingKey {
    params: Params,
    rho: [u8; RHO_SIZE],
    t: PolyVec,
}

/// A secret signing key.
///
/// Holds the short secret vectors `s1` and `s2`, the seed used to derive the
/// per-message masking randomness, and the matching verifying key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SigningKeyFields")]
pub struct SigningKey {
    verifying_key: VerifyingKey,
    pub(crate) cns: [u8; CNS_SIZE],
    pub(crate) s1: PolyVec,
    pub(crate) s2: PolyVec,
}

impl SigningKey {
    /// Deterministically derives a key pair from a 32-byte seed.
    ///
    /// The seed is expanded with SHAKE256 into `rho`, the secret-vector seed
    /// `rho2` and the challenge-nonce seed. Then `t = InvNTT(A NTT(s1) + NTT(s2))`.
    ///
    /// # Errors
    ///
    /// - [`SignatureError::InvalidParams`] if `params` fails [`Params::validate`]
    /// - [`SignatureError::MalformedInput`] if `seed` is not 32 bytes long
    pub fn from_seed(params: Params, seed: &[u8]) -> Result<Self, SignatureError> {
        params.validate()?;
        if seed.len() != SEED_SIZE {
            return Err(SignatureError::MalformedInput {
                expected: SEED_SIZE,
                actual: seed.len(),
            });
        }

        let expanded = shake256(&[seed], RHO_SIZE + RHO2_SIZE + CNS_SIZE);
        Ok(Self::from_expanded(params, &expanded))
    }

    /// Generates a key pair from a seed drawn from `rng`.
    ///
    /// # Example
    ///
    /// ```
    /// use rand::SeedableRng;
    /// use rand::rngs::StdRng;
    /// use zkdilithium::{Params, SigningKey};
    ///
    /// let mut rng = StdRng::seed_from_u64(42);
    /// let signing_key = SigningKey::random(Params::TOY, &mut rng).unwrap();
    /// ```
    pub fn random<R: Rng + ?Sized>(params: Params, rng: &mut R) -> Result<Self, SignatureError> {
        let mut seed = [0u8; SEED_SIZE];
        rng.fill_bytes(&mut seed);
        Self::from_seed(params, &seed)
    }

    fn from_expanded(params: Params, expanded: &[u8]) -> Self {
        let (rho_bytes, rest) = expanded.split_at(RHO_SIZE);
        let (rho2, cns_bytes) = rest.split_at(RHO2_SIZE);

        let mut rho = [0u8; RHO_SIZE];
        rho.copy_from_slice(rho_bytes);
        let mut cns = [0u8; CNS_SIZE];
        cns.copy_from_slice(cns_bytes);

        let a = Matrix::sample(&rho, params.k, params.l);
        let (s1, s2) = sample_secret(rho2, params.k, params.l);
        let t = (&a.mul_ntt(&s1.ntt()) + &s2.ntt()).inv_ntt();

        debug!(k = params.k, l = params.l, "generated key pair");
        SigningKey {
            verifying_key: VerifyingKey { params, rho, t },
            cns,
            s1,
            s2,
        }
    }

    /// The public half of this key.
    pub fn verifying_key(&self) -> &VerifyingKey {
        &self.verifying_key
    }

    pub fn params(&self) -> &Params {
        &self.verifying_key.params
    }

    /// Signs `msg` with Fiat-Shamir with aborts.
    ///
    /// Signing is deterministic: the masking randomness is derived from the
    /// challenge-nonce seed, `tr` and the message. Each attempt consumes `L`
    /// fresh 16-bit nonces; attempts whose challenge cannot be expanded or
    /// whose `r0` or `z` would leak the secret are discarded without saying why.
    ///
    /// # Errors
    ///
    /// - [`SignatureError::Lattice`] if `msg.len()` is not a multiple of 3
    /// - [`SignatureError::NonceSpaceExhausted`] if no attempt succeeds before
    ///   the nonces run out
    ///
    /// # Example
    ///
    /// ```
    /// use zkdilithium::{Params, SigningKey};
    ///
    /// let signing_key = SigningKey::from_seed(Params::TOY, &[0u8; 32]).unwrap();
    /// let root = [9u8; 36];
    /// let signature = signing_key.sign(&root).unwrap();
    /// assert!(signing_key.verifying_key().verify(&root, &signature));
    ///
    /// // Messages are absorbed three bytes at a time.
    /// assert!(signing_key.sign(b"abcd").is_err());
    /// ```
    pub fn sign(&self, msg: &[u8]) -> Result<Signature, SignatureError> {
        let vk = &self.verifying_key;
        let params = &vk.params;
        let perm = PoseidonPermutation::new(params.poseidon);

        let tr = vk.tr();
        let mu = message_digest(&perm, &tr, msg, params)?;
        let seed = shake256(&[tr.as_slice(), msg], RHO_PRIME_SIZE);
        let rho_prime = shake256(&[self.cns.as_slice(), seed.as_slice()], RHO_PRIME_SIZE);

        let a = vk.matrix();
        let s1_hat = self.s1.ntt();
        let s2_hat = self.s2.ntt();
        let z_bound = GAMMA1 - params.beta;
        let r0_bound = GAMMA2 - params.beta;

        let mut nonce = 0usize;
        let mut attempts = 0usize;
        loop {
            if nonce + params.l > 1 << 16 {
                return Err(SignatureError::NonceSpaceExhausted { attempts });
            }
            attempts += 1;

            let y = sample_mask(&rho_prime, nonce as u16, params.l);
            nonce += params.l;

            let w = a.mul_ntt(&y.ntt()).inv_ntt();
            let (_, w1) = w.decompose();
            let c_tilde = hash_challenge(&perm, &mu, &w1, params)?;

            let Some(c) = challenge_poly(&perm, &c_tilde, params)? else {
                trace!(attempts, "rejected attempt");
                continue;
            };
            let c_hat = c.ntt();

            let (r0, _) = (&w - &s2_hat.scalar_mul_ntt(&c_hat).inv_ntt()).decompose();
            if r0.norm() >= r0_bound {
                trace!(attempts, "rejected attempt");
                continue;
            }

            let z = &y + &s1_hat.scalar_mul_ntt(&c_hat).inv_ntt();
            if z.norm() >= z_bound {
                trace!(attempts, "rejected attempt");
                continue;
            }

            debug!(attempts, "signed message");
            return Ok(Signature { c_tilde, z });
        }
    }

    /// Wire encoding `public key || cns || pack_leq_eta(s1) || pack_leq_eta(s2)`.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SignatureError> {
        let mut out = self.verifying_key.to_bytes();
        out.extend_from_slice(&self.cns);
        out.extend(self.s1.pack_leq_eta()?);
        out.extend(self.s2.pack_leq_eta()?);
        Ok(out)
    }

    /// Decodes a signing key for `params`.
    pub fn from_bytes(params: Params, bytes: &[u8]) -> Result<Self, SignatureError> {
        params.validate()?;
        if bytes.len() != params.signing_key_bytes() {
            return Err(SignatureError::MalformedInput {
                expected: params.signing_key_bytes(),
                actual: bytes.len(),
            });
        }
        let (vk_bytes, rest) = bytes.split_at(params.public_key_bytes());
        let (cns_bytes, rest) = rest.split_at(CNS_SIZE);
        let (s1_bytes, s2_bytes) = rest.split_at(params.l * POLY_LEQ_ETA_BYTES);

        let mut cns = [0u8; CNS_SIZE];
        cns.copy_from_slice(cns_bytes);
        Ok(SigningKey {
            verifying_key: VerifyingKey::from_bytes(params, vk_bytes)?,
            cns,
            s1: PolyVec::unpack_leq_eta(s1_bytes, params.l)?,
            s2: PolyVec::unpack_leq_eta(s2_bytes, params.k)?,
        })
    }
}

impl VerifyingKey {
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Seed of the public matrix.
    pub fn rho(&self) -> &[u8; RHO_SIZE] {
        &self.rho
    }

    /// `t = A s1 + s2` in the coefficient domain.
    pub fn t(&self) -> &PolyVec {
        &self.t
    }

    /// The public matrix `A`, in the NTT domain.
    pub fn matrix(&self) -> Matrix {
        Matrix::sample(&self.rho, self.params.k, self.params.l)
    }

    /// `tr = H(rho || pack(t), 32)`, binding the message digest to this key.
    pub(crate) fn tr(&self) -> Vec<u8> {
        let packed = self.t.pack();
        shake256(&[self.rho.as_slice(), packed.as_slice()], TR_SIZE)
    }

    /// Verifies a signature on `msg`.
    ///
    /// Returns `false` for every kind of failure: a wrong challenge digest, an
    /// oversized `z`, a digest that does not expand to a challenge, or a
    /// malformed message or signature.
    ///
    /// # Example
    ///
    /// ```
    /// use zkdilithium::{Params, SigningKey};
    ///
    /// let signing_key = SigningKey::from_seed(Params::TOY, &[1u8; 32]).unwrap();
    /// let msg = [3u8; 36];
    /// let signature = signing_key.sign(&msg).unwrap();
    /// assert!(signing_key.verifying_key().verify(&msg, &signature));
    /// assert!(!signing_key.verifying_key().verify(&[4u8; 36], &signature));
    /// ```
    pub fn verify(&self, msg: &[u8], sig: &Signature) -> bool {
        match self.check(msg, sig) {
            Ok(true) => true,
            Ok(false) => {
                debug!("signature rejected");
                false
            }
            Err(err) => {
                debug!(%err, "signature rejected");
                false
            }
        }
    }

    fn check(&self, msg: &[u8], sig: &Signature) -> Result<bool, SignatureError> {
        let params = &self.params;
        if sig.c_tilde.len() != params.c_size || sig.z.len() != params.l {
            return Ok(false);
        }

        let perm = PoseidonPermutation::new(params.poseidon);
        let mu = message_digest(&perm, &self.tr(), msg, params)?;

        let Some(c) = challenge_poly(&perm, &sig.c_tilde, params)? else {
            return Ok(false);
        };
        if sig.z.norm() >= GAMMA1 - params.beta {
            return Ok(false);
        }

        let c_hat = c.ntt();
        let az = self.matrix().mul_ntt(&sig.z.ntt());
        let w = (&az - &self.t.ntt().scalar_mul_ntt(&c_hat)).inv_ntt();
        let (_, w1) = w.decompose();

        Ok(hash_challenge(&perm, &mu, &w1, params)? == sig.c_tilde)
    }

    /// Wire encoding `rho || pack(t)`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = self.rho.to_vec();
        out.extend(self.t.pack());
        out
    }

    /// Decodes a verifying key for `params`.
    pub fn from_bytes(params: Params, bytes: &[u8]) -> Result<Self, SignatureError> {
        params.validate()?;
        if bytes.len() != params.public_key_bytes() {
            return Err(SignatureError::MalformedInput {
                expected: params.public_key_bytes(),
                actual: bytes.len(),
            });
        }
        let (rho_bytes, t_bytes) = bytes.split_at(RHO_SIZE);
        debug_assert_eq!(t_bytes.len(), params.k * POLY_BYTES);

        let mut rho = [0u8; RHO_SIZE];
        rho.copy_from_slice(rho_bytes);
        Ok(VerifyingKey {
            params,
            rho,
            t: PolyVec::unpack(t_bytes, params.k)?,
        })
    }
}

impl From<&SigningKey> for VerifyingKey {
    /// Equivalent to `signing_key.verifying_key().clone()`.
    fn from(sk: &SigningKey) -> Self {
        sk.verifying_key.clone()
    }
}

/// Serialized layout of [`VerifyingKey`], checked before it becomes a key.
#[derive(Deserialize)]
struct VerifyingKeyFields {
    params: Params,
    rho: [u8; RHO_SIZE],
    t: PolyVec,
}

impl TryFrom<VerifyingKeyFields> for VerifyingKey {
    type Error = SignatureError;

    fn try_from(fields: VerifyingKeyFields) -> Result<Self, Self::Error> {
        let VerifyingKeyFields { params, rho, t } = fields;
        params.validate()?;
        check_len(params.k, t.len())?;
        Ok(VerifyingKey { params, rho, t })
    }
}

/// Serialized layout of [`SigningKey`].
#[derive(Deserialize)]
struct SigningKeyFields {
    verifying_key: VerifyingKey,
    cns: [u8; CNS_SIZE],
    s1: PolyVec,
    s2: PolyVec,
}

impl TryFrom<SigningKeyFields> for SigningKey {
    type Error = SignatureError;

    fn try_from(fields: SigningKeyFields) -> Result<Self, Self::Error> {
        let SigningKeyFields {
            verifying_key,
            cns,
            s1,
            s2,
        } = fields;
        let params = verifying_key.params;
        check_len(params.l, s1.len())?;
        check_len(params.k, s2.len())?;
        Ok(SigningKey {
            verifying_key,
            cns,
            s1,
            s2,
        })
    }
}

fn check_len(expected: usize, actual: usize) -> Result<(), SignatureError> {
    if expected != actual {
        return Err(SignatureError::MalformedInput { expected, actual });
    }
    Ok(())
}
