//! zkDilithium: a Dilithium-style lattice signature with Poseidon digests.
//!
//! This library implements a Fiat-Shamir-with-aborts signature scheme using:
//! - The ring `Z_q[x]/(x^256 + 1)` with `q = 7340033` from the `lattice` crate
//! - SHAKE128/SHAKE256 to expand the public matrix, secrets and masks
//! - A Poseidon sponge over the same field for the message digest, the
//!   challenge digest and challenge sampling
//!
//! # Overview
//!
//! Every hash on the verification path is Poseidon over `Z_q`, so a
//! verification can be re-expressed as an arithmetic circuit over the ring's
//! own field. [`VerifyingKey::verification_transcript`] produces the
//! NTT-free values such a circuit consumes.
//!
//! Signing is deterministic: the same key and message always produce the
//! same signature.
//!
//! # Example
//!
//! ```
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use zkdilithium::{Params, Signature, SigningKey};
//!
//! // Generate a key pair for the full parameter set
//! let mut rng = StdRng::seed_from_u64(42);
//! let signing_key = SigningKey::random(Params::ZK_DILITHIUM, &mut rng).expect("keygen failed");
//! let verifying_key = signing_key.verifying_key();
//!
//! // Messages are absorbed three bytes per field element
//! let message = [0x5au8; 36];
//!
//! let signature = signing_key.sign(&message).expect("signing failed");
//! assert!(verifying_key.verify(&message, &signature));
//!
//! // Signatures travel as packed bytes
//! let bytes = signature.to_bytes().expect("encoding failed");
//! let decoded = Signature::from_bytes(verifying_key.params(), &bytes).expect("decoding failed");
//! assert_eq!(decoded, signature);
//! ```

mod challenge;
mod constants;
mod errors;
mod keys;
mod signatures;
mod transcript;


pub use constants::{CNS_SIZE, Params, RHO_SIZE, SEED_SIZE};
pub use errors::SignatureError;
pub use keys::{SigningKey, VerifyingKey};
pub use signatures::Signature;
pub use transcript::VerificationTranscript;
