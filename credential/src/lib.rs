//! Credential layer over zkDilithium signatures.
//!
//! An issuer signs the root of a tree whose leaves are attribute hashes. To
//! show the credential, the holder commits to that root under a random nonce
//! and hands an external zero-knowledge prover a [`SignatureWitness`]; the
//! resulting [`SignatureProof`] reveals the commitment but neither the root
//! nor the signature.
//!
//! # Example
//!
//! ```
//! use credential::{Attribute, Issuer};
//! use zkdilithium::{Params, SigningKey};
//!
//! let issuer = Issuer::new(SigningKey::from_seed(Params::TOY, &[1u8; 32]).unwrap());
//!
//! // A single-leaf tree: the root is the leaf hash
//! let root = Attribute::new(b"over-18".to_vec()).unwrap().calculate_hash();
//! let signature = issuer.issue(&root).unwrap();
//! assert!(issuer.verifying_key().verify(&root, &signature));
//! ```

mod attribute;
mod commitment;
mod errors;
mod issuer;
mod prover;
mod witness;


pub use attribute::{ATTRIBUTE_BYTES, Attribute};
pub use commitment::{COMMITMENT_LENGTH, NONCE_LENGTH, ROOT_FES, RandomCommitment};
pub use errors::CredentialError;
pub use issuer::Issuer;
pub use prover::{SignatureProof, SignatureProver};
pub use witness::SignatureWitness;
