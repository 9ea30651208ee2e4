//! Credential issuance.

use tracing::debug;
use zkdilithium::{Signature, SigningKey, VerifyingKey};

use crate::attribute::ATTRIBUTE_BYTES;
use crate::errors::CredentialError;

/// Holds the key material for a credential issuer.
///
/// Building the attribute tree happens elsewhere; the issuer signs its root.
#[derive(Clone, Debug)]
pub struct Issuer {
    signing_key: SigningKey,
}

impl Issuer {
    pub fn new(signing_key: SigningKey) -> Self {
        Issuer { signing_key }
    }

    pub fn verifying_key(&self) -> &VerifyingKey {
        self.signing_key.verifying_key()
    }

    /// Signs the 36-byte root of an attribute tree.
    ///
    /// Does not check anything about how the root was built; that is up to
    /// the issuance protocol.
    pub fn issue(&self, root: &[u8]) -> Result<Signature, CredentialError> {
        if root.len() != ATTRIBUTE_BYTES {
            return Err(CredentialError::MalformedInput {
                expected: ATTRIBUTE_BYTES,
                actual: root.len(),
            });
        }
        let signature = self.signing_key.sign(root)?;
        debug!("issued credential signature");
        Ok(signature)
    }
}
