use std::fmt;

use der::oid::ObjectIdentifier;
use pkcs8::PrivateKeyInfo;

use crate::{Result, cert::Certificate, error::Error, oid};

/// Key algorithms a JKS store can carry. Only RSA is implemented; adding
/// another algorithm means adding a variant here together with its standard
/// object identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum KeyAlgorithm {
    Rsa,
}

impl KeyAlgorithm {
    pub fn from_oid(oid: &ObjectIdentifier) -> Option<Self> {
        match *oid {
            o if o == oid::RSA_KEY_OID => Some(KeyAlgorithm::Rsa),
            _ => None,
        }
    }

    pub fn to_oid(&self) -> ObjectIdentifier {
        match self {
            KeyAlgorithm::Rsa => oid::RSA_KEY_OID,
        }
    }
}

/// PKCS#8 private key wrapper
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKey {
    pub(crate) data: Vec<u8>,
    pub(crate) oid: ObjectIdentifier,
}

impl PrivateKey {
    /// Parses a PKCS#8 private key encoded in DER format and constructs a new instance of the struct.
    /// Keys of any algorithm parse; writing the store fails later unless the
    /// algorithm is one of [KeyAlgorithm].
    pub fn from_der(data: &[u8]) -> Result<Self> {
        let info: PrivateKeyInfo = data.try_into().map_err(|_| Error::InvalidPrivateKey)?;
        Ok(Self {
            data: data.to_vec(),
            oid: info.algorithm.oid,
        })
    }

    /// Returns a reference to the private key data in PKCS#8 DER-encoded format.
    pub fn as_der(&self) -> &[u8] {
        &self.data
    }

    /// Returns an ObjectIdentifier of the key algorithm.
    pub fn oid(&self) -> &ObjectIdentifier {
        &self.oid
    }

    /// Returns the recognized key algorithm, or `None` for an algorithm the
    /// store format cannot protect.
    pub fn algorithm(&self) -> Option<KeyAlgorithm> {
        KeyAlgorithm::from_oid(&self.oid)
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("data", &"<PKCS#8>")
            .field("oid", &self.oid)
            .finish()
    }
}

/// PrivateKeyChain represents a private key and a certificate chain
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKeyChain {
    pub(crate) key: PrivateKey,
    pub(crate) certs: Vec<Certificate>,
}

impl PrivateKeyChain {
    /// Creates a new keychain with a given private key and a list of certificates.
    /// The leaf (entity) certificate must be the first in the list, and the root certificate must be the last.
    pub fn new<I>(key: PrivateKey, certs: I) -> Self
    where
        I: IntoIterator<Item = Certificate>,
    {
        Self {
            key,
            certs: certs.into_iter().collect(),
        }
    }

    /// Get a private key
    pub fn key(&self) -> &PrivateKey {
        &self.key
    }

    /// Get certificates
    pub fn certs(&self) -> &[Certificate] {
        &self.certs
    }
}

impl fmt::Debug for PrivateKeyChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKeyChain")
            .field("key", &self.key)
            .field("certs", &self.certs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use der::oid::ObjectIdentifier;

    use crate::keychain::KeyAlgorithm;
    use crate::oid::RSA_KEY_OID;

    #[test]
    fn test_key_algorithm_from_oid() {
        assert_eq!(Some(KeyAlgorithm::Rsa), KeyAlgorithm::from_oid(&RSA_KEY_OID));

        let ec_oid = ObjectIdentifier::new_unwrap("1.2.840.10045.2.1");
        assert_eq!(None, KeyAlgorithm::from_oid(&ec_oid));

        let dsa_oid = ObjectIdentifier::new_unwrap("1.2.840.10040.4.1");
        assert_eq!(None, KeyAlgorithm::from_oid(&dsa_oid));
    }

    #[test]
    fn test_key_algorithm_to_oid() {
        assert_eq!(RSA_KEY_OID, KeyAlgorithm::Rsa.to_oid());
    }
}
