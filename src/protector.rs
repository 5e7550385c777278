use rand::{TryRngCore, rngs::OsRng};
use sha1::{Digest, Sha1};

use crate::{Result, error::Error};

pub(crate) const SALT_LEN: usize = 20;
const CHECK_LEN: usize = 20;

/// Password-based protection for private keys, compatible with the JavaSoft
/// `1.3.6.1.4.1.42.2.17.1.1` algorithm. This is not PKCS#5: the keystream is
/// a SHA-1 chain seeded from the salt, and the trailing checksum is taken
/// over the plaintext. Readers recompute the checksum after decryption to
/// detect a wrong password.
pub struct KeyProtector {
    passwd: Vec<u8>,
}

impl KeyProtector {
    pub fn new(password: &str) -> Self {
        Self {
            passwd: password_bytes(password),
        }
    }

    /// Encrypt a DER-encoded private key. Output is `salt || body || checksum`
    /// with a fresh 20-byte random salt per call.
    pub fn protect(&self, plain: &[u8]) -> Result<Vec<u8>> {
        let mut salt = [0u8; SALT_LEN];
        OsRng.try_fill_bytes(&mut salt)?;

        let stream = self.keystream(&salt, plain.len());

        let mut out = Vec::with_capacity(SALT_LEN + plain.len() + CHECK_LEN);
        out.extend_from_slice(&salt);
        out.extend(plain.iter().zip(&stream).map(|(p, k)| p ^ k));
        out.extend_from_slice(&self.checksum(plain));
        Ok(out)
    }

    /// Decrypt data produced by [KeyProtector::protect]. Fails with
    /// [Error::ChecksumMismatch] if the password is wrong or the body was
    /// altered.
    pub fn unprotect(&self, data: &[u8]) -> Result<Vec<u8>> {
        if data.len() < SALT_LEN + CHECK_LEN {
            return Err(Error::InvalidEncryptedData);
        }

        let (salt, rest) = data.split_at(SALT_LEN);
        let (body, check) = rest.split_at(rest.len() - CHECK_LEN);

        let stream = self.keystream(salt, body.len());
        let plain: Vec<u8> = body.iter().zip(&stream).map(|(c, k)| c ^ k).collect();

        if self.checksum(&plain) != check {
            return Err(Error::ChecksumMismatch);
        }
        Ok(plain)
    }

    // digest(i) = SHA1(passwd || digest(i-1)), seeded with the salt,
    // concatenated until len bytes are available
    fn keystream(&self, salt: &[u8], len: usize) -> Vec<u8> {
        let mut stream = Vec::with_capacity(len.next_multiple_of(CHECK_LEN));
        let mut round = salt.to_vec();

        while stream.len() < len {
            let mut hasher = Sha1::new();
            hasher.update(&self.passwd);
            hasher.update(&round);
            round = hasher.finalize().to_vec();
            stream.extend_from_slice(&round);
        }

        stream.truncate(len);
        stream
    }

    fn checksum(&self, plain: &[u8]) -> [u8; CHECK_LEN] {
        let mut hasher = Sha1::new();
        hasher.update(&self.passwd);
        hasher.update(plain);
        hasher.finalize().into()
    }
}

/// Password bytes as used everywhere in the format: UTF-16BE code units,
/// two bytes each, no BOM.
pub(crate) fn password_bytes(password: &str) -> Vec<u8> {
    password.encode_utf16().flat_map(u16::to_be_bytes).collect()
}
