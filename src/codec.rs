use std::time::{SystemTime, UNIX_EPOCH};

use der::{Any, Encode, asn1::OctetString};
use pkcs8::spki::AlgorithmIdentifierOwned;
use pkcs12::pbe_params::EncryptedPrivateKeyInfo;
use sha1::{Digest, Sha1};

use crate::{
    Result,
    error::Error,
    keychain::KeyAlgorithm,
    keystore::{CertificateEntry, PrivateKeyEntry},
    oid,
    protector::{KeyProtector, password_bytes},
};

pub(crate) const MAGIC: u32 = 0xfeed_feed;
pub(crate) const VERSION: u32 = 2;

pub(crate) const TAG_PRIVATE_KEY: u32 = 1;
pub(crate) const TAG_TRUSTED_CERT: u32 = 2;

// mixed into the digest between password and store contents
const DIGEST_WHITENER: &[u8] = b"Mighty Aphrodite";

pub(crate) fn put_u32(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_be_bytes());
}

pub(crate) fn put_u64(out: &mut Vec<u8>, value: u64) {
    out.extend_from_slice(&value.to_be_bytes());
}

/// Milliseconds since the Unix epoch as a big-endian u64. Sub-millisecond
/// precision is truncated; times before the epoch clamp to zero.
pub(crate) fn put_timestamp(out: &mut Vec<u8>, ts: SystemTime) {
    let ms = ts.duration_since(UNIX_EPOCH).unwrap_or_default().as_millis() as u64;
    put_u64(out, ms);
}

/// u16 big-endian byte length followed by the UTF-8 bytes. The length prefix
/// caps text fields at 65535 bytes; `field` and `alias` only give the error
/// its context.
pub(crate) fn put_str(out: &mut Vec<u8>, value: &str, field: &'static str, alias: &str) -> Result<()> {
    if value.len() > u16::MAX as usize {
        return Err(Error::EncodingTooLong {
            field,
            alias: alias.to_owned(),
        });
    }
    out.extend_from_slice(&(value.len() as u16).to_be_bytes());
    out.extend_from_slice(value.as_bytes());
    Ok(())
}

pub(crate) fn encode_certificate(out: &mut Vec<u8>, entry: &CertificateEntry) -> Result<()> {
    put_u32(out, TAG_TRUSTED_CERT);
    put_str(out, entry.alias(), "alias", entry.alias())?;
    put_timestamp(out, entry.timestamp().unwrap_or_else(SystemTime::now));

    let cert = entry.certificate();
    put_str(out, cert.cert_type(), "certificate type", entry.alias())?;
    put_u32(out, cert.as_der().len() as u32);
    out.extend_from_slice(cert.as_der());

    Ok(())
}

pub(crate) fn encode_private_key(out: &mut Vec<u8>, entry: &PrivateKeyEntry, password: &str) -> Result<()> {
    put_u32(out, TAG_PRIVATE_KEY);
    put_str(out, entry.alias(), "alias", entry.alias())?;
    put_timestamp(out, entry.timestamp().unwrap_or_else(SystemTime::now));

    let key = entry.chain().key();
    match key.algorithm() {
        Some(KeyAlgorithm::Rsa) => {}
        None => {
            return Err(Error::UnsupportedKeyAlgorithm {
                alias: entry.alias().to_owned(),
                oid: *key.oid(),
            });
        }
    }

    let protected = KeyProtector::new(password).protect(key.as_der())?;

    let key_info = EncryptedPrivateKeyInfo {
        encryption_algorithm: AlgorithmIdentifierOwned {
            oid: oid::KEY_PROTECTOR_OID,
            parameters: Some(Any::null()),
        },
        encrypted_data: OctetString::new(protected)?,
    }
    .to_der()?;

    put_u32(out, key_info.len() as u32);
    out.extend_from_slice(&key_info);

    let certs = entry.chain().certs();
    put_u32(out, certs.len() as u32);
    for cert in certs {
        put_str(out, cert.cert_type(), "certificate type", entry.alias())?;
        put_u32(out, cert.as_der().len() as u32);
        out.extend_from_slice(cert.as_der());
    }

    Ok(())
}

/// Digest appended as the store trailer: SHA-1 over the password bytes, the
/// whitener constant and everything written before the trailer.
pub(crate) fn store_digest(data: &[u8], password: &str) -> [u8; 20] {
    let mut hasher = Sha1::new();
    hasher.update(password_bytes(password));
    hasher.update(DIGEST_WHITENER);
    hasher.update(data);
    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_put_u32() {
        let mut out = Vec::new();
        put_u32(&mut out, 0x12345678);
        assert_eq!(out, vec![0x12, 0x34, 0x56, 0x78]);
    }

    #[test]
    fn test_put_u64() {
        let mut out = Vec::new();
        put_u64(&mut out, 0x123456789abcdef0);
        assert_eq!(out, vec![0x12, 0x34, 0x56, 0x78, 0x9a, 0xbc, 0xde, 0xf0]);
    }

    #[test]
    fn test_put_timestamp_millis() {
        let mut out = Vec::new();
        put_timestamp(&mut out, UNIX_EPOCH + Duration::from_micros(1_500));
        assert_eq!(out, 1u64.to_be_bytes());
    }

    #[test]
    fn test_put_timestamp_before_epoch() {
        let mut out = Vec::new();
        put_timestamp(&mut out, UNIX_EPOCH - Duration::from_secs(1));
        assert_eq!(out, 0u64.to_be_bytes());
    }

    #[test]
    fn test_put_str() {
        let mut out = Vec::new();
        put_str(&mut out, "test", "alias", "test").unwrap();
        assert_eq!(out, vec![0, 4, b't', b'e', b's', b't']);
    }

    #[test]
    fn test_put_str_empty() {
        let mut out = Vec::new();
        put_str(&mut out, "", "alias", "").unwrap();
        assert_eq!(out, vec![0, 0]);
    }

    #[test]
    fn test_put_str_length_boundary() {
        let mut out = Vec::new();
        let at_limit = "a".repeat(65535);
        put_str(&mut out, &at_limit, "alias", &at_limit).unwrap();
        assert_eq!(out.len(), 2 + 65535);
        assert_eq!(out[..2], [0xff, 0xff]);

        let over_limit = "a".repeat(65536);
        let result = put_str(&mut Vec::new(), &over_limit, "alias", &over_limit);
        assert!(matches!(result, Err(Error::EncodingTooLong { field: "alias", .. })));
    }

    #[test]
    fn test_store_digest_depends_on_password_and_data() {
        let digest = store_digest(b"data", "changeit");
        assert_eq!(digest, store_digest(b"data", "changeit"));
        assert_ne!(digest, store_digest(b"data", "changeit2"));
        assert_ne!(digest, store_digest(b"atad", "changeit"));
    }
}
