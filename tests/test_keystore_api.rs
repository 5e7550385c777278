use std::time::{Duration, UNIX_EPOCH};

use jks_keystore::{Certificate, CertificateEntry, KeyAlgorithm, KeyStore, PrivateKey, PrivateKeyChain, PrivateKeyEntry};

const CA_CERT: &[u8] = include_bytes!("assets/ca.der");
const ENTITY_CERT: &[u8] = include_bytes!("assets/entity.der");
const RSA_KEY: &[u8] = include_bytes!("assets/rsa-key.pk8");
const EC_KEY: &[u8] = include_bytes!("assets/ec-key.pk8");

#[test]
fn test_certificate_from_der() {
    let cert = Certificate::from_der(CA_CERT).unwrap();

    assert_eq!(cert.as_der(), CA_CERT);
    assert_eq!(cert.cert_type(), "X.509");
    assert!(cert.subject().contains("Example Root CA"));
    // self-signed
    assert_eq!(cert.subject(), cert.issuer());

    let entity = Certificate::from_der(ENTITY_CERT).unwrap();
    assert!(entity.subject().contains("server.example.com"));
    assert!(entity.issuer().contains("Example Root CA"));
}

#[test]
fn test_certificate_rejects_garbage() {
    assert!(Certificate::from_der(b"not a certificate").is_err());
}

#[test]
fn test_private_key_from_der() {
    let key = PrivateKey::from_der(RSA_KEY).unwrap();

    assert_eq!(key.as_der(), RSA_KEY);
    assert_eq!(key.oid().to_string(), "1.2.840.113549.1.1.1");
    assert_eq!(key.algorithm(), Some(KeyAlgorithm::Rsa));
}

#[test]
fn test_private_key_non_rsa_parses_but_is_unrecognized() {
    let key = PrivateKey::from_der(EC_KEY).unwrap();

    assert_eq!(key.oid().to_string(), "1.2.840.10045.2.1");
    assert_eq!(key.algorithm(), None);
}

#[test]
fn test_private_key_rejects_garbage() {
    assert!(PrivateKey::from_der(b"not a key").is_err());
}

#[test]
fn test_keystore_collection() {
    let mut keystore = KeyStore::new();
    assert!(keystore.is_empty());

    let ca = Certificate::from_der(CA_CERT).unwrap();
    let entity = Certificate::from_der(ENTITY_CERT).unwrap();
    let key = PrivateKey::from_der(RSA_KEY).unwrap();

    keystore.add_certificate(CertificateEntry::new("ca", ca.clone()));

    let chain = PrivateKeyChain::new(key, [entity, ca]);
    assert_eq!(chain.certs().len(), 2);
    keystore.add_private_key(PrivateKeyEntry::new("server", chain));

    assert!(!keystore.is_empty());
    assert_eq!(keystore.entries_count(), 2);
    assert_eq!(keystore.certificates().len(), 1);
    assert_eq!(keystore.private_keys().len(), 1);

    assert_eq!(keystore.certificates()[0].alias(), "ca");
    assert_eq!(keystore.private_keys()[0].alias(), "server");
    assert_eq!(keystore.private_keys()[0].chain().certs().len(), 2);
}

#[test]
fn test_duplicate_aliases_are_not_rejected() {
    let mut keystore = KeyStore::new();
    let ca = Certificate::from_der(CA_CERT).unwrap();

    keystore.add_certificate(CertificateEntry::new("ca", ca.clone()));
    keystore.add_certificate(CertificateEntry::new("ca", ca));

    assert_eq!(keystore.entries_count(), 2);
}

#[test]
fn test_delete_entry_removes_both_kinds() {
    let mut keystore = KeyStore::new();
    let ca = Certificate::from_der(CA_CERT).unwrap();
    let key = PrivateKey::from_der(RSA_KEY).unwrap();

    keystore.add_certificate(CertificateEntry::new("shared", ca.clone()));
    keystore.add_private_key(PrivateKeyEntry::new(
        "shared",
        PrivateKeyChain::new(key, [ca.clone()]),
    ));
    keystore.add_certificate(CertificateEntry::new("other", ca));

    assert_eq!(keystore.delete_entry("shared"), 2);
    assert_eq!(keystore.entries_count(), 1);
    assert_eq!(keystore.certificates()[0].alias(), "other");

    assert_eq!(keystore.delete_entry("missing"), 0);
}

#[test]
fn test_entry_timestamps() {
    let ca = Certificate::from_der(CA_CERT).unwrap();

    let entry = CertificateEntry::new("ca", ca.clone());
    assert_eq!(entry.timestamp(), None);

    let ts = UNIX_EPOCH + Duration::from_millis(1_700_000_000_000);
    let entry = entry.with_timestamp(ts);
    assert_eq!(entry.timestamp(), Some(ts));
}
