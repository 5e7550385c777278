//!
//! A convenient high-level library to write Java JKS keystores, written in pure Rust,
//! modeled after the Java KeyStore API.
//!
//! This crate consists of a [KeyStore] struct collecting trusted certificate entries and
//! private key entries, and a [JksWriter] which serializes the collection into the JKS
//! binary format understood by `keytool` and the JVM. It supports keystores with private
//! keys as well as so called 'truststores' (keystores with only root certificates and
//! without private keys).
//!
//! Each entry in the keystore carries an 'alias', which is a friendly name chosen when
//! creating it. Entries are written in insertion order, trusted certificates first, as
//! the format requires.
//!
//! All certificates must be encoded in X.509 format. Private keys must be encoded in
//! PKCS#8 and use the RSA algorithm; other key algorithms are rejected when writing.
//! Each private key contains a key material and a list of certificates organized into
//! chain. The first in the chain must be the entity certificate associated with the
//! private key. The last must be the CA root certificate, with any intermediates in
//! between.
//!
//! Private keys are protected with the proprietary JavaSoft algorithm the format
//! mandates (see [KeyProtector]), using the store password or a per-entry password
//! supplied via [JksWriter::key_password]. Reading existing JKS files back is out of
//! scope for this crate.
//!

mod cert;
mod codec;
pub mod error;
mod keychain;
mod keystore;
mod oid;
mod protector;

/// Result type for keystore operations
pub type Result<T> = std::result::Result<T, error::Error>;

pub use cert::Certificate;
pub use keychain::{KeyAlgorithm, PrivateKey, PrivateKeyChain};
pub use keystore::{CertificateEntry, JksWriter, KeyStore, PrivateKeyEntry};
pub use protector::KeyProtector;
