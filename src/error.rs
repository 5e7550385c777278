//!
//! [Error] enum definition
//!
use std::io;

use der::asn1::ObjectIdentifier;
use x509_parser::error::X509Error;

/// Possible errors for keystore operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    IoError(#[from] io::Error),

    #[error(transparent)]
    DerError(#[from] der::Error),

    #[error(transparent)]
    X509Error(#[from] x509_parser::nom::Err<X509Error>),

    #[error("{field} of entry {alias:?} exceeds 65535 bytes in UTF-8")]
    EncodingTooLong { field: &'static str, alias: String },

    #[error("unsupported key algorithm {oid} for entry {alias:?}, only RSA keys can be written")]
    UnsupportedKeyAlgorithm { alias: String, oid: ObjectIdentifier },

    #[error("invalid private key")]
    InvalidPrivateKey,

    #[error("encrypted key data too short")]
    InvalidEncryptedData,

    #[error("key checksum mismatch")]
    ChecksumMismatch,

    #[error(transparent)]
    RandError(#[from] rand::rand_core::OsError),
}
