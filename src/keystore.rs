use std::{collections::HashMap, time::SystemTime};

use crate::{Result, cert::Certificate, codec, keychain::PrivateKeyChain};

/// A trusted certificate entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateEntry {
    pub(crate) alias: String,
    pub(crate) timestamp: Option<SystemTime>,
    pub(crate) cert: Certificate,
}

impl CertificateEntry {
    /// Creates a new trusted certificate entry. Without an explicit
    /// timestamp the entry is stamped with the wall clock at write time.
    pub fn new<A>(alias: A, cert: Certificate) -> Self
    where
        A: Into<String>,
    {
        Self {
            alias: alias.into(),
            timestamp: None,
            cert,
        }
    }

    /// Set the creation timestamp recorded for this entry
    pub fn with_timestamp(mut self, timestamp: SystemTime) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Get the entry alias
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// Get the creation timestamp, if one was set
    pub fn timestamp(&self) -> Option<SystemTime> {
        self.timestamp
    }

    /// Get the trusted certificate
    pub fn certificate(&self) -> &Certificate {
        &self.cert
    }
}

/// A private key entry with its certificate chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrivateKeyEntry {
    pub(crate) alias: String,
    pub(crate) timestamp: Option<SystemTime>,
    pub(crate) chain: PrivateKeyChain,
}

impl PrivateKeyEntry {
    /// Creates a new private key entry. Without an explicit timestamp the
    /// entry is stamped with the wall clock at write time.
    pub fn new<A>(alias: A, chain: PrivateKeyChain) -> Self
    where
        A: Into<String>,
    {
        Self {
            alias: alias.into(),
            timestamp: None,
            chain,
        }
    }

    /// Set the creation timestamp recorded for this entry
    pub fn with_timestamp(mut self, timestamp: SystemTime) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Get the entry alias
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// Get the creation timestamp, if one was set
    pub fn timestamp(&self) -> Option<SystemTime> {
        self.timestamp
    }

    /// Get the private key chain
    pub fn chain(&self) -> &PrivateKeyChain {
        &self.chain
    }
}

/// KeyStore holds the entries to be written to a JKS file: trusted
/// certificates and private key chains, each kept in insertion order.
///
/// Aliases name entries but are not checked for uniqueness; Java tooling
/// expects unique aliases, and keeping them unique is up to the caller.
#[derive(Debug, Clone, Default)]
pub struct KeyStore {
    certs: Vec<CertificateEntry>,
    keypairs: Vec<PrivateKeyEntry>,
}

impl KeyStore {
    /// Create new empty keystore
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a trusted certificate entry
    pub fn add_certificate(&mut self, entry: CertificateEntry) {
        self.certs.push(entry);
    }

    /// Add a private key entry
    pub fn add_private_key(&mut self, entry: PrivateKeyEntry) {
        self.keypairs.push(entry);
    }

    /// Get the trusted certificate entries in insertion order
    pub fn certificates(&self) -> &[CertificateEntry] {
        &self.certs
    }

    /// Get the private key entries in insertion order
    pub fn private_keys(&self) -> &[PrivateKeyEntry] {
        &self.keypairs
    }

    /// Get entries count in the keystore
    pub fn entries_count(&self) -> usize {
        self.certs.len() + self.keypairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.certs.is_empty() && self.keypairs.is_empty()
    }

    /// Delete every entry carrying the given alias, of either kind.
    /// Returns the number of entries removed.
    pub fn delete_entry(&mut self, alias: &str) -> usize {
        let before = self.entries_count();
        self.certs.retain(|e| e.alias != alias);
        self.keypairs.retain(|e| e.alias != alias);
        before - self.entries_count()
    }

    /// Create keystore writer with a given password to use for key
    /// protection and the store digest
    pub fn writer<'a, 'b>(&'a self, password: &'b str) -> JksWriter<'a, 'b> {
        JksWriter {
            keystore: self,
            password,
            key_passwords: HashMap::new(),
        }
    }
}

/// JKS writer
pub struct JksWriter<'a, 'b> {
    keystore: &'a KeyStore,
    password: &'b str,
    key_passwords: HashMap<String, String>,
}

impl JksWriter<'_, '_> {
    /// Protect the private key stored under `alias` with its own password
    /// instead of the store password
    pub fn key_password(mut self, alias: &str, password: &str) -> Self {
        self.key_passwords.insert(alias.to_owned(), password.to_owned());
        self
    }

    /// Write the keystore into JKS format. On any error nothing is returned;
    /// there is no partial output.
    pub fn write(self) -> Result<Vec<u8>> {
        let mut out = Vec::new();

        codec::put_u32(&mut out, codec::MAGIC);
        codec::put_u32(&mut out, codec::VERSION);
        codec::put_u32(&mut out, self.keystore.entries_count() as u32);

        // trusted certificates always precede key entries in the file,
        // whatever order they were added in
        for entry in &self.keystore.certs {
            codec::encode_certificate(&mut out, entry)?;
        }

        for entry in &self.keystore.keypairs {
            let password = self
                .key_passwords
                .get(entry.alias())
                .map(String::as_str)
                .unwrap_or(self.password);
            codec::encode_private_key(&mut out, entry, password)?;
        }

        let digest = codec::store_digest(&out, self.password);
        out.extend_from_slice(&digest);

        Ok(out)
    }
}
