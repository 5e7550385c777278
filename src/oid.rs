use der::asn1::ObjectIdentifier;

/// rsaEncryption, RFC 3279 § 2.3
pub const RSA_KEY_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.1");

/// JavaSoft proprietary key protection algorithm
pub const KEY_PROTECTOR_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.6.1.4.1.42.2.17.1.1");
