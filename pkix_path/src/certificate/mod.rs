// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! X.509 v3 certificate structure.
//!
//! The path validator only reads certificates. The structures here are thin
//! DER bindings (RFC 5280 §4.1) plus the accessors the validators need:
//! names, validity, key material, the critical extension set and the
//! to-be-signed bytes.
//!
//! ```no_run
//! use der::Decode;
//! use pkix_path::Certificate;
//!
//! # fn example(der_bytes: &[u8], pem_string: &str) -> pkix_path::Result<()> {
//! let cert = Certificate::from_der(der_bytes)?;
//! println!("Subject: {}", cert.subject());
//!
//! let cert = Certificate::from_pem(pem_string)?;
//! let tbs = cert.tbs_der()?;
//! # let _ = tbs;
//! # Ok(())
//! # }
//! ```

pub mod name;

extern crate alloc;

use alloc::collections::BTreeSet;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use const_oid::ObjectIdentifier;
use der::{
    asn1::{BitString, OctetString, Uint},
    Decode, Encode, Enumerated, Sequence,
};
use spki::{AlgorithmIdentifierOwned, SubjectPublicKeyInfoOwned};

use crate::certificate::name::Name;
use crate::error::{EncodingError, Error, ExtensionError, Result};
use crate::time::Validity;

/// X.509 certificate version.
///
/// ```asn1
/// Version  ::=  INTEGER  {  v1(0), v2(1), v3(2)  }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Enumerated)]
#[asn1(type = "INTEGER")]
#[repr(u8)]
pub enum Version {
    V1 = 0,
    V2 = 1,
    V3 = 2,
}

// DER omits the DEFAULT value, so the default has to be v1.
impl Default for Version {
    fn default() -> Self {
        Version::V1
    }
}

fn default_false() -> bool {
    false
}

/// X.509 extension.
///
/// ```asn1
/// Extension  ::=  SEQUENCE  {
///      extnID      OBJECT IDENTIFIER,
///      critical    BOOLEAN DEFAULT FALSE,
///      extnValue   OCTET STRING
/// }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Sequence)]
pub struct Extension {
    pub extn_id: ObjectIdentifier,
    #[asn1(default = "default_false")]
    pub critical: bool,
    pub extn_value: OctetString,
}

impl Extension {
    pub fn new(extn_id: ObjectIdentifier, critical: bool, value: Vec<u8>) -> Result<Self> {
        Ok(Self {
            extn_id,
            critical,
            extn_value: OctetString::new(value)?,
        })
    }

    /// The DER bytes carried inside `extnValue`.
    pub fn value(&self) -> &[u8] {
        self.extn_value.as_bytes()
    }
}

/// TBSCertificate (RFC 5280 §4.1.1.1).
#[derive(Clone, Debug, PartialEq, Eq, Sequence)]
pub struct TbsCertificate {
    #[asn1(context_specific = "0", default = "Default::default")]
    pub version: Version,
    pub serial_number: Uint,
    pub signature: AlgorithmIdentifierOwned,
    pub issuer: Name,
    pub validity: Validity,
    pub subject: Name,
    pub subject_public_key_info: SubjectPublicKeyInfoOwned,
    #[asn1(context_specific = "1", tag_mode = "IMPLICIT", optional = "true")]
    pub issuer_unique_id: Option<BitString>,
    #[asn1(context_specific = "2", tag_mode = "IMPLICIT", optional = "true")]
    pub subject_unique_id: Option<BitString>,
    #[asn1(context_specific = "3", tag_mode = "EXPLICIT", optional = "true")]
    pub extensions: Option<Vec<Extension>>,
}

/// Signed X.509 certificate.
#[derive(Clone, Debug, PartialEq, Eq, Sequence)]
pub struct Certificate {
    pub tbs_certificate: TbsCertificate,
    pub signature_algorithm: AlgorithmIdentifierOwned,
    pub signature: BitString,
}

impl Certificate {
    /// Parse a certificate from PEM (`-----BEGIN CERTIFICATE-----`).
    pub fn from_pem(pem: &str) -> Result<Self> {
        let (label, der_bytes) = pem_rfc7468::decode_vec(pem.as_bytes())?;
        if label != "CERTIFICATE" {
            return Err(Error::EncodingError(EncodingError::InvalidPemLabel {
                expected: "CERTIFICATE".to_string(),
                found: label.to_string(),
            }));
        }
        Ok(<Self as Decode>::from_der(&der_bytes)?)
    }

    /// Re-encoded TBSCertificate, the message the issuer signed.
    pub fn tbs_der(&self) -> Result<Vec<u8>> {
        Ok(self.tbs_certificate.to_der()?)
    }

    pub fn signature_bytes(&self) -> &[u8] {
        self.signature.raw_bytes()
    }

    pub fn subject(&self) -> &Name {
        &self.tbs_certificate.subject
    }

    pub fn issuer(&self) -> &Name {
        &self.tbs_certificate.issuer
    }

    pub fn validity(&self) -> &Validity {
        &self.tbs_certificate.validity
    }

    pub fn public_key_info(&self) -> &SubjectPublicKeyInfoOwned {
        &self.tbs_certificate.subject_public_key_info
    }

    pub fn extensions(&self) -> &[Extension] {
        self.tbs_certificate.extensions.as_deref().unwrap_or(&[])
    }

    /// First extension with the given OID.
    pub fn extension(&self, oid: &ObjectIdentifier) -> Option<&Extension> {
        self.extensions().iter().find(|ext| &ext.extn_id == oid)
    }

    /// Decode the value of an extension, if present.
    pub fn decode_extension<T>(&self, oid: &ObjectIdentifier) -> Result<Option<(bool, T)>>
    where
        T: for<'a> Decode<'a>,
    {
        match self.extension(oid) {
            Some(ext) => {
                let value = T::from_der(ext.value()).map_err(|e| {
                    Error::invalid_extension(alloc::format!("{}: {}", oid, e))
                })?;
                Ok(Some((ext.critical, value)))
            }
            None => Ok(None),
        }
    }

    /// OIDs of all extensions marked critical.
    pub fn critical_extensions(&self) -> BTreeSet<ObjectIdentifier> {
        self.extensions()
            .iter()
            .filter(|ext| ext.critical)
            .map(|ext| ext.extn_id)
            .collect()
    }

    /// Rejects a certificate that repeats an extension (RFC 5280 §4.2).
    pub fn check_duplicate_extensions(&self) -> Result<()> {
        let mut seen = BTreeSet::new();
        for ext in self.extensions() {
            if !seen.insert(ext.extn_id) {
                return Err(Error::ExtensionError(ExtensionError::DuplicateExtension(
                    ext.extn_id.to_string(),
                )));
            }
        }
        Ok(())
    }

    /// Subject and issuer names are equal under canonical comparison.
    pub fn is_self_issued(&self) -> bool {
        self.subject().matches(self.issuer())
    }

    /// Short label for log lines.
    pub fn describe(&self) -> String {
        self.subject().to_string()
    }
}
