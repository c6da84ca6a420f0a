// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! X.509 v3 extension values consumed by path validation.
//!
//! - Basic Constraints, Key Usage
//! - Name Constraints (`GeneralSubtree`)
//! - Certificate Policies, Policy Mappings, Policy Constraints,
//!   Inhibit anyPolicy
//! - Authority Key Identifier
//!
//! Extended key usage and subject alternative names are recognised by OID
//! only; see [`crate::certificate::name::SubjectAltName`] for the latter.

extern crate alloc;

use alloc::vec::Vec;
use core::fmt;

use const_oid::ObjectIdentifier;
use der::{
    asn1::{Any, BitString, OctetString, Uint},
    DecodeValue, EncodeValue, FixedTag, Header, Length, Reader, Sequence, Tag, Writer,
};

use crate::certificate::name::GeneralName;

// ============================================================================
// Extension OIDs - RFC 5280 Section 4.2
// ============================================================================

/// Subject Key Identifier - 2.5.29.14
pub const SUBJECT_KEY_IDENTIFIER: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.29.14");

/// Key Usage - 2.5.29.15
pub const KEY_USAGE: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.29.15");

/// Subject Alternative Name - 2.5.29.17
pub const SUBJECT_ALT_NAME: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.29.17");

/// Basic Constraints - 2.5.29.19
pub const BASIC_CONSTRAINTS: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.29.19");

/// Name Constraints - 2.5.29.30
pub const NAME_CONSTRAINTS: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.29.30");

/// Certificate Policies - 2.5.29.32
pub const CERTIFICATE_POLICIES: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.29.32");

/// Policy Mappings - 2.5.29.33
pub const POLICY_MAPPINGS: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.29.33");

/// Authority Key Identifier - 2.5.29.35
pub const AUTHORITY_KEY_IDENTIFIER: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.29.35");

/// Policy Constraints - 2.5.29.36
pub const POLICY_CONSTRAINTS: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.29.36");

/// Extended Key Usage - 2.5.29.37
pub const EXTENDED_KEY_USAGE: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.29.37");

/// Inhibit anyPolicy - 2.5.29.54
pub const INHIBIT_ANY_POLICY: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.29.54");

fn default_false() -> bool {
    false
}

// ============================================================================
// Basic Constraints - RFC 5280 Section 4.2.1.9
// ============================================================================

/// ```asn1
/// BasicConstraints ::= SEQUENCE {
///     cA                      BOOLEAN DEFAULT FALSE,
///     pathLenConstraint       INTEGER (0..MAX) OPTIONAL
/// }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Sequence)]
pub struct BasicConstraints {
    #[asn1(default = "default_false")]
    pub ca: bool,
    #[asn1(optional = "true")]
    pub path_len_constraint: Option<u32>,
}

// ============================================================================
// Key Usage - RFC 5280 Section 4.2.1.3
// ============================================================================

/// KeyUsage BIT STRING, held as the first two content bytes in big-endian
/// order so bit 0 (digitalSignature) is `1 << 15`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyUsage {
    bits: u16,
}

impl KeyUsage {
    pub const DIGITAL_SIGNATURE: u16 = 1 << 15;
    pub const NON_REPUDIATION: u16 = 1 << 14;
    pub const KEY_ENCIPHERMENT: u16 = 1 << 13;
    pub const DATA_ENCIPHERMENT: u16 = 1 << 12;
    pub const KEY_AGREEMENT: u16 = 1 << 11;
    pub const KEY_CERT_SIGN: u16 = 1 << 10;
    pub const CRL_SIGN: u16 = 1 << 9;
    pub const ENCIPHER_ONLY: u16 = 1 << 8;
    pub const DECIPHER_ONLY: u16 = 1 << 7;

    pub fn new(bits: u16) -> Self {
        Self { bits }
    }

    pub fn has(&self, usage: u16) -> bool {
        (self.bits & usage) == usage
    }

    fn to_bit_string(self) -> der::Result<BitString> {
        if self.bits == 0 {
            return BitString::new(0, Vec::new());
        }
        let bytes = self.bits.to_be_bytes();
        let len = if bytes[1] == 0 { 1 } else { 2 };
        let last = bytes[len - 1];
        BitString::new(last.trailing_zeros() as u8, bytes[..len].to_vec())
    }
}

impl<'a> DecodeValue<'a> for KeyUsage {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        let bits = BitString::decode_value(reader, header)?;
        let raw = bits.raw_bytes();
        let value = match raw.len() {
            0 => 0,
            1 => u16::from_be_bytes([raw[0], 0]),
            _ => u16::from_be_bytes([raw[0], raw[1]]),
        };
        Ok(Self { bits: value })
    }
}

impl EncodeValue for KeyUsage {
    fn value_len(&self) -> der::Result<Length> {
        self.to_bit_string()?.value_len()
    }

    fn encode_value(&self, writer: &mut impl Writer) -> der::Result<()> {
        self.to_bit_string()?.encode_value(writer)
    }
}

impl FixedTag for KeyUsage {
    const TAG: Tag = Tag::BitString;
}

impl fmt::Display for KeyUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(u16, &str); 9] = [
            (KeyUsage::DIGITAL_SIGNATURE, "digitalSignature"),
            (KeyUsage::NON_REPUDIATION, "nonRepudiation"),
            (KeyUsage::KEY_ENCIPHERMENT, "keyEncipherment"),
            (KeyUsage::DATA_ENCIPHERMENT, "dataEncipherment"),
            (KeyUsage::KEY_AGREEMENT, "keyAgreement"),
            (KeyUsage::KEY_CERT_SIGN, "keyCertSign"),
            (KeyUsage::CRL_SIGN, "cRLSign"),
            (KeyUsage::ENCIPHER_ONLY, "encipherOnly"),
            (KeyUsage::DECIPHER_ONLY, "decipherOnly"),
        ];
        let mut first = true;
        for (bit, name) in NAMES {
            if self.has(bit) {
                if !first {
                    write!(f, ", ")?;
                }
                write!(f, "{}", name)?;
                first = false;
            }
        }
        Ok(())
    }
}

// ============================================================================
// Name Constraints - RFC 5280 Section 4.2.1.10
// ============================================================================

/// ```asn1
/// NameConstraints ::= SEQUENCE {
///      permittedSubtrees       [0]     GeneralSubtrees OPTIONAL,
///      excludedSubtrees        [1]     GeneralSubtrees OPTIONAL }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Sequence)]
pub struct NameConstraints {
    #[asn1(context_specific = "0", optional = "true", tag_mode = "IMPLICIT")]
    pub permitted_subtrees: Option<Vec<GeneralSubtree>>,
    #[asn1(context_specific = "1", optional = "true", tag_mode = "IMPLICIT")]
    pub excluded_subtrees: Option<Vec<GeneralSubtree>>,
}

/// `minimum` and `maximum` are carried for completeness; RFC 5280 profiles
/// require them to be absent and path processing ignores them.
#[derive(Clone, Debug, PartialEq, Eq, Sequence)]
pub struct GeneralSubtree {
    pub base: GeneralName,
    #[asn1(context_specific = "0", tag_mode = "IMPLICIT", default = "Default::default")]
    pub minimum: u32,
    #[asn1(context_specific = "1", tag_mode = "IMPLICIT", optional = "true")]
    pub maximum: Option<u32>,
}

impl GeneralSubtree {
    pub fn new(base: GeneralName) -> Self {
        Self {
            base,
            minimum: 0,
            maximum: None,
        }
    }
}

// ============================================================================
// Certificate Policies - RFC 5280 Section 4.2.1.4
// ============================================================================

/// ```asn1
/// PolicyQualifierInfo ::= SEQUENCE {
///      policyQualifierId  PolicyQualifierId,
///      qualifier          ANY DEFINED BY policyQualifierId }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Sequence)]
pub struct PolicyQualifierInfo {
    pub policy_qualifier_id: ObjectIdentifier,
    #[asn1(optional = "true")]
    pub qualifier: Option<Any>,
}

#[derive(Clone, Debug, PartialEq, Eq, Sequence)]
pub struct PolicyInformation {
    pub policy_identifier: ObjectIdentifier,
    #[asn1(optional = "true")]
    pub policy_qualifiers: Option<Vec<PolicyQualifierInfo>>,
}

impl PolicyInformation {
    pub fn new(policy_identifier: ObjectIdentifier) -> Self {
        Self {
            policy_identifier,
            policy_qualifiers: None,
        }
    }

    pub fn qualifiers(&self) -> &[PolicyQualifierInfo] {
        self.policy_qualifiers.as_deref().unwrap_or(&[])
    }
}

/// `certificatePolicies ::= SEQUENCE SIZE (1..MAX) OF PolicyInformation`
pub type CertificatePolicies = Vec<PolicyInformation>;

// ============================================================================
// Policy Mappings - RFC 5280 Section 4.2.1.5
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Sequence)]
pub struct PolicyMapping {
    pub issuer_domain_policy: ObjectIdentifier,
    pub subject_domain_policy: ObjectIdentifier,
}

/// `PolicyMappings ::= SEQUENCE SIZE (1..MAX) OF PolicyMapping`
pub type PolicyMappings = Vec<PolicyMapping>;

// ============================================================================
// Policy Constraints / Inhibit anyPolicy - RFC 5280 Sections 4.2.1.11, 4.2.1.14
// ============================================================================

/// ```asn1
/// PolicyConstraints ::= SEQUENCE {
///      requireExplicitPolicy           [0] SkipCerts OPTIONAL,
///      inhibitPolicyMapping            [1] SkipCerts OPTIONAL }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Sequence)]
pub struct PolicyConstraints {
    #[asn1(context_specific = "0", optional = "true", tag_mode = "IMPLICIT")]
    pub require_explicit_policy: Option<u32>,
    #[asn1(context_specific = "1", optional = "true", tag_mode = "IMPLICIT")]
    pub inhibit_policy_mapping: Option<u32>,
}

/// `InhibitAnyPolicy ::= SkipCerts`
pub type InhibitAnyPolicy = u32;

// ============================================================================
// Authority Key Identifier - RFC 5280 Section 4.2.1.1
// ============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq, Sequence)]
pub struct AuthorityKeyIdentifier {
    #[asn1(context_specific = "0", tag_mode = "IMPLICIT", optional = "true")]
    pub key_identifier: Option<OctetString>,
    #[asn1(context_specific = "1", tag_mode = "IMPLICIT", optional = "true")]
    pub authority_cert_issuer: Option<Vec<GeneralName>>,
    #[asn1(context_specific = "2", tag_mode = "IMPLICIT", optional = "true")]
    pub authority_cert_serial_number: Option<Uint>,
}
