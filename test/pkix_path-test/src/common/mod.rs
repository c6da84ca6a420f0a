// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

#![allow(dead_code)]

use const_oid::ObjectIdentifier;
use der::asn1::{BitString, OctetString, Uint};
use der::Encode;
use spki::{AlgorithmIdentifierOwned, SubjectPublicKeyInfoOwned};

use pkix_path::certificate::name::{GeneralName, SubjectAltName};
use pkix_path::certificate::{TbsCertificate, Version};
use pkix_path::crypto_backend::{CryptoBackend, SignatureAlgorithm};
use pkix_path::time::Validity;
use pkix_path::x509::extensions::{
    AUTHORITY_KEY_IDENTIFIER, BASIC_CONSTRAINTS, CERTIFICATE_POLICIES, INHIBIT_ANY_POLICY,
    KEY_USAGE, NAME_CONSTRAINTS, POLICY_CONSTRAINTS, POLICY_MAPPINGS, SUBJECT_ALT_NAME,
};
use pkix_path::x509::oids::ED25519;
use pkix_path::x509::{
    AuthorityKeyIdentifier, BasicConstraints, GeneralSubtree, KeyUsage, NameConstraints,
    PolicyConstraints, PolicyInformation, PolicyMapping,
};
use pkix_path::{
    Certificate, CertificateChain, Extension, Name, PathValidator, Time, TrustAnchor,
    ValidationContext, ValidationResult,
};

/// Reference time used by every scenario: 2023-11-14.
pub const NOW: u64 = 1_700_000_000;

/// Signature check for fixture certificates: the signature must be the
/// signer's key bytes followed by the DER TBSCertificate.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockBackend;

impl CryptoBackend for MockBackend {
    fn verify_signature(
        &self,
        _algorithm: SignatureAlgorithm,
        message: &[u8],
        signature: &[u8],
        public_key: &[u8],
    ) -> pkix_path::Result<()> {
        let mut expected = public_key.to_vec();
        expected.extend_from_slice(message);
        if expected == signature {
            Ok(())
        } else {
            Err(pkix_path::Error::signature_failed())
        }
    }
}

pub fn oid(s: &str) -> ObjectIdentifier {
    ObjectIdentifier::new_unwrap(s)
}

fn spki(key: &[u8]) -> SubjectPublicKeyInfoOwned {
    SubjectPublicKeyInfoOwned {
        algorithm: AlgorithmIdentifierOwned {
            oid: ED25519,
            parameters: None,
        },
        subject_public_key: BitString::from_bytes(key).unwrap(),
    }
}

pub struct CertBuilder {
    subject: Name,
    issuer: Name,
    key: Vec<u8>,
    signer: Vec<u8>,
    not_before: u64,
    not_after: u64,
    extensions: Vec<Extension>,
}

impl CertBuilder {
    /// Self-signed certificate for `subject` with key `key`.
    pub fn new(subject: &str, key: &[u8]) -> Self {
        let subject = Name::parse(subject).unwrap();
        Self {
            issuer: subject.clone(),
            subject,
            key: key.to_vec(),
            signer: key.to_vec(),
            not_before: 1_000,
            not_after: 2_000_000_000,
            extensions: Vec::new(),
        }
    }

    pub fn issued_by(mut self, issuer: &Certificate) -> Self {
        self.issuer = issuer.subject().clone();
        self.signer = issuer
            .public_key_info()
            .subject_public_key
            .raw_bytes()
            .to_vec();
        self
    }

    pub fn validity(mut self, not_before: u64, not_after: u64) -> Self {
        self.not_before = not_before;
        self.not_after = not_after;
        self
    }

    pub fn extension(mut self, oid: ObjectIdentifier, critical: bool, value: Vec<u8>) -> Self {
        self.extensions
            .push(Extension::new(oid, critical, value).unwrap());
        self
    }

    pub fn ca(self, path_len: Option<u32>) -> Self {
        let bc = BasicConstraints {
            ca: true,
            path_len_constraint: path_len,
        };
        self.extension(BASIC_CONSTRAINTS, true, bc.to_der().unwrap())
    }

    pub fn key_usage(self, bits: u16) -> Self {
        self.extension(KEY_USAGE, true, KeyUsage::new(bits).to_der().unwrap())
    }

    pub fn policies(self, policies: &[&str]) -> Self {
        let infos: Vec<PolicyInformation> = policies
            .iter()
            .map(|p| PolicyInformation::new(oid(p)))
            .collect();
        self.extension(CERTIFICATE_POLICIES, false, infos.to_der().unwrap())
    }

    pub fn policy_mappings(self, pairs: &[(&str, &str)]) -> Self {
        let mappings: Vec<PolicyMapping> = pairs
            .iter()
            .map(|(issuer, subject)| PolicyMapping {
                issuer_domain_policy: oid(issuer),
                subject_domain_policy: oid(subject),
            })
            .collect();
        self.extension(POLICY_MAPPINGS, true, mappings.to_der().unwrap())
    }

    pub fn policy_constraints(self, require: Option<u32>, inhibit_mapping: Option<u32>) -> Self {
        let pc = PolicyConstraints {
            require_explicit_policy: require,
            inhibit_policy_mapping: inhibit_mapping,
        };
        self.extension(POLICY_CONSTRAINTS, true, pc.to_der().unwrap())
    }

    pub fn inhibit_any_policy(self, skip: u32) -> Self {
        self.extension(INHIBIT_ANY_POLICY, true, skip.to_der().unwrap())
    }

    pub fn alt_names(self, names: &[GeneralName]) -> Self {
        let san = SubjectAltName::new(names.to_vec());
        self.extension(SUBJECT_ALT_NAME, false, san.to_der().unwrap())
    }

    pub fn dns_names(self, names: &[&str]) -> Self {
        let names: Vec<GeneralName> = names
            .iter()
            .map(|n| GeneralName::DnsName(n.to_string()))
            .collect();
        self.alt_names(&names)
    }

    pub fn name_constraints(self, permitted: &[GeneralName], excluded: &[GeneralName]) -> Self {
        let subtrees = |names: &[GeneralName]| {
            if names.is_empty() {
                None
            } else {
                Some(names.iter().cloned().map(GeneralSubtree::new).collect())
            }
        };
        let nc = NameConstraints {
            permitted_subtrees: subtrees(permitted),
            excluded_subtrees: subtrees(excluded),
        };
        self.extension(NAME_CONSTRAINTS, true, nc.to_der().unwrap())
    }

    pub fn build(mut self) -> Certificate {
        if !self.subject.matches(&self.issuer) {
            let aki = AuthorityKeyIdentifier {
                key_identifier: Some(OctetString::new(self.signer.clone()).unwrap()),
                ..Default::default()
            };
            self.extensions.push(
                Extension::new(AUTHORITY_KEY_IDENTIFIER, false, aki.to_der().unwrap()).unwrap(),
            );
        }
        let alg = AlgorithmIdentifierOwned {
            oid: ED25519,
            parameters: None,
        };
        let tbs = TbsCertificate {
            version: Version::V3,
            serial_number: Uint::new(&[1]).unwrap(),
            signature: alg.clone(),
            issuer: self.issuer,
            validity: Validity::new(
                Time::from_unix_secs(self.not_before).unwrap(),
                Time::from_unix_secs(self.not_after).unwrap(),
            ),
            subject: self.subject,
            subject_public_key_info: spki(&self.key),
            issuer_unique_id: None,
            subject_unique_id: None,
            extensions: if self.extensions.is_empty() {
                None
            } else {
                Some(self.extensions)
            },
        };
        let mut signature = self.signer;
        signature.extend_from_slice(&tbs.to_der().unwrap());
        Certificate {
            tbs_certificate: tbs,
            signature_algorithm: alg,
            signature: BitString::from_bytes(&signature).unwrap(),
        }
    }
}

/// Context anchored on `root`, evaluated at [`NOW`].
pub fn context_for(root: &Certificate) -> ValidationContext {
    ValidationContext::new()
        .with_time(Time::from_unix_secs(NOW).unwrap())
        .with_trust_anchor(TrustAnchor::from_certificate(root))
}

/// Validate `certs` (leaf first) and expect the call itself to succeed.
pub fn run(certs: Vec<Certificate>, context: ValidationContext) -> ValidationResult {
    let chain = CertificateChain::new(certs);
    PathValidator::with_backend(MockBackend)
        .validate(&chain, context)
        .unwrap()
}

/// Root CA, intermediate CA and leaf.
pub fn three_level(
    root: CertBuilder,
    intermediate: CertBuilder,
    leaf: CertBuilder,
) -> (Certificate, Certificate, Certificate) {
    let root = root.build();
    let intermediate = intermediate.issued_by(&root).build();
    let leaf = leaf.issued_by(&intermediate).build();
    (root, intermediate, leaf)
}

#[cfg(test)]
pub fn setup_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
