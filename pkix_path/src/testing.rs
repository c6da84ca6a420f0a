// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Certificate fixtures for unit tests.
//!
//! Signatures are fake: a certificate's signature is the signer's key bytes
//! followed by the DER TBSCertificate, which [`Concat`] checks.

extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;

use der::asn1::{BitString, Uint};
use der::Encode;
use spki::{AlgorithmIdentifierOwned, SubjectPublicKeyInfoOwned};

use crate::certificate::name::Name;
use crate::certificate::{Certificate, Extension, TbsCertificate, Version};
use crate::crypto_backend::{CryptoBackend, SignatureAlgorithm};
use crate::error::{Error, Result};
use crate::time::{Time, Validity};
use crate::x509::extensions::{BasicConstraints, AUTHORITY_KEY_IDENTIFIER, BASIC_CONSTRAINTS};
use crate::x509::oids::ED25519;
use crate::x509::AuthorityKeyIdentifier;

pub(crate) struct Concat;

impl CryptoBackend for Concat {
    fn verify_signature(
        &self,
        _algorithm: SignatureAlgorithm,
        message: &[u8],
        signature: &[u8],
        public_key: &[u8],
    ) -> Result<()> {
        let mut expected = public_key.to_vec();
        expected.extend_from_slice(message);
        if expected == signature {
            Ok(())
        } else {
            Err(Error::signature_failed())
        }
    }
}

pub(crate) fn key(bytes: &[u8]) -> SubjectPublicKeyInfoOwned {
    SubjectPublicKeyInfoOwned {
        algorithm: AlgorithmIdentifierOwned {
            oid: ED25519,
            parameters: None,
        },
        subject_public_key: BitString::from_bytes(bytes).unwrap(),
    }
}

pub(crate) fn ca_ext(path_len: Option<u32>) -> Extension {
    let bc = BasicConstraints {
        ca: true,
        path_len_constraint: path_len,
    };
    Extension::new(BASIC_CONSTRAINTS, true, bc.to_der().unwrap()).unwrap()
}

pub(crate) fn aki_ext() -> Extension {
    let aki = AuthorityKeyIdentifier {
        key_identifier: Some(der::asn1::OctetString::new(vec![1, 2, 3, 4]).unwrap()),
        ..Default::default()
    };
    Extension::new(AUTHORITY_KEY_IDENTIFIER, false, aki.to_der().unwrap()).unwrap()
}

/// Certificate `subject` issued by `issuer`, signed with `signer_key`.
pub(crate) fn issue(
    subject: &str,
    own_key: &[u8],
    issuer: &str,
    signer_key: &[u8],
    extensions: Vec<Extension>,
) -> Certificate {
    let alg = AlgorithmIdentifierOwned {
        oid: ED25519,
        parameters: None,
    };
    let tbs = TbsCertificate {
        version: Version::V3,
        serial_number: Uint::new(&[1]).unwrap(),
        signature: alg.clone(),
        issuer: Name::parse(issuer).unwrap(),
        validity: Validity::new(
            Time::from_unix_secs(1_000).unwrap(),
            Time::from_unix_secs(2_000_000_000).unwrap(),
        ),
        subject: Name::parse(subject).unwrap(),
        subject_public_key_info: key(own_key),
        issuer_unique_id: None,
        subject_unique_id: None,
        extensions: if extensions.is_empty() {
            None
        } else {
            Some(extensions)
        },
    };
    let mut sig = signer_key.to_vec();
    sig.extend_from_slice(&tbs.to_der().unwrap());
    Certificate {
        tbs_certificate: tbs,
        signature_algorithm: alg,
        signature: BitString::from_bytes(&sig).unwrap(),
    }
}

/// Root `CN=Root` with key `[1]` and a leaf `CN=Leaf` with key `[2]`.
pub(crate) fn root_and_leaf() -> (Certificate, Certificate) {
    let root = issue("CN=Root", &[1], "CN=Root", &[1], vec![ca_ext(None)]);
    let leaf = issue("CN=Leaf", &[2], "CN=Root", &[1], vec![aki_ext()]);
    (root, leaf)
}
