// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Certificate signature checks.

extern crate alloc;

use alloc::format;
use alloc::string::ToString;

use der::Encode;
use spki::SubjectPublicKeyInfoOwned;

use crate::certificate::Certificate;
use crate::crypto_backend::{CryptoBackend, SignatureAlgorithm};
use crate::error::{Error, Result, SignatureError};

/// `signatureAlgorithm` must repeat `tbsCertificate.signature` exactly,
/// parameters included (RFC 5280 §4.1.1.2).
pub fn check_algorithm_consistency(cert: &Certificate) -> Result<()> {
    let outer = &cert.signature_algorithm;
    let inner = &cert.tbs_certificate.signature;
    let outer_params = outer.parameters.as_ref().map(|p| p.to_der()).transpose()?;
    let inner_params = inner.parameters.as_ref().map(|p| p.to_der()).transpose()?;
    if outer.oid != inner.oid || outer_params != inner_params {
        return Err(Error::SignatureError(SignatureError::AlgorithmMismatch {
            cert_algo: outer.oid.to_string(),
            tbs_algo: inner.oid.to_string(),
        }));
    }
    Ok(())
}

/// Verify that `cert` was signed by the holder of `issuer_key`.
pub fn verify_signed_by(
    cert: &Certificate,
    issuer_key: &SubjectPublicKeyInfoOwned,
    backend: &dyn CryptoBackend,
) -> Result<()> {
    let algorithm = SignatureAlgorithm::resolve(&cert.signature_algorithm, issuer_key)?;
    let tbs = cert.tbs_der()?;
    log::trace!(
        "verifying {:?} signature on '{}' ({} byte TBS)",
        algorithm,
        cert.describe(),
        tbs.len()
    );
    backend
        .verify_signature(
            algorithm,
            &tbs,
            cert.signature_bytes(),
            issuer_key.subject_public_key.raw_bytes(),
        )
        .map_err(|e| {
            log::debug!("signature on '{}' rejected: {}", cert.describe(), e);
            match e {
                Error::SignatureError(_) | Error::AlgorithmError(_) => e,
                other => Error::validation(format!("signature backend: {}", other)),
            }
        })
}
