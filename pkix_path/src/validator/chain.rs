// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Issuer linkage between adjacent certificates.
//!
//! Checking certificate `i` means checking the certificate it issued, one
//! step toward the leaf: issuer name and unique ID, the authority key
//! identifier, the algorithm fields and the signature itself.

extern crate alloc;

use alloc::collections::BTreeSet;
use alloc::string::ToString;

use const_oid::ObjectIdentifier;

use super::{handled, CertificateValidator, CheckContext, ValidatorKind};
use crate::certificate::Certificate;
use crate::error::{ChainError, Error, Result};
use crate::x509::extensions::AUTHORITY_KEY_IDENTIFIER;
use crate::x509::signature::{check_algorithm_consistency, verify_signed_by};

#[derive(Debug, Default)]
pub struct ChainValidator {
    position: usize,
}

impl ChainValidator {
    pub fn new() -> Self {
        Self::default()
    }

    fn check_child(ctx: &CheckContext<'_>, issuer: &Certificate, child: &Certificate) -> Result<()> {
        if !child.issuer().matches(issuer.subject()) {
            return Err(Error::ChainError(ChainError::IssuerMismatch {
                issuer: child.issuer().to_string(),
                subject: issuer.subject().to_string(),
            }));
        }
        if child.tbs_certificate.issuer_unique_id != issuer.tbs_certificate.subject_unique_id {
            return Err(Error::ChainError(ChainError::UniqueIdMismatch));
        }
        if !child.is_self_issued() && child.extension(&AUTHORITY_KEY_IDENTIFIER).is_none() {
            return Err(Error::ChainError(ChainError::MissingAuthorityKeyIdentifier));
        }
        check_algorithm_consistency(child)?;
        verify_signed_by(child, issuer.public_key_info(), ctx.backend)
    }
}

impl CertificateValidator for ChainValidator {
    fn kind(&self) -> ValidatorKind {
        ValidatorKind::Chain
    }

    fn start(&mut self, _path_len: usize) {
        self.position = 0;
    }

    fn check(
        &mut self,
        ctx: &CheckContext<'_>,
        cert: &Certificate,
        unhandled: &mut BTreeSet<ObjectIdentifier>,
    ) -> Result<()> {
        handled(unhandled, &[AUTHORITY_KEY_IDENTIFIER]);
        let index = ctx.chain_index(self.position)?;
        self.position += 1;

        if index > 0 {
            let child = ctx
                .chain
                .get(index - 1)
                .ok_or_else(|| Error::internal("missing child certificate"))?;
            log::trace!("chain: '{}' -> '{}'", cert.describe(), child.describe());
            Self::check_child(ctx, cert, child)?;
        }
        cert.check_duplicate_extensions()
    }
}
