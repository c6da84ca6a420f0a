// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

extern crate alloc;

use alloc::collections::BTreeSet;
use alloc::format;

use const_oid::ObjectIdentifier;

use super::{handled, CertificateValidator, CheckContext, ValidatorKind};
use crate::certificate::Certificate;
use crate::error::{ConstraintError, Error, Result};
use crate::x509::extensions::{KeyUsage, EXTENDED_KEY_USAGE, KEY_USAGE, SUBJECT_ALT_NAME};

/// Issuing certificates must be allowed to sign certificates and CRLs.
///
/// Also takes ownership of extendedKeyUsage and subjectAltName criticality,
/// whatever the outcome.
#[derive(Debug, Default)]
pub struct KeyUsageValidator {
    position: usize,
    path_len: usize,
}

impl KeyUsageValidator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CertificateValidator for KeyUsageValidator {
    fn kind(&self) -> ValidatorKind {
        ValidatorKind::KeyUsage
    }

    fn start(&mut self, path_len: usize) {
        self.position = 0;
        self.path_len = path_len;
    }

    fn check(
        &mut self,
        _ctx: &CheckContext<'_>,
        cert: &Certificate,
        unhandled: &mut BTreeSet<ObjectIdentifier>,
    ) -> Result<()> {
        handled(unhandled, &[KEY_USAGE, EXTENDED_KEY_USAGE, SUBJECT_ALT_NAME]);
        self.position += 1;
        if self.position == self.path_len {
            return Ok(());
        }

        // Without the extension every usage is allowed (RFC 5280 §4.2.1.3).
        let Some((_, usage)) = cert.decode_extension::<KeyUsage>(&KEY_USAGE)? else {
            return Ok(());
        };
        if !usage.has(KeyUsage::KEY_CERT_SIGN | KeyUsage::CRL_SIGN) {
            return Err(Error::ConstraintError(ConstraintError::KeyUsageViolation(
                format!(
                    "'{}' asserts {} but issuing certificates need keyCertSign and cRLSign",
                    cert.describe(),
                    usage
                ),
            )));
        }
        Ok(())
    }
}
