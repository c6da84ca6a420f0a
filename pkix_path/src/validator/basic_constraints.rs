// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

extern crate alloc;

use alloc::collections::BTreeSet;

use const_oid::ObjectIdentifier;

use super::{handled, CertificateValidator, CheckContext, ValidatorKind};
use crate::certificate::Certificate;
use crate::error::{ConstraintError, Error, Result};
use crate::x509::extensions::{BasicConstraints, BASIC_CONSTRAINTS};

/// CA flag and path length (RFC 5280 §6.1.4(k)-(m)).
///
/// Every certificate but the last must carry a critical basicConstraints
/// with `cA` set. `remaining` starts at the path length and drops by one
/// for each non-self-issued CA; a smaller `pathLenConstraint` caps it.
#[derive(Debug, Default)]
pub struct BasicConstraintsValidator {
    position: usize,
    path_len: usize,
    remaining: usize,
}

impl BasicConstraintsValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Path length budget left for the certificates below.
    pub fn remaining(&self) -> usize {
        self.remaining
    }
}

impl CertificateValidator for BasicConstraintsValidator {
    fn kind(&self) -> ValidatorKind {
        ValidatorKind::BasicConstraints
    }

    fn start(&mut self, path_len: usize) {
        self.position = 0;
        self.path_len = path_len;
        self.remaining = path_len;
    }

    fn check(
        &mut self,
        _ctx: &CheckContext<'_>,
        cert: &Certificate,
        unhandled: &mut BTreeSet<ObjectIdentifier>,
    ) -> Result<()> {
        handled(unhandled, &[BASIC_CONSTRAINTS]);
        self.position += 1;
        let is_final = self.position == self.path_len;

        let bc = cert.decode_extension::<BasicConstraints>(&BASIC_CONSTRAINTS)?;
        if let Some((_, ref value)) = bc {
            if value.path_len_constraint.is_some() && !value.ca {
                return Err(Error::ConstraintError(ConstraintError::PathLenWithoutCa));
            }
        }
        if is_final {
            return Ok(());
        }

        let (critical, value) =
            bc.ok_or(Error::ConstraintError(ConstraintError::MissingBasicConstraints))?;
        if !critical {
            return Err(Error::ConstraintError(
                ConstraintError::BasicConstraintsNotCritical,
            ));
        }
        if !value.ca {
            return Err(Error::ConstraintError(ConstraintError::NotCa));
        }

        if !cert.is_self_issued() {
            if self.remaining == 0 {
                return Err(Error::ConstraintError(ConstraintError::PathLengthExceeded));
            }
            self.remaining -= 1;
        }
        if let Some(limit) = value.path_len_constraint {
            self.remaining = self.remaining.min(limit as usize);
        }
        log::trace!(
            "basic constraints: '{}' ok, {} more CA(s) allowed",
            cert.describe(),
            self.remaining
        );
        Ok(())
    }
}
