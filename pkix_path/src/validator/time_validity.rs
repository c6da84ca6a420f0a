// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

extern crate alloc;

use alloc::collections::BTreeSet;
use alloc::format;

use const_oid::ObjectIdentifier;

use super::{CertificateValidator, CheckContext, ValidatorKind};
use crate::certificate::Certificate;
use crate::error::{Error, Result, TimeError};
use crate::time::Time;

/// Reference time must fall inside `[notBefore, notAfter]`.
#[derive(Debug)]
pub struct TimeValidator {
    time: Time,
}

impl TimeValidator {
    pub fn new(time: Time) -> Self {
        Self { time }
    }
}

impl CertificateValidator for TimeValidator {
    fn kind(&self) -> ValidatorKind {
        ValidatorKind::TimeValidity
    }

    fn check(
        &mut self,
        _ctx: &CheckContext<'_>,
        cert: &Certificate,
        _unhandled: &mut BTreeSet<ObjectIdentifier>,
    ) -> Result<()> {
        let validity = cert.validity();
        if !validity.is_well_formed() {
            return Err(Error::TimeError(TimeError::InvalidValidityPeriod {
                not_before: format!("{}", validity.not_before),
                not_after: format!("{}", validity.not_after),
            }));
        }
        if self.time.is_before(&validity.not_before) {
            log::debug!("'{}' not valid before {}", cert.describe(), validity.not_before);
            return Err(Error::not_yet_valid());
        }
        if self.time.is_after(&validity.not_after) {
            log::debug!("'{}' expired at {}", cert.describe(), validity.not_after);
            return Err(Error::expired());
        }
        Ok(())
    }
}
