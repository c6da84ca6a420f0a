// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

extern crate alloc;

use alloc::string::String;
use core::fmt;

use super::ConstraintResult;
use crate::error::{Error, NameError, Result};

/// A `dNSName`, stored lower-cased.
///
/// A leading `.` (`.example.com`) matches only proper subdomains. The empty
/// name is the root of the whole DNS tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DnsName(String);

impl DnsName {
    pub fn new(name: &str) -> Result<Self> {
        if !name.is_ascii() {
            return Err(Error::NameError(NameError::InvalidDnsName(name.into())));
        }
        let body = name.strip_prefix('.').unwrap_or(name);
        let labels_ok = body.is_empty()
            || body.split('.').all(|label| {
                !label.is_empty()
                    && label
                        .bytes()
                        .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'*' || b == b'_')
            });
        if !labels_ok {
            return Err(Error::NameError(NameError::InvalidDnsName(name.into())));
        }
        Ok(DnsName(name.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `Widens` when `self` is an ancestor domain of `other`.
    pub fn constrains(&self, other: &DnsName) -> ConstraintResult {
        suffix_relation(&self.0, &other.0)
    }
}

/// Label-aligned suffix comparison shared by DNS and URI hosts.
pub(crate) fn suffix_relation(a: &str, b: &str) -> ConstraintResult {
    if a == b {
        ConstraintResult::Match
    } else if is_domain_suffix(a, b) {
        ConstraintResult::Widens
    } else if is_domain_suffix(b, a) {
        ConstraintResult::Narrows
    } else {
        ConstraintResult::SameType
    }
}

fn is_domain_suffix(short: &str, long: &str) -> bool {
    if short.len() >= long.len() || !long.ends_with(short) {
        return false;
    }
    if short.is_empty() || short.starts_with('.') {
        return true;
    }
    long.as_bytes()[long.len() - short.len() - 1] == b'.'
}

impl fmt::Display for DnsName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
