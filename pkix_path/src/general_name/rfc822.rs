// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

extern crate alloc;

use alloc::string::String;
use core::fmt;

use super::ConstraintResult;

/// An `rfc822Name`: a full mailbox, a host, or a `.domain`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rfc822Name(String);

impl Rfc822Name {
    pub fn new(name: &str) -> Self {
        // Local parts are case sensitive in theory; in practice CAs and
        // relying parties all fold them.
        Rfc822Name(name.to_ascii_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_mailbox(&self) -> bool {
        self.0.contains('@')
    }

    /// `Widens` when `self` is a domain covering the mailbox or host `other`.
    ///
    /// A bare host such as `example.com` covers mailboxes at that host but
    /// is reported as `SameType` against them, matching how constraint
    /// processing treats host-only entries.
    pub fn constrains(&self, other: &Rfc822Name) -> ConstraintResult {
        if self.0 == other.0 {
            ConstraintResult::Match
        } else if covers(&self.0, &other.0) {
            if other.is_mailbox() && !self.is_mailbox() && !self.0.starts_with('.') {
                ConstraintResult::SameType
            } else {
                ConstraintResult::Widens
            }
        } else if covers(&other.0, &self.0) {
            ConstraintResult::Narrows
        } else {
            ConstraintResult::SameType
        }
    }
}

fn covers(short: &str, long: &str) -> bool {
    if short.contains('@') || short.len() >= long.len() || !long.ends_with(short) {
        return false;
    }
    short.starts_with('.') || long.as_bytes()[long.len() - short.len() - 1] == b'@'
}

impl fmt::Display for Rfc822Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
