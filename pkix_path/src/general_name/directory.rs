// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use super::ConstraintResult;
use crate::certificate::name::Name;

/// A `directoryName`, compared RDN by RDN after canonicalization.
#[derive(Debug, Clone)]
pub struct DirectoryName {
    name: Name,
    canonical: Vec<Vec<(String, String)>>,
}

impl DirectoryName {
    pub fn new(name: Name) -> Self {
        let canonical = name.canonical_rdns();
        DirectoryName { name, canonical }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    /// `Narrows` when `other` extends `self` with further RDNs, `Widens` for
    /// the converse.
    pub fn constrains(&self, other: &DirectoryName) -> ConstraintResult {
        let a = &self.canonical;
        let b = &other.canonical;
        if a == b {
            ConstraintResult::Match
        } else if b.len() > a.len() && b[..a.len()] == a[..] {
            ConstraintResult::Narrows
        } else if a.len() > b.len() && a[..b.len()] == b[..] {
            ConstraintResult::Widens
        } else {
            ConstraintResult::SameType
        }
    }

    /// `base` is a leading run of this name's RDNs.
    pub fn is_within(&self, base: &DirectoryName) -> bool {
        matches!(
            self.constrains(base),
            ConstraintResult::Match | ConstraintResult::Widens
        )
    }
}

impl PartialEq for DirectoryName {
    fn eq(&self, other: &Self) -> bool {
        self.canonical == other.canonical
    }
}

impl Eq for DirectoryName {}

impl fmt::Display for DirectoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
