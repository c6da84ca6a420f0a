// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

extern crate alloc;

use alloc::string::String;
use core::fmt;

use super::dns::suffix_relation;
use super::ConstraintResult;

/// A `uniformResourceIdentifier`.
///
/// Comparison only looks at the host part. A URI constraint is written as
/// a bare host (`host.example.com`) or a domain (`.example.com`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UriName {
    raw: String,
    host: Option<String>,
}

impl UriName {
    pub fn new(uri: &str) -> Self {
        UriName {
            raw: uri.into(),
            host: extract_host(uri),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Lower-cased host, keeping a leading `.` on constraint forms.
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    pub fn constrains(&self, other: &UriName) -> ConstraintResult {
        if self.raw == other.raw {
            return ConstraintResult::Match;
        }
        let (Some(a), Some(b)) = (self.host.as_deref(), other.host.as_deref()) else {
            return ConstraintResult::SameType;
        };
        let a_domain = a.starts_with('.');
        let b_domain = b.starts_with('.');
        let relation = suffix_relation(a.trim_start_matches('.'), b.trim_start_matches('.'));

        match (a_domain, b_domain, relation) {
            (false, false, ConstraintResult::Match) => ConstraintResult::Match,
            (false, false, _) => ConstraintResult::SameType,
            // Only the `.domain` side can be the coarser one.
            (true, false, ConstraintResult::Match | ConstraintResult::Widens) => {
                ConstraintResult::Widens
            }
            (false, true, ConstraintResult::Match | ConstraintResult::Narrows) => {
                ConstraintResult::Narrows
            }
            (true, true, r) => r,
            _ => ConstraintResult::SameType,
        }
    }
}

fn extract_host(uri: &str) -> Option<String> {
    let Some(pos) = uri.find("://") else {
        // Constraint form: a bare host or `.domain`.
        if uri.is_empty() || uri.contains(':') || uri.contains('/') {
            return None;
        }
        return Some(uri.to_ascii_lowercase());
    };
    let rest = &uri[pos + 3..];
    let authority = rest
        .split(|c| c == '/' || c == '?' || c == '#')
        .next()
        .unwrap_or("");
    let host_port = match authority.rfind('@') {
        Some(at) => &authority[at + 1..],
        None => authority,
    };
    let host = if let Some(literal) = host_port.strip_prefix('[') {
        literal.split(']').next().unwrap_or("")
    } else {
        host_port.split(':').next().unwrap_or("")
    };
    if host.is_empty() {
        None
    } else {
        Some(host.to_ascii_lowercase())
    }
}

impl fmt::Display for UriName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
