// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Comparison algebra over general names.
//!
//! `a.constrains(b)` classifies how two names of one form relate:
//!
//! | result      | meaning                                              |
//! |-------------|------------------------------------------------------|
//! | `DiffType`  | the names are of different forms                     |
//! | `Match`     | the names are equivalent                             |
//! | `Narrows`   | see the per-form notes                               |
//! | `Widens`    | the converse of `Narrows`                            |
//! | `SameType`  | same form, no containment either way                 |
//!
//! The orientation of `Narrows`/`Widens` is not uniform across forms.
//! DNS, RFC 822 and URI names report `Widens` when the receiver is the
//! coarser name. Directory names, and a subnet compared with a bare
//! address, report `Narrows` when the receiver is the coarser one.
//! [`GeneralNameOption::is_within`] hides that difference and is what name
//! constraint processing uses.

mod directory;
mod dns;
mod ip;
mod opaque;
mod rfc822;
mod uri;

pub use directory::DirectoryName;
pub use dns::DnsName;
pub use ip::IpName;
pub use opaque::{NameValidity, OpaqueName, OpaqueNameBuilder};
pub use rfc822::Rfc822Name;
pub use uri::UriName;

extern crate alloc;

use alloc::vec::Vec;
use core::fmt;

use const_oid::ObjectIdentifier;

use crate::certificate::name::GeneralName;
use crate::error::Result;

/// Outcome of comparing two names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintResult {
    DiffType,
    Match,
    Narrows,
    Widens,
    SameType,
}

impl ConstraintResult {
    /// Swap `Narrows` and `Widens`, as seen from the other side.
    pub fn reverse(self) -> Self {
        match self {
            ConstraintResult::Narrows => ConstraintResult::Widens,
            ConstraintResult::Widens => ConstraintResult::Narrows,
            other => other,
        }
    }
}

impl fmt::Display for ConstraintResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConstraintResult::DiffType => "DIFF_TYPE",
            ConstraintResult::Match => "MATCH",
            ConstraintResult::Narrows => "NARROWS",
            ConstraintResult::Widens => "WIDENS",
            ConstraintResult::SameType => "SAME_TYPE",
        };
        f.write_str(s)
    }
}

/// Name form, used to group subtrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NameKind {
    OtherName,
    Rfc822,
    Dns,
    X400Address,
    Directory,
    EdiPartyName,
    Uri,
    Ip,
    RegisteredId,
}

impl fmt::Display for NameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NameKind::OtherName => "otherName",
            NameKind::Rfc822 => "rfc822Name",
            NameKind::Dns => "dNSName",
            NameKind::X400Address => "x400Address",
            NameKind::Directory => "directoryName",
            NameKind::EdiPartyName => "ediPartyName",
            NameKind::Uri => "uniformResourceIdentifier",
            NameKind::Ip => "iPAddress",
            NameKind::RegisteredId => "registeredID",
        };
        f.write_str(s)
    }
}

/// A general name prepared for comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneralNameOption {
    Dns(DnsName),
    Rfc822(Rfc822Name),
    Uri(UriName),
    Ip(IpName),
    Directory(DirectoryName),
    RegisteredId(OpaqueName<ObjectIdentifier>),
    OtherName(OpaqueName<Vec<u8>>),
    EdiPartyName(OpaqueName<Vec<u8>>),
    X400Address(OpaqueName<Vec<u8>>),
}

impl GeneralNameOption {
    pub fn kind(&self) -> NameKind {
        match self {
            GeneralNameOption::Dns(_) => NameKind::Dns,
            GeneralNameOption::Rfc822(_) => NameKind::Rfc822,
            GeneralNameOption::Uri(_) => NameKind::Uri,
            GeneralNameOption::Ip(_) => NameKind::Ip,
            GeneralNameOption::Directory(_) => NameKind::Directory,
            GeneralNameOption::RegisteredId(_) => NameKind::RegisteredId,
            GeneralNameOption::OtherName(_) => NameKind::OtherName,
            GeneralNameOption::EdiPartyName(_) => NameKind::EdiPartyName,
            GeneralNameOption::X400Address(_) => NameKind::X400Address,
        }
    }

    /// Classify `candidate` relative to `self`.
    ///
    /// Fails for two opaque names of the same form, which have no ordering.
    pub fn constrains(&self, candidate: &GeneralNameOption) -> Result<ConstraintResult> {
        use GeneralNameOption as G;
        match (self, candidate) {
            (G::Dns(a), G::Dns(b)) => Ok(a.constrains(b)),
            (G::Rfc822(a), G::Rfc822(b)) => Ok(a.constrains(b)),
            (G::Uri(a), G::Uri(b)) => Ok(a.constrains(b)),
            (G::Ip(a), G::Ip(b)) => Ok(a.constrains(b)),
            (G::Directory(a), G::Directory(b)) => Ok(a.constrains(b)),
            (G::RegisteredId(a), G::RegisteredId(b)) => a.constrains(b, self.kind()),
            (G::OtherName(a), G::OtherName(b))
            | (G::EdiPartyName(a), G::EdiPartyName(b))
            | (G::X400Address(a), G::X400Address(b)) => a.constrains(b, self.kind()),
            _ => Ok(ConstraintResult::DiffType),
        }
    }

    /// Whether `self` falls inside the subtree rooted at `base`.
    ///
    /// Names of another form are never within `base`.
    pub fn is_within(&self, base: &GeneralNameOption) -> Result<bool> {
        use GeneralNameOption as G;
        match (self, base) {
            (G::Ip(a), G::Ip(b)) => Ok(a.is_within(b)),
            (G::Directory(a), G::Directory(b)) => Ok(a.is_within(b)),
            _ => Ok(matches!(
                self.constrains(base)?,
                ConstraintResult::Match | ConstraintResult::Narrows
            )),
        }
    }

    /// Outcome of a caller-attached predicate; `None` for forms with
    /// built-in syntax rules.
    pub fn validity(&self) -> Option<&NameValidity> {
        match self {
            GeneralNameOption::RegisteredId(n) => Some(n.validity()),
            GeneralNameOption::OtherName(n)
            | GeneralNameOption::EdiPartyName(n)
            | GeneralNameOption::X400Address(n) => Some(n.validity()),
            _ => None,
        }
    }

    /// Convert a decoded name. `for_constraint` selects the address+mask
    /// reading of `iPAddress`.
    pub fn from_general_name(name: &GeneralName, for_constraint: bool) -> Result<Self> {
        Ok(match name {
            GeneralName::DnsName(s) => GeneralNameOption::Dns(DnsName::new(s)?),
            GeneralName::Rfc822Name(s) => GeneralNameOption::Rfc822(Rfc822Name::new(s)),
            GeneralName::Uri(s) => GeneralNameOption::Uri(UriName::new(s)),
            GeneralName::IpAddress(bytes) => {
                GeneralNameOption::Ip(IpName::from_bytes(bytes, for_constraint)?)
            }
            GeneralName::DirectoryName(n) => {
                GeneralNameOption::Directory(DirectoryName::new(n.clone()))
            }
            GeneralName::RegisteredId(oid) => {
                GeneralNameOption::RegisteredId(OpaqueName::new(*oid))
            }
            GeneralName::OtherName(raw) => GeneralNameOption::OtherName(OpaqueName::new(raw.clone())),
            GeneralName::EdiPartyName(raw) => {
                GeneralNameOption::EdiPartyName(OpaqueName::new(raw.clone()))
            }
            GeneralName::X400Address(raw) => {
                GeneralNameOption::X400Address(OpaqueName::new(raw.clone()))
            }
        })
    }
}

impl fmt::Display for GeneralNameOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeneralNameOption::Dns(n) => write!(f, "DNS:{}", n),
            GeneralNameOption::Rfc822(n) => write!(f, "email:{}", n),
            GeneralNameOption::Uri(n) => write!(f, "URI:{}", n),
            GeneralNameOption::Ip(n) => write!(f, "IP:{}", n),
            GeneralNameOption::Directory(n) => write!(f, "DirName:{}", n),
            GeneralNameOption::RegisteredId(n) => write!(f, "RegID:{}", n.value()),
            other => write!(f, "{}:<opaque>", other.kind()),
        }
    }
}
