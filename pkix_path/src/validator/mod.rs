// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Per-certificate validators.
//!
//! Each validator is a small state machine. [`PathValidator`] calls
//! [`CertificateValidator::start`] once with the path length and then
//! [`CertificateValidator::check`] once per certificate, trust-anchor side
//! first. A validator removes the critical extension OIDs it understands
//! from the `unhandled` set it is handed; whatever is left after every
//! validator has run is fatal.
//!
//! [`PathValidator`]: crate::path::PathValidator

extern crate alloc;

use alloc::collections::BTreeSet;
use alloc::string::String;
use core::fmt;

use const_oid::ObjectIdentifier;

use crate::certificate::Certificate;
use crate::chain::CertificateChain;
use crate::crypto_backend::CryptoBackend;
use crate::error::{Error, Result};
use crate::policy::PolicyTree;

mod basic_constraints;
mod chain;
mod key_usage;
mod name_constraints;
mod policy;
mod time_validity;
mod trust_anchor;

pub use basic_constraints::BasicConstraintsValidator;
pub use chain::ChainValidator;
pub use key_usage::KeyUsageValidator;
pub use name_constraints::{NameConstraintsValidator, NAME_CONSTRAINT_WORK_LIMIT};
pub use policy::{PolicyOptions, PolicyValidator};
pub use time_validity::TimeValidator;
pub use trust_anchor::{TrustAnchor, TrustAnchorValidator};

/// Chain index reported for failures of the trust anchor search.
pub const TRUST_ANCHOR_INDEX: isize = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ValidatorKind {
    Chain,
    BasicConstraints,
    KeyUsage,
    TimeValidity,
    NameConstraints,
    Policy,
    TrustAnchor,
    /// Caller-supplied validator, identified by name.
    Custom(&'static str),
}

impl fmt::Display for ValidatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidatorKind::Chain => f.write_str("chain"),
            ValidatorKind::BasicConstraints => f.write_str("basic-constraints"),
            ValidatorKind::KeyUsage => f.write_str("key-usage"),
            ValidatorKind::TimeValidity => f.write_str("time-validity"),
            ValidatorKind::NameConstraints => f.write_str("name-constraints"),
            ValidatorKind::Policy => f.write_str("policy"),
            ValidatorKind::TrustAnchor => f.write_str("trust-anchor"),
            ValidatorKind::Custom(name) => write!(f, "custom:{}", name),
        }
    }
}

/// Shared, read-only inputs for one validation run.
pub struct CheckContext<'a> {
    pub chain: &'a CertificateChain,
    pub backend: &'a dyn CryptoBackend,
}

impl<'a> CheckContext<'a> {
    /// Chain index of the certificate at `position` in processing order.
    pub fn chain_index(&self, position: usize) -> Result<usize> {
        self.chain
            .len()
            .checked_sub(position + 1)
            .ok_or_else(|| Error::internal("validator ran past the end of the chain"))
    }
}

pub trait CertificateValidator {
    fn kind(&self) -> ValidatorKind;

    fn start(&mut self, _path_len: usize) {}

    fn check(
        &mut self,
        ctx: &CheckContext<'_>,
        cert: &Certificate,
        unhandled: &mut BTreeSet<ObjectIdentifier>,
    ) -> Result<()>;

    /// Final policy tree, for the one validator that builds it.
    fn policy_tree(&self) -> Option<PolicyTree> {
        None
    }
}

/// One recorded problem. `index` is the chain index (0 = leaf), or
/// [`TRUST_ANCHOR_INDEX`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorFailure {
    pub kind: ValidatorKind,
    pub message: String,
    pub index: isize,
    pub cause: Option<Error>,
}

impl ValidatorFailure {
    pub fn new(kind: ValidatorKind, index: isize, cause: Error) -> Self {
        Self {
            kind,
            message: alloc::format!("{}", cause),
            index,
            cause: Some(cause),
        }
    }
}

impl fmt::Display for ValidatorFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] certificate {}: {}", self.kind, self.index, self.message)
    }
}

/// Marks `oids` as handled.
pub(crate) fn handled(unhandled: &mut BTreeSet<ObjectIdentifier>, oids: &[ObjectIdentifier]) {
    for oid in oids {
        unhandled.remove(oid);
    }
}
