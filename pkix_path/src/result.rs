// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

extern crate alloc;

use alloc::vec::Vec;
use core::fmt;

use crate::certificate::Certificate;
use crate::policy::PolicyTree;
use crate::validator::{ValidatorFailure, ValidatorKind};

/// Outcome of a completed validation run.
///
/// A run that got this far always produces a result; whether the path is
/// acceptable is decided by [`is_valid`](Self::is_valid).
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub(crate) policy_tree: Option<PolicyTree>,
    pub(crate) leaf: Certificate,
    pub(crate) failures: Vec<ValidatorFailure>,
}

impl ValidationResult {
    /// No validator recorded a failure.
    pub fn is_valid(&self) -> bool {
        self.failures.is_empty()
    }

    /// Frozen valid policy tree, `None` when policy processing pruned it
    /// away.
    pub fn policy_tree(&self) -> Option<&PolicyTree> {
        self.policy_tree.as_ref()
    }

    pub fn leaf(&self) -> &Certificate {
        &self.leaf
    }

    /// Failures in the order they were recorded: trust anchor search first,
    /// then certificates from the anchor side to the leaf.
    pub fn failures(&self) -> &[ValidatorFailure] {
        &self.failures
    }

    pub fn failures_of(&self, kind: ValidatorKind) -> impl Iterator<Item = &ValidatorFailure> {
        self.failures.iter().filter(move |f| f.kind == kind)
    }

    pub fn into_failures(self) -> Vec<ValidatorFailure> {
        self.failures
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            return write!(f, "path to '{}' is valid", self.leaf.describe());
        }
        writeln!(
            f,
            "path to '{}' failed with {} error(s):",
            self.leaf.describe(),
            self.failures.len()
        )?;
        for failure in &self.failures {
            writeln!(f, "  {}", failure)?;
        }
        Ok(())
    }
}
