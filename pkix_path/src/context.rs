// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Per-call validation settings.
//!
//! A [`ValidationContext`] is built for one [`PathValidator::validate`] call
//! and consumed by it, so validator state never leaks between runs.
//!
//! [`PathValidator::validate`]: crate::path::PathValidator::validate

extern crate alloc;

use alloc::boxed::Box;
use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use core::fmt;

use const_oid::ObjectIdentifier;

use crate::time::Time;
use crate::validator::{CertificateValidator, PolicyOptions, TrustAnchor};

/// Default upper bound on the number of certificates in a path.
pub const DEFAULT_MAX_CHAIN_DEPTH: usize = 10;

pub struct ValidationContext {
    pub(crate) time: Option<Time>,
    pub(crate) check_time: bool,
    pub(crate) policy: PolicyOptions,
    pub(crate) trust_anchors: Vec<TrustAnchor>,
    pub(crate) validators: Vec<Box<dyn CertificateValidator>>,
    pub(crate) max_chain_depth: usize,
}

impl Default for ValidationContext {
    fn default() -> Self {
        Self {
            time: None,
            check_time: true,
            policy: PolicyOptions::default(),
            trust_anchors: Vec::new(),
            validators: Vec::new(),
            max_chain_depth: DEFAULT_MAX_CHAIN_DEPTH,
        }
    }
}

impl ValidationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate as of `time` instead of the system clock.
    pub fn with_time(mut self, time: Time) -> Self {
        self.time = Some(time);
        self
    }

    /// Drop the validity-period check entirely.
    pub fn skip_time_validation(mut self) -> Self {
        self.check_time = false;
        self
    }

    pub fn require_explicit_policy(mut self) -> Self {
        self.policy.explicit_policy_required = true;
        self
    }

    pub fn inhibit_policy_mapping(mut self) -> Self {
        self.policy.policy_mapping_inhibited = true;
        self
    }

    pub fn inhibit_any_policy(mut self) -> Self {
        self.policy.any_policy_inhibited = true;
        self
    }

    /// Fail certificates whose critical certificatePolicies carry qualifiers.
    pub fn reject_policy_qualifiers(mut self) -> Self {
        self.policy.reject_qualifiers = true;
        self
    }

    /// Replace the user-initial-policy-set (anyPolicy by default).
    pub fn with_initial_policies<I>(mut self, policies: I) -> Self
    where
        I: IntoIterator<Item = ObjectIdentifier>,
    {
        self.policy.initial_policies = policies.into_iter().collect::<BTreeSet<_>>();
        self
    }

    pub fn with_trust_anchor(mut self, anchor: TrustAnchor) -> Self {
        self.trust_anchors.push(anchor);
        self
    }

    pub fn with_trust_anchors<I>(mut self, anchors: I) -> Self
    where
        I: IntoIterator<Item = TrustAnchor>,
    {
        self.trust_anchors.extend(anchors);
        self
    }

    /// Run an additional validator on every certificate. A validator whose
    /// kind duplicates a built-in one is ignored.
    pub fn with_validator<V>(mut self, validator: V) -> Self
    where
        V: CertificateValidator + 'static,
    {
        self.validators.push(Box::new(validator));
        self
    }

    pub fn with_max_chain_depth(mut self, depth: usize) -> Self {
        self.max_chain_depth = depth;
        self
    }

    pub fn time(&self) -> Option<&Time> {
        self.time.as_ref()
    }

    pub fn checks_time(&self) -> bool {
        self.check_time
    }

    pub fn policy_options(&self) -> &PolicyOptions {
        &self.policy
    }

    pub fn trust_anchors(&self) -> &[TrustAnchor] {
        &self.trust_anchors
    }

    pub fn max_chain_depth(&self) -> usize {
        self.max_chain_depth
    }
}

impl fmt::Debug for ValidationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kinds: Vec<_> = self.validators.iter().map(|v| v.kind()).collect();
        f.debug_struct("ValidationContext")
            .field("time", &self.time)
            .field("check_time", &self.check_time)
            .field("policy", &self.policy)
            .field("trust_anchors", &self.trust_anchors.len())
            .field("validators", &kinds)
            .field("max_chain_depth", &self.max_chain_depth)
            .finish()
    }
}
