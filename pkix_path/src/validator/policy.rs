// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Certificate policy processing (RFC 5280 §6.1.3(d)-(f), §6.1.4(a)-(b),
//! (h)-(j) and §6.1.5(a)-(b), (g)).
//!
//! Each certificate is processed against a private copy of the committed
//! tree. The copy replaces the committed tree only when processing
//! succeeds; counters advance either way.

extern crate alloc;

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::format;
use alloc::vec::Vec;

use const_oid::ObjectIdentifier;

use super::{handled, CertificateValidator, CheckContext, ValidatorKind};
use crate::certificate::Certificate;
use crate::error::{Error, PolicyError, Result};
use crate::policy::{NodeId, PolicyTree};
use crate::x509::extensions::{
    CertificatePolicies, InhibitAnyPolicy, PolicyConstraints, PolicyMappings,
    PolicyQualifierInfo, CERTIFICATE_POLICIES, INHIBIT_ANY_POLICY, POLICY_CONSTRAINTS,
    POLICY_MAPPINGS,
};
use crate::x509::oids::ANY_POLICY;

/// Caller policy inputs (RFC 5280 §6.1.1(c), (e)-(g)).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyOptions {
    /// `{anyPolicy}` means no restriction.
    pub initial_policies: BTreeSet<ObjectIdentifier>,
    pub explicit_policy_required: bool,
    pub policy_mapping_inhibited: bool,
    pub any_policy_inhibited: bool,
    pub reject_qualifiers: bool,
}

impl Default for PolicyOptions {
    fn default() -> Self {
        let mut initial_policies = BTreeSet::new();
        initial_policies.insert(ANY_POLICY);
        Self {
            initial_policies,
            explicit_policy_required: false,
            policy_mapping_inhibited: false,
            any_policy_inhibited: false,
            reject_qualifiers: false,
        }
    }
}

impl PolicyOptions {
    fn initial_is_any(&self) -> bool {
        self.initial_policies.contains(&ANY_POLICY)
    }
}

#[derive(Debug)]
pub struct PolicyValidator {
    options: PolicyOptions,
    path_len: usize,
    /// Certificates processed so far; the current one is `index` after the
    /// increment in `check`.
    index: usize,
    explicit_policy: usize,
    policy_mapping: usize,
    inhibit_any_policy: usize,
    tree: Option<PolicyTree>,
}

impl PolicyValidator {
    pub fn new(options: PolicyOptions) -> Self {
        let mut validator = Self {
            options,
            path_len: 0,
            index: 0,
            explicit_policy: 0,
            policy_mapping: 0,
            inhibit_any_policy: 0,
            tree: Some(PolicyTree::new()),
        };
        validator.reset(0);
        validator
    }

    fn reset(&mut self, path_len: usize) {
        let initial = |inhibited: bool| if inhibited { 0 } else { path_len + 1 };
        self.path_len = path_len;
        self.index = 0;
        self.explicit_policy = initial(self.options.explicit_policy_required);
        self.policy_mapping = initial(self.options.policy_mapping_inhibited);
        self.inhibit_any_policy = initial(self.options.any_policy_inhibited);
        self.tree = Some(PolicyTree::new());
    }

    pub fn explicit_policy(&self) -> usize {
        self.explicit_policy
    }

    pub fn policy_mapping(&self) -> usize {
        self.policy_mapping
    }

    pub fn inhibit_any_policy(&self) -> usize {
        self.inhibit_any_policy
    }

    /// Working tree after the last certificate; `None` once it collapsed.
    pub fn tree(&self) -> Option<&PolicyTree> {
        self.tree.as_ref()
    }

    /// Run the tree-building steps for certificate `i` on a copy.
    fn process(&self, cert: &Certificate, i: usize) -> Result<Option<PolicyTree>> {
        let is_final = i == self.path_len;
        let Some(mut tree) = self.tree.as_ref().map(PolicyTree::copy_tree) else {
            // Still reject a malformed mapping on a path that has no tree.
            if !is_final {
                self.decode_mappings(cert)?;
            }
            return Ok(None);
        };

        let Some((critical, policies)) =
            cert.decode_extension::<CertificatePolicies>(&CERTIFICATE_POLICIES)?
        else {
            log::debug!("'{}' has no certificate policies; policy tree cleared", cert.describe());
            if !is_final {
                self.decode_mappings(cert)?;
            }
            return Ok(None);
        };

        self.add_policy_nodes(&mut tree, cert, i, critical, &policies)?;
        tree.prune(i)?;
        if tree.is_empty() {
            return Ok(None);
        }

        if !is_final {
            if let Some(mappings) = self.decode_mappings(cert)? {
                self.apply_mappings(&mut tree, i, &mappings)?;
                if tree.is_empty() {
                    return Ok(None);
                }
            }
        }

        if !self.options.initial_is_any() {
            self.remove_invalid_nodes(&mut tree, i)?;
            if tree.is_empty() {
                return Ok(None);
            }
        }

        if is_final && !self.options.initial_is_any() {
            self.rewrite_leaf_nodes(&mut tree, i)?;
            if tree.is_empty() {
                return Ok(None);
            }
        }

        Ok(Some(tree))
    }

    /// Steps (d)(1) and (d)(2): attach the asserted policies below depth `i-1`.
    fn add_policy_nodes(
        &self,
        tree: &mut PolicyTree,
        cert: &Certificate,
        i: usize,
        critical: bool,
        policies: &CertificatePolicies,
    ) -> Result<()> {
        let parents = tree.nodes_at_depth(i - 1);
        let mut any_qualifiers: Option<Vec<PolicyQualifierInfo>> = None;

        for info in policies {
            let qualifiers = info.qualifiers();
            if !qualifiers.is_empty() && critical && self.options.reject_qualifiers {
                return Err(Error::policy(PolicyError::QualifiersRejected(format!(
                    "{} in critical certificatePolicies of '{}'",
                    info.policy_identifier,
                    cert.describe()
                ))));
            }
            let policy = info.policy_identifier;
            if policy == ANY_POLICY {
                any_qualifiers = Some(qualifiers.to_vec());
                continue;
            }

            let expecting: Vec<NodeId> = parents
                .iter()
                .copied()
                .filter(|&p| expects(tree, p, &policy))
                .collect();
            let targets = if expecting.is_empty() {
                parents
                    .iter()
                    .copied()
                    .filter(|&p| expects(tree, p, &ANY_POLICY))
                    .collect()
            } else {
                expecting
            };
            for parent in targets {
                tree.add_child(parent, policy, qualifiers.to_vec(), critical, single(policy))?;
            }
        }

        let any_allowed = self.inhibit_any_policy > 0
            || (i < self.path_len && cert.is_self_issued());
        if let (Some(qualifiers), true) = (any_qualifiers, any_allowed) {
            for parent in parents {
                let Some(node) = tree.node(parent) else {
                    continue;
                };
                let present: BTreeSet<ObjectIdentifier> = node
                    .children()
                    .iter()
                    .filter_map(|&c| tree.node(c).map(|n| n.valid_policy()))
                    .collect();
                let missing: Vec<ObjectIdentifier> = node
                    .expected_policies()
                    .iter()
                    .filter(|p| !present.contains(p))
                    .copied()
                    .collect();
                for policy in missing {
                    tree.add_child(parent, policy, qualifiers.clone(), critical, single(policy))?;
                }
            }
        }
        Ok(())
    }

    fn decode_mappings(&self, cert: &Certificate) -> Result<Option<PolicyMappings>> {
        let Some((_, mappings)) = cert.decode_extension::<PolicyMappings>(&POLICY_MAPPINGS)? else {
            return Ok(None);
        };
        if mappings
            .iter()
            .any(|m| m.issuer_domain_policy == ANY_POLICY || m.subject_domain_policy == ANY_POLICY)
        {
            return Err(Error::policy(PolicyError::AnyPolicyMapped));
        }
        Ok(Some(mappings))
    }

    /// §6.1.4(b). A matched node's expected set becomes the set of subject
    /// policies mapped from its valid policy.
    fn apply_mappings(&self, tree: &mut PolicyTree, i: usize, mappings: &PolicyMappings) -> Result<()> {
        let mut mapped: BTreeMap<ObjectIdentifier, BTreeSet<ObjectIdentifier>> = BTreeMap::new();
        for m in mappings {
            mapped
                .entry(m.issuer_domain_policy)
                .or_default()
                .insert(m.subject_domain_policy);
        }

        for (issuer_policy, subject_policies) in mapped {
            let at_depth = tree.nodes_at_depth(i);
            let matching: Vec<NodeId> = at_depth
                .iter()
                .copied()
                .filter(|&id| tree.node(id).map(|n| n.valid_policy()) == Some(issuer_policy))
                .collect();

            if self.policy_mapping == 0 {
                for id in matching {
                    tree.remove_subtree(id)?;
                }
                tree.prune(i)?;
                continue;
            }

            if !matching.is_empty() {
                for id in matching {
                    tree.set_expected(id, subject_policies.clone())?;
                }
                continue;
            }

            let any_node = at_depth.iter().copied().find(|&id| {
                tree.node(id).map(|n| n.is_any_policy()).unwrap_or(false)
            });
            if let Some(any_id) = any_node {
                let (parent, qualifiers, critical) = match tree.node(any_id) {
                    Some(n) => (n.parent(), n.qualifiers().to_vec(), n.is_critical()),
                    None => continue,
                };
                if let Some(parent) = parent {
                    tree.add_child(parent, issuer_policy, qualifiers, critical, subject_policies)?;
                }
            }
        }
        Ok(())
    }

    /// Drop concrete policies hanging off an anyPolicy node that the caller
    /// did not ask for.
    fn remove_invalid_nodes(&self, tree: &mut PolicyTree, i: usize) -> Result<()> {
        let invalid: Vec<NodeId> = tree
            .valid_policy_node_set()
            .into_iter()
            .filter(|&id| {
                tree.node(id)
                    .map(|n| !self.options.initial_policies.contains(&n.valid_policy()))
                    .unwrap_or(false)
            })
            .collect();
        for id in invalid {
            if tree.node(id).is_some() {
                tree.remove_subtree(id)?;
            }
        }
        tree.prune(i)
    }

    /// §6.1.5(g)(iii)(3): turn a surviving anyPolicy leaf into the initial
    /// policies not yet present.
    fn rewrite_leaf_nodes(&self, tree: &mut PolicyTree, depth: usize) -> Result<()> {
        let represented: BTreeSet<ObjectIdentifier> = tree
            .valid_policy_node_set()
            .into_iter()
            .filter_map(|id| tree.node(id).map(|n| n.valid_policy()))
            .collect();
        let any_leaves: Vec<NodeId> = tree
            .nodes_at_depth(depth)
            .into_iter()
            .filter(|&id| tree.node(id).map(|n| n.is_any_policy()).unwrap_or(false))
            .collect();

        for leaf in any_leaves {
            let (parent, qualifiers, critical) = match tree.node(leaf) {
                Some(n) => (n.parent(), n.qualifiers().to_vec(), n.is_critical()),
                None => continue,
            };
            if let Some(parent) = parent {
                for policy in self.options.initial_policies.iter().copied() {
                    if !represented.contains(&policy) {
                        tree.add_child(parent, policy, qualifiers.clone(), critical, single(policy))?;
                    }
                }
            }
            tree.remove_subtree(leaf)?;
        }
        tree.prune(depth)
    }

    /// §6.1.4(h)-(j) between certificates, §6.1.5(a)-(b) after the last.
    fn update_counters(&mut self, cert: &Certificate, is_final: bool) -> Result<()> {
        let constraints = cert.decode_extension::<PolicyConstraints>(&POLICY_CONSTRAINTS)?;
        if is_final {
            self.explicit_policy = self.explicit_policy.saturating_sub(1);
            if let Some((_, pc)) = constraints {
                if let Some(require) = pc.require_explicit_policy {
                    self.explicit_policy = self.explicit_policy.min(require as usize);
                }
            }
            return Ok(());
        }

        if !cert.is_self_issued() {
            self.explicit_policy = self.explicit_policy.saturating_sub(1);
            self.policy_mapping = self.policy_mapping.saturating_sub(1);
            self.inhibit_any_policy = self.inhibit_any_policy.saturating_sub(1);
        }
        if let Some((_, pc)) = constraints {
            if let Some(require) = pc.require_explicit_policy {
                self.explicit_policy = self.explicit_policy.min(require as usize);
            }
            if let Some(inhibit) = pc.inhibit_policy_mapping {
                self.policy_mapping = self.policy_mapping.min(inhibit as usize);
            }
        }
        if let Some((_, skip)) = cert.decode_extension::<InhibitAnyPolicy>(&INHIBIT_ANY_POLICY)? {
            self.inhibit_any_policy = self.inhibit_any_policy.min(skip as usize);
        }
        Ok(())
    }
}

fn expects(tree: &PolicyTree, id: NodeId, policy: &ObjectIdentifier) -> bool {
    tree.node(id)
        .map(|n| n.expected_policies().contains(policy))
        .unwrap_or(false)
}

fn single(policy: ObjectIdentifier) -> BTreeSet<ObjectIdentifier> {
    let mut set = BTreeSet::new();
    set.insert(policy);
    set
}

impl CertificateValidator for PolicyValidator {
    fn kind(&self) -> ValidatorKind {
        ValidatorKind::Policy
    }

    fn start(&mut self, path_len: usize) {
        self.reset(path_len);
    }

    fn check(
        &mut self,
        _ctx: &CheckContext<'_>,
        cert: &Certificate,
        unhandled: &mut BTreeSet<ObjectIdentifier>,
    ) -> Result<()> {
        handled(
            unhandled,
            &[
                CERTIFICATE_POLICIES,
                POLICY_MAPPINGS,
                POLICY_CONSTRAINTS,
                INHIBIT_ANY_POLICY,
            ],
        );
        self.index += 1;
        let i = self.index;
        let is_final = i == self.path_len;

        let processed = self.process(cert, i);
        let explicit_before = self.explicit_policy;
        let counters = self.update_counters(cert, is_final);

        let tree = processed?;
        if tree.is_none() && self.tree.is_some() {
            log::debug!("policy tree became empty at certificate {}", i);
        }
        self.tree = tree;
        counters?;

        // §6.1.3(f) for this certificate, then the wrap-up check.
        if self.tree.is_none() && (explicit_before == 0 || (is_final && self.explicit_policy == 0)) {
            return Err(Error::policy(PolicyError::ExplicitPolicyRequired));
        }
        if let (true, Some(tree)) = (is_final, self.tree.as_ref()) {
            log::debug!("final policy tree:\n{}", tree);
        }
        Ok(())
    }

    fn policy_tree(&self) -> Option<PolicyTree> {
        self.tree.as_ref().map(|t| {
            let mut snapshot = t.copy_tree();
            snapshot.freeze();
            snapshot
        })
    }
}
