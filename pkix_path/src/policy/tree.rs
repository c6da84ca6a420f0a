// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! The valid_policy_tree of RFC 5280 §6.1.2(a).
//!
//! Nodes live in an arena and refer to each other by [`NodeId`]. A removed
//! node leaves an empty slot behind; [`PolicyTree::copy_tree`] compacts.
//! Once [`PolicyTree::freeze`] has been called every mutating method fails
//! with [`PolicyError::TreeFrozen`].

extern crate alloc;

use alloc::collections::BTreeSet;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use const_oid::ObjectIdentifier;

use crate::error::{Error, PolicyError, Result};
use crate::x509::extensions::PolicyQualifierInfo;
use crate::x509::oids::ANY_POLICY;

pub type NodeId = usize;

/// Upper bound on arena slots. Mappings to several subject policies and
/// anyPolicy expansion multiply the node count at every depth.
pub const POLICY_TREE_NODE_LIMIT: usize = 10_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyNode {
    valid_policy: ObjectIdentifier,
    qualifiers: Vec<PolicyQualifierInfo>,
    critical: bool,
    expected: BTreeSet<ObjectIdentifier>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    depth: usize,
}

impl PolicyNode {
    pub fn valid_policy(&self) -> ObjectIdentifier {
        self.valid_policy
    }

    pub fn qualifiers(&self) -> &[PolicyQualifierInfo] {
        &self.qualifiers
    }

    pub fn is_critical(&self) -> bool {
        self.critical
    }

    pub fn expected_policies(&self) -> &BTreeSet<ObjectIdentifier> {
        &self.expected
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_any_policy(&self) -> bool {
        self.valid_policy == ANY_POLICY
    }
}

#[derive(Debug, Clone)]
pub struct PolicyTree {
    nodes: Vec<Option<PolicyNode>>,
    root: NodeId,
    frozen: bool,
}

impl Default for PolicyTree {
    fn default() -> Self {
        Self::new()
    }
}

impl PolicyTree {
    /// A single anyPolicy root at depth 0 expecting anyPolicy.
    pub fn new() -> Self {
        let mut expected = BTreeSet::new();
        expected.insert(ANY_POLICY);
        PolicyTree {
            nodes: vec![Some(PolicyNode {
                valid_policy: ANY_POLICY,
                qualifiers: Vec::new(),
                critical: false,
                expected,
                parent: None,
                children: Vec::new(),
                depth: 0,
            })],
            root: 0,
            frozen: false,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> Option<&PolicyNode> {
        self.nodes.get(id).and_then(|slot| slot.as_ref())
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut PolicyNode> {
        self.nodes
            .get_mut(id)
            .and_then(|slot| slot.as_mut())
            .ok_or(Error::policy(PolicyError::NodeNotFound(id)))
    }

    fn ensure_mutable(&self) -> Result<()> {
        if self.frozen {
            return Err(Error::policy(PolicyError::TreeFrozen));
        }
        Ok(())
    }

    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Live nodes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &PolicyNode)> {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(id, slot)| slot.as_ref().map(|n| (id, n)))
    }

    /// True once the root has lost all of its children.
    pub fn is_empty(&self) -> bool {
        self.node(self.root)
            .map(|root| root.children.is_empty())
            .unwrap_or(true)
    }

    /// Greatest depth of any live node.
    pub fn depth(&self) -> usize {
        self.iter().map(|(_, n)| n.depth).max().unwrap_or(0)
    }

    pub fn nodes_at_depth(&self, depth: usize) -> Vec<NodeId> {
        self.iter()
            .filter(|(_, n)| n.depth == depth)
            .map(|(id, _)| id)
            .collect()
    }

    pub fn add_child(
        &mut self,
        parent: NodeId,
        valid_policy: ObjectIdentifier,
        qualifiers: Vec<PolicyQualifierInfo>,
        critical: bool,
        expected: BTreeSet<ObjectIdentifier>,
    ) -> Result<NodeId> {
        self.ensure_mutable()?;
        let id = self.nodes.len();
        if id >= POLICY_TREE_NODE_LIMIT {
            log::error!("policy tree reached {} nodes", POLICY_TREE_NODE_LIMIT);
            return Err(Error::policy(PolicyError::TreeTooLarge {
                limit: POLICY_TREE_NODE_LIMIT,
            }));
        }
        let parent_node = self.node_mut(parent)?;
        parent_node.children.push(id);
        let depth = parent_node.depth + 1;
        self.nodes.push(Some(PolicyNode {
            valid_policy,
            qualifiers,
            critical,
            expected,
            parent: Some(parent),
            children: Vec::new(),
            depth,
        }));
        Ok(id)
    }

    /// Replace the expected policy set of `id`.
    pub fn set_expected(&mut self, id: NodeId, expected: BTreeSet<ObjectIdentifier>) -> Result<()> {
        self.ensure_mutable()?;
        self.node_mut(id)?.expected = expected;
        Ok(())
    }

    /// Detach `id` from its parent and drop it with all descendants.
    pub fn remove_subtree(&mut self, id: NodeId) -> Result<()> {
        self.ensure_mutable()?;
        if id == self.root {
            return Err(Error::internal("the root policy node cannot be removed"));
        }
        let parent = self.node_mut(id)?.parent;
        if let Some(parent) = parent {
            self.node_mut(parent)?.children.retain(|&c| c != id);
        }
        let mut pending = vec![id];
        while let Some(next) = pending.pop() {
            if let Some(node) = self.nodes.get_mut(next).and_then(|slot| slot.take()) {
                pending.extend(node.children);
            }
        }
        Ok(())
    }

    /// Drop every childless non-root node shallower than `depth`, repeating
    /// until each remaining branch reaches `depth`.
    pub fn prune(&mut self, depth: usize) -> Result<()> {
        self.ensure_mutable()?;
        for d in (1..depth).rev() {
            let dead: Vec<NodeId> = self
                .iter()
                .filter(|(_, n)| n.depth == d && n.children.is_empty())
                .map(|(id, _)| id)
                .collect();
            for id in dead {
                self.remove_subtree(id)?;
            }
        }
        Ok(())
    }

    /// Compacted, mutable copy. The source is left untouched.
    pub fn copy_tree(&self) -> PolicyTree {
        let mut nodes: Vec<Option<PolicyNode>> = Vec::new();
        let mut remap: Vec<Option<NodeId>> = vec![None; self.nodes.len()];
        let mut queue = alloc::collections::VecDeque::new();
        queue.push_back(self.root);
        while let Some(old) = queue.pop_front() {
            let Some(node) = self.node(old) else {
                continue;
            };
            remap[old] = Some(nodes.len());
            let mut copy = node.clone();
            copy.children.clear();
            copy.parent = node.parent.and_then(|p| remap[p]);
            nodes.push(Some(copy));
            queue.extend(node.children.iter().copied());
        }
        // Parents are always copied before their children.
        for new_id in 0..nodes.len() {
            let parent = nodes[new_id].as_ref().and_then(|n| n.parent);
            if let Some(Some(p)) = parent.and_then(|p| nodes.get_mut(p)) {
                p.children.push(new_id);
            }
        }
        PolicyTree {
            nodes,
            root: 0,
            frozen: false,
        }
    }

    pub fn leaves(&self) -> Vec<NodeId> {
        self.iter()
            .filter(|(_, n)| n.children.is_empty())
            .map(|(id, _)| id)
            .collect()
    }

    /// Nodes naming a concrete policy whose parent is an anyPolicy node
    /// (RFC 5280 §6.1.5(g)(iii)(1)).
    pub fn valid_policy_node_set(&self) -> Vec<NodeId> {
        self.iter()
            .filter(|(_, n)| {
                !n.is_any_policy()
                    && n
                        .parent
                        .and_then(|p| self.node(p))
                        .map(|p| p.is_any_policy())
                        .unwrap_or(false)
            })
            .map(|(id, _)| id)
            .collect()
    }

    /// Policies the CAs in the path vouch for. `{anyPolicy}` when an
    /// anyPolicy node survives at the deepest level.
    pub fn authority_constrained_policies(&self) -> BTreeSet<ObjectIdentifier> {
        let depth = self.depth();
        if depth > 0 && self.nodes_at_depth(depth).iter().any(|&id| {
            self.node(id).map(|n| n.is_any_policy()).unwrap_or(false)
        }) {
            let mut any = BTreeSet::new();
            any.insert(ANY_POLICY);
            return any;
        }
        self.valid_policy_node_set()
            .into_iter()
            .filter_map(|id| self.node(id).map(|n| n.valid_policy))
            .collect()
    }

    fn fmt_node(&self, f: &mut fmt::Formatter<'_>, id: NodeId) -> fmt::Result {
        if let Some(node) = self.node(id) {
            for _ in 0..node.depth {
                f.write_str("  ")?;
            }
            write!(f, "{}", node.valid_policy)?;
            if node.critical {
                f.write_str(" (critical)")?;
            }
            f.write_str(" -> {")?;
            for (i, oid) in node.expected.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}", oid)?;
            }
            f.write_str("}\n")?;
            for &child in &node.children {
                self.fmt_node(f, child)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for PolicyTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_node(f, self.root)
    }
}
