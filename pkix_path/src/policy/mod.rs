// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Certificate policy tree.

mod tree;

pub use tree::{NodeId, PolicyNode, PolicyTree, POLICY_TREE_NODE_LIMIT};
