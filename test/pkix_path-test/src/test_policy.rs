// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

use der::asn1::Any;
use der::{Encode, Tag};

use pkix_path::error::PolicyError;
use pkix_path::x509::extensions::CERTIFICATE_POLICIES;
use pkix_path::x509::oids::QT_CPS;
use pkix_path::x509::{PolicyInformation, PolicyQualifierInfo};
use pkix_path::{Error, PolicyTree, ValidationContext, ValidationResult, ValidatorKind};

use crate::common::{context_for, oid, run, setup_logger, three_level, CertBuilder};

const P1: &str = "1.3.6.1.4.1.55555.1.1";
const P2: &str = "1.3.6.1.4.1.55555.1.2";
/// anyPolicy
const ANY: &str = "2.5.29.32.0";

fn ca(name: &str, key: u8) -> CertBuilder {
    CertBuilder::new(name, &[key]).ca(None)
}

fn leaf() -> CertBuilder {
    CertBuilder::new("CN=Leaf", &[3])
}

fn validate_with(
    root: CertBuilder,
    intermediate: CertBuilder,
    leaf: CertBuilder,
    configure: impl FnOnce(ValidationContext) -> ValidationContext,
) -> ValidationResult {
    let (root, intermediate, leaf) = three_level(root, intermediate, leaf);
    run(vec![leaf, intermediate, root.clone()], configure(context_for(&root)))
}

fn policy_failures(result: &ValidationResult) -> Vec<isize> {
    result
        .failures_of(ValidatorKind::Policy)
        .map(|f| f.index)
        .collect()
}

/// Valid policies of the nodes at `depth`.
fn policies_at(tree: &PolicyTree, depth: usize) -> Vec<String> {
    tree.nodes_at_depth(depth)
        .into_iter()
        .filter_map(|id| tree.node(id))
        .map(|n| n.valid_policy().to_string())
        .collect()
}

#[test]
fn test_same_policy_throughout() {
    setup_logger();
    let result = validate_with(
        ca("CN=Root", 1).policies(&[P1]),
        ca("CN=Intermediate", 2).policies(&[P1]),
        leaf().policies(&[P1]),
        |ctx| ctx.require_explicit_policy(),
    );
    assert!(result.is_valid(), "{}", result);
    let tree = result.policy_tree().unwrap();
    assert!(tree.is_frozen());
    assert_eq!(tree.depth(), 3);
    assert_eq!(policies_at(tree, 3), vec![P1.to_string()]);
}

#[test]
fn test_any_policy_in_intermediate_passes_through() {
    setup_logger();
    let result = validate_with(
        ca("CN=Root", 1).policies(&[P1]),
        ca("CN=Intermediate", 2).policies(&[ANY]),
        leaf().policies(&[P1]),
        |ctx| ctx,
    );
    assert!(result.is_valid(), "{}", result);
    assert_eq!(policies_at(result.policy_tree().unwrap(), 3), vec![P1.to_string()]);
}

#[test]
fn test_inhibited_any_policy_empties_tree() {
    setup_logger();
    let result = validate_with(
        ca("CN=Root", 1).policies(&[P1]),
        ca("CN=Intermediate", 2).policies(&[ANY]),
        leaf().policies(&[P1]),
        |ctx| ctx.inhibit_any_policy().require_explicit_policy(),
    );
    assert!(result.policy_tree().is_none());
    assert_eq!(policy_failures(&result), vec![1, 0]);
}

#[test]
fn test_missing_leaf_policies_without_requirement() {
    setup_logger();
    let result = validate_with(
        ca("CN=Root", 1).policies(&[P1]),
        ca("CN=Intermediate", 2).policies(&[P1]),
        leaf(),
        |ctx| ctx,
    );
    assert!(result.is_valid(), "{}", result);
    assert!(result.policy_tree().is_none());
}

#[test]
fn test_missing_leaf_policies_with_requirement() {
    setup_logger();
    let result = validate_with(
        ca("CN=Root", 1).policies(&[P1]),
        ca("CN=Intermediate", 2).policies(&[P1]),
        leaf(),
        |ctx| ctx.require_explicit_policy(),
    );
    assert_eq!(policy_failures(&result), vec![0]);
    assert_eq!(
        result.failures()[0].cause,
        Some(Error::PolicyError(PolicyError::ExplicitPolicyRequired))
    );
}

#[test]
fn test_require_explicit_policy_from_certificate() {
    setup_logger();
    let result = validate_with(
        ca("CN=Root", 1).policies(&[P1]).policy_constraints(Some(0), None),
        ca("CN=Intermediate", 2),
        leaf(),
        |ctx| ctx,
    );
    assert_eq!(policy_failures(&result), vec![1, 0]);
}

#[test]
fn test_initial_policy_set_filters() {
    setup_logger();
    let wanted = validate_with(
        ca("CN=Root", 1).policies(&[P1, P2]),
        ca("CN=Intermediate", 2).policies(&[P1, P2]),
        leaf().policies(&[P1, P2]),
        |ctx| ctx.with_initial_policies([oid(P1)]),
    );
    assert!(wanted.is_valid(), "{}", wanted);
    assert_eq!(policies_at(wanted.policy_tree().unwrap(), 3), vec![P1.to_string()]);

    let unwanted = validate_with(
        ca("CN=Root", 1).policies(&[P1]),
        ca("CN=Intermediate", 2).policies(&[P1]),
        leaf().policies(&[P1]),
        |ctx| ctx.with_initial_policies([oid(P2)]).require_explicit_policy(),
    );
    assert!(unwanted.policy_tree().is_none());
    assert_eq!(policy_failures(&unwanted), vec![2, 1, 0]);
}

#[test]
fn test_initial_policy_through_any_policy_leaf() {
    setup_logger();
    let result = validate_with(
        ca("CN=Root", 1).policies(&[ANY]),
        ca("CN=Intermediate", 2).policies(&[ANY]),
        leaf().policies(&[ANY]),
        |ctx| ctx.with_initial_policies([oid(P1)]),
    );
    assert!(result.is_valid(), "{}", result);
    assert_eq!(policies_at(result.policy_tree().unwrap(), 3), vec![P1.to_string()]);
}

#[test]
fn test_policy_mapping() {
    setup_logger();
    let result = validate_with(
        ca("CN=Root", 1).policies(&[P1]),
        ca("CN=Intermediate", 2)
            .policies(&[P1])
            .policy_mappings(&[(P1, P2)]),
        leaf().policies(&[P2]),
        |ctx| ctx.require_explicit_policy(),
    );
    assert!(result.is_valid(), "{}", result);

    let tree = result.policy_tree().unwrap();
    let leaves = tree.nodes_at_depth(3);
    assert_eq!(leaves.len(), 1);
    let node = tree.node(leaves[0]).unwrap();
    assert_eq!(node.valid_policy(), oid(P2));
    let parent = tree.node(node.parent().unwrap()).unwrap();
    assert_eq!(parent.valid_policy(), oid(P1));
    assert!(parent.expected_policies().contains(&oid(P2)));
}

#[test]
fn test_policy_mapping_inhibited() {
    setup_logger();
    let result = validate_with(
        ca("CN=Root", 1).policies(&[P1]),
        ca("CN=Intermediate", 2)
            .policies(&[P1])
            .policy_mappings(&[(P1, P2)]),
        leaf().policies(&[P2]),
        |ctx| ctx.inhibit_policy_mapping(),
    );
    assert!(result.is_valid(), "{}", result);
    assert!(result.policy_tree().is_none());
}

#[test]
fn test_mapping_any_policy_is_rejected() {
    setup_logger();
    let result = validate_with(
        ca("CN=Root", 1).policies(&[P1]),
        ca("CN=Intermediate", 2)
            .policies(&[P1])
            .policy_mappings(&[(ANY, P2)]),
        leaf().policies(&[P2]),
        |ctx| ctx,
    );
    let failures: Vec<_> = result.failures_of(ValidatorKind::Policy).collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].index, 1);
    assert_eq!(
        failures[0].cause,
        Some(Error::PolicyError(PolicyError::AnyPolicyMapped))
    );
}

#[test]
fn test_qualifiers_in_critical_policies_rejected_on_request() {
    setup_logger();
    let info = PolicyInformation {
        policy_identifier: oid(P1),
        policy_qualifiers: Some(vec![PolicyQualifierInfo {
            policy_qualifier_id: QT_CPS,
            qualifier: Some(Any::new(Tag::Ia5String, b"https://ca.example/cps".to_vec()).unwrap()),
        }]),
    };
    let value = vec![info].to_der().unwrap();
    let make_leaf = || leaf().extension(CERTIFICATE_POLICIES, true, value.clone());

    let rejected = validate_with(
        ca("CN=Root", 1).policies(&[P1]),
        ca("CN=Intermediate", 2).policies(&[P1]),
        make_leaf(),
        |ctx| ctx.reject_policy_qualifiers(),
    );
    assert_eq!(policy_failures(&rejected), vec![0]);
    assert!(matches!(
        rejected.failures()[0].cause,
        Some(Error::PolicyError(PolicyError::QualifiersRejected(_)))
    ));

    let accepted = validate_with(
        ca("CN=Root", 1).policies(&[P1]),
        ca("CN=Intermediate", 2).policies(&[P1]),
        make_leaf(),
        |ctx| ctx,
    );
    assert!(accepted.is_valid(), "{}", accepted);
    let tree = accepted.policy_tree().unwrap();
    let leaf_node = tree.node(tree.nodes_at_depth(3)[0]).unwrap();
    assert_eq!(leaf_node.qualifiers().len(), 1);
    assert!(leaf_node.is_critical());
}

#[test]
fn test_inhibit_any_policy_from_certificate() {
    setup_logger();
    let chain_with = |skip: Option<u32>| {
        let root = ca("CN=Root", 1).policies(&[P1]).build();
        let mut ca1 = ca("CN=CA1", 2).policies(&[ANY]);
        if let Some(skip) = skip {
            ca1 = ca1.inhibit_any_policy(skip);
        }
        let ca1 = ca1.issued_by(&root).build();
        let ca2 = ca("CN=CA2", 4).policies(&[ANY]).issued_by(&ca1).build();
        let leaf = leaf().policies(&[P1]).issued_by(&ca2).build();
        run(
            vec![leaf, ca2, ca1, root.clone()],
            context_for(&root).require_explicit_policy(),
        )
    };

    let open = chain_with(None);
    assert!(open.is_valid(), "{}", open);

    // CA1 stops anyPolicy from counting below it, so CA2 contributes nothing.
    let inhibited = chain_with(Some(0));
    assert!(inhibited.policy_tree().is_none());
    assert_eq!(policy_failures(&inhibited), vec![1, 0]);
}

#[test]
fn test_inhibit_policy_mapping_from_certificate() {
    setup_logger();
    let result = validate_with(
        ca("CN=Root", 1)
            .policies(&[P1])
            .policy_constraints(None, Some(0)),
        ca("CN=Intermediate", 2)
            .policies(&[P1])
            .policy_mappings(&[(P1, P2)]),
        leaf().policies(&[P2]),
        |ctx| ctx.require_explicit_policy(),
    );
    assert!(result.policy_tree().is_none());
    assert_eq!(policy_failures(&result), vec![1, 0]);
}

#[test]
fn test_self_issued_rollover_keeps_any_policy() {
    setup_logger();
    let root = ca("CN=Root", 1).policies(&[P1]).build();
    // Same name as the root under a new key: self-issued, so anyPolicy still
    // counts even though the caller inhibited it.
    let rollover = ca("CN=Root", 4).policies(&[ANY]).issued_by(&root).build();
    let leaf = leaf().policies(&[P1]).issued_by(&rollover).build();
    let result = run(
        vec![leaf, rollover, root.clone()],
        context_for(&root)
            .inhibit_any_policy()
            .require_explicit_policy(),
    );
    assert!(result.is_valid(), "{}", result);
    assert_eq!(policies_at(result.policy_tree().unwrap(), 3), vec![P1.to_string()]);
}
