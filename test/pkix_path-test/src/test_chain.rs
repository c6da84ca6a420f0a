// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

use pkix_path::error::{ChainError, ConstraintError, ExtensionError};
use pkix_path::validator::TRUST_ANCHOR_INDEX;
use pkix_path::x509::KeyUsage;
use pkix_path::{
    CertificateChain, CertificateValidator, CheckContext, Error, PathValidator, ValidationContext,
    ValidatorKind,
};

use crate::common::{context_for, oid, run, setup_logger, three_level, CertBuilder, MockBackend};

fn ca(name: &str, key: u8) -> CertBuilder {
    CertBuilder::new(name, &[key]).ca(None)
}

#[test]
fn test_three_level_chain_is_valid() {
    setup_logger();
    let (root, intermediate, leaf) = three_level(
        ca("CN=Root", 1),
        ca("CN=Intermediate", 2),
        CertBuilder::new("CN=Leaf", &[3]),
    );
    let result = run(vec![leaf.clone(), intermediate, root.clone()], context_for(&root));
    assert!(result.is_valid(), "{}", result);
    assert_eq!(result.leaf(), &leaf);
}

#[test]
fn test_missing_basic_constraints_on_intermediate() {
    setup_logger();
    let (root, intermediate, leaf) = three_level(
        ca("CN=Root", 1),
        CertBuilder::new("CN=Intermediate", &[2]),
        CertBuilder::new("CN=Leaf", &[3]),
    );
    let result = run(vec![leaf, intermediate, root.clone()], context_for(&root));
    assert_eq!(result.failures().len(), 1);
    let failure = &result.failures()[0];
    assert_eq!(failure.kind, ValidatorKind::BasicConstraints);
    assert_eq!(failure.index, 1);
    assert_eq!(
        failure.cause,
        Some(Error::ConstraintError(ConstraintError::MissingBasicConstraints))
    );
}

#[test]
fn test_root_without_basic_constraints() {
    setup_logger();
    let root = CertBuilder::new("CN=Root", &[1]).build();
    let leaf = CertBuilder::new("CN=Leaf", &[3]).issued_by(&root).build();
    let result = run(vec![leaf, root.clone()], context_for(&root));
    assert!(!result.is_valid());
    assert_eq!(result.failures().len(), 1);
    assert_eq!(result.failures()[0].kind, ValidatorKind::BasicConstraints);
    assert_eq!(result.failures()[0].index, 1);
}

#[test]
fn test_path_length_exceeded() {
    setup_logger();
    let (root, intermediate, leaf) = three_level(
        CertBuilder::new("CN=Root", &[1]).ca(Some(0)),
        ca("CN=Intermediate", 2),
        CertBuilder::new("CN=Leaf", &[3]),
    );
    let result = run(vec![leaf, intermediate, root.clone()], context_for(&root));
    let failures: Vec<_> = result.failures_of(ValidatorKind::BasicConstraints).collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].index, 1);
    assert_eq!(
        failures[0].cause,
        Some(Error::ConstraintError(ConstraintError::PathLengthExceeded))
    );
}

#[test]
fn test_intermediate_without_cert_sign_usage() {
    setup_logger();
    let (root, intermediate, leaf) = three_level(
        ca("CN=Root", 1),
        ca("CN=Intermediate", 2).key_usage(KeyUsage::DIGITAL_SIGNATURE),
        CertBuilder::new("CN=Leaf", &[3]),
    );
    let result = run(vec![leaf, intermediate, root.clone()], context_for(&root));
    let failures: Vec<_> = result.failures_of(ValidatorKind::KeyUsage).collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].index, 1);
}

#[test]
fn test_wrong_signer_is_a_chain_failure() {
    setup_logger();
    let root = ca("CN=Root", 1).build();
    let intermediate = ca("CN=Intermediate", 2).issued_by(&root).build();
    // Names the intermediate as issuer but is signed with another key.
    let impostor = ca("CN=Intermediate", 9).build();
    let leaf = CertBuilder::new("CN=Leaf", &[3]).issued_by(&impostor).build();

    let result = run(vec![leaf, intermediate, root.clone()], context_for(&root));
    let failures: Vec<_> = result.failures_of(ValidatorKind::Chain).collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].index, 1);
}

#[test]
fn test_failures_from_several_certificates_are_all_kept() {
    setup_logger();
    let (root, intermediate, leaf) = three_level(
        ca("CN=Root", 1),
        CertBuilder::new("CN=Intermediate", &[2]).key_usage(KeyUsage::DIGITAL_SIGNATURE),
        CertBuilder::new("CN=Leaf", &[3]).validity(1_000, 1_500),
    );
    let result = run(vec![leaf, intermediate, root.clone()], context_for(&root));
    let seen: Vec<(ValidatorKind, isize)> =
        result.failures().iter().map(|f| (f.kind, f.index)).collect();
    assert_eq!(
        seen,
        vec![
            (ValidatorKind::BasicConstraints, 1),
            (ValidatorKind::KeyUsage, 1),
            (ValidatorKind::TimeValidity, 0),
        ]
    );
}

#[test]
fn test_no_trust_anchor() {
    setup_logger();
    let (root, intermediate, leaf) = three_level(
        ca("CN=Root", 1),
        ca("CN=Intermediate", 2),
        CertBuilder::new("CN=Leaf", &[3]),
    );
    let stranger = ca("CN=Stranger", 7).build();
    let result = run(vec![leaf, intermediate, root], context_for(&stranger));
    assert_eq!(result.failures().len(), 1);
    assert_eq!(result.failures()[0].index, TRUST_ANCHOR_INDEX);
    assert_eq!(
        result.failures()[0].cause,
        Some(Error::ChainError(ChainError::NoTrustedIssuer))
    );
}

#[test]
fn test_anchor_without_root_in_chain() {
    setup_logger();
    let (root, intermediate, leaf) = three_level(
        ca("CN=Root", 1),
        ca("CN=Intermediate", 2),
        CertBuilder::new("CN=Leaf", &[3]),
    );
    let result = run(vec![leaf, intermediate], context_for(&root));
    assert!(result.is_valid(), "{}", result);
}

#[test]
fn test_unhandled_critical_extension_aborts() {
    setup_logger();
    let root = ca("CN=Root", 1).build();
    let leaf = CertBuilder::new("CN=Leaf", &[3])
        .extension(oid("1.3.6.1.4.1.99999.1"), true, vec![0x05, 0x00])
        .issued_by(&root)
        .build();
    let chain = CertificateChain::new(vec![leaf, root.clone()]);
    let outcome = PathValidator::with_backend(MockBackend).validate(&chain, context_for(&root));
    match outcome {
        Err(Error::ExtensionError(ExtensionError::UnhandledCriticalExtension { index, oid })) => {
            assert_eq!(index, 0);
            assert_eq!(oid, "1.3.6.1.4.1.99999.1");
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
}

#[test]
fn test_time_check_can_be_skipped() {
    setup_logger();
    let root = ca("CN=Root", 1).build();
    let leaf = CertBuilder::new("CN=Leaf", &[3])
        .validity(1_000, 1_500)
        .issued_by(&root)
        .build();
    let result = run(vec![leaf, root.clone()], context_for(&root).skip_time_validation());
    assert!(result.is_valid(), "{}", result);
}

/// Rejects any leaf whose subject has no common name.
struct RequireCommonName {
    position: usize,
    path_len: usize,
}

impl CertificateValidator for RequireCommonName {
    fn kind(&self) -> ValidatorKind {
        ValidatorKind::Custom("common-name")
    }

    fn start(&mut self, path_len: usize) {
        self.position = 0;
        self.path_len = path_len;
    }

    fn check(
        &mut self,
        _ctx: &CheckContext<'_>,
        cert: &pkix_path::Certificate,
        _unhandled: &mut std::collections::BTreeSet<const_oid::ObjectIdentifier>,
    ) -> pkix_path::Result<()> {
        self.position += 1;
        if self.position == self.path_len && cert.subject().common_name().is_none() {
            return Err(Error::validation("leaf has no common name"));
        }
        Ok(())
    }
}

#[test]
fn test_custom_validator_failure_is_recorded() {
    setup_logger();
    let root = ca("CN=Root", 1).build();
    let leaf = CertBuilder::new("O=Nameless", &[3]).issued_by(&root).build();
    let context = context_for(&root).with_validator(RequireCommonName {
        position: 0,
        path_len: 0,
    });
    let result = run(vec![leaf, root], context);
    let failures: Vec<_> = result
        .failures_of(ValidatorKind::Custom("common-name"))
        .collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].index, 0);
}

#[test]
fn test_empty_chain_is_rejected() {
    let chain = CertificateChain::default();
    assert!(matches!(
        PathValidator::with_backend(MockBackend).validate(&chain, ValidationContext::new()),
        Err(Error::ChainError(ChainError::EmptyChain))
    ));
}
