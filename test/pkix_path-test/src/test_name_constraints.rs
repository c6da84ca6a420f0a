// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

use pkix_path::certificate::name::GeneralName;
use pkix_path::error::ConstraintError;
use pkix_path::{Error, Name, ValidationResult, ValidatorKind};

use crate::common::{context_for, run, setup_logger, three_level, CertBuilder};

fn dns(name: &str) -> GeneralName {
    GeneralName::DnsName(name.to_string())
}

/// Intermediate carries the constraints, the leaf carries `leaf`.
fn constrained(
    permitted: &[GeneralName],
    excluded: &[GeneralName],
    leaf: CertBuilder,
) -> ValidationResult {
    let (root, intermediate, leaf) = three_level(
        CertBuilder::new("CN=Root", &[1]).ca(None),
        CertBuilder::new("CN=Intermediate,O=Acme", &[2])
            .ca(None)
            .name_constraints(permitted, excluded),
        leaf,
    );
    run(vec![leaf, intermediate, root.clone()], context_for(&root))
}

fn name_failures(result: &ValidationResult) -> Vec<(isize, Option<Error>)> {
    result
        .failures_of(ValidatorKind::NameConstraints)
        .map(|f| (f.index, f.cause.clone()))
        .collect()
}

#[test]
fn test_dns_name_inside_permitted_subtree() {
    setup_logger();
    let result = constrained(
        &[dns("example.com")],
        &[],
        CertBuilder::new("CN=Leaf", &[3]).dns_names(&["www.example.com", "example.com"]),
    );
    assert!(result.is_valid(), "{}", result);
}

#[test]
fn test_dns_name_outside_permitted_subtree() {
    setup_logger();
    let result = constrained(
        &[dns("example.com")],
        &[],
        CertBuilder::new("CN=Leaf", &[3]).dns_names(&["www.example.com", "www.evil.org"]),
    );
    let failures = name_failures(&result);
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].0, 0);
    assert!(matches!(
        failures[0].1,
        Some(Error::ConstraintError(ConstraintError::NameNotPermitted(_)))
    ));
}

#[test]
fn test_label_boundary_is_respected() {
    setup_logger();
    let result = constrained(
        &[dns("example.com")],
        &[],
        CertBuilder::new("CN=Leaf", &[3]).dns_names(&["badexample.com"]),
    );
    assert_eq!(name_failures(&result).len(), 1);
}

#[test]
fn test_excluded_subtree_wins() {
    setup_logger();
    let result = constrained(
        &[dns("example.com")],
        &[dns("bad.example.com")],
        CertBuilder::new("CN=Leaf", &[3]).dns_names(&["x.bad.example.com"]),
    );
    let failures = name_failures(&result);
    assert_eq!(failures.len(), 1);
    assert!(matches!(
        failures[0].1,
        Some(Error::ConstraintError(ConstraintError::NameExcluded(_)))
    ));
}

#[test]
fn test_directory_name_subtree() {
    setup_logger();
    let acme = GeneralName::DirectoryName(Name::parse("O=Acme").unwrap());

    let inside = constrained(
        &[acme.clone()],
        &[],
        CertBuilder::new("CN=Leaf,O=Acme", &[3]),
    );
    assert!(inside.is_valid(), "{}", inside);

    let outside = constrained(&[acme], &[], CertBuilder::new("CN=Leaf,O=Other", &[3]));
    assert_eq!(name_failures(&outside).len(), 1);
}

#[test]
fn test_ip_subnet_subtree() {
    setup_logger();
    let ten = GeneralName::IpAddress(vec![10, 0, 0, 0, 255, 0, 0, 0]);

    let inside = constrained(
        &[ten.clone()],
        &[],
        CertBuilder::new("CN=Leaf", &[3]).alt_names(&[GeneralName::IpAddress(vec![10, 1, 2, 3])]),
    );
    assert!(inside.is_valid(), "{}", inside);

    let outside = constrained(
        &[ten],
        &[],
        CertBuilder::new("CN=Leaf", &[3])
            .alt_names(&[GeneralName::IpAddress(vec![192, 168, 0, 1])]),
    );
    assert_eq!(name_failures(&outside).len(), 1);
}

#[test]
fn test_unconstrained_forms_pass() {
    setup_logger();
    // Only DNS is constrained; the leaf's email and URI are not checked.
    let result = constrained(
        &[dns("example.com")],
        &[],
        CertBuilder::new("CN=Leaf", &[3]).alt_names(&[
            GeneralName::Rfc822Name("alice@elsewhere.net".to_string()),
            GeneralName::Uri("https://elsewhere.net/".to_string()),
        ]),
    );
    assert!(result.is_valid(), "{}", result);
}

#[test]
fn test_constraints_accumulate_down_the_path() {
    setup_logger();
    let root = CertBuilder::new("CN=Root", &[1]).ca(None).build();
    let upper = CertBuilder::new("CN=Upper", &[2])
        .ca(None)
        .name_constraints(&[dns("example.com")], &[])
        .issued_by(&root)
        .build();
    let lower = CertBuilder::new("CN=Lower", &[4])
        .ca(None)
        .name_constraints(&[dns("www.example.com"), dns("example.org")], &[])
        .issued_by(&upper)
        .build();

    let ok = CertBuilder::new("CN=Ok", &[5])
        .dns_names(&["a.www.example.com"])
        .issued_by(&lower)
        .build();
    let result = run(vec![ok, lower.clone(), upper.clone(), root.clone()], context_for(&root));
    assert!(result.is_valid(), "{}", result);

    // example.org never made it through the intersection.
    let stray = CertBuilder::new("CN=Stray", &[6])
        .dns_names(&["example.org"])
        .issued_by(&lower)
        .build();
    let result = run(vec![stray, lower, upper, root.clone()], context_for(&root));
    assert_eq!(name_failures(&result).len(), 1);
}
