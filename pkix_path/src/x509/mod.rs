// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Extension value types, OIDs and signature checks.

pub mod extensions;
pub mod oids;
pub mod signature;

pub use extensions::{
    AuthorityKeyIdentifier, BasicConstraints, CertificatePolicies, GeneralSubtree,
    InhibitAnyPolicy, KeyUsage, NameConstraints, PolicyConstraints, PolicyInformation,
    PolicyMapping, PolicyMappings, PolicyQualifierInfo,
};
pub use signature::{check_algorithm_consistency, verify_signed_by};
