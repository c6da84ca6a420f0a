// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Non-extension OIDs used during path processing.

use const_oid::ObjectIdentifier;

// =============================================================================
// Certificate policies (RFC 5280 §4.2.1.4)
// =============================================================================

/// anyPolicy - 2.5.29.32.0
pub const ANY_POLICY: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.29.32.0");

/// id-qt-cps - 1.3.6.1.5.5.7.2.1
pub const QT_CPS: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.6.1.5.5.7.2.1");

/// id-qt-unotice - 1.3.6.1.5.5.7.2.2
pub const QT_UNOTICE: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.6.1.5.5.7.2.2");

// =============================================================================
// Public key algorithms
// =============================================================================

/// id-ecPublicKey - 1.2.840.10045.2.1
pub const ECPUBLICKEY: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.2.1");

/// rsaEncryption - 1.2.840.113549.1.1.1
pub const RSA_ENCRYPTION: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.1");

/// id-Ed25519 - 1.3.101.112
pub const ED25519: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.101.112");
