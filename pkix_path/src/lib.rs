// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! X.509 Certification Path Validation
//!
//! A no_std-compatible implementation of the RFC 5280 §6 path validation
//! algorithm. Uses `der` for ASN.1 parsing and a pluggable crypto backend for
//! signature checks.
//!
//! # Features
//! - Issuer chaining and signature verification
//! - Basic constraints, key usage and validity period checks
//! - Name constraints over DNS, RFC 822, URI, IP and directory names
//! - Certificate policy processing with a valid policy tree
//! - Trust anchor discovery and caller-supplied validators
//!
//! # Example
//! ```no_run
//! use pkix_path::{CertificateChain, PathValidator, TrustAnchor, ValidationContext};
//!
//! # #[cfg(feature = "ring-backend")]
//! # fn example(chain_der: &[&[u8]]) -> pkix_path::Result<()> {
//! let chain = CertificateChain::from_der_certs(chain_der.iter())?;
//! let anchor = chain.root().map(TrustAnchor::from_certificate);
//! let context = ValidationContext::new().with_trust_anchors(anchor);
//! let result = PathValidator::new().validate(&chain, context)?;
//! if !result.is_valid() {
//!     for failure in result.failures() {
//!         println!("{}", failure);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod certificate;
pub mod chain;
pub mod context;
pub mod crypto_backend;
pub mod error;
pub mod general_name;
pub mod path;
pub mod policy;
pub mod result;
pub mod time;
pub mod validator;
pub mod x509;

#[cfg(test)]
mod testing;

pub use certificate::name::Name;
pub use certificate::{Certificate, Extension};
pub use chain::CertificateChain;
pub use context::ValidationContext;
pub use crypto_backend::{CryptoBackend, SignatureAlgorithm};
pub use error::{Error, Result};
pub use general_name::{ConstraintResult, GeneralNameOption, NameKind};
pub use path::PathValidator;
pub use policy::{PolicyNode, PolicyTree};
pub use result::ValidationResult;
pub use time::Time;
pub use validator::{
    CertificateValidator, CheckContext, PolicyOptions, TrustAnchor, ValidatorFailure,
    ValidatorKind,
};

#[cfg(feature = "ring-backend")]
pub use crypto_backend::RingBackend;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::validator::{CertificateValidator, TrustAnchor, ValidatorKind};
    pub use crate::{
        Certificate, CertificateChain, Error, PathValidator, Result, ValidationContext,
        ValidationResult,
    };
}
