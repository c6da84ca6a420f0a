// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Error types for certification path validation.
//!
//! Every check in the crate reports problems through [`Error`]. The path
//! orchestrator decides whether a given error becomes a recorded
//! [`ValidatorFailure`](crate::validator::ValidatorFailure) or aborts the
//! whole call.

extern crate alloc;

use alloc::string::{String, ToString};
use core::fmt;

/// Result type alias for path validation operations
pub type Result<T> = core::result::Result<T, Error>;

/// Error type for certificate decoding and path validation
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// Errors during DER/ASN.1 parsing
    ParseError(ParseError),

    /// Errors related to cryptographic signature verification
    SignatureError(SignatureError),

    /// Errors related to time validation
    TimeError(TimeError),

    /// Unsupported or invalid cryptographic algorithms
    AlgorithmError(AlgorithmError),

    /// Certificate extension errors
    ExtensionError(ExtensionError),

    /// Chain structure and trust anchor errors
    ChainError(ChainError),

    /// PEM/DER conversion errors
    EncodingError(EncodingError),

    /// Basic constraints, key usage and name constraints violations
    ConstraintError(ConstraintError),

    /// Invalid public key
    KeyError(KeyError),

    /// Name parsing and comparison errors
    NameError(NameError),

    /// Certificate policy processing errors
    PolicyError(PolicyError),

    /// Generic validation error with custom message
    ValidationError(String),

    /// Internal error (should not occur in normal operation)
    InternalError(String),
}

/// Errors that occur during DER/ASN.1 parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Error from der crate
    DerError(String),
}

/// Errors related to cryptographic signature verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignatureError {
    /// Signature verification failed
    VerificationFailed,

    /// Signature algorithm mismatch between certificate and TBS certificate
    AlgorithmMismatch { cert_algo: String, tbs_algo: String },

    /// Error from ring cryptographic library
    RingError(String),
}

/// Errors related to time validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeError {
    /// Certificate not yet valid
    NotYetValid,

    /// Certificate has expired
    Expired,

    /// Invalid validity period (notAfter before notBefore)
    InvalidValidityPeriod {
        not_before: String,
        not_after: String,
    },

    /// No usable reference time
    InvalidTime,
}

/// Errors related to cryptographic algorithms
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlgorithmError {
    /// Algorithm not supported
    Unsupported(String),
}

/// Errors related to certificate extensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtensionError {
    /// A critical extension no validator consumed
    UnhandledCriticalExtension { index: usize, oid: String },

    /// Invalid extension encoding
    InvalidEncoding(String),

    /// The same extension appears twice in one certificate
    DuplicateExtension(String),
}

/// Errors related to the structure of the chain and its anchoring
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainError {
    /// Empty certificate chain
    EmptyChain,

    /// Chain longer than the configured maximum depth
    ChainTooLong { max: usize, found: usize },

    /// Child issuer name does not match parent subject name
    IssuerMismatch { issuer: String, subject: String },

    /// Child issuerUniqueID does not match parent subjectUniqueID
    UniqueIdMismatch,

    /// Non-self-issued certificate without an authority key identifier
    MissingAuthorityKeyIdentifier,

    /// No certificate in the chain is issued by a configured trust anchor
    NoTrustedIssuer,

    /// The anchor key differs from the key of the issuing certificate in the chain
    TrustAnchorKeyMismatch(String),
}

/// Errors related to certificate encoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    /// Invalid PEM format
    InvalidPem(String),

    /// PEM label mismatch
    InvalidPemLabel { expected: String, found: String },
}

/// Errors related to certificate constraints
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstraintError {
    /// Basic constraints extension absent on a CA position
    MissingBasicConstraints,

    /// Basic constraints extension present but not marked critical
    BasicConstraintsNotCritical,

    /// Basic Constraints: CA flag not set but certificate used as CA
    NotCa,

    /// pathLenConstraint present while cA is false
    PathLenWithoutCa,

    /// Remaining path length exhausted
    PathLengthExceeded,

    /// Key Usage: required usage not permitted
    KeyUsageViolation(String),

    /// Name Constraints: name outside every permitted subtree
    NameNotPermitted(String),

    /// Name Constraints: name inside an excluded subtree
    NameExcluded(String),

    /// Too many name/subtree comparisons for one certificate
    WorkFactorExceeded { limit: usize },
}

/// Errors related to public keys
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    /// Invalid key encoding
    InvalidEncoding(String),
}

/// Errors related to names
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameError {
    /// Invalid name encoding
    InvalidEncoding(String),

    /// Invalid DNS name
    InvalidDnsName(String),

    /// Invalid IP address or subnet
    InvalidIpAddress(String),

    /// Ordering is undefined for this name form
    UnsupportedComparison(String),
}

/// Errors raised while processing certificate policies
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyError {
    /// explicit_policy reached zero with an empty policy tree
    ExplicitPolicyRequired,

    /// A critical certificate-policies extension carries qualifiers the caller rejects
    QualifiersRejected(String),

    /// anyPolicy appears in a policy mapping
    AnyPolicyMapped,

    /// Mutation attempted on a frozen policy tree
    TreeFrozen,

    /// Node index does not exist in the tree
    NodeNotFound(usize),

    /// Processing would grow the policy tree past its node ceiling
    TreeTooLarge { limit: usize },
}

// ============================================================================
// Error Display Implementation (works in both std and no_std)
// ============================================================================

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ParseError(e) => write!(f, "Parse error: {}", e),
            Error::SignatureError(e) => write!(f, "Signature error: {}", e),
            Error::TimeError(e) => write!(f, "Time validation error: {}", e),
            Error::AlgorithmError(e) => write!(f, "Algorithm error: {}", e),
            Error::ExtensionError(e) => write!(f, "Extension error: {}", e),
            Error::ChainError(e) => write!(f, "Chain validation error: {}", e),
            Error::EncodingError(e) => write!(f, "Encoding error: {}", e),
            Error::ConstraintError(e) => write!(f, "Constraint violation: {}", e),
            Error::KeyError(e) => write!(f, "Public key error: {}", e),
            Error::NameError(e) => write!(f, "Name error: {}", e),
            Error::PolicyError(e) => write!(f, "Policy error: {}", e),
            Error::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            Error::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::DerError(msg) => write!(f, "DER error: {}", msg),
        }
    }
}

impl fmt::Display for SignatureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignatureError::VerificationFailed => write!(f, "Signature verification failed"),
            SignatureError::AlgorithmMismatch {
                cert_algo,
                tbs_algo,
            } => {
                write!(
                    f,
                    "Signature algorithm mismatch: cert={}, tbs={}",
                    cert_algo, tbs_algo
                )
            }
            SignatureError::RingError(msg) => write!(f, "Cryptographic error: {}", msg),
        }
    }
}

impl fmt::Display for TimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeError::NotYetValid => write!(f, "Certificate not yet valid"),
            TimeError::Expired => write!(f, "Certificate has expired"),
            TimeError::InvalidValidityPeriod {
                not_before,
                not_after,
            } => {
                write!(
                    f,
                    "Invalid validity period: notBefore={}, notAfter={}",
                    not_before, not_after
                )
            }
            TimeError::InvalidTime => write!(f, "Invalid time"),
        }
    }
}

impl fmt::Display for AlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlgorithmError::Unsupported(algo) => write!(f, "Unsupported algorithm: {}", algo),
        }
    }
}

impl fmt::Display for ExtensionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtensionError::UnhandledCriticalExtension { index, oid } => {
                write!(
                    f,
                    "Unhandled critical extension {} in certificate {}",
                    oid, index
                )
            }
            ExtensionError::InvalidEncoding(msg) => {
                write!(f, "Invalid extension encoding: {}", msg)
            }
            ExtensionError::DuplicateExtension(oid) => write!(f, "Duplicate extension: {}", oid),
        }
    }
}

impl fmt::Display for ChainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainError::EmptyChain => write!(f, "Certificate chain is empty"),
            ChainError::ChainTooLong { max, found } => {
                write!(f, "Certificate chain too long: max {}, found {}", max, found)
            }
            ChainError::IssuerMismatch { issuer, subject } => write!(
                f,
                "Issuer name mismatch: issuer '{}' vs subject '{}'",
                issuer, subject
            ),
            ChainError::UniqueIdMismatch => write!(f, "Issuer unique identifier mismatch"),
            ChainError::MissingAuthorityKeyIdentifier => {
                write!(f, "Authority key identifier missing")
            }
            ChainError::NoTrustedIssuer => {
                write!(f, "No certificate in the chain is issued by a trust anchor")
            }
            ChainError::TrustAnchorKeyMismatch(name) => {
                write!(f, "Trust anchor key does not match certificate '{}'", name)
            }
        }
    }
}

impl fmt::Display for EncodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodingError::InvalidPem(msg) => write!(f, "Invalid PEM: {}", msg),
            EncodingError::InvalidPemLabel { expected, found } => {
                write!(
                    f,
                    "Invalid PEM label: expected '{}', found '{}'",
                    expected, found
                )
            }
        }
    }
}

impl fmt::Display for ConstraintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintError::MissingBasicConstraints => {
                write!(f, "Basic constraints missing on CA certificate")
            }
            ConstraintError::BasicConstraintsNotCritical => {
                write!(f, "Basic constraints not marked critical")
            }
            ConstraintError::NotCa => write!(f, "Certificate is not a CA but used as one"),
            ConstraintError::PathLenWithoutCa => {
                write!(f, "pathLenConstraint present without cA")
            }
            ConstraintError::PathLengthExceeded => write!(f, "Path length constraint exceeded"),
            ConstraintError::KeyUsageViolation(msg) => write!(f, "Key usage violation: {}", msg),
            ConstraintError::NameNotPermitted(name) => write!(f, "Name not permitted: {}", name),
            ConstraintError::NameExcluded(name) => write!(f, "Name excluded: {}", name),
            ConstraintError::WorkFactorExceeded { limit } => {
                write!(f, "Name constraint work factor exceeded ({})", limit)
            }
        }
    }
}

impl fmt::Display for KeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyError::InvalidEncoding(msg) => write!(f, "Invalid key encoding: {}", msg),
        }
    }
}

impl fmt::Display for NameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameError::InvalidEncoding(msg) => write!(f, "Invalid name encoding: {}", msg),
            NameError::InvalidDnsName(name) => write!(f, "Invalid DNS name: {}", name),
            NameError::InvalidIpAddress(ip) => write!(f, "Invalid IP address: {}", ip),
            NameError::UnsupportedComparison(form) => {
                write!(f, "No ordering defined between {} names", form)
            }
        }
    }
}

impl fmt::Display for PolicyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyError::ExplicitPolicyRequired => {
                write!(f, "Explicit policy required but no valid policy remains")
            }
            PolicyError::QualifiersRejected(oid) => {
                write!(f, "Policy qualifiers rejected for critical policy {}", oid)
            }
            PolicyError::AnyPolicyMapped => write!(f, "anyPolicy must not be mapped"),
            PolicyError::TreeFrozen => write!(f, "Policy tree is frozen"),
            PolicyError::NodeNotFound(id) => write!(f, "Policy node {} not found", id),
            PolicyError::TreeTooLarge { limit } => {
                write!(f, "Policy tree exceeds {} nodes", limit)
            }
        }
    }
}

// ============================================================================
// std::error::Error implementation (when std feature is enabled)
// ============================================================================

#[cfg(feature = "std")]
impl std::error::Error for Error {}

// ============================================================================
// Conversions from external crate errors
// ============================================================================

/// Convert from der crate errors
impl From<der::Error> for Error {
    fn from(err: der::Error) -> Self {
        Error::ParseError(ParseError::DerError(err.to_string()))
    }
}

/// Convert from ring's Unspecified error
#[cfg(feature = "ring-backend")]
impl From<ring::error::Unspecified> for Error {
    fn from(_: ring::error::Unspecified) -> Self {
        Error::SignatureError(SignatureError::RingError(
            "Cryptographic operation failed".to_string(),
        ))
    }
}

/// Convert from ring's KeyRejected error
#[cfg(feature = "ring-backend")]
impl From<ring::error::KeyRejected> for Error {
    fn from(err: ring::error::KeyRejected) -> Self {
        Error::KeyError(KeyError::InvalidEncoding(err.to_string()))
    }
}

/// Convert from PEM decoding errors
impl From<pem_rfc7468::Error> for Error {
    fn from(err: pem_rfc7468::Error) -> Self {
        Error::EncodingError(EncodingError::InvalidPem(err.to_string()))
    }
}

// ============================================================================
// Helper constructors for common error cases
// ============================================================================

impl Error {
    /// Create a signature verification failure
    pub fn signature_failed() -> Self {
        Error::SignatureError(SignatureError::VerificationFailed)
    }

    /// Create an unsupported algorithm error
    pub fn unsupported_algorithm<S: Into<String>>(algo: S) -> Self {
        Error::AlgorithmError(AlgorithmError::Unsupported(algo.into()))
    }

    /// Create a certificate expired error
    pub fn expired() -> Self {
        Error::TimeError(TimeError::Expired)
    }

    /// Create a certificate not yet valid error
    pub fn not_yet_valid() -> Self {
        Error::TimeError(TimeError::NotYetValid)
    }

    /// Create an invalid extension encoding error
    pub fn invalid_extension<S: Into<String>>(msg: S) -> Self {
        Error::ExtensionError(ExtensionError::InvalidEncoding(msg.into()))
    }

    /// Create an unsupported name comparison error
    pub fn unsupported_comparison<S: Into<String>>(form: S) -> Self {
        Error::NameError(NameError::UnsupportedComparison(form.into()))
    }

    /// Create a policy error
    pub fn policy(err: PolicyError) -> Self {
        Error::PolicyError(err)
    }

    /// Create a validation error with a custom message
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        Error::ValidationError(msg.into())
    }

    /// Create an internal error (should be rare)
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Error::InternalError(msg.into())
    }
}

// ============================================================================
// Tests
// ============================================================================
