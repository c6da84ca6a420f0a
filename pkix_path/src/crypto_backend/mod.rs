// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Signature verification seam.
//!
//! Path validation never touches key material directly. It maps the
//! certificate's signature AlgorithmIdentifier (and, for ECDSA, the issuer
//! key's named curve) to a [`SignatureAlgorithm`] and hands the raw bytes to
//! a [`CryptoBackend`].

extern crate alloc;

use crate::error::{Error, Result};
use const_oid::ObjectIdentifier;
use spki::{AlgorithmIdentifierOwned, SubjectPublicKeyInfoOwned};

#[cfg(feature = "ring-backend")]
mod ring;
#[cfg(feature = "ring-backend")]
pub use self::ring::*;

const ECDSA_WITH_SHA256: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.4.3.2");
const ECDSA_WITH_SHA384: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.4.3.3");
const RSA_WITH_SHA256: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.11");
const RSA_WITH_SHA384: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.12");
const RSA_WITH_SHA512: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.13");
const RSA_PSS: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.10");

const SECP256R1: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.3.1.7");
const SECP384R1: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.132.0.34");

const SHA256: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.16.840.1.101.3.4.2.1");
const SHA384: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.16.840.1.101.3.4.2.2");
const SHA512: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.16.840.1.101.3.4.2.3");

/// Signature schemes a backend may be asked to verify.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureAlgorithm {
    EcdsaP256Sha256,
    EcdsaP256Sha384,
    EcdsaP384Sha256,
    EcdsaP384Sha384,
    RsaPkcs1Sha256,
    RsaPkcs1Sha384,
    RsaPkcs1Sha512,
    RsaPssSha256,
    RsaPssSha384,
    RsaPssSha512,
    Ed25519,
}

impl SignatureAlgorithm {
    /// Resolve the scheme for a signature made with `issuer_key`.
    pub fn resolve(
        signature: &AlgorithmIdentifierOwned,
        issuer_key: &SubjectPublicKeyInfoOwned,
    ) -> Result<Self> {
        // RSA keys carry NULL parameters, so only look for a curve on EC keys.
        let curve = if issuer_key.algorithm.oid == crate::x509::oids::ECPUBLICKEY {
            issuer_key
                .algorithm
                .parameters
                .as_ref()
                .and_then(|p| p.decode_as::<ObjectIdentifier>().ok())
        } else {
            None
        };
        Self::from_oid_with_params(&signature.oid, curve.as_ref(), signature.parameters.as_ref())
    }

    pub fn from_oid_with_params(
        sig_oid: &ObjectIdentifier,
        curve_oid: Option<&ObjectIdentifier>,
        params: Option<&der::Any>,
    ) -> Result<Self> {
        match *sig_oid {
            ECDSA_WITH_SHA256 => match curve_oid {
                Some(&SECP256R1) => Ok(SignatureAlgorithm::EcdsaP256Sha256),
                Some(&SECP384R1) => Ok(SignatureAlgorithm::EcdsaP384Sha256),
                Some(oid) => Err(Error::unsupported_algorithm(alloc::format!(
                    "ecdsa-with-SHA256 on curve {}",
                    oid
                ))),
                None => Err(Error::unsupported_algorithm(
                    "ecdsa-with-SHA256 without a named curve",
                )),
            },
            ECDSA_WITH_SHA384 => match curve_oid {
                Some(&SECP256R1) => Ok(SignatureAlgorithm::EcdsaP256Sha384),
                Some(&SECP384R1) => Ok(SignatureAlgorithm::EcdsaP384Sha384),
                Some(oid) => Err(Error::unsupported_algorithm(alloc::format!(
                    "ecdsa-with-SHA384 on curve {}",
                    oid
                ))),
                None => Err(Error::unsupported_algorithm(
                    "ecdsa-with-SHA384 without a named curve",
                )),
            },
            RSA_WITH_SHA256 => Ok(SignatureAlgorithm::RsaPkcs1Sha256),
            RSA_WITH_SHA384 => Ok(SignatureAlgorithm::RsaPkcs1Sha384),
            RSA_WITH_SHA512 => Ok(SignatureAlgorithm::RsaPkcs1Sha512),
            RSA_PSS => Self::from_pss_params(params),
            crate::x509::oids::ED25519 => Ok(SignatureAlgorithm::Ed25519),
            _ => Err(Error::unsupported_algorithm(alloc::format!("{}", sig_oid))),
        }
    }

    /// Pick the hash out of RSASSA-PSS-params (RFC 4055 §3.1). An absent
    /// hashAlgorithm means SHA-1, which is refused.
    fn from_pss_params(params: Option<&der::Any>) -> Result<Self> {
        use der::{Reader, SliceReader, TagMode, TagNumber};
        use spki::AlgorithmIdentifier;

        let params =
            params.ok_or_else(|| Error::unsupported_algorithm("RSASSA-PSS with SHA-1 defaults"))?;
        let mut reader = SliceReader::new(params.value())
            .map_err(|_| Error::unsupported_algorithm("malformed RSASSA-PSS parameters"))?;
        let hash = reader
            .context_specific::<AlgorithmIdentifier<der::Any>>(TagNumber::N0, TagMode::Explicit)
            .ok()
            .flatten()
            .map(|ai| ai.oid);

        match hash {
            Some(SHA256) => Ok(SignatureAlgorithm::RsaPssSha256),
            Some(SHA384) => Ok(SignatureAlgorithm::RsaPssSha384),
            Some(SHA512) => Ok(SignatureAlgorithm::RsaPssSha512),
            Some(oid) => Err(Error::unsupported_algorithm(alloc::format!(
                "RSASSA-PSS with hash {}",
                oid
            ))),
            None => Err(Error::unsupported_algorithm("RSASSA-PSS with SHA-1 defaults")),
        }
    }
}

/// Verifies one signature over raw bytes.
///
/// `public_key` is the content of the issuer's `subjectPublicKey` BIT STRING.
pub trait CryptoBackend {
    fn verify_signature(
        &self,
        algorithm: SignatureAlgorithm,
        message: &[u8],
        signature: &[u8],
        public_key: &[u8],
    ) -> Result<()>;
}

impl<T: CryptoBackend + ?Sized> CryptoBackend for &T {
    fn verify_signature(
        &self,
        algorithm: SignatureAlgorithm,
        message: &[u8],
        signature: &[u8],
        public_key: &[u8],
    ) -> Result<()> {
        (**self).verify_signature(algorithm, message, signature, public_key)
    }
}
