// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Trust anchors and the search for the anchored certificate.
//!
//! The search is not a per-certificate check. It runs once over the chain,
//! leaf first, and stops at the first certificate an anchor signed.

extern crate alloc;

use alloc::format;
use alloc::vec::Vec;

use spki::SubjectPublicKeyInfoOwned;

use super::{CheckContext, ValidatorKind};
use crate::certificate::name::Name;
use crate::certificate::Certificate;
use crate::crypto_backend::CryptoBackend;
use crate::error::{ChainError, Error, Result};
use crate::x509::verify_signed_by;

/// A trusted (name, key) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrustAnchor {
    name: Name,
    public_key: SubjectPublicKeyInfoOwned,
}

impl TrustAnchor {
    pub fn new(name: Name, public_key: SubjectPublicKeyInfoOwned) -> Self {
        Self { name, public_key }
    }

    /// Anchor taken from a (usually self-signed) certificate's subject and key.
    pub fn from_certificate(cert: &Certificate) -> Self {
        Self {
            name: cert.subject().clone(),
            public_key: cert.public_key_info().clone(),
        }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn public_key(&self) -> &SubjectPublicKeyInfoOwned {
        &self.public_key
    }

    /// `cert` names this anchor as issuer and carries a signature made with
    /// the anchor's key.
    pub fn is_issuer_of(&self, cert: &Certificate, backend: &dyn CryptoBackend) -> bool {
        if !self.name.matches(cert.issuer()) {
            return false;
        }
        match verify_signed_by(cert, &self.public_key, backend) {
            Ok(()) => true,
            Err(e) => {
                log::debug!(
                    "'{}' names anchor '{}' but its signature does not verify: {}",
                    cert.describe(),
                    self.name,
                    e
                );
                false
            }
        }
    }
}

/// Locates the first certificate, counting from the leaf, that a configured
/// anchor issued.
#[derive(Debug, Clone, Copy)]
pub struct TrustAnchorValidator<'a> {
    anchors: &'a [TrustAnchor],
}

impl<'a> TrustAnchorValidator<'a> {
    pub fn new(anchors: &'a [TrustAnchor]) -> Self {
        Self { anchors }
    }

    pub fn kind(&self) -> ValidatorKind {
        ValidatorKind::TrustAnchor
    }

    /// Returns the chain index of the anchored certificate.
    ///
    /// When the chain also carries the anchor's own certificate right above
    /// it, that certificate's key has to be the anchor key.
    pub fn find(&self, ctx: &CheckContext<'_>) -> Result<usize> {
        for (index, cert) in ctx.chain.iter().enumerate() {
            let Some(anchor) = self
                .anchors
                .iter()
                .find(|anchor| anchor.is_issuer_of(cert, ctx.backend))
            else {
                continue;
            };
            log::info!(
                "certificate {} ('{}') is issued by trust anchor '{}'",
                index,
                cert.describe(),
                anchor.name()
            );
            if let Some(above) = ctx.chain.get(index + 1) {
                if anchor.name().matches(above.subject())
                    && above.public_key_info() != anchor.public_key()
                {
                    return Err(Error::ChainError(ChainError::TrustAnchorKeyMismatch(
                        format!(
                            "'{}' at index {} does not carry the anchor key",
                            above.describe(),
                            index + 1
                        ),
                    )));
                }
            }
            return Ok(index);
        }
        Err(Error::ChainError(ChainError::NoTrustedIssuer))
    }

    /// Indexes of every certificate some anchor issued. Mostly useful for
    /// diagnostics on chains that carry cross-certificates.
    pub fn anchored_indexes(&self, ctx: &CheckContext<'_>) -> Vec<usize> {
        ctx.chain
            .iter()
            .enumerate()
            .filter(|(_, cert)| {
                self.anchors
                    .iter()
                    .any(|anchor| anchor.is_issuer_of(cert, ctx.backend))
            })
            .map(|(index, _)| index)
            .collect()
    }
}
