// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Path validation driver.
//!
//! [`PathValidator::validate`] runs the trust anchor search once, then walks
//! the chain from the anchor side to the leaf, handing every certificate to
//! every validator. Validator errors are collected as failures; only a
//! malformed request or an unhandled critical extension aborts the call.

extern crate alloc;

use alloc::boxed::Box;
use alloc::string::ToString;
use alloc::vec::Vec;

use crate::chain::CertificateChain;
use crate::context::ValidationContext;
use crate::crypto_backend::CryptoBackend;
use crate::error::{ChainError, Error, ExtensionError, Result, TimeError};
use crate::result::ValidationResult;
use crate::time::current_time;
use crate::validator::{
    BasicConstraintsValidator, CertificateValidator, ChainValidator, CheckContext,
    KeyUsageValidator, NameConstraintsValidator, PolicyValidator, TimeValidator,
    TrustAnchorValidator, ValidatorFailure, ValidatorKind, TRUST_ANCHOR_INDEX,
};

#[cfg(feature = "ring-backend")]
use crate::crypto_backend::RingBackend;

#[derive(Debug, Clone, Default)]
pub struct PathValidator<B: CryptoBackend> {
    backend: B,
}

#[cfg(feature = "ring-backend")]
impl PathValidator<RingBackend> {
    pub fn new() -> Self {
        Self {
            backend: RingBackend,
        }
    }
}

impl<B: CryptoBackend> PathValidator<B> {
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Validate `chain` (leaf first) under `context`.
    ///
    /// Returns `Err` for an empty or over-long chain, a missing reference
    /// time, and a critical extension no validator understood. Everything
    /// else ends up in [`ValidationResult::failures`].
    pub fn validate(
        &self,
        chain: &CertificateChain,
        context: ValidationContext,
    ) -> Result<ValidationResult> {
        let n = chain.len();
        let leaf = chain
            .leaf()
            .cloned()
            .ok_or(Error::ChainError(ChainError::EmptyChain))?;
        if n > context.max_chain_depth {
            log::error!("chain of {} exceeds depth {}", n, context.max_chain_depth);
            return Err(Error::ChainError(ChainError::ChainTooLong {
                max: context.max_chain_depth,
                found: n,
            }));
        }

        let ValidationContext {
            time,
            check_time,
            policy,
            trust_anchors,
            validators: custom,
            ..
        } = context;

        let mut validators: Vec<Box<dyn CertificateValidator>> = Vec::new();
        validators.push(Box::new(ChainValidator::new()));
        validators.push(Box::new(BasicConstraintsValidator::new()));
        validators.push(Box::new(KeyUsageValidator::new()));
        if check_time {
            let time = match time {
                Some(time) => time,
                None => current_time().map_err(|e| {
                    log::error!("no reference time available: {}", e);
                    Error::TimeError(TimeError::InvalidTime)
                })?,
            };
            validators.push(Box::new(TimeValidator::new(time)));
        }
        validators.push(Box::new(NameConstraintsValidator::new()));
        validators.push(Box::new(PolicyValidator::new(policy)));

        let mut taken: Vec<ValidatorKind> = validators.iter().map(|v| v.kind()).collect();
        taken.push(ValidatorKind::TrustAnchor);
        for validator in custom {
            let kind = validator.kind();
            if taken.contains(&kind) {
                log::warn!("ignoring validator '{}': kind already registered", kind);
                continue;
            }
            taken.push(kind);
            validators.push(validator);
        }

        let ctx = CheckContext {
            chain,
            backend: &self.backend,
        };
        for validator in validators.iter_mut() {
            validator.start(n);
        }

        let mut failures = Vec::new();
        let anchors = TrustAnchorValidator::new(&trust_anchors);
        if let Err(e) = anchors.find(&ctx) {
            log::error!("[{}] {}", anchors.kind(), e);
            failures.push(ValidatorFailure::new(anchors.kind(), TRUST_ANCHOR_INDEX, e));
        }

        for (index, cert) in chain.iter().enumerate().rev() {
            log::debug!("checking certificate {}: '{}'", index, cert.describe());
            let mut unhandled = cert.critical_extensions();
            for validator in validators.iter_mut() {
                if let Err(e) = validator.check(&ctx, cert, &mut unhandled) {
                    let failure = ValidatorFailure::new(validator.kind(), index as isize, e);
                    log::error!("{}", failure);
                    failures.push(failure);
                }
            }
            if let Some(oid) = unhandled.iter().next() {
                log::error!("certificate {} has unhandled critical extension {}", index, oid);
                return Err(Error::ExtensionError(
                    ExtensionError::UnhandledCriticalExtension {
                        index,
                        oid: oid.to_string(),
                    },
                ));
            }
        }

        let policy_tree = validators.iter().find_map(|v| v.policy_tree());
        if failures.is_empty() {
            log::info!("path to '{}' validated", leaf.describe());
        }
        Ok(ValidationResult {
            policy_tree,
            leaf,
            failures,
        })
    }
}
