// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Certificate path, ordered from the target (leaf) toward the trust anchor.

extern crate alloc;

use alloc::vec::Vec;

use der::Decode;

use crate::certificate::Certificate;
use crate::error::Result;

// ============================================================================
// Certificate Chain
// ============================================================================

/// Index 0 is the target certificate; the last entry is closest to the
/// trust anchor. Validation walks the chain from the end.
#[derive(Debug, Clone, Default)]
pub struct CertificateChain {
    pub certificates: Vec<Certificate>,
}

impl CertificateChain {
    pub fn new(certificates: Vec<Certificate>) -> Self {
        Self { certificates }
    }

    /// Decode each DER blob, leaf first.
    pub fn from_der_certs<I, T>(certs: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        let certificates = certs
            .into_iter()
            .map(|der| Certificate::from_der(der.as_ref()))
            .collect::<core::result::Result<Vec<_>, _>>()?;
        Ok(Self { certificates })
    }

    pub fn push(&mut self, cert: Certificate) {
        self.certificates.push(cert);
    }

    pub fn leaf(&self) -> Option<&Certificate> {
        self.certificates.first()
    }

    /// The certificate closest to the trust anchor.
    pub fn root(&self) -> Option<&Certificate> {
        self.certificates.last()
    }

    pub fn get(&self, index: usize) -> Option<&Certificate> {
        self.certificates.get(index)
    }

    pub fn len(&self) -> usize {
        self.certificates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.certificates.is_empty()
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Certificate> {
        self.certificates.iter()
    }
}

impl From<Vec<Certificate>> for CertificateChain {
    fn from(certificates: Vec<Certificate>) -> Self {
        Self::new(certificates)
    }
}

impl<'a> IntoIterator for &'a CertificateChain {
    type Item = &'a Certificate;
    type IntoIter = core::slice::Iter<'a, Certificate>;

    fn into_iter(self) -> Self::IntoIter {
        self.certificates.iter()
    }
}
