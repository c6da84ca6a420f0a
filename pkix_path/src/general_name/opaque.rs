// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

extern crate alloc;

use alloc::string::String;

use super::{ConstraintResult, NameKind};
use crate::error::{Error, Result};

/// Result of an optional caller-supplied check on an opaque name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NameValidity {
    Unvalidated,
    Valid,
    Invalid(String),
}

/// A name form with no ordering: otherName, ediPartyName, x400Address and
/// registeredID.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OpaqueName<T> {
    value: T,
    validity: NameValidity,
}

impl<T> OpaqueName<T> {
    pub fn new(value: T) -> Self {
        OpaqueName {
            value,
            validity: NameValidity::Unvalidated,
        }
    }

    pub fn builder(value: T) -> OpaqueNameBuilder<T> {
        OpaqueNameBuilder {
            value,
            validity: NameValidity::Unvalidated,
        }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn validity(&self) -> &NameValidity {
        &self.validity
    }

    /// Opaque names cannot be ordered, validated or not.
    pub(crate) fn constrains(&self, _other: &Self, kind: NameKind) -> Result<ConstraintResult> {
        Err(Error::unsupported_comparison(alloc::format!("{}", kind)))
    }
}

pub struct OpaqueNameBuilder<T> {
    value: T,
    validity: NameValidity,
}

impl<T> OpaqueNameBuilder<T> {
    /// Run `predicate` over the value and record the outcome.
    pub fn with_validation<F>(mut self, predicate: F) -> Self
    where
        F: FnOnce(&T) -> core::result::Result<(), String>,
    {
        self.validity = match predicate(&self.value) {
            Ok(()) => NameValidity::Valid,
            Err(reason) => NameValidity::Invalid(reason),
        };
        self
    }

    pub fn build(self) -> OpaqueName<T> {
        OpaqueName {
            value: self.value,
            validity: self.validity,
        }
    }
}
