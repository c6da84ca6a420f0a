// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Name constraints (RFC 5280 §6.1.3(b)-(c), §6.1.4(g)).
//!
//! Permitted subtrees are kept per name form. A form with no entry is
//! unrestricted; a form with an empty list permits nothing. Excluded
//! subtrees only accumulate.

extern crate alloc;

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::format;
use alloc::vec::Vec;

use const_oid::ObjectIdentifier;

use super::{handled, CertificateValidator, CheckContext, ValidatorKind};
use crate::certificate::name::SubjectAltName;
use crate::certificate::Certificate;
use crate::error::{ConstraintError, Error, Result};
use crate::general_name::{DirectoryName, GeneralNameOption, NameKind, Rfc822Name};
use crate::x509::extensions::{GeneralSubtree, NameConstraints, NAME_CONSTRAINTS, SUBJECT_ALT_NAME};

/// Upper bound on name-against-subtree comparisons for one certificate.
pub const NAME_CONSTRAINT_WORK_LIMIT: usize = 250_000;

#[derive(Debug, Default)]
pub struct NameConstraintsValidator {
    position: usize,
    path_len: usize,
    /// `None` until some certificate has carried the extension.
    permitted: Option<BTreeMap<NameKind, Vec<GeneralNameOption>>>,
    excluded: Vec<GeneralNameOption>,
}

impl NameConstraintsValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names `cert` asserts: the subject DN, any emailAddress attributes in
    /// it, and the subjectAltName entries.
    fn asserted_names(cert: &Certificate) -> Result<Vec<GeneralNameOption>> {
        let mut names = Vec::new();
        if !cert.subject().is_empty() {
            names.push(GeneralNameOption::Directory(DirectoryName::new(
                cert.subject().clone(),
            )));
        }
        for email in cert.subject().email_addresses() {
            names.push(GeneralNameOption::Rfc822(Rfc822Name::new(&email)));
        }
        if let Some(ext) = cert.extension(&SUBJECT_ALT_NAME) {
            let san = SubjectAltName::from_der(ext.value())
                .map_err(|e| Error::invalid_extension(format!("subjectAltName: {}", e)))?;
            for name in &san.names {
                names.push(GeneralNameOption::from_general_name(name, false)?);
            }
        }
        Ok(names)
    }

    fn check_names(&self, cert: &Certificate) -> Result<()> {
        let names = Self::asserted_names(cert)?;
        let permitted_count: usize = self
            .permitted
            .as_ref()
            .map(|p| p.values().map(Vec::len).sum::<usize>())
            .unwrap_or(0);
        let work = names
            .len()
            .saturating_mul(permitted_count.saturating_add(self.excluded.len()));
        if work > NAME_CONSTRAINT_WORK_LIMIT {
            return Err(Error::ConstraintError(ConstraintError::WorkFactorExceeded {
                limit: NAME_CONSTRAINT_WORK_LIMIT,
            }));
        }

        for name in &names {
            if let Some(bases) = self.permitted.as_ref().and_then(|p| p.get(&name.kind())) {
                let mut inside = false;
                for base in bases {
                    if name.is_within(base)? {
                        inside = true;
                        break;
                    }
                }
                if !inside {
                    return Err(Error::ConstraintError(ConstraintError::NameNotPermitted(
                        format!("{}", name),
                    )));
                }
            }
            for base in self.excluded.iter().filter(|b| b.kind() == name.kind()) {
                if name.is_within(base)? {
                    return Err(Error::ConstraintError(ConstraintError::NameExcluded(
                        format!("{} (excluded by {})", name, base),
                    )));
                }
            }
        }
        Ok(())
    }

    fn subtree_bases(subtrees: &Option<Vec<GeneralSubtree>>) -> Result<Vec<GeneralNameOption>> {
        subtrees
            .iter()
            .flatten()
            .map(|s| GeneralNameOption::from_general_name(&s.base, true))
            .collect()
    }

    fn merge(&mut self, constraints: &NameConstraints) -> Result<()> {
        let incoming = Self::subtree_bases(&constraints.permitted_subtrees)?;
        let mut by_kind: BTreeMap<NameKind, Vec<GeneralNameOption>> = BTreeMap::new();
        for base in incoming {
            by_kind.entry(base.kind()).or_default().push(base);
        }

        let permitted = self.permitted.get_or_insert_with(BTreeMap::new);
        for (kind, new_bases) in by_kind {
            let merged = match permitted.get(&kind) {
                None => new_bases,
                Some(current) => intersect(current, &new_bases)?,
            };
            permitted.insert(kind, merged);
        }

        for base in Self::subtree_bases(&constraints.excluded_subtrees)? {
            if !self.excluded.contains(&base) {
                self.excluded.push(base);
            }
        }
        Ok(())
    }
}

/// Keep the narrower side of every related pair.
fn intersect(
    current: &[GeneralNameOption],
    incoming: &[GeneralNameOption],
) -> Result<Vec<GeneralNameOption>> {
    let mut out: Vec<GeneralNameOption> = Vec::new();
    for a in current {
        for b in incoming {
            let narrower = if a.is_within(b)? {
                Some(a)
            } else if b.is_within(a)? {
                Some(b)
            } else {
                None
            };
            if let Some(n) = narrower {
                if !out.contains(n) {
                    out.push(n.clone());
                }
            }
        }
    }
    Ok(out)
}

impl CertificateValidator for NameConstraintsValidator {
    fn kind(&self) -> ValidatorKind {
        ValidatorKind::NameConstraints
    }

    fn start(&mut self, path_len: usize) {
        self.position = 0;
        self.path_len = path_len;
        self.permitted = None;
        self.excluded.clear();
    }

    fn check(
        &mut self,
        _ctx: &CheckContext<'_>,
        cert: &Certificate,
        unhandled: &mut BTreeSet<ObjectIdentifier>,
    ) -> Result<()> {
        handled(unhandled, &[NAME_CONSTRAINTS]);
        self.position += 1;
        let is_final = self.position == self.path_len;

        if self.permitted.is_some() && (is_final || !cert.is_self_issued()) {
            self.check_names(cert)?;
        }
        if let Some((_, constraints)) = cert.decode_extension::<NameConstraints>(&NAME_CONSTRAINTS)? {
            self.merge(&constraints)?;
        }
        Ok(())
    }
}
