// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

#![no_main]

use der::{Decode, Reader, SliceReader};
use libfuzzer_sys::fuzz_target;

use pkix_path::crypto_backend::{CryptoBackend, SignatureAlgorithm};
use pkix_path::{Certificate, CertificateChain, PathValidator, Time, TrustAnchor, ValidationContext};

/// Accepts every signature so the fuzzer reaches constraint and policy code.
struct AcceptAll;

impl CryptoBackend for AcceptAll {
    fn verify_signature(
        &self,
        _algorithm: SignatureAlgorithm,
        _message: &[u8],
        _signature: &[u8],
        _public_key: &[u8],
    ) -> pkix_path::Result<()> {
        Ok(())
    }
}

fuzz_target!(|data: &[u8]| {
    // Input is concatenated DER certificates, leaf first.
    let Ok(mut reader) = SliceReader::new(data) else {
        return;
    };
    let mut chain = CertificateChain::default();
    while !reader.is_finished() {
        match Certificate::decode(&mut reader) {
            Ok(cert) => chain.push(cert),
            Err(_) => break,
        }
    }
    let Some(root) = chain.root().cloned() else {
        return;
    };
    let Ok(time) = Time::from_unix_secs(1_700_000_000) else {
        return;
    };

    for explicit in [false, true] {
        let mut context = ValidationContext::new()
            .with_time(time)
            .with_trust_anchor(TrustAnchor::from_certificate(&root));
        if explicit {
            context = context
                .require_explicit_policy()
                .inhibit_policy_mapping()
                .inhibit_any_policy();
        }
        if let Ok(result) = PathValidator::with_backend(AcceptAll).validate(&chain, context) {
            if let Some(tree) = result.policy_tree() {
                let _ = tree.valid_policy_node_set();
            }
        }
    }
});
