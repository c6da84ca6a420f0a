// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

#![forbid(unsafe_code)]

pub mod common;

#[cfg(test)]
mod test_chain;
#[cfg(test)]
mod test_name_constraints;
#[cfg(test)]
mod test_policy;
