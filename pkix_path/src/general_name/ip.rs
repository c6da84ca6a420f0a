// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

extern crate alloc;

use alloc::format;
use core::fmt;
use core::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use super::ConstraintResult;
use crate::error::{Error, NameError, Result};

/// An `iPAddress`: a single host in a SAN, or an address plus mask in a
/// name constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IpName {
    Address(IpAddr),
    /// `network` has all host bits cleared.
    Subnet { network: IpAddr, prefix: u8 },
}

impl IpName {
    /// Decode the `OCTET STRING` form: 4 or 16 bytes for an address, 8 or
    /// 32 bytes (address then mask) for a subnet.
    pub fn from_bytes(bytes: &[u8], subnet: bool) -> Result<Self> {
        match (bytes.len(), subnet) {
            (4, false) => Ok(IpName::Address(IpAddr::V4(v4(&bytes[..4])))),
            (16, false) => Ok(IpName::Address(IpAddr::V6(v6(&bytes[..16])))),
            (8, true) => {
                let addr = u32::from(v4(&bytes[..4]));
                let mask = u32::from(v4(&bytes[4..]));
                let prefix = contiguous_prefix(u128::from(mask) << 96, 32)?;
                Ok(IpName::Subnet {
                    network: IpAddr::V4(Ipv4Addr::from(addr & mask)),
                    prefix,
                })
            }
            (32, true) => {
                let addr = u128::from(v6(&bytes[..16]));
                let mask = u128::from(v6(&bytes[16..]));
                let prefix = contiguous_prefix(mask, 128)?;
                Ok(IpName::Subnet {
                    network: IpAddr::V6(Ipv6Addr::from(addr & mask)),
                    prefix,
                })
            }
            (len, _) => Err(Error::NameError(NameError::InvalidIpAddress(format!(
                "{} octets",
                len
            )))),
        }
    }

    /// Parse `a.b.c.d`, an IPv6 literal, or either with a `/prefix`.
    pub fn parse(text: &str) -> Result<Self> {
        let invalid = || Error::NameError(NameError::InvalidIpAddress(text.into()));
        match text.split_once('/') {
            Some((addr, prefix)) => {
                let addr: IpAddr = addr.parse().map_err(|_| invalid())?;
                let prefix: u8 = prefix.parse().map_err(|_| invalid())?;
                if prefix > width(&addr) {
                    return Err(invalid());
                }
                Ok(IpName::Subnet {
                    network: mask_addr(addr, prefix),
                    prefix,
                })
            }
            None => Ok(IpName::Address(text.parse().map_err(|_| invalid())?)),
        }
    }

    /// Subnet on the receiver side narrows onto a contained address; an
    /// address against a containing subnet widens. Between subnets the
    /// containing one widens.
    pub fn constrains(&self, other: &IpName) -> ConstraintResult {
        match (*self, *other) {
            (IpName::Address(a), IpName::Address(b)) => {
                if a == b {
                    ConstraintResult::Match
                } else {
                    ConstraintResult::SameType
                }
            }
            (IpName::Subnet { network, prefix }, IpName::Address(addr)) => {
                if contains(network, prefix, addr) {
                    ConstraintResult::Narrows
                } else {
                    ConstraintResult::SameType
                }
            }
            (IpName::Address(addr), IpName::Subnet { network, prefix }) => {
                if contains(network, prefix, addr) {
                    ConstraintResult::Widens
                } else {
                    ConstraintResult::SameType
                }
            }
            (
                IpName::Subnet { network: n1, prefix: p1 },
                IpName::Subnet { network: n2, prefix: p2 },
            ) => {
                if n1 == n2 && p1 == p2 {
                    ConstraintResult::Match
                } else if p1 < p2 && contains(n1, p1, n2) {
                    ConstraintResult::Widens
                } else if p2 < p1 && contains(n2, p2, n1) {
                    ConstraintResult::Narrows
                } else {
                    ConstraintResult::SameType
                }
            }
        }
    }

    pub fn is_within(&self, base: &IpName) -> bool {
        match (self, base) {
            (IpName::Address(_), IpName::Subnet { .. }) => {
                self.constrains(base) == ConstraintResult::Widens
            }
            (IpName::Address(_), IpName::Address(_)) => {
                self.constrains(base) == ConstraintResult::Match
            }
            (IpName::Subnet { .. }, IpName::Subnet { .. }) => matches!(
                self.constrains(base),
                ConstraintResult::Match | ConstraintResult::Narrows
            ),
            (IpName::Subnet { .. }, IpName::Address(_)) => false,
        }
    }
}

fn v4(bytes: &[u8]) -> Ipv4Addr {
    Ipv4Addr::new(bytes[0], bytes[1], bytes[2], bytes[3])
}

fn v6(bytes: &[u8]) -> Ipv6Addr {
    let mut octets = [0u8; 16];
    octets.copy_from_slice(&bytes[..16]);
    Ipv6Addr::from(octets)
}

fn width(addr: &IpAddr) -> u8 {
    match addr {
        IpAddr::V4(_) => 32,
        IpAddr::V6(_) => 128,
    }
}

// `mask` is left-aligned in a u128.
fn contiguous_prefix(mask: u128, bits: u8) -> Result<u8> {
    let ones = mask.leading_ones();
    if mask.checked_shl(ones).unwrap_or(0) != 0 || ones > u32::from(bits) {
        return Err(Error::NameError(NameError::InvalidIpAddress(
            "non-contiguous subnet mask".into(),
        )));
    }
    Ok(ones as u8)
}

fn mask_addr(addr: IpAddr, prefix: u8) -> IpAddr {
    match addr {
        IpAddr::V4(a) => {
            let mask = u32::MAX.checked_shl(32 - u32::from(prefix)).unwrap_or(0);
            IpAddr::V4(Ipv4Addr::from(u32::from(a) & mask))
        }
        IpAddr::V6(a) => {
            let mask = u128::MAX.checked_shl(128 - u32::from(prefix)).unwrap_or(0);
            IpAddr::V6(Ipv6Addr::from(u128::from(a) & mask))
        }
    }
}

fn contains(network: IpAddr, prefix: u8, addr: IpAddr) -> bool {
    match (network, addr) {
        (IpAddr::V4(_), IpAddr::V4(_)) | (IpAddr::V6(_), IpAddr::V6(_)) => {
            mask_addr(addr, prefix) == network
        }
        _ => false,
    }
}

impl fmt::Display for IpName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IpName::Address(a) => write!(f, "{}", a),
            IpName::Subnet { network, prefix } => write!(f, "{}/{}", network, prefix),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ip(s: &str) -> IpName {
        IpName::parse(s).unwrap()
    }

    #[test]
    fn test_ip_from_bytes() {
        assert_eq!(IpName::from_bytes(&[10, 0, 0, 1], false).unwrap(), ip("10.0.0.1"));
        assert_eq!(
            IpName::from_bytes(&[10, 1, 2, 3, 255, 255, 0, 0], true).unwrap(),
            ip("10.1.0.0/16")
        );
        assert!(IpName::from_bytes(&[10, 0, 0, 0, 255, 0, 255, 0], true).is_err());
        assert!(IpName::from_bytes(&[10, 0, 0], false).is_err());
        assert!(IpName::from_bytes(&[10, 0, 0, 1], true).is_err());
    }

    #[test]
    fn test_ipv6_subnet_from_bytes() {
        let mut bytes = [0u8; 32];
        bytes[0] = 0x20;
        bytes[1] = 0x01;
        bytes[2] = 0x0d;
        bytes[3] = 0xb8;
        for b in bytes[16..20].iter_mut() {
            *b = 0xff;
        }
        assert_eq!(IpName::from_bytes(&bytes, true).unwrap(), ip("2001:db8::/32"));
    }

    #[test]
    fn test_subnet_against_address() {
        assert_eq!(ip("192.168.0.0/16").constrains(&ip("192.168.4.4")), ConstraintResult::Narrows);
        assert_eq!(ip("192.168.4.4").constrains(&ip("192.168.0.0/16")), ConstraintResult::Widens);
        assert_eq!(ip("192.168.0.0/16").constrains(&ip("10.0.0.1")), ConstraintResult::SameType);
        assert_eq!(ip("192.168.0.0/16").constrains(&ip("::1")), ConstraintResult::SameType);
    }

    #[test]
    fn test_subnet_against_subnet() {
        assert_eq!(ip("10.0.0.0/8").constrains(&ip("10.1.0.0/16")), ConstraintResult::Widens);
        assert_eq!(ip("10.1.0.0/16").constrains(&ip("10.0.0.0/8")), ConstraintResult::Narrows);
        assert_eq!(ip("10.1.2.3/16").constrains(&ip("10.1.0.0/16")), ConstraintResult::Match);
        assert_eq!(ip("10.0.0.0/16").constrains(&ip("10.1.0.0/16")), ConstraintResult::SameType);
    }

    #[test]
    fn test_is_within() {
        assert!(ip("10.1.1.1").is_within(&ip("10.0.0.0/8")));
        assert!(!ip("11.1.1.1").is_within(&ip("10.0.0.0/8")));
        assert!(ip("10.1.0.0/16").is_within(&ip("10.0.0.0/8")));
        assert!(!ip("10.0.0.0/8").is_within(&ip("10.1.0.0/16")));
        assert!(ip("0.0.0.0/0").is_within(&ip("0.0.0.0/0")));
        assert!(ip("1.2.3.4").is_within(&ip("0.0.0.0/0")));
    }
}
