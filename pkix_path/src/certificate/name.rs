// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Distinguished names and the DER `GeneralName` CHOICE.
//!
//! Names are compared through a canonical form: string attribute values
//! are trimmed, internal whitespace runs collapse to one space and the text
//! is case-folded (RFC 5280 §7.1 with the RFC 4518 simplifications most
//! relying parties apply). Non-string values compare on their DER bytes.

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use const_oid::ObjectIdentifier;
use der::{
    asn1::{Any, SetOfVec},
    Decode, DecodeValue, Encode, EncodeValue, ErrorKind, FixedTag, Header, Length, Reader,
    Sequence, Tag, TagNumber, Tagged, ValueOrd, Writer,
};

use crate::error::{Error, NameError, Result};

// ============================================================================
// Attribute Type OIDs (RFC 5280, Appendix A.1)
// ============================================================================

/// Common Name (CN) - 2.5.4.3
pub const COMMON_NAME: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.3");
/// Serial Number - 2.5.4.5
pub const SERIAL_NUMBER: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.5");
/// Country (C) - 2.5.4.6
pub const COUNTRY_NAME: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.6");
/// Locality (L) - 2.5.4.7
pub const LOCALITY_NAME: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.7");
/// State or Province (ST) - 2.5.4.8
pub const STATE_OR_PROVINCE_NAME: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.8");
/// Organization (O) - 2.5.4.10
pub const ORGANIZATION_NAME: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.10");
/// Organizational Unit (OU) - 2.5.4.11
pub const ORGANIZATIONAL_UNIT_NAME: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.11");
/// Domain Component (DC) - 0.9.2342.19200300.100.1.25
pub const DOMAIN_COMPONENT: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("0.9.2342.19200300.100.1.25");
/// Email Address - 1.2.840.113549.1.9.1
pub const EMAIL_ADDRESS: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.9.1");

const KEYWORDS: &[(&str, ObjectIdentifier)] = &[
    ("CN", COMMON_NAME),
    ("SERIALNUMBER", SERIAL_NUMBER),
    ("C", COUNTRY_NAME),
    ("L", LOCALITY_NAME),
    ("ST", STATE_OR_PROVINCE_NAME),
    ("O", ORGANIZATION_NAME),
    ("OU", ORGANIZATIONAL_UNIT_NAME),
    ("DC", DOMAIN_COMPONENT),
    ("EMAILADDRESS", EMAIL_ADDRESS),
];

fn keyword_for(oid: &ObjectIdentifier) -> Option<&'static str> {
    KEYWORDS.iter().find(|(_, o)| o == oid).map(|(k, _)| *k)
}

fn oid_for(keyword: &str) -> Option<ObjectIdentifier> {
    let upper = keyword.trim().to_ascii_uppercase();
    KEYWORDS.iter().find(|(k, _)| *k == upper).map(|(_, o)| *o)
}

/// Trim, collapse whitespace runs and case-fold.
fn canonicalize(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for word in value.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(&word.to_lowercase());
    }
    out
}

// ============================================================================
// AttributeTypeAndValue
// ============================================================================

/// One `type=value` pair of a relative distinguished name.
#[derive(Clone, Debug, PartialEq, Eq, Sequence, ValueOrd)]
pub struct AttributeTypeAndValue {
    pub oid: ObjectIdentifier,
    pub value: Any,
}

impl AttributeTypeAndValue {
    pub fn new_utf8(oid: ObjectIdentifier, value: &str) -> Result<Self> {
        Ok(Self {
            oid,
            value: Any::new(Tag::Utf8String, value.as_bytes())?,
        })
    }

    pub fn new_printable(oid: ObjectIdentifier, value: &str) -> Result<Self> {
        Ok(Self {
            oid,
            value: Any::new(Tag::PrintableString, value.as_bytes())?,
        })
    }

    pub fn new_ia5(oid: ObjectIdentifier, value: &str) -> Result<Self> {
        Ok(Self {
            oid,
            value: Any::new(Tag::Ia5String, value.as_bytes())?,
        })
    }

    /// The value as text, when it is one of the directory string types.
    pub fn value_str(&self) -> Option<String> {
        let bytes = self.value.value();
        match self.value.tag() {
            Tag::Utf8String
            | Tag::PrintableString
            | Tag::Ia5String
            | Tag::TeletexString
            | Tag::VisibleString => core::str::from_utf8(bytes).ok().map(|s| s.to_string()),
            Tag::BmpString => {
                if bytes.len() % 2 != 0 {
                    return None;
                }
                let units: Vec<u16> = bytes
                    .chunks(2)
                    .map(|c| u16::from_be_bytes([c[0], c[1]]))
                    .collect();
                String::from_utf16(&units).ok()
            }
            _ => None,
        }
    }

    /// Comparison key: canonical text for strings, hex DER otherwise.
    pub fn canonical_value(&self) -> String {
        match self.value_str() {
            Some(s) => canonicalize(&s),
            None => {
                let mut out = String::from("#");
                for b in self.value.value() {
                    out.push_str(&alloc::format!("{:02x}", b));
                }
                out
            }
        }
    }
}

impl fmt::Display for AttributeTypeAndValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match keyword_for(&self.oid) {
            Some(k) => write!(f, "{}=", k)?,
            None => write!(f, "{}=", self.oid)?,
        }
        match self.value_str() {
            Some(s) => write_escaped(f, &s),
            None => write!(f, "{}", self.canonical_value()),
        }
    }
}

// ============================================================================
// RelativeDistinguishedName
// ============================================================================

/// SET OF AttributeTypeAndValue.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelativeDistinguishedName(pub SetOfVec<AttributeTypeAndValue>);

impl RelativeDistinguishedName {
    pub fn new(attr: AttributeTypeAndValue) -> Result<Self> {
        let mut set = SetOfVec::new();
        set.insert(attr)?;
        Ok(Self(set))
    }

    pub fn iter(&self) -> impl Iterator<Item = &AttributeTypeAndValue> {
        self.0.iter()
    }

    /// Sorted `(oid, canonical value)` pairs; set order does not matter.
    pub fn canonical(&self) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = self
            .0
            .iter()
            .map(|a| (a.oid.to_string(), a.canonical_value()))
            .collect();
        pairs.sort();
        pairs
    }
}

impl<'a> DecodeValue<'a> for RelativeDistinguishedName {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        Ok(Self(SetOfVec::decode_value(reader, header)?))
    }
}

impl EncodeValue for RelativeDistinguishedName {
    fn value_len(&self) -> der::Result<Length> {
        self.0.value_len()
    }

    fn encode_value(&self, writer: &mut impl Writer) -> der::Result<()> {
        self.0.encode_value(writer)
    }
}

impl FixedTag for RelativeDistinguishedName {
    const TAG: Tag = Tag::Set;
}

impl fmt::Display for RelativeDistinguishedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, attr) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "+")?;
            }
            write!(f, "{}", attr)?;
        }
        Ok(())
    }
}

// ============================================================================
// Name (RDNSequence)
// ============================================================================

/// A distinguished name, stored most-general RDN first as on the wire.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Name {
    rdns: Vec<RelativeDistinguishedName>,
}

impl Name {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rdns(rdns: Vec<RelativeDistinguishedName>) -> Self {
        Self { rdns }
    }

    /// Parse an RFC 4514 string such as `CN=Leaf,O=Example,C=US`.
    ///
    /// Only the keywords this crate knows are accepted. `+` joins attributes
    /// of a multi-valued RDN, and values may carry `\,`-style and `\2c`-style
    /// escapes. The leftmost RDN is the most specific, so it ends up last in
    /// the sequence.
    pub fn parse(text: &str) -> Result<Self> {
        let mut rdns = Vec::new();
        if text.trim().is_empty() {
            return Ok(Self { rdns });
        }
        for component in split_unescaped(text, ',').into_iter().rev() {
            let mut set = SetOfVec::new();
            for pair in split_unescaped(component, '+') {
                let (key, value) = pair.split_once('=').ok_or_else(|| {
                    Error::NameError(NameError::InvalidEncoding(pair.to_string()))
                })?;
                let oid = oid_for(key)
                    .ok_or_else(|| Error::NameError(NameError::InvalidEncoding(key.to_string())))?;
                let value = unescape(value)?;
                let attr = match oid {
                    COUNTRY_NAME => AttributeTypeAndValue::new_printable(oid, &value)?,
                    EMAIL_ADDRESS | DOMAIN_COMPONENT => AttributeTypeAndValue::new_ia5(oid, &value)?,
                    _ => AttributeTypeAndValue::new_utf8(oid, &value)?,
                };
                set.insert(attr)?;
            }
            rdns.push(RelativeDistinguishedName(set));
        }
        Ok(Self { rdns })
    }

    pub fn push(&mut self, rdn: RelativeDistinguishedName) {
        self.rdns.push(rdn);
    }

    pub fn rdns(&self) -> &[RelativeDistinguishedName] {
        &self.rdns
    }

    pub fn iter(&self) -> core::slice::Iter<'_, RelativeDistinguishedName> {
        self.rdns.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.rdns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rdns.len()
    }

    /// All attributes of the given type, most general first.
    pub fn attributes(&self, oid: ObjectIdentifier) -> impl Iterator<Item = &AttributeTypeAndValue> {
        self.rdns
            .iter()
            .flat_map(|rdn| rdn.iter())
            .filter(move |attr| attr.oid == oid)
    }

    pub fn common_name(&self) -> Option<String> {
        self.attributes(COMMON_NAME).last().and_then(|a| a.value_str())
    }

    /// `emailAddress` attributes, which name constraints treat as RFC 822 names.
    pub fn email_addresses(&self) -> Vec<String> {
        self.attributes(EMAIL_ADDRESS)
            .filter_map(|a| a.value_str())
            .collect()
    }

    /// Per-RDN canonical keys, in sequence order.
    pub fn canonical_rdns(&self) -> Vec<Vec<(String, String)>> {
        self.rdns.iter().map(|rdn| rdn.canonical()).collect()
    }

    /// Canonical string form, most specific RDN first.
    pub fn canonical(&self) -> String {
        let mut parts = Vec::with_capacity(self.rdns.len());
        for rdn in self.rdns.iter().rev() {
            let attrs: Vec<String> = rdn
                .canonical()
                .into_iter()
                .map(|(oid, value)| alloc::format!("{}={}", oid, value))
                .collect();
            parts.push(attrs.join("+"));
        }
        parts.join(",")
    }

    /// Name equality under canonical comparison.
    pub fn matches(&self, other: &Name) -> bool {
        self.canonical_rdns() == other.canonical_rdns()
    }
}

impl<'a> DecodeValue<'a> for Name {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        Ok(Self {
            rdns: Vec::<RelativeDistinguishedName>::decode_value(reader, header)?,
        })
    }
}

impl EncodeValue for Name {
    fn value_len(&self) -> der::Result<Length> {
        self.rdns.value_len()
    }

    fn encode_value(&self, writer: &mut impl Writer) -> der::Result<()> {
        self.rdns.encode_value(writer)
    }
}

impl FixedTag for Name {
    const TAG: Tag = Tag::Sequence;
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, rdn) in self.rdns.iter().rev().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", rdn)?;
        }
        Ok(())
    }
}

// ============================================================================
// GeneralName - RFC 5280 Section 4.2.1.6
// ============================================================================

/// GeneralName as it appears on the wire.
///
/// The opaque forms keep their raw content octets; the comparison algebra
/// lives in [`crate::general_name`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneralName {
    /// otherName `[0]`
    OtherName(Vec<u8>),
    /// rfc822Name `[1]`
    Rfc822Name(String),
    /// dNSName `[2]`
    DnsName(String),
    /// x400Address `[3]`
    X400Address(Vec<u8>),
    /// directoryName `[4]`
    DirectoryName(Name),
    /// ediPartyName `[5]`
    EdiPartyName(Vec<u8>),
    /// uniformResourceIdentifier `[6]`
    Uri(String),
    /// iPAddress `[7]`: 4 or 16 octets, or 8 or 32 with a mask in name constraints
    IpAddress(Vec<u8>),
    /// registeredID `[8]`
    RegisteredId(ObjectIdentifier),
}

impl GeneralName {
    fn tag_number(&self) -> TagNumber {
        match self {
            GeneralName::OtherName(_) => TagNumber::N0,
            GeneralName::Rfc822Name(_) => TagNumber::N1,
            GeneralName::DnsName(_) => TagNumber::N2,
            GeneralName::X400Address(_) => TagNumber::N3,
            GeneralName::DirectoryName(_) => TagNumber::N4,
            GeneralName::EdiPartyName(_) => TagNumber::N5,
            GeneralName::Uri(_) => TagNumber::N6,
            GeneralName::IpAddress(_) => TagNumber::N7,
            GeneralName::RegisteredId(_) => TagNumber::N8,
        }
    }
}

fn read_text<'a, R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<String> {
    let bytes = reader.read_vec(header.length)?;
    String::from_utf8(bytes).map_err(|_| ErrorKind::Value { tag: header.tag }.into())
}

impl<'a> DecodeValue<'a> for GeneralName {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        let tag = header.tag;
        if !tag.is_context_specific() {
            return Err(ErrorKind::TagUnexpected {
                expected: None,
                actual: tag,
            }
            .into());
        }

        match tag.number() {
            TagNumber::N0 => Ok(GeneralName::OtherName(reader.read_vec(header.length)?)),
            TagNumber::N1 => Ok(GeneralName::Rfc822Name(read_text(reader, header)?)),
            TagNumber::N2 => Ok(GeneralName::DnsName(read_text(reader, header)?)),
            TagNumber::N3 => Ok(GeneralName::X400Address(reader.read_vec(header.length)?)),
            // EXPLICIT [4]: the inner SEQUENCE is scoped to the outer length.
            TagNumber::N4 => Ok(GeneralName::DirectoryName(
                reader.read_nested(header.length, Name::decode)?,
            )),
            TagNumber::N5 => Ok(GeneralName::EdiPartyName(reader.read_vec(header.length)?)),
            TagNumber::N6 => Ok(GeneralName::Uri(read_text(reader, header)?)),
            TagNumber::N7 => Ok(GeneralName::IpAddress(reader.read_vec(header.length)?)),
            // IMPLICIT [8] OBJECT IDENTIFIER
            TagNumber::N8 => {
                let oid_header = Header::new(Tag::ObjectIdentifier, header.length)?;
                Ok(GeneralName::RegisteredId(ObjectIdentifier::decode_value(
                    reader, oid_header,
                )?))
            }
            _ => Err(ErrorKind::TagUnexpected {
                expected: None,
                actual: tag,
            }
            .into()),
        }
    }
}

impl<'a> Decode<'a> for GeneralName {
    fn decode<R: Reader<'a>>(reader: &mut R) -> der::Result<Self> {
        let header = Header::decode(reader)?;
        Self::decode_value(reader, header)
    }
}

impl EncodeValue for GeneralName {
    fn value_len(&self) -> der::Result<Length> {
        match self {
            GeneralName::OtherName(bytes)
            | GeneralName::X400Address(bytes)
            | GeneralName::EdiPartyName(bytes)
            | GeneralName::IpAddress(bytes) => bytes.len().try_into(),
            GeneralName::Rfc822Name(s) | GeneralName::DnsName(s) | GeneralName::Uri(s) => {
                s.len().try_into()
            }
            GeneralName::DirectoryName(name) => name.encoded_len(),
            GeneralName::RegisteredId(oid) => oid.value_len(),
        }
    }

    fn encode_value(&self, writer: &mut impl Writer) -> der::Result<()> {
        match self {
            GeneralName::OtherName(bytes)
            | GeneralName::X400Address(bytes)
            | GeneralName::EdiPartyName(bytes)
            | GeneralName::IpAddress(bytes) => writer.write(bytes),
            GeneralName::Rfc822Name(s) | GeneralName::DnsName(s) | GeneralName::Uri(s) => {
                writer.write(s.as_bytes())
            }
            GeneralName::DirectoryName(name) => name.encode(writer),
            GeneralName::RegisteredId(oid) => oid.encode_value(writer),
        }
    }
}

impl Tagged for GeneralName {
    fn tag(&self) -> Tag {
        Tag::ContextSpecific {
            constructed: matches!(
                self,
                GeneralName::OtherName(_)
                    | GeneralName::X400Address(_)
                    | GeneralName::DirectoryName(_)
                    | GeneralName::EdiPartyName(_)
            ),
            number: self.tag_number(),
        }
    }
}

impl fmt::Display for GeneralName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeneralName::OtherName(_) => write!(f, "otherName:<opaque>"),
            GeneralName::Rfc822Name(email) => write!(f, "email:{}", email),
            GeneralName::DnsName(dns) => write!(f, "DNS:{}", dns),
            GeneralName::X400Address(_) => write!(f, "X400:<opaque>"),
            GeneralName::DirectoryName(name) => write!(f, "DirName:{}", name),
            GeneralName::EdiPartyName(_) => write!(f, "EDI:<opaque>"),
            GeneralName::Uri(uri) => write!(f, "URI:{}", uri),
            GeneralName::IpAddress(bytes) => {
                write!(f, "IP:")?;
                for (i, b) in bytes.iter().enumerate() {
                    if i > 0 {
                        write!(f, ".")?;
                    }
                    write!(f, "{}", b)?;
                }
                Ok(())
            }
            GeneralName::RegisteredId(oid) => write!(f, "RegID:{}", oid),
        }
    }
}

// ============================================================================
// SubjectAltName - RFC 5280 Section 4.2.1.6
// ============================================================================

/// SubjectAltName extension value (`GeneralNames`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubjectAltName {
    pub names: Vec<GeneralName>,
}

impl SubjectAltName {
    pub fn new(names: Vec<GeneralName>) -> Self {
        Self { names }
    }

    pub fn from_der(bytes: &[u8]) -> Result<Self> {
        Ok(Self {
            names: Vec::<GeneralName>::from_der(bytes)?,
        })
    }

    pub fn to_der(&self) -> Result<Vec<u8>> {
        Ok(self.names.to_der()?)
    }
}

/// Split on `sep` where it is not preceded by an escaping backslash.
fn split_unescaped(text: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut escaped = false;
    for (i, c) in text.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == sep {
            parts.push(&text[start..i]);
            start = i + c.len_utf8();
        }
    }
    parts.push(&text[start..]);
    parts
}

/// Resolve RFC 4514 §3 escapes and drop unescaped surrounding spaces.
fn unescape(raw: &str) -> Result<String> {
    let invalid = || Error::NameError(NameError::InvalidEncoding(raw.to_string()));
    let mut value = raw.trim_start();
    let trimmed = value.trim_end();
    // An odd run of trailing backslashes means the last space was escaped.
    let backslashes = trimmed.bytes().rev().take_while(|&b| b == b'\\').count();
    if backslashes % 2 == 1 && trimmed.len() < value.len() {
        value = &value[..trimmed.len() + 1];
    } else {
        value = trimmed;
    }

    let mut bytes = Vec::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            let mut buf = [0u8; 4];
            bytes.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            continue;
        }
        let next = chars.next().ok_or_else(invalid)?;
        if let Some(high) = next.to_digit(16) {
            let low = chars.next().and_then(|c| c.to_digit(16)).ok_or_else(invalid)?;
            bytes.push((high * 16 + low) as u8);
        } else if ESCAPABLE.contains(next) {
            bytes.push(next as u8);
        } else {
            return Err(invalid());
        }
    }
    String::from_utf8(bytes).map_err(|_| invalid())
}

/// Characters RFC 4514 allows after a backslash besides hex pairs.
const ESCAPABLE: &str = " \"#+,;<=>\\";

fn write_escaped(f: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
    let last = value.chars().count().saturating_sub(1);
    for (i, c) in value.chars().enumerate() {
        let edge_space = c == ' ' && (i == 0 || i == last);
        let leading_hash = c == '#' && i == 0;
        if edge_space || leading_hash || (c != ' ' && c != '#' && ESCAPABLE.contains(c)) {
            write!(f, "\\")?;
        }
        write!(f, "{}", c)?;
    }
    Ok(())
}
