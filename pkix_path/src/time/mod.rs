// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Certificate time values and validity periods.
//!
//! UTCTime and GeneralizedTime are both accepted when decoding (RFC 5280
//! §4.1.2.5) and compare on their Unix instant, so a path can mix the two.

use core::cmp::Ordering;
use core::time::Duration;
use der::{
    asn1::{GeneralizedTime, UtcTime},
    Decode, DecodeValue, Encode, EncodeValue, Header, Length, Reader, Sequence, Tag, Writer,
};

/// A timestamp that can be either UTCTime or GeneralizedTime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Time {
    /// UTCTime format (YYMMDDHHMMSSZ)
    UtcTime(UtcTime),
    /// GeneralizedTime format (YYYYMMDDHHMMSSZ)
    GeneralizedTime(GeneralizedTime),
}

impl Time {
    /// Build a time from seconds since the Unix epoch.
    ///
    /// Instants before 2050 are stored as UTCTime, later ones as
    /// GeneralizedTime, which is what a conforming encoder emits.
    pub fn from_unix_secs(secs: u64) -> der::Result<Self> {
        let duration = Duration::from_secs(secs);
        match UtcTime::from_unix_duration(duration) {
            Ok(utc) => Ok(Time::UtcTime(utc)),
            Err(_) => Ok(Time::GeneralizedTime(GeneralizedTime::from_unix_duration(
                duration,
            )?)),
        }
    }

    /// Seconds since the Unix epoch.
    pub fn unix_duration(&self) -> Duration {
        match self {
            Time::UtcTime(utc) => utc.to_unix_duration(),
            Time::GeneralizedTime(gen) => gen.to_unix_duration(),
        }
    }

    /// Checks if this time is strictly before another time.
    pub fn is_before(&self, other: &Time) -> bool {
        self.unix_duration() < other.unix_duration()
    }

    /// Checks if this time is strictly after another time.
    pub fn is_after(&self, other: &Time) -> bool {
        self.unix_duration() > other.unix_duration()
    }
}

impl PartialOrd for Time {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Time {
    fn cmp(&self, other: &Self) -> Ordering {
        self.unix_duration().cmp(&other.unix_duration())
    }
}

impl core::fmt::Display for Time {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let dt = match self {
            Time::UtcTime(utc) => utc.to_date_time(),
            Time::GeneralizedTime(gen) => gen.to_date_time(),
        };
        write!(f, "{}", dt)
    }
}

impl<'a> DecodeValue<'a> for Time {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        match header.tag {
            Tag::UtcTime => Ok(Time::UtcTime(UtcTime::decode_value(reader, header)?)),
            Tag::GeneralizedTime => Ok(Time::GeneralizedTime(GeneralizedTime::decode_value(
                reader, header,
            )?)),
            tag => Err(der::Error::from(der::ErrorKind::TagUnexpected {
                expected: Some(Tag::UtcTime),
                actual: tag,
            })),
        }
    }
}

impl<'a> Decode<'a> for Time {
    fn decode<R: Reader<'a>>(reader: &mut R) -> der::Result<Self> {
        let header = Header::decode(reader)?;
        Self::decode_value(reader, header)
    }
}

impl Encode for Time {
    fn encoded_len(&self) -> der::Result<Length> {
        match self {
            Time::UtcTime(utc) => utc.encoded_len(),
            Time::GeneralizedTime(gen) => gen.encoded_len(),
        }
    }

    fn encode(&self, writer: &mut impl Writer) -> der::Result<()> {
        match self {
            Time::UtcTime(utc) => utc.encode(writer),
            Time::GeneralizedTime(gen) => gen.encode(writer),
        }
    }
}

impl EncodeValue for Time {
    fn value_len(&self) -> der::Result<Length> {
        match self {
            Time::UtcTime(utc) => utc.value_len(),
            Time::GeneralizedTime(gen) => gen.value_len(),
        }
    }

    fn encode_value(&self, writer: &mut impl Writer) -> der::Result<()> {
        match self {
            Time::UtcTime(utc) => utc.encode_value(writer),
            Time::GeneralizedTime(gen) => gen.encode_value(writer),
        }
    }
}

/// Certificate validity period.
///
/// ```text
/// Validity ::= SEQUENCE {
///     notBefore      Time,
///     notAfter       Time
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Sequence)]
pub struct Validity {
    /// The time before which the certificate is not valid.
    pub not_before: Time,
    /// The time after which the certificate is not valid.
    pub not_after: Time,
}

impl Validity {
    pub const fn new(not_before: Time, not_after: Time) -> Self {
        Validity {
            not_before,
            not_after,
        }
    }

    /// Checks if `check_time` lies within `[notBefore, notAfter]`, both ends inclusive.
    pub fn is_valid_at(&self, check_time: &Time) -> bool {
        !check_time.is_before(&self.not_before) && !check_time.is_after(&self.not_after)
    }

    /// Checks if the validity period is well-formed.
    pub fn is_well_formed(&self) -> bool {
        !self.not_before.is_after(&self.not_after)
    }
}

/// Gets current time as X.509 Time.
pub fn current_time() -> der::Result<Time> {
    #[cfg(feature = "std")]
    {
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_err(|_| der::Error::from(der::ErrorKind::DateTime))?;
        Time::from_unix_secs(now.as_secs())
    }

    // Without a clock the caller has to pass a reference time explicitly.
    #[cfg(not(feature = "std"))]
    {
        Err(der::Error::from(der::ErrorKind::DateTime))
    }
}
