// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Typed DNS record model for zone imports.
//!
//! This module defines the record types zoneport understands and the tagged
//! [`RecordData`] union carrying each type's value fields. Keeping the value
//! fields in a closed union means the dedup/merge logic downstream is checked
//! exhaustively by the compiler instead of pattern-matching on loose JSON.
//!
//! # Example
//!
//! ```rust
//! use zoneport::records::{AValue, ParsedRecord, RecordData, RecordType};
//!
//! let record = ParsedRecord {
//!     name: "www".to_string(),
//!     ttl: Some(300),
//!     data: RecordData::A(AValue {
//!         address: "192.0.2.1".parse().unwrap(),
//!     }),
//! };
//!
//! assert_eq!(record.record_type(), RecordType::A);
//! assert_eq!(record.data.value(), "192.0.2.1");
//! ```

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

/// DNS record types known to the importer.
///
/// The order of variants defines the per-type ordering of import reports:
/// grouped records are reconciled and reported in this order.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
pub enum RecordType {
    /// IPv4 address record
    A,
    /// IPv6 address record
    AAAA,
    /// Canonical name (alias) record; invalid at a zone apex
    CNAME,
    /// Platform-specific apex-safe alias record
    ALIAS,
    /// Mail exchange record
    MX,
    /// Text record (SPF, DKIM, DMARC, verification tokens)
    TXT,
    /// Nameserver delegation record
    NS,
    /// Start of authority record; platform-managed, never imported
    SOA,
    /// Service location record
    SRV,
    /// Certificate authority authorization record
    CAA,
}

impl RecordType {
    /// Whether records of this type may be written to the control plane.
    ///
    /// SOA records are platform-managed: they are parsed (so apex filtering
    /// can disclose them) but never importable.
    #[must_use]
    pub fn is_importable(self) -> bool {
        !matches!(self, Self::SOA)
    }

    /// String form as used on the wire and in zone files.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::AAAA => "AAAA",
            Self::CNAME => "CNAME",
            Self::ALIAS => "ALIAS",
            Self::MX => "MX",
            Self::TXT => "TXT",
            Self::NS => "NS",
            Self::SOA => "SOA",
            Self::SRV => "SRV",
            Self::CAA => "CAA",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = UnknownRecordType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "A" => Ok(Self::A),
            "AAAA" => Ok(Self::AAAA),
            "CNAME" => Ok(Self::CNAME),
            "ALIAS" => Ok(Self::ALIAS),
            "MX" => Ok(Self::MX),
            "TXT" => Ok(Self::TXT),
            "NS" => Ok(Self::NS),
            "SOA" => Ok(Self::SOA),
            "SRV" => Ok(Self::SRV),
            "CAA" => Ok(Self::CAA),
            _ => Err(UnknownRecordType {
                token: s.to_string(),
            }),
        }
    }
}

/// Error returned when a record type token is not one zoneport knows.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown record type '{token}'")]
pub struct UnknownRecordType {
    /// The unrecognized type token as it appeared in the input.
    pub token: String,
}

/// IPv4 address record value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AValue {
    /// The IPv4 address this name resolves to.
    pub address: Ipv4Addr,
}

/// IPv6 address record value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AaaaValue {
    /// The IPv6 address this name resolves to.
    pub address: Ipv6Addr,
}

/// CNAME record value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CnameValue {
    /// Canonical target name (e.g., `foo.example.com.`).
    pub target: String,
}

/// ALIAS record value. Behaves like CNAME but is valid at a zone apex.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AliasValue {
    /// Target name the alias resolves through.
    pub target: String,
}

/// MX record value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MxValue {
    /// Preference value; lower is preferred.
    pub priority: u16,
    /// Mail server host name.
    pub mail_server: String,
}

/// TXT record value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TxtValue {
    /// Character strings of the record, in order.
    pub text: Vec<String>,
}

/// NS record value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct NsValue {
    /// Delegated nameserver host name.
    pub nameserver: String,
}

/// SOA record value.
///
/// Only ever seen at a zone apex; carried so the apex filter can disclose
/// what was dropped rather than discarding it silently.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SoaValue {
    /// Primary nameserver for the zone.
    pub primary_ns: String,
    /// Zone administrator mailbox in SOA form (@ replaced with .).
    pub admin_email: String,
    /// Zone serial number.
    pub serial: u32,
    /// Refresh interval in seconds.
    pub refresh: u32,
    /// Retry interval in seconds.
    pub retry: u32,
    /// Expire time in seconds.
    pub expire: u32,
    /// Negative caching TTL in seconds.
    pub negative_ttl: u32,
}

/// SRV record value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SrvValue {
    /// Target selection priority; lower is preferred.
    pub priority: u16,
    /// Relative weight among targets of equal priority.
    pub weight: u16,
    /// Service port on the target host.
    pub port: u16,
    /// Target host name.
    pub target: String,
}

/// CAA record value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CaaValue {
    /// Critical flag byte (0 or 128).
    pub flags: u8,
    /// Property tag: `issue`, `issuewild`, or `iodef`.
    pub tag: String,
    /// Property value (e.g., the CA domain).
    pub value: String,
}

/// Value fields of one DNS record, tagged by record type.
///
/// Serialized internally tagged on `type`, so a record travels as
/// `{"type": "MX", "priority": 10, "mailServer": "mail.example.com."}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type")]
pub enum RecordData {
    /// IPv4 address record
    A(AValue),
    /// IPv6 address record
    AAAA(AaaaValue),
    /// Canonical name record
    CNAME(CnameValue),
    /// Apex-safe alias record
    ALIAS(AliasValue),
    /// Mail exchange record
    MX(MxValue),
    /// Text record
    TXT(TxtValue),
    /// Nameserver delegation record
    NS(NsValue),
    /// Start of authority record
    SOA(SoaValue),
    /// Service location record
    SRV(SrvValue),
    /// Certificate authority authorization record
    CAA(CaaValue),
}

impl RecordData {
    /// The record type of this value.
    #[must_use]
    pub fn record_type(&self) -> RecordType {
        match self {
            Self::A(_) => RecordType::A,
            Self::AAAA(_) => RecordType::AAAA,
            Self::CNAME(_) => RecordType::CNAME,
            Self::ALIAS(_) => RecordType::ALIAS,
            Self::MX(_) => RecordType::MX,
            Self::TXT(_) => RecordType::TXT,
            Self::NS(_) => RecordType::NS,
            Self::SOA(_) => RecordType::SOA,
            Self::SRV(_) => RecordType::SRV,
            Self::CAA(_) => RecordType::CAA,
        }
    }

    /// Human-readable value rendering for report rows.
    #[must_use]
    pub fn value(&self) -> String {
        match self {
            Self::A(v) => v.address.to_string(),
            Self::AAAA(v) => v.address.to_string(),
            Self::CNAME(v) => v.target.clone(),
            Self::ALIAS(v) => v.target.clone(),
            Self::MX(v) => format!("{} {}", v.priority, v.mail_server),
            Self::TXT(v) => v
                .text
                .iter()
                .map(|s| format!("\"{s}\""))
                .collect::<Vec<_>>()
                .join(" "),
            Self::NS(v) => v.nameserver.clone(),
            Self::SOA(v) => format!(
                "{} {} {} {} {} {} {}",
                v.primary_ns, v.admin_email, v.serial, v.refresh, v.retry, v.expire, v.negative_ttl
            ),
            Self::SRV(v) => format!("{} {} {} {}", v.priority, v.weight, v.port, v.target),
            Self::CAA(v) => format!("{} {} \"{}\"", v.flags, v.tag, v.value),
        }
    }

    /// Canonical value form used for duplicate detection.
    ///
    /// Domain-valued fields are compared DNS-style: one trailing dot stripped
    /// and ASCII case folded. Addresses, text, and numeric fields compare
    /// literally.
    #[must_use]
    pub fn normalized_value(&self) -> String {
        match self {
            Self::A(v) => v.address.to_string(),
            Self::AAAA(v) => v.address.to_string(),
            Self::CNAME(v) => normalize_name(&v.target),
            Self::ALIAS(v) => normalize_name(&v.target),
            Self::MX(v) => format!("{} {}", v.priority, normalize_name(&v.mail_server)),
            Self::TXT(v) => v.text.join("\u{0}"),
            Self::NS(v) => normalize_name(&v.nameserver),
            Self::SOA(v) => format!(
                "{} {} {} {} {} {} {}",
                normalize_name(&v.primary_ns),
                normalize_name(&v.admin_email),
                v.serial,
                v.refresh,
                v.retry,
                v.expire,
                v.negative_ttl
            ),
            Self::SRV(v) => format!(
                "{} {} {} {}",
                v.priority,
                v.weight,
                v.port,
                normalize_name(&v.target)
            ),
            Self::CAA(v) => format!("{} {} {}", v.flags, v.tag.to_ascii_lowercase(), v.value),
        }
    }
}

/// One parsed DNS record: owner name, optional TTL, and typed value fields.
///
/// Parsed records are transient: produced per import request by the zone-file
/// parser (or received in the request body) and discarded after
/// reconciliation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ParsedRecord {
    /// Owner name, relative (`www`), apex (`@`), or fully qualified.
    pub name: String,

    /// Time to live in seconds; None means the zone default applies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,

    /// Typed value fields, tagged by record type.
    #[serde(flatten)]
    pub data: RecordData,
}

impl ParsedRecord {
    /// The record type of this record.
    #[must_use]
    pub fn record_type(&self) -> RecordType {
        self.data.record_type()
    }

    /// Owner name with one trailing dot stripped and case folded.
    #[must_use]
    pub fn normalized_name(&self) -> String {
        normalize_name(&self.name)
    }

    /// Duplicate-detection key: two records are duplicates iff their keys
    /// are equal.
    #[must_use]
    pub fn dedup_key(&self) -> DedupKey {
        DedupKey {
            name: self.normalized_name(),
            record_type: self.record_type(),
            value: self.data.normalized_value(),
            ttl: self.ttl,
        }
    }
}

/// Equality key for duplicate detection: `(name, type, value, ttl)` with
/// name and domain-valued fields normalized.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DedupKey {
    /// Normalized owner name.
    pub name: String,
    /// Record type.
    pub record_type: RecordType,
    /// Normalized value fields.
    pub value: String,
    /// TTL; part of the identity so differing TTLs are not duplicates.
    pub ttl: Option<u32>,
}

/// Strip one trailing dot from a DNS name and fold ASCII case.
///
/// `"Foo.Example.COM."` and `"foo.example.com"` normalize identically.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    name.strip_suffix('.').unwrap_or(name).to_ascii_lowercase()
}

/// Summary of record types found in a zone file that zoneport cannot import.
///
/// Unsupported types are not fatal: the import proceeds with supported types
/// and this summary is surfaced to the caller.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UnsupportedRecords {
    /// Distinct unsupported type tokens, in first-seen order.
    pub types: Vec<String>,
    /// Total number of records of unsupported types.
    pub total_records: usize,
}

impl UnsupportedRecords {
    /// Record one unsupported-type occurrence.
    pub fn push(&mut self, token: &str) {
        if !self.types.iter().any(|t| t == token) {
            self.types.push(token.to_string());
        }
        self.total_records += 1;
    }

    /// True if no unsupported records were seen.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_records == 0
    }
}

#[cfg(test)]
#[path = "records_tests.rs"]
mod records_tests;
