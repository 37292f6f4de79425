// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! BIND master-file ("zone file") parsing.
//!
//! Parses the RFC 1035 master file subset the import flow needs:
//!
//! - `$ORIGIN` and `$TTL` directives
//! - comments (`;` to end of line, quote-aware) and blank lines
//! - owner inheritance (a line starting with whitespace reuses the previous
//!   owner name)
//! - optional TTL and class fields in either order; only class `IN`
//! - parenthesized continuations (multi-line SOA records)
//! - TTL values as plain seconds or with BIND unit suffixes (`30m`, `1h`)
//!
//! Parsing is total per line: every malformed line yields a [`ParseError`]
//! with its line number and all errors are returned together, so a caller can
//! fix a file in one pass. Records of types zoneport cannot import are
//! collected into [`UnsupportedRecords`] metadata rather than failing the
//! parse.

use crate::records::{
    AValue, AaaaValue, AliasValue, CaaValue, CnameValue, MxValue, NsValue, ParsedRecord,
    RecordData, RecordType, SoaValue, SrvValue, TxtValue, UnsupportedRecords,
};
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

/// One malformed zone-file line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {message}")]
pub struct ParseError {
    /// 1-based physical line number where the entry starts.
    pub line: usize,
    /// Description of the problem.
    pub message: String,
}

impl ParseError {
    fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

/// A successfully parsed zone file.
#[derive(Debug, Clone, Default)]
pub struct ZoneFile {
    /// Origin from the `$ORIGIN` directive, if present (trailing dot kept).
    pub origin: Option<String>,
    /// Default TTL from the `$TTL` directive, if present.
    pub default_ttl: Option<u32>,
    /// The parsed records, in file order.
    pub records: Vec<ParsedRecord>,
    /// Records of types zoneport cannot import, counted per type token.
    pub unsupported: UnsupportedRecords,
}

/// Parse zone-file text into records.
///
/// # Errors
///
/// Returns every [`ParseError`] found; the file is rejected as a whole if any
/// line is malformed. Unsupported record types are not errors.
pub fn parse_zone_file(input: &str) -> Result<ZoneFile, Vec<ParseError>> {
    let mut zone = ZoneFile::default();
    let mut errors = Vec::new();
    let mut state = ParserState::default();

    for entry in logical_entries(input) {
        let LogicalEntry { line, text } = entry;
        if text.trim().is_empty() {
            continue;
        }

        let result = if text.trim_start().starts_with('$') {
            parse_directive(text.trim(), line, &mut zone, &mut state)
        } else {
            parse_record_line(&text, line, &mut zone, &mut state)
        };

        if let Err(e) = result {
            errors.push(e);
        }
    }

    if errors.is_empty() {
        debug!(
            records = zone.records.len(),
            unsupported = zone.unsupported.total_records,
            origin = ?zone.origin,
            "Parsed zone file"
        );
        Ok(zone)
    } else {
        Err(errors)
    }
}

/// Mutable parser context threaded through the lines.
#[derive(Debug, Default)]
struct ParserState {
    /// Owner of the previous record, inherited by indented lines.
    last_owner: Option<String>,
}

/// One logical entry: a physical line, or several joined by parentheses.
struct LogicalEntry {
    /// 1-based number of the first physical line of the entry.
    line: usize,
    text: String,
}

/// Split input into logical entries, joining parenthesized continuations.
///
/// Parentheses inside quoted strings or after a comment marker do not open a
/// continuation.
fn logical_entries(input: &str) -> Vec<LogicalEntry> {
    let mut entries = Vec::new();
    let mut pending: Option<LogicalEntry> = None;
    let mut depth: i32 = 0;

    for (idx, raw) in input.lines().enumerate() {
        let mut in_quotes = false;
        let mut effective = String::with_capacity(raw.len());
        for c in raw.chars() {
            match c {
                '"' => {
                    in_quotes = !in_quotes;
                    effective.push(c);
                }
                ';' if !in_quotes => break,
                '(' if !in_quotes => {
                    depth += 1;
                    effective.push(' ');
                }
                ')' if !in_quotes => {
                    depth -= 1;
                    effective.push(' ');
                }
                _ => effective.push(c),
            }
        }

        match pending.as_mut() {
            Some(entry) => {
                entry.text.push(' ');
                entry.text.push_str(&effective);
            }
            None => {
                pending = Some(LogicalEntry {
                    line: idx + 1,
                    text: effective,
                });
            }
        }

        if depth <= 0 {
            depth = 0;
            if let Some(entry) = pending.take() {
                entries.push(entry);
            }
        }
    }

    // Unbalanced parens at EOF: flush what we have and let the record
    // parser report the malformed entry.
    if let Some(entry) = pending.take() {
        entries.push(entry);
    }

    entries
}

/// Handle `$ORIGIN` and `$TTL`.
fn parse_directive(
    line: &str,
    line_no: usize,
    zone: &mut ZoneFile,
    _state: &mut ParserState,
) -> Result<(), ParseError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    match tokens[0].to_ascii_uppercase().as_str() {
        "$ORIGIN" => {
            let origin = tokens
                .get(1)
                .ok_or_else(|| ParseError::new(line_no, "$ORIGIN requires a domain name"))?;
            zone.origin = Some((*origin).to_string());
            Ok(())
        }
        "$TTL" => {
            let value = tokens
                .get(1)
                .ok_or_else(|| ParseError::new(line_no, "$TTL requires a value"))?;
            let ttl = parse_ttl_value(value)
                .ok_or_else(|| ParseError::new(line_no, format!("invalid $TTL value '{value}'")))?;
            zone.default_ttl = Some(ttl);
            Ok(())
        }
        other => Err(ParseError::new(
            line_no,
            format!("unsupported directive '{other}'"),
        )),
    }
}

/// Parse one record entry: `[owner] [ttl] [class] type rdata...`.
fn parse_record_line(
    line: &str,
    line_no: usize,
    zone: &mut ZoneFile,
    state: &mut ParserState,
) -> Result<(), ParseError> {
    let inherits_owner = line.starts_with(|c: char| c.is_whitespace());
    let mut tokens = tokenize(line);
    if tokens.is_empty() {
        return Ok(());
    }

    let owner = if inherits_owner {
        state
            .last_owner
            .clone()
            .unwrap_or_else(|| crate::constants::APEX_NAME.to_string())
    } else {
        tokens.remove(0)
    };

    // TTL and class may appear in either order before the type token.
    let mut ttl: Option<u32> = None;
    let mut type_token: Option<String> = None;
    let mut rest: Vec<String> = Vec::new();

    let mut iter = tokens.into_iter();
    for token in iter.by_ref() {
        if ttl.is_none() {
            if let Some(parsed) = parse_ttl_value(&token) {
                ttl = Some(parsed);
                continue;
            }
        }
        if token.eq_ignore_ascii_case("IN") {
            continue;
        }
        if token.eq_ignore_ascii_case("CH") || token.eq_ignore_ascii_case("HS") {
            return Err(ParseError::new(
                line_no,
                format!("unsupported record class '{token}'"),
            ));
        }
        type_token = Some(token);
        break;
    }
    rest.extend(iter);

    let Some(type_token) = type_token else {
        return Err(ParseError::new(line_no, "missing record type"));
    };

    let record_type = match RecordType::from_str(&type_token) {
        Ok(rt) => rt,
        Err(_) if type_token.chars().all(|c| c.is_ascii_alphanumeric()) => {
            // A well-formed but unsupported type: count it, keep parsing.
            zone.unsupported.push(&type_token.to_ascii_uppercase());
            state.last_owner = Some(owner);
            return Ok(());
        }
        Err(e) => return Err(ParseError::new(line_no, e.to_string())),
    };

    let data = parse_rdata(record_type, &rest, line_no)?;
    state.last_owner = Some(owner.clone());
    zone.records.push(ParsedRecord {
        name: owner,
        ttl: ttl.or(zone.default_ttl),
        data,
    });
    Ok(())
}

/// Split a line into tokens, keeping quoted strings as single tokens with
/// their quotes stripped but marked so TXT parsing can tell them apart.
fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut was_quoted = false;

    for c in line.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                was_quoted = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if !current.is_empty() || was_quoted {
                    tokens.push(if was_quoted {
                        format!("\"{current}\"")
                    } else {
                        current.clone()
                    });
                }
                current.clear();
                was_quoted = false;
            }
            _ => current.push(c),
        }
    }
    if !current.is_empty() || was_quoted {
        tokens.push(if was_quoted {
            format!("\"{current}\"")
        } else {
            current
        });
    }
    tokens
}

/// Strip the quote markers [`tokenize`] leaves on a quoted token.
fn unquote(token: &str) -> &str {
    token
        .strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .unwrap_or(token)
}

/// Parse a TTL token: plain seconds or BIND unit suffixes (`s m h d w`),
/// possibly combined (`1h30m`).
fn parse_ttl_value(token: &str) -> Option<u32> {
    if token.is_empty() {
        return None;
    }
    if let Ok(secs) = token.parse::<u32>() {
        return Some(secs);
    }

    let mut total: u64 = 0;
    let mut digits = String::new();
    for c in token.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
        } else {
            let value: u64 = digits.parse().ok()?;
            digits.clear();
            let unit: u64 = match c.to_ascii_lowercase() {
                's' => 1,
                'm' => 60,
                'h' => 3600,
                'd' => 86_400,
                'w' => 604_800,
                _ => return None,
            };
            total = total.checked_add(value.checked_mul(unit)?)?;
        }
    }
    if !digits.is_empty() {
        // Trailing bare digits without a unit ("1h30") are malformed.
        return None;
    }
    u32::try_from(total).ok()
}

/// Parse the rdata tokens for a supported record type.
fn parse_rdata(
    record_type: RecordType,
    tokens: &[String],
    line_no: usize,
) -> Result<RecordData, ParseError> {
    let expect = |n: usize, what: &str| -> Result<(), ParseError> {
        if tokens.len() < n {
            Err(ParseError::new(
                line_no,
                format!("{record_type} record requires {what}"),
            ))
        } else {
            Ok(())
        }
    };

    match record_type {
        RecordType::A => {
            expect(1, "an IPv4 address")?;
            let address = tokens[0].parse().map_err(|_| {
                ParseError::new(line_no, format!("invalid IPv4 address '{}'", tokens[0]))
            })?;
            Ok(RecordData::A(AValue { address }))
        }
        RecordType::AAAA => {
            expect(1, "an IPv6 address")?;
            let address = tokens[0].parse().map_err(|_| {
                ParseError::new(line_no, format!("invalid IPv6 address '{}'", tokens[0]))
            })?;
            Ok(RecordData::AAAA(AaaaValue { address }))
        }
        RecordType::CNAME => {
            expect(1, "a target name")?;
            Ok(RecordData::CNAME(CnameValue {
                target: tokens[0].clone(),
            }))
        }
        RecordType::ALIAS => {
            expect(1, "a target name")?;
            Ok(RecordData::ALIAS(AliasValue {
                target: tokens[0].clone(),
            }))
        }
        RecordType::NS => {
            expect(1, "a nameserver name")?;
            Ok(RecordData::NS(NsValue {
                nameserver: tokens[0].clone(),
            }))
        }
        RecordType::MX => {
            expect(2, "a priority and a mail server")?;
            let priority = tokens[0].parse().map_err(|_| {
                ParseError::new(line_no, format!("invalid MX priority '{}'", tokens[0]))
            })?;
            Ok(RecordData::MX(MxValue {
                priority,
                mail_server: tokens[1].clone(),
            }))
        }
        RecordType::TXT => {
            expect(1, "at least one string")?;
            Ok(RecordData::TXT(TxtValue {
                text: tokens.iter().map(|t| unquote(t).to_string()).collect(),
            }))
        }
        RecordType::SRV => {
            expect(4, "priority, weight, port, and target")?;
            let parse_u16 = |i: usize, what: &str| {
                tokens[i].parse::<u16>().map_err(|_| {
                    ParseError::new(line_no, format!("invalid SRV {what} '{}'", tokens[i]))
                })
            };
            Ok(RecordData::SRV(SrvValue {
                priority: parse_u16(0, "priority")?,
                weight: parse_u16(1, "weight")?,
                port: parse_u16(2, "port")?,
                target: tokens[3].clone(),
            }))
        }
        RecordType::CAA => {
            expect(3, "flags, tag, and value")?;
            let flags = tokens[0].parse().map_err(|_| {
                ParseError::new(line_no, format!("invalid CAA flags '{}'", tokens[0]))
            })?;
            Ok(RecordData::CAA(CaaValue {
                flags,
                tag: tokens[1].clone(),
                value: unquote(&tokens[2]).to_string(),
            }))
        }
        RecordType::SOA => {
            expect(7, "primary NS, admin email, and five timer values")?;
            let parse_timer = |i: usize, what: &str| {
                parse_ttl_value(&tokens[i]).ok_or_else(|| {
                    ParseError::new(line_no, format!("invalid SOA {what} '{}'", tokens[i]))
                })
            };
            Ok(RecordData::SOA(SoaValue {
                primary_ns: tokens[0].clone(),
                admin_email: tokens[1].clone(),
                serial: tokens[2].parse().map_err(|_| {
                    ParseError::new(line_no, format!("invalid SOA serial '{}'", tokens[2]))
                })?,
                refresh: parse_timer(3, "refresh")?,
                retry: parse_timer(4, "retry")?,
                expire: parse_timer(5, "expire")?,
                negative_ttl: parse_timer(6, "negative TTL")?,
            }))
        }
    }
}

#[cfg(test)]
#[path = "zonefile_tests.rs"]
mod zonefile_tests;
