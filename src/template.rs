// CLASSIFICATION: COMMUNITY
// Filename: template.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-19

//! Decoding template for the buffer filled by `VFAT_IOCTL_READDIR_*`.
//!
//! A [`DecodeTemplate`] is a list of [`Directive`]s. It renders to, and
//! parses from, the legacy struct-unpack syntax (`=16xH256s6x...`) so an
//! unmodified consumer can keep using the printed string, while Rust callers
//! decode buffers with [`DecodeTemplate::unpack`] and
//! [`DecodeTemplate::entries`].

use crate::config::{AdjacencyPolicy, ProbeConfig};
use crate::error::ProbeError;
use crate::layout::LayoutFacts;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Records returned per directory-listing call.
pub const RECORDS_PER_CALL: usize = 2;

/// Largest repeat count accepted on `B`, `H` or `I` when parsing.
pub const MAX_INT_REPEAT: usize = 4096;

/// Unsigned integer type of the `d_reclen` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntTag {
    U8,
    U16,
    U32,
}

impl IntTag {
    /// Tag for an integer field `width` bytes wide.
    pub fn from_width(width: usize) -> Result<Self, ProbeError> {
        match width {
            1 => Ok(IntTag::U8),
            2 => Ok(IntTag::U16),
            4 => Ok(IntTag::U32),
            other => Err(ProbeError::UnsupportedReclenWidth(other)),
        }
    }

    pub const fn width(self) -> usize {
        match self {
            IntTag::U8 => 1,
            IntTag::U16 => 2,
            IntTag::U32 => 4,
        }
    }

    /// Format character in the legacy syntax.
    pub const fn code(self) -> char {
        match self {
            IntTag::U8 => 'B',
            IntTag::U16 => 'H',
            IntTag::U32 => 'I',
        }
    }

    pub fn from_code(c: char) -> Option<Self> {
        match c {
            'B' => Some(IntTag::U8),
            'H' => Some(IntTag::U16),
            'I' => Some(IntTag::U32),
            _ => None,
        }
    }

    fn read_ne(self, bytes: &[u8]) -> u32 {
        let mut raw = [0u8; 4];
        raw[..bytes.len()].copy_from_slice(bytes);
        match self {
            IntTag::U8 => u32::from(raw[0]),
            IntTag::U16 => u32::from(u16::from_ne_bytes([raw[0], raw[1]])),
            IntTag::U32 => u32::from_ne_bytes(raw),
        }
    }
}

/// One step of the template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Directive {
    /// Skip this many bytes.
    Skip(usize),
    /// Read one native-endian unsigned integer.
    Int(IntTag),
    /// Read a fixed-length byte string.
    Bytes(usize),
}

impl Directive {
    /// Bytes consumed by this directive.
    pub const fn size(&self) -> usize {
        match self {
            Directive::Skip(n) | Directive::Bytes(n) => *n,
            Directive::Int(tag) => tag.width(),
        }
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Directive::Skip(n) => write!(f, "{n}x"),
            Directive::Int(tag) => write!(f, "{}", tag.code()),
            Directive::Bytes(n) => write!(f, "{n}s"),
        }
    }
}

/// A value produced by [`DecodeTemplate::unpack`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Value {
    Int(u32),
    Bytes(Vec<u8>),
}

/// A `(d_reclen, d_name)` pair taken from one record of the buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEntry {
    pub reclen: u32,
    pub name: Vec<u8>,
}

impl RawEntry {
    /// The first `reclen` bytes of the name.
    pub fn significant_name(&self) -> &[u8] {
        let len = (self.reclen as usize).min(self.name.len());
        &self.name[..len]
    }
}

/// Describes how to slice the two-record buffer into fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeTemplate {
    directives: Vec<Directive>,
}

impl DecodeTemplate {
    pub fn new(directives: Vec<Directive>) -> Self {
        Self { directives }
    }

    /// Build the template for [`RECORDS_PER_CALL`] back-to-back records.
    ///
    /// A `d_name` that does not directly follow `d_reclen` is logged and
    /// ignored under [`AdjacencyPolicy::Warn`]; the resulting template then
    /// omits the gap and is shorter than the buffer.
    pub fn build(facts: &LayoutFacts, config: &ProbeConfig) -> Result<Self, ProbeError> {
        let tag = IntTag::from_width(facts.reclen_size)?;

        if !facts.is_adjacent() {
            match config.adjacency {
                AdjacencyPolicy::Warn => warn!(
                    "d_name at {} does not follow d_reclen ending at {}",
                    facts.name_offset,
                    facts.reclen_end()
                ),
                AdjacencyPolicy::Deny => {
                    return Err(ProbeError::NameNotAdjacent {
                        reclen_end: facts.reclen_end(),
                        name_offset: facts.name_offset,
                    })
                }
            }
        }

        let padding = facts.trailing_padding()?;
        let record = [
            Directive::Skip(facts.reclen_offset),
            Directive::Int(tag),
            Directive::Bytes(facts.name_size),
            Directive::Skip(padding),
        ];
        let directives: Vec<Directive> = (0..RECORDS_PER_CALL).flat_map(|_| record).collect();
        debug!("built {} directives, tag {:?}, padding {}", directives.len(), tag, padding);
        Ok(Self { directives })
    }

    pub fn directives(&self) -> &[Directive] {
        &self.directives
    }

    /// Total bytes the template consumes.
    pub fn size(&self) -> Result<usize, ProbeError> {
        self.directives
            .iter()
            .try_fold(0usize, |total, d| total.checked_add(d.size()))
            .ok_or_else(|| ProbeError::TemplateSyntax("template size overflows usize".into()))
    }

    /// Decode `buf` with native byte order and no alignment.
    ///
    /// Skipped bytes produce no value. `buf` must be exactly [`Self::size`] long.
    pub fn unpack(&self, buf: &[u8]) -> Result<Vec<Value>, ProbeError> {
        let expected = self.size()?;
        if buf.len() != expected {
            return Err(ProbeError::BufferSize {
                expected,
                actual: buf.len(),
            });
        }

        let mut values = Vec::new();
        let mut pos = 0;
        for d in &self.directives {
            let field = &buf[pos..pos + d.size()];
            match d {
                Directive::Skip(_) => {}
                Directive::Int(tag) => values.push(Value::Int(tag.read_ne(field))),
                Directive::Bytes(_) => values.push(Value::Bytes(field.to_vec())),
            }
            pos += d.size();
        }
        Ok(values)
    }

    /// Decode `buf` into one entry per record.
    ///
    /// For `VFAT_IOCTL_READDIR_BOTH` the first entry holds the short name and
    /// the second the long name.
    pub fn entries(&self, buf: &[u8]) -> Result<Vec<RawEntry>, ProbeError> {
        let mut entries = Vec::new();
        let mut reclen = None;
        for value in self.unpack(buf)? {
            match (value, reclen.take()) {
                (Value::Int(v), None) => reclen = Some(v),
                (Value::Bytes(name), Some(v)) => entries.push(RawEntry { reclen: v, name }),
                _ => {
                    return Err(ProbeError::TemplateSyntax(
                        "integer and string fields do not alternate".into(),
                    ))
                }
            }
        }
        if reclen.is_some() {
            return Err(ProbeError::TemplateSyntax(
                "trailing integer without a name".into(),
            ));
        }
        Ok(entries)
    }
}

impl fmt::Display for DecodeTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("=")?;
        for d in &self.directives {
            write!(f, "{d}")?;
        }
        Ok(())
    }
}

impl FromStr for DecodeTemplate {
    type Err = ProbeError;

    /// Parse the legacy syntax. Only native order without alignment (`=`)
    /// is accepted, and it may be omitted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let body = s.strip_prefix('=').unwrap_or(s);
        let mut directives = Vec::new();
        let mut count: Option<usize> = None;

        for c in body.chars() {
            if let Some(digit) = c.to_digit(10) {
                let n = count
                    .unwrap_or(0)
                    .checked_mul(10)
                    .and_then(|n| n.checked_add(digit as usize))
                    .ok_or_else(|| ProbeError::TemplateSyntax(format!("count overflow in {s:?}")))?;
                count = Some(n);
                continue;
            }
            if c.is_whitespace() {
                if count.is_some() {
                    return Err(ProbeError::TemplateSyntax(format!(
                        "whitespace after count in {s:?}"
                    )));
                }
                continue;
            }
            let n = count.take().unwrap_or(1);
            match c {
                'x' => directives.push(Directive::Skip(n)),
                's' => directives.push(Directive::Bytes(n)),
                _ => match IntTag::from_code(c) {
                    Some(_) if n > MAX_INT_REPEAT => {
                        return Err(ProbeError::TemplateSyntax(format!(
                            "repeat count {n} on {c:?} exceeds {MAX_INT_REPEAT}"
                        )))
                    }
                    Some(tag) => directives.extend((0..n).map(|_| Directive::Int(tag))),
                    None => {
                        return Err(ProbeError::TemplateSyntax(format!(
                            "unsupported format character {c:?}"
                        )))
                    }
                },
            }
        }
        if count.is_some() {
            return Err(ProbeError::TemplateSyntax(format!(
                "count without format character in {s:?}"
            )));
        }
        let template = Self { directives };
        template.size()?;
        Ok(template)
    }
}
