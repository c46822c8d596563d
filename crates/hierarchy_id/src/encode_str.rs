//! The canonical string form, `/1/2/3/`.
//!
//! The root is exactly `/`. Every label is written in decimal followed by a
//! slash. The grammar is strict: parsing only accepts what [`format`] can
//! produce, so `format(parse(s)) == s` for every accepted `s`.

use std::{fmt, str::FromStr};

use crate::{
    error::{ParseError, ParseResult},
    HierarchyId, Label,
};

/// Parse the canonical string form.
pub fn parse(s: &str) -> ParseResult<HierarchyId> {
    let inner = s
        .strip_prefix('/')
        .ok_or_else(|| ParseError::malformed(s, "missing leading '/'"))?;
    if inner.is_empty() {
        return Ok(HierarchyId::root());
    }
    let inner = inner
        .strip_suffix('/')
        .ok_or_else(|| ParseError::malformed(s, "missing trailing '/'"))?;

    inner
        .split('/')
        .map(|segment| parse_label(s, segment))
        .collect::<ParseResult<Vec<_>>>()
        .map(HierarchyId::new)
}

/// Render the canonical string form. Never fails.
pub fn format(id: &HierarchyId) -> String {
    id.to_string()
}

fn parse_label(input: &str, segment: &str) -> ParseResult<Label> {
    if segment.is_empty() {
        return Err(ParseError::malformed(input, "empty segment"));
    }
    if !segment.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::malformed(
            input,
            "segment is not a decimal label",
        ));
    }
    if segment.len() > 1 && segment.starts_with('0') {
        return Err(ParseError::malformed(input, "segment has leading zeros"));
    }
    segment
        .parse::<u64>()
        .ok()
        .and_then(|v| Label::try_from(v).ok())
        .ok_or_else(|| ParseError::malformed(input, "label out of range"))
}

impl fmt::Display for HierarchyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("/")?;
        for label in self.labels() {
            write!(f, "{}/", label)?;
        }
        Ok(())
    }
}

impl fmt::Debug for HierarchyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HierarchyId({})", self)
    }
}

impl FromStr for HierarchyId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

impl TryFrom<&str> for HierarchyId {
    type Error = ParseError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        parse(s)
    }
}

impl TryFrom<String> for HierarchyId {
    type Error = ParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        parse(&s)
    }
}

impl TryFrom<&String> for HierarchyId {
    type Error = ParseError;

    fn try_from(s: &String) -> Result<Self, Self::Error> {
        parse(s)
    }
}
