//! Errors produced while constructing, parsing and decoding hierarchy ids.

/// A label value outside `0 ..= Label::MAX`.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Label {0} is out of range, labels must be within 0..={max}", max = crate::Label::MAX)]
pub struct LabelOutOfRange(pub i128);

/// The string form did not follow the canonical `/a/b/c/` grammar.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Missing slashes, an empty segment, or a segment that is not a label.
    #[error("Malformed hierarchy path {input:?}: {reason}")]
    MalformedPath {
        /// The rejected input
        input: String,
        /// Which rule of the grammar was broken
        reason: &'static str,
    },
}

impl ParseError {
    pub(crate) fn malformed(input: &str, reason: &'static str) -> Self {
        Self::MalformedPath {
            input: input.to_string(),
            reason,
        }
    }
}

/// The byte form could not be decoded.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Input ended inside a band marker or payload.
    #[error("Hierarchy id bytes end in the middle of a label")]
    Truncated,

    /// A band marker outside the defined bands, starting at the given bit.
    #[error("Invalid band marker at bit {bit}")]
    InvalidBand {
        /// Bit offset of the first marker bit
        bit: usize,
    },

    /// Non-zero padding, or padding longer than one byte.
    #[error("Hierarchy id bytes carry data after the terminator")]
    TrailingBits,

    /// A payload decoded to a label greater than `Label::MAX`.
    #[error("Decoded label {0} is out of range")]
    LabelOutOfRange(u64),
}

#[allow(missing_docs)]
pub type ParseResult<T> = Result<T, ParseError>;

#[allow(missing_docs)]
pub type DecodeResult<T> = Result<T, DecodeError>;
