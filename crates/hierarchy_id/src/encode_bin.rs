//! The binary form: an order-preserving, variable-width bit packing.
//!
//! Bits are written most significant first. Every label is one code:
//!
//! ```text
//! band  marker   payload  labels
//!    0  10       3 bits   0 ..= 7
//!    1  110      6 bits   8 ..= 71
//!    2  1110    10 bits   72 ..= 1095
//!    3  11110   16 bits   1096 ..= 66631
//!    4  111110  31 bits   66632 ..= 2147483647
//! ```
//!
//! The payload is the label's offset from the first label of its band. The
//! codes of all labels are concatenated and the stream is padded with zero
//! bits up to the next byte. The root is the empty byte string.
//!
//! Every code starts with a one bit, so a zero bit where a code would start
//! marks the end of the path, and six one bits are never produced. Codes are
//! prefix-free and, within and across bands, sort like the labels they
//! carry. A path that stops emits zero bits (or nothing) where any extension
//! of it emits a one bit. Together this makes the unsigned byte-wise order of
//! two encodings equal to the pre-order of the paths.
//!
//! This layout is persisted and must never change.

use crate::{
    error::{DecodeError, DecodeResult},
    HierarchyId, Label,
};

#[derive(Debug, Clone, Copy)]
struct Band {
    /// First label in the band
    first: u32,
    /// Payload width
    bits: u32,
}

const BANDS: [Band; 5] = [
    Band { first: 0, bits: 3 },
    Band { first: 8, bits: 6 },
    Band {
        first: 72,
        bits: 10,
    },
    Band {
        first: 1_096,
        bits: 16,
    },
    Band {
        first: 66_632,
        bits: 31,
    },
];

impl Band {
    /// The band a label falls in, and its index.
    fn of(label: Label) -> (usize, Band) {
        let v = label.get();
        let index = BANDS.iter().rposition(|b| b.first <= v).unwrap_or_default();
        (index, BANDS[index])
    }

    /// Marker bits for band `index`: `index + 1` ones then a zero.
    fn marker_len(index: usize) -> u32 {
        index as u32 + 2
    }

    fn code_len(index: usize) -> u32 {
        Self::marker_len(index) + BANDS[index].bits
    }
}

/// Append-only bit buffer, most significant bit first.
#[derive(Default)]
struct BitWriter {
    bytes: Vec<u8>,
    /// Bits written so far
    len: usize,
}

impl BitWriter {
    fn with_capacity(bits: usize) -> Self {
        Self {
            bytes: Vec::with_capacity((bits + 7) / 8),
            len: 0,
        }
    }

    fn push_bit(&mut self, bit: bool) {
        let offset = self.len % 8;
        if offset == 0 {
            self.bytes.push(0);
        }
        if bit {
            if let Some(last) = self.bytes.last_mut() {
                *last |= 0x80 >> offset;
            }
        }
        self.len += 1;
    }

    /// Write the low `width` bits of `value`, high bit first.
    fn push_bits(&mut self, value: u64, width: u32) {
        for i in (0..width).rev() {
            self.push_bit((value >> i) & 1 == 1);
        }
    }

    /// Trailing bits of the last byte are already zero.
    fn finish(self) -> Vec<u8> {
        self.bytes
    }
}

struct BitReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> BitReader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn total(&self) -> usize {
        self.bytes.len() * 8
    }

    fn read_bit(&mut self) -> Option<bool> {
        let byte = self.bytes.get(self.pos / 8)?;
        let bit = byte & (0x80 >> (self.pos % 8)) != 0;
        self.pos += 1;
        Some(bit)
    }

    fn read_bits(&mut self, width: u32) -> Option<u64> {
        if self.total() - self.pos < width as usize {
            return None;
        }
        let mut value = 0u64;
        for _ in 0..width {
            value = (value << 1) | self.read_bit()? as u64;
        }
        Some(value)
    }

    /// After a terminator the rest of the current byte must be zero and
    /// there must be no further bytes. A stream that ends on a byte boundary
    /// is never padded, so the terminator cannot open a byte.
    fn only_padding_left(&self) -> bool {
        let terminator = self.pos - 1;
        let byte_index = terminator / 8;
        if terminator % 8 == 0 || byte_index + 1 != self.bytes.len() {
            return false;
        }
        let used = self.pos % 8;
        used == 0 || self.bytes[byte_index] & (0xff >> used) == 0
    }
}

/// Number of bytes [`encode`] produces for `id`.
pub fn encoded_len(id: &HierarchyId) -> usize {
    let bits: usize = id
        .labels()
        .iter()
        .map(|l| Band::code_len(Band::of(*l).0) as usize)
        .sum();
    (bits + 7) / 8
}

/// Encode to the order-preserving binary form.
pub fn encode(id: &HierarchyId) -> Vec<u8> {
    let mut w = BitWriter::with_capacity(encoded_len(id) * 8);
    for label in id.labels() {
        let (index, band) = Band::of(*label);
        // ones then a zero
        w.push_bits(((1u64 << (index + 1)) - 1) << 1, Band::marker_len(index));
        w.push_bits((label.get() - band.first) as u64, band.bits);
    }
    w.finish()
}

/// Decode the binary form. Only the exact bytes [`encode`] would produce are
/// accepted.
pub fn decode(bytes: &[u8]) -> DecodeResult<HierarchyId> {
    let mut r = BitReader::new(bytes);
    let mut labels = Vec::new();
    loop {
        let start = r.pos;
        match r.read_bit() {
            // input ended exactly on a code boundary
            None => break,
            Some(false) => {
                if r.only_padding_left() {
                    break;
                }
                return Err(DecodeError::TrailingBits);
            }
            Some(true) => {}
        }

        let mut index = 0;
        loop {
            match r.read_bit() {
                None => return Err(DecodeError::Truncated),
                Some(false) => break,
                Some(true) => {
                    index += 1;
                    if index == BANDS.len() {
                        return Err(DecodeError::InvalidBand { bit: start });
                    }
                }
            }
        }

        let band = BANDS[index];
        let offset = r.read_bits(band.bits).ok_or(DecodeError::Truncated)?;
        let value = band.first as u64 + offset;
        let label = Label::try_from(value).map_err(|_| DecodeError::LabelOutOfRange(value))?;
        labels.push(label);
    }
    Ok(HierarchyId::new(labels))
}

impl HierarchyId {
    /// See [`encode`]
    pub fn to_bytes(&self) -> Vec<u8> {
        encode(self)
    }

    /// See [`decode`]
    pub fn from_bytes(bytes: &[u8]) -> DecodeResult<Self> {
        decode(bytes)
    }

    /// See [`encoded_len`]
    pub fn encoded_len(&self) -> usize {
        encoded_len(self)
    }
}

impl TryFrom<&[u8]> for HierarchyId {
    type Error = DecodeError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        decode(bytes)
    }
}

impl TryFrom<Vec<u8>> for HierarchyId {
    type Error = DecodeError;

    fn try_from(bytes: Vec<u8>) -> Result<Self, Self::Error> {
        decode(&bytes)
    }
}

impl From<&HierarchyId> for Vec<u8> {
    fn from(id: &HierarchyId) -> Self {
        encode(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn hid(labels: &[u32]) -> HierarchyId {
        HierarchyId::from_labels(labels.iter().copied()).unwrap()
    }

    #[test]
    fn bands_are_contiguous_and_growing() {
        for pair in BANDS.windows(2) {
            assert_eq!(pair[0].first + (1 << pair[0].bits), pair[1].first);
            assert!(pair[0].bits < pair[1].bits);
        }
        let last = BANDS[BANDS.len() - 1];
        assert!(last.first as u64 + (1u64 << last.bits) > Label::MAX.get() as u64);
    }

    #[test]
    fn known_vectors() {
        assert_eq!(encode(&hid(&[])), Vec::<u8>::new());
        assert_eq!(encode(&hid(&[0])), vec![0x80]);
        assert_eq!(encode(&hid(&[1])), vec![0x88]);
        assert_eq!(encode(&hid(&[7])), vec![0xb8]);
        assert_eq!(encode(&hid(&[8])), vec![0xc0, 0x00]);
        assert_eq!(encode(&hid(&[72])), vec![0xe0, 0x00]);
        assert_eq!(encode(&hid(&[1, 2, 3, 4])), vec![0x8c, 0xa7, 0x40]);
    }

    #[test]
    fn band_edges_round_trip() {
        const MAX: u32 = i32::MAX as u32;
        for v in [0, 7, 8, 71, 72, 1_095, 1_096, 66_631, 66_632, 1 << 30, MAX] {
            let id = hid(&[v, v]);
            assert_eq!(decode(&encode(&id)).unwrap(), id, "label {}", v);
            assert_eq!(encode(&id).len(), encoded_len(&id));
        }
    }

    #[test]
    fn band_edges_sort_in_label_order() {
        const MAX: u32 = i32::MAX as u32;
        let edges = [0, 7, 8, 71, 72, 1_095, 1_096, 66_631, 66_632, MAX];
        for pair in edges.windows(2) {
            assert!(encode(&hid(&[pair[0]])) < encode(&hid(&[pair[1]])));
        }
    }

    #[test]
    fn empty_bytes_are_root() {
        assert_eq!(decode(&[]).unwrap(), HierarchyId::root());
    }

    #[test]
    fn truncated_mid_label() {
        let bytes = encode(&hid(&[1, 2, 3, 4]));
        assert_eq!(decode(&bytes[..1]), Err(DecodeError::Truncated));
        assert_eq!(decode(&bytes[..2]), Err(DecodeError::Truncated));

        let wide = encode(&hid(&[100_000]));
        assert_eq!(wide.len(), 5);
        for cut in 1..wide.len() {
            assert_eq!(decode(&wide[..cut]), Err(DecodeError::Truncated));
        }
    }

    #[test]
    fn reserved_marker_is_invalid_band() {
        assert_eq!(decode(&[0xfc]), Err(DecodeError::InvalidBand { bit: 0 }));
        // label 0 then six ones
        assert_eq!(
            decode(&[0x87, 0xe0]),
            Err(DecodeError::InvalidBand { bit: 5 })
        );
    }

    #[test]
    fn padding_must_be_zero_and_short() {
        assert_eq!(decode(&[0x81]), Err(DecodeError::TrailingBits));
        assert_eq!(decode(&[0x80, 0x00]), Err(DecodeError::TrailingBits));
        assert_eq!(decode(&[0x00]), Err(DecodeError::TrailingBits));
    }

    #[test]
    fn label_above_max_is_rejected() {
        // band 4 with an all-ones payload
        let mut w = BitWriter::default();
        w.push_bits(0b111110, 6);
        w.push_bits((1 << 31) - 1, 31);
        let value = 66_632 + (1u64 << 31) - 1;
        assert_eq!(
            decode(&w.finish()),
            Err(DecodeError::LabelOutOfRange(value))
        );
    }

    proptest! {
        #[test]
        fn binary_round_trip(id: HierarchyId) {
            let bytes = encode(&id);
            prop_assert_eq!(bytes.len(), encoded_len(&id));
            prop_assert_eq!(decode(&bytes).unwrap(), id);
        }

        #[test]
        fn byte_order_matches_preorder(a: HierarchyId, b: HierarchyId) {
            prop_assert_eq!(encode(&a).cmp(&encode(&b)), a.cmp(&b));
        }

        #[test]
        fn accepted_bytes_are_canonical(bytes in proptest::collection::vec(any::<u8>(), 0..8)) {
            if let Ok(id) = decode(&bytes) {
                prop_assert_eq!(encode(&id), bytes);
            }
        }
    }
}
