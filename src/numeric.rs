//! Prefix-coded numeric terms and bit interleaving.
//!
//! Numeric values are indexed as several terms of decreasing precision: the
//! full value (shift 0) plus copies with the low `shift` bits dropped. Each
//! term starts with a header byte carrying the shift, followed by the
//! sign-flipped, shifted value split into 7-bit groups (most significant
//! first), so terms of the same shift sort bytewise in numeric order.

use crate::error::{GeoSearchError, Result};

/// Header byte value for a shift of zero.
pub const SHIFT_START_INT64: u8 = 0x20;

/// Largest shift a prefix-coded 64-bit term can carry.
pub const MAX_SHIFT: u32 = 63;

const SIGN_FLIP: u64 = 0x8000_0000_0000_0000;

/// Number of 7-bit payload bytes for the given shift.
fn payload_len(shift: u32) -> usize {
    ((MAX_SHIFT - shift) / 7 + 1) as usize
}

/// An owned prefix-coded 64-bit term.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PrefixCoded(Vec<u8>);

impl PrefixCoded {
    /// Encode `value` with its low `shift` bits dropped.
    pub fn from_i64(value: i64, shift: u32) -> Result<Self> {
        if shift > MAX_SHIFT {
            return Err(GeoSearchError::invalid_argument(format!(
                "cannot shift {shift}, must be between 0 and {MAX_SHIFT}"
            )));
        }

        let n_chars = payload_len(shift);
        let mut bytes = vec![0u8; n_chars + 1];
        bytes[0] = SHIFT_START_INT64 + shift as u8;

        let mut sortable_bits = ((value as u64) ^ SIGN_FLIP) >> shift;
        for slot in bytes[1..].iter_mut().rev() {
            *slot = (sortable_bits & 0x7f) as u8;
            sortable_bits >>= 7;
        }

        Ok(PrefixCoded(bytes))
    }

    /// The raw term bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consume the term, returning its bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// The shift carried by this term.
    pub fn shift(&self) -> Result<u32> {
        decode_shift(&self.0)
    }

    /// Decode the term back to a 64-bit value (low `shift` bits are zero).
    pub fn to_i64(&self) -> Result<i64> {
        decode_i64(&self.0)
    }
}

impl AsRef<[u8]> for PrefixCoded {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Read the shift of a raw prefix-coded term.
pub fn decode_shift(term: &[u8]) -> Result<u32> {
    match term.first() {
        Some(&header) if header >= SHIFT_START_INT64 => {
            let shift = (header - SHIFT_START_INT64) as u32;
            if shift <= MAX_SHIFT {
                Ok(shift)
            } else {
                Err(GeoSearchError::parse(format!(
                    "invalid prefix coded shift {shift}"
                )))
            }
        }
        _ => Err(GeoSearchError::parse("invalid prefix coded value")),
    }
}

/// Decode a raw prefix-coded term to its 64-bit value.
pub fn decode_i64(term: &[u8]) -> Result<i64> {
    let shift = decode_shift(term)?;
    let payload = &term[1..];
    if payload.len() != payload_len(shift) {
        return Err(GeoSearchError::parse(format!(
            "prefix coded term has {} payload bytes, expected {}",
            payload.len(),
            payload_len(shift)
        )));
    }

    // the leading group holds whatever bits remain after the full 7-bit groups
    let leading_bits = 64 - shift - 7 * (payload.len() as u32 - 1);
    if payload[0] as u64 > (1u64 << leading_bits) - 1 {
        return Err(GeoSearchError::parse(format!(
            "prefix coded value overflows 64 bits at shift {shift}"
        )));
    }

    let mut sortable_bits = 0u64;
    for &byte in payload {
        if byte & 0x80 != 0 {
            return Err(GeoSearchError::parse("prefix coded byte out of range"));
        }
        sortable_bits = (sortable_bits << 7) | byte as u64;
    }

    Ok(((sortable_bits << shift) ^ SIGN_FLIP) as i64)
}

const INTERLEAVE_MAGIC: [u64; 6] = [
    0x5555_5555_5555_5555,
    0x3333_3333_3333_3333,
    0x0F0F_0F0F_0F0F_0F0F,
    0x00FF_00FF_00FF_00FF,
    0x0000_FFFF_0000_FFFF,
    0x0000_0000_FFFF_FFFF,
];

const INTERLEAVE_SHIFT: [u32; 5] = [1, 2, 4, 8, 16];

fn spread(mut v: u64) -> u64 {
    for i in (0..INTERLEAVE_SHIFT.len()).rev() {
        v = (v | (v << INTERLEAVE_SHIFT[i])) & INTERLEAVE_MAGIC[i];
    }
    v
}

/// Interleave the low 32 bits of `even` and `odd`: bits of `even` land in
/// even positions, bits of `odd` in odd positions.
pub fn interleave(even: u64, odd: u64) -> u64 {
    (spread(odd) << 1) | spread(even)
}

/// Collect the even-position bits of `b` into a 32-bit value.
pub fn deinterleave(mut b: u64) -> u64 {
    b &= INTERLEAVE_MAGIC[0];
    for i in 0..INTERLEAVE_SHIFT.len() {
        b = (b ^ (b >> INTERLEAVE_SHIFT[i])) & INTERLEAVE_MAGIC[i + 1];
    }
    b
}
