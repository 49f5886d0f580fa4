//! Variable-length integer codec
//!
//! LEB128-style encoding shared by VarInt (32-bit) and VarLong (64-bit):
//! 7 value bits per byte, least significant group first, `0x80` set on
//! every byte except the last.
//!
//! ```text
//! 300 = 0b1_0010_1100
//! ┌───────────────┬───────────────┐
//! │ 1 0101100     │ 0 0000010     │
//! │ (0xAC)        │ (0x02)        │
//! └───────────────┴───────────────┘
//! ```

use bytes::BufMut;

use crate::error::{McStatusError, Result};

const SEGMENT_BITS: u64 = 0x7F;
const CONTINUE_BIT: u8 = 0x80;

/// Width and byte budget of one variable-length integer flavour
#[derive(Debug, Clone, Copy)]
pub struct VarKind {
    /// Significant bits the value may carry
    pub bits: u32,
    /// Maximum encoded length
    pub max_bytes: usize,
}

impl VarKind {
    pub const INT: VarKind = VarKind { bits: 32, max_bytes: 5 };
    pub const LONG: VarKind = VarKind { bits: 64, max_bytes: 10 };

    fn too_large(self) -> McStatusError {
        if self.bits <= 32 {
            McStatusError::VarIntTooLarge
        } else {
            McStatusError::VarLongTooLarge
        }
    }

    fn max_value(self) -> u64 {
        if self.bits >= 64 {
            u64::MAX
        } else {
            (1u64 << self.bits) - 1
        }
    }
}

/// Encode `value` with the minimal number of bytes
pub fn encode<B: BufMut>(value: u64, kind: VarKind, out: &mut B) -> Result<()> {
    if value > kind.max_value() {
        return Err(McStatusError::ValueTooLarge {
            value,
            max_bytes: kind.max_bytes,
        });
    }

    let mut remaining = value;
    loop {
        if remaining & !SEGMENT_BITS == 0 {
            out.put_u8(remaining as u8);
            return Ok(());
        }
        out.put_u8((remaining & SEGMENT_BITS) as u8 | CONTINUE_BIT);
        remaining >>= 7;
    }
}

/// Number of bytes `value` occupies once encoded
pub fn encoded_len(value: u64) -> usize {
    let significant = 64 - value.leading_zeros() as usize;
    significant.max(1).div_ceil(7)
}

/// Decode one value, pulling bytes from `next_byte` until the continuation
/// flag clears.
///
/// Bytes are pulled one at a time so the same routine serves both an
/// in-memory buffer and a socket that must not be over-read.
pub fn decode<F>(kind: VarKind, mut next_byte: F) -> Result<u64>
where
    F: FnMut() -> Result<u8>,
{
    let mut result: u64 = 0;

    for i in 0..kind.max_bytes {
        let byte = next_byte()?;
        let segment = (byte as u64) & SEGMENT_BITS;
        let shift = 7 * i as u32;

        // Final group may only carry what is left of the value width
        if i == kind.max_bytes - 1 && segment >> (kind.bits - shift) != 0 {
            return Err(kind.too_large());
        }

        result |= segment << shift;
        if byte & CONTINUE_BIT == 0 {
            return Ok(result);
        }
    }

    Err(kind.too_large())
}
