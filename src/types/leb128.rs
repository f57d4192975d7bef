//! Variable-length integer codec (little-endian base-128).
//!
//! Each byte contributes its low 7 bits; a set high bit means another byte
//! follows. Unsigned values treat every group as magnitude, signed values
//! sign-extend from bit 6 of the final group.
//!
//! Decoding accepts over-long (non-minimal) encodings up to
//! [`MAX_VARINT_BYTES_32`] / [`MAX_VARINT_BYTES_64`] bytes. Encoding always
//! produces the minimal form, so `decode -> encode` canonicalizes.

use crate::types::encoding::{CodecError, Decode, Encode, EncodeSink};

/// Maximum encoded length of a 32-bit varint.
pub const MAX_VARINT_BYTES_32: usize = 5;
/// Maximum encoded length of a 64-bit varint.
pub const MAX_VARINT_BYTES_64: usize = 10;

const CONTINUATION_BIT: u8 = 0x80;
const SIGN_BIT: u8 = 0x40;
const GROUP_MASK: u8 = 0x7f;

const fn max_bytes_for(bits: u32) -> usize {
    bits.div_ceil(7) as usize
}

/// Reads an unsigned varint no wider than `bits` (32 or 64).
pub fn read_unsigned(input: &mut &[u8], bits: u32) -> Result<u64, CodecError> {
    let max_bytes = max_bytes_for(bits);
    let mut result = 0u64;
    let mut shift = 0u32;

    for index in 0..max_bytes {
        let byte = u8::decode(input)?;
        let group = (byte & GROUP_MASK) as u64;

        if index == max_bytes - 1 {
            if byte & CONTINUATION_BIT != 0 {
                return Err(CodecError::MalformedVarint { max_bytes });
            }
            // Only `bits - shift` low bits of the last group are payload.
            if group >> (bits - shift) != 0 {
                return Err(CodecError::IntegerOverflow { bits });
            }
        }

        result |= group << shift;
        if byte & CONTINUATION_BIT == 0 {
            return Ok(result);
        }
        shift += 7;
    }

    Err(CodecError::MalformedVarint { max_bytes })
}

/// Reads a signed varint no wider than `bits` (32 or 64).
pub fn read_signed(input: &mut &[u8], bits: u32) -> Result<i64, CodecError> {
    let max_bytes = max_bytes_for(bits);
    let mut result = 0i64;
    let mut shift = 0u32;

    for index in 0..max_bytes {
        let byte = u8::decode(input)?;

        if index == max_bytes - 1 {
            if byte & CONTINUATION_BIT != 0 {
                return Err(CodecError::MalformedVarint { max_bytes });
            }
            // Bits above the payload must replicate the sign bit.
            let payload_bits = bits - shift;
            let extension_mask = GROUP_MASK & !((1u8 << (payload_bits - 1)) - 1);
            let extension = byte & extension_mask;
            if extension != 0 && extension != extension_mask {
                return Err(CodecError::IntegerOverflow { bits });
            }
        }

        result |= ((byte & GROUP_MASK) as i64) << shift;
        shift += 7;

        if byte & CONTINUATION_BIT == 0 {
            if shift < 64 && byte & SIGN_BIT != 0 {
                result |= -1i64 << shift;
            }
            return Ok(result);
        }
    }

    Err(CodecError::MalformedVarint { max_bytes })
}

/// Writes the minimal unsigned encoding of `value`.
pub fn write_unsigned<S: EncodeSink>(out: &mut S, mut value: u64) {
    let mut buf = [0u8; MAX_VARINT_BYTES_64];
    let mut len = 0;
    loop {
        let mut byte = (value as u8) & GROUP_MASK;
        value >>= 7;
        if value != 0 {
            byte |= CONTINUATION_BIT;
        }
        buf[len] = byte;
        len += 1;
        if value == 0 {
            break;
        }
    }
    out.write(&buf[..len]);
}

/// Writes the minimal signed encoding of `value`.
pub fn write_signed<S: EncodeSink>(out: &mut S, mut value: i64) {
    let mut buf = [0u8; MAX_VARINT_BYTES_64];
    let mut len = 0;
    loop {
        let mut byte = (value as u8) & GROUP_MASK;
        value >>= 7;
        let done = (value == 0 && byte & SIGN_BIT == 0) || (value == -1 && byte & SIGN_BIT != 0);
        if !done {
            byte |= CONTINUATION_BIT;
        }
        buf[len] = byte;
        len += 1;
        if done {
            break;
        }
    }
    out.write(&buf[..len]);
}

/// Unsigned 32-bit varint (indices, depths, alignment, offsets).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VarU32(pub u32);

/// Signed 32-bit varint (`i32.const`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VarI32(pub i32);

/// Signed 64-bit varint (`i64.const`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VarI64(pub i64);

impl Encode for VarU32 {
    fn encode<S: EncodeSink>(&self, out: &mut S) {
        write_unsigned(out, self.0 as u64);
    }
}

impl Decode for VarU32 {
    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        read_unsigned(input, 32).map(|v| VarU32(v as u32))
    }
}

impl Encode for VarI32 {
    fn encode<S: EncodeSink>(&self, out: &mut S) {
        write_signed(out, self.0 as i64);
    }
}

impl Decode for VarI32 {
    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        read_signed(input, 32).map(|v| VarI32(v as i32))
    }
}

impl Encode for VarI64 {
    fn encode<S: EncodeSink>(&self, out: &mut S) {
        write_signed(out, self.0);
    }
}

impl Decode for VarI64 {
    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        read_signed(input, 64).map(VarI64)
    }
}
