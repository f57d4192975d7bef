//! Binary encoding and decoding traits for instruction-stream serialization.
//!
//! This module provides the sink/cursor plumbing shared by the immediate
//! codec and the instruction encoder. Fixed-width values use little-endian
//! byte order; variable-length integers live in [`leb128`](super::leb128).
//!
//! # Binary Format
//!
//! - `u8`: single byte
//! - `u32`/`u64`: little-endian, fixed-width (used for IEEE 754 bit patterns)
//!
//! # Example
//!
//! ```ignore
//! use crate::types::encoding::{Encode, Decode};
//!
//! let value: u32 = 42;
//! let bytes = value.to_bytes();
//! let (decoded, used) = u32::decode_prefix(&bytes).unwrap();
//! assert_eq!((value, used), (decoded, 4));
//! ```

use wasm_isa_derive::Error;

/// Sink for writing encoded bytes.
///
/// Implemented by byte buffers and counters to allow encoding directly into
/// the target without intermediate allocations.
pub trait EncodeSink {
    /// Writes the given bytes to the sink.
    fn write(&mut self, bytes: &[u8]);
}

/// Counter for computing encoded size without allocating memory.
///
/// Used by `Encode::to_bytes` to pre-allocate exact capacity before encoding.
#[derive(Debug, Default)]
pub struct SizeCounter {
    len: usize,
}

impl SizeCounter {
    /// Creates a new counter initialized to zero.
    pub fn new() -> Self {
        Self { len: 0 }
    }

    /// Returns the total number of bytes counted.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if nothing has been counted yet.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl EncodeSink for SizeCounter {
    fn write(&mut self, bytes: &[u8]) {
        self.len += bytes.len();
    }
}

impl EncodeSink for Vec<u8> {
    fn write(&mut self, bytes: &[u8]) {
        self.extend_from_slice(bytes);
    }
}

/// Trait for types that can be serialized to binary format.
pub trait Encode {
    /// Writes the binary representation to the given sink.
    fn encode<S: EncodeSink>(&self, out: &mut S);

    /// Returns the number of bytes `encode` would write.
    fn encoded_len(&self) -> usize {
        let mut counter = SizeCounter::new();
        self.encode(&mut counter);
        counter.len()
    }

    /// Serializes to a new byte buffer with exact capacity.
    ///
    /// Performs two passes: first to count bytes, then to encode.
    fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());
        self.encode(&mut out);
        out
    }
}

/// Codec-level failures while reading immediate operand bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Input ended before the value was complete.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    /// A variable-length integer used more groups than its width allows.
    #[error("malformed varint: longer than {max_bytes} bytes")]
    MalformedVarint { max_bytes: usize },
    /// A variable-length integer carries bits beyond the target width.
    #[error("integer too large for {bits} bits")]
    IntegerOverflow { bits: u32 },
    /// A block signature byte is neither a value type nor the empty marker.
    #[error("invalid block type 0x{byte:02x}")]
    InvalidBlockType { byte: u8 },
}

/// Trait for types that can be deserialized from binary format.
pub trait Decode: Sized {
    /// Reads and decodes a value from the input buffer.
    ///
    /// Advances the input slice past the consumed bytes.
    fn decode(input: &mut &[u8]) -> Result<Self, CodecError>;

    /// Decodes a value from a byte slice, returning it with the number of
    /// bytes consumed. Trailing bytes are left alone.
    fn decode_prefix(data: &[u8]) -> Result<(Self, usize), CodecError> {
        let mut input = data;
        let value = Self::decode(&mut input)?;
        Ok((value, data.len() - input.len()))
    }
}

/// Reads exactly `N` bytes from the input, advancing the slice.
pub(crate) fn read_array<const N: usize>(input: &mut &[u8]) -> Result<[u8; N], CodecError> {
    let (bytes, rest) = input
        .split_first_chunk::<N>()
        .ok_or(CodecError::UnexpectedEndOfInput)?;
    *input = rest;
    Ok(*bytes)
}

impl Encode for u8 {
    fn encode<S: EncodeSink>(&self, out: &mut S) {
        out.write(&[*self]);
    }
}

impl Decode for u8 {
    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        let [byte] = read_array::<1>(input)?;
        Ok(byte)
    }
}

// Macro for fixed-size integer types
macro_rules! impl_int {
    ($($t:ty),*) => {
        $(
            impl Encode for $t {
                fn encode<S: EncodeSink>(&self, out: &mut S) {
                    out.write(&self.to_le_bytes());
                }
            }

            impl Decode for $t {
                fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
                    let bytes = read_array::<{ std::mem::size_of::<$t>() }>(input)?;
                    Ok(<$t>::from_le_bytes(bytes))
                }
            }
        )*
    };
}

impl_int!(u32, u64);
