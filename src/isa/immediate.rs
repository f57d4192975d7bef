//! Immediate operand codec.
//!
//! Every opcode declares an [`ImmediateShape`]; the bytes that follow the
//! opcode are decoded into the matching [`Immediate`] variant. Decoding goes
//! through the cursor convention used by [`Decode`]: the input slice is
//! advanced past the consumed bytes.
//!
//! # Binary Format
//!
//! | Shape | Bytes |
//! |---|---|
//! | `Block` | one value-type byte, or `0x40` for an empty signature |
//! | `Branch`, `LocalIndex`, `GlobalIndex`, `CallIndex` | varuint32 |
//! | `BranchTable` | varuint32 count, `count` varuint32 targets, varuint32 default |
//! | `CallIndirect` | varuint32 type index, reserved byte |
//! | `MemoryAccess` | varuint32 alignment exponent, varuint32 offset |
//! | `ConstI32` / `ConstI64` | varint32 / varint64 |
//! | `ConstF32` / `ConstF64` | 4 / 8 bytes little-endian IEEE 754 |
//! | `CurGrowMem` | reserved byte |
//!
//! Encoding always emits minimal-length varints. Reserved bytes are carried
//! through unchanged so that a nonzero value still round-trips.

use crate::isa::opcodes::ImmediateShape;
use crate::types::encoding::{CodecError, Decode, Encode, EncodeSink};
use crate::types::leb128::{VarI32, VarI64, VarU32};
use std::fmt;

/// Block signature byte for a block that yields no value.
pub const BLOCK_TYPE_EMPTY: u8 = 0x40;

/// Value type carried by a block signature.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ValueType {
    I32 = 0x7f,
    I64 = 0x7e,
    F32 = 0x7d,
    F64 = 0x7c,
}

impl ValueType {
    /// Maps a signature byte to a value type.
    pub const fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x7f => Some(ValueType::I32),
            0x7e => Some(ValueType::I64),
            0x7d => Some(ValueType::F32),
            0x7c => Some(ValueType::F64),
            _ => None,
        }
    }

    pub const fn to_byte(self) -> u8 {
        self as u8
    }

    /// Parses the text name (`i32`, `i64`, `f32`, `f64`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "i32" => Some(ValueType::I32),
            "i64" => Some(ValueType::I64),
            "f32" => Some(ValueType::F32),
            "f64" => Some(ValueType::F64),
            _ => None,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            ValueType::I32 => "i32",
            ValueType::I64 => "i64",
            ValueType::F32 => "f32",
            ValueType::F64 => "f64",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decoded immediate operand, one variant per [`ImmediateShape`].
///
/// Float constants are stored as raw bit patterns so that NaN payloads and
/// signed zeros survive a round trip and the type can be `Eq`.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Immediate {
    /// Signature of a `block`, `loop` or `if`; `None` for an empty signature.
    Block { signature: Option<ValueType> },
    /// Relative nesting depth of a branch target.
    Branch { depth: u32 },
    BranchTable { targets: Vec<u32>, default: u32 },
    LocalIndex { index: u32 },
    GlobalIndex { index: u32 },
    CallIndex { function_index: u32 },
    CallIndirect { type_index: u32, reserved: u8 },
    /// Alignment as a power-of-two exponent, and a constant byte offset.
    MemoryAccess { align: u32, offset: u32 },
    ConstI32 { value: i32 },
    ConstI64 { value: i64 },
    ConstF32 { bits: u32 },
    ConstF64 { bits: u64 },
    CurGrowMem { reserved: u8 },
}

impl Immediate {
    /// Builds an `f32.const` immediate from a float value.
    pub fn f32(value: f32) -> Self {
        Immediate::ConstF32 {
            bits: value.to_bits(),
        }
    }

    /// Builds an `f64.const` immediate from a float value.
    pub fn f64(value: f64) -> Self {
        Immediate::ConstF64 {
            bits: value.to_bits(),
        }
    }

    /// Returns the shape this variant encodes.
    pub const fn shape(&self) -> ImmediateShape {
        match self {
            Immediate::Block { .. } => ImmediateShape::Block,
            Immediate::Branch { .. } => ImmediateShape::Branch,
            Immediate::BranchTable { .. } => ImmediateShape::BranchTable,
            Immediate::LocalIndex { .. } => ImmediateShape::LocalIndex,
            Immediate::GlobalIndex { .. } => ImmediateShape::GlobalIndex,
            Immediate::CallIndex { .. } => ImmediateShape::CallIndex,
            Immediate::CallIndirect { .. } => ImmediateShape::CallIndirect,
            Immediate::MemoryAccess { .. } => ImmediateShape::MemoryAccess,
            Immediate::ConstI32 { .. } => ImmediateShape::ConstI32,
            Immediate::ConstI64 { .. } => ImmediateShape::ConstI64,
            Immediate::ConstF32 { .. } => ImmediateShape::ConstF32,
            Immediate::ConstF64 { .. } => ImmediateShape::ConstF64,
            Immediate::CurGrowMem { .. } => ImmediateShape::CurGrowMem,
        }
    }

    /// Reserved byte carried by `call_indirect` and the memory-size operators.
    pub const fn reserved_byte(&self) -> Option<u8> {
        match self {
            Immediate::CallIndirect { reserved, .. } | Immediate::CurGrowMem { reserved } => {
                Some(*reserved)
            }
            _ => None,
        }
    }

    /// Decodes the immediate for `shape`, advancing `input`.
    ///
    /// Returns `Ok(None)` without touching the input for
    /// [`ImmediateShape::None`].
    pub fn decode(shape: ImmediateShape, input: &mut &[u8]) -> Result<Option<Self>, CodecError> {
        let immediate = match shape {
            ImmediateShape::None => return Ok(None),
            ImmediateShape::Block => {
                let byte = u8::decode(input)?;
                let signature = match byte {
                    BLOCK_TYPE_EMPTY => None,
                    _ => Some(
                        ValueType::from_byte(byte).ok_or(CodecError::InvalidBlockType { byte })?,
                    ),
                };
                Immediate::Block { signature }
            }
            ImmediateShape::Branch => Immediate::Branch {
                depth: VarU32::decode(input)?.0,
            },
            ImmediateShape::BranchTable => {
                let count = VarU32::decode(input)?.0 as usize;
                // every target takes at least one byte
                let mut targets = Vec::with_capacity(count.min(input.len()));
                for _ in 0..count {
                    targets.push(VarU32::decode(input)?.0);
                }
                let default = VarU32::decode(input)?.0;
                Immediate::BranchTable { targets, default }
            }
            ImmediateShape::LocalIndex => Immediate::LocalIndex {
                index: VarU32::decode(input)?.0,
            },
            ImmediateShape::GlobalIndex => Immediate::GlobalIndex {
                index: VarU32::decode(input)?.0,
            },
            ImmediateShape::CallIndex => Immediate::CallIndex {
                function_index: VarU32::decode(input)?.0,
            },
            ImmediateShape::CallIndirect => Immediate::CallIndirect {
                type_index: VarU32::decode(input)?.0,
                reserved: u8::decode(input)?,
            },
            ImmediateShape::MemoryAccess => Immediate::MemoryAccess {
                align: VarU32::decode(input)?.0,
                offset: VarU32::decode(input)?.0,
            },
            ImmediateShape::ConstI32 => Immediate::ConstI32 {
                value: VarI32::decode(input)?.0,
            },
            ImmediateShape::ConstI64 => Immediate::ConstI64 {
                value: VarI64::decode(input)?.0,
            },
            ImmediateShape::ConstF32 => Immediate::ConstF32 {
                bits: u32::decode(input)?,
            },
            ImmediateShape::ConstF64 => Immediate::ConstF64 {
                bits: u64::decode(input)?,
            },
            ImmediateShape::CurGrowMem => Immediate::CurGrowMem {
                reserved: u8::decode(input)?,
            },
        };
        Ok(Some(immediate))
    }

    /// Decodes the immediate for `shape` from the start of `data`, returning
    /// it with the number of bytes consumed.
    pub fn decode_prefix(
        shape: ImmediateShape,
        data: &[u8],
    ) -> Result<(Option<Self>, usize), CodecError> {
        let mut input = data;
        let immediate = Self::decode(shape, &mut input)?;
        Ok((immediate, data.len() - input.len()))
    }
}

impl Encode for Immediate {
    fn encode<S: EncodeSink>(&self, out: &mut S) {
        match self {
            Immediate::Block { signature } => {
                signature
                    .map_or(BLOCK_TYPE_EMPTY, ValueType::to_byte)
                    .encode(out);
            }
            Immediate::Branch { depth } => VarU32(*depth).encode(out),
            Immediate::BranchTable { targets, default } => {
                VarU32(targets.len() as u32).encode(out);
                for target in targets {
                    VarU32(*target).encode(out);
                }
                VarU32(*default).encode(out);
            }
            Immediate::LocalIndex { index } | Immediate::GlobalIndex { index } => {
                VarU32(*index).encode(out)
            }
            Immediate::CallIndex { function_index } => VarU32(*function_index).encode(out),
            Immediate::CallIndirect {
                type_index,
                reserved,
            } => {
                VarU32(*type_index).encode(out);
                reserved.encode(out);
            }
            Immediate::MemoryAccess { align, offset } => {
                VarU32(*align).encode(out);
                VarU32(*offset).encode(out);
            }
            Immediate::ConstI32 { value } => VarI32(*value).encode(out),
            Immediate::ConstI64 { value } => VarI64(*value).encode(out),
            Immediate::ConstF32 { bits } => bits.encode(out),
            Immediate::ConstF64 { bits } => bits.encode(out),
            Immediate::CurGrowMem { reserved } => reserved.encode(out),
        }
    }
}

/// Prefix used for NaN constants in text form, followed by the hex bit pattern.
pub const NAN_PREFIX: &str = "nan:0x";

macro_rules! fmt_float {
    ($f:expr, $ty:ty, $bits:expr) => {{
        let value = <$ty>::from_bits($bits);
        if value.is_nan() {
            write!($f, "{}{:x}", NAN_PREFIX, $bits)
        } else if value.is_infinite() {
            $f.write_str(if value < 0.0 { "-inf" } else { "inf" })
        } else {
            write!($f, "{}", value)
        }
    }};
}

/// Text form of the operands, as accepted by the assembler.
///
/// Shapes with optional operands print nothing for their default value: an
/// empty block signature and a zero reserved byte on `current_memory` and
/// `grow_memory`.
impl fmt::Display for Immediate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Immediate::Block { signature } => match signature {
                Some(value_type) => write!(f, "{value_type}"),
                None => Ok(()),
            },
            Immediate::Branch { depth } => write!(f, "{depth}"),
            Immediate::BranchTable { targets, default } => {
                for target in targets {
                    write!(f, "{target} ")?;
                }
                write!(f, "{default}")
            }
            Immediate::LocalIndex { index } | Immediate::GlobalIndex { index } => {
                write!(f, "{index}")
            }
            Immediate::CallIndex { function_index } => write!(f, "{function_index}"),
            Immediate::CallIndirect {
                type_index,
                reserved: 0,
            } => write!(f, "{type_index}"),
            Immediate::CallIndirect {
                type_index,
                reserved,
            } => write!(f, "{type_index} {reserved}"),
            Immediate::MemoryAccess { align, offset } => {
                write!(f, "align={align} offset={offset}")
            }
            Immediate::ConstI32 { value } => write!(f, "{value}"),
            Immediate::ConstI64 { value } => write!(f, "{value}"),
            Immediate::ConstF32 { bits } => fmt_float!(f, f32, *bits),
            Immediate::ConstF64 { bits } => fmt_float!(f, f64, *bits),
            Immediate::CurGrowMem { reserved: 0 } => Ok(()),
            Immediate::CurGrowMem { reserved } => write!(f, "{reserved}"),
        }
    }
}
