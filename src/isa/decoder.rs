//! Byte stream to instruction sequence.
//!
//! [`decode`] walks the stream one opcode at a time, consuming exactly the
//! immediate bytes declared by each opcode's shape. Block nesting is
//! tracked but never enforced: an unterminated block and a nonzero reserved
//! byte are surfaced as [`DecodeWarning`]s next to the decoded sequence.

use crate::isa::errors::IsaError;
use crate::isa::immediate::Immediate;
use crate::isa::instruction::Instruction;
use crate::isa::opcodes::Opcode;
use crate::isa::registry::Registry;
use crate::warn;
use std::borrow::Cow;
use std::fmt;

/// Non-fatal findings reported alongside a successful decode.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DecodeWarning {
    /// Stream ended inside `depth` open blocks; `offset` is the innermost opener.
    UnterminatedBlock { depth: usize, offset: usize },
    /// Reserved byte was not `0x00`. The value is kept on the immediate.
    NonzeroReservedByte {
        mnemonic: &'static str,
        offset: usize,
        value: u8,
    },
}

impl fmt::Display for DecodeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeWarning::UnterminatedBlock { depth, offset } => write!(
                f,
                "stream ended with {depth} unterminated block(s), innermost opened at offset {offset}"
            ),
            DecodeWarning::NonzeroReservedByte {
                mnemonic,
                offset,
                value,
            } => write!(
                f,
                "{mnemonic} at offset {offset} has nonzero reserved byte 0x{value:02x}"
            ),
        }
    }
}

/// Result of decoding one byte stream.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Decoded {
    pub instructions: Vec<Instruction>,
    pub warnings: Vec<DecodeWarning>,
    /// Deepest block nesting reached, not counting the implicit function body.
    pub max_depth: usize,
}

impl Decoded {
    /// Returns true if every `block`/`loop`/`if` was closed by an `end`.
    pub fn is_well_nested(&self) -> bool {
        !self
            .warnings
            .iter()
            .any(|w| matches!(w, DecodeWarning::UnterminatedBlock { .. }))
    }
}

/// Decodes `bytes` into an instruction sequence.
///
/// Fails at the first unknown opcode or malformed immediate; the error
/// carries the offset of the offending opcode byte.
pub fn decode(bytes: &[u8]) -> Result<Decoded, IsaError> {
    let registry = Registry::global();
    let mut cursor = bytes;
    let mut decoded = Decoded::default();
    // Offsets of the currently open block openers.
    let mut open_blocks: Vec<usize> = Vec::new();

    while let Some((&opcode, rest)) = cursor.split_first() {
        let offset = bytes.len() - cursor.len();
        let entry = registry
            .lookup_by_opcode(opcode)
            .ok_or(IsaError::UnknownOpcode { opcode, offset })?;
        cursor = rest;

        let immediate = Immediate::decode(entry.immediate_shape, &mut cursor).map_err(|cause| {
            IsaError::MalformedImmediate {
                mnemonic: entry.mnemonic,
                offset,
                cause,
            }
        })?;

        if let Some(value) = immediate.as_ref().and_then(Immediate::reserved_byte)
            && value != 0
        {
            decoded.warnings.push(DecodeWarning::NonzeroReservedByte {
                mnemonic: entry.mnemonic,
                offset,
                value,
            });
        }

        match Opcode::try_from(opcode) {
            Ok(Opcode::Block | Opcode::Loop | Opcode::If) => {
                open_blocks.push(offset);
                decoded.max_depth = decoded.max_depth.max(open_blocks.len());
            }
            // An `end` at depth 0 closes the function body itself.
            Ok(Opcode::End) => {
                open_blocks.pop();
            }
            _ => {}
        }

        decoded.instructions.push(Instruction {
            mnemonic: Cow::Borrowed(entry.mnemonic),
            immediate,
            byte_offset: offset,
        });
    }

    if let Some(&offset) = open_blocks.last() {
        decoded.warnings.push(DecodeWarning::UnterminatedBlock {
            depth: open_blocks.len(),
            offset,
        });
    }

    for warning in &decoded.warnings {
        warn!("{warning}");
    }

    Ok(decoded)
}
