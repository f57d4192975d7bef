use crate::isa::opcodes::ImmediateShape;
use crate::types::encoding::CodecError;
use wasm_isa_derive::Error;

/// Errors that can occur while building the registry, decoding, encoding,
/// or assembling instruction text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IsaError {
    /// Unrecognized byte where an opcode was expected.
    #[error("unknown opcode 0x{opcode:02x} at offset {offset}")]
    UnknownOpcode { opcode: u8, offset: usize },
    /// Immediate operand bytes could not be decoded.
    #[error("malformed immediate for {mnemonic} at offset {offset}: {cause}")]
    MalformedImmediate {
        mnemonic: &'static str,
        offset: usize,
        cause: CodecError,
    },
    /// Instruction names a mnemonic the registry does not know.
    #[error("unknown mnemonic `{mnemonic}` (instruction {index})")]
    UnknownMnemonic { mnemonic: String, index: usize },
    /// Immediate variant does not match the shape declared for the mnemonic.
    #[error("{mnemonic} expects immediate {expected} but got {found} (instruction {index})")]
    ImmediateShapeMismatch {
        mnemonic: &'static str,
        index: usize,
        expected: ImmediateShape,
        found: ImmediateShape,
    },
    /// Two table entries share an opcode byte.
    #[error("duplicate opcode 0x{opcode:02x}")]
    DuplicateOpcode { opcode: u8 },
    /// Two table entries share a mnemonic.
    #[error("duplicate mnemonic `{mnemonic}`")]
    DuplicateMnemonic { mnemonic: &'static str },
    /// Wrong number of operands on an assembly line.
    #[error("{mnemonic} takes {expected} operand(s), got {actual}")]
    ArityMismatch {
        mnemonic: String,
        expected: String,
        actual: usize,
    },
    /// Operand token could not be parsed for its immediate shape.
    #[error("invalid {expected} operand `{token}`")]
    InvalidOperand {
        token: String,
        expected: &'static str,
    },
    /// Tokenizer failure in assembly source.
    #[error("line {line}:{offset}: {message}")]
    ParseError {
        line: usize,
        offset: usize,
        message: &'static str,
    },
    /// Assembly error with line number context.
    #[error("line {line}:{offset}: {source}")]
    AssemblyError {
        line: usize,
        offset: usize,
        source: String,
    },
    /// File I/O error during assembly.
    #[error("io error on {path}: {source}")]
    IoError { path: String, source: String },
}

impl IsaError {
    /// Byte offset in the decoded stream, for decode-time errors.
    pub fn offset(&self) -> Option<usize> {
        match self {
            IsaError::UnknownOpcode { offset, .. } | IsaError::MalformedImmediate { offset, .. } => {
                Some(*offset)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            IsaError::UnknownOpcode {
                opcode: 0x12,
                offset: 0
            }
            .to_string(),
            "unknown opcode 0x12 at offset 0"
        );
        assert_eq!(
            IsaError::MalformedImmediate {
                mnemonic: "br_table",
                offset: 7,
                cause: CodecError::UnexpectedEndOfInput,
            }
            .to_string(),
            "malformed immediate for br_table at offset 7: unexpected end of input"
        );
        assert_eq!(
            IsaError::ImmediateShapeMismatch {
                mnemonic: "br",
                index: 2,
                expected: ImmediateShape::Branch,
                found: ImmediateShape::None,
            }
            .to_string(),
            "br expects immediate Branch but got None (instruction 2)"
        );
    }

    #[test]
    fn offset_only_for_decode_errors() {
        let err = IsaError::UnknownOpcode {
            opcode: 0xff,
            offset: 9,
        };
        assert_eq!(err.offset(), Some(9));
        let err = IsaError::UnknownMnemonic {
            mnemonic: "bogus".to_string(),
            index: 0,
        };
        assert_eq!(err.offset(), None);
    }
}
