//! Instruction sequence to bytes.
//!
//! The encoder serializes exactly the sequence it is given. It does not
//! insert missing `end` markers or check block structure.

use crate::isa::errors::IsaError;
use crate::isa::instruction::Instruction;
use crate::isa::opcodes::{ImmediateShape, OpcodeEntry};
use crate::isa::registry::Registry;
use crate::types::encoding::{Encode, EncodeSink, SizeCounter};

/// Resolves the registry entry for the instruction at `index` and checks
/// that its immediate matches the declared shape.
fn resolve(
    registry: &Registry,
    index: usize,
    instruction: &Instruction,
) -> Result<&'static OpcodeEntry, IsaError> {
    let entry = registry
        .lookup_by_mnemonic(&instruction.mnemonic)
        .ok_or_else(|| IsaError::UnknownMnemonic {
            mnemonic: instruction.mnemonic.to_string(),
            index,
        })?;

    let found = instruction
        .immediate
        .as_ref()
        .map_or(ImmediateShape::None, |immediate| immediate.shape());
    if found != entry.immediate_shape {
        return Err(IsaError::ImmediateShapeMismatch {
            mnemonic: entry.mnemonic,
            index,
            expected: entry.immediate_shape,
            found,
        });
    }
    Ok(entry)
}

/// Encodes `instructions` into `out`.
///
/// Every instruction is validated before the first byte is written, so a
/// failed call leaves `out` untouched.
pub fn encode_into<S: EncodeSink>(instructions: &[Instruction], out: &mut S) -> Result<(), IsaError> {
    let registry = Registry::global();
    let entries = instructions
        .iter()
        .enumerate()
        .map(|(index, instruction)| resolve(registry, index, instruction))
        .collect::<Result<Vec<_>, _>>()?;

    for (entry, instruction) in entries.into_iter().zip(instructions) {
        entry.opcode.encode(out);
        if let Some(immediate) = &instruction.immediate {
            immediate.encode(out);
        }
    }
    Ok(())
}

/// Encodes `instructions` into a freshly allocated buffer of exact size.
pub fn encode(instructions: &[Instruction]) -> Result<Vec<u8>, IsaError> {
    let mut counter = SizeCounter::new();
    encode_into(instructions, &mut counter)?;
    let mut out = Vec::with_capacity(counter.len());
    encode_into(instructions, &mut out)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::isa::decoder::decode;
    use crate::isa::immediate::{Immediate, ValueType};
    use crate::isa::opcodes::OPCODE_TABLE;
    use crate::utils::test_utils::utils::every_shape_body;

    #[test]
    fn sample_sequence() {
        let instructions = vec![
            Instruction::with_immediate("i32.const", Immediate::ConstI32 { value: 5 }),
            Instruction::with_immediate("i32.const", Immediate::ConstI32 { value: 3 }),
            Instruction::new("i32.add"),
            Instruction::new("end"),
        ];
        let bytes = encode(&instructions).unwrap();
        assert_eq!(bytes, vec![0x41, 0x05, 0x41, 0x03, 0x6a, 0x0b]);
        assert_eq!(bytes.capacity(), bytes.len());
    }

    #[test]
    fn unknown_mnemonic() {
        let instructions = vec![Instruction::new("nop"), Instruction::new("i32.frobnicate")];
        assert_eq!(
            encode(&instructions).unwrap_err(),
            IsaError::UnknownMnemonic {
                mnemonic: "i32.frobnicate".to_string(),
                index: 1
            }
        );
    }

    #[test]
    fn immediate_on_shapeless_opcode() {
        let instructions = vec![Instruction::with_immediate(
            "i32.add",
            Immediate::ConstI32 { value: 1 },
        )];
        assert_eq!(
            encode(&instructions).unwrap_err(),
            IsaError::ImmediateShapeMismatch {
                mnemonic: "i32.add",
                index: 0,
                expected: ImmediateShape::None,
                found: ImmediateShape::ConstI32,
            }
        );
    }

    #[test]
    fn missing_immediate() {
        let err = encode(&[Instruction::new("br")]).unwrap_err();
        assert_eq!(
            err,
            IsaError::ImmediateShapeMismatch {
                mnemonic: "br",
                index: 0,
                expected: ImmediateShape::Branch,
                found: ImmediateShape::None,
            }
        );
    }

    #[test]
    fn wrong_variant() {
        let err = encode(&[Instruction::with_immediate(
            "get_global",
            Immediate::LocalIndex { index: 0 },
        )])
        .unwrap_err();
        assert!(matches!(
            err,
            IsaError::ImmediateShapeMismatch {
                expected: ImmediateShape::GlobalIndex,
                found: ImmediateShape::LocalIndex,
                ..
            }
        ));
    }

    #[test]
    fn failed_encode_leaves_sink_untouched() {
        let mut out = vec![0xaa];
        let instructions = vec![Instruction::new("nop"), Instruction::new("br")];
        assert!(encode_into(&instructions, &mut out).is_err());
        assert_eq!(out, vec![0xaa]);
    }

    #[test]
    fn no_implicit_end() {
        let block = Instruction::with_immediate("block", Immediate::Block { signature: None });
        assert_eq!(encode(&[block]).unwrap(), vec![0x02, 0x40]);
    }

    #[test]
    fn every_shapeless_opcode_is_one_byte() {
        for entry in OPCODE_TABLE.iter().filter(|e| !e.has_immediate()) {
            let bytes = encode(&[Instruction::new(entry.mnemonic)]).unwrap();
            assert_eq!(bytes, vec![entry.opcode], "{}", entry.mnemonic);
        }
    }

    #[test]
    fn decode_encode_decode_is_stable() {
        let first = decode(&every_shape_body()).unwrap();
        let bytes = encode(&first.instructions).unwrap();
        let second = decode(&bytes).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn hand_built_sequence_round_trips() {
        let instructions = vec![
            Instruction::with_immediate("block", Immediate::Block { signature: None }),
            Instruction::with_immediate(
                "loop",
                Immediate::Block {
                    signature: Some(ValueType::F64),
                },
            ),
            Instruction::with_immediate("br", Immediate::Branch { depth: 0 }),
            Instruction::with_immediate("br_if", Immediate::Branch { depth: 1 }),
            Instruction::with_immediate(
                "br_table",
                Immediate::BranchTable {
                    targets: vec![0, 1, 300],
                    default: 2,
                },
            ),
            Instruction::new("end"),
            Instruction::new("end"),
            Instruction::with_immediate("get_local", Immediate::LocalIndex { index: 128 }),
            Instruction::with_immediate("set_global", Immediate::GlobalIndex { index: 3 }),
            Instruction::with_immediate("call", Immediate::CallIndex { function_index: 7 }),
            Instruction::with_immediate(
                "call_indirect",
                Immediate::CallIndirect {
                    type_index: 1,
                    reserved: 0,
                },
            ),
            Instruction::with_immediate("i64.store", Immediate::MemoryAccess { align: 3, offset: 16 }),
            Instruction::with_immediate("current_memory", Immediate::CurGrowMem { reserved: 0 }),
            Instruction::with_immediate("grow_memory", Immediate::CurGrowMem { reserved: 0 }),
            Instruction::with_immediate("i32.const", Immediate::ConstI32 { value: 5 }),
            Instruction::with_immediate("i32.const", Immediate::ConstI32 { value: 3 }),
            Instruction::new("i32.add"),
            Instruction::with_immediate("i64.const", Immediate::ConstI64 { value: i64::MIN }),
            Instruction::with_immediate("f32.const", Immediate::f32(-0.5)),
            Instruction::with_immediate("f64.const", Immediate::ConstF64 { bits: 0x7ff8_0000_0000_0001 }),
            Instruction::new("drop"),
            Instruction::new("end"),
        ];
        let decoded = decode(&encode(&instructions).unwrap()).unwrap();
        assert_eq!(decoded.instructions, instructions);
        assert!(decoded.warnings.is_empty());
    }
}
