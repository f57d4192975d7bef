//! Text assembler and disassembler.
//!
//! Converts human-readable instruction text into bytes and back. Operands
//! are parsed according to the immediate shape the registry declares for
//! each mnemonic.
//!
//! # Syntax
//!
//! ```text
//! mnemonic operand1, operand2, ...  ;; optional comment
//! ```
//!
//! - Mnemonics are lowercase, as in the opcode table (e.g., `i32.add`)
//! - Integers are decimal; `i32.const`/`i64.const` take a sign
//! - Floats are decimal, `inf`, `-inf`, or `nan:0x<bits>`
//! - Block signatures are `i32`, `i64`, `f32`, `f64`, or omitted
//! - `br_table` lists its targets, then the default target last
//! - Memory access is `align offset` or `align=N offset=M`
//! - Comments start with `;;`
//! - Commas between operands are optional

use crate::{error, info};
use crate::isa::decoder::decode;
use crate::isa::encoder::encode;
use crate::isa::errors::IsaError;
use crate::isa::immediate::{Immediate, NAN_PREFIX, ValueType};
use crate::isa::instruction::Instruction;
use crate::isa::opcodes::ImmediateShape;
use crate::isa::registry::Registry;
use crate::types::encoding::Encode;
use std::borrow::Cow;
use std::fmt::Write;
use std::fs;
use std::path::Path;

const COMMENT_PREFIX: &str = ";;";
const ALIGN_KEY: &str = "align=";
const OFFSET_KEY: &str = "offset=";
/// Column at which disassembly offset comments start.
const LISTING_COMMENT_COLUMN: usize = 32;
const LISTING_INDENT: &str = "  ";

/// Return the line/column/message triple for assembly-related errors.
fn assembly_error_location(err: &IsaError) -> Option<(usize, usize, String)> {
    match err {
        IsaError::AssemblyError {
            line,
            offset,
            source,
        } => Some((*line, *offset, source.clone())),
        IsaError::ParseError {
            line,
            offset,
            message,
        } => Some((*line, *offset, message.to_string())),
        _ => None,
    }
}

/// Formats a compiler-style diagnostic for assembly failures.
fn render_assembly_diagnostic(
    file: &str,
    source: &str,
    line: usize,
    offset: usize,
    message: &str,
) -> String {
    let mut diag = String::new();
    let _ = writeln!(diag, "error: {message}");
    let _ = writeln!(diag, " --> {file}:{line}:{offset}");

    if let Some(raw_line) = source.lines().nth(line.saturating_sub(1)) {
        let line_text = raw_line.trim_end_matches('\r');
        let underline = " ".repeat(offset.saturating_sub(1));
        let _ = writeln!(diag, "     |");
        let _ = writeln!(diag, "{:>4} | {}", line, line_text);
        let _ = writeln!(diag, "     | {}^", underline);
    }

    diag
}

/// Logs a diagnostic for assembly errors.
fn log_assembly_error(file: &str, source: &str, err: &IsaError) {
    if let Some((line, offset, message)) = assembly_error_location(err) {
        error!(
            "{}",
            render_assembly_diagnostic(file, source, line, offset, &message)
        );
    } else {
        error!("{err}");
    }
}

#[derive(Debug, Clone)]
struct Token<'a> {
    text: &'a str,
    /// 1-based column offset in the line.
    offset: usize,
}

/// Tokenize a single line of assembly.
///
/// Rules:
/// - `;;` starts a comment
/// - commas are ignored
/// - whitespace-separated tokens
fn tokenize(line_no: usize, line: &str) -> Result<Vec<Token<'_>>, IsaError> {
    let mut out = Vec::with_capacity(4);
    let mut start: Option<usize> = None;

    let bytes = line.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b';' => {
                if !line[i..].starts_with(COMMENT_PREFIX) {
                    return Err(IsaError::ParseError {
                        line: line_no,
                        offset: i + 1,
                        message: "unexpected `;` (comments start with `;;`)",
                    });
                }
                break;
            }
            b',' | b' ' | b'\t' | b'\r' => {
                if let Some(s) = start.take() {
                    out.push(Token {
                        text: &line[s..i],
                        offset: s + 1,
                    });
                }
            }
            _ => {
                if start.is_none() {
                    start = Some(i);
                }
            }
        }
        i += 1;
    }

    if let Some(s) = start {
        out.push(Token {
            text: &line[s..i],
            offset: s + 1,
        });
    }

    Ok(out)
}

/// Parse an unsigned 32-bit operand (index, depth, alignment, offset).
pub(crate) fn parse_u32(tok: &str, expected: &'static str) -> Result<u32, IsaError> {
    tok.parse::<u32>().map_err(|_| IsaError::InvalidOperand {
        token: tok.to_string(),
        expected,
    })
}

/// Parse a reserved byte operand.
pub(crate) fn parse_reserved(tok: &str) -> Result<u8, IsaError> {
    tok.parse::<u8>().map_err(|_| IsaError::InvalidOperand {
        token: tok.to_string(),
        expected: "reserved byte",
    })
}

/// Parse a block signature (`i32`, `i64`, `f32`, `f64`).
pub(crate) fn parse_value_type(tok: &str) -> Result<ValueType, IsaError> {
    ValueType::from_name(tok).ok_or_else(|| IsaError::InvalidOperand {
        token: tok.to_string(),
        expected: "value type",
    })
}

macro_rules! define_parse_float {
    ($name:ident, $float:ty, $bits:ty, $expected:literal) => {
        /// Parse a float constant into its bit pattern.
        ///
        /// `nan:0x<bits>` keeps the exact pattern; other NaN spellings
        /// accepted by the standard parser yield the canonical quiet NaN.
        pub(crate) fn $name(tok: &str) -> Result<$bits, IsaError> {
            let invalid = || IsaError::InvalidOperand {
                token: tok.to_string(),
                expected: $expected,
            };
            if let Some(hex) = tok.strip_prefix(NAN_PREFIX) {
                return <$bits>::from_str_radix(hex, 16).map_err(|_| invalid());
            }
            tok.parse::<$float>()
                .map(<$float>::to_bits)
                .map_err(|_| invalid())
        }
    };
}

define_parse_float!(parse_f32_bits, f32, u32, "f32 constant");
define_parse_float!(parse_f64_bits, f64, u64, "f64 constant");

fn arity_error(mnemonic: &str, expected: &str, actual: usize) -> IsaError {
    IsaError::ArityMismatch {
        mnemonic: mnemonic.to_string(),
        expected: expected.to_string(),
        actual,
    }
}

/// Parse the operand tokens of one instruction into the immediate for `shape`.
fn parse_immediate(
    mnemonic: &str,
    shape: ImmediateShape,
    operands: &[Token],
) -> Result<Option<Immediate>, IsaError> {
    let ops: Vec<&str> = operands.iter().map(|t| t.text).collect();
    let exactly_one = |expected: &'static str| -> Result<u32, IsaError> {
        match ops.as_slice() {
            [tok] => parse_u32(tok, expected),
            _ => Err(arity_error(mnemonic, "1", ops.len())),
        }
    };

    let immediate = match shape {
        ImmediateShape::None => {
            if !ops.is_empty() {
                return Err(arity_error(mnemonic, "0", ops.len()));
            }
            return Ok(None);
        }
        ImmediateShape::Block => match ops.as_slice() {
            [] => Immediate::Block { signature: None },
            [tok] => Immediate::Block {
                signature: Some(parse_value_type(tok)?),
            },
            _ => return Err(arity_error(mnemonic, "0 or 1", ops.len())),
        },
        ImmediateShape::Branch => Immediate::Branch {
            depth: exactly_one("branch depth")?,
        },
        ImmediateShape::BranchTable => match ops.split_last() {
            Some((default, targets)) => Immediate::BranchTable {
                targets: targets
                    .iter()
                    .map(|tok| parse_u32(tok, "branch depth"))
                    .collect::<Result<_, _>>()?,
                default: parse_u32(default, "branch depth")?,
            },
            None => return Err(arity_error(mnemonic, "at least 1", 0)),
        },
        ImmediateShape::LocalIndex => Immediate::LocalIndex {
            index: exactly_one("local index")?,
        },
        ImmediateShape::GlobalIndex => Immediate::GlobalIndex {
            index: exactly_one("global index")?,
        },
        ImmediateShape::CallIndex => Immediate::CallIndex {
            function_index: exactly_one("function index")?,
        },
        ImmediateShape::CallIndirect => match ops.as_slice() {
            [type_index] => Immediate::CallIndirect {
                type_index: parse_u32(type_index, "type index")?,
                reserved: 0,
            },
            [type_index, reserved] => Immediate::CallIndirect {
                type_index: parse_u32(type_index, "type index")?,
                reserved: parse_reserved(reserved)?,
            },
            _ => return Err(arity_error(mnemonic, "1 or 2", ops.len())),
        },
        ImmediateShape::MemoryAccess => {
            if ops.len() > 2 {
                return Err(arity_error(mnemonic, "0 to 2", ops.len()));
            }
            let mut align = 0;
            let mut offset = 0;
            for (position, tok) in ops.iter().enumerate() {
                if let Some(value) = tok.strip_prefix(ALIGN_KEY) {
                    align = parse_u32(value, "alignment")?;
                } else if let Some(value) = tok.strip_prefix(OFFSET_KEY) {
                    offset = parse_u32(value, "memory offset")?;
                } else if position == 0 {
                    align = parse_u32(tok, "alignment")?;
                } else {
                    offset = parse_u32(tok, "memory offset")?;
                }
            }
            Immediate::MemoryAccess { align, offset }
        }
        ImmediateShape::ConstI32 => match ops.as_slice() {
            [tok] => Immediate::ConstI32 {
                value: tok.parse().map_err(|_| IsaError::InvalidOperand {
                    token: tok.to_string(),
                    expected: "i32 constant",
                })?,
            },
            _ => return Err(arity_error(mnemonic, "1", ops.len())),
        },
        ImmediateShape::ConstI64 => match ops.as_slice() {
            [tok] => Immediate::ConstI64 {
                value: tok.parse().map_err(|_| IsaError::InvalidOperand {
                    token: tok.to_string(),
                    expected: "i64 constant",
                })?,
            },
            _ => return Err(arity_error(mnemonic, "1", ops.len())),
        },
        ImmediateShape::ConstF32 => match ops.as_slice() {
            [tok] => Immediate::ConstF32 {
                bits: parse_f32_bits(tok)?,
            },
            _ => return Err(arity_error(mnemonic, "1", ops.len())),
        },
        ImmediateShape::ConstF64 => match ops.as_slice() {
            [tok] => Immediate::ConstF64 {
                bits: parse_f64_bits(tok)?,
            },
            _ => return Err(arity_error(mnemonic, "1", ops.len())),
        },
        ImmediateShape::CurGrowMem => match ops.as_slice() {
            [] => Immediate::CurGrowMem { reserved: 0 },
            [tok] => Immediate::CurGrowMem {
                reserved: parse_reserved(tok)?,
            },
            _ => return Err(arity_error(mnemonic, "0 or 1", ops.len())),
        },
    };
    Ok(Some(immediate))
}

/// Parse one instruction from a non-empty token list.
///
/// `index` is the position of the instruction in the source, used for
/// unknown-mnemonic reporting.
fn parse_instruction(
    registry: &Registry,
    tokens: &[Token],
    index: usize,
) -> Result<Instruction, IsaError> {
    let (head, operands) = tokens
        .split_first()
        .ok_or_else(|| arity_error("<missing mnemonic>", "1", 0))?;
    let entry = registry
        .lookup_by_mnemonic(head.text)
        .ok_or_else(|| IsaError::UnknownMnemonic {
            mnemonic: head.text.to_string(),
            index,
        })?;

    Ok(Instruction {
        mnemonic: Cow::Borrowed(entry.mnemonic),
        immediate: parse_immediate(entry.mnemonic, entry.immediate_shape, operands)?,
        byte_offset: 0,
    })
}

/// Parses source text into instructions.
///
/// Each instruction's `byte_offset` is its position in the encoded output,
/// so the result compares equal to decoding [`assemble_source`]'s bytes.
pub fn parse_source(source: &str) -> Result<Vec<Instruction>, IsaError> {
    let registry = Registry::global();
    let mut instructions = Vec::new();
    let mut byte_offset = 0usize;

    for (line_no, line) in source.lines().enumerate() {
        let tokens = tokenize(line_no + 1, line)?;
        if tokens.is_empty() {
            continue;
        }

        let instruction = parse_instruction(registry, &tokens, instructions.len())
            .map_err(|e| IsaError::AssemblyError {
                line: line_no + 1,
                offset: tokens[0].offset,
                source: e.to_string(),
            })?
            .at(byte_offset);

        byte_offset += 1 + instruction.immediate.as_ref().map_or(0, Encode::encoded_len);
        instructions.push(instruction);
    }

    Ok(instructions)
}

/// Assemble a full source string into bytes.
pub fn assemble_source(source: &str) -> Result<Vec<u8>, IsaError> {
    encode(&parse_source(source)?)
}

/// Assembles source with an associated filename for error diagnostics.
///
/// Logs a compiler-style diagnostic on failure, including source location
/// information.
fn assemble_source_with_name(source: &str, source_name: &str) -> Result<Vec<u8>, IsaError> {
    let result = assemble_source(source);
    if let Err(err) = &result {
        log_assembly_error(source_name, source, err);
    }
    result
}

/// Convenience: assemble directly from file path
pub fn assemble_file<P: AsRef<Path>>(path: P) -> Result<Vec<u8>, IsaError> {
    let path_ref = path.as_ref();
    let source = fs::read_to_string(path_ref).map_err(|e| IsaError::IoError {
        path: path_ref.display().to_string(),
        source: e.to_string(),
    })?;
    let name = path_ref.display().to_string();
    let bytes = assemble_source_with_name(&source, &name)?;
    info!("assembled {name}: {} bytes", bytes.len());
    Ok(bytes)
}

/// Renders instructions as assembler text, one per line.
pub fn format_instructions(instructions: &[Instruction]) -> String {
    let mut out = String::new();
    for instruction in instructions {
        let _ = writeln!(out, "{instruction}");
    }
    out
}

/// Disassembles `bytes` into a listing indented by block depth.
///
/// Each line ends with the instruction's byte offset as a comment, so the
/// listing assembles back to the same bytes.
pub fn disassemble(bytes: &[u8]) -> Result<String, IsaError> {
    let decoded = decode(bytes)?;
    let mut out = String::new();
    let mut depth = 0usize;

    for instruction in &decoded.instructions {
        if instruction.is_end() || instruction.mnemonic == "else" {
            depth = depth.saturating_sub(1);
        }

        let text = format!("{}{}", LISTING_INDENT.repeat(depth), instruction);
        let _ = writeln!(
            out,
            "{text:<width$} {COMMENT_PREFIX} 0x{:04x}",
            instruction.byte_offset,
            width = LISTING_COMMENT_COLUMN
        );

        if instruction.opens_block() || instruction.mnemonic == "else" {
            depth += 1;
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::isa::opcodes::OPCODE_TABLE;
    use crate::utils::test_utils::utils::{EVERY_SHAPE_TEXT, SAMPLE_BODY, every_shape_body};

    fn only(source: &str) -> Instruction {
        let mut instructions = parse_source(source).unwrap();
        assert_eq!(instructions.len(), 1);
        instructions.remove(0)
    }

    /// One representative immediate per shape.
    fn sample_immediate(shape: ImmediateShape) -> Option<Immediate> {
        let immediate = match shape {
            ImmediateShape::None => return None,
            ImmediateShape::Block => Immediate::Block {
                signature: Some(ValueType::F64),
            },
            ImmediateShape::Branch => Immediate::Branch { depth: 3 },
            ImmediateShape::BranchTable => Immediate::BranchTable {
                targets: vec![4, 0, 200],
                default: 1,
            },
            ImmediateShape::LocalIndex => Immediate::LocalIndex { index: 7 },
            ImmediateShape::GlobalIndex => Immediate::GlobalIndex { index: 70_000 },
            ImmediateShape::CallIndex => Immediate::CallIndex { function_index: 12 },
            ImmediateShape::CallIndirect => Immediate::CallIndirect {
                type_index: 2,
                reserved: 1,
            },
            ImmediateShape::MemoryAccess => Immediate::MemoryAccess {
                align: 3,
                offset: u32::MAX,
            },
            ImmediateShape::ConstI32 => Immediate::ConstI32 { value: i32::MIN },
            ImmediateShape::ConstI64 => Immediate::ConstI64 { value: -9_000_000_000 },
            ImmediateShape::ConstF32 => Immediate::f32(0.1),
            ImmediateShape::ConstF64 => Immediate::f64(-2.5e-300),
            ImmediateShape::CurGrowMem => Immediate::CurGrowMem { reserved: 9 },
        };
        Some(immediate)
    }

    #[test]
    fn tokenize_splits_and_strips_comments() {
        let tokens = tokenize(1, "  br_table 1, 2,0 ;; jump").unwrap();
        let texts: Vec<&str> = tokens.iter().map(|t| t.text).collect();
        assert_eq!(texts, vec!["br_table", "1", "2", "0"]);
        assert_eq!(tokens[0].offset, 3);
        assert_eq!(tokens[3].offset, 17);
        assert!(tokenize(1, ";; only a comment").unwrap().is_empty());
    }

    #[test]
    fn tokenize_rejects_single_semicolon() {
        assert_eq!(
            tokenize(4, "nop ; oops").unwrap_err(),
            IsaError::ParseError {
                line: 4,
                offset: 5,
                message: "unexpected `;` (comments start with `;;`)",
            }
        );
    }

    #[test]
    fn assemble_empty_source() {
        assert!(assemble_source("").unwrap().is_empty());
        assert!(assemble_source("\n   \n;; nothing\n").unwrap().is_empty());
    }

    #[test]
    fn assemble_sample_body() {
        let source = "i32.const 5\ni32.const 3 ;; second\n\ni32.add\nend\n";
        assert_eq!(assemble_source(source).unwrap(), SAMPLE_BODY);
    }

    #[test]
    fn every_shape_text_matches_bytes() {
        let bytes = every_shape_body();
        assert_eq!(assemble_source(EVERY_SHAPE_TEXT).unwrap(), bytes);
        let parsed = parse_source(EVERY_SHAPE_TEXT).unwrap();
        let decoded = decode(&bytes).unwrap().instructions;
        assert_eq!(parsed, decoded);
        let offsets = |instructions: &[Instruction]| {
            instructions.iter().map(|i| i.byte_offset).collect::<Vec<_>>()
        };
        assert_eq!(offsets(&parsed), offsets(&decoded));
    }

    #[test]
    fn every_opcode_text_form_reparses() {
        for entry in OPCODE_TABLE {
            let instruction = Instruction {
                mnemonic: Cow::Borrowed(entry.mnemonic),
                immediate: sample_immediate(entry.immediate_shape),
                byte_offset: 0,
            };
            assert_eq!(only(&instruction.to_string()), instruction, "{}", entry.mnemonic);
        }
    }

    #[test]
    fn format_instructions_round_trips() {
        let instructions = decode(&every_shape_body()).unwrap().instructions;
        let text = format_instructions(&instructions);
        assert_eq!(text, EVERY_SHAPE_TEXT);
        assert_eq!(parse_source(&text).unwrap(), instructions);
    }

    #[test]
    fn memory_access_forms() {
        let expected = Some(Immediate::MemoryAccess {
            align: 2,
            offset: 8,
        });
        assert_eq!(only("i64.store 2 8").immediate, expected);
        assert_eq!(only("i64.store offset=8 align=2").immediate, expected);
        assert_eq!(only("i64.store align=2, offset=8").immediate, expected);
        assert_eq!(
            only("i32.load offset=4").immediate,
            Some(Immediate::MemoryAccess {
                align: 0,
                offset: 4
            })
        );
        assert_eq!(
            only("i32.load").immediate,
            Some(Immediate::MemoryAccess {
                align: 0,
                offset: 0
            })
        );
    }

    #[test]
    fn float_forms() {
        assert_eq!(only("f32.const inf").immediate, Some(Immediate::f32(f32::INFINITY)));
        assert_eq!(
            only("f64.const -inf").immediate,
            Some(Immediate::f64(f64::NEG_INFINITY))
        );
        assert_eq!(
            only("f32.const nan:0x7fc00001").immediate,
            Some(Immediate::ConstF32 { bits: 0x7fc0_0001 })
        );
        assert_eq!(
            only("f32.const -0").immediate,
            Some(Immediate::ConstF32 { bits: 0x8000_0000 })
        );
        assert_eq!(only("f64.const 1.5").immediate, Some(Immediate::f64(1.5)));
    }

    #[test]
    fn optional_operands_default_to_zero() {
        assert_eq!(
            only("grow_memory").immediate,
            Some(Immediate::CurGrowMem { reserved: 0 })
        );
        assert_eq!(
            only("call_indirect 5").immediate,
            Some(Immediate::CallIndirect {
                type_index: 5,
                reserved: 0
            })
        );
        assert_eq!(
            only("block").immediate,
            Some(Immediate::Block { signature: None })
        );
    }

    #[test]
    fn branch_table_default_is_last() {
        assert_eq!(
            only("br_table 0").immediate,
            Some(Immediate::BranchTable {
                targets: vec![],
                default: 0
            })
        );
        assert_eq!(
            only("br_table 3 1 2").immediate,
            Some(Immediate::BranchTable {
                targets: vec![3, 1],
                default: 2
            })
        );
    }

    #[test]
    fn unknown_mnemonic_has_location() {
        let err = assemble_source("nop\n  i32.bogus 1\n").unwrap_err();
        assert_eq!(
            err,
            IsaError::AssemblyError {
                line: 2,
                offset: 3,
                source: "unknown mnemonic `i32.bogus` (instruction 1)".to_string(),
            }
        );
    }

    #[test]
    fn arity_and_operand_errors() {
        let err = assemble_source("i32.add 1").unwrap_err();
        assert_eq!(
            err.to_string(),
            "line 1:1: i32.add takes 0 operand(s), got 1"
        );

        let err = assemble_source("br_table").unwrap_err();
        assert_eq!(
            err.to_string(),
            "line 1:1: br_table takes at least 1 operand(s), got 0"
        );

        let err = assemble_source("get_local -1").unwrap_err();
        assert_eq!(
            err.to_string(),
            "line 1:1: invalid local index operand `-1`"
        );

        let err = assemble_source("block i128").unwrap_err();
        assert!(matches!(err, IsaError::AssemblyError { line: 1, .. }));

        let err = assemble_source("i32.const 2147483648").unwrap_err();
        assert!(err.to_string().contains("i32 constant"));
    }

    #[test]
    fn diagnostic_points_at_column() {
        let source = "nop\n  i32.bogus\n";
        let diag = render_assembly_diagnostic("body.wat", source, 2, 3, "unknown mnemonic");
        assert_eq!(
            diag,
            "error: unknown mnemonic\n --> body.wat:2:3\n     |\n   2 |   i32.bogus\n     |   ^\n"
        );
    }

    #[test]
    fn error_location_only_for_text_errors() {
        let err = IsaError::ParseError {
            line: 3,
            offset: 9,
            message: "bad",
        };
        assert_eq!(
            assembly_error_location(&err),
            Some((3, 9, "bad".to_string()))
        );
        assert_eq!(
            assembly_error_location(&IsaError::DuplicateOpcode { opcode: 1 }),
            None
        );
    }

    #[test]
    fn disassemble_listing() {
        let listing = disassemble(&every_shape_body()).unwrap();
        let lines: Vec<&str> = listing.lines().collect();
        assert_eq!(lines.len(), 23);
        assert!(lines[0].starts_with("block "));
        assert!(lines[0].ends_with(";; 0x0000"));
        assert!(lines[1].starts_with("  loop i32 "));
        assert!(lines[5].starts_with("      br_table 0 1 2 "));
        assert!(lines[5].ends_with(";; 0x000a"));
        assert!(lines[6].starts_with("    else "));
        assert!(lines[7].starts_with("    end "));
        assert!(lines[9].starts_with("end "));
        assert_eq!(assemble_source(&listing).unwrap(), every_shape_body());
    }

    #[test]
    fn disassemble_propagates_decode_errors() {
        assert_eq!(
            disassemble(&[0x01, 0x12]).unwrap_err(),
            IsaError::UnknownOpcode {
                opcode: 0x12,
                offset: 1
            }
        );
    }

    #[test]
    fn assemble_file_reads_source() {
        let path = std::env::temp_dir().join(format!("wasm_isa_asm_{}.wat", std::process::id()));
        fs::write(&path, "i32.const 5\ni32.const 3\ni32.add\nend\n").unwrap();
        let bytes = assemble_file(&path);
        let _ = fs::remove_file(&path);
        assert_eq!(bytes.unwrap(), SAMPLE_BODY);
    }

    #[test]
    fn assemble_file_missing() {
        let err = assemble_file("/definitely/not/here.wat").unwrap_err();
        assert!(matches!(err, IsaError::IoError { .. }));
    }
}
