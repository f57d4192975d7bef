//! Stack-machine instruction set: opcode registry and binary codec.
//!
//! Every opcode byte maps to one [`opcodes::OpcodeEntry`] giving its
//! mnemonic, the shape of the immediate operand(s) that follow it, and its
//! declared operand-stack effect. The [`registry::Registry`] built from that
//! table is the single lookup point for both directions of the codec.
//!
//! # Pipeline
//!
//! ```text
//! bytes --decode--> [Instruction] --encode--> bytes
//!                        ^   |
//!            parse_source|   |Display
//!                        |   v
//!                        text
//! ```
//!
//! Re-encoding a decoded stream reproduces it byte for byte whenever its
//! varints are minimal; over-long varints are canonicalized.
//!
//! # Modules
//!
//! - [`opcodes`]: Opcode table, typed [`opcodes::Opcode`] enum, shapes and categories
//! - [`registry`]: Validated opcode/mnemonic bijection
//! - [`immediate`]: Per-shape immediate codec
//! - [`instruction`]: Structured instruction and its text form
//! - [`decoder`]: Byte stream to instruction sequence
//! - [`encoder`]: Instruction sequence to bytes
//! - [`assembler`]: Text assembly, diagnostics, and disassembly listings
//! - [`errors`]: Error types for all of the above

pub mod assembler;
pub mod decoder;
pub mod encoder;
pub mod errors;
pub mod immediate;
pub mod instruction;
#[cfg(test)]
mod isa_static_check;
pub mod opcodes;
pub mod registry;

pub use decoder::{DecodeWarning, Decoded, decode};
pub use encoder::{encode, encode_into};
pub use errors::IsaError;
pub use immediate::{Immediate, ValueType};
pub use instruction::Instruction;
pub use opcodes::{Category, ImmediateShape, OPCODE_TABLE, Opcode, OpcodeEntry};
pub use registry::Registry;
