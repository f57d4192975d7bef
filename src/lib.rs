//! Instruction-set registry and binary codec for a WebAssembly-style stack
//! machine.
//!
//! Provides the opcode table, the immediate operand codec, a decoder and
//! encoder between raw bytes and structured instructions, and a text
//! assembler for writing instruction streams by hand.

pub mod isa;
pub mod types;
pub mod utils;

pub use isa::{Decoded, Immediate, Instruction, IsaError, Registry, decode, encode};
