//! Byte-level building blocks shared by the instruction codec.
//!
//! - `encoding`: `Encode`/`Decode` traits, sinks, and fixed-width integers
//! - `leb128`: variable-length integers with minimal re-encoding

pub mod encoding;
pub mod leb128;
