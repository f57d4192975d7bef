use crate::isa::immediate::Immediate;
use crate::isa::opcodes::Opcode;
use crate::isa::registry::Registry;
use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};

/// One decoded (or to-be-encoded) instruction.
///
/// `byte_offset` is the position of the opcode byte in the stream it came
/// from. The encoder ignores it, and so do equality and hashing: two
/// instructions are equal when their mnemonic and immediate are.
#[derive(Clone, Debug)]
pub struct Instruction {
    pub mnemonic: Cow<'static, str>,
    pub immediate: Option<Immediate>,
    pub byte_offset: usize,
}

impl PartialEq for Instruction {
    fn eq(&self, other: &Self) -> bool {
        self.mnemonic == other.mnemonic && self.immediate == other.immediate
    }
}

impl Eq for Instruction {}

impl Hash for Instruction {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.mnemonic.as_ref().hash(state);
        self.immediate.hash(state);
    }
}

impl Instruction {
    /// Creates an instruction with no immediate at offset 0.
    pub fn new(mnemonic: impl Into<Cow<'static, str>>) -> Self {
        Self {
            mnemonic: mnemonic.into(),
            immediate: None,
            byte_offset: 0,
        }
    }

    /// Creates an instruction carrying `immediate` at offset 0.
    pub fn with_immediate(mnemonic: impl Into<Cow<'static, str>>, immediate: Immediate) -> Self {
        Self {
            mnemonic: mnemonic.into(),
            immediate: Some(immediate),
            byte_offset: 0,
        }
    }

    /// Sets the source position.
    pub fn at(mut self, byte_offset: usize) -> Self {
        self.byte_offset = byte_offset;
        self
    }

    /// Returns true if this instruction opens a nested block.
    pub fn opens_block(&self) -> bool {
        matches!(
            self.opcode(),
            Some(Opcode::Block | Opcode::Loop | Opcode::If)
        )
    }

    /// Returns true if this instruction is `end`.
    pub fn is_end(&self) -> bool {
        self.mnemonic == Opcode::End.mnemonic()
    }

    /// Typed opcode for the mnemonic, if it names a registered instruction.
    pub fn opcode(&self) -> Option<Opcode> {
        let entry = Registry::global().lookup_by_mnemonic(&self.mnemonic)?;
        Opcode::try_from(entry.opcode).ok()
    }
}

/// Renders the assembler text form: the mnemonic followed by its operands.
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.mnemonic)?;
        if let Some(immediate) = &self.immediate {
            let operands = immediate.to_string();
            if !operands.is_empty() {
                write!(f, " {operands}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::isa::immediate::ValueType;

    #[test]
    fn display_forms() {
        assert_eq!(Instruction::new("i32.add").to_string(), "i32.add");
        assert_eq!(
            Instruction::with_immediate("i32.const", Immediate::ConstI32 { value: -5 }).to_string(),
            "i32.const -5"
        );
        assert_eq!(
            Instruction::with_immediate("block", Immediate::Block { signature: None }).to_string(),
            "block"
        );
        assert_eq!(
            Instruction::with_immediate(
                "loop",
                Immediate::Block {
                    signature: Some(ValueType::I32)
                }
            )
            .to_string(),
            "loop i32"
        );
    }

    #[test]
    fn block_structure() {
        assert!(Instruction::with_immediate("if", Immediate::Block { signature: None }).opens_block());
        assert!(!Instruction::new("else").opens_block());
        assert!(Instruction::new("end").is_end());
        assert_eq!(Instruction::new("end").opcode(), Some(Opcode::End));
        assert_eq!(Instruction::new("nope").opcode(), None);
    }

    #[test]
    fn owned_and_borrowed_mnemonics_compare_equal() {
        let borrowed = Instruction::new("nop").at(3);
        let owned = Instruction::new(String::from("nop")).at(3);
        assert_eq!(borrowed, owned);
    }

    #[test]
    fn equality_ignores_byte_offset() {
        use std::collections::hash_map::DefaultHasher;

        let hash = |instruction: &Instruction| {
            let mut hasher = DefaultHasher::new();
            instruction.hash(&mut hasher);
            hasher.finish()
        };
        let here = Instruction::with_immediate("br", Immediate::Branch { depth: 1 });
        let there = here.clone().at(40);
        assert_eq!(here, there);
        assert_eq!(hash(&here), hash(&there));
        assert_ne!(here, Instruction::with_immediate("br", Immediate::Branch { depth: 2 }).at(40));
        assert_ne!(here, Instruction::with_immediate("br_if", Immediate::Branch { depth: 1 }));
    }
}
