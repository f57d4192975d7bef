//! Validated opcode registry.
//!
//! [`Registry`] indexes [`OPCODE_TABLE`] both ways: byte to entry through a
//! 256-slot array and mnemonic to entry through a hash map. Construction
//! rejects duplicate opcodes and duplicate mnemonics, so the two mappings
//! always form a bijection over the registered set.
//!
//! The process-wide instance from [`Registry::global`] is built on first use
//! and never mutated afterwards; it is shared read-only across threads.

use crate::isa::errors::IsaError;
use crate::isa::opcodes::{Category, OPCODE_TABLE, OpcodeEntry};
use std::collections::HashMap;
use std::sync::OnceLock;

const OPCODE_SLOTS: usize = 256;

/// Bidirectional opcode/mnemonic lookup table.
#[derive(Debug)]
pub struct Registry {
    by_opcode: [Option<&'static OpcodeEntry>; OPCODE_SLOTS],
    by_mnemonic: HashMap<&'static str, &'static OpcodeEntry>,
    /// Entries in ascending opcode order.
    entries: Vec<&'static OpcodeEntry>,
}

impl Registry {
    /// Builds a registry over `table`, failing on any duplicate key.
    pub fn build(table: &'static [OpcodeEntry]) -> Result<Self, IsaError> {
        let mut by_opcode = [None; OPCODE_SLOTS];
        let mut by_mnemonic = HashMap::with_capacity(table.len());

        for entry in table {
            let slot = &mut by_opcode[entry.opcode as usize];
            if slot.is_some() {
                return Err(IsaError::DuplicateOpcode {
                    opcode: entry.opcode,
                });
            }
            *slot = Some(entry);

            if by_mnemonic.insert(entry.mnemonic, entry).is_some() {
                return Err(IsaError::DuplicateMnemonic {
                    mnemonic: entry.mnemonic,
                });
            }
        }

        let entries = by_opcode.iter().flatten().copied().collect();
        Ok(Self {
            by_opcode,
            by_mnemonic,
            entries,
        })
    }

    /// Returns the registry over the built-in opcode table.
    ///
    /// # Panics
    ///
    /// Panics on first use if the built-in table contains a duplicate
    /// opcode or mnemonic. That is a defect in the table itself, not an
    /// input error, and the `isa_static_check` tests catch it first.
    pub fn global() -> &'static Registry {
        static REGISTRY: OnceLock<Registry> = OnceLock::new();
        REGISTRY.get_or_init(|| {
            Registry::build(OPCODE_TABLE)
                .unwrap_or_else(|err| panic!("invalid built-in opcode table: {err}"))
        })
    }

    /// Looks up an entry by opcode byte.
    pub fn lookup_by_opcode(&self, opcode: u8) -> Option<&'static OpcodeEntry> {
        self.by_opcode[opcode as usize]
    }

    /// Looks up an entry by mnemonic.
    pub fn lookup_by_mnemonic(&self, mnemonic: &str) -> Option<&'static OpcodeEntry> {
        self.by_mnemonic.get(mnemonic).copied()
    }

    /// Iterates all entries in ascending opcode order.
    pub fn entries(&self) -> impl Iterator<Item = &'static OpcodeEntry> + '_ {
        self.entries.iter().copied()
    }

    /// Iterates the entries of one category in ascending opcode order.
    pub fn by_category(
        &self,
        category: Category,
    ) -> impl Iterator<Item = &'static OpcodeEntry> + '_ {
        self.entries().filter(move |entry| entry.category == category)
    }

    /// Number of registered opcodes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no opcodes are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
