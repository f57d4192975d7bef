#[cfg(test)]
mod tests {
    const FNV_OFFSET: u64 = 0xcbf29ce484222325;
    const FNV_PRIME: u64 = 0x100000001b3;
    const EXPECTED_TABLE_HASH: u64 = 0x96fd4354a53fcb59;

    fn fnv1a64(mut h: u64, bytes: &[u8]) -> u64 {
        for b in bytes {
            h ^= *b as u64;
            h = h.wrapping_mul(FNV_PRIME);
        }
        h
    }

    // Descriptions are documentation only and stay out of the hash.
    macro_rules! hash_table {
        (
            $(
                $name:ident = $opcode:literal, $mnemonic:literal => $shape:ident,
                $pops:literal -> $pushes:literal, $category:ident, $desc:literal
            ),* $(,)?
        ) => {{
            let mut h = FNV_OFFSET;
            $(
                h = fnv1a64(h, stringify!($name).as_bytes());
                h = fnv1a64(h, &[crate::isa::opcodes::Opcode::$name as u8]);
                h = fnv1a64(h, $mnemonic.as_bytes());
                h = fnv1a64(h, stringify!($shape).as_bytes());
                h = fnv1a64(h, &($pops as u32).to_le_bytes());
                h = fnv1a64(h, &($pushes as u32).to_le_bytes());
                h = fnv1a64(h, stringify!($category).as_bytes());
            )*
            h
        }};
    }

    fn current_table_hash() -> u64 {
        crate::for_each_opcode!(hash_table)
    }

    #[test]
    #[ignore]
    fn print_table_hash() {
        println!("TABLE_HASH=0x{:016x}", current_table_hash());
    }

    #[test]
    fn opcode_table_unchanged() {
        assert_eq!(current_table_hash(), EXPECTED_TABLE_HASH);
    }

    #[test]
    fn registry_accepts_builtin_table() {
        let registry = crate::isa::registry::Registry::build(crate::isa::opcodes::OPCODE_TABLE);
        assert_eq!(registry.map(|r| r.len()).ok(), Some(172));
    }
}
