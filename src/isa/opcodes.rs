//! Opcode table for the stack-machine instruction set.
//!
//! The [`for_each_opcode!`](crate::for_each_opcode) macro holds the canonical
//! opcode definitions and invokes a callback macro for code generation, so
//! the registry, the typed [`Opcode`] enum, and the static table check all
//! read from one list.
//!
//! This module generates:
//! - The [`Opcode`] enum with explicit byte discriminants
//! - `TryFrom<u8>` for decoding opcodes
//! - [`OPCODE_TABLE`], one [`OpcodeEntry`] per opcode in byte order
//!
//! # Table Format
//!
//! ```text
//! Name = opcode, "mnemonic" => ImmediateShape, pops -> pushes, Category, "description",
//! ```
//!
//! Stack arity is the static, declared effect. `call` and `call_indirect`
//! carry placeholder counts: their real arity depends on the callee's
//! signature and is resolved by a type-aware validator downstream.

use crate::isa::errors::IsaError;
use std::fmt;

/// Invokes a callback macro with the complete opcode definition list.
#[macro_export]
macro_rules! for_each_opcode {
    ($callback:ident) => {
        $callback! {
            // Control
            Unreachable = 0x00, "unreachable" => None, 0 -> 0, Control, "trap immediately",
            Nop = 0x01, "nop" => None, 0 -> 0, Control, "no operation",
            Block = 0x02, "block" => Block, 0 -> 0, Control, "begin a sequence of expressions",
            Loop = 0x03, "loop" => Block, 0 -> 0, Control, "begin a block which can also form control flow loops",
            If = 0x04, "if" => Block, 1 -> 0, Control, "begin if expression",
            Else = 0x05, "else" => None, 0 -> 0, Control, "begin else expression of if",
            End = 0x0b, "end" => None, 0 -> 0, Control, "end a block, loop, or if",
            Br = 0x0c, "br" => Branch, 0 -> 0, Control, "break that targets an outer nested block",
            BrIf = 0x0d, "br_if" => Branch, 1 -> 0, Control, "conditional break that targets an outer nested block",
            BrTable = 0x0e, "br_table" => BranchTable, 1 -> 0, Control, "branch table control flow construct",
            Return = 0x0f, "return" => None, 1 -> 0, Control, "return zero or one value from this function",
            Call = 0x10, "call" => CallIndex, 0 -> 0, Control, "call a function by its index",
            CallIndirect = 0x11, "call_indirect" => CallIndirect, 1 -> 0, Control, "call a function indirect with an expected signature",
            // Parametric
            Drop = 0x1a, "drop" => None, 1 -> 0, Parametric, "ignore value",
            Select = 0x1b, "select" => None, 3 -> 1, Parametric, "select one of two values based on condition",
            // Variable
            GetLocal = 0x20, "get_local" => LocalIndex, 0 -> 1, Variable, "read a local variable or parameter",
            SetLocal = 0x21, "set_local" => LocalIndex, 1 -> 0, Variable, "write a local variable or parameter",
            TeeLocal = 0x22, "tee_local" => LocalIndex, 1 -> 1, Variable, "write a local variable or parameter and read the same value",
            GetGlobal = 0x23, "get_global" => GlobalIndex, 0 -> 1, Variable, "read a global variable",
            SetGlobal = 0x24, "set_global" => GlobalIndex, 1 -> 0, Variable, "write a global variable",
            // Memory
            I32Load = 0x28, "i32.load" => MemoryAccess, 1 -> 1, Memory, "load from memory",
            I64Load = 0x29, "i64.load" => MemoryAccess, 1 -> 1, Memory, "load from memory",
            F32Load = 0x2a, "f32.load" => MemoryAccess, 1 -> 1, Memory, "load from memory",
            F64Load = 0x2b, "f64.load" => MemoryAccess, 1 -> 1, Memory, "load from memory",
            I32Load8S = 0x2c, "i32.load8_s" => MemoryAccess, 1 -> 1, Memory, "load from memory",
            I32Load8U = 0x2d, "i32.load8_u" => MemoryAccess, 1 -> 1, Memory, "load from memory",
            I32Load16S = 0x2e, "i32.load16_s" => MemoryAccess, 1 -> 1, Memory, "load from memory",
            I32Load16U = 0x2f, "i32.load16_u" => MemoryAccess, 1 -> 1, Memory, "load from memory",
            I64Load8S = 0x30, "i64.load8_s" => MemoryAccess, 1 -> 1, Memory, "load from memory",
            I64Load8U = 0x31, "i64.load8_u" => MemoryAccess, 1 -> 1, Memory, "load from memory",
            I64Load16S = 0x32, "i64.load16_s" => MemoryAccess, 1 -> 1, Memory, "load from memory",
            I64Load16U = 0x33, "i64.load16_u" => MemoryAccess, 1 -> 1, Memory, "load from memory",
            I64Load32S = 0x34, "i64.load32_s" => MemoryAccess, 1 -> 1, Memory, "load from memory",
            I64Load32U = 0x35, "i64.load32_u" => MemoryAccess, 1 -> 1, Memory, "load from memory",
            I32Store = 0x36, "i32.store" => MemoryAccess, 2 -> 0, Memory, "store to memory",
            I64Store = 0x37, "i64.store" => MemoryAccess, 2 -> 0, Memory, "store to memory",
            F32Store = 0x38, "f32.store" => MemoryAccess, 2 -> 0, Memory, "store to memory",
            F64Store = 0x39, "f64.store" => MemoryAccess, 2 -> 0, Memory, "store to memory",
            I32Store8 = 0x3a, "i32.store8" => MemoryAccess, 2 -> 0, Memory, "store to memory",
            I32Store16 = 0x3b, "i32.store16" => MemoryAccess, 2 -> 0, Memory, "store to memory",
            I64Store8 = 0x3c, "i64.store8" => MemoryAccess, 2 -> 0, Memory, "store to memory",
            I64Store16 = 0x3d, "i64.store16" => MemoryAccess, 2 -> 0, Memory, "store to memory",
            I64Store32 = 0x3e, "i64.store32" => MemoryAccess, 2 -> 0, Memory, "store to memory",
            CurrentMemory = 0x3f, "current_memory" => CurGrowMem, 0 -> 1, Memory, "query the size of memory",
            GrowMemory = 0x40, "grow_memory" => CurGrowMem, 0 -> 0, Memory, "grow the size of memory",
            // Constant
            I32Const = 0x41, "i32.const" => ConstI32, 0 -> 1, Constant, "a constant value interpreted as i32",
            I64Const = 0x42, "i64.const" => ConstI64, 0 -> 1, Constant, "a constant value interpreted as i64",
            F32Const = 0x43, "f32.const" => ConstF32, 0 -> 1, Constant, "a constant value interpreted as f32",
            F64Const = 0x44, "f64.const" => ConstF64, 0 -> 1, Constant, "a constant value interpreted as f64",
            // LogicalI32
            I32Eqz = 0x45, "i32.eqz" => None, 1 -> 1, LogicalI32, "compare equal to zero (return 1 if operand is zero, 0 otherwise)",
            I32Eq = 0x46, "i32.eq" => None, 2 -> 1, LogicalI32, "sign-agnostic compare equal",
            I32Ne = 0x47, "i32.ne" => None, 2 -> 1, LogicalI32, "sign-agnostic compare unequal",
            I32LtS = 0x48, "i32.lt_s" => None, 2 -> 1, LogicalI32, "signed less than",
            I32LtU = 0x49, "i32.lt_u" => None, 2 -> 1, LogicalI32, "unsigned less than",
            I32GtS = 0x4a, "i32.gt_s" => None, 2 -> 1, LogicalI32, "signed greater than",
            I32GtU = 0x4b, "i32.gt_u" => None, 2 -> 1, LogicalI32, "unsigned greater than",
            I32LeS = 0x4c, "i32.le_s" => None, 2 -> 1, LogicalI32, "signed less than or equal",
            I32LeU = 0x4d, "i32.le_u" => None, 2 -> 1, LogicalI32, "unsigned less than or equal",
            I32GeS = 0x4e, "i32.ge_s" => None, 2 -> 1, LogicalI32, "signed greater than or equal",
            I32GeU = 0x4f, "i32.ge_u" => None, 2 -> 1, LogicalI32, "unsigned greater than or equal",
            // LogicalI64
            I64Eqz = 0x50, "i64.eqz" => None, 1 -> 1, LogicalI64, "compare equal to zero (return 1 if operand is zero, 0 otherwise)",
            I64Eq = 0x51, "i64.eq" => None, 2 -> 1, LogicalI64, "sign-agnostic compare equal",
            I64Ne = 0x52, "i64.ne" => None, 2 -> 1, LogicalI64, "sign-agnostic compare unequal",
            I64LtS = 0x53, "i64.lt_s" => None, 2 -> 1, LogicalI64, "signed less than",
            I64LtU = 0x54, "i64.lt_u" => None, 2 -> 1, LogicalI64, "unsigned less than",
            I64GtS = 0x55, "i64.gt_s" => None, 2 -> 1, LogicalI64, "signed greater than",
            I64GtU = 0x56, "i64.gt_u" => None, 2 -> 1, LogicalI64, "unsigned greater than",
            I64LeS = 0x57, "i64.le_s" => None, 2 -> 1, LogicalI64, "signed less than or equal",
            I64LeU = 0x58, "i64.le_u" => None, 2 -> 1, LogicalI64, "unsigned less than or equal",
            I64GeS = 0x59, "i64.ge_s" => None, 2 -> 1, LogicalI64, "signed greater than or equal",
            I64GeU = 0x5a, "i64.ge_u" => None, 2 -> 1, LogicalI64, "unsigned greater than or equal",
            // LogicalF32
            F32Eq = 0x5b, "f32.eq" => None, 2 -> 1, LogicalF32, "compare ordered and equal",
            F32Ne = 0x5c, "f32.ne" => None, 2 -> 1, LogicalF32, "compare unordered or unequal",
            F32Lt = 0x5d, "f32.lt" => None, 2 -> 1, LogicalF32, "compare ordered and less than",
            F32Gt = 0x5e, "f32.gt" => None, 2 -> 1, LogicalF32, "compare ordered and less than or equal",
            F32Le = 0x5f, "f32.le" => None, 2 -> 1, LogicalF32, "compare ordered and greater than",
            F32Ge = 0x60, "f32.ge" => None, 2 -> 1, LogicalF32, "compare ordered and greater than or equal",
            // LogicalF64
            F64Eq = 0x61, "f64.eq" => None, 2 -> 1, LogicalF64, "compare ordered and equal",
            F64Ne = 0x62, "f64.ne" => None, 2 -> 1, LogicalF64, "compare unordered or unequal",
            F64Lt = 0x63, "f64.lt" => None, 2 -> 1, LogicalF64, "compare ordered and less than",
            F64Gt = 0x64, "f64.gt" => None, 2 -> 1, LogicalF64, "compare ordered and less than or equal",
            F64Le = 0x65, "f64.le" => None, 2 -> 1, LogicalF64, "compare ordered and greater than",
            F64Ge = 0x66, "f64.ge" => None, 2 -> 1, LogicalF64, "compare ordered and greater than or equal",
            // ArithmeticI32
            I32Clz = 0x67, "i32.clz" => None, 1 -> 1, ArithmeticI32, "sign-agnostic count leading zero bits (All zero bits are considered leading if the value is zero)",
            I32Ctz = 0x68, "i32.ctz" => None, 1 -> 1, ArithmeticI32, "sign-agnostic count trailing zero bits (All zero bits are considered trailing if the value is zero)",
            I32Popcnt = 0x69, "i32.popcnt" => None, 1 -> 1, ArithmeticI32, "sign-agnostic count number of one bits",
            I32Add = 0x6a, "i32.add" => None, 2 -> 1, ArithmeticI32, "sign-agnostic addition",
            I32Sub = 0x6b, "i32.sub" => None, 2 -> 1, ArithmeticI32, "sign-agnostic subtraction",
            I32Mul = 0x6c, "i32.mul" => None, 2 -> 1, ArithmeticI32, "sign-agnostic multiplication (lower 32-bits)",
            I32DivS = 0x6d, "i32.div_s" => None, 2 -> 1, ArithmeticI32, "signed division (result is truncated toward zero)",
            I32DivU = 0x6e, "i32.div_u" => None, 2 -> 1, ArithmeticI32, "unsigned division (result is floored)",
            I32RemS = 0x6f, "i32.rem_s" => None, 2 -> 1, ArithmeticI32, "signed remainder (result has the sign of the dividend)",
            I32RemU = 0x70, "i32.rem_u" => None, 2 -> 1, ArithmeticI32, "unsigned remainder",
            // BitwiseI32
            I32And = 0x71, "i32.and" => None, 2 -> 1, BitwiseI32, "sign-agnostic bitwise and",
            I32Or = 0x72, "i32.or" => None, 2 -> 1, BitwiseI32, "sign-agnostic bitwise inclusive or",
            I32Xor = 0x73, "i32.xor" => None, 2 -> 1, BitwiseI32, "sign-agnostic bitwise exclusive or",
            I32Shl = 0x74, "i32.shl" => None, 2 -> 1, BitwiseI32, "sign-agnostic shift left",
            I32ShrS = 0x75, "i32.shr_s" => None, 2 -> 1, BitwiseI32, "sign-replicating (arithmetic) shift right",
            I32ShrU = 0x76, "i32.shr_u" => None, 2 -> 1, BitwiseI32, "zero-replicating (logical) shift right",
            I32Rotl = 0x77, "i32.rotl" => None, 2 -> 1, BitwiseI32, "sign-agnostic rotate left",
            I32Rotr = 0x78, "i32.rotr" => None, 2 -> 1, BitwiseI32, "sign-agnostic rotate right",
            // ArithmeticI64
            I64Clz = 0x79, "i64.clz" => None, 1 -> 1, ArithmeticI64, "sign-agnostic count leading zero bits (All zero bits are considered leading if the value is zero)",
            I64Ctz = 0x7a, "i64.ctz" => None, 1 -> 1, ArithmeticI64, "sign-agnostic count trailing zero bits (All zero bits are considered trailing if the value is zero)",
            I64Popcnt = 0x7b, "i64.popcnt" => None, 1 -> 1, ArithmeticI64, "sign-agnostic count number of one bits",
            I64Add = 0x7c, "i64.add" => None, 2 -> 1, ArithmeticI64, "sign-agnostic addition",
            I64Sub = 0x7d, "i64.sub" => None, 2 -> 1, ArithmeticI64, "sign-agnostic subtraction",
            I64Mul = 0x7e, "i64.mul" => None, 2 -> 1, ArithmeticI64, "sign-agnostic multiplication (lower 32-bits)",
            I64DivS = 0x7f, "i64.div_s" => None, 2 -> 1, ArithmeticI64, "signed division (result is truncated toward zero)",
            I64DivU = 0x80, "i64.div_u" => None, 2 -> 1, ArithmeticI64, "unsigned division (result is floored)",
            I64RemS = 0x81, "i64.rem_s" => None, 2 -> 1, ArithmeticI64, "signed remainder (result has the sign of the dividend)",
            I64RemU = 0x82, "i64.rem_u" => None, 2 -> 1, ArithmeticI64, "unsigned remainder",
            // BitwiseI64
            I64And = 0x83, "i64.and" => None, 2 -> 1, BitwiseI64, "sign-agnostic bitwise and",
            I64Or = 0x84, "i64.or" => None, 2 -> 1, BitwiseI64, "sign-agnostic bitwise inclusive or",
            I64Xor = 0x85, "i64.xor" => None, 2 -> 1, BitwiseI64, "sign-agnostic bitwise exclusive or",
            I64Shl = 0x86, "i64.shl" => None, 2 -> 1, BitwiseI64, "sign-agnostic shift left",
            I64ShrS = 0x87, "i64.shr_s" => None, 2 -> 1, BitwiseI64, "sign-replicating (arithmetic) shift right",
            I64ShrU = 0x88, "i64.shr_u" => None, 2 -> 1, BitwiseI64, "zero-replicating (logical) shift right",
            I64Rotl = 0x89, "i64.rotl" => None, 2 -> 1, BitwiseI64, "sign-agnostic rotate left",
            I64Rotr = 0x8a, "i64.rotr" => None, 2 -> 1, BitwiseI64, "sign-agnostic rotate right",
            // ArithmeticF32
            F32Abs = 0x8b, "f32.abs" => None, 1 -> 1, ArithmeticF32, "absolute value",
            F32Neg = 0x8c, "f32.neg" => None, 1 -> 1, ArithmeticF32, "negation",
            F32Ceil = 0x8d, "f32.ceil" => None, 2 -> 1, ArithmeticF32, "ceiling operator",
            F32Floor = 0x8e, "f32.floor" => None, 2 -> 1, ArithmeticF32, "floor operator",
            F32Trunc = 0x8f, "f32.trunc" => None, 2 -> 1, ArithmeticF32, "round to nearest integer towards zero",
            F32Nearest = 0x90, "f32.nearest" => None, 2 -> 1, ArithmeticF32, "round to nearest integer, ties to even",
            F32Sqrt = 0x91, "f32.sqrt" => None, 2 -> 1, ArithmeticF32, "square root",
            F32Add = 0x92, "f32.add" => None, 2 -> 1, ArithmeticF32, "addition",
            F32Sub = 0x93, "f32.sub" => None, 2 -> 1, ArithmeticF32, "subtraction",
            F32Mul = 0x94, "f32.mul" => None, 2 -> 1, ArithmeticF32, "multiplication",
            F32Div = 0x95, "f32.div" => None, 2 -> 1, ArithmeticF32, "division",
            F32Min = 0x96, "f32.min" => None, 2 -> 1, ArithmeticF32, "minimum (binary operator); if either operand is NaN, returns NaN",
            F32Max = 0x97, "f32.max" => None, 2 -> 1, ArithmeticF32, "maximum (binary operator); if either operand is NaN, returns NaN",
            F32Copysign = 0x98, "f32.copysign" => None, 2 -> 1, ArithmeticF32, "copysign",
            // ArithmeticF64
            F64Abs = 0x99, "f64.abs" => None, 1 -> 1, ArithmeticF64, "absolute value",
            F64Neg = 0x9a, "f64.neg" => None, 1 -> 1, ArithmeticF64, "negation",
            F64Ceil = 0x9b, "f64.ceil" => None, 2 -> 1, ArithmeticF64, "ceiling operator",
            F64Floor = 0x9c, "f64.floor" => None, 2 -> 1, ArithmeticF64, "floor operator",
            F64Trunc = 0x9d, "f64.trunc" => None, 2 -> 1, ArithmeticF64, "round to nearest integer towards zero",
            F64Nearest = 0x9e, "f64.nearest" => None, 2 -> 1, ArithmeticF64, "round to nearest integer, ties to even",
            F64Sqrt = 0x9f, "f64.sqrt" => None, 2 -> 1, ArithmeticF64, "square root",
            F64Add = 0xa0, "f64.add" => None, 2 -> 1, ArithmeticF64, "addition",
            F64Sub = 0xa1, "f64.sub" => None, 2 -> 1, ArithmeticF64, "subtraction",
            F64Mul = 0xa2, "f64.mul" => None, 2 -> 1, ArithmeticF64, "multiplication",
            F64Div = 0xa3, "f64.div" => None, 2 -> 1, ArithmeticF64, "division",
            F64Min = 0xa4, "f64.min" => None, 2 -> 1, ArithmeticF64, "minimum (binary operator); if either operand is NaN, returns NaN",
            F64Max = 0xa5, "f64.max" => None, 2 -> 1, ArithmeticF64, "maximum (binary operator); if either operand is NaN, returns NaN",
            F64Copysign = 0xa6, "f64.copysign" => None, 2 -> 1, ArithmeticF64, "copysign",
            // Conversion
            I32WrapI64 = 0xa7, "i32.wrap/i64" => None, 1 -> 1, Conversion, "wrap a 64-bit integer to a 32-bit integer",
            I32TruncSF32 = 0xa8, "i32.trunc_s/f32" => None, 1 -> 1, Conversion, "truncate a 32-bit float to a signed 32-bit integer",
            I32TruncUF32 = 0xa9, "i32.trunc_u/f32" => None, 1 -> 1, Conversion, "truncate a 32-bit float to an unsigned 32-bit integer",
            I32TruncSF64 = 0xaa, "i32.trunc_s/f64" => None, 1 -> 1, Conversion, "truncate a 64-bit float to a signed 32-bit integer",
            I32TruncUF64 = 0xab, "i32.trunc_u/f64" => None, 1 -> 1, Conversion, "truncate a 64-bit float to an unsigned 32-bit integer",
            I64ExtendSI32 = 0xac, "i64.extend_s/i32" => None, 1 -> 1, Conversion, "extend a signed 32-bit integer to a 64-bit integer",
            I64ExtendUI32 = 0xad, "i64.extend_u/i32" => None, 1 -> 1, Conversion, "extend an unsigned 32-bit integer to a 64-bit integer",
            I64TruncSF32 = 0xae, "i64.trunc_s/f32" => None, 1 -> 1, Conversion, "truncate a 32-bit float to a signed 64-bit integer",
            I64TruncUF32 = 0xaf, "i64.trunc_u/f32" => None, 1 -> 1, Conversion, "truncate a 32-bit float to an unsigned 64-bit integer",
            I64TruncSF64 = 0xb0, "i64.trunc_s/f64" => None, 1 -> 1, Conversion, "truncate a 64-bit float to a signed 64-bit integer",
            I64TruncUF64 = 0xb1, "i64.trunc_u/f64" => None, 1 -> 1, Conversion, "truncate a 64-bit float to an unsigned 64-bit integer",
            F32ConvertSI32 = 0xb2, "f32.convert_s/i32" => None, 1 -> 1, Conversion, "convert a signed 32-bit integer to a 32-bit float",
            F32ConvertUI32 = 0xb3, "f32.convert_u/i32" => None, 1 -> 1, Conversion, "convert an unsigned 32-bit integer to a 32-bit float",
            F32ConvertSI64 = 0xb4, "f32.convert_s/i64" => None, 1 -> 1, Conversion, "convert a signed 64-bit integer to a 32-bit float",
            F32ConvertUI64 = 0xb5, "f32.convert_u/i64" => None, 1 -> 1, Conversion, "convert an unsigned 64-bit integer to a 32-bit float",
            F32DemoteF64 = 0xb6, "f32.demote/f64" => None, 1 -> 1, Conversion, "demote a 64-bit float to a 32-bit float",
            F64ConvertSI32 = 0xb7, "f64.convert_s/i32" => None, 1 -> 1, Conversion, "convert a signed 32-bit integer to a 64-bit float",
            F64ConvertUI32 = 0xb8, "f64.convert_u/i32" => None, 1 -> 1, Conversion, "convert an unsigned 32-bit integer to a 64-bit float",
            F64ConvertSI64 = 0xb9, "f64.convert_s/i64" => None, 1 -> 1, Conversion, "convert a signed 64-bit integer to a 64-bit float",
            F64ConvertUI64 = 0xba, "f64.convert_u/i64" => None, 1 -> 1, Conversion, "convert an unsigned 64-bit integer to a 64-bit float",
            F64PromoteF32 = 0xbb, "f64.promote/f32" => None, 1 -> 1, Conversion, "promote a 32-bit float to a 64-bit float",
            I32ReinterpretF32 = 0xbc, "i32.reinterpret/f32" => None, 1 -> 1, Conversion, "reinterpret the bits of a 32-bit float as a 32-bit integer",
            I64ReinterpretF64 = 0xbd, "i64.reinterpret/f64" => None, 1 -> 1, Conversion, "reinterpret the bits of a 64-bit float as a 64-bit integer",
            F32ReinterpretI32 = 0xbe, "f32.reinterpret/i32" => None, 1 -> 1, Conversion, "reinterpret the bits of a 32-bit integer as a 32-bit float",
            F64ReinterpretI64 = 0xbf, "f64.reinterpret/i64" => None, 1 -> 1, Conversion, "reinterpret the bits of a 64-bit integer as a 64-bit float",
        }
    };
}

/// Shape of the immediate operand(s) that follow an opcode byte.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ImmediateShape {
    /// No immediate bytes.
    None,
    /// One block signature byte (`block`, `loop`, `if`).
    Block,
    /// varuint32 relative depth (`br`, `br_if`).
    Branch,
    /// varuint32 count, `count` varuint32 targets, varuint32 default.
    BranchTable,
    /// varuint32 local index.
    LocalIndex,
    /// varuint32 global index.
    GlobalIndex,
    /// varuint32 function index.
    CallIndex,
    /// varuint32 type index followed by one reserved byte.
    CallIndirect,
    /// varuint32 alignment exponent then varuint32 byte offset.
    MemoryAccess,
    /// varint32.
    ConstI32,
    /// varint64.
    ConstI64,
    /// 4-byte little-endian IEEE 754.
    ConstF32,
    /// 8-byte little-endian IEEE 754.
    ConstF64,
    /// One reserved byte (`current_memory`, `grow_memory`).
    CurGrowMem,
}

impl ImmediateShape {
    /// Returns the shape name used in diagnostics.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ImmediateShape::None => "None",
            ImmediateShape::Block => "Block",
            ImmediateShape::Branch => "Branch",
            ImmediateShape::BranchTable => "BranchTable",
            ImmediateShape::LocalIndex => "LocalIndex",
            ImmediateShape::GlobalIndex => "GlobalIndex",
            ImmediateShape::CallIndex => "CallIndex",
            ImmediateShape::CallIndirect => "CallIndirect",
            ImmediateShape::MemoryAccess => "MemoryAccess",
            ImmediateShape::ConstI32 => "ConstI32",
            ImmediateShape::ConstI64 => "ConstI64",
            ImmediateShape::ConstF32 => "ConstF32",
            ImmediateShape::ConstF64 => "ConstF64",
            ImmediateShape::CurGrowMem => "CurGrowMem",
        }
    }
}

impl fmt::Display for ImmediateShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Documentation grouping of related opcodes.
///
/// Stored per entry; carries no weight in decoding or encoding.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Category {
    Control,
    Parametric,
    Variable,
    Memory,
    Constant,
    LogicalI32,
    LogicalI64,
    LogicalF32,
    LogicalF64,
    ArithmeticI32,
    BitwiseI32,
    ArithmeticI64,
    BitwiseI64,
    ArithmeticF32,
    ArithmeticF64,
    Conversion,
}

impl Category {
    /// Returns the group name, e.g. `Arithmetic_i32`.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Category::Control => "Control",
            Category::Parametric => "Parametric",
            Category::Variable => "Variable",
            Category::Memory => "Memory",
            Category::Constant => "Constant",
            Category::LogicalI32 => "Logical_i32",
            Category::LogicalI64 => "Logical_i64",
            Category::LogicalF32 => "Logical_f32",
            Category::LogicalF64 => "Logical_f64",
            Category::ArithmeticI32 => "Arithmetic_i32",
            Category::BitwiseI32 => "Bitwise_i32",
            Category::ArithmeticI64 => "Arithmetic_i64",
            Category::BitwiseI64 => "Bitwise_i64",
            Category::ArithmeticF32 => "Arithmetic_f32",
            Category::ArithmeticF64 => "Arithmetic_f64",
            Category::Conversion => "Conversion",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable description of one opcode.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct OpcodeEntry {
    pub opcode: u8,
    pub mnemonic: &'static str,
    pub immediate_shape: ImmediateShape,
    /// Operand-stack values consumed.
    pub pops: u32,
    /// Operand-stack values produced.
    pub pushes: u32,
    pub category: Category,
    pub description: &'static str,
}

impl OpcodeEntry {
    /// Net static stack effect (`pushes - pops`).
    pub const fn stack_delta(&self) -> i32 {
        self.pushes as i32 - self.pops as i32
    }

    /// Returns true if the opcode is followed by immediate bytes.
    pub const fn has_immediate(&self) -> bool {
        !matches!(self.immediate_shape, ImmediateShape::None)
    }
}

#[macro_export]
macro_rules! define_opcodes {
    (
        $(
            $name:ident = $opcode:literal, $mnemonic:literal => $shape:ident,
            $pops:literal -> $pushes:literal, $category:ident, $desc:literal
        ),* $(,)?
    ) => {
        // =========================
        // Opcode enum
        // =========================
        #[repr(u8)]
        #[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
        pub enum Opcode {
            $(
                #[doc = $desc]
                $name = $opcode,
            )*
        }

        impl TryFrom<u8> for Opcode {
            type Error = IsaError;

            fn try_from(value: u8) -> Result<Self, Self::Error> {
                match value {
                    $( $opcode => Ok(Opcode::$name), )*
                    _ => Err(IsaError::UnknownOpcode {
                        opcode: value,
                        offset: 0,
                    }),
                }
            }
        }

        struct OpcodeEntries;

        #[allow(non_upper_case_globals)]
        impl OpcodeEntries {
            $(
                const $name: OpcodeEntry = OpcodeEntry {
                    opcode: $opcode,
                    mnemonic: $mnemonic,
                    immediate_shape: ImmediateShape::$shape,
                    pops: $pops,
                    pushes: $pushes,
                    category: Category::$category,
                    description: $desc,
                };
            )*
        }

        /// Every opcode entry, in ascending byte order.
        pub static OPCODE_TABLE: &[OpcodeEntry] = &[
            $( OpcodeEntries::$name, )*
        ];

        impl Opcode {
            /// Every opcode, in ascending byte order.
            pub const ALL: &'static [Opcode] = &[ $( Opcode::$name, )* ];

            /// Returns the text mnemonic for this opcode.
            pub const fn mnemonic(&self) -> &'static str {
                match self {
                    $( Opcode::$name => $mnemonic, )*
                }
            }

            /// Returns the table entry for this opcode.
            pub const fn entry(&self) -> &'static OpcodeEntry {
                match self {
                    $( Opcode::$name => &OpcodeEntries::$name, )*
                }
            }
        }
    };
}

for_each_opcode!(define_opcodes);

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opcode_try_from_unassigned() {
        for byte in [0x06, 0x0a, 0x12, 0x19, 0x25, 0xc0, 0xff] {
            assert!(matches!(
                Opcode::try_from(byte),
                Err(IsaError::UnknownOpcode { opcode, .. }) if opcode == byte
            ));
        }
    }

    #[test]
    fn opcode_try_from_assigned() {
        assert_eq!(Opcode::try_from(0x6a).unwrap(), Opcode::I32Add);
        assert_eq!(Opcode::try_from(0x0b).unwrap(), Opcode::End);
        assert_eq!(Opcode::try_from(0xbf).unwrap(), Opcode::F64ReinterpretI64);
    }

    #[test]
    fn table_is_sorted_and_matches_enum() {
        assert_eq!(OPCODE_TABLE.len(), Opcode::ALL.len());
        assert_eq!(OPCODE_TABLE.len(), 172);
        for (entry, opcode) in OPCODE_TABLE.iter().zip(Opcode::ALL) {
            assert_eq!(entry.opcode, *opcode as u8);
            assert_eq!(entry, opcode.entry());
            assert_eq!(entry.mnemonic, opcode.mnemonic());
        }
        assert!(OPCODE_TABLE.windows(2).all(|w| w[0].opcode < w[1].opcode));
    }

    #[test]
    fn categories_follow_groups() {
        assert_eq!(Opcode::CallIndirect.entry().category, Category::Control);
        assert_eq!(Opcode::Drop.entry().category, Category::Parametric);
        assert_eq!(Opcode::GrowMemory.entry().category, Category::Memory);
        assert_eq!(Opcode::I32Eqz.entry().category, Category::LogicalI32);
        assert_eq!(Opcode::I32RemU.entry().category, Category::ArithmeticI32);
        assert_eq!(Opcode::I32And.entry().category, Category::BitwiseI32);
        assert_eq!(Opcode::F64Copysign.entry().category, Category::ArithmeticF64);
        assert_eq!(Opcode::I32WrapI64.entry().category, Category::Conversion);
        assert_eq!(Category::ArithmeticI32.to_string(), "Arithmetic_i32");
    }

    #[test]
    fn call_arity_is_placeholder() {
        let call = Opcode::Call.entry();
        assert_eq!((call.pops, call.pushes), (0, 0));
        assert_eq!(call.immediate_shape, ImmediateShape::CallIndex);
    }

    #[test]
    fn stack_delta() {
        assert_eq!(Opcode::I32Add.entry().stack_delta(), -1);
        assert_eq!(Opcode::I32Const.entry().stack_delta(), 1);
        assert_eq!(Opcode::Select.entry().stack_delta(), -2);
        assert_eq!(Opcode::Nop.entry().stack_delta(), 0);
        assert!(!Opcode::Nop.entry().has_immediate());
        assert!(Opcode::BrTable.entry().has_immediate());
    }
}
