//! EVM opcode subset and version capabilities used by the optimizer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Arithmetic and bitwise opcodes the optimizer emits or meters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Opcode {
    Add,
    Sub,
    Mul,
    Div,
    Exp,
    Not,
    And,
    Or,
    Xor,
    Shl,
    Shr,
}

impl Opcode {
    /// Lowercase mnemonic as it appears in printed IR.
    pub fn name(&self) -> &'static str {
        match self {
            Opcode::Add => "add",
            Opcode::Sub => "sub",
            Opcode::Mul => "mul",
            Opcode::Div => "div",
            Opcode::Exp => "exp",
            Opcode::Not => "not",
            Opcode::And => "and",
            Opcode::Or => "or",
            Opcode::Xor => "xor",
            Opcode::Shl => "shl",
            Opcode::Shr => "shr",
        }
    }

    /// Looks up an opcode by its lowercase mnemonic.
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "add" => Opcode::Add,
            "sub" => Opcode::Sub,
            "mul" => Opcode::Mul,
            "div" => Opcode::Div,
            "exp" => Opcode::Exp,
            "not" => Opcode::Not,
            "and" => Opcode::And,
            "or" => Opcode::Or,
            "xor" => Opcode::Xor,
            "shl" => Opcode::Shl,
            "shr" => Opcode::Shr,
            _ => return None,
        })
    }

    /// Number of stack operands the opcode consumes.
    pub fn arity(&self) -> usize {
        match self {
            Opcode::Not => 1,
            _ => 2,
        }
    }

    /// Static execution gas charged per invocation.
    ///
    /// EXP additionally charges 50 gas per byte of the exponent; that dynamic
    /// part is accounted for by the cost model, not here.
    pub fn execution_gas(&self) -> u64 {
        match self {
            Opcode::Add
            | Opcode::Sub
            | Opcode::Not
            | Opcode::And
            | Opcode::Or
            | Opcode::Xor
            | Opcode::Shl
            | Opcode::Shr => 3,
            Opcode::Mul | Opcode::Div => 5,
            Opcode::Exp => 10,
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// EVM hard forks in activation order, so versions compare with `<`/`>=`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum EvmVersion {
    Homestead,
    TangerineWhistle,
    SpuriousDragon,
    Byzantium,
    Constantinople,
    Petersburg,
    Istanbul,
    Berlin,
    London,
    Paris,
    #[default]
    Shanghai,
}

impl EvmVersion {
    /// Whether SHL/SHR/SAR are available (Constantinople and later).
    pub fn has_bitwise_shifting(&self) -> bool {
        *self >= EvmVersion::Constantinople
    }
}
