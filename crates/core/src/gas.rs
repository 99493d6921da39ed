//! Gas cost estimation for expressions.
//!
//! Costs blend two currencies: execution gas paid on every run of the code,
//! and the one-time code deposit paid per byte at deployment. A meter
//! configured with an expected number of runs folds both into a single
//! comparable number, so passes can trade bytecode size against runtime gas.

use crate::ast::{Block, Expression, Statement};
use crate::evm::{EvmVersion, Opcode};
use crate::literal::{bytes_required, number_value};

/// Gas charged per byte of deployed code.
pub const CODE_DEPOSIT_GAS: u64 = 200;

/// Execution gas of a PUSH instruction.
const PUSH_GAS: u64 = 3;

/// Oracle mapping IR fragments to a scalar cost.
///
/// The optimizer only compares costs returned by the same model; the unit is
/// whatever the model chooses, as long as cheaper means better.
pub trait CostModel {
    /// Cost of evaluating `expression`, including all sub-expressions.
    fn expression_costs(&self, expression: &Expression) -> u64;

    /// Worst-case cost of a single instruction, excluding its operands.
    fn instruction_costs(&self, op: Opcode) -> u64;
}

/// Cost model weighing execution gas against code size.
#[derive(Debug, Clone, Copy)]
pub struct GasMeter {
    version: EvmVersion,
    /// Expected number of times the code will execute.
    runs: u64,
}

impl GasMeter {
    pub fn new(version: EvmVersion, runs: u64) -> Self {
        GasMeter { version, runs }
    }

    /// Total cost of every expression position in `block`.
    pub fn block_costs(&self, block: &Block) -> u64 {
        block
            .statements
            .iter()
            .map(|statement| self.statement_costs(statement))
            .sum()
    }

    fn statement_costs(&self, statement: &Statement) -> u64 {
        match statement {
            Statement::Expression(expr) => self.expression_costs(expr),
            Statement::VariableDeclaration { value, .. } => value
                .as_ref()
                .map(|expr| self.expression_costs(expr))
                .unwrap_or(0),
            Statement::Assignment { value, .. } => self.expression_costs(value),
            Statement::If { condition, body } => {
                self.expression_costs(condition) + self.block_costs(body)
            }
            Statement::Block(block) => self.block_costs(block),
        }
    }

    fn combine(&self, execution: u64, code_bytes: u64) -> u64 {
        self.runs * execution + CODE_DEPOSIT_GAS * code_bytes
    }

    /// Gas charged per exponent byte of EXP. Raised from 10 to 50 by EIP-160.
    fn exp_byte_gas(&self) -> u64 {
        if self.version >= EvmVersion::SpuriousDragon {
            50
        } else {
            10
        }
    }
}

impl CostModel for GasMeter {
    fn expression_costs(&self, expression: &Expression) -> u64 {
        match expression {
            Expression::Literal(lit) => {
                // A malformed number literal is metered at full word width so
                // it never looks attractive to keep.
                let bytes = match number_value(lit) {
                    Ok(Some(value)) => bytes_required(value).max(1) as u64,
                    _ => 32,
                };
                self.combine(PUSH_GAS, 1 + bytes)
            }
            Expression::Identifier(_) => 0,
            Expression::Instruction(call) => {
                let operands: u64 = call
                    .args
                    .iter()
                    .map(|arg| self.expression_costs(arg))
                    .sum();
                let execution = if call.op == Opcode::Exp {
                    let exponent_bytes = call
                        .args
                        .get(1)
                        .and_then(|arg| match arg {
                            Expression::Literal(lit) => number_value(lit).ok().flatten(),
                            _ => None,
                        })
                        .map(|value| bytes_required(value) as u64)
                        .unwrap_or(32);
                    call.op.execution_gas() + self.exp_byte_gas() * exponent_bytes
                } else {
                    call.op.execution_gas()
                };
                operands + self.combine(execution, 1)
            }
        }
    }

    fn instruction_costs(&self, op: Opcode) -> u64 {
        let execution = if op == Opcode::Exp {
            op.execution_gas() + self.exp_byte_gas() * 32
        } else {
            op.execution_gas()
        };
        self.combine(execution, 1)
    }
}
