//! Compile-time evaluation of constant expressions.
//!
//! Semantics mirror the EVM: all arithmetic wraps modulo 2^256, division by
//! zero yields zero, and shifts of 256 bits or more clear the word.

use crate::ast::Expression;
use crate::evm::Opcode;
use crate::literal::number_value;
use crate::result::{Error, Result};
use alloy_primitives::U256;

/// Evaluates a constant expression to its 256-bit value.
///
/// Fails on identifiers, non-number literals, and instruction calls whose
/// argument count does not match the opcode's arity.
pub fn evaluate(expression: &Expression) -> Result<U256> {
    match expression {
        Expression::Literal(lit) => number_value(lit)?
            .ok_or_else(|| Error::NotConstant(lit.to_string())),
        Expression::Identifier(id) => Err(Error::NotConstant(id.name.clone())),
        Expression::Instruction(call) => {
            if call.args.len() != call.op.arity() {
                return Err(Error::ArityMismatch {
                    op: call.op.name(),
                    expected: call.op.arity(),
                    actual: call.args.len(),
                });
            }
            if call.op == Opcode::Not {
                return Ok(!evaluate(&call.args[0])?);
            }
            let a = evaluate(&call.args[0])?;
            let b = evaluate(&call.args[1])?;
            Ok(apply_binary(call.op, a, b))
        }
    }
}

fn apply_binary(op: Opcode, a: U256, b: U256) -> U256 {
    match op {
        Opcode::Add => a.wrapping_add(b),
        Opcode::Sub => a.wrapping_sub(b),
        Opcode::Mul => a.wrapping_mul(b),
        Opcode::Div => {
            if b.is_zero() {
                U256::ZERO
            } else {
                a.wrapping_div(b)
            }
        }
        Opcode::Exp => a.wrapping_pow(b),
        Opcode::And => a & b,
        Opcode::Or => a | b,
        Opcode::Xor => a ^ b,
        // Shift amount is the first operand.
        Opcode::Shl => shift(a, |bits| b << bits),
        Opcode::Shr => shift(a, |bits| b >> bits),
        Opcode::Not => unreachable!("unary opcode handled by caller"),
    }
}

fn shift(amount: U256, apply: impl Fn(usize) -> U256) -> U256 {
    if amount >= U256::from(256u64) {
        U256::ZERO
    } else {
        apply(amount.to::<usize>())
    }
}
