//! Core results and error types

use thiserror::Error;

/// Core error type encompassing all core module errors.
#[derive(Debug, Error)]
pub enum Error {
    /// The number of operands does not match the opcode's arity.
    #[error("arity mismatch for {op}: expected {expected}, got {actual}")]
    ArityMismatch {
        /// Mnemonic of the opcode that was misapplied.
        op: &'static str,
        /// Number of operands the opcode takes.
        expected: usize,
        /// Number of operands that were supplied.
        actual: usize,
    },

    /// A number literal could not be parsed as a 256-bit value.
    #[error("invalid number literal: `{0}`")]
    InvalidNumberLiteral(String),

    /// Constant evaluation reached a node with no compile-time value.
    #[error("expression is not constant: {0}")]
    NotConstant(String),
}

/// Core result type
pub type Result<T> = std::result::Result<T, Error>;
