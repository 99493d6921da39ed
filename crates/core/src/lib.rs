//! Expression IR, gas metering, and shared services for the athanor
//! optimizer.
//!
//! The crate supplies everything a transform needs to reason about a
//! program: the [`ast`] tree, in-place traversal via [`visitor`], number
//! literal handling in [`literal`], the opcode and fork tables in [`evm`],
//! cost accounting in [`gas`], and constant evaluation in [`eval`].

pub mod ast;
pub mod eval;
pub mod evm;
pub mod gas;
pub mod literal;
pub mod result;
pub mod visitor;

pub use evm::{EvmVersion, Opcode};
pub use result::{Error, Result};

pub use alloy_primitives::U256;
