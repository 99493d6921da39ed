pub mod literal_rewrite;
pub mod pass;

use athanor_core::ast::Block;
use athanor_core::EvmVersion;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Transform error type encompassing all transform module errors.
#[derive(Debug, Error)]
pub enum Error {
    /// Core operation failed.
    #[error("core operation failed: {0}")]
    Core(#[from] athanor_core::Error),
}

/// Transform result type
pub type Result<T> = std::result::Result<T, Error>;

/// Trait for IR optimization transforms.
pub trait Transform: Send + Sync {
    /// Returns the transform's name for logging and identification.
    fn name(&self) -> &'static str;
    /// Applies the transform to the block, returning whether changes were made.
    fn apply(&self, block: &mut Block) -> Result<bool>;
}

/// Configuration for transform passes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassConfig {
    /// Target EVM fork
    pub evm_version: EvmVersion,
    /// Expected number of executions, weighing runtime gas against code size
    pub runs: u64,
    /// Step budget for bounded searches
    pub max_steps: usize,
}

impl Default for PassConfig {
    fn default() -> Self {
        Self {
            evm_version: EvmVersion::default(),
            runs: 200,
            max_steps: 10_000,
        }
    }
}
