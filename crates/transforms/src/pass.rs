use crate::PassConfig;
use crate::Result;
use crate::Transform;
use athanor_core::ast::Block;
use athanor_core::gas::GasMeter;
use tracing::info;

/// Trait for running a sequence of optimization transforms on a block.
pub trait Pass {
    fn run(&self, block: &mut Block, passes: &[Box<dyn Transform>]) -> Result<()>;
}

/// Default implementation of the Pass trait.
///
/// Each transform runs on a snapshot; the snapshot replaces the program only
/// when the transform reports a change, and the gas delta is logged.
pub struct DefaultPass {
    meter: GasMeter,
}

impl DefaultPass {
    pub fn new(meter: GasMeter) -> Self {
        DefaultPass { meter }
    }

    pub fn from_config(config: &PassConfig) -> Self {
        DefaultPass {
            meter: GasMeter::new(config.evm_version, config.runs),
        }
    }
}

impl Pass for DefaultPass {
    fn run(&self, block: &mut Block, passes: &[Box<dyn Transform>]) -> Result<()> {
        for pass in passes {
            let before = self.meter.block_costs(block);
            let mut snapshot = block.clone();

            let mutated = pass.apply(&mut snapshot)?;
            if !mutated {
                continue;
            }

            let after = self.meter.block_costs(&snapshot);
            let delta = after as i128 - before as i128;

            info!("{:>16} Δ{:+}", pass.name(), delta);
            *block = snapshot;
        }
        Ok(())
    }
}
