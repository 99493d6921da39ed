//! Large-constant rewriting.
//!
//! Number literals at or above 2^16 frequently have cheaper constructions
//! than the full-width PUSH immediate they would otherwise occupy. A masked
//! declaration such as
//!
//! ```text
//! let mask := 0xffff00000000000000000000
//! ```
//!
//! costs a 12-byte immediate, while
//!
//! ```text
//! let mask := shl(80, 65535)
//! ```
//!
//! needs three bytes of immediates and one shift. Which form wins depends on
//! the cost model: code size is paid once at deployment, execution gas on
//! every run, so the expected run count decides how much runtime work a
//! smaller encoding is allowed to buy.

mod finder;

pub use finder::{Representation, RepresentationFinder, DEFAULT_MAX_STEPS, REWRITE_THRESHOLD};

use crate::{PassConfig, Result, Transform};
use athanor_core::ast::{Block, Expression};
use athanor_core::gas::{CostModel, GasMeter};
use athanor_core::literal::number_value;
use athanor_core::visitor::{walk_expression, VisitMut};
use athanor_core::{EvmVersion, U256};
use std::collections::HashMap;
use tracing::debug;

/// Rewrites large number literals into cheaper equivalent constructions.
pub struct ConstantRewrite {
    version: EvmVersion,
    meter: Box<dyn CostModel + Send + Sync>,
    max_steps: usize,
}

impl ConstantRewrite {
    /// Creates the transform with an explicit cost model.
    pub fn new(version: EvmVersion, meter: Box<dyn CostModel + Send + Sync>) -> Self {
        ConstantRewrite {
            version,
            meter,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }

    /// Creates the transform with a [`GasMeter`] derived from the config.
    pub fn from_config(config: &PassConfig) -> Self {
        ConstantRewrite {
            version: config.evm_version,
            meter: Box::new(GasMeter::new(config.evm_version, config.runs)),
            max_steps: config.max_steps,
        }
    }
}

impl Transform for ConstantRewrite {
    fn name(&self) -> &'static str {
        "constant_rewrite"
    }

    fn apply(&self, block: &mut Block) -> Result<bool> {
        let meter: &dyn CostModel = self.meter.as_ref();
        let mut rewriter = LiteralRewriter {
            version: self.version,
            meter,
            max_steps: self.max_steps,
            cache: HashMap::new(),
            rewritten: 0,
            error: None,
        };
        rewriter.visit_block(block);

        if let Some(err) = rewriter.error {
            return Err(err.into());
        }
        debug!(rewritten = rewriter.rewritten, "constant rewrite finished");
        Ok(rewriter.rewritten > 0)
    }
}

/// Visitor that replaces qualifying literals in place.
///
/// The representation cache persists for the whole walk, while every literal
/// gets a finder with a fresh step budget.
struct LiteralRewriter<'a> {
    version: EvmVersion,
    meter: &'a dyn CostModel,
    max_steps: usize,
    cache: HashMap<U256, Representation>,
    rewritten: usize,
    error: Option<athanor_core::Error>,
}

impl VisitMut for LiteralRewriter<'_> {
    fn visit_expression(&mut self, expression: &mut Expression) {
        if self.error.is_some() {
            return;
        }

        let Expression::Literal(literal) = &*expression else {
            walk_expression(self, expression);
            return;
        };

        let value = match number_value(literal) {
            Ok(Some(value)) => value,
            Ok(None) => return,
            Err(err) => {
                self.error = Some(err);
                return;
            }
        };
        if value < U256::from(REWRITE_THRESHOLD) {
            return;
        }

        let mut finder = RepresentationFinder::with_max_steps(
            self.version,
            self.meter,
            &mut self.cache,
            self.max_steps,
        );
        if let Some(replacement) = finder.try_find_representation(value) {
            debug!(old = %expression, new = %replacement, "rewrote constant");
            *expression = replacement;
            self.rewritten += 1;
        }
    }
}
