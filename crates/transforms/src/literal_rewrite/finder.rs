//! Bounded search for cheap constant constructions.

use athanor_core::ast::Expression;
use athanor_core::evm::{EvmVersion, Opcode};
use athanor_core::gas::CostModel;
use athanor_core::literal::bytes_required;
use athanor_core::U256;
use std::collections::HashMap;

/// Values below this stay as plain literals.
pub const REWRITE_THRESHOLD: u64 = 0x10000;

/// Default step budget for the decomposition search.
pub const DEFAULT_MAX_STEPS: usize = 10_000;

/// A constructed expression together with its cost under the active model.
#[derive(Debug, Clone)]
pub struct Representation {
    pub expression: Expression,
    pub cost: u64,
}

/// Searches for the cheapest expression that leaves a given constant on the
/// stack.
///
/// Candidates are the plain literal, the complement (`not(x)` when the
/// complement is narrower), and decompositions of the form
/// `upper * 2^bits + lower` with a small correction term. The search is
/// recursive over the parts, memoized through a cache shared by the caller,
/// and bounded by a step budget so pathological values cannot blow up
/// compile time.
pub struct RepresentationFinder<'a> {
    version: EvmVersion,
    meter: &'a dyn CostModel,
    cache: &'a mut HashMap<U256, Representation>,
    max_steps: usize,
}

impl<'a> RepresentationFinder<'a> {
    pub fn new(
        version: EvmVersion,
        meter: &'a dyn CostModel,
        cache: &'a mut HashMap<U256, Representation>,
    ) -> Self {
        Self::with_max_steps(version, meter, cache, DEFAULT_MAX_STEPS)
    }

    pub fn with_max_steps(
        version: EvmVersion,
        meter: &'a dyn CostModel,
        cache: &'a mut HashMap<U256, Representation>,
        max_steps: usize,
    ) -> Self {
        RepresentationFinder {
            version,
            meter,
            cache,
            max_steps,
        }
    }

    /// Returns a construction for `value` if one beats the plain literal.
    pub fn try_find_representation(&mut self, value: U256) -> Option<Expression> {
        if value < U256::from(REWRITE_THRESHOLD) {
            return None;
        }

        let repr = self.find_representation(value);
        match repr.expression {
            Expression::Literal(_) => None,
            expression => Some(expression),
        }
    }

    fn find_representation(&mut self, value: U256) -> Representation {
        if let Some(cached) = self.cache.get(&value) {
            return cached.clone();
        }

        let routine = if value <= U256::from(REWRITE_THRESHOLD) {
            // Too small for a construction to pay off.
            self.represent_literal(value)
        } else if bytes_required(!value) < bytes_required(value) {
            // The complement is narrower, build it and flip.
            let complement = self.find_representation(!value);
            self.represent_unary(Opcode::Not, &complement)
        } else {
            self.decompose(value)
        };

        self.cache.insert(value, routine.clone());
        routine
    }

    /// Splits `value` into `upper * 2^bits + lower` where `|lower|` is far
    /// smaller than `2^bits`, recursing on the parts. A decomposition is not
    /// always cheaper, so the plain literal stays in play.
    fn decompose(&mut self, value: U256) -> Representation {
        let mut routine = self.represent_literal(value);

        for bits in (9..=255usize).rev() {
            if self.max_steps == 0 {
                break;
            }

            // Only bit positions where the value has a run boundary can
            // yield a small correction term.
            let window = ((value >> (bits - 8)) & U256::from(0x1ffu64)).to::<u64>();
            if window != 0xff && window != 0x100 {
                continue;
            }

            let power_of_two = U256::ONE << bits;
            let mut upper = value >> bits;
            let raw_lower = value & (power_of_two - U256::ONE);

            // Borrow from above when the lower part is closer to 2^bits
            // than to zero, making the correction a subtraction.
            let (lower, negative) = if power_of_two - raw_lower < raw_lower {
                upper += U256::ONE;
                (power_of_two - raw_lower, true)
            } else {
                (raw_lower, false)
            };

            if upper.is_zero() {
                continue;
            }
            if lower >= power_of_two >> 8 {
                continue;
            }

            let mut candidate = if self.version.has_bitwise_shifting() {
                let upper_repr = self.find_representation(upper);
                let shift = self.represent_literal(U256::from(bits));
                self.represent_binary(Opcode::Shl, &shift, &upper_repr)
            } else {
                let base = self.represent_literal(U256::from(2u64));
                let exponent = self.represent_literal(U256::from(bits));
                let mut power = self.represent_binary(Opcode::Exp, &base, &exponent);
                if upper != U256::ONE {
                    let upper_repr = self.find_representation(upper);
                    power = self.represent_binary(Opcode::Mul, &upper_repr, &power);
                }
                power
            };

            // Already losing before the correction term, skip without
            // spending budget.
            if candidate.cost >= routine.cost {
                continue;
            }

            if !lower.is_zero() {
                let correction = self.find_representation(lower);
                let op = if negative { Opcode::Sub } else { Opcode::Add };
                candidate = self.represent_binary(op, &candidate, &correction);
            }

            if self.max_steps > 0 {
                self.max_steps -= 1;
            }
            routine = min(routine, candidate);
        }

        routine
    }

    fn represent_literal(&self, value: U256) -> Representation {
        self.represent(Expression::number(value))
    }

    fn represent_unary(&self, op: Opcode, arg: &Representation) -> Representation {
        self.represent(Expression::instruction(op, vec![arg.expression.clone()]))
    }

    fn represent_binary(
        &self,
        op: Opcode,
        first: &Representation,
        second: &Representation,
    ) -> Representation {
        self.represent(Expression::instruction(
            op,
            vec![first.expression.clone(), second.expression.clone()],
        ))
    }

    fn represent(&self, expression: Expression) -> Representation {
        let cost = self.meter.expression_costs(&expression);
        Representation { expression, cost }
    }
}

/// Ties keep the earlier candidate.
fn min(a: Representation, b: Representation) -> Representation {
    if a.cost <= b.cost {
        a
    } else {
        b
    }
}
