//! Weighted problem generation.
//!
//! The generator is stateless between calls: all randomness comes from the
//! caller's [`Rng`], so a seeded `StdRng` reproduces a drill exactly.

use rand::Rng;

use crate::config::DrillConfig;
use crate::error::DrillError;
use crate::operation::{default_operations, Operation, OperationKind};
use crate::problem::Problem;

/// Pick an index from `weights` for a draw in `[0, sum(weights))`.
///
/// Walks the list accumulating weight and returns the first entry whose
/// cumulative weight exceeds `draw`. A draw that falls off the end (rounding
/// at the upper boundary) selects the first entry.
pub fn pick_weighted<I>(weights: I, draw: f64) -> usize
where
    I: IntoIterator<Item = u32>,
{
    let mut cumulative = 0.0;
    for (index, weight) in weights.into_iter().enumerate() {
        cumulative += f64::from(weight);
        if draw < cumulative {
            return index;
        }
    }
    0
}

/// Produces problems from a validated operation table.
#[derive(Debug, Clone)]
pub struct Generator {
    operations: Vec<Operation>,
    total_weight: u64,
}

impl Default for Generator {
    fn default() -> Self {
        let operations = default_operations();
        let total_weight = operations.iter().map(|o| u64::from(o.weight)).sum();
        Self {
            operations,
            total_weight,
        }
    }
}

impl Generator {
    /// Build a generator, rejecting tables that could emit an invalid problem.
    pub fn new(operations: Vec<Operation>) -> Result<Self, DrillError> {
        if operations.is_empty() {
            return Err(DrillError::EmptyOperationTable);
        }
        for op in &operations {
            op.check()?;
        }
        let total_weight = operations.iter().map(|o| u64::from(o.weight)).sum();
        Ok(Self {
            operations,
            total_weight,
        })
    }

    pub fn from_config(config: &DrillConfig) -> Result<Self, DrillError> {
        Self::new(config.operations.clone())
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn total_weight(&self) -> u64 {
        self.total_weight
    }

    /// Selection probability of a kind (summed if it appears more than once).
    pub fn probability(&self, kind: OperationKind) -> f64 {
        let weight: u64 = self
            .operations
            .iter()
            .filter(|o| o.kind() == kind)
            .map(|o| u64::from(o.weight))
            .sum();
        weight as f64 / self.total_weight as f64
    }

    /// Choose an operation with probability proportional to its weight.
    pub fn pick_operation<R: Rng + ?Sized>(&self, rng: &mut R) -> &Operation {
        let draw = rng.gen::<f64>() * self.total_weight as f64;
        let index = pick_weighted(self.operations.iter().map(|o| o.weight), draw);
        &self.operations[index]
    }

    /// Generate one problem: pick an operation, synthesize operands, then hide
    /// one of the operation's eligible slots uniformly at random.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Problem {
        let operation = self.pick_operation(rng);
        let kind = operation.kind();
        let operands = operation.synthesize(rng);
        let slots = operation.slots();
        let missing = slots[rng.gen_range(0..slots.len())];

        let problem = Problem::from_operands(kind, operands, missing);
        tracing::debug!(%kind, %missing, "generated {problem}");
        problem
    }

    pub fn generate_many<R: Rng + ?Sized>(&self, rng: &mut R, count: usize) -> Vec<Problem> {
        (0..count).map(|_| self.generate(rng)).collect()
    }
}
