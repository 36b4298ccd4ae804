pub mod bounds_rules;
pub use bounds_rules::*;

use std::fmt::Debug;

use crate::{operation::Operation, region::Region};

/// Executes a batch of queued operations against a region.
///
/// Implementations hold no mutable state, so one instance can serve many
/// batches on many threads at once.
pub trait Rules: Send + Sync + Debug {
    /// Apply every descriptor in order. `None` entries are cancelled operations and are skipped.
    fn apply(&self, region: Region, operations: &[Option<Operation>]) -> Region;
}

/// Applies each operation one after another, exactly as queued.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SequentialRules;

impl Rules for SequentialRules {
    fn apply(&self, region: Region, operations: &[Option<Operation>]) -> Region {
        operations
            .iter()
            .flatten()
            .fold(region, |acc, op| acc.combine(op.operator(), &op.region()))
    }
}
