use itertools::Itertools;

use crate::{
    bounding_box::BoundingBox,
    operation::{Operation, Operator},
    region::Region,
};

use super::{Rules, SequentialRules};

/// Rules that use bounding boxes to shrink runs of additions and subtractions before
/// handing them to [`SequentialRules`].
///
/// The result is always the same region the sequential rules would produce;
/// an optimization is only taken when the bounds prove it safe.
///
/// # Examples
/// ```
/// use areax::prelude::*;
///
/// let ops = (0..4)
///     .map(|i| Some(Operation::new(Path::rectangle(i as f64 * 2., 0., 1., 1.), Operator::Add)))
///     .collect::<Vec<_>>();
/// let rules = BoundsRules::default();
/// let region = rules.apply(Region::empty(), &ops);
/// assert_eq!(region, SequentialRules.apply(Region::empty(), &ops));
/// assert_eq!(region.contour_count(), 4);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundsRules {
    cull_inner_shapes: bool,
    merge_disjoint_shapes: bool,
}

impl Default for BoundsRules {
    fn default() -> Self {
        Self::new(true, true)
    }
}

impl BoundsRules {
    pub fn new(cull_inner_shapes: bool, merge_disjoint_shapes: bool) -> Self {
        Self {
            cull_inner_shapes,
            merge_disjoint_shapes,
        }
    }

    pub fn cull_inner_shapes(&self) -> bool {
        self.cull_inner_shapes
    }

    pub fn merge_disjoint_shapes(&self) -> bool {
        self.merge_disjoint_shapes
    }

    /// Apply one run of operations sharing an operator.
    fn apply_run(&self, region: Region, operator: Operator, run: &[&Operation]) -> Region {
        let optimizable = matches!(operator, Operator::Add | Operator::Subtract)
            && (self.cull_inner_shapes || self.merge_disjoint_shapes);
        if !optimizable || run.len() < 2 {
            let run = run.iter().map(|op| Some((*op).clone())).collect_vec();
            return SequentialRules.apply(region, &run);
        }

        let mut operands = run.iter().map(|op| Some(op.region())).collect_vec();
        let before = operands.len();
        if self.cull_inner_shapes {
            cull_inner_shapes(&mut operands);
        }
        let operands = if self.merge_disjoint_shapes {
            merge_disjoint_shapes(operands)
        } else {
            operands.into_iter().flatten().collect()
        };
        log::debug!(
            "{} run reduced from {} to {} operands",
            operator,
            before,
            operands.len()
        );

        let reduced = operands
            .into_iter()
            .map(|r| Some(Operation::new(r, operator)))
            .collect_vec();
        SequentialRules.apply(region, &reduced)
    }
}

impl Rules for BoundsRules {
    fn apply(&self, region: Region, operations: &[Option<Operation>]) -> Region {
        // split into maximal runs of non-null operations sharing an operator
        let runs = operations.iter().chunk_by(|op| op.as_ref().map(|op| op.operator()));
        let mut region = region;
        for (operator, run) in &runs {
            if let Some(operator) = operator {
                let run = run.flatten().collect_vec();
                region = self.apply_run(region, operator, &run);
            }
        }
        region
    }
}

/// Drop every operand that an earlier operand already covers.
pub(super) fn cull_inner_shapes(operands: &mut [Option<Region>]) {
    for i in 0..operands.len() {
        let Some(outer) = operands[i].clone() else {
            continue;
        };
        let Some(outer_bounds) = outer.bounds() else {
            continue;
        };
        for candidate in operands[i + 1..].iter_mut() {
            let covered = candidate
                .as_ref()
                .and_then(|inner| inner.bounds())
                .is_some_and(|inner| {
                    outer_bounds.contains_box(&inner) && outer.contains_rect(&inner)
                });
            if covered {
                *candidate = None;
            }
        }
    }
}

/// Group each operand with the later operands whose bounds are disjoint from the whole
/// group, uniting every group into a single operand.
pub(super) fn merge_disjoint_shapes(mut operands: Vec<Option<Region>>) -> Vec<Region> {
    let mut merged = vec![];
    for i in 0..operands.len() {
        let Some(first) = operands[i].take() else {
            continue;
        };
        let mut collected: Vec<BoundingBox> = first.bounds().into_iter().collect();
        let mut group = vec![first];
        for candidate in operands[i + 1..].iter_mut() {
            let disjoint = candidate
                .as_ref()
                .and_then(|r| r.bounds())
                .is_some_and(|b| collected.iter().all(|c| !c.intersects(&b, None)));
            if !disjoint {
                continue;
            }
            if let Some(region) = candidate.take() {
                collected.extend(region.bounds());
                group.push(region);
            }
        }
        merged.push(match group.len() {
            1 => group.swap_remove(0),
            _ => Region::union_all(&group),
        });
    }
    merged
}
