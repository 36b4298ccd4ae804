use std::{cmp::Ordering, collections::HashMap};

use crate::curve::{CurveSegment, Direction, YRange};

/// Which operand an edge came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    Left,
    Right,
}

/// How an edge takes part in the result over one strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Participation {
    Entering,
    Exiting,
    Ignored,
}

impl Participation {
    /// Drawing direction of a link emitted with this participation.
    pub fn direction(&self) -> Direction {
        match self {
            Participation::Exiting => Direction::Decreasing,
            _ => Direction::Increasing,
        }
    }
}

/// A boundary piece taking part in one sweep.
#[derive(Debug, Clone)]
pub struct Edge {
    /// Index into the sweep's curve table.
    curve: usize,
    origin: Origin,
    /// Coincident edges in a strip share a non-zero id.
    equivalence: usize,
    /// Bottom y and participation of the last strip this edge emitted a link for.
    recorded: Option<(f64, Participation)>,
}

impl Edge {
    pub fn new(curve: usize, origin: Origin) -> Self {
        Self {
            curve,
            origin,
            equivalence: 0,
            recorded: None,
        }
    }

    pub fn curve(&self) -> usize {
        self.curve
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn equivalence(&self) -> usize {
        self.equivalence
    }

    pub fn set_equivalence(&mut self, equivalence: usize) {
        self.equivalence = equivalence;
    }

    pub fn record(&mut self, yend: f64, participation: Participation) {
        self.recorded = Some((yend, participation));
    }

    /// Whether the edge emitted a link with the same participation that reached down to `y`.
    pub fn is_active_for(&self, y: f64, participation: Participation) -> bool {
        matches!(self.recorded, Some((yend, p)) if p == participation && yend >= y)
    }
}

/// Memo of edge orderings, each valid down to the y limit it was computed for.
/// Scoped to one sweep.
#[derive(Debug, Default)]
pub struct OrderCache {
    entries: HashMap<(usize, usize), (f64, Ordering)>,
}

impl OrderCache {
    /// Order edge `a` against edge `b` at the top of `yrange`, reusing a previous
    /// answer while `yrange.start` is still above its limit.
    pub fn compare(
        &mut self,
        a: usize,
        b: usize,
        curves: (&CurveSegment, &CurveSegment),
        yrange: &mut YRange,
    ) -> Ordering {
        let (key, flipped) = if a <= b { ((a, b), false) } else { ((b, a), true) };
        if let Some((limit, ordering)) = self.entries.get(&key) {
            if yrange.start < *limit {
                if yrange.end > *limit {
                    yrange.end = *limit;
                }
                return if flipped { ordering.reverse() } else { *ordering };
            }
        }
        let ordering = curves.0.compare_to(curves.1, yrange);
        let stored = if flipped { ordering.reverse() } else { ordering };
        self.entries.insert(key, (yrange.end, stored));
        ordering
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
