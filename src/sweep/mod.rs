pub mod chain;
pub mod classifier;
pub mod edge;

pub use chain::*;
pub use classifier::*;
pub use edge::*;

use std::cmp::Ordering;

use crate::curve::{CurveSegment, YRange};

/// Sweep the boundaries of two operands top to bottom and rebuild the contours of
/// the result the classifier describes.
///
/// Pass an empty `right` with a winding classifier to validate a raw outline.
pub fn calculate<C: Classifier>(
    left: &[CurveSegment],
    right: &[CurveSegment],
    classifier: C,
) -> Vec<CurveSegment> {
    let curves = left.iter().chain(right.iter()).copied().collect::<Vec<_>>();
    let edges = curves
        .iter()
        .enumerate()
        .filter(|(_, c)| c.order() > 0)
        .map(|(i, _)| {
            let origin = if i < left.len() {
                Origin::Left
            } else {
                Origin::Right
            };
            Edge::new(i, origin)
        })
        .collect::<Vec<_>>();
    Sweep::new(&curves, edges, classifier).run()
}

struct Sweep<'a, C> {
    curves: &'a [CurveSegment],
    edges: Vec<Edge>,
    cache: OrderCache,
    classifier: C,
}

impl<'a, C: Classifier> Sweep<'a, C> {
    fn new(curves: &'a [CurveSegment], edges: Vec<Edge>, classifier: C) -> Self {
        Self {
            curves,
            edges,
            cache: OrderCache::default(),
            classifier,
        }
    }

    fn curve(&self, edge: usize) -> &'a CurveSegment {
        &self.curves[self.edges[edge].curve()]
    }

    fn compare(&mut self, a: usize, b: usize, yrange: &mut YRange) -> Ordering {
        let curves = (self.curve(a), self.curve(b));
        self.cache.compare(a, b, curves, yrange)
    }

    fn run(mut self) -> Vec<CurveSegment> {
        let n = self.edges.len();
        if n < 2 {
            return vec![];
        }

        let mut list = (0..n).collect::<Vec<_>>();
        list.sort_by(|a, b| {
            let (ca, cb) = (self.curve(*a), self.curve(*b));
            ca.y_top()
                .total_cmp(&cb.y_top())
                .then(ca.x_top().total_cmp(&cb.x_top()))
        });

        let mut chains = ChainArena::new(self.curves);
        let mut yrange = YRange::new(0., 0.);
        let mut strips = 0;
        // active edges live in list[left..right]
        let (mut left, mut right) = (0, 0);

        while left < n {
            let mut y = yrange.start;

            // drop edges ending at or above y, keeping the survivors in order
            let mut next = right;
            for cur in (left..right).rev() {
                let e = list[cur];
                if self.curve(e).y_bot() > y {
                    next -= 1;
                    list[next] = e;
                }
            }
            left = next;

            if left >= right {
                if right >= n {
                    break;
                }
                y = self.curve(list[right]).y_top();
                if y > yrange.start {
                    chains.finalize();
                }
                yrange.start = y;
            }

            while right < n && self.curve(list[right]).y_top() <= y {
                right += 1;
            }

            yrange.end = self.curve(list[left]).y_bot();
            if right < n {
                yrange.end = yrange.end.min(self.curve(list[right]).y_top());
            }

            self.sort_active(&mut list[left..right], &mut yrange);

            let links = self.classify_strip(&list[left..right], &yrange, &mut chains);
            log::trace!(
                "strip [{}, {}) with {} active edges and {} links",
                yrange.start,
                yrange.end,
                right - left,
                links.len()
            );
            chains.resolve_links(&links);
            strips += 1;
            yrange.start = yrange.end;
        }
        chains.finalize();

        log::debug!(
            "swept {} edges in {} strips ({} cached orderings), {} contours",
            n,
            strips,
            self.cache.len(),
            chains.sealed().len()
        );
        chains.into_curves()
    }

    /// Insertion sort of the active edges by x at the top of the strip, narrowing the
    /// strip to where the order holds and grouping coincident edges.
    fn sort_active(&mut self, active: &mut [usize], yrange: &mut YRange) {
        let mut next_eq = 1;
        for cur in 0..active.len() {
            let e = active[cur];
            self.edges[e].set_equivalence(0);
            let mut next = cur;
            while next > 0 {
                let prev = active[next - 1];
                let ordering = self.compare(e, prev, yrange);
                assert!(
                    !yrange.is_empty(),
                    "backstepping to {} from {}",
                    yrange.end,
                    yrange.start
                );
                if ordering != Ordering::Less {
                    if ordering == Ordering::Equal {
                        let mut eq = self.edges[prev].equivalence();
                        if eq == 0 {
                            eq = next_eq;
                            next_eq += 1;
                            self.edges[prev].set_equivalence(eq);
                        }
                        self.edges[e].set_equivalence(eq);
                    }
                    break;
                }
                active[next] = prev;
                next -= 1;
            }
            active[next] = e;
        }
    }

    /// Walk the sorted strip left to right and emit a link for every edge that
    /// changes the inside/outside state of the result.
    fn classify_strip(
        &mut self,
        active: &[usize],
        yrange: &YRange,
        chains: &mut ChainArena,
    ) -> Vec<usize> {
        let (ystart, yend) = (yrange.start, yrange.end);
        let mut links = vec![];
        self.classifier.new_row();

        let mut cur = 0;
        while cur < active.len() {
            let e = active[cur];
            let eq = self.edges[e].equivalence();
            let (edge, participation) = if eq != 0 {
                // coincident edges cause at most one transition, carried by the edge that
                // was already active for it, else by the one reaching furthest down
                let was_inside = self.classifier.is_inside();
                let tag = if was_inside {
                    Participation::Exiting
                } else {
                    Participation::Entering
                };
                let mut active_match = None;
                let mut longest_match = e;
                let mut furthest = yend;
                while cur < active.len() && self.edges[active[cur]].equivalence() == eq {
                    let member = active[cur];
                    self.classify(member);
                    if active_match.is_none() && self.edges[member].is_active_for(ystart, tag) {
                        active_match = Some(member);
                    }
                    let ybot = self.curve(member).y_bot();
                    if ybot > furthest {
                        longest_match = member;
                        furthest = ybot;
                    }
                    cur += 1;
                }
                if self.classifier.is_inside() == was_inside {
                    (e, Participation::Ignored)
                } else {
                    (active_match.unwrap_or(longest_match), tag)
                }
            } else {
                cur += 1;
                (e, self.classify(e))
            };

            if participation != Participation::Ignored {
                self.edges[edge].record(yend, participation);
                links.push(chains.push_link(self.edges[edge].curve(), ystart, yend, participation));
            }
        }

        if self.classifier.is_inside() {
            log::warn!("still inside at end of active edge list at y = {}", yend);
        }
        links
    }

    fn classify(&mut self, edge: usize) -> Participation {
        let origin = self.edges[edge].origin();
        let direction = self.curve(edge).direction();
        self.classifier.classify(origin, direction)
    }
}
