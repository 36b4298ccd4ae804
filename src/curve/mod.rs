pub mod compare;
pub mod cubic;
pub mod direction;
pub mod insert;
pub mod line;
pub mod quad;
pub mod start;

pub use compare::*;
pub use cubic::*;
pub use direction::*;
pub use insert::*;
pub use line::*;
pub use quad::*;
pub use start::*;

use std::cmp::Ordering;

use nalgebra::Point2;

use crate::{bounding_box::BoundingBox, crossings::Crossings, path::PathCommand};

/// Geometry shared by every piece of a region boundary.
///
/// All pieces except [`Start`] are monotonic in y: the top end has the smaller y,
/// and the direction records whether the outline originally ran from top to bottom.
pub trait Segment {
    fn order(&self) -> usize;
    fn direction(&self) -> Direction;
    fn x_top(&self) -> f64;
    fn y_top(&self) -> f64;
    fn x_bot(&self) -> f64;
    fn y_bot(&self) -> f64;
    fn x_min(&self) -> f64;
    fn x_max(&self) -> f64;

    fn x_for_y(&self, y: f64) -> f64;
    fn t_for_y(&self, y: f64) -> f64;
    fn x_for_t(&self, t: f64) -> f64;
    fn y_for_t(&self, t: f64) -> f64;
    fn dx_for_t(&self, t: f64, deriv: usize) -> f64;
    fn dy_for_t(&self, t: f64, deriv: usize) -> f64;

    /// The next parameter after `t0` (and no later than `t1`) where the curve turns in x.
    fn next_vertical(&self, t0: f64, t1: f64) -> f64;

    fn enlarge(&self, bounds: &mut BoundingBox);
    fn sub_curve(&self, ystart: f64, yend: f64, direction: Direction) -> CurveSegment;
    fn reversed(&self) -> CurveSegment;

    /// Path command drawing this piece, starting from its (direction aware) start point.
    fn segment(&self) -> PathCommand<f64>;
}

/// A piece of a region boundary.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CurveSegment {
    Start(Start),
    Line(Line),
    Quad(Quad),
    Cubic(Cubic),
}

impl CurveSegment {
    fn geometry(&self) -> &dyn Segment {
        match self {
            CurveSegment::Start(s) => s,
            CurveSegment::Line(l) => l,
            CurveSegment::Quad(q) => q,
            CurveSegment::Cubic(c) => c,
        }
    }

    pub fn order(&self) -> usize {
        self.geometry().order()
    }

    pub fn direction(&self) -> Direction {
        self.geometry().direction()
    }

    pub fn is_start(&self) -> bool {
        matches!(self, CurveSegment::Start(_))
    }

    pub fn x_top(&self) -> f64 {
        self.geometry().x_top()
    }

    pub fn y_top(&self) -> f64 {
        self.geometry().y_top()
    }

    pub fn x_bot(&self) -> f64 {
        self.geometry().x_bot()
    }

    pub fn y_bot(&self) -> f64 {
        self.geometry().y_bot()
    }

    pub fn x_min(&self) -> f64 {
        self.geometry().x_min()
    }

    pub fn x_max(&self) -> f64 {
        self.geometry().x_max()
    }

    /// Start point in the original drawing order.
    pub fn start_point(&self) -> Point2<f64> {
        match self.direction() {
            Direction::Increasing => Point2::new(self.x_top(), self.y_top()),
            Direction::Decreasing => Point2::new(self.x_bot(), self.y_bot()),
        }
    }

    /// End point in the original drawing order.
    pub fn end_point(&self) -> Point2<f64> {
        match self.direction() {
            Direction::Increasing => Point2::new(self.x_bot(), self.y_bot()),
            Direction::Decreasing => Point2::new(self.x_top(), self.y_top()),
        }
    }

    pub fn x_for_y(&self, y: f64) -> f64 {
        self.geometry().x_for_y(y)
    }

    pub fn t_for_y(&self, y: f64) -> f64 {
        self.geometry().t_for_y(y)
    }

    pub fn x_for_t(&self, t: f64) -> f64 {
        self.geometry().x_for_t(t)
    }

    pub fn y_for_t(&self, t: f64) -> f64 {
        self.geometry().y_for_t(t)
    }

    pub fn dx_for_t(&self, t: f64, deriv: usize) -> f64 {
        self.geometry().dx_for_t(t, deriv)
    }

    pub fn dy_for_t(&self, t: f64, deriv: usize) -> f64 {
        self.geometry().dy_for_t(t, deriv)
    }

    pub fn next_vertical(&self, t0: f64, t1: f64) -> f64 {
        self.geometry().next_vertical(t0, t1)
    }

    pub fn enlarge(&self, bounds: &mut BoundingBox) {
        self.geometry().enlarge(bounds)
    }

    /// Sub piece spanning `[ystart, yend]`, with the given direction.
    pub fn sub_curve(&self, ystart: f64, yend: f64, direction: Direction) -> CurveSegment {
        self.geometry().sub_curve(ystart, yend, direction)
    }

    pub fn reversed(&self) -> CurveSegment {
        self.geometry().reversed()
    }

    pub fn with_direction(&self, direction: Direction) -> CurveSegment {
        if self.direction() == direction {
            *self
        } else {
            self.reversed()
        }
    }

    pub fn segment(&self) -> PathCommand<f64> {
        self.geometry().segment()
    }

    /// Control points from top to bottom.
    pub fn control_points(&self) -> Vec<Point2<f64>> {
        match self {
            CurveSegment::Start(s) => vec![s.point()],
            CurveSegment::Line(l) => l.control_points().to_vec(),
            CurveSegment::Quad(q) => q.control_points().to_vec(),
            CurveSegment::Cubic(c) => c.control_points().to_vec(),
        }
    }

    /// The same piece with every control point mapped.
    /// The mapping must keep the top end above the bottom end.
    pub fn map_points<F: Fn(&Point2<f64>) -> Point2<f64>>(&self, f: F) -> CurveSegment {
        let direction = self.direction();
        match self {
            CurveSegment::Start(s) => {
                let p = f(&s.point());
                Start::new(p.x, p.y).into()
            }
            CurveSegment::Line(l) => {
                let [p0, p1] = l.control_points().map(|p| f(&p));
                Line::new(p0.x, p0.y, p1.x, p1.y, direction).into()
            }
            CurveSegment::Quad(q) => {
                let [p0, cp, p1] = q.control_points().map(|p| f(&p));
                Quad::new(p0, cp, p1, direction).into()
            }
            CurveSegment::Cubic(c) => {
                let [p0, cp0, cp1, p1] = c.control_points().map(|p| f(&p));
                Cubic::new(p0, cp0, cp1, p1, direction).into()
            }
        }
    }

    /// Count (0 or 1) of crossings of a ray cast from `(x, y)` toward +x.
    pub fn crossings_for(&self, x: f64, y: f64) -> i32 {
        match self {
            CurveSegment::Start(_) => 0,
            CurveSegment::Line(line) => line.crossings_for(x, y),
            _ => {
                if y >= self.y_top()
                    && y < self.y_bot()
                    && x < self.x_max()
                    && (x < self.x_min() || x < self.x_for_y(y))
                {
                    1
                } else {
                    0
                }
            }
        }
    }

    /// Record the y-range this piece covers to the left of the crossings rectangle.
    /// Returns `true` when the piece passes through the rectangle itself.
    pub fn accumulate_crossings(&self, crossings: &mut Crossings) -> bool {
        match self {
            CurveSegment::Start(start) => start.accumulate_crossings(crossings),
            CurveSegment::Line(line) => line.accumulate_crossings(crossings),
            _ => accumulate_curve_crossings(self, crossings),
        }
    }

    /// Order this piece against another one at the top of `yrange`.
    ///
    /// `yrange.end` is narrowed to the widest range over which the returned
    /// ordering holds.
    pub fn compare_to(&self, other: &CurveSegment, yrange: &mut YRange) -> Ordering {
        match (self, other) {
            (CurveSegment::Line(a), CurveSegment::Line(b)) => a.compare_to(b, yrange),
            _ => compare_curves(self, other, yrange),
        }
    }
}

fn accumulate_curve_crossings(curve: &CurveSegment, c: &mut Crossings) -> bool {
    let (xlo, ylo, xhi, yhi) = c.rect();
    if curve.x_min() >= xhi {
        return false;
    }
    let y0 = curve.y_top();
    let y1 = curve.y_bot();
    let (ystart, mut tstart) = if y0 < ylo {
        if y1 <= ylo {
            return false;
        }
        (ylo, curve.t_for_y(ylo))
    } else {
        if y0 >= yhi {
            return false;
        }
        (y0, 0.)
    };
    let (yend, tend) = if y1 > yhi {
        (yhi, curve.t_for_y(yhi))
    } else {
        (y1, 1.)
    };
    let mut hit_lo = false;
    let mut hit_hi = false;
    loop {
        let x = curve.x_for_t(tstart);
        if x < xhi {
            if hit_hi || x > xlo {
                return true;
            }
            hit_lo = true;
        } else {
            if hit_lo {
                return true;
            }
            hit_hi = true;
        }
        if tstart >= tend {
            break;
        }
        tstart = curve.next_vertical(tstart, tend);
    }
    if hit_lo {
        c.record(ystart, yend);
    }
    false
}

impl From<Start> for CurveSegment {
    fn from(value: Start) -> Self {
        CurveSegment::Start(value)
    }
}

impl From<Line> for CurveSegment {
    fn from(value: Line) -> Self {
        CurveSegment::Line(value)
    }
}

impl From<Quad> for CurveSegment {
    fn from(value: Quad) -> Self {
        CurveSegment::Quad(value)
    }
}

impl From<Cubic> for CurveSegment {
    fn from(value: Cubic) -> Self {
        CurveSegment::Cubic(value)
    }
}

#[cfg(test)]
mod tests;
