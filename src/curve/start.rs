use nalgebra::Point2;

use crate::{bounding_box::BoundingBox, crossings::Crossings, path::PathCommand};

use super::{CurveSegment, Direction, Segment};

/// Order 0 piece: the first point of a contour.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Start {
    x: f64,
    y: f64,
}

impl Start {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn point(&self) -> Point2<f64> {
        Point2::new(self.x, self.y)
    }

    /// A start point strictly inside the rectangle means the region crosses it.
    pub fn accumulate_crossings(&self, c: &Crossings) -> bool {
        let (xlo, ylo, xhi, yhi) = c.rect();
        self.x > xlo && self.x < xhi && self.y > ylo && self.y < yhi
    }
}

impl Segment for Start {
    fn order(&self) -> usize {
        0
    }

    fn direction(&self) -> Direction {
        Direction::Increasing
    }

    fn x_top(&self) -> f64 {
        self.x
    }

    fn y_top(&self) -> f64 {
        self.y
    }

    fn x_bot(&self) -> f64 {
        self.x
    }

    fn y_bot(&self) -> f64 {
        self.y
    }

    fn x_min(&self) -> f64 {
        self.x
    }

    fn x_max(&self) -> f64 {
        self.x
    }

    fn x_for_y(&self, _y: f64) -> f64 {
        self.x
    }

    fn t_for_y(&self, _y: f64) -> f64 {
        0.
    }

    fn x_for_t(&self, _t: f64) -> f64 {
        self.x
    }

    fn y_for_t(&self, _t: f64) -> f64 {
        self.y
    }

    fn dx_for_t(&self, _t: f64, _deriv: usize) -> f64 {
        0.
    }

    fn dy_for_t(&self, _t: f64, _deriv: usize) -> f64 {
        0.
    }

    fn next_vertical(&self, _t0: f64, t1: f64) -> f64 {
        t1
    }

    fn enlarge(&self, bounds: &mut BoundingBox) {
        bounds.enlarge(&self.point());
    }

    fn sub_curve(&self, _ystart: f64, _yend: f64, _direction: Direction) -> CurveSegment {
        CurveSegment::Start(*self)
    }

    fn reversed(&self) -> CurveSegment {
        CurveSegment::Start(*self)
    }

    fn segment(&self) -> PathCommand<f64> {
        PathCommand::MoveTo(self.point())
    }
}
