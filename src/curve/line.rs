use std::cmp::Ordering;

use nalgebra::Point2;

use crate::{
    bounding_box::BoundingBox,
    crossings::Crossings,
    misc::{orientation, Orientation},
    path::PathCommand,
};

use super::{order_of, CurveSegment, Direction, Segment, YRange};

/// Order 1 piece: a non-horizontal line segment stored top to bottom.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line {
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
    xmin: f64,
    xmax: f64,
    direction: Direction,
}

impl Line {
    /// `(x0, y0)` must be the top end (`y0 < y1`).
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64, direction: Direction) -> Self {
        Self {
            x0,
            y0,
            x1,
            y1,
            xmin: x0.min(x1),
            xmax: x0.max(x1),
            direction,
        }
    }

    pub fn control_points(&self) -> [Point2<f64>; 2] {
        [Point2::new(self.x0, self.y0), Point2::new(self.x1, self.y1)]
    }

    pub fn crossings_for(&self, x: f64, y: f64) -> i32 {
        if y < self.y0 || y >= self.y1 || x >= self.xmax {
            return 0;
        }
        if x < self.xmin {
            return 1;
        }
        let top = Point2::new(self.x0, self.y0);
        let bottom = Point2::new(self.x1, self.y1);
        match orientation(&top, &bottom, &Point2::new(x, y)) {
            Orientation::CounterClockwise => 1,
            _ => 0,
        }
    }

    pub fn accumulate_crossings(&self, c: &mut Crossings) -> bool {
        let (xlo, ylo, xhi, yhi) = c.rect();
        if self.xmin >= xhi {
            return false;
        }
        let (xstart, ystart) = if self.y0 < ylo {
            if self.y1 <= ylo {
                return false;
            }
            (self.x_for_y(ylo), ylo)
        } else {
            if self.y0 >= yhi {
                return false;
            }
            (self.x0, self.y0)
        };
        let (xend, yend) = if self.y1 > yhi {
            (self.x_for_y(yhi), yhi)
        } else {
            (self.x1, self.y1)
        };
        if xstart >= xhi && xend >= xhi {
            return false;
        }
        if xstart > xlo || xend > xlo {
            return true;
        }
        c.record(ystart, yend);
        false
    }

    /// Closed form ordering of two lines.
    pub fn compare_to(&self, other: &Line, yrange: &mut YRange) -> Ordering {
        assert!(
            yrange.end > yrange.start,
            "empty comparison range {:?}",
            yrange
        );
        yrange.end = yrange.end.min(self.y1).min(other.y1);
        assert!(
            yrange.end > yrange.start,
            "backstepping from {} to {}",
            yrange.start,
            yrange.end
        );
        if self.xmax <= other.xmin {
            return if self.xmin == other.xmax {
                Ordering::Equal
            } else {
                Ordering::Less
            };
        }
        if self.xmin >= other.xmax {
            return Ordering::Greater;
        }

        // Solve xA(y) == xB(y) for y:
        // y = ((x0A - x0B) dyA dyB - y0A dxA dyB + y0B dxB dyA) / (dxB dyA - dxA dyB)
        let dxa = self.x1 - self.x0;
        let dya = self.y1 - self.y0;
        let dxb = other.x1 - other.x0;
        let dyb = other.y1 - other.y0;
        let denom = dxb * dya - dxa * dyb;
        let y = if denom != 0. {
            let num = (self.x0 - other.x0) * dya * dyb - self.y0 * dxa * dyb + other.y0 * dxb * dya;
            let y = num / denom;
            if y <= yrange.start {
                // the crossing is above us, compare at the lowest common y
                self.y1.min(other.y1)
            } else {
                if y < yrange.end {
                    yrange.end = y;
                }
                self.y0.max(other.y0)
            }
        } else {
            // parallel; endpoints make x_for_y exact
            self.y0.max(other.y0)
        };
        order_of(self.x_for_y(y), other.x_for_y(y))
    }
}

impl Segment for Line {
    fn order(&self) -> usize {
        1
    }

    fn direction(&self) -> Direction {
        self.direction
    }

    fn x_top(&self) -> f64 {
        self.x0
    }

    fn y_top(&self) -> f64 {
        self.y0
    }

    fn x_bot(&self) -> f64 {
        self.x1
    }

    fn y_bot(&self) -> f64 {
        self.y1
    }

    fn x_min(&self) -> f64 {
        self.xmin
    }

    fn x_max(&self) -> f64 {
        self.xmax
    }

    fn x_for_y(&self, y: f64) -> f64 {
        if self.x0 == self.x1 || y <= self.y0 {
            return self.x0;
        }
        if y >= self.y1 {
            return self.x1;
        }
        self.x0 + (y - self.y0) * (self.x1 - self.x0) / (self.y1 - self.y0)
    }

    fn t_for_y(&self, y: f64) -> f64 {
        if y <= self.y0 {
            return 0.;
        }
        if y >= self.y1 {
            return 1.;
        }
        (y - self.y0) / (self.y1 - self.y0)
    }

    fn x_for_t(&self, t: f64) -> f64 {
        self.x0 + t * (self.x1 - self.x0)
    }

    fn y_for_t(&self, t: f64) -> f64 {
        self.y0 + t * (self.y1 - self.y0)
    }

    fn dx_for_t(&self, t: f64, deriv: usize) -> f64 {
        match deriv {
            0 => self.x_for_t(t),
            1 => self.x1 - self.x0,
            _ => 0.,
        }
    }

    fn dy_for_t(&self, t: f64, deriv: usize) -> f64 {
        match deriv {
            0 => self.y_for_t(t),
            1 => self.y1 - self.y0,
            _ => 0.,
        }
    }

    fn next_vertical(&self, _t0: f64, t1: f64) -> f64 {
        t1
    }

    fn enlarge(&self, bounds: &mut BoundingBox) {
        bounds.enlarge(&Point2::new(self.x0, self.y0));
        bounds.enlarge(&Point2::new(self.x1, self.y1));
    }

    fn sub_curve(&self, ystart: f64, yend: f64, direction: Direction) -> CurveSegment {
        if ystart == self.y0 && yend == self.y1 {
            return CurveSegment::Line(*self).with_direction(direction);
        }
        if self.x0 == self.x1 {
            return Line::new(self.x0, ystart, self.x1, yend, direction).into();
        }
        let num = self.x0 - self.x1;
        let denom = self.y0 - self.y1;
        let xstart = self.x0 + (ystart - self.y0) * num / denom;
        let xend = self.x0 + (yend - self.y0) * num / denom;
        Line::new(xstart, ystart, xend, yend, direction).into()
    }

    fn reversed(&self) -> CurveSegment {
        Line::new(self.x0, self.y0, self.x1, self.y1, -self.direction).into()
    }

    fn segment(&self) -> PathCommand<f64> {
        match self.direction {
            Direction::Increasing => PathCommand::LineTo(Point2::new(self.x1, self.y1)),
            Direction::Decreasing => PathCommand::LineTo(Point2::new(self.x0, self.y0)),
        }
    }
}
