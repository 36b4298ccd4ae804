use nalgebra::Point2;

use crate::{bounding_box::BoundingBox, path::PathCommand};

use super::{CurveSegment, Direction, Segment};

/// Order 2 piece: a quadratic Bézier that is monotonic in y, stored top to bottom.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quad {
    p0: Point2<f64>,
    cp: Point2<f64>,
    p1: Point2<f64>,
    xmin: f64,
    xmax: f64,
    // power basis coefficients: c0 + c1 t + c2 t^2
    xcoeff: [f64; 3],
    ycoeff: [f64; 3],
    direction: Direction,
}

impl Quad {
    /// `p0` must be the top end. The control point is clamped into `[p0.y, p1.y]`
    /// to absorb round off from splitting.
    pub fn new(p0: Point2<f64>, cp: Point2<f64>, p1: Point2<f64>, direction: Direction) -> Self {
        let cp = Point2::new(cp.x, cp.y.max(p0.y).min(p1.y));
        Self {
            p0,
            cp,
            p1,
            xmin: p0.x.min(p1.x).min(cp.x),
            xmax: p0.x.max(p1.x).max(cp.x),
            xcoeff: [p0.x, 2. * (cp.x - p0.x), p0.x - 2. * cp.x + p1.x],
            ycoeff: [p0.y, 2. * (cp.y - p0.y), p0.y - 2. * cp.y + p1.y],
            direction,
        }
    }

    pub fn control_points(&self) -> [Point2<f64>; 3] {
        [self.p0, self.cp, self.p1]
    }

    /// x extremum parameter, which may fall outside `[0, 1]` or be non-finite.
    fn x_turn(&self) -> f64 {
        -self.xcoeff[1] / (2. * self.xcoeff[2])
    }
}

/// Solve `y(t) = y` on a quadratic in power basis for a root in `[0, 1]`,
/// falling back to the nearer endpoint.
pub fn quad_t_for_y(y: f64, ycoeff: &[f64; 3]) -> f64 {
    let c0 = ycoeff[0] - y;
    let [_, c1, c2] = *ycoeff;
    if c2 == 0. {
        let root = -c0 / c1;
        if (0. ..=1.).contains(&root) {
            return root;
        }
    } else {
        let d = c1 * c1 - 4. * c2 * c0;
        if d >= 0. {
            let d = if c1 < 0. { -d.sqrt() } else { d.sqrt() };
            let q = (c1 + d) / -2.;
            let root = q / c2;
            if (0. ..=1.).contains(&root) {
                return root;
            }
            if q != 0. {
                let root = c0 / q;
                if (0. ..=1.).contains(&root) {
                    return root;
                }
            }
        }
    }
    let y0 = c0;
    let y1 = c0 + c1 + c2;
    if 0. < (y0 + y1) / 2. {
        0.
    } else {
        1.
    }
}

/// de Casteljau split of a quadratic at `t`.
/// Returns the five points `[p0, q0, mid, q1, p1]` shared by both halves.
pub fn split_quad(p0: &Point2<f64>, cp: &Point2<f64>, p1: &Point2<f64>, t: f64) -> [Point2<f64>; 5] {
    let q0 = p0.lerp(cp, t);
    let q1 = cp.lerp(p1, t);
    let mid = q0.lerp(&q1, t);
    [*p0, q0, mid, q1, *p1]
}

impl Segment for Quad {
    fn order(&self) -> usize {
        2
    }

    fn direction(&self) -> Direction {
        self.direction
    }

    fn x_top(&self) -> f64 {
        self.p0.x
    }

    fn y_top(&self) -> f64 {
        self.p0.y
    }

    fn x_bot(&self) -> f64 {
        self.p1.x
    }

    fn y_bot(&self) -> f64 {
        self.p1.y
    }

    fn x_min(&self) -> f64 {
        self.xmin
    }

    fn x_max(&self) -> f64 {
        self.xmax
    }

    fn x_for_y(&self, y: f64) -> f64 {
        if y <= self.p0.y {
            return self.p0.x;
        }
        if y >= self.p1.y {
            return self.p1.x;
        }
        self.x_for_t(self.t_for_y(y))
    }

    fn t_for_y(&self, y: f64) -> f64 {
        if y <= self.p0.y {
            return 0.;
        }
        if y >= self.p1.y {
            return 1.;
        }
        quad_t_for_y(y, &self.ycoeff)
    }

    fn x_for_t(&self, t: f64) -> f64 {
        (self.xcoeff[2] * t + self.xcoeff[1]) * t + self.xcoeff[0]
    }

    fn y_for_t(&self, t: f64) -> f64 {
        (self.ycoeff[2] * t + self.ycoeff[1]) * t + self.ycoeff[0]
    }

    fn dx_for_t(&self, t: f64, deriv: usize) -> f64 {
        match deriv {
            0 => self.x_for_t(t),
            1 => 2. * self.xcoeff[2] * t + self.xcoeff[1],
            2 => 2. * self.xcoeff[2],
            _ => 0.,
        }
    }

    fn dy_for_t(&self, t: f64, deriv: usize) -> f64 {
        match deriv {
            0 => self.y_for_t(t),
            1 => 2. * self.ycoeff[2] * t + self.ycoeff[1],
            2 => 2. * self.ycoeff[2],
            _ => 0.,
        }
    }

    fn next_vertical(&self, t0: f64, t1: f64) -> f64 {
        let t = self.x_turn();
        if t > t0 && t < t1 {
            t
        } else {
            t1
        }
    }

    fn enlarge(&self, bounds: &mut BoundingBox) {
        bounds.enlarge(&self.p0);
        let t = self.x_turn();
        if t > 0. && t < 1. {
            bounds.enlarge(&Point2::new(self.x_for_t(t), self.y_for_t(t)));
        }
        bounds.enlarge(&self.p1);
    }

    fn sub_curve(&self, ystart: f64, yend: f64, direction: Direction) -> CurveSegment {
        let t0 = if ystart <= self.p0.y {
            if yend >= self.p1.y {
                return CurveSegment::Quad(*self).with_direction(direction);
            }
            0.
        } else {
            quad_t_for_y(ystart, &self.ycoeff)
        };
        let t1 = if yend >= self.p1.y {
            1.
        } else {
            quad_t_for_y(yend, &self.ycoeff)
        };

        let (mut p0, mut cp, mut p1) = (self.p0, self.cp, self.p1);
        if t1 < 1. {
            let [a, b, c, _, _] = split_quad(&p0, &cp, &p1, t1);
            (p0, cp, p1) = (a, b, c);
        }
        if t0 > 0. {
            let [_, _, c, d, e] = split_quad(&p0, &cp, &p1, t0 / t1);
            (p0, cp, p1) = (c, d, e);
        }
        Quad::new(
            Point2::new(p0.x, ystart),
            cp,
            Point2::new(p1.x, yend),
            direction,
        )
        .into()
    }

    fn reversed(&self) -> CurveSegment {
        Quad::new(self.p0, self.cp, self.p1, -self.direction).into()
    }

    fn segment(&self) -> PathCommand<f64> {
        match self.direction {
            Direction::Increasing => PathCommand::QuadTo(self.cp, self.p1),
            Direction::Decreasing => PathCommand::QuadTo(self.cp, self.p0),
        }
    }
}
