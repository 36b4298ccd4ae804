use std::f64::consts::PI;

use nalgebra::Point2;

use crate::{bounding_box::BoundingBox, misc::solve_quadratic, path::PathCommand};

use super::{quad_t_for_y, CurveSegment, Direction, Segment};

/// Order 3 piece: a cubic Bézier that is monotonic in y, stored top to bottom.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cubic {
    p0: Point2<f64>,
    cp0: Point2<f64>,
    cp1: Point2<f64>,
    p1: Point2<f64>,
    xmin: f64,
    xmax: f64,
    // power basis coefficients: c0 + c1 t + c2 t^2 + c3 t^3
    xcoeff: [f64; 4],
    ycoeff: [f64; 4],
    direction: Direction,
}

fn power_basis(c0: f64, c1: f64, c2: f64, c3: f64) -> [f64; 4] {
    [
        c0,
        (c1 - c0) * 3.,
        (c2 - c1 - c1 + c0) * 3.,
        c3 - (c2 - c1) * 3. - c0,
    ]
}

impl Cubic {
    /// `p0` must be the top end.
    pub fn new(
        p0: Point2<f64>,
        cp0: Point2<f64>,
        cp1: Point2<f64>,
        p1: Point2<f64>,
        direction: Direction,
    ) -> Self {
        let cp0 = Point2::new(cp0.x, cp0.y.max(p0.y));
        let cp1 = Point2::new(cp1.x, cp1.y.min(p1.y));
        Self {
            p0,
            cp0,
            cp1,
            p1,
            xmin: p0.x.min(p1.x).min(cp0.x.min(cp1.x)),
            xmax: p0.x.max(p1.x).max(cp0.x.max(cp1.x)),
            xcoeff: power_basis(p0.x, cp0.x, cp1.x, p1.x),
            ycoeff: power_basis(p0.y, cp0.y, cp1.y, p1.y),
            direction,
        }
    }

    pub fn control_points(&self) -> [Point2<f64>; 4] {
        [self.p0, self.cp0, self.cp1, self.p1]
    }

    /// Parameters where dx/dt vanishes.
    fn x_turns(&self) -> Vec<f64> {
        solve_quadratic(self.xcoeff[1], 2. * self.xcoeff[2], 3. * self.xcoeff[3])
    }

    /// Newton iteration toward `y(t) = target`, falling back to bisection when the slope
    /// misbehaves. Returns a negative value when `t` is not a usable guess.
    fn refine(&self, target: f64, mut t: f64) -> f64 {
        if !(-0.1..=1.1).contains(&t) {
            return -1.;
        }
        let mut y = self.y_for_t(t);
        let (mut t0, mut t1) = if y < target { (t, 1.) } else { (0., t) };
        let mut use_slope = true;
        while y != target {
            if use_slope {
                let slope = self.dy_for_t(t, 1);
                if slope == 0. {
                    use_slope = false;
                    continue;
                }
                let t2 = t + (target - y) / slope;
                if t2 == t || t2 <= t0 || t2 >= t1 {
                    use_slope = false;
                    continue;
                }
                t = t2;
            } else {
                let t2 = (t0 + t1) / 2.;
                if t2 == t0 || t2 == t1 {
                    break;
                }
                t = t2;
            }
            y = self.y_for_t(t);
            if y < target {
                t0 = t;
            } else if y > target {
                t1 = t;
            } else {
                break;
            }
        }
        if t > 1. {
            -1.
        } else {
            t
        }
    }

    fn bisect_t_for_y(&self, y: f64) -> f64 {
        let (mut t0, mut t1) = (0., 1.);
        loop {
            let t = (t0 + t1) / 2.;
            if t == t0 || t == t1 {
                return t;
            }
            let yt = self.y_for_t(t);
            if yt < y {
                t0 = t;
            } else if yt > y {
                t1 = t;
            } else {
                return t;
            }
        }
    }
}

/// de Casteljau split of a cubic at `t`.
/// Returns the seven points `[p0, a, b, mid, c, d, p1]` shared by both halves.
pub fn split_cubic(
    p0: &Point2<f64>,
    cp0: &Point2<f64>,
    cp1: &Point2<f64>,
    p1: &Point2<f64>,
    t: f64,
) -> [Point2<f64>; 7] {
    let a = p0.lerp(cp0, t);
    let m = cp0.lerp(cp1, t);
    let d = cp1.lerp(p1, t);
    let b = a.lerp(&m, t);
    let c = m.lerp(&d, t);
    let mid = b.lerp(&c, t);
    [*p0, a, b, mid, c, d, *p1]
}

impl Segment for Cubic {
    fn order(&self) -> usize {
        3
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
        let a = self.ycoeff[3];
        if a == 0. {
            // degenerated into a quadratic
            let [c0, c1, c2, _] = self.ycoeff;
            return quad_t_for_y(y, &[c0, c1, c2]);
        }
        let b = self.ycoeff[2] / a;
        let c = self.ycoeff[1] / a;
        let d = (self.ycoeff[0] - y) / a;
        let q = (b * b - 3. * c) / 9.;
        let r = (2. * b * b * b - 9. * b * c + 27. * d) / 54.;
        let r2 = r * r;
        let q3 = q * q * q;
        let b_3 = b / 3.;

        let mut t = if r2 < q3 {
            let theta = (r / q3.sqrt()).acos();
            let q = -2. * q.sqrt();
            [theta, theta + PI * 2., theta - PI * 2.]
                .into_iter()
                .map(|angle| self.refine(y, q * (angle / 3.).cos() - b_3))
                .find(|t| *t >= 0.)
                .unwrap_or(-1.)
        } else {
            let s = (r2 - q3).sqrt();
            let a = (r.abs() + s).cbrt();
            let a = if r < 0. { a } else { -a };
            let b = if a == 0. { 0. } else { q / a };
            self.refine(y, (a + b) - b_3)
        };
        if t < 0. {
            t = self.bisect_t_for_y(y);
        }
        t
    }

    fn x_for_t(&self, t: f64) -> f64 {
        let [c0, c1, c2, c3] = self.xcoeff;
        ((c3 * t + c2) * t + c1) * t + c0
    }

    fn y_for_t(&self, t: f64) -> f64 {
        let [c0, c1, c2, c3] = self.ycoeff;
        ((c3 * t + c2) * t + c1) * t + c0
    }

    fn dx_for_t(&self, t: f64, deriv: usize) -> f64 {
        let [_, c1, c2, c3] = self.xcoeff;
        match deriv {
            0 => self.x_for_t(t),
            1 => (3. * c3 * t + 2. * c2) * t + c1,
            2 => 6. * c3 * t + 2. * c2,
            3 => 6. * c3,
            _ => 0.,
        }
    }

    fn dy_for_t(&self, t: f64, deriv: usize) -> f64 {
        let [_, c1, c2, c3] = self.ycoeff;
        match deriv {
            0 => self.y_for_t(t),
            1 => (3. * c3 * t + 2. * c2) * t + c1,
            2 => 6. * c3 * t + 2. * c2,
            3 => 6. * c3,
            _ => 0.,
        }
    }

    fn next_vertical(&self, t0: f64, t1: f64) -> f64 {
        self.x_turns()
            .into_iter()
            .filter(|t| *t > t0 && *t < t1)
            .fold(t1, f64::min)
    }

    fn enlarge(&self, bounds: &mut BoundingBox) {
        bounds.enlarge(&self.p0);
        for t in self.x_turns() {
            if t > 0. && t < 1. {
                bounds.enlarge(&Point2::new(self.x_for_t(t), self.y_for_t(t)));
            }
        }
        bounds.enlarge(&self.p1);
    }

    fn sub_curve(&self, ystart: f64, yend: f64, direction: Direction) -> CurveSegment {
        if ystart <= self.p0.y && yend >= self.p1.y {
            return CurveSegment::Cubic(*self).with_direction(direction);
        }
        let mut t0 = self.t_for_y(ystart);
        let mut t1 = self.t_for_y(yend);
        if t0 > t1 {
            // ystart and yend nearly coincide and the roots stepped past each other
            std::mem::swap(&mut t0, &mut t1);
        }

        let (mut p0, mut cp0, mut cp1, mut p1) = (self.p0, self.cp0, self.cp1, self.p1);
        if t1 < 1. {
            let [a, b, c, d, _, _, _] = split_cubic(&p0, &cp0, &cp1, &p1, t1);
            (p0, cp0, cp1, p1) = (a, b, c, d);
        }
        if t0 > 0. {
            let [_, _, _, d, e, f, g] = split_cubic(&p0, &cp0, &cp1, &p1, t0 / t1);
            (p0, cp0, cp1, p1) = (d, e, f, g);
        }
        Cubic::new(
            Point2::new(p0.x, ystart),
            cp0,
            cp1,
            Point2::new(p1.x, yend),
            direction,
        )
        .into()
    }

    fn reversed(&self) -> CurveSegment {
        Cubic::new(self.p0, self.cp0, self.cp1, self.p1, -self.direction).into()
    }

    fn segment(&self) -> PathCommand<f64> {
        match self.direction {
            Direction::Increasing => PathCommand::CubicTo(self.cp0, self.cp1, self.p1),
            Direction::Decreasing => PathCommand::CubicTo(self.cp1, self.cp0, self.p0),
        }
    }
}
