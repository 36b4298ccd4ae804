use itertools::Itertools;
use nalgebra::Point2;

use crate::path::PathCommand;

use super::Region;

impl Region {
    /// Enclosed area, integrated exactly over the polynomial form of every piece.
    pub fn area(&self) -> f64 {
        signed_area(&self.path_commands()).abs()
    }
}

/// Signed area enclosed by an outline, positive when it winds counter clockwise
/// in a y-up frame. Open contours are closed with a straight line.
pub fn signed_area(commands: &[PathCommand<f64>]) -> f64 {
    let mut sum = 0.;
    let mut start = Point2::origin();
    let mut current = Point2::origin();
    for command in commands {
        match command {
            PathCommand::MoveTo(p) => {
                sum += green(&[current, start]);
                start = *p;
                current = *p;
            }
            PathCommand::LineTo(p) => {
                sum += green(&[current, *p]);
                current = *p;
            }
            PathCommand::QuadTo(c, p) => {
                sum += green(&[current, *c, *p]);
                current = *p;
            }
            PathCommand::CubicTo(c0, c1, p) => {
                sum += green(&[current, *c0, *c1, *p]);
                current = *p;
            }
            PathCommand::Close => {
                sum += green(&[current, start]);
                current = start;
            }
        }
    }
    sum += green(&[current, start]);
    sum / 2.
}

/// `∮ x dy - y dx` along a Bézier of degree one to three.
fn green(points: &[Point2<f64>]) -> f64 {
    let xs = power_basis(&points.iter().map(|p| p.x).collect_vec());
    let ys = power_basis(&points.iter().map(|p| p.y).collect_vec());
    xs.iter()
        .enumerate()
        .cartesian_product(ys.iter().enumerate())
        .filter(|((k, _), (m, _))| k + m > 0)
        .map(|((k, a), (m, b))| a * b * (m as f64 - k as f64) / (k + m) as f64)
        .sum()
}

/// Power basis coefficients of a Bézier polynomial given its control values.
fn power_basis(c: &[f64]) -> Vec<f64> {
    match c {
        [c0, c1] => vec![*c0, c1 - c0],
        [c0, c1, c2] => vec![*c0, 2. * (c1 - c0), c0 - 2. * c1 + c2],
        [c0, c1, c2, c3] => vec![
            *c0,
            3. * (c1 - c0),
            3. * (c2 - 2. * c1 + c0),
            c3 - 3. * c2 + 3. * c1 - c0,
        ],
        _ => vec![],
    }
}
