use nalgebra::Point2;

use crate::{
    bounding_box::BoundingBox,
    misc::{solve_quadratic, FloatingPoint},
};

use super::PathCommand;

/// Tight bounds of an outline, including the extrema of its curves.
/// Returns `None` when the outline has no points.
///
/// # Examples
/// ```
/// use areax::prelude::*;
///
/// let circle = Path::ellipse(-1., -1., 2., 2.);
/// let bb = path_bounds(circle.commands()).unwrap();
/// assert!((bb.min().x + 1.).abs() < 1e-12);
/// assert!((bb.max().y - 1.).abs() < 1e-12);
/// ```
pub fn path_bounds<T: FloatingPoint>(commands: &[PathCommand<T>]) -> Option<BoundingBox> {
    let mut bounds: Option<BoundingBox> = None;
    let mut add = |p: Point2<f64>| match bounds.as_mut() {
        Some(bb) => bb.enlarge(&p),
        None => bounds = Some(BoundingBox::from_point(p)),
    };

    let mut current = Point2::origin();
    let mut start = Point2::origin();
    for command in commands {
        match command.to_sweep() {
            PathCommand::MoveTo(p) => {
                add(p);
                current = p;
                start = p;
            }
            PathCommand::LineTo(p) => {
                add(p);
                current = p;
            }
            PathCommand::QuadTo(c, p) => {
                for t in quad_extrema(current.x, c.x, p.x)
                    .into_iter()
                    .chain(quad_extrema(current.y, c.y, p.y))
                {
                    add(quad_point(&current, &c, &p, t));
                }
                add(p);
                current = p;
            }
            PathCommand::CubicTo(c0, c1, p) => {
                for t in cubic_extrema(current.x, c0.x, c1.x, p.x)
                    .into_iter()
                    .chain(cubic_extrema(current.y, c0.y, c1.y, p.y))
                {
                    add(cubic_point(&current, &c0, &c1, &p, t));
                }
                add(p);
                current = p;
            }
            PathCommand::Close => {
                current = start;
            }
        }
    }
    bounds
}

fn quad_extrema(p0: f64, c: f64, p1: f64) -> Option<f64> {
    let denom = p0 - 2. * c + p1;
    if denom == 0. {
        return None;
    }
    let t = (p0 - c) / denom;
    (t > 0. && t < 1.).then_some(t)
}

fn cubic_extrema(p0: f64, c0: f64, c1: f64, p1: f64) -> Vec<f64> {
    // derivative / 3 = a t^2 + b t + c
    let a = -p0 + 3. * c0 - 3. * c1 + p1;
    let b = 2. * (p0 - 2. * c0 + c1);
    let c = c0 - p0;
    solve_quadratic(c, b, a)
        .into_iter()
        .filter(|t| *t > 0. && *t < 1.)
        .collect()
}

fn quad_point(p0: &Point2<f64>, c: &Point2<f64>, p1: &Point2<f64>, t: f64) -> Point2<f64> {
    let u = 1. - t;
    Point2::from(p0.coords * (u * u) + c.coords * (2. * u * t) + p1.coords * (t * t))
}

fn cubic_point(
    p0: &Point2<f64>,
    c0: &Point2<f64>,
    c1: &Point2<f64>,
    p1: &Point2<f64>,
    t: f64,
) -> Point2<f64> {
    let u = 1. - t;
    Point2::from(
        p0.coords * (u * u * u)
            + c0.coords * (3. * u * u * t)
            + c1.coords * (3. * u * t * t)
            + p1.coords * (t * t * t),
    )
}
