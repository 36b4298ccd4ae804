use nalgebra::Point2;

use crate::misc::solve_quadratic;

use super::{split_cubic, split_quad, Cubic, CurveSegment, Direction, Line, Quad, Start};

/// Append the start point of a new contour.
pub fn insert_move(curves: &mut Vec<CurveSegment>, p: &Point2<f64>) {
    curves.push(Start::new(p.x, p.y).into());
}

/// Append a line, dropping it when horizontal.
pub fn insert_line(curves: &mut Vec<CurveSegment>, from: &Point2<f64>, to: &Point2<f64>) {
    if from.y < to.y {
        curves.push(Line::new(from.x, from.y, to.x, to.y, Direction::Increasing).into());
    } else if from.y > to.y {
        curves.push(Line::new(to.x, to.y, from.x, from.y, Direction::Decreasing).into());
    }
}

/// Append a quadratic, split into y-monotonic pieces.
pub fn insert_quad(
    curves: &mut Vec<CurveSegment>,
    from: &Point2<f64>,
    cp: &Point2<f64>,
    to: &Point2<f64>,
) {
    if from.y > to.y {
        insert_monotonic_quad(curves, to, cp, from, Direction::Decreasing);
    } else if from.y == to.y && from.y == cp.y {
        // horizontal
    } else {
        insert_monotonic_quad(curves, from, cp, to, Direction::Increasing);
    }
}

/// Append a cubic, split into y-monotonic pieces.
pub fn insert_cubic(
    curves: &mut Vec<CurveSegment>,
    from: &Point2<f64>,
    cp0: &Point2<f64>,
    cp1: &Point2<f64>,
    to: &Point2<f64>,
) {
    if from.y > to.y {
        insert_monotonic_cubic(curves, to, cp1, cp0, from, Direction::Decreasing);
    } else if from.y == to.y && from.y == cp0.y && from.y == cp1.y {
        // horizontal
    } else {
        insert_monotonic_cubic(curves, from, cp0, cp1, to, Direction::Increasing);
    }
}

/// Parameter where a quadratic turns around in y, if any lies strictly inside `(0, 1)`.
fn quad_horizontal_param(c0: f64, cp: f64, c1: f64) -> Option<f64> {
    if c0 <= cp && cp <= c1 {
        return None;
    }
    let c0 = c0 - cp;
    let c1 = c1 - cp;
    let denom = c0 + c1;
    if denom == 0. {
        return None;
    }
    let t = c0 / denom;
    (t > 0. && t < 1.).then_some(t)
}

/// Parameters (ascending) where a cubic turns around in y, strictly inside `(0, 1)`.
fn cubic_horizontal_params(c0: f64, cp0: f64, cp1: f64, c1: f64) -> Vec<f64> {
    if c0 <= cp0 && cp0 <= cp1 && cp1 <= c1 {
        return vec![];
    }
    let c1 = c1 - cp1;
    let cp1 = cp1 - cp0;
    let cp0 = cp0 - c0;
    let mut params: Vec<f64> = solve_quadratic(cp0, (cp1 - cp0) * 2., c1 - cp1 - cp1 + cp0)
        .into_iter()
        .filter(|t| *t > 0. && *t < 1.)
        .collect();
    params.sort_by(f64::total_cmp);
    params
}

fn add_quad(
    curves: &mut Vec<CurveSegment>,
    p0: Point2<f64>,
    cp: Point2<f64>,
    p1: Point2<f64>,
    direction: Direction,
) {
    if p0.y > p1.y {
        curves.push(Quad::new(p1, cp, p0, -direction).into());
    } else if p1.y > p0.y {
        curves.push(Quad::new(p0, cp, p1, direction).into());
    }
}

fn add_cubic(
    curves: &mut Vec<CurveSegment>,
    [p0, cp0, cp1, p1]: [Point2<f64>; 4],
    direction: Direction,
) {
    if p0.y > p1.y {
        curves.push(Cubic::new(p1, cp1, cp0, p0, -direction).into());
    } else if p1.y > p0.y {
        curves.push(Cubic::new(p0, cp0, cp1, p1, direction).into());
    }
}

fn insert_monotonic_quad(
    curves: &mut Vec<CurveSegment>,
    p0: &Point2<f64>,
    cp: &Point2<f64>,
    p1: &Point2<f64>,
    direction: Direction,
) {
    let Some(t) = quad_horizontal_param(p0.y, cp.y, p1.y) else {
        add_quad(curves, *p0, *cp, *p1, direction);
        return;
    };
    let [a, b, mid, d, e] = split_quad(p0, cp, p1, t);
    // keep the pieces in drawing order
    match direction {
        Direction::Increasing => {
            add_quad(curves, a, b, mid, direction);
            add_quad(curves, mid, d, e, direction);
        }
        Direction::Decreasing => {
            add_quad(curves, mid, d, e, direction);
            add_quad(curves, a, b, mid, direction);
        }
    }
}

fn insert_monotonic_cubic(
    curves: &mut Vec<CurveSegment>,
    p0: &Point2<f64>,
    cp0: &Point2<f64>,
    cp1: &Point2<f64>,
    p1: &Point2<f64>,
    direction: Direction,
) {
    let params = cubic_horizontal_params(p0.y, cp0.y, cp1.y, p1.y);
    let mut pieces = Vec::with_capacity(params.len() + 1);
    let mut rest = [*p0, *cp0, *cp1, *p1];
    let mut consumed = 0.;
    for t in params {
        // re-map t into the remaining span
        let local = (t - consumed) / (1. - consumed);
        let [a, b, c, mid, e, f, g] = split_cubic(&rest[0], &rest[1], &rest[2], &rest[3], local);
        pieces.push([a, b, c, mid]);
        rest = [mid, e, f, g];
        consumed = t;
    }
    pieces.push(rest);

    if direction == Direction::Decreasing {
        pieces.reverse();
    }
    for piece in pieces {
        add_cubic(curves, piece, direction);
    }
}
