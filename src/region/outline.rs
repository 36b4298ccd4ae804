use nalgebra::Point2;

use crate::{
    curve::{insert_cubic, insert_line, insert_move, insert_quad, CurveSegment},
    misc::FloatingPoint,
    path::PathCommand,
};

/// Break an outline into y-monotonic pieces, closing every contour.
/// The result is not yet validated: contours may overlap or self intersect.
pub fn to_curves<T: FloatingPoint>(commands: &[PathCommand<T>]) -> Vec<CurveSegment> {
    let mut curves = vec![];
    let mut start = Point2::origin();
    let mut current = Point2::origin();
    for command in commands {
        match command.to_sweep() {
            PathCommand::MoveTo(p) => {
                insert_line(&mut curves, &current, &start);
                insert_move(&mut curves, &p);
                start = p;
                current = p;
            }
            PathCommand::LineTo(p) => {
                insert_line(&mut curves, &current, &p);
                current = p;
            }
            PathCommand::QuadTo(c, p) => {
                insert_quad(&mut curves, &current, &c, &p);
                current = p;
            }
            PathCommand::CubicTo(c0, c1, p) => {
                insert_cubic(&mut curves, &current, &c0, &c1, &p);
                current = p;
            }
            PathCommand::Close => {
                insert_line(&mut curves, &current, &start);
                current = start;
            }
        }
    }
    insert_line(&mut curves, &current, &start);
    curves
}

/// Re-emit validated pieces as drawing commands.
///
/// A connecting line is inserted wherever a piece does not begin where the previous
/// one ended, and every contour is closed.
pub fn to_commands(curves: &[CurveSegment]) -> Vec<PathCommand<f64>> {
    let mut commands = Vec::with_capacity(curves.len() * 2);
    let mut previous: Option<&CurveSegment> = None;
    for curve in curves {
        match previous {
            Some(_) if curve.is_start() => commands.push(PathCommand::Close),
            Some(prev) if prev.end_point() != curve.start_point() => {
                commands.push(PathCommand::LineTo(curve.start_point()));
            }
            _ => {}
        }
        commands.push(curve.segment());
        previous = Some(curve);
    }
    if previous.is_some() {
        commands.push(PathCommand::Close);
    }
    commands
}
