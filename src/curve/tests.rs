use std::cmp::Ordering;

use approx::assert_relative_eq;
use nalgebra::Point2;

use crate::{bounding_box::BoundingBox, crossings::Crossings, path::PathCommand};

use super::*;

fn p(x: f64, y: f64) -> Point2<f64> {
    Point2::new(x, y)
}

fn wavy_cubic() -> CurveSegment {
    Cubic::new(p(0., 0.), p(3., 0.5), p(-1., 2.), p(1., 3.), Direction::Increasing).into()
}

#[test]
fn line_geometry() {
    let line: CurveSegment = Line::new(0., 0., 2., 4., Direction::Decreasing).into();
    assert_eq!(line.x_for_y(2.), 1.);
    assert_eq!(line.x_for_y(-1.), 0.);
    assert_eq!(line.x_for_y(5.), 2.);
    assert_eq!(line.t_for_y(1.), 0.25);
    assert_eq!(line.start_point(), p(2., 4.));
    assert_eq!(line.end_point(), p(0., 0.));
    assert_eq!(line.segment(), PathCommand::LineTo(p(0., 0.)));

    let sub = line.sub_curve(1., 3., Direction::Increasing);
    assert_eq!(sub.direction(), Direction::Increasing);
    assert_eq!((sub.x_top(), sub.y_top()), (0.5, 1.));
    assert_eq!((sub.x_bot(), sub.y_bot()), (1.5, 3.));

    let reversed = line.reversed();
    assert_eq!(reversed.direction(), Direction::Increasing);
    assert_eq!(reversed.start_point(), p(0., 0.));
    assert_eq!(line.with_direction(Direction::Decreasing), line);
}

#[test]
fn quad_t_for_y_inverts_y_for_t() {
    let quad: CurveSegment =
        Quad::new(p(0., 0.), p(4., 0.5), p(1., 2.), Direction::Increasing).into();
    for i in 1..10 {
        let t = i as f64 / 10.;
        let y = quad.y_for_t(t);
        assert_relative_eq!(quad.t_for_y(y), t, epsilon = 1e-12);
    }
    assert_eq!(quad.t_for_y(-1.), 0.);
    assert_eq!(quad.t_for_y(3.), 1.);
}

#[test]
fn cubic_t_for_y_inverts_y_for_t() {
    let cubic = wavy_cubic();
    for i in 0..=30 {
        let y = i as f64 / 10.;
        let t = cubic.t_for_y(y);
        assert!((0. ..=1.).contains(&t));
        assert_relative_eq!(cubic.y_for_t(t), y, epsilon = 1e-9);
    }
}

#[test]
fn cubic_sub_curve_keeps_the_shape() {
    let cubic = wavy_cubic();
    let sub = cubic.sub_curve(1., 2., Direction::Decreasing);
    assert_eq!(sub.y_top(), 1.);
    assert_eq!(sub.y_bot(), 2.);
    assert_eq!(sub.direction(), Direction::Decreasing);
    for y in [1.25, 1.5, 1.75] {
        assert_relative_eq!(sub.x_for_y(y), cubic.x_for_y(y), epsilon = 1e-9);
    }
    assert_eq!(cubic.sub_curve(-1., 4., Direction::Increasing), cubic);
}

#[test]
fn curve_bounds_include_x_turns() {
    let cubic = wavy_cubic();
    let mut bb = BoundingBox::from_point(cubic.start_point());
    cubic.enlarge(&mut bb);
    assert!(bb.max().x > 1. && bb.max().x < 3.);
    assert!(bb.min().x < 1. && bb.min().x > -1.);
    assert_eq!(bb.min().y, 0.);
    assert_eq!(bb.max().y, 3.);
}

#[test]
fn insert_drops_horizontals_and_splits() {
    let mut curves = vec![];
    insert_move(&mut curves, &p(0., 0.));
    insert_line(&mut curves, &p(0., 0.), &p(5., 0.));
    assert_eq!(curves.len(), 1);
    assert!(curves[0].is_start());

    insert_quad(&mut curves, &p(0., 0.), &p(1., 2.), &p(2., 0.));
    assert_eq!(curves.len(), 3);
    assert_eq!(curves[1].direction(), Direction::Increasing);
    assert_eq!(curves[1].end_point(), p(1., 1.));
    assert_eq!(curves[2].direction(), Direction::Decreasing);
    assert_eq!(curves[2].start_point(), p(1., 1.));
    assert_eq!(curves[2].end_point(), p(2., 0.));

    // an s-shaped cubic turns twice in y
    let mut curves = vec![];
    insert_cubic(&mut curves, &p(0., 0.), &p(1., 3.), &p(2., -2.), &p(3., 1.));
    assert_eq!(curves.len(), 3);
    assert!(curves.iter().all(|c| c.y_top() < c.y_bot()));
    assert_eq!(curves[0].start_point(), p(0., 0.));
    assert_eq!(curves[2].end_point(), p(3., 1.));
    for pair in curves.windows(2) {
        assert_relative_eq!(pair[0].end_point().x, pair[1].start_point().x, epsilon = 1e-12);
    }
}

#[test]
fn crossing_lines_narrow_the_range() {
    let a: CurveSegment = Line::new(0., 0., 2., 2., Direction::Increasing).into();
    let b: CurveSegment = Line::new(2., 0., 0., 2., Direction::Increasing).into();
    let mut range = YRange::new(0., 2.);
    assert_eq!(a.compare_to(&b, &mut range), Ordering::Less);
    assert_eq!(range.end, 1.);

    let mut range = YRange::new(1., 2.);
    assert_eq!(a.compare_to(&b, &mut range), Ordering::Greater);
    assert_eq!(range.end, 2.);
}

#[test]
fn coincident_curves_compare_equal() {
    let cubic = wavy_cubic();
    let mut range = YRange::new(0., 3.);
    assert_eq!(cubic.compare_to(&cubic.reversed(), &mut range), Ordering::Equal);
    assert!(range.end > 0.);

    let line: CurveSegment = Line::new(5., 0., 5., 3., Direction::Increasing).into();
    let mut range = YRange::new(0., 3.);
    assert_eq!(cubic.compare_to(&line, &mut range), Ordering::Less);
    assert!(!range.is_empty());
}

#[test]
fn ray_crossings() {
    let line: CurveSegment = Line::new(1., 0., 1., 2., Direction::Increasing).into();
    assert_eq!(line.crossings_for(0., 1.), 1);
    assert_eq!(line.crossings_for(2., 1.), 0);
    assert_eq!(line.crossings_for(0., 2.), 0);
    assert_eq!(line.crossings_for(0., 0.), 1);

    let cubic = wavy_cubic();
    assert_eq!(cubic.crossings_for(-2., 1.5), 1);
    assert_eq!(cubic.crossings_for(4., 1.5), 0);
    let start: CurveSegment = Start::new(-5., 1.5).into();
    assert_eq!(start.crossings_for(-6., 1.5), 0);
}

#[test]
fn rectangle_crossings() {
    let line: CurveSegment = Line::new(0., -1., 0., 3., Direction::Increasing).into();
    let rect = BoundingBox::from_rect(1., 0., 1., 1.);
    let mut crossings = Crossings::new(&rect);
    assert!(!line.accumulate_crossings(&mut crossings));
    assert_eq!(crossings.ranges(), &[(0., 1.)]);

    let through: CurveSegment = Line::new(1.5, -1., 1.5, 3., Direction::Increasing).into();
    assert!(through.accumulate_crossings(&mut Crossings::new(&rect)));

    let start: CurveSegment = Start::new(1.5, 0.5).into();
    assert!(start.accumulate_crossings(&mut Crossings::new(&rect)));
}
