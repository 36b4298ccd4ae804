use std::f64::consts::{FRAC_PI_2, PI};

use approx::assert_relative_eq;
use nalgebra::{Matrix3, Point2};

use crate::{
    bounding_box::BoundingBox,
    misc::Transformable,
    operation::Operator,
    path::{FillRule, Path, PathCommand},
};

use super::*;

fn square(x: f64, y: f64, size: f64) -> Region {
    Region::from_path(&Path::rectangle(x, y, size, size))
}

#[test]
fn from_path_validates() {
    let region = square(0., 0., 1.);
    assert_eq!(region.curves().len(), 3);
    assert_eq!(region.contour_count(), 1);
    assert_eq!(region.bounds(), Some(BoundingBox::from_rect(0., 0., 1., 1.)));
    assert!(region.is_polygonal());
    assert!(region.is_rectangular());
    assert!(region.is_singular());
    assert_relative_eq!(region.area(), 1.);

    assert!(Region::from_path(&Path::<f64>::empty()).is_empty());
    assert!(Region::empty().is_rectangular());
    assert!(Region::empty().bounds().is_none());
}

#[test]
fn path_commands_close_every_contour() {
    let commands = square(0., 0., 1.).path_commands();
    assert_eq!(
        commands,
        vec![
            PathCommand::MoveTo(Point2::new(0., 0.)),
            PathCommand::LineTo(Point2::new(0., 1.)),
            PathCommand::LineTo(Point2::new(1., 1.)),
            PathCommand::LineTo(Point2::new(1., 0.)),
            PathCommand::Close,
        ]
    );

    let two = square(0., 0., 1.).add(&square(2., 0., 1.));
    let closes = two
        .path_commands()
        .iter()
        .filter(|c| matches!(c, PathCommand::Close))
        .count();
    assert_eq!(closes, 2);
    assert!(Region::empty().path_commands().is_empty());
}

#[test]
fn disjoint_union() {
    let union = square(0., 0., 1.).add(&square(2., 0., 1.));
    assert_eq!(union.contour_count(), 2);
    assert!(!union.is_singular());
    assert!(!union.is_rectangular());
    assert_relative_eq!(union.area(), 2.);
    assert_eq!(union.bounds(), Some(BoundingBox::from_rect(0., 0., 3., 1.)));
}

#[test]
fn overlapping_intersections() {
    let a = square(0., 0., 1.);

    let half = a.intersect(&square(0.5, 0., 1.));
    assert_eq!(half.contour_count(), 1);
    assert_relative_eq!(half.area(), 0.5);
    assert!(half.is_rectangular());

    let quarter = a.intersect(&square(0.5, 0.5, 1.));
    assert_eq!(quarter.contour_count(), 1);
    assert_relative_eq!(quarter.area(), 0.25);
    assert_eq!(
        quarter.bounds(),
        Some(BoundingBox::from_rect(0.5, 0.5, 0.5, 0.5))
    );
}

#[test]
fn overlapping_union_is_one_rectangle() {
    let union = square(0., 0., 1.).add(&square(0.5, 0., 1.));
    assert!(union.is_rectangular());
    assert_relative_eq!(union.area(), 1.5);
}

#[test]
fn subtract_leaves_a_hole() {
    let outer = square(0., 0., 4.);
    let ring = outer.subtract(&square(1., 1., 2.));
    assert_eq!(ring.contour_count(), 2);
    assert_relative_eq!(ring.area(), 12.);
    assert!(ring.contains_point(0.5, 0.5));
    assert!(!ring.contains_point(2., 2.));
    assert_eq!(ring.bounds(), outer.bounds());
}

#[test]
fn xor_of_overlap() {
    let xor = square(0., 0., 1.).xor(&square(0.5, 0., 1.));
    assert_eq!(xor.contour_count(), 2);
    assert_relative_eq!(xor.area(), 1.);
    assert!(!xor.contains_point(0.75, 0.5));
    assert!(xor.contains_point(0.25, 0.5));
    assert!(xor.contains_point(1.25, 0.5));
}

#[test]
fn idempotent_with_self() {
    let shapes = [
        square(0., 0., 1.),
        square(0., 0., 1.).add(&square(3., 3., 1.)),
        Region::from_path(&Path::ellipse(0., 0., 4., 2.)),
    ];
    for shape in shapes {
        assert_eq!(shape.intersect(&shape), shape);
        assert_eq!(shape.add(&shape), shape);
        assert!(shape.xor(&shape).is_empty());
        assert!(shape.subtract(&shape).is_empty());
    }
}

#[test]
fn idempotent_on_self_crossing_outlines() {
    let star = |points: &[(f64, f64)]| {
        let points = points
            .iter()
            .map(|(x, y)| Point2::new(*x, *y))
            .collect::<Vec<_>>();
        Region::from_path(&Path::try_polygon(&points, FillRule::EvenOdd).unwrap())
    };
    let shapes = [
        star(&[(0., 0.), (10., 3.), (2., 9.), (5., -1.), (9., 8.)]),
        star(&[(0., 0.), (4., 4.), (4., 0.), (0., 4.)]),
        star(&[(0.5, 0.25), (7.3, 6.1), (1.2, 5.9), (6.6, 0.4), (3.1, 8.75)]),
    ];
    for shape in shapes {
        assert!(!shape.is_empty());
        assert_eq!(shape.intersect(&shape), shape);
        assert_eq!(shape.add(&shape), shape);
        assert!(shape.subtract(&shape).area() < 1e-9);
        assert!(shape.xor(&shape).area() < 1e-9);
    }
}

#[test]
fn rounding_slivers_do_not_break_equality() {
    let a = square(0., 0., 9.);
    let nudged = Region::from_path(&Path::rectangle(0., 0., 9., 9. - 2e-15));
    assert_eq!(a, nudged);
    let thin = Region::from_path(&Path::rectangle(0., 0., 9., 8.99));
    assert_ne!(a, thin);
}

#[test]
fn relationships() {
    let outer = square(0., 0., 4.);
    let inner = Region::from_path(&Path::ellipse(1., 1., 2., 2.));
    let partial = square(3., 3., 2.);
    let far = square(10., 10., 1.);
    let touching = square(4., 0., 1.);

    assert_eq!(outer.relationship(&inner), Relationship::LhsContains);
    assert_eq!(inner.relationship(&outer), Relationship::RhsContains);
    assert_eq!(outer.relationship(&partial), Relationship::Complex);
    assert_eq!(outer.relationship(&far), Relationship::None);
    assert_eq!(outer.relationship(&touching), Relationship::None);
    assert_eq!(outer.relationship(&Region::empty()), Relationship::None);
    assert_eq!(outer.relationship(&outer.clone()), Relationship::LhsContains);

    assert!(outer.contains(&inner));
    assert!(!inner.contains(&outer));
    assert!(!outer.contains(&partial));
    assert!(outer.intersects(&partial));
    assert!(inner.intersects(&outer));
    assert!(!outer.intersects(&far));
    assert!(!outer.intersects(&touching));

    // a hole around the inner shape separates it from the outer ring
    let ring = outer.subtract(&square(0.5, 0.5, 3.));
    assert_eq!(ring.relationship(&inner), Relationship::None);
    assert_eq!(ring.relationship(&square(0., 0., 1.)), Relationship::Complex);
}

#[test]
fn add_commutes() {
    let a = square(0., 0., 2.);
    let b = square(1., 1., 2.).add(&square(-1., 3., 1.));
    let ab = a.add(&b);
    let ba = b.add(&a);
    assert_eq!(ab, ba);
    assert_relative_eq!(ab.area(), 8.);

    let c = Region::from_path(&Path::ellipse(1., 1., 2., 3.));
    assert_relative_eq!(a.add(&c).area(), c.add(&a).area(), epsilon = 1e-9);
}

#[test]
fn empty_short_cuts() {
    let a = square(0., 0., 1.);
    let empty = Region::empty();
    assert_eq!(a.add(&empty), a);
    assert_eq!(empty.add(&a), a);
    assert_eq!(a.subtract(&empty), a);
    assert!(empty.subtract(&a).is_empty());
    assert!(a.intersect(&empty).is_empty());
    assert!(empty.intersect(&a).is_empty());
    assert_eq!(a.xor(&empty), a);
    assert_eq!(empty.xor(&a), a);
    for op in Operator::ALL {
        assert!(empty.combine(op, &empty).is_empty());
    }
}

#[test]
fn equality_is_coverage() {
    let whole = square(0., 0., 2.);
    let halves = Region::from_path(&Path::rectangle(0., 0., 1., 2.))
        .add(&Region::from_path(&Path::rectangle(1., 0., 1., 2.)));
    assert_eq!(whole, halves);
    assert_ne!(whole, square(0., 0., 1.));
    assert_ne!(whole, Region::empty());
    assert_eq!(Region::empty(), Region::default());
}

#[test]
fn fill_rules() {
    let points = [
        (0., 0.),
        (3., 0.),
        (3., 3.),
        (0., 3.),
        (0., 0.),
        (1., 1.),
        (1., 2.),
        (2., 2.),
        (2., 1.),
        (1., 1.),
    ]
    .map(|(x, y)| Point2::new(x, y));

    // the inner loop winds the other way, so both rules cut a hole
    let reversed = Region::from_path(&Path::try_polygon(&points, FillRule::NonZero).unwrap());
    assert_relative_eq!(reversed.area(), 8.);

    let same_way = [
        (0., 0.),
        (3., 0.),
        (3., 3.),
        (0., 3.),
        (0., 0.),
        (1., 1.),
        (2., 1.),
        (2., 2.),
        (1., 2.),
        (1., 1.),
    ]
    .map(|(x, y)| Point2::new(x, y));
    let non_zero = Region::from_path(&Path::try_polygon(&same_way, FillRule::NonZero).unwrap());
    assert_relative_eq!(non_zero.area(), 9.);
    let even_odd = Region::from_path(&Path::try_polygon(&same_way, FillRule::EvenOdd).unwrap());
    assert_relative_eq!(even_odd.area(), 8.);
    assert_eq!(even_odd, reversed);
}

#[test]
fn ellipse_area() {
    let circle = Region::from_path(&Path::ellipse(-1., -1., 2., 2.));
    assert!(!circle.is_polygonal());
    assert!(circle.is_singular());
    assert_relative_eq!(circle.area(), PI, max_relative = 1e-3);
    let bb = circle.bounds().unwrap();
    assert_relative_eq!(bb.min().x, -1., epsilon = 1e-12);
    assert_relative_eq!(bb.max().y, 1., epsilon = 1e-12);

    let f32_circle = Region::from_path(&Path::<f32>::ellipse(-1., -1., 2., 2.));
    assert_relative_eq!(f32_circle.area(), PI, max_relative = 1e-3);
}

#[test]
fn point_and_rect_queries() {
    let ring = square(0., 0., 4.).subtract(&square(1., 1., 2.));
    assert!(ring.contains_point(0.5, 2.));
    assert!(!ring.contains_point(5., 2.));
    assert!(!Region::empty().contains_point(0., 0.));

    assert!(ring.contains_rect(&BoundingBox::from_rect(0.1, 0.1, 0.5, 3.5)));
    assert!(!ring.contains_rect(&BoundingBox::from_rect(0.5, 0.5, 2., 2.)));
    assert!(!ring.contains_rect(&BoundingBox::from_rect(1.2, 1.2, 1., 1.)));
    assert!(!ring.contains_rect(&BoundingBox::from_rect(-1., 0., 0.5, 0.5)));

    assert!(ring.intersects_rect(&BoundingBox::from_rect(0.5, 0.5, 2., 2.)));
    assert!(ring.intersects_rect(&BoundingBox::from_rect(0.1, 0.1, 0.5, 0.5)));
    assert!(!ring.intersects_rect(&BoundingBox::from_rect(1.2, 1.2, 1., 1.)));
    assert!(!ring.intersects_rect(&BoundingBox::from_rect(5., 5., 1., 1.)));
    assert!(!Region::empty().intersects_rect(&BoundingBox::from_rect(0., 0., 1., 1.)));
}

#[test]
fn scale_and_translate_maps_pieces() {
    let circle = Region::from_path(&Path::ellipse(0., 0., 2., 2.));
    let m = Matrix3::new(2., 0., 1., 0., 3., -1., 0., 0., 1.);
    let stretched = circle.transformed(&m);
    assert_eq!(stretched.curves().len(), circle.curves().len());
    assert_relative_eq!(stretched.area(), circle.area() * 6., max_relative = 1e-9);
    let bb = stretched.bounds().unwrap();
    assert_relative_eq!(bb.min().x, 1., epsilon = 1e-9);
    assert_relative_eq!(bb.max().y, 5., epsilon = 1e-9);
}

#[test]
fn rotation_re_validates() {
    let mut region = Region::from_path(&Path::rectangle(0., 0., 2., 1.));
    region.transform(&Matrix3::new_rotation(FRAC_PI_2));
    assert_eq!(region.contour_count(), 1);
    assert_relative_eq!(region.area(), 2., epsilon = 1e-9);
    assert!(region.contains_point(-0.5, 1.5));
    assert!(!region.contains_point(0.5, 0.5));

    // mirroring flips the winding, which the re-sweep absorbs
    let mirror = Matrix3::new(-1., 0., 0., 0., 1., 0., 0., 0., 1.);
    let mirrored = square(0., 0., 1.).transformed(&mirror);
    assert_eq!(mirrored, square(-1., 0., 1.));
    assert!(Region::empty().transformed(&Matrix3::identity()).is_empty());
}

#[test]
fn path_round_trip() {
    let region = square(0., 0., 2.)
        .subtract(&Region::from_path(&Path::ellipse(0.5, 0.5, 1., 1.)))
        .add(&square(5., 0., 1.));
    let again = Region::from_path(&region.to_path());
    assert_eq!(again, region);
    assert_eq!(again.contour_count(), region.contour_count());
    assert_relative_eq!(again.area(), region.area(), epsilon = 1e-9);

    let from_source = Region::try_from_source(&region).unwrap();
    assert_eq!(from_source, region);
}

#[test]
fn merge_runs() {
    let base = square(0., 0., 10.);
    let holes = [square(1., 1., 1.), square(3., 1., 1.), square(5., 5., 2.)];

    let merged = base.merge(Operator::Subtract, &holes, 0..3);
    let sequential = holes.iter().fold(base.clone(), |acc, h| acc.subtract(h));
    assert_eq!(merged, sequential);
    assert_eq!(merged.contour_count(), 4);

    let partial = base.merge(Operator::Subtract, &holes, 1..2);
    assert_relative_eq!(partial.area(), 99.);

    let intersected = base.merge(Operator::Intersect, &holes, 0..2);
    assert!(intersected.is_empty());
    let xored = base.merge(Operator::Xor, &holes, 0..3);
    assert_eq!(xored, sequential);
}

#[test]
fn union_all_overlapping_and_disjoint() {
    let disjoint = [square(0., 0., 1.), square(2., 0., 1.), square(4., 0., 1.)];
    let union = Region::union_all(&disjoint);
    assert_eq!(union.contour_count(), 3);
    assert_relative_eq!(union.area(), 3.);

    let overlapping = [square(0., 0., 2.), square(1., 1., 2.), Region::empty()];
    let union = Region::union_all(&overlapping);
    assert_eq!(union.contour_count(), 1);
    assert_relative_eq!(union.area(), 7.);
    assert_eq!(union, overlapping[0].add(&overlapping[1]));

    // touching bounds are not disjoint, so the shared edge is swept away
    let touching = Region::union_all(&[square(0., 0., 1.), square(1., 0., 1.)]);
    assert!(touching.is_rectangular());

    assert!(Region::union_all(&[]).is_empty());
}
