use std::sync::Arc;

use approx::assert_relative_eq;
use nalgebra::Matrix3;

use crate::{
    bounding_box::BoundingBox,
    misc::Transformable,
    operation::{Operation, Operator},
    path::Path,
    region::Region,
    rules::SequentialRules,
};

use super::*;

#[test]
fn operations_wait_for_the_result() {
    let mut area = Area::new();
    area.add(Path::rectangle(0., 0., 2., 2.));
    area.add(Region::from_path(&Path::rectangle(1., 1., 2., 2.)));
    area.push(None);
    area.subtract(Path::rectangle(0., 0., 1., 1.));
    assert_eq!(area.pending(), 4);

    assert_relative_eq!(area.region().area(), 6.);
    assert_eq!(area.pending(), 0);
    assert!(area.contains_point(2.5, 2.5));
    assert!(!area.contains_point(0.5, 0.5));
    assert_eq!(area.bounds(), Some(BoundingBox::from_rect(0., 0., 3., 3.)));
}

#[test]
fn intersect_and_exclusive_or() {
    let mut area = Area::from_path(&Path::rectangle(0., 0., 1., 1.));
    area.intersect(Path::rectangle(0.5, 0.5, 1., 1.));
    assert_relative_eq!(area.region().area(), 0.25);

    area.exclusive_or(Path::rectangle(0., 0., 1., 1.));
    assert_relative_eq!(area.region().area(), 0.75);
    assert!(!area.contains_point(0.75, 0.75));
    assert!(area.contains_point(0.25, 0.25));
}

#[test]
fn reset_clears_queue_and_geometry() {
    let mut area = Area::from_path(&Path::rectangle(0., 0., 1., 1.));
    area.add(Path::rectangle(2., 0., 1., 1.));
    area.reset();
    assert_eq!(area.pending(), 0);
    assert!(area.is_empty());
    assert!(area.bounds().is_none());
}

#[test]
fn rules_can_be_swapped() {
    let ops = [
        (Path::rectangle(0., 0., 4., 4.), Operator::Add),
        (Path::rectangle(1., 1., 1., 1.), Operator::Add),
        (Path::rectangle(6., 0., 1., 1.), Operator::Add),
        (Path::rectangle(2., 2., 1., 1.), Operator::Subtract),
    ];
    let mut optimized = Area::new();
    let mut sequential = Area::new().with_rules(Arc::new(SequentialRules));
    for (path, operator) in ops {
        optimized.push(Some(Operation::new(path.clone(), operator)));
        sequential.push(Some(Operation::new(path, operator)));
    }
    assert_eq!(optimized.region(), sequential.region());

    optimized.set_rules(Arc::new(SequentialRules));
    assert!(format!("{:?}", optimized.rules()).contains("SequentialRules"));
}

#[test]
fn transform_applies_pending_operations() {
    let mut area = Area::new();
    area.add(Path::rectangle(0., 0., 1., 1.));
    area.transform(&Matrix3::new(2., 0., 1., 0., 2., 0., 0., 0., 1.));
    assert_eq!(area.pending(), 0);
    assert_eq!(area.bounds(), Some(BoundingBox::from_rect(1., 0., 2., 2.)));

    let region = area.into_region();
    assert_relative_eq!(region.area(), 4.);
    let back = Area::from(region.clone()).into_region();
    assert_eq!(back, region);
}
