#![cfg(feature = "serde")]

use areax::prelude::{FillRule, Path, Region};
use nalgebra::Point2;

#[test]
fn test_serialization() {
    let path = Path::ellipse(0., 0., 2., 1.).with_fill_rule(FillRule::EvenOdd);
    let json = serde_json::to_string_pretty(&path).unwrap();
    let back: Path<f64> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, path);
    assert_eq!(Region::from_path(&back), Region::from_path(&path));
}

#[test]
fn test_invalid_path_is_rejected() {
    let path = Path::try_polygon(
        &[Point2::new(0f32, 0.), Point2::new(1., 0.), Point2::new(0., 1.)],
        FillRule::NonZero,
    )
    .unwrap();
    let json = serde_json::to_string(&path).unwrap();
    // drop the leading MoveTo
    let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
    value["commands"].as_array_mut().unwrap().remove(0);
    assert!(serde_json::from_value::<Path<f32>>(value).is_err());
}
