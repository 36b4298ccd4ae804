use nalgebra::Point2;
use robust::{orient2d, Coord};

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub enum Orientation {
    CounterClockwise,
    Clockwise,
    Collinear,
}

/// Robust orientation test for three points.
/// implementation from geo crate. (https://github.com/georust/geo)
pub fn orientation(p: &Point2<f64>, q: &Point2<f64>, r: &Point2<f64>) -> Orientation {
    let orientation = orient2d(
        Coord { x: p.x, y: p.y },
        Coord { x: q.x, y: q.y },
        Coord { x: r.x, y: r.y },
    );

    if orientation < 0. {
        Orientation::Clockwise
    } else if orientation > 0. {
        Orientation::CounterClockwise
    } else {
        Orientation::Collinear
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation() {
        let top = Point2::new(0., 0.);
        let bottom = Point2::new(0., 1.);
        assert_eq!(
            orientation(&top, &bottom, &Point2::new(-1., 0.5)),
            Orientation::CounterClockwise
        );
        assert_eq!(
            orientation(&top, &bottom, &Point2::new(1., 0.5)),
            Orientation::Clockwise
        );
        assert_eq!(
            orientation(&top, &bottom, &Point2::new(0., 3.)),
            Orientation::Collinear
        );
    }
}
