use nalgebra::{Point2, Vector2};

/// An axis-aligned bounding box in 2D space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    min: Point2<f64>,
    max: Point2<f64>,
}

impl BoundingBox {
    /// Create a new bounding box from two corners in any order.
    pub fn new(a: Point2<f64>, b: Point2<f64>) -> Self {
        Self {
            min: Point2::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point2::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Create a bounding box from origin and size, like a rectangle.
    pub fn from_rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(Point2::new(x, y), Point2::new(x + width, y + height))
    }

    /// A degenerate box holding a single point.
    pub fn from_point(point: Point2<f64>) -> Self {
        Self {
            min: point,
            max: point,
        }
    }

    /// Create a new bounding box from point iterator.
    /// Returns `None` when the iterator is empty.
    pub fn new_with_points<I: IntoIterator<Item = Point2<f64>>>(iter: I) -> Option<Self> {
        let mut iter = iter.into_iter();
        let first = iter.next()?;
        let mut bb = Self::from_point(first);
        for point in iter {
            bb.enlarge(&point);
        }
        Some(bb)
    }

    pub fn min(&self) -> &Point2<f64> {
        &self.min
    }

    pub fn max(&self) -> &Point2<f64> {
        &self.max
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Point2<f64> {
        nalgebra::center(&self.min, &self.max)
    }

    pub fn size(&self) -> Vector2<f64> {
        self.max - self.min
    }

    /// Grow the box so that it includes the point.
    pub fn enlarge(&mut self, point: &Point2<f64>) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
    }

    /// The smallest box holding both boxes.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: Point2::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Point2::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }

    /// Check if the bounding box intersects with another bounding box.
    /// Boxes that only touch along an edge or a corner are reported as intersecting.
    ///
    /// # Examples
    /// ```
    /// use nalgebra::Point2;
    /// use areax::prelude::BoundingBox;
    ///
    /// let b0 = BoundingBox::new(Point2::new(0., 0.), Point2::new(1., 1.));
    /// assert!(b0.intersects(&b0, None));
    ///
    /// let b1 = BoundingBox::new(Point2::new(1., 0.), Point2::new(2., 1.));
    /// assert!(b0.intersects(&b1, None));
    ///
    /// let eps = 1e-6;
    /// let b2 = BoundingBox::new(Point2::new(1. + eps, 0.), Point2::new(2., 1.));
    /// assert!(!b0.intersects(&b2, None));
    /// ```
    pub fn intersects(&self, other: &Self, tolerance: Option<f64>) -> bool {
        let tolerance = tolerance.unwrap_or(0.);
        // Check if the bounding boxes intersect along each dimension.
        for i in 0..2 {
            let a0 = self.min[i] - tolerance;
            let a1 = self.max[i] + tolerance;
            let b0 = other.min[i] - tolerance;
            let b1 = other.max[i] + tolerance;

            let d0 = b0 - a1;
            let d1 = b1 - a0;

            // If the intervals are disjoint,
            // there is no intersection.
            if d0 * d1 > 0. {
                return false;
            }
        }

        true
    }

    /// Check if the bounding box contains a point (boundary inclusive).
    /// # Examples
    /// ```
    /// use nalgebra::Point2;
    /// use areax::prelude::BoundingBox;
    /// let bb = BoundingBox::new(Point2::new(0., 0.), Point2::new(1., 1.));
    /// assert!(bb.contains(&Point2::new(0.5, 0.5)));
    /// assert!(bb.contains(&Point2::new(0., 1.0)));
    /// assert!(!bb.contains(&Point2::new(-1e-8, 0.5)));
    /// ```
    pub fn contains(&self, point: &Point2<f64>) -> bool {
        (0..2).all(|i| self.min[i] <= point[i] && point[i] <= self.max[i])
    }

    /// Check if the other box lies entirely inside this box (boundary inclusive).
    pub fn contains_box(&self, other: &Self) -> bool {
        self.contains(&other.min) && self.contains(&other.max)
    }

    /// Get corner points of the bounding box in counter-clockwise order (y up).
    pub fn corners(&self) -> [Point2<f64>; 4] {
        [
            self.min,
            Point2::new(self.max.x, self.min.y),
            self.max,
            Point2::new(self.min.x, self.max.y),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_box() {
        let outer = BoundingBox::from_rect(0., 0., 10., 10.);
        let inner = BoundingBox::from_rect(2., 2., 3., 3.);
        assert!(outer.contains_box(&inner));
        assert!(outer.contains_box(&outer));
        assert!(!inner.contains_box(&outer));

        let overhang = BoundingBox::from_rect(8., 8., 3., 1.);
        assert!(!outer.contains_box(&overhang));
        assert!(outer.intersects(&overhang, None));
    }

    #[test]
    fn test_union_and_points() {
        let bb = BoundingBox::new_with_points(vec![
            Point2::new(1., 5.),
            Point2::new(-2., 3.),
            Point2::new(4., -1.),
        ])
        .unwrap();
        assert_eq!(bb.min(), &Point2::new(-2., -1.));
        assert_eq!(bb.max(), &Point2::new(4., 5.));
        assert!(BoundingBox::new_with_points(vec![]).is_none());

        let u = BoundingBox::from_rect(0., 0., 1., 1.).union(&BoundingBox::from_rect(3., -1., 1., 1.));
        assert_eq!(u, BoundingBox::new(Point2::new(0., -1.), Point2::new(4., 1.)));
        assert_eq!(u.width(), 4.);
        assert_eq!(u.height(), 2.);
        assert_eq!(u.center(), Point2::new(2., 0.));
    }
}
