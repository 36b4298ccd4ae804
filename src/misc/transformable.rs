use nalgebra::{Matrix3, Point2};

/// Trait for types that can be transformed by a 2D affine matrix (homogeneous 3x3).
pub trait Transformable<T>: Clone {
    fn transform(&mut self, transform: T);

    fn transformed(&self, transform: T) -> Self {
        let mut clone = self.clone();
        clone.transform(transform);
        clone
    }
}

/// Apply the affine part of a homogeneous matrix to a point.
pub fn transform_point(matrix: &Matrix3<f64>, point: &Point2<f64>) -> Point2<f64> {
    matrix.transform_point(point)
}

/// Whether the matrix is free of shear and rotation, i.e. only scales and translates.
pub fn is_axis_aligned(matrix: &Matrix3<f64>) -> bool {
    matrix[(0, 1)].abs() < 1e-7 && matrix[(1, 0)].abs() < 1e-7
}
