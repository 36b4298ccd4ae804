mod area;
mod outline;

pub use area::signed_area;

use std::{ops::Range, sync::Arc};

use nalgebra::{Matrix3, Point2};

use crate::{
    bounding_box::BoundingBox,
    crossings::Crossings,
    curve::CurveSegment,
    misc::{is_axis_aligned, transform_point, FloatingPoint, Transformable},
    operation::Operator,
    path::{FillRule, Path, PathCommand, PathSource},
    sweep::{calculate, Cag, EvenOdd, NonZero},
};

/// A validated planar region: closed, non self-intersecting contours made of
/// y-monotonic curve pieces, each contour opened by a [`CurveSegment::Start`].
///
/// Regions are immutable and cheap to clone; the curve list is shared.
///
/// # Examples
/// ```
/// use areax::prelude::*;
///
/// let a = Region::from_path(&Path::rectangle(0., 0., 1., 1.));
/// let b = Region::from_path(&Path::rectangle(2., 0., 1., 1.));
/// let union = a.add(&b);
/// assert_eq!(union.contour_count(), 2);
/// assert!((union.area() - 2.).abs() < 1e-12);
/// assert!(union.contains_point(2.5, 0.5));
/// assert!(!union.contains_point(1.5, 0.5));
/// ```
#[derive(Clone, Debug)]
pub struct Region {
    curves: Arc<[CurveSegment]>,
    bounds: Option<BoundingBox>,
}

/// Relative tolerance used when comparing region bounds for equality.
const BOUNDS_TOLERANCE: f64 = 1e-9;

/// Area below which a difference between regions is treated as rounding,
/// relative to the square of the larger extent.
const AREA_TOLERANCE: f64 = 1e-9;

/// How two regions overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relationship {
    /// The regions share no interior.
    None,
    /// The left hand side covers the right hand side.
    LhsContains,
    /// The right hand side covers the left hand side.
    RhsContains,
    /// The regions overlap partially.
    Complex,
}

impl Region {
    pub fn empty() -> Self {
        Self {
            curves: Arc::from(Vec::new()),
            bounds: None,
        }
    }

    /// Wrap curves that already form valid contours, such as the output of a sweep.
    pub(crate) fn from_curves(curves: Vec<CurveSegment>) -> Self {
        let bounds = curves.first().map(|first| {
            let mut bb = BoundingBox::from_point(first.start_point());
            curves.iter().for_each(|c| c.enlarge(&mut bb));
            bb
        });
        Self {
            curves: Arc::from(curves),
            bounds,
        }
    }

    /// Validate an outline into a region, resolving overlaps with its fill rule.
    pub fn from_path<T: FloatingPoint>(path: &Path<T>) -> Self {
        let curves = outline::to_curves(path.commands());
        let result = match path.fill_rule() {
            FillRule::NonZero => calculate(&curves, &[], NonZero::default()),
            FillRule::EvenOdd => calculate(&curves, &[], EvenOdd::default()),
        };
        Self::from_curves(result)
    }

    /// Validate the outline of any path source.
    pub fn try_from_source<T: FloatingPoint, S: PathSource<T> + ?Sized>(
        source: &S,
    ) -> anyhow::Result<Self> {
        Ok(Self::from_path(&Path::try_from_source(source)?))
    }

    pub fn curves(&self) -> &[CurveSegment] {
        &self.curves
    }

    /// `None` for the empty region.
    pub fn bounds(&self) -> Option<BoundingBox> {
        self.bounds
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    pub fn contour_count(&self) -> usize {
        self.curves.iter().filter(|c| c.is_start()).count()
    }

    /// Whether every boundary piece is a straight line.
    pub fn is_polygonal(&self) -> bool {
        self.curves.iter().all(|c| c.order() < 2)
    }

    /// Whether the region is empty or a single axis aligned rectangle.
    pub fn is_rectangular(&self) -> bool {
        match self.curves() {
            [] => true,
            [_, a, b] => {
                a.order() == 1
                    && b.order() == 1
                    && a.x_top() == a.x_bot()
                    && b.x_top() == b.x_bot()
                    && a.y_top() == b.y_top()
                    && a.y_bot() == b.y_bot()
            }
            _ => false,
        }
    }

    /// Whether the region has at most one contour.
    pub fn is_singular(&self) -> bool {
        self.curves.len() < 3 || self.curves.iter().skip(1).all(|c| !c.is_start())
    }

    /// Combine with another region by the operator.
    pub fn combine(&self, operator: Operator, other: &Region) -> Region {
        match operator {
            Operator::Add => self.add(other),
            Operator::Subtract => self.subtract(other),
            Operator::Intersect => self.intersect(other),
            Operator::Xor => self.xor(other),
        }
    }

    fn sweep(&self, operator: Operator, other: &Region) -> Region {
        Self::from_curves(calculate(&self.curves, &other.curves, Cag::new(operator)))
    }

    pub fn add(&self, other: &Region) -> Region {
        if self.is_empty() {
            return other.clone();
        }
        if other.is_empty() {
            return self.clone();
        }
        self.sweep(Operator::Add, other)
    }

    pub fn subtract(&self, other: &Region) -> Region {
        if self.is_empty() || other.is_empty() {
            return self.clone();
        }
        self.sweep(Operator::Subtract, other)
    }

    pub fn intersect(&self, other: &Region) -> Region {
        if self.is_empty() {
            return self.clone();
        }
        if other.is_empty() {
            return other.clone();
        }
        self.sweep(Operator::Intersect, other)
    }

    pub fn xor(&self, other: &Region) -> Region {
        if self.is_empty() {
            return other.clone();
        }
        if other.is_empty() {
            return self.clone();
        }
        self.sweep(Operator::Xor, other)
    }

    /// Apply one operator against every region in `operands[range]`.
    ///
    /// Additions and subtractions first unite the operands in one pass
    /// and then combine once; intersections and exclusive ors fold in order.
    pub fn merge(&self, operator: Operator, operands: &[Region], range: Range<usize>) -> Region {
        let operands = &operands[range];
        match operator {
            Operator::Add | Operator::Subtract => {
                self.combine(operator, &Region::union_all(operands))
            }
            Operator::Intersect | Operator::Xor => operands
                .iter()
                .fold(self.clone(), |acc, operand| acc.combine(operator, operand)),
        }
    }

    /// Union of many regions in a single pass.
    ///
    /// When all bounds are pairwise disjoint the contours are concatenated as they are,
    /// otherwise the concatenation is swept once under the non-zero rule.
    pub fn union_all(regions: &[Region]) -> Region {
        let regions = regions.iter().filter(|r| !r.is_empty()).collect::<Vec<_>>();
        match regions.as_slice() {
            [] => return Region::empty(),
            [single] => return (*single).clone(),
            _ => {}
        }

        let curves = regions
            .iter()
            .flat_map(|r| r.curves.iter().copied())
            .collect::<Vec<_>>();
        let disjoint = regions.iter().enumerate().all(|(i, a)| {
            regions[i + 1..]
                .iter()
                .all(|b| !intersects(&a.bounds, &b.bounds))
        });
        if disjoint {
            Self::from_curves(curves)
        } else {
            Self::from_curves(calculate(&curves, &[], NonZero::default()))
        }
    }

    /// Even-odd point containment.
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        let Some(bounds) = self.bounds else {
            return false;
        };
        if !bounds.contains(&Point2::new(x, y)) {
            return false;
        }
        let crossings: i32 = self.curves.iter().map(|c| c.crossings_for(x, y)).sum();
        crossings & 1 == 1
    }

    /// Whether the rectangle lies entirely inside the region.
    pub fn contains_rect(&self, rect: &BoundingBox) -> bool {
        let Some(bounds) = self.bounds else {
            return false;
        };
        if !bounds.contains_box(rect) {
            return false;
        }
        Crossings::find(&self.curves, rect)
            .is_some_and(|c| c.covers(rect.min().y, rect.max().y))
    }

    /// Whether the rectangle shares any interior with the region.
    pub fn intersects_rect(&self, rect: &BoundingBox) -> bool {
        let Some(bounds) = self.bounds else {
            return false;
        };
        if !bounds.intersects(rect, None) {
            return false;
        }
        match Crossings::find(&self.curves, rect) {
            Some(crossings) => !crossings.is_empty(),
            None => true,
        }
    }

    /// How `other` sits relative to this region.
    ///
    /// Equal regions report [`Relationship::LhsContains`]; regions touching only
    /// along their boundaries report [`Relationship::None`].
    pub fn relationship(&self, other: &Region) -> Relationship {
        if !intersects(&self.bounds, &other.bounds) {
            return Relationship::None;
        }
        let scale = extent(&self.bounds, &other.bounds);
        if self.intersect(other).is_negligible(scale) {
            return Relationship::None;
        }
        if other.subtract(self).is_negligible(scale) {
            Relationship::LhsContains
        } else if self.subtract(other).is_negligible(scale) {
            Relationship::RhsContains
        } else {
            Relationship::Complex
        }
    }

    /// Whether this region covers all of `other`. An empty `other` is never contained.
    pub fn contains(&self, other: &Region) -> bool {
        self.relationship(other) == Relationship::LhsContains
    }

    /// Whether the regions share any interior.
    pub fn intersects(&self, other: &Region) -> bool {
        self.relationship(other) != Relationship::None
    }

    /// Empty, or a sliver left by rounding at the given extent.
    fn is_negligible(&self, scale: f64) -> bool {
        self.is_empty() || self.area() <= AREA_TOLERANCE * scale * scale
    }

    /// Pure positive scaling with translation maps the pieces directly; anything else
    /// re-validates the transformed outline.
    fn mapped(&self, matrix: &Matrix3<f64>) -> Region {
        if self.is_empty() {
            return self.clone();
        }
        if is_axis_aligned(matrix) && matrix[(0, 0)] > 0. && matrix[(1, 1)] > 0. {
            let curves = self
                .curves
                .iter()
                .map(|c| c.map_points(|p| transform_point(matrix, p)))
                .collect::<Vec<_>>();
            // rounding may collapse a piece to zero height
            let collapsed = curves
                .iter()
                .any(|c| !c.is_start() && c.y_top() >= c.y_bot());
            if !collapsed {
                return Self::from_curves(curves);
            }
        }
        let mut path = self.to_path();
        path.transform(matrix);
        Self::from_path(&path)
    }

    /// Outline of the region, closing each contour.
    pub fn path_commands(&self) -> Vec<PathCommand<f64>> {
        outline::to_commands(&self.curves)
    }

    pub fn to_path(&self) -> Path<f64> {
        Path::from_commands_unchecked(self.path_commands(), FillRule::NonZero)
    }
}

fn intersects(a: &Option<BoundingBox>, b: &Option<BoundingBox>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.intersects(b, None),
        _ => false,
    }
}

/// Largest side of either box, at least one.
fn extent(a: &Option<BoundingBox>, b: &Option<BoundingBox>) -> f64 {
    [a, b]
        .into_iter()
        .flatten()
        .flat_map(|bb| [bb.width(), bb.height()])
        .fold(1., f64::max)
}

fn bounds_close(a: &BoundingBox, b: &BoundingBox, scale: f64) -> bool {
    let tolerance = scale * BOUNDS_TOLERANCE;
    (a.min() - b.min()).amax() <= tolerance && (a.max() - b.max()).amax() <= tolerance
}

impl Default for Region {
    fn default() -> Self {
        Self::empty()
    }
}

/// Two regions are equal when they cover the same area: their bounds agree and
/// their exclusive or leaves at most rounding slivers.
impl PartialEq for Region {
    fn eq(&self, other: &Self) -> bool {
        if Arc::ptr_eq(&self.curves, &other.curves) {
            return true;
        }
        match (&self.bounds, &other.bounds) {
            (None, None) => true,
            (Some(a), Some(b)) => {
                let scale = extent(&self.bounds, &other.bounds);
                bounds_close(a, b, scale) && self.xor(other).is_negligible(scale)
            }
            (Some(_), None) => self.is_negligible(extent(&self.bounds, &None)),
            (None, Some(_)) => other.is_negligible(extent(&other.bounds, &None)),
        }
    }
}

impl<'a> Transformable<&'a Matrix3<f64>> for Region {
    fn transform(&mut self, transform: &'a Matrix3<f64>) {
        *self = self.mapped(transform);
    }
}

impl PathSource<f64> for Region {
    fn commands(&self) -> Vec<PathCommand<f64>> {
        self.path_commands()
    }

    fn bounding_box(&self) -> Option<BoundingBox> {
        self.bounds
    }
}

impl<T: FloatingPoint> From<&Path<T>> for Region {
    fn from(value: &Path<T>) -> Self {
        Region::from_path(value)
    }
}

#[cfg(test)]
mod tests;
