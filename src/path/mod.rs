pub mod bounds;
pub use bounds::*;

use nalgebra::{Matrix3, Point2};

use crate::{
    bounding_box::BoundingBox,
    misc::{transform_point, FloatingPoint, Transformable},
};

/// One drawing instruction of an outline.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathCommand<T: FloatingPoint> {
    MoveTo(Point2<T>),
    LineTo(Point2<T>),
    /// Control point, end point.
    QuadTo(Point2<T>, Point2<T>),
    /// Two control points, end point.
    CubicTo(Point2<T>, Point2<T>, Point2<T>),
    Close,
}

impl<T: FloatingPoint> PathCommand<T> {
    /// All points carried by the command.
    pub fn points(&self) -> Vec<Point2<T>> {
        match self {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => vec![*p],
            PathCommand::QuadTo(c, p) => vec![*c, *p],
            PathCommand::CubicTo(c0, c1, p) => vec![*c0, *c1, *p],
            PathCommand::Close => vec![],
        }
    }

    /// Widen the coordinates to f64.
    pub fn to_sweep(&self) -> PathCommand<f64> {
        let cast = |p: &Point2<T>| Point2::new(p.x.to_sweep(), p.y.to_sweep());
        match self {
            PathCommand::MoveTo(p) => PathCommand::MoveTo(cast(p)),
            PathCommand::LineTo(p) => PathCommand::LineTo(cast(p)),
            PathCommand::QuadTo(c, p) => PathCommand::QuadTo(cast(c), cast(p)),
            PathCommand::CubicTo(c0, c1, p) => PathCommand::CubicTo(cast(c0), cast(c1), cast(p)),
            PathCommand::Close => PathCommand::Close,
        }
    }

    /// Narrow f64 coordinates to this precision.
    pub fn from_sweep(command: &PathCommand<f64>) -> Self {
        let cast = |p: &Point2<f64>| Point2::new(T::from_sweep(p.x), T::from_sweep(p.y));
        match command {
            PathCommand::MoveTo(p) => PathCommand::MoveTo(cast(p)),
            PathCommand::LineTo(p) => PathCommand::LineTo(cast(p)),
            PathCommand::QuadTo(c, p) => PathCommand::QuadTo(cast(c), cast(p)),
            PathCommand::CubicTo(c0, c1, p) => PathCommand::CubicTo(cast(c0), cast(c1), cast(p)),
            PathCommand::Close => PathCommand::Close,
        }
    }
}

/// How overlapping loops of one outline fill the plane.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FillRule {
    #[default]
    NonZero,
    EvenOdd,
}

/// Anything that can describe itself as an outline.
pub trait PathSource<T: FloatingPoint> {
    fn commands(&self) -> Vec<PathCommand<T>>;

    fn fill_rule(&self) -> FillRule {
        FillRule::NonZero
    }

    /// Bounds of the described area, if cheaply known.
    fn bounding_box(&self) -> Option<BoundingBox> {
        None
    }
}

/// A validated outline: every drawing command follows a `MoveTo`, and all coordinates are finite.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawPath<T>", into = "RawPath<T>")
)]
pub struct Path<T: FloatingPoint> {
    commands: Vec<PathCommand<T>>,
    fill_rule: FillRule,
}

/// Serialized form of [`Path`], validated on the way back in.
#[cfg(feature = "serde")]
#[derive(Clone, serde::Serialize, serde::Deserialize)]
struct RawPath<T: FloatingPoint> {
    commands: Vec<PathCommand<T>>,
    fill_rule: FillRule,
}

#[cfg(feature = "serde")]
impl<T: FloatingPoint> TryFrom<RawPath<T>> for Path<T> {
    type Error = anyhow::Error;

    fn try_from(value: RawPath<T>) -> Result<Self, Self::Error> {
        Path::try_new(value.commands, value.fill_rule)
    }
}

#[cfg(feature = "serde")]
impl<T: FloatingPoint> From<Path<T>> for RawPath<T> {
    fn from(value: Path<T>) -> Self {
        RawPath {
            commands: value.commands,
            fill_rule: value.fill_rule,
        }
    }
}

/// Cubic control point distance approximating a quarter circle of unit radius.
const KAPPA: f64 = 0.552_284_749_830_793_6;

impl<T: FloatingPoint> Path<T> {
    /// Validate a command list.
    pub fn try_new(commands: Vec<PathCommand<T>>, fill_rule: FillRule) -> anyhow::Result<Self> {
        let mut has_start = false;
        for (i, command) in commands.iter().enumerate() {
            match command {
                PathCommand::MoveTo(_) => has_start = true,
                _ => anyhow::ensure!(
                    has_start,
                    "drawing command {:?} at {} precedes the first MoveTo",
                    command,
                    i
                ),
            }
            anyhow::ensure!(
                command
                    .points()
                    .iter()
                    .all(|p| p.x.to_sweep().is_finite() && p.y.to_sweep().is_finite()),
                "non-finite coordinate in command {:?} at {}",
                command,
                i
            );
        }
        Ok(Self {
            commands,
            fill_rule,
        })
    }

    /// Trust a command list produced inside the crate.
    pub(crate) fn from_commands_unchecked(commands: Vec<PathCommand<T>>, fill_rule: FillRule) -> Self {
        Self {
            commands,
            fill_rule,
        }
    }

    /// Outline with no commands.
    pub fn empty() -> Self {
        Self {
            commands: vec![],
            fill_rule: FillRule::NonZero,
        }
    }

    /// Closed polygon through the points.
    pub fn try_polygon(points: &[Point2<T>], fill_rule: FillRule) -> anyhow::Result<Self> {
        anyhow::ensure!(!points.is_empty(), "polygon needs at least one point");
        let commands = std::iter::once(PathCommand::MoveTo(points[0]))
            .chain(points.iter().skip(1).map(|p| PathCommand::LineTo(*p)))
            .chain(std::iter::once(PathCommand::Close))
            .collect();
        Self::try_new(commands, fill_rule)
    }

    /// Axis aligned rectangle. Coordinates must be finite.
    pub fn rectangle(x: T, y: T, width: T, height: T) -> Self {
        let (x1, y1) = (x + width, y + height);
        Self {
            commands: vec![
                PathCommand::MoveTo(Point2::new(x, y)),
                PathCommand::LineTo(Point2::new(x1, y)),
                PathCommand::LineTo(Point2::new(x1, y1)),
                PathCommand::LineTo(Point2::new(x, y1)),
                PathCommand::Close,
            ],
            fill_rule: FillRule::NonZero,
        }
    }

    /// Ellipse inscribed in the rectangle, as four cubic arcs. Coordinates must be finite.
    pub fn ellipse(x: T, y: T, width: T, height: T) -> Self {
        let two = T::from_sweep(2.);
        let kappa = T::from_sweep(KAPPA);
        let (rx, ry) = (width / two, height / two);
        let (cx, cy) = (x + rx, y + ry);
        let (kx, ky) = (rx * kappa, ry * kappa);
        let p = |px: T, py: T| Point2::new(px, py);
        Self {
            commands: vec![
                PathCommand::MoveTo(p(cx + rx, cy)),
                PathCommand::CubicTo(p(cx + rx, cy + ky), p(cx + kx, cy + ry), p(cx, cy + ry)),
                PathCommand::CubicTo(p(cx - kx, cy + ry), p(cx - rx, cy + ky), p(cx - rx, cy)),
                PathCommand::CubicTo(p(cx - rx, cy - ky), p(cx - kx, cy - ry), p(cx, cy - ry)),
                PathCommand::CubicTo(p(cx + kx, cy - ry), p(cx + rx, cy - ky), p(cx + rx, cy)),
                PathCommand::Close,
            ],
            fill_rule: FillRule::NonZero,
        }
    }

    /// Copy the outline of any source, validating it.
    pub fn try_from_source<S: PathSource<T> + ?Sized>(source: &S) -> anyhow::Result<Self> {
        Self::try_new(source.commands(), source.fill_rule())
    }

    pub fn with_fill_rule(mut self, fill_rule: FillRule) -> Self {
        self.fill_rule = fill_rule;
        self
    }

    pub fn commands(&self) -> &[PathCommand<T>] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<PathCommand<T>> {
        self.commands
    }

    pub fn fill_rule(&self) -> FillRule {
        self.fill_rule
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Widen the coordinates to f64.
    pub fn to_sweep(&self) -> Path<f64> {
        Path {
            commands: self.commands.iter().map(|c| c.to_sweep()).collect(),
            fill_rule: self.fill_rule,
        }
    }
}

impl<'a> Transformable<&'a Matrix3<f64>> for PathCommand<f64> {
    fn transform(&mut self, transform: &'a Matrix3<f64>) {
        let map = |p: &mut Point2<f64>| *p = transform_point(transform, p);
        match self {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => map(p),
            PathCommand::QuadTo(c, p) => {
                map(c);
                map(p);
            }
            PathCommand::CubicTo(c0, c1, p) => {
                map(c0);
                map(c1);
                map(p);
            }
            PathCommand::Close => {}
        }
    }
}

impl<'a> Transformable<&'a Matrix3<f64>> for Path<f64> {
    fn transform(&mut self, transform: &'a Matrix3<f64>) {
        self.commands.iter_mut().for_each(|c| c.transform(transform));
    }
}

impl<T: FloatingPoint> PathSource<T> for Path<T> {
    fn commands(&self) -> Vec<PathCommand<T>> {
        self.commands.clone()
    }

    fn fill_rule(&self) -> FillRule {
        self.fill_rule
    }

    fn bounding_box(&self) -> Option<BoundingBox> {
        path_bounds(&self.commands)
    }
}
