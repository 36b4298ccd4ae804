use std::{fmt::Display, str::FromStr, sync::OnceLock};

use crate::{
    bounding_box::BoundingBox,
    misc::FloatingPoint,
    path::{Path, PathSource},
    region::Region,
};

/// Boolean operator applied between a region and an operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Intersect,
    Xor,
}

impl Operator {
    pub const ALL: [Operator; 4] = [
        Operator::Add,
        Operator::Subtract,
        Operator::Intersect,
        Operator::Xor,
    ];

    /// Truth table: is a point inside the result, given whether it is inside the left
    /// and the right operand?
    pub fn includes(&self, in_left: bool, in_right: bool) -> bool {
        match self {
            Operator::Add => in_left || in_right,
            Operator::Subtract => in_left && !in_right,
            Operator::Intersect => in_left && in_right,
            Operator::Xor => in_left != in_right,
        }
    }
}

impl TryFrom<i32> for Operator {
    type Error = anyhow::Error;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Operator::Add),
            1 => Ok(Operator::Subtract),
            2 => Ok(Operator::Intersect),
            3 => Ok(Operator::Xor),
            _ => anyhow::bail!("unrecognized operator code: {}", value),
        }
    }
}

impl From<Operator> for i32 {
    fn from(value: Operator) -> Self {
        match value {
            Operator::Add => 0,
            Operator::Subtract => 1,
            Operator::Intersect => 2,
            Operator::Xor => 3,
        }
    }
}

impl FromStr for Operator {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "add" | "union" => Ok(Operator::Add),
            "subtract" | "difference" => Ok(Operator::Subtract),
            "intersect" | "intersection" => Ok(Operator::Intersect),
            "xor" | "exclusive_or" => Ok(Operator::Xor),
            _ => anyhow::bail!("unrecognized operator: {:?}", s),
        }
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operator::Add => write!(f, "Add"),
            Operator::Subtract => write!(f, "Subtract"),
            Operator::Intersect => write!(f, "Intersect"),
            Operator::Xor => write!(f, "Xor"),
        }
    }
}

/// Right hand side of an operation: either an already validated region or a raw outline.
#[derive(Debug, Clone)]
pub enum Operand {
    Region(Region),
    Path(Path<f64>),
}

impl From<Region> for Operand {
    fn from(value: Region) -> Self {
        Operand::Region(value)
    }
}

impl Operand {
    /// Copy and validate the outline of any path source, widening it to f64.
    pub fn try_from_source<T: FloatingPoint, S: PathSource<T> + ?Sized>(
        source: &S,
    ) -> anyhow::Result<Self> {
        Ok(Path::try_from_source(source)?.into())
    }
}

impl<T: FloatingPoint> From<Path<T>> for Operand {
    fn from(value: Path<T>) -> Self {
        Operand::Path(value.to_sweep())
    }
}

/// An immutable `(operand, operator)` pair, queued against a region.
#[derive(Debug, Clone)]
pub struct Operation {
    operand: Operand,
    operator: Operator,
    bounds: OnceLock<Option<BoundingBox>>,
}

impl Operation {
    pub fn new(operand: impl Into<Operand>, operator: Operator) -> Self {
        Self {
            operand: operand.into(),
            operator,
            bounds: OnceLock::new(),
        }
    }

    /// Build from a raw operator code.
    pub fn try_new(operand: impl Into<Operand>, operator: i32) -> anyhow::Result<Self> {
        Ok(Self::new(operand, Operator::try_from(operator)?))
    }

    pub fn operand(&self) -> &Operand {
        &self.operand
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    /// Bounds of the operand, computed once. `None` for an empty operand.
    pub fn bounds(&self) -> Option<BoundingBox> {
        *self.bounds.get_or_init(|| match &self.operand {
            Operand::Region(region) => region.bounds(),
            Operand::Path(path) => path.bounding_box(),
        })
    }

    /// The operand as a region, sweeping a raw outline when necessary.
    pub fn region(&self) -> Region {
        match &self.operand {
            Operand::Region(region) => region.clone(),
            Operand::Path(path) => Region::from_path(path),
        }
    }
}
