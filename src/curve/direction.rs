use std::ops::Neg;

/// Whether a monotonic piece was drawn from top to bottom (`Increasing` y) or the reverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Increasing,
    Decreasing,
}

impl Direction {
    /// +1 for increasing, -1 for decreasing; the winding contribution of a crossing.
    pub fn winding(&self) -> i32 {
        match self {
            Direction::Increasing => 1,
            Direction::Decreasing => -1,
        }
    }
}

impl Neg for Direction {
    type Output = Direction;

    fn neg(self) -> Self::Output {
        match self {
            Direction::Increasing => Direction::Decreasing,
            Direction::Decreasing => Direction::Increasing,
        }
    }
}
