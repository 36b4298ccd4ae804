use crate::{curve::Direction, operation::Operator};

use super::{Origin, Participation};

/// Decides, edge by edge along one strip, when the result boundary is crossed.
pub trait Classifier {
    /// Reset to the outside state at the left end of a strip.
    fn new_row(&mut self);

    /// Account for crossing one edge and report the resulting transition.
    fn classify(&mut self, origin: Origin, direction: Direction) -> Participation;

    /// Whether the scan position is currently inside the result.
    fn is_inside(&self) -> bool;
}

/// Combines two operands by the operator's truth table.
#[derive(Debug, Clone, Copy)]
pub struct Cag {
    operator: Operator,
    in_left: bool,
    in_right: bool,
    in_result: bool,
}

impl Cag {
    pub fn new(operator: Operator) -> Self {
        Self {
            operator,
            in_left: false,
            in_right: false,
            in_result: false,
        }
    }
}

impl Classifier for Cag {
    fn new_row(&mut self) {
        self.in_left = false;
        self.in_right = false;
        self.in_result = false;
    }

    fn classify(&mut self, origin: Origin, _direction: Direction) -> Participation {
        match origin {
            Origin::Left => self.in_left = !self.in_left,
            Origin::Right => self.in_right = !self.in_right,
        }
        let in_result = self.operator.includes(self.in_left, self.in_right);
        if in_result == self.in_result {
            return Participation::Ignored;
        }
        self.in_result = in_result;
        if in_result {
            Participation::Entering
        } else {
            Participation::Exiting
        }
    }

    fn is_inside(&self) -> bool {
        self.in_result
    }
}

/// Non-zero winding fill of a single raw outline.
#[derive(Debug, Clone, Copy, Default)]
pub struct NonZero {
    count: i32,
}

impl Classifier for NonZero {
    fn new_row(&mut self) {
        self.count = 0;
    }

    fn classify(&mut self, _origin: Origin, direction: Direction) -> Participation {
        let entering = self.count == 0;
        self.count += direction.winding();
        if self.count == 0 {
            Participation::Exiting
        } else if entering {
            Participation::Entering
        } else {
            Participation::Ignored
        }
    }

    fn is_inside(&self) -> bool {
        self.count != 0
    }
}

/// Even-odd fill of a single raw outline.
#[derive(Debug, Clone, Copy, Default)]
pub struct EvenOdd {
    inside: bool,
}

impl Classifier for EvenOdd {
    fn new_row(&mut self) {
        self.inside = false;
    }

    fn classify(&mut self, _origin: Origin, _direction: Direction) -> Participation {
        self.inside = !self.inside;
        if self.inside {
            Participation::Entering
        } else {
            Participation::Exiting
        }
    }

    fn is_inside(&self) -> bool {
        self.inside
    }
}
