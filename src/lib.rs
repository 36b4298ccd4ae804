#![allow(clippy::needless_range_loop)]

mod area;
mod bounding_box;
mod crossings;
mod curve;
mod misc;
mod operation;
mod path;
mod region;
mod rules;
mod sweep;

pub mod prelude {
    pub use crate::area::*;
    pub use crate::bounding_box::*;
    pub use crate::crossings::*;
    pub use crate::curve::*;
    pub use crate::misc::*;
    pub use crate::operation::*;
    pub use crate::path::*;
    pub use crate::region::*;
    pub use crate::rules::*;
    pub use crate::sweep::{calculate, Cag, Classifier, EvenOdd, NonZero, Origin, Participation};
}
