pub mod floating_point;
pub mod orientation;
pub mod roots;
pub mod transformable;

pub use floating_point::*;
pub use orientation::*;
pub use roots::*;
pub use transformable::*;
