use std::sync::Arc;

use nalgebra::Matrix3;

use crate::{
    bounding_box::BoundingBox,
    misc::{FloatingPoint, Transformable},
    operation::{Operand, Operation, Operator},
    path::Path,
    region::Region,
    rules::{BoundsRules, Rules},
};

/// A mutable area that queues boolean operations and runs them in batches.
///
/// Operations are only executed when the result is observed, so long sequences of
/// additions or subtractions reach the [`Rules`] together and can be optimized as a whole.
///
/// # Examples
/// ```
/// use areax::prelude::*;
///
/// let mut area = Area::new();
/// for i in 0..3 {
///     area.add(Path::rectangle(i as f64 * 2., 0., 1., 1.));
/// }
/// area.subtract(Path::rectangle(0., 0., 0.5, 1.));
/// assert_eq!(area.pending(), 4);
/// assert!((area.region().area() - 2.5).abs() < 1e-12);
/// assert_eq!(area.pending(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct Area {
    region: Region,
    queue: Vec<Option<Operation>>,
    rules: Arc<dyn Rules>,
}

impl Default for Area {
    fn default() -> Self {
        Self::new()
    }
}

impl Area {
    /// An empty area using [`BoundsRules::default`].
    pub fn new() -> Self {
        Self::from_region(Region::empty())
    }

    pub fn from_region(region: Region) -> Self {
        Self {
            region,
            queue: vec![],
            rules: Arc::new(BoundsRules::default()),
        }
    }

    pub fn from_path<T: FloatingPoint>(path: &Path<T>) -> Self {
        Self::from_region(Region::from_path(path))
    }

    pub fn with_rules(mut self, rules: Arc<dyn Rules>) -> Self {
        self.rules = rules;
        self
    }

    pub fn set_rules(&mut self, rules: Arc<dyn Rules>) {
        self.rules = rules;
    }

    pub fn rules(&self) -> &Arc<dyn Rules> {
        &self.rules
    }

    /// Queue a descriptor; `None` stands for a cancelled operation.
    pub fn push(&mut self, operation: Option<Operation>) {
        self.queue.push(operation);
    }

    pub fn add(&mut self, operand: impl Into<Operand>) {
        self.push(Some(Operation::new(operand, Operator::Add)));
    }

    pub fn subtract(&mut self, operand: impl Into<Operand>) {
        self.push(Some(Operation::new(operand, Operator::Subtract)));
    }

    pub fn intersect(&mut self, operand: impl Into<Operand>) {
        self.push(Some(Operation::new(operand, Operator::Intersect)));
    }

    pub fn exclusive_or(&mut self, operand: impl Into<Operand>) {
        self.push(Some(Operation::new(operand, Operator::Xor)));
    }

    /// Number of queued descriptors.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Run every queued operation through the rules.
    pub fn process_queue(&mut self) {
        if self.queue.is_empty() {
            return;
        }
        let queue = std::mem::take(&mut self.queue);
        let region = std::mem::take(&mut self.region);
        log::debug!("processing {} queued operations", queue.len());
        self.region = self.rules.apply(region, &queue);
    }

    /// The current region, after processing the queue.
    pub fn region(&mut self) -> &Region {
        self.process_queue();
        &self.region
    }

    pub fn into_region(mut self) -> Region {
        self.process_queue();
        self.region
    }

    /// Drop all geometry and every pending operation.
    pub fn reset(&mut self) {
        self.queue.clear();
        self.region = Region::empty();
    }

    pub fn is_empty(&mut self) -> bool {
        self.region().is_empty()
    }

    pub fn bounds(&mut self) -> Option<BoundingBox> {
        self.region().bounds()
    }

    pub fn contains_point(&mut self, x: f64, y: f64) -> bool {
        self.region().contains_point(x, y)
    }
}

impl<'a> Transformable<&'a Matrix3<f64>> for Area {
    fn transform(&mut self, transform: &'a Matrix3<f64>) {
        self.process_queue();
        self.region.transform(transform);
    }
}

impl From<Region> for Area {
    fn from(value: Region) -> Self {
        Self::from_region(value)
    }
}

#[cfg(test)]
mod tests;
