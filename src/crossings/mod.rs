use crate::{bounding_box::BoundingBox, curve::CurveSegment};

/// Even-odd accumulation of the y-ranges covered by boundary pieces lying to the
/// left of a rectangle.
///
/// The rectangle is inside the region when, after all pieces are recorded, exactly one
/// range remains and it spans the rectangle's full height.
#[derive(Clone, Debug)]
pub struct Crossings {
    xlo: f64,
    ylo: f64,
    xhi: f64,
    yhi: f64,
    /// Sorted, disjoint `[start, end]` pairs.
    ranges: Vec<(f64, f64)>,
}

impl Crossings {
    pub fn new(rect: &BoundingBox) -> Self {
        Self {
            xlo: rect.min().x,
            ylo: rect.min().y,
            xhi: rect.max().x,
            yhi: rect.max().y,
            ranges: vec![],
        }
    }

    /// Walk the pieces against the rectangle.
    /// Returns `None` when a piece passes through the rectangle's interior.
    pub fn find(curves: &[CurveSegment], rect: &BoundingBox) -> Option<Self> {
        let mut crossings = Self::new(rect);
        for curve in curves {
            if curve.accumulate_crossings(&mut crossings) {
                return None;
            }
        }
        Some(crossings)
    }

    /// `(xlo, ylo, xhi, yhi)`
    pub fn rect(&self) -> (f64, f64, f64, f64) {
        (self.xlo, self.ylo, self.xhi, self.yhi)
    }

    pub fn ranges(&self) -> &[(f64, f64)] {
        &self.ranges
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Whether a single recorded range spans `[ystart, yend]`.
    pub fn covers(&self, ystart: f64, yend: f64) -> bool {
        match self.ranges.as_slice() {
            [(lo, hi)] => *lo <= ystart && *hi >= yend,
            _ => false,
        }
    }

    /// Toggle coverage of `[ystart, yend]`; overlapping parts cancel out and
    /// abutting parts fuse.
    pub fn record(&mut self, ystart: f64, yend: f64) {
        if ystart >= yend {
            return;
        }
        let (mut ystart, mut yend) = (ystart, yend);
        let skip = self
            .ranges
            .iter()
            .position(|(_, hi)| ystart <= *hi)
            .unwrap_or(self.ranges.len());
        let mut merged = self.ranges[..skip].to_vec();

        let mut from = skip;
        while from < self.ranges.len() {
            let (lo, hi) = self.ranges[from];
            from += 1;
            if yend < lo {
                merged.push((ystart, yend));
                (ystart, yend) = (lo, hi);
                continue;
            }
            let (yll, mut ylh) = if ystart < lo { (ystart, lo) } else { (lo, ystart) };
            let (mut yhl, yhh) = if yend < hi { (yend, hi) } else { (hi, yend) };
            if ylh == yhl {
                (ystart, yend) = (yll, yhh);
            } else {
                if ylh > yhl {
                    std::mem::swap(&mut ylh, &mut yhl);
                }
                if yll != ylh {
                    merged.push((yll, ylh));
                }
                (ystart, yend) = (yhl, yhh);
            }
            if ystart >= yend {
                break;
            }
        }
        merged.extend_from_slice(&self.ranges[from..]);
        if ystart < yend {
            merged.push((ystart, yend));
        }
        self.ranges = merged;
    }
}
