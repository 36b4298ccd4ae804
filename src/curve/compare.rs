use std::cmp::Ordering;

use crate::misc::fairly_close;

use super::CurveSegment;

/// Parameter span below which the intersection search stops subdividing.
const T_MIN: f64 = 1e-3;

/// A half-open vertical interval `[start, end)` used while ordering pieces.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct YRange {
    pub start: f64,
    pub end: f64,
}

impl YRange {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// Three way ordering of two coordinates.
pub fn order_of(x1: f64, x2: f64) -> Ordering {
    if x1 < x2 {
        Ordering::Less
    } else if x1 > x2 {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}

/// A sampled point of a curve at parameter `t`.
#[derive(Clone, Copy, Debug)]
struct Sample {
    t: f64,
    x: f64,
    y: f64,
}

impl Sample {
    fn at(curve: &CurveSegment, t: f64) -> Self {
        Self {
            t,
            x: curve.x_for_t(t),
            y: curve.y_for_t(t),
        }
    }
}

/// Subdivision stalled in floating point.
#[derive(Debug)]
struct NoProgress;

/// Bisect toward the parameter where the curve reaches `y0` from above.
pub fn refine_t_for_y(curve: &CurveSegment, mut t0: f64, y0: f64) -> f64 {
    let mut t1 = 1.;
    loop {
        let th = (t0 + t1) / 2.;
        if th == t0 || th == t1 {
            return t1;
        }
        let y = curve.y_for_t(th);
        if y < y0 {
            t0 = th;
        } else if y > y0 {
            t1 = th;
        } else {
            return t1;
        }
    }
}

fn t_at_or_below(curve: &CurveSegment, y: f64) -> f64 {
    let t = curve.t_for_y(y);
    if curve.y_for_t(t) < y {
        refine_t_for_y(curve, t, y)
    } else {
        t
    }
}

/// General ordering of two monotonic pieces.
pub fn compare_curves(a: &CurveSegment, b: &CurveSegment, yrange: &mut YRange) -> Ordering {
    let y0 = yrange.start;
    let y1 = yrange.end.min(a.y_bot()).min(b.y_bot());
    assert!(
        y1 > yrange.start,
        "backstepping from {} to {}",
        yrange.start,
        y1
    );
    yrange.end = y1;

    if a.x_max() <= b.x_min() {
        return if a.x_min() == b.x_max() {
            Ordering::Equal
        } else {
            Ordering::Less
        };
    }
    if a.x_min() >= b.x_max() {
        return Ordering::Greater;
    }

    let mut s0 = Sample::at(a, t_at_or_below(a, y0));
    let s1 = t_at_or_below(a, y1);
    let mut t0 = Sample::at(b, t_at_or_below(b, y0));
    let t1 = t_at_or_below(b, y1);

    let scale = y0.abs().max(y1.abs());
    let ymin = (scale * 1e-14).max(1e-300);

    if fairly_close(s0.x, t0.x) {
        let y = coincident_until(a, b, y0, y1, ymin);
        if y > y0 {
            if y < y1 {
                yrange.end = y;
            }
            return Ordering::Equal;
        }
    }

    while s0.t < s1 && t0.t < t1 {
        let sh = Sample::at(a, a.next_vertical(s0.t, s1));
        let th = Sample::at(b, b.next_vertical(t0.t, t1));
        match find_intersect(a, b, yrange, s0, sh, t0, th) {
            Ok(true) => break,
            Ok(false) => {}
            Err(NoProgress) => {
                log::debug!(
                    "intersection search stalled between {:?} and {:?} over {:?}",
                    a,
                    b,
                    yrange
                );
                return Ordering::Equal;
            }
        }
        if sh.y < th.y {
            if sh.y > yrange.start {
                if sh.y < yrange.end {
                    yrange.end = sh.y;
                }
                break;
            }
            s0 = sh;
        } else {
            if th.y > yrange.start {
                if th.y < yrange.end {
                    yrange.end = th.y;
                }
                break;
            }
            t0 = th;
        }
    }

    let ymid = (yrange.start + yrange.end) / 2.;
    order_of(a.x_for_y(ymid), b.x_for_y(ymid))
}

/// Walk down from `y0` with growing steps while both pieces stay fairly close in x,
/// then bisect back to the last y where they still are.
fn coincident_until(a: &CurveSegment, b: &CurveSegment, y0: f64, y1: f64, ymin: f64) -> f64 {
    let mut bump = ymin;
    let maxbump = (ymin * 1e13).min((y1 - y0) * 0.1);
    let mut y = y0 + bump;
    while y <= y1 {
        if fairly_close(a.x_for_y(y), b.x_for_y(y)) {
            bump *= 2.;
            if bump > maxbump {
                bump = maxbump;
            }
        } else {
            y -= bump;
            loop {
                bump /= 2.;
                let next = y + bump;
                if next <= y {
                    break;
                }
                if fairly_close(a.x_for_y(next), b.x_for_y(next)) {
                    y = next;
                }
            }
            break;
        }
        y += bump;
    }
    y
}

fn midpoint(curve: &CurveSegment, lo: &Sample, hi: &Sample) -> Result<Sample, NoProgress> {
    let t = (lo.t + hi.t) / 2.;
    if t == lo.t || t == hi.t {
        return Err(NoProgress);
    }
    Ok(Sample::at(curve, t))
}

/// Recursive search for the first crossing of two pieces inside `yrange`.
/// On success `yrange.end` is moved up to the crossing.
fn find_intersect(
    a: &CurveSegment,
    b: &CurveSegment,
    yrange: &mut YRange,
    s0: Sample,
    s1: Sample,
    t0: Sample,
    t1: Sample,
) -> Result<bool, NoProgress> {
    if s0.y > t1.y || t0.y > s1.y {
        return Ok(false);
    }
    if s0.x.min(s1.x) > t0.x.max(t1.x) || s0.x.max(s1.x) < t0.x.min(t1.x) {
        return Ok(false);
    }

    if s1.t - s0.t > T_MIN {
        let s = midpoint(a, &s0, &s1)?;
        if t1.t - t0.t > T_MIN {
            let t = midpoint(b, &t0, &t1)?;
            if s.y >= t0.y && t.y >= s0.y && find_intersect(a, b, yrange, s0, s, t0, t)? {
                return Ok(true);
            }
            if s.y >= t.y && find_intersect(a, b, yrange, s0, s, t, t1)? {
                return Ok(true);
            }
            if t.y >= s.y && find_intersect(a, b, yrange, s, s1, t0, t)? {
                return Ok(true);
            }
            if s1.y >= t.y && t1.y >= s.y && find_intersect(a, b, yrange, s, s1, t, t1)? {
                return Ok(true);
            }
        } else {
            if s.y >= t0.y && find_intersect(a, b, yrange, s0, s, t0, t1)? {
                return Ok(true);
            }
            if t1.y >= s.y && find_intersect(a, b, yrange, s, s1, t0, t1)? {
                return Ok(true);
            }
        }
    } else if t1.t - t0.t > T_MIN {
        let t = midpoint(b, &t0, &t1)?;
        if t.y >= s0.y && find_intersect(a, b, yrange, s0, s1, t0, t)? {
            return Ok(true);
        }
        if s1.y >= t.y && find_intersect(a, b, yrange, s0, s1, t, t1)? {
            return Ok(true);
        }
    } else {
        // both spans are short enough to treat as chords
        let xlk = s1.x - s0.x;
        let ylk = s1.y - s0.y;
        let xnm = t1.x - t0.x;
        let ynm = t1.y - t0.y;
        let xmk = t0.x - s0.x;
        let ymk = t0.y - s0.y;
        let det = xnm * ylk - ynm * xlk;
        if det != 0. {
            let s = (xnm * ymk - ynm * xmk) / det;
            let t = (xlk * ymk - ylk * xmk) / det;
            if (0. ..=1.).contains(&s) && (0. ..=1.).contains(&t) {
                let s = s0.t + s * (s1.t - s0.t);
                let t = t0.t + t * (t1.t - t0.t);
                let y = (a.y_for_t(s) + b.y_for_t(t)) / 2.;
                if y <= yrange.end && y > yrange.start {
                    yrange.end = y;
                    return Ok(true);
                }
            }
        }
    }
    Ok(false)
}
