use crate::curve::{CurveSegment, Start};

use super::Participation;

/// A fragment `[ytop, ybot]` of one curve taking part in the result.
#[derive(Debug, Clone)]
pub struct CurveLink {
    curve: usize,
    ytop: f64,
    ybot: f64,
    participation: Participation,
    next: Option<usize>,
}

impl CurveLink {
    pub fn curve(&self) -> usize {
        self.curve
    }

    pub fn ytop(&self) -> f64 {
        self.ytop
    }

    pub fn ybot(&self) -> f64 {
        self.ybot
    }

    pub fn participation(&self) -> Participation {
        self.participation
    }

    pub fn next(&self) -> Option<usize> {
        self.next
    }

    /// Grow this link over `other` when both are contiguous fragments of the same
    /// curve with the same participation.
    fn absorb(&mut self, other: &CurveLink) -> bool {
        if self.curve != other.curve
            || self.participation != other.participation
            || self.ybot < other.ytop
            || self.ytop > other.ybot
        {
            return false;
        }
        self.ytop = self.ytop.min(other.ytop);
        self.ybot = self.ybot.max(other.ybot);
        true
    }

    fn sub_curve(&self, curve: &CurveSegment) -> CurveSegment {
        let direction = self.participation.direction();
        if self.ytop == curve.y_top() && self.ybot == curve.y_bot() {
            curve.with_direction(direction)
        } else {
            curve.sub_curve(self.ytop, self.ybot, direction)
        }
    }
}

/// One open end of a partially assembled contour.
#[derive(Debug, Clone)]
pub struct ChainEnd {
    head: usize,
    tail: usize,
    /// The other open end of the same chain.
    partner: usize,
    participation: Participation,
}

/// Arena of links and chain ends for one sweep.
///
/// Ends refer to their partners and links to their successors by index.
/// Sealed contours are kept as the index of their head link.
#[derive(Debug)]
pub struct ChainArena<'a> {
    curves: &'a [CurveSegment],
    links: Vec<CurveLink>,
    ends: Vec<ChainEnd>,
    /// Open ends ordered by x.
    open: Vec<usize>,
    sealed: Vec<usize>,
}

/// Does the next item at `v1` sit between the current item and its candidate partner at `v2`?
/// Entering items require 4-connectivity, exiting ones allow 8-connectivity.
fn obstructs(v1: f64, v2: f64, phase: usize) -> bool {
    if phase & 1 == 0 {
        v1 <= v2
    } else {
        v1 < v2
    }
}

impl<'a> ChainArena<'a> {
    pub fn new(curves: &'a [CurveSegment]) -> Self {
        Self {
            curves,
            links: vec![],
            ends: vec![],
            open: vec![],
            sealed: vec![],
        }
    }

    pub fn link(&self, index: usize) -> &CurveLink {
        &self.links[index]
    }

    pub fn open_ends(&self) -> usize {
        self.open.len()
    }

    pub fn sealed(&self) -> &[usize] {
        &self.sealed
    }

    /// Register a fragment of `curve` over `[ystart, yend]`.
    pub fn push_link(
        &mut self,
        curve: usize,
        ystart: f64,
        yend: f64,
        participation: Participation,
    ) -> usize {
        let segment = &self.curves[curve];
        assert!(
            ystart >= segment.y_top() && yend <= segment.y_bot(),
            "bad curve link [{} => {}] for {:?}",
            ystart,
            yend,
            segment
        );
        self.links.push(CurveLink {
            curve,
            ytop: ystart,
            ybot: yend,
            participation,
            next: None,
        });
        self.links.len() - 1
    }

    fn link_x(&self, link: usize) -> f64 {
        let link = &self.links[link];
        self.curves[link.curve].x_for_y(link.ytop)
    }

    fn link_x_bot(&self, link: usize) -> f64 {
        let link = &self.links[link];
        self.curves[link.curve].x_for_y(link.ybot)
    }

    fn end_x(&self, end: usize) -> f64 {
        let end = &self.ends[end];
        match end.participation {
            Participation::Entering => self.link_x_bot(end.tail),
            _ => self.link_x_bot(end.head),
        }
    }

    fn new_end(&mut self, link: usize, partner: usize) -> usize {
        self.ends.push(ChainEnd {
            head: link,
            tail: link,
            partner,
            participation: self.links[link].participation,
        });
        self.ends.len() - 1
    }

    /// Extend a chain end by one link: entering ends grow at the tail, exiting ends at the head.
    fn add_link(&mut self, end: usize, link: usize) {
        let ChainEnd {
            head,
            tail,
            participation,
            ..
        } = self.ends[end];
        if participation == Participation::Entering {
            self.links[tail].next = Some(link);
            self.ends[end].tail = link;
        } else {
            self.links[link].next = Some(head);
            self.ends[end].head = link;
        }
    }

    /// Join two ends of opposite participation.
    /// Returns the head link when the join closes a contour.
    pub(super) fn link_to(&mut self, this: usize, that: usize) -> Option<usize> {
        let (this_tag, that_tag) = (self.ends[this].participation, self.ends[that].participation);
        assert!(
            this_tag != Participation::Ignored && that_tag != Participation::Ignored,
            "chain end linked more than once"
        );
        assert!(this_tag != that_tag, "linking chains of the same type");

        let (enter, exit) = if this_tag == Participation::Entering {
            (this, that)
        } else {
            (that, this)
        };
        self.ends[this].participation = Participation::Ignored;
        self.ends[that].participation = Participation::Ignored;

        let enter_tail = self.ends[enter].tail;
        self.links[enter_tail].next = Some(self.ends[exit].head);
        self.ends[enter].tail = self.ends[exit].tail;

        if self.ends[this].partner == that {
            return Some(self.ends[enter].head);
        }

        // splice this chain into one end of the chain formed by the partners
        let other_enter = self.ends[exit].partner;
        let other_exit = self.ends[enter].partner;
        self.ends[other_enter].partner = other_exit;
        self.ends[other_exit].partner = other_enter;

        let enter_head = self.ends[enter].head;
        let other_head = self.ends[other_enter].head;
        if self.links[enter_head].ytop < self.links[other_head].ytop {
            let tail = self.ends[enter].tail;
            self.links[tail].next = Some(other_head);
            self.ends[other_enter].head = enter_head;
        } else {
            let tail = self.ends[other_exit].tail;
            self.links[tail].next = Some(enter_head);
            self.ends[other_exit].tail = self.ends[enter].tail;
        }
        None
    }

    fn seal(&mut self, this: usize, that: usize) {
        if let Some(head) = self.link_to(this, that) {
            self.sealed.push(head);
        }
    }

    /// Merge the links of a finished strip (ordered by x) with the open chain ends.
    pub fn resolve_links(&mut self, links: &[usize]) {
        assert!(links.len() % 2 == 0, "odd number of new curves");
        assert!(self.open.len() % 2 == 0, "odd number of chains");

        let ends = std::mem::take(&mut self.open);
        let mut next_open = Vec::with_capacity(ends.len() + links.len());
        let (mut cur_end, mut cur_link) = (0, 0);

        while cur_end < ends.len() || cur_link < links.len() {
            let chain = ends.get(cur_end).copied();
            let next_chain = ends.get(cur_end + 1).copied();
            let link = links.get(cur_link).copied();
            let next_link = links.get(cur_link + 1).copied();

            // only one kind left
            let mut connect_chains = link.is_none();
            let mut connect_links = chain.is_none();

            if let (Some(chain), Some(link)) = (chain, link) {
                // adjacent items closing off an area
                connect_chains = cur_end & 1 == 0
                    && next_chain.is_some_and(|next| self.end_x(chain) == self.end_x(next));
                connect_links = cur_link & 1 == 0
                    && next_link.is_some_and(|next| self.link_x(link) == self.link_x(next));

                if !connect_chains && !connect_links {
                    // the successor sits between an item and its candidate partner
                    let cx = self.end_x(chain);
                    let lx = self.link_x(link);
                    connect_chains = cx < lx
                        && next_chain.is_some_and(|next| obstructs(self.end_x(next), lx, cur_end));
                    connect_links = lx < cx
                        && next_link.is_some_and(|next| obstructs(self.link_x(next), cx, cur_link));
                }
            }

            if connect_chains {
                let (Some(chain), Some(next)) = (chain, next_chain) else {
                    panic!("odd number of chains");
                };
                self.seal(chain, next);
                cur_end += 2;
            }
            if connect_links {
                let (Some(link), Some(next)) = (link, next_link) else {
                    panic!("odd number of new curves");
                };
                let open = self.ends.len();
                self.new_end(link, open + 1);
                let close = self.new_end(next, open);
                next_open.push(open);
                next_open.push(close);
                cur_link += 2;
            }
            if !connect_chains && !connect_links {
                let (Some(chain), Some(link)) = (chain, link) else {
                    panic!("unbalanced chains and links");
                };
                self.add_link(chain, link);
                next_open.push(chain);
                cur_end += 1;
                cur_link += 1;
            }
        }

        if next_open.len() % 2 != 0 {
            log::warn!("odd number of chains after resolving links");
        }
        self.open = next_open;
    }

    /// Pair up the open ends left at the bottom of a run of strips.
    pub fn finalize(&mut self) {
        if self.open.is_empty() {
            return;
        }
        assert!(self.open.len() % 2 == 0, "odd number of chains");
        let ends = std::mem::take(&mut self.open);
        for pair in ends.chunks_exact(2) {
            self.seal(pair[0], pair[1]);
        }
    }

    /// Coalesce every sealed contour into a start point followed by its sub curves.
    pub fn into_curves(mut self) -> Vec<CurveSegment> {
        let mut curves = vec![];
        for head in std::mem::take(&mut self.sealed) {
            let mut current = self.links[head].clone();
            let top = &self.curves[current.curve];
            curves.push(Start::new(top.x_for_y(current.ytop), current.ytop).into());

            let mut next = current.next;
            while let Some(index) = next {
                let link = &self.links[index];
                if !current.absorb(link) {
                    curves.push(current.sub_curve(&self.curves[current.curve]));
                    current = link.clone();
                }
                next = link.next;
            }
            curves.push(current.sub_curve(&self.curves[current.curve]));
        }
        curves
    }
}
