//! Collision Detection
//!
//! Resolves which drop target a dragged card is over. Strategies are tried
//! in order and the first hit wins:
//!
//! 1. `PointerWithin`: pointer inside a container
//! 2. `RectIntersection`: dragged card overlaps a container (largest overlap)
//! 3. `ClosestCenter`: nearest sibling card center, within a radius
//!
//! Containers go first so a drop near the edge of a crowded tier lands in
//! the tier instead of snapping to a neighbouring card.

use crate::DropTarget;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    /// Rect of the given size centered on a point
    pub fn centered_at(center: Point, width: f64, height: f64) -> Self {
        Self::new(center.x - width / 2.0, center.y - height / 2.0, width, height)
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left && p.x <= self.right() && p.y >= self.top && p.y <= self.bottom()
    }

    pub fn intersection_area(&self, other: &Rect) -> f64 {
        let w = self.right().min(other.right()) - self.left.max(other.left);
        let h = self.bottom().min(other.bottom()) - self.top.max(other.top);
        if w <= 0.0 || h <= 0.0 {
            0.0
        } else {
            w * h
        }
    }
}

/// A droppable region measured from the page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub target: DropTarget,
    pub rect: Rect,
}

/// Where the drag currently is
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Probe {
    pub pointer: Point,
    /// The dragged card's footprint at the pointer
    pub dragged: Rect,
    /// Id of the dragged item, never its own target
    pub dragged_id: u32,
}

pub trait CollisionStrategy {
    fn detect(&self, probe: &Probe, containers: &[Candidate], items: &[Candidate]) -> Option<DropTarget>;
}

pub struct PointerWithin;

impl CollisionStrategy for PointerWithin {
    fn detect(&self, probe: &Probe, containers: &[Candidate], _items: &[Candidate]) -> Option<DropTarget> {
        containers
            .iter()
            .find(|c| c.rect.contains(probe.pointer))
            .map(|c| c.target)
    }
}

pub struct RectIntersection;

impl CollisionStrategy for RectIntersection {
    fn detect(&self, probe: &Probe, containers: &[Candidate], _items: &[Candidate]) -> Option<DropTarget> {
        containers
            .iter()
            .map(|c| (c, c.rect.intersection_area(&probe.dragged)))
            .filter(|(_, area)| *area > 0.0)
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(c, _)| c.target)
    }
}

pub struct ClosestCenter {
    /// Farther than this counts as no target
    pub max_distance: f64,
}

impl Default for ClosestCenter {
    fn default() -> Self {
        Self { max_distance: 120.0 }
    }
}

impl CollisionStrategy for ClosestCenter {
    fn detect(&self, probe: &Probe, _containers: &[Candidate], items: &[Candidate]) -> Option<DropTarget> {
        let origin = probe.dragged.center();
        items
            .iter()
            .filter(|c| c.target != DropTarget::Item(probe.dragged_id))
            .map(|c| (c, c.rect.center().distance(origin)))
            .filter(|(_, d)| *d <= self.max_distance)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(c, _)| c.target)
    }
}

/// Ordered list of strategies, first hit wins
pub struct CollisionChain {
    strategies: Vec<Box<dyn CollisionStrategy>>,
}

impl CollisionChain {
    pub fn new(strategies: Vec<Box<dyn CollisionStrategy>>) -> Self {
        Self { strategies }
    }

    pub fn detect(&self, probe: &Probe, containers: &[Candidate], items: &[Candidate]) -> Option<DropTarget> {
        self.strategies
            .iter()
            .find_map(|s| s.detect(probe, containers, items))
    }
}

impl Default for CollisionChain {
    fn default() -> Self {
        Self::new(vec![
            Box::new(PointerWithin),
            Box::new(RectIntersection),
            Box::new(ClosestCenter::default()),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tier(id: u32, top: f64) -> Candidate {
        Candidate {
            target: DropTarget::Container(id),
            rect: Rect::new(0.0, top, 600.0, 100.0),
        }
    }

    fn card(id: u32, left: f64, top: f64) -> Candidate {
        Candidate {
            target: DropTarget::Item(id),
            rect: Rect::new(left, top, 60.0, 80.0),
        }
    }

    fn probe(x: f64, y: f64) -> Probe {
        let pointer = Point::new(x, y);
        Probe {
            pointer,
            dragged: Rect::centered_at(pointer, 60.0, 80.0),
            dragged_id: 99,
        }
    }

    #[test]
    fn test_pointer_within_container_beats_sibling() {
        let containers = [tier(0, 0.0), tier(1, 100.0)];
        // Pointer sits right on top of card 4 inside tier 1
        let items = [card(4, 10.0, 110.0)];
        let hit = CollisionChain::default().detect(&probe(40.0, 150.0), &containers, &items);
        assert_eq!(hit, Some(DropTarget::Container(1)));
    }

    #[test]
    fn test_rect_intersection_picks_largest_overlap() {
        let containers = [tier(0, 0.0), tier(1, 100.0)];
        // Pointer below both tiers, card footprint overlaps tier 1 by 10px
        let p = probe(300.0, 230.0);
        assert_eq!(PointerWithin.detect(&p, &containers, &[]), None);
        assert_eq!(RectIntersection.detect(&p, &containers, &[]), Some(DropTarget::Container(1)));
    }

    #[test]
    fn test_closest_center_skips_self_and_far_cards() {
        let items = [card(99, 0.0, 0.0), card(3, 100.0, 0.0), card(4, 400.0, 0.0)];
        let p = probe(30.0, 40.0);
        assert_eq!(ClosestCenter::default().detect(&p, &[], &items), Some(DropTarget::Item(3)));

        let strict = ClosestCenter { max_distance: 50.0 };
        assert_eq!(strict.detect(&p, &[], &items), None);
    }

    #[test]
    fn test_chain_falls_through_to_nothing() {
        let containers = [tier(0, 0.0)];
        let items = [card(1, 10.0, 10.0)];
        assert_eq!(CollisionChain::default().detect(&probe(2000.0, 2000.0), &containers, &items), None);
    }

    #[test]
    fn test_intersection_area() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(a.intersection_area(&Rect::new(5.0, 5.0, 10.0, 10.0)), 25.0);
        assert_eq!(a.intersection_area(&Rect::new(10.0, 0.0, 5.0, 5.0)), 0.0);
    }
}
