//! Hit testing of the hand cursor against interactive regions
//!
//! Each region gets its own enter/move/leave stream, the way a pointer
//! system would deliver hover events to the widget under the cursor.

use crate::input::types::{HandCursorEvent, HandCursorSample};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Identifier of an interactive region (one per button)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RegionId(pub u32);

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "region-{}", self.0)
    }
}

/// Axis-aligned rectangle in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Left/top edges are inclusive, right/bottom edges exclusive
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// Event addressed to one region
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoutedEvent {
    pub region: RegionId,
    pub event: HandCursorEvent,
}

/// Routes hand samples to the regions they hit
#[derive(Debug, Default)]
pub struct HandCursorRouter {
    regions: Vec<(RegionId, Bounds)>,
    inside: HashSet<RegionId>,
}

impl HandCursorRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a region, replacing the bounds if the id already exists
    pub fn add_region(&mut self, id: RegionId, bounds: Bounds) {
        match self.regions.iter_mut().find(|(existing, _)| *existing == id) {
            Some(entry) => entry.1 = bounds,
            None => self.regions.push((id, bounds)),
        }
    }

    /// Remove a region. Returns a leave event if the hand was over it.
    pub fn remove_region(&mut self, id: RegionId) -> Option<RoutedEvent> {
        self.regions.retain(|(existing, _)| *existing != id);
        self.inside.remove(&id).then_some(RoutedEvent {
            region: id,
            event: HandCursorEvent::Leave,
        })
    }

    pub fn is_inside(&self, id: RegionId) -> bool {
        self.inside.contains(&id)
    }

    /// Compute the events produced by a new hand sample.
    ///
    /// Leave events come before enter events so that a hand sliding from
    /// one button to its neighbour releases the first one before hovering
    /// the second.
    pub fn route(&mut self, sample: &HandCursorSample) -> Vec<RoutedEvent> {
        if !sample.tracked {
            return self.hand_lost();
        }

        let position = sample.position();
        let mut leaves = Vec::new();
        let mut others = Vec::new();

        for (id, bounds) in &self.regions {
            let hit = bounds.contains(sample.x, sample.y);
            let was_inside = self.inside.contains(id);

            match (was_inside, hit) {
                (false, true) => {
                    self.inside.insert(*id);
                    others.push(RoutedEvent {
                        region: *id,
                        event: HandCursorEvent::Enter { position },
                    });
                }
                (true, true) => others.push(RoutedEvent {
                    region: *id,
                    event: HandCursorEvent::Move { position },
                }),
                (true, false) => {
                    self.inside.remove(id);
                    leaves.push(RoutedEvent {
                        region: *id,
                        event: HandCursorEvent::Leave,
                    });
                }
                (false, false) => {}
            }
        }

        leaves.extend(others);
        leaves
    }

    /// The sensor lost the hand: leave every region currently hovered
    pub fn hand_lost(&mut self) -> Vec<RoutedEvent> {
        let mut hovered: Vec<RegionId> = self.inside.drain().collect();
        hovered.sort();
        hovered
            .into_iter()
            .map(|region| RoutedEvent {
                region,
                event: HandCursorEvent::Leave,
            })
            .collect()
    }

    pub fn last_hit(&self) -> impl Iterator<Item = RegionId> + '_ {
        self.regions
            .iter()
            .map(|(id, _)| *id)
            .filter(|id| self.inside.contains(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::types::HandPosition;

    fn router() -> HandCursorRouter {
        let mut router = HandCursorRouter::new();
        router.add_region(RegionId(1), Bounds::new(0.0, 0.0, 100.0, 100.0));
        router.add_region(RegionId(2), Bounds::new(100.0, 0.0, 100.0, 100.0));
        router
    }

    #[test]
    fn test_bounds_edges() {
        let b = Bounds::new(10.0, 10.0, 20.0, 20.0);
        assert!(b.contains(10.0, 10.0));
        assert!(b.contains(29.9, 29.9));
        assert!(!b.contains(30.0, 15.0));
        assert!(!b.contains(9.9, 15.0));
    }

    #[test]
    fn test_enter_move_leave() {
        let mut router = router();

        let events = router.route(&HandCursorSample::new(50.0, 50.0, 0.0));
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].region, RegionId(1));
        assert!(matches!(events[0].event, HandCursorEvent::Enter { .. }));

        let events = router.route(&HandCursorSample::new(60.0, 40.0, 10.0));
        assert!(matches!(
            events[0].event,
            HandCursorEvent::Move { position } if position == HandPosition::new(60.0, 40.0)
        ));

        let events = router.route(&HandCursorSample::new(500.0, 500.0, 20.0));
        assert_eq!(events, vec![RoutedEvent { region: RegionId(1), event: HandCursorEvent::Leave }]);
        assert!(!router.is_inside(RegionId(1)));
    }

    #[test]
    fn test_leave_precedes_enter() {
        let mut router = router();
        router.route(&HandCursorSample::new(50.0, 50.0, 0.0));

        let events = router.route(&HandCursorSample::new(150.0, 50.0, 10.0));
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].region, RegionId(1));
        assert_eq!(events[0].event, HandCursorEvent::Leave);
        assert_eq!(events[1].region, RegionId(2));
        assert!(matches!(events[1].event, HandCursorEvent::Enter { .. }));
    }

    #[test]
    fn test_untracked_sample_leaves_all() {
        let mut router = router();
        router.route(&HandCursorSample::new(50.0, 50.0, 0.0));

        let events = router.route(&HandCursorSample::lost(10.0));
        assert_eq!(events, vec![RoutedEvent { region: RegionId(1), event: HandCursorEvent::Leave }]);
        assert_eq!(router.last_hit().count(), 0);
    }

    #[test]
    fn test_remove_hovered_region() {
        let mut router = router();
        router.route(&HandCursorSample::new(150.0, 50.0, 0.0));

        let leave = router.remove_region(RegionId(2));
        assert_eq!(leave.map(|e| e.event), Some(HandCursorEvent::Leave));
        assert!(router.route(&HandCursorSample::new(150.0, 50.0, 10.0)).is_empty());
    }
}
