// Promotes a plain press outside selection mode into a selection drag once the pointer
// has travelled far enough.

use crate::input::{Modifiers, Point};

/// Default travel, in pixels, before a press becomes a selection drag.
pub const DEFAULT_PROMOTION_DISTANCE: f32 = 5.0;

/// A press that may still turn into a selection drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PotentialDrag {
    /// Press position in content pixels (scroll included), used to find the start cell.
    pub origin_px: Point,
    /// Press position in client pixels, used to measure travel independent of scrolling.
    pub origin_client: Point,
    /// Modifiers held at press time; they decide whether the promoted drag is additive.
    pub modifiers: Modifiers,
}

/// Tracks one pending press per pointer-down/up cycle.
#[derive(Debug, Clone)]
pub struct PromotionTracker {
    pending: Option<PotentialDrag>,
    threshold: f32,
}

impl PromotionTracker {
    pub fn new(threshold: f32) -> Self {
        Self {
            pending: None,
            threshold,
        }
    }

    /// Record a press made while selection mode was off.
    pub fn arm(&mut self, origin_px: Point, origin_client: Point, modifiers: Modifiers) {
        self.pending = Some(PotentialDrag {
            origin_px,
            origin_client,
            modifiers,
        });
    }

    /// Observe pointer movement. Returns the recorded press exactly once, on the first
    /// move whose distance from the press strictly exceeds the threshold.
    pub fn observe(&mut self, client: Point) -> Option<PotentialDrag> {
        let pending = self.pending?;
        let travelled = pending.origin_client.distance_to(client);
        if travelled <= self.threshold {
            return None;
        }
        log::debug!("press promoted to selection drag after {travelled:.1}px");
        self.pending = None;
        Some(pending)
    }

    /// Drop any pending press (release before the threshold, or a reset).
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<&PotentialDrag> {
        self.pending.as_ref()
    }
}

impl Default for PromotionTracker {
    fn default() -> Self {
        Self::new(DEFAULT_PROMOTION_DISTANCE)
    }
}
