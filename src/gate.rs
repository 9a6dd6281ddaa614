//! Scroll-completion gate for the policy review.
//!
//! The gate opens once the reader has reached the bottom of the displayed
//! content (within a tolerance) and stays open until the content changes.
//! Scroll observations are delivered through a [`Subscription`] bound to the
//! content they were measured on; resetting the gate releases that
//! subscription so late observations from the previous content are dropped.

use log::debug;

/// Default tolerance, in rendered rows.
pub const DEFAULT_TOLERANCE: u16 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GateState {
    #[default]
    Incomplete,
    Complete,
}

impl GateState {
    pub fn is_complete(self) -> bool {
        matches!(self, GateState::Complete)
    }
}

/// Layout measurements of a scrollable region, all in the same unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollMetrics {
    pub offset: u32,
    pub visible: u32,
    pub total: u32,
}

impl ScrollMetrics {
    pub fn new(offset: u32, visible: u32, total: u32) -> Self {
        Self {
            offset,
            visible,
            total,
        }
    }

    /// `offset + visible >= total - tolerance`, saturating at both ends.
    pub fn at_bottom(&self, tolerance: u32) -> bool {
        self.offset.saturating_add(self.visible) >= self.total.saturating_sub(tolerance)
    }

    /// Largest offset that still keeps the region filled.
    pub fn max_offset(&self) -> u32 {
        self.total.saturating_sub(self.visible)
    }
}

/// Ticket for delivering observations about one piece of content.
#[derive(Debug, PartialEq, Eq)]
pub struct Subscription {
    epoch: u64,
}

#[derive(Debug, Clone)]
pub struct ScrollGate {
    state: GateState,
    tolerance: u32,
    epoch: u64,
    active: bool,
}

impl ScrollGate {
    pub fn new(tolerance: u16) -> Self {
        Self {
            state: GateState::Incomplete,
            tolerance: u32::from(tolerance),
            epoch: 0,
            active: false,
        }
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn is_complete(&self) -> bool {
        self.state.is_complete()
    }

    /// Starts observing new content. Any earlier subscription is released
    /// and the gate returns to `Incomplete`.
    pub fn subscribe(&mut self) -> Subscription {
        self.reset();
        self.active = true;
        Subscription { epoch: self.epoch }
    }

    /// Releases a subscription. Releasing a stale one is a no-op.
    pub fn unsubscribe(&mut self, subscription: Subscription) {
        if self.is_current(&subscription) {
            self.active = false;
        }
    }

    /// Explicit reset for a content change.
    pub fn reset(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
        self.active = false;
        self.state = GateState::Incomplete;
    }

    /// Feeds one scroll or layout observation to the gate.
    ///
    /// Observations from a released subscription are ignored. Once complete,
    /// the gate no longer looks at observations until it is reset.
    pub fn observe(&mut self, subscription: &Subscription, metrics: ScrollMetrics) -> GateState {
        if !self.is_current(subscription) {
            debug!("Dropping scroll observation from released subscription");
            return self.state;
        }
        if self.state == GateState::Incomplete && metrics.at_bottom(self.tolerance) {
            debug!("Scroll gate complete at {:?}", metrics);
            self.state = GateState::Complete;
        }
        self.state
    }

    fn is_current(&self, subscription: &Subscription) -> bool {
        self.active && subscription.epoch == self.epoch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_incomplete() {
        let gate = ScrollGate::new(50);
        assert_eq!(gate.state(), GateState::Incomplete);
    }

    #[test]
    fn completes_within_tolerance() {
        let mut gate = ScrollGate::new(50);
        let sub = gate.subscribe();
        assert_eq!(
            gate.observe(&sub, ScrollMetrics::new(440, 500, 1000)),
            GateState::Incomplete
        );
        assert_eq!(
            gate.observe(&sub, ScrollMetrics::new(460, 500, 1000)),
            GateState::Complete
        );
    }

    #[test]
    fn short_content_completes_without_scrolling() {
        let mut gate = ScrollGate::new(50);
        let sub = gate.subscribe();
        assert!(gate.observe(&sub, ScrollMetrics::new(0, 500, 300)).is_complete());

        let mut exact = ScrollGate::new(0);
        let sub = exact.subscribe();
        assert!(exact.observe(&sub, ScrollMetrics::new(0, 500, 500)).is_complete());
    }

    #[test]
    fn complete_is_sticky() {
        let mut gate = ScrollGate::new(50);
        let sub = gate.subscribe();
        gate.observe(&sub, ScrollMetrics::new(500, 500, 1000));
        assert_eq!(
            gate.observe(&sub, ScrollMetrics::new(0, 500, 1000)),
            GateState::Complete
        );
    }

    #[test]
    fn resubscribing_resets_and_drops_stale_observations() {
        let mut gate = ScrollGate::new(50);
        let old = gate.subscribe();
        gate.observe(&old, ScrollMetrics::new(500, 500, 1000));
        assert!(gate.is_complete());

        let new = gate.subscribe();
        assert_eq!(gate.state(), GateState::Incomplete);
        assert_eq!(
            gate.observe(&old, ScrollMetrics::new(500, 500, 1000)),
            GateState::Incomplete
        );
        assert!(gate.observe(&new, ScrollMetrics::new(0, 500, 100)).is_complete());
    }

    #[test]
    fn released_subscription_is_ignored() {
        let mut gate = ScrollGate::new(0);
        let sub = gate.subscribe();
        let probe = Subscription { epoch: sub.epoch };
        gate.unsubscribe(sub);
        assert_eq!(
            gate.observe(&probe, ScrollMetrics::new(0, 10, 5)),
            GateState::Incomplete
        );
    }

    #[test]
    fn metrics_saturate() {
        assert!(ScrollMetrics::new(u32::MAX, u32::MAX, 10).at_bottom(0));
        assert!(ScrollMetrics::new(0, 0, 3).at_bottom(5));
        assert_eq!(ScrollMetrics::new(0, 20, 10).max_offset(), 0);
    }
}
