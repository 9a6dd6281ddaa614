//! Defines the core state structures for the application.
//!
//! `App` is the single owner of everything a frame is drawn from: the static
//! content, the translation catalog, the preference store, and the current
//! view. Each view carries its own transient state, so leaving a view drops
//! that state with it.

use crate::config::PortalSettings;
use crate::contact::LinkOpener;
use crate::content::Content;
use crate::definitions::HitMap;
use crate::gate::{GateState, ScrollGate, ScrollMetrics, Subscription};
use crate::i18n::{Catalog, Language};
use crate::preferences::{Document, PreferenceStore};

/// The main application state.
pub struct App {
    /// Flag to indicate if the application should quit.
    pub should_quit: bool,
    /// Policy tabs and payment methods.
    pub content: Content,
    pub catalog: Catalog,
    pub preferences: PreferenceStore,
    /// Attributes derived from the preferences, re-applied on every change.
    pub document: Document,
    pub view: View,
    /// One-off message shown in the status bar instead of the key hints.
    pub status: Option<StatusLine>,
    /// Click regions of the last drawn frame.
    pub hit_map: HitMap,
    pub(crate) settings: PortalSettings,
    pub(crate) opener: Box<dyn LinkOpener>,
}

/// A status bar message. `text` is English source text; `detail` is shown
/// untranslated after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub text: &'static str,
    pub detail: Option<String>,
}

impl StatusLine {
    pub fn new(text: &'static str) -> Self {
        Self { text, detail: None }
    }

    pub fn with_detail(text: &'static str, detail: impl Into<String>) -> Self {
        Self {
            text,
            detail: Some(detail.into()),
        }
    }
}

/// The two top-level views. Exactly one is shown at a time.
#[derive(Debug)]
pub enum View {
    PolicyReview(PolicyReview),
    PaymentMethods(PaymentMethods),
}

impl View {
    pub fn kind(&self) -> ViewKind {
        match self {
            View::PolicyReview(_) => ViewKind::PolicyReview,
            View::PaymentMethods(_) => ViewKind::PaymentMethods,
        }
    }

    pub fn policy_review(&self) -> Option<&PolicyReview> {
        match self {
            View::PolicyReview(review) => Some(review),
            View::PaymentMethods(_) => None,
        }
    }

    pub fn payment_methods(&self) -> Option<&PaymentMethods> {
        match self {
            View::PaymentMethods(methods) => Some(methods),
            View::PolicyReview(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    PolicyReview,
    PaymentMethods,
}

impl ViewKind {
    /// English source label of the step indicator.
    pub fn step_label(self) -> &'static str {
        match self {
            ViewKind::PolicyReview => "Step 1 · Review Policies",
            ViewKind::PaymentMethods => "Step 2 · Payment",
        }
    }
}

/// Policy review state: selected tab, scroll position, and the gate that
/// unlocks the forward action.
#[derive(Debug)]
pub struct PolicyReview {
    selected_tab: usize,
    offset: u32,
    /// `(visible, total)` rows from the last layout pass of this tab.
    layout: Option<(u32, u32)>,
    gate: ScrollGate,
    subscription: Option<Subscription>,
}

impl PolicyReview {
    /// Starts on the first tab with the gate closed.
    pub fn new(tolerance: u16) -> Self {
        let mut gate = ScrollGate::new(tolerance);
        let subscription = Some(gate.subscribe());
        Self {
            selected_tab: 0,
            offset: 0,
            layout: None,
            gate,
            subscription,
        }
    }

    pub fn selected_tab(&self) -> usize {
        self.selected_tab
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn gate_state(&self) -> GateState {
        self.gate.state()
    }

    pub fn can_advance(&self) -> bool {
        self.gate.is_complete()
    }

    pub fn metrics(&self) -> Option<ScrollMetrics> {
        self.layout
            .map(|(visible, total)| ScrollMetrics::new(self.offset, visible, total))
    }

    /// Switches tabs. The old content's subscription is released and the
    /// gate starts over for the new content, which must be measured again.
    pub fn select_tab(&mut self, index: usize, tab_count: usize) -> bool {
        if index >= tab_count || index == self.selected_tab {
            return false;
        }
        if let Some(previous) = self.subscription.take() {
            self.gate.unsubscribe(previous);
        }
        self.selected_tab = index;
        self.offset = 0;
        self.layout = None;
        self.subscription = Some(self.gate.subscribe());
        true
    }

    /// Records a layout pass and evaluates the gate against it. Content that
    /// fits entirely completes here without any scrolling.
    pub fn measure(&mut self, visible: u32, total: u32) -> GateState {
        self.layout = Some((visible, total));
        self.offset = self
            .offset
            .min(ScrollMetrics::new(0, visible, total).max_offset());
        self.evaluate()
    }

    /// Forgets the last layout pass. Used while the content is not on
    /// screen, so scrolling cannot complete the gate blind.
    pub fn unmeasure(&mut self) {
        self.layout = None;
    }

    /// Scrolls by `delta` rows. Ignored until the content has been measured.
    pub fn scroll_by(&mut self, delta: i64) -> GateState {
        let Some(metrics) = self.metrics() else {
            return self.gate.state();
        };
        let max = i64::from(metrics.max_offset());
        let next = (i64::from(self.offset) + delta).clamp(0, max);
        self.offset = u32::try_from(next).unwrap_or(0);
        self.evaluate()
    }

    pub fn scroll_to_top(&mut self) -> GateState {
        self.scroll_by(-i64::from(self.offset))
    }

    pub fn scroll_to_bottom(&mut self) -> GateState {
        self.scroll_by(i64::from(u32::MAX))
    }

    fn evaluate(&mut self) -> GateState {
        match (self.subscription.as_ref(), self.metrics()) {
            (Some(subscription), Some(metrics)) => self.gate.observe(subscription, metrics),
            _ => self.gate.state(),
        }
    }
}

/// Payment catalog state. At most one method is open for detail.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PaymentMethods {
    cursor: usize,
    open: Option<usize>,
}

impl PaymentMethods {
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn open_method(&self) -> Option<usize> {
        self.open
    }

    /// Opens `index`, replacing whatever was open.
    pub fn open(&mut self, index: usize, count: usize) -> bool {
        if index >= count {
            return false;
        }
        self.cursor = index;
        self.open = Some(index);
        true
    }

    pub fn open_selected(&mut self, count: usize) -> bool {
        self.open(self.cursor, count)
    }

    pub fn close(&mut self) -> bool {
        self.open.take().is_some()
    }

    pub fn move_cursor(&mut self, delta: isize, count: usize) {
        if count == 0 {
            self.cursor = 0;
            return;
        }
        let last = count as isize - 1;
        self.cursor = (self.cursor as isize + delta).clamp(0, last) as usize;
    }
}

/// Everything the user can ask the application to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    SelectTab(usize),
    NextTab,
    PreviousTab,
    Scroll(i64),
    ScrollPage(i64),
    ScrollToTop,
    ScrollToBottom,
    Agree,
    Back,
    MoveCursor(isize),
    OpenMethod(usize),
    OpenSelected,
    CloseMethod,
    ContactSupport,
    ToggleTheme,
    SetLanguage(Language),
    CycleLanguage,
    Quit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn review_starts_on_first_tab_incomplete() {
        let review = PolicyReview::new(2);
        assert_eq!(review.selected_tab(), 0);
        assert_eq!(review.gate_state(), GateState::Incomplete);
        assert!(review.metrics().is_none());
    }

    #[test]
    fn scrolling_before_measurement_does_nothing() {
        let mut review = PolicyReview::new(2);
        assert_eq!(review.scroll_by(10), GateState::Incomplete);
        assert_eq!(review.offset(), 0);
    }

    #[test]
    fn measuring_short_content_completes() {
        let mut review = PolicyReview::new(2);
        assert_eq!(review.measure(20, 12), GateState::Complete);
        assert!(review.can_advance());
    }

    #[test]
    fn scroll_to_bottom_completes_and_stays_complete() {
        let mut review = PolicyReview::new(50);
        assert_eq!(review.measure(500, 1000), GateState::Incomplete);
        assert_eq!(review.scroll_by(440), GateState::Incomplete);
        assert_eq!(review.scroll_by(20), GateState::Complete);
        assert_eq!(review.scroll_to_top(), GateState::Complete);
        assert_eq!(review.offset(), 0);
    }

    #[test]
    fn offset_is_clamped_to_content() {
        let mut review = PolicyReview::new(0);
        review.measure(10, 30);
        review.scroll_by(100);
        assert_eq!(review.offset(), 20);
        review.measure(25, 30);
        assert_eq!(review.offset(), 5);
    }

    #[test]
    fn switching_tabs_resets_even_for_short_content() {
        let mut review = PolicyReview::new(2);
        review.measure(20, 10);
        assert!(review.can_advance());

        assert!(review.select_tab(1, 3));
        assert_eq!(review.gate_state(), GateState::Incomplete);
        assert_eq!(review.offset(), 0);

        assert_eq!(review.measure(20, 10), GateState::Complete);
    }

    #[test]
    fn returning_to_a_tab_rearms_its_gate() {
        let mut review = PolicyReview::new(0);
        review.measure(10, 40);
        review.scroll_to_bottom();
        assert!(review.can_advance());

        review.select_tab(1, 2);
        review.select_tab(0, 2);
        assert_eq!(review.measure(10, 40), GateState::Incomplete);
    }

    #[test]
    fn unmeasured_content_ignores_scrolling() {
        let mut review = PolicyReview::new(0);
        review.measure(10, 40);
        review.scroll_by(5);
        review.unmeasure();
        assert!(review.metrics().is_none());
        assert_eq!(review.scroll_to_bottom(), GateState::Incomplete);
        assert_eq!(review.offset(), 5);

        review.measure(10, 40);
        assert_eq!(review.scroll_to_bottom(), GateState::Complete);
    }

    #[test]
    fn selecting_current_or_missing_tab_is_ignored() {
        let mut review = PolicyReview::new(0);
        review.measure(10, 5);
        assert!(!review.select_tab(0, 3));
        assert!(!review.select_tab(7, 3));
        assert!(review.can_advance());
    }

    #[test]
    fn only_one_method_open_at_a_time() {
        let mut methods = PaymentMethods::default();
        assert!(methods.open(1, 4));
        assert!(methods.open(3, 4));
        assert_eq!(methods.open_method(), Some(3));
        assert!(!methods.open(9, 4));
        assert_eq!(methods.open_method(), Some(3));
        assert!(methods.close());
        assert_eq!(methods.open_method(), None);
        assert!(!methods.close());
    }

    #[test]
    fn cursor_stays_in_range() {
        let mut methods = PaymentMethods::default();
        methods.move_cursor(-1, 4);
        assert_eq!(methods.cursor(), 0);
        methods.move_cursor(10, 4);
        assert_eq!(methods.cursor(), 3);
        methods.move_cursor(1, 0);
        assert_eq!(methods.cursor(), 0);
    }
}
