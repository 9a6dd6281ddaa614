use ratatui::layout::Rect;

use crate::i18n::Language;

/// Something on screen that reacts to a left click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    Language(Language),
    ThemeToggle,
    PolicyTab(usize),
    PolicyContent,
    Agree,
    Back,
    PaymentMethod(usize),
    ContactSupport,
    DetailBackdrop,
    DetailPanel,
    CloseDetail,
}

/// Click regions registered while drawing a frame.
///
/// Regions registered later sit on top of earlier ones, so overlays win
/// over whatever they cover.
#[derive(Debug, Default)]
pub struct HitMap {
    regions: Vec<(Rect, ClickTarget)>,
}

impl HitMap {
    pub fn register(&mut self, area: Rect, target: ClickTarget) {
        if area.width > 0 && area.height > 0 {
            self.regions.push((area, target));
        }
    }

    pub fn hit_test(&self, column: u16, row: u16) -> Option<ClickTarget> {
        self.regions
            .iter()
            .rev()
            .find(|(rect, _)| rect_contains(rect, column, row))
            .map(|(_, target)| *target)
    }

    #[cfg(test)]
    pub fn area_of(&self, target: ClickTarget) -> Option<Rect> {
        self.regions
            .iter()
            .rev()
            .find(|(_, candidate)| *candidate == target)
            .map(|(rect, _)| *rect)
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

pub fn rect_contains(rect: &Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_regions_win() {
        let mut hits = HitMap::default();
        hits.register(Rect::new(0, 0, 20, 10), ClickTarget::DetailBackdrop);
        hits.register(Rect::new(5, 2, 5, 3), ClickTarget::DetailPanel);
        assert_eq!(hits.hit_test(6, 3), Some(ClickTarget::DetailPanel));
        assert_eq!(hits.hit_test(1, 1), Some(ClickTarget::DetailBackdrop));
        assert_eq!(hits.hit_test(30, 1), None);
    }

    #[test]
    fn empty_regions_are_skipped() {
        let mut hits = HitMap::default();
        hits.register(Rect::new(0, 0, 0, 3), ClickTarget::Agree);
        assert!(hits.is_empty());
    }
}
