use log::{debug, info, warn};

use super::{Action, App, PaymentMethods, PolicyReview, StatusLine, View};

impl App {
    /// The single source of truth for executing an `Action`.
    pub fn dispatch(&mut self, action: Action) {
        debug!("Executing action {:?}", action);
        self.status = None;
        match action {
            Action::SelectTab(index) => self.select_tab(index),
            Action::NextTab => self.step_tab(1),
            Action::PreviousTab => self.step_tab(-1),
            Action::Scroll(rows) => {
                let step = i64::from(self.settings.scroll_step);
                self.scroll_policy(|review| {
                    review.scroll_by(rows * step);
                });
            }
            Action::ScrollPage(pages) => self.scroll_policy(|review| {
                let page = review
                    .metrics()
                    .map_or(1, |metrics| i64::from(metrics.visible.max(1)));
                review.scroll_by(pages * page);
            }),
            Action::ScrollToTop => self.scroll_policy(|review| {
                review.scroll_to_top();
            }),
            Action::ScrollToBottom => self.scroll_policy(|review| {
                review.scroll_to_bottom();
            }),
            Action::Agree => self.agree(),
            Action::Back => self.back(),
            Action::MoveCursor(delta) => {
                let count = self.content.payment_methods.len();
                if let View::PaymentMethods(methods) = &mut self.view {
                    methods.move_cursor(delta, count);
                }
            }
            Action::OpenMethod(index) => {
                let count = self.content.payment_methods.len();
                if let View::PaymentMethods(methods) = &mut self.view {
                    methods.open(index, count);
                }
            }
            Action::OpenSelected => {
                let count = self.content.payment_methods.len();
                if let View::PaymentMethods(methods) = &mut self.view {
                    methods.open_selected(count);
                }
            }
            Action::CloseMethod => {
                if let View::PaymentMethods(methods) = &mut self.view {
                    methods.close();
                }
            }
            Action::ContactSupport => self.contact_support(),
            Action::ToggleTheme => self.toggle_theme(),
            Action::SetLanguage(language) => self.set_language(language),
            Action::CycleLanguage => self.cycle_language(),
            Action::Quit => self.should_quit = true,
        }
    }

    fn select_tab(&mut self, index: usize) {
        let count = self.content.policies.len();
        if let View::PolicyReview(review) = &mut self.view {
            if review.select_tab(index, count) {
                debug!("Selected policy tab {}", index);
            }
        }
    }

    /// Moves to the neighbouring tab, wrapping at both ends.
    fn step_tab(&mut self, delta: isize) {
        let count = self.content.policies.len();
        let Some(review) = self.view.policy_review() else {
            return;
        };
        if count == 0 {
            return;
        }
        let next = (review.selected_tab() as isize + delta).rem_euclid(count as isize) as usize;
        self.select_tab(next);
    }

    fn scroll_policy(&mut self, apply: impl FnOnce(&mut PolicyReview)) {
        if let View::PolicyReview(review) = &mut self.view {
            apply(review);
        }
    }

    /// Forward transition. Only allowed once the current tab's gate is open.
    fn agree(&mut self) {
        let Some(review) = self.view.policy_review() else {
            return;
        };
        if !review.can_advance() {
            debug!("Agree ignored: policy not scrolled to the end");
            self.status = Some(StatusLine::new("Please scroll to the bottom to continue"));
            return;
        }
        info!("Policy accepted, showing payment methods");
        self.view = View::PaymentMethods(PaymentMethods::default());
    }

    /// Backward transition. Always allowed; policy review starts over.
    fn back(&mut self) {
        if matches!(self.view, View::PaymentMethods(_)) {
            info!("Returning to policy review");
            self.view = View::PolicyReview(PolicyReview::new(self.settings.scroll_tolerance));
        }
    }

    fn contact_support(&mut self) {
        if !matches!(self.view, View::PaymentMethods(_)) {
            return;
        }
        let url = self.settings.support_url.clone();
        match self.opener.open(&url) {
            Ok(()) => self.status = Some(StatusLine::new("Opening support chat")),
            Err(err) => {
                warn!("Could not open support link: {:#}", err);
                self.status = Some(StatusLine::with_detail(
                    "Could not open the support link:",
                    url,
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use anyhow::{Result, anyhow};

    use super::*;
    use crate::app::ViewKind;
    use crate::config::PortalSettings;
    use crate::contact::LinkOpener;
    use crate::content::Content;
    use crate::gate::GateState;
    use crate::i18n::{Catalog, Language};
    use crate::preferences::{MemoryStorage, PreferenceStore, TextDirection, Theme};

    #[derive(Clone, Default)]
    struct RecordingOpener {
        opened: Rc<RefCell<Vec<String>>>,
        fail: bool,
    }

    impl LinkOpener for RecordingOpener {
        fn open(&mut self, url: &str) -> Result<()> {
            if self.fail {
                return Err(anyhow!("no opener"));
            }
            self.opened.borrow_mut().push(url.to_string());
            Ok(())
        }
    }

    fn app_with(opener: RecordingOpener) -> App {
        let store = PreferenceStore::load(Box::new(MemoryStorage::new()), Theme::Light);
        App::with_parts(
            PortalSettings::default(),
            Content::builtin().unwrap(),
            Catalog::builtin().unwrap(),
            store,
            Box::new(opener),
        )
    }

    fn app() -> App {
        app_with(RecordingOpener::default())
    }

    fn review(app: &mut App) -> &mut PolicyReview {
        match &mut app.view {
            View::PolicyReview(review) => review,
            View::PaymentMethods(_) => panic!("expected policy review"),
        }
    }

    fn complete_current_tab(app: &mut App) {
        review(app).measure(10, 5);
        assert_eq!(review(app).gate_state(), GateState::Complete);
    }

    #[test]
    fn agree_is_ignored_until_scrolled() {
        let mut app = app();
        review(&mut app).measure(10, 100);
        app.dispatch(Action::Agree);
        assert_eq!(app.view.kind(), ViewKind::PolicyReview);
        assert!(app.status.is_some());
    }

    #[test]
    fn agree_after_scrolling_shows_payment_methods() {
        let mut app = app();
        review(&mut app).measure(10, 100);
        app.dispatch(Action::ScrollToBottom);
        app.dispatch(Action::Agree);
        assert_eq!(app.view.kind(), ViewKind::PaymentMethods);
    }

    #[test]
    fn back_starts_review_over() {
        let mut app = app();
        app.dispatch(Action::SelectTab(2));
        complete_current_tab(&mut app);
        app.dispatch(Action::Agree);
        app.dispatch(Action::OpenMethod(1));

        app.dispatch(Action::Back);
        let review = review(&mut app);
        assert_eq!(review.selected_tab(), 0);
        assert_eq!(review.gate_state(), GateState::Incomplete);
    }

    #[test]
    fn tab_change_closes_the_gate() {
        let mut app = app();
        complete_current_tab(&mut app);
        app.dispatch(Action::NextTab);
        assert_eq!(review(&mut app).selected_tab(), 1);
        assert_eq!(review(&mut app).gate_state(), GateState::Incomplete);
        app.dispatch(Action::Agree);
        assert_eq!(app.view.kind(), ViewKind::PolicyReview);
    }

    #[test]
    fn previous_tab_wraps_around() {
        let mut app = app();
        app.dispatch(Action::PreviousTab);
        let last = app.content.policies.len() - 1;
        assert_eq!(review(&mut app).selected_tab(), last);
    }

    #[test]
    fn payment_detail_is_exclusive_and_discarded() {
        let mut app = app();
        complete_current_tab(&mut app);
        app.dispatch(Action::Agree);
        app.dispatch(Action::OpenMethod(0));
        app.dispatch(Action::OpenMethod(2));
        assert_eq!(
            app.view.payment_methods().and_then(|m| m.open_method()),
            Some(2)
        );

        app.dispatch(Action::Back);
        complete_current_tab(&mut app);
        app.dispatch(Action::Agree);
        assert_eq!(
            app.view.payment_methods().and_then(|m| m.open_method()),
            None
        );
    }

    #[test]
    fn payment_actions_are_ignored_in_policy_review() {
        let mut app = app();
        app.dispatch(Action::OpenMethod(0));
        app.dispatch(Action::ContactSupport);
        assert_eq!(app.view.kind(), ViewKind::PolicyReview);
        assert!(app.status.is_none());
    }

    #[test]
    fn contact_support_opens_configured_url() {
        let opener = RecordingOpener::default();
        let mut app = app_with(opener.clone());
        complete_current_tab(&mut app);
        app.dispatch(Action::Agree);
        app.dispatch(Action::ContactSupport);
        assert_eq!(
            opener.opened.borrow().as_slice(),
            ["https://wa.me/1234567890".to_string()]
        );
    }

    #[test]
    fn failed_contact_shows_the_url() {
        let mut app = app_with(RecordingOpener {
            fail: true,
            ..RecordingOpener::default()
        });
        complete_current_tab(&mut app);
        app.dispatch(Action::Agree);
        app.dispatch(Action::ContactSupport);
        let status = app.status.clone().unwrap();
        assert_eq!(status.detail.as_deref(), Some("https://wa.me/1234567890"));
    }

    #[test]
    fn language_change_sets_direction() {
        let mut app = app();
        app.dispatch(Action::SetLanguage(Language::Ar));
        assert_eq!(app.document.direction, TextDirection::Rtl);
        assert_eq!(app.t("Contact Support"), "التواصل مع الدعم");
        app.dispatch(Action::SetLanguage(Language::Fr));
        assert_eq!(app.document.direction, TextDirection::Ltr);
        app.dispatch(Action::CycleLanguage);
        assert_eq!(app.language(), Language::Ar);
    }

    #[test]
    fn theme_toggle_updates_document() {
        let mut app = app();
        assert!(!app.document.dark);
        app.dispatch(Action::ToggleTheme);
        assert!(app.document.dark);
        assert_eq!(app.preferences.theme(), Theme::Dark);
    }

    #[test]
    fn quit_sets_flag() {
        let mut app = app();
        app.dispatch(Action::Quit);
        assert!(app.should_quit);
    }
}
