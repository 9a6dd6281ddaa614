use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::{Action, App, View};

impl App {
    /// The main entry point for handling keyboard events.
    ///
    /// Global shortcuts are checked first, then the key goes to the current
    /// view.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if let Some(action) = self.key_action(key) {
            self.dispatch(action);
        }
    }

    /// Maps a key press to an action without applying it.
    pub fn key_action(&self, key: KeyEvent) -> Option<Action> {
        if let Some(action) = global_action(key) {
            return Some(action);
        }
        match &self.view {
            View::PolicyReview(_) => self.policy_key(key),
            View::PaymentMethods(methods) => {
                if methods.open_method().is_some() {
                    detail_key(key)
                } else {
                    payment_key(key)
                }
            }
        }
    }

    fn policy_key(&self, key: KeyEvent) -> Option<Action> {
        // Tabs are laid out right to left under RTL, so the arrows follow.
        let (forward, backward) = if self.document.is_rtl() {
            (KeyCode::Left, KeyCode::Right)
        } else {
            (KeyCode::Right, KeyCode::Left)
        };
        let action = match key.code {
            code if code == forward => Action::NextTab,
            code if code == backward => Action::PreviousTab,
            KeyCode::Tab => Action::NextTab,
            KeyCode::BackTab => Action::PreviousTab,
            KeyCode::Char(digit @ '1'..='9') => {
                Action::SelectTab(digit as usize - '1' as usize)
            }
            KeyCode::Up | KeyCode::Char('k') => Action::Scroll(-1),
            KeyCode::Down | KeyCode::Char('j') => Action::Scroll(1),
            KeyCode::PageUp => Action::ScrollPage(-1),
            KeyCode::PageDown | KeyCode::Char(' ') => Action::ScrollPage(1),
            KeyCode::Home => Action::ScrollToTop,
            KeyCode::End => Action::ScrollToBottom,
            KeyCode::Enter | KeyCode::Char('a') => Action::Agree,
            _ => return None,
        };
        Some(action)
    }
}

fn global_action(key: KeyEvent) -> Option<Action> {
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), m) if m.contains(KeyModifiers::CONTROL) => Some(Action::Quit),
        (KeyCode::Char('q'), _) => Some(Action::Quit),
        (KeyCode::Char('t'), _) => Some(Action::ToggleTheme),
        (KeyCode::Char('l'), _) => Some(Action::CycleLanguage),
        _ => None,
    }
}

fn payment_key(key: KeyEvent) -> Option<Action> {
    let action = match key.code {
        KeyCode::Up | KeyCode::Char('k') => Action::MoveCursor(-1),
        KeyCode::Down | KeyCode::Char('j') => Action::MoveCursor(1),
        KeyCode::Enter => Action::OpenSelected,
        KeyCode::Char('c') => Action::ContactSupport,
        KeyCode::Char('b') | KeyCode::Backspace | KeyCode::Esc => Action::Back,
        _ => return None,
    };
    Some(action)
}

fn detail_key(key: KeyEvent) -> Option<Action> {
    let action = match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace => Action::CloseMethod,
        KeyCode::Char('c') => Action::ContactSupport,
        _ => return None,
    };
    Some(action)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PortalSettings;
    use crate::contact::SystemOpener;
    use crate::content::Content;
    use crate::i18n::{Catalog, Language};
    use crate::preferences::{MemoryStorage, PreferenceStore, Theme};

    fn app() -> App {
        App::with_parts(
            PortalSettings::default(),
            Content::builtin().unwrap(),
            Catalog::builtin().unwrap(),
            PreferenceStore::load(Box::new(MemoryStorage::new()), Theme::Light),
            Box::new(SystemOpener),
        )
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn arrows_follow_text_direction() {
        let mut app = app();
        assert_eq!(app.key_action(press(KeyCode::Right)), Some(Action::NextTab));
        app.dispatch(Action::SetLanguage(Language::Ar));
        assert_eq!(app.key_action(press(KeyCode::Left)), Some(Action::NextTab));
        assert_eq!(app.key_action(press(KeyCode::Right)), Some(Action::PreviousTab));
    }

    #[test]
    fn digits_select_tabs() {
        let app = app();
        assert_eq!(app.key_action(press(KeyCode::Char('2'))), Some(Action::SelectTab(1)));
    }

    #[test]
    fn ctrl_c_quits_everywhere() {
        let app = app();
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(app.key_action(key), Some(Action::Quit));
    }

    #[test]
    fn escape_closes_detail_before_going_back() {
        let mut app = app();
        if let View::PolicyReview(review) = &mut app.view {
            review.measure(10, 5);
        }
        app.dispatch(Action::Agree);
        assert_eq!(app.key_action(press(KeyCode::Esc)), Some(Action::Back));
        app.dispatch(Action::OpenSelected);
        assert_eq!(app.key_action(press(KeyCode::Esc)), Some(Action::CloseMethod));
    }
}
