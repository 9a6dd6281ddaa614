use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use super::{Action, App};
use crate::definitions::ClickTarget;

// Implementation block for mouse event handling in the App.
impl App {
    /// The main entry point for handling mouse events.
    ///
    /// Clicks are resolved against the hit map of the last drawn frame; the
    /// wheel scrolls the policy content.
    pub fn handle_mouse(&mut self, event: MouseEvent) {
        let action = match event.kind {
            MouseEventKind::Down(MouseButton::Left) => self
                .hit_map
                .hit_test(event.column, event.row)
                .and_then(click_action),
            MouseEventKind::ScrollUp => Some(Action::Scroll(-1)),
            MouseEventKind::ScrollDown => Some(Action::Scroll(1)),
            _ => None,
        };
        if let Some(action) = action {
            self.dispatch(action);
        }
    }
}

fn click_action(target: ClickTarget) -> Option<Action> {
    match target {
        ClickTarget::Language(language) => Some(Action::SetLanguage(language)),
        ClickTarget::ThemeToggle => Some(Action::ToggleTheme),
        ClickTarget::PolicyTab(index) => Some(Action::SelectTab(index)),
        ClickTarget::Agree => Some(Action::Agree),
        ClickTarget::Back => Some(Action::Back),
        ClickTarget::PaymentMethod(index) => Some(Action::OpenMethod(index)),
        ClickTarget::ContactSupport => Some(Action::ContactSupport),
        ClickTarget::DetailBackdrop | ClickTarget::CloseDetail => Some(Action::CloseMethod),
        ClickTarget::PolicyContent | ClickTarget::DetailPanel => None,
    }
}
