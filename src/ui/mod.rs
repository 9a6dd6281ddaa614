use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::app::{App, View, ViewKind};
use crate::components::{header, popup, status_bar};
use crate::definitions::HitMap;

mod payment;
mod policies;
pub mod text;
pub mod theme;

use theme::Palette;

pub const MIN_WIDTH: u16 = 60;
pub const MIN_HEIGHT: u16 = 24;

/// Draws one frame and records its click regions on `app.hit_map`.
///
/// The policy content is measured before anything is drawn, so the gate
/// state shown in this frame already reflects the current layout.
pub fn render(f: &mut Frame<'_>, app: &mut App) {
    let size = f.size();
    let palette = theme::palette(&app.document);
    let mut hits = HitMap::default();

    if size.width < MIN_WIDTH || size.height < MIN_HEIGHT {
        // The policy is hidden, so its last measurement no longer applies.
        if let View::PolicyReview(review) = &mut app.view {
            review.unmeasure();
        }
        render_too_small(f, app, palette, size);
        app.hit_map = hits;
        return;
    }

    let base = Block::default().style(Style::default().bg(palette.bg_primary));
    f.render_widget(base, size);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(header::HEIGHT),
            Constraint::Min(8),
            Constraint::Length(1),
        ])
        .split(size);
    let header_area = vertical[0];
    let body_area = vertical[1];
    let status_area = vertical[2];

    match app.view.kind() {
        ViewKind::PolicyReview => {
            let areas = policies::PolicyAreas::new(body_area);
            let lines = policies::content_lines(app, areas.content_inner.width);
            if let View::PolicyReview(review) = &mut app.view {
                let total = u32::try_from(lines.len()).unwrap_or(u32::MAX);
                review.measure(u32::from(areas.content_inner.height), total);
            }
            header::render_header(app, f, header_area, &mut hits);
            policies::render(app, f, &areas, lines, &mut hits);
        }
        ViewKind::PaymentMethods => {
            header::render_header(app, f, header_area, &mut hits);
            payment::render(app, f, body_area, &mut hits);
            popup::render_detail(app, f, body_area, &mut hits);
        }
    }
    status_bar::render_status_bar(app, f, status_area);

    app.hit_map = hits;
}

fn render_too_small(f: &mut Frame<'_>, app: &App, palette: &Palette, size: Rect) {
    let message = app.t("Terminal window is too small. Resize to at least 60x24.");
    let notice = Paragraph::new(message)
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .title(app.t("Policy & Billing Hub"))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.border_idle)),
        )
        .style(Style::default().fg(palette.fg_primary).bg(palette.bg_primary));
    f.render_widget(notice, size);
}

/// Start-side alignment for the current text direction.
pub(crate) fn start_alignment(rtl: bool) -> Alignment {
    if rtl { Alignment::Right } else { Alignment::Left }
}

pub(crate) fn button_style(palette: &Palette, enabled: bool) -> Style {
    if enabled {
        Style::default()
            .bg(palette.button_bg)
            .fg(palette.button_text)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .bg(palette.button_disabled_bg)
            .fg(palette.button_disabled_text)
    }
}

/// A bordered panel in the theme's colors.
pub(crate) fn panel<'a>(palette: &Palette) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border_idle))
        .style(Style::default().fg(palette.fg_primary).bg(palette.bg_panel))
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;

    use super::*;
    use crate::app::Action;
    use crate::config::PortalSettings;
    use crate::contact::SystemOpener;
    use crate::content::Content;
    use crate::definitions::ClickTarget;
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

    fn draw(app: &mut App, width: u16, height: u16) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn screen_text(buffer: &Buffer) -> String {
        let area = buffer.area;
        let mut out = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                out.push_str(buffer.get(x, y).symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn small_terminal_shows_resize_message() {
        let mut app = app();
        let text = screen_text(&draw(&mut app, 40, 10));
        assert!(text.contains("Terminal window is too"));
        assert!(app.hit_map.is_empty());
    }

    #[test]
    fn hidden_policy_cannot_be_accepted() {
        let mut app = app();
        draw(&mut app, 80, 24);
        assert!(!app.view.policy_review().unwrap().can_advance());

        draw(&mut app, 40, 10);
        app.dispatch(Action::ScrollToBottom);
        app.dispatch(Action::Agree);
        assert_eq!(app.view.kind(), ViewKind::PolicyReview);
        assert!(!app.view.policy_review().unwrap().can_advance());

        draw(&mut app, 80, 24);
        app.dispatch(Action::ScrollToBottom);
        app.dispatch(Action::Agree);
        assert_eq!(app.view.kind(), ViewKind::PaymentMethods);
    }

    #[test]
    fn long_policy_shows_hint_until_scrolled() {
        let mut app = app();
        let text = screen_text(&draw(&mut app, 80, 24));
        assert!(text.contains("Please scroll to the bottom to continue"));
        assert!(!app.view.policy_review().unwrap().can_advance());

        app.dispatch(Action::ScrollToBottom);
        let text = screen_text(&draw(&mut app, 80, 24));
        assert!(!text.contains("Please scroll to the bottom to continue"));
        assert!(app.view.policy_review().unwrap().can_advance());
    }

    #[test]
    fn content_that_fits_is_complete_on_first_frame() {
        let mut app = app();
        draw(&mut app, 200, 120);
        assert!(app.view.policy_review().unwrap().can_advance());
    }

    #[test]
    fn frame_registers_controls() {
        let mut app = app();
        draw(&mut app, 100, 30);
        assert!(app.hit_map.area_of(ClickTarget::Agree).is_some());
        assert!(app.hit_map.area_of(ClickTarget::ThemeToggle).is_some());
        assert!(app.hit_map.area_of(ClickTarget::PolicyTab(1)).is_some());
        assert!(
            app.hit_map
                .area_of(ClickTarget::Language(Language::Ar))
                .is_some()
        );
    }

    #[test]
    fn clicking_a_tab_switches_content() {
        let mut app = app();
        draw(&mut app, 100, 30);
        let tab = app.hit_map.area_of(ClickTarget::PolicyTab(2)).unwrap();
        app.handle_mouse(crossterm::event::MouseEvent {
            kind: crossterm::event::MouseEventKind::Down(crossterm::event::MouseButton::Left),
            column: tab.x,
            row: tab.y,
            modifiers: crossterm::event::KeyModifiers::NONE,
        });
        assert_eq!(app.view.policy_review().unwrap().selected_tab(), 2);
    }

    #[test]
    fn payment_view_renders_methods_and_detail() {
        let mut app = app();
        draw(&mut app, 100, 40);
        app.dispatch(Action::ScrollToBottom);
        app.dispatch(Action::Agree);
        let text = screen_text(&draw(&mut app, 100, 40));
        assert!(text.contains("Bank Transfer"));
        assert!(text.contains("Contact Support"));
        assert!(app.hit_map.area_of(ClickTarget::PaymentMethod(0)).is_some());

        app.dispatch(Action::OpenMethod(1));
        let text = screen_text(&draw(&mut app, 100, 40));
        assert!(text.contains("billing@example.com"));
        assert!(app.hit_map.area_of(ClickTarget::CloseDetail).is_some());
    }

    #[test]
    fn french_frame_is_translated() {
        let mut app = app();
        app.dispatch(Action::SetLanguage(Language::Fr));
        let text = screen_text(&draw(&mut app, 100, 30));
        assert!(text.contains("Conditions d'utilisation"));
    }
}
