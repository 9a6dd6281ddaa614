use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::Paragraph,
};

use crate::app::{App, ViewKind};
use crate::ui::{start_alignment, text, theme};

const POLICY_HINTS: &str = "←/→ tabs · ↑/↓ scroll · Enter agree · l language · t theme · q quit";
const PAYMENT_HINTS: &str =
    "↑/↓ select · Enter details · c contact · b back · l language · t theme · q quit";

pub fn render_status_bar(app: &App, f: &mut Frame, area: Rect) {
    let palette = theme::palette(&app.document);
    let rtl = app.document.is_rtl();

    let message = match &app.status {
        Some(status) => match &status.detail {
            Some(detail) => format!(" {} {} ", app.t(status.text), detail),
            None => format!(" {} ", app.t(status.text)),
        },
        None => {
            let hints = match app.view.kind() {
                ViewKind::PolicyReview => POLICY_HINTS,
                ViewKind::PaymentMethods => PAYMENT_HINTS,
            };
            format!(" {} ", app.t(hints))
        }
    };
    let indicator = format!(
        " {} · {} · {} ",
        app.document.lang.code().to_uppercase(),
        app.document.direction.as_str().to_uppercase(),
        app.t(app.preferences.theme().label())
    );

    let indicator_width = text::cell_width(&indicator).min(area.width);
    let constraints = if rtl {
        [Constraint::Length(indicator_width), Constraint::Min(0)]
    } else {
        [Constraint::Min(0), Constraint::Length(indicator_width)]
    };
    let parts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);
    let (message_area, indicator_area) = if rtl {
        (parts[1], parts[0])
    } else {
        (parts[0], parts[1])
    };

    let message_style = if app.status.is_some() {
        Style::default().bg(palette.bar_bg).fg(palette.bar_highlight_text)
    } else {
        Style::default().bg(palette.bar_bg).fg(palette.bar_text)
    };
    f.render_widget(
        Paragraph::new(text::truncate(&message, message_area.width))
            .alignment(start_alignment(rtl))
            .style(message_style),
        message_area,
    );
    f.render_widget(
        Paragraph::new(indicator)
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .bg(palette.bar_highlight_bg)
                    .fg(palette.bar_highlight_text),
            ),
        indicator_area,
    );
}
