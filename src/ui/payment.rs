//! Payment methods view.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Paragraph, Wrap},
};

use super::{button_style, panel, start_alignment, text, theme};
use crate::app::App;
use crate::definitions::{ClickTarget, HitMap};

/// Rows per payment method card.
const CARD_HEIGHT: u16 = 2;

pub fn render(app: &App, f: &mut Frame, area: Rect, hits: &mut HitMap) {
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Length(5),
            Constraint::Min(4),
            Constraint::Length(4),
        ])
        .split(area);

    render_intro(app, f, parts[0], hits);
    render_badges(app, f, parts[1]);
    render_methods(app, f, parts[2], hits);
    render_next_steps(app, f, parts[3], hits);
}

fn render_intro(app: &App, f: &mut Frame, area: Rect, hits: &mut HitMap) {
    let palette = theme::palette(&app.document);
    let rtl = app.document.is_rtl();
    let block = panel(palette);
    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.height < 3 {
        return;
    }
    let row = |offset: u16| Rect::new(inner.x + 1, inner.y + offset, inner.width.saturating_sub(2), 1);

    f.render_widget(
        Paragraph::new(app.t("Payment Methods"))
            .alignment(start_alignment(rtl))
            .style(
                Style::default()
                    .fg(palette.fg_heading)
                    .add_modifier(Modifier::BOLD),
            ),
        row(0),
    );

    // The back arrow points toward the start side.
    let arrow = if rtl { "→" } else { "←" };
    let back = format!(" {} {} ", arrow, app.t("Back to Policies"));
    if let Some(rect) = text::place_inline(row(0), &[text::cell_width(&back)], 0, !rtl).first() {
        f.render_widget(
            Paragraph::new(back.as_str()).style(
                Style::default()
                    .bg(palette.button_disabled_bg)
                    .fg(palette.fg_primary),
            ),
            *rect,
        );
        hits.register(*rect, ClickTarget::Back);
    }

    let dim = Style::default().fg(palette.fg_dim);
    f.render_widget(
        Paragraph::new(app.t("Click on a payment method to view payment details"))
            .alignment(start_alignment(rtl))
            .style(dim),
        row(1),
    );
    f.render_widget(
        Paragraph::new(app.t("Payment instructions are available in your preferred language."))
            .alignment(start_alignment(rtl))
            .style(dim),
        row(2),
    );
}

fn render_badges(app: &App, f: &mut Frame, area: Rect) {
    let palette = theme::palette(&app.document);
    let rtl = app.document.is_rtl();
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    let badges = [
        (
            "WARRANTY",
            "Warranty remains valid as long as client uses account properly and without policy violations.",
        ),
        (
            "REVIEW TIME",
            "Verification can take 24h–7 days depending on platform decision.",
        ),
    ];
    // Under RTL the first badge sits on the right.
    let slots = if rtl {
        [halves[1], halves[0]]
    } else {
        [halves[0], halves[1]]
    };

    for ((title, body), slot) in badges.into_iter().zip(slots) {
        let block = panel(palette)
            .title(format!(" {} ", app.t(title)))
            .title_alignment(start_alignment(rtl))
            .title_style(
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD),
            );
        f.render_widget(
            Paragraph::new(app.t(body))
                .wrap(Wrap { trim: true })
                .alignment(start_alignment(rtl))
                .block(block),
            slot,
        );
    }
}

fn render_methods(app: &App, f: &mut Frame, area: Rect, hits: &mut HitMap) {
    let palette = theme::palette(&app.document);
    let rtl = app.document.is_rtl();
    let Some(methods) = app.view.payment_methods() else {
        return;
    };
    let block = panel(palette);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let count = app.content.payment_methods.len();
    let per_page = usize::from((inner.height / CARD_HEIGHT).max(1));
    let first = visible_window(methods.cursor(), per_page, count);

    for (slot, index) in (first..count).take(per_page).enumerate() {
        let Some(method) = app.content.payment_method(index) else {
            break;
        };
        let y = inner.y + CARD_HEIGHT * u16::try_from(slot).unwrap_or(0);
        if y + CARD_HEIGHT > inner.y + inner.height {
            break;
        }
        let card = Rect::new(inner.x, y, inner.width, CARD_HEIGHT);
        let selected = index == methods.cursor();
        let style = if selected {
            Style::default()
                .bg(palette.selection_bg)
                .fg(palette.selection_fg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.fg_primary)
        };
        let marker = if selected { "▸" } else { " " };
        let name = format!(
            " {} {}  ·  {} ",
            marker,
            app.t(&method.name),
            app.t(&method.processing_time)
        );
        let summary = format!("   {} ", app.t(&method.summary));
        let width = card.width;
        f.render_widget(
            Paragraph::new(vec![
                Line::from(text::truncate(&name, width)),
                Line::from(text::truncate(&summary, width)),
            ])
            .alignment(start_alignment(rtl))
            .style(style),
            card,
        );
        hits.register(card, ClickTarget::PaymentMethod(index));
    }
}

/// First visible index so that `cursor` stays on screen.
fn visible_window(cursor: usize, per_page: usize, count: usize) -> usize {
    if count <= per_page {
        return 0;
    }
    cursor
        .saturating_sub(per_page.saturating_sub(1))
        .min(count - per_page)
}

fn render_next_steps(app: &App, f: &mut Frame, area: Rect, hits: &mut HitMap) {
    let palette = theme::palette(&app.document);
    let rtl = app.document.is_rtl();
    let block = panel(palette)
        .title(format!(" {} ", app.t("Next Steps")))
        .title_alignment(start_alignment(rtl));
    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.height < 2 {
        return;
    }

    let text_row = Rect::new(inner.x + 1, inner.y, inner.width.saturating_sub(2), 1);
    f.render_widget(
        Paragraph::new(app.t("After payment, please contact support for confirmation."))
            .alignment(start_alignment(rtl))
            .style(Style::default().fg(palette.fg_primary)),
        text_row,
    );

    let label = format!(" {} ", app.t("Contact Support"));
    let button_row = Rect::new(inner.x + 1, inner.y + 1, inner.width.saturating_sub(2), 1);
    if let Some(rect) = text::place_inline(button_row, &[text::cell_width(&label)], 0, rtl).first() {
        f.render_widget(
            Paragraph::new(label.as_str())
                .alignment(Alignment::Center)
                .style(button_style(palette, true)),
            *rect,
        );
        hits.register(*rect, ClickTarget::ContactSupport);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_keeps_cursor_visible() {
        assert_eq!(visible_window(0, 3, 10), 0);
        assert_eq!(visible_window(2, 3, 10), 0);
        assert_eq!(visible_window(5, 3, 10), 3);
        assert_eq!(visible_window(9, 3, 10), 7);
    }

    #[test]
    fn window_starts_at_zero_when_everything_fits() {
        assert_eq!(visible_window(3, 8, 4), 0);
    }
}
