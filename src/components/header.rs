use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::{App, ViewKind};
use crate::definitions::{ClickTarget, HitMap};
use crate::i18n::{SUPPORTED_LANGUAGES, language_label};
use crate::ui::{start_alignment, text, theme};

/// Rows taken by the header, including its bottom rule.
pub const HEIGHT: u16 = 4;

const GAP: u16 = 1;

pub fn render_header(app: &App, f: &mut Frame, area: Rect, hits: &mut HitMap) {
    let palette = theme::palette(&app.document);
    let rtl = app.document.is_rtl();
    let bar = Style::default().bg(palette.bar_bg).fg(palette.bar_text);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(palette.border_idle).bg(palette.bar_bg))
        .style(bar);
    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.height < 3 {
        return;
    }
    let row = |offset: u16| Rect::new(inner.x, inner.y + offset, inner.width, 1);

    // Badge on the start side, controls on the end side.
    let badge = format!(" {} ", app.t("Policy & Billing Hub"));
    let badge_width = text::cell_width(&badge);
    if let Some(rect) = text::place_inline(row(0), &[badge_width], 0, rtl).first() {
        let style = Style::default()
            .bg(palette.bar_highlight_bg)
            .fg(palette.bar_highlight_text)
            .add_modifier(Modifier::BOLD);
        f.render_widget(Paragraph::new(badge.as_str()).style(style), *rect);
    }

    let current_theme = app.preferences.theme();
    let theme_icon = if current_theme.is_dark() { "☾" } else { "☼" };
    let mut labels: Vec<(String, ClickTarget, bool)> = SUPPORTED_LANGUAGES
        .iter()
        .map(|info| {
            (
                format!(" {} {} ", info.glyph, info.code.to_uppercase()),
                ClickTarget::Language(info.language),
                info.language == app.document.lang,
            )
        })
        .collect();
    labels.push((
        format!(" {} {} ", theme_icon, app.t(current_theme.label())),
        ClickTarget::ThemeToggle,
        false,
    ));
    let widths: Vec<u16> = labels.iter().map(|(label, _, _)| text::cell_width(label)).collect();
    let group = end_group(row(0), &widths, rtl);
    for (rect, (label, target, active)) in text::place_inline(group, &widths, GAP, rtl)
        .into_iter()
        .zip(labels.iter())
    {
        let style = if *active {
            Style::default()
                .bg(palette.bar_highlight_bg)
                .fg(palette.bar_highlight_text)
        } else {
            Style::default()
                .bg(palette.button_disabled_bg)
                .fg(palette.button_disabled_text)
        };
        f.render_widget(Paragraph::new(label.as_str()).style(style), rect);
        hits.register(rect, *target);
    }

    // Step indicator, current step highlighted.
    let current = app.view.kind();
    let steps = [ViewKind::PolicyReview, ViewKind::PaymentMethods];
    let step_labels: Vec<String> = steps
        .iter()
        .map(|step| format!(" {} ", app.t(step.step_label())))
        .collect();
    let step_widths: Vec<u16> = step_labels.iter().map(|label| text::cell_width(label)).collect();
    for ((rect, label), step) in text::place_inline(row(1), &step_widths, GAP, rtl)
        .into_iter()
        .zip(step_labels.iter())
        .zip(steps)
    {
        let style = if step == current {
            Style::default().fg(palette.bar_highlight_text).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.bar_text)
        };
        f.render_widget(Paragraph::new(label.as_str()).style(style), rect);
    }

    let viewing = format!(
        " {} {} {}",
        app.t("Currently viewing:"),
        app.document.lang.glyph(),
        language_label(app.document.lang.code())
    );
    f.render_widget(
        Paragraph::new(viewing)
            .alignment(start_alignment(rtl))
            .style(Style::default().fg(palette.bar_text)),
        row(2),
    );
}

/// The slice of `row` holding a group of the given widths flush against the
/// end side.
fn end_group(row: Rect, widths: &[u16], rtl: bool) -> Rect {
    let gaps = GAP.saturating_mul(u16::try_from(widths.len().saturating_sub(1)).unwrap_or(0));
    let total = widths
        .iter()
        .fold(gaps, |sum, width| sum.saturating_add(*width))
        .min(row.width);
    if rtl {
        Rect::new(row.x, row.y, total, 1)
    } else {
        Rect::new(row.x + row.width - total, row.y, total, 1)
    }
}
