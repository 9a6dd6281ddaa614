use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::app::App;
use crate::content::PaymentMethod;
use crate::definitions::{ClickTarget, HitMap};
use crate::ui::theme::Palette;
use crate::ui::{button_style, start_alignment, text, theme};

const MAX_WIDTH: u16 = 72;

/// Draws the open payment method's detail over the payment view. Clicks
/// outside the panel land on the backdrop and close it.
pub fn render_detail(app: &App, f: &mut Frame, area: Rect, hits: &mut HitMap) {
    let Some(method) = app
        .view
        .payment_methods()
        .and_then(|methods| methods.open_method())
        .and_then(|index| app.content.payment_method(index))
    else {
        return;
    };
    let palette = theme::palette(&app.document);
    let rtl = app.document.is_rtl();
    hits.register(f.size(), ClickTarget::DetailBackdrop);

    let width = MAX_WIDTH.min(area.width.saturating_sub(4));
    let body_width = width.saturating_sub(4);
    let lines = detail_lines(app, palette, method, body_width);
    // Body plus borders, padding and the close button row.
    let wanted = u16::try_from(lines.len()).unwrap_or(u16::MAX).saturating_add(5);
    let height = wanted.min(area.height.saturating_sub(2));
    let panel = Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    );

    f.render_widget(Clear, panel);
    let block = Block::default()
        .title(format!(" {} ", app.t(&method.name)))
        .title_alignment(start_alignment(rtl))
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(palette.border_focus))
        .style(Style::default().bg(palette.overlay_bg).fg(palette.fg_primary));
    let inner = block.inner(panel);
    f.render_widget(block, panel);
    hits.register(panel, ClickTarget::DetailPanel);
    if inner.height < 2 || inner.width < 4 {
        return;
    }

    let body = Rect::new(inner.x + 1, inner.y + 1, inner.width - 2, inner.height - 2);
    f.render_widget(
        Paragraph::new(lines).alignment(start_alignment(rtl)),
        body,
    );

    let close = format!(" {} ", app.t("Close (Esc)"));
    let close_row = Rect::new(inner.x, inner.y + inner.height - 1, inner.width, 1);
    if let Some(rect) = text::place_inline(close_row, &[text::cell_width(&close)], 0, !rtl).first() {
        f.render_widget(
            Paragraph::new(close.as_str()).style(button_style(palette, true)),
            *rect,
        );
        hits.register(*rect, ClickTarget::CloseDetail);
    }
}

fn detail_lines(
    app: &App,
    palette: &Palette,
    method: &PaymentMethod,
    width: u16,
) -> Vec<Line<'static>> {
    let plain = Style::default().fg(palette.fg_primary);
    let dim = Style::default().fg(palette.fg_dim);
    let heading = Style::default()
        .fg(palette.accent)
        .add_modifier(Modifier::BOLD);
    let mut lines = Vec::new();
    let push_wrapped = |lines: &mut Vec<Line<'static>>, value: &str, style: Style| {
        for row in text::wrap(value, width) {
            lines.push(Line::from(Span::styled(row, style)));
        }
    };

    push_wrapped(&mut lines, app.t(&method.summary), dim);
    lines.push(Line::default());
    push_wrapped(
        &mut lines,
        &format!(
            "{}: {}",
            app.t("Processing time"),
            app.t(&method.processing_time)
        ),
        plain,
    );

    if !method.fields.is_empty() {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            app.t("Payment details").to_string(),
            heading,
        )));
        for field in &method.fields {
            push_wrapped(
                &mut lines,
                &format!("{}: {}", app.t(&field.label), field.value),
                plain,
            );
        }
    }

    if !method.instructions.is_empty() {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            app.t("Instructions").to_string(),
            heading,
        )));
        for (number, instruction) in method.instructions.iter().enumerate() {
            push_wrapped(
                &mut lines,
                &format!("{}. {}", number + 1, app.t(instruction)),
                plain,
            );
        }
    }
    lines
}
