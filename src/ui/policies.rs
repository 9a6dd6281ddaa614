//! Policy review view: tab selector, gated content, and the agree button.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
};

use super::{button_style, panel, start_alignment, text, theme};
use crate::app::App;
use crate::definitions::{ClickTarget, HitMap};
use crate::gate::GateState;

const INTRO_HEIGHT: u16 = 6;
const FOOTER_HEIGHT: u16 = 2;

/// Areas of the policy view. Computed ahead of drawing so the content can be
/// measured against the exact viewport it will be shown in.
#[derive(Debug, Clone, Copy)]
pub struct PolicyAreas {
    pub intro: Rect,
    pub content: Rect,
    pub content_inner: Rect,
    pub footer: Rect,
}

impl PolicyAreas {
    pub fn new(body: Rect) -> Self {
        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(INTRO_HEIGHT),
                Constraint::Min(3),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(body);
        let content = parts[1];
        let content_inner = Rect::new(
            content.x.saturating_add(2),
            content.y.saturating_add(1),
            content.width.saturating_sub(4),
            content.height.saturating_sub(2),
        );
        Self {
            intro: parts[0],
            content,
            content_inner,
            footer: parts[2],
        }
    }
}

/// The selected tab's content, wrapped to `width` and translated.
pub fn content_lines(app: &App, width: u16) -> Vec<Line<'static>> {
    let palette = theme::palette(&app.document);
    let Some(tab) = app
        .view
        .policy_review()
        .and_then(|review| app.content.policy(review.selected_tab()))
    else {
        return Vec::new();
    };

    let title = Style::default()
        .fg(palette.fg_heading)
        .add_modifier(Modifier::BOLD);
    let heading = Style::default()
        .fg(palette.accent)
        .add_modifier(Modifier::BOLD);
    let body = Style::default().fg(palette.fg_primary);

    let mut lines = Vec::new();
    push_wrapped(&mut lines, app.t(&tab.title), width, title);
    lines.push(Line::default());
    for section in &tab.sections {
        push_wrapped(&mut lines, &app.t(&section.heading).to_uppercase(), width, heading);
        for paragraph in section.content.paragraphs() {
            if paragraph.trim().is_empty() {
                lines.push(Line::default());
            } else {
                push_wrapped(&mut lines, app.t(paragraph), width, body);
            }
        }
        lines.push(Line::default());
    }
    lines
}

fn push_wrapped(lines: &mut Vec<Line<'static>>, value: &str, width: u16, style: Style) {
    lines.extend(
        text::wrap(value, width)
            .into_iter()
            .map(|row| Line::from(Span::styled(row, style))),
    );
}

pub fn render(
    app: &App,
    f: &mut Frame,
    areas: &PolicyAreas,
    lines: Vec<Line<'static>>,
    hits: &mut HitMap,
) {
    let Some(review) = app.view.policy_review() else {
        return;
    };
    render_intro(app, f, areas.intro, review.selected_tab(), hits);
    render_content(app, f, areas, lines, hits);
    render_footer(app, f, areas.footer, review.gate_state(), hits);
}

fn render_intro(app: &App, f: &mut Frame, area: Rect, selected: usize, hits: &mut HitMap) {
    let palette = theme::palette(&app.document);
    let rtl = app.document.is_rtl();
    let block = panel(palette);
    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.height < 4 {
        return;
    }
    let row = |offset: u16| Rect::new(inner.x + 1, inner.y + offset, inner.width.saturating_sub(2), 1);

    let eyebrow = Style::default()
        .fg(palette.accent)
        .add_modifier(Modifier::BOLD);
    f.render_widget(
        Paragraph::new(app.t("Live translation").to_uppercase())
            .alignment(start_alignment(rtl))
            .style(eyebrow),
        row(0),
    );
    let language = format!("🌐 {}", app.document.lang.label());
    f.render_widget(
        Paragraph::new(language)
            .alignment(if rtl { Alignment::Left } else { Alignment::Right })
            .style(Style::default().fg(palette.fg_dim)),
        row(0),
    );

    f.render_widget(
        Paragraph::new(app.t("Service & Policy Selection"))
            .alignment(start_alignment(rtl))
            .style(
                Style::default()
                    .fg(palette.fg_heading)
                    .add_modifier(Modifier::BOLD),
            ),
        row(1),
    );
    f.render_widget(
        Paragraph::new(app.t("Select a category and review the corresponding policy"))
            .alignment(start_alignment(rtl))
            .style(Style::default().fg(palette.fg_dim)),
        row(2),
    );

    let labels: Vec<String> = app
        .content
        .policies
        .iter()
        .map(|tab| format!(" {} ", app.t(&tab.label)))
        .collect();
    let widths: Vec<u16> = labels.iter().map(|label| text::cell_width(label)).collect();
    for (index, (rect, label)) in text::place_inline(row(3), &widths, 1, rtl)
        .into_iter()
        .zip(labels.iter())
        .enumerate()
    {
        let style = if index == selected {
            Style::default()
                .bg(palette.selection_bg)
                .fg(palette.selection_fg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .bg(palette.button_disabled_bg)
                .fg(palette.fg_primary)
        };
        f.render_widget(Paragraph::new(label.as_str()).style(style), rect);
        hits.register(rect, ClickTarget::PolicyTab(index));
    }
}

fn render_content(
    app: &App,
    f: &mut Frame,
    areas: &PolicyAreas,
    lines: Vec<Line<'static>>,
    hits: &mut HitMap,
) {
    let palette = theme::palette(&app.document);
    let rtl = app.document.is_rtl();
    let Some(review) = app.view.policy_review() else {
        return;
    };
    let block = panel(palette).border_style(Style::default().fg(palette.border_focus));
    f.render_widget(block, areas.content);

    let offset = u16::try_from(review.offset()).unwrap_or(u16::MAX);
    f.render_widget(
        Paragraph::new(lines)
            .alignment(start_alignment(rtl))
            .scroll((offset, 0)),
        areas.content_inner,
    );
    hits.register(areas.content, ClickTarget::PolicyContent);

    if let Some(metrics) = review.metrics() {
        let max = usize::try_from(metrics.max_offset()).unwrap_or(0);
        if max > 0 {
            let track = Rect::new(
                areas.content.x,
                areas.content.y.saturating_add(1),
                areas.content.width,
                areas.content.height.saturating_sub(2),
            );
            let mut state = ScrollbarState::new(max)
                .position(usize::try_from(review.offset()).unwrap_or(0));
            let orientation = if rtl {
                ScrollbarOrientation::VerticalLeft
            } else {
                ScrollbarOrientation::VerticalRight
            };
            f.render_stateful_widget(
                Scrollbar::new(orientation)
                    .style(Style::default().fg(palette.border_focus)),
                track,
                &mut state,
            );
        }
    }
}

fn render_footer(app: &App, f: &mut Frame, area: Rect, gate: GateState, hits: &mut HitMap) {
    let palette = theme::palette(&app.document);
    let enabled = gate == GateState::Complete;

    let label = format!(" {} ", app.t("I AGREE TO THE POLICY"));
    let width = text::cell_width(&label).min(area.width);
    let button = Rect::new(area.x + (area.width - width) / 2, area.y, width, 1);
    f.render_widget(
        Paragraph::new(label.as_str()).style(button_style(palette, enabled)),
        button,
    );
    hits.register(button, ClickTarget::Agree);

    if !enabled && area.height > 1 {
        let hint_row = Rect::new(area.x, area.y + 1, area.width, 1);
        f.render_widget(
            Paragraph::new(app.t("Please scroll to the bottom to continue"))
                .alignment(Alignment::Center)
                .style(Style::default().fg(palette.fg_dim)),
            hint_row,
        );
    }
}
